//! Farsi catalog

pub(super) fn get(key: &str) -> Option<&'static str> {
    ENTRIES.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const ENTRIES: &[(&str, &str)] = &[
    // Onboarding
    ("welcome", "👋 خوش آمدید، {name}!\n\nمن لونا، دستیار شخصی شما برای چرخه قاعدگی هستم. برای شروع، لطفاً زبان خود را انتخاب کنید:"),
    ("welcome_back", "👋 خوش آمدید، {name}!\n\nبرای دیدن امکانات دستور /help را وارد کنید."),
    ("language_prompt", "لطفاً زبان خود را انتخاب کنید:"),
    ("language_set", "✅ زبان شما به **{lang}** تغییر کرد."),
    ("role_prompt", "عالی! حالا لطفاً نقش خود را مشخص کنید:"),
    ("role_primary", "🚺 من چرخه قاعدگی‌ام را دنبال می‌کنم"),
    ("role_partner", "🤝 من از شریک زندگی‌ام حمایت می‌کنم"),
    ("calendar_prompt", "بسیار خب! حالا لطفاً سیستم تقویم مورد نظر خود را انتخاب کنید."),
    ("calendar_gregorian", "🗓️ میلادی"),
    ("calendar_jalali", "🌙 شمسی (هجری)"),
    ("calendar_name_gregorian", "میلادی"),
    ("calendar_name_jalali", "شمسی (هجری)"),
    ("calendar_set", "✅ تقویم شما به **{calendar}** تغییر کرد."),
    ("setup_complete", "🎉 **راه‌اندازی کامل شد!** 🎉\n\nتقویم شما بر روی {emoji} {calendar} تنظیم شد.\n\nبرای دیدن امکانات دستور /help را وارد کنید."),
    ("partner_role_info", "✅ متوجه شدم. شما آماده‌اید!\n\nبرای اتصال به شریک زندگی‌تان، از او بخواهید با دستور `/partner` یک کد اتصال بسازد، سپس `/start code:<کد>` را اجرا کنید."),
    ("role_already_assigned", "شما قبلاً نقش خود را انتخاب کرده‌اید. برای تغییر آن از `/role` استفاده کنید."),
    ("onboarding_required", "لطفاً ابتدا دستور `/start` را اجرا کنید."),
    ("choose_role_first", "لطفاً ابتدا نقش خود را انتخاب کنید."),

    // Help
    ("help_title", "❓ **راهنمای ربات لونا**\n\nاین‌ها کارهایی است که من می‌توانم انجام دهم:\n\n"),
    ("help_primary", "**/track** - 🩸 ثبت شروع یا پایان دوره قاعدگی.\n**/symptoms** - 🤒 ثبت علائم روزانه.\n**/history** - 📈 مشاهده تاریخچه و پیش‌بینی‌ها.\n**/partner** - 🤝 ساخت کد اتصال برای شریک زندگی.\n**/reminders** - 🔔 مدیریت یادآوری‌ها.\n**/settings** - ⚙️ تغییر زبان یا تقویم.\n**/role** - 🔄 تغییر نقش.\n"),
    ("help_partner", "**/status** - ❤️ بررسی وضعیت فعلی شریک زندگی‌تان.\n**/settings** - ⚙️ تغییر زبان یا تقویم.\n**/role** - 🔄 تغییر نقش.\n"),
    ("help_unassigned", "**/start** - 👋 راه‌اندازی حساب کاربری.\n"),
    ("help_footer", "\n**/help** - ❓ نمایش مجدد این پیام راهنما."),

    // Partner
    ("partner_invite", "💌 **کد اتصال شریک زندگی**\n\nاین کد را با شریک خود به اشتراک بگذارید. او می‌تواند با این دستور متصل شود:\n\n`/start code:{code}`\n\nاین کد فقط یک بار قابل استفاده است و ساختن کد جدید جایگزین آن می‌شود."),
    ("primary_only_command", "این دستور فقط برای کاربرانی که چرخه خود را دنبال می‌کنند در دسترس است."),
    ("partner_only_command", "این دستور فقط برای کاربرانی که از شریک زندگی خود حمایت می‌کنند در دسترس است."),
    ("partner_connected_to_you", "💞 شما اکنون به **{name}** متصل شدید!"),
    ("partner_connected_to_them", "💞 شما اکنون به **{name}** متصل شدید!\n\nمی‌توانید از دستور `/status` برای باخبر شدن از وضعیت او استفاده کنید."),
    ("partner_link_invalid", "این کد اتصال نامعتبر است یا قبلاً استفاده شده. لطفاً از شریک خود بخواهید یک کد جدید بسازد."),
    ("partner_join_primary", "شما در حال دنبال کردن چرخه خود هستید. برای اتصال، ابتدا با `/role` نقش خود را تغییر دهید."),
    ("partner_not_linked", "شما هنوز به کسی متصل نیستید. از شریک خود بخواهید دستور `/partner` را اجرا کند و کد را با شما به اشتراک بگذارد."),
    ("partner_disconnected", "💔 **{name}** نقش خود را تغییر داد و اتصال شما قطع شد."),
    ("partner_event_period_start", "💌 **{name}** شروع دوره را برای {date} ثبت کرد."),
    ("partner_event_period_end", "💌 **{name}** پایان دوره را برای {date} ثبت کرد."),
    ("partner_event_symptom", "💌 **{name}** یک علامت ثبت کرد: {symptom}."),

    // Role change
    ("role_change_title", "🔄 **تغییر نقش**\n\nکدام نقش را می‌خواهید؟"),
    ("role_change_prompt", "⚠️ **مطمئن هستید؟**\n\nتغییر به **{role}** اتصال شریک شما را قطع می‌کند و تمام داده‌های چرخه و علائم شما برای همیشه حذف می‌شود."),
    ("role_change_confirm", "✅ بله، تغییر بده"),
    ("role_change_cancel", "❌ انصراف"),
    ("role_change_done", "✅ نقش شما اکنون **{role}** است."),
    ("role_change_cancelled", "👍 چیزی تغییر نکرد."),
    ("role_change_same", "شما در حال حاضر همین نقش را دارید."),
    ("role_name_primary", "دنبال کردن چرخه خودم"),
    ("role_name_partner", "حمایت از شریک زندگی"),

    // Settings
    ("settings_title", "⚙️ **تنظیمات**\n\nلطفاً انتخاب کنید چه چیزی را می‌خواهید تغییر دهید:"),
    ("settings_language", "🌐 زبان"),
    ("settings_calendar", "🗓️ تقویم"),

    // Reminders
    ("reminders_title", "🔔 **تنظیمات یادآوری**\n\nیادآوری‌ها در حال حاضر: **{status}**\n\nیک زمان برای دریافت پیش‌بینی‌های PMS و قاعدگی انتخاب کنید، یا آن را خاموش کنید."),
    ("reminders_status_on", "روشن ({time})"),
    ("reminders_status_off", "خاموش"),
    ("reminders_updated", "🔔 **تنظیمات یادآوری به‌روز شد.**\n\nوضعیت فعلی: **{status}**"),
    ("reminders_updated_status_on", "روشن، تنظیم برای {time}"),
    ("reminders_turn_off", "❌ خاموش کردن یادآوری‌ها"),
    ("reminder_pms", "🔔 یادآوری: دوره قاعدگی شما {days} روز دیگر پیش‌بینی شده است. ممکن است علائم PMS را تجربه کنید."),
    ("reminder_tomorrow", "🔔 یادآوری: دوره قاعدگی شما فردا شروع می‌شود."),
    ("reminder_partner_pms", "🔔 یادآوری درباره {name}: دوره قاعدگی او {days} روز دیگر پیش‌بینی شده است. ممکن است به‌زودی علائم PMS را تجربه کند."),
    ("reminder_partner_tomorrow", "🔔 یادآوری درباره {name}: دوره قاعدگی او فردا شروع می‌شود."),

    // Tracking
    ("track_title", "🩸 **ثبت دوره قاعدگی**\n\nچگونه می‌خواهید تاریخ قاعدگی خود را ثبت کنید؟"),
    ("track_today", "امروز"),
    ("track_pick_date", "انتخاب یک تاریخ دیگر"),
    ("track_start_or_end", "🩸 آیا **شروع** یا **پایان** دوره را ثبت می‌کنید؟"),
    ("track_start_date", "تاریخ شروع"),
    ("track_end_date", "تاریخ پایان"),
    ("calendar_select_date", "📅 لطفاً یک تاریخ انتخاب کنید:"),
    ("log_start_success", "✅ شروع دوره برای **{date}** ثبت شد.\n\nاکنون می‌توانید علائم خود را با /symptoms ثبت کنید."),
    ("log_end_success", "✅ پایان دوره برای **{date}** ثبت شد."),
    ("log_start_fail_active", "شما یک دوره فعال دارید. ابتدا پایان آن را ثبت کنید."),
    ("log_end_fail_no_active", "دوره فعالی برای پایان دادن وجود ندارد. ابتدا شروع دوره را ثبت کنید."),
    ("log_end_before_start", "تاریخ پایان نمی‌تواند قبل از شروع دوره باشد."),

    // History
    ("history_title", "**📈 تاریخچه دوره‌های اخیر**\n"),
    ("history_entry", "- {emoji} از {start} تا {end}\n"),
    ("prediction_title", "\n**🔮 پیش‌بینی چرخه شما**\n"),
    ("avg_period", "**میانگین دوره قاعدگی:** {days} روز\n"),
    ("avg_cycle", "**میانگین چرخه:** {days} روز\n\n"),
    ("predicted_start", "**شروع دوره بعدی:** {emoji} {date}\n\n"),
    ("prediction_footer", "_این پیش‌بینی بر اساس {count} چرخه اخیر شماست._"),
    ("history_not_enough_data", "شما هنوز هیچ چرخه کاملی را ثبت نکرده‌اید. برای شروع از `/track` استفاده کنید!"),
    ("history_need_one_more", "\n_برای دریافت پیش‌بینی، یک چرخه کامل دیگر را ثبت کنید!_"),
    ("seed_success", "🌱 داده‌های نمونه اضافه شد: سه چرخه کامل. دستور `/history` را امتحان کنید."),

    // Symptoms
    ("symptoms_title", "🤒 **ثبت علائم**\n\nچه علامتی را برای امروز می‌خواهید ثبت کنید؟"),
    ("symptoms_need_active", "شما فقط در طول یک دوره فعال می‌توانید علائم را ثبت کنید. لطفاً ابتدا شروع دوره را با `/track` ثبت کنید."),
    ("symptom_logged", "✅ علامت ثبت شد: **{symptom}**.\n\nمی‌توانید علامت دیگری ثبت کنید یا از دستور دیگری استفاده کنید."),
    ("symptom_cramps", "گرفتگی"),
    ("symptom_headache", "سردرد"),
    ("symptom_fatigue", "خستگی"),
    ("symptom_nausea", "حالت تهوع"),
    ("symptom_bloating", "نفخ"),
    ("symptom_mood_swings", "نوسانات خلقی"),

    // Status
    ("status_title", "❤️ **وضعیت {name}**\n\n"),
    ("status_on_period", "🩸 در حال حاضر در **روز {day}** دوره قاعدگی خود است."),
    ("status_in_cycle", "🌸 در حال حاضر در **روز {day}** چرخه خود است."),
    ("status_symptoms_today", "\n\n**علائم ثبت شده امروز:**\n- {symptoms}"),
    ("status_no_symptoms", "\n\n_هیچ علامتی برای امروز ثبت نشده است._"),
    ("status_no_data", "{name} هنوز هیچ داده‌ای از چرخه خود ثبت نکرده است."),

    // General
    ("generic_failure", "😵 مشکلی پیش آمد. لطفاً کمی بعد دوباره امتحان کنید."),
    ("invalid_action", "این دکمه دیگر معتبر نیست."),
    ("rate_limited", "⏳ کمی سریع پیش می‌روید. لطفاً لحظه‌ای صبر کنید."),
];
