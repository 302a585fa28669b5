//! English catalog

pub(super) fn get(key: &str) -> Option<&'static str> {
    ENTRIES.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub(super) const ENTRIES: &[(&str, &str)] = &[
    // Onboarding
    ("welcome", "👋 Welcome, {name}!\n\nI'm Luna, your personal cycle assistant. To get started, please choose your language:"),
    ("welcome_back", "👋 Welcome back, {name}!\n\nType /help to see what I can do."),
    ("language_prompt", "Please choose your language:"),
    ("language_set", "✅ Your language has been set to **{lang}**."),
    ("role_prompt", "Great! Now, please tell me your role:"),
    ("role_primary", "🚺 I'm tracking my cycle"),
    ("role_partner", "🤝 I'm supporting a partner"),
    ("calendar_prompt", "Excellent! Now, please choose your preferred calendar system."),
    ("calendar_gregorian", "🗓️ Gregorian"),
    ("calendar_jalali", "🌙 Shamsi (Jalali)"),
    ("calendar_name_gregorian", "Gregorian"),
    ("calendar_name_jalali", "Shamsi (Jalali)"),
    ("calendar_set", "✅ Your calendar has been set to **{calendar}**."),
    ("setup_complete", "🎉 **Setup Complete!** 🎉\n\nYour calendar is set to {emoji} {calendar}.\n\nType /help to see what I can do."),
    ("partner_role_info", "✅ Got it. You're all set!\n\nTo connect with your partner, ask them to generate a pairing code with the `/partner` command, then run `/start code:<code>`."),
    ("role_already_assigned", "You already have a role. Use `/role` to change it."),
    ("onboarding_required", "Please run `/start` first so I can set you up."),
    ("choose_role_first", "Please choose your role first."),

    // Help
    ("help_title", "❓ **Luna Bot Help**\n\nHere's what I can do:\n\n"),
    ("help_primary", "**/track** - 🩸 Log your period.\n**/symptoms** - 🤒 Log your symptoms.\n**/history** - 📈 View history & predictions.\n**/partner** - 🤝 Invite your partner.\n**/reminders** - 🔔 Manage reminders.\n**/settings** - ⚙️ Change language or calendar.\n**/role** - 🔄 Change your role.\n"),
    ("help_partner", "**/status** - ❤️ Check your partner's status.\n**/settings** - ⚙️ Change language or calendar.\n**/role** - 🔄 Change your role.\n"),
    ("help_unassigned", "**/start** - 👋 Set up your account.\n"),
    ("help_footer", "\n**/help** - ❓ Show this help message again."),

    // Partner
    ("partner_invite", "💌 **Partner Pairing Code**\n\nShare this code with your partner. They can connect by running:\n\n`/start code:{code}`\n\nThe code works once. Generating a new one replaces it."),
    ("primary_only_command", "This command is only for users tracking their cycle."),
    ("partner_only_command", "This command is only for users supporting a partner."),
    ("partner_connected_to_you", "💞 You are now connected with **{name}**!"),
    ("partner_connected_to_them", "💞 You are now connected with **{name}**!\n\nYou can use the `/status` command to check in on them."),
    ("partner_link_invalid", "This pairing code is invalid or has already been used. Please ask your partner to generate a new one."),
    ("partner_join_primary", "You are tracking your own cycle. Use `/role` to switch to the partner role before joining."),
    ("partner_not_linked", "You're not connected to anyone yet. Ask your partner to run `/partner` and share the code."),
    ("partner_disconnected", "💔 **{name}** changed their role, so you are no longer connected."),
    ("partner_event_period_start", "💌 **{name}** logged a period start on {date}."),
    ("partner_event_period_end", "💌 **{name}** logged a period end on {date}."),
    ("partner_event_symptom", "💌 **{name}** logged a symptom: {symptom}."),

    // Role change
    ("role_change_title", "🔄 **Change Role**\n\nWhich role would you like?"),
    ("role_change_prompt", "⚠️ **Are you sure?**\n\nSwitching to **{role}** will disconnect your partner and permanently delete all of your cycle and symptom data."),
    ("role_change_confirm", "✅ Yes, switch"),
    ("role_change_cancel", "❌ Cancel"),
    ("role_change_done", "✅ Your role is now **{role}**."),
    ("role_change_cancelled", "👍 Nothing changed."),
    ("role_change_same", "You already have that role."),
    ("role_name_primary", "tracking my cycle"),
    ("role_name_partner", "supporting a partner"),

    // Settings
    ("settings_title", "⚙️ **Settings**\n\nPlease choose what you'd like to change:"),
    ("settings_language", "🌐 Language"),
    ("settings_calendar", "🗓️ Calendar"),

    // Reminders
    ("reminders_title", "🔔 **Reminder Settings**\n\nReminders are currently: **{status}**\n\nChoose a time to receive PMS and period predictions, or turn them off."),
    ("reminders_status_on", "On ({time})"),
    ("reminders_status_off", "Off"),
    ("reminders_updated", "🔔 **Reminder settings updated.**\n\nThey are now: **{status}**"),
    ("reminders_updated_status_on", "On, set for {time}"),
    ("reminders_turn_off", "❌ Turn Off Reminders"),
    ("reminder_pms", "🔔 Reminder: Your period is predicted in {days} days. You might start to experience PMS symptoms."),
    ("reminder_tomorrow", "🔔 Reminder: Your period is predicted to start tomorrow."),
    ("reminder_partner_pms", "🔔 Reminder for {name}: Their period is predicted in {days} days. They might start to experience PMS symptoms soon."),
    ("reminder_partner_tomorrow", "🔔 Reminder for {name}: Their period is predicted to start tomorrow."),

    // Tracking
    ("track_title", "🩸 **Log Your Period**\n\nHow would you like to log your period date?"),
    ("track_today", "Today"),
    ("track_pick_date", "Pick a Different Date"),
    ("track_start_or_end", "🩸 Are you logging a period **start** or **end**?"),
    ("track_start_date", "Start Date"),
    ("track_end_date", "End Date"),
    ("calendar_select_date", "📅 Please select a date:"),
    ("log_start_success", "✅ Period start logged for **{date}**.\n\nYou can now log symptoms with /symptoms."),
    ("log_end_success", "✅ Period end logged for **{date}**."),
    ("log_start_fail_active", "You already have an active period. Log its end first."),
    ("log_end_fail_no_active", "There is no active period to end. Log a start first."),
    ("log_end_before_start", "The end date can't be before the period started."),

    // History
    ("history_title", "**📈 Recent Period History**\n"),
    ("history_entry", "- {emoji} {start} to {end}\n"),
    ("prediction_title", "\n**🔮 Your Cycle Prediction**\n"),
    ("avg_period", "**Average Period:** {days} days\n"),
    ("avg_cycle", "**Average Cycle:** {days} days\n\n"),
    ("predicted_start", "**Predicted Next Period:** {emoji} {date}\n\n"),
    ("prediction_footer", "_This prediction is based on your last {count} cycles._"),
    ("history_not_enough_data", "You haven't logged any complete cycles yet. Use `/track` to get started!"),
    ("history_need_one_more", "\n_Log one more complete cycle to get predictions!_"),
    ("seed_success", "🌱 Sample data added: three complete cycles. Try `/history`."),

    // Symptoms
    ("symptoms_title", "🤒 **Log a Symptom**\n\nWhat symptom would you like to log for today?"),
    ("symptoms_need_active", "You can only log symptoms during an active period. Please log a period start using `/track` first."),
    ("symptom_logged", "✅ Symptom logged: **{symptom}**.\n\nYou can log another or use a different command."),
    ("symptom_cramps", "Cramps"),
    ("symptom_headache", "Headache"),
    ("symptom_fatigue", "Fatigue"),
    ("symptom_nausea", "Nausea"),
    ("symptom_bloating", "Bloating"),
    ("symptom_mood_swings", "Mood Swings"),

    // Status
    ("status_title", "❤️ **{name}'s Status**\n\n"),
    ("status_on_period", "🩸 Currently on **Day {day}** of their period."),
    ("status_in_cycle", "🌸 Currently on **Day {day}** of their cycle."),
    ("status_symptoms_today", "\n\n**Symptoms Logged Today:**\n- {symptoms}"),
    ("status_no_symptoms", "\n\n_No symptoms logged for today._"),
    ("status_no_data", "{name} hasn't logged any cycle data yet."),

    // General
    ("generic_failure", "😵 Something went wrong. Please try again in a moment."),
    ("invalid_action", "That button is no longer valid."),
    ("rate_limited", "⏳ You're going a bit fast. Please wait a moment."),
];
