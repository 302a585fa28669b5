//! Account command handlers
//!
//! Handles: start, help, settings, role
//!
//! Also serves the onboarding buttons (language, role, calendar), the
//! settings menus and the two-step role change.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.2.0: Confirm/cancel step before a role change
//! - 1.1.0: Join a partner through `/start code:<code>`
//! - 1.0.0: Onboarding flow and help

use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::{language_of, require_registered};
use crate::commands::action::{Action, SettingsMenu};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::core::{Button, Keyboard, LunaError, OutgoingMessage, Reply, Result};
use crate::database::{Role, User, UserId};
use crate::features::calendar::CalendarSystem;
use crate::features::locales::{t, t_with, Language};
use crate::features::pairing::{JoinOutcome, OnboardingState};

/// Handler for account commands: start, help, settings, role
pub struct AccountHandler;

#[async_trait]
impl CommandHandler for AccountHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "help", "settings", "role"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<Reply> {
        match request.name.as_str() {
            "start" => self.handle_start(&ctx, request).await,
            "help" => self.handle_help(&ctx, request).await,
            "settings" => self.handle_settings(&ctx, request).await,
            "role" => self.handle_role(&ctx, request).await,
            other => Err(LunaError::validation(format!("unknown command '{other}'"))),
        }
    }
}

impl AccountHandler {
    /// Handle /start: register, then resume onboarding or join a partner
    async fn handle_start(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<Reply> {
        let (user, created) = ctx
            .pairing
            .register(request.user_id, &request.display_name)
            .await?;
        debug!("/start from user {} (new: {created})", user.id);

        if let Some(code) = request.argument.as_deref().filter(|c| !c.trim().is_empty()) {
            return join_partner(ctx, &user, code).await;
        }

        let lang = user.lang();
        let name = [("name", user.display_name.as_str())];
        Ok(match OnboardingState::of(&user) {
            OnboardingState::Unassigned => Reply::Send(OutgoingMessage::with_keyboard(
                t_with("welcome", lang, &name),
                language_keyboard(),
            )),
            OnboardingState::RolePending => Reply::Send(OutgoingMessage::with_keyboard(
                t("role_prompt", lang),
                role_keyboard(lang, Action::SetRole),
            )),
            OnboardingState::PrimaryNoCalendar => Reply::Send(OutgoingMessage::with_keyboard(
                t("calendar_prompt", lang),
                calendar_keyboard(lang),
            )),
            _ => Reply::send(t_with("welcome_back", lang, &name)),
        })
    }

    /// Handle /help, listing the commands of the caller's role
    async fn handle_help(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<Reply> {
        let user = ctx.user(request.user_id).await?;
        let lang = user.as_ref().map(User::lang).unwrap_or_default();
        let body = match user.and_then(|u| u.role) {
            Some(Role::Primary) => "help_primary",
            Some(Role::Partner) => "help_partner",
            None => "help_unassigned",
        };
        Ok(Reply::send(format!(
            "{}{}{}",
            t("help_title", lang),
            t(body, lang),
            t("help_footer", lang)
        )))
    }

    async fn handle_settings(
        &self,
        ctx: &CommandContext,
        request: &CommandRequest,
    ) -> Result<Reply> {
        let user = match require_registered(ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };
        let lang = user.lang();
        Ok(Reply::Send(OutgoingMessage::with_keyboard(
            t("settings_title", lang),
            Keyboard::new().row(vec![
                Button::new(
                    t("settings_language", lang),
                    Action::Settings(SettingsMenu::Language).encode(),
                ),
                Button::new(
                    t("settings_calendar", lang),
                    Action::Settings(SettingsMenu::Calendar).encode(),
                ),
            ]),
        )))
    }

    async fn handle_role(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<Reply> {
        let user = match require_registered(ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };
        let lang = user.lang();
        Ok(match user.role {
            None => Reply::Send(OutgoingMessage::with_keyboard(
                t("choose_role_first", lang),
                role_keyboard(lang, Action::SetRole),
            )),
            Some(_) => Reply::Send(OutgoingMessage::with_keyboard(
                t("role_change_title", lang),
                role_keyboard(lang, Action::SetNewRole),
            )),
        })
    }
}

async fn join_partner(ctx: &CommandContext, user: &User, code: &str) -> Result<Reply> {
    match ctx.pairing.join(user.id, code).await {
        Ok(JoinOutcome { primary, partner }) => {
            ctx.notify(
                primary.id,
                &t_with(
                    "partner_connected_to_you",
                    primary.lang(),
                    &[("name", &partner.display_name)],
                ),
            )
            .await;
            Ok(Reply::send(t_with(
                "partner_connected_to_them",
                partner.lang(),
                &[("name", &primary.display_name)],
            )))
        }
        Err(LunaError::NotFound(_)) => Ok(Reply::send(link_invalid(user))),
        Err(LunaError::Conflict(_)) => Ok(Reply::send(t("partner_join_primary", user.lang()))),
        Err(e) => Err(e),
    }
}

/// Invalid-code notice; users who have not picked a language get every language
fn link_invalid(user: &User) -> String {
    match user.language {
        Some(lang) => t("partner_link_invalid", lang),
        None => Language::ALL
            .iter()
            .map(|lang| t("partner_link_invalid", *lang))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

pub(crate) fn role_name(role: Role, lang: Language) -> String {
    t(&format!("role_name_{}", role.code()), lang)
}

pub(crate) fn calendar_name(calendar: CalendarSystem, lang: Language) -> String {
    t(&format!("calendar_name_{}", calendar.code()), lang)
}

pub(crate) fn language_keyboard() -> Keyboard {
    Keyboard::new().row(
        Language::ALL
            .iter()
            .map(|lang| {
                Button::new(
                    format!("{} {}", lang.flag(), lang.native_name()),
                    Action::SetLanguage(*lang).encode(),
                )
            })
            .collect(),
    )
}

/// Both roles, each wired to `action`
pub(crate) fn role_keyboard(lang: Language, action: fn(Role) -> Action) -> Keyboard {
    Keyboard::column(
        Role::ALL
            .iter()
            .map(|role| Button::new(t(&format!("role_{}", role.code()), lang), action(*role).encode())),
    )
}

pub(crate) fn calendar_keyboard(lang: Language) -> Keyboard {
    Keyboard::column(CalendarSystem::ALL.iter().map(|calendar| {
        Button::new(
            t(&format!("calendar_{}", calendar.code()), lang),
            Action::SetCalendar(*calendar).encode(),
        )
    }))
}

/// `set_language_*`
pub async fn set_language(
    ctx: &CommandContext,
    user_id: UserId,
    language: Language,
) -> Result<Reply> {
    let user = ctx.pairing.set_language(user_id, language).await?;
    Ok(match OnboardingState::of(&user) {
        OnboardingState::RolePending => Reply::Edit(OutgoingMessage::with_keyboard(
            t("role_prompt", language),
            role_keyboard(language, Action::SetRole),
        )),
        _ => Reply::edit(t_with(
            "language_set",
            language,
            &[("lang", language.native_name())],
        )),
    })
}

/// `set_role_*`: the first role choice
pub async fn set_role(ctx: &CommandContext, user_id: UserId, role: Role) -> Result<Reply> {
    match ctx.pairing.assign_role(user_id, role).await {
        Ok(user) => {
            let lang = user.lang();
            info!("🧭 User {user_id} chose role {role}");
            Ok(match role {
                Role::Primary => Reply::Edit(OutgoingMessage::with_keyboard(
                    t("calendar_prompt", lang),
                    calendar_keyboard(lang),
                )),
                Role::Partner => Reply::edit(t("partner_role_info", lang)),
            })
        }
        Err(LunaError::Conflict(_)) => {
            let user = match require_registered(ctx, user_id).await? {
                Ok(user) => user,
                Err(reply) => return Ok(reply),
            };
            let lang = user.lang();
            // Language comes first, send stale role buttons back there
            if OnboardingState::of(&user) == OnboardingState::Unassigned {
                return Ok(Reply::Edit(OutgoingMessage::with_keyboard(
                    t("language_prompt", lang),
                    language_keyboard(),
                )));
            }
            Ok(Reply::alert(t("role_already_assigned", lang)))
        }
        Err(e) => Err(e),
    }
}

/// `set_calendar_*`, finishing onboarding for a new primary
pub async fn set_calendar(
    ctx: &CommandContext,
    user_id: UserId,
    calendar: CalendarSystem,
) -> Result<Reply> {
    let before = match require_registered(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    let user = ctx.pairing.set_calendar(user_id, calendar).await?;
    let lang = user.lang();
    let name = calendar_name(calendar, lang);

    if OnboardingState::of(&before) == OnboardingState::PrimaryNoCalendar {
        info!("🎉 User {user_id} finished onboarding");
        return Ok(Reply::edit(t_with(
            "setup_complete",
            lang,
            &[("emoji", calendar.emoji()), ("calendar", &name)],
        )));
    }
    Ok(Reply::edit(t_with("calendar_set", lang, &[("calendar", &name)])))
}

/// `settings_language` / `settings_calendar`
pub async fn settings_menu(
    ctx: &CommandContext,
    user_id: UserId,
    menu: SettingsMenu,
) -> Result<Reply> {
    let lang = match require_registered(ctx, user_id).await? {
        Ok(user) => user.lang(),
        Err(reply) => return Ok(reply),
    };
    Ok(Reply::Edit(match menu {
        SettingsMenu::Language => {
            OutgoingMessage::with_keyboard(t("language_prompt", lang), language_keyboard())
        }
        SettingsMenu::Calendar => {
            OutgoingMessage::with_keyboard(t("calendar_prompt", lang), calendar_keyboard(lang))
        }
    }))
}

/// `set_new_role_*`: ask before anything is deleted
pub async fn set_new_role(ctx: &CommandContext, user_id: UserId, role: Role) -> Result<Reply> {
    match ctx.pairing.request_role_change(user_id, role).await {
        Ok(user) => {
            let lang = user.lang();
            Ok(Reply::Edit(OutgoingMessage::with_keyboard(
                t_with("role_change_prompt", lang, &[("role", &role_name(role, lang))]),
                Keyboard::new().row(vec![
                    Button::new(
                        t("role_change_confirm", lang),
                        Action::ConfirmNewRole(role).encode(),
                    ),
                    Button::new(t("role_change_cancel", lang), Action::CancelNewRole.encode()),
                ]),
            )))
        }
        Err(e) => role_change_refused(ctx, user_id, e).await,
    }
}

/// `confirm_new_role_*`
pub async fn confirm_new_role(ctx: &CommandContext, user_id: UserId, role: Role) -> Result<Reply> {
    let outcome = match ctx.pairing.confirm_role_change(user_id, role).await {
        Ok(outcome) => outcome,
        Err(e) => return role_change_refused(ctx, user_id, e).await,
    };

    let user = &outcome.user;
    if let Some(former) = &outcome.former_partner {
        ctx.notify(
            former.id,
            &t_with(
                "partner_disconnected",
                former.lang(),
                &[("name", &user.display_name)],
            ),
        )
        .await;
    }

    let lang = user.lang();
    let done = t_with("role_change_done", lang, &[("role", &role_name(role, lang))]);
    Ok(match role {
        Role::Primary if user.calendar.is_none() => Reply::Edit(OutgoingMessage::with_keyboard(
            format!("{done}\n\n{}", t("calendar_prompt", lang)),
            calendar_keyboard(lang),
        )),
        Role::Primary => Reply::edit(done),
        Role::Partner => Reply::edit(format!("{done}\n\n{}", t("partner_role_info", lang))),
    })
}

/// `cancel_new_role`
pub async fn cancel_new_role(ctx: &CommandContext, user_id: UserId) -> Result<Reply> {
    ctx.pairing.cancel_role_change(user_id);
    Ok(Reply::edit(t("role_change_cancelled", language_of(ctx, user_id).await?)))
}

async fn role_change_refused(
    ctx: &CommandContext,
    user_id: UserId,
    error: LunaError,
) -> Result<Reply> {
    let lang = language_of(ctx, user_id).await?;
    match error {
        LunaError::Conflict(_) => Ok(Reply::alert(t("role_change_same", lang))),
        LunaError::Forbidden(_) => Ok(Reply::Edit(OutgoingMessage::with_keyboard(
            t("choose_role_first", lang),
            role_keyboard(lang, Action::SetRole),
        ))),
        e => Err(e),
    }
}
