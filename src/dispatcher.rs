//! # Interaction Dispatcher
//!
//! Single entry point for everything a user sends. Applies the per-user
//! throttle, routes slash commands through the [`CommandRegistry`] and button
//! codes through [`Action`], and turns every error into a reply so the
//! transport always has something to answer with.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Transport-neutral Inbound/Reply; button codes decoded into Action
//! - 1.0.0: Component interaction routing

use log::{debug, error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::handlers::{account, reminders, tracking};
use crate::commands::{Action, CommandContext, CommandRegistry, CommandRequest, Inbound, Payload};
use crate::core::{LunaError, Reply, Result};
use crate::database::UserId;
use crate::features::locales::{t, Language};
use crate::rate_limiter::RateLimiter;

pub struct Dispatcher {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
    rate_limiter: RateLimiter,
}

impl Dispatcher {
    pub fn new(
        ctx: Arc<CommandContext>,
        registry: CommandRegistry,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            ctx,
            registry,
            rate_limiter,
        }
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.ctx
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle one inbound event. Never fails: errors become user-facing replies.
    pub async fn handle(&self, inbound: &Inbound) -> Reply {
        let request_id = Uuid::new_v4();
        let user_id = inbound.user_id;
        match &inbound.payload {
            Payload::Command { name, .. } => {
                info!("[{request_id}] 📨 /{name} from user {user_id}")
            }
            Payload::Action(code) => debug!("[{request_id}] 🔘 {code} from user {user_id}"),
        }

        if !self.rate_limiter.check_rate_limit(user_id) {
            warn!(
                "[{request_id}] 🚫 Rate limit exceeded for user: {user_id}, retry in {:?}",
                self.rate_limiter.retry_after(user_id)
            );
            return Reply::alert(t("rate_limited", self.language(user_id).await));
        }

        match self.route(inbound).await {
            Ok(reply) => reply,
            Err(e) => self.recover(request_id, user_id, e).await,
        }
    }

    async fn route(&self, inbound: &Inbound) -> Result<Reply> {
        match &inbound.payload {
            Payload::Command { name, argument } => {
                let handler = self
                    .registry
                    .get(name)
                    .ok_or_else(|| LunaError::validation(format!("unknown command '{name}'")))?;
                let request = CommandRequest {
                    user_id: inbound.user_id,
                    display_name: inbound.display_name.clone(),
                    name: name.clone(),
                    argument: argument.clone(),
                };
                handler.handle(Arc::clone(&self.ctx), &request).await
            }
            Payload::Action(code) => {
                let action = Action::decode(code)?;
                self.perform(inbound.user_id, action).await
            }
        }
    }

    async fn perform(&self, user_id: UserId, action: Action) -> Result<Reply> {
        let ctx = self.ctx.as_ref();
        match action {
            Action::LogMethod(method) => tracking::log_method(ctx, user_id, method).await,
            Action::LogSelect { field, method } => {
                tracking::log_select(ctx, user_id, field, method).await
            }
            Action::Picker(picker) => tracking::picker(ctx, user_id, picker).await,
            Action::LogSymptom(kind) => tracking::log_symptom(ctx, user_id, kind).await,
            Action::SetRole(role) => account::set_role(ctx, user_id, role).await,
            Action::SetNewRole(role) => account::set_new_role(ctx, user_id, role).await,
            Action::ConfirmNewRole(role) => account::confirm_new_role(ctx, user_id, role).await,
            Action::CancelNewRole => account::cancel_new_role(ctx, user_id).await,
            Action::SetCalendar(calendar) => account::set_calendar(ctx, user_id, calendar).await,
            Action::SetReminder(time) => reminders::set_reminder(ctx, user_id, time).await,
            Action::SetLanguage(language) => account::set_language(ctx, user_id, language).await,
            Action::Settings(menu) => account::settings_menu(ctx, user_id, menu).await,
            Action::Ignore => Ok(Reply::Ack),
        }
    }

    async fn recover(&self, request_id: Uuid, user_id: UserId, error: LunaError) -> Reply {
        let lang = self.language(user_id).await;
        if error.is_expected() {
            debug!("[{request_id}] Rejected input from user {user_id}: {error}");
            Reply::alert(t("invalid_action", lang))
        } else {
            error!("[{request_id}] ❌ Interaction failed for user {user_id}: {error}");
            Reply::alert(t("generic_failure", lang))
        }
    }

    /// Best-effort reply language; lookups failing here fall back to English
    async fn language(&self, user_id: UserId) -> Language {
        match self.ctx.user(user_id).await {
            Ok(Some(user)) => user.lang(),
            _ => Language::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::testing::test_context;
    use crate::core::notifier::testing::RecordingNotifier;
    use crate::database::testing::{primary, symptom_rows};
    use crate::database;
    use crate::features::locales::t_with;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()
    }

    async fn setup() -> (Dispatcher, Arc<RecordingNotifier>) {
        let (ctx, notifier) = test_context(today()).await;
        let dispatcher = Dispatcher::new(
            ctx,
            CommandRegistry::with_all_handlers(),
            RateLimiter::new(100, Duration::from_secs(60)),
        );
        (dispatcher, notifier)
    }

    fn sara_command(name: &str) -> Inbound {
        Inbound::command(1, "Sara", name, None)
    }

    fn sara_taps(code: &str) -> Inbound {
        Inbound::action(1, "Sara", code)
    }

    #[tokio::test]
    async fn test_primary_and_partner_end_to_end() {
        let (dispatcher, notifier) = setup().await;

        dispatcher.handle(&sara_command("start")).await;
        for code in ["set_language_en", "set_role_primary", "set_calendar_gregorian"] {
            let reply = dispatcher.handle(&sara_taps(code)).await;
            assert!(matches!(reply, Reply::Edit(_)), "{code}: {reply:?}");
        }

        dispatcher.handle(&sara_command("partner")).await;
        let ctx = dispatcher.context();
        let code = ctx.user(1).await.unwrap().unwrap().pairing_code.unwrap();
        let reply = dispatcher
            .handle(&Inbound::command(2, "Ali", "start", Some(code)))
            .await;
        assert!(reply.text().contains("Sara"));

        for code in [
            "datepicker_select_start_2024-01-01",
            "datepicker_select_end_2024-01-05",
            "datepicker_select_start_2024-01-29",
            "datepicker_select_end_2024-02-02",
            "log_select_start_today",
        ] {
            let reply = dispatcher.handle(&sara_taps(code)).await;
            assert!(matches!(reply, Reply::Edit(_)), "{code}: {reply:?}");
        }
        assert_eq!(notifier.sent_to(2).len(), 5);

        let history = dispatcher.handle(&sara_command("history")).await;
        assert!(history.text().contains("**Average Period:** 5 days"));
        assert!(history.text().contains("**Average Cycle:** 28 days"));
        assert!(history.text().contains("🗓️ 2024-02-26"));

        dispatcher.handle(&sara_taps("log_symptom_cramps")).await;
        let status = dispatcher.handle(&Inbound::command(2, "Ali", "status", None)).await;
        assert!(status.text().contains("**Day 1** of their period"));
        assert!(status.text().contains("Cramps"));
    }

    #[tokio::test]
    async fn test_role_change_through_buttons() {
        let (dispatcher, notifier) = setup().await;
        let ctx = dispatcher.context();
        primary(&ctx.database, 1, "Sara").await;
        let code = ctx.pairing.issue_pairing_code(1).await.unwrap();
        dispatcher
            .handle(&Inbound::command(2, "Ali", "start", Some(code.clone())))
            .await;
        dispatcher.handle(&sara_taps("log_select_start_today")).await;
        dispatcher.handle(&sara_taps("log_symptom_cramps")).await;
        let cycle = ctx.cycles.latest_cycle(1).await.unwrap().unwrap();

        let reply = dispatcher.handle(&sara_taps("cancel_new_role")).await;
        assert_eq!(reply, Reply::edit(t("role_change_cancelled", Language::English)));
        assert_eq!(ctx.cycles.list_cycles(1).await.unwrap().len(), 1);
        assert_eq!(symptom_rows(&ctx.database, cycle.id).await, 1);

        dispatcher.handle(&sara_taps("confirm_new_role_partner")).await;
        assert!(ctx.cycles.list_cycles(1).await.unwrap().is_empty());
        assert_eq!(symptom_rows(&ctx.database, cycle.id).await, 0);
        assert_eq!(ctx.user(2).await.unwrap().unwrap().partner_id, None);
        assert_eq!(
            notifier.sent_to(2).last().cloned(),
            Some(t_with("partner_disconnected", Language::English, &[("name", "Sara")]))
        );

        // The consumed code cannot pair anyone else
        let reply = dispatcher
            .handle(&Inbound::command(3, "Reza", "start", Some(code)))
            .await;
        assert!(reply.text().contains(&t("partner_link_invalid", Language::English)));
    }

    #[tokio::test]
    async fn test_ignore_is_silent() {
        let (dispatcher, _) = setup().await;
        assert_eq!(dispatcher.handle(&sara_taps("ignore")).await, Reply::Ack);
    }

    #[tokio::test]
    async fn test_malformed_codes_become_alerts() {
        let (dispatcher, _) = setup().await;
        primary(&dispatcher.context().database, 1, "Sara").await;
        for code in ["log_symptom_sneezing", "datepicker_select_start_2024-02-30", "launch"] {
            let reply = dispatcher.handle(&sara_taps(code)).await;
            assert_eq!(reply, Reply::alert(t("invalid_action", Language::English)), "{code}");
        }
        let reply = dispatcher.handle(&sara_command("dance")).await;
        assert_eq!(reply, Reply::alert(t("invalid_action", Language::English)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let (dispatcher, _) = setup().await;
        let ctx = dispatcher.context();
        primary(&ctx.database, 1, "Sara").await;
        ctx.cycles.open_cycle(1, today()).await.unwrap();
        ctx.database
            .with_connection(|conn| database::execute(conn, "DROP TABLE symptoms", &[]))
            .await
            .unwrap();

        let reply = dispatcher.handle(&sara_taps("log_symptom_cramps")).await;
        assert_eq!(reply, Reply::alert(t("generic_failure", Language::English)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let (ctx, _) = test_context(today()).await;
        let dispatcher = Dispatcher::new(
            ctx,
            CommandRegistry::with_all_handlers(),
            RateLimiter::new(2, Duration::from_secs(60)),
        );
        dispatcher.handle(&sara_command("help")).await;
        dispatcher.handle(&sara_command("help")).await;
        let reply = dispatcher.handle(&sara_command("help")).await;
        assert_eq!(reply, Reply::alert(t("rate_limited", Language::English)));

        let other = dispatcher.handle(&Inbound::command(2, "Ali", "help", None)).await;
        assert!(other.text().contains("/start"));
    }
}
