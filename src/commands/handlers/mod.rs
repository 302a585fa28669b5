//! Per-command handler implementations
//!
//! Each handler serves its slash commands through [`CommandHandler`] and
//! exposes the button actions belonging to the same screens.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 3.0.0: Account, tracking, partner and reminder handlers
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod account;
pub mod partner;
pub mod reminders;
pub mod tracking;

use std::sync::Arc;

use super::context::CommandContext;
use super::handler::CommandHandler;
use crate::core::{Reply, Result};
use crate::database::{User, UserId};
use crate::features::locales::{t, Language};

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(account::AccountHandler),
        Arc::new(tracking::TrackingHandler),
        Arc::new(partner::PartnerHandler),
        Arc::new(reminders::ReminderHandler),
    ]
}

/// The acting user, or the reply to send them instead
pub(crate) type Gate = std::result::Result<User, Reply>;

/// Any registered user
pub(crate) async fn require_registered(ctx: &CommandContext, user_id: UserId) -> Result<Gate> {
    Ok(match ctx.user(user_id).await? {
        Some(user) => Ok(user),
        None => Err(Reply::send(t("onboarding_required", Language::default()))),
    })
}

/// Reply language for `user_id`, English for unknown users
pub(crate) async fn language_of(ctx: &CommandContext, user_id: UserId) -> Result<Language> {
    Ok(ctx.user(user_id).await?.map(|user| user.lang()).unwrap_or_default())
}

/// A user tracking their own cycle
pub(crate) async fn require_primary(ctx: &CommandContext, user_id: UserId) -> Result<Gate> {
    Ok(require_registered(ctx, user_id).await?.and_then(|user| {
        if user.is_primary() {
            Ok(user)
        } else {
            Err(Reply::send(t("primary_only_command", user.lang())))
        }
    }))
}

/// A user supporting a partner
pub(crate) async fn require_partner(ctx: &CommandContext, user_id: UserId) -> Result<Gate> {
    Ok(require_registered(ctx, user_id).await?.and_then(|user| {
        if user.is_partner() {
            Ok(user)
        } else {
            Err(Reply::send(t("partner_only_command", user.lang())))
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::testing::test_context;
    use crate::database::testing::{insert_user, primary as insert_primary};
    use crate::database::Role;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_user_is_sent_to_start() {
        let (ctx, _) = test_context(today()).await;
        let gate = require_registered(&ctx, 42).await.unwrap();
        assert_eq!(gate.unwrap_err(), Reply::send(t("onboarding_required", Language::English)));
    }

    #[tokio::test]
    async fn test_role_gates() {
        let (ctx, _) = test_context(today()).await;
        insert_primary(&ctx.database, 1, "Sara").await;
        insert_user(
            &ctx.database,
            2,
            "Ali",
            Some(Role::Partner),
            Some(Language::Farsi),
            None,
        )
        .await;

        assert!(require_primary(&ctx, 1).await.unwrap().is_ok());
        assert!(require_partner(&ctx, 2).await.unwrap().is_ok());
        assert_eq!(
            require_primary(&ctx, 2).await.unwrap().unwrap_err(),
            Reply::send(t("primary_only_command", Language::Farsi))
        );
        assert_eq!(
            require_partner(&ctx, 1).await.unwrap().unwrap_err(),
            Reply::send(t("partner_only_command", Language::English))
        );
    }
}
