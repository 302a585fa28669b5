//! Reminder settings handler
//!
//! Handles: reminders
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Daily reminder hour replaces one-off reminders
//! - 1.0.0: Initial /remind command

use async_trait::async_trait;
use chrono::NaiveTime;
use log::info;
use std::sync::Arc;

use super::require_primary;
use crate::commands::action::Action;
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::core::{Button, Keyboard, OutgoingMessage, Reply, Result};
use crate::database::{format_reminder_time, parse_reminder_time, UserId};
use crate::features::locales::{t, t_with, Language};
use crate::features::reminders::REMINDER_TIMES;

pub struct ReminderHandler;

#[async_trait]
impl CommandHandler for ReminderHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["reminders"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<Reply> {
        let user = match require_primary(&ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };
        let lang = user.lang();
        let status = match user.reminder_time {
            Some(time) => t_with(
                "reminders_status_on",
                lang,
                &[("time", &format_reminder_time(time))],
            ),
            None => t("reminders_status_off", lang),
        };
        Ok(Reply::Send(OutgoingMessage::with_keyboard(
            t_with("reminders_title", lang, &[("status", &status)]),
            reminder_keyboard(lang)?,
        )))
    }
}

/// Offered times two per row, then the off switch
fn reminder_keyboard(lang: Language) -> Result<Keyboard> {
    let mut keyboard = Keyboard::new();
    for pair in REMINDER_TIMES.chunks(2) {
        let mut row = Vec::with_capacity(pair.len());
        for time in pair {
            let time = parse_reminder_time(time)?;
            row.push(Button::new(
                format!("⏰ {}", format_reminder_time(time)),
                Action::SetReminder(Some(time)).encode(),
            ));
        }
        keyboard = keyboard.row(row);
    }
    Ok(keyboard.row(vec![Button::new(
        t("reminders_turn_off", lang),
        Action::SetReminder(None).encode(),
    )]))
}

/// `set_reminder_*`
pub async fn set_reminder(
    ctx: &CommandContext,
    user_id: UserId,
    time: Option<NaiveTime>,
) -> Result<Reply> {
    let user = match require_primary(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    ctx.database.set_reminder_time(user.id, time).await?;

    let lang = user.lang();
    let status = match time {
        Some(time) => {
            let shown = format_reminder_time(time);
            info!("🔔 User {user_id} set reminders for {shown}");
            t_with("reminders_updated_status_on", lang, &[("time", &shown)])
        }
        None => {
            info!("🔕 User {user_id} turned reminders off");
            t("reminders_status_off", lang)
        }
    };
    Ok(Reply::edit(t_with("reminders_updated", lang, &[("status", &status)])))
}
