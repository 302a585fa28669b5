//! Cycle tracking command handlers
//!
//! Handles: track, symptoms, history, seed
//!
//! Also serves the logging buttons: method choice, start/end choice, the
//! date picker and symptom buttons. Every successful write is mirrored to the
//! linked partner as a short notice.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.3.0: Partner event notices
//! - 1.2.0: /seed sample data
//! - 1.1.0: Month picker for past dates
//! - 1.0.0: Track, symptoms and history

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use super::require_primary;
use crate::commands::action::{Action, LogMethod};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::core::{Button, Keyboard, LunaError, OutgoingMessage, Reply, Result};
use crate::database::{User, UserId};
use crate::features::calendar::CalendarSystem;
use crate::features::cycles::SymptomKind;
use crate::features::datepicker::{render_month, step_month, PickerAction, TargetField};
use crate::features::locales::{t, t_with, Language};
use crate::features::prediction::predict;

/// Closed cycles listed by /history
pub const HISTORY_LIMIT: usize = 5;

/// Handler for tracking commands: track, symptoms, history, seed
pub struct TrackingHandler;

#[async_trait]
impl CommandHandler for TrackingHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["track", "symptoms", "history", "seed"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<Reply> {
        let user = match require_primary(&ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };

        match request.name.as_str() {
            "track" => Ok(self.handle_track(&user)),
            "symptoms" => self.handle_symptoms(&ctx, &user).await,
            "history" => self.handle_history(&ctx, &user).await,
            "seed" => self.handle_seed(&ctx, &user).await,
            other => Err(LunaError::validation(format!("unknown command '{other}'"))),
        }
    }
}

impl TrackingHandler {
    fn handle_track(&self, user: &User) -> Reply {
        let lang = user.lang();
        Reply::Send(OutgoingMessage::with_keyboard(
            t("track_title", lang),
            Keyboard::new().row(vec![
                Button::new(t("track_today", lang), Action::LogMethod(LogMethod::Today).encode()),
                Button::new(
                    t("track_pick_date", lang),
                    Action::LogMethod(LogMethod::Picker).encode(),
                ),
            ]),
        ))
    }

    async fn handle_symptoms(&self, ctx: &CommandContext, user: &User) -> Result<Reply> {
        let lang = user.lang();
        if ctx.cycles.open_cycle_for(user.id).await?.is_none() {
            return Ok(Reply::send(t("symptoms_need_active", lang)));
        }

        let mut keyboard = Keyboard::new();
        for pair in SymptomKind::ALL.chunks(2) {
            keyboard = keyboard.row(
                pair.iter()
                    .map(|kind| {
                        Button::new(
                            format!("{} {}", kind.emoji(), t(&kind.message_key(), lang)),
                            Action::LogSymptom(*kind).encode(),
                        )
                    })
                    .collect(),
            );
        }
        Ok(Reply::Send(OutgoingMessage::with_keyboard(
            t("symptoms_title", lang),
            keyboard,
        )))
    }

    /// Handle /history: newest closed cycles, then the prediction when possible
    async fn handle_history(&self, ctx: &CommandContext, user: &User) -> Result<Reply> {
        let lang = user.lang();
        let calendar = user.calendar_or_default();
        let closed = ctx.cycles.closed_cycles(user.id).await?;
        if closed.is_empty() {
            return Ok(Reply::send(t("history_not_enough_data", lang)));
        }

        let mut text = t("history_title", lang);
        for cycle in closed.iter().rev().take(HISTORY_LIMIT) {
            let end = cycle.end.map(|end| calendar.format_date(end)).unwrap_or_default();
            text.push_str(&t_with(
                "history_entry",
                lang,
                &[
                    ("emoji", calendar.emoji()),
                    ("start", &calendar.format_date(cycle.start)),
                    ("end", &end),
                ],
            ));
        }

        match predict(&closed) {
            Some(prediction) => {
                text.push_str(&t("prediction_title", lang));
                text.push_str(&t_with(
                    "avg_period",
                    lang,
                    &[("days", &prediction.average_period_length.to_string())],
                ));
                text.push_str(&t_with(
                    "avg_cycle",
                    lang,
                    &[("days", &prediction.average_cycle_length.to_string())],
                ));
                text.push_str(&t_with(
                    "predicted_start",
                    lang,
                    &[
                        ("emoji", calendar.emoji()),
                        ("date", &calendar.format_date(prediction.predicted_next_start)),
                    ],
                ));
                text.push_str(&t_with(
                    "prediction_footer",
                    lang,
                    &[("count", &prediction.sample_size.to_string())],
                ));
            }
            None => text.push_str(&t("history_need_one_more", lang)),
        }
        Ok(Reply::send(text))
    }

    async fn handle_seed(&self, ctx: &CommandContext, user: &User) -> Result<Reply> {
        ctx.cycles.reseed(user.id, ctx.today()).await?;
        Ok(Reply::send(t("seed_success", user.lang())))
    }
}

/// Something the partner of a primary hears about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerEvent {
    PeriodStart(NaiveDate),
    PeriodEnd(NaiveDate),
    Symptom(SymptomKind),
}

impl PartnerEvent {
    /// Notice in the partner's language, dates in the primary's calendar
    pub fn message(&self, lang: Language, primary: &User) -> String {
        let name = primary.display_name.as_str();
        let calendar = primary.calendar_or_default();
        match self {
            PartnerEvent::PeriodStart(date) => t_with(
                "partner_event_period_start",
                lang,
                &[("name", name), ("date", &calendar.format_date(*date))],
            ),
            PartnerEvent::PeriodEnd(date) => t_with(
                "partner_event_period_end",
                lang,
                &[("name", name), ("date", &calendar.format_date(*date))],
            ),
            PartnerEvent::Symptom(kind) => t_with(
                "partner_event_symptom",
                lang,
                &[("name", name), ("symptom", &t(&kind.message_key(), lang))],
            ),
        }
    }
}

/// Tell the linked partner, if any. The write already happened, so a lookup
/// failure is only logged.
async fn notify_partner(ctx: &CommandContext, user: &User, event: PartnerEvent) {
    match ctx.pairing.linked_partner(user).await {
        Ok(Some(partner)) => {
            ctx.notify(partner.id, &event.message(partner.lang(), user))
                .await
        }
        Ok(None) => {}
        Err(e) => warn!("Could not look up partner of user {}: {e}", user.id),
    }
}

/// `log_method_*`
pub async fn log_method(ctx: &CommandContext, user_id: UserId, method: LogMethod) -> Result<Reply> {
    let user = match require_primary(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    let lang = user.lang();
    Ok(Reply::Edit(OutgoingMessage::with_keyboard(
        t("track_start_or_end", lang),
        Keyboard::new().row(vec![
            Button::new(
                t("track_start_date", lang),
                Action::LogSelect {
                    field: TargetField::PeriodStart,
                    method,
                }
                .encode(),
            ),
            Button::new(
                t("track_end_date", lang),
                Action::LogSelect {
                    field: TargetField::PeriodEnd,
                    method,
                }
                .encode(),
            ),
        ]),
    )))
}

/// `log_select_*`: log today, or open the picker on the current month
pub async fn log_select(
    ctx: &CommandContext,
    user_id: UserId,
    field: TargetField,
    method: LogMethod,
) -> Result<Reply> {
    let user = match require_primary(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    match method {
        LogMethod::Today => log_date(ctx, &user, field, ctx.today()).await,
        LogMethod::Picker => show_picker(&user, field, user.calendar_or_default(), ctx.today()),
    }
}

/// `datepicker_*`
pub async fn picker(ctx: &CommandContext, user_id: UserId, action: PickerAction) -> Result<Reply> {
    let user = match require_primary(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    match action {
        PickerAction::Navigate {
            field,
            calendar,
            reference,
            direction,
        } => show_picker(&user, field, calendar, step_month(reference, direction)?),
        PickerAction::Select { field, date } => log_date(ctx, &user, field, date).await,
    }
}

fn show_picker(
    user: &User,
    field: TargetField,
    calendar: CalendarSystem,
    reference: NaiveDate,
) -> Result<Reply> {
    let grid = render_month(field, calendar, reference)?;
    Ok(Reply::Edit(OutgoingMessage::with_keyboard(
        t("calendar_select_date", user.lang()),
        grid.into_keyboard(),
    )))
}

async fn log_date(
    ctx: &CommandContext,
    user: &User,
    field: TargetField,
    date: NaiveDate,
) -> Result<Reply> {
    let lang = user.lang();
    let shown = user.calendar_or_default().format_date(date);
    match field {
        TargetField::PeriodStart => match ctx.cycles.open_cycle(user.id, date).await {
            Ok(_) => {
                info!("🩸 User {} started a period on {date}", user.id);
                notify_partner(ctx, user, PartnerEvent::PeriodStart(date)).await;
                Ok(Reply::edit(t_with("log_start_success", lang, &[("date", &shown)])))
            }
            Err(LunaError::Conflict(_)) => Ok(Reply::alert(t("log_start_fail_active", lang))),
            Err(e) => Err(e),
        },
        TargetField::PeriodEnd => match ctx.cycles.close_cycle(user.id, date).await {
            Ok(_) => {
                info!("🩸 User {} ended a period on {date}", user.id);
                notify_partner(ctx, user, PartnerEvent::PeriodEnd(date)).await;
                Ok(Reply::edit(t_with("log_end_success", lang, &[("date", &shown)])))
            }
            Err(LunaError::NotFound(_)) => Ok(Reply::alert(t("log_end_fail_no_active", lang))),
            Err(LunaError::Validation(_)) => Ok(Reply::alert(t("log_end_before_start", lang))),
            Err(e) => Err(e),
        },
    }
}

/// `log_symptom_*`, recorded for today
pub async fn log_symptom(
    ctx: &CommandContext,
    user_id: UserId,
    kind: SymptomKind,
) -> Result<Reply> {
    let user = match require_primary(ctx, user_id).await? {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    let lang = user.lang();
    match ctx.cycles.log_symptom(user.id, kind, ctx.today()).await {
        Ok(_) => {
            notify_partner(ctx, &user, PartnerEvent::Symptom(kind)).await;
            Ok(Reply::edit(t_with(
                "symptom_logged",
                lang,
                &[("symptom", &t(&kind.message_key(), lang))],
            )))
        }
        Err(LunaError::NotFound(_)) => Ok(Reply::alert(t("symptoms_need_active", lang))),
        Err(e) => Err(e),
    }
}
