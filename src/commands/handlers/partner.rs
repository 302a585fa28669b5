//! Partner command handlers
//!
//! Handles: partner, status
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Symptoms logged today in /status
//! - 1.0.0: Pairing codes and partner status

use async_trait::async_trait;
use std::sync::Arc;

use super::account::calendar_keyboard;
use super::{require_partner, require_primary};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::core::{LunaError, OutgoingMessage, Reply, Result};
use crate::database::User;
use crate::features::locales::{t, t_with};

/// Handler for partner commands: partner, status
pub struct PartnerHandler;

#[async_trait]
impl CommandHandler for PartnerHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["partner", "status"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<Reply> {
        match request.name.as_str() {
            "partner" => self.handle_partner(&ctx, request).await,
            "status" => self.handle_status(&ctx, request).await,
            other => Err(LunaError::validation(format!("unknown command '{other}'"))),
        }
    }
}

impl PartnerHandler {
    /// Handle /partner: issue a fresh pairing code
    async fn handle_partner(
        &self,
        ctx: &CommandContext,
        request: &CommandRequest,
    ) -> Result<Reply> {
        let user = match require_primary(ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };
        let lang = user.lang();
        match ctx.pairing.issue_pairing_code(user.id).await {
            Ok(code) => Ok(Reply::send(t_with("partner_invite", lang, &[("code", &code)]))),
            // Primary still has to pick a calendar
            Err(LunaError::Forbidden(_)) => Ok(Reply::Send(OutgoingMessage::with_keyboard(
                t("calendar_prompt", lang),
                calendar_keyboard(lang),
            ))),
            Err(e) => Err(e),
        }
    }

    /// Handle /status: the linked primary's cycle day and today's symptoms
    async fn handle_status(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<Reply> {
        let user = match require_partner(ctx, request.user_id).await? {
            Ok(user) => user,
            Err(reply) => return Ok(reply),
        };
        let lang = user.lang();
        let Some(tracked) = ctx.pairing.linked_partner(&user).await? else {
            return Ok(Reply::send(t("partner_not_linked", lang)));
        };
        Ok(Reply::send(status_text(ctx, &user, &tracked).await?))
    }
}

async fn status_text(ctx: &CommandContext, viewer: &User, tracked: &User) -> Result<String> {
    let lang = viewer.lang();
    let name = [("name", tracked.display_name.as_str())];
    let Some(cycle) = ctx.cycles.latest_cycle(tracked.id).await? else {
        return Ok(t_with("status_no_data", lang, &name));
    };

    let today = ctx.today();
    let day = cycle.day_on(today).to_string();
    let mut text = t_with("status_title", lang, &name);
    let key = if cycle.is_open() {
        "status_on_period"
    } else {
        "status_in_cycle"
    };
    text.push_str(&t_with(key, lang, &[("day", &day)]));

    let symptoms = ctx.cycles.list_symptoms(cycle.id, today).await?;
    if symptoms.is_empty() {
        text.push_str(&t("status_no_symptoms", lang));
    } else {
        let names: Vec<String> = symptoms
            .iter()
            .map(|symptom| t(&symptom.kind.message_key(), lang))
            .collect();
        text.push_str(&t_with(
            "status_symptoms_today",
            lang,
            &[("symptoms", &names.join("\n- "))],
        ));
    }
    Ok(text)
}
