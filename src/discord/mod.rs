//! # Discord Transport
//!
//! Converts serenity interactions into [`Inbound`] events, runs them through
//! the [`Dispatcher`] and answers with the rendered [`Reply`](crate::core::Reply).
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Slash commands, buttons, select menus and DM notifier

pub mod commands;
pub mod notifier;
pub mod render;

pub use commands::{create_slash_commands, register_global_commands, register_guild_commands};
pub use notifier::DiscordNotifier;

use log::{error, warn};
use serenity::model::application::component::ComponentType;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::id::UserId as DiscordUserId;
use serenity::prelude::Context;

use crate::commands::Inbound;
use crate::database::UserId;
use crate::dispatcher::Dispatcher;
use render::{fill_response, normalize_action};

pub fn to_user_id(id: DiscordUserId) -> Option<UserId> {
    i64::try_from(id.0).ok()
}

pub fn command_inbound(command: &ApplicationCommandInteraction) -> Option<Inbound> {
    let argument = command
        .data
        .options
        .iter()
        .find(|opt| opt.name == commands::CODE_OPTION)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string());
    Some(Inbound::command(
        to_user_id(command.user.id)?,
        command.user.name.clone(),
        &command.data.name,
        argument,
    ))
}

/// Buttons carry their action in the component id, select menus in the chosen value
pub fn component_inbound(component: &MessageComponentInteraction) -> Option<Inbound> {
    let code = match component.data.component_type {
        ComponentType::SelectMenu => component.data.values.first()?.clone(),
        _ => normalize_action(&component.data.custom_id).to_string(),
    };
    Some(Inbound::action(
        to_user_id(component.user.id)?,
        component.user.name.clone(),
        code,
    ))
}

pub async fn answer_command(
    dispatcher: &Dispatcher,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) {
    let Some(inbound) = command_inbound(command) else {
        warn!(
            "Ignoring /{} from unsupported user id {}",
            command.data.name, command.user.id
        );
        return;
    };
    let reply = dispatcher.handle(&inbound).await;
    if let Err(e) = command
        .create_interaction_response(&ctx.http, |response| {
            fill_response(response, &reply, false)
        })
        .await
    {
        error!("❌ Failed to answer /{}: {e}", command.data.name);
    }
}

pub async fn answer_component(
    dispatcher: &Dispatcher,
    ctx: &Context,
    component: &MessageComponentInteraction,
) {
    let Some(inbound) = component_inbound(component) else {
        warn!(
            "Ignoring component {} from user {}",
            component.data.custom_id, component.user.id
        );
        return;
    };
    let reply = dispatcher.handle(&inbound).await;
    if let Err(e) = component
        .create_interaction_response(&ctx.http, |response| {
            fill_response(response, &reply, true)
        })
        .await
    {
        error!("❌ Failed to answer component {}: {e}", component.data.custom_id);
    }
}
