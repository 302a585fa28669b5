//! Command handler trait and the inbound request model
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Transport-neutral requests; handlers return a Reply
//! - 1.0.0: Initial implementation for modular command handling

use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use crate::core::{Reply, Result};
use crate::database::UserId;

/// What the user sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A slash command with its optional single argument
    Command { name: String, argument: Option<String> },
    /// A button or select-menu action code
    Action(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub user_id: UserId,
    pub display_name: String,
    pub payload: Payload,
}

impl Inbound {
    pub fn command(
        user_id: UserId,
        display_name: impl Into<String>,
        name: &str,
        argument: Option<String>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            payload: Payload::Command {
                name: name.to_string(),
                argument,
            },
        }
    }

    pub fn action(
        user_id: UserId,
        display_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            payload: Payload::Action(code.into()),
        }
    }
}

/// A slash command invocation as handed to a [`CommandHandler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub user_id: UserId,
    pub display_name: String,
    pub name: String,
    pub argument: Option<String>,
}

/// Trait for slash command handlers
///
/// Each handler processes one or more commands and is registered with a
/// [`CommandRegistry`](super::CommandRegistry) under every name it declares.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         request: &CommandRequest,
///     ) -> Result<Reply> {
///         Ok(Reply::send("Pong!"))
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<Reply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn CommandHandler) {}

    #[test]
    fn test_inbound_constructors() {
        let inbound = Inbound::command(1, "Sara", "start", Some("123456".to_string()));
        assert_eq!(
            inbound.payload,
            Payload::Command {
                name: "start".to_string(),
                argument: Some("123456".to_string())
            }
        );
        let inbound = Inbound::action(1, "Sara", "ignore");
        assert_eq!(inbound.payload, Payload::Action("ignore".to_string()));
    }
}
