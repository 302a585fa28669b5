//! # Command System
//!
//! Slash commands and button actions, independent of the chat transport.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Transport-neutral handlers returning a Reply; button action codes
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 2.0.0: Remove bang commands, slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod action;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

// Re-export handler infrastructure
pub use action::{Action, LogMethod, SettingsMenu};
pub use context::CommandContext;
pub use handler::{CommandHandler, CommandRequest, Inbound, Payload};
pub use registry::CommandRegistry;
