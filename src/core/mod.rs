//! # Core Module
//!
//! Configuration, error taxonomy, reply model and the notifier capability.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Transport-neutral Reply model and Notifier trait
//! - 1.1.0: Add error module
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;
pub mod notifier;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use error::{LunaError, Result};
pub use notifier::{dispatch, Notifier};
pub use response::{
    truncate_for_message, Button, Keyboard, OutgoingMessage, Reply, IGNORE_ACTION,
    MESSAGE_LIMIT,
};
