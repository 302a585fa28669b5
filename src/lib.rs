// Core layer - shared types and configuration
pub mod core;

// Features layer - cycle tracking domain
pub mod features;

// Infrastructure
pub mod database;
pub mod rate_limiter;

// Application layer
pub mod commands;
pub mod dispatcher;

// Transport
pub mod discord;

pub use core::{Config, LunaError, Reply};
pub use database::Database;
pub use dispatcher::Dispatcher;
pub use features::{PairingManager, ReminderScheduler};
