//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Cycle repository, pairing manager and notifier
//! - 1.0.0: Initial implementation with core shared state

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::core::{dispatch, Notifier, Result};
use crate::database::{Database, User, UserId};
use crate::features::cycles::CycleRepository;
use crate::features::pairing::PairingManager;

/// Shared services for every handler
///
/// - Database for user lookups
/// - CycleRepository for periods and symptoms
/// - PairingManager for roles and partner links
/// - Notifier for messages to users other than the one acting
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub cycles: CycleRepository,
    pub pairing: PairingManager,
    pub notifier: Arc<dyn Notifier>,
    fixed_today: Option<NaiveDate>,
}

impl CommandContext {
    pub fn new(database: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            cycles: CycleRepository::new(database.clone()),
            pairing: PairingManager::new(database.clone()),
            database,
            notifier,
            fixed_today: None,
        }
    }

    /// Pin "today" to a date instead of the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Local civil date
    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub async fn user(&self, user_id: UserId) -> Result<Option<User>> {
        self.database.get_user(user_id).await
    }

    /// Send `text` to `user_id`, logging instead of failing
    pub async fn notify(&self, user_id: UserId, text: &str) {
        dispatch(self.notifier.as_ref(), user_id, text).await;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }

    #[tokio::test]
    async fn test_fixed_today() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
        let (ctx, _) = testing::test_context(today).await;
        assert_eq!(ctx.today(), today);
    }
}
