//! Outbound notification capability
//!
//! Used for messages addressed to someone other than the acting user: partner
//! event notices, pairing confirmations and scheduled reminders.

use async_trait::async_trait;
use log::warn;

use super::error::Result;
use crate::database::UserId;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a direct message to a user
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()>;
}

/// Deliver and forget: failures are logged, never retried or propagated.
pub async fn dispatch(notifier: &dyn Notifier, user_id: UserId, text: &str) {
    if let Err(e) = notifier.notify(user_id, text).await {
        warn!("Failed to deliver notification to user {user_id}: {e}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Notifier that records deliveries instead of sending them
    #[derive(Default)]
    pub struct RecordingNotifier {
        sent: Mutex<Vec<(UserId, String)>>,
        unreachable: Mutex<HashSet<UserId>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make deliveries to this user fail
        pub fn block(&self, user_id: UserId) {
            self.unreachable.lock().unwrap().insert(user_id);
        }

        pub fn sent(&self) -> Vec<(UserId, String)> {
            self.sent.lock().unwrap().clone()
        }

        pub fn sent_to(&self, user_id: UserId) -> Vec<String> {
            self.sent()
                .into_iter()
                .filter(|(id, _)| *id == user_id)
                .map(|(_, text)| text)
                .collect()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, user_id: UserId, text: &str) -> Result<()> {
            if self.unreachable.lock().unwrap().contains(&user_id) {
                return Err(crate::core::LunaError::Transport(format!(
                    "user {user_id} unreachable"
                )));
            }
            self.sent.lock().unwrap().push((user_id, text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let notifier = RecordingNotifier::new();
        notifier.block(7);
        dispatch(&notifier, 7, "hello").await;
        dispatch(&notifier, 8, "hello").await;
        assert!(notifier.sent_to(7).is_empty());
        assert_eq!(notifier.sent_to(8), vec!["hello".to_string()]);
    }
}
