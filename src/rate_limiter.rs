//! # Feature: Rate Limiting
//!
//! Throttles inbound interactions per user with a sliding window. Uses DashMap
//! for thread-safe concurrent access.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Keyed by user id only; one bot per process
//! - 1.0.0: Initial release with per-user sliding window rate limiting

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::database::UserId;

#[derive(Clone)]
pub struct RateLimiter {
    requests: DashMap<UserId, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: DashMap::new(),
            max_requests,
            time_window,
        }
    }

    /// Record an interaction; false once the user is over the limit
    pub fn check_rate_limit(&self, user_id: UserId) -> bool {
        let now = Instant::now();
        let mut entry = self.requests.entry(user_id).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }

    /// Time until `user_id` may act again, zero if they may act now
    pub fn retry_after(&self, user_id: UserId) -> Duration {
        let Some(entry) = self.requests.get(&user_id) else {
            return Duration::ZERO;
        };
        if entry.len() < self.max_requests {
            return Duration::ZERO;
        }
        entry
            .first()
            .map(|oldest| self.time_window.saturating_sub(oldest.elapsed()))
            .unwrap_or(Duration::ZERO)
    }
}
