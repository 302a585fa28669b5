//! Periodic reminder sweep
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Prediction-window reminders replace user-scheduled reminders
//! - 1.0.0: Initial scheduler loop

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use super::{reminder_for, ReminderKind};
use crate::core::{dispatch, Notifier, Result};
use crate::database::{Database, User};
use crate::features::cycles::CycleRepository;
use crate::features::prediction::predict;

pub struct ReminderScheduler {
    database: Database,
    cycles: CycleRepository,
    notifier: Arc<dyn Notifier>,
    period: Duration,
}

impl ReminderScheduler {
    pub fn new(database: Database, notifier: Arc<dyn Notifier>, period: Duration) -> Self {
        Self {
            cycles: CycleRepository::new(database.clone()),
            database,
            notifier,
            period,
        }
    }

    /// Sweep now, then once per period, forever
    pub async fn run(self) {
        info!(
            "⏰ Reminder scheduler started, checking every {}s",
            self.period.as_secs()
        );
        let mut ticker = interval(self.period.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let sent = self.sweep(Local::now().naive_local()).await;
            debug!("Reminder sweep finished, {sent} users reminded");
        }
    }

    /// Check every primary whose reminder hour is `now`'s hour.
    ///
    /// Returns how many users were reminded. A failure for one user is logged
    /// and the sweep moves on.
    pub async fn sweep(&self, now: NaiveDateTime) -> usize {
        let users = match self.database.users_with_reminder_hour(now.hour()).await {
            Ok(users) => users,
            Err(e) => {
                error!("Reminder sweep could not load users: {e}");
                return 0;
            }
        };

        let mut reminded = 0;
        for user in users {
            match self.remind(&user, now.date()).await {
                Ok(true) => reminded += 1,
                Ok(false) => {}
                Err(e) => error!("Reminder for user {} failed: {e}", user.id),
            }
        }
        reminded
    }

    async fn remind(&self, user: &User, today: NaiveDate) -> Result<bool> {
        let closed = self.cycles.closed_cycles(user.id).await?;
        let Some(prediction) = predict(&closed) else {
            return Ok(false);
        };
        let Some(kind) = reminder_for(prediction.days_until(today)) else {
            return Ok(false);
        };

        debug!("Sending {kind:?} reminder to user {}", user.id);
        dispatch(self.notifier.as_ref(), user.id, &kind.message(user.lang())).await;

        if let Some(partner_id) = user.partner_id {
            let partner = self.database.get_user(partner_id).await?;
            if let Some(partner) = partner.filter(|p| p.partner_id == Some(user.id)) {
                let text = kind.partner_message(partner.lang(), &user.display_name);
                dispatch(self.notifier.as_ref(), partner.id, &text).await;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifier::testing::RecordingNotifier;
    use crate::database::parse_reminder_time;
    use crate::database::testing::{insert_user, primary};
    use crate::database::Role;
    use crate::features::locales::Language;
    use crate::features::pairing::PairingManager;
    use chrono::{Days, NaiveTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(hour, 15, 0).unwrap())
    }

    /// Two closed cycles 28 days apart, predicting a start on 2024-02-26
    async fn tracked_primary(db: &Database, id: i64, name: &str) {
        primary(db, id, name).await;
        let cycles = CycleRepository::new(db.clone());
        cycles.open_cycle(id, ymd(2024, 1, 1)).await.unwrap();
        cycles.close_cycle(id, ymd(2024, 1, 5)).await.unwrap();
        cycles.open_cycle(id, ymd(2024, 1, 29)).await.unwrap();
        cycles.close_cycle(id, ymd(2024, 2, 2)).await.unwrap();
        db.set_reminder_time(id, Some(parse_reminder_time("09:00").unwrap()))
            .await
            .unwrap();
    }

    fn scheduler(db: &Database, notifier: &Arc<RecordingNotifier>) -> ReminderScheduler {
        ReminderScheduler::new(db.clone(), notifier.clone(), Duration::from_secs(3600))
    }

    fn days_before(days: u64) -> NaiveDate {
        ymd(2024, 2, 26).checked_sub_days(Days::new(days)).unwrap()
    }

    #[tokio::test]
    async fn test_pms_window() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        let notifier = Arc::new(RecordingNotifier::new());

        assert_eq!(scheduler(&db, &notifier).sweep(at(days_before(4), 9)).await, 1);
        let sent = notifier.sent_to(1);
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("predicted in 4 days"));
    }

    #[tokio::test]
    async fn test_tomorrow_reminder() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        let notifier = Arc::new(RecordingNotifier::new());

        scheduler(&db, &notifier).sweep(at(days_before(1), 9)).await;
        assert_eq!(notifier.sent_to(1), vec![ReminderKind::Tomorrow.message(Language::English)]);
    }

    #[tokio::test]
    async fn test_outside_windows_sends_nothing() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        let notifier = Arc::new(RecordingNotifier::new());
        let scheduler = scheduler(&db, &notifier);

        assert_eq!(scheduler.sweep(at(days_before(6), 9)).await, 0);
        assert_eq!(scheduler.sweep(at(days_before(2), 9)).await, 0);
        assert_eq!(scheduler.sweep(at(days_before(0), 9)).await, 0);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_only_matching_hour() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        let notifier = Arc::new(RecordingNotifier::new());

        assert_eq!(scheduler(&db, &notifier).sweep(at(days_before(4), 10)).await, 0);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_partner_gets_parallel_message() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        insert_user(&db, 2, "Ali", None, Some(Language::Farsi), None).await;
        let pairing = PairingManager::new(db.clone());
        let code = pairing.issue_pairing_code(1).await.unwrap();
        pairing.join(2, &code).await.unwrap();

        let notifier = Arc::new(RecordingNotifier::new());
        scheduler(&db, &notifier).sweep(at(days_before(3), 9)).await;

        assert_eq!(notifier.sent_to(1).len(), 1);
        assert_eq!(
            notifier.sent_to(2),
            vec![ReminderKind::Pms { days: 3 }.partner_message(Language::Farsi, "Sara")]
        );
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let db = Database::in_memory().await.unwrap();
        tracked_primary(&db, 1, "Sara").await;
        tracked_primary(&db, 2, "Mina").await;
        insert_user(&db, 3, "Ali", Some(Role::Partner), None, None).await;
        let pairing = PairingManager::new(db.clone());
        let code = pairing.issue_pairing_code(1).await.unwrap();
        pairing.join(3, &code).await.unwrap();

        let notifier = Arc::new(RecordingNotifier::new());
        notifier.block(1);
        scheduler(&db, &notifier).sweep(at(days_before(5), 9)).await;

        assert!(notifier.sent_to(1).is_empty());
        assert_eq!(notifier.sent_to(2).len(), 1);
        // A blocked DM to the primary does not stop the partner's notice
        assert_eq!(
            notifier.sent_to(3),
            vec![ReminderKind::Pms { days: 5 }.partner_message(Language::English, "Sara")]
        );
    }

    #[tokio::test]
    async fn test_too_little_history_is_skipped() {
        let db = Database::in_memory().await.unwrap();
        primary(&db, 1, "Sara").await;
        db.set_reminder_time(1, Some(parse_reminder_time("09:30").unwrap()))
            .await
            .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        assert_eq!(scheduler(&db, &notifier).sweep(at(ymd(2024, 2, 22), 9)).await, 0);
    }
}
