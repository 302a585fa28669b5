//! # Reminders Feature
//!
//! Hourly check of every primary's prediction, with PMS and "starts tomorrow"
//! notices sent to the primary and their linked partner.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.0.0: Prediction windows, partner notices, localized text
//! - 1.0.0: Scheduled reminder delivery

pub mod scheduler;

pub use scheduler::ReminderScheduler;

use crate::features::locales::{t, t_with, Language};

/// Window (days before the predicted start) for PMS notices
pub const PMS_WINDOW: std::ops::RangeInclusive<i64> = 3..=5;

/// Reminder times offered in the settings keyboard
pub const REMINDER_TIMES: [&str; 4] = ["08:00", "09:00", "12:00", "18:00"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Pms { days: i64 },
    Tomorrow,
}

/// Which reminder, if any, is due `days_until` days before the predicted start
pub fn reminder_for(days_until: i64) -> Option<ReminderKind> {
    if PMS_WINDOW.contains(&days_until) {
        Some(ReminderKind::Pms { days: days_until })
    } else if days_until == 1 {
        Some(ReminderKind::Tomorrow)
    } else {
        None
    }
}

impl ReminderKind {
    pub fn message(self, lang: Language) -> String {
        match self {
            ReminderKind::Pms { days } => {
                t_with("reminder_pms", lang, &[("days", &days.to_string())])
            }
            ReminderKind::Tomorrow => t("reminder_tomorrow", lang),
        }
    }

    /// Text for the partner of `primary_name`
    pub fn partner_message(self, lang: Language, primary_name: &str) -> String {
        match self {
            ReminderKind::Pms { days } => t_with(
                "reminder_partner_pms",
                lang,
                &[("name", primary_name), ("days", &days.to_string())],
            ),
            ReminderKind::Tomorrow => {
                t_with("reminder_partner_tomorrow", lang, &[("name", primary_name)])
            }
        }
    }
}
