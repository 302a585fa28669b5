//! # Features Layer
//!
//! Domain features of the cycle tracker. Each module carries its own version
//! header and changelog.

pub mod calendar;
pub mod cycles;
pub mod datepicker;
pub mod locales;
pub mod pairing;
pub mod prediction;
pub mod reminders;

pub use calendar::CalendarSystem;
pub use cycles::{Cycle, CycleRepository, Symptom, SymptomKind};
pub use datepicker::{render_month, PickerAction, TargetField};
pub use locales::{t, t_with, Language};
pub use pairing::{OnboardingState, PairingManager};
pub use prediction::{predict, Prediction};
pub use reminders::{ReminderKind, ReminderScheduler};
