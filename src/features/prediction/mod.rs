//! # Prediction Feature
//!
//! Average period length, average cycle length and next expected start,
//! derived from closed cycles.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Round half up; anchor on the latest closed cycle
//! - 1.0.0: Mean-based prediction

use chrono::{Days, NaiveDate};

use crate::features::cycles::Cycle;

/// Closed cycles needed before anything is predicted
pub const MIN_CLOSED_CYCLES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub average_period_length: i64,
    pub average_cycle_length: i64,
    pub predicted_next_start: NaiveDate,
    /// Closed cycles the averages were computed from
    pub sample_size: usize,
}

impl Prediction {
    /// Civil days from `today` to the predicted start; negative once it has passed
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.predicted_next_start - today).num_days()
    }
}

/// Mean rounded half away from zero (all inputs here are positive)
fn rounded_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().sum();
    let count = values.len() as i64;
    Some((2 * sum + count).div_euclid(2 * count))
}

/// Predict from closed cycles; open cycles in the input are ignored
pub fn predict(cycles: &[Cycle]) -> Option<Prediction> {
    let mut closed: Vec<&Cycle> = cycles.iter().filter(|c| !c.is_open()).collect();
    if closed.len() < MIN_CLOSED_CYCLES {
        return None;
    }
    closed.sort_by_key(|c| c.start);

    let period_lengths: Vec<i64> = closed.iter().filter_map(|c| c.period_length()).collect();
    let cycle_lengths: Vec<i64> = closed
        .windows(2)
        .map(|pair| (pair[1].start - pair[0].start).num_days())
        .collect();

    let average_period_length = rounded_mean(&period_lengths)?;
    let average_cycle_length = rounded_mean(&cycle_lengths)?;
    let latest = closed.last()?;
    let predicted_next_start = latest
        .start
        .checked_add_days(Days::new(u64::try_from(average_cycle_length).ok()?))?;

    Some(Prediction {
        average_period_length,
        average_cycle_length,
        predicted_next_start,
        sample_size: closed.len(),
    })
}
