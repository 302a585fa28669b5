//! # Cycles Feature
//!
//! Period records and the symptoms logged against them.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Conditional writes replace read-then-write open/close
//! - 1.0.0: Cycle and symptom storage

pub mod repository;

pub use repository::CycleRepository;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::core::{LunaError, Result};
use crate::database::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymptomKind {
    Cramps,
    Headache,
    Fatigue,
    Nausea,
    Bloating,
    MoodSwings,
}

impl SymptomKind {
    pub const ALL: [SymptomKind; 6] = [
        SymptomKind::Cramps,
        SymptomKind::Headache,
        SymptomKind::Fatigue,
        SymptomKind::Nausea,
        SymptomKind::Bloating,
        SymptomKind::MoodSwings,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SymptomKind::Cramps => "cramps",
            SymptomKind::Headache => "headache",
            SymptomKind::Fatigue => "fatigue",
            SymptomKind::Nausea => "nausea",
            SymptomKind::Bloating => "bloating",
            SymptomKind::MoodSwings => "mood_swings",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            SymptomKind::Cramps => "😖",
            SymptomKind::Headache => "🤕",
            SymptomKind::Fatigue => "😴",
            SymptomKind::Nausea => "🤢",
            SymptomKind::Bloating => "🐡",
            SymptomKind::MoodSwings => "🎭",
        }
    }

    /// Catalog key of the display name
    pub fn message_key(self) -> String {
        format!("symptom_{}", self.code())
    }
}

impl fmt::Display for SymptomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SymptomKind {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        SymptomKind::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| LunaError::validation(format!("unknown symptom '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub id: i64,
    pub user_id: UserId,
    pub start: NaiveDate,
    /// `None` while the period is ongoing
    pub end: Option<NaiveDate>,
}

impl Cycle {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Days of bleeding, both ends inclusive
    pub fn period_length(&self) -> Option<i64> {
        self.end.map(|end| (end - self.start).num_days() + 1)
    }

    /// 1-based day of the cycle on `today`
    pub fn day_on(&self, today: NaiveDate) -> i64 {
        (today - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symptom {
    pub id: i64,
    pub cycle_id: i64,
    pub kind: SymptomKind,
    pub logged_at: NaiveDate,
}
