//! # Calendar Feature
//!
//! Gregorian and Jalali calendar math: conversions, leap years, month lengths,
//! month layout and display formatting. Storage always uses Gregorian ISO dates;
//! the calendar system only affects what the user sees.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: MonthLayout shared with the date picker
//! - 1.0.0: Jalali conversions and display formatting

pub mod jalali;

pub use jalali::{is_leap_year, to_gregorian, to_jalali, JalaliDate};

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::core::{LunaError, Result};

pub const GREGORIAN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub const JALALI_MONTHS: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور", "مهر", "آبان", "آذر", "دی", "بهمن",
    "اسفند",
];

/// Calendar the user wants dates displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarSystem {
    #[default]
    Gregorian,
    Jalali,
}

impl CalendarSystem {
    pub const ALL: [CalendarSystem; 2] = [CalendarSystem::Gregorian, CalendarSystem::Jalali];

    /// Code used in action strings and the database
    pub fn code(self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "gregorian",
            CalendarSystem::Jalali => "jalali",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "🗓️",
            CalendarSystem::Jalali => "🌙",
        }
    }

    /// Weekday header labels, first column first
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            CalendarSystem::Gregorian => ["S", "M", "T", "W", "T", "F", "S"],
            CalendarSystem::Jalali => ["ش", "ی", "د", "س", "چ", "پ", "ج"],
        }
    }

    /// Render a stored date in this calendar
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            CalendarSystem::Gregorian => date.format("%Y-%m-%d").to_string(),
            CalendarSystem::Jalali => to_jalali(date).to_string(),
        }
    }

    /// Layout of the month (in this calendar) that contains `reference`
    pub fn month_containing(self, reference: NaiveDate) -> Result<MonthLayout> {
        match self {
            CalendarSystem::Gregorian => {
                let first = reference.with_day(1).ok_or_else(|| {
                    LunaError::validation(format!("no first day for {reference}"))
                })?;
                let length = gregorian_month_length(first.year(), first.month())?;
                Ok(MonthLayout {
                    calendar: self,
                    year: first.year(),
                    month: first.month(),
                    length,
                    first_day: first,
                    offset: jalali::gregorian_weekday(first),
                })
            }
            CalendarSystem::Jalali => {
                let JalaliDate { year, month, .. } = to_jalali(reference);
                Ok(MonthLayout {
                    calendar: self,
                    year,
                    month,
                    length: jalali::month_length(year, month),
                    first_day: to_gregorian(year, month, 1)?,
                    offset: jalali::first_weekday_offset(year, month)?,
                })
            }
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CalendarSystem {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gregorian" => Ok(CalendarSystem::Gregorian),
            "jalali" | "alternate" | "shamsi" => Ok(CalendarSystem::Jalali),
            other => Err(LunaError::validation(format!("unknown calendar system '{other}'"))),
        }
    }
}

/// One month as the date picker lays it out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    pub calendar: CalendarSystem,
    pub year: i32,
    pub month: u32,
    pub length: u32,
    /// Gregorian date of day 1 of this month
    pub first_day: NaiveDate,
    /// Column of day 1 in the calendar's week (0..7)
    pub offset: u32,
}

impl MonthLayout {
    pub fn month_name(&self) -> &'static str {
        let names = match self.calendar {
            CalendarSystem::Gregorian => &GREGORIAN_MONTHS,
            CalendarSystem::Jalali => &JALALI_MONTHS,
        };
        names[(self.month as usize).saturating_sub(1) % 12]
    }

    /// Gregorian date of `day` within this month
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.length {
            return None;
        }
        self.first_day.checked_add_days(chrono::Days::new(u64::from(day - 1)))
    }
}

pub fn gregorian_month_length(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LunaError::validation(format!("invalid month {year}-{month}")))?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| LunaError::validation(format!("month after {year}-{month} overflows")))?;
    Ok((next - first).num_days() as u32)
}

/// Parse a stored or encoded `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LunaError::validation(format!("malformed date '{s}'")))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
