//! Jalali (Solar Hijri) arithmetic calendar
//!
//! Uses the 33-year arithmetic leap cycle. Conversions go through a day count
//! relative to 1 Farvardin 1403 (2024-03-20).

use chrono::{Datelike, Duration, NaiveDate};

use crate::core::{LunaError, Result};

/// Smallest Jalali year accepted by [`to_gregorian`]
pub const MIN_YEAR: i32 = 1;
/// Largest Jalali year accepted by [`to_gregorian`]
pub const MAX_YEAR: i32 = 3000;

/// `year mod 33` values that mark a leap year
pub const LEAP_REMAINDERS: [i32; 8] = [1, 5, 9, 13, 17, 22, 26, 30];

/// Days in one 33-year cycle (33 * 365 + 8 leap days)
const CYCLE_DAYS: i64 = 12_053;

const ANCHOR_YEAR: i32 = 1403;

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl std::fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    LEAP_REMAINDERS.contains(&year.rem_euclid(33))
}

/// Number of days in a Jalali month, 0 for an invalid month number
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_leap_year(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// Zero-based day of year of the first day of `month`
fn month_start_offset(month: u32) -> i64 {
    let month = i64::from(month);
    if month <= 6 {
        (month - 1) * 31
    } else {
        186 + (month - 7) * 30
    }
}

/// Days elapsed from 1 Farvardin of year 1 to 1 Farvardin of `year`.
///
/// Defined for every integer year, so differences stay valid outside the
/// supported range.
fn days_before_year(year: i32) -> i64 {
    let elapsed = i64::from(year) - 1;
    let full_cycles = elapsed.div_euclid(33);
    let partial = elapsed.rem_euclid(33) as i32;
    let partial_leaps = LEAP_REMAINDERS.iter().filter(|&&r| r <= partial).count() as i64;
    365 * elapsed + 8 * full_cycles + partial_leaps
}

/// Convert a Jalali date to the Gregorian calendar
pub fn to_gregorian(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LunaError::validation(format!(
            "jalali year {year} outside {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    let length = month_length(year, month);
    if length == 0 {
        return Err(LunaError::validation(format!("jalali month {month} out of range")));
    }
    if day == 0 || day > length {
        return Err(LunaError::validation(format!(
            "day {day} out of range for {year}/{month:02} ({length} days)"
        )));
    }

    let offset = days_before_year(year) - days_before_year(ANCHOR_YEAR)
        + month_start_offset(month)
        + i64::from(day - 1);

    anchor()
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(|| LunaError::validation(format!("{year}/{month}/{day} not representable")))
}

/// Convert a Gregorian date to the Jalali calendar
pub fn to_jalali(date: NaiveDate) -> JalaliDate {
    let epoch_day = (date - anchor()).num_days() + days_before_year(ANCHOR_YEAR);

    // Estimate from the mean year length, then settle on the exact year.
    let mut year = (epoch_day * 33).div_euclid(CYCLE_DAYS) as i32 + 1;
    while days_before_year(year) > epoch_day {
        year -= 1;
    }
    while days_before_year(year + 1) <= epoch_day {
        year += 1;
    }

    let day_of_year = epoch_day - days_before_year(year);
    let (month, day) = if day_of_year < 186 {
        (day_of_year / 31 + 1, day_of_year % 31 + 1)
    } else {
        let rest = day_of_year - 186;
        (rest / 30 + 7, rest % 30 + 1)
    };

    JalaliDate::new(year, month as u32, day as u32)
}

/// Sunday-based weekday (Sunday = 0) of a Gregorian date
pub fn gregorian_weekday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Column of the first day of a Jalali month in a Saturday-first week
pub fn first_weekday_offset(year: i32, month: u32) -> Result<u32> {
    let first = to_gregorian(year, month, 1)?;
    Ok((gregorian_weekday(first) + 1) % 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(to_jalali(ymd(2024, 3, 20)), JalaliDate::new(1403, 1, 1));
        assert_eq!(to_jalali(ymd(2025, 3, 21)), JalaliDate::new(1404, 1, 1));
        assert_eq!(to_jalali(ymd(2000, 1, 1)), JalaliDate::new(1378, 10, 11));
        assert_eq!(to_jalali(ymd(1979, 2, 11)), JalaliDate::new(1357, 11, 22));
        assert_eq!(to_gregorian(1403, 1, 1).unwrap(), ymd(2024, 3, 20));
        assert_eq!(to_gregorian(1403, 12, 30).unwrap(), ymd(2025, 3, 20));
    }

    #[test]
    fn test_leap_rule_is_periodic() {
        for year in 1..=3000 {
            let expected = LEAP_REMAINDERS.contains(&(year % 33));
            assert_eq!(is_leap_year(year), expected, "year {year}");
            assert_eq!(is_leap_year(year), is_leap_year(year + 33));
        }
        let leaps: Vec<i32> = (0..33).filter(|&r| is_leap_year(r)).collect();
        assert_eq!(leaps, LEAP_REMAINDERS.to_vec());
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(month_length(1402, 1), 31);
        assert_eq!(month_length(1402, 6), 31);
        assert_eq!(month_length(1402, 7), 30);
        assert_eq!(month_length(1402, 11), 30);
        assert_eq!(month_length(1402, 12), 29);
        assert_eq!(month_length(1403, 12), 30);
        assert_eq!(month_length(1403, 13), 0);
    }

    #[test]
    fn test_year_lengths_match_leap_rule() {
        for year in 1300..1500 {
            let start = to_gregorian(year, 1, 1).unwrap();
            let next = to_gregorian(year + 1, 1, 1).unwrap();
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!((next - start).num_days(), expected, "year {year}");
        }
    }

    #[test]
    fn test_round_trip_every_day() {
        for year in (MIN_YEAR..=MAX_YEAR).filter(|y| (1200..=1600).contains(y) || y % 97 == 0) {
            for month in 1..=12 {
                for day in 1..=month_length(year, month) {
                    let gregorian = to_gregorian(year, month, day).unwrap();
                    assert_eq!(
                        to_jalali(gregorian),
                        JalaliDate::new(year, month, day),
                        "via {gregorian}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_consecutive_gregorian_days_stay_consecutive() {
        let mut date = ymd(2020, 1, 1);
        let mut prev = to_jalali(date);
        for _ in 0..2000 {
            date = date.succ_opt().unwrap();
            let next = to_jalali(date);
            assert!(next > prev);
            assert_eq!(to_gregorian(next.year, next.month, next.day).unwrap(), date);
            prev = next;
        }
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert!(to_gregorian(1402, 12, 30).is_err());
        assert!(to_gregorian(1403, 0, 1).is_err());
        assert!(to_gregorian(1403, 7, 31).is_err());
        assert!(to_gregorian(0, 1, 1).is_err());
        assert!(to_gregorian(MAX_YEAR + 1, 1, 1).is_err());
    }

    #[test]
    fn test_first_weekday_offset() {
        // 1 Farvardin 1403 fell on a Wednesday: Sunday-based 3, Saturday-based 4
        assert_eq!(gregorian_weekday(ymd(2024, 3, 20)), 3);
        assert_eq!(first_weekday_offset(1403, 1).unwrap(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(JalaliDate::new(1403, 1, 9).to_string(), "1403/01/09");
    }
}
