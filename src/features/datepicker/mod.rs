//! # Date Picker Feature
//!
//! Stateless month-grid date picker. Everything needed to redraw or resolve the
//! picker travels inside the button action codes, so no conversation state is
//! kept between renders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Jalali display support
//! - 1.0.0: Gregorian month grid with prev/next navigation

pub mod grid;

pub use grid::{render_month, GridCell, MonthGrid};

use chrono::{Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::core::{LunaError, Result};
use crate::features::calendar::{format_iso_date, parse_iso_date, CalendarSystem};

pub const NAV_PREFIX: &str = "datepicker_nav_";
pub const SELECT_PREFIX: &str = "datepicker_select_";

/// Which end of a period the picked date is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetField {
    PeriodStart,
    PeriodEnd,
}

impl TargetField {
    pub fn code(self) -> &'static str {
        match self {
            TargetField::PeriodStart => "start",
            TargetField::PeriodEnd => "end",
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetField {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(TargetField::PeriodStart),
            "end" => Ok(TargetField::PeriodEnd),
            other => Err(LunaError::validation(format!("unknown date field '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn code(self) -> &'static str {
        match self {
            Direction::Prev => "prev",
            Direction::Next => "next",
        }
    }
}

impl FromStr for Direction {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            other => Err(LunaError::validation(format!("unknown direction '{other}'"))),
        }
    }
}

/// A decoded picker interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Redraw the picker one month before/after `reference`
    Navigate {
        field: TargetField,
        calendar: CalendarSystem,
        reference: NaiveDate,
        direction: Direction,
    },
    /// A day was picked; `date` is always Gregorian
    Select { field: TargetField, date: NaiveDate },
}

impl PickerAction {
    pub fn is_picker_code(code: &str) -> bool {
        code.starts_with(NAV_PREFIX) || code.starts_with(SELECT_PREFIX)
    }

    pub fn decode(code: &str) -> Result<Self> {
        if let Some(rest) = code.strip_prefix(NAV_PREFIX) {
            let parts: Vec<&str> = rest.split('_').collect();
            let [field, calendar, reference, direction] = parts.as_slice() else {
                return Err(LunaError::validation(format!("malformed picker code '{code}'")));
            };
            return Ok(PickerAction::Navigate {
                field: field.parse()?,
                calendar: calendar.parse()?,
                reference: parse_iso_date(reference)?,
                direction: direction.parse()?,
            });
        }

        if let Some(rest) = code.strip_prefix(SELECT_PREFIX) {
            let (field, date) = rest
                .split_once('_')
                .ok_or_else(|| LunaError::validation(format!("malformed picker code '{code}'")))?;
            return Ok(PickerAction::Select {
                field: field.parse()?,
                date: parse_iso_date(date)?,
            });
        }

        Err(LunaError::validation(format!("not a picker code '{code}'")))
    }

    pub fn encode(&self) -> String {
        match self {
            PickerAction::Navigate {
                field,
                calendar,
                reference,
                direction,
            } => format!(
                "{NAV_PREFIX}{}_{}_{}_{}",
                field.code(),
                calendar.code(),
                format_iso_date(*reference),
                direction.code()
            ),
            PickerAction::Select { field, date } => {
                format!("{SELECT_PREFIX}{}_{}", field.code(), format_iso_date(*date))
            }
        }
    }
}

/// Step a reference date one Gregorian month, clamping the day to the month end.
///
/// The step is Gregorian even when the picker shows Jalali months, so near month
/// ends a Jalali month can be skipped or shown twice.
pub fn step_month(reference: NaiveDate, direction: Direction) -> Result<NaiveDate> {
    let stepped = match direction {
        Direction::Prev => reference.checked_sub_months(Months::new(1)),
        Direction::Next => reference.checked_add_months(Months::new(1)),
    };
    stepped.ok_or_else(|| LunaError::validation(format!("cannot step month from {reference}")))
}
