//! Button action codes
//!
//! Every keyboard button carries an ASCII, underscore-delimited action code.
//! Codes are decoded once here into [`Action`] and matched exhaustively by the
//! dispatcher.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Role change confirm/cancel and settings menu codes
//! - 1.0.0: Tracking, picker, symptom, role, calendar and reminder codes

use chrono::NaiveTime;

use crate::core::{LunaError, Result, IGNORE_ACTION};
use crate::database::{format_reminder_time, parse_reminder_time, Role};
use crate::features::calendar::CalendarSystem;
use crate::features::cycles::SymptomKind;
use crate::features::datepicker::{PickerAction, TargetField};
use crate::features::locales::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMethod {
    Today,
    Picker,
}

impl LogMethod {
    pub fn code(self) -> &'static str {
        match self {
            LogMethod::Today => "today",
            LogMethod::Picker => "picker",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "today" => Ok(LogMethod::Today),
            "picker" => Ok(LogMethod::Picker),
            other => Err(LunaError::validation(format!("unknown log method '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsMenu {
    Language,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `log_method_{today|picker}`
    LogMethod(LogMethod),
    /// `log_select_{start|end}_{today|picker}`
    LogSelect { field: TargetField, method: LogMethod },
    /// `datepicker_nav_...` / `datepicker_select_...`
    Picker(PickerAction),
    LogSymptom(SymptomKind),
    /// First role choice during onboarding
    SetRole(Role),
    /// Asks for confirmation before a destructive role change
    SetNewRole(Role),
    ConfirmNewRole(Role),
    CancelNewRole,
    SetCalendar(CalendarSystem),
    /// `None` turns reminders off
    SetReminder(Option<NaiveTime>),
    SetLanguage(Language),
    Settings(SettingsMenu),
    /// Inert grid cells
    Ignore,
}

impl Action {
    pub fn decode(code: &str) -> Result<Self> {
        if code == IGNORE_ACTION {
            return Ok(Action::Ignore);
        }
        if code == "cancel_new_role" {
            return Ok(Action::CancelNewRole);
        }
        if PickerAction::is_picker_code(code) {
            return PickerAction::decode(code).map(Action::Picker);
        }
        if let Some(method) = code.strip_prefix("log_method_") {
            return LogMethod::parse(method).map(Action::LogMethod);
        }
        if let Some(rest) = code.strip_prefix("log_select_") {
            let (field, method) = rest
                .split_once('_')
                .ok_or_else(|| LunaError::validation(format!("malformed action '{code}'")))?;
            return Ok(Action::LogSelect {
                field: field.parse()?,
                method: LogMethod::parse(method)?,
            });
        }
        if let Some(kind) = code.strip_prefix("log_symptom_") {
            return kind.parse().map(Action::LogSymptom);
        }
        if let Some(role) = code.strip_prefix("set_role_") {
            return role.parse().map(Action::SetRole);
        }
        if let Some(role) = code.strip_prefix("set_new_role_") {
            return role.parse().map(Action::SetNewRole);
        }
        if let Some(role) = code.strip_prefix("confirm_new_role_") {
            return role.parse().map(Action::ConfirmNewRole);
        }
        if let Some(calendar) = code.strip_prefix("set_calendar_") {
            return calendar.parse().map(Action::SetCalendar);
        }
        if let Some(time) = code.strip_prefix("set_reminder_") {
            if time == "off" {
                return Ok(Action::SetReminder(None));
            }
            return parse_reminder_time(time).map(|t| Action::SetReminder(Some(t)));
        }
        if let Some(lang) = code.strip_prefix("set_language_") {
            return lang.parse().map(Action::SetLanguage);
        }
        match code {
            "settings_language" => Ok(Action::Settings(SettingsMenu::Language)),
            "settings_calendar" => Ok(Action::Settings(SettingsMenu::Calendar)),
            _ => Err(LunaError::validation(format!("unknown action '{code}'"))),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Action::LogMethod(method) => format!("log_method_{}", method.code()),
            Action::LogSelect { field, method } => {
                format!("log_select_{}_{}", field.code(), method.code())
            }
            Action::Picker(picker) => picker.encode(),
            Action::LogSymptom(kind) => format!("log_symptom_{}", kind.code()),
            Action::SetRole(role) => format!("set_role_{}", role.code()),
            Action::SetNewRole(role) => format!("set_new_role_{}", role.code()),
            Action::ConfirmNewRole(role) => format!("confirm_new_role_{}", role.code()),
            Action::CancelNewRole => "cancel_new_role".to_string(),
            Action::SetCalendar(calendar) => format!("set_calendar_{}", calendar.code()),
            Action::SetReminder(Some(time)) => {
                format!("set_reminder_{}", format_reminder_time(*time))
            }
            Action::SetReminder(None) => "set_reminder_off".to_string(),
            Action::SetLanguage(lang) => format!("set_language_{}", lang.code()),
            Action::Settings(SettingsMenu::Language) => "settings_language".to_string(),
            Action::Settings(SettingsMenu::Calendar) => "settings_calendar".to_string(),
            Action::Ignore => IGNORE_ACTION.to_string(),
        }
    }
}
