//! Month grid rendering

use chrono::NaiveDate;

use super::{Direction, PickerAction, TargetField};
use crate::core::{Button, Keyboard, Result};
use crate::features::calendar::{CalendarSystem, MonthLayout};

pub const PREV_LABEL: &str = "‹ Prev";
pub const NEXT_LABEL: &str = "Next ›";

/// One square of the grid; `date` is `None` for padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub label: String,
    pub date: Option<NaiveDate>,
}

impl GridCell {
    fn blank() -> Self {
        Self {
            label: " ".to_string(),
            date: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub field: TargetField,
    pub reference: NaiveDate,
    pub layout: MonthLayout,
    /// Rows of exactly seven cells
    pub weeks: Vec<Vec<GridCell>>,
}

/// Lay out the month containing `reference` in `calendar`
pub fn render_month(
    field: TargetField,
    calendar: CalendarSystem,
    reference: NaiveDate,
) -> Result<MonthGrid> {
    let layout = calendar.month_containing(reference)?;

    let mut cells: Vec<GridCell> = (0..layout.offset).map(|_| GridCell::blank()).collect();
    for day in 1..=layout.length {
        cells.push(GridCell {
            label: day.to_string(),
            date: layout.date_of(day),
        });
    }
    while cells.len() % 7 != 0 {
        cells.push(GridCell::blank());
    }

    let weeks = cells.chunks(7).map(<[GridCell]>::to_vec).collect();

    Ok(MonthGrid {
        field,
        reference,
        layout,
        weeks,
    })
}

impl MonthGrid {
    pub fn header(&self) -> String {
        format!(
            "{} {} {}",
            self.layout.calendar.emoji(),
            self.layout.month_name(),
            self.layout.year
        )
    }

    fn nav_action(&self, direction: Direction) -> String {
        PickerAction::Navigate {
            field: self.field,
            calendar: self.layout.calendar,
            reference: self.reference,
            direction,
        }
        .encode()
    }

    /// Header row, weekday row, the weeks, then prev/next
    pub fn into_keyboard(self) -> Keyboard {
        let mut keyboard = Keyboard::new().row(vec![Button::inert(self.header())]).row(
            self.layout
                .calendar
                .weekday_labels()
                .iter()
                .map(|label| Button::inert(*label))
                .collect(),
        );

        for week in &self.weeks {
            let row = week
                .iter()
                .map(|cell| match cell.date {
                    Some(date) => Button::new(
                        cell.label.clone(),
                        PickerAction::Select {
                            field: self.field,
                            date,
                        }
                        .encode(),
                    ),
                    None => Button::inert(cell.label.clone()),
                })
                .collect();
            keyboard = keyboard.row(row);
        }

        keyboard.row(vec![
            Button::new(PREV_LABEL, self.nav_action(Direction::Prev)),
            Button::new(NEXT_LABEL, self.nav_action(Direction::Next)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::datepicker::step_month;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_labels(grid: &MonthGrid) -> Vec<String> {
        grid.weeks
            .iter()
            .flatten()
            .filter(|c| c.date.is_some())
            .map(|c| c.label.clone())
            .collect()
    }

    fn gregorian(reference: NaiveDate) -> MonthGrid {
        render_month(TargetField::PeriodStart, CalendarSystem::Gregorian, reference).unwrap()
    }

    fn jalali(field: TargetField, reference: NaiveDate) -> MonthGrid {
        render_month(field, CalendarSystem::Jalali, reference).unwrap()
    }

    /// Two years of months in both calendars
    fn sample_grids() -> Vec<MonthGrid> {
        let mut grids = Vec::new();
        for calendar in CalendarSystem::ALL {
            let mut reference = ymd(2023, 1, 10);
            for _ in 0..24 {
                grids.push(render_month(TargetField::PeriodStart, calendar, reference).unwrap());
                reference = step_month(reference, Direction::Next).unwrap();
            }
        }
        grids
    }

    #[test]
    fn test_rows_have_seven_cells() {
        for grid in sample_grids() {
            assert!(grid.weeks.iter().all(|w| w.len() == 7), "{}", grid.header());
        }
    }

    #[test]
    fn test_each_day_appears_once() {
        for grid in sample_grids() {
            let expected: Vec<String> = (1..=grid.layout.length).map(|d| d.to_string()).collect();
            assert_eq!(day_labels(&grid), expected, "{}", grid.header());
        }

        assert_eq!(day_labels(&gregorian(ymd(2024, 2, 10))).len(), 29);
        let esfand = jalali(TargetField::PeriodEnd, ymd(2025, 3, 1));
        assert_eq!(day_labels(&esfand).len(), 30, "Esfand 1403 is a leap month");
    }

    #[test]
    fn test_first_day_sits_in_offset_column() {
        for grid in sample_grids() {
            let offset = grid.layout.offset as usize;
            let first_week = &grid.weeks[0];
            assert!(first_week[..offset].iter().all(|c| c.date.is_none()), "{}", grid.header());
            assert_eq!(first_week[offset].date, Some(grid.layout.first_day), "{}", grid.header());
            assert_eq!(first_week[offset].label, "1");
        }

        assert_eq!(gregorian(ymd(2024, 2, 10)).layout.offset, 4);
        // 1 Farvardin 1403 is a Wednesday, column 4 counting from Saturday
        let farvardin = jalali(TargetField::PeriodStart, ymd(2024, 3, 25));
        assert_eq!(farvardin.weeks[0][4].date, Some(ymd(2024, 3, 20)));
    }

    #[test]
    fn test_keyboard_layout() {
        let grid = gregorian(ymd(2024, 2, 10));
        let weeks = grid.weeks.len();
        let keyboard = grid.into_keyboard();

        assert_eq!(keyboard.rows.len(), weeks + 3);
        assert_eq!(keyboard.rows[0][0].label, "🗓️ February 2024");
        assert!(keyboard.rows[0][0].is_inert());
        let weekday_labels: Vec<&str> =
            keyboard.rows[1].iter().map(|b| b.label.as_str()).collect();
        assert_eq!(weekday_labels, ["S", "M", "T", "W", "T", "F", "S"]);

        let nav = keyboard.rows.last().unwrap();
        assert_eq!(nav[0].label, PREV_LABEL);
        assert_eq!(
            nav[1].action.as_deref(),
            Some("datepicker_nav_start_gregorian_2024-02-10_next")
        );
    }

    #[test]
    fn test_selecting_a_jalali_cell_yields_gregorian_date() {
        let grid = jalali(TargetField::PeriodEnd, ymd(2024, 3, 25));
        let keyboard = grid.into_keyboard();
        let action = keyboard
            .rows
            .iter()
            .flatten()
            .find(|b| b.label == "10")
            .and_then(|b| b.action.clone())
            .unwrap();
        assert_eq!(
            PickerAction::decode(&action).unwrap(),
            PickerAction::Select {
                field: TargetField::PeriodEnd,
                date: ymd(2024, 3, 29)
            }
        );
    }

    #[test]
    fn test_navigation_redraws_neighbouring_month() {
        let grid = gregorian(ymd(2024, 1, 31));
        let next = grid.into_keyboard().rows.last().unwrap()[1].action.clone().unwrap();
        let PickerAction::Navigate {
            field,
            calendar,
            reference,
            direction,
        } = PickerAction::decode(&next).unwrap()
        else {
            panic!("expected navigation");
        };
        let stepped = step_month(reference, direction).unwrap();
        let grid = render_month(field, calendar, stepped).unwrap();
        assert_eq!(grid.header(), "🗓️ February 2024");
    }
}
