//! Month grid generation for the calendar view.
//!
//! This module contains the structural side of the calendar: given a year
//! and a zero-based month index it produces the ordered cell sequence
//! (leading blanks, then day numbers) needed to render a 7-column month.
//! Cells carry no event data; the event overlay is joined on via date keys
//! by the presentation layer.

use chrono::{Datelike, NaiveDate};

use crate::date_key::date_key;
use crate::error::InvalidMonth;

/// One rendered position in a month's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the first day of the month.
    Blank,
    /// An actual day of the month (1-based).
    Day(u32),
}

/// The cell sequence for one month, plus the facts it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based month index (0 = January).
    pub month: u32,
    /// Weekday of the 1st (0 = Sunday .. 6 = Saturday).
    pub first_weekday: u32,
    /// `first_weekday` blanks followed by `Day(1..=days_in_month)`.
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Date key for a day number of this grid's month.
    pub fn day_key(&self, day: u32) -> String {
        date_key(self.year, self.month, day)
    }

    /// Date key for a cell; `None` for padding cells.
    pub fn cell_key(&self, cell: GridCell) -> Option<String> {
        match cell {
            GridCell::Blank => None,
            GridCell::Day(day) => Some(self.day_key(day)),
        }
    }
}

/// Build the cell sequence for a month.
///
/// Pure: identical inputs always yield an identical grid, with no
/// dependency on the current date. The caller must pre-normalize `month`
/// into `0..=11`; year-boundary arithmetic lives in [`previous_month`]
/// and [`next_month`].
pub fn build_month_grid(year: i32, month: u32) -> Result<MonthGrid, InvalidMonth> {
    if month > 11 {
        return Err(InvalidMonth(month));
    }

    let days = days_in_month(year, month);
    let first_weekday = first_weekday_of_month(year, month);

    let mut cells = Vec::with_capacity((first_weekday + days) as usize);
    for _ in 0..first_weekday {
        cells.push(GridCell::Blank);
    }
    for day in 1..=days {
        cells.push(GridCell::Day(day));
    }

    Ok(MonthGrid {
        year,
        month,
        first_weekday,
        cells,
    })
}

/// Number of days in a month (zero-based index).
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Weekday of the 1st of the month (0 = Sunday .. 6 = Saturday).
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    if let Some(date) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) {
        date.weekday().num_days_from_sunday()
    } else {
        0
    }
}

/// Human-readable month name for a zero-based month index.
pub fn month_name(month0: u32) -> &'static str {
    match month0 {
        0 => "January",
        1 => "February",
        2 => "March",
        3 => "April",
        4 => "May",
        5 => "June",
        6 => "July",
        7 => "August",
        8 => "September",
        9 => "October",
        10 => "November",
        11 => "December",
        _ => "Invalid Month",
    }
}

/// Month before `(year, month0)`, rolling the year back across January.
pub fn previous_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 0 {
        (year - 1, 11)
    } else {
        (year, month0 - 1)
    }
}

/// Month after `(year, month0)`, rolling the year forward across December.
pub fn next_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    }
}
