//! Calendar primitives shared by the date picker: month grids, labels,
//! the date pattern codec and the clock used to resolve "today".

mod clock;
mod pattern;

use chrono::{Datelike, Days, NaiveDate};

pub use clock::{Clock, FixedClock, SystemClock};
pub use pattern::{DatePattern, PatternError};

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// One date of a month grid. `offset` marks dates outside the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDate {
    pub date: NaiveDate,
    pub offset: bool,
}

/// Whole weeks (Sunday first) covering one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    year: i32,
    month: u32,
    days: Vec<GridDate>,
}

impl CalendarGrid {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            days: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index of the displayed month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> &[GridDate] {
        &self.days
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridDate]> + '_ {
        self.days.chunks_exact(7)
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / 7
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Builds the grid for `month` (zero-based) of `year`.
///
/// Month indices past 11 roll into the following years. Years outside the
/// range chrono can represent produce an empty grid.
pub fn month_dates(year: i32, month: u32) -> CalendarGrid {
    let year = year.saturating_add((month / 12) as i32);
    let month = month % 12;
    collect_month(year, month).unwrap_or_else(|| CalendarGrid::empty(year, month))
}

fn collect_month(year: i32, month: u32) -> Option<CalendarGrid> {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let lead = first.weekday().num_days_from_sunday();
    let mut cursor = first.checked_sub_days(Days::new(u64::from(lead)))?;

    let mut days = Vec::with_capacity(42);
    loop {
        let past_month = cursor > first && !in_month(cursor, year, month);
        if past_month && days.len() % 7 == 0 {
            break;
        }
        days.push(GridDate {
            date: cursor,
            offset: !in_month(cursor, year, month),
        });
        cursor = cursor.succ_opt()?;
    }

    Some(CalendarGrid { year, month, days })
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month0() == month
}
