//! Grid generation for the day, month and year views.

use crate::date::CalendarDate;

/// Six rows of seven days, whatever the month length or starting weekday.
pub const DAY_GRID_CELLS: usize = 42;
pub const DAY_GRID_COLUMNS: usize = 7;

/// Month view shows all twelve months; year view shows ten years plus the two edge years.
pub const PICKER_GRID_CELLS: usize = 12;
pub const PICKER_GRID_COLUMNS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthMembership {
    Previous,
    Current,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    /// Fully resolved date, including the adjacent month's year on rollover.
    pub date: CalendarDate,
    pub membership: MonthMembership,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn in_current_month(&self) -> bool {
        self.membership == MonthMembership::Current
    }
}

/// Builds the 42 day cells for the month containing `cursor`.
///
/// Leading cells are the previous month's last days (as many as the weekday index of day 1,
/// Sunday first), then the whole month, then the next month from day 1 until the grid is full.
/// Both flags compare full dates, so a "15" borrowed from an adjacent month is never marked
/// selected because the 15th of the cursor month is.
pub fn day_grid(
    cursor: CalendarDate,
    today: CalendarDate,
    selected: Option<CalendarDate>,
) -> Vec<DayCell> {
    let first = cursor.first_of_month();
    let leading = first.first_weekday_of_month() as i64;
    let days_in_month = cursor.days_in_month() as i64;

    let mut cells = Vec::with_capacity(DAY_GRID_CELLS);
    for offset in -leading..(DAY_GRID_CELLS as i64 - leading) {
        let date = first.add_days(offset);
        let membership = if offset < 0 {
            MonthMembership::Previous
        } else if offset < days_in_month {
            MonthMembership::Current
        } else {
            MonthMembership::Next
        };
        cells.push(DayCell {
            date,
            membership,
            is_today: date == today,
            is_selected: selected == Some(date),
        });
    }
    cells
}

/// Index of `date` in the day grid anchored at `cursor`, if it is visible.
pub fn day_grid_index(cursor: CalendarDate, date: CalendarDate) -> Option<usize> {
    let first = cursor.first_of_month();
    let leading = first.first_weekday_of_month() as i64;
    let offset = date.naive().signed_duration_since(first.naive()).num_days() + leading;
    (0..DAY_GRID_CELLS as i64)
        .contains(&offset)
        .then_some(offset as usize)
}

/// Ten consecutive years starting at a multiple of ten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
}

impl YearRange {
    pub const LEN: i32 = 10;

    pub fn containing(year: i32) -> Self {
        Self {
            start: year.div_euclid(Self::LEN) * Self::LEN,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.start + Self::LEN - 1
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end()
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end()).contains(&year)
    }

    pub fn last_previous_year(&self) -> i32 {
        self.start - 1
    }

    pub fn first_following_year(&self) -> i32 {
        self.end() + 1
    }

    /// The twelve year-view cells: previous edge year, the range, following edge year.
    pub fn cells(&self) -> [i32; PICKER_GRID_CELLS] {
        let mut out = [0; PICKER_GRID_CELLS];
        out[0] = self.last_previous_year();
        for (slot, year) in out[1..].iter_mut().zip(self.years()) {
            *slot = year;
        }
        out[PICKER_GRID_CELLS - 1] = self.first_following_year();
        out
    }
}
