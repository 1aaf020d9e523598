//! Calendar view state: which grid is shown, which month/year it is anchored on, and the
//! committed selection.

use crate::date::CalendarDate;
use crate::grid;
use crate::grid::DayCell;
use crate::grid::YearRange;
use tracing::debug;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Day,
    Month,
    Year,
}

impl ViewMode {
    /// The next wider view; `Year` stays `Year`.
    pub fn zoomed_out(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Month,
            ViewMode::Month | ViewMode::Year => ViewMode::Year,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarState {
    cursor: CalendarDate,
    mode: ViewMode,
    selected: Option<CalendarDate>,
}

impl CalendarState {
    /// Starts in day view on `initial`, or on `today` when there is no initial date.
    pub fn new(initial: Option<CalendarDate>, today: CalendarDate) -> Self {
        Self {
            cursor: initial.unwrap_or(today),
            mode: ViewMode::Day,
            selected: initial,
        }
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    /// Replaces the selection without moving the cursor (controlled usage).
    pub fn set_selected(&mut self, selected: Option<CalendarDate>) {
        self.selected = selected;
    }

    /// Moves the cursor without touching the mode or the selection.
    pub fn set_cursor(&mut self, cursor: CalendarDate) {
        self.cursor = cursor;
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::containing(self.cursor.year())
    }

    pub fn day_grid(&self, today: CalendarDate) -> Vec<DayCell> {
        grid::day_grid(self.cursor, today, self.selected)
    }

    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Day => format!("{} {}", self.cursor.month_name(), self.cursor.year()),
            ViewMode::Month => self.cursor.year().to_string(),
            ViewMode::Year => {
                let range = self.year_range();
                format!("{}-{}", range.start(), range.end())
            }
        }
    }

    /// Returns `true` if the mode changed.
    pub fn zoom_out(&mut self) -> bool {
        let next = self.mode.zoomed_out();
        if next == self.mode {
            return false;
        }
        debug!(from = ?self.mode, to = ?next, "calendar zoom out");
        self.mode = next;
        true
    }

    pub fn previous(&mut self) {
        self.shift(-1);
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, direction: i32) {
        self.cursor = match self.mode {
            ViewMode::Day => self.cursor.add_months(direction),
            ViewMode::Month => self.cursor.add_years(direction),
            // Whole decades, so the cursor keeps its place in the range (2024 -> 2014).
            ViewMode::Year => self.cursor.add_years(direction * YearRange::LEN),
        };
        trace!(mode = ?self.mode, cursor = %self.cursor, "calendar navigate");
    }

    /// Drill down from month view: keeps year and day, shows the day grid.
    pub fn select_month(&mut self, month: u32) {
        self.cursor = self.cursor.with_month(month);
        self.mode = ViewMode::Day;
        debug!(cursor = %self.cursor, "calendar month selected");
    }

    /// Drill down from year view (range or edge years): keeps month and day, shows months.
    pub fn select_year(&mut self, year: i32) {
        self.cursor = self.cursor.with_year(year);
        self.mode = ViewMode::Month;
        debug!(cursor = %self.cursor, "calendar year selected");
    }

    /// Commits `date` as the selection and moves the cursor onto it, which switches months
    /// when the date came from a leading or trailing cell.
    pub fn select_date(&mut self, date: CalendarDate) -> CalendarDate {
        self.cursor = date;
        self.selected = Some(date);
        self.mode = ViewMode::Day;
        debug!(date = %date, "calendar date selected");
        date
    }

    pub fn select_day(&mut self, cell: &DayCell) -> CalendarDate {
        self.select_date(cell.date)
    }

    pub fn go_to_today(&mut self, today: CalendarDate) {
        self.cursor = today;
        self.mode = ViewMode::Day;
        trace!(cursor = %self.cursor, "calendar jump to today");
    }
}
