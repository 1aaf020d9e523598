//! Calendar widget: a month grid with month and year pickers.
//!
//! The widget keeps its own viewing cursor (the month or decade on screen) apart from the
//! selected date. Selecting a day commits it, reports it as [`CalendarAction::Selected`] and
//! calls the `on_select` callback with the `YYYY-MM-DD` string.

use crate::date::CalendarDate;
use crate::date::WEEKDAY_LABELS;
use crate::date::month_short_name;
use crate::grid::DAY_GRID_CELLS;
use crate::grid::DAY_GRID_COLUMNS;
use crate::grid::DayCell;
use crate::grid::MonthMembership;
use crate::grid::PICKER_GRID_CELLS;
use crate::grid::PICKER_GRID_COLUMNS;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use crate::view::CalendarState;
use crate::view::ViewMode;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::fmt;

/// Minimum area that shows the full day grid: 7 columns of 3 cells, header + weekdays + 6 rows.
pub const CALENDAR_WIDTH: u16 = 21;
pub const CALENDAR_HEIGHT: u16 = 8;

const NAV_WIDTH: u16 = 3;
const PICKER_ROWS: u16 = (PICKER_GRID_CELLS / PICKER_GRID_COLUMNS) as u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarAction {
    None,
    Redraw,
    Selected(CalendarDate),
}

#[derive(Clone, Debug)]
pub struct CalendarBindings {
    pub previous: Binding,
    pub next: Binding,
    pub zoom_out: Binding,
    pub today: Binding,
    pub activate: Binding,
}

impl Default for CalendarBindings {
    fn default() -> Self {
        Self {
            previous: Binding::new(
                "[",
                "previous",
                vec![
                    keymap::key(KeyCode::PageUp),
                    keymap::key_char('['),
                    keymap::key_char('<'),
                ],
            ),
            next: Binding::new(
                "]",
                "next",
                vec![
                    keymap::key(KeyCode::PageDown),
                    keymap::key_char(']'),
                    keymap::key_char('>'),
                ],
            ),
            zoom_out: Binding::new("z", "zoom out", vec![keymap::key_char('z')]),
            today: Binding::new("t", "today", vec![keymap::key_char('t')]),
            activate: Binding::new(
                "enter",
                "select",
                vec![keymap::key(KeyCode::Enter), keymap::key_char(' ')],
            ),
        }
    }
}

impl CalendarBindings {
    pub fn all(&self) -> Vec<Binding> {
        vec![
            self.previous.clone(),
            self.next.clone(),
            self.zoom_out.clone(),
            self.today.clone(),
            self.activate.clone(),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct CalendarOptions {
    pub bindings: CalendarBindings,
    pub show_weekdays: bool,
    /// Pins "today" instead of reading the local clock on every pass.
    pub today: Option<CalendarDate>,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            bindings: CalendarBindings::default(),
            show_weekdays: true,
            today: None,
        }
    }
}

/// Screen regions of one frame, shared by rendering and mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CalendarLayout {
    previous: Rect,
    title: Rect,
    next: Rect,
    weekdays: Option<Rect>,
    body: Rect,
}

impl CalendarLayout {
    fn new(area: Rect, mode: ViewMode, show_weekdays: bool) -> Self {
        let nav_w = NAV_WIDTH.min(area.width / 3);
        let header_h = area.height.min(1);
        let previous = Rect::new(area.x, area.y, nav_w, header_h);
        let next = Rect::new(area.right().saturating_sub(nav_w), area.y, nav_w, header_h);
        let title = Rect::new(
            area.x + nav_w,
            area.y,
            area.width.saturating_sub(nav_w * 2),
            header_h,
        );

        let rest = Rect::new(
            area.x,
            area.y + header_h,
            area.width,
            area.height.saturating_sub(header_h),
        );
        let (weekdays, body) = if mode == ViewMode::Day && show_weekdays && rest.height > 0 {
            (
                Some(Rect::new(rest.x, rest.y, rest.width, 1)),
                Rect::new(rest.x, rest.y + 1, rest.width, rest.height - 1),
            )
        } else {
            (None, rest)
        };

        Self {
            previous,
            title,
            next,
            weekdays,
            body,
        }
    }

    fn columns(&self, count: usize) -> impl Iterator<Item = (u16, u16)> + '_ {
        let count = count as u16;
        (0..count).map(move |n| {
            let x0 = render::column_offset(self.body.width, count, n);
            let x1 = render::column_offset(self.body.width, count, n + 1);
            (self.body.x + x0, x1 - x0)
        })
    }

    fn day_cell(&self, index: usize) -> Option<Rect> {
        let row = (index / DAY_GRID_COLUMNS) as u16;
        if row >= self.body.height {
            return None;
        }
        let (x, w) = self.columns(DAY_GRID_COLUMNS).nth(index % DAY_GRID_COLUMNS)?;
        Some(Rect::new(x, self.body.y + row, w, 1))
    }

    fn picker_cell(&self, index: usize) -> Option<Rect> {
        if self.body.height == 0 {
            return None;
        }
        let row = (index / PICKER_GRID_COLUMNS) as u16;
        let dy = render::column_offset(self.body.height, PICKER_ROWS.min(self.body.height), row);
        if row >= PICKER_ROWS.min(self.body.height) {
            return None;
        }
        let (x, w) = self.columns(PICKER_GRID_COLUMNS).nth(index % PICKER_GRID_COLUMNS)?;
        Some(Rect::new(x, self.body.y + dy, w, 1))
    }

    fn cell(&self, mode: ViewMode, index: usize) -> Option<Rect> {
        match mode {
            ViewMode::Day => self.day_cell(index),
            ViewMode::Month | ViewMode::Year => self.picker_cell(index),
        }
    }

    fn hit(&self, mode: ViewMode, pos: Position) -> Option<usize> {
        let count = match mode {
            ViewMode::Day => DAY_GRID_CELLS,
            ViewMode::Month | ViewMode::Year => PICKER_GRID_CELLS,
        };
        (0..count).find(|&i| self.cell(mode, i).is_some_and(|r| r.contains(pos)))
    }
}

pub struct Calendar {
    state: CalendarState,
    /// Keyboard focus in day view.
    focus_date: CalendarDate,
    /// Keyboard focus in month/year view, `0..12`.
    focus_index: usize,
    has_focus: bool,
    options: CalendarOptions,
    on_select: Option<Box<dyn FnMut(&str)>>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("state", &self.state)
            .field("focus_date", &self.focus_date)
            .field("focus_index", &self.focus_index)
            .field("has_focus", &self.has_focus)
            .finish_non_exhaustive()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Calendar {
    /// Opens on `date`, or on today when there is none.
    pub fn new(date: Option<CalendarDate>) -> Self {
        Self::with_options(date, CalendarOptions::default())
    }

    /// Like [`Calendar::new`] for a `YYYY-MM-DD` string; unparsable text counts as no date.
    pub fn from_iso(date: Option<&str>) -> Self {
        Self::new(date.and_then(|s| CalendarDate::parse_iso(s).ok()))
    }

    pub fn with_options(date: Option<CalendarDate>, options: CalendarOptions) -> Self {
        let today = options.today.unwrap_or_else(CalendarDate::today);
        let state = CalendarState::new(date, today);
        let mut calendar = Self {
            focus_date: state.cursor(),
            focus_index: 0,
            state,
            has_focus: true,
            options,
            on_select: None,
        };
        calendar.reset_focus();
        calendar
    }

    pub fn on_select(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    pub fn cursor(&self) -> CalendarDate {
        self.state.cursor()
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.state.selected()
    }

    /// Controlled selection: updates the highlighted day without moving the view.
    pub fn set_selected(&mut self, date: Option<CalendarDate>) {
        self.state.set_selected(date);
    }

    pub fn title(&self) -> String {
        self.state.title()
    }

    /// Whether the focused cell is highlighted. Embedding widgets turn this off while the
    /// keyboard is elsewhere.
    pub fn set_has_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Minimum `(width, height)` for the full grid.
    pub fn size(&self) -> (u16, u16) {
        let height = if self.options.show_weekdays {
            CALENDAR_HEIGHT
        } else {
            CALENDAR_HEIGHT - 1
        };
        (CALENDAR_WIDTH, height)
    }

    fn today(&self) -> CalendarDate {
        self.options.today.unwrap_or_else(CalendarDate::today)
    }

    pub fn previous(&mut self) {
        self.state.previous();
        self.reset_focus();
    }

    pub fn next(&mut self) {
        self.state.next();
        self.reset_focus();
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.state.zoom_out();
        if changed {
            self.reset_focus();
        }
        changed
    }

    pub fn select_month(&mut self, month: u32) {
        self.state.select_month(month);
        self.reset_focus();
    }

    pub fn select_year(&mut self, year: i32) {
        self.state.select_year(year);
        self.reset_focus();
    }

    /// Commits `date` and notifies the `on_select` callback.
    pub fn select_date(&mut self, date: CalendarDate) -> CalendarAction {
        let date = self.state.select_date(date);
        self.focus_date = date;
        if let Some(f) = self.on_select.as_mut() {
            f(&date.to_iso());
        }
        CalendarAction::Selected(date)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> CalendarAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(_)
            | InputEvent::Mouse(_)
            | InputEvent::FocusGained
            | InputEvent::FocusLost => CalendarAction::None,
        }
    }

    /// Like [`Calendar::handle_event`], with mouse support for a calendar drawn in `area`.
    pub fn handle_event_in_area(&mut self, area: Rect, event: InputEvent) -> CalendarAction {
        match event {
            InputEvent::Mouse(m) => self.handle_mouse(area, m),
            other => self.handle_event(other),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> CalendarAction {
        let bindings = &self.options.bindings;
        if bindings.previous.matches(&key) {
            self.previous();
            return CalendarAction::Redraw;
        }
        if bindings.next.matches(&key) {
            self.next();
            return CalendarAction::Redraw;
        }
        if bindings.zoom_out.matches(&key) {
            return redraw_if(self.zoom_out());
        }
        if bindings.today.matches(&key) {
            let today = self.today();
            self.state.go_to_today(today);
            self.reset_focus();
            return CalendarAction::Redraw;
        }
        if bindings.activate.matches(&key) {
            return self.activate_focused();
        }

        match key.code {
            KeyCode::Left => self.move_focus(-1, -1),
            KeyCode::Right => self.move_focus(1, 1),
            KeyCode::Up => self.move_focus(-(DAY_GRID_COLUMNS as i64), -3),
            KeyCode::Down => self.move_focus(DAY_GRID_COLUMNS as i64, 3),
            _ => CalendarAction::None,
        }
    }

    fn handle_mouse(&mut self, area: Rect, m: MouseEvent) -> CalendarAction {
        if area.width == 0 || area.height == 0 {
            return CalendarAction::None;
        }
        let pos = Position::new(m.x, m.y);
        if !area.contains(pos) {
            return CalendarAction::None;
        }
        match m.kind {
            MouseEventKind::ScrollUp => {
                self.previous();
                return CalendarAction::Redraw;
            }
            MouseEventKind::ScrollDown => {
                self.next();
                return CalendarAction::Redraw;
            }
            _ if !m.is_left_down() => return CalendarAction::None,
            _ => {}
        }

        let mode = self.state.mode();
        let layout = CalendarLayout::new(area, mode, self.options.show_weekdays);
        if layout.previous.contains(pos) {
            self.previous();
            return CalendarAction::Redraw;
        }
        if layout.next.contains(pos) {
            self.next();
            return CalendarAction::Redraw;
        }
        if layout.title.contains(pos) {
            return redraw_if(self.zoom_out());
        }
        match layout.hit(mode, pos) {
            Some(index) => self.activate(index),
            None => CalendarAction::None,
        }
    }

    fn activate(&mut self, index: usize) -> CalendarAction {
        match self.state.mode() {
            ViewMode::Day => {
                let cells = self.state.day_grid(self.today());
                match cells.get(index) {
                    Some(cell) => self.select_date(cell.date),
                    None => CalendarAction::None,
                }
            }
            ViewMode::Month => {
                self.select_month(index as u32 + 1);
                CalendarAction::Redraw
            }
            ViewMode::Year => {
                let years = self.state.year_range().cells();
                match years.get(index) {
                    Some(&year) => {
                        self.select_year(year);
                        CalendarAction::Redraw
                    }
                    None => CalendarAction::None,
                }
            }
        }
    }

    fn activate_focused(&mut self) -> CalendarAction {
        match self.state.mode() {
            ViewMode::Day => self.select_date(self.focus_date),
            ViewMode::Month | ViewMode::Year => self.activate(self.focus_index),
        }
    }

    /// Day view moves by days and follows the focus into adjacent months; the month and year
    /// pickers move within their twelve cells.
    fn move_focus(&mut self, day_delta: i64, picker_delta: i64) -> CalendarAction {
        match self.state.mode() {
            ViewMode::Day => {
                let target = self.focus_date.add_days(day_delta);
                if !target.is_same_month(self.state.cursor()) {
                    self.state.set_cursor(target);
                }
                self.focus_date = target;
            }
            ViewMode::Month | ViewMode::Year => {
                let next = (self.focus_index as i64 + picker_delta)
                    .clamp(0, PICKER_GRID_CELLS as i64 - 1);
                self.focus_index = next as usize;
            }
        }
        CalendarAction::Redraw
    }

    fn reset_focus(&mut self) {
        let cursor = self.state.cursor();
        match self.state.mode() {
            ViewMode::Day => {
                self.focus_date = match self.state.selected() {
                    Some(sel) if sel.is_same_month(cursor) => sel,
                    _ => cursor,
                };
            }
            ViewMode::Month => self.focus_index = cursor.month() as usize - 1,
            ViewMode::Year => {
                let range = self.state.year_range();
                self.focus_index = (cursor.year() - range.start()) as usize + 1;
            }
        }
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let today = self.today();
        let mode = self.state.mode();
        let layout = CalendarLayout::new(area, mode, self.options.show_weekdays);

        buf.set_style(area, theme.text_primary);
        render::render_centered(layout.previous, buf, "<", theme.accent);
        render::render_centered(layout.next, buf, ">", theme.accent);
        render::render_centered(layout.title, buf, &self.state.title(), theme.header);

        match mode {
            ViewMode::Day => self.render_days(&layout, buf, theme, today),
            ViewMode::Month => self.render_months(&layout, buf, theme),
            ViewMode::Year => self.render_years(&layout, buf, theme),
        }
    }

    fn render_days(
        &self,
        layout: &CalendarLayout,
        buf: &mut Buffer,
        theme: &Theme,
        today: CalendarDate,
    ) {
        if let Some(row) = layout.weekdays {
            let header = CalendarLayout { body: row, ..*layout };
            for (label, (x, w)) in WEEKDAY_LABELS.iter().zip(header.columns(DAY_GRID_COLUMNS)) {
                render::render_centered(Rect::new(x, row.y, w, 1), buf, label, theme.weekday);
            }
        }

        let cells = self.state.day_grid(today);
        for (i, cell) in cells.iter().enumerate() {
            let Some(rect) = layout.day_cell(i) else {
                break;
            };
            let style = self.day_style(cell, theme);
            render::render_centered(rect, buf, &format!("{:>2}", cell.day()), style);
        }
    }

    fn day_style(&self, cell: &DayCell, theme: &Theme) -> Style {
        let mut style = match cell.membership {
            MonthMembership::Current => theme.text_primary,
            MonthMembership::Previous | MonthMembership::Next => theme.outside,
        };
        if cell.is_today {
            style = style.patch(theme.today);
        }
        if cell.is_selected {
            style = style.patch(theme.selected);
        }
        if self.has_focus && cell.date == self.focus_date {
            style = style.patch(theme.focused);
        }
        style
    }

    fn render_months(&self, layout: &CalendarLayout, buf: &mut Buffer, theme: &Theme) {
        let cursor_month = self.state.cursor().month() as usize;
        for i in 0..PICKER_GRID_CELLS {
            let Some(rect) = layout.picker_cell(i) else {
                break;
            };
            let mut style = theme.text_primary;
            if i + 1 == cursor_month {
                style = style.patch(theme.selected);
            }
            if self.has_focus && i == self.focus_index {
                style = style.patch(theme.focused);
            }
            render::render_centered(rect, buf, month_short_name(i as u32 + 1), style);
        }
    }

    fn render_years(&self, layout: &CalendarLayout, buf: &mut Buffer, theme: &Theme) {
        let range = self.state.year_range();
        let cursor_year = self.state.cursor().year();
        for (i, year) in range.cells().into_iter().enumerate() {
            let Some(rect) = layout.picker_cell(i) else {
                break;
            };
            let mut style = if range.contains(year) {
                theme.text_primary
            } else {
                theme.outside
            };
            if year == cursor_year {
                style = style.patch(theme.selected);
            }
            if self.has_focus && i == self.focus_index {
                style = style.patch(theme.focused);
            }
            render::render_centered(rect, buf, &year.to_string(), style);
        }
    }
}

fn redraw_if(changed: bool) -> CalendarAction {
    if changed {
        CalendarAction::Redraw
    } else {
        CalendarAction::None
    }
}
