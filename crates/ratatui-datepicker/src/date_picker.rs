//! Masked `YYYY-MM-DD` text input with a calendar popover.
//!
//! The picker keeps the text field and the calendar in step:
//! - every edit is reported through `on_change` (and [`DatePickerAction::Changed`]), valid or
//!   not;
//! - a text that parses as a date closes the popover and releases focus;
//! - picking a day in the calendar writes it back into the field and closes the popover.
//!
//! The value can be controlled by the caller with [`DatePicker::set_value`]; when no external
//! value is set the picker tracks the text itself (see [`resolve_value`]).
//!
//! The popover opens when the input gains focus and closes on a click outside both the input
//! and the popover, or when focus is lost. `Esc` leaves it open unless
//! [`DatePickerOptions::close_on_escape`] is set.

use crate::calendar::Calendar;
use crate::calendar::CalendarAction;
use crate::calendar::CalendarOptions;
use crate::date::CalendarDate;
use crate::element::InputHandle;
use crate::handle::HandleAcceptor;
use crate::handle::SharedSlot;
use crate::handle::merge_handles;
use crate::handle::shared_slot;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::mask::DATE_TEMPLATE;
use crate::mask::MaskEdit;
use crate::mask::MaskedInput;
use crate::popover;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;
use std::fmt;
use tracing::debug;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

/// Externally supplied value if there is one, otherwise the internally tracked text.
pub fn resolve_value<'a>(external: Option<&'a str>, internal: &'a str) -> &'a str {
    external.unwrap_or(internal)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatePickerAction {
    None,
    Redraw,
    /// The text changed; `date` is set when it parses as a calendar date.
    Changed {
        text: String,
        date: Option<CalendarDate>,
    },
}

/// Presentation attributes forwarded to the text input.
#[derive(Clone, Debug)]
pub struct InputAttributes {
    pub placeholder: String,
    pub icon: Option<String>,
    /// Patched over the theme's text style.
    pub style: Style,
    pub focused_style: Style,
}

impl Default for InputAttributes {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            placeholder: DATE_TEMPLATE.to_string(),
            icon: Some("📅".to_string()),
            style: Style::default(),
            focused_style: Style::default().underlined(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatePickerOptions {
    pub input: InputAttributes,
    pub calendar: CalendarOptions,
    pub close_on_escape: bool,
    pub popover_border: bool,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            input: InputAttributes::default(),
            calendar: CalendarOptions::default(),
            close_on_escape: false,
            popover_border: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum KeyboardTarget {
    #[default]
    Input,
    Calendar,
}

type ChangeCallback = Box<dyn FnMut(&str)>;
type HandleSetter = Box<dyn FnMut(Option<InputHandle>)>;

pub struct DatePicker {
    value: Option<String>,
    internal: String,
    mask: MaskedInput,
    element: SharedSlot<InputHandle>,
    attach: HandleSetter,
    popover: Option<Calendar>,
    keyboard: KeyboardTarget,
    was_focused: bool,
    on_change: Option<ChangeCallback>,
    options: DatePickerOptions,
    input_area: Rect,
    popover_area: Option<Rect>,
    calendar_area: Option<Rect>,
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("value", &self.value)
            .field("internal", &self.internal)
            .field("mask", &self.mask)
            .field("popover", &self.popover)
            .field("keyboard", &self.keyboard)
            .finish_non_exhaustive()
    }
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DatePicker {
    fn drop(&mut self) {
        (self.attach)(None);
    }
}

impl DatePicker {
    pub fn new() -> Self {
        Self::with_options(DatePickerOptions::default())
    }

    pub fn with_options(options: DatePickerOptions) -> Self {
        let element = shared_slot();
        let mut attach: HandleSetter = Box::new(merge_handles(vec![Some(
            HandleAcceptor::slot(&element),
        )]));
        attach(Some(InputHandle::new()));
        Self {
            value: None,
            internal: String::new(),
            mask: MaskedInput::new(),
            element,
            attach,
            popover: None,
            keyboard: KeyboardTarget::Input,
            was_focused: false,
            on_change: None,
            options,
            input_area: Rect::default(),
            popover_area: None,
            calendar_area: None,
        }
    }

    /// Also hands the input element to `acceptor`, next to the picker's own slot.
    pub fn with_handle(mut self, acceptor: HandleAcceptor<'static, InputHandle>) -> Self {
        let handle = self.input_handle();
        (self.attach)(None);
        self.attach = Box::new(merge_handles(vec![
            Some(HandleAcceptor::slot(&self.element)),
            Some(acceptor),
        ]));
        (self.attach)(Some(handle));
        self
    }

    pub fn with_attributes(mut self, input: InputAttributes) -> Self {
        self.options.input = input;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn options(&self) -> &DatePickerOptions {
        &self.options
    }

    /// Sets the controlled value; `None` hands control back to the internal text.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn value(&self) -> &str {
        resolve_value(self.value.as_deref(), &self.internal)
    }

    pub fn date(&self) -> Option<CalendarDate> {
        CalendarDate::parse_iso(self.value()).ok()
    }

    pub fn input_handle(&self) -> InputHandle {
        self.element.borrow().clone().unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.input_handle().is_focused()
    }

    pub fn calendar(&self) -> Option<&Calendar> {
        self.popover.as_ref()
    }

    pub fn calendar_has_keyboard(&self) -> bool {
        self.keyboard == KeyboardTarget::Calendar
    }

    pub fn focus(&mut self) {
        self.input_handle().focus();
        self.sync_focus();
    }

    pub fn blur(&mut self) {
        self.input_handle().blur();
        self.sync_focus();
    }

    /// Picks up focus changes made through the shared handle.
    fn sync_focus(&mut self) {
        let focused = self.is_focused();
        if focused && !self.was_focused {
            self.open_popover();
        } else if !focused && self.was_focused {
            self.close_popover();
        }
        self.was_focused = focused;
    }

    fn open_popover(&mut self) {
        if self.popover.is_some() {
            return;
        }
        let seed = CalendarDate::parse_iso(self.value()).ok();
        let mut calendar = Calendar::with_options(seed, self.options.calendar.clone());
        calendar.set_has_focus(false);
        self.popover = Some(calendar);
        self.keyboard = KeyboardTarget::Input;
        debug!(seed = ?seed, "date picker popover opened");
    }

    fn close_popover(&mut self) {
        if self.popover.take().is_some() {
            debug!("date picker popover closed");
        }
        self.keyboard = KeyboardTarget::Input;
        self.popover_area = None;
        self.calendar_area = None;
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DatePickerAction {
        self.sync_focus();
        match event {
            InputEvent::Mouse(m) => self.handle_mouse(m),
            InputEvent::FocusGained | InputEvent::FocusLost => DatePickerAction::None,
            _ if !self.is_focused() => DatePickerAction::None,
            InputEvent::Paste(text) => self.edit(|mask| mask.paste(&text)),
            InputEvent::Key(key) => match self.keyboard {
                KeyboardTarget::Input => self.handle_input_key(key),
                KeyboardTarget::Calendar => self.handle_calendar_key(key),
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> DatePickerAction {
        match key.code {
            KeyCode::Esc => self.escape(),
            KeyCode::Down | KeyCode::Tab => {
                self.open_popover();
                self.keyboard = KeyboardTarget::Calendar;
                if let Some(calendar) = self.popover.as_mut() {
                    calendar.set_has_focus(true);
                }
                DatePickerAction::Redraw
            }
            KeyCode::Backspace => self.edit(MaskedInput::backspace),
            KeyCode::Delete => self.edit(MaskedInput::delete),
            KeyCode::Left => self.move_caret(MaskedInput::move_left),
            KeyCode::Right => self.move_caret(MaskedInput::move_right),
            KeyCode::Home => self.move_caret(MaskedInput::move_home),
            KeyCode::End => self.move_caret(MaskedInput::move_end),
            _ => match key.typed_char() {
                Some(ch) => self.edit(|mask| mask.insert(ch)),
                None => DatePickerAction::None,
            },
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> DatePickerAction {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.return_to_input();
                DatePickerAction::Redraw
            }
            KeyCode::Esc => self.escape(),
            _ => {
                let Some(calendar) = self.popover.as_mut() else {
                    self.keyboard = KeyboardTarget::Input;
                    return DatePickerAction::None;
                };
                let action = calendar.handle_event(InputEvent::Key(key));
                self.after_calendar(action)
            }
        }
    }

    fn escape(&mut self) -> DatePickerAction {
        if self.options.close_on_escape && self.popover.is_some() {
            self.close_popover();
            return DatePickerAction::Redraw;
        }
        if self.keyboard == KeyboardTarget::Calendar {
            self.return_to_input();
            return DatePickerAction::Redraw;
        }
        DatePickerAction::None
    }

    fn return_to_input(&mut self) {
        self.keyboard = KeyboardTarget::Input;
        if let Some(calendar) = self.popover.as_mut() {
            calendar.set_has_focus(false);
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DatePickerAction {
        let pos = Position::new(m.x, m.y);
        if let (Some(popover), Some(inner)) = (self.popover_area, self.calendar_area) {
            if popover.contains(pos) {
                let Some(calendar) = self.popover.as_mut() else {
                    return DatePickerAction::None;
                };
                let action = calendar.handle_event_in_area(inner, InputEvent::Mouse(m));
                return self.after_calendar(action);
            }
        }
        if !m.is_left_down() {
            return DatePickerAction::None;
        }

        if self.input_area.contains(pos) {
            if self.is_focused() {
                self.open_popover();
            } else {
                self.focus();
            }
            self.return_to_input();
            return DatePickerAction::Redraw;
        }

        if self.popover.is_some() || self.is_focused() {
            trace!("date picker dismissed by outside click");
            self.close_popover();
            self.blur();
            return DatePickerAction::Redraw;
        }
        DatePickerAction::None
    }

    fn after_calendar(&mut self, action: CalendarAction) -> DatePickerAction {
        match action {
            CalendarAction::None => DatePickerAction::None,
            CalendarAction::Redraw => DatePickerAction::Redraw,
            CalendarAction::Selected(date) => self.pick(date),
        }
    }

    /// A day picked in the calendar: write it into the field, report it, close the popover.
    fn pick(&mut self, date: CalendarDate) -> DatePickerAction {
        let text = date.to_iso();
        self.mask.set_text(&text);
        self.store(&text);
        self.close_popover();
        debug!(date = %date, "date picker day picked");
        DatePickerAction::Changed {
            text,
            date: Some(date),
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut MaskedInput) -> MaskEdit) -> DatePickerAction {
        self.sync_mask();
        match f(&mut self.mask) {
            MaskEdit::Changed => {}
            MaskEdit::Unchanged => {
                self.sync_element();
                return DatePickerAction::Redraw;
            }
            MaskEdit::Rejected => return DatePickerAction::None,
        }

        let text = self.mask.value();
        self.store(&text);
        let date = CalendarDate::parse_iso(&text).ok();
        if date.is_some() {
            self.close_popover();
            self.blur();
        }
        DatePickerAction::Changed { text, date }
    }

    fn move_caret(&mut self, f: impl FnOnce(&mut MaskedInput)) -> DatePickerAction {
        self.sync_mask();
        f(&mut self.mask);
        self.sync_element();
        DatePickerAction::Redraw
    }

    fn store(&mut self, text: &str) {
        self.internal = text.to_string();
        self.sync_element();
        if let Some(f) = self.on_change.as_mut() {
            f(text);
        }
    }

    /// Reloads the mask when the displayed value was changed from outside.
    fn sync_mask(&mut self) {
        let shown = self.value().to_string();
        if self.mask.value() != shown {
            self.mask.set_text(&shown);
        }
    }

    fn sync_element(&self) {
        self.input_handle().sync(self.value(), self.mask.caret());
    }

    fn text_x(&self, area: Rect) -> u16 {
        match self.options.input.icon.as_deref() {
            Some(icon) => area.x + UnicodeWidthStr::width(icon) as u16 + 1,
            None => area.x,
        }
    }

    /// Terminal cursor position while the input has the keyboard.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        if !self.is_focused() || self.keyboard != KeyboardTarget::Input {
            return None;
        }
        let area = self.input_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let x = self.text_x(area) + self.mask.caret() as u16;
        (x < area.right()).then_some((x, area.y))
    }

    /// Draws the input in the first row of `area` and, when open, the calendar popover inside
    /// `bounds`. Render the picker after surrounding widgets so the popover stays on top.
    pub fn render(&mut self, area: Rect, bounds: Rect, buf: &mut Buffer, theme: &Theme) {
        self.sync_focus();
        self.sync_mask();
        self.input_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
        if self.input_area.width == 0 || self.input_area.height == 0 {
            return;
        }
        self.render_input(buf, theme);

        let bordered = self.options.popover_border;
        let Some(calendar) = self.popover.as_ref() else {
            return;
        };
        let (w, h) = calendar.size();
        let pad = if bordered { 2 } else { 0 };
        let rect = popover::place(self.input_area, w + pad, h + pad, bounds);
        Clear.render(rect, buf);
        let inner = if bordered {
            let block = Block::bordered().border_style(theme.border);
            let inner = block.inner(rect);
            block.render(rect, buf);
            inner
        } else {
            rect
        };
        calendar.render_ref(inner, buf, theme);
        self.popover_area = Some(rect);
        self.calendar_area = Some(inner);
    }

    fn render_input(&self, buf: &mut Buffer, theme: &Theme) {
        let area = self.input_area;
        let mut style = theme.text_primary.patch(self.options.input.style);
        if self.is_focused() {
            style = style.patch(self.options.input.focused_style);
        }
        buf.set_style(area, style);

        if let Some(icon) = self.options.input.icon.as_deref() {
            render::render_str_clipped(area.x, area.y, area.width, buf, icon, style);
        }
        let x = self.text_x(area);
        if x >= area.right() {
            return;
        }
        let max = area.right() - x;
        let shown = self.value();
        if shown.is_empty() {
            let placeholder = style.patch(theme.placeholder);
            let text = &self.options.input.placeholder;
            render::render_str_clipped(x, area.y, max, buf, text, placeholder);
        } else {
            render::render_str_clipped(x, area.y, max, buf, shown, style);
        }
    }
}
