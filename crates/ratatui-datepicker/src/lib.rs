//! Calendar and date picker components for ratatui.
//!
//! - [`calendar::Calendar`]: a month grid with month and year pickers, driven by keys or mouse.
//! - [`date_picker::DatePicker`]: a masked `YYYY-MM-DD` input that opens a calendar popover.
//!
//! Widgets do not own an event loop. Convert your backend's events into [`input::InputEvent`]
//! (enable the `crossterm` feature for a ready-made conversion), pass them to `handle_event`
//! and redraw when the returned action asks for it.
pub use ratatui_datepicker_core::date;
pub use ratatui_datepicker_core::grid;
pub use ratatui_datepicker_core::handle;
pub use ratatui_datepicker_core::mask;
pub use ratatui_datepicker_core::view;

#[cfg(feature = "crossterm")]
pub use ratatui_datepicker_core::crossterm_input;

pub use ratatui_datepicker_core::input;
pub use ratatui_datepicker_core::keymap;
pub use ratatui_datepicker_core::render;

pub mod theme;

pub mod calendar;
pub mod date_picker;
pub mod element;
pub mod popover;
