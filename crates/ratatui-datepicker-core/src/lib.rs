//! `ratatui-datepicker-core` holds the pieces of the date picker that do not draw widgets:
//! calendar arithmetic, view state, the `YYYY-MM-DD` input mask and backend-neutral input
//! events.
//!
//! Everything here is deterministic. "Today" is always passed in by the caller (see
//! [`date::CalendarDate::today`]) so grid generation can be tested against fixed dates.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all state lives on the main thread.
//! - Date math is delegated to `chrono`; this crate only decides which dates to show.
//!
//! Useful entry points:
//! - [`grid::day_grid`]: the 42 day cells of a month view.
//! - [`view::CalendarState`]: day/month/year navigation and selection.
//! - [`mask::MaskedInput`]: the digit-slot input mask.
//! - [`handle::merge_handles`]: hand one element handle to several owners.
pub mod date;
pub mod grid;
pub mod handle;
pub mod mask;
pub mod view;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;
