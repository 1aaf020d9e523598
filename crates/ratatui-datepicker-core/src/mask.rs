//! Fixed `YYYY-MM-DD` input mask.
//!
//! The mask keeps a digit slot for every `Y`, `M` and `D` of the template. Separators are part
//! of the template and never edited. Slots are independent: clearing one does not shift the
//! others, and typing overwrites the slot under the caret.
//!
//! Digits pass through [`accepts_digit`] before they land in a slot. This only rules out
//! months above 12 and days above 31 as they are typed; full calendar validation happens when
//! the value is parsed.

use tracing::trace;

pub const DATE_TEMPLATE: &str = "YYYY-MM-DD";

const LEN: usize = 10;
const TEMPLATE: [u8; LEN] = *b"YYYY-MM-DD";

const MONTH_TENS: usize = 5;
const MONTH_UNITS: usize = 6;
const DAY_TENS: usize = 8;
const DAY_UNITS: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskEdit {
    /// The value changed.
    Changed,
    /// The input was refused by the template or a digit rule.
    Rejected,
    /// Nothing to do (caret moves, deleting an empty slot).
    Unchanged,
}

pub fn is_slot(index: usize) -> bool {
    index < LEN && TEMPLATE[index] != b'-'
}

/// Positional digit rule. `previous` and `next` are the characters currently in the slots on
/// either side of `index`, so a tens digit typed after its units digit is checked too.
pub fn accepts_digit(
    index: usize,
    digit: char,
    previous: Option<char>,
    next: Option<char>,
) -> bool {
    let Some(value) = digit.to_digit(10) else {
        return false;
    };
    let next = next.and_then(|c| c.to_digit(10));
    match index {
        MONTH_TENS => value == 0 || (value == 1 && next.is_none_or(|units| units <= 2)),
        MONTH_UNITS => !(previous == Some('1') && value > 2),
        DAY_TENS => value < 3 || (value == 3 && next.is_none_or(|units| units <= 1)),
        DAY_UNITS => !(previous == Some('3') && value > 1),
        _ => is_slot(index),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskedInput {
    slots: [Option<char>; LEN],
    caret: usize,
}

impl MaskedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut m = Self::new();
        m.set_text(text);
        m
    }

    /// `""` while no digit has been entered, otherwise the full template with unfilled slots
    /// shown as their template letter (`2024-1M-DD`).
    pub fn value(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.slots
            .iter()
            .zip(TEMPLATE)
            .map(|(slot, t)| slot.unwrap_or(t as char))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        (0..LEN).filter(|&i| is_slot(i)).all(|i| self.slots[i].is_some())
    }

    /// Caret position in display columns, `0..=10`.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Loads digits found at slot positions of `text`; anything else leaves the slot empty.
    pub fn set_text(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        for i in 0..LEN {
            self.slots[i] = chars
                .get(i)
                .copied()
                .filter(|c| is_slot(i) && c.is_ascii_digit());
        }
        self.caret = self.caret_after_last_filled();
    }

    pub fn insert(&mut self, ch: char) -> MaskEdit {
        if !ch.is_ascii_digit() {
            trace!(%ch, "mask rejected non-digit");
            return MaskEdit::Rejected;
        }
        let Some(target) = next_slot_from(self.caret) else {
            return MaskEdit::Rejected;
        };
        let previous = target.checked_sub(1).and_then(|i| self.slots[i]);
        let next = self.slots.get(target + 1).copied().flatten();
        if !accepts_digit(target, ch, previous, next) {
            trace!(%ch, position = target, "mask rejected digit");
            return MaskEdit::Rejected;
        }
        let changed = self.slots[target] != Some(ch);
        self.slots[target] = Some(ch);
        self.caret = next_slot_from(target + 1).unwrap_or(LEN);
        if changed {
            MaskEdit::Changed
        } else {
            MaskEdit::Unchanged
        }
    }

    /// Feeds every character through [`MaskedInput::insert`]; separators and rejected digits
    /// are skipped.
    pub fn paste(&mut self, text: &str) -> MaskEdit {
        let before = self.slots;
        for ch in text.chars().filter(char::is_ascii_digit) {
            self.insert(ch);
        }
        if before == self.slots {
            MaskEdit::Unchanged
        } else {
            MaskEdit::Changed
        }
    }

    pub fn backspace(&mut self) -> MaskEdit {
        let Some(idx) = previous_slot_before(self.caret) else {
            return MaskEdit::Unchanged;
        };
        self.caret = idx;
        if self.slots[idx].take().is_some() {
            MaskEdit::Changed
        } else {
            MaskEdit::Unchanged
        }
    }

    pub fn delete(&mut self) -> MaskEdit {
        let Some(idx) = next_slot_from(self.caret) else {
            return MaskEdit::Unchanged;
        };
        if self.slots[idx].take().is_some() {
            MaskEdit::Changed
        } else {
            MaskEdit::Unchanged
        }
    }

    pub fn move_left(&mut self) {
        self.caret = previous_slot_before(self.caret).unwrap_or(0);
    }

    pub fn move_right(&mut self) {
        self.caret = match next_slot_from(self.caret) {
            Some(idx) => next_slot_from(idx + 1).unwrap_or(LEN),
            None => LEN,
        };
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.caret_after_last_filled();
    }

    fn caret_after_last_filled(&self) -> usize {
        match self.slots.iter().rposition(Option::is_some) {
            Some(idx) => next_slot_from(idx + 1).unwrap_or(LEN),
            None => 0,
        }
    }
}

fn next_slot_from(index: usize) -> Option<usize> {
    (index..LEN).find(|&i| is_slot(i))
}

fn previous_slot_before(index: usize) -> Option<usize> {
    (0..index.min(LEN)).rev().find(|&i| is_slot(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> MaskedInput {
        let mut m = MaskedInput::new();
        for ch in text.chars() {
            m.insert(ch);
        }
        m
    }

    #[test]
    fn empty_value_is_blank() {
        let m = MaskedInput::new();
        assert_eq!(m.value(), "");
        assert!(m.is_empty());
    }

    #[test]
    fn separators_are_inserted_automatically() {
        let m = typed("20240229");
        assert_eq!(m.value(), "2024-02-29");
        assert!(m.is_complete());
        assert_eq!(m.caret(), 10);
    }

    #[test]
    fn partial_value_shows_template_letters() {
        let m = typed("2024");
        assert_eq!(m.value(), "2024-MM-DD");
        assert_eq!(m.caret(), 5);
    }

    #[test]
    fn month_tens_above_one_is_rejected() {
        let mut m = typed("2024");
        assert_eq!(m.insert('2'), MaskEdit::Rejected);
        assert_eq!(m.value(), "2024-MM-DD");
    }

    #[test]
    fn month_thirteen_is_rejected_after_one() {
        let mut m = typed("20241");
        assert_eq!(m.insert('3'), MaskEdit::Rejected);
        assert_eq!(m.value(), "2024-1M-DD");
        assert_eq!(m.insert('2'), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-12-DD");
    }

    #[test]
    fn day_thirty_two_is_rejected_after_three() {
        let mut m = typed("202401");
        assert_eq!(m.insert('4'), MaskEdit::Rejected);
        assert_eq!(m.insert('3'), MaskEdit::Changed);
        assert_eq!(m.insert('2'), MaskEdit::Rejected);
        assert_eq!(m.value(), "2024-01-3D");
        assert_eq!(m.insert('1'), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-01-31");
    }

    #[test]
    fn syntactic_filter_lets_impossible_dates_through() {
        assert_eq!(typed("20230230").value(), "2023-02-30");
        assert_eq!(typed("20240009").value(), "2024-00-09");
    }

    #[test]
    fn non_digits_are_rejected() {
        let mut m = MaskedInput::new();
        assert_eq!(m.insert('a'), MaskEdit::Rejected);
        assert_eq!(m.insert('-'), MaskEdit::Rejected);
        assert!(m.is_empty());
    }

    #[test]
    fn full_input_rejects_more_digits() {
        let mut m = typed("20240229");
        assert_eq!(m.insert('1'), MaskEdit::Rejected);
    }

    #[test]
    fn accepts_digit_rules() {
        assert!(accepts_digit(0, '9', None, None));
        assert!(accepts_digit(5, '1', Some('-'), None));
        assert!(!accepts_digit(5, '2', Some('-'), None));
        assert!(accepts_digit(6, '9', Some('0'), Some('-')));
        assert!(!accepts_digit(6, '3', Some('1'), Some('-')));
        assert!(!accepts_digit(8, '4', Some('-'), None));
        assert!(accepts_digit(9, '9', Some('2'), None));
        assert!(!accepts_digit(9, '2', Some('3'), None));
        assert!(!accepts_digit(4, '1', None, None));
    }

    #[test]
    fn tens_digit_checks_the_units_already_typed() {
        assert!(accepts_digit(5, '1', Some('-'), Some('2')));
        assert!(!accepts_digit(5, '1', Some('-'), Some('9')));
        assert!(accepts_digit(5, '0', Some('-'), Some('9')));
        assert!(accepts_digit(8, '3', Some('-'), Some('1')));
        assert!(!accepts_digit(8, '3', Some('-'), Some('9')));
        assert!(accepts_digit(8, '2', Some('-'), Some('9')));
    }

    #[test]
    fn rewriting_month_tens_cannot_reach_nineteen() {
        let mut m = typed("20240915");
        m.move_home();
        for _ in 0..4 {
            m.move_right();
        }
        assert_eq!(m.caret(), 5);
        assert_eq!(m.insert('1'), MaskEdit::Rejected);
        assert_eq!(m.value(), "2024-09-15");
        assert_eq!(m.insert('0'), MaskEdit::Unchanged);
    }

    #[test]
    fn day_tens_typed_after_units_cannot_reach_thirty_nine() {
        let mut m = typed("202401");
        m.move_right();
        assert_eq!(m.insert('9'), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-01-D9");
        m.move_left();
        m.move_left();
        assert_eq!(m.caret(), 8);
        assert_eq!(m.insert('3'), MaskEdit::Rejected);
        assert_eq!(m.value(), "2024-01-D9");
        assert_eq!(m.insert('2'), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-01-29");
    }

    #[test]
    fn backspace_clears_without_shifting() {
        let mut m = typed("20240229");
        assert_eq!(m.backspace(), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-02-2D");
        m.backspace();
        assert_eq!(m.caret(), 8);
        assert_eq!(m.backspace(), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-0M-DD");
        assert_eq!(m.caret(), 6);
    }

    #[test]
    fn backspace_everything_returns_to_blank() {
        let mut m = typed("20");
        m.backspace();
        m.backspace();
        assert_eq!(m.value(), "");
        assert_eq!(m.backspace(), MaskEdit::Unchanged);
    }

    #[test]
    fn overwrite_in_the_middle() {
        let mut m = typed("20240229");
        m.move_home();
        m.move_right();
        m.move_right();
        m.move_right();
        m.move_right();
        assert_eq!(m.caret(), 5);
        assert_eq!(m.insert('1'), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-12-29");
        assert_eq!(m.caret(), 6);
    }

    #[test]
    fn delete_clears_slot_under_caret() {
        let mut m = typed("20240229");
        m.move_home();
        assert_eq!(m.delete(), MaskEdit::Changed);
        assert_eq!(m.value(), "Y024-02-29");
        assert_eq!(m.caret(), 0);
    }

    #[test]
    fn paste_filters_through_rules() {
        let mut m = MaskedInput::new();
        assert_eq!(m.paste("2024-02-29"), MaskEdit::Changed);
        assert_eq!(m.value(), "2024-02-29");

        let mut m = MaskedInput::new();
        m.paste("2024-13-40");
        // '3' and '4' cannot follow a month tens of '1'; '0' can.
        assert_eq!(m.value(), "2024-10-DD");
    }

    #[test]
    fn set_text_loads_digits_and_places_caret() {
        let m = MaskedInput::from_text("2024-0M-DD");
        assert_eq!(m.value(), "2024-0M-DD");
        assert_eq!(m.caret(), 6);
        assert_eq!(MaskedInput::from_text("garbage").value(), "");
    }
}
