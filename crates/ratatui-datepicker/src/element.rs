use std::cell::RefCell;
use std::rc::Rc;

/// Shared state of the date picker's text input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputElement {
    pub value: String,
    pub caret: usize,
    pub focused: bool,
}

/// Cloneable handle to the date picker's input. Every clone sees the same element, so the
/// picker and the application can both read it and move focus.
#[derive(Clone, Debug, Default)]
pub struct InputHandle {
    inner: Rc<RefCell<InputElement>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) {
        self.inner.borrow_mut().focused = true;
    }

    pub fn blur(&self) {
        self.inner.borrow_mut().focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.inner.borrow().focused
    }

    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    pub fn caret(&self) -> usize {
        self.inner.borrow().caret
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn sync(&self, value: &str, caret: usize) {
        let mut el = self.inner.borrow_mut();
        if el.value != value {
            el.value = value.to_string();
        }
        el.caret = caret;
    }
}
