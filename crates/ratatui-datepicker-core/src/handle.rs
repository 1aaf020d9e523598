//! Broadcasting one handle to several independent owners.
//!
//! A widget that exposes an inner element (for example the date picker's input) often needs
//! the element in two places at once: its own editing logic and whatever the caller wants to
//! keep. [`merge_handles`] turns a list of acceptors into a single setter.
//!
//! ```
//! use ratatui_datepicker_core::handle::{merge_handles, shared_slot, HandleAcceptor};
//!
//! let slot = shared_slot::<u32>();
//! let mut seen = Vec::new();
//! {
//!     let mut attach = merge_handles(vec![
//!         Some(HandleAcceptor::Slot(slot.clone())),
//!         None,
//!         Some(HandleAcceptor::callback(|v: Option<u32>| seen.push(v))),
//!     ]);
//!     attach(Some(7));
//! }
//! assert_eq!(*slot.borrow(), Some(7));
//! assert_eq!(seen, vec![Some(7)]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A mutable slot shared between the widget and its owner.
pub type SharedSlot<T> = Rc<RefCell<Option<T>>>;

pub fn shared_slot<T>() -> SharedSlot<T> {
    Rc::new(RefCell::new(None))
}

/// Something that wants to receive a handle. `None` is delivered when the handle goes away.
pub enum HandleAcceptor<'a, T> {
    Callback(Box<dyn FnMut(Option<T>) + 'a>),
    Slot(SharedSlot<T>),
}

impl<'a, T> HandleAcceptor<'a, T> {
    pub fn callback(f: impl FnMut(Option<T>) + 'a) -> Self {
        Self::Callback(Box::new(f))
    }

    pub fn slot(slot: &SharedSlot<T>) -> Self {
        Self::Slot(Rc::clone(slot))
    }

    pub fn accept(&mut self, handle: Option<T>) {
        match self {
            HandleAcceptor::Callback(f) => f(handle),
            HandleAcceptor::Slot(slot) => *slot.borrow_mut() = handle,
        }
    }
}

impl<T> fmt::Debug for HandleAcceptor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleAcceptor::Callback(_) => f.write_str("HandleAcceptor::Callback(..)"),
            HandleAcceptor::Slot(_) => f.write_str("HandleAcceptor::Slot(..)"),
        }
    }
}

/// Returns a setter that hands a clone of its argument to every present acceptor, in order.
/// Absent acceptors are skipped.
pub fn merge_handles<'a, T: Clone>(
    acceptors: Vec<Option<HandleAcceptor<'a, T>>>,
) -> impl FnMut(Option<T>) + 'a
where
    T: 'a,
{
    let mut acceptors: Vec<HandleAcceptor<'a, T>> = acceptors.into_iter().flatten().collect();
    move |handle: Option<T>| {
        for acceptor in acceptors.iter_mut() {
            acceptor.accept(handle.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_slots_and_callbacks() {
        let a = shared_slot::<String>();
        let b = shared_slot::<String>();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_in = Rc::clone(&calls);

        let mut set = merge_handles(vec![
            Some(HandleAcceptor::slot(&a)),
            Some(HandleAcceptor::callback(move |h: Option<String>| {
                calls_in.borrow_mut().push(h)
            })),
            Some(HandleAcceptor::slot(&b)),
        ]);
        set(Some("input".to_string()));

        assert_eq!(a.borrow().as_deref(), Some("input"));
        assert_eq!(b.borrow().as_deref(), Some("input"));
        assert_eq!(*calls.borrow(), vec![Some("input".to_string())]);
    }

    #[test]
    fn absent_acceptors_are_skipped() {
        let a = shared_slot::<u8>();
        let mut set = merge_handles(vec![None, Some(HandleAcceptor::slot(&a)), None]);
        set(Some(1));
        assert_eq!(*a.borrow(), Some(1));
    }

    #[test]
    fn detaching_clears_slots() {
        let a = shared_slot::<u8>();
        let mut set = merge_handles(vec![Some(HandleAcceptor::slot(&a))]);
        set(Some(1));
        set(None);
        assert_eq!(*a.borrow(), None);
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let mut set = merge_handles::<u8>(Vec::new());
        set(Some(3));
    }
}
