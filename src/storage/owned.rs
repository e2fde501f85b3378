//! `Owned` - by-value storage cell.

use core::mem;

use super::{Storage, Transfer};
use crate::guard::{ExitPolicy, Ignore, ScopeGuard};

/// Holds exactly one `T` inline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Owned<T> {
    value: T,
}

impl<T> Owned<T> {
    /// Stores `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Builds the stored value from anything convertible to `T`.
    #[inline]
    pub fn from_source<U>(source: U) -> Self
    where
        U: Into<T>,
    {
        Self::new(source.into())
    }

    /// Transfers a value out of the guarded source place with strategy `X`.
    ///
    /// The guard stays armed while the transfer runs and is dismissed only once
    /// the value is fully built, so a panicking transfer lets the guard's
    /// callback see the untouched source.
    pub fn adopt<'s, X, F, P>(mut guard: ScopeGuard<&'s mut T, F, P>) -> Self
    where
        X: Transfer<T>,
        F: FnOnce(&'s mut T),
        P: ExitPolicy,
    {
        let value = X::transfer(&mut **guard);
        ScopeGuard::dismiss(guard);
        Self::new(value)
    }

    /// [`adopt`](Self::adopt) with nothing to undo on failure.
    #[inline]
    pub fn transfer_from<X>(source: &mut T) -> Self
    where
        X: Transfer<T>,
    {
        Self::adopt::<X, _, Ignore>(ScopeGuard::new(source, |_| {}))
    }

    /// Replaces the stored value with one transferred out of `source`.
    ///
    /// The transfer completes before the cell is touched: if it panics, the
    /// cell still holds its previous value.
    #[inline]
    pub fn assign<X>(&mut self, source: &mut T)
    where
        X: Transfer<T>,
    {
        let value = X::transfer(source);
        Storage::reset(self, value);
    }
}

impl<T> Storage for Owned<T> {
    type Target = T;
    type Value = T;

    #[inline]
    fn new(value: T) -> Self {
        Owned::new(value)
    }

    #[inline]
    fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    fn reset(&mut self, value: T) {
        let old = mem::replace(&mut self.value, value);
        drop(old);
    }

    #[inline]
    fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::OnUnwind;
    use crate::storage::{Duplicate, Take};
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Debug, PartialEq)]
    struct Fd(i32);

    impl From<i32> for Fd {
        fn from(raw: i32) -> Self {
            Fd(raw)
        }
    }

    /// Clone panics once the shared budget reaches zero.
    #[derive(Debug)]
    struct Brittle<'a> {
        id: u32,
        budget: &'a Cell<u32>,
    }

    impl Clone for Brittle<'_> {
        fn clone(&self) -> Self {
            let left = self.budget.get();
            assert!(left > 0, "clone budget exhausted");
            self.budget.set(left - 1);
            Self { id: self.id, budget: self.budget }
        }
    }

    #[test]
    fn get_and_into_value() {
        let mut cell = Owned::new(5);
        assert_eq!(*cell.get(), 5);
        *cell.get_mut() = 6;
        assert_eq!(cell.into_value(), 6);
    }

    #[test]
    fn from_convertible_source() {
        let cell = Owned::<Fd>::from_source(3);
        assert_eq!(cell.get(), &Fd(3));
    }

    #[test]
    fn reset_installs_new_value() {
        let mut cell = Owned::new(String::from("old"));
        Storage::reset(&mut cell, String::from("new"));
        assert_eq!(cell.get(), "new");
    }

    #[test]
    fn transfer_from_take_and_duplicate() {
        let mut src = vec![1, 2];
        let taken = Owned::transfer_from::<Take>(&mut src);
        assert_eq!(taken.get(), &vec![1, 2]);
        assert!(src.is_empty());

        let mut src = vec![3];
        let copied = Owned::transfer_from::<Duplicate>(&mut src);
        assert_eq!(copied.get(), &src);
    }

    #[test]
    fn adopt_runs_guard_on_source_when_transfer_panics() {
        let budget = Cell::new(0);
        let cleaned = Cell::new(None);
        let mut src = Brittle { id: 9, budget: &budget };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let guard = ScopeGuard::<_, _, OnUnwind>::new(&mut src, |s: &mut Brittle<'_>| cleaned.set(Some(s.id)));
            Owned::adopt::<Duplicate, _, _>(guard)
        }));

        assert!(result.is_err());
        assert_eq!(cleaned.get(), Some(9));
    }

    #[test]
    fn adopt_dismisses_guard_on_success() {
        let budget = Cell::new(1);
        let cleaned = Cell::new(false);
        let mut src = Brittle { id: 1, budget: &budget };

        let guard = ScopeGuard::<_, _, OnUnwind>::new(&mut src, |_: &mut Brittle<'_>| cleaned.set(true));
        let cell = Owned::adopt::<Duplicate, _, _>(guard);

        assert_eq!(cell.get().id, 1);
        assert!(!cleaned.get());
    }

    #[test]
    fn failed_assign_keeps_previous_value() {
        let budget = Cell::new(0);
        let mut cell = Owned::new(Brittle { id: 1, budget: &budget });
        let mut src = Brittle { id: 2, budget: &budget };

        let result = panic::catch_unwind(AssertUnwindSafe(|| cell.assign::<Duplicate>(&mut src)));

        assert!(result.is_err());
        assert_eq!(cell.get().id, 1);

        budget.set(1);
        cell.assign::<Duplicate>(&mut src);
        assert_eq!(cell.get().id, 2);
    }
}
