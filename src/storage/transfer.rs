//! Transfer strategies: how a value leaves a place that must stay valid.
//!
//! Rust moves never fail, but moving out of `&mut T` needs something to leave
//! behind. [`Take`] leaves `T::default()` and cannot panic; [`Duplicate`]
//! leaves the source untouched and clones, which may panic. Callers pick the
//! strategy as a type parameter and algorithms branch on [`Transfer::NOTHROW`]
//! to order their steps so a panic never strands a resource.

/// A way of producing an owned `T` from a live `&mut T`.
pub trait Transfer<T> {
    /// `true` if [`transfer`](Self::transfer) never panics.
    const NOTHROW: bool;

    /// Produces the value, leaving `source` valid.
    fn transfer(source: &mut T) -> T;
}

/// Moves the value out and leaves `T::default()` behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Take;

impl<T: Default> Transfer<T> for Take {
    const NOTHROW: bool = true;

    #[inline]
    fn transfer(source: &mut T) -> T {
        core::mem::take(source)
    }
}

/// Clones the value and leaves the source as it was. `Clone` may panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Duplicate;

impl<T: Clone> Transfer<T> for Duplicate {
    const NOTHROW: bool = false;

    #[inline]
    fn transfer(source: &mut T) -> T {
        source.clone()
    }
}

/// Whether assigning through `X` can be done by move without risking a panic.
#[inline]
pub const fn is_nothrow<X: Transfer<T>, T>() -> bool {
    X::NOTHROW
}
