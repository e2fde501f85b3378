//! Storage cells: one interface over by-value and by-reference resource storage.
//!
//! [`Owned`] keeps a `T` inline. [`Reseat`] keeps a `&mut T` and treats
//! assignment as pointing at a different referee, never as writing through the
//! old one. Both are always populated: a cell is never observed empty.

pub mod owned;
pub mod reseat;
pub mod transfer;

pub use owned::Owned;
pub use reseat::Reseat;
pub use transfer::{is_nothrow, Duplicate, Take, Transfer};

/// Capability shared by the storage cells.
pub trait Storage {
    /// What `get` exposes: the value, or the referee.
    type Target;
    /// What the cell is built from and reset to: the value, or a reference.
    type Value;

    /// Stores `value`.
    fn new(value: Self::Value) -> Self;

    /// Shared access to the target.
    fn get(&self) -> &Self::Target;

    /// Exclusive access to the target.
    fn get_mut(&mut self) -> &mut Self::Target;

    /// Replaces the stored value. The new value is in place before the old one is dropped.
    fn reset(&mut self, value: Self::Value);

    /// Gives back what was stored.
    fn into_value(self) -> Self::Value;
}
