//! What a holder calls to release its resource.
//!
//! Any `FnMut(&mut R)` is a [`Deleter<R>`]. Closures are never `Default`, so
//! they can only leave a live holder through [`Duplicate`](crate::storage::Duplicate).
//! Wrapping a move-only closure in a [`Slot`] makes it `Default`, and
//! [`Take`](crate::storage::Take) then moves it out without cloning or panicking.

/// Releases a resource of type `R`.
pub trait Deleter<R> {
    /// Releases `resource`.
    fn delete(&mut self, resource: &mut R);
}

impl<R, F> Deleter<R> for F
where
    F: FnMut(&mut R),
{
    #[inline]
    fn delete(&mut self, resource: &mut R) {
        self(resource);
    }
}

/// A deleter that can be taken out of a live holder, leaving an empty slot.
///
/// An empty slot releases nothing. `take_from` and `assign_from` only leave
/// one behind in a holder they have disarmed; re-arming that holder with
/// `reset_with` installs a resource no deleter will release.
///
/// ```rust
/// use warden::{Slot, Take, UniqueResource};
///
/// struct Token;
/// let token = Token;
/// let mut first = UniqueResource::new(7, Slot::new(move |_: &mut i32| {
///     let _owned = &token;
/// }));
/// let second = UniqueResource::take_from::<Take, Take>(&mut first);
///
/// assert!(first.get_deleter().is_empty());
/// assert!(second.is_active());
/// ```
#[derive(Debug, Clone)]
pub struct Slot<F> {
    callable: Option<F>,
}

impl<F> Slot<F> {
    /// Fills the slot with `callable`.
    #[inline]
    pub const fn new(callable: F) -> Self {
        Self { callable: Some(callable) }
    }

    /// Whether the callable has been taken out.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.callable.is_none()
    }

    /// Shared access to the callable, if still present.
    #[inline]
    pub const fn get(&self) -> Option<&F> {
        self.callable.as_ref()
    }

    /// Empties the slot, returning the callable.
    #[inline]
    pub fn into_inner(self) -> Option<F> {
        self.callable
    }
}

impl<F> Default for Slot<F> {
    #[inline]
    fn default() -> Self {
        Self { callable: None }
    }
}

impl<R, F> Deleter<R> for Slot<F>
where
    F: FnMut(&mut R),
{
    #[inline]
    fn delete(&mut self, resource: &mut R) {
        match &mut self.callable {
            Some(callable) => callable(resource),
            None => {
                warn_event!("empty deleter slot called, resource not released");
            }
        }
    }
}
