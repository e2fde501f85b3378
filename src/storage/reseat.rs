//! `Reseat` - by-reference storage cell.

use core::fmt;

use super::Storage;

/// Refers to exactly one `T`.
///
/// Resetting points the cell at a different referee; the previous referee is
/// left as it was. There is nothing to move out of a reference, so
/// [`Storage::into_value`] hands back the same `&mut T`.
pub struct Reseat<'a, T> {
    target: &'a mut T,
}

impl<'a, T> Reseat<'a, T> {
    /// Refers to `target`.
    #[inline]
    pub fn new(target: &'a mut T) -> Self {
        Self { target }
    }

    /// Builds the cell from anything that can lend out a `&mut T` for `'a`.
    #[inline]
    pub fn from_source<U>(source: &'a mut U) -> Self
    where
        U: AsMut<T>,
    {
        Self::new(source.as_mut())
    }
}

impl<'a, T> Storage for Reseat<'a, T> {
    type Target = T;
    type Value = &'a mut T;

    #[inline]
    fn new(target: &'a mut T) -> Self {
        Reseat::new(target)
    }

    #[inline]
    fn get(&self) -> &T {
        &*self.target
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut *self.target
    }

    #[inline]
    fn reset(&mut self, target: &'a mut T) {
        self.target = target;
    }

    #[inline]
    fn into_value(self) -> &'a mut T {
        self.target
    }
}

impl<T: fmt::Debug> fmt::Debug for Reseat<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reseat").field(&*self.target).finish()
    }
}
