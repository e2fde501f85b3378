//! Constructors, including the guarded ones that adopt values from live places.

use core::mem;

use super::{Deleter, UniqueResource};
use crate::guard::guard_on_unwind;
use crate::storage::{Owned, Reseat, Storage, Transfer};

impl<R, D> UniqueResource<R, D>
where
    D: Deleter<R>,
{
    /// Takes ownership of `resource`; `deleter` runs on it when the holder is dropped.
    #[inline]
    pub fn new(resource: R, deleter: D) -> Self {
        Self::from_cells(Owned::new(resource), Owned::new(deleter), true)
    }

    /// Like [`new`](Self::new), but the holder starts disarmed if `resource == invalid`.
    #[inline]
    pub fn checked<I>(resource: R, invalid: I, deleter: D) -> Self
    where
        R: PartialEq<I>,
    {
        let armed = resource != invalid;
        Self::from_cells(Owned::new(resource), Owned::new(deleter), armed)
    }

    /// Adopts a resource and deleter out of the caller's places.
    ///
    /// `RX` and `DX` choose how each value leaves its place. If transferring the
    /// resource panics, `deleter` runs on the caller's `resource`; if
    /// transferring the deleter panics, `deleter` runs on the already stored
    /// resource. Either way the resource is released once and the panic
    /// propagates.
    pub fn adopt<RX, DX>(resource: &mut R, deleter: &mut D) -> Self
    where
        RX: Transfer<R>,
        DX: Transfer<D>,
    {
        let mut stored = Owned::adopt::<RX, _, _>(guard_on_unwind(&mut *resource, |r| {
            warn_event!("resource transfer panicked, releasing caller's resource");
            deleter.delete(r);
        }));

        let stored_deleter = Owned::adopt::<DX, _, _>(guard_on_unwind(&mut *deleter, |d| {
            warn_event!("deleter transfer panicked, releasing adopted resource");
            d.delete(stored.get_mut());
        }));

        Self::from_cells(stored, stored_deleter, true)
    }

    /// Builds a holder from `other`, which stays valid and ends up disarmed.
    ///
    /// The resource is transferred first with nothing to undo: on failure
    /// `other` is untouched and still responsible. If the deleter transfer then
    /// panics, `other`'s deleter runs on the transferred resource (when `other`
    /// was armed) and `other` is disarmed before the panic propagates.
    pub fn take_from<RX, DX>(other: &mut Self) -> Self
    where
        RX: Transfer<R>,
        DX: Transfer<D>,
    {
        let mut resource = Owned::transfer_from::<RX>(other.resource.get_mut());

        let other_armed = &mut other.armed;
        let deleter = Owned::adopt::<DX, _, _>(guard_on_unwind(other.deleter.get_mut(), |d| {
            if mem::replace(other_armed, false) {
                warn_event!("deleter transfer panicked, releasing transferred resource");
                d.delete(resource.get_mut());
            }
        }));

        let armed = mem::replace(&mut other.armed, false);
        Self::from_cells(resource, deleter, armed)
    }
}

impl<'a, T, D> UniqueResource<T, D, Reseat<'a, T>>
where
    D: Deleter<T>,
{
    /// Refers to `target`; `deleter` runs on it when the holder is dropped.
    #[inline]
    pub fn borrowed(target: &'a mut T, deleter: D) -> Self {
        Self::from_cells(Reseat::new(target), Owned::new(deleter), true)
    }
}
