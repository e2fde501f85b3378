//! `UniqueResource` - a uniquely owned resource paired with its deleter.
//!
//! The holder composes two storage cells and one `armed` flag. Whatever path a
//! value takes through construction, transfer, assignment, `reset` or drop,
//! the deleter of a logical resource runs at most once, with the resource's
//! current value, and runs exactly once unless the resource was released.
//!
//! ## Moving
//!
//! A plain Rust move (`let b = a;`, `a = b;`) never fails, so it needs no
//! extra care: assignment drops the old holder (running its deleter) and moves
//! the new one in. [`UniqueResource::take_from`] and
//! [`UniqueResource::assign_from`] cover the harder case, where the source
//! holder has to stay valid and the resource or deleter is moved out with a
//! [`Transfer`](crate::storage::Transfer) strategy that may panic.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use warden::unique_resource;
//!
//! let closed = RefCell::new(Vec::new());
//! {
//!     let handle = unique_resource(5, |h: &mut i32| closed.borrow_mut().push(*h));
//!     assert_eq!(*handle.get(), 5);
//! }
//! assert_eq!(*closed.borrow(), [5]);
//! ```

mod assign;
mod construct;
mod deleter;

pub use deleter::{Deleter, Slot};

use core::fmt;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::ptr;

use crate::storage::{Owned, Reseat, Storage};

/// A type-erased deleter, for holders whose deleter type must be nameable.
pub type BoxedDeleter<'a, R> = Box<dyn FnMut(&mut R) + 'a>;

/// Holds a resource of type `R` and the deleter `D` that releases it.
///
/// `S` selects the resource storage: [`Owned<R>`] (the default) keeps the
/// resource inline, [`Reseat<'a, R>`] refers to a resource owned elsewhere.
/// The deleter is always stored by value; a borrowed deleter is just
/// `D = &mut F`. A move-only deleter goes in a [`Slot`] so that `take_from`
/// and `assign_from` can move it with [`Take`](crate::storage::Take).
pub struct UniqueResource<R, D, S = Owned<R>>
where
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    resource: S,
    deleter: Owned<D>,
    armed: bool,
    _resource: PhantomData<R>,
}

impl<R, D, S> UniqueResource<R, D, S>
where
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    #[inline]
    pub(crate) fn from_cells(resource: S, deleter: Owned<D>, armed: bool) -> Self {
        Self {
            resource,
            deleter,
            armed,
            _resource: PhantomData,
        }
    }

    /// Shared access to the resource.
    #[inline]
    pub fn get(&self) -> &R {
        self.resource.get()
    }

    /// Exclusive access to the resource.
    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        self.resource.get_mut()
    }

    /// Shared access to the deleter.
    #[inline]
    pub fn get_deleter(&self) -> &D {
        self.deleter.get()
    }

    /// Whether dropping or resetting the holder would run the deleter.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.armed
    }

    /// Runs the deleter on the current resource if the holder is armed, then disarms it.
    ///
    /// The holder is disarmed before the deleter is called, so a second `reset`
    /// (or the eventual drop) does nothing even if the deleter panicked.
    pub fn reset(&mut self) {
        if self.armed {
            self.armed = false;
            trace_event!("running deleter");
            self.deleter.get_mut().delete(self.resource.get_mut());
        }
    }

    /// Cleans up the current resource, installs `value`, and re-arms.
    pub fn reset_with(&mut self, value: S::Value) {
        self.reset();
        self.resource.reset(value);
        self.armed = true;
    }

    /// Disarms without running the deleter. The caller now answers for the resource.
    #[inline]
    pub fn release(&mut self) -> &R {
        trace_event!("resource released");
        self.armed = false;
        self.resource.get()
    }

    /// Consumes the holder without running the deleter, returning the resource and the deleter.
    pub fn into_parts(self) -> (S::Value, D) {
        let (resource, deleter, _armed) = self.into_cells();
        (resource.into_value(), deleter.into_value())
    }

    /// Consumes the holder without running the deleter, returning the resource.
    #[inline]
    pub fn into_inner(self) -> S::Value {
        self.into_parts().0
    }

    /// Erases the deleter type. The armed state carries over unchanged.
    pub fn into_boxed<'a>(self) -> UniqueResource<R, BoxedDeleter<'a, R>, S>
    where
        R: 'a,
        D: 'a,
    {
        let (resource, deleter, armed) = self.into_cells();
        let mut deleter = deleter.into_value();
        let deleter: BoxedDeleter<'a, R> = Box::new(move |r: &mut R| deleter.delete(r));
        UniqueResource::from_cells(resource, Owned::new(deleter), armed)
    }

    fn into_cells(self) -> (S, Owned<D>, bool) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so each field is moved out exactly
        // once and `Drop::drop` does not observe the moved-from holder.
        unsafe { (ptr::read(&this.resource), ptr::read(&this.deleter), this.armed) }
    }
}

impl<R, D, S> Drop for UniqueResource<R, D, S>
where
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    fn drop(&mut self) {
        self.reset();
    }
}

impl<R, D, S> AsRef<R> for UniqueResource<R, D, S>
where
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    #[inline]
    fn as_ref(&self) -> &R {
        self.get()
    }
}

impl<R, D, S> Deref for UniqueResource<R, D, S>
where
    R: Deref,
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    type Target = R::Target;

    #[inline]
    fn deref(&self) -> &R::Target {
        self.get().deref()
    }
}

impl<R, D, S> DerefMut for UniqueResource<R, D, S>
where
    R: DerefMut,
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut R::Target {
        self.get_mut().deref_mut()
    }
}

impl<R, D, S> fmt::Debug for UniqueResource<R, D, S>
where
    R: fmt::Debug,
    D: Deleter<R>,
    S: Storage<Target = R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueResource")
            .field("resource", self.get())
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

/// Builds an armed holder over `resource`.
///
/// Takes closures directly; a [`Slot`] deleter goes through [`UniqueResource::new`].
#[inline]
pub fn unique_resource<R, D>(resource: R, deleter: D) -> UniqueResource<R, D>
where
    D: FnMut(&mut R),
{
    UniqueResource::new(resource, deleter)
}

/// Builds a holder that is armed only if `resource != invalid`.
///
/// Models APIs that report failure through a sentinel handle, for which the
/// deleter must not run.
#[inline]
pub fn unique_resource_checked<R, I, D>(resource: R, invalid: I, deleter: D) -> UniqueResource<R, D>
where
    R: PartialEq<I>,
    D: FnMut(&mut R),
{
    UniqueResource::checked(resource, invalid, deleter)
}

/// Builds an armed holder over a resource owned elsewhere.
#[inline]
pub fn unique_resource_ref<'a, T, D>(target: &'a mut T, deleter: D) -> UniqueResource<T, D, Reseat<'a, T>>
where
    D: FnMut(&mut T),
{
    UniqueResource::borrowed(target, deleter)
}
