//! `ScopeGuard` - a value paired with a callback that an exit policy may run on drop.

use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};

use super::policy::ExitPolicy;

/// Owns a value and a callback; on drop, hands the value to the callback iff
/// the policy says so, otherwise just drops both.
///
/// The guard is not `Clone`. Operations that would otherwise collide with
/// methods of `T` (reached through `Deref`) are associated functions, so call
/// them as `ScopeGuard::release(&mut guard)`.
#[must_use = "a guard runs its callback when dropped; binding it to `_` drops it immediately"]
pub struct ScopeGuard<T, F, P>
where
    F: FnOnce(T),
    P: ExitPolicy,
{
    value: ManuallyDrop<T>,
    callback: ManuallyDrop<F>,
    policy: P,
}

impl<T, F, P> ScopeGuard<T, F, P>
where
    F: FnOnce(T),
    P: ExitPolicy,
{
    /// Creates a guard whose policy is armed now.
    #[inline]
    pub fn new(value: T, callback: F) -> Self {
        Self::with_policy(value, callback, P::default())
    }

    /// Creates a guard with an explicitly constructed policy.
    #[inline]
    pub fn with_policy(value: T, callback: F, policy: P) -> Self {
        Self {
            value: ManuallyDrop::new(value),
            callback: ManuallyDrop::new(callback),
            policy,
        }
    }

    /// Disarms the guard; the callback will not run. Idempotent.
    #[inline]
    pub fn release(guard: &mut Self) {
        guard.policy.release();
    }

    /// Whether the callback would run if the guard were dropped right now.
    #[inline]
    pub fn should_execute(guard: &Self) -> bool {
        guard.policy.should_execute()
    }

    /// The guard's policy.
    #[inline]
    pub fn policy(guard: &Self) -> &P {
        &guard.policy
    }

    /// Defuses the guard and returns the value. The callback is dropped without running.
    pub fn dismiss(guard: Self) -> T {
        let mut guard = ManuallyDrop::new(guard);
        // SAFETY: `guard` is wrapped in `ManuallyDrop`, so `Drop::drop` never
        // runs for it and each field is taken exactly once here.
        unsafe {
            let value = ManuallyDrop::take(&mut guard.value);
            ManuallyDrop::drop(&mut guard.callback);
            core::ptr::drop_in_place(&mut guard.policy);
            value
        }
    }
}

impl<T, F, P> Deref for ScopeGuard<T, F, P>
where
    F: FnOnce(T),
    P: ExitPolicy,
{
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, F, P> DerefMut for ScopeGuard<T, F, P>
where
    F: FnOnce(T),
    P: ExitPolicy,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T, F, P> Drop for ScopeGuard<T, F, P>
where
    F: FnOnce(T),
    P: ExitPolicy,
{
    fn drop(&mut self) {
        // SAFETY: `drop` runs at most once and `dismiss` never reaches it, so
        // both fields are still initialized and are taken exactly once.
        let (value, callback) = unsafe {
            (
                ManuallyDrop::take(&mut self.value),
                ManuallyDrop::take(&mut self.callback),
            )
        };
        if self.policy.should_execute() {
            callback(value);
        }
    }
}

impl<T, F, P> fmt::Debug for ScopeGuard<T, F, P>
where
    T: fmt::Debug,
    F: FnOnce(T),
    P: ExitPolicy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("value", &*self.value)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
