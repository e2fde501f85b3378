//! Scope guards keyed on exit policies.
//!
//! - [`policy`] holds the three policy state machines plus [`Ignore`].
//! - [`scope_guard`] holds the value-carrying [`ScopeGuard`].
//! - [`unwinding`] exposes the per-thread unwinding depth the policies sample.
//!
//! The free functions below are the usual entry points:
//!
//! ```rust
//! use std::cell::Cell;
//! use warden::guard::{scope_exit, scope_fail, scope_success};
//!
//! let log = Cell::new(0);
//! {
//!     let _a = scope_exit(|| log.set(log.get() + 1));
//!     let _b = scope_success(|| log.set(log.get() + 10));
//!     let _c = scope_fail(|| log.set(log.get() + 100));
//! }
//! assert_eq!(log.get(), 11);
//! ```

pub mod policy;
pub mod scope_guard;
pub mod unwinding;

pub use policy::{Always, ExitPolicy, Ignore, OnSuccess, OnUnwind};
pub use scope_guard::ScopeGuard;
pub use unwinding::uncaught_panics;

/// Guards `value`; `callback` receives it on every scope exit.
#[inline]
pub fn guard<T, F>(value: T, callback: F) -> ScopeGuard<T, F, Always>
where
    F: FnOnce(T),
{
    ScopeGuard::new(value, callback)
}

/// Guards `value`; `callback` receives it only if the scope exits by unwinding.
#[inline]
pub fn guard_on_unwind<T, F>(value: T, callback: F) -> ScopeGuard<T, F, OnUnwind>
where
    F: FnOnce(T),
{
    ScopeGuard::new(value, callback)
}

/// Guards `value`; `callback` receives it only if the scope exits normally.
#[inline]
pub fn guard_on_success<T, F>(value: T, callback: F) -> ScopeGuard<T, F, OnSuccess>
where
    F: FnOnce(T),
{
    ScopeGuard::new(value, callback)
}

/// Runs `action` when the returned guard goes out of scope.
#[inline]
pub fn scope_exit<F>(action: F) -> ScopeGuard<(), impl FnOnce(()), Always>
where
    F: FnOnce(),
{
    ScopeGuard::new((), move |()| action())
}

/// Runs `action` when the returned guard goes out of scope during unwinding.
#[inline]
pub fn scope_fail<F>(action: F) -> ScopeGuard<(), impl FnOnce(()), OnUnwind>
where
    F: FnOnce(),
{
    ScopeGuard::new((), move |()| action())
}

/// Runs `action` when the returned guard goes out of scope without unwinding.
#[inline]
pub fn scope_success<F>(action: F) -> ScopeGuard<(), impl FnOnce(()), OnSuccess>
where
    F: FnOnce(),
{
    ScopeGuard::new((), move |()| action())
}
