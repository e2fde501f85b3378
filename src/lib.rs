//! # `warden` - Unique Resources and Scope Guards
//!
//! RAII holders for resources that are not memory: descriptors, handles,
//! registrations, anything released by calling a function. A
//! [`UniqueResource`] pairs the resource with its deleter and guarantees the
//! deleter runs exactly once, on the resource's current value, unless the
//! resource is explicitly released. [`ScopeGuard`] runs a callback at scope
//! exit, optionally only when the scope unwinds or only when it does not.
//!
//! ## Guarantees
//!
//! ### Exactly-once cleanup
//! - **Disarm before calling**: a holder is disarmed before its deleter runs, so
//!   a panicking deleter is never re-entered by the eventual drop.
//! - **Guarded transfers**: moving a resource or deleter out of a live place
//!   (see [`storage::Transfer`]) either completes, or releases the resource
//!   once and resumes the panic.
//! - **Ordered assignment**: [`UniqueResource::assign_from`] performs the step
//!   that may panic last, so a failure never leaves two owners or none.
//!
//! ### Unwinding awareness
//! - **Sampled at construction**: [`guard::OnUnwind`] and [`guard::OnSuccess`]
//!   compare the thread's unwinding depth at drop time against the depth they
//!   were created at, so a guard created inside a `Drop` running during
//!   unwinding is judged by its own scope.
//! - **Per thread**: the depth is [`guard::uncaught_panics`], which never
//!   observes other threads.
//!
//! ## Architecture
//!
//! 1. **Storage cells** ([`storage`]): `Owned<T>` stores by value,
//!    `Reseat<'a, T>` stores by reference and reseats on reset.
//! 2. **Exit policies** ([`guard::policy`]): `Always`, `OnUnwind`, `OnSuccess`.
//! 3. **Scope guards** ([`guard`]): a value, a callback and a policy.
//! 4. **Unique resources** ([`resource`]): two cells and an armed flag. Any
//!    `FnMut(&mut R)` is a [`Deleter`]; a [`Slot`] lets a move-only deleter
//!    leave a live holder through [`Take`].
//! 5. **POSIX descriptors** ([`posix`], unix only): `UniqueFd` over `close(2)`.
//!
//! ## Feature Flags
//!
//! - `tracing`: emits `trace`/`warn` events when deleters run and when a
//!   transfer panics mid-construction.
//! - `proptest`: exposes the `testing` module: panicking values, a cleanup
//!   tally and `proptest` strategies over holder operations.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use warden::{defer, unique_resource_checked};
//!
//! let closed = RefCell::new(Vec::new());
//! {
//!     defer! { closed.borrow_mut().push("scope"); }
//!
//!     let ok = unique_resource_checked(3, -1, |_: &mut i32| closed.borrow_mut().push("handle"));
//!     let failed = unique_resource_checked(-1, -1, |_: &mut i32| closed.borrow_mut().push("never"));
//!     assert!(ok.is_active());
//!     assert!(!failed.is_active());
//! }
//! assert_eq!(*closed.borrow(), ["handle", "scope"]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod guard;
#[cfg(unix)]
pub mod posix;
pub mod resource;
pub mod storage;
#[cfg(any(test, feature = "proptest"))]
pub mod testing;

pub use guard::{
    guard, guard_on_success, guard_on_unwind, scope_exit, scope_fail, scope_success, uncaught_panics, ScopeGuard,
};
pub use resource::{
    unique_resource, unique_resource_checked, unique_resource_ref, BoxedDeleter, Deleter, Slot, UniqueResource,
};
pub use storage::{Duplicate, Owned, Reseat, Take};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    use crate::guard::{Always, Ignore, OnSuccess, OnUnwind};

    // Cells add nothing around the value or reference.
    assert!(mem::size_of::<Owned<u64>>() == mem::size_of::<u64>());
    assert!(mem::align_of::<Owned<u64>>() == mem::align_of::<u64>());
    assert!(mem::size_of::<Reseat<'static, u64>>() == mem::size_of::<&u64>());

    // Policies are one flag or one depth counter.
    assert!(mem::size_of::<Always>() == mem::size_of::<bool>());
    assert!(mem::size_of::<OnUnwind>() == mem::size_of::<usize>());
    assert!(mem::size_of::<OnSuccess>() == mem::size_of::<isize>());
    assert!(mem::size_of::<Ignore>() == 0);

    // A holder is its resource, its deleter and one flag, padded.
    assert!(mem::size_of::<UniqueResource<usize, fn(&mut usize)>>() <= mem::size_of::<usize>() * 3);
};
