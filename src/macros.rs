//! Crate macros: deferred actions and feature-gated diagnostics.

/// Runs the body when the enclosing block exits, however it exits.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use warden::defer;
///
/// let closed = Cell::new(false);
/// {
///     defer! { closed.set(true); }
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::guard::scope_exit(|| { $($body)* });
    };
}

/// Runs the body only if the enclosing block exits by unwinding.
///
/// ```rust
/// use std::cell::Cell;
/// use std::panic::{catch_unwind, AssertUnwindSafe};
/// use warden::defer_on_unwind;
///
/// let rolled_back = Cell::new(false);
/// let _ = catch_unwind(AssertUnwindSafe(|| {
///     defer_on_unwind! { rolled_back.set(true); }
///     panic!("commit failed");
/// }));
/// assert!(rolled_back.get());
/// ```
#[macro_export]
macro_rules! defer_on_unwind {
    ($($body:tt)*) => {
        let _guard = $crate::guard::scope_fail(|| { $($body)* });
    };
}

/// Runs the body only if the enclosing block exits without unwinding.
#[macro_export]
macro_rules! defer_on_success {
    ($($body:tt)*) => {
        let _guard = $crate::guard::scope_success(|| { $($body)* });
    };
}

// Diagnostics compile to nothing unless the `tracing` feature is enabled.
macro_rules! trace_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)+);
    };
}

macro_rules! warn_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)+);
    };
}
