//! Ambient unwinding depth of the calling thread.
//!
//! Exit policies sample this value when they are armed and compare against it
//! when they are queried. Unwinding is a per-stack phenomenon, so the count is
//! always thread-local.

/// Returns the number of panics currently unwinding through this thread.
///
/// A second panic raised while the thread is already unwinding aborts the
/// process, so the observable depth is `0` or `1`.
#[inline]
pub fn uncaught_panics() -> usize {
    usize::from(std::thread::panicking())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic;

    struct Witness<'a>(&'a Cell<usize>);

    impl Drop for Witness<'_> {
        fn drop(&mut self) {
            self.0.set(uncaught_panics());
        }
    }

    #[test]
    fn zero_outside_unwinding() {
        assert_eq!(uncaught_panics(), 0);
    }

    #[test]
    fn one_while_unwinding() {
        let seen = Cell::new(usize::MAX);
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            let _witness = Witness(&seen);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(seen.get(), 1);
        assert_eq!(uncaught_panics(), 0);
    }

    #[test]
    fn caught_panic_does_not_leak_depth() {
        let outer = Cell::new(usize::MAX);
        {
            let _witness = Witness(&outer);
            let _ = panic::catch_unwind(|| panic!("inner"));
        }
        assert_eq!(outer.get(), 0);
    }
}
