//! Exit policies: the two-state machines that decide whether a guard fires.
//!
//! Every policy starts armed and has exactly one transition, [`ExitPolicy::release`],
//! which is irreversible. `Default` is the arming constructor: policies that
//! depend on unwinding sample [`uncaught_panics`] at that point.

use super::unwinding::uncaught_panics;

/// Decides, at scope exit, whether a bound action should run.
pub trait ExitPolicy: Default {
    /// Returns `true` if the bound action should run if the scope ended now.
    ///
    /// Pure in the stored discriminant and the ambient unwinding depth; calling
    /// it any number of times yields consistent answers until [`release`](Self::release).
    fn should_execute(&self) -> bool;

    /// Permanently disables execution. Idempotent.
    fn release(&mut self);
}

/// Runs on every scope exit, normal or unwinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Always {
    armed: bool,
}

impl Default for Always {
    #[inline]
    fn default() -> Self {
        Self { armed: true }
    }
}

impl ExitPolicy for Always {
    #[inline]
    fn should_execute(&self) -> bool {
        self.armed
    }

    #[inline]
    fn release(&mut self) {
        self.armed = false;
    }
}

/// Runs only if a panic that began after arming is unwinding at exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnUnwind {
    depth: usize,
}

impl OnUnwind {
    const RELEASED: usize = usize::MAX;

    /// The unwinding depth sampled when the policy was armed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for OnUnwind {
    #[inline]
    fn default() -> Self {
        Self { depth: uncaught_panics() }
    }
}

impl ExitPolicy for OnUnwind {
    #[inline]
    fn should_execute(&self) -> bool {
        self.depth < uncaught_panics()
    }

    #[inline]
    fn release(&mut self) {
        self.depth = Self::RELEASED;
    }
}

/// Runs only if no new panic is unwinding at exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnSuccess {
    depth: isize,
}

impl OnSuccess {
    const RELEASED: isize = -1;

    /// The unwinding depth sampled when the policy was armed, or `-1` once released.
    #[inline]
    pub fn depth(&self) -> isize {
        self.depth
    }
}

/// The current depth in `OnSuccess`'s signed representation.
#[inline]
fn signed_depth() -> isize {
    isize::try_from(uncaught_panics()).unwrap_or(isize::MAX)
}

impl Default for OnSuccess {
    #[inline]
    fn default() -> Self {
        Self { depth: signed_depth() }
    }
}

impl ExitPolicy for OnSuccess {
    #[inline]
    fn should_execute(&self) -> bool {
        self.depth >= signed_depth()
    }

    #[inline]
    fn release(&mut self) {
        self.depth = Self::RELEASED;
    }
}

/// Never runs. Stands in where a guard parameter is required but nothing needs undoing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ignore;

impl ExitPolicy for Ignore {
    #[inline]
    fn should_execute(&self) -> bool {
        false
    }

    #[inline]
    fn release(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    /// Runs a check from inside a destructor, the way a guard would.
    struct OnDrop<F: FnMut()>(F);

    impl<F: FnMut()> Drop for OnDrop<F> {
        fn drop(&mut self) {
            (self.0)()
        }
    }

    /// Runs `f`, which must end in a panic so that its locals drop while unwinding.
    fn unwind_with(f: impl FnOnce()) {
        let result = panic::catch_unwind(AssertUnwindSafe(f));
        assert!(result.is_err());
    }

    #[test]
    fn always_policy() {
        let p = Always::default();
        assert!(p.should_execute());

        let seen = Cell::new(false);
        unwind_with(|| {
            let p = Always::default();
            let _check = OnDrop(|| seen.set(p.should_execute()));
            panic!("unwind");
        });
        assert!(seen.get());

        let mut p = Always::default();
        p.release();
        assert!(!p.should_execute());
        p.release();
        assert!(!p.should_execute());
    }

    #[test]
    fn on_unwind_policy() {
        let p = OnUnwind::default();
        assert_eq!(p.depth(), 0);
        assert!(!p.should_execute());

        let seen = Cell::new(false);
        unwind_with(|| {
            let p = OnUnwind::default();
            let _check = OnDrop(|| seen.set(p.should_execute()));
            panic!("unwind");
        });
        assert!(seen.get());

        let seen = Cell::new(true);
        unwind_with(|| {
            let mut p = OnUnwind::default();
            p.release();
            assert_eq!(p.depth(), usize::MAX);
            let _check = OnDrop(|| seen.set(p.should_execute()));
            panic!("unwind");
        });
        assert!(!seen.get());
    }

    #[test]
    fn on_success_policy() {
        let p = OnSuccess::default();
        assert_eq!(p.depth(), 0);
        assert!(p.should_execute());

        let seen = Cell::new(true);
        unwind_with(|| {
            let p = OnSuccess::default();
            let _check = OnDrop(|| seen.set(p.should_execute()));
            panic!("unwind");
        });
        assert!(!seen.get());

        let mut p = OnSuccess::default();
        p.release();
        assert_eq!(p.depth(), -1);
        assert!(!p.should_execute());
    }

    #[test]
    fn policy_armed_during_unwinding_sees_no_new_panic() {
        let fail = Cell::new(true);
        let success = Cell::new(false);
        unwind_with(|| {
            let _check = OnDrop(|| {
                // Armed while already unwinding: the ongoing panic is not "new".
                let f = OnUnwind::default();
                let s = OnSuccess::default();
                fail.set(f.should_execute());
                success.set(s.should_execute());
            });
            panic!("unwind");
        });
        assert!(!fail.get());
        assert!(success.get());
    }

    #[test]
    fn ignore_never_executes() {
        let mut p = Ignore;
        assert!(!p.should_execute());
        p.release();
        assert!(!p.should_execute());
    }
}
