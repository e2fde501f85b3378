//! Assignment from a holder that has to stay valid afterwards.

use core::mem;
use std::panic::{self, AssertUnwindSafe};

use super::{Deleter, UniqueResource};
use crate::storage::{Storage, Transfer};

impl<R, D> UniqueResource<R, D>
where
    D: Deleter<R>,
{
    /// Releases the current resource, then takes over `other`'s resource,
    /// deleter and armed state. `other` ends up disarmed.
    ///
    /// The step that may panic always goes last, so a failure leaves `other`
    /// responsible for its own resource:
    ///
    /// 1. If `RX` never panics, the deleter is transferred first, then the resource.
    /// 2. Otherwise, if `DX` never panics, the resource goes first, then the
    ///    deleter. This is the path for a move-only deleter in a
    ///    [`Slot`](super::Slot) taken with [`Take`](crate::storage::Take).
    /// 3. Otherwise both may panic. A failed resource transfer leaves `other`
    ///    responsible. A failed deleter transfer comes after `self` already holds
    ///    a copy of the resource, so both holders are disarmed, `other`'s
    ///    deleter runs once on `self`'s resource (if `other` was armed), and the
    ///    first panic resumes. If that deleter panics too, its panic
    ///    propagates instead.
    ///
    /// Assigning a holder to itself cannot be expressed: `self` and `other`
    /// are distinct exclusive borrows.
    pub fn assign_from<RX, DX>(&mut self, other: &mut Self)
    where
        RX: Transfer<R>,
        DX: Transfer<D>,
    {
        self.reset();

        if RX::NOTHROW {
            self.deleter.assign::<DX>(other.deleter.get_mut());
            self.resource.assign::<RX>(other.resource.get_mut());
        } else if DX::NOTHROW {
            self.resource.assign::<RX>(other.resource.get_mut());
            self.deleter.assign::<DX>(other.deleter.get_mut());
        } else {
            self.resource.assign::<RX>(other.resource.get_mut());

            let deleter = &mut self.deleter;
            let source = other.deleter.get_mut();
            let copied = panic::catch_unwind(AssertUnwindSafe(|| deleter.assign::<DX>(source)));

            if let Err(payload) = copied {
                warn_event!("deleter transfer panicked during assignment, releasing resource");
                self.armed = false;
                if mem::replace(&mut other.armed, false) {
                    other.deleter.get_mut().delete(self.resource.get_mut());
                }
                panic::resume_unwind(payload);
            }
        }

        self.armed = mem::replace(&mut other.armed, false);
    }
}
