//! Test support for exception-safety checks.
//!
//! [`Brittle`] is a value whose `Clone` panics once a shared budget runs out,
//! [`Tally`] records which values were cleaned up, and [`steps`] generates
//! `proptest` sequences of holder operations to replay against them.

use std::cell::{Cell, RefCell};

use proptest::prelude::*;

/// A value whose `Clone` panics once the shared budget is spent.
///
/// The default value has no budget and always clones.
#[derive(Debug, Default)]
pub struct Brittle<'a> {
    /// Identifies the logical resource across copies.
    pub id: u32,
    budget: Option<&'a Cell<u32>>,
}

impl<'a> Brittle<'a> {
    /// A value drawing its clones from `budget`.
    pub fn new(id: u32, budget: &'a Cell<u32>) -> Self {
        Self { id, budget: Some(budget) }
    }
}

impl Clone for Brittle<'_> {
    fn clone(&self) -> Self {
        if let Some(budget) = self.budget {
            assert!(budget.get() > 0, "clone budget exhausted");
            budget.set(budget.get() - 1);
        }
        Self { id: self.id, budget: self.budget }
    }
}

/// Records the id of every value a deleter ran on.
#[derive(Debug, Default)]
pub struct Tally {
    released: RefCell<Vec<u32>>,
}

impl Tally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// A deleter that records into this tally.
    ///
    /// Cloning the deleter clones `ballast`, so it panics when the ballast's
    /// budget is spent.
    pub fn deleter<'a>(&'a self, ballast: Brittle<'a>) -> impl FnMut(&mut Brittle<'a>) + Clone + 'a {
        move |value: &mut Brittle<'a>| {
            let _keep = &ballast;
            self.released.borrow_mut().push(value.id);
        }
    }

    /// How many times a deleter ran on `id`.
    pub fn count(&self, id: u32) -> usize {
        self.released.borrow().iter().filter(|&&seen| seen == id).count()
    }

    /// Every recorded id, in order.
    pub fn released(&self) -> Vec<u32> {
        self.released.borrow().clone()
    }
}

/// How the resource leaves its source place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// [`Take`](crate::storage::Take).
    Take,
    /// [`Duplicate`](crate::storage::Duplicate).
    Duplicate,
}

/// One operation on a pool of holders. Indices wrap around the pool size.
#[derive(Debug, Clone)]
pub enum Step {
    /// Adds a fresh armed holder.
    Spawn,
    /// `take_from` the holder at `src`, with `budget` clones allowed.
    TakeFrom {
        /// Source holder.
        src: usize,
        /// Resource transfer.
        mode: Mode,
        /// Clones allowed before one panics.
        budget: u32,
    },
    /// `assign_from` between two distinct holders, with `budget` clones allowed.
    AssignFrom {
        /// Destination holder.
        dst: usize,
        /// Source holder.
        src: usize,
        /// Resource transfer.
        mode: Mode,
        /// Clones allowed before one panics.
        budget: u32,
    },
    /// `reset` the holder at the index.
    Reset(usize),
    /// `release` the holder at the index.
    Release(usize),
}

/// Either transfer mode.
pub fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Take), Just(Mode::Duplicate)]
}

/// Between one and `max` steps. Budgets stay small so transfers regularly panic.
pub fn steps(max: usize) -> impl Strategy<Value = Vec<Step>> {
    let step = prop_oneof![
        Just(Step::Spawn),
        (any::<usize>(), mode(), 0u32..3).prop_map(|(src, mode, budget)| Step::TakeFrom { src, mode, budget }),
        (any::<usize>(), any::<usize>(), mode(), 0u32..3)
            .prop_map(|(dst, src, mode, budget)| Step::AssignFrom { dst, src, mode, budget }),
        any::<usize>().prop_map(Step::Reset),
        any::<usize>().prop_map(Step::Release),
    ];
    proptest::collection::vec(step, 1..max)
}
