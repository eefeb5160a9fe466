#![forbid(unsafe_code)]

//! Frame scheduling: collapse event bursts into one recompute per frame.
//!
//! # Design
//!
//! The display refresh is abstracted as a [`FrameClock`]: `request(job)`
//! runs `job` at the next frame boundary. The engine never talks to a
//! real refresh callback directly, so tests drive a [`ManualFrameClock`]
//! and hosts without a frame concept use an [`InlineClock`].
//!
//! [`RenderScheduler`] sits on top with a single pending slot: scheduling
//! while a run is already armed replaces the pending argument instead of
//! queueing another run. Whatever is in the slot when the frame fires is
//! what gets applied — the last offset received before the frame boundary
//! always wins, and at most one apply happens per frame no matter how
//! many events arrived.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use lexiscope_runtime::{ManualFrameClock, RenderScheduler};
//!
//! let clock = Rc::new(ManualFrameClock::new());
//! let applied = Rc::new(std::cell::Cell::new(0.0));
//!
//! let seen = Rc::clone(&applied);
//! let scheduler = RenderScheduler::new(clock.clone(), move |px: f64| seen.set(px));
//!
//! scheduler.schedule(100.0);
//! scheduler.schedule(250.0); // supersedes 100.0 within the same frame
//! assert_eq!(applied.get(), 0.0); // nothing ran yet
//!
//! clock.advance();
//! assert_eq!(applied.get(), 250.0); // one apply, latest argument
//! ```
//!
//! # Invariants
//!
//! 1. At most one apply per frame, regardless of schedule volume.
//! 2. The applied argument is the last one scheduled before the frame.
//! 3. A dropped scheduler's pending work never runs.
//! 4. `cancel_pending` empties the slot; an already-armed frame then
//!    fires into nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug_span;

/// A deferred unit of work handed to a [`FrameClock`].
pub type FrameJob = Box<dyn FnOnce()>;

/// Next-frame capability: run a job at the next frame boundary.
///
/// Implementations decide what a "frame" is — a display refresh, a test
/// harness step, or nothing at all.
pub trait FrameClock {
    /// Queue `job` to run at the next frame boundary.
    fn request(&self, job: FrameJob);
}

/// Manually advanced clock for tests and scripted hosts.
///
/// Jobs requested before an [`advance`](ManualFrameClock::advance) call
/// run during that call; jobs requested while a frame is running land in
/// the next one.
#[derive(Default)]
pub struct ManualFrameClock {
    queue: RefCell<Vec<FrameJob>>,
}

impl ManualFrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame: execute exactly the jobs queued so far.
    ///
    /// Returns the number of jobs run.
    pub fn advance(&self) -> usize {
        let jobs: Vec<FrameJob> = self.queue.borrow_mut().drain(..).collect();
        let _span = debug_span!("frame.flush", jobs = jobs.len() as u64).entered();
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }

    /// Jobs waiting for the next frame.
    #[must_use]
    pub fn pending_jobs(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameClock for ManualFrameClock {
    fn request(&self, job: FrameJob) {
        self.queue.borrow_mut().push(job);
    }
}

/// Degenerate clock that runs every job immediately.
///
/// For hosts with no display loop: scheduling through this clock makes
/// every deferred recompute synchronous. Coalescing guarantees become
/// trivial (each event is its own "frame").
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineClock;

impl InlineClock {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FrameClock for InlineClock {
    fn request(&self, job: FrameJob) {
        job();
    }
}

struct SchedulerInner<A> {
    clock: Rc<dyn FrameClock>,
    /// Single pending slot; scheduling replaces its content.
    pending: RefCell<Option<A>>,
    /// True while a frame job is queued and has not fired.
    armed: Cell<bool>,
    /// Arguments superseded before their frame fired.
    coalesced: Cell<u64>,
    apply: Box<dyn Fn(A)>,
}

/// Latest-wins, one-per-frame work coalescer.
///
/// Generic over the argument `A` carried to the apply function; the
/// viewport controller instantiates it with the raw scroll offset.
pub struct RenderScheduler<A> {
    inner: Rc<SchedulerInner<A>>,
}

impl<A: 'static> RenderScheduler<A> {
    /// Create a scheduler that runs `apply` through `clock`.
    #[must_use]
    pub fn new(clock: Rc<dyn FrameClock>, apply: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                clock,
                pending: RefCell::new(None),
                armed: Cell::new(false),
                coalesced: Cell::new(0),
                apply: Box::new(apply),
            }),
        }
    }

    /// Record `arg` for the next frame, superseding any argument already
    /// pending. Arms a frame job if none is armed.
    pub fn schedule(&self, arg: A) {
        let superseded = self.inner.pending.borrow_mut().replace(arg).is_some();
        if superseded {
            self.inner.coalesced.set(self.inner.coalesced.get() + 1);
        }

        if self.inner.armed.get() {
            return;
        }
        self.inner.armed.set(true);

        let weak = Rc::downgrade(&self.inner);
        self.inner.clock.request(Box::new(move || {
            // Owner dropped: the frame fires into nothing.
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.armed.set(false);
            let arg = inner.pending.borrow_mut().take();
            if let Some(arg) = arg {
                (inner.apply)(arg);
            }
        }));
    }

    /// Drop the pending argument, if any. Returns whether one was
    /// dropped. An already-armed frame then fires into an empty slot.
    pub fn cancel_pending(&self) -> bool {
        self.inner.pending.borrow_mut().take().is_some()
    }

    /// True while an argument waits for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    /// How many scheduled arguments were superseded before running.
    #[must_use]
    pub fn coalesced_count(&self) -> u64 {
        self.inner.coalesced.get()
    }
}

impl<A> std::fmt::Debug for RenderScheduler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderScheduler")
            .field("armed", &self.inner.armed.get())
            .field("pending", &self.inner.pending.borrow().is_some())
            .field("coalesced", &self.inner.coalesced.get())
            .finish()
    }
}
