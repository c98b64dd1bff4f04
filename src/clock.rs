//! Time source for the notes repository

use chrono::{DateTime, Utc};
use std::cell::Cell;

/// Supplies the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the time it was last set to.
///
/// Counts how many times it has been read.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
    reads: Cell<usize>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
            reads: Cell::new(0),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Number of `now()` calls so far
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.set(self.reads.get() + 1);
        self.now.get()
    }
}
