use std::time::Duration;

use crate::runtime::clock::Millis;

/// Trailing-edge debounce: a value fires once `quiet` has passed without a newer one.
///
/// Every [`Debouncer::schedule`] cancels the pending value and restarts the timer, so only
/// the last value of a burst is ever delivered.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Millis, T)>,
}

impl<T> Debouncer<T> {
    pub(crate) fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace any pending value; returns whether one was cancelled.
    pub(crate) fn schedule(&mut self, now: Millis, value: T) -> bool {
        self.pending
            .replace((now.after(self.quiet), value))
            .is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// The pending value, if its deadline has been reached.
    pub(crate) fn take_due(&mut self, now: Millis) -> Option<T> {
        if self.deadline().is_some_and(|at| at <= now) {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/debounce.rs"]
mod tests;
