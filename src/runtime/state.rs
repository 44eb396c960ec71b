/// Where a sketch is in its page lifetime.
///
/// `Uninitialized -> FeaturesComputed -> Ready -> Rendering -> Idle`, then `Idle -> Ready`
/// on every relayout and `Idle -> Rendering` on redraws (animation ticks). There is no
/// terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LifecycleState {
    /// Nothing has run yet.
    Uninitialized,
    /// Features are decided and reported; no surface exists.
    FeaturesComputed,
    /// A surface is laid out but not painted.
    Ready,
    /// A draw pass is in progress.
    Rendering,
    /// Painted and waiting for events.
    Idle,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Uninitialized, FeaturesComputed)
                | (FeaturesComputed, Ready)
                | (Ready, Rendering)
                | (Rendering, Idle)
                | (Idle, Ready)
                | (Idle, Rendering)
        )
    }
}

/// One-shot flag: fires once, then stays fired for the rest of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Latch {
    /// Not fired yet.
    #[default]
    Armed,
    /// Already fired.
    Fired,
}

impl Latch {
    /// Fire the latch. Returns `true` only on the call that fired it.
    pub fn fire(&mut self) -> bool {
        match self {
            Latch::Armed => {
                *self = Latch::Fired;
                true
            }
            Latch::Fired => false,
        }
    }

    /// Whether the latch has fired.
    pub fn is_fired(self) -> bool {
        self == Latch::Fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/state.rs"]
mod tests;
