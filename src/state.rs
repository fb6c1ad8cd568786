use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,      // Current slide shown, ready for a transition
    Animating, // A transition is in flight, further requests are dropped
}

/// Payload shared by `animationstart` and `animationend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub from_index: usize,
    pub to_index: usize,
    pub counterwise: bool,
    pub no_animation: bool,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoOutcome {
    /// Nothing happened: busy, out of range, no target, or already there.
    Ignored,
    /// The transition started and completes on a later `update`.
    Started(Transition),
    /// The transition ran to completion synchronously.
    Completed(Transition),
}

impl GotoOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, GotoOutcome::Ignored)
    }

    pub fn transition(&self) -> Option<Transition> {
        match self {
            GotoOutcome::Ignored => None,
            GotoOutcome::Started(t) | GotoOutcome::Completed(t) => Some(*t),
        }
    }
}

/// Read-only snapshot of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    pub active_index: usize,
    pub is_vertical: bool,
    pub is_animating: bool,
    pub is_circular: bool,
    pub slide_count: usize,
}
