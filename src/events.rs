use std::fmt;

use crate::dom::NodeId;
use crate::state::Transition;

/// Notifications emitted by a slider. `name()` is the wire name listeners
/// key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    Init,
    AnimationStart(Transition),
    AnimationEnd(Transition),
    AnimationOutStart(NodeId),
    AnimationInStart(NodeId),
    AnimationOutEnd(NodeId),
    AnimationInEnd(NodeId),
}

impl SliderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SliderEvent::Init => "init",
            SliderEvent::AnimationStart(_) => "animationstart",
            SliderEvent::AnimationEnd(_) => "animationend",
            SliderEvent::AnimationOutStart(_) => "animationoutstart",
            SliderEvent::AnimationInStart(_) => "animationinstart",
            SliderEvent::AnimationOutEnd(_) => "animationoutend",
            SliderEvent::AnimationInEnd(_) => "animationinend",
        }
    }

    /// Slide the event was triggered on, for per-slide events.
    pub fn slide(&self) -> Option<NodeId> {
        match self {
            SliderEvent::AnimationOutStart(id)
            | SliderEvent::AnimationInStart(id)
            | SliderEvent::AnimationOutEnd(id)
            | SliderEvent::AnimationInEnd(id) => Some(*id),
            _ => None,
        }
    }
}

pub type Listener = Box<dyn FnMut(&SliderEvent)>;

/// Listeners registered on one slider instance.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn add(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, event: &SliderEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("count", &self.listeners.len()).finish()
    }
}
