use tracing::debug;

use crate::commands::SliderCommand;
use crate::dom::NodeId;
use crate::events::SliderEvent;
use crate::linear::{HandlerKind, SlideSelector, Slider};
use crate::state::{GotoOutcome, SliderState, Transition};

/// Navigation capabilities shared by the linear slider and the grid
/// extension.
///
/// Implementors hand out the underlying [`Slider`] and decide how the
/// neighbour of the active slide is found. The provided methods drive the
/// transition lifecycle and call the hooks at fixed points:
///
/// * `init`: setup, `on_init`, `reset_controls`, then `init` is emitted.
/// * end of a transition: `on_transition_end`, `reset_controls`, then
///   `animationend` is emitted.
/// * after `add_slide`/`remove_slide`: `on_slides_changed`, `reset_controls`.
pub trait Engine {
    fn slider(&self) -> &Slider;
    fn slider_mut(&mut self) -> &mut Slider;

    /// Position of the slide after (or before, when `reverse`) the active
    /// one, `None` when there is nowhere to go.
    fn sibling_index(&self, reverse: bool) -> Option<usize>;

    fn reset_controls(&mut self) {
        self.slider_mut().reset_linear_controls();
    }

    fn on_init(&mut self) {}

    fn on_transition_end(&mut self, _transition: &Transition) {}

    fn on_slides_changed(&mut self) {}

    /// Command a click on a navigation handler stands for.
    fn handler_command(&self, kind: HandlerKind) -> SliderCommand {
        match kind {
            HandlerKind::Next => SliderCommand::Next,
            HandlerKind::Prev => SliderCommand::Prev,
        }
    }

    /// Runs an external navigation request.
    fn dispatch(&mut self, command: SliderCommand) -> GotoOutcome {
        dispatch_linear(self, command)
    }

    /// Sets the slider up and emits `init`. Later calls do nothing.
    fn init(&mut self) {
        if !self.slider_mut().init_structure() {
            return;
        }
        self.on_init();
        self.reset_controls();
        self.slider_mut().emit(SliderEvent::Init);
    }

    fn next(&mut self) -> GotoOutcome {
        match self.sibling_index(false) {
            Some(index) => self.goto_slide(index, false, false),
            None => {
                debug!("no next slide");
                GotoOutcome::Ignored
            }
        }
    }

    fn prev(&mut self) -> GotoOutcome {
        match self.sibling_index(true) {
            Some(index) => self.goto_slide(index, true, false),
            None => {
                debug!("no previous slide");
                GotoOutcome::Ignored
            }
        }
    }

    /// Moves to the slide at `index`. `counterwise` reverses the direction
    /// of the movement, `no_animation` shows the slide right away.
    fn goto_slide(&mut self, index: usize, counterwise: bool, no_animation: bool) -> GotoOutcome {
        let outcome = self.slider_mut().start_transition(index, counterwise, no_animation);
        if let GotoOutcome::Completed(transition) = outcome {
            self.complete_transition(transition);
        }
        outcome
    }

    /// Advances the running transition by `dt` seconds and returns it on
    /// the frame it ends.
    fn update(&mut self, dt: f32) -> Option<Transition> {
        let transition = self.slider_mut().advance(dt)?;
        self.complete_transition(transition);
        Some(transition)
    }

    /// Runs the end hooks and emits `animationend`. Not meant to be
    /// overridden or called directly.
    fn complete_transition(&mut self, transition: Transition) {
        self.on_transition_end(&transition);
        self.reset_controls();
        self.slider_mut().emit(SliderEvent::AnimationEnd(transition));
    }

    /// Inserts an empty slide before `position`, appending when it is
    /// `None` or out of range. `None` when the markup has no slide list.
    fn add_slide(&mut self, position: Option<usize>) -> Option<NodeId> {
        let id = self.slider_mut().insert_slide(position)?;
        self.on_slides_changed();
        self.reset_controls();
        Some(id)
    }

    /// Removes the matching slides and returns how many were removed.
    fn remove_slide(&mut self, selector: impl Into<SlideSelector>) -> usize {
        let removed = self.slider_mut().delete_slides(&selector.into());
        if removed > 0 {
            self.on_slides_changed();
            self.reset_controls();
        }
        removed
    }

    fn slide_count(&self) -> usize {
        self.slider().state().slide_count
    }

    fn switch_orientation(&mut self) {
        self.slider_mut().toggle_orientation();
    }

    fn state(&self) -> SliderState {
        self.slider().state()
    }

    /// Handles a click on `node`; anything but a handler is ignored.
    fn click(&mut self, node: NodeId) -> GotoOutcome {
        match self.slider().handler_kind(node) {
            Some(kind) => {
                let command = self.handler_command(kind);
                self.dispatch(command)
            }
            None => GotoOutcome::Ignored,
        }
    }

    fn on(&mut self, listener: impl FnMut(&SliderEvent) + 'static) {
        self.slider_mut().add_listener(Box::new(listener));
    }
}

/// The commands every slider understands.
pub fn dispatch_linear<E: Engine + ?Sized>(engine: &mut E, command: SliderCommand) -> GotoOutcome {
    match command {
        SliderCommand::Next => engine.next(),
        SliderCommand::Prev => engine.prev(),
        SliderCommand::GotoSlide { slide_number, counterwise, no_animation } => {
            engine.goto_slide(slide_number, counterwise, no_animation)
        }
        other => {
            debug!(?other, "command not supported by a linear slider");
            GotoOutcome::Ignored
        }
    }
}
