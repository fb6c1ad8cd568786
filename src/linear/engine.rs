use tracing::{debug, trace, warn};

use crate::config::{OptionsPatch, SliderOptions};
use crate::constants::*;
use crate::dom::{Axis, Document, InlineStyle, Node, NodeId, Selector};
use crate::easing::{Easing, Tween};
use crate::engine::Engine;
use crate::events::{Listener, Listeners, SliderEvent};
use crate::state::{GotoOutcome, Phase, SliderState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Next,
    Prev,
}

/// Slides to remove: by position, by selector, or by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideSelector {
    Index(usize),
    Matching(String),
    Handle(NodeId),
}

impl From<usize> for SlideSelector {
    fn from(index: usize) -> Self {
        SlideSelector::Index(index)
    }
}

impl From<&str> for SlideSelector {
    fn from(selector: &str) -> Self {
        SlideSelector::Matching(selector.to_string())
    }
}

impl From<NodeId> for SlideSelector {
    fn from(id: NodeId) -> Self {
        SlideSelector::Handle(id)
    }
}

/// The transition in flight. Taken exactly once when it ends.
#[derive(Debug)]
struct PendingTransition {
    id: u64,
    transition: Transition,
    outgoing: Option<NodeId>,
    incoming: NodeId,
    axis: Axis,
    tween: Tween,
}

/// Linear slider: one active slide out of an ordered sequence.
#[derive(Debug)]
pub struct Slider {
    doc: Document,
    options: SliderOptions,
    easing: Easing,

    list: Option<NodeId>,
    slides: Vec<NodeId>,
    next_handlers: Vec<NodeId>,
    prev_handlers: Vec<NodeId>,

    active_index: usize,
    is_vertical: bool,
    phase: Phase,
    initialized: bool,

    viewport: (f32, f32),
    pending: Option<PendingTransition>,
    transitions_started: u64,

    listeners: Listeners,
}

impl Slider {
    /// Attaches a slider to `doc`, running setup right away unless
    /// `autoinit` is off.
    pub fn new(doc: Document, options: &OptionsPatch) -> Self {
        let mut slider = Self::detached(doc, options);
        if slider.options.autoinit {
            slider.init();
        }
        slider
    }

    // Attaches without running setup, whatever `autoinit` says.
    pub(crate) fn detached(doc: Document, caller: &OptionsPatch) -> Self {
        let options = SliderOptions::resolve(caller, doc.root().attribute(OPTIONS_ATTRIBUTE));

        let container_selector = Selector::parse(&options.container_selector);
        let list_selector = Selector::parse(&options.list_selector);
        let list = doc
            .children_matching(doc.root().id(), &container_selector)
            .next()
            .and_then(|container| doc.children_matching(container.id(), &list_selector).next())
            .map(Node::id);
        if list.is_none() {
            warn!(
                container = %options.container_selector,
                list = %options.list_selector,
                "slider markup has no slide list, starting empty"
            );
        }

        let mut slider = Self {
            is_vertical: doc.root().has_class(CLASS_VERTICAL),
            easing: options.easing(),
            doc,
            options,
            list,
            slides: Vec::new(),
            next_handlers: Vec::new(),
            prev_handlers: Vec::new(),
            active_index: 0,
            phase: Phase::Idle,
            initialized: false,
            viewport: (1.0, 1.0),
            pending: None,
            transitions_started: 0,
            listeners: Listeners::default(),
        };
        slider.refresh_slides();
        slider
    }

    fn refresh_slides(&mut self) {
        let tag = Selector::parse(&self.options.slide_tag);
        let slides = self
            .list
            .map(|list| self.doc.children_matching(list, &tag).map(Node::id).collect())
            .unwrap_or_default();
        self.slides = slides;
    }

    // --- Setup ---

    /// Marks list and slides, picks the active slide and collects handlers.
    /// Returns false when already initialized.
    pub(crate) fn init_structure(&mut self) -> bool {
        if self.initialized {
            debug!("slider already initialized");
            return false;
        }
        self.initialized = true;

        if let Some(list) = self.list_node_mut() {
            list.add_class(CLASS_LIST);
        }
        for id in self.slides.clone() {
            if let Some(slide) = self.doc.node_mut(id) {
                slide.add_class(CLASS_SLIDE);
            }
        }

        let marked = self
            .slides
            .iter()
            .position(|id| self.doc.node(*id).is_some_and(|n| n.has_class(CLASS_CURRENT)));
        let requested = marked.unwrap_or(self.options.start_slide);
        self.active_index = requested.min(self.slides.len().saturating_sub(1));
        if requested != self.active_index {
            debug!(requested, active = self.active_index, "start slide out of range, clamped");
        }
        self.mark_current(self.active_index);

        let handler = Selector::parse(&format!(".{CLASS_HANDLER}"));
        let handlers: Vec<&Node> = self.doc.children_matching(self.doc.root().id(), &handler).collect();
        self.next_handlers = handlers.iter().filter(|h| h.has_class(CLASS_HANDLER_NEXT)).map(|h| h.id()).collect();
        self.prev_handlers = handlers.iter().filter(|h| h.has_class(CLASS_HANDLER_PREV)).map(|h| h.id()).collect();

        debug!(slides = self.slides.len(), active = self.active_index, "slider initialized");
        true
    }

    fn mark_current(&mut self, index: usize) {
        if let Some(slide) = self.slides.get(index).and_then(|id| self.doc.node_mut(*id)) {
            slide.add_class(CLASS_CURRENT);
        }
    }

    /// Moves the active slide without a transition. Used while setting up.
    pub(crate) fn set_active_index(&mut self, index: usize) {
        if index >= self.slides.len() || self.is_animating() {
            return;
        }
        if let Some(current) = self.slides.get(self.active_index).and_then(|id| self.doc.node_mut(*id)) {
            current.remove_class(CLASS_CURRENT);
        }
        self.active_index = index;
        self.mark_current(index);
    }

    // --- Transitions ---

    /// Starts a transition to `index`. Ignored while another transition runs,
    /// before setup, for an index out of range or for the active slide.
    pub(crate) fn start_transition(&mut self, index: usize, counterwise: bool, no_animation: bool) -> GotoOutcome {
        if self.is_animating() || !self.initialized || index >= self.slides.len() || index == self.active_index {
            debug!(
                index,
                active = self.active_index,
                phase = ?self.phase,
                initialized = self.initialized,
                "goto ignored"
            );
            return GotoOutcome::Ignored;
        }
        self.phase = Phase::Animating;

        let transition = Transition {
            from_index: self.active_index,
            to_index: index,
            counterwise,
            no_animation,
        };
        let outgoing = self.slides.get(self.active_index).copied();
        let incoming = self.slides[index];
        let id = self.transitions_started;
        self.transitions_started += 1;

        if let Some(outgoing) = outgoing {
            self.emit(SliderEvent::AnimationOutStart(outgoing));
        }
        self.emit(SliderEvent::AnimationInStart(incoming));
        self.emit(SliderEvent::AnimationStart(transition));

        let axis = Axis::from_vertical(self.is_vertical);
        let move_size = match axis {
            Axis::Horizontal => self.viewport.0,
            Axis::Vertical => self.viewport.1,
        };
        let (from, to) = if counterwise { (-move_size, 0.0) } else { (0.0, -move_size) };
        let pending = PendingTransition {
            id,
            transition,
            outgoing,
            incoming,
            axis,
            tween: Tween::new(self.easing, from, to, self.options.duration_secs()),
        };

        if no_animation {
            debug!(transition = id, from = transition.from_index, to = index, "jump without animation");
            return GotoOutcome::Completed(self.end_transition(pending));
        }

        if let Some(list) = self.list_node_mut() {
            list.toggle_class(CLASS_LIST_BEFORE, counterwise);
            list.style.set(axis, from);
        }
        if let Some(slide) = self.doc.node_mut(incoming) {
            slide.add_class(CLASS_NEXT);
        }

        debug!(
            transition = id,
            from = transition.from_index,
            to = index,
            counterwise,
            axis = axis.property(),
            "transition started"
        );
        self.pending = Some(pending);
        GotoOutcome::Started(transition)
    }

    /// Advances the transition in flight by `dt` seconds. Returns the
    /// transition once, on the frame it ends.
    pub(crate) fn advance(&mut self, dt: f32) -> Option<Transition> {
        let pending = self.pending.as_mut()?;
        let offset = pending.tween.apply(dt);
        let axis = pending.axis;
        let finished = pending.tween.finished();
        trace!(transition = pending.id, offset, "transition frame");

        if let Some(list) = self.list_node_mut() {
            list.style.set(axis, offset);
        }
        if !finished {
            return None;
        }

        let pending = self.pending.take()?;
        Some(self.end_transition(pending))
    }

    fn end_transition(&mut self, pending: PendingTransition) -> Transition {
        if let Some(outgoing) = pending.outgoing {
            if let Some(slide) = self.doc.node_mut(outgoing) {
                slide.remove_class(CLASS_CURRENT);
            }
            self.emit(SliderEvent::AnimationOutEnd(outgoing));
        }
        if let Some(slide) = self.doc.node_mut(pending.incoming) {
            slide.remove_class(CLASS_NEXT);
            slide.add_class(CLASS_CURRENT);
        }
        self.emit(SliderEvent::AnimationInEnd(pending.incoming));

        if let Some(list) = self.list_node_mut() {
            list.style.clear();
            list.remove_class(CLASS_LIST_BEFORE);
        }

        self.active_index = self.index_of(pending.incoming).unwrap_or(pending.transition.to_index);
        self.phase = Phase::Idle;
        debug!(transition = pending.id, active = self.active_index, "transition ended");
        pending.transition
    }

    pub(crate) fn linear_sibling(&self, reverse: bool) -> Option<usize> {
        let len = self.slides.len();
        if len == 0 {
            return None;
        }
        let active = self.active_index;
        let circular = self.options.circular;

        if reverse {
            if active > 0 {
                Some(active - 1)
            } else if circular {
                Some(len - 1)
            } else {
                None
            }
        } else if active + 1 < len {
            Some(active + 1)
        } else if circular {
            Some(0)
        } else {
            None
        }
    }

    // --- Slide list ---

    /// Inserts an empty slide before `position`, or appends. Keeps the
    /// active index on the same slide. Refused while a transition is in
    /// flight.
    pub(crate) fn insert_slide(&mut self, position: Option<usize>) -> Option<NodeId> {
        if self.is_animating() {
            debug!(?position, "cannot add a slide during a transition");
            return None;
        }
        let Some(list) = self.list else {
            warn!("cannot add a slide, slider markup has no slide list");
            return None;
        };

        let slide = self.doc.create_element(&self.options.slide_tag);
        slide.add_class(CLASS_SLIDE);
        let id = slide.id();

        let was_empty = self.slides.is_empty();
        let position = position.filter(|p| *p < self.slides.len());
        let anchor = position.map(|p| self.slides[p]);
        if !self.doc.insert_before(list, id, anchor) {
            self.doc.remove(id);
            return None;
        }
        match position {
            Some(at) => self.slides.insert(at, id),
            None => self.slides.push(id),
        }

        if self.initialized {
            if was_empty {
                self.active_index = 0;
                self.mark_current(0);
            } else if position.is_some_and(|p| p <= self.active_index) {
                self.active_index += 1;
            }
        }

        debug!(?position, slides = self.slides.len(), active = self.active_index, "slide added");
        Some(id)
    }

    /// Removes matching slides and returns how many went. Refused while a
    /// transition is in flight.
    pub(crate) fn delete_slides(&mut self, selector: &SlideSelector) -> usize {
        if self.is_animating() {
            debug!(?selector, "cannot remove slides during a transition");
            return 0;
        }

        let targets: Vec<NodeId> = match selector {
            SlideSelector::Index(index) => self.slides.get(*index).copied().into_iter().collect(),
            SlideSelector::Matching(raw) => {
                let selector = Selector::parse(raw);
                self.slides
                    .iter()
                    .copied()
                    .filter(|id| self.doc.node(*id).is_some_and(|n| selector.matches(n)))
                    .collect()
            }
            SlideSelector::Handle(id) => self.slides.iter().copied().filter(|s| s == id).collect(),
        };
        if targets.is_empty() {
            return 0;
        }

        let active = self.slides.get(self.active_index).copied();
        let removed_before = targets
            .iter()
            .filter(|id| self.index_of(**id).is_some_and(|i| i < self.active_index))
            .count();
        let active_removed = active.is_some_and(|a| targets.contains(&a));

        for id in &targets {
            self.doc.remove(*id);
        }
        self.slides.retain(|id| !targets.contains(id));

        self.active_index = (self.active_index - removed_before).min(self.slides.len().saturating_sub(1));
        if active_removed && self.initialized {
            self.mark_current(self.active_index);
        }

        debug!(removed = targets.len(), slides = self.slides.len(), active = self.active_index, "slides removed");
        targets.len()
    }

    pub(crate) fn mark_controls(&mut self, prev_enabled: bool, next_enabled: bool) {
        for id in self.prev_handlers.clone() {
            if let Some(handler) = self.doc.node_mut(id) {
                handler.toggle_class(CLASS_INACTIVE, !prev_enabled);
            }
        }
        for id in self.next_handlers.clone() {
            if let Some(handler) = self.doc.node_mut(id) {
                handler.toggle_class(CLASS_INACTIVE, !next_enabled);
            }
        }
    }

    pub(crate) fn reset_linear_controls(&mut self) {
        let circular = self.options.circular;
        let prev_enabled = circular || self.active_index > 0;
        let next_enabled = circular || self.active_index + 1 < self.slides.len();
        self.mark_controls(prev_enabled, next_enabled);
    }

    pub(crate) fn toggle_orientation(&mut self) {
        self.is_vertical = !self.is_vertical;
        self.doc.root_mut().toggle_class(CLASS_VERTICAL, self.is_vertical);
        debug!(vertical = self.is_vertical, "orientation switched");
    }

    pub(crate) fn emit(&mut self, event: SliderEvent) {
        self.listeners.emit(&event);
    }

    pub(crate) fn add_listener(&mut self, listener: Listener) {
        self.listeners.add(listener);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.doc.node_mut(id)
    }

    fn list_node(&self) -> Option<&Node> {
        self.list.and_then(|id| self.doc.node(id))
    }

    fn list_node_mut(&mut self) -> Option<&mut Node> {
        self.list.and_then(|id| self.doc.node_mut(id))
    }

    // --- Accessors ---

    pub fn state(&self) -> SliderState {
        SliderState {
            active_index: self.active_index,
            is_vertical: self.is_vertical,
            is_animating: self.is_animating(),
            is_circular: self.options.circular,
            slide_count: self.slides.len(),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn slide(&self, index: usize) -> Option<&Node> {
        self.slides.get(index).and_then(|id| self.doc.node(*id))
    }

    pub fn slide_id(&self, index: usize) -> Option<NodeId> {
        self.slides.get(index).copied()
    }

    pub fn slides(&self) -> impl Iterator<Item = &Node> {
        self.slides.iter().filter_map(|id| self.doc.node(*id))
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.slides.iter().position(|s| *s == id)
    }

    pub fn index_by_key(&self, key: &str) -> Option<usize> {
        self.slides
            .iter()
            .position(|id| self.doc.node(*id).is_some_and(|n| n.key() == Some(key)))
    }

    pub fn handler_kind(&self, id: NodeId) -> Option<HandlerKind> {
        if self.next_handlers.contains(&id) {
            Some(HandlerKind::Next)
        } else if self.prev_handlers.contains(&id) {
            Some(HandlerKind::Prev)
        } else {
            None
        }
    }

    /// Size of one slide, the distance the list moves per transition.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn list(&self) -> Option<&Node> {
        self.list_node()
    }

    /// Inline offset of the slide list; set only while a transition runs.
    pub fn list_style(&self) -> InlineStyle {
        self.list_node().map(|l| l.style).unwrap_or_default()
    }
}

impl Engine for Slider {
    fn slider(&self) -> &Slider {
        self
    }

    fn slider_mut(&mut self) -> &mut Slider {
        self
    }

    fn sibling_index(&self, reverse: bool) -> Option<usize> {
        self.linear_sibling(reverse)
    }
}
