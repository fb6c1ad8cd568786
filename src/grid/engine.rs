use std::collections::HashMap;

use tracing::{debug, warn};

use crate::commands::{SlideTarget, SliderCommand};
use crate::config::OptionsPatch;
use crate::dom::{Document, GridCell, NodeId};
use crate::engine::{Engine, dispatch_linear};
use crate::grid::layout::{Grid, Wrap};
use crate::linear::{HandlerKind, Slider};
use crate::state::{GotoOutcome, Transition};

/// Grid navigation on top of a linear [`Slider`].
///
/// Slides are stamped with the cell they occupy; up/down move within the
/// active column, left/right within the active row.
#[derive(Debug)]
pub struct GridSlider {
    slider: Slider,
    grid: Grid,
    wrap: Wrap,
    active_cell: Option<GridCell>,
}

impl GridSlider {
    pub fn new(doc: Document, options: &OptionsPatch) -> Self {
        let slider = Slider::detached(doc, options);
        let resolved = slider.options();
        let grid = Grid::new(resolved.grid.clone());
        let wrap = Wrap {
            horizontal: resolved.horizontal_circular,
            vertical: resolved.vertical_circular,
        };
        let autoinit = resolved.autoinit;

        let mut grid_slider = Self {
            slider,
            grid,
            wrap,
            active_cell: None,
        };
        if autoinit {
            grid_slider.init();
        }
        grid_slider
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell of the active slide, `None` while the active slide is off the grid.
    pub fn active_cell(&self) -> Option<GridCell> {
        self.active_cell
    }

    pub fn up(&mut self) -> GotoOutcome {
        self.move_along(true, true, None)
    }

    pub fn down(&mut self) -> GotoOutcome {
        self.move_along(true, false, None)
    }

    pub fn left(&mut self) -> GotoOutcome {
        self.move_along(false, true, None)
    }

    pub fn right(&mut self) -> GotoOutcome {
        self.move_along(false, false, None)
    }

    fn move_along(&mut self, vertical: bool, reverse: bool, target: Option<SlideTarget>) -> GotoOutcome {
        self.force_orientation(vertical);
        self.goto_direction(target, reverse)
    }

    fn force_orientation(&mut self, vertical: bool) {
        if self.slider.is_vertical() != vertical {
            self.switch_orientation();
        }
    }

    /// Goes to `target` in the current orientation, or to the neighbouring
    /// cell when no target is given.
    pub fn goto_direction(&mut self, target: Option<SlideTarget>, reverse: bool) -> GotoOutcome {
        match target {
            Some(SlideTarget::Index(index)) => self.goto_slide(index, reverse, false),
            Some(SlideTarget::Key(key)) => self.goto_id(&key, reverse),
            None if reverse => self.prev(),
            None => self.next(),
        }
    }

    pub fn goto_id(&mut self, key: &str, reverse: bool) -> GotoOutcome {
        match self.slider.index_by_key(key) {
            Some(index) => self.goto_slide(index, reverse, false),
            None => {
                debug!(key, "no slide with this key");
                GotoOutcome::Ignored
            }
        }
    }

    /// Goes to the slide `key`, picking axis and direction from where it
    /// sits relative to the active cell.
    pub fn goto_history(&mut self, key: &str) -> GotoOutcome {
        let Some(index) = self.slider.index_by_key(key) else {
            debug!(key, "no slide with this key");
            return GotoOutcome::Ignored;
        };

        let from = self.slider.slide(self.slider.active_index()).and_then(|s| s.cell);
        let to = self.slider.slide(index).and_then(|s| s.cell);
        let (Some(from), Some(to)) = (from, to) else {
            return self.goto_slide(index, false, false);
        };
        let Some(movement) = self.grid.history_move(from, to, self.wrap) else {
            return GotoOutcome::Ignored;
        };

        self.force_orientation(movement.vertical);
        self.goto_slide(index, movement.counterwise, false)
    }

    pub fn neighbor_index(&self, reverse: bool, vertical: bool) -> Option<usize> {
        let cell = self.grid.neighbor(self.active_cell?, reverse, vertical, self.wrap)?;
        let key = self.grid.key(cell)?;
        self.slider.index_by_key(key)
    }

    fn sync_active_cell(&mut self) {
        self.active_cell = self.slider.slide(self.slider.active_index()).and_then(|s| s.cell);
    }

    // Creates the slides the grid references but the markup lacks, stamps
    // every slide with its cell and anchors the active slide on the grid.
    fn setup_slides(&mut self) {
        let cells: Vec<(GridCell, String)> = self.grid.cells().map(|(cell, key)| (cell, key.to_string())).collect();
        let mut keyed: HashMap<String, NodeId> = HashMap::new();
        for slide in self.slider.slides() {
            if let Some(key) = slide.key() {
                keyed.entry(key.to_string()).or_insert(slide.id());
            }
        }

        for (cell, key) in cells {
            let id = match keyed.get(&key) {
                Some(id) => Some(*id),
                None => {
                    let created = self.slider.insert_slide(None);
                    if let Some(id) = created {
                        keyed.insert(key.clone(), id);
                    }
                    created
                }
            };
            let Some(slide) = id.and_then(|id| self.slider.node_mut(id)) else {
                warn!(key = %key, "cannot place grid slide, markup has no slide list");
                continue;
            };
            slide.set_key(key);
            slide.cell = Some(cell);
        }

        let anchored = self.slider.slide(self.slider.active_index()).is_some_and(|s| s.cell.is_some());
        if !anchored {
            let first = self.grid.cells().find_map(|(_, key)| self.slider.index_by_key(key));
            if let Some(index) = first {
                debug!(index, "active slide is off the grid, anchoring on the first cell");
                self.slider.set_active_index(index);
            }
        }
        self.sync_active_cell();
    }
}

impl Engine for GridSlider {
    fn slider(&self) -> &Slider {
        &self.slider
    }

    fn slider_mut(&mut self) -> &mut Slider {
        &mut self.slider
    }

    fn sibling_index(&self, reverse: bool) -> Option<usize> {
        self.neighbor_index(reverse, self.slider.is_vertical())
    }

    fn reset_controls(&mut self) {
        let prev_enabled = self.neighbor_index(true, false).is_some();
        let next_enabled = self.neighbor_index(false, false).is_some();
        self.slider.mark_controls(prev_enabled, next_enabled);
    }

    fn on_init(&mut self) {
        self.setup_slides();
    }

    fn on_transition_end(&mut self, _transition: &Transition) {
        self.sync_active_cell();
    }

    fn on_slides_changed(&mut self) {
        self.sync_active_cell();
    }

    fn handler_command(&self, kind: HandlerKind) -> SliderCommand {
        match kind {
            HandlerKind::Next => SliderCommand::Right { slide: None },
            HandlerKind::Prev => SliderCommand::Left { slide: None },
        }
    }

    fn dispatch(&mut self, command: SliderCommand) -> GotoOutcome {
        match command {
            SliderCommand::Up { slide } => self.move_along(true, true, slide),
            SliderCommand::Down { slide } => self.move_along(true, false, slide),
            SliderCommand::Left { slide } => self.move_along(false, true, slide),
            SliderCommand::Right { slide } => self.move_along(false, false, slide),
            SliderCommand::GotoId { slide_id } => self.goto_id(&slide_id, false),
            SliderCommand::GotoHistory { slide_id } => self.goto_history(&slide_id),
            other => dispatch_linear(self, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::dom::Markup;

    fn options(columns: &[&[&str]]) -> OptionsPatch {
        OptionsPatch {
            grid: Some(
                columns
                    .iter()
                    .map(|c| c.iter().map(|k| Some(k.to_string())).collect())
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn settle(grid: &mut GridSlider) {
        grid.update(10.0);
    }

    fn active_key(grid: &GridSlider) -> Option<String> {
        grid.slider().slide(grid.slider().active_index()).and_then(|s| s.key()).map(str::to_string)
    }

    #[test]
    fn test_setup_creates_missing_slides() {
        let doc = Markup::new().slides(["b"]).build();
        let grid = GridSlider::new(doc, &options(&[&["a", "b"], &["c", "d"]]));

        assert_eq!(grid.slide_count(), 4);
        assert_eq!(grid.slider().slide(0).and_then(|s| s.cell), Some(GridCell::new(0, 1)));
        // "b" was in the markup and keeps position 0; it is on the grid, so it stays active.
        assert_eq!(active_key(&grid).as_deref(), Some("b"));
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 1)));
        assert!(grid.slider().slides().all(|s| s.cell.is_some() && s.has_class(CLASS_SLIDE)));
    }

    #[test]
    fn test_off_grid_start_is_anchored() {
        let doc = Markup::new().slides(["x"]).build();
        let grid = GridSlider::new(doc, &options(&[&["a"], &["c"]]));

        assert_eq!(active_key(&grid).as_deref(), Some("a"));
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));
        assert!(!grid.slider().slide(0).unwrap().has_class(CLASS_CURRENT));
    }

    #[test]
    fn test_directional_moves() {
        let mut grid = GridSlider::new(Markup::new().build(), &options(&[&["a", "b"], &["c", "d"]]));
        assert_eq!(active_key(&grid).as_deref(), Some("a"));

        assert!(!grid.down().is_ignored());
        assert!(grid.slider().is_vertical());
        settle(&mut grid);
        assert_eq!(active_key(&grid).as_deref(), Some("b"));
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 1)));

        let moved = grid.right();
        assert!(!grid.slider().is_vertical());
        assert_eq!(moved.transition().map(|t| t.counterwise), Some(false));
        settle(&mut grid);
        assert_eq!(active_key(&grid).as_deref(), Some("d"));

        assert!(grid.down().is_ignored());
        let moved = grid.up();
        assert_eq!(moved.transition().map(|t| t.counterwise), Some(true));
        settle(&mut grid);
        assert_eq!(active_key(&grid).as_deref(), Some("c"));
    }

    #[test]
    fn test_goto_direction_targets() {
        let mut grid = GridSlider::new(Markup::new().build(), &options(&[&["a", "b"], &["c", "d"]]));

        assert!(grid.goto_direction(Some("missing".into()), false).is_ignored());
        let moved = grid.goto_direction(Some("d".into()), true);
        assert_eq!(moved.transition().map(|t| (t.to_index, t.counterwise)), Some((3, true)));
        settle(&mut grid);
        assert_eq!(grid.active_cell(), Some(GridCell::new(1, 1)));

        grid.goto_direction(Some(SlideTarget::Index(0)), false);
        settle(&mut grid);
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));
    }

    #[test]
    fn test_goto_history_infers_axis() {
        let mut grid = GridSlider::new(
            Markup::new().build(),
            &options(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"]]),
        );

        let moved = grid.goto_history("g");
        assert!(!grid.slider().is_vertical());
        assert_eq!(moved.transition().map(|t| t.counterwise), Some(true));
        settle(&mut grid);

        let moved = grid.goto_history("i");
        assert!(grid.slider().is_vertical());
        assert_eq!(moved.transition().map(|t| t.counterwise), Some(false));
        settle(&mut grid);
        assert_eq!(grid.active_cell(), Some(GridCell::new(2, 2)));

        assert!(grid.goto_history("i").is_ignored());
        assert!(grid.goto_history("nope").is_ignored());
    }

    #[test]
    fn test_grid_commands_and_handlers() {
        let doc = Markup::new().handlers().build();
        let patch = OptionsPatch {
            horizontal_circular: Some(false),
            ..options(&[&["a"], &["b"]])
        };
        let mut grid = GridSlider::new(doc, &patch);

        let next = grid.slider().document().root().children()[1];
        let prev = grid.slider().document().root().children()[2];
        assert!(grid.slider().document().node(prev).unwrap().has_class(CLASS_INACTIVE));

        assert!(!grid.click(next).is_ignored());
        settle(&mut grid);
        assert_eq!(active_key(&grid).as_deref(), Some("b"));
        let next_node = grid.slider().document().node(next).unwrap();
        assert!(next_node.has_class(CLASS_INACTIVE));

        assert!(!grid.dispatch(SliderCommand::GotoId { slide_id: "a".into() }).is_ignored());
        settle(&mut grid);
        assert!(grid.dispatch(SliderCommand::Up { slide: None }).is_ignored());
        assert!(!grid.dispatch(SliderCommand::Right { slide: None }).is_ignored());
    }

    #[test]
    fn test_off_grid_active_slide_has_no_neighbours() {
        let doc = Markup::new().slides(["x"]).handlers().build();
        let mut grid = GridSlider::new(doc, &options(&[&["a"], &["c"]]));
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));

        let jumped = grid.dispatch(SliderCommand::GotoSlide { slide_number: 0, counterwise: false, no_animation: true });
        assert!(matches!(jumped, GotoOutcome::Completed(_)));
        assert_eq!(active_key(&grid).as_deref(), Some("x"));
        assert_eq!(grid.active_cell(), None);

        assert!(grid.right().is_ignored());
        assert!(grid.left().is_ignored());
        assert!(grid.up().is_ignored());
        assert!(grid.down().is_ignored());
        assert_eq!(active_key(&grid).as_deref(), Some("x"));

        let next = grid.slider().document().root().children()[1];
        assert!(grid.slider().document().node(next).unwrap().has_class(CLASS_INACTIVE));

        // Going back by key puts the grid cell back in sync.
        grid.goto_id("c", false);
        settle(&mut grid);
        assert_eq!(grid.active_cell(), Some(GridCell::new(1, 0)));
    }

    #[test]
    fn test_removed_grid_slide_is_no_target() {
        let mut grid = GridSlider::new(Markup::new().build(), &options(&[&["a"], &["b"], &["c"]]));
        assert_eq!(grid.remove_slide("#b"), 1);
        assert!(grid.right().is_ignored());
        assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));
    }
}
