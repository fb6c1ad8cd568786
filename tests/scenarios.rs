use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use slider::constants::*;
use slider::{
    Engine, GotoOutcome, GridCell, GridSlider, Markup, OptionsPatch, Phase, Slider, SliderCommand, SliderEvent,
};

fn record<E: Engine>(engine: &mut E) -> Rc<RefCell<Vec<SliderEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.on(move |e| sink.borrow_mut().push(*e));
    log
}

fn linear(count: usize, options: OptionsPatch) -> Slider {
    Slider::new(Markup::new().anonymous_slides(count).build(), &options)
}

fn transitions(log: &[SliderEvent]) -> Vec<SliderEvent> {
    log.iter()
        .copied()
        .filter(|e| matches!(e, SliderEvent::AnimationStart(_) | SliderEvent::AnimationEnd(_)))
        .collect()
}

#[test]
fn test_next_on_two_slides_then_boundary() {
    let mut slider = linear(2, OptionsPatch::default());
    let log = record(&mut slider);

    slider.next();
    while slider.state().is_animating {
        slider.update(1.0 / 60.0);
    }

    let pair = transitions(&log.borrow());
    assert_eq!(pair.len(), 2);
    match (pair[0], pair[1]) {
        (SliderEvent::AnimationStart(start), SliderEvent::AnimationEnd(end)) => {
            assert_eq!(start, end);
            assert_eq!(end.from_index, 0);
            assert_eq!(end.to_index, 1);
        }
        other => panic!("unexpected events {other:?}"),
    }

    log.borrow_mut().clear();
    assert!(slider.next().is_ignored());
    assert!(slider.update(1.0).is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_every_valid_index_is_reachable() {
    for target in 1..5 {
        let mut slider = linear(5, OptionsPatch::default());
        let outcome = slider.goto_slide(target, false, false);
        assert!(matches!(outcome, GotoOutcome::Started(_)));
        assert!(slider.state().is_animating);

        let ended = slider.update(1.0).unwrap();
        assert_eq!(ended.to_index, target);
        assert_eq!(slider.state().active_index, target);
        assert!(!slider.state().is_animating);
    }
}

#[test]
fn test_circular_wraps_both_ends() {
    let mut slider = linear(3, OptionsPatch { circular: Some(true), ..Default::default() });

    assert_eq!(slider.prev().transition().map(|t| t.to_index), Some(2));
    slider.update(1.0);
    assert_eq!(slider.next().transition().map(|t| t.to_index), Some(0));
    slider.update(1.0);
    assert_eq!(slider.state().active_index, 0);
}

#[test]
fn test_non_circular_bounds_are_no_ops() {
    let mut slider = linear(3, OptionsPatch::default());
    let log = record(&mut slider);

    assert!(slider.prev().is_ignored());
    slider.goto_slide(2, false, true);
    log.borrow_mut().clear();
    assert!(slider.next().is_ignored());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_add_and_remove_change_count() {
    let mut slider = linear(2, OptionsPatch::default());

    let added = slider.add_slide(None).unwrap();
    assert_eq!(slider.slide_count(), 3);
    assert_eq!(slider.slider().index_of(added), Some(2));

    let mut pair = linear(2, OptionsPatch::default());
    assert_eq!(pair.remove_slide(0usize), 1);
    assert_eq!(pair.slide_count(), 1);
    let list = pair.slider().list().unwrap();
    assert_eq!(list.children().len(), 1);
}

#[test]
fn test_orientation_pair_restores_state() {
    let mut slider = linear(2, OptionsPatch::default());
    let before = slider.state().is_vertical;

    slider.switch_orientation();
    assert_ne!(slider.state().is_vertical, before);
    assert!(slider.slider().document().root().has_class(CLASS_VERTICAL));

    slider.switch_orientation();
    assert_eq!(slider.state().is_vertical, before);
    assert!(!slider.slider().document().root().has_class(CLASS_VERTICAL));
}

#[test]
fn test_grid_right_right_up() {
    let options = OptionsPatch {
        horizontal_circular: Some(true),
        vertical_circular: Some(false),
        grid: Some(vec![
            vec![Some("a".into()), Some("b".into())],
            vec![Some("c".into()), Some("d".into())],
        ]),
        ..Default::default()
    };
    let mut grid = GridSlider::new(Markup::new().slides(["a", "b", "c", "d"]).build(), &options);
    let key = |grid: &GridSlider| {
        grid.slider()
            .slide(grid.state().active_index)
            .and_then(|s| s.key())
            .map(str::to_string)
    };
    assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));

    grid.right();
    grid.update(1.0);
    assert_eq!(key(&grid).as_deref(), Some("c"));
    assert_eq!(grid.active_cell(), Some(GridCell::new(1, 0)));

    grid.right();
    grid.update(1.0);
    assert_eq!(key(&grid).as_deref(), Some("a"));
    assert_eq!(grid.active_cell(), Some(GridCell::new(0, 0)));

    let log = record(&mut grid);
    assert!(grid.up().is_ignored());
    assert_eq!(key(&grid).as_deref(), Some("a"));
    assert!(transitions(&log.borrow()).is_empty());
}

#[test]
fn test_grid_cell_matches_active_slide_at_animationend() {
    let options = OptionsPatch {
        grid: Some(vec![vec![Some("a".into())], vec![Some("b".into())]]),
        ..Default::default()
    };
    let mut grid = GridSlider::new(Markup::new().build(), &options);
    grid.right();
    grid.update(1.0);
    assert_eq!(grid.active_cell(), Some(GridCell::new(1, 0)));
    assert_eq!(
        grid.slider().slide(grid.state().active_index).and_then(|s| s.cell),
        grid.active_cell()
    );
}

#[test]
fn test_command_stream_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let options = OptionsPatch {
        grid: Some(vec![
            vec![Some("a".into()), Some("b".into()), Some("c".into())],
            vec![Some("d".into()), None, Some("f".into())],
            vec![Some("g".into())],
        ]),
        ..Default::default()
    };
    // "x" stays off the grid.
    let mut grid = GridSlider::new(Markup::new().slides(["x"]).handlers().build(), &options);
    let keys = ["a", "b", "c", "d", "f", "g", "x", "zz"];

    for _ in 0..500 {
        let command = match rng.random_range(0..8) {
            0 => SliderCommand::Up { slide: None },
            1 => SliderCommand::Down { slide: None },
            2 => SliderCommand::Left { slide: None },
            3 => SliderCommand::Right { slide: None },
            4 => SliderCommand::Next,
            5 => SliderCommand::GotoHistory { slide_id: keys[rng.random_range(0..keys.len())].into() },
            6 => SliderCommand::GotoId { slide_id: keys[rng.random_range(0..keys.len())].into() },
            _ => SliderCommand::GotoSlide {
                slide_number: rng.random_range(0..8),
                counterwise: rng.random_bool(0.5),
                no_animation: rng.random_bool(0.2),
            },
        };
        grid.dispatch(command);
        grid.update(rng.random_range(0.0..0.4));

        let state = grid.state();
        assert!(state.active_index < state.slide_count);
        assert_eq!(grid.slider().phase() == Phase::Animating, state.is_animating);
        if !state.is_animating {
            assert_eq!(
                grid.slider().slide(state.active_index).and_then(|s| s.cell),
                grid.active_cell()
            );
            let current = grid.slider().slides().filter(|s| s.has_class(CLASS_CURRENT)).count();
            assert_eq!(current, 1);
        }
    }
}
