mod common;

use common::{engine, piece};
use tracequiz::error::QuizError;
use tracequiz::trace_table::PieceId;
use tracequiz::gesture::{
    DropOutcome, GestureAdapter, GestureEvent, GestureOutcome, NoHitTest, Rect, SlotRegions,
};

fn regions() -> SlotRegions {
    SlotRegions::new()
        .with_slot("x", Rect::new(0.0, 0.0, 50.0, 20.0))
        .with_slot("y", Rect::new(60.0, 0.0, 50.0, 20.0))
}

fn touch(piece: &PieceId, x: f32, y: f32) -> GestureEvent {
    GestureEvent::TouchStart {
        piece: piece.clone(),
        x,
        y,
    }
}

#[test]
fn test_touch_drag_places_piece_under_finger() {
    let mut e = engine(3);
    let mut g = GestureAdapter::new(regions());
    let one = piece(&e, "x", "1");

    g.handle(touch(&one, 200.0, 200.0), &mut e).unwrap();
    let hover = g.handle(GestureEvent::TouchMove { x: 10.0, y: 5.0 }, &mut e).unwrap();
    assert_eq!(hover, GestureOutcome::Hover(Some("x".into())));
    assert_eq!(g.highlighted(), Some("x"));
    assert_eq!(g.follower(), Some((10.0, 5.0)));

    let out = g.handle(GestureEvent::TouchEnd { x: 12.0, y: 6.0 }, &mut e).unwrap();
    assert_eq!(
        out,
        GestureOutcome::Dropped {
            piece: one.clone(),
            outcome: DropOutcome::Placed { displaced: None }
        }
    );
    assert_eq!(e.placements().get("x"), Some(&one));
    assert!(!g.is_active());
    assert_eq!(g.follower(), None);
}

#[test]
fn test_touch_release_outside_slots_leaves_piece_in_pool() {
    let mut e = engine(3);
    let mut g = GestureAdapter::new(regions());
    let a = piece(&e, "y", "a");

    g.handle(touch(&a, 0.0, 100.0), &mut e).unwrap();
    let out = g.handle(GestureEvent::TouchEnd { x: 300.0, y: 300.0 }, &mut e).unwrap();

    assert_eq!(
        out,
        GestureOutcome::Dropped {
            piece: a.clone(),
            outcome: DropOutcome::Cancelled
        }
    );
    assert!(e.placements().is_empty());
    assert!(e.available().iter().any(|p| p.id == a));
}

#[test]
fn test_touch_drop_on_occupied_slot_swaps_back_old_piece() {
    let mut e = engine(8);
    let mut g = GestureAdapter::new(regions());
    let one = piece(&e, "x", "1");
    let two = piece(&e, "x", "2");

    for p in [&one, &two] {
        g.handle(touch(p, 0.0, 100.0), &mut e).unwrap();
        g.handle(GestureEvent::TouchMove { x: 20.0, y: 10.0 }, &mut e).unwrap();
        g.handle(GestureEvent::TouchEnd { x: 20.0, y: 10.0 }, &mut e).unwrap();
    }

    assert_eq!(e.placements().get("x"), Some(&two));
    let model = e.render();
    assert!(model.available.iter().any(|p| p.id == one));
    assert!(!model.available.iter().any(|p| p.id == two));
    assert_eq!(model.available.len() + 1, e.pool().len());
}

#[test]
fn test_pointer_drag_end_without_drop_cancels() {
    let mut e = engine(1);
    let mut g = GestureAdapter::new(NoHitTest);
    let one = piece(&e, "x", "1");

    g.handle(GestureEvent::DragStart { piece: one.clone() }, &mut e).unwrap();
    g.handle(GestureEvent::DragOver { slot: Some("y".into()) }, &mut e).unwrap();
    g.handle(GestureEvent::DragOver { slot: None }, &mut e).unwrap();
    assert_eq!(g.highlighted(), None);

    let out = g.handle(GestureEvent::DragEnd, &mut e).unwrap();
    assert_eq!(
        out,
        GestureOutcome::Dropped {
            piece: one,
            outcome: DropOutcome::Cancelled
        }
    );
    assert!(e.placements().is_empty());
}

#[test]
fn test_second_start_is_ignored_while_dragging() {
    let mut e = engine(1);
    let mut g = GestureAdapter::new(regions());
    let one = piece(&e, "x", "1");
    let a = piece(&e, "y", "a");

    g.handle(GestureEvent::DragStart { piece: one.clone() }, &mut e).unwrap();
    let second = g.handle(touch(&a, 70.0, 5.0), &mut e).unwrap();
    assert_eq!(second, GestureOutcome::Ignored);
    // Touch events do not drive a pointer gesture.
    let stray = g
        .handle(GestureEvent::TouchEnd { x: 70.0, y: 5.0 }, &mut e)
        .unwrap();
    assert_eq!(stray, GestureOutcome::Ignored);
    assert_eq!(g.active_piece(), Some(&one));

    g.handle(GestureEvent::Drop { slot: "x".into() }, &mut e).unwrap();
    assert_eq!(e.placements().get("x"), Some(&one));
    assert_eq!(e.placements().len(), 1);
}

#[test]
fn test_drop_after_row_is_locked_is_refused() {
    let mut e = engine(5);
    let one = piece(&e, "x", "1");
    let a = piece(&e, "y", "a");
    e.place("x", &one).unwrap();
    e.place("y", &a).unwrap();
    e.confirm().unwrap();

    let mut g = GestureAdapter::new(NoHitTest);
    let spare = piece(&e, "x", "2");
    g.handle(GestureEvent::DragStart { piece: spare }, &mut e).unwrap();
    let err = g.handle(GestureEvent::Drop { slot: "x".into() }, &mut e).unwrap_err();

    assert!(matches!(err, QuizError::Locked));
    assert!(!g.is_active());
    assert_eq!(e.placements().get("x"), Some(&one));
}
