//! Integration test: a painting session driven through the pointer interface.
//!
//! Exercises the preview, the commit protocol and the committed blueprint
//! together, the way a host application would: pointer events in, editor
//! events out.

use gridpaint_core::direction::Direction;
use gridpaint_core::geometry::{GridPosition, Vector};
use gridpaint_core::test_utils::*;
use gridpaint_editor::{
    CommitOutcome, EditorConfig, EditorContext, EditorEvent, EditorEventKind, PlacementPreview,
    PointerButton, PointerTarget,
};
use gridpaint_spatial::{Blueprint, EditableArea};
use std::cell::RefCell;
use std::rc::Rc;

fn small_ctx() -> EditorContext {
    let config = EditorConfig {
        area: EditableArea::new(GridPosition::new(0, 0), GridPosition::new(9, 9)),
        ..EditorConfig::default()
    };
    EditorContext::new(fixture_registry(), config)
}

fn cell(x: i32, y: i32) -> Vector {
    Vector::new(x as f64 * 32.0 + 16.0, y as f64 * 32.0 + 16.0)
}

fn start(ctx: &mut EditorContext, name: &str, direction: Direction) -> PlacementPreview {
    let preview =
        PlacementPreview::new(ctx, name, direction, GridPosition::new(0, 0).to_pixels()).unwrap();
    ctx.events.clear_all();
    preview
}

/// Place a 1x1 entity at (2, 3), then rotate the preview over it: the
/// same-entity rule keeps it buildable, and committing turns the entity.
#[test]
fn place_then_rotate_in_place() {
    let mut ctx = small_ctx();
    let mut preview = start(&mut ctx, BELT, Direction::North);

    preview.on_move(&mut ctx, cell(2, 3));
    preview.on_pointer_down(&mut ctx, PointerButton::Left);
    preview.on_pointer_up(&mut ctx, PointerButton::Left);

    let id = ctx.blueprint.entity_at(GridPosition::new(2, 3)).unwrap();
    assert_eq!(ctx.blueprint.len(), 1);
    assert_eq!(ctx.blueprint.entity(id).unwrap().direction, Direction::North);
    assert!(!preview.is_buildable());

    preview.rotate(&mut ctx);
    assert!(preview.is_buildable());

    assert_eq!(preview.commit(&mut ctx), CommitOutcome::Rotated(id));
    assert_eq!(ctx.blueprint.entity(id).unwrap().direction, Direction::East);
    assert_eq!(ctx.blueprint.len(), 1);
}

/// Painting a 180 degree turn over an existing belt only changes its
/// direction.
#[test]
fn half_turn_changes_only_direction() {
    let mut ctx = small_ctx();
    let id = ctx
        .blueprint
        .create_entity(BELT, GridPosition::new(5, 5), Direction::East, None)
        .unwrap();
    let before = ctx.blueprint.entity(id).unwrap().clone();

    let mut preview = start(&mut ctx, BELT, Direction::West);
    preview.on_move(&mut ctx, cell(5, 5));
    preview.on_pointer_down(&mut ctx, PointerButton::Left);

    let after = ctx.blueprint.entity(id).unwrap();
    assert_eq!(after.direction, Direction::West);
    assert_eq!(after.name, before.name);
    assert_eq!(after.position, before.position);
    assert_eq!(ctx.blueprint.len(), 1);
}

/// Upgrading a belt line in one drag keeps every entity id.
#[test]
fn drag_upgrade_keeps_identity() {
    let mut ctx = small_ctx();
    let ids: Vec<_> = (0..5)
        .map(|x| {
            ctx.blueprint
                .create_entity(BELT, GridPosition::new(x, 2), Direction::East, None)
                .unwrap()
        })
        .collect();

    let mut preview = start(&mut ctx, FAST_BELT, Direction::East);
    preview.on_move(&mut ctx, cell(0, 2));
    preview.on_pointer_down(&mut ctx, PointerButton::Left);
    for x in 1..5 {
        preview.on_move(&mut ctx, cell(x, 2));
    }
    preview.on_pointer_up(&mut ctx, PointerButton::Left);

    assert_eq!(ctx.blueprint.len(), 5);
    for (x, id) in ids.iter().enumerate() {
        let entity = ctx.blueprint.entity(*id).unwrap();
        assert_eq!(entity.name, FAST_BELT);
        assert_eq!(entity.position, GridPosition::new(x as i32, 2));
    }

    let changed = ctx
        .events
        .drain()
        .into_iter()
        .filter(|e| e.kind() == EditorEventKind::EntityChanged)
        .count();
    assert_eq!(changed, 5);
}

/// Clicking with a footprint hanging over the area edge never touches the
/// grid or emits entity events.
#[test]
fn out_of_area_click_is_inert() {
    let mut ctx = small_ctx();
    let mut preview = start(&mut ctx, ASSEMBLER, Direction::North);
    // Centred on (9, 9) the 3x3 covers 8..=10.
    preview.on_move(&mut ctx, cell(9, 9));
    assert!(!preview.is_buildable());
    ctx.events.clear_all();

    preview.on_pointer_down(&mut ctx, PointerButton::Left);
    assert!(ctx.blueprint.is_empty());
    assert_eq!(ctx.blueprint.index().tile_count(), 0);
    assert!(ctx.events.pending().is_empty());
}

/// Rotating a prototype without rotations changes nothing at all.
#[test]
fn rotating_a_chest_is_a_noop() {
    let mut ctx = small_ctx();
    let mut preview = start(&mut ctx, CHEST, Direction::North);
    preview.on_move(&mut ctx, cell(4, 4));
    let position = preview.position();

    preview.rotate(&mut ctx);
    assert_eq!(preview.direction(), Direction::North);
    assert_eq!(preview.position(), position);
}

/// Right-drag erases, and listeners hear about every removal.
#[test]
fn right_drag_erases_with_listener() {
    let mut ctx = small_ctx();
    for x in 0..4 {
        ctx.blueprint
            .create_entity(CHEST, GridPosition::new(x, 0), Direction::North, None)
            .unwrap();
    }

    let removed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&removed);
    ctx.events.on_passive(
        EditorEventKind::EntityRemoved,
        Box::new(move |event| {
            if let EditorEvent::EntityRemoved { position, .. } = event {
                sink.borrow_mut().push(*position);
            }
        }),
    );

    let mut preview = start(&mut ctx, CHEST, Direction::North);
    preview.on_pointer_down(&mut ctx, PointerButton::Right);
    for x in 1..4 {
        preview.on_move(&mut ctx, cell(x, 0));
    }
    preview.on_pointer_down(&mut ctx, PointerButton::Right);
    ctx.events.deliver();

    assert!(ctx.blueprint.is_empty());
    assert_eq!(
        *removed.borrow(),
        (0..4).map(|x| GridPosition::new(x, 0)).collect::<Vec<_>>()
    );
}

/// A session's result survives a save/load round trip.
#[test]
fn session_saves_and_loads() {
    let mut ctx = small_ctx();
    let mut preview = start(&mut ctx, BOILER, Direction::North);
    preview.on_move(&mut ctx, cell(2, 2));
    preview.rotate(&mut ctx);
    assert!(matches!(preview.commit(&mut ctx), CommitOutcome::Created(_)));
    preview.cancel(&mut ctx);

    let path = std::env::temp_dir().join(format!(
        "gridpaint_session_{}.json",
        std::process::id()
    ));
    ctx.blueprint.save_to_file(&path).unwrap();
    let loaded =
        Blueprint::load_from_file(&path, fixture_registry(), ctx.blueprint.area()).unwrap();
    assert_eq!(loaded.snapshot(), ctx.blueprint.snapshot());

    let _ = std::fs::remove_file(&path);
}
