//! Committing a placement preview into the blueprint.
//!
//! The first applicable rule wins:
//!
//! 1. a footprint outside the editable area places nothing;
//! 2. an entity of the same fast-replace group on the same cells is swapped
//!    to the preview's prototype, keeping its identity;
//! 3. an entity of the same prototype sharing the centre is turned to the
//!    preview's direction;
//! 4. otherwise a new entity is created, which fails on overlap.
//!
//! Validity is always re-derived from the grid; the preview's cached
//! buildable flag is only used for rendering.

use crate::context::EditorContext;
use crate::event::EditorEvent;
use crate::preview::PlacementPreview;
use gridpaint_core::direction::DirectionType;
use gridpaint_core::id::EntityId;
use tracing::debug;

/// What a commit did to the blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The footprint leaves the editable area. Nothing changed.
    OutOfArea,
    /// An existing entity was swapped to the preview's prototype.
    FastReplaced(EntityId),
    /// An existing entity of the same prototype was turned.
    Rotated(EntityId),
    Created(EntityId),
    /// The cells are taken or the blueprint refused the change. Nothing
    /// changed.
    Blocked,
}

impl CommitOutcome {
    /// The entity that was created or modified, if any.
    pub fn entity(self) -> Option<EntityId> {
        match self {
            CommitOutcome::FastReplaced(id)
            | CommitOutcome::Rotated(id)
            | CommitOutcome::Created(id) => Some(id),
            CommitOutcome::OutOfArea | CommitOutcome::Blocked => None,
        }
    }
}

/// Place `preview` into `ctx.blueprint` and re-check its buildability.
pub fn commit_placement(preview: &mut PlacementPreview, ctx: &mut EditorContext) -> CommitOutcome {
    let outcome = place(preview, ctx);
    debug!(
        name = preview.name(),
        position = ?preview.grid_position(),
        direction = %preview.direction(),
        ?outcome,
        "commit"
    );
    preview.check_buildable(ctx);
    outcome
}

fn redraw_entity(ctx: &mut EditorContext, id: EntityId) {
    ctx.events.emit(EditorEvent::EntityChanged { entity: id });
    let entities = ctx.blueprint.surrounding_entities(id);
    ctx.events.emit(EditorEvent::NeighborsRedrawn { entities });
}

fn place(preview: &mut PlacementPreview, ctx: &mut EditorContext) -> CommitOutcome {
    let origin = preview.grid_position();
    let direction = preview.direction();

    if !ctx.blueprint.is_inside_area(origin, preview.footprint()) {
        return CommitOutcome::OutOfArea;
    }

    if let Some(id) = ctx
        .blueprint
        .check_fast_replaceable_group(preview.name(), direction, origin)
    {
        return match ctx.blueprint.change(id, preview.name(), direction) {
            Ok(()) => {
                redraw_entity(ctx, id);
                CommitOutcome::FastReplaced(id)
            }
            Err(e) => {
                debug!(error = %e, "fast replace refused");
                CommitOutcome::Blocked
            }
        };
    }

    if let Some(id) = ctx
        .blueprint
        .check_same_entity_and_different_direction(preview.name(), direction, origin)
    {
        return match ctx.blueprint.set_direction(id, direction) {
            Ok(()) => {
                redraw_entity(ctx, id);
                CommitOutcome::Rotated(id)
            }
            Err(e) => {
                debug!(error = %e, "rotation refused");
                CommitOutcome::Blocked
            }
        };
    }

    // An output end is stored facing the way the belt runs, which is the
    // reciprocal of the preview's direction.
    let (placed_direction, placed_type) = if preview.prototype().is_paired() {
        let direction_type = preview.direction_type();
        let placed = match direction_type {
            DirectionType::Output => direction.opposite(),
            DirectionType::Input => direction,
        };
        (placed, Some(direction_type))
    } else {
        (direction, None)
    };

    let id = match ctx
        .blueprint
        .create_entity(preview.name(), origin, placed_direction, placed_type)
    {
        Ok(id) => id,
        Err(e) => {
            debug!(error = %e, "placement blocked");
            return CommitOutcome::Blocked;
        }
    };

    ctx.events.emit(EditorEvent::AreaVisualizationShown { entity: id });
    ctx.events.emit(EditorEvent::EntityCreated { entity: id });
    let entities = ctx.blueprint.surrounding_entities(id);
    ctx.events.emit(EditorEvent::NeighborsRedrawn { entities });

    if preview.prototype().flips_after_placement() {
        preview.flip_direction(ctx);
    }
    ctx.events.emit(EditorEvent::OverlayRefreshed);
    CommitOutcome::Created(id)
}

// ===========================================================================
// Tests
// ===========================================================================
