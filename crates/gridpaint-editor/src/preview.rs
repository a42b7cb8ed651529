//! The placement preview: the pending entity that follows the cursor.
//!
//! A preview tracks two independent pieces of state. Buildability is
//! recomputed from the committed grid after every move and rotation.
//! Underground belts additionally resolve whether the next placement is an
//! input or an output end by scanning the grid for a partner.

use crate::commit::{CommitOutcome, commit_placement};
use crate::context::EditorContext;
use crate::error::EditorError;
use crate::event::EditorEvent;
use crate::snap;
use gridpaint_core::direction::{Direction, DirectionType};
use gridpaint_core::geometry::{CELL_SIZE, Footprint, GridPosition, PixelPosition, Vector};
use gridpaint_core::prototype::{EntityKind, EntityPrototype};
use gridpaint_spatial::Entity;
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Render state
// ---------------------------------------------------------------------------

/// Colour multipliers applied to the preview sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Tint {
    pub const BUILDABLE: Tint = Tint {
        red: 0.4,
        green: 1.0,
        blue: 0.4,
    };
    pub const BLOCKED: Tint = Tint {
        red: 1.0,
        green: 0.4,
        blue: 0.4,
    };
}

/// Pointer hit rectangle in pixels, relative to the footprint centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl HitArea {
    fn around(footprint: Footprint) -> Self {
        let half = CELL_SIZE / 2;
        Self {
            x: -(footprint.width as i32) * half,
            y: -(footprint.height as i32) * half,
            width: footprint.width as i32 * CELL_SIZE,
            height: footprint.height as i32 * CELL_SIZE,
        }
    }
}

/// What a renderer needs to draw the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub name: String,
    pub position: PixelPosition,
    /// Direction the sprite faces; the reciprocal of the preview's direction
    /// for an output end.
    pub direction: Direction,
    pub direction_type: DirectionType,
    pub hit_area: HitArea,
    pub tint: Tint,
}

// ---------------------------------------------------------------------------
// PlacementPreview
// ---------------------------------------------------------------------------

/// The pending placement of one prototype.
#[derive(Debug, Clone)]
pub struct PlacementPreview {
    prototype: EntityPrototype,
    direction: Direction,
    direction_type: DirectionType,
    /// Top-left corner of the footprint, in pixels.
    position: PixelPosition,
    pub(crate) holding_left: bool,
    pub(crate) holding_right: bool,
    /// Last cursor position, in pixels.
    cursor: Vector,
    buildable: bool,
}

impl PlacementPreview {
    /// Start painting `name` with its top-left corner at `position`.
    pub fn new(
        ctx: &mut EditorContext,
        name: &str,
        direction: Direction,
        position: PixelPosition,
    ) -> Result<Self, EditorError> {
        let prototype = ctx
            .blueprint
            .registry()
            .by_name(name)
            .cloned()
            .ok_or_else(|| EditorError::UnknownPrototype(name.to_string()))?;

        let footprint = prototype.footprint(direction);
        let mut preview = Self {
            prototype,
            direction,
            direction_type: DirectionType::Input,
            position,
            holding_left: false,
            holding_right: false,
            cursor: snap::footprint_center(position, footprint),
            buildable: false,
        };

        ctx.events.emit(EditorEvent::PreviewAreaCreated {
            name: name.to_string(),
            position,
        });
        ctx.events.emit(EditorEvent::RelatedAreasActivated {
            name: name.to_string(),
        });
        preview.check_buildable(ctx);
        debug!(name, %direction, ?position, "preview created");
        Ok(preview)
    }

    // -- Accessors --

    pub fn name(&self) -> &str {
        &self.prototype.name
    }

    pub fn prototype(&self) -> &EntityPrototype {
        &self.prototype
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn direction_type(&self) -> DirectionType {
        self.direction_type
    }

    pub fn position(&self) -> PixelPosition {
        self.position
    }

    /// Origin cell of the footprint.
    pub fn grid_position(&self) -> GridPosition {
        self.position.to_grid()
    }

    /// Footprint for the current direction.
    pub fn footprint(&self) -> Footprint {
        self.prototype.footprint(self.direction)
    }

    /// Result of the last [`PlacementPreview::check_buildable`].
    pub fn is_buildable(&self) -> bool {
        self.buildable
    }

    pub fn is_holding_left(&self) -> bool {
        self.holding_left
    }

    pub fn is_holding_right(&self) -> bool {
        self.holding_right
    }

    /// Direction the sprite is drawn facing.
    pub fn render_direction(&self) -> Direction {
        match self.direction_type {
            DirectionType::Output => self.direction.opposite(),
            DirectionType::Input => self.direction,
        }
    }

    // -- Validation --

    /// Recompute whether the preview could be placed where it is.
    ///
    /// The footprint must lie inside the editable area and either replace an
    /// entity of the same fast-replace group, rotate an entity of the same
    /// prototype, or land on free cells.
    pub fn check_buildable(&mut self, ctx: &EditorContext) -> bool {
        let bp = &ctx.blueprint;
        let origin = self.grid_position();
        let name = self.name();

        self.buildable = bp.is_inside_area(origin, self.footprint())
            && (bp
                .check_fast_replaceable_group(name, self.direction, origin)
                .is_some()
                || bp
                    .check_same_entity_and_different_direction(name, self.direction, origin)
                    .is_some()
                || bp.check_no_overlap(name, self.direction, origin));
        self.buildable
    }

    /// Decide whether the next underground belt is an input or an output.
    ///
    /// Looks along the preview's own direction for the same prototype facing
    /// back at it. A partner found in range makes this the other end of its
    /// pair; otherwise an output falls back to an input.
    pub fn resolve_paired_direction(&mut self, ctx: &mut EditorContext) {
        if !self.prototype.is_paired() {
            return;
        }
        let max_distance = self.prototype.max_distance.unwrap_or_default();

        let bp = &ctx.blueprint;
        let partner = bp
            .find_entity_with_same_name_and_direction(
                self.name(),
                self.direction.opposite(),
                self.grid_position(),
                self.direction,
                max_distance,
            )
            .and_then(|id| bp.entity(id));

        match partner {
            Some(entity) => {
                self.direction_type = entity.direction_type.unwrap_or_default().flipped();
            }
            None if self.direction_type == DirectionType::Output => {
                self.direction_type = DirectionType::Input;
            }
            None => {}
        }
        trace!(
            name = self.name(),
            found = partner.is_some(),
            direction_type = ?self.direction_type,
            "resolved paired direction"
        );
        self.emit_redrawn(ctx);
    }

    // -- Gestures --

    /// Turn to the next allowed direction.
    ///
    /// A non-square footprint changes shape, so it is re-snapped around its
    /// old centre nudged toward the cursor.
    pub fn rotate(&mut self, ctx: &mut EditorContext) {
        let Some(next) = self.prototype.next_rotation(self.direction) else {
            return;
        };
        let old_center = snap::footprint_center(self.position, self.footprint());

        self.direction = next;
        self.emit_redrawn(ctx);

        let footprint = self.footprint();
        if !footprint.is_square() {
            let anchor = snap::rotation_anchor(old_center, self.cursor);
            self.position = snap::snap_to_cells(anchor, footprint);
        }
        trace!(name = self.name(), direction = %next, position = ?self.position, "preview rotated");

        self.check_buildable(ctx);
        self.resolve_paired_direction(ctx);
        self.emit_linkage_lines(ctx);
    }

    /// Follow the cursor (in pixels).
    ///
    /// While the right button is held the entity under the preview is removed
    /// first; while the left button is held the preview is committed at its
    /// new position.
    pub fn move_to(&mut self, ctx: &mut EditorContext, cursor: impl Into<Vector>) {
        self.cursor = cursor.into();
        if self.holding_right {
            self.remove_under_cursor(ctx);
        }

        let footprint = self.footprint();
        self.position = if self.prototype.is_rail_aligned() {
            snap::snap_to_rail_grid(self.cursor, footprint, ctx.config.rail_move_offset)
        } else {
            snap::snap_to_cells(self.cursor, footprint)
        };

        self.resolve_paired_direction(ctx);
        ctx.events.emit(EditorEvent::LinkageLinesMoved {
            position: self.position,
        });
        self.emit_linkage_lines(ctx);
        ctx.events.emit(EditorEvent::PreviewAreaMoved {
            position: self.position,
        });

        if self.holding_left {
            self.commit(ctx);
        }
        self.check_buildable(ctx);
    }

    /// Remove the committed entity occupying the preview's origin cell.
    pub fn remove_under_cursor(&mut self, ctx: &mut EditorContext) -> Option<Entity> {
        let id = ctx.blueprint.get_cell_at_position(self.grid_position())?;
        let neighbors = ctx.blueprint.surrounding_entities(id);
        let entity = match ctx.blueprint.remove_entity(id) {
            Ok(entity) => entity,
            Err(e) => {
                debug!(error = %e, "remove under cursor failed");
                return None;
            }
        };

        ctx.events.emit(EditorEvent::EntityRemoved {
            entity: id,
            name: entity.name.clone(),
            position: entity.position,
        });
        ctx.events.emit(EditorEvent::NeighborsRedrawn { entities: neighbors });
        self.check_buildable(ctx);
        Some(entity)
    }

    /// Place the preview into the blueprint.
    pub fn commit(&mut self, ctx: &mut EditorContext) -> CommitOutcome {
        commit_placement(self, ctx)
    }

    /// Stop painting.
    pub fn cancel(self, ctx: &mut EditorContext) {
        ctx.events.emit(EditorEvent::PreviewAreaDestroyed);
        ctx.events.emit(EditorEvent::RelatedAreasDeactivated);
        ctx.events.emit(EditorEvent::LinkageLinesHidden);
        debug!(name = self.name(), "preview cancelled");
    }

    pub fn render(&self) -> PreviewFrame {
        PreviewFrame {
            name: self.prototype.name.clone(),
            position: self.position,
            direction: self.render_direction(),
            direction_type: self.direction_type,
            hit_area: HitArea::around(self.footprint()),
            tint: if self.buildable {
                Tint::BUILDABLE
            } else {
                Tint::BLOCKED
            },
        }
    }

    // -- Internal --

    /// Face the other way after a placement, ready for the other end.
    pub(crate) fn flip_direction(&mut self, ctx: &mut EditorContext) {
        self.direction = self.direction.opposite();
        self.emit_redrawn(ctx);
        ctx.events.emit(EditorEvent::LinkageLinesHidden);
    }

    fn emit_redrawn(&self, ctx: &mut EditorContext) {
        ctx.events.emit(EditorEvent::PreviewRedrawn {
            direction: self.render_direction(),
            direction_type: self.direction_type,
        });
    }

    fn emit_linkage_lines(&self, ctx: &mut EditorContext) {
        let search_direction = match self.direction_type {
            DirectionType::Input => self.direction,
            DirectionType::Output => self.direction.opposite(),
        };
        let line_direction = if self.prototype.kind == EntityKind::PipeToGround {
            self.direction.opposite()
        } else {
            self.direction
        };
        ctx.events.emit(EditorEvent::LinkageLinesUpdated {
            name: self.prototype.name.clone(),
            position: self.grid_position(),
            search_direction,
            line_direction,
        });
    }
}

// ===========================================================================
// Tests
// ===========================================================================
