//! Spatial grid module for entity placement, adjacency, and area queries.
//!
//! Provides a 2D grid-based spatial index that maps cells to committed
//! entities, the editable area bounds, and the [`Blueprint`] model that ties
//! both to the prototype registry.

use gridpaint_core::id::EntityId;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use std::collections::{BTreeMap, BTreeSet};

pub mod blueprint;
pub mod query;

#[cfg(feature = "blueprint-io")]
pub use blueprint::BlueprintIoError;
pub use blueprint::{Blueprint, BlueprintError, BlueprintSnapshot, Entity};
pub use gridpaint_core::direction::{Direction, DirectionType};
pub use gridpaint_core::geometry::{Footprint, GridPosition};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The rectangle of cells that may hold entities (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditableArea {
    pub min: GridPosition,
    pub max: GridPosition,
}

impl EditableArea {
    pub fn new(min: GridPosition, max: GridPosition) -> Self {
        Self { min, max }
    }

    /// A square area of `size` cells centred on the grid origin.
    pub fn centered(size: u32) -> Self {
        let half = (size / 2) as i32;
        let rest = size as i32 - half;
        Self::new(
            GridPosition::new(-half, -half),
            GridPosition::new(rest - 1, rest - 1),
        )
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Whether every cell of `footprint` at `origin` is inside the area.
    pub fn contains_footprint(&self, origin: GridPosition, footprint: Footprint) -> bool {
        let far = GridPosition::new(
            origin.x + footprint.width as i32 - 1,
            origin.y + footprint.height as i32 - 1,
        );
        self.contains(origin) && self.contains(far)
    }
}

impl Default for EditableArea {
    fn default() -> Self {
        Self::centered(400)
    }
}

/// Errors from spatial operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    #[error("position is occupied")]
    Occupied,
    #[error("entity is not placed on the grid")]
    NotPlaced,
    #[error("entity is already placed on the grid")]
    AlreadyPlaced,
}

// ---------------------------------------------------------------------------
// SpatialIndex
// ---------------------------------------------------------------------------

/// A spatial index mapping grid cells to committed entities.
///
/// Maintains a bidirectional mapping:
/// - `tiles`: cell -> entity (which entity occupies each cell)
/// - `positions`: entity -> origin cell
/// - `footprints`: entity -> footprint as placed (already rotated)
#[derive(Debug, Default, Clone)]
pub struct SpatialIndex {
    tiles: BTreeMap<GridPosition, EntityId>,
    positions: SecondaryMap<EntityId, GridPosition>,
    footprints: SecondaryMap<EntityId, Footprint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Placement --

    /// Place an entity on the grid. Origin is the top-left corner.
    pub fn place(
        &mut self,
        entity: EntityId,
        position: GridPosition,
        footprint: Footprint,
    ) -> Result<(), SpatialError> {
        if self.positions.contains_key(entity) {
            return Err(SpatialError::AlreadyPlaced);
        }

        if !self.can_place(position, footprint) {
            return Err(SpatialError::Occupied);
        }

        for tile in footprint.tiles(position) {
            self.tiles.insert(tile, entity);
        }
        self.positions.insert(entity, position);
        self.footprints.insert(entity, footprint);

        Ok(())
    }

    /// Remove an entity from the grid. Returns its origin position.
    pub fn remove(&mut self, entity: EntityId) -> Result<GridPosition, SpatialError> {
        let position = *self.positions.get(entity).ok_or(SpatialError::NotPlaced)?;
        let footprint = *self.footprints.get(entity).ok_or(SpatialError::NotPlaced)?;

        for tile in footprint.tiles(position) {
            self.tiles.remove(&tile);
        }
        self.positions.remove(entity);
        self.footprints.remove(entity);

        Ok(position)
    }

    /// Check if a footprint can be placed at the given position.
    pub fn can_place(&self, position: GridPosition, footprint: Footprint) -> bool {
        footprint
            .tiles(position)
            .all(|tile| !self.tiles.contains_key(&tile))
    }

    // -- Point queries --

    /// Get the entity at a grid cell.
    pub fn entity_at(&self, pos: GridPosition) -> Option<EntityId> {
        self.tiles.get(&pos).copied()
    }

    /// Get the origin position of a placed entity.
    pub fn get_position(&self, entity: EntityId) -> Option<GridPosition> {
        self.positions.get(entity).copied()
    }

    /// Get the footprint of a placed entity.
    pub fn get_footprint(&self, entity: EntityId) -> Option<Footprint> {
        self.footprints.get(entity).copied()
    }

    // -- Area queries --

    /// Unique entities covering any cell of `footprint` at `origin`, in
    /// first-seen order.
    pub fn entities_in_footprint(&self, origin: GridPosition, footprint: Footprint) -> Vec<EntityId> {
        let mut seen = BTreeSet::new();
        footprint
            .tiles(origin)
            .filter_map(|tile| self.tiles.get(&tile).copied())
            .filter(|&entity| seen.insert(entity))
            .collect()
    }

    // -- Adjacency --

    /// Find 8-directional neighbors (including diagonals).
    pub fn neighbors_8(&self, entity: EntityId) -> Vec<EntityId> {
        let Some(&origin) = self.positions.get(entity) else {
            return Vec::new();
        };
        let Some(&footprint) = self.footprints.get(entity) else {
            return Vec::new();
        };

        let own_tiles: BTreeSet<GridPosition> = footprint.tiles(origin).collect();
        let mut seen = BTreeSet::new();
        let mut result = Vec::new();

        let offsets = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];

        for tile in &own_tiles {
            for (dx, dy) in offsets {
                let neighbor_pos = GridPosition::new(tile.x + dx, tile.y + dy);
                if own_tiles.contains(&neighbor_pos) {
                    continue;
                }
                if let Some(&neighbor) = self.tiles.get(&neighbor_pos)
                    && seen.insert(neighbor)
                {
                    result.push(neighbor);
                }
            }
        }
        result
    }

    // -- Stats --

    /// Total number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}
