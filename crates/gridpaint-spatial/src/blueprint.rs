//! The committed entity model: entities placed on the blueprint grid.
//!
//! A [`Blueprint`] owns the entities, the spatial index over their cells and
//! the editable area, and shares the prototype registry. Every mutation keeps
//! the index consistent: no two entities ever share a cell.

use crate::{EditableArea, SpatialError, SpatialIndex};
use gridpaint_core::direction::{Direction, DirectionType};
use gridpaint_core::geometry::{Footprint, GridPosition};
use gridpaint_core::id::EntityId;
use gridpaint_core::prototype::{EntityPrototype, PrototypeRegistry};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::sync::Arc;
use tracing::debug;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A committed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Origin (top-left) cell of the footprint.
    pub position: GridPosition,
    pub direction: Direction,
    /// Only set for underground belts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_type: Option<DirectionType>,
}

/// Errors from blueprint operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    #[error("unknown prototype '{0}'")]
    UnknownPrototype(String),
    #[error("footprint leaves the editable area")]
    OutOfArea,
    #[error("overlaps an existing entity")]
    Overlaps,
    #[error("entity not found")]
    EntityNotFound,
    #[error("cannot replace '{from}' with '{to}': footprints differ")]
    FootprintMismatch { from: String, to: String },
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

/// Error type for blueprint save/load I/O operations.
#[cfg(feature = "blueprint-io")]
#[derive(Debug, thiserror::Error)]
pub enum BlueprintIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("invalid blueprint: {0}")]
    Invalid(#[from] BlueprintError),
}

/// Serializable list of committed entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintSnapshot {
    pub entities: Vec<Entity>,
}

// ---------------------------------------------------------------------------
// Blueprint
// ---------------------------------------------------------------------------

/// Committed entities on a grid, indexed by cell.
#[derive(Debug, Clone)]
pub struct Blueprint {
    registry: Arc<PrototypeRegistry>,
    area: EditableArea,
    pub(crate) entities: SlotMap<EntityId, Entity>,
    pub(crate) index: SpatialIndex,
}

impl Blueprint {
    /// Create an empty blueprint.
    pub fn new(registry: Arc<PrototypeRegistry>, area: EditableArea) -> Self {
        Self {
            registry,
            area,
            entities: SlotMap::with_key(),
            index: SpatialIndex::new(),
        }
    }

    pub fn registry(&self) -> &Arc<PrototypeRegistry> {
        &self.registry
    }

    pub fn area(&self) -> EditableArea {
        self.area
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub(crate) fn prototype(&self, name: &str) -> Result<&EntityPrototype, BlueprintError> {
        self.registry
            .by_name(name)
            .ok_or_else(|| BlueprintError::UnknownPrototype(name.to_string()))
    }

    /// Footprint of prototype `name` facing `direction`.
    pub fn footprint_of(&self, name: &str, direction: Direction) -> Option<Footprint> {
        self.registry.by_name(name).map(|p| p.footprint(direction))
    }

    /// Whether a footprint at `origin` lies completely inside the area.
    pub fn is_inside_area(&self, origin: GridPosition, footprint: Footprint) -> bool {
        self.area.contains_footprint(origin, footprint)
    }

    // -- Mutation --

    /// Create a committed entity with its origin at `position`.
    pub fn create_entity(
        &mut self,
        name: &str,
        position: GridPosition,
        direction: Direction,
        direction_type: Option<DirectionType>,
    ) -> Result<EntityId, BlueprintError> {
        let footprint = self.prototype(name)?.footprint(direction);
        if !self.is_inside_area(position, footprint) {
            return Err(BlueprintError::OutOfArea);
        }
        if !self.index.can_place(position, footprint) {
            return Err(BlueprintError::Overlaps);
        }

        let id = self.entities.insert(Entity {
            name: name.to_string(),
            position,
            direction,
            direction_type,
        });
        if let Err(e) = self.index.place(id, position, footprint) {
            self.entities.remove(id);
            return Err(e.into());
        }
        debug!(name, ?position, %direction, "entity created");
        Ok(id)
    }

    /// Remove an entity, returning it.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity, BlueprintError> {
        if !self.entities.contains_key(id) {
            return Err(BlueprintError::EntityNotFound);
        }
        self.index.remove(id)?;
        let entity = self
            .entities
            .remove(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        debug!(name = %entity.name, position = ?entity.position, "entity removed");
        Ok(entity)
    }

    /// Swap an entity to another prototype in place, keeping its identity.
    ///
    /// The new prototype must cover exactly the same cells when facing
    /// `direction`.
    pub fn change(
        &mut self,
        id: EntityId,
        name: &str,
        direction: Direction,
    ) -> Result<(), BlueprintError> {
        let prototype = self.prototype(name)?;
        let new_footprint = prototype.footprint(direction);
        let paired = prototype.is_paired();
        let old_footprint = self
            .index
            .get_footprint(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        if new_footprint != old_footprint {
            return Err(BlueprintError::FootprintMismatch {
                from: entity.name.clone(),
                to: name.to_string(),
            });
        }

        debug!(from = %entity.name, to = name, %direction, "entity changed in place");
        entity.name = name.to_string();
        entity.direction = direction;
        entity.direction_type = if paired {
            Some(entity.direction_type.unwrap_or_default())
        } else {
            None
        };
        Ok(())
    }

    /// Turn an entity to face `direction`.
    ///
    /// A non-square entity keeps its footprint centre when the rotated
    /// footprint can sit on the same centre, otherwise its origin. If the
    /// rotated footprint would overlap another entity or leave the area, the
    /// entity is left untouched.
    pub fn set_direction(&mut self, id: EntityId, direction: Direction) -> Result<(), BlueprintError> {
        let entity = self.entities.get(id).ok_or(BlueprintError::EntityNotFound)?;
        let new_footprint = self.prototype(&entity.name)?.footprint(direction);
        let old_origin = self
            .index
            .get_position(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        let old_footprint = self
            .index
            .get_footprint(id)
            .ok_or(BlueprintError::EntityNotFound)?;

        let mut new_origin = old_origin;
        if new_footprint != old_footprint {
            let (cx, cy) = old_footprint.doubled_center(old_origin);
            let dx = cx - new_footprint.width as i32;
            let dy = cy - new_footprint.height as i32;
            if dx % 2 == 0 && dy % 2 == 0 {
                new_origin = GridPosition::new(dx / 2, dy / 2);
            }

            self.index.remove(id)?;
            let fits = self.area.contains_footprint(new_origin, new_footprint)
                && self.index.can_place(new_origin, new_footprint);
            if !fits {
                self.index.place(id, old_origin, old_footprint)?;
                return Err(if self.area.contains_footprint(new_origin, new_footprint) {
                    BlueprintError::Overlaps
                } else {
                    BlueprintError::OutOfArea
                });
            }
            self.index.place(id, new_origin, new_footprint)?;
        }

        let entity = self
            .entities
            .get_mut(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        debug!(name = %entity.name, from = %entity.direction, to = %direction, "entity rotated");
        entity.direction = direction;
        entity.position = new_origin;
        Ok(())
    }

    /// Set which end of an underground pair an entity represents.
    pub fn set_direction_type(
        &mut self,
        id: EntityId,
        direction_type: DirectionType,
    ) -> Result<(), BlueprintError> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(BlueprintError::EntityNotFound)?;
        entity.direction_type = Some(direction_type);
        Ok(())
    }

    // -- Queries --

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// The entity occupying a cell.
    pub fn entity_at(&self, pos: GridPosition) -> Option<EntityId> {
        self.index.entity_at(pos)
    }

    /// Entities touching `id`, diagonals included.
    pub fn surrounding_entities(&self, id: EntityId) -> Vec<EntityId> {
        self.index.neighbors_8(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // -- Snapshots --

    /// Capture the committed entities.
    pub fn snapshot(&self) -> BlueprintSnapshot {
        BlueprintSnapshot {
            entities: self.entities.values().cloned().collect(),
        }
    }

    /// Rebuild a blueprint from a snapshot, re-validating every entity.
    pub fn from_snapshot(
        snapshot: BlueprintSnapshot,
        registry: Arc<PrototypeRegistry>,
        area: EditableArea,
    ) -> Result<Self, BlueprintError> {
        let mut blueprint = Blueprint::new(registry, area);
        for entity in snapshot.entities {
            blueprint.create_entity(
                &entity.name,
                entity.position,
                entity.direction,
                entity.direction_type,
            )?;
        }
        Ok(blueprint)
    }

    /// Save the committed entities to a JSON file.
    #[cfg(feature = "blueprint-io")]
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), BlueprintIoError> {
        let json =
            serde_json::to_string_pretty(&self.snapshot()).map_err(BlueprintIoError::Serialize)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a blueprint saved with [`Blueprint::save_to_file`].
    #[cfg(feature = "blueprint-io")]
    pub fn load_from_file(
        path: impl AsRef<std::path::Path>,
        registry: Arc<PrototypeRegistry>,
        area: EditableArea,
    ) -> Result<Self, BlueprintIoError> {
        let data = std::fs::read_to_string(path)?;
        let snapshot: BlueprintSnapshot =
            serde_json::from_str(&data).map_err(BlueprintIoError::Deserialize)?;
        Ok(Blueprint::from_snapshot(snapshot, registry, area)?)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
