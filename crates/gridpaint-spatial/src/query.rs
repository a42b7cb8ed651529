//! Placement queries against the committed grid.
//!
//! These answer, for a prototype about to be placed at an origin cell,
//! whether it may replace an existing entity, rotate one, or go on empty
//! cells, and they locate underground partners along a line.

use crate::Blueprint;
use gridpaint_core::direction::Direction;
use gridpaint_core::geometry::{Footprint, GridPosition};
use gridpaint_core::id::EntityId;

impl Blueprint {
    /// The single entity overlapping `footprint` at `origin`, if exactly one
    /// does.
    fn sole_overlap(&self, origin: GridPosition, footprint: Footprint) -> Option<EntityId> {
        match self.index.entities_in_footprint(origin, footprint).as_slice() {
            &[id] => Some(id),
            _ => None,
        }
    }

    /// An entity that `name` facing `direction` at `position` can replace in
    /// place.
    ///
    /// Matches when exactly one entity overlaps the target cells, it covers
    /// the same cells, has a different name in the same non-empty
    /// fast-replace group, and faces the same way (or cannot rotate).
    pub fn check_fast_replaceable_group(
        &self,
        name: &str,
        direction: Direction,
        position: GridPosition,
    ) -> Option<EntityId> {
        let prototype = self.registry().by_name(name)?;
        let group = prototype.fast_replaceable_group.as_ref()?;
        let footprint = prototype.footprint(direction);

        let id = self.sole_overlap(position, footprint)?;
        let existing = self.entities.get(id)?;
        if existing.name == name {
            return None;
        }
        let existing_prototype = self.registry().by_name(&existing.name)?;
        if existing_prototype.fast_replaceable_group.as_ref() != Some(group) {
            return None;
        }
        if self.index.get_position(id)? != position || self.index.get_footprint(id)? != footprint {
            return None;
        }

        let compatible =
            existing.direction == direction || existing_prototype.possible_rotations.is_none();
        compatible.then_some(id)
    }

    /// An entity of the same prototype, facing another way, that placing
    /// `name` facing `direction` at `position` would rotate.
    ///
    /// Both footprints must share their centre.
    pub fn check_same_entity_and_different_direction(
        &self,
        name: &str,
        direction: Direction,
        position: GridPosition,
    ) -> Option<EntityId> {
        let footprint = self.footprint_of(name, direction)?;
        let id = self.sole_overlap(position, footprint)?;
        let existing = self.entities.get(id)?;
        if existing.name != name || existing.direction == direction {
            return None;
        }

        let existing_center = self
            .index
            .get_footprint(id)?
            .doubled_center(self.index.get_position(id)?);
        (existing_center == footprint.doubled_center(position)).then_some(id)
    }

    /// Whether the cells of `name` facing `direction` at `position` are all
    /// free. Unknown prototypes never fit.
    pub fn check_no_overlap(&self, name: &str, direction: Direction, position: GridPosition) -> bool {
        self.footprint_of(name, direction)
            .is_some_and(|footprint| self.index.can_place(position, footprint))
    }

    /// Scan up to `max_distance` cells from `position` along
    /// `search_direction` for an entity named `name`.
    ///
    /// Same-name entities lying across the scan line are skipped. The first
    /// one on the same axis ends the scan; it is returned when it faces
    /// `direction`.
    pub fn find_entity_with_same_name_and_direction(
        &self,
        name: &str,
        direction: Direction,
        position: GridPosition,
        search_direction: Direction,
        max_distance: u32,
    ) -> Option<EntityId> {
        for distance in 1..=max_distance as i32 {
            let cell = position.step(search_direction, distance);
            let Some(id) = self.index.entity_at(cell) else {
                continue;
            };
            let Some(entity) = self.entities.get(id) else {
                continue;
            };
            if entity.name != name
                || entity.direction.is_horizontal() != direction.is_horizontal()
            {
                continue;
            }
            return (entity.direction == direction).then_some(id);
        }
        None
    }

    /// The entity occupying a cell.
    pub fn get_cell_at_position(&self, position: GridPosition) -> Option<EntityId> {
        self.index.entity_at(position)
    }
}
