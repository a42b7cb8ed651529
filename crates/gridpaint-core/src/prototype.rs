use crate::direction::Direction;
use crate::geometry::Footprint;
use crate::id::PrototypeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placement behaviour shared by a family of prototypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Generic,
    /// Placed in input/output pairs discovered by scanning the grid.
    UndergroundBelt,
    /// Flips direction after every placement, like an underground belt, but
    /// does not track an input/output end.
    PipeToGround,
    /// Rails and train stops, snapped to the two-cell rail grid.
    RailAligned,
}

/// An entity prototype definition in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPrototype {
    pub name: String,
    #[serde(default)]
    pub kind: EntityKind,
    pub size: Footprint,
    #[serde(default)]
    pub possible_rotations: Option<Vec<Direction>>,
    #[serde(default)]
    pub fast_replaceable_group: Option<String>,
    #[serde(default)]
    pub max_distance: Option<u32>,
}

impl EntityPrototype {
    /// A 1x1 generic prototype without rotations.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntityKind::Generic,
            size: Footprint::single(),
            possible_rotations: None,
            fast_replaceable_group: None,
            max_distance: None,
        }
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Footprint::new(width, height);
        self
    }

    pub fn with_rotations(mut self, rotations: Vec<Direction>) -> Self {
        self.possible_rotations = Some(rotations);
        self
    }

    pub fn with_fast_replaceable_group(mut self, group: &str) -> Self {
        self.fast_replaceable_group = Some(group.to_string());
        self
    }

    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Whether this prototype resolves an input/output end by pairing.
    pub fn is_paired(&self) -> bool {
        self.kind == EntityKind::UndergroundBelt
    }

    /// Whether the painter flips its direction after each placement.
    pub fn flips_after_placement(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::UndergroundBelt | EntityKind::PipeToGround
        )
    }

    pub fn is_rail_aligned(&self) -> bool {
        self.kind == EntityKind::RailAligned
    }

    /// The direction following `current` in the rotation list, wrapping
    /// around. `None` when the prototype cannot rotate. A direction not in
    /// the list restarts at the first entry.
    pub fn next_rotation(&self, current: Direction) -> Option<Direction> {
        let rotations = self.possible_rotations.as_ref()?;
        let next = match rotations.iter().position(|&d| d == current) {
            Some(i) => (i + 1) % rotations.len(),
            None => 0,
        };
        rotations.get(next).copied()
    }

    /// Footprint on the grid when facing `direction`.
    pub fn footprint(&self, direction: Direction) -> Footprint {
        self.size.for_direction(direction)
    }
}

/// Errors from prototype registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrototypeError {
    #[error("prototype '{0}' registered twice")]
    Duplicate(String),
    #[error("prototype '{0}' has an empty footprint")]
    EmptyFootprint(String),
    #[error("underground belt '{0}' has no max_distance")]
    MissingMaxDistance(String),
    #[error("prototype '{0}' declares an empty rotation list")]
    EmptyRotations(String),
}

/// Builder for constructing an immutable [`PrototypeRegistry`].
#[derive(Debug, Default)]
pub struct PrototypeRegistryBuilder {
    prototypes: Vec<EntityPrototype>,
}

impl PrototypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prototype. Returns the ID it will have after `build`.
    pub fn register(&mut self, prototype: EntityPrototype) -> PrototypeId {
        let id = PrototypeId(self.prototypes.len() as u32);
        self.prototypes.push(prototype);
        id
    }

    /// Validate and freeze the registry.
    pub fn build(self) -> Result<PrototypeRegistry, PrototypeError> {
        let mut name_to_id = HashMap::with_capacity(self.prototypes.len());
        for (i, prototype) in self.prototypes.iter().enumerate() {
            if prototype.size.area() == 0 {
                return Err(PrototypeError::EmptyFootprint(prototype.name.clone()));
            }
            if prototype.is_paired() && prototype.max_distance.is_none() {
                return Err(PrototypeError::MissingMaxDistance(prototype.name.clone()));
            }
            if prototype
                .possible_rotations
                .as_ref()
                .is_some_and(|r| r.is_empty())
            {
                return Err(PrototypeError::EmptyRotations(prototype.name.clone()));
            }
            if name_to_id
                .insert(prototype.name.clone(), PrototypeId(i as u32))
                .is_some()
            {
                return Err(PrototypeError::Duplicate(prototype.name.clone()));
            }
        }

        Ok(PrototypeRegistry {
            prototypes: self.prototypes,
            name_to_id,
        })
    }
}

/// Immutable prototype registry. Frozen after `build()`; share it via `Arc`.
#[derive(Debug)]
pub struct PrototypeRegistry {
    prototypes: Vec<EntityPrototype>,
    name_to_id: HashMap<String, PrototypeId>,
}

impl PrototypeRegistry {
    pub fn get(&self, id: PrototypeId) -> Option<&EntityPrototype> {
        self.prototypes.get(id.0 as usize)
    }

    pub fn id(&self, name: &str) -> Option<PrototypeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&EntityPrototype> {
        self.id(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrototypeId, &EntityPrototype)> {
        self.prototypes
            .iter()
            .enumerate()
            .map(|(i, p)| (PrototypeId(i as u32), p))
    }
}
