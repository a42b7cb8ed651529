//! Serde data file structs for entity prototype definitions.
//!
//! These mirror [`EntityPrototype`] but are looser on disk: sizes are a
//! `(width, height)` pair and directions may be written either as their
//! cardinal index (`0`, `2`, `4`, `6`) or by name (`"north"`).

use crate::loader::DataLoadError;
use gridpaint_core::direction::Direction;
use gridpaint_core::prototype::{EntityKind, EntityPrototype};
use serde::Deserialize;
use std::path::Path;

/// A direction as written in a data file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DirectionData {
    Index(u8),
    Name(String),
}

impl DirectionData {
    pub fn resolve(&self, file: &Path) -> Result<Direction, DataLoadError> {
        let resolved = match self {
            DirectionData::Index(i) => Direction::from_index(*i),
            DirectionData::Name(name) => Direction::all()
                .into_iter()
                .find(|d| d.name().eq_ignore_ascii_case(name)),
        };
        resolved.ok_or_else(|| DataLoadError::InvalidDirection {
            file: file.to_path_buf(),
            value: match self {
                DirectionData::Index(i) => i.to_string(),
                DirectionData::Name(name) => name.clone(),
            },
        })
    }
}

fn default_size() -> (u32, u32) {
    (1, 1)
}

/// An entity prototype definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct PrototypeData {
    pub name: String,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default = "default_size")]
    pub size: (u32, u32),
    #[serde(default)]
    pub possible_rotations: Option<Vec<DirectionData>>,
    #[serde(default)]
    pub fast_replaceable_group: Option<String>,
    #[serde(default)]
    pub max_distance: Option<u32>,
}

impl PrototypeData {
    /// Convert into an engine prototype. `file` is only used for errors.
    pub fn into_prototype(self, file: &Path) -> Result<EntityPrototype, DataLoadError> {
        let possible_rotations = self
            .possible_rotations
            .map(|dirs| {
                dirs.iter()
                    .map(|d| d.resolve(file))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let mut prototype = EntityPrototype::new(&self.name)
            .with_kind(self.kind)
            .with_size(self.size.0, self.size.1);
        prototype.possible_rotations = possible_rotations;
        prototype.fast_replaceable_group = self.fast_replaceable_group;
        prototype.max_distance = self.max_distance;
        Ok(prototype)
    }
}
