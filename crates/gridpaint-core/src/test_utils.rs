//! Shared test fixtures for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::direction::Direction;
use crate::prototype::{EntityKind, EntityPrototype, PrototypeRegistry, PrototypeRegistryBuilder};
use std::sync::Arc;

pub const CHEST: &str = "wooden_chest";
pub const BELT: &str = "transport_belt";
pub const FAST_BELT: &str = "fast_transport_belt";
pub const UNDERGROUND: &str = "underground_belt";
pub const PIPE_TO_GROUND: &str = "pipe_to_ground";
pub const ASSEMBLER: &str = "assembling_machine";
pub const BOILER: &str = "boiler";
pub const PUMP: &str = "pump";
pub const RAIL: &str = "straight_rail";

/// Pairing range of the fixture underground belt.
pub const UNDERGROUND_MAX_DISTANCE: u32 = 5;

fn all_directions() -> Vec<Direction> {
    Direction::all().to_vec()
}

/// The fixture prototypes:
///
/// | name | size | notes |
/// |---|---|---|
/// | `wooden_chest` | 1x1 | no rotations |
/// | `transport_belt` | 1x1 | group `transport_belt` |
/// | `fast_transport_belt` | 1x1 | group `transport_belt` |
/// | `underground_belt` | 1x1 | paired, range 5 |
/// | `pipe_to_ground` | 1x1 | flips after placement |
/// | `assembling_machine` | 3x3 | rotatable |
/// | `boiler` | 3x2 | rotatable, non-square |
/// | `pump` | 1x2 | rotatable, non-square |
/// | `straight_rail` | 2x2 | rail grid, N/E only |
pub fn fixture_prototypes() -> Vec<EntityPrototype> {
    vec![
        EntityPrototype::new(CHEST),
        EntityPrototype::new(BELT)
            .with_rotations(all_directions())
            .with_fast_replaceable_group("transport_belt"),
        EntityPrototype::new(FAST_BELT)
            .with_rotations(all_directions())
            .with_fast_replaceable_group("transport_belt"),
        EntityPrototype::new(UNDERGROUND)
            .with_kind(EntityKind::UndergroundBelt)
            .with_rotations(all_directions())
            .with_max_distance(UNDERGROUND_MAX_DISTANCE),
        EntityPrototype::new(PIPE_TO_GROUND)
            .with_kind(EntityKind::PipeToGround)
            .with_rotations(all_directions())
            .with_max_distance(10),
        EntityPrototype::new(ASSEMBLER)
            .with_size(3, 3)
            .with_rotations(all_directions()),
        EntityPrototype::new(BOILER)
            .with_size(3, 2)
            .with_rotations(all_directions()),
        EntityPrototype::new(PUMP)
            .with_size(1, 2)
            .with_rotations(all_directions()),
        EntityPrototype::new(RAIL)
            .with_kind(EntityKind::RailAligned)
            .with_size(2, 2)
            .with_rotations(vec![Direction::North, Direction::East]),
    ]
}

/// A registry holding [`fixture_prototypes`].
pub fn fixture_registry() -> Arc<PrototypeRegistry> {
    let mut builder = PrototypeRegistryBuilder::new();
    for prototype in fixture_prototypes() {
        builder.register(prototype);
    }
    match builder.build() {
        Ok(registry) => Arc::new(registry),
        Err(e) => panic!("fixture prototypes are invalid: {e}"),
    }
}
