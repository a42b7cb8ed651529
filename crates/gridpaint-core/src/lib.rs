//! Gridpaint Core -- shared types for the blueprint placement editor.
//!
//! This crate provides the identifiers, discrete directions, grid geometry
//! helpers, typed sprite layer helpers and the entity prototype registry
//! that the spatial model and the editor build on.
//!
//! # Directions
//!
//! Directions are the four cardinal values of the blueprint format, encoded
//! as `0`, `2`, `4` and `6` (north, east, south, west). Adding `4` modulo 8
//! gives the opposite direction:
//!
//! ```rust
//! use gridpaint_core::direction::Direction;
//!
//! assert_eq!(Direction::from_index(2), Some(Direction::East));
//! assert_eq!(Direction::East.opposite(), Direction::West);
//! ```
//!
//! # Key Types
//!
//! - [`direction::Direction`] and [`direction::DirectionType`] -- orientation
//!   and the input/output end of a paired entity.
//! - [`geometry`] -- point rotation, connection offsets and footprint sizes.
//! - [`sprite::Layered`] -- a sprite layer with an optional high-resolution
//!   variant that every helper updates in lockstep.
//! - [`prototype::PrototypeRegistry`] -- immutable prototype data (size,
//!   rotations, fast-replace group, pairing distance).

pub mod direction;
pub mod geometry;
pub mod id;
pub mod prototype;
pub mod sprite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
