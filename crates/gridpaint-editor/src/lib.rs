//! Gridpaint Editor -- the placement preview and its commit protocol.
//!
//! A [`PlacementPreview`] follows the cursor over the blueprint grid,
//! snapping to cells (or to the two-cell rail grid) and tinting itself by
//! whether it could be placed. Underground belts also resolve which end of a
//! pair they would become. Committing a preview mutates the
//! [`EditorContext`]'s blueprint following [`commit::commit_placement`], and
//! every visual consequence is reported as an [`EditorEvent`] for the host
//! to deliver.
//!
//! ```rust
//! use gridpaint_core::direction::Direction;
//! use gridpaint_core::geometry::GridPosition;
//! use gridpaint_core::prototype::{EntityPrototype, PrototypeRegistryBuilder};
//! use gridpaint_editor::{EditorConfig, EditorContext, PlacementPreview, PointerButton, PointerTarget};
//! use std::sync::Arc;
//!
//! let mut builder = PrototypeRegistryBuilder::new();
//! builder.register(EntityPrototype::new("transport_belt").with_rotations(Direction::all().to_vec()));
//! let registry = Arc::new(builder.build()?);
//!
//! let mut ctx = EditorContext::new(registry, EditorConfig::default());
//! let origin = GridPosition::new(0, 0).to_pixels();
//! let mut preview = PlacementPreview::new(&mut ctx, "transport_belt", Direction::East, origin)?;
//! preview.move_to(&mut ctx, (80.0, 112.0));
//! preview.on_pointer_down(&mut ctx, PointerButton::Left);
//!
//! assert!(ctx.blueprint.entity_at(GridPosition::new(2, 3)).is_some());
//! let events = ctx.events.drain();
//! assert!(!events.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod commit;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod input;
pub mod preview;
pub mod snap;

pub use commit::{CommitOutcome, commit_placement};
pub use config::EditorConfig;
pub use context::EditorContext;
pub use error::EditorError;
pub use event::{EditorEvent, EditorEventKind, EventBus};
pub use input::{PointerButton, PointerTarget};
pub use preview::{HitArea, PlacementPreview, PreviewFrame, Tint};
