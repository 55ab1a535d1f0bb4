//! CPU-side hit-scan damage resolution against per-entity voxel volumes.
//!
//! Independent of the render passes: a hit-scan runs synchronously on
//! the invoking thread, may overlap rendering of a previous frame, and
//! mutates gameplay state (health) only — never the resource tables.

pub mod hitscan;
pub mod target;
pub mod volume;

pub use hitscan::{resolve_hit, HitscanParams};
pub use target::Target;
pub use volume::VoxelVolume;
