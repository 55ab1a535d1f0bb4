//! Shared types, constants, and math for the Breach deferred voxel
//! renderer and hit-scan damage core.

pub mod constants;
pub mod error;
pub mod material;
pub mod math;
pub mod model;
pub mod types;

pub use error::BreachError;
pub use material::{load_deck_from_str, MaterialDeck, MaterialDef};
pub use model::VoxelModel;
pub use types::{ChunkId, MaterialId, VoxelCoord};
