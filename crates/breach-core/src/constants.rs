//! Single source of truth for shared constants.
//! These values are used by both Rust and WGSL; the render crate injects
//! the capacities into shader preambles so the two sides cannot drift.

/// Maximum number of materials addressable in one frame. Hard limit on
/// the wire format: every instance's material id must be below this.
pub const MATERIAL_CAPACITY: usize = 256;

/// Maximum number of chunk transforms in one draw call.
/// Each record is 128 bytes (two column-major mat4), so the table is
/// 170 * 128 B = 21.25 KiB, within the 64 KiB default uniform binding
/// limit that wgpu guarantees.
pub const CHUNK_CAPACITY: usize = 170;

/// Maximum number of lights the lighting pass will read.
pub const LIGHT_CAPACITY: usize = 256;

/// Edge length of one voxel in world units. Rendering and hit-scan share
/// this discretization: a point belongs to the voxel it floors into.
pub const VOXEL_EDGE: f32 = 1.0;

/// Default hit-scan sampling step. Must stay <= VOXEL_EDGE or a ray can
/// tunnel through a voxel between samples; 0.25 trades CPU for a lower
/// miss probability near voxel boundaries.
pub const DEFAULT_RAY_STEP: f32 = 0.25;

/// Default hit-scan range in world units.
pub const DEFAULT_RAY_LENGTH: f32 = 100.0;

/// Fixed damage applied per confirmed hit. There is no partial or graze
/// damage model.
pub const BASE_DAMAGE: u32 = 10;

/// Health a freshly spawned target starts with.
pub const FULL_HEALTH: u32 = 100;
