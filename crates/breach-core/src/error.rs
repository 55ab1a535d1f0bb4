use thiserror::Error;

/// Errors surfaced by table authoring, instance authoring, and hit-scan
/// resolution. Every variant is a programming or content error; nothing
/// here is transient and nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreachError {
    /// A table or foreign-key index exceeded its capacity. GPU-side reads
    /// past a table's end are undefined, so this is rejected at authoring
    /// time — never clamped or wrapped.
    #[error("{table} index {index} exceeds capacity {capacity}")]
    OutOfRange {
        table: &'static str,
        index: usize,
        capacity: usize,
    },

    /// Hit-scan direction was zero-length or not unit-length.
    #[error("ray direction must be unit length, got length {length}")]
    InvalidDirection { length: f32 },

    /// Hit-scan step outside (0, VOXEL_EDGE]. A larger step can skip
    /// entire voxels between samples.
    #[error("ray step must be in (0, voxel edge], got {step}")]
    InvalidStep { step: f32 },

    /// Hit-scan range not a positive finite length.
    #[error("ray length must be positive and finite, got {length}")]
    InvalidLength { length: f32 },

    /// A RON material deck failed to parse.
    #[error("failed to parse material deck: {0}")]
    DeckParse(String),
}
