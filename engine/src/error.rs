//! Error Types
//!
//! Painting itself never fails with an error: an unreachable or underground
//! support is reported through the painters' boolean results. `SupportError`
//! covers the boundary instead, where raw numbers from scene files or callers
//! are turned into validated support kinds, and where configs are loaded.

/// Errors raised when validating raw support parameters or loading files.
#[derive(thiserror::Error, Debug)]
pub enum SupportError {
    #[error("invalid wooden support type: {0}")]
    InvalidWoodenSupportType(u8),

    #[error("invalid wooden support sub-type: {0}")]
    InvalidWoodenSupportSubType(u8),

    #[error("invalid metal support type: {0}")]
    InvalidMetalSupportType(u8),

    #[error("invalid support segment: {0} (expected 0-8)")]
    InvalidSegment(u8),

    #[error("invalid path support orientation: {0}")]
    InvalidPathOrientation(u8),

    #[error("invalid rotation: {0} (expected 0-3)")]
    InvalidRotation(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
