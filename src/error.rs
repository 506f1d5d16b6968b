//! Error types
//!
//! Only startup can fail hard. Storage errors are returned by the store
//! implementations and swallowed (logged) by their callers.

/// Fatal errors raised while constructing a [`crate::Game`].
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// The host has no drawing surface to play on
    #[error("play surface not found")]
    SurfaceMissing,

    /// The surface exists but has no usable area
    #[error("play surface has no area ({width}x{height})")]
    InvalidSurface { width: f32, height: f32 },

    /// The level table is empty
    #[error("no levels configured")]
    NoLevels,

    /// A host passed an action name the game does not know
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Key-value store failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("failed to clear storage: {0}")]
    Clear(String),
}
