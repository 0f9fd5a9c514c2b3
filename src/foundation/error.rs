/// Convenience result type used across the crate.
pub type TileResult<T> = Result<T, TileError>;

/// Top-level error taxonomy used by tile APIs.
#[derive(thiserror::Error, Debug)]
pub enum TileError {
    /// Programmer error at a call boundary, e.g. binding without a decoded bitmap.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A colour or drawable reference could not be resolved by the host's resources.
    #[error("resource resolution error: {0}")]
    ResourceResolution(String),

    /// A drawing surface or raster buffer could not be created or read back.
    #[error("surface error: {0}")]
    Surface(String),

    /// Invalid settings values.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileError {
    /// Build a [`TileError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`TileError::ResourceResolution`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceResolution(msg.into())
    }

    /// Build a [`TileError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`TileError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
