use crate::generate::GenerationError;

/// Result alias used across the crate.
pub type TypestampResult<T> = Result<T, TypestampError>;

/// Error taxonomy of the compositing core.
///
/// Degenerate geometry (a path with fewer than two points, empty text) is deliberately absent: it
/// renders as an empty layer instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum TypestampError {
    /// Malformed caller data: bad image bytes, bad data URL, invalid JSON field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A font or image needed for full-fidelity output is not loaded yet.
    #[error("resource not ready: {0}")]
    ResourceUnready(String),

    /// Upstream image generation/edit failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Rendering to a raster failed (surface allocation, buffer mismatch).
    #[error("render error: {0}")]
    Render(String),

    /// Encoding the flattened raster failed.
    #[error("export error: {0}")]
    Export(String),

    /// The operation was superseded by a newer request.
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TypestampError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn resource_unready(msg: impl Into<String>) -> Self {
        Self::ResourceUnready(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// `true` for errors the caller can retry later without changing its inputs.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ResourceUnready(_) | Self::Cancelled(_) => true,
            Self::Generation(g) => g.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
