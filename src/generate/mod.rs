//! Interface to the background image generation service.
//!
//! Transport lives with the caller; the core only sees a payload or a classified failure.

use crate::export::codec::ImagePayload;
use crate::foundation::error::TypestampResult;
use crate::scene::design::{Background, DesignState};

/// Classified upstream failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("authentication failed: {0}")]
    AuthError(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("blocked by safety filter: {0}")]
    SafetyBlocked(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("no image returned: {0}")]
    NoImageReturned(String),
}

impl GenerationError {
    /// Worth retrying with the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded(_) | Self::ServiceUnavailable(_) | Self::NetworkError(_)
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Square,
}

/// Service-specific knobs, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationConfig {
    pub model: Option<String>,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// e.g. `"16:9"`.
    pub aspect_ratio: String,
    pub orientation: Orientation,
    pub config: GenerationConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditRequest {
    pub image: ImagePayload,
    pub prompt: String,
    pub config: GenerationConfig,
}

pub trait ImageGenerator {
    fn generate(&mut self, req: &GenerateRequest) -> Result<ImagePayload, GenerationError>;
    fn edit(&mut self, req: &EditRequest) -> Result<ImagePayload, GenerationError>;
}

/// Decode a generation outcome and install it as the background.
///
/// Any failure (upstream or decode) leaves `design` as it was; on success all path data is
/// cleared along with the background swap.
pub fn apply_generated_image(
    design: &DesignState,
    outcome: Result<ImagePayload, GenerationError>,
) -> TypestampResult<DesignState> {
    let payload = outcome.inspect_err(|err| {
        tracing::warn!(%err, retryable = err.is_retryable(), "image generation failed");
    })?;
    let raster = payload.decode()?;
    Ok(design.with_background(Background::Image(raster)))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/mod.rs"]
mod tests;
