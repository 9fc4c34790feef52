//! CPU rasterization of text layers and flattening of the layer stack.

pub mod blend;
pub(crate) mod blur;
pub mod compositor;
pub mod layer;
pub mod surface_pool;

pub use compositor::{Compositor, RenderJob, RenderMode};
pub use layer::{GlyphPass, PassKind, PassPaint, PassShape, plan_passes};
pub use surface_pool::{SurfacePoolOpts, SurfacePoolStats};

/// Options for the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOpts {
    pub(crate) pool: SurfacePoolOpts,
    /// Families whose glyphs already carry a baked-in 3-D shadow; the shadow pass is skipped.
    pub(crate) shadowless_families: Vec<String>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            pool: SurfacePoolOpts::default(),
            shadowless_families: vec!["Bungee Shade".to_owned()],
        }
    }
}

impl RenderOpts {
    /// Return options with a configured surface pool.
    pub fn with_pool(mut self, pool: SurfacePoolOpts) -> Self {
        self.pool = pool;
        self
    }

    /// Return options with a replaced list of families that opt out of the shadow pass.
    pub fn with_shadowless_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shadowless_families = families.into_iter().map(Into::into).collect();
        self
    }

    pub fn casts_shadow(&self, family: &str) -> bool {
        !self
            .shadowless_families
            .iter()
            .any(|f| f.eq_ignore_ascii_case(family))
    }
}

pub(crate) fn affine_to_cpu(a: crate::foundation::core::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
