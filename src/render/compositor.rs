use crate::foundation::core::RasterImage;
use crate::foundation::error::{TypestampError, TypestampResult};
use crate::layout::layout_layer;
use crate::render::RenderOpts;
use crate::render::blend::composite_in_place;
use crate::render::layer::LayerPainter;
use crate::render::surface_pool::{SurfacePool, SurfacePoolStats};
use crate::scene::design::{Background, DesignState};
use crate::scene::layer::{LayerId, TextLayer};
use crate::text::fonts::FontBook;

/// Preview defers layers whose fonts are missing; export refuses to draw them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Preview,
    Export,
}

/// One flatten request.
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    pub mode: RenderMode,
    /// Restrict output to these layers (stamp). `None` renders every visible layer.
    pub only: Option<&'a [LayerId]>,
    /// Polled between layers.
    pub cancelled: Option<&'a dyn Fn() -> bool>,
}

impl<'a> RenderJob<'a> {
    pub fn preview() -> Self {
        Self {
            mode: RenderMode::Preview,
            only: None,
            cancelled: None,
        }
    }

    pub fn export() -> Self {
        Self {
            mode: RenderMode::Export,
            ..Self::preview()
        }
    }

    pub fn with_only(mut self, ids: &'a [LayerId]) -> Self {
        self.only = Some(ids);
        self
    }

    pub fn with_cancel(mut self, cancelled: &'a dyn Fn() -> bool) -> Self {
        self.cancelled = Some(cancelled);
        self
    }

    fn includes(&self, layer: &TextLayer) -> bool {
        layer.visible && self.only.is_none_or(|ids| ids.contains(&layer.id))
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.is_some_and(|f| f())
    }
}

impl std::fmt::Debug for RenderJob<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderJob")
            .field("mode", &self.mode)
            .field("only", &self.only)
            .field("cancellable", &self.cancelled.is_some())
            .finish()
    }
}

/// Flattens a [`DesignState`] onto its background, one isolated layer at a time.
pub struct Compositor {
    opts: RenderOpts,
    pool: SurfacePool,
    painter: LayerPainter,
    deferred: Vec<LayerId>,
    deferred_generation: u64,
}

impl Compositor {
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            pool: SurfacePool::new(opts.pool),
            opts,
            painter: LayerPainter::new(),
            deferred: Vec::new(),
            deferred_generation: 0,
        }
    }

    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Layers skipped by the last preview because their font was not registered.
    pub fn deferred_layers(&self) -> &[LayerId] {
        &self.deferred
    }

    /// `true` when the last preview skipped layers and fonts have been registered since.
    pub fn needs_rerender(&self, fonts: &FontBook) -> bool {
        !self.deferred.is_empty() && fonts.generation() != self.deferred_generation
    }

    pub fn pool_stats(&self) -> SurfacePoolStats {
        self.pool.stats()
    }

    /// Composite the background and every selected visible layer, bottom to top.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(mode = ?job.mode, layers = design.layers().len())
    )]
    pub fn render(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        job: &RenderJob<'_>,
    ) -> TypestampResult<RasterImage> {
        let canvas = design.canvas();

        if job.mode == RenderMode::Export {
            for layer in design.layers().iter().filter(|l| job.includes(l)) {
                if fonts.resolve(&layer.font_request()).is_none() {
                    return Err(TypestampError::resource_unready(format!(
                        "font family '{}' for {} is not loaded",
                        layer.font_family, layer.id
                    )));
                }
            }
        }

        let mut accum = background_pixels(design.background());
        let mut deferred = Vec::new();

        for layer in design.layers() {
            if !job.includes(layer) {
                continue;
            }
            if job.is_cancelled() {
                return Err(TypestampError::cancelled(format!(
                    "render stopped before {}",
                    layer.id
                )));
            }
            if layer.opacity <= 0.0 || !layer.opacity.is_finite() {
                continue;
            }

            let Some(face) = fonts.resolve(&layer.font_request()) else {
                tracing::debug!(
                    layer = %layer.id,
                    family = %layer.font_family,
                    "font not ready, deferring layer"
                );
                deferred.push(layer.id);
                continue;
            };

            let layout = layout_layer(layer, canvas, fonts);
            if layout.is_empty() {
                tracing::debug!(layer = %layer.id, "layout is empty, layer renders nothing");
                continue;
            }

            let mut scratch = self.pool.borrow(canvas)?;
            let painted = self.painter.paint(
                &mut self.pool,
                fonts,
                face,
                layer,
                &layout,
                canvas,
                &self.opts,
                &mut scratch,
            );
            let composited = painted.and_then(|()| {
                composite_in_place(
                    &mut accum,
                    scratch.data_as_u8_slice(),
                    layer.opacity as f32,
                    layer.blend_mode,
                )
            });
            self.pool.release(scratch);
            composited?;
        }

        if !deferred.is_empty() {
            tracing::debug!(count = deferred.len(), "preview deferred layers");
        }
        self.deferred = deferred;
        self.deferred_generation = fonts.generation();

        RasterImage::from_premul(canvas.width, canvas.height, accum)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(RenderOpts::default())
    }
}

fn background_pixels(bg: &Background) -> Vec<u8> {
    match bg {
        Background::Image(img) => img.premul_bytes().to_vec(),
        Background::Solid { color, canvas } => color.to_premul().repeat(canvas.rgba_len() / 4),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
