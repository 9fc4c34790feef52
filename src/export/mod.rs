//! Export and stamp surfaces.
//!
//! At most one export is meaningful at a time: [`Exporter::begin`] hands out a ticket and every
//! newer ticket supersedes the older ones. A superseded render stops between layers.

pub mod codec;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use codec::{ImagePayload, decode_data_url, decode_image, encode_png};

use crate::foundation::core::RasterImage;
use crate::foundation::error::{TypestampError, TypestampResult};
use crate::render::{Compositor, RenderJob, RenderOpts};
use crate::scene::design::DesignState;
use crate::scene::layer::LayerId;
use crate::text::fonts::FontBook;

/// Handle for one export request.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl ExportTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.id
    }

    fn check(&self) -> TypestampResult<()> {
        if self.is_superseded() {
            tracing::debug!(ticket = self.id, "export superseded");
            return Err(TypestampError::cancelled(format!(
                "export #{} superseded by a newer request",
                self.id
            )));
        }
        Ok(())
    }
}

/// Full-fidelity flattening at the background's native resolution.
pub struct Exporter {
    compositor: Compositor,
    latest: Arc<AtomicU64>,
}

impl Exporter {
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            compositor: Compositor::new(opts),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a request; any earlier ticket is superseded.
    pub fn begin(&self) -> ExportTicket {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        ExportTicket {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Flatten every visible layer.
    #[tracing::instrument(level = "debug", skip_all, fields(ticket = ticket.id))]
    pub fn export(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        ticket: &ExportTicket,
    ) -> TypestampResult<RasterImage> {
        self.flatten(design, fonts, None, ticket)
    }

    pub fn export_png(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        ticket: &ExportTicket,
    ) -> TypestampResult<Vec<u8>> {
        let raster = self.export(design, fonts, ticket)?;
        let png = encode_png(&raster)?;
        ticket.check()?;
        Ok(png)
    }

    /// Flatten only `ids` (visible ones) over the background.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(ticket = ticket.id, layers = ids.len())
    )]
    pub fn stamp(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        ids: &[LayerId],
        ticket: &ExportTicket,
    ) -> TypestampResult<RasterImage> {
        self.flatten(design, fonts, Some(ids), ticket)
    }

    /// Stamp `ids` and return the design with the result as background and those layers removed.
    pub fn stamp_into(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        ids: &[LayerId],
        ticket: &ExportTicket,
    ) -> TypestampResult<DesignState> {
        let raster = self.stamp(design, fonts, ids, ticket)?;
        design.with_stamp_applied(raster, ids)
    }

    fn flatten(
        &mut self,
        design: &DesignState,
        fonts: &mut FontBook,
        only: Option<&[LayerId]>,
        ticket: &ExportTicket,
    ) -> TypestampResult<RasterImage> {
        ticket.check()?;
        let cancelled = || ticket.is_superseded();
        let mut job = RenderJob::export().with_cancel(&cancelled);
        if let Some(ids) = only {
            job = job.with_only(ids);
        }
        let raster = self.compositor.render(design, fonts, &job)?;
        ticket.check()?;
        Ok(raster)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(RenderOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
