use std::collections::HashMap;

use crate::foundation::core::Canvas;
use crate::foundation::error::{TypestampError, TypestampResult};

/// Limits for retained scratch surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfacePoolOpts {
    /// Maximum bytes retained across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained surfaces per size bucket.
    pub max_surfaces_per_bucket: usize,
}

impl Default for SurfacePoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 256 * 1024 * 1024,
            max_surfaces_per_bucket: 4,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfacePoolStats {
    pub retained_surfaces: usize,
    pub retained_bytes: usize,
    pub alloc_surfaces: u64,
    pub alloc_bytes: u64,
    pub dropped_on_release: u64,
}

/// Bounded pool of cleared pixmaps, keyed by size.
///
/// The compositor borrows one scratch surface per layer and one per pass, so reuse across layers
/// and frames avoids reallocating canvas-sized buffers.
pub(crate) struct SurfacePool {
    opts: SurfacePoolOpts,
    stats: SurfacePoolStats,
    buckets: HashMap<(u16, u16), Vec<vello_cpu::Pixmap>>,
}

impl SurfacePool {
    pub(crate) fn new(opts: SurfacePoolOpts) -> Self {
        Self {
            opts,
            stats: SurfacePoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    pub(crate) fn stats(&self) -> SurfacePoolStats {
        self.stats.clone()
    }

    /// A fully transparent pixmap of the canvas size.
    pub(crate) fn borrow(&mut self, canvas: Canvas) -> TypestampResult<vello_cpu::Pixmap> {
        let key = surface_key(canvas)?;
        let bytes = canvas.rgba_len();
        if let Some(mut p) = self.buckets.get_mut(&key).and_then(Vec::pop) {
            self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(bytes);
            p.data_as_u8_slice_mut().fill(0);
            return Ok(p);
        }

        self.stats.alloc_surfaces = self.stats.alloc_surfaces.saturating_add(1);
        self.stats.alloc_bytes = self.stats.alloc_bytes.saturating_add(bytes as u64);
        Ok(vello_cpu::Pixmap::new(key.0, key.1))
    }

    pub(crate) fn release(&mut self, pixmap: vello_cpu::Pixmap) {
        let key = (pixmap.width(), pixmap.height());
        let bytes = (key.0 as usize) * (key.1 as usize) * 4;
        if self.opts.max_surfaces_per_bucket == 0
            || self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes
        {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bucket = self.buckets.entry(key).or_default();
        if bucket.len() >= self.opts.max_surfaces_per_bucket {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }
        bucket.push(pixmap);
        self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }
}

fn surface_key(canvas: Canvas) -> TypestampResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TypestampError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TypestampError::render("surface height exceeds u16"))?;
    Ok((w, h))
}
