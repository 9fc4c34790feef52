//! Typestamp composites styled text layers over a background raster.
//!
//! The pipeline is deterministic and CPU-only:
//!
//! - describe a [`DesignState`] (background plus [`TextLayer`]s in z-order)
//! - register fonts in a [`FontBook`]
//! - flatten it with a [`Compositor`] for previews or an [`Exporter`] for PNG output and stamps
//!
//! Pointer editing goes through the [`interaction`] state machine, which produces new
//! [`DesignState`] values instead of mutating layers in place.
#![forbid(unsafe_code)]

pub mod doc;
pub mod export;
pub mod foundation;
pub mod generate;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod scene;
pub mod text;

pub use crate::doc::DesignDoc;
pub use crate::export::{ExportTicket, Exporter, ImagePayload, encode_png};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, Canvas, Point, RasterImage, Rect, Vec2};
pub use crate::foundation::error::{TypestampError, TypestampResult};
pub use crate::generate::{GenerationError, ImageGenerator, apply_generated_image};
pub use crate::interaction::{Controller, InteractionMode, InteractionOpts, PointerEvent, Viewport};
pub use crate::layout::{FixedAdvance, GlyphMeasure, TextLayout, layout_layer};
pub use crate::render::{Compositor, RenderJob, RenderMode, RenderOpts};
pub use crate::scene::{
    Background, BlendMode, DesignState, LayerId, PathMode, Reorder, SpecialEffect, TextAlign,
    TextLayer,
};
pub use crate::text::{FaceStyle, FontBook};
