use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::export::codec::{ImagePayload, decode_image};
use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, RasterImage};
use crate::foundation::error::{TypestampError, TypestampResult};
use crate::scene::design::{Background, DesignState};
use crate::scene::layer::{LayerId, TextLayer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Image,
    #[default]
    Solid,
}

/// JSON design document: a background description plus layers in z-order (first is bottom).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDoc {
    #[serde(default)]
    pub background_type: BackgroundType,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    /// Canvas size of a solid background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// File path (relative to the document) or `data:` URL of an image background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub layers: Vec<TextLayer>,
}

fn default_background_color() -> Color {
    Color::BLACK
}

impl DesignDoc {
    pub fn from_json(json: &str) -> TypestampResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TypestampError::invalid_input(format!("design document: {e}")))
    }

    pub fn to_json_pretty(&self) -> TypestampResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TypestampError::Other(e.into()))
    }

    /// Resolve the background and build the editor state.
    ///
    /// Layers keep their ids when all are non-zero and unique; otherwise they are renumbered
    /// from 1 in document order.
    pub fn into_design(self, base_dir: &Path) -> TypestampResult<DesignState> {
        let background = match self.background_type {
            BackgroundType::Solid => {
                let (Some(w), Some(h)) = (self.width, self.height) else {
                    return Err(TypestampError::invalid_input(
                        "solid background needs width and height",
                    ));
                };
                Background::Solid {
                    color: self.background_color,
                    canvas: Canvas::new(w, h)?,
                }
            }
            BackgroundType::Image => {
                let src = self.background_image.as_deref().ok_or_else(|| {
                    TypestampError::invalid_input("image background needs backgroundImage")
                })?;
                Background::Image(load_background(src, base_dir)?)
            }
        };

        let mut layers = self.layers;
        let mut seen = HashSet::with_capacity(layers.len());
        let keep_ids = layers.iter().all(|l| l.id.0 != 0 && seen.insert(l.id));
        if !keep_ids {
            for (i, l) in layers.iter_mut().enumerate() {
                l.id = LayerId(i as u64 + 1);
            }
        }
        DesignState::from_layers(background, layers)
    }
}

fn load_background(src: &str, base_dir: &Path) -> TypestampResult<RasterImage> {
    if src.trim_start().starts_with("data:") {
        return ImagePayload::DataUrl(src.to_owned()).decode();
    }
    let path = base_dir.join(src);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read background image {}", path.display()))
        .map_err(|e| TypestampError::invalid_input(format!("{e:#}")))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../tests/unit/doc.rs"]
mod tests;
