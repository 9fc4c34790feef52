use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{TypestampError, TypestampResult};

/// An encoded image as handed over by a caller or the generation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePayload {
    Bytes(Vec<u8>),
    /// `data:image/<type>;base64,<data>`
    DataUrl(String),
}

impl ImagePayload {
    pub fn decode(&self) -> TypestampResult<RasterImage> {
        match self {
            Self::Bytes(b) => decode_image(b),
            Self::DataUrl(url) => decode_image(&decode_data_url(url)?),
        }
    }
}

/// Decode any format the `image` crate recognizes into a premultiplied raster.
pub fn decode_image(bytes: &[u8]) -> TypestampResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| TypestampError::invalid_input(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_straight(width, height, rgba.into_raw())
}

/// Payload bytes of a base64 image data URL.
pub fn decode_data_url(url: &str) -> TypestampResult<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| TypestampError::invalid_input("data url must start with 'data:'"))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| TypestampError::invalid_input("data url has no ',' separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| TypestampError::invalid_input("data url is not base64 encoded"))?;
    if !mime.starts_with("image/") {
        return Err(TypestampError::invalid_input(format!(
            "data url carries '{mime}', expected an image"
        )));
    }
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| TypestampError::invalid_input(format!("data url base64: {e}")))
}

/// PNG bytes with straight alpha.
pub fn encode_png(img: &RasterImage) -> TypestampResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(img.width(), img.height(), img.to_straight())
        .ok_or_else(|| TypestampError::export("raster size does not match its buffer"))?;
    let mut out = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| TypestampError::export(format!("png encode: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/codec.rs"]
mod tests;
