pub mod fonts;

pub use fonts::{FaceId, FaceStyle, FontBook, ShapedChar};
