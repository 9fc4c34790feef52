pub mod design;
pub mod layer;

pub use design::{Background, DesignState, Reorder};
pub use layer::{BlendMode, LayerId, PathMode, SpecialEffect, TextAlign, TextLayer};
