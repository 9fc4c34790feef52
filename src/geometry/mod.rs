pub mod path;

pub use path::{ArcLengthTable, PathBounds, PathSample, smooth_points};
