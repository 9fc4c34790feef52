/// Face selection for measurement and drawing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontRequest {
    pub family: String,
    /// CSS weight, 1..=1000.
    pub weight: u16,
    pub italic: bool,
}

impl FontRequest {
    pub fn new(family: impl Into<String>, weight: u16, italic: bool) -> Self {
        Self {
            family: family.into(),
            weight,
            italic,
        }
    }
}

/// Measurement context the layout algorithms run against.
pub trait GlyphMeasure {
    /// Horizontal advance of `ch` at `size_px`, excluding letter spacing.
    fn advance(&mut self, font: &FontRequest, ch: char, size_px: f64) -> f64;
}

/// Every character advances by `em * size_px`. Used where no real face is needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub em: f64,
}

impl FixedAdvance {
    pub fn new(em: f64) -> Self {
        Self { em }
    }
}

impl GlyphMeasure for FixedAdvance {
    fn advance(&mut self, _font: &FontRequest, _ch: char, size_px: f64) -> f64 {
        self.em * size_px
    }
}
