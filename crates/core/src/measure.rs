//! Text measurement hook for label alignment.
//!
//! Glyph shaping stays with the renderer; the layout engine only needs the
//! advance width of a single line to right-align percentage columns.

/// Measures the on-screen width of a single line of text, in the same
/// units as the chart geometry.
///
/// Implementations must be deterministic for layout to be reproducible.
pub trait TextMeasurer {
    fn width(&self, text: &str) -> f64;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> f64,
{
    fn width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Every character advances by the same amount.
///
/// Matches fixed-pitch bitmap fonts; the default suits an 8px font whose
/// glyphs are 5px wide plus 1px spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub advance: f64,
}

impl FixedAdvanceMeasurer {
    pub const DEFAULT_ADVANCE: f64 = 6.0;

    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADVANCE)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn width(&self, text: &str) -> f64 {
        self.advance * text.chars().count() as f64
    }
}
