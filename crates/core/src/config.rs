use f3pie_protocol::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted `percent_per_step`; a full slice then needs 10 001 wedges.
pub const MIN_PERCENT_PER_STEP: f64 = 0.01;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid style JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Geometry of the pie overlay.
///
/// Distances are in screen units relative to the chart center unless noted.
/// Any field omitted from a JSON override keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PieStyle {
    /// Horizontal radius of the ellipse.
    pub radius_x: f64,
    /// Vertical radius as a fraction of `radius_x`.
    pub vertical_squash: f64,
    /// Length of the vertical rim strokes.
    pub rim_depth: f64,
    /// Percent-units covered by one tessellation step.
    pub percent_per_step: f64,

    pub panel_half_width: f64,
    /// How far the background panel reaches above the center.
    pub panel_top: f64,
    /// How far the background panel reaches below the center.
    pub panel_bottom: f64,
    pub panel_alpha: u8,

    /// Half the width of the label block; labels start at `-label_half_width`
    /// and right-align to `+label_half_width`.
    pub label_half_width: f64,
    /// Heading row distance above the center.
    pub heading_offset: f64,
    /// First sibling row distance below the center.
    pub legend_offset: f64,
    pub row_height: f64,
    /// Gap between the self-percent column's right edge and the label block's.
    pub local_percent_inset: f64,

    /// Gap between the chart and the right edge of the screen.
    pub screen_margin: f64,
    /// Space reserved below the center at the bottom of the screen.
    pub bottom_reserve: f64,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            radius_x: 160.0,
            vertical_squash: 0.5,
            rim_depth: 10.0,
            percent_per_step: 4.0,
            panel_half_width: 176.0,
            panel_top: 96.0 + 16.0,
            panel_bottom: 320.0,
            panel_alpha: 200,
            label_half_width: 160.0,
            heading_offset: 80.0 + 16.0,
            legend_offset: 80.0 + 20.0,
            row_height: 8.0,
            local_percent_inset: 50.0,
            screen_margin: 10.0,
            bottom_reserve: 320.0,
        }
    }
}

impl PieStyle {
    /// Load a style from JSON, starting from the defaults.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let style: Self = serde_json::from_slice(data)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("radius_x", self.radius_x),
            ("vertical_squash", self.vertical_squash),
            ("rim_depth", self.rim_depth),
            ("panel_half_width", self.panel_half_width),
            ("panel_top", self.panel_top),
            ("panel_bottom", self.panel_bottom),
            ("label_half_width", self.label_half_width),
            ("row_height", self.row_height),
            ("screen_margin", self.screen_margin),
            ("bottom_reserve", self.bottom_reserve),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if !self.percent_per_step.is_finite() || self.percent_per_step < MIN_PERCENT_PER_STEP {
            return Err(ConfigError::OutOfRange {
                field: "percent_per_step",
                value: self.percent_per_step,
            });
        }
        Ok(())
    }

    pub fn radius_y(&self) -> f64 {
        self.radius_x * self.vertical_squash
    }

    /// Where the chart center sits on a screen of the given size: hugging
    /// the right edge, with `bottom_reserve` below it.
    pub fn anchor_for_screen(&self, width: f64, height: f64) -> Point {
        Point::new(
            width - self.radius_x - self.screen_margin,
            height - self.bottom_reserve,
        )
    }
}
