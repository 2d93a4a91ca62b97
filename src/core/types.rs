use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Logical size of the drawing surface in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Fixed chart layout: outer viewport plus margins around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margin: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1100, 520),
            margin: Margins::new(54.0, 40.0, 72.0, 92.0),
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn inner_width(self) -> f64 {
        f64::from(self.viewport.width) - self.margin.left - self.margin.right
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        f64::from(self.viewport.height) - self.margin.top - self.margin.bottom
    }

    /// Translates a point from plotting-area coordinates into viewport coordinates.
    #[must_use]
    pub fn to_viewport(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margin.left, y + self.margin.top)
    }

    pub fn validate(self) -> ChartResult<()> {
        self.viewport.validate()?;
        for (side, value) in [
            ("top", self.margin.top),
            ("right", self.margin.right),
            ("bottom", self.margin.bottom),
            ("left", self.margin.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "layout margin `{side}` must be finite and >= 0"
                )));
            }
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "layout margins leave no plotting area".to_owned(),
            ));
        }
        Ok(())
    }
}
