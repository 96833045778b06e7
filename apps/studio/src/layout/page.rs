//! Page geometry for the resume layout engine.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::layout::LayoutError;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Tallest unit the engine ever has to keep together on one page:
/// section title band + gap + experience heading line + first description line.
pub const TALLEST_UNIT_MM: f32 = 8.0 + 2.0 + 6.0 + 5.0;

/// Printable paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Parses a paper size as it appears in configuration (`a4`, `letter`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }

    /// `(width, height)` in points.
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Layout parameters for every page of a generated resume.
///
/// Margins are in millimetres. `break_margin_mm` is the distance from the
/// bottom edge below which no line may start; crossing it flows onto a new page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_size: PageSize,
    pub family: FontFamily,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    pub break_margin_mm: f32,
}

/// Default page config: 10mm side and top margins, 15mm bottom break margin.
pub fn default_page_config(page_size: PageSize, family: FontFamily) -> PageConfig {
    PageConfig {
        page_size,
        family,
        margin_left_mm: 10.0,
        margin_right_mm: 10.0,
        margin_top_mm: 10.0,
        break_margin_mm: 15.0,
    }
}

impl PageConfig {
    pub fn page_width_pt(&self) -> f32 {
        self.page_size.dimensions_pt().0
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_size.dimensions_pt().1
    }

    pub fn left_pt(&self) -> f32 {
        self.margin_left_mm * MM
    }

    pub fn right_pt(&self) -> f32 {
        self.page_width_pt() - self.margin_right_mm * MM
    }

    pub fn top_pt(&self) -> f32 {
        self.margin_top_mm * MM
    }

    /// Usable text width between the side margins, in points.
    pub fn text_width_pt(&self) -> f32 {
        self.right_pt() - self.left_pt()
    }

    /// Y coordinate (from the top edge) past which a line no longer fits.
    pub fn break_trigger_pt(&self) -> f32 {
        self.page_height_pt() - self.break_margin_mm * MM
    }

    /// Checks that the geometry leaves room for every fixed band.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let margins = [
            ("margin_left_mm", self.margin_left_mm),
            ("margin_right_mm", self.margin_right_mm),
            ("margin_top_mm", self.margin_top_mm),
            ("break_margin_mm", self.break_margin_mm),
        ];
        for (name, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::ResourceInit(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.text_width_pt() <= 0.0 {
            return Err(LayoutError::ResourceInit(format!(
                "side margins leave no text width on {:?} paper",
                self.page_size
            )));
        }

        let usable = self.break_trigger_pt() - self.top_pt();
        if usable < TALLEST_UNIT_MM * MM {
            return Err(LayoutError::ResourceInit(format!(
                "vertical margins leave {:.1}mm per page, need at least {TALLEST_UNIT_MM}mm",
                usable / MM
            )));
        }
        Ok(())
    }
}
