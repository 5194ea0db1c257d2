//! Theme system carrying the dashboard color palettes.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// The base color palette shared by dashboard chrome and charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Primary brand color
    pub primary: Color,
    /// Secondary brand color
    pub secondary: Color,
    /// Warning color
    pub warning: Color,
    /// Error/danger color
    pub danger: Color,
    /// Light surface color
    pub light: Color,
    /// Dark text color
    pub dark: Color,
    /// Muted gray
    pub gray: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::employee()
    }
}

impl ColorPalette {
    /// Palette used on employee-facing pages.
    #[must_use]
    pub fn employee() -> Self {
        Self {
            primary: rgb8(0x2E, 0xCC, 0x71),
            secondary: rgb8(0x34, 0x98, 0xDB),
            warning: rgb8(0xF1, 0xC4, 0x0F),
            danger: rgb8(0xE7, 0x4C, 0x3C),
            light: rgb8(0xF9, 0xFA, 0xFB),
            dark: rgb8(0x2C, 0x3E, 0x50),
            gray: rgb8(0x95, 0xA5, 0xA6),
        }
    }

    /// Palette used on company-wide pages.
    #[must_use]
    pub fn company() -> Self {
        Self {
            primary: rgb8(0x34, 0xA8, 0x53),
            secondary: rgb8(0x42, 0x85, 0xF4),
            warning: rgb8(0xFB, 0xBC, 0x05),
            danger: rgb8(0xEA, 0x43, 0x35),
            light: rgb8(0xEC, 0xF0, 0xF1),
            dark: rgb8(0x2C, 0x3E, 0x50),
            gray: rgb8(0x95, 0xA5, 0xA6),
        }
    }

    /// Translucent fill variant of a palette color, for area fills under
    /// chart lines.
    #[must_use]
    pub fn alpha(color: Color, alpha: f32) -> Color {
        Color::rgba(color.r, color.g, color.b, alpha)
    }
}

/// Colors keyed to footprint categories and emission sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPalette {
    /// Personal category
    pub personal: Color,
    /// Business travel category
    pub travel: Color,
    /// Office usage category
    pub office: Color,
    /// Transactions category
    pub transactions: Color,
    /// Per-source colors for event emission breakdowns, in wire order:
    /// travel, venue, accommodation, catering, materials, digital.
    pub emission_sources: [Color; 6],
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            personal: rgb8(0x4E, 0x79, 0xA7),
            travel: rgb8(0xF2, 0x8E, 0x2C),
            office: rgb8(0xE1, 0x57, 0x59),
            transactions: rgb8(0x76, 0xB7, 0xB2),
            emission_sources: [
                rgb8(0x34, 0x98, 0xDB),
                rgb8(0xE7, 0x4C, 0x3C),
                rgb8(0xF3, 0x9C, 0x12),
                rgb8(0x2E, 0xCC, 0x71),
                rgb8(0x9B, 0x59, 0xB6),
                rgb8(0x1A, 0xBC, 0x9C),
            ],
        }
    }
}

impl ChartPalette {
    /// Look up the color for a main category id.
    ///
    /// Subcategory ids resolve through their parent: `personal-commute`
    /// yields the personal color. Unknown ids fall back to a neutral gray.
    #[must_use]
    pub fn for_category(&self, category_id: &str) -> Color {
        let main = category_id.split('-').next().unwrap_or(category_id);
        match main {
            "personal" => self.personal,
            "travel" => self.travel,
            "office" => self.office,
            "transactions" => self.transactions,
            _ => rgb8(0xCC, 0xCC, 0xCC),
        }
    }
}

/// A complete theme: base palette plus chart category colors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Theme {
    /// Base palette
    pub palette: ColorPalette,
    /// Chart category colors
    pub chart: ChartPalette,
}

impl Theme {
    /// Theme for employee-facing pages.
    #[must_use]
    pub fn employee() -> Self {
        Self {
            palette: ColorPalette::employee(),
            chart: ChartPalette::default(),
        }
    }

    /// Theme for company-wide pages.
    #[must_use]
    pub fn company() -> Self {
        Self {
            palette: ColorPalette::company(),
            chart: ChartPalette::default(),
        }
    }
}

fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::rgb(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    )
}
