//! Draw commands.
//!
//! All rendering reduces to these primitives; a backend (canvas, SVG,
//! terminal) consumes the command stream without knowing which widget
//! produced it.

use crate::widget::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path and outline rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius in pixels
        radius: f32,
        /// Fill and stroke
        style: BoxStyle,
    },
    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Baseline position
        position: Point,
        /// Text style
        style: TextStyle,
    },
    /// Draw a polyline (open) or polygon (closed)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },
    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill and stroke
        style: BoxStyle,
    },
    /// Draw a filled arc (pie/doughnut slice)
    Arc {
        /// Center point
        center: Point,
        /// Outer radius
        radius: f32,
        /// Inner radius (> 0 for doughnut slices)
        inner_radius: f32,
        /// Start angle in radians
        start_angle: f32,
        /// End angle in radians
        end_angle: f32,
        /// Fill color
        color: Color,
    },
}

impl DrawCommand {
    /// Create a filled rectangle command.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: 0.0,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle command.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_style_fill() {
        let style = BoxStyle::fill(Color::WHITE);
        assert_eq!(style.fill, Some(Color::WHITE));
        assert!(style.stroke.is_none());
    }

    #[test]
    fn test_box_style_stroke() {
        let style = BoxStyle::stroke(StrokeStyle {
            color: Color::BLACK,
            width: 2.0,
        });
        assert!(style.fill.is_none());
        assert_eq!(style.stroke.unwrap().width, 2.0);
    }

    #[test]
    fn test_draw_command_serialization() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
