//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: position self within allocated bounds
//! 3. **Paint**: generate draw commands for rendering
//!
//! Input is delivered through [`Widget::event`]; a widget may answer with a
//! boxed message that the owning page controller downcasts and routes.

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all dashboard views implement.
pub trait Widget: Send + Sync {
    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position self within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a filled rectangle with rounded corners.
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw a polyline.
    fn draw_path(&mut self, points: &[Point], color: Color, width: f32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a filled arc; `inner_radius > 0` cuts out a doughnut hole.
    fn fill_arc(
        &mut self,
        center: Point,
        radius: f32,
        inner_radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    );
}

/// Per-element visual state projected from the shared highlight selection.
///
/// Exactly one variant holds per element at a time; an element is never both
/// highlighted and dimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualFlag {
    /// No highlight active, or flags cleared
    #[default]
    Normal,
    /// Element belongs to the active category
    Highlighted,
    /// Another category is active
    Dimmed,
}

impl VisualFlag {
    /// Alpha multiplier applied to the element's fill when painted.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        match self {
            Self::Normal | Self::Highlighted => 1.0,
            Self::Dimmed => 0.35,
        }
    }
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}
