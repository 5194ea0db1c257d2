//! Tooltip widget for contextual hover information.

use carbonview_core::{
    widget::{Canvas, LayoutResult, TextStyle},
    Color, Constraints, Event, Point, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Tooltip placement relative to the anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TooltipPlacement {
    /// Above the anchor
    #[default]
    Top,
    /// Below the anchor
    Bottom,
}

/// Tooltip widget for showing contextual information on hover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tooltip {
    content: String,
    placement: TooltipPlacement,
    visible: bool,
    background: Color,
    text_color: Color,
    padding: f32,
    text_size: f32,
    #[serde(skip)]
    anchor: Rect,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            content: String::new(),
            placement: TooltipPlacement::Top,
            visible: false,
            background: Color::rgba(0.15, 0.15, 0.15, 0.95),
            text_color: Color::WHITE,
            padding: 8.0,
            text_size: 12.0,
            anchor: Rect::default(),
            bounds: Rect::default(),
        }
    }
}

impl Tooltip {
    /// Create a tooltip with content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the placement.
    #[must_use]
    pub const fn placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Replace the tooltip content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Set the anchor rectangle the tooltip points at.
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }

    /// Show the tooltip.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the tooltip.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    fn bubble_rect(&self) -> Rect {
        let width = self.content.len() as f32 * self.text_size * 0.55 + self.padding * 2.0;
        let height = self.text_size + self.padding * 2.0;
        let x = self.anchor.x + self.anchor.width / 2.0 - width / 2.0;
        let y = match self.placement {
            TooltipPlacement::Top => self.anchor.y - height - 6.0,
            TooltipPlacement::Bottom => self.anchor.y + self.anchor.height + 6.0,
        };
        Rect::new(x, y, width, height)
    }
}

impl Widget for Tooltip {
    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.bubble_rect().size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.visible || self.content.is_empty() {
            return;
        }
        let bubble = self.bubble_rect();
        canvas.fill_round_rect(bubble, 4.0, self.background);
        let style = TextStyle {
            size: self.text_size,
            color: self.text_color,
            ..TextStyle::default()
        };
        canvas.draw_text(
            &self.content,
            Point::new(bubble.x + self.padding, bubble.y + self.padding + self.text_size * 0.8),
            &style,
        );
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonview_core::RecordingCanvas;

    #[test]
    fn test_tooltip_hidden_by_default() {
        let tooltip = Tooltip::new("Carbon footprint impact");
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_tooltip_show_hide() {
        let mut tooltip = Tooltip::new("Carbon footprint impact");
        tooltip.show();
        assert!(tooltip.is_visible());
        tooltip.hide();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_hidden_tooltip_paints_nothing() {
        let tooltip = Tooltip::new("Carbon footprint impact");
        let mut canvas = RecordingCanvas::new();
        tooltip.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_visible_tooltip_paints_bubble_and_text() {
        let mut tooltip = Tooltip::new("Carbon footprint impact");
        tooltip.set_anchor(Rect::new(100.0, 100.0, 40.0, 20.0));
        tooltip.show();

        let mut canvas = RecordingCanvas::new();
        tooltip.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 2);
        assert_eq!(
            canvas.texts().collect::<Vec<_>>(),
            vec!["Carbon footprint impact"]
        );
    }

    #[test]
    fn test_top_placement_sits_above_anchor() {
        let mut tooltip = Tooltip::new("hint");
        tooltip.set_anchor(Rect::new(100.0, 100.0, 40.0, 20.0));
        let bubble = tooltip.bubble_rect();
        assert!(bubble.y + bubble.height < 100.0);
    }

    #[test]
    fn test_bottom_placement_sits_below_anchor() {
        let mut tooltip = Tooltip::new("hint").placement(TooltipPlacement::Bottom);
        tooltip.set_anchor(Rect::new(100.0, 100.0, 40.0, 20.0));
        let bubble = tooltip.bubble_rect();
        assert!(bubble.y > 120.0);
    }
}
