//! Canvas implementations for rendering.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, Point, Rect};

/// A Canvas implementation that records draw operations as [`DrawCommand`]s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (ship commands to a remote/browser backend)
/// - Diffing (compare render outputs between frames)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Iterate over the text contents of recorded `Text` commands.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Iterate over the bounds of recorded filled `Rect` commands.
    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect { bounds, style, .. } => style.fill.map(|fill| (*bounds, fill)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius: 0.0,
            style: BoxStyle::fill(color),
        });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::fill(color),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius: 0.0,
            style: BoxStyle::stroke(StrokeStyle { color, width }),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Path {
            points: vec![from, to],
            closed: false,
            style: StrokeStyle { color, width },
        });
    }

    fn draw_path(&mut self, points: &[Point], color: Color, width: f32) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            closed: false,
            style: StrokeStyle { color, width },
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::filled_circle(center, radius, color));
    }

    fn fill_arc(
        &mut self,
        center: Point,
        radius: f32,
        inner_radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            inner_radius,
            start_angle,
            end_angle,
            color,
        });
    }
}
