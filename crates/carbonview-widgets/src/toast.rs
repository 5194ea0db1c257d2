//! Toast notification widget with an independent auto-dismiss countdown.
//!
//! Each toast owns its own remaining lifetime; a burst of toasts dismisses
//! one by one on each toast's own schedule, never on a shared timer.

use carbonview_core::{
    widget::{Canvas, LayoutResult, TextStyle},
    Color, Constraints, Event, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToastKind {
    /// Informational
    #[default]
    Info,
    /// Success
    Success,
    /// Error
    Error,
}

impl ToastKind {
    fn color(self) -> Color {
        match self {
            Self::Info => Color::rgb(0.2, 0.6, 0.86),
            Self::Success => Color::rgb(0.18, 0.8, 0.44),
            Self::Error => Color::rgb(0.91, 0.3, 0.24),
        }
    }
}

/// Message emitted when a toast's countdown expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastExpired;

/// A single toast notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    remaining_ms: u32,
    #[serde(skip)]
    bounds: Rect,
}

impl Toast {
    /// Default display duration, matching the reference UI.
    pub const DEFAULT_DURATION_MS: u32 = 3000;

    /// Create a toast with the default duration.
    #[must_use]
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self::with_duration(message, kind, Self::DEFAULT_DURATION_MS)
    }

    /// Create a toast with an explicit duration.
    #[must_use]
    pub fn with_duration(message: impl Into<String>, kind: ToastKind, duration_ms: u32) -> Self {
        Self {
            message: message.into(),
            kind,
            remaining_ms: duration_ms,
            bounds: Rect::default(),
        }
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the kind.
    #[must_use]
    pub const fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Remaining lifetime in milliseconds.
    #[must_use]
    pub const fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Advance the countdown; returns true when the toast has expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.is_expired()
    }

    /// Check if the countdown has run out.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }
}

impl Widget for Toast {
    fn measure(&self, constraints: Constraints) -> Size {
        let width = self.message.len() as f32 * 7.0 + 32.0;
        constraints.constrain(Size::new(width, 40.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.is_expired() {
            return;
        }
        canvas.fill_round_rect(self.bounds, 6.0, self.kind.color());
        let style = TextStyle {
            size: 13.0,
            color: Color::WHITE,
            ..TextStyle::default()
        };
        canvas.draw_text(
            &self.message,
            carbonview_core::Point::new(self.bounds.x + 16.0, self.bounds.y + 24.0),
            &style,
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::Tick { elapsed_ms } = event {
            if !self.is_expired() && self.tick(*elapsed_ms) {
                return Some(Box::new(ToastExpired));
            }
        }
        None
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
