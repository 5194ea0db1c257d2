//! Modal dialog widget for overlay content.
//!
//! Hosts the event-details view: a centered panel over a backdrop. The modal
//! owns only open/close mechanics and chrome; the page controller lays out
//! whatever content belongs inside via [`Modal::content_bounds`].

use carbonview_core::{
    widget::{Canvas, FontWeight, LayoutResult, TextStyle},
    Color, Constraints, Event, Key, MouseButton, Point, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Modal size variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModalSize {
    /// Small modal (300px)
    Small,
    /// Medium modal (500px)
    #[default]
    Medium,
    /// Large modal (800px)
    Large,
}

impl ModalSize {
    /// Get the max width for this size.
    #[must_use]
    pub const fn max_width(&self) -> f32 {
        match self {
            Self::Small => 300.0,
            Self::Medium => 500.0,
            Self::Large => 800.0,
        }
    }
}

/// Reason the modal was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Closed via escape key
    Escape,
    /// Closed via backdrop click
    Backdrop,
    /// Closed via close button
    CloseButton,
    /// Closed programmatically
    Programmatic,
}

/// Message emitted when the modal is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalClosed {
    /// Reason for closure
    pub reason: CloseReason,
}

/// Modal dialog widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modal {
    open: bool,
    size: ModalSize,
    title: Option<String>,
    close_on_escape: bool,
    close_on_backdrop: bool,
    backdrop_color: Color,
    background: Color,
    padding: f32,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Modal {
    fn default() -> Self {
        Self {
            open: false,
            size: ModalSize::Medium,
            title: None,
            close_on_escape: true,
            close_on_backdrop: true,
            backdrop_color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            background: Color::WHITE,
            padding: 16.0,
            bounds: Rect::default(),
        }
    }
}

impl Modal {
    /// Create a closed modal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size.
    #[must_use]
    pub const fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Disable closing via the escape key.
    #[must_use]
    pub const fn static_escape(mut self) -> Self {
        self.close_on_escape = false;
        self
    }

    /// Disable closing via backdrop clicks.
    #[must_use]
    pub const fn static_backdrop(mut self) -> Self {
        self.close_on_backdrop = false;
        self
    }

    /// Open the modal.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the modal programmatically.
    pub fn close(&mut self) -> ModalClosed {
        self.open = false;
        ModalClosed {
            reason: CloseReason::Programmatic,
        }
    }

    /// Check if the modal is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Replace the title in place.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Get the title.
    #[must_use]
    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The centered panel rectangle.
    #[must_use]
    pub fn panel_rect(&self) -> Rect {
        let width = self.size.max_width().min(self.bounds.width - 32.0).max(0.0);
        let height = (self.bounds.height * 0.8).max(0.0);
        Rect::new(
            self.bounds.x + (self.bounds.width - width) / 2.0,
            self.bounds.y + (self.bounds.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Interior rectangle available to page-controller content, below the
    /// title bar.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        let panel = self.panel_rect().inset(self.padding);
        let title_height = if self.title.is_some() { 28.0 } else { 0.0 };
        Rect::new(
            panel.x,
            panel.y + title_height,
            panel.width,
            (panel.height - title_height).max(0.0),
        )
    }

    fn close_button_rect(&self) -> Rect {
        let panel = self.panel_rect();
        Rect::new(panel.x + panel.width - 28.0, panel.y + 8.0, 20.0, 20.0)
    }
}

impl Widget for Modal {
    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, constraints.max_height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.open {
            return;
        }
        canvas.fill_rect(self.bounds, self.backdrop_color);

        let panel = self.panel_rect();
        canvas.fill_round_rect(panel, 8.0, self.background);

        if let Some(ref title) = self.title {
            let style = TextStyle {
                size: 16.0,
                color: Color::rgb(0.1, 0.1, 0.1),
                weight: FontWeight::Bold,
            };
            canvas.draw_text(
                title,
                Point::new(panel.x + self.padding, panel.y + self.padding + 8.0),
                &style,
            );
        }

        // Close button
        let close = self.close_button_rect();
        let style = TextStyle {
            size: 14.0,
            color: Color::rgb(0.4, 0.4, 0.4),
            weight: FontWeight::Normal,
        };
        canvas.draw_text("×", Point::new(close.x + 6.0, close.y + 14.0), &style);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if !self.open {
            return None;
        }
        match event {
            Event::KeyDown { key: Key::Escape } if self.close_on_escape => {
                self.open = false;
                Some(Box::new(ModalClosed {
                    reason: CloseReason::Escape,
                }))
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.close_button_rect().contains_point(position) {
                    self.open = false;
                    return Some(Box::new(ModalClosed {
                        reason: CloseReason::CloseButton,
                    }));
                }
                if self.close_on_backdrop && !self.panel_rect().contains_point(position) {
                    self.open = false;
                    return Some(Box::new(ModalClosed {
                        reason: CloseReason::Backdrop,
                    }));
                }
                None
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        self.open
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
