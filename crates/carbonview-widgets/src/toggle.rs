//! Grouped option toggle.
//!
//! Backs the visualization selector (doughnut / bar / treemap), the event
//! type selector (virtual / in-person) and the quarterly / monthly trend
//! toggle: a row of labeled options of which exactly one is active.

use carbonview_core::{
    widget::{Canvas, FontWeight, LayoutResult, TextStyle},
    Color, Constraints, Event, MouseButton, Point, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when the active option changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleChanged {
    /// Id of the newly active option
    pub id: String,
    /// Index of the newly active option
    pub index: usize,
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOption {
    /// Stable option id (`doughnut`, `treemap`, `virtual`, ...)
    pub id: String,
    /// Display label
    pub label: String,
}

impl ToggleOption {
    /// Create an option.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A row of mutually exclusive options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleGroup {
    options: Vec<ToggleOption>,
    active: usize,
    option_width: f32,
    option_height: f32,
    active_color: Color,
    inactive_color: Color,
    label_color: Color,
    #[serde(skip)]
    bounds: Rect,
}

impl ToggleGroup {
    /// Create a toggle group; the first option starts active.
    #[must_use]
    pub fn new(options: Vec<ToggleOption>) -> Self {
        Self {
            options,
            active: 0,
            option_width: 110.0,
            option_height: 32.0,
            active_color: Color::rgb(0.18, 0.55, 0.34),
            inactive_color: Color::rgb(0.92, 0.94, 0.95),
            label_color: Color::rgb(0.17, 0.24, 0.31),
            bounds: Rect::default(),
        }
    }

    /// Set the starting active option by id; unknown ids are ignored.
    #[must_use]
    pub fn active_id(mut self, id: &str) -> Self {
        if let Some(index) = self.options.iter().position(|o| o.id == id) {
            self.active = index;
        }
        self
    }

    /// Set per-option dimensions.
    #[must_use]
    pub fn option_size(mut self, width: f32, height: f32) -> Self {
        self.option_width = width.max(20.0);
        self.option_height = height.max(16.0);
        self
    }

    /// Get the active option.
    #[must_use]
    pub fn active(&self) -> &ToggleOption {
        &self.options[self.active]
    }

    /// Get the active index.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Get all options.
    #[must_use]
    pub fn options(&self) -> &[ToggleOption] {
        &self.options
    }

    /// Activate an option by index. Returns the change message, or `None`
    /// when the index is out of range or already active.
    pub fn activate(&mut self, index: usize) -> Option<ToggleChanged> {
        if index >= self.options.len() || index == self.active {
            return None;
        }
        self.active = index;
        Some(ToggleChanged {
            id: self.options[index].id.clone(),
            index,
        })
    }

    fn option_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.bounds.x + index as f32 * self.option_width,
            self.bounds.y,
            self.option_width,
            self.option_height,
        )
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.options.len()).find(|&i| self.option_rect(i).contains_point(&Point::new(x, y)))
    }
}

impl Widget for ToggleGroup {
    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(
            self.option_width * self.options.len() as f32,
            self.option_height,
        );
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for (i, option) in self.options.iter().enumerate() {
            let rect = self.option_rect(i);
            let (fill, text) = if i == self.active {
                (self.active_color, Color::WHITE)
            } else {
                (self.inactive_color, self.label_color)
            };
            canvas.fill_round_rect(rect, 4.0, fill);
            let style = TextStyle {
                size: 13.0,
                color: text,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(
                &option.label,
                Point::new(rect.x + 10.0, rect.y + rect.height / 2.0 + 4.0),
                &style,
            );
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::MouseDown {
            position,
            button: MouseButton::Left,
        } = event
        {
            if let Some(index) = self.hit_test(position.x, position.y) {
                if let Some(changed) = self.activate(index) {
                    return Some(Box::new(changed));
                }
            }
        }
        None
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
