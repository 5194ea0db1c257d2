//! Interactive category rows.
//!
//! The list mirrors the chart views: one row per main footprint category,
//! expandable to show its subcategory split, hover/click reported upward and
//! highlight/dim state projected back in by the page controller.

use carbonview_core::{
    widget::{Canvas, FontWeight, LayoutResult, TextStyle},
    ChartPalette, Color, Constraints, Event, MouseButton, Point, Rect, Size, VisualFlag, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when the pointer enters a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHovered {
    /// Category id of the hovered row
    pub category: String,
}

/// Message emitted when the pointer leaves all rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowExited;

/// Message emitted when a row is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClicked {
    /// Category id of the clicked row
    pub category: String,
}

/// One category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Main category id
    pub category: String,
    /// Display label
    pub label: String,
    /// Category total in kg CO₂e
    pub value: f64,
    /// Subcategory `(label, value)` pairs shown when expanded
    pub details: Vec<(String, f64)>,
    /// Whether the row is expanded
    pub expanded: bool,
    /// Projected visual flag
    pub flag: VisualFlag,
}

impl CategoryRow {
    /// Create a collapsed row.
    #[must_use]
    pub fn new(category: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            label: label.into(),
            value,
            details: Vec::new(),
            expanded: false,
            flag: VisualFlag::Normal,
        }
    }

    /// Attach subcategory detail lines.
    #[must_use]
    pub fn details(mut self, details: Vec<(String, f64)>) -> Self {
        self.details = details;
        self
    }

    fn height(&self) -> f32 {
        if self.expanded {
            44.0 + self.details.len() as f32 * 22.0
        } else {
            44.0
        }
    }
}

/// The interactive category list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    rows: Vec<CategoryRow>,
    palette: ChartPalette,
    #[serde(skip)]
    hovered: Option<String>,
    #[serde(skip)]
    bounds: Rect,
}

impl CategoryList {
    /// Create a list from rows.
    #[must_use]
    pub fn new(rows: Vec<CategoryRow>) -> Self {
        Self {
            rows,
            palette: ChartPalette::default(),
            hovered: None,
            bounds: Rect::default(),
        }
    }

    /// Set the palette.
    #[must_use]
    pub fn palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Get the rows.
    #[must_use]
    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    /// Project a visual flag onto one row; unknown categories are skipped.
    pub fn set_flag(&mut self, category: &str, flag: VisualFlag) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.category == category) {
            row.flag = flag;
        }
    }

    /// Reset every row to [`VisualFlag::Normal`].
    pub fn clear_flags(&mut self) {
        for row in &mut self.rows {
            row.flag = VisualFlag::Normal;
        }
    }

    /// Toggle a row's expanded state; returns the new state, or `None` for
    /// unknown categories.
    pub fn toggle_expanded(&mut self, category: &str) -> Option<bool> {
        let row = self.rows.iter_mut().find(|r| r.category == category)?;
        row.expanded = !row.expanded;
        Some(row.expanded)
    }

    /// Expand a row (category detail view); unknown categories are skipped.
    pub fn expand(&mut self, category: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.category == category) {
            row.expanded = true;
        }
    }

    fn row_rect(&self, index: usize) -> Rect {
        let mut y = self.bounds.y;
        for row in self.rows.iter().take(index) {
            y += row.height() + 4.0;
        }
        Rect::new(
            self.bounds.x,
            y,
            self.bounds.width,
            self.rows[index].height(),
        )
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.rows.len()).find(|&i| self.row_rect(i).contains_point(&Point::new(x, y)))
    }
}

impl Widget for CategoryList {
    fn measure(&self, constraints: Constraints) -> Size {
        let height: f32 = self.rows.iter().map(|r| r.height() + 4.0).sum();
        constraints.constrain(Size::new(constraints.max_width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for (i, row) in self.rows.iter().enumerate() {
            let rect = self.row_rect(i);
            let mut chip_color = self.palette.for_category(&row.category);
            chip_color.a *= row.flag.alpha();

            let background = match row.flag {
                VisualFlag::Highlighted => Color::rgb(0.95, 0.97, 1.0),
                VisualFlag::Dimmed => Color::rgba(0.97, 0.97, 0.97, 0.6),
                VisualFlag::Normal => Color::rgb(0.98, 0.98, 0.98),
            };
            canvas.fill_round_rect(rect, 6.0, background);
            canvas.fill_rect(Rect::new(rect.x + 10.0, rect.y + 14.0, 16.0, 16.0), chip_color);

            let label_style = TextStyle {
                size: 14.0,
                color: Color::rgb(0.17, 0.24, 0.31),
                weight: FontWeight::Bold,
            };
            canvas.draw_text(
                &row.label,
                Point::new(rect.x + 36.0, rect.y + 26.0),
                &label_style,
            );

            let value_style = TextStyle {
                size: 13.0,
                color: Color::rgb(0.4, 0.45, 0.5),
                weight: FontWeight::Normal,
            };
            let value_text = format!("{:.1} kg CO₂", row.value);
            canvas.draw_text(
                &value_text,
                Point::new(
                    rect.x + rect.width - value_text.len() as f32 * 7.0 - 10.0,
                    rect.y + 26.0,
                ),
                &value_style,
            );

            if row.expanded {
                for (d, (label, value)) in row.details.iter().enumerate() {
                    let y = rect.y + 44.0 + d as f32 * 22.0 + 14.0;
                    canvas.draw_text(
                        &format!("{label}: {value:.1} kg"),
                        Point::new(rect.x + 36.0, y),
                        &value_style,
                    );
                }
            }
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                let hit = self
                    .hit_test(position.x, position.y)
                    .map(|i| self.rows[i].category.clone());
                if hit == self.hovered {
                    return None;
                }
                self.hovered = hit.clone();
                match hit {
                    Some(category) => Some(Box::new(RowHovered { category })),
                    None => Some(Box::new(RowExited)),
                }
            }
            Event::MouseLeave => {
                if self.hovered.take().is_some() {
                    Some(Box::new(RowExited))
                } else {
                    None
                }
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.hit_test(position.x, position.y).map(|i| {
                Box::new(RowClicked {
                    category: self.rows[i].category.clone(),
                }) as Box<dyn Any + Send>
            }),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
