//! `Treemap` widget: paints a hierarchical breakdown as an area-proportional
//! cell grid and reports hover/click interaction on cells.
//!
//! The widget never decides highlight state itself. It reports interaction
//! upward and paints whatever per-cell [`VisualFlag`]s the page controller
//! projected onto it.

use carbonview_core::{
    widget::{Canvas, FontWeight, LayoutResult, TextStyle},
    ChartPalette, Color, Constraints, Event, MouseButton, Point, Rect, Size, VisualFlag, Widget,
};
use carbonview_layout::{compute_layout, TreemapConfig, TreemapLayout, TreemapNode};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;

/// Message emitted when the pointer enters a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellHovered {
    /// Category id of the hovered cell
    pub category: String,
}

/// Message emitted when the pointer leaves all cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellExited;

/// Message emitted when a cell is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellClicked {
    /// Category id of the clicked cell
    pub category: String,
}

/// `Treemap` widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treemap {
    /// The weighted tree to lay out
    tree: TreemapNode,
    /// Layout configuration
    config: TreemapConfig,
    /// Category colors
    palette: ChartPalette,
    /// Fixed height of the treemap area
    height: f32,
    /// Whether the containing view is currently shown
    visible: bool,
    /// Per-cell visual flags, projected by the page controller
    flags: HashMap<String, VisualFlag>,
    #[serde(skip)]
    layout_result: Option<TreemapLayout>,
    #[serde(skip)]
    hovered: Option<String>,
    #[serde(skip)]
    bounds: Rect,
}

impl Treemap {
    /// Create a treemap for a weighted tree.
    #[must_use]
    pub fn new(tree: TreemapNode) -> Self {
        Self {
            tree,
            config: TreemapConfig::default(),
            palette: ChartPalette::default(),
            height: 350.0,
            visible: true,
            flags: HashMap::new(),
            layout_result: None,
            hovered: None,
            bounds: Rect::default(),
        }
    }

    /// Set the layout configuration.
    #[must_use]
    pub fn config(mut self, config: TreemapConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the category palette.
    #[must_use]
    pub fn palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the fixed height.
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Toggle visibility; becoming visible forces a fresh layout pass the
    /// next time bounds arrive, because a hidden container reported zero
    /// width and any cached layout is useless.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.layout_result = None;
        }
        self.visible = visible;
    }

    /// Check visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace all visual flags with a fresh projection.
    pub fn set_flags(&mut self, flags: HashMap<String, VisualFlag>) {
        self.flags = flags;
    }

    /// Clear all visual flags.
    pub fn clear_flags(&mut self) {
        self.flags.clear();
    }

    /// Get the flag for a cell.
    #[must_use]
    pub fn flag(&self, category: &str) -> VisualFlag {
        self.flags.get(category).copied().unwrap_or_default()
    }

    /// The most recent layout pass, if one has run.
    #[must_use]
    pub const fn current_layout(&self) -> Option<&TreemapLayout> {
        self.layout_result.as_ref()
    }

    /// The currently hovered category, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Color for a cell: the parent category color, shaded per subcategory
    /// so siblings stay distinguishable.
    #[must_use]
    pub fn cell_color(&self, category: &str) -> Color {
        let base = self.palette.for_category(category);
        match category {
            "personal-home" | "office-equipment" => base.lighten(0.3),
            "personal-diet" | "office-supplies" => base.darken(0.3),
            _ => base,
        }
    }

    fn relayout(&mut self) {
        let size = Size::new(self.bounds.width, self.height.min(self.bounds.height));
        if size.is_degenerate() {
            self.layout_result = None;
            return;
        }
        let mut layout = compute_layout(&self.tree, size, &self.config);
        // compute_layout works in local coordinates; shift into widget space.
        layout.content.x0 += self.bounds.x;
        layout.content.x1 += self.bounds.x;
        layout.content.y0 += self.bounds.y;
        layout.content.y1 += self.bounds.y;
        for cell in &mut layout.cells {
            cell.rect.x0 += self.bounds.x;
            cell.rect.x1 += self.bounds.x;
            cell.rect.y0 += self.bounds.y;
            cell.rect.y1 += self.bounds.y;
            cell.partition.x0 += self.bounds.x;
            cell.partition.x1 += self.bounds.x;
            cell.partition.y0 += self.bounds.y;
            cell.partition.y1 += self.bounds.y;
        }
        self.layout_result = Some(layout);
    }

    fn paint_cell_labels(
        &self,
        canvas: &mut dyn Canvas,
        cell: &carbonview_layout::TreemapCell,
    ) {
        if cell.show_label {
            let name_style = TextStyle {
                size: 14.0,
                color: Color::WHITE,
                weight: FontWeight::Bold,
            };
            canvas.draw_text(
                &cell.label,
                Point::new(cell.rect.x0 + 5.0, cell.rect.y0 + 20.0),
                &name_style,
            );
        }
        if cell.show_detail {
            let detail_style = TextStyle {
                size: 12.0,
                color: Color::WHITE,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(
                &format!("{:.1} kg", cell.weight),
                Point::new(cell.rect.x0 + 5.0, cell.rect.y0 + 40.0),
                &detail_style,
            );
            let pct = (cell.fraction * 100.0).round();
            canvas.draw_text(
                &format!("{pct:.0}%"),
                Point::new(cell.rect.x0 + 5.0, cell.rect.y0 + 60.0),
                &detail_style,
            );
        }
    }
}

impl Widget for Treemap {
    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, self.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        if self.visible {
            self.relayout();
        } else {
            self.layout_result = None;
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.visible {
            return;
        }
        let Some(layout) = self.layout_result.as_ref() else {
            return;
        };

        for cell in &layout.cells {
            if cell.rect.area() <= 0.0 {
                continue;
            }
            let flag = self.flag(&cell.id);
            let mut color = self.cell_color(&cell.id);
            color.a *= flag.alpha();

            canvas.fill_round_rect(cell.rect.to_rect(), 4.0, color);
            canvas.stroke_rect(cell.rect.to_rect(), Color::WHITE, 1.0);
            if flag == VisualFlag::Highlighted {
                canvas.stroke_rect(cell.rect.to_rect(), Color::WHITE, 2.0);
            }
            self.paint_cell_labels(canvas, cell);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if !self.visible {
            return None;
        }
        match event {
            Event::MouseMove { position } => {
                let hit = self
                    .layout_result
                    .as_ref()
                    .and_then(|l| l.cell_at(position.x, position.y))
                    .map(|cell| cell.id.clone());
                if hit == self.hovered {
                    return None;
                }
                self.hovered = hit.clone();
                match hit {
                    Some(category) => Some(Box::new(CellHovered { category })),
                    None => Some(Box::new(CellExited)),
                }
            }
            Event::MouseLeave => {
                if self.hovered.take().is_some() {
                    Some(Box::new(CellExited))
                } else {
                    None
                }
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self
                .layout_result
                .as_ref()
                .and_then(|l| l.cell_at(position.x, position.y))
                .map(|cell| Box::new(CellClicked {
                    category: cell.id.clone(),
                }) as Box<dyn Any + Send>),
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

#[cfg(test)]
mod tests {
    use super::*;
    use carbonview_core::RecordingCanvas;

    fn sample_tree() -> TreemapNode {
        TreemapNode::branch(
            "root",
            "Carbon Footprint",
            vec![
                TreemapNode::branch(
                    "personal",
                    "Personal",
                    vec![
                        TreemapNode::leaf("personal-commute", "Commute", 40.0),
                        TreemapNode::leaf("personal-home", "Home", 35.0),
                        TreemapNode::leaf("personal-diet", "Diet", 25.0),
                    ],
                ),
                TreemapNode::leaf("travel", "Business Travel", 50.0),
                TreemapNode::branch(
                    "office",
                    "Office Usage",
                    vec![
                        TreemapNode::leaf("office-electricity", "Electricity", 40.0),
                        TreemapNode::leaf("office-equipment", "Equipment", 24.0),
                        TreemapNode::leaf("office-supplies", "Supplies", 16.0),
                    ],
                ),
            ],
        )
    }

    fn laid_out_treemap() -> Treemap {
        let mut treemap = Treemap::new(sample_tree());
        treemap.layout(Rect::new(0.0, 0.0, 800.0, 350.0));
        treemap
    }

    // ===== Layout Tests =====

    #[test]
    fn test_layout_produces_cells() {
        let treemap = laid_out_treemap();
        let layout = treemap.current_layout().unwrap();
        assert_eq!(layout.cells.len(), 7);
    }

    #[test]
    fn test_hidden_treemap_defers_layout() {
        let mut treemap = Treemap::new(sample_tree());
        treemap.set_visible(false);
        treemap.layout(Rect::new(0.0, 0.0, 800.0, 350.0));
        assert!(treemap.current_layout().is_none());

        // Becoming visible again lays out on the next pass.
        treemap.set_visible(true);
        treemap.layout(Rect::new(0.0, 0.0, 800.0, 350.0));
        assert!(treemap.current_layout().is_some());
    }

    #[test]
    fn test_zero_width_bounds_defers_layout() {
        let mut treemap = Treemap::new(sample_tree());
        treemap.layout(Rect::new(0.0, 0.0, 0.0, 350.0));
        assert!(treemap.current_layout().is_none());
    }

    // ===== Color Tests =====

    #[test]
    fn test_subcategory_shading() {
        let treemap = Treemap::new(sample_tree());
        let base = treemap.cell_color("personal-commute");
        let home = treemap.cell_color("personal-home");
        let diet = treemap.cell_color("personal-diet");
        assert_eq!(base, ChartPalette::default().personal);
        assert!(home.relative_luminance() > base.relative_luminance());
        assert!(diet.relative_luminance() < base.relative_luminance());
    }

    #[test]
    fn test_travel_uses_plain_category_color() {
        let treemap = Treemap::new(sample_tree());
        assert_eq!(
            treemap.cell_color("travel"),
            ChartPalette::default().travel
        );
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_fills_every_positive_cell() {
        let treemap = laid_out_treemap();
        let mut canvas = RecordingCanvas::new();
        treemap.paint(&mut canvas);
        // Seven cells, each with fill + stroke, plus labels.
        assert!(canvas.filled_rects().count() >= 7);
    }

    #[test]
    fn test_paint_hidden_is_empty() {
        let mut treemap = laid_out_treemap();
        treemap.set_visible(false);
        let mut canvas = RecordingCanvas::new();
        treemap.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_dimmed_cells_fade() {
        let mut treemap = laid_out_treemap();
        let mut flags = HashMap::new();
        flags.insert("travel".to_string(), VisualFlag::Highlighted);
        flags.insert("personal-commute".to_string(), VisualFlag::Dimmed);
        treemap.set_flags(flags);

        assert_eq!(treemap.flag("travel"), VisualFlag::Highlighted);
        assert_eq!(treemap.flag("personal-commute"), VisualFlag::Dimmed);
        assert_eq!(treemap.flag("office-supplies"), VisualFlag::Normal);

        let mut canvas = RecordingCanvas::new();
        treemap.paint(&mut canvas);
        let faded = canvas
            .filled_rects()
            .filter(|(_, color)| color.a < 1.0)
            .count();
        assert_eq!(faded, 1);
    }

    #[test]
    fn test_large_cells_carry_labels() {
        let treemap = laid_out_treemap();
        let mut canvas = RecordingCanvas::new();
        treemap.paint(&mut canvas);
        let texts: Vec<&str> = canvas.texts().collect();
        assert!(texts.contains(&"Business Travel"));
        // Detail labels carry units and percentages.
        assert!(texts.iter().any(|t| t.ends_with(" kg")));
        assert!(texts.iter().any(|t| t.ends_with('%')));
    }

    // ===== Event Tests =====

    #[test]
    fn test_hover_emits_cell_hovered_once() {
        let mut treemap = laid_out_treemap();
        let center = {
            let layout = treemap.current_layout().unwrap();
            let cell = &layout.cells[0];
            Point::new(
                (cell.rect.x0 + cell.rect.x1) / 2.0,
                (cell.rect.y0 + cell.rect.y1) / 2.0,
            )
        };

        let msg = treemap
            .event(&Event::MouseMove { position: center })
            .unwrap();
        let hovered = msg.downcast::<CellHovered>().unwrap();
        assert!(!hovered.category.is_empty());

        // Moving within the same cell does not re-emit.
        assert!(treemap.event(&Event::MouseMove { position: center }).is_none());
    }

    #[test]
    fn test_mouse_leave_emits_cell_exited() {
        let mut treemap = laid_out_treemap();
        let center = {
            let layout = treemap.current_layout().unwrap();
            let cell = &layout.cells[0];
            Point::new(
                (cell.rect.x0 + cell.rect.x1) / 2.0,
                (cell.rect.y0 + cell.rect.y1) / 2.0,
            )
        };
        treemap.event(&Event::MouseMove { position: center });

        let msg = treemap.event(&Event::MouseLeave).unwrap();
        assert!(msg.downcast::<CellExited>().is_ok());

        // A second leave with nothing hovered is a no-op.
        assert!(treemap.event(&Event::MouseLeave).is_none());
    }

    #[test]
    fn test_click_emits_cell_clicked() {
        let mut treemap = laid_out_treemap();
        let (center, id) = {
            let layout = treemap.current_layout().unwrap();
            let cell = &layout.cells[0];
            (
                Point::new(
                    (cell.rect.x0 + cell.rect.x1) / 2.0,
                    (cell.rect.y0 + cell.rect.y1) / 2.0,
                ),
                cell.id.clone(),
            )
        };

        let msg = treemap
            .event(&Event::MouseDown {
                position: center,
                button: MouseButton::Left,
            })
            .unwrap();
        let clicked = msg.downcast::<CellClicked>().unwrap();
        assert_eq!(clicked.category, id);
    }

    #[test]
    fn test_click_outside_cells_is_ignored() {
        let mut treemap = laid_out_treemap();
        let result = treemap.event(&Event::MouseDown {
            position: Point::new(-10.0, -10.0),
            button: MouseButton::Left,
        });
        assert!(result.is_none());
    }
}
