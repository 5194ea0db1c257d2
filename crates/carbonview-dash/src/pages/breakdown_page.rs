//! Peer-comparison breakdown page.
//!
//! One footprint, three synchronized renderings: a doughnut, a bar chart,
//! and a treemap, plus the interactive category list. The page owns every
//! view in one registry, routes hover/click through the shared
//! [`HighlightState`], and defers treemap layout while its container is
//! hidden.

use crate::breakdown::{BreakdownSeed, CategoryNode, FootprintBreakdown};
use crate::highlight::{main_category, HighlightState};
use carbonview_core::{Color, Command, Rect, Size, State, Theme, VisualFlag, Widget};
use carbonview_widgets::{
    Axis, CategoryList, CategoryRow, CellClicked, CellExited, CellHovered, Chart, DataSeries,
    LegendPosition, RowClicked, RowExited, RowHovered, ToggleChanged, ToggleGroup, ToggleOption,
    Treemap,
};
use std::any::Any;
use std::collections::HashMap;

/// Fixed treemap height on this page.
const TREEMAP_HEIGHT: f32 = 350.0;

/// Messages handled by the breakdown page.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownMsg {
    /// A visualization was selected in the toggle
    VizSelected(String),
    /// A category element is hovered in any view
    CategoryHovered(String),
    /// The pointer left all category elements
    HoverEnded,
    /// A category element was clicked in any view
    CategoryClicked(String),
    /// The page container was resized
    Resized {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

/// The page controller and its view registry.
pub struct BreakdownPage {
    breakdown: FootprintBreakdown,
    tree: CategoryNode,
    viz_toggle: ToggleGroup,
    doughnut: Chart,
    bar: Chart,
    treemap: Treemap,
    list: CategoryList,
    highlight: HighlightState,
    container: Size,
}

impl BreakdownPage {
    /// Build the page from seed fields.
    #[must_use]
    pub fn new(seed: &BreakdownSeed, container: Size, theme: &Theme) -> Self {
        let breakdown = FootprintBreakdown::from_seed(seed);
        let tree = breakdown.to_tree();

        let labels = breakdown.labels();
        let values = breakdown.values();
        let colors: Vec<Color> = breakdown
            .category_ids()
            .iter()
            .map(|id| theme.chart.for_category(id))
            .collect();

        let doughnut = Chart::doughnut()
            .labels(labels.clone())
            .series(DataSeries::new("Carbon Footprint (kg CO₂)").values(values.clone()))
            .slice_colors(colors.clone())
            .cutout(0.6);

        let bar = Chart::bar()
            .labels(labels)
            .series(DataSeries::new("Carbon Footprint (kg CO₂)").values(values))
            .slice_colors(colors)
            .y_axis(Axis::new().title("kg CO₂").begin_at_zero())
            .legend(LegendPosition::None);

        let mut treemap = Treemap::new(tree.to_treemap())
            .palette(theme.chart.clone())
            .height(TREEMAP_HEIGHT);
        // The doughnut is the initial visualization; the treemap container
        // starts hidden and reports zero width until toggled in.
        treemap.set_visible(false);

        let list = CategoryList::new(Self::build_rows(&tree)).palette(theme.chart.clone());

        let mut page = Self {
            breakdown,
            tree,
            viz_toggle: ToggleGroup::new(vec![
                ToggleOption::new("doughnut", "Doughnut"),
                ToggleOption::new("bar", "Bar"),
                ToggleOption::new("treemap", "Treemap"),
            ]),
            doughnut,
            bar,
            treemap,
            list,
            highlight: HighlightState::new(),
            container,
        };
        page.layout_views();
        page
    }

    fn build_rows(tree: &CategoryNode) -> Vec<CategoryRow> {
        tree.children
            .iter()
            .map(|child| {
                let details = child
                    .children
                    .iter()
                    .map(|sub| (sub.name.clone(), sub.value))
                    .collect();
                CategoryRow::new(child.category.clone(), child.name.clone(), child.value)
                    .details(details)
            })
            .collect()
    }

    fn layout_views(&mut self) {
        let chart_rect = Rect::new(0.0, 40.0, self.container.width, 300.0);
        self.viz_toggle
            .layout(Rect::new(0.0, 0.0, self.container.width, 32.0));
        self.doughnut.layout(chart_rect);
        self.bar.layout(chart_rect);
        self.treemap.layout(Rect::new(
            0.0,
            40.0,
            self.container.width,
            TREEMAP_HEIGHT,
        ));
        self.list.layout(Rect::new(
            0.0,
            40.0 + TREEMAP_HEIGHT + 16.0,
            self.container.width,
            300.0,
        ));
    }

    /// All category ids addressable by the highlight synchronizer.
    fn element_ids(&self) -> Vec<String> {
        fn walk(node: &CategoryNode, out: &mut Vec<String>) {
            if node.category != "root" {
                out.push(node.category.clone());
            }
            for child in &node.children {
                walk(child, out);
            }
        }
        let mut ids = Vec::new();
        walk(&self.tree, &mut ids);
        ids
    }

    /// Project the highlight selection into every view. Views never decide
    /// their own highlight state.
    fn apply_flags(&mut self) {
        if self.highlight.active().is_none() {
            self.treemap.clear_flags();
            self.list.clear_flags();
            return;
        }
        let mut treemap_flags = HashMap::new();
        for id in self.element_ids() {
            let flag = self.highlight.flag_for(&id);
            if !id.contains('-') {
                self.list.set_flag(&id, flag);
            }
            treemap_flags.insert(id, flag);
        }
        self.treemap.set_flags(treemap_flags);
    }

    /// Translate a widget message into a page message.
    #[must_use]
    pub fn route(message: &(dyn Any + Send)) -> Option<BreakdownMsg> {
        if let Some(changed) = message.downcast_ref::<ToggleChanged>() {
            return Some(BreakdownMsg::VizSelected(changed.id.clone()));
        }
        if let Some(hovered) = message.downcast_ref::<CellHovered>() {
            return Some(BreakdownMsg::CategoryHovered(hovered.category.clone()));
        }
        if let Some(hovered) = message.downcast_ref::<RowHovered>() {
            return Some(BreakdownMsg::CategoryHovered(hovered.category.clone()));
        }
        if message.downcast_ref::<CellExited>().is_some()
            || message.downcast_ref::<RowExited>().is_some()
        {
            return Some(BreakdownMsg::HoverEnded);
        }
        if let Some(clicked) = message.downcast_ref::<CellClicked>() {
            return Some(BreakdownMsg::CategoryClicked(clicked.category.clone()));
        }
        if let Some(clicked) = message.downcast_ref::<RowClicked>() {
            return Some(BreakdownMsg::CategoryClicked(clicked.category.clone()));
        }
        None
    }

    // ---- accessors ----

    /// The flat breakdown driving every view.
    #[must_use]
    pub const fn breakdown(&self) -> &FootprintBreakdown {
        &self.breakdown
    }

    /// The active visualization id.
    #[must_use]
    pub fn active_viz(&self) -> &str {
        &self.viz_toggle.active().id
    }

    /// The doughnut chart view.
    #[must_use]
    pub const fn doughnut(&self) -> &Chart {
        &self.doughnut
    }

    /// The bar chart view.
    #[must_use]
    pub const fn bar(&self) -> &Chart {
        &self.bar
    }

    /// The treemap view.
    #[must_use]
    pub const fn treemap(&self) -> &Treemap {
        &self.treemap
    }

    /// The category list view.
    #[must_use]
    pub const fn list(&self) -> &CategoryList {
        &self.list
    }

    /// The shared highlight selection.
    #[must_use]
    pub const fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Flag currently projected onto a category element.
    #[must_use]
    pub fn flag_for(&self, category_id: &str) -> VisualFlag {
        self.treemap.flag(category_id)
    }
}

impl State for BreakdownPage {
    type Message = BreakdownMsg;

    fn update(&mut self, msg: BreakdownMsg) -> Command {
        match msg {
            BreakdownMsg::VizSelected(id) => {
                let index = self.viz_toggle.options().iter().position(|o| o.id == id);
                if let Some(index) = index {
                    self.viz_toggle.activate(index);
                }
                let show_treemap = id == "treemap";
                self.treemap.set_visible(show_treemap);
                if show_treemap {
                    // The container just became visible; lay out against its
                    // real width.
                    self.treemap.layout(Rect::new(
                        0.0,
                        40.0,
                        self.container.width,
                        TREEMAP_HEIGHT,
                    ));
                }
            }
            BreakdownMsg::CategoryHovered(id) => {
                self.highlight.hover_enter(&id);
                self.apply_flags();
            }
            BreakdownMsg::HoverEnded => {
                self.highlight.hover_leave();
                self.apply_flags();
            }
            BreakdownMsg::CategoryClicked(id) => {
                self.highlight.click(&id);
                self.apply_flags();
                self.list.expand(main_category(&id));
            }
            BreakdownMsg::Resized { width, height } => {
                self.container = Size::new(width, height);
                // Only the active treemap re-lays-out on resize; hidden
                // views wait for their visibility toggle.
                if self.active_viz() == "treemap" {
                    self.layout_views();
                }
            }
        }
        Command::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> BreakdownPage {
        let seed = BreakdownSeed {
            personal: Some(100.0),
            travel: Some(50.0),
            office: Some(80.0),
            transactions: Some(0.0),
        };
        BreakdownPage::new(&seed, Size::new(800.0, 900.0), &Theme::employee())
    }

    // ===== Construction =====

    #[test]
    fn test_transactions_excluded_from_chart_labels() {
        let page = sample_page();
        assert_eq!(
            page.doughnut().get_labels(),
            &["Personal", "Business Travel", "Office Usage"]
        );
        assert_eq!(
            page.doughnut().get_series()[0].values,
            vec![100.0, 50.0, 80.0]
        );
    }

    #[test]
    fn test_list_rows_cover_main_categories() {
        let page = sample_page();
        let categories: Vec<&str> = page.list().rows().iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["personal", "travel", "office"]);
        // Personal row details carry the fixed split.
        assert_eq!(
            page.list().rows()[0].details,
            vec![
                ("Commute".to_string(), 40.0),
                ("Home".to_string(), 35.0),
                ("Diet".to_string(), 25.0),
            ]
        );
    }

    #[test]
    fn test_treemap_starts_hidden_and_unlaid_out() {
        let page = sample_page();
        assert_eq!(page.active_viz(), "doughnut");
        assert!(!page.treemap().is_visible());
        assert!(page.treemap().current_layout().is_none());
    }

    // ===== Visibility Toggle =====

    #[test]
    fn test_toggling_to_treemap_lays_it_out() {
        let mut page = sample_page();
        page.update(BreakdownMsg::VizSelected("treemap".to_string()));

        assert_eq!(page.active_viz(), "treemap");
        assert!(page.treemap().is_visible());
        let layout = page.treemap().current_layout().expect("laid out");
        // Three personal splits, travel, three office splits; transactions
        // is absent from the tree at zero.
        assert_eq!(layout.cells.len(), 7);
    }

    #[test]
    fn test_toggling_away_hides_treemap() {
        let mut page = sample_page();
        page.update(BreakdownMsg::VizSelected("treemap".to_string()));
        page.update(BreakdownMsg::VizSelected("bar".to_string()));
        assert!(!page.treemap().is_visible());
    }

    #[test]
    fn test_resize_relayouts_only_active_treemap() {
        let mut page = sample_page();

        // Hidden treemap: resize does not lay it out.
        page.update(BreakdownMsg::Resized {
            width: 640.0,
            height: 900.0,
        });
        assert!(page.treemap().current_layout().is_none());

        page.update(BreakdownMsg::VizSelected("treemap".to_string()));
        let before = page.treemap().current_layout().expect("laid out").content;

        page.update(BreakdownMsg::Resized {
            width: 400.0,
            height: 900.0,
        });
        let after = page.treemap().current_layout().expect("laid out").content;
        assert!(after.x1 < before.x1);
    }

    // ===== Highlight Synchronization =====

    #[test]
    fn test_hover_highlights_across_views() {
        let mut page = sample_page();
        page.update(BreakdownMsg::VizSelected("treemap".to_string()));
        page.update(BreakdownMsg::CategoryHovered("office-electricity".to_string()));

        // Treemap: whole office family highlighted, everything else dimmed.
        assert_eq!(page.flag_for("office-electricity"), VisualFlag::Highlighted);
        assert_eq!(page.flag_for("office-supplies"), VisualFlag::Highlighted);
        assert_eq!(page.flag_for("personal-commute"), VisualFlag::Dimmed);

        // Category list mirrors the same selection on main categories.
        let office_row = &page.list().rows()[2];
        assert_eq!(office_row.flag, VisualFlag::Highlighted);
        let personal_row = &page.list().rows()[0];
        assert_eq!(personal_row.flag, VisualFlag::Dimmed);
    }

    #[test]
    fn test_hover_end_clears_all_views() {
        let mut page = sample_page();
        page.update(BreakdownMsg::CategoryHovered("travel".to_string()));
        page.update(BreakdownMsg::HoverEnded);

        assert_eq!(page.flag_for("travel"), VisualFlag::Normal);
        assert!(page
            .list()
            .rows()
            .iter()
            .all(|r| r.flag == VisualFlag::Normal));
    }

    #[test]
    fn test_click_pins_past_hover_end() {
        let mut page = sample_page();
        page.update(BreakdownMsg::CategoryClicked("travel".to_string()));
        page.update(BreakdownMsg::HoverEnded);

        assert!(page.highlight().is_pinned());
        assert_eq!(page.flag_for("travel"), VisualFlag::Highlighted);
        assert_eq!(page.flag_for("office-electricity"), VisualFlag::Dimmed);
    }

    #[test]
    fn test_reclick_clears_pin() {
        let mut page = sample_page();
        page.update(BreakdownMsg::CategoryClicked("travel".to_string()));
        page.update(BreakdownMsg::CategoryClicked("travel".to_string()));
        assert!(!page.highlight().is_pinned());
        assert_eq!(page.flag_for("travel"), VisualFlag::Normal);
    }

    #[test]
    fn test_click_expands_main_category_row() {
        let mut page = sample_page();
        page.update(BreakdownMsg::CategoryClicked("personal-diet".to_string()));
        assert!(page.list().rows()[0].expanded);
    }

    // ===== Message Routing =====

    #[test]
    fn test_route_widget_messages() {
        let hovered: Box<dyn Any + Send> = Box::new(CellHovered {
            category: "travel".to_string(),
        });
        assert_eq!(
            BreakdownPage::route(hovered.as_ref()),
            Some(BreakdownMsg::CategoryHovered("travel".to_string()))
        );

        let exited: Box<dyn Any + Send> = Box::new(RowExited);
        assert_eq!(
            BreakdownPage::route(exited.as_ref()),
            Some(BreakdownMsg::HoverEnded)
        );

        let toggled: Box<dyn Any + Send> = Box::new(ToggleChanged {
            id: "bar".to_string(),
            index: 1,
        });
        assert_eq!(
            BreakdownPage::route(toggled.as_ref()),
            Some(BreakdownMsg::VizSelected("bar".to_string()))
        );

        let unknown: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(BreakdownPage::route(unknown.as_ref()), None);
    }
}
