//! `Chart` widget for dashboard data visualization.
//!
//! Charts here are category-indexed: an x-axis label list plus one or more
//! value series aligned to it. That matches every chart the dashboard draws
//! (history lines, breakdown doughnuts, trend and comparison bars); there is
//! no scatter/xy mode.

use carbonview_core::{
    widget::{Canvas, FontWeight, LayoutResult, TextStyle},
    Color, Constraints, Event, Point, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::f32::consts::TAU;

/// Chart type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    /// Line chart
    #[default]
    Line,
    /// Bar chart
    Bar,
    /// Doughnut chart
    Doughnut,
}

/// Which y-axis a series is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisSide {
    /// Primary (left) axis
    #[default]
    Left,
    /// Secondary (right) axis
    Right,
}

/// A single data series, aligned to the chart's label list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    /// Series name/label
    pub name: String,
    /// One value per x-axis label
    pub values: Vec<f64>,
    /// Series color
    pub color: Color,
    /// Area fill under the line (line charts only)
    pub fill: Option<Color>,
    /// Line width (line charts only)
    pub line_width: f32,
    /// Axis this series is scaled against
    pub axis: AxisSide,
}

impl DataSeries {
    /// Create a new data series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            color: Color::rgb(0.2, 0.47, 0.96),
            fill: None,
            line_width: 2.0,
            axis: AxisSide::Left,
        }
    }

    /// Set the values.
    #[must_use]
    pub fn values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.values = values.into_iter().collect();
        self
    }

    /// Set series color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set area fill color.
    #[must_use]
    pub const fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set line width.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width.max(0.5);
        self
    }

    /// Scale this series against the secondary axis.
    #[must_use]
    pub const fn on_right_axis(mut self) -> Self {
        self.axis = AxisSide::Right;
        self
    }

    /// Get min/max values, ignoring non-finite entries.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let finite: Vec<f64> = self.values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Axis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title
    pub title: Option<String>,
    /// Minimum value (auto if None)
    pub min: Option<f64>,
    /// Maximum value (auto if None)
    pub max: Option<f64>,
    /// Force the scale to include zero
    pub begin_at_zero: bool,
}

impl Axis {
    /// Create a new axis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the range.
    #[must_use]
    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Force the scale to include zero.
    #[must_use]
    pub const fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    /// No legend
    None,
    /// Above the plot
    #[default]
    Top,
    /// Below the plot
    Bottom,
}

/// `Chart` widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    kind: ChartType,
    labels: Vec<String>,
    series: Vec<DataSeries>,
    title: Option<String>,
    x_axis: Axis,
    y_axis: Axis,
    y2_axis: Option<Axis>,
    legend: LegendPosition,
    background: Color,
    padding: f32,
    /// Doughnut hole radius as a fraction of the outer radius
    cutout: f32,
    /// Doughnut slice pulled out as "active" (events page category cards)
    active_index: Option<usize>,
    /// Per-label colors for doughnut slices and single-series bars
    slice_colors: Option<Vec<Color>>,
    width: Option<f32>,
    height: Option<f32>,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            kind: ChartType::Line,
            labels: Vec::new(),
            series: Vec::new(),
            title: None,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            y2_axis: None,
            legend: LegendPosition::Top,
            background: Color::WHITE,
            padding: 40.0,
            cutout: 0.6,
            active_index: None,
            slice_colors: None,
            width: None,
            height: None,
            bounds: Rect::default(),
        }
    }
}

impl Chart {
    /// Create a new chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line chart.
    #[must_use]
    pub fn line() -> Self {
        Self::new().chart_type(ChartType::Line)
    }

    /// Create a bar chart.
    #[must_use]
    pub fn bar() -> Self {
        Self::new().chart_type(ChartType::Bar)
    }

    /// Create a doughnut chart.
    #[must_use]
    pub fn doughnut() -> Self {
        Self::new()
            .chart_type(ChartType::Doughnut)
            .legend(LegendPosition::Bottom)
    }

    /// Set chart type.
    #[must_use]
    pub const fn chart_type(mut self, kind: ChartType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the x-axis labels.
    #[must_use]
    pub fn labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Add a data series.
    #[must_use]
    pub fn series(mut self, series: DataSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Set chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x axis.
    #[must_use]
    pub fn x_axis(mut self, axis: Axis) -> Self {
        self.x_axis = axis;
        self
    }

    /// Set the primary y axis.
    #[must_use]
    pub fn y_axis(mut self, axis: Axis) -> Self {
        self.y_axis = axis;
        self
    }

    /// Set the secondary y axis.
    #[must_use]
    pub fn y2_axis(mut self, axis: Axis) -> Self {
        self.y2_axis = Some(axis);
        self
    }

    /// Set legend position.
    #[must_use]
    pub const fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    /// Set the doughnut cutout fraction (0.0..1.0).
    #[must_use]
    pub fn cutout(mut self, cutout: f32) -> Self {
        self.cutout = cutout.clamp(0.0, 0.95);
        self
    }

    /// Set per-label slice colors (doughnut and single-series bar charts).
    #[must_use]
    pub fn slice_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.slice_colors = Some(colors.into_iter().collect());
        self
    }

    /// Set explicit dimensions.
    #[must_use]
    pub const fn dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    // ---- mutation API used by page controllers ----

    /// Replace the x-axis labels in place.
    pub fn set_labels(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) {
        self.labels = labels.into_iter().map(Into::into).collect();
    }

    /// Replace the values of an existing series; out-of-range indexes are
    /// silently ignored (missing view target taxonomy).
    pub fn set_series_values(&mut self, index: usize, values: Vec<f64>) {
        if let Some(series) = self.series.get_mut(index) {
            series.values = values;
        }
    }

    /// Replace the x-axis title ("Quarter" ⇄ "Month" on interval toggles).
    pub fn set_x_title(&mut self, title: impl Into<String>) {
        self.x_axis.title = Some(title.into());
    }

    /// Set the pulled-out doughnut slice; `None` resets all slices.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.active_index = index;
    }

    // ---- accessors ----

    /// Get the chart type.
    #[must_use]
    pub const fn get_chart_type(&self) -> ChartType {
        self.kind
    }

    /// Get the labels.
    #[must_use]
    pub fn get_labels(&self) -> &[String] {
        &self.labels
    }

    /// Get the series.
    #[must_use]
    pub fn get_series(&self) -> &[DataSeries] {
        &self.series
    }

    /// Get the x-axis title.
    #[must_use]
    pub fn x_title(&self) -> Option<&str> {
        self.x_axis.title.as_deref()
    }

    /// Get the active doughnut slice index.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Format the label text for one doughnut slice:
    /// `"{label}: {value:.1} kg ({pct}%)"`, percentage to one decimal.
    #[must_use]
    pub fn slice_label(&self, index: usize) -> Option<String> {
        let series = self.series.first()?;
        let value = *series.values.get(index)?;
        let label = self.labels.get(index)?;
        let total: f64 = series.values.iter().sum();
        let pct = if total > 0.0 {
            (value / total * 1000.0).round() / 10.0
        } else {
            0.0
        };
        Some(format!("{label}: {value:.1} kg ({pct}%)"))
    }

    // ---- geometry ----

    fn plot_area(&self) -> Rect {
        let mut area = self.bounds.inset(self.padding);
        if self.title.is_some() {
            area.y += 20.0;
            area.height = (area.height - 20.0).max(0.0);
        }
        area
    }

    /// Resolve the (min, max) scale for one axis side.
    fn scale_for(&self, side: AxisSide) -> (f64, f64) {
        let axis = match side {
            AxisSide::Left => &self.y_axis,
            AxisSide::Right => self.y2_axis.as_ref().unwrap_or(&self.y_axis),
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for series in self.series.iter().filter(|s| s.axis == side) {
            if let Some((lo, hi)) = series.value_range() {
                min = min.min(lo);
                max = max.max(hi);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        if axis.begin_at_zero {
            min = min.min(0.0);
        }
        let min = axis.min.unwrap_or(min);
        let max = axis.max.unwrap_or(max);
        if (max - min).abs() < f64::EPSILON {
            (min, min + 1.0)
        } else {
            (min, max)
        }
    }

    fn value_to_y(&self, value: f64, side: AxisSide, plot: &Rect) -> f32 {
        let (min, max) = self.scale_for(side);
        let t = ((value - min) / (max - min)) as f32;
        plot.y + plot.height - t * plot.height
    }

    fn slot_x(&self, index: usize, plot: &Rect) -> f32 {
        let n = self.labels.len().max(1) as f32;
        plot.x + plot.width * (index as f32 + 0.5) / n
    }

    // ---- painting ----

    fn paint_axes(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        let axis_color = Color::rgb(0.3, 0.3, 0.3);
        let grid_color = Color::rgb(0.9, 0.9, 0.9);

        // Horizontal grid lines
        for i in 0..=4 {
            let y = plot.y + plot.height * (i as f32) / 4.0;
            canvas.draw_line(
                Point::new(plot.x, y),
                Point::new(plot.x + plot.width, y),
                grid_color,
                1.0,
            );
        }

        // Axis lines
        canvas.draw_line(
            Point::new(plot.x, plot.y),
            Point::new(plot.x, plot.y + plot.height),
            axis_color,
            1.0,
        );
        canvas.draw_line(
            Point::new(plot.x, plot.y + plot.height),
            Point::new(plot.x + plot.width, plot.y + plot.height),
            axis_color,
            1.0,
        );

        // X labels
        let label_style = TextStyle {
            size: 11.0,
            color: axis_color,
            weight: FontWeight::Normal,
        };
        for (i, label) in self.labels.iter().enumerate() {
            canvas.draw_text(
                label,
                Point::new(
                    self.slot_x(i, plot) - label.len() as f32 * 3.0,
                    plot.y + plot.height + 14.0,
                ),
                &label_style,
            );
        }

        // Axis titles
        if let Some(ref title) = self.x_axis.title {
            canvas.draw_text(
                title,
                Point::new(
                    plot.x + plot.width / 2.0 - title.len() as f32 * 3.0,
                    plot.y + plot.height + 30.0,
                ),
                &label_style,
            );
        }
        if let Some(ref title) = self.y_axis.title {
            canvas.draw_text(title, Point::new(self.bounds.x + 4.0, plot.y - 8.0), &label_style);
        }
        if let Some(title) = self.y2_axis.as_ref().and_then(|a| a.title.as_ref()) {
            canvas.draw_text(
                title,
                Point::new(
                    plot.x + plot.width - title.len() as f32 * 6.0,
                    plot.y - 8.0,
                ),
                &label_style,
            );
        }
    }

    fn paint_line(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        for series in &self.series {
            let points: Vec<Point> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| Point::new(self.slot_x(i, plot), self.value_to_y(v, series.axis, plot)))
                .collect();
            if points.len() < 2 {
                continue;
            }
            canvas.draw_path(&points, series.color, series.line_width);
            if let Some(fill) = series.fill {
                // Approximate the area fill with one translucent rect per
                // segment down to the baseline.
                let baseline = plot.y + plot.height;
                for pair in points.windows(2) {
                    let top = pair[0].y.min(pair[1].y);
                    canvas.fill_rect(
                        Rect::new(pair[0].x, top, pair[1].x - pair[0].x, baseline - top),
                        fill,
                    );
                }
            }
        }
    }

    fn paint_bar(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        let series_count = self.series.len().max(1) as f32;
        let n = self.labels.len().max(1) as f32;
        let slot_width = plot.width / n;
        let bar_width = (slot_width * 0.7 / series_count).max(1.0);

        for (s, series) in self.series.iter().enumerate() {
            let colors = self.resolved_slice_colors();
            for (i, &value) in series.values.iter().enumerate() {
                let x = self.slot_x(i, plot) - slot_width * 0.35 + s as f32 * bar_width;
                let y = self.value_to_y(value.max(0.0), series.axis, plot);
                let height = (plot.y + plot.height - y).max(0.0);
                let color = if self.series.len() == 1 {
                    colors.get(i).copied().unwrap_or(series.color)
                } else {
                    series.color
                };
                canvas.fill_round_rect(Rect::new(x, y, bar_width, height), 4.0, color);
            }
        }
    }

    fn paint_doughnut(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        let Some(series) = self.series.first() else {
            return;
        };
        let total: f64 = series.values.iter().filter(|v| v.is_finite()).sum();
        if total <= 0.0 {
            return;
        }

        let center = plot.center();
        let radius = (plot.width.min(plot.height) / 2.0).max(0.0);
        let inner = radius * self.cutout;
        let colors = self.resolved_slice_colors();

        let mut angle = -TAU / 4.0; // start at 12 o'clock like the reference
        for (i, &value) in series.values.iter().enumerate() {
            if value <= 0.0 {
                continue;
            }
            let sweep = (value / total) as f32 * TAU;
            let slice_radius = if self.active_index == Some(i) {
                radius + 8.0
            } else {
                radius
            };
            canvas.fill_arc(
                center,
                slice_radius,
                inner,
                angle,
                angle + sweep,
                colors.get(i).copied().unwrap_or(series.color),
            );
            angle += sweep;
        }
    }

    fn resolved_slice_colors(&self) -> Vec<Color> {
        self.slice_colors.clone().unwrap_or_default()
    }

    fn paint_legend(&self, canvas: &mut dyn Canvas) {
        if self.legend == LegendPosition::None {
            return;
        }
        let y = match self.legend {
            LegendPosition::Top => self.bounds.y + 12.0,
            LegendPosition::Bottom => self.bounds.y + self.bounds.height - 12.0,
            LegendPosition::None => return,
        };
        let style = TextStyle {
            size: 12.0,
            color: Color::rgb(0.2, 0.2, 0.2),
            weight: FontWeight::Normal,
        };
        let mut x = self.bounds.x + self.padding;
        if self.kind == ChartType::Doughnut {
            // Doughnut legends list labels with their slice colors.
            let colors = self.resolved_slice_colors();
            for (i, label) in self.labels.iter().enumerate() {
                let color = colors
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| self.series.first().map_or(Color::BLACK, |s| s.color));
                canvas.fill_rect(Rect::new(x, y - 8.0, 10.0, 10.0), color);
                canvas.draw_text(label, Point::new(x + 14.0, y), &style);
                x += 14.0 + label.len() as f32 * 7.0 + 20.0;
            }
        } else {
            for series in &self.series {
                canvas.fill_rect(Rect::new(x, y - 8.0, 10.0, 10.0), series.color);
                canvas.draw_text(&series.name, Point::new(x + 14.0, y), &style);
                x += 14.0 + series.name.len() as f32 * 7.0 + 20.0;
            }
        }
    }
}

impl Widget for Chart {
    fn measure(&self, constraints: Constraints) -> Size {
        let width = self.width.unwrap_or(400.0);
        let height = self.height.unwrap_or(300.0);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.background);

        if let Some(ref title) = self.title {
            let style = TextStyle {
                size: 16.0,
                color: Color::rgb(0.1, 0.1, 0.1),
                weight: FontWeight::Bold,
            };
            canvas.draw_text(
                title,
                Point::new(
                    self.bounds.x + self.bounds.width / 2.0 - title.len() as f32 * 4.0,
                    self.bounds.y + 20.0,
                ),
                &style,
            );
        }

        let plot = self.plot_area();
        match self.kind {
            ChartType::Line => {
                self.paint_axes(canvas, &plot);
                self.paint_line(canvas, &plot);
            }
            ChartType::Bar => {
                self.paint_axes(canvas, &plot);
                self.paint_bar(canvas, &plot);
            }
            ChartType::Doughnut => self.paint_doughnut(canvas, &plot),
        }

        self.paint_legend(canvas);
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        // Charts are view-only; interaction arrives through sibling views.
        None
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonview_core::{DrawCommand, RecordingCanvas};

    fn breakdown_chart() -> Chart {
        Chart::doughnut()
            .labels(["Personal", "Business Travel", "Office Usage"])
            .series(DataSeries::new("Carbon Footprint (kg CO₂)").values([100.0, 50.0, 80.0]))
            .cutout(0.6)
            .dimensions(400.0, 300.0)
    }

    // ===== Builder Tests =====

    #[test]
    fn test_chart_builders() {
        assert_eq!(Chart::line().get_chart_type(), ChartType::Line);
        assert_eq!(Chart::bar().get_chart_type(), ChartType::Bar);
        assert_eq!(Chart::doughnut().get_chart_type(), ChartType::Doughnut);
    }

    #[test]
    fn test_doughnut_defaults_to_bottom_legend() {
        let chart = Chart::doughnut();
        assert_eq!(chart.legend, LegendPosition::Bottom);
    }

    #[test]
    fn test_series_builder() {
        let series = DataSeries::new("Emissions (kg CO₂)")
            .values([120.0, 100.0, 90.0])
            .color(Color::rgb(0.2, 0.6, 0.86))
            .line_width(2.0)
            .on_right_axis();
        assert_eq!(series.values.len(), 3);
        assert_eq!(series.axis, AxisSide::Right);
    }

    #[test]
    fn test_series_value_range_ignores_non_finite() {
        let series = DataSeries::new("s").values([1.0, f64::NAN, 3.0]);
        assert_eq!(series.value_range(), Some((1.0, 3.0)));
        let empty = DataSeries::new("e");
        assert_eq!(empty.value_range(), None);
    }

    // ===== Scale Tests =====

    #[test]
    fn test_dual_axis_scales_are_independent() {
        let chart = Chart::line()
            .labels(["a", "b"])
            .series(DataSeries::new("score").values([50.0, 90.0]))
            .series(DataSeries::new("emissions").values([800.0, 1200.0]).on_right_axis())
            .y_axis(Axis::new().range(0.0, 100.0))
            .y2_axis(Axis::new().title("kg CO₂"));
        assert_eq!(chart.scale_for(AxisSide::Left), (0.0, 100.0));
        assert_eq!(chart.scale_for(AxisSide::Right), (800.0, 1200.0));
    }

    #[test]
    fn test_begin_at_zero_extends_scale() {
        let chart = Chart::bar()
            .labels(["a"])
            .series(DataSeries::new("s").values([400.0, 380.0]))
            .y_axis(Axis::new().begin_at_zero());
        assert_eq!(chart.scale_for(AxisSide::Left).0, 0.0);
    }

    #[test]
    fn test_flat_series_gets_nonzero_span() {
        let chart = Chart::line()
            .labels(["a", "b"])
            .series(DataSeries::new("s").values([5.0, 5.0]));
        let (min, max) = chart.scale_for(AxisSide::Left);
        assert!(max > min);
    }

    // ===== Slice Label Tests =====

    #[test]
    fn test_slice_label_format() {
        let chart = breakdown_chart();
        assert_eq!(
            chart.slice_label(0).unwrap(),
            "Personal: 100.0 kg (43.5%)"
        );
        assert_eq!(
            chart.slice_label(1).unwrap(),
            "Business Travel: 50.0 kg (21.7%)"
        );
    }

    #[test]
    fn test_slice_label_out_of_range() {
        let chart = breakdown_chart();
        assert!(chart.slice_label(10).is_none());
    }

    // ===== Mutation API Tests =====

    #[test]
    fn test_set_labels_and_values() {
        let mut chart = Chart::bar()
            .labels(["Q1 2025", "Q2 2025", "Q3 2025", "Q4 2025"])
            .series(DataSeries::new("Total Emissions (kg CO₂e)").values([1200.0, 980.0, 850.0, 1050.0]))
            .x_axis(Axis::new().title("Quarter"));

        chart.set_labels(["Jan", "Feb", "Mar"]);
        chart.set_series_values(0, vec![400.0, 380.0, 420.0]);
        chart.set_x_title("Month");

        assert_eq!(chart.get_labels().len(), 3);
        assert_eq!(chart.get_series()[0].values, vec![400.0, 380.0, 420.0]);
        assert_eq!(chart.x_title(), Some("Month"));
    }

    #[test]
    fn test_set_series_values_out_of_range_is_ignored() {
        let mut chart = Chart::bar().series(DataSeries::new("s").values([1.0]));
        chart.set_series_values(5, vec![9.0]);
        assert_eq!(chart.get_series()[0].values, vec![1.0]);
    }

    // ===== Paint Tests =====

    #[test]
    fn test_doughnut_paints_one_arc_per_positive_slice() {
        let mut chart = breakdown_chart();
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        let arcs = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .count();
        assert_eq!(arcs, 3);
    }

    #[test]
    fn test_doughnut_skips_zero_slices() {
        let mut chart = Chart::doughnut()
            .labels(["a", "b"])
            .series(DataSeries::new("s").values([10.0, 0.0]))
            .dimensions(400.0, 300.0);
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        let arcs = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .count();
        assert_eq!(arcs, 1);
    }

    #[test]
    fn test_doughnut_sweeps_cover_full_circle() {
        let mut chart = breakdown_chart();
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        let total_sweep: f32 = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc {
                    start_angle,
                    end_angle,
                    ..
                } => Some(end_angle - start_angle),
                _ => None,
            })
            .sum();
        assert!((total_sweep - TAU).abs() < 1e-3);
    }

    #[test]
    fn test_active_slice_is_pulled_out() {
        let mut chart = breakdown_chart();
        chart.set_active_index(Some(1));
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        let radii: Vec<f32> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 3);
        assert!(radii[1] > radii[0]);
        assert_eq!(radii[0], radii[2]);
    }

    #[test]
    fn test_bar_chart_paints_bars() {
        let mut chart = Chart::bar()
            .labels(["Q1", "Q2"])
            .series(DataSeries::new("s").values([100.0, 50.0]))
            .y_axis(Axis::new().begin_at_zero());
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        // Background plus two rounded bars (plus grid/axis paths and labels).
        let bars = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { radius, .. } if *radius > 0.0))
            .count();
        assert_eq!(bars, 2);
    }

    #[test]
    fn test_line_chart_paints_one_path_per_series() {
        let mut chart = Chart::line()
            .labels(["a", "b", "c"])
            .series(DataSeries::new("scores").values([50.0, 60.0, 70.0]))
            .series(DataSeries::new("emissions").values([120.0, 100.0, 90.0]).on_right_axis())
            .legend(LegendPosition::None);
        chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut canvas = RecordingCanvas::new();
        chart.paint(&mut canvas);

        // 5 grid lines + 2 axis lines + 2 series paths
        let paths = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count();
        assert_eq!(paths, 9);
    }

    #[test]
    fn test_chart_event_is_ignored() {
        let mut chart = breakdown_chart();
        let result = chart.event(&Event::MouseEnter);
        assert!(result.is_none());
    }
}

