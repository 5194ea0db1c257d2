//! Employee dashboard page.
//!
//! Builds the footprint history chart and the breakdown doughnut from the
//! server-rendered dashboard payload. Chart targets can be absent from a
//! given page variant; a missing target simply skips that chart. The
//! breakdown source is resolved through the record classification chain:
//! measured values, then lifestyle estimation, then the proportional
//! synthesis from the total.

use crate::record::{estimated_breakdown, FootprintRecord};
use crate::toasts::ToastManager;
use carbonview_core::{ColorPalette, Command, State, Theme};
use carbonview_widgets::{Axis, Chart, DataSeries, LegendPosition, ToastKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-department aggregates for the comparison chart.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DepartmentStats {
    /// Average emissions in kg CO₂e
    #[serde(default)]
    pub avg_emissions: f64,
    /// Average sustainability score, 0–100
    #[serde(default)]
    pub avg_score: f64,
}

/// One month of the company-wide trend.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendPoint {
    /// Month label
    pub month: String,
    /// Total emissions in kg CO₂e
    pub emissions: f64,
    /// Average score, 0–100
    pub score: f64,
}

/// Server-rendered dashboard payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardData {
    /// History date labels
    #[serde(default)]
    pub dates: Vec<String>,
    /// History carbon scores (0–100)
    #[serde(default)]
    pub scores: Vec<f64>,
    /// History emissions in kg CO₂e
    #[serde(default)]
    pub emissions: Vec<f64>,
    /// The latest footprint record, shape undetermined until ingested
    #[serde(default)]
    pub latest_footprint: Option<Value>,
    /// Per-department aggregates (company dashboard)
    #[serde(default)]
    pub department_data: BTreeMap<String, DepartmentStats>,
    /// Company-wide monthly trend (company dashboard)
    #[serde(default)]
    pub trend_data: Vec<TrendPoint>,
}

/// Normalized forecast series for the forecast and savings charts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastSeries {
    /// `"{month}/{year}"` labels
    #[serde(default)]
    pub labels: Vec<String>,
    /// Baseline emissions
    #[serde(default)]
    pub baseline: Vec<f64>,
    /// Forecast emissions
    #[serde(default)]
    pub forecast: Vec<f64>,
    /// Projected savings
    #[serde(default)]
    pub savings: Vec<f64>,
}

impl ForecastSeries {
    /// Normalize a raw forecast payload.
    ///
    /// Accepts either the API response shape
    /// (`{"forecast": [{month, year, baseline, emissions, savings}, ...]}`)
    /// or an already-normalized series, decided once here.
    #[must_use]
    pub fn from_raw(raw: &Value) -> Option<Self> {
        if let Some(series) = raw
            .get("forecast")
            .and_then(Value::as_array)
            .and_then(|items| Self::from_api_items(items))
        {
            return Some(series);
        }
        serde_json::from_value(raw.clone()).ok()
    }

    fn from_api_items(items: &[Value]) -> Option<Self> {
        let mut series = Self::default();
        for item in items {
            let month = item.get("month").and_then(Value::as_i64)?;
            let year = item.get("year").and_then(Value::as_i64)?;
            series.labels.push(format!("{month}/{year}"));
            series
                .baseline
                .push(item.get("baseline").and_then(Value::as_f64).unwrap_or(0.0));
            series
                .forecast
                .push(item.get("emissions").and_then(Value::as_f64).unwrap_or(0.0));
            series
                .savings
                .push(item.get("savings").and_then(Value::as_f64).unwrap_or(0.0));
        }
        Some(series)
    }
}

/// Messages handled by the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardMsg {
    /// Forecast period selector changed
    ForecastPeriodChanged,
    /// Department filter changed (company dashboard)
    DepartmentFilterChanged,
    /// Date range picker changed (company dashboard)
    DateRangeChanged,
    /// Timer tick driving toast countdowns
    Tick {
        /// Milliseconds elapsed
        elapsed_ms: u32,
    },
}

/// The page controller.
pub struct DashboardPage {
    history_chart: Option<Chart>,
    breakdown_chart: Option<Chart>,
    department_chart: Option<Chart>,
    company_trend_chart: Option<Chart>,
    toasts: ToastManager,
}

impl DashboardPage {
    /// Build the page from the dashboard payload.
    #[must_use]
    pub fn new(data: &DashboardData, theme: &Theme) -> Self {
        Self {
            history_chart: Self::build_history_chart(data, theme),
            breakdown_chart: Self::build_breakdown_chart(data, theme),
            department_chart: Self::build_department_chart(data, theme),
            company_trend_chart: Self::build_company_trend_chart(data, theme),
            toasts: ToastManager::new(),
        }
    }

    fn build_department_chart(data: &DashboardData, theme: &Theme) -> Option<Chart> {
        if data.department_data.is_empty() {
            return None;
        }
        let departments: Vec<&String> = data.department_data.keys().collect();
        let emissions: Vec<f64> = data
            .department_data
            .values()
            .map(|d| d.avg_emissions)
            .collect();
        let scores: Vec<f64> = data.department_data.values().map(|d| d.avg_score).collect();

        Some(
            Chart::bar()
                .labels(departments)
                .series(
                    DataSeries::new("Avg. Emissions (kg CO₂)")
                        .values(emissions)
                        .color(theme.palette.secondary),
                )
                .series(
                    DataSeries::new("Avg. Score")
                        .values(scores)
                        .color(theme.palette.primary)
                        .on_right_axis(),
                )
                .y_axis(Axis::new().title("kg CO₂"))
                .y2_axis(Axis::new().title("Score").range(0.0, 100.0))
                .legend(LegendPosition::Top),
        )
    }

    fn build_company_trend_chart(data: &DashboardData, theme: &Theme) -> Option<Chart> {
        if data.trend_data.is_empty() {
            return None;
        }
        let labels: Vec<String> = data.trend_data.iter().map(|p| p.month.clone()).collect();
        let emissions: Vec<f64> = data.trend_data.iter().map(|p| p.emissions).collect();
        let scores: Vec<f64> = data.trend_data.iter().map(|p| p.score).collect();

        Some(
            Chart::line()
                .labels(labels)
                .series(
                    DataSeries::new("Total Emissions (kg CO₂)")
                        .values(emissions)
                        .color(theme.palette.secondary)
                        .fill(ColorPalette::alpha(theme.palette.secondary, 0.1)),
                )
                .series(
                    DataSeries::new("Average Score")
                        .values(scores)
                        .color(theme.palette.primary)
                        .on_right_axis(),
                )
                .y_axis(Axis::new().title("kg CO₂"))
                .y2_axis(Axis::new().title("Score").range(0.0, 100.0))
                .legend(LegendPosition::Top),
        )
    }

    /// The monthly savings bar chart, seeded with the demo dataset.
    #[must_use]
    pub fn savings_chart(forecast: &ForecastSeries, theme: &Theme) -> Chart {
        let (labels, savings) = if forecast.labels.is_empty() {
            (
                ["January", "February", "March", "April", "May", "June", "July"]
                    .map(String::from)
                    .to_vec(),
                vec![0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4],
            )
        } else {
            (forecast.labels.clone(), forecast.savings.clone())
        };
        Chart::bar()
            .labels(labels)
            .series(
                DataSeries::new("kg CO₂ Saved")
                    .values(savings)
                    .color(theme.palette.secondary),
            )
            .x_axis(Axis::new().title("Months"))
            .y_axis(Axis::new().title("kg CO₂ Saved"))
            .legend(LegendPosition::Top)
    }

    fn build_history_chart(data: &DashboardData, theme: &Theme) -> Option<Chart> {
        if data.dates.is_empty() || data.scores.is_empty() || data.emissions.is_empty() {
            return None;
        }
        Some(
            Chart::line()
                .labels(data.dates.clone())
                .series(
                    DataSeries::new("Carbon Score")
                        .values(data.scores.clone())
                        .color(theme.palette.primary)
                        .fill(ColorPalette::alpha(theme.palette.primary, 0.2)),
                )
                .series(
                    DataSeries::new("Emissions (kg CO₂)")
                        .values(data.emissions.clone())
                        .color(theme.palette.secondary)
                        .fill(ColorPalette::alpha(theme.palette.secondary, 0.2))
                        .on_right_axis(),
                )
                .y_axis(Axis::new().title("Score (higher is better)").range(0.0, 100.0))
                .y2_axis(Axis::new().title("kg CO₂"))
                .legend(LegendPosition::Top),
        )
    }

    fn build_breakdown_chart(data: &DashboardData, theme: &Theme) -> Option<Chart> {
        let raw = data.latest_footprint.as_ref()?;
        let entries = match FootprintRecord::ingest(raw) {
            Some(record) => record.breakdown(),
            None => {
                // Unclassifiable record: synthesize proportionally from the
                // total rather than showing an empty chart.
                let total = raw
                    .get("total_footprint")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                tracing::warn!(total, "unclassified footprint record, synthesizing breakdown");
                estimated_breakdown(total)
            }
        };

        let labels: Vec<&str> = entries.iter().map(|(label, _)| *label).collect();
        let values: Vec<f64> = entries.iter().map(|(_, value)| *value).collect();
        let colors = [
            theme.palette.primary,
            theme.palette.secondary,
            theme.palette.warning,
            theme.palette.gray,
        ];

        Some(
            Chart::doughnut()
                .labels(labels)
                .series(DataSeries::new("kg CO₂").values(values))
                .slice_colors(colors.into_iter().take(entries.len()))
                .cutout(0.7),
        )
    }

    /// The history chart, when history data was present.
    #[must_use]
    pub const fn history_chart(&self) -> Option<&Chart> {
        self.history_chart.as_ref()
    }

    /// The breakdown doughnut, when a footprint record was present.
    #[must_use]
    pub const fn breakdown_chart(&self) -> Option<&Chart> {
        self.breakdown_chart.as_ref()
    }

    /// The department comparison chart, when department data was present.
    #[must_use]
    pub const fn department_chart(&self) -> Option<&Chart> {
        self.department_chart.as_ref()
    }

    /// The company trend chart, when trend data was present.
    #[must_use]
    pub const fn company_trend_chart(&self) -> Option<&Chart> {
        self.company_trend_chart.as_ref()
    }

    /// The live toast stack.
    #[must_use]
    pub const fn toasts(&self) -> &ToastManager {
        &self.toasts
    }
}

impl State for DashboardPage {
    type Message = DashboardMsg;

    fn update(&mut self, msg: DashboardMsg) -> Command {
        match msg {
            DashboardMsg::ForecastPeriodChanged => {
                self.toasts.show("Forecast period updated", ToastKind::Info);
            }
            DashboardMsg::DepartmentFilterChanged => {
                self.toasts.show("Department filter applied", ToastKind::Info);
            }
            DashboardMsg::DateRangeChanged => {
                self.toasts.show("Date range updated", ToastKind::Info);
            }
            DashboardMsg::Tick { elapsed_ms } => {
                self.toasts.tick(elapsed_ms);
            }
        }
        Command::None
    }
}
