//! Company events page.
//!
//! Seeds the emissions doughnut and trend bar chart from server-rendered
//! data, then mutates them through two toggles (event type, trend interval)
//! backed by fetches. Every toggle owns a request generation: a completion
//! stamped with an older generation than the toggle's latest is stale and is
//! dropped, so a slow first response can never overwrite a fast second one.
//! Fetch failures fall back to hardcoded datasets and are logged, never
//! surfaced.

use crate::api::{self, ApiError, ApiResponse, EventDetail, EventType, TrendInterval};
use crate::highlight::HighlightState;
use carbonview_core::{
    Color, Command, FetchGeneration, FetchRequest, Rect, Size, State, Theme, VisualFlag, Widget,
};
use carbonview_widgets::{Axis, Chart, DataSeries, LegendPosition, Modal, ModalSize, Tooltip};

/// Messages handled by the events page.
#[derive(Debug)]
pub enum EventsMsg {
    /// Event type selected in the virtual / in-person toggle
    EventTypeSelected(EventType),
    /// The quarterly / monthly toggle was clicked
    TrendIntervalToggled,
    /// An emission category card is hovered
    CardHovered(usize),
    /// The pointer left the category cards
    CardHoverEnded,
    /// An emission category card was clicked
    CardClicked(usize),
    /// A carbon badge is hovered; carries the badge's bounds
    BadgeHovered(Rect),
    /// The pointer left the carbon badges
    BadgeHoverEnded,
    /// An event row requested its detail modal
    ShowEventDetails(u64),
    /// The detail modal was dismissed
    ModalDismissed,
    /// A fetch completed
    Api(ApiResponse),
}

/// Sustainability score band, mirroring the reference UI's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80–100
    Excellent,
    /// 60–79
    Good,
    /// 40–59
    Average,
    /// 0–39
    NeedsImprovement,
}

impl ScoreBand {
    /// Band for a 0–100 score.
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Average,
            _ => Self::NeedsImprovement,
        }
    }

    /// User-facing description.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent sustainability practices",
            Self::Good => "Good sustainability practices",
            Self::Average => "Average sustainability practices",
            Self::NeedsImprovement => "Needs improvement",
        }
    }

    /// Badge color from the page theme.
    #[must_use]
    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Excellent => theme.palette.primary,
            Self::Good => theme.palette.secondary,
            Self::Average => theme.palette.warning,
            Self::NeedsImprovement => theme.palette.danger,
        }
    }
}

/// View-model for the populated detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetailView {
    /// Event name (modal title)
    pub name: String,
    /// `"{start} to {end}"`
    pub date_range: String,
    /// Venue, or "Virtual Event"
    pub location_text: String,
    /// `"{n} attendees"`
    pub attendees_text: String,
    /// Event type label
    pub event_type: String,
    /// Description
    pub description: String,
    /// Sustainability score
    pub score: u8,
    /// Score band
    pub band: ScoreBand,
    /// Offset percentage, 0–100
    pub offset_percentage: f64,
    /// `"{kg} kg CO₂e offset through sustainability initiatives"`
    pub offset_text: String,
    /// Initiatives, with a placeholder entry when none exist
    pub initiatives: Vec<String>,
    /// Trees-planted equivalent
    pub trees_planted: u64,
    /// Car-miles equivalent
    pub car_miles: u64,
}

impl EventDetailView {
    fn from_detail(detail: &EventDetail) -> Self {
        let initiatives = if detail.sustainability_initiatives.is_empty() {
            vec!["No sustainability initiatives recorded for this event.".to_string()]
        } else {
            detail.sustainability_initiatives.clone()
        };
        Self {
            name: detail.name.clone(),
            date_range: format!("{} to {}", detail.start_date, detail.end_date),
            location_text: if detail.is_virtual {
                "Virtual Event".to_string()
            } else {
                detail.location.clone()
            },
            attendees_text: format!("{} attendees", detail.attendees_count),
            event_type: detail.event_type.clone(),
            description: detail.description.clone(),
            score: detail.sustainability_score,
            band: ScoreBand::for_score(detail.sustainability_score),
            offset_percentage: detail.carbon_offset_percentage.clamp(0.0, 100.0),
            offset_text: format!(
                "{} kg CO₂e offset through sustainability initiatives",
                detail.co2_offset
            ),
            initiatives,
            trees_planted: detail.impact_equivalents.trees_planted,
            car_miles: detail.impact_equivalents.car_miles,
        }
    }
}

/// The page controller and its view registry.
pub struct EventsPage {
    theme: Theme,
    emissions_chart: Chart,
    trend_chart: Chart,
    card_labels: Vec<String>,
    card_selection: HighlightState,
    quarterly_view: bool,
    event_type_gen: FetchGeneration,
    trend_gen: FetchGeneration,
    detail_gen: FetchGeneration,
    modal: Modal,
    badge_tooltip: Tooltip,
    detail: Option<EventDetailView>,
    detail_chart: Option<Chart>,
    detail_error: Option<String>,
    loading_detail: bool,
}

impl EventsPage {
    /// Build the page from the server-rendered seed data.
    #[must_use]
    pub fn new(
        emission_labels: Vec<String>,
        emission_values: Vec<f64>,
        trend_labels: Vec<String>,
        trend_values: Vec<f64>,
        container: Size,
    ) -> Self {
        let theme = Theme::company();
        let source_colors = theme.chart.emission_sources.to_vec();

        let mut emissions_chart = Chart::doughnut()
            .labels(emission_labels.clone())
            .series(DataSeries::new("kg CO₂e").values(emission_values))
            .slice_colors(source_colors)
            .cutout(0.65);
        emissions_chart.layout(Rect::new(0.0, 0.0, container.width / 2.0, 320.0));

        let mut trend_chart = Chart::bar()
            .labels(trend_labels)
            .series(
                DataSeries::new("Total Emissions (kg CO₂e)")
                    .values(trend_values)
                    .color(theme.palette.primary),
            )
            .y_axis(Axis::new().title("kg CO₂e").begin_at_zero())
            .x_axis(Axis::new().title(TrendInterval::Quarterly.axis_title()))
            .legend(LegendPosition::Top);
        trend_chart.layout(Rect::new(0.0, 340.0, container.width, 320.0));

        let mut modal = Modal::new().size(ModalSize::Large);
        modal.layout(Rect::new(0.0, 0.0, container.width, container.height));

        Self {
            theme,
            emissions_chart,
            trend_chart,
            card_labels: emission_labels,
            card_selection: HighlightState::new(),
            quarterly_view: true,
            event_type_gen: FetchGeneration::default(),
            trend_gen: FetchGeneration::default(),
            detail_gen: FetchGeneration::default(),
            modal,
            badge_tooltip: Tooltip::new("Carbon footprint impact"),
            detail: None,
            detail_chart: None,
            detail_error: None,
            loading_detail: false,
        }
    }

    // ---- accessors ----

    /// The emissions doughnut.
    #[must_use]
    pub const fn emissions_chart(&self) -> &Chart {
        &self.emissions_chart
    }

    /// The trend bar chart.
    #[must_use]
    pub const fn trend_chart(&self) -> &Chart {
        &self.trend_chart
    }

    /// Toggle caption for the trend interval button.
    #[must_use]
    pub const fn trend_toggle_text(&self) -> &'static str {
        if self.quarterly_view {
            "Quarterly View"
        } else {
            "Monthly View"
        }
    }

    /// Visual flag for a category card. Hover alone moves only the chart's
    /// active slice; card dimming applies when a card is pinned.
    #[must_use]
    pub fn card_flag(&self, index: usize) -> VisualFlag {
        if !self.card_selection.is_pinned() {
            return VisualFlag::Normal;
        }
        self.card_selection.flag_for(&index.to_string())
    }

    /// Labels of the emission category cards, in chart order.
    #[must_use]
    pub fn card_labels(&self) -> &[String] {
        &self.card_labels
    }

    /// The detail modal.
    #[must_use]
    pub const fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The carbon badge tooltip.
    #[must_use]
    pub const fn badge_tooltip(&self) -> &Tooltip {
        &self.badge_tooltip
    }

    /// The populated detail view, once loaded.
    #[must_use]
    pub const fn detail(&self) -> Option<&EventDetailView> {
        self.detail.as_ref()
    }

    /// The per-event breakdown chart inside the modal.
    #[must_use]
    pub const fn detail_chart(&self) -> Option<&Chart> {
        self.detail_chart.as_ref()
    }

    /// Loading-area error message, when the detail fetch failed.
    #[must_use]
    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    /// Whether the modal is showing its loading state.
    #[must_use]
    pub const fn is_loading_detail(&self) -> bool {
        self.loading_detail
    }

    /// The page theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    // ---- internals ----

    fn sync_active_slice(&mut self) {
        let index = self
            .card_selection
            .active()
            .and_then(|id| id.parse::<usize>().ok());
        self.emissions_chart.set_active_index(index);
    }

    fn apply_events_by_type(&mut self, event_type: EventType, result: Result<api::EmissionsByType, ApiError>) {
        let payload = match result {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, event_type = event_type.as_query(), "events_by_type fetch failed, using fallback data");
                api::fallback::events_by_type(event_type)
            }
        };
        self.emissions_chart.set_series_values(0, payload.emissions);
    }

    fn apply_trend(&mut self, interval: TrendInterval, result: Result<api::TrendData, ApiError>) {
        let payload = match result {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, interval = interval.as_query(), "trend fetch failed, using fallback data");
                api::fallback::trend(interval)
            }
        };
        self.trend_chart.set_labels(payload.labels);
        self.trend_chart.set_series_values(0, payload.emissions);
        self.trend_chart.set_x_title(interval.axis_title());
    }

    fn apply_event_detail(&mut self, result: Result<EventDetail, ApiError>) {
        self.loading_detail = false;
        match result {
            Ok(detail) => {
                self.modal.set_title(detail.name.clone());
                // The breakdown chart is recreated per open, never reused.
                self.detail_chart = Some(
                    Chart::bar()
                        .labels(detail.emissions_breakdown.labels.clone())
                        .series(
                            DataSeries::new("kg CO₂e")
                                .values(detail.emissions_breakdown.data.clone()),
                        )
                        .slice_colors(self.theme.chart.emission_sources.to_vec())
                        .y_axis(Axis::new().title("kg CO₂e").begin_at_zero())
                        .legend(LegendPosition::None),
                );
                self.detail = Some(EventDetailView::from_detail(&detail));
            }
            Err(error) => {
                tracing::warn!(%error, "event detail fetch failed");
                self.detail_error =
                    Some("Error loading event details. Please try again.".to_string());
            }
        }
    }
}

impl State for EventsPage {
    type Message = EventsMsg;

    fn update(&mut self, msg: EventsMsg) -> Command {
        match msg {
            EventsMsg::EventTypeSelected(event_type) => {
                self.event_type_gen = self.event_type_gen.next();
                Command::Fetch(FetchRequest {
                    path: event_type.path(),
                    generation: self.event_type_gen,
                })
            }
            EventsMsg::TrendIntervalToggled => {
                self.quarterly_view = !self.quarterly_view;
                let interval = if self.quarterly_view {
                    TrendInterval::Quarterly
                } else {
                    TrendInterval::Monthly
                };
                self.trend_gen = self.trend_gen.next();
                Command::Fetch(FetchRequest {
                    path: interval.path(),
                    generation: self.trend_gen,
                })
            }
            EventsMsg::CardHovered(index) => {
                if !self.card_selection.is_pinned() {
                    self.card_selection.hover_enter(&index.to_string());
                    self.sync_active_slice();
                }
                Command::None
            }
            EventsMsg::CardHoverEnded => {
                if !self.card_selection.is_pinned() {
                    self.card_selection.hover_leave();
                    self.sync_active_slice();
                }
                Command::None
            }
            EventsMsg::CardClicked(index) => {
                self.card_selection.click(&index.to_string());
                self.sync_active_slice();
                Command::None
            }
            EventsMsg::BadgeHovered(anchor) => {
                self.badge_tooltip.set_anchor(anchor);
                self.badge_tooltip.show();
                Command::None
            }
            EventsMsg::BadgeHoverEnded => {
                self.badge_tooltip.hide();
                Command::None
            }
            EventsMsg::ShowEventDetails(event_id) => {
                self.loading_detail = true;
                self.detail = None;
                self.detail_chart = None;
                self.detail_error = None;
                self.modal.set_title("Loading…");
                self.modal.open();
                self.detail_gen = self.detail_gen.next();
                Command::Fetch(FetchRequest {
                    path: format!("/company/api/event/{event_id}"),
                    generation: self.detail_gen,
                })
            }
            EventsMsg::ModalDismissed => {
                self.modal.close();
                Command::None
            }
            EventsMsg::Api(response) => {
                match response {
                    ApiResponse::EventsByType {
                        generation,
                        event_type,
                        result,
                    } => {
                        if generation == self.event_type_gen {
                            self.apply_events_by_type(event_type, result);
                        } else {
                            tracing::debug!(?generation, "discarding stale events_by_type response");
                        }
                    }
                    ApiResponse::Trend {
                        generation,
                        interval,
                        result,
                    } => {
                        if generation == self.trend_gen {
                            self.apply_trend(interval, result);
                        } else {
                            tracing::debug!(?generation, "discarding stale trend response");
                        }
                    }
                    ApiResponse::EventDetail { generation, result } => {
                        if generation == self.detail_gen && self.modal.is_open() {
                            self.apply_event_detail(result);
                        } else {
                            tracing::debug!(?generation, "discarding stale event detail response");
                        }
                    }
                }
                Command::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EmissionsByType, TrendData};

    fn seed_page() -> EventsPage {
        EventsPage::new(
            vec![
                "Travel".to_string(),
                "Venue".to_string(),
                "Accommodation".to_string(),
                "Catering".to_string(),
                "Materials".to_string(),
                "Digital".to_string(),
            ],
            vec![400.0, 200.0, 150.0, 150.0, 100.0, 0.0],
            vec!["Q1 2025".to_string(), "Q2 2025".to_string()],
            vec![1200.0, 980.0],
            Size::new(1200.0, 800.0),
        )
    }

    fn sample_detail() -> EventDetail {
        serde_json::from_value(serde_json::json!({
            "name": "Annual Summit",
            "start_date": "2025-05-10",
            "end_date": "2025-05-12",
            "location": "Lisbon",
            "attendees_count": 300,
            "event_type": "Conference",
            "description": "Company-wide gathering",
            "sustainability_score": 72,
            "carbon_offset_percentage": 45.0,
            "co2_offset": 900.0,
            "sustainability_initiatives": ["Rail travel incentives"],
            "total_emissions": 2000.0,
            "emissions_breakdown": {"labels": ["Travel", "Venue"], "data": [1500.0, 500.0]},
            "impact_equivalents": {"trees_planted": 90, "car_miles": 4900}
        }))
        .expect("valid detail")
    }

    fn fetch(cmd: &Command) -> FetchRequest {
        match cmd.fetches().as_slice() {
            [request] => (*request).clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    // ===== Score Bands =====

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(95), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(72), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(45), ScoreBand::Average);
        assert_eq!(ScoreBand::for_score(10), ScoreBand::NeedsImprovement);
    }

    #[test]
    fn test_score_band_colors_follow_theme() {
        let theme = Theme::company();
        assert_eq!(ScoreBand::Excellent.color(&theme), theme.palette.primary);
        assert_eq!(
            ScoreBand::NeedsImprovement.color(&theme),
            theme.palette.danger
        );
    }

    // ===== Event Type Toggle =====

    #[test]
    fn test_event_type_toggle_issues_fetch() {
        let mut page = seed_page();
        let cmd = page.update(EventsMsg::EventTypeSelected(EventType::Virtual));
        let request = fetch(&cmd);
        assert_eq!(request.path, "/company/api/events_by_type?type=virtual");
        assert_eq!(request.generation, FetchGeneration(1));
    }

    #[test]
    fn test_event_type_success_updates_chart() {
        let mut page = seed_page();
        let cmd = page.update(EventsMsg::EventTypeSelected(EventType::Virtual));
        let request = fetch(&cmd);

        page.update(EventsMsg::Api(ApiResponse::EventsByType {
            generation: request.generation,
            event_type: EventType::Virtual,
            result: Ok(EmissionsByType {
                emissions: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            }),
        }));
        assert_eq!(
            page.emissions_chart().get_series()[0].values,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_event_type_failure_uses_fallback() {
        let mut page = seed_page();
        let cmd = page.update(EventsMsg::EventTypeSelected(EventType::Virtual));
        let request = fetch(&cmd);

        page.update(EventsMsg::Api(ApiResponse::EventsByType {
            generation: request.generation,
            event_type: EventType::Virtual,
            result: Err(ApiError::Status(502)),
        }));
        assert_eq!(
            page.emissions_chart().get_series()[0].values,
            vec![5.0, 0.0, 0.0, 0.0, 10.0, 85.0]
        );
    }

    #[test]
    fn test_stale_event_type_response_is_dropped() {
        let mut page = seed_page();
        let first = fetch(&page.update(EventsMsg::EventTypeSelected(EventType::Virtual)));
        let second = fetch(&page.update(EventsMsg::EventTypeSelected(EventType::InPerson)));

        // The fast second response lands first.
        page.update(EventsMsg::Api(ApiResponse::EventsByType {
            generation: second.generation,
            event_type: EventType::InPerson,
            result: Ok(EmissionsByType {
                emissions: vec![40.0, 20.0, 15.0, 15.0, 10.0, 0.0],
            }),
        }));
        // The slow first response arrives late and must not overwrite.
        page.update(EventsMsg::Api(ApiResponse::EventsByType {
            generation: first.generation,
            event_type: EventType::Virtual,
            result: Ok(EmissionsByType {
                emissions: vec![5.0, 0.0, 0.0, 0.0, 10.0, 85.0],
            }),
        }));

        assert_eq!(
            page.emissions_chart().get_series()[0].values,
            vec![40.0, 20.0, 15.0, 15.0, 10.0, 0.0]
        );
    }

    // ===== Trend Toggle =====

    #[test]
    fn test_trend_toggle_flips_view_and_fetches() {
        let mut page = seed_page();
        assert_eq!(page.trend_toggle_text(), "Quarterly View");

        let cmd = page.update(EventsMsg::TrendIntervalToggled);
        assert_eq!(page.trend_toggle_text(), "Monthly View");
        assert_eq!(
            fetch(&cmd).path,
            "/company/api/trend_data?interval=monthly"
        );

        let cmd = page.update(EventsMsg::TrendIntervalToggled);
        assert_eq!(page.trend_toggle_text(), "Quarterly View");
        assert_eq!(
            fetch(&cmd).path,
            "/company/api/trend_data?interval=quarterly"
        );
    }

    #[test]
    fn test_monthly_fetch_failure_falls_back_with_month_axis() {
        // The monthly fetch rejects: the chart falls back to the
        // 12-literal-value dataset and the axis title becomes "Month".
        let mut page = seed_page();
        let request = fetch(&page.update(EventsMsg::TrendIntervalToggled));

        page.update(EventsMsg::Api(ApiResponse::Trend {
            generation: request.generation,
            interval: TrendInterval::Monthly,
            result: Err(ApiError::Transport("connection refused".to_string())),
        }));

        assert_eq!(page.trend_chart().get_labels().len(), 12);
        assert_eq!(
            page.trend_chart().get_series()[0].values,
            vec![
                400.0, 380.0, 420.0, 350.0, 320.0, 310.0, 290.0, 280.0, 280.0, 340.0, 360.0,
                350.0
            ]
        );
        assert_eq!(page.trend_chart().x_title(), Some("Month"));
    }

    #[test]
    fn test_trend_success_updates_labels_and_title() {
        let mut page = seed_page();
        let request = fetch(&page.update(EventsMsg::TrendIntervalToggled));

        page.update(EventsMsg::Api(ApiResponse::Trend {
            generation: request.generation,
            interval: TrendInterval::Monthly,
            result: Ok(TrendData {
                labels: vec!["Jan".to_string(), "Feb".to_string()],
                emissions: vec![410.0, 390.0],
            }),
        }));
        assert_eq!(page.trend_chart().get_labels(), &["Jan", "Feb"]);
        assert_eq!(page.trend_chart().x_title(), Some("Month"));
    }

    #[test]
    fn test_stale_trend_response_is_dropped() {
        let mut page = seed_page();
        let monthly = fetch(&page.update(EventsMsg::TrendIntervalToggled));
        let quarterly = fetch(&page.update(EventsMsg::TrendIntervalToggled));

        page.update(EventsMsg::Api(ApiResponse::Trend {
            generation: quarterly.generation,
            interval: TrendInterval::Quarterly,
            result: Ok(TrendData {
                labels: vec!["Q1 2025".to_string()],
                emissions: vec![1000.0],
            }),
        }));
        page.update(EventsMsg::Api(ApiResponse::Trend {
            generation: monthly.generation,
            interval: TrendInterval::Monthly,
            result: Ok(TrendData {
                labels: vec!["Jan".to_string()],
                emissions: vec![400.0],
            }),
        }));

        assert_eq!(page.trend_chart().get_labels(), &["Q1 2025"]);
        assert_eq!(page.trend_chart().x_title(), Some("Quarter"));
    }

    // ===== Category Cards =====

    #[test]
    fn test_hover_moves_active_slice_without_dimming_cards() {
        let mut page = seed_page();
        page.update(EventsMsg::CardHovered(2));
        assert_eq!(page.emissions_chart().active_index(), Some(2));
        assert_eq!(page.card_flag(2), VisualFlag::Normal);

        page.update(EventsMsg::CardHoverEnded);
        assert_eq!(page.emissions_chart().active_index(), None);
    }

    #[test]
    fn test_click_pins_card_and_dims_others() {
        let mut page = seed_page();
        page.update(EventsMsg::CardClicked(1));
        assert_eq!(page.emissions_chart().active_index(), Some(1));
        assert_eq!(page.card_flag(1), VisualFlag::Highlighted);
        assert_eq!(page.card_flag(0), VisualFlag::Dimmed);

        // Hover elsewhere is ignored while pinned.
        page.update(EventsMsg::CardHovered(4));
        assert_eq!(page.emissions_chart().active_index(), Some(1));
    }

    #[test]
    fn test_reclick_resets_cards_and_chart() {
        let mut page = seed_page();
        page.update(EventsMsg::CardClicked(1));
        page.update(EventsMsg::CardClicked(1));
        assert_eq!(page.emissions_chart().active_index(), None);
        assert_eq!(page.card_flag(1), VisualFlag::Normal);
        assert_eq!(page.card_flag(0), VisualFlag::Normal);
    }

    #[test]
    fn test_badge_tooltip_shows_on_hover() {
        let mut page = seed_page();
        assert!(!page.badge_tooltip().is_visible());

        page.update(EventsMsg::BadgeHovered(Rect::new(40.0, 200.0, 60.0, 20.0)));
        assert!(page.badge_tooltip().is_visible());
        assert_eq!(page.badge_tooltip().content(), "Carbon footprint impact");

        page.update(EventsMsg::BadgeHoverEnded);
        assert!(!page.badge_tooltip().is_visible());
    }

    // ===== Event Detail Modal =====

    #[test]
    fn test_show_event_details_opens_loading_modal() {
        let mut page = seed_page();
        let cmd = page.update(EventsMsg::ShowEventDetails(42));
        assert!(page.modal().is_open());
        assert!(page.is_loading_detail());
        assert!(page.detail().is_none());
        assert_eq!(fetch(&cmd).path, "/company/api/event/42");
    }

    #[test]
    fn test_detail_success_populates_view_model() {
        let mut page = seed_page();
        let request = fetch(&page.update(EventsMsg::ShowEventDetails(42)));

        page.update(EventsMsg::Api(ApiResponse::EventDetail {
            generation: request.generation,
            result: Ok(sample_detail()),
        }));

        assert!(!page.is_loading_detail());
        let view = page.detail().expect("populated");
        assert_eq!(view.name, "Annual Summit");
        assert_eq!(view.date_range, "2025-05-10 to 2025-05-12");
        assert_eq!(view.location_text, "Lisbon");
        assert_eq!(view.attendees_text, "300 attendees");
        assert_eq!(view.band, ScoreBand::Good);
        assert_eq!(
            view.offset_text,
            "900 kg CO₂e offset through sustainability initiatives"
        );
        assert_eq!(view.initiatives, vec!["Rail travel incentives"]);
        assert_eq!(page.modal().get_title(), Some("Annual Summit"));

        let chart = page.detail_chart().expect("recreated");
        assert_eq!(chart.get_labels(), &["Travel", "Venue"]);
    }

    #[test]
    fn test_virtual_event_location_text() {
        let mut detail = sample_detail();
        detail.is_virtual = true;
        let view = EventDetailView::from_detail(&detail);
        assert_eq!(view.location_text, "Virtual Event");
    }

    #[test]
    fn test_empty_initiatives_get_placeholder() {
        let mut detail = sample_detail();
        detail.sustainability_initiatives.clear();
        let view = EventDetailView::from_detail(&detail);
        assert_eq!(
            view.initiatives,
            vec!["No sustainability initiatives recorded for this event."]
        );
    }

    #[test]
    fn test_detail_failure_shows_error_in_loading_area() {
        let mut page = seed_page();
        let request = fetch(&page.update(EventsMsg::ShowEventDetails(42)));

        page.update(EventsMsg::Api(ApiResponse::EventDetail {
            generation: request.generation,
            result: Err(ApiError::Status(500)),
        }));

        assert_eq!(
            page.detail_error(),
            Some("Error loading event details. Please try again.")
        );
        assert!(page.detail().is_none());
    }

    #[test]
    fn test_detail_response_after_dismissal_is_dropped() {
        let mut page = seed_page();
        let request = fetch(&page.update(EventsMsg::ShowEventDetails(42)));
        page.update(EventsMsg::ModalDismissed);

        page.update(EventsMsg::Api(ApiResponse::EventDetail {
            generation: request.generation,
            result: Ok(sample_detail()),
        }));
        assert!(page.detail().is_none());
    }

    #[test]
    fn test_reopened_modal_ignores_previous_fetch() {
        let mut page = seed_page();
        let first = fetch(&page.update(EventsMsg::ShowEventDetails(42)));
        let _second = fetch(&page.update(EventsMsg::ShowEventDetails(43)));

        page.update(EventsMsg::Api(ApiResponse::EventDetail {
            generation: first.generation,
            result: Ok(sample_detail()),
        }));
        // Still loading the second event; the first detail never lands.
        assert!(page.is_loading_detail());
        assert!(page.detail().is_none());
    }
}
