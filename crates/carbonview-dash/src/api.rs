//! Company API client: endpoints, payload types, and fallback datasets.
//!
//! Every fetch failure degrades to a hardcoded fallback dataset so the UI
//! never shows an empty chart; failures are logged, not surfaced.

use carbonview_core::{FetchGeneration, FetchRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event filter for the emissions-by-type endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Virtual events
    Virtual,
    /// In-person events
    InPerson,
}

impl EventType {
    /// Wire value used in the query string.
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::InPerson => "in_person",
        }
    }

    /// Endpoint path for this filter.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/company/api/events_by_type?type={}", self.as_query())
    }
}

/// Interval for the trend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendInterval {
    /// Per-quarter aggregation
    Quarterly,
    /// Per-month aggregation
    Monthly,
}

impl TrendInterval {
    /// Wire value used in the query string.
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
        }
    }

    /// Endpoint path for this interval.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/company/api/trend_data?interval={}", self.as_query())
    }

    /// X-axis title shown with this interval.
    #[must_use]
    pub const fn axis_title(&self) -> &'static str {
        match self {
            Self::Quarterly => "Quarter",
            Self::Monthly => "Month",
        }
    }
}

/// `GET /company/api/events_by_type` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsByType {
    /// Per-source emission totals in wire order
    pub emissions: Vec<f64>,
}

/// `GET /company/api/trend_data` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendData {
    /// X-axis labels
    pub labels: Vec<String>,
    /// Emissions per label
    pub emissions: Vec<f64>,
}

/// Impact equivalents in an event detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEquivalents {
    /// Trees that would absorb the same CO₂
    pub trees_planted: u64,
    /// Car miles with the same footprint
    pub car_miles: u64,
}

/// Per-source emissions breakdown in an event detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsBreakdown {
    /// Source labels
    pub labels: Vec<String>,
    /// Emissions per source
    pub data: Vec<f64>,
}

/// `GET /company/api/event/{id}` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    /// Event name
    pub name: String,
    /// Start date, ISO formatted
    pub start_date: String,
    /// End date, ISO formatted
    pub end_date: String,
    /// Venue, empty for virtual events
    #[serde(default)]
    pub location: String,
    /// Whether the event was virtual
    #[serde(default)]
    pub is_virtual: bool,
    /// Attendee count
    pub attendees_count: u64,
    /// Event type label
    pub event_type: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Sustainability score, 0–100
    pub sustainability_score: u8,
    /// Share of emissions offset, 0–100
    pub carbon_offset_percentage: f64,
    /// Absolute offset in kg CO₂e
    pub co2_offset: f64,
    /// Sustainability initiatives taken
    #[serde(default)]
    pub sustainability_initiatives: Vec<String>,
    /// Total emissions in kg CO₂e
    pub total_emissions: f64,
    /// Per-source breakdown
    pub emissions_breakdown: EmissionsBreakdown,
    /// Impact equivalents
    pub impact_equivalents: ImpactEquivalents,
}

/// Data-layer errors. None of these reach the user; they trigger fallback
/// datasets instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("transport failure: {0}")]
    Transport(String),
    /// Non-success HTTP status
    #[error("unexpected status {0}")]
    Status(u16),
    /// Body was not the expected JSON shape
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The company API surface used by the events page.
pub trait ApiClient {
    /// Emission totals filtered by event type.
    fn events_by_type(&self, event_type: EventType) -> Result<EmissionsByType, ApiError>;

    /// Company-wide trend data for an interval.
    fn trend_data(&self, interval: TrendInterval) -> Result<TrendData, ApiError>;

    /// Detail record for one event.
    fn event_detail(&self, event_id: u64) -> Result<EventDetail, ApiError>;
}

/// A resolved fetch, tagged with the generation of the request that issued
/// it so page controllers can discard stale completions.
#[derive(Debug)]
pub enum ApiResponse {
    /// Completion of an events-by-type fetch
    EventsByType {
        /// Generation stamped on the request
        generation: FetchGeneration,
        /// Filter that was requested
        event_type: EventType,
        /// Outcome
        result: Result<EmissionsByType, ApiError>,
    },
    /// Completion of a trend fetch
    Trend {
        /// Generation stamped on the request
        generation: FetchGeneration,
        /// Interval that was requested
        interval: TrendInterval,
        /// Outcome
        result: Result<TrendData, ApiError>,
    },
    /// Completion of an event-detail fetch
    EventDetail {
        /// Generation stamped on the request
        generation: FetchGeneration,
        /// Outcome
        result: Result<EventDetail, ApiError>,
    },
}

/// Resolve a described fetch against a client.
///
/// Returns `None` for paths outside the known API surface.
#[must_use]
pub fn execute(client: &dyn ApiClient, request: &FetchRequest) -> Option<ApiResponse> {
    let generation = request.generation;
    let path = request.path.as_str();

    if let Some(query) = path.strip_prefix("/company/api/events_by_type?type=") {
        let event_type = match query {
            "virtual" => EventType::Virtual,
            "in_person" => EventType::InPerson,
            _ => return None,
        };
        return Some(ApiResponse::EventsByType {
            generation,
            event_type,
            result: client.events_by_type(event_type),
        });
    }

    if let Some(query) = path.strip_prefix("/company/api/trend_data?interval=") {
        let interval = match query {
            "quarterly" => TrendInterval::Quarterly,
            "monthly" => TrendInterval::Monthly,
            _ => return None,
        };
        return Some(ApiResponse::Trend {
            generation,
            interval,
            result: client.trend_data(interval),
        });
    }

    if let Some(id) = path.strip_prefix("/company/api/event/") {
        let event_id = id.parse().ok()?;
        return Some(ApiResponse::EventDetail {
            generation,
            result: client.event_detail(event_id),
        });
    }

    None
}

/// Fallback datasets substituted when a fetch fails.
pub mod fallback {
    use super::{EmissionsByType, EventType, TrendData, TrendInterval};

    /// Emissions-by-type fallback: virtual events are dominated by digital
    /// sources, in-person by travel.
    #[must_use]
    pub fn events_by_type(event_type: EventType) -> EmissionsByType {
        let emissions = match event_type {
            EventType::Virtual => vec![5.0, 0.0, 0.0, 0.0, 10.0, 85.0],
            EventType::InPerson => vec![40.0, 20.0, 15.0, 15.0, 10.0, 0.0],
        };
        EmissionsByType { emissions }
    }

    /// Trend fallback datasets.
    #[must_use]
    pub fn trend(interval: TrendInterval) -> TrendData {
        match interval {
            TrendInterval::Quarterly => TrendData {
                labels: ["Q1 2025", "Q2 2025", "Q3 2025", "Q4 2025"]
                    .map(String::from)
                    .to_vec(),
                emissions: vec![1200.0, 980.0, 850.0, 1050.0],
            },
            TrendInterval::Monthly => TrendData {
                labels: [
                    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                    "Dec",
                ]
                .map(String::from)
                .to_vec(),
                emissions: vec![
                    400.0, 380.0, 420.0, 350.0, 320.0, 310.0, 290.0, 280.0, 280.0, 340.0, 360.0,
                    350.0,
                ],
            },
        }
    }
}
