//! Carbon footprint dashboard pages built on the Carbonview framework.
//!
//! This crate is the application layer: it ingests server-rendered seed
//! data, builds the category breakdown tree, runs the cross-view highlight
//! synchronizer, drives the quiz flow, and wires the employee dashboard and
//! company events pages to their charts, treemap, and API data sources.

pub mod api;
pub mod breakdown;
pub mod estimate;
pub mod highlight;
pub mod pages;
pub mod quiz;
pub mod record;
pub mod toasts;

pub use api::{ApiClient, ApiError, ApiResponse, EventType, TrendInterval};
pub use breakdown::{BreakdownSeed, CategoryNode, FootprintBreakdown};
pub use highlight::HighlightState;
pub use quiz::QuizState;
pub use record::FootprintRecord;
