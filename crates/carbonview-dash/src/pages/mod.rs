//! Page controllers.
//!
//! Each page owns its views through an explicit registry struct, feeds them
//! seed data, routes widget messages through its `update`, and projects
//! shared state (highlight selection, fetch results) back into the views.

mod breakdown_page;
mod dashboard_page;
mod events_page;

pub use breakdown_page::{BreakdownMsg, BreakdownPage};
pub use dashboard_page::{
    DashboardData, DashboardMsg, DashboardPage, DepartmentStats, ForecastSeries, TrendPoint,
};
pub use events_page::{EventDetailView, EventsMsg, EventsPage, ScoreBand};
