//! Footprint record ingestion.
//!
//! Dashboard payloads arrive in two historical shapes: the current model
//! carries a measured per-category breakdown, the legacy model carries raw
//! lifestyle inputs. The shape is decided exactly once here, at the
//! ingestion boundary, and everything downstream works with the tagged
//! [`FootprintRecord`]; no render site re-detects schemas. A record that
//! fits neither shape degrades to a proportional synthetic breakdown from
//! its total.

use crate::estimate::{commute_emissions, diet_emissions, office_emissions, LifestyleProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The measured (current-model) record shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredFootprint {
    /// Commuting emissions in kg CO₂e
    pub commute_footprint: f64,
    /// Office emissions in kg CO₂e
    pub office_footprint: f64,
    /// Travel emissions in kg CO₂e
    pub travel_footprint: f64,
    /// Transaction emissions, when transaction data exists
    #[serde(default)]
    pub transaction_footprint: f64,
    /// Whether transaction data was collected
    #[serde(default)]
    pub has_transaction_data: bool,
}

/// A classified footprint record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FootprintRecord {
    /// Current model: measured per-category values
    Measured(MeasuredFootprint),
    /// Legacy model: lifestyle inputs run through the client estimators
    Lifestyle(LifestyleProfile),
}

impl FootprintRecord {
    /// Classify a raw payload once, at the boundary.
    ///
    /// Returns `None` when the record fits neither shape; callers degrade
    /// to [`estimated_breakdown`] with the record's total.
    #[must_use]
    pub fn ingest(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        if object.contains_key("commute_footprint") {
            return serde_json::from_value(raw.clone()).ok().map(Self::Measured);
        }
        const LIFESTYLE_KEYS: [&str; 5] = [
            "commute_distance",
            "commute_mode",
            "diet_type",
            "office_days_per_week",
            "energy_usage",
        ];
        if LIFESTYLE_KEYS.iter().any(|key| object.contains_key(*key)) {
            return serde_json::from_value(raw.clone()).ok().map(Self::Lifestyle);
        }
        None
    }

    /// Labeled chart values for the breakdown doughnut.
    #[must_use]
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::Measured(measured) => {
                let mut entries = vec![
                    ("Commuting", measured.commute_footprint),
                    ("Office", measured.office_footprint),
                    ("Travel", measured.travel_footprint),
                ];
                if measured.has_transaction_data {
                    entries.push(("Transactions", measured.transaction_footprint));
                }
                entries
            }
            Self::Lifestyle(profile) => vec![
                ("Commuting", commute_emissions(profile)),
                ("Diet", diet_emissions(profile)),
                ("Office", office_emissions(profile)),
            ],
        }
    }
}

/// Synthesize a proportional breakdown from a total: 40% commuting, 40%
/// office, 20% travel. The degradation path for unclassifiable records.
#[must_use]
pub fn estimated_breakdown(total_footprint: f64) -> Vec<(&'static str, f64)> {
    let total = total_footprint.max(0.0);
    vec![
        ("Commuting", total * 0.4),
        ("Office", total * 0.4),
        ("Travel", total * 0.2),
    ]
}
