//! Client-side emission estimators.
//!
//! Used only when a footprint record carries lifestyle inputs instead of a
//! structured breakdown. These are deliberately simple lookup-table
//! estimates; authoritative calculation happens server-side.

use serde::{Deserialize, Serialize};

/// Commute transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommuteMode {
    /// Private car (see [`CarType`])
    #[default]
    Car,
    /// Bus
    Bus,
    /// Train
    Train,
    /// Bicycle
    Bike,
    /// Walking
    Walk,
}

/// Car drivetrain, relevant only for [`CommuteMode::Car`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    /// Petrol/diesel
    #[default]
    Combustion,
    /// Battery electric
    Electric,
    /// Hybrid
    Hybrid,
}

/// Diet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    /// Meat-inclusive diet
    #[default]
    Omnivore,
    /// Fish but no meat
    Pescatarian,
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
}

/// Low/medium/high consumption level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    /// Low usage
    Low,
    /// Medium usage
    #[default]
    Medium,
    /// High usage
    High,
}

/// Lifestyle inputs for the estimators; every field has a named default so
/// sparse records still estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifestyleProfile {
    /// One-way commute distance in km
    #[serde(default)]
    pub commute_distance: f64,
    /// Commute transport mode
    #[serde(default)]
    pub commute_mode: CommuteMode,
    /// Car drivetrain
    #[serde(default)]
    pub car_type: CarType,
    /// Diet type
    #[serde(default)]
    pub diet_type: DietType,
    /// Share of locally sourced food, 0–100
    #[serde(default)]
    pub local_food_percentage: f64,
    /// Days per week in the office
    #[serde(default)]
    pub office_days_per_week: f64,
    /// Paper consumption level
    #[serde(default)]
    pub paper_usage: UsageLevel,
    /// Energy consumption level
    #[serde(default)]
    pub energy_usage: UsageLevel,
}

/// Weekly commute emissions in kg CO₂e: distance × mode factor × 5 workdays.
#[must_use]
pub fn commute_emissions(profile: &LifestyleProfile) -> f64 {
    let factor = match profile.commute_mode {
        CommuteMode::Car => match profile.car_type {
            CarType::Combustion => 0.41,
            CarType::Electric => 0.1,
            CarType::Hybrid => 0.19,
        },
        CommuteMode::Bus => 0.18,
        CommuteMode::Train => 0.12,
        CommuteMode::Bike | CommuteMode::Walk => 0.0,
    };
    round2(profile.commute_distance.max(0.0) * factor * 5.0)
}

/// Weekly diet emissions in kg CO₂e: base factor per diet type, reduced up
/// to 20% by the local-food share.
#[must_use]
pub fn diet_emissions(profile: &LifestyleProfile) -> f64 {
    let base = match profile.diet_type {
        DietType::Omnivore => 50.0,
        DietType::Pescatarian => 30.0,
        DietType::Vegetarian => 20.0,
        DietType::Vegan => 10.0,
    };
    let local = profile.local_food_percentage.clamp(0.0, 100.0);
    let adjustment = 1.0 - (local / 100.0 * 0.2);
    round2(base * adjustment)
}

/// Weekly office emissions in kg CO₂e: paper + energy factors scaled by
/// days in office.
#[must_use]
pub fn office_emissions(profile: &LifestyleProfile) -> f64 {
    let paper = match profile.paper_usage {
        UsageLevel::Low => 0.5,
        UsageLevel::Medium => 2.0,
        UsageLevel::High => 5.0,
    };
    let energy = match profile.energy_usage {
        UsageLevel::Low => 5.0,
        UsageLevel::Medium => 15.0,
        UsageLevel::High => 30.0,
    };
    let scale = profile.office_days_per_week.clamp(0.0, 7.0) / 5.0;
    round2((paper + energy) * scale)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
