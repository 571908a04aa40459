//! Trip cost estimation
//!
//! Converts a [`TripRequest`] into a categorized [`CostBreakdown`] and a
//! [`BudgetStatus`] verdict. The arithmetic runs in `f64` and floors at
//! fixed points so that totals persisted by earlier versions of the
//! planner reproduce bit for bit:
//!
//! 1. the category share of the budget (divided by the day count for the
//!    per-day categories) is floored,
//! 2. the result is scaled by the travel-style multiplier and floored again,
//! 3. per-day categories are multiplied back by the day count.
//!
//! Unknown or missing duration and travel-style values never fail; they fall
//! back to three days and the mid-range multiplier. Category amounts are
//! `u128` so that any finite budget fits; conversions saturate rather than
//! wrap for budgets beyond that range.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::debug;

use crate::currency::parse_amount;
use crate::{Result, YatraError};

/// Day count used when the duration is missing or unrecognized
pub const DEFAULT_DAYS: u32 = 3;

/// Share of the budget reserved for accommodation (per day)
const ACCOMMODATION_SHARE: f64 = 0.40;
/// Share of the budget reserved for transport
const TRANSPORT_SHARE: f64 = 0.25;
/// Share of the budget reserved for attractions
const ATTRACTIONS_SHARE: f64 = 0.15;
/// Share of the budget reserved for food (per day)
const FOOD_SHARE: f64 = 0.15;
/// Share of the budget reserved for miscellaneous spending
const MISCELLANEOUS_SHARE: f64 = 0.05;

/// Totals up to this factor of the budget are flagged as a warning
const WARNING_FACTOR: f64 = 1.2;

/// User input for one wizard run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Where the traveller starts from
    #[serde(default)]
    pub source_location: String,
    /// Destination city name
    #[serde(default)]
    pub destination: String,
    /// Total budget in rupees
    #[serde(deserialize_with = "deserialize_budget")]
    pub budget: f64,
    /// Duration label such as `"3-4 days"`
    #[serde(default)]
    pub duration: Option<String>,
    /// Travel style label: `economy`, `mid-range` or `premium`
    #[serde(default)]
    pub travel_style: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl TripRequest {
    /// Create a request with no duration, style or notes
    #[must_use]
    pub fn new(source_location: impl Into<String>, destination: impl Into<String>, budget: f64) -> Self {
        Self {
            source_location: source_location.into(),
            destination: destination.into(),
            budget,
            duration: None,
            travel_style: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn with_travel_style(mut self, style: impl Into<String>) -> Self {
        self.travel_style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Accepts a JSON number or a numeric string such as `"₹10,000"`.
fn deserialize_budget<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBudget {
        Number(f64),
        Text(String),
    }

    match RawBudget::deserialize(deserializer)? {
        RawBudget::Number(value) => Ok(value),
        RawBudget::Text(text) => parse_amount(&text)
            .ok_or_else(|| de::Error::custom(format!("budget must be a number, got {text:?}"))),
    }
}

/// Recognized trip durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripDuration {
    OneToTwoDays,
    ThreeToFourDays,
    FiveToSevenDays,
    OneToTwoWeeks,
    MoreThanTwoWeeks,
}

impl TripDuration {
    /// Lookup order matters: the first label contained in the input wins.
    pub const ALL: [TripDuration; 5] = [
        TripDuration::OneToTwoDays,
        TripDuration::ThreeToFourDays,
        TripDuration::FiveToSevenDays,
        TripDuration::OneToTwoWeeks,
        TripDuration::MoreThanTwoWeeks,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TripDuration::OneToTwoDays => "1-2 days",
            TripDuration::ThreeToFourDays => "3-4 days",
            TripDuration::FiveToSevenDays => "5-7 days",
            TripDuration::OneToTwoWeeks => "1-2 weeks",
            TripDuration::MoreThanTwoWeeks => "More than 2 weeks",
        }
    }

    /// Day count used for per-day budgeting
    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            TripDuration::OneToTwoDays => 2,
            TripDuration::ThreeToFourDays => 4,
            TripDuration::FiveToSevenDays => 6,
            TripDuration::OneToTwoWeeks => 10,
            TripDuration::MoreThanTwoWeeks => 15,
        }
    }

    /// Find the first duration whose label is a substring of `text`
    #[must_use]
    pub fn find_in(text: &str) -> Option<TripDuration> {
        Self::ALL
            .into_iter()
            .find(|duration| text.contains(duration.label()))
    }
}

/// Resolve a duration label to a day count, defaulting to [`DEFAULT_DAYS`]
#[must_use]
pub fn resolve_days(duration: Option<&str>) -> u32 {
    duration
        .and_then(TripDuration::find_in)
        .map_or(DEFAULT_DAYS, TripDuration::days)
}

/// Coarse cost tier applied uniformly across categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelStyle {
    Economy,
    MidRange,
    Premium,
}

impl TravelStyle {
    /// Resolve a style label; anything other than `economy` or `premium` is mid-range.
    #[must_use]
    pub fn resolve(label: Option<&str>) -> TravelStyle {
        match label {
            Some("economy") => TravelStyle::Economy,
            Some("premium") => TravelStyle::Premium,
            _ => TravelStyle::MidRange,
        }
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            TravelStyle::Economy => 0.8,
            TravelStyle::MidRange => 1.0,
            TravelStyle::Premium => 1.3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TravelStyle::Economy => "economy",
            TravelStyle::MidRange => "mid-range",
            TravelStyle::Premium => "premium",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Estimated spend per expense category, in whole rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub accommodation: u128,
    pub transport: u128,
    pub attractions: u128,
    pub food: u128,
    pub miscellaneous: u128,
    /// Sum of the five categories
    pub total: u128,
}

impl CostBreakdown {
    fn from_categories(
        accommodation: u128,
        transport: u128,
        attractions: u128,
        food: u128,
        miscellaneous: u128,
    ) -> Self {
        Self {
            accommodation,
            transport,
            attractions,
            food,
            miscellaneous,
            total: [transport, attractions, food, miscellaneous]
                .into_iter()
                .fold(accommodation, u128::saturating_add),
        }
    }

    /// Category name and amount pairs in display order
    #[must_use]
    pub fn categories(&self) -> [(&'static str, u128); 5] {
        [
            ("Accommodation", self.accommodation),
            ("Transport", self.transport),
            ("Attractions", self.attractions),
            ("Food", self.food),
            ("Miscellaneous", self.miscellaneous),
        ]
    }
}

/// Three-way budget sufficiency verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Good,
    Warning,
    Exceed,
}

impl BudgetLevel {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            BudgetLevel::Good => "Your budget is sufficient for this trip!",
            BudgetLevel::Warning => {
                "Consider increasing your budget by 20% for a comfortable trip."
            }
            BudgetLevel::Exceed => {
                "Your budget may be insufficient. Consider reducing some expenses."
            }
        }
    }
}

/// Budget verdict with its human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub level: BudgetLevel,
    pub message: String,
}

impl From<BudgetLevel> for BudgetStatus {
    fn from(level: BudgetLevel) -> Self {
        Self {
            level,
            message: level.message().to_string(),
        }
    }
}

/// Breakdown and verdict together with the resolved inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEstimate {
    pub budget: f64,
    pub days: u32,
    pub travel_style: TravelStyle,
    pub multiplier: f64,
    pub breakdown: CostBreakdown,
    pub status: BudgetStatus,
}

fn validate_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(YatraError::validation(
            "Budget must be a positive number",
        ));
    }
    Ok(())
}

/// Floors a non-negative amount; `as` saturates at `u128::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_rupees(amount: f64) -> u128 {
    amount.floor() as u128
}

fn allocate(budget: f64, days: u32, multiplier: f64) -> CostBreakdown {
    let days = f64::from(days);

    let accommodation_per_day = ((budget * ACCOMMODATION_SHARE / days).floor() * multiplier).floor();
    let accommodation = accommodation_per_day * days;
    let transport = ((budget * TRANSPORT_SHARE).floor() * multiplier).floor();
    let attractions = ((budget * ATTRACTIONS_SHARE).floor() * multiplier).floor();
    let food_per_day = ((budget * FOOD_SHARE / days).floor() * multiplier).floor();
    let food = food_per_day * days;
    let miscellaneous = ((budget * MISCELLANEOUS_SHARE).floor() * multiplier).floor();

    CostBreakdown::from_categories(
        whole_rupees(accommodation),
        whole_rupees(transport),
        whole_rupees(attractions),
        whole_rupees(food),
        whole_rupees(miscellaneous),
    )
}

/// Estimate the categorized cost of a trip.
///
/// # Errors
///
/// Returns a validation error when the budget is not a positive finite number.
pub fn estimate(request: &TripRequest) -> Result<CostBreakdown> {
    validate_budget(request.budget)?;

    let days = resolve_days(request.duration.as_deref());
    let style = TravelStyle::resolve(request.travel_style.as_deref());
    let breakdown = allocate(request.budget, days, style.multiplier());

    debug!(
        budget = request.budget,
        days,
        style = %style,
        total = breakdown.total,
        "Estimated trip cost"
    );
    Ok(breakdown)
}

/// Compare an estimated total against the stated budget
#[must_use]
pub fn classify_budget(total: u128, budget: f64) -> BudgetStatus {
    #[allow(clippy::cast_precision_loss)]
    let total = total as f64;

    let level = if total <= budget {
        BudgetLevel::Good
    } else if total <= budget * WARNING_FACTOR {
        BudgetLevel::Warning
    } else {
        BudgetLevel::Exceed
    };
    level.into()
}

/// Estimate a trip and classify the result against its budget.
///
/// # Errors
///
/// Returns a validation error when the budget is not a positive finite number.
pub fn assess(request: &TripRequest) -> Result<TripEstimate> {
    let breakdown = estimate(request)?;
    let style = TravelStyle::resolve(request.travel_style.as_deref());

    Ok(TripEstimate {
        budget: request.budget,
        days: resolve_days(request.duration.as_deref()),
        travel_style: style,
        multiplier: style.multiplier(),
        status: classify_budget(breakdown.total, request.budget),
        breakdown,
    })
}
