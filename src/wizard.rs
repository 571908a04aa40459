//! Trip planning wizard
//!
//! The wizard walks a fixed sequence of steps. Every step after the trip
//! details shows content for the chosen destination, and the last two steps
//! show the cost estimate and a printable summary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{
    Attraction, CatalogProvider, City, CulturalHighlight, Dish, Hotel, TransportOption,
    filter_hotels_by_budget,
};
use crate::currency::{format_inr, format_inr_amount};
use crate::estimate::{BudgetLevel, TripEstimate, TripRequest, assess};
use crate::{Result, YatraError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    TripDetails,
    Hotels,
    Attractions,
    Food,
    Culture,
    Transport,
    CostEstimate,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::TripDetails,
        WizardStep::Hotels,
        WizardStep::Attractions,
        WizardStep::Food,
        WizardStep::Culture,
        WizardStep::Transport,
        WizardStep::CostEstimate,
        WizardStep::Summary,
    ];

    /// One-based position in the sequence
    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .map_or(0, |index| index + 1)
    }

    #[must_use]
    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.position()).copied()
    }

    #[must_use]
    pub fn previous(self) -> Option<WizardStep> {
        self.position()
            .checked_sub(2)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            WizardStep::TripDetails => "trip-details",
            WizardStep::Hotels => "hotels",
            WizardStep::Attractions => "attractions",
            WizardStep::Food => "food",
            WizardStep::Culture => "culture",
            WizardStep::Transport => "transport",
            WizardStep::CostEstimate => "cost-estimate",
            WizardStep::Summary => "summary",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::TripDetails => "Trip Details",
            WizardStep::Hotels => "Where to Stay",
            WizardStep::Attractions => "Things to See",
            WizardStep::Food => "What to Eat",
            WizardStep::Culture => "Local Culture",
            WizardStep::Transport => "Getting Around",
            WizardStep::CostEstimate => "Cost Estimate",
            WizardStep::Summary => "Trip Summary",
        }
    }
}

impl FromStr for WizardStep {
    type Err = YatraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|step| step.slug() == s)
            .ok_or_else(|| YatraError::not_found(format!("Unknown wizard step: {s}")))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Destination overview shown on the first step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub request: TripRequest,
    pub city: String,
    pub state: String,
    pub description: String,
}

/// Content of a single wizard step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum WizardPanel {
    TripDetails(TripDetails),
    Hotels(Vec<Hotel>),
    Attractions(Vec<Attraction>),
    Food(Vec<Dish>),
    Culture(Vec<CulturalHighlight>),
    Transport(Vec<TransportOption>),
    CostEstimate(TripEstimate),
    Summary(TripSummary),
}

/// A step's panel with its place in the sequence
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardPage {
    pub step: WizardStep,
    pub title: &'static str,
    pub position: usize,
    pub total_steps: usize,
    pub previous: Option<WizardStep>,
    pub next: Option<WizardStep>,
    pub panel: WizardPanel,
}

/// Final recap of a planned trip
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub source_location: String,
    pub destination: String,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub estimate: TripEstimate,
}

impl TripSummary {
    /// Summarize a request; fails only on an invalid budget.
    pub fn from_request(request: &TripRequest) -> Result<Self> {
        Ok(Self {
            source_location: request.source_location.clone(),
            destination: request.destination.clone(),
            duration: request.duration.clone(),
            notes: request.notes.clone(),
            estimate: assess(request)?,
        })
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = &self.estimate;
        writeln!(f, "Trip from {} to {}", self.source_location, self.destination)?;

        let duration = self.duration.as_deref().unwrap_or("Duration not set");
        writeln!(
            f,
            "   🗓️ {duration} (planned as {} days), {} travel",
            estimate.days, estimate.travel_style
        )?;

        writeln!(f, "   💰 Budget: {}", format_inr_amount(estimate.budget))?;

        for (category, amount) in estimate.breakdown.categories() {
            writeln!(f, "      {category:<14} {:>12}", format_inr(amount))?;
        }
        writeln!(f, "      {:<14} {:>12}", "Total", format_inr(estimate.breakdown.total))?;

        let marker = match estimate.status.level {
            BudgetLevel::Good => "✅",
            BudgetLevel::Warning => "⚠️",
            BudgetLevel::Exceed => "❌",
        };
        writeln!(f, "   {marker} {}", estimate.status.message)?;

        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            writeln!(f, "   📝 Notes: {notes}")?;
        }
        Ok(())
    }
}

/// Builds wizard pages from a request and the content catalog
pub struct WizardFlow<'a> {
    catalog: &'a dyn CatalogProvider,
}

impl<'a> WizardFlow<'a> {
    #[must_use]
    pub fn new(catalog: &'a dyn CatalogProvider) -> Self {
        Self { catalog }
    }

    /// Check the fields the trip-details form requires and resolve the destination
    pub fn validate_trip_details(&self, request: &TripRequest) -> Result<&'a City> {
        if request.source_location.trim().is_empty() {
            return Err(YatraError::validation("Source location is required"));
        }
        if request.destination.trim().is_empty() {
            return Err(YatraError::validation("Destination is required"));
        }
        if !request.budget.is_finite() || request.budget <= 0.0 {
            return Err(YatraError::validation("Budget must be a positive number"));
        }

        self.catalog.city(&request.destination).ok_or_else(|| {
            YatraError::validation(format!(
                "No travel guide available for {}",
                request.destination.trim()
            ))
        })
    }

    #[instrument(level = "debug", skip(self, request), fields(destination = %request.destination))]
    pub fn panel(&self, step: WizardStep, request: &TripRequest) -> Result<WizardPanel> {
        let city = self.validate_trip_details(request)?;

        let panel = match step {
            WizardStep::TripDetails => WizardPanel::TripDetails(TripDetails {
                request: request.clone(),
                city: city.name.clone(),
                state: city.state.clone(),
                description: city.description.clone(),
            }),
            WizardStep::Hotels => {
                WizardPanel::Hotels(filter_hotels_by_budget(&city.hotels, request.budget))
            }
            WizardStep::Attractions => WizardPanel::Attractions(city.attractions.clone()),
            WizardStep::Food => WizardPanel::Food(city.dishes.clone()),
            WizardStep::Culture => WizardPanel::Culture(city.culture.clone()),
            WizardStep::Transport => WizardPanel::Transport(city.transport.clone()),
            WizardStep::CostEstimate => WizardPanel::CostEstimate(assess(request)?),
            WizardStep::Summary => WizardPanel::Summary(TripSummary::from_request(request)?),
        };
        Ok(panel)
    }

    pub fn page(&self, step: WizardStep, request: &TripRequest) -> Result<WizardPage> {
        Ok(WizardPage {
            step,
            title: step.title(),
            position: step.position(),
            total_steps: WizardStep::ALL.len(),
            previous: step.previous(),
            next: step.next(),
            panel: self.panel(step, request)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use rstest::rstest;

    fn goa_trip() -> TripRequest {
        TripRequest::new("Pune", "Goa", 10000.0)
            .with_duration("3-4 days")
            .with_travel_style("mid-range")
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(WizardStep::TripDetails.position(), 1);
        assert_eq!(WizardStep::Summary.position(), 8);
        assert_eq!(WizardStep::TripDetails.previous(), None);
        assert_eq!(WizardStep::TripDetails.next(), Some(WizardStep::Hotels));
        assert_eq!(WizardStep::Transport.next(), Some(WizardStep::CostEstimate));
        assert_eq!(WizardStep::Summary.previous(), Some(WizardStep::CostEstimate));
        assert_eq!(WizardStep::Summary.next(), None);
    }

    #[rstest]
    #[case("trip-details", WizardStep::TripDetails)]
    #[case("cost-estimate", WizardStep::CostEstimate)]
    #[case("summary", WizardStep::Summary)]
    fn test_step_from_slug(#[case] slug: &str, #[case] expected: WizardStep) {
        assert_eq!(slug.parse::<WizardStep>().unwrap(), expected);
        assert_eq!(expected.slug(), slug);
    }

    #[test]
    fn test_unknown_step_slug() {
        assert!(matches!(
            "checkout".parse::<WizardStep>(),
            Err(YatraError::NotFound { .. })
        ));
    }

    #[rstest]
    #[case(TripRequest::new("", "Goa", 1000.0), "Source location")]
    #[case(TripRequest::new("Pune", " ", 1000.0), "Destination is required")]
    #[case(TripRequest::new("Pune", "Goa", 0.0), "positive")]
    #[case(TripRequest::new("Pune", "Atlantis", 1000.0), "No travel guide")]
    fn test_trip_details_validation(#[case] request: TripRequest, #[case] expected: &str) {
        let catalog = StaticCatalog::embedded().unwrap();
        let flow = WizardFlow::new(&catalog);
        let err = flow.validate_trip_details(&request).unwrap_err();
        assert!(matches!(err, YatraError::Validation { .. }));
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_hotels_panel_is_budget_filtered() {
        let catalog = StaticCatalog::embedded().unwrap();
        let flow = WizardFlow::new(&catalog);

        let WizardPanel::Hotels(hotels) = flow.panel(WizardStep::Hotels, &goa_trip()).unwrap() else {
            panic!("expected hotels panel");
        };
        assert!(!hotels.is_empty());
        assert!(hotels.len() < catalog.city("Goa").unwrap().hotels.len());
    }

    #[test]
    fn test_cost_estimate_page() {
        let catalog = StaticCatalog::embedded().unwrap();
        let flow = WizardFlow::new(&catalog);

        let page = flow.page(WizardStep::CostEstimate, &goa_trip()).unwrap();
        assert_eq!(page.position, 7);
        assert_eq!(page.next, Some(WizardStep::Summary));
        let WizardPanel::CostEstimate(estimate) = page.panel else {
            panic!("expected cost estimate panel");
        };
        assert_eq!(estimate.breakdown.total, 10000);
        assert_eq!(estimate.status.level, BudgetLevel::Good);
    }

    #[test]
    fn test_summary_display() {
        let request = TripRequest::new("Pune", "Goa", 5000.0)
            .with_duration("1-2 days")
            .with_travel_style("premium")
            .with_notes("Beach shacks");
        let text = TripSummary::from_request(&request).unwrap().to_string();

        assert!(text.starts_with("Trip from Pune to Goa"));
        assert!(text.contains("premium travel"));
        assert!(text.contains("₹5,000"));
        assert!(text.contains("₹6,499"));
        assert!(text.contains("Consider reducing some expenses"));
        assert!(text.contains("Notes: Beach shacks"));
    }

    #[test]
    fn test_summary_keeps_paise_in_budget() {
        let request = TripRequest::new("Delhi", "Agra", 12345.67);
        let text = TripSummary::from_request(&request).unwrap().to_string();

        assert!(text.contains("Budget: ₹12,345.67"), "{text}");
    }
}
