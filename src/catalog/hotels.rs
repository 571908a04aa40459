//! Hotel affordability filtering

use super::Hotel;
use crate::currency::parse_amount;

/// Lowest nightly price of a hotel, taken from the first amount of its price range
#[must_use]
pub fn min_nightly_price(hotel: &Hotel) -> Option<f64> {
    hotel
        .price_range
        .split(['-', '–'])
        .next()
        .and_then(parse_amount)
}

/// Keep hotels whose cheapest night costs at most half of the total trip budget.
///
/// The comparison is against `budget / 2` regardless of trip length. Hotels
/// whose price range cannot be parsed are dropped.
#[must_use]
pub fn filter_hotels_by_budget(hotels: &[Hotel], budget: f64) -> Vec<Hotel> {
    let limit = budget / 2.0;
    hotels
        .iter()
        .filter(|hotel| min_nightly_price(hotel).is_some_and(|price| price <= limit))
        .cloned()
        .collect()
}
