//! Deterministic budget estimation
//!
//! A flat per-person rate with a configurable premium-location multiplier.
//! Intentionally simple - the estimate exists to give the plan a number,
//! not to model real venue pricing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BudgetConfig;

/// Estimated cost of holding the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEstimate {
    pub total_budget: f64,
    pub per_person_cost: f64,
    pub currency: String,
}

/// Estimate the budget for a headcount at a location
pub fn estimate(number_of_people: u32, location: &str, config: &BudgetConfig) -> BudgetEstimate {
    debug!(number_of_people, %location, "estimate: called");
    let mut rate = config.base_rate_per_person;

    let location_lower = location.to_lowercase();
    if config
        .premium_locations
        .iter()
        .any(|premium| premium.to_lowercase() == location_lower)
    {
        debug!(%location, "estimate: premium location");
        rate *= config.premium_multiplier;
    }

    let per_person_cost = round2(rate);
    let total_budget = round2(per_person_cost * f64::from(number_of_people));

    BudgetEstimate {
        total_budget,
        per_person_cost,
        currency: config.currency.clone(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_base_rate() {
        let config = BudgetConfig::default();
        let budget = estimate(4, "Malad", &config);

        assert_eq!(budget.per_person_cost, 300.0);
        assert_eq!(budget.total_budget, 1200.0);
        assert_eq!(budget.currency, "INR");
    }

    #[test]
    fn test_estimate_premium_location() {
        let config = BudgetConfig::default();
        let budget = estimate(2, "Bandra", &config);

        assert_eq!(budget.per_person_cost, 450.0);
        assert_eq!(budget.total_budget, 900.0);
    }

    #[test]
    fn test_premium_match_is_case_insensitive() {
        let config = BudgetConfig::default();
        assert_eq!(estimate(1, "juhu", &config), estimate(1, "Juhu", &config));
    }

    #[test]
    fn test_estimate_rounds_to_cents() {
        let config = BudgetConfig {
            base_rate_per_person: 333.333,
            ..BudgetConfig::default()
        };

        let budget = estimate(3, "Malad", &config);
        assert_eq!(budget.per_person_cost, 333.33);
        assert_eq!(budget.total_budget, 999.99);
    }
}
