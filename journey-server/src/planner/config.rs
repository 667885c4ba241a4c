//! Configuration for itinerary processing.

/// Default fare currency: Mumbai fares are quoted in rupees.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Configuration parameters for turning itineraries into routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Currency code whose planner-supplied fare is used.
    /// Fares in any other currency are ignored and the distance estimate
    /// takes over.
    pub currency: String,
}

impl PlannerConfig {
    /// Create a new configuration.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Set the fare currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}
