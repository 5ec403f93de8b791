//! Trip requests and the accommodation budget policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Share of the total budget allocated to accommodation, in percent.
pub const ACCOMMODATION_SHARE_PERCENT: u64 = 45;

/// A structured trip-planning request.
///
/// Deserializes from the inbound HTTP shape
/// `{"destination": .., "budget": .., "duration_days": ..}`. Deserialization
/// does not validate; call [`TripRequest::validate`] (or build with
/// [`TripRequest::new`]) before using the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    #[serde(rename = "budget")]
    pub total_budget: u32,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("budget must be greater than zero")]
    ZeroBudget,
    #[error("duration_days must be greater than zero")]
    ZeroDuration,
}

impl TripRequest {
    /// Build and validate a request.
    pub fn new(
        destination: impl Into<String>,
        total_budget: u32,
        duration_days: u32,
    ) -> Result<Self, TripRequestError> {
        let request = Self {
            destination: destination.into(),
            total_budget,
            duration_days,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), TripRequestError> {
        if self.destination.trim().is_empty() {
            return Err(TripRequestError::EmptyDestination);
        }
        if self.total_budget == 0 {
            return Err(TripRequestError::ZeroBudget);
        }
        if self.duration_days == 0 {
            return Err(TripRequestError::ZeroDuration);
        }
        Ok(())
    }

    /// Maximum nightly hotel price implied by the budget policy.
    pub fn max_nightly_price(&self) -> u32 {
        max_nightly_price(self.total_budget, self.duration_days)
    }

    /// Render the request as the natural-language query the agent receives.
    pub fn to_query(&self) -> String {
        format!(
            "I want to go to {} for {} days with a total budget of ${}.",
            self.destination.trim(),
            self.duration_days,
            self.total_budget
        )
    }
}

/// `(total_budget * 0.45) / duration_days`, floored to whole currency units.
///
/// Computed in integer arithmetic so values such as `(1500 * 0.45) / 5` land
/// exactly on `135`. Returns `0` when `duration_days` is zero.
pub fn max_nightly_price(total_budget: u32, duration_days: u32) -> u32 {
    if duration_days == 0 {
        return 0;
    }
    let scaled = u64::from(total_budget) * ACCOMMODATION_SHARE_PERCENT;
    let nightly = scaled / (100 * u64::from(duration_days));
    // Bounded by total_budget * 0.45, which always fits in u32.
    nightly as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paris_example_allows_135_per_night() {
        let request = TripRequest::new("Paris", 1500, 5).unwrap();
        assert_eq!(request.max_nightly_price(), 135);
    }

    #[test]
    fn nightly_price_floors() {
        // 1000 * 0.45 / 3 = 150 exactly; 1000 * 0.45 / 7 = 64.28...
        assert_eq!(max_nightly_price(1000, 3), 150);
        assert_eq!(max_nightly_price(1000, 7), 64);
        assert_eq!(max_nightly_price(1, 1), 0);
    }

    #[test]
    fn nightly_price_handles_large_budgets() {
        assert_eq!(max_nightly_price(u32::MAX, 1), (u64::from(u32::MAX) * 45 / 100) as u32);
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert_eq!(
            TripRequest::new("Paris", 1500, 0),
            Err(TripRequestError::ZeroDuration)
        );
        assert_eq!(max_nightly_price(1500, 0), 0);
    }

    #[test]
    fn zero_budget_and_blank_destination_are_rejected() {
        assert_eq!(
            TripRequest::new("Paris", 0, 3),
            Err(TripRequestError::ZeroBudget)
        );
        assert_eq!(
            TripRequest::new("   ", 100, 3),
            Err(TripRequestError::EmptyDestination)
        );
    }

    #[test]
    fn query_mentions_all_fields() {
        let request = TripRequest::new("Tokyo", 2000, 7).unwrap();
        assert_eq!(
            request.to_query(),
            "I want to go to Tokyo for 7 days with a total budget of $2000."
        );
    }

    #[test]
    fn deserializes_inbound_shape() {
        let request: TripRequest =
            serde_json::from_str(r#"{"destination":"Paris","budget":1500,"duration_days":5}"#)
                .unwrap();
        assert_eq!(request.total_budget, 1500);
        assert!(request.validate().is_ok());
    }
}
