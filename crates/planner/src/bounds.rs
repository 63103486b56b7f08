//! Input domains enforced before anything reaches the orchestrator.

use thiserror::Error;

use crate::context::{ItemProfile, OperatingContext};

/// A value fell outside the domain its input accepts
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field} = {value} is outside [{min}, {max}]")]
pub struct BoundsError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

pub const QUEUE_LENGTH: (u32, u32) = (0, 200);
pub const ACTIVE_COUNTERS: (u32, u32) = (1, 10);
pub const STAFF_COUNT: (u32, u32) = (1, 20);
pub const PREP_MINUTES: (f64, f64) = (1.0, 30.0);
pub const HISTORICAL_ORDERS: (u32, u32) = (0, 500);
pub const SCORE: (f64, f64) = (0.0, 1.0);

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), BoundsError> {
    // NaN fails both comparisons, so it is rejected too
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(BoundsError { field, value, min, max })
    }
}

fn check_count(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), BoundsError> {
    check(field, f64::from(value), (f64::from(min), f64::from(max)))
}

pub fn check_context(context: &OperatingContext) -> Result<(), BoundsError> {
    check_count("queue_length", context.queue_length, QUEUE_LENGTH)?;
    check_count("active_counters", context.active_counters, ACTIVE_COUNTERS)?;
    check_count("staff_count", context.staff_count, STAFF_COUNT)?;
    check("avg_prep_time", context.avg_prep_time, PREP_MINUTES)
}

/// Checks the profile as entered. Slot adjustments may push
/// `historical_orders` past its input range afterwards; that is expected.
pub fn check_profile(profile: &ItemProfile) -> Result<(), BoundsError> {
    check_count("historical_orders", profile.historical_orders, HISTORICAL_ORDERS)?;
    check("item_popularity", profile.item_popularity, SCORE)?;
    check("profit_margin", profile.profit_margin, SCORE)?;
    check("ingredient_availability", profile.ingredient_availability, SCORE)?;
    check("prep_time", profile.prep_time, PREP_MINUTES)?;
    check("wastage_history", profile.wastage_history, SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_bounds() {
        assert!(check_context(&OperatingContext::default()).is_ok());
        assert!(check_profile(&ItemProfile::default()).is_ok());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let context = OperatingContext {
            queue_length: 200,
            active_counters: 10,
            staff_count: 1,
            avg_prep_time: 30.0,
            ..OperatingContext::default()
        };
        assert!(check_context(&context).is_ok());
    }

    #[test]
    fn test_zero_counters_rejected() {
        let context = OperatingContext {
            active_counters: 0,
            ..OperatingContext::default()
        };
        let err = check_context(&context).unwrap_err();
        assert_eq!(err.field, "active_counters");
        assert_eq!(err.to_string(), "active_counters = 0 is outside [1, 10]");
    }

    #[test]
    fn test_scores_above_one_rejected() {
        let profile = ItemProfile {
            wastage_history: 1.5,
            ..ItemProfile::default()
        };
        assert_eq!(check_profile(&profile).unwrap_err().field, "wastage_history");
    }

    #[test]
    fn test_nan_rejected() {
        let profile = ItemProfile {
            item_popularity: f64::NAN,
            ..ItemProfile::default()
        };
        assert_eq!(check_profile(&profile).unwrap_err().field, "item_popularity");
    }
}
