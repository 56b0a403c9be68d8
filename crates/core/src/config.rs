//! Optimizer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};

/// Tunables for one optimization run.
///
/// The configuration travels into the optimizer entry point as an explicit
/// value; nothing reads process-wide state, so the core stays testable in
/// isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Trailing window, in days, over which historical orders are counted
    /// to estimate demand.
    pub lookback_days: u32,

    /// Buffer, in days of demand, a warehouse should hold above bare
    /// replenishment needs. Target stock = daily demand × this.
    pub safety_stock_days: u32,

    /// Transfer cost per unit per kilometre.
    pub rate_per_unit_km: f64,

    /// Cost-equivalent charged per unit of unresolved deficit; biases the
    /// exact solver toward transfers over leaving demand unmet.
    pub shortage_penalty: f64,

    /// Fallback distance for warehouse pairs missing from the lane table.
    pub default_lane_distance_km: f64,

    /// Budget for one exact category solve before falling back to the
    /// greedy heuristic.
    pub solver_timeout_ms: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            safety_stock_days: 14,
            rate_per_unit_km: 2.5,
            shortage_penalty: 150.0,
            default_lane_distance_km: 1500.0,
            solver_timeout_ms: 2_000,
        }
    }
}

impl OptimizerConfig {
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_safety_stock_days(mut self, days: u32) -> Self {
        self.safety_stock_days = days;
        self
    }

    pub fn with_rate_per_unit_km(mut self, rate: f64) -> Self {
        self.rate_per_unit_km = rate;
        self
    }

    pub fn with_shortage_penalty(mut self, penalty: f64) -> Self {
        self.shortage_penalty = penalty;
        self
    }

    pub fn with_default_lane_distance_km(mut self, km: f64) -> Self {
        self.default_lane_distance_km = km;
        self
    }

    pub fn with_solver_timeout(mut self, timeout: Duration) -> Self {
        self.solver_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn solver_timeout(&self) -> Duration {
        Duration::from_millis(self.solver_timeout_ms)
    }

    /// Validate the configuration before any computation starts.
    ///
    /// A run with an invalid configuration never produces a partial plan.
    pub fn validate(&self) -> PlanningResult<()> {
        if self.lookback_days == 0 {
            return Err(PlanningError::configuration("lookback_days must be > 0"));
        }
        if self.safety_stock_days == 0 {
            return Err(PlanningError::configuration("safety_stock_days must be > 0"));
        }
        if !(self.rate_per_unit_km.is_finite() && self.rate_per_unit_km > 0.0) {
            return Err(PlanningError::configuration(format!(
                "rate_per_unit_km must be a finite positive number, got {}",
                self.rate_per_unit_km
            )));
        }
        if !(self.shortage_penalty.is_finite() && self.shortage_penalty > 0.0) {
            return Err(PlanningError::configuration(format!(
                "shortage_penalty must be a finite positive number, got {}",
                self.shortage_penalty
            )));
        }
        if !(self.default_lane_distance_km.is_finite() && self.default_lane_distance_km > 0.0) {
            return Err(PlanningError::configuration(format!(
                "default_lane_distance_km must be a finite positive number, got {}",
                self.default_lane_distance_km
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(OptimizerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_lookback_is_rejected() {
        let config = OptimizerConfig::default().with_lookback_days(0);
        assert!(matches!(
            config.validate(),
            Err(PlanningError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_safety_stock_is_rejected() {
        let config = OptimizerConfig::default().with_safety_stock_days(0);
        assert!(matches!(
            config.validate(),
            Err(PlanningError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn negative_rates_are_rejected() {
        let config = OptimizerConfig::default().with_rate_per_unit_km(-1.0);
        assert!(config.validate().is_err());

        let config = OptimizerConfig::default().with_shortage_penalty(0.0);
        assert!(config.validate().is_err());

        let config = OptimizerConfig::default().with_default_lane_distance_km(f64::NAN);
        assert!(config.validate().is_err());
    }
}
