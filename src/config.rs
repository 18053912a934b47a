//! Simulation settings shared by the behavior generator, the engine and the
//! auto-pay scheduler.

use crate::error::{GatewayError, Result};
use std::time::Duration;

/// Tunables for the simulated gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Probability that a gateway call succeeds, in `[0, 1]`.
    pub success_rate: f64,
    /// Latency added to every simulated gateway call.
    pub base_delay: Duration,
    /// Exclusive upper bound of the random jitter added on top of `base_delay`.
    pub max_jitter: Duration,
    /// Time between creation and the automatic UNPAID -> PAID transition.
    pub auto_pay_delay: Duration,
    /// Prefix of the synthesized pay and checkout URLs.
    pub url_base: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_rate: 0.999,
            base_delay: Duration::from_millis(100),
            max_jitter: Duration::from_millis(20),
            auto_pay_delay: Duration::from_secs(30),
            url_base: "mock://tripay.com".to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(GatewayError::ConfigError(format!(
                "success rate must be within [0, 1], got {}",
                self.success_rate
            )));
        }
        if self.url_base.trim().is_empty() {
            return Err(GatewayError::ConfigError(
                "url base must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pay_url(&self, reference: &str) -> String {
        format!("{}/pay/{}", self.url_base.trim_end_matches('/'), reference)
    }

    pub fn checkout_url(&self, reference: &str) -> String {
        format!(
            "{}/checkout/{}",
            self.url_base.trim_end_matches('/'),
            reference
        )
    }
}
