use crate::config::SimulationConfig;
use rand::Rng;
use std::time::Duration;

/// Source of simulated latency and failures.
///
/// Both methods are sampled independently on every call.
pub trait Behavior: Send + Sync {
    fn should_fail(&self) -> bool;
    fn simulated_delay(&self) -> Duration;
}

/// Randomized behavior driven by the configured success rate and latency.
#[derive(Debug, Clone)]
pub struct RandomBehavior {
    success_rate: f64,
    base_delay: Duration,
    max_jitter: Duration,
}

impl RandomBehavior {
    pub fn new(success_rate: f64, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            base_delay,
            max_jitter,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.success_rate, config.base_delay, config.max_jitter)
    }
}

impl Behavior for RandomBehavior {
    fn should_fail(&self) -> bool {
        rand::thread_rng().gen_bool(1.0 - self.success_rate)
    }

    fn simulated_delay(&self) -> Duration {
        let jitter_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.base_delay;
        }
        self.base_delay + Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
    }
}

/// Deterministic behavior for tests and scripted demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBehavior {
    pub fail: bool,
    pub delay: Duration,
}

impl FixedBehavior {
    pub fn always_succeed() -> Self {
        Self::default()
    }

    pub fn always_fail() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Behavior for FixedBehavior {
    fn should_fail(&self) -> bool {
        self.fail
    }

    fn simulated_delay(&self) -> Duration {
        self.delay
    }
}
