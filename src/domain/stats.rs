use serde::Serialize;
use std::time::Duration;

/// Whether a gateway call was served or hit a simulated failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    Failure,
}

/// Process-wide running counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_requests: u64,
    pub success_requests: u64,
    pub failure_requests: u64,
    pub total_transactions: u64,
    pub paid_transactions: u64,
    pub avg_response_time_ms: u64,
}

/// Read-time view of [`Statistics`] with the derived success rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub success_requests: u64,
    pub failure_requests: u64,
    pub success_rate: f64,
    pub total_transactions: u64,
    pub paid_transactions: u64,
    pub avg_response_time_ms: u64,
}

impl Statistics {
    /// Counts one completed gateway call.
    ///
    /// The response-time figure is `(previous + latest) / 2`, so it weights
    /// recent calls heavily rather than being a true mean.
    pub fn record_request(&mut self, elapsed: Duration, outcome: RequestOutcome) {
        self.total_requests += 1;
        match outcome {
            RequestOutcome::Success => self.success_requests += 1,
            RequestOutcome::Failure => self.failure_requests += 1,
        }
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.avg_response_time_ms = self.avg_response_time_ms.saturating_add(elapsed_ms) / 2;
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.success_requests as f64 / self.total_requests as f64
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: self.total_requests,
            success_requests: self.success_requests,
            failure_requests: self.failure_requests,
            success_rate: self.success_rate(),
            total_transactions: self.total_transactions,
            paid_transactions: self.paid_transactions,
            avg_response_time_ms: self.avg_response_time_ms,
        }
    }
}
