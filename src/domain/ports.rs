use super::behavior::Behavior;
use super::stats::{RequestOutcome, StatsSnapshot};
use super::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Storage for transactions and the request statistics.
///
/// Every method is one critical section; in particular `mark_paid` performs
/// its existence and status check under the same lock as the write.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, record: TransactionRecord) -> Result<()>;
    async fn get(&self, reference: &str) -> Result<Option<TransactionRecord>>;
    async fn mark_paid(&self, reference: &str, paid_at: DateTime<Utc>) -> Result<bool>;
    async fn record_request(&self, elapsed: Duration, outcome: RequestOutcome) -> Result<()>;
    async fn stats(&self) -> Result<StatsSnapshot>;
    async fn reset(&self) -> Result<()>;
    async fn len(&self) -> Result<usize>;
}

pub type TransactionStoreRef = Arc<dyn TransactionStore>;
pub type BehaviorRef = Arc<dyn Behavior>;
