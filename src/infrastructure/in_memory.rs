use crate::domain::ledger::Ledger;
use crate::domain::ports::TransactionStore;
use crate::domain::stats::{RequestOutcome, StatsSnapshot};
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for transactions and statistics.
///
/// Uses `Arc<RwLock<Ledger>>` so lookups and stats reads proceed concurrently
/// while every mutation, including reset, is exclusive.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn insert(&self, record: TransactionRecord) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.insert(record)
    }

    async fn get(&self, reference: &str) -> Result<Option<TransactionRecord>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.get(reference).cloned())
    }

    async fn mark_paid(&self, reference: &str, paid_at: DateTime<Utc>) -> Result<bool> {
        let mut ledger = self.ledger.write().await;
        Ok(ledger.mark_paid(reference, paid_at))
    }

    async fn record_request(&self, elapsed: Duration, outcome: RequestOutcome) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.record_request(elapsed, outcome);
        Ok(())
    }

    async fn stats(&self) -> Result<StatsSnapshot> {
        let ledger = self.ledger.read().await;
        Ok(ledger.stats())
    }

    async fn reset(&self) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.reset();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let ledger = self.ledger.read().await;
        Ok(ledger.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee;
    use crate::domain::transaction::{CreateTransactionRequest, TransactionStatus};

    fn record(reference: &str) -> TransactionRecord {
        let request = CreateTransactionRequest {
            method: "QRIS".to_string(),
            merchant_ref: "INV-9".to_string(),
            amount: 100_000,
            customer_name: "Dewi".to_string(),
            customer_email: "dewi@example.com".to_string(),
            customer_phone: "0813".to_string(),
            order_items: vec![],
            return_url: String::new(),
            expired_time: 0,
            signature: String::new(),
        };
        TransactionRecord::new(
            reference.to_string(),
            &request,
            fee::quote(&request.method, request.amount),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        let tx = record("T1");

        store.insert(tx.clone()).await.unwrap();
        let retrieved = store.get("T1").await.unwrap().unwrap();
        assert_eq!(retrieved, tx);

        assert!(store.get("T2").await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.insert(record("T1")).await.unwrap();

        assert!(other.mark_paid("T1", Utc::now()).await.unwrap());
        let paid = store.get("T1").await.unwrap().unwrap();
        assert_eq!(paid.status, TransactionStatus::Paid);
        assert!(paid.paid_at.is_some());
        assert_eq!(store.stats().await.unwrap().paid_transactions, 1);
    }

    #[tokio::test]
    async fn test_reset_clears_transactions_and_stats() {
        let store = InMemoryStore::new();
        store.insert(record("T1")).await.unwrap();
        store
            .record_request(Duration::from_millis(120), RequestOutcome::Success)
            .await
            .unwrap();

        store.reset().await.unwrap();

        assert_eq!(store.len().await.unwrap(), 0);
        assert_eq!(store.stats().await.unwrap(), StatsSnapshot::default());
        assert!(!store.mark_paid("T1", Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_transitions_pay_once() {
        let store = InMemoryStore::new();
        store.insert(record("T1")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.mark_paid("T1", Utc::now()).await.unwrap()
            }));
        }

        let mut transitions = 0;
        for handle in handles {
            if handle.await.unwrap() {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(store.stats().await.unwrap().paid_transactions, 1);
    }
}
