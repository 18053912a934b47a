use super::stats::{RequestOutcome, Statistics, StatsSnapshot};
use super::transaction::TransactionRecord;
use crate::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

/// All mutable gateway state: transactions keyed by reference plus the
/// aggregate counters.
///
/// Kept together so a single lock covers both, which makes reset and the
/// auto-pay transition atomic with respect to readers.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: HashMap<String, TransactionRecord>,
    stats: Statistics,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record and counts it. Refuses to overwrite an existing reference.
    pub fn insert(&mut self, record: TransactionRecord) -> Result<()> {
        match self.transactions.entry(record.reference.clone()) {
            Entry::Occupied(entry) => Err(GatewayError::DuplicateReference(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                self.stats.total_transactions += 1;
                Ok(())
            }
        }
    }

    pub fn get(&self, reference: &str) -> Option<&TransactionRecord> {
        self.transactions.get(reference)
    }

    /// Auto-pay transition. A missing or already-paid reference is a no-op.
    pub fn mark_paid(&mut self, reference: &str, at: DateTime<Utc>) -> bool {
        let paid = self
            .transactions
            .get_mut(reference)
            .is_some_and(|record| record.mark_paid(at));
        if paid {
            self.stats.paid_transactions += 1;
        }
        paid
    }

    pub fn record_request(&mut self, elapsed: Duration, outcome: RequestOutcome) {
        self.stats.record_request(elapsed, outcome);
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Drops every transaction and zeroes the counters.
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.stats = Statistics::default();
    }
}
