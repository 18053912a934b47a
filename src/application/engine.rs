use super::response::ApiResponse;
use super::scheduler::AutoPayScheduler;
use crate::config::SimulationConfig;
use crate::domain::behavior::RandomBehavior;
use crate::domain::channel::{self, PaymentChannel};
use crate::domain::fee::{self, FeeQuote};
use crate::domain::ports::{BehaviorRef, TransactionStoreRef};
use crate::domain::stats::{RequestOutcome, StatsSnapshot};
use crate::domain::transaction::{
    CreateTransactionRequest, TransactionRecord, TransactionView, generate_reference,
};
use crate::error::{GatewayError, Result};
use crate::infrastructure::in_memory::InMemoryStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{self, Instant};
use tracing::{info, warn};

pub const MSG_TRANSACTION_CREATED: &str = "Transaction created";
pub const MSG_GATEWAY_UNAVAILABLE: &str = "Payment gateway temporarily unavailable";
pub const MSG_TRANSACTION_FOUND: &str = "Get transaction success";
pub const MSG_TRANSACTION_NOT_FOUND: &str = "Transaction not found";
pub const MSG_CHANNELS: &str = "Get payment channels success";
pub const MSG_STATS: &str = "Mock server statistics";
pub const MSG_RESET: &str = "Mock data reset successfully";

const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// The single entry point of the simulated gateway.
///
/// `PaymentGateway` composes the behavior generator, the fee policy, the
/// transaction store and the auto-pay scheduler. It is cheap to construct, so
/// tests build one per case; dropping it stops its scheduler.
pub struct PaymentGateway {
    store: TransactionStoreRef,
    behavior: BehaviorRef,
    scheduler: AutoPayScheduler,
    channels: Vec<PaymentChannel>,
    config: SimulationConfig,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway` and starts its auto-pay scheduler.
    ///
    /// # Arguments
    ///
    /// * `store` - Where transactions and statistics live.
    /// * `behavior` - Source of simulated latency and failures.
    /// * `config` - Auto-pay delay and URL settings.
    pub fn new(store: TransactionStoreRef, behavior: BehaviorRef, config: SimulationConfig) -> Self {
        let scheduler = AutoPayScheduler::spawn(store.clone(), config.auto_pay_delay);
        Self {
            store,
            behavior,
            scheduler,
            channels: channel::catalog(),
            config,
        }
    }

    /// In-memory gateway with randomized behavior, as run by the server binary.
    pub fn in_memory(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let behavior = Arc::new(RandomBehavior::from_config(&config));
        Ok(Self::new(Arc::new(InMemoryStore::new()), behavior, config))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Creates an UNPAID transaction and schedules its automatic payment.
    ///
    /// A simulated outage yields `success: false` and allocates nothing.
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionView>> {
        let start = Instant::now();
        self.simulate_delay().await;

        if self.behavior.should_fail() {
            warn!(merchant_ref = %request.merchant_ref, "simulated gateway failure");
            self.store
                .record_request(start.elapsed(), RequestOutcome::Failure)
                .await?;
            return Ok(ApiResponse::failure(MSG_GATEWAY_UNAVAILABLE));
        }

        let quote = fee::quote(&request.method, request.amount);
        let record = match self.insert_with_fresh_reference(&request, quote).await {
            Ok(record) => record,
            Err(e) => {
                self.store
                    .record_request(start.elapsed(), RequestOutcome::Failure)
                    .await?;
                return Err(e);
            }
        };
        self.scheduler.schedule(record.reference.clone());

        info!(
            reference = %record.reference,
            method = %record.payment_method,
            amount = record.amount,
            fee = record.fee,
            "transaction created"
        );

        let view = TransactionView::new(&record, request, &self.config);
        self.store
            .record_request(start.elapsed(), RequestOutcome::Success)
            .await?;
        Ok(ApiResponse::ok(MSG_TRANSACTION_CREATED, view))
    }

    /// Looks a transaction up by exact reference. Not found is a normal outcome.
    pub async fn get_transaction_detail(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<TransactionRecord>> {
        let start = Instant::now();
        self.simulate_delay().await;

        let record = self.store.get(reference).await?;
        self.store
            .record_request(start.elapsed(), RequestOutcome::Success)
            .await?;

        Ok(match record {
            Some(record) => ApiResponse::ok(MSG_TRANSACTION_FOUND, record),
            None => ApiResponse::failure(MSG_TRANSACTION_NOT_FOUND),
        })
    }

    /// Returns the static channel catalog.
    pub async fn get_payment_channels(&self) -> ApiResponse<Vec<PaymentChannel>> {
        self.simulate_delay().await;
        ApiResponse::ok(MSG_CHANNELS, self.channels.clone())
    }

    pub async fn get_stats(&self) -> Result<ApiResponse<StatsSnapshot>> {
        let stats = self.store.stats().await?;
        Ok(ApiResponse::ok(MSG_STATS, stats))
    }

    /// Clears every transaction and counter in one step. Pending auto-pays for
    /// the dropped transactions find nothing and do nothing.
    pub async fn reset_data(&self) -> Result<ApiResponse<()>> {
        let cleared = self.store.len().await?;
        self.store.reset().await?;
        info!(cleared, "mock data reset");
        Ok(ApiResponse::empty(MSG_RESET))
    }

    /// Stops the auto-pay scheduler, abandoning settlements not yet due.
    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
    }

    async fn simulate_delay(&self) {
        let delay = self.behavior.simulated_delay();
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
    }

    async fn insert_with_fresh_reference(
        &self,
        request: &CreateTransactionRequest,
        quote: FeeQuote,
    ) -> Result<TransactionRecord> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let record =
                TransactionRecord::new(generate_reference(), request, quote.clone(), Utc::now());
            match self.store.insert(record.clone()).await {
                Ok(()) => return Ok(record),
                Err(GatewayError::DuplicateReference(reference))
                    if attempts < MAX_REFERENCE_ATTEMPTS =>
                {
                    warn!(%reference, "reference collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
