use crate::domain::ports::TransactionStoreRef;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

struct ScheduledPayment {
    reference: String,
    due: Instant,
}

/// Settles transactions automatically once the auto-pay delay has elapsed.
///
/// A supervisor task receives references over a channel and runs one delayed
/// settlement per reference in a `JoinSet`. Settlements only go through the
/// store's guarded `mark_paid`, so a reset or an earlier transition turns a
/// pending settlement into a no-op.
pub struct AutoPayScheduler {
    sender: mpsc::UnboundedSender<ScheduledPayment>,
    supervisor: JoinHandle<()>,
    delay: Duration,
}

impl AutoPayScheduler {
    /// Starts the supervisor task. Must be called from within a Tokio runtime.
    pub fn spawn(store: TransactionStoreRef, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let supervisor = tokio::spawn(supervise(store, receiver));
        Self {
            sender,
            supervisor,
            delay,
        }
    }

    /// Schedules the UNPAID -> PAID transition of `reference`, due one delay from now.
    pub fn schedule(&self, reference: String) {
        let due = Instant::now() + self.delay;
        if let Err(mpsc::error::SendError(payment)) =
            self.sender.send(ScheduledPayment { reference, due })
        {
            warn!(reference = %payment.reference, "auto-pay supervisor is gone, settlement dropped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.supervisor.is_finished()
    }

    /// Stops accepting work and aborts settlements that have not fired yet.
    pub async fn shutdown(self) {
        let Self {
            sender, supervisor, ..
        } = self;
        drop(sender);
        if let Err(e) = supervisor.await {
            error!(error = %e, "auto-pay supervisor ended abnormally");
        }
    }
}

async fn supervise(store: TransactionStoreRef, mut receiver: mpsc::UnboundedReceiver<ScheduledPayment>) {
    let mut pending = JoinSet::new();
    loop {
        tokio::select! {
            scheduled = receiver.recv() => match scheduled {
                Some(payment) => {
                    pending.spawn(settle(store.clone(), payment));
                }
                None => break,
            },
            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                if let Err(e) = joined
                    && e.is_panic()
                {
                    error!(error = %e, "auto-pay settlement panicked");
                }
            }
        }
    }
    let abandoned = pending.len();
    pending.shutdown().await;
    debug!(abandoned, "auto-pay supervisor stopped");
}

async fn settle(store: TransactionStoreRef, payment: ScheduledPayment) {
    time::sleep_until(payment.due).await;
    match store.mark_paid(&payment.reference, Utc::now()).await {
        Ok(true) => info!(reference = %payment.reference, "transaction auto-paid"),
        Ok(false) => debug!(
            reference = %payment.reference,
            "auto-pay skipped, transaction missing or already settled"
        ),
        Err(e) => warn!(reference = %payment.reference, error = %e, "auto-pay failed"),
    }
}
