//! Transfer Submitters
//!
//! The step between confirmation and the balance update. The demo build
//! only waits; a real backend call would implement the same trait.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::types::{OpResult, TransferSummary};
use crate::config::TransferConfig;

/// Submits a confirmed transfer
///
/// Returning `Failed` must leave every balance untouched: the workflow only
/// applies the debit after `Success`.
#[async_trait]
pub trait TransferSubmitter: Send + Sync {
    /// Get submitter name for logging
    fn name(&self) -> &'static str;

    async fn submit(&self, summary: &TransferSummary) -> OpResult;
}

/// Always succeeds after a fixed delay
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &TransferConfig) -> Self {
        Self::new(Duration::from_millis(config.simulated_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl TransferSubmitter for SimulatedSubmitter {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn submit(&self, summary: &TransferSummary) -> OpResult {
        debug!(
            receiver = %summary.receiver.id,
            amount = %summary.amount,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating transfer submission"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        OpResult::Success
    }
}
