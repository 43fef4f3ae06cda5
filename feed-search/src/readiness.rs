//! Startup readiness gate.
//!
//! Two futures race: a deadline and a health-check loop. Whichever finishes
//! first decides the outcome and the other is dropped, which cancels its timer
//! before [`FeedSearch::wait_until_ready`] returns. Once connectivity is
//! confirmed the index is provisioned, outside the race so the deadline cannot
//! interrupt it.
//!
//! The outcome is terminal. It is stored on the facade, so repeated or
//! concurrent callers share a single gate and provisioning runs once.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::service::FeedSearch;
use crate::FeedSearchError;
use feed_search_repository::ClusterHealth;

/// Terminal state of the readiness gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The engine answered and the index has been ensured.
    Ready,
    /// The engine did not answer before the deadline.
    Failed(FeedSearchError),
}

impl FeedSearch {
    /// Wait for the search engine to answer a health check, then ensure the
    /// posts index exists.
    ///
    /// Health is checked every `poll_interval` starting immediately. If no
    /// check succeeds within `readiness_delay` this fails with
    /// [`FeedSearchError::ConnectionError`].
    pub async fn wait_until_ready(&self) -> Result<(), FeedSearchError> {
        match self.readiness.get_or_init(|| self.resolve_readiness()).await {
            Readiness::Ready => Ok(()),
            Readiness::Failed(e) => Err(e.clone()),
        }
    }

    /// The gate's outcome, if it has been reached.
    pub fn readiness(&self) -> Option<&Readiness> {
        self.readiness.get()
    }

    async fn resolve_readiness(&self) -> Readiness {
        let delay = self.settings.readiness_delay;

        let outcome = tokio::select! {
            health = self.poll_until_healthy() => Ok(health),
            _ = time::sleep(delay) => Err(self.unreachable_error(delay)),
        };

        match outcome {
            Ok(health) => {
                info!(
                    cluster = %health.cluster_name,
                    status = ?health.status,
                    "Search engine reachable"
                );
                self.ensure_index().await;
                Readiness::Ready
            }
            Err(e) => {
                error!(error = %e, "Search engine readiness check timed out");
                Readiness::Failed(e)
            }
        }
    }

    /// Check health on every tick until a check succeeds.
    async fn poll_until_healthy(&self) -> ClusterHealth {
        let period = self.settings.poll_interval.max(Duration::from_millis(1));
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.client.health_check().await {
                Ok(health) => return health,
                Err(e) => {
                    info!(
                        error = %e,
                        retry_in_ms = period.as_millis() as u64,
                        "Search engine not reachable yet, retrying"
                    );
                }
            }
        }
    }

    fn unreachable_error(&self, delay: Duration) -> FeedSearchError {
        FeedSearchError::connection(format!(
            "Search engine at {} did not respond within {} ms. \
             Set SEARCH_MOCK=true to use the in-memory search engine, \
             or install and start OpenSearch.",
            self.settings.opensearch_url,
            delay.as_millis()
        ))
    }
}
