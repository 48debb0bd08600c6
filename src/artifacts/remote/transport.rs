//! Remote transport seam
//!
//! The engine never performs network I/O. Fetch and push go through a
//! [`RemoteTransport`] supplied by the host; the repository applies their effects only
//! after the returned future resolves, so dropping the future cancels the operation
//! without touching any state.

use crate::areas::remotes::Remote;
use crate::artifacts::objects::object_id::ObjectId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Fetch the remote's branch heads
    ///
    /// `None` means the transport has nothing newer than what the registry holds.
    async fn fetch(&self, remote: &Remote) -> anyhow::Result<Option<BTreeMap<String, ObjectId>>>;

    /// Publish `head` as `branch` on the remote
    async fn push(&self, remote: &Remote, branch: &str, head: &ObjectId) -> anyhow::Result<()>;
}

/// Transport that only models latency
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        SimulatedTransport { latency }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl RemoteTransport for SimulatedTransport {
    async fn fetch(&self, remote: &Remote) -> anyhow::Result<Option<BTreeMap<String, ObjectId>>> {
        self.round_trip().await;
        tracing::debug!(remote = %remote.name, url = %remote.url, "simulated fetch");
        Ok(None)
    }

    async fn push(&self, remote: &Remote, branch: &str, head: &ObjectId) -> anyhow::Result<()> {
        self.round_trip().await;
        tracing::debug!(remote = %remote.name, branch, head = %head, "simulated push");
        Ok(())
    }
}
