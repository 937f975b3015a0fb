use crate::{
    classify::classify,
    dedup::NotifiedSet,
    explorer::{ExplorerError, TransactionSource},
    models::WatchedAddress,
    notify::{format_alert, tx_url, Notifier},
    registry::Registry,
};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Everything one sweep needs. Cheap to share: the containers are handles.
pub struct Poller<S, N> {
    pub registry: Registry,
    pub seen: NotifiedSet,
    pub source: S,
    pub notifier: N,
    pub explorer_url: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub addresses: usize,
    pub skipped: usize,
    pub notified: usize,
    pub failed: usize,
}

impl<S: TransactionSource, N: Notifier> Poller<S, N> {
    /// Sweep every watched address once, in registry order.
    pub async fn poll_once(&self) -> CycleStats {
        let entries = self.registry.snapshot();
        let mut stats = CycleStats {
            addresses: entries.len(),
            ..Default::default()
        };

        for entry in &entries {
            match self.poll_address(entry).await {
                Ok((notified, failed)) => {
                    stats.notified += notified;
                    stats.failed += failed;
                }
                Err(ExplorerError::Status(status)) => {
                    debug!("Explorer HTTP {} for {}, skipping", status, entry.address);
                    stats.skipped += 1;
                }
                Err(e) => {
                    warn!("Fetch txlist failed for {}: {}", entry.address, e);
                    stats.skipped += 1;
                }
            }
        }

        stats
    }

    /// Returns (sent, failed) alert counts for one address.
    async fn poll_address(&self, entry: &WatchedAddress) -> Result<(usize, usize), ExplorerError> {
        let txs = self.source.transactions(&entry.address).await?;
        let mut sent = 0;
        let mut failed = 0;

        for tx in txs {
            if self.seen.contains(&tx.hash) {
                continue;
            }

            let kind = classify(&tx, &entry.address);
            debug!("{} {} for {}", kind, tx.hash, entry.address);

            let text = format_alert(kind, &entry.name, &tx_url(&self.explorer_url, &tx.hash));
            match self.notifier.send(&text).await {
                Ok(()) => {
                    // recorded only after a successful send
                    self.seen.insert(&tx.hash);
                    info!("📢 {} {} ({})", kind, tx.hash, entry.name);
                    sent += 1;
                }
                Err(e) => {
                    warn!("Alert for {} not delivered, will retry next cycle: {}", tx.hash, e);
                    failed += 1;
                }
            }
        }

        Ok((sent, failed))
    }

    /// Poll forever, sleeping `interval` after each completed sweep.
    pub async fn run(self, interval: Duration) -> eyre::Result<()> {
        info!("Poller started, interval = {:?}", interval);

        loop {
            let stats = self.poll_once().await;
            info!(
                "Cycle done: {} addresses, {} alerts, {} skipped, {} failed, {} hashes seen",
                stats.addresses,
                stats.notified,
                stats.skipped,
                stats.failed,
                self.seen.len()
            );

            sleep(interval).await;
        }
    }
}
