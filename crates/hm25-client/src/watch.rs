//! Polling watchers for contract stats and balances.
//!
//! Read paths degrade instead of failing: a network error logs a
//! warning and the loop keeps its cadence. The first poll fires
//! immediately, then on the configured interval.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use hm25_core::wire::ContractStats;

use crate::contract::Hm25Contract;
use crate::node::{BalanceInfo, NodeClient};

/// Poll contract stats on a fixed interval.
///
/// Runs forever — cancel by aborting the returned handle. A failed
/// poll hands the observer zeroed counters so consumers show the
/// degraded default instead of stale numbers.
pub fn spawn_stats_watch<F>(
    contract: Hm25Contract,
    interval: Duration,
    mut on_stats: F,
) -> JoinHandle<()>
where
    F: FnMut(ContractStats) + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        loop {
            ticker.tick().await;
            match contract.stats().await {
                Ok(stats) => on_stats(stats),
                Err(e) => {
                    tracing::warn!(error = %e, "stats poll failed");
                    on_stats(ContractStats::default());
                }
            }
        }
    })
}

/// Poll an identity's balance on a fixed interval.
///
/// Runs forever — cancel by aborting the returned handle. Failures
/// log and skip the observer; the last delivered balance stands.
pub fn spawn_balance_watch<F>(
    client: NodeClient,
    identity: String,
    interval: Duration,
    mut on_balance: F,
) -> JoinHandle<()>
where
    F: FnMut(BalanceInfo) + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        loop {
            ticker.tick().await;
            match client.balance(&identity).await {
                Ok(balance) => on_balance(balance),
                Err(e) => tracing::warn!(identity = %identity, error = %e, "balance poll failed"),
            }
        }
    })
}
