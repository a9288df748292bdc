//! Live polling: contract stats and an optional balance.

use anyhow::Result;

use hm25_client::{watch, Hm25Contract};
use hm25_core::config::Hm25Config;

/// Print stats (and a balance, when an identity is given) on the
/// configured intervals until interrupted.
pub async fn cmd_watch(
    contract: Hm25Contract,
    identity: Option<String>,
    config: &Hm25Config,
) -> Result<()> {
    println!("Watching {} (Ctrl-C to stop)...", contract.client().base_url());

    let stats_task = watch::spawn_stats_watch(
        contract.clone(),
        config.watch.stats_interval(),
        |stats| {
            println!(
                "stats: echo calls {}, burn calls {}",
                stats.number_of_echo_calls, stats.number_of_burn_calls
            );
        },
    );

    let balance_task = identity.map(|identity| {
        let client = contract.client().clone();
        watch::spawn_balance_watch(
            client,
            identity.clone(),
            config.watch.balance_interval(),
            move |balance| {
                println!("balance: {} = {}", identity, balance.balance);
            },
        )
    });

    tokio::signal::ctrl_c().await.ok();

    stats_task.abort();
    if let Some(task) = balance_task {
        task.abort();
    }

    println!();
    println!("Stopped.");
    Ok(())
}
