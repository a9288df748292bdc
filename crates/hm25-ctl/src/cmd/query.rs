//! Read-only queries: stats, tick, balance.

use anyhow::{Context, Result};
use hm25_client::Hm25Contract;

pub async fn cmd_stats(contract: &Hm25Contract) -> Result<()> {
    let stats = contract.stats().await.context("failed to fetch stats")?;

    println!("═══════════════════════════════════════");
    println!("  HM25 Contract Stats");
    println!("═══════════════════════════════════════");
    println!("  Echo calls : {}", stats.number_of_echo_calls);
    println!("  Burn calls : {}", stats.number_of_burn_calls);

    Ok(())
}

pub async fn cmd_tick(contract: &Hm25Contract) -> Result<()> {
    let tick = contract
        .client()
        .tick()
        .await
        .context("failed to fetch tick info")?;

    println!("═══════════════════════════════════════");
    println!("  Node Tick");
    println!("═══════════════════════════════════════");
    println!("  Tick         : {}", tick.tick);
    println!("  Epoch        : {}", tick.epoch);
    println!("  Duration     : {}s", tick.duration);
    println!("  Initial tick : {}", tick.initial_tick);

    Ok(())
}

pub async fn cmd_balance(contract: &Hm25Contract, identity: &str) -> Result<()> {
    let balance = contract
        .client()
        .balance(identity)
        .await
        .context("failed to fetch balance")?;

    println!("═══════════════════════════════════════");
    println!("  Balance");
    println!("═══════════════════════════════════════");
    println!("  Identity       : {}", identity);
    println!("  Balance        : {}", balance.balance);
    println!("  Valid for tick : {}", balance.valid_for_tick);

    Ok(())
}
