//! Offline transaction encoding for external signing pipelines.

use anyhow::{bail, Context, Result};

use hm25_client::Hm25Contract;
use hm25_core::wire;
use hm25_core::Identity;

/// Fetch a fresh tick, encode an echo or burn transaction against it,
/// and print the bytes for whatever signs them next.
pub async fn cmd_encode(
    contract: &Hm25Contract,
    op: &str,
    source: Option<&str>,
    amount: Option<i64>,
) -> Result<()> {
    let source: Identity = source
        .context("encode requires --source <IDENTITY>")?
        .parse()
        .context("invalid --source identity")?;
    let amount = amount.context("encode requires --amount <N>")?;

    let tick = contract
        .client()
        .tick()
        .await
        .context("failed to fetch tick info")?;

    let tx = match op {
        "echo" => wire::build_echo_tx(
            &source,
            contract.contract_identity(),
            tick.tick,
            contract.tick_offset(),
            amount,
        ),
        "burn" => wire::build_burn_tx(
            &source,
            contract.contract_identity(),
            tick.tick,
            contract.tick_offset(),
            amount,
        ),
        other => bail!("unknown encode operation: {} (expected echo or burn)", other),
    };

    println!("target tick : {}", tx.target_tick());
    println!("unsigned tx : {}", hex::encode(tx.to_bytes()));

    Ok(())
}
