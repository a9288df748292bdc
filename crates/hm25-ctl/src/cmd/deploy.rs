//! Deployment commands: chunk planning, raw broadcast, full deploy.

use anyhow::{bail, Context, Result};

use hm25_client::{Deployer, Hm25Contract};
use hm25_core::bytecode;
use hm25_core::wire::CHUNK_SIZE;
use hm25_core::Identity;

use super::sign::CommandSigner;

/// Resolve `<HEX|@FILE>`: a literal hex string, or `@path` naming a
/// file whose contents are the hex text.
fn read_hex_input(input: &str) -> Result<String> {
    if let Some(path) = input.strip_prefix('@') {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        Ok(text.trim().to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Dry run: parse the bytecode and print how it would be chunked.
pub fn cmd_chunks(input: &str) -> Result<()> {
    let hex_text = read_hex_input(input)?;
    let code = bytecode::parse_hex(&hex_text)?;
    let total = code.len().div_ceil(CHUNK_SIZE);

    println!("═══════════════════════════════════════");
    println!("  Deployment Plan");
    println!("═══════════════════════════════════════");
    println!("  Bytecode : {} bytes", code.len());
    println!("  Chunks   : {}", total);
    for (i, chunk) in code.chunks(CHUNK_SIZE).enumerate() {
        println!("  chunk {:>4} : {} bytes", i + 1, chunk.len());
    }

    Ok(())
}

/// Broadcast already-signed transaction bytes.
pub async fn cmd_broadcast(contract: &Hm25Contract, input: &str) -> Result<()> {
    let hex_text = read_hex_input(input)?;
    let signed = bytecode::parse_hex(&hex_text)?;

    let response = contract
        .client()
        .broadcast(&signed)
        .await
        .context("broadcast failed")?;

    if response.is_rejected() {
        bail!(
            "node rejected transaction: {} (code {})",
            response.message.unwrap_or_default(),
            response.code.unwrap_or_default(),
        );
    }

    println!("peers broadcast : {}", response.peers_broadcasted);
    if let Some(id) = response.transaction_id {
        println!("transaction id  : {}", id);
    }

    Ok(())
}

/// Full chunked deployment with an external signing command.
pub async fn cmd_deploy(
    contract: Hm25Contract,
    input: &str,
    source: Option<&str>,
    sign_with: Option<&str>,
) -> Result<()> {
    let source: Identity = source
        .context("deploy requires --source <IDENTITY>")?
        .parse()
        .context("invalid --source identity")?;
    let sign_cmd = sign_with.context("deploy requires --sign-with <CMD>")?;

    let hex_text = read_hex_input(input)?;
    let signer = CommandSigner::new(sign_cmd);
    let deployer = Deployer::new(contract);

    let receipts = deployer.deploy(&source, &hex_text, &signer).await?;

    if receipts.is_empty() {
        println!("Nothing to deploy: bytecode is empty.");
        return Ok(());
    }

    println!("═══════════════════════════════════════");
    println!("  Deployment Complete ({} chunks)", receipts.len());
    println!("═══════════════════════════════════════");
    for r in &receipts {
        match &r.transaction_id {
            Some(id) => println!("  chunk {:>4} : tick {} tx {}", r.chunk, r.target_tick, id),
            None => println!("  chunk {:>4} : tick {}", r.chunk, r.target_tick),
        }
    }

    Ok(())
}
