//! hm25-ctl — command-line interface for the HM25 contract client.

use anyhow::{Context, Result};

use hm25_client::Hm25Contract;
use hm25_core::config::Hm25Config;

mod cmd;

fn print_usage() {
    println!("Usage: hm25-ctl [--endpoint <url>] <command>");
    println!();
    println!("Commands:");
    println!("  stats                      Show the contract's echo/burn call counters");
    println!("  tick                       Show the node's current tick");
    println!("  balance <IDENTITY>         Show an identity's balance");
    println!("  encode echo|burn           Encode an unsigned transaction for external signing");
    println!("                               (requires --source and --amount)");
    println!("  chunks <HEX|@FILE>         Print the deployment chunk plan for bytecode");
    println!("  broadcast <HEX|@FILE>      Broadcast externally signed transaction bytes");
    println!("  deploy <HEX|@FILE>         Deploy bytecode chunk by chunk");
    println!("                               (requires --source and --sign-with)");
    println!("  watch [IDENTITY]           Poll stats (and a balance) until interrupted");
    println!();
    println!("Options:");
    println!("  --endpoint <url>    Node gateway URL (default: from config)");
    println!("  --source <IDENTITY> Source identity for encode/deploy");
    println!("  --amount <N>        Amount for encode");
    println!("  --sign-with <CMD>   Shell command that signs: unsigned tx hex on stdin,");
    println!("                      signed tx hex on stdout");
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Parse options
    let mut endpoint: Option<String> = None;
    let mut source: Option<String> = None;
    let mut amount: Option<i64> = None;
    let mut sign_with: Option<String> = None;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                i += 1;
                endpoint = Some(
                    args.get(i)
                        .context("--endpoint requires a value")?
                        .clone(),
                );
            }
            "--source" => {
                i += 1;
                source = Some(args.get(i).context("--source requires a value")?.clone());
            }
            "--amount" => {
                i += 1;
                amount = Some(
                    args.get(i)
                        .context("--amount requires a value")?
                        .parse()
                        .context("--amount must be an integer")?,
                );
            }
            "--sign-with" => {
                i += 1;
                sign_with = Some(args.get(i).context("--sign-with requires a value")?.clone());
            }
            _ => remaining.push(&args[i]),
        }
        i += 1;
    }

    if let Err(e) = Hm25Config::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let mut config = Hm25Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        Hm25Config::default()
    });
    if let Some(endpoint) = endpoint {
        config.node.http_endpoint = endpoint;
    }

    let contract =
        Hm25Contract::from_config(&config).context("invalid contract identity in config")?;

    match remaining.as_slice() {
        ["stats"] | []         => cmd::query::cmd_stats(&contract).await,
        ["tick"]               => cmd::query::cmd_tick(&contract).await,
        ["balance", identity]  => cmd::query::cmd_balance(&contract, identity).await,
        ["encode", op]         => {
            cmd::encode::cmd_encode(&contract, op, source.as_deref(), amount).await
        }
        ["chunks", input]      => cmd::deploy::cmd_chunks(input),
        ["broadcast", input]   => cmd::deploy::cmd_broadcast(&contract, input).await,
        ["deploy", input]      => {
            cmd::deploy::cmd_deploy(contract, input, source.as_deref(), sign_with.as_deref()).await
        }
        ["watch"]              => cmd::watch::cmd_watch(contract, None, &config).await,
        ["watch", identity]    => {
            cmd::watch::cmd_watch(contract, Some(identity.to_string()), &config).await
        }
        ["help"] | ["--help"] | ["-h"] => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
