//! CLI Command Handlers
//!
//! Implementation of the tokenscope subcommands. Every argument is optional;
//! missing values come from the config file or its built-in defaults.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::adapters::helius::{HeliusClient, HeliusConfig};
use crate::adapters::market_data::JupiterPriceClient;
use crate::adapters::solana::SolanaClient;
use crate::application::{HolderScanner, MintAgeFinder, SymbolResolver};
use crate::config::{
    load_config, load_config_or_default, validate_min_usd, Config, DEFAULT_CONFIG_PATH,
};
use crate::domain::{format_age, format_thousands, HolderReport, MintAge};

const RULE_WIDTH: usize = 60;

/// tokenscope - Solana token inspection tools
#[derive(Parser, Debug)]
#[command(
    name = "tokenscope",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Solana token inspection: mint age, ticker lookup and holder scans",
    long_about = "tokenscope queries Solana RPC, Helius and the Jupiter Price API to report \
                  how old a mint is, what its ticker is, and which wallets hold at least a \
                  given USD value of it."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the oldest transaction of a mint and print its age
    MintAge(MintAgeCmd),

    /// Resolve the ticker symbol of a token
    Symbol(SymbolCmd),

    /// List wallets holding at least a USD value of a token
    Holders(HoldersCmd),
}

/// Find mint age
#[derive(Parser, Debug)]
pub struct MintAgeCmd {
    /// Mint (or any address) to inspect
    #[arg(value_name = "MINT")]
    pub mint: Option<String>,

    /// Signatures per page (1-1000)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Override RPC URL
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,
}

/// Resolve ticker
#[derive(Parser, Debug)]
pub struct SymbolCmd {
    /// Token address to look up
    #[arg(value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Override Helius API key
    #[arg(long, value_name = "KEY")]
    pub helius_key: Option<String>,
}

/// Scan holders
#[derive(Parser, Debug)]
pub struct HoldersCmd {
    /// Token mint to scan
    #[arg(value_name = "MINT")]
    pub mint: Option<String>,

    /// Minimum holding value in USD
    #[arg(long, value_name = "USD")]
    pub min_usd: Option<f64>,

    /// Directory for the JSON report
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override Helius API key
    #[arg(long, value_name = "KEY")]
    pub helius_key: Option<String>,
}

/// Execute a parsed command line
pub async fn execute(app: CliApp) -> Result<()> {
    let config = resolve_config(&app.config)?;

    match app.command {
        Command::MintAge(cmd) => mint_age_command(cmd, &config).await,
        Command::Symbol(cmd) => symbol_command(cmd, &config).await,
        Command::Holders(cmd) => holders_command(cmd, &config).await,
    }
}

/// The default path may be absent; an explicitly given one must exist
fn resolve_config(path: &Path) -> Result<Config> {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string());
    let config = if path.as_os_str() == DEFAULT_CONFIG_PATH {
        load_config_or_default(&expanded)
    } else {
        load_config(&expanded)
    };
    config.with_context(|| format!("Failed to load configuration from {}", expanded.display()))
}

async fn mint_age_command(cmd: MintAgeCmd, config: &Config) -> Result<()> {
    let mint = cmd.mint.unwrap_or_else(|| config.mint_age.mint.clone());
    validate_address(&mint)?;

    let rpc_url = cmd.rpc_url.unwrap_or_else(|| config.solana.get_rpc_url());
    let solana = match config.http.timeout() {
        Some(timeout) => SolanaClient::with_timeout(rpc_url, timeout),
        None => SolanaClient::new(rpc_url),
    };
    tracing::info!(mint = %mint, rpc = %solana.url(), "Looking up mint age");

    let finder = MintAgeFinder::new(solana)
        .with_page_size(cmd.page_size.unwrap_or(config.mint_age.page_size));

    match finder.resolve(&mint).await {
        Ok(age) => print!("{}", render_mint_age(&mint, &age, Utc::now())),
        Err(e) => {
            tracing::error!(mint = %mint, error = %e, "Signature history unavailable");
            println!("Could not fetch transaction history for {}: {}", mint, e);
        }
    }
    Ok(())
}

async fn symbol_command(cmd: SymbolCmd, config: &Config) -> Result<()> {
    let address = cmd.address.unwrap_or_else(|| config.symbol.address.clone());
    validate_address(&address)?;

    let helius = helius_client(cmd.helius_key, config)?;
    let symbol = SymbolResolver::new(helius).resolve(&address).await;

    println!("Token symbol: {}", symbol);
    Ok(())
}

async fn holders_command(cmd: HoldersCmd, config: &Config) -> Result<()> {
    let mint = cmd.mint.unwrap_or_else(|| config.holders.mint.clone());
    validate_address(&mint)?;

    let min_usd = cmd.min_usd.unwrap_or(config.holders.min_usd_value);
    validate_min_usd(min_usd)?;

    let output_dir = cmd.output_dir.unwrap_or_else(|| {
        PathBuf::from(shellexpand::tilde(&config.holders.output_dir).to_string())
    });

    let prices = JupiterPriceClient::with_options(
        config.jupiter.price_api_url.clone(),
        config.jupiter.reference_mint.clone(),
        config.http.timeout(),
    )
    .context("Failed to create Jupiter price client")?;
    let helius = helius_client(cmd.helius_key, config)?;

    println!("Retrieving token holders for: {}", mint);
    println!("Minimum USD value threshold: ${:.2}", min_usd);
    println!("{}", "-".repeat(RULE_WIDTH));

    let scanner = HolderScanner::new(prices, helius);
    let Some(price) = scanner.price(&mint).await else {
        println!("Could not retrieve price for token {}", mint);
        return Ok(());
    };
    println!("Token price: ${:.6}", price);

    let report = match scanner.scan_at_price(&mint, price, min_usd).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(mint = %mint, error = %e, "Token account scan failed");
            println!("Error fetching token holders: {}", e);
            return Ok(());
        }
    };

    print!("{}", render_holders(&report));

    let path = report
        .write_to_dir(&output_dir)
        .context("Failed to save holder report")?;
    println!("Results saved to: {}", path.display());
    println!("Total holders with ${}+ value: {}", min_usd, report.total_holders);
    Ok(())
}

fn helius_client(key_override: Option<String>, config: &Config) -> Result<HeliusClient> {
    let api_key = key_override
        .or_else(|| config.helius.get_api_key())
        .context("Helius API key missing: set HELIUS_API_KEY or [helius].api_key")?;

    HeliusClient::with_config(HeliusConfig {
        rpc_url: config.helius.rpc_url.clone(),
        api_key,
        timeout: config.http.timeout(),
    })
    .context("Failed to create Helius client")
}

/// Reject anything that is not a base58 Solana public key
pub fn validate_address(address: &str) -> Result<()> {
    Pubkey::from_str(address)
        .map(|_| ())
        .with_context(|| format!("Invalid Solana address: {}", address))
}

/// Console report for the mint-age command
pub fn render_mint_age(mint: &str, age: &MintAge, now: DateTime<Utc>) -> String {
    match age {
        MintAge::NotFound => {
            "No transactions found for this mint address (is it correct?).\n".to_string()
        }
        MintAge::Found { signature, slot, minted_at: None } => format!(
            "Oldest tx sig: {}\nSlot: {}\nBlock time unavailable from RPC.\n",
            signature, slot
        ),
        MintAge::Found { signature, minted_at: Some(at), .. } => {
            let elapsed = age.age_at(now).unwrap_or_else(TimeDelta::zero);
            format!(
                "Mint address: {}\nOldest tx sig: {}\nMinted at:    {} (UTC)\nAge:          {}\n",
                mint,
                signature,
                at.to_rfc3339(),
                format_age(elapsed)
            )
        }
    }
}

/// Console listing of a holder report
pub fn render_holders(report: &HolderReport) -> String {
    let mut out = String::new();

    if report.holders.is_empty() {
        let _ = writeln!(out, "No holders found with minimum ${} value", report.min_usd_value);
        return out;
    }

    let _ = writeln!(
        out,
        "Found {} holders with minimum ${} value:",
        report.total_holders, report.min_usd_value
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (i, holder) in report.holders.iter().enumerate() {
        let _ = writeln!(out, "{:3}. Owner: {}", i + 1, holder.owner);
        let _ = writeln!(out, "     Token Amount: {}", format_thousands(holder.token_amount));
        let _ = writeln!(out, "     USD Value: ${}", format_thousands(holder.usd_value));
        let _ = writeln!(out);
    }
    out
}
