//! # Skil Till Library
//!
//! The terminal front end for the deposit counter.
//!
//! ## Module Organization
//! ```text
//! skil_till/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── config.rs       ◄─── till.toml + SKIL_* overrides
//! ├── commands.rs     ◄─── Input line parsing
//! ├── till.rs         ◄─── Till session and rendered view
//! └── error.rs        ◄─── Startup / terminal errors
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod till;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skil_rates::{HttpRateSource, RateCache};

use crate::commands::{Command, CommandError};
use crate::config::TillConfig;
use crate::error::TillResult;
use crate::till::{Reply, Till};

/// Runs the till until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          Till Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,skil=debug, can be overridden with RUST_LOG         │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • till.toml, then SKIL_* environment overrides                      │
/// │     • Falls back to defaults with a warning                             │
/// │                                                                         │
/// │  3. Build Rate Cache ─────────────────────────────────────────────────► │
/// │     • HttpRateSource from [rates] settings                              │
/// │     • Empty 24h cache, nothing fetched yet                              │
/// │                                                                         │
/// │  4. Input Loop ───────────────────────────────────────────────────────► │
/// │     • One command per line, each awaited before the next is read        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> TillResult<()> {
    init_tracing();

    info!("Starting Skil till");

    let config = TillConfig::load_or_default(None);
    if !config.rates.has_api_key() {
        warn!("No rate API key configured, foreign currencies will show in ISK");
    }

    let source = HttpRateSource::new(&config.rates)?;
    let rates = RateCache::new(source);
    let mut till = Till::new(config.till.name.clone(), rates, config.till.default_currency);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_block(&mut stdout, &till.render().await.to_string()).await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match line.parse::<Command>() {
            Ok(command) => till.handle(command).await,
            Err(CommandError::Empty) => continue,
            Err(e) => Reply::Print(e.to_string()),
        };

        match reply {
            Reply::Print(text) => write_block(&mut stdout, &text).await?,
            Reply::Quit => break,
        }
    }

    info!(
        session_id = %till.ledger().session_id(),
        payout_count = till.ledger().payout_carry_count(),
        "Till closed"
    );
    Ok(())
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> TillResult<()> {
    stdout.write_all(text.trim_end().as_bytes()).await?;
    stdout.write_all(b"\n> ").await?;
    stdout.flush().await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=skil_rates=trace` - Show trace for the rate cache only
/// - Default: INFO, DEBUG for skil crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,skil=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
