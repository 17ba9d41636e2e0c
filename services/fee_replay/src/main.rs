//! Dynamic Fee Replay Tool
//!
//! Replays a JSON-lines trace of host callbacks through a freshly configured
//! dynamic fee hook and prints every emitted event as one JSON line.
//!
//! Architecture:
//! trace file → TraceStep → DynamicFeeHook → HookEvent (stdout)
//!                               ↓
//!                     DryRunTransfer (withdrawals)

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use fee_hook::DynamicFeeHook;
use hook_config::{init_tracing, HookSection, HookSettings, LoggingSettings, VolatilitySection};

mod replay;
mod trace;

use replay::Replayer;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "fee-replay")]
#[command(about = "Replay host callback traces through the dynamic fee hook")]
struct Args {
    /// Hook settings file path
    #[arg(short, long, default_value = "config/hook.toml")]
    config: PathBuf,

    /// JSON-lines trace to replay; reads stdin when omitted
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Write a starter settings file to `--config` and exit
    #[arg(long)]
    init_config: bool,
}

fn starter_settings() -> HookSettings {
    HookSettings {
        hook: HookSection {
            owner: "0x0000000000000000000000000000000000000001".to_string(),
            treasury: "0x0000000000000000000000000000000000000002".to_string(),
            pool_manager: "0x0000000000000000000000000000000000000003".to_string(),
            protocol_share_bps: hook_config::defaults::PROTOCOL_SHARE_BPS,
        },
        volatility: VolatilitySection::default(),
        logging: LoggingSettings::default(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        let rendered = starter_settings().to_toml()?;
        std::fs::write(&args.config, rendered)
            .with_context(|| format!("Failed to write {:?}", args.config))?;
        println!("Wrote starter settings to {:?}", args.config);
        return Ok(());
    }

    let settings = HookSettings::load(&args.config)?;
    init_tracing(&settings.logging)?;

    let hook = DynamicFeeHook::from_settings(&settings)?;
    let mut replayer = Replayer::new(hook);

    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    let summary = match &args.trace {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open trace {:?}", path))?;
            replayer.run(BufReader::new(file), output)?
        }
        None => replayer.run(io::stdin().lock(), output)?,
    };
    io::stdout().flush().context("Failed to flush output")?;

    info!(
        "Replay complete: {} steps, {} failed, {} events, {} pools",
        summary.steps,
        summary.failed,
        summary.events,
        replayer.hook().pool_count()
    );
    for (token, amount) in replayer.hook().ledger().tokens() {
        info!("Outstanding protocol fees: token={:?} amount={}", token, amount);
    }

    Ok(())
}
