//! silverstone-chassis - Silverstone chassis query tool
//!
//! Entry point for inspecting the platform overrides from the shell.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use sonic_platform_common::ChassisBase;
use sonic_platform_silverstone::{Chassis, PlatformConfig, DEFAULT_CONFIG_PATH};

/// Celestica Silverstone chassis utility
#[derive(Parser, Debug)]
#[command(name = "silverstone-chassis")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Platform configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the hardware reboot cause
    RebootCause {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the transceiver at a 1-based port index
    Sfp {
        /// 1-based port index
        index: usize,
    },
    /// List all transceiver slots
    Sfps,
    /// Query or control the CPLD watchdog
    Watchdog {
        #[command(subcommand)]
        action: WatchdogAction,
    },
}

#[derive(Subcommand, Debug)]
enum WatchdogAction {
    /// Show armed state and remaining time
    Status,
    /// Arm with a timeout in seconds
    Arm {
        /// Timeout in seconds
        seconds: i32,
    },
    /// Disarm
    Disarm,
}

/// Initializes tracing with RUST_LOG taking precedence over `log_level`.
fn init_logging(log_level: &str, json: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}

async fn run(args: Args) -> Result<()> {
    let config = PlatformConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let chassis = Chassis::from_config(&config);
    info!(platform = chassis.name(), sfps = chassis.num_sfps(), "Chassis ready");

    match args.command {
        Command::RebootCause { json } => {
            let cause = chassis.get_reboot_cause().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&cause)?);
            } else {
                println!("{}", cause);
            }
        }
        Command::Sfp { index } => match chassis.get_sfp(index) {
            Some(sfp) => println!("{}: {}", index, sfp.name()),
            None => bail!(
                "SFP index {} out of range (1-{})",
                index,
                chassis.num_sfps()
            ),
        },
        Command::Sfps => {
            for (position, sfp) in chassis.sfps().iter().enumerate() {
                println!("{}: {}", position + 1, sfp.name());
            }
        }
        Command::Watchdog { action } => {
            let Some(watchdog) = chassis.get_watchdog() else {
                bail!("CPLD watchdog not available");
            };
            match action {
                WatchdogAction::Status => {
                    let status = json!({
                        "armed": watchdog.is_armed(),
                        "remaining_time": watchdog.get_remaining_time(),
                    });
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                WatchdogAction::Arm { seconds } => {
                    let effective = watchdog.arm(seconds).context("arming watchdog")?;
                    println!("Watchdog armed for {} seconds", effective);
                }
                WatchdogAction::Disarm => {
                    watchdog.disarm().context("disarming watchdog")?;
                    println!("Watchdog disarmed");
                }
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("silverstone-chassis: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
