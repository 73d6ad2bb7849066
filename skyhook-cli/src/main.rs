//! Skyhook CLI — replay, synthetic data, and calculator commands.
//!
//! Commands:
//! - `replay` — run a recorded `timestamp,value` CSV through a fresh engine
//! - `synth` — write a seeded random-walk altitude series as CSV
//! - `costs` — buy/sell cost at an altitude for a fee schedule
//! - `attitude` — trend angle between two `timestamp,value` points

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skyhook_core::replay::{read_samples_file, replay, write_samples_csv, ReplayReport};
use skyhook_core::synthetic::SeriesSpec;
use skyhook_core::{calc_attitude, EngineConfig, FeeSchedule, Sample, Skyhook};

#[derive(Parser)]
#[command(
    name = "skyhook",
    about = "Skyhook CLI — attitude-based latch/jettison decision engine"
)]
struct Cli {
    /// Log engine decisions (equivalent to RUST_LOG=skyhook=debug).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the fee schedule comes from: a TOML file or inline flags.
#[derive(clap::Args)]
struct FeeArgs {
    /// TOML fee schedule (`buy = 0.25`, `sell = 0.25`).
    #[arg(long)]
    fees: Option<PathBuf>,

    /// Buy fee in percent (e.g. 0.25).
    #[arg(long)]
    buy: Option<f64>,

    /// Sell fee in percent (e.g. 0.25).
    #[arg(long)]
    sell: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded altitude series through a fresh engine.
    Replay {
        #[command(flatten)]
        fees: FeeArgs,

        /// CSV with a `timestamp,value` header, timestamps in milliseconds.
        #[arg(long)]
        input: PathBuf,

        /// Write the full JSON report here.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate a seeded random-walk altitude series.
    Synth {
        /// Number of samples.
        #[arg(long, default_value_t = 500)]
        len: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First altitude.
        #[arg(long, default_value_t = 159_908.0)]
        start: f64,

        /// Milliseconds between samples.
        #[arg(long, default_value_t = 1_000)]
        step_ms: i64,

        /// Mean change per step.
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Maximum random change per step.
        #[arg(long, default_value_t = 100.0)]
        volatility: f64,

        /// Output CSV. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Buy/sell cost at an altitude.
    Costs {
        #[command(flatten)]
        fees: FeeArgs,

        #[arg(long)]
        altitude: f64,
    },
    /// Attitude angle between two points given as `timestamp,value`.
    Attitude {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Replay {
            fees,
            input,
            output,
        } => run_replay(&fees, input, output),
        Commands::Synth {
            len,
            seed,
            start,
            step_ms,
            drift,
            volatility,
            output,
        } => {
            let spec = SeriesSpec {
                start_value: start,
                start_timestamp: 0,
                step_ms,
                len,
                drift,
                volatility,
                seed,
            };
            run_synth(&spec, output)
        }
        Commands::Costs { fees, altitude } => run_costs(&fees, altitude),
        Commands::Attitude { from, to } => run_attitude(&from, &to),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "skyhook=debug" } else { "skyhook=info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .context("build log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(args: &FeeArgs) -> Result<EngineConfig> {
    let inline = args.buy.is_some() || args.sell.is_some();
    if args.fees.is_some() && inline {
        bail!("--fees and --buy/--sell are mutually exclusive");
    }

    let config = match &args.fees {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::try_from(FeeSchedule {
            buy: args.buy,
            sell: args.sell,
        })?,
    };
    Ok(config)
}

fn run_replay(fees: &FeeArgs, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(fees)?;
    let samples = read_samples_file(&input)?;
    if samples.is_empty() {
        bail!("no samples in {}", input.display());
    }
    info!(samples = samples.len(), input = %input.display(), "replaying");

    let mut engine = Skyhook::from_config(config);
    let report = replay(&mut engine, &samples);
    print_summary(&report);

    if let Some(path) = output {
        let json = report.to_json()?;
        std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &ReplayReport) {
    let s = &report.summary;
    println!(
        "Fees:        buy {}% / sell {}%",
        report.config.buy_fee_pct(),
        report.config.sell_fee_pct()
    );
    println!("Config:      {}", &report.config_fingerprint[..16]);
    println!("Samples:     {} ({} rejected)", s.steps, s.rejected);
    println!("Latches:     {}", s.latches);
    println!("Jettisons:   {}", s.jettisons);
    if let Some(ext) = s.extremes {
        println!("Extremes:    {:.2} .. {:.2}", ext.lowest, ext.highest);
    }
    println!("Net change:  {:.2}", s.net_change);
    match report.open_latch {
        Some(entry) => println!(
            "Final state: holding since {} @ {:.2}",
            entry.timestamp, entry.value
        ),
        None => println!("Final state: empty"),
    }
}

fn run_synth(spec: &SeriesSpec, output: Option<PathBuf>) -> Result<()> {
    let samples = spec.generate();
    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create {}", path.display()))?;
            write_samples_csv(file, &samples)?;
            info!(samples = samples.len(), output = %path.display(), "series written");
        }
        None => write_samples_csv(std::io::stdout().lock(), &samples)?,
    }
    Ok(())
}

fn run_costs(fees: &FeeArgs, altitude: f64) -> Result<()> {
    let config = load_config(fees)?;
    let engine = Skyhook::from_config(config);
    let costs = engine.calc_costs(altitude);
    println!(
        "{}",
        serde_json::json!({
            "altitude": altitude,
            "buy_cost": costs.buy_cost,
            "sell_cost": costs.sell_cost,
            "round_trip": costs.round_trip(),
        })
    );
    Ok(())
}

fn run_attitude(from: &str, to: &str) -> Result<()> {
    let p = parse_point(from)?;
    let q = parse_point(to)?;
    let attitude = calc_attitude(&p, &q);
    println!("{}", serde_json::to_string(&attitude)?);
    Ok(())
}

fn parse_point(s: &str) -> Result<Sample> {
    let Some((t, v)) = s.split_once(',') else {
        bail!("expected `timestamp,value`, got '{s}'");
    };
    let timestamp: i64 = t
        .trim()
        .parse()
        .with_context(|| format!("bad timestamp in '{s}'"))?;
    let value: f64 = v
        .trim()
        .parse()
        .with_context(|| format!("bad value in '{s}'"))?;
    Ok(Sample::new(timestamp, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_spaces() {
        assert_eq!(parse_point("1000, 159908").unwrap(), Sample::new(1_000, 159_908.0));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("1000").is_err());
        assert!(parse_point("abc,1").is_err());
        assert!(parse_point("1,abc").is_err());
    }

    #[test]
    fn load_config_inline_fees() {
        let args = FeeArgs {
            fees: None,
            buy: Some(0.25),
            sell: Some(0.5),
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.sell_fee_pct(), 0.5);
    }

    #[test]
    fn load_config_requires_both_inline_fees() {
        let args = FeeArgs {
            fees: None,
            buy: Some(0.25),
            sell: None,
        };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn load_config_rejects_mixed_sources() {
        let args = FeeArgs {
            fees: Some(PathBuf::from("fees.toml")),
            buy: Some(0.25),
            sell: None,
        };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn cli_parses_replay() {
        let cli = Cli::try_parse_from([
            "skyhook", "replay", "--buy", "0.25", "--sell", "0.25", "--input", "series.csv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Replay { .. }));
    }
}
