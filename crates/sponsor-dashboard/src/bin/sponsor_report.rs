//! # Sponsor Report
//!
//! Prints the sponsors table from a data snapshot.
//!
//! ## Usage
//! ```bash
//! # Snapshot path from the config (default: data/sponsors.json)
//! cargo run -p sponsor-dashboard --bin sponsor-report
//!
//! # Explicit snapshot and config
//! cargo run -p sponsor-dashboard --bin sponsor-report -- --data ./snapshot.json --config ./dashboard.toml
//!
//! # Detail view for one sponsor
//! cargo run -p sponsor-dashboard --bin sponsor-report -- --sponsor 3
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use sponsor_dashboard::{init_tracing, DashboardConfig, DashboardResult, DataStore, SponsorDetail, SponsorReport};
use tracing::{error, info};

struct Args {
    data: Option<PathBuf>,
    config: Option<PathBuf>,
    sponsor: Option<u32>,
}

fn print_help() {
    println!("Sponsor Report");
    println!();
    println!("Usage: sponsor-report [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --data <PATH>      Data snapshot (overrides config and SPONSOR_DATA_PATH)");
    println!("  -c, --config <PATH>    Config file (default: platform config dir)");
    println!("  -s, --sponsor <ID>     Show the detail view for one sponsor");
    println!("  -h, --help             Show this help message");
}

/// Returns `None` when `--help` was requested.
fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        data: None,
        config: None,
        sponsor: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--data" | "-d" | "--config" | "-c" | "--sponsor" | "-s" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} needs a value", flag))?;
                match flag {
                    "--data" | "-d" => parsed.data = Some(PathBuf::from(value)),
                    "--config" | "-c" => parsed.config = Some(PathBuf::from(value)),
                    _ => {
                        let id = value
                            .parse()
                            .map_err(|_| format!("sponsor id must be a number, got '{}'", value))?;
                        parsed.sponsor = Some(id);
                    }
                }
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

fn run(args: Args) -> DashboardResult<()> {
    let mut config = DashboardConfig::load(args.config)?;
    if let Some(path) = args.data {
        config.data.snapshot_path = path;
    }
    init_tracing(&config.logging);

    let store = DataStore::load(config.snapshot_path())?;
    info!(sponsors = store.sponsors().len(), "Snapshot ready");

    match args.sponsor {
        Some(id) => {
            let detail = SponsorDetail::build(&store, id, &config.display)?;
            println!("{} ({})", detail.row.name, detail.row.status);
            println!("  Total value: {} [{}]", detail.row.total_value, detail.row.sponsor_type);
            println!("  {}", detail.value_split);
            println!("  Completion:  {} ({})", detail.row.completion, detail.progress);
            println!("  Margin:      {} ({})", detail.row.margin, detail.cost_summary);
            println!();
            for task in &detail.deliverables {
                println!(
                    "  - {} | {} | {} | est. {} | actual {}",
                    task.title, task.department, task.cost_type, task.estimated, task.actual
                );
            }
        }
        None => {
            let report = SponsorReport::build(&store, &config.display)?;
            print!("{}", report.render());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
