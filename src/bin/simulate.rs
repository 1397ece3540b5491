//! Game balance simulator CLI.
//!
//! Run batches of seeded characters through combat to check balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 1000 warriors to level 10
//!   cargo run --bin simulate -- -n 100 -l 5       # 100 runs to level 5
//!   cargo run --bin simulate -- --class mage      # Balance check for mages
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use ravenhollow::character::CharacterClass;
use ravenhollow::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ravenhollow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              RAVENHOLLOW BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Class:          {}", config.class.name());
    println!("  Target Level:   {}", config.target_level);
    println!("  Max Encounters: {}", config.max_encounters_per_run);
    println!("  Enemies:        {}", if config.use_catalog_enemies { "catalog" } else { "generated" });
    println!("  Resting:        {}", config.rest_between_encounters);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            tracing::error!("Failed to write JSON report {}: {}", filename, e);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.target_level = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    config.class = CharacterClass::from_name(&args[i + 1]);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-e" | "--encounters" => {
                if i + 1 < args.len() {
                    config.max_encounters_per_run = args[i + 1].parse().unwrap_or(5_000);
                    i += 1;
                }
            }
            "--catalog" => {
                config.use_catalog_enemies = true;
            }
            "--no-rest" => {
                config.rest_between_encounters = false;
            }
            "--no-gear" => {
                config.equip_upgrades = false;
            }
            "--quick" => {
                config = SimConfig::class_balance_test(config.class);
            }
            "--gauntlet" => {
                config = SimConfig::catalog_gauntlet();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Ravenhollow Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated characters (default: 1000)");
    println!("    -l, --level <L>       Target level (default: 10)");
    println!("    -c, --class <C>       warrior, rogue, mage or any other name (default: warrior)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -e, --encounters <E>  Max encounters per run (default: 5,000)");
    println!("    --catalog             Fight the named enemies instead of generated ones");
    println!("    --no-rest             Do not refill health between encounters");
    println!("    --no-gear             Never equip dropped items");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (100 runs to level 5)");
    println!("    --gauntlet            Named enemies, no resting (200 runs to level 6)");
    println!("    -h, --help            Show this help");
    println!();
    println!("Set RUST_LOG=ravenhollow=debug for per-run output.");
}
