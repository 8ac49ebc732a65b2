//! CLI module for PMP Model Bench
//!
//! - `serve`: HTTP API for the dashboard
//! - `bench`: benchmark model files and write their reports

pub mod bench;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// PMP Model Bench - simulated model benchmarks with PDF reports
#[derive(Parser)]
#[command(name = "pmp-model-bench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Benchmark model files and write PDF reports
    Bench(bench::BenchArgs),
}

/// Load `.env` and layered configuration, then install logging
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
