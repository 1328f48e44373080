use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author = "The chemsim developers",
    version,
    about = "chemsim CLI - Run headless particle-chemistry simulations and inspect the built-in element and molecule catalogs.",
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log more: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write a plain-text log, with span timings, to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation for a fixed number of ticks and print summary statistics.
    Run(RunArgs),
    /// List the built-in element catalog.
    Elements,
    /// List the built-in molecule templates.
    Molecules,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a simulation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a scenario file listing setup and scheduled commands.
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Path to a physics constants file, replacing the `[physics]` table of the config.
    #[arg(long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short = 'n', long, value_name = "INT")]
    pub ticks: Option<u64>,

    /// Frame time handed to each tick, in seconds (clamped by `max_dt`).
    #[arg(long, value_name = "FLOAT")]
    pub dt: Option<f64>,

    /// Seed for the random source.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Initial temperature on the simulation scale.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Multiplier applied to every clamped frame time.
    #[arg(long, value_name = "FLOAT")]
    pub time_scale: Option<f64>,

    /// Override one config-file key with a TOML value; repeatable.
    /// Example: -S physics.bonds.break-ratio=2.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
