//! Command-line interface definitions.

pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Flipscan - resale valuation from completed marketplace sales.
#[derive(Parser, Debug)]
#[command(name = "flipscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Appraise one item title against completed sales
    Value(ValueArgs),

    /// Re-appraise queries read from stdin, debounced
    Watch(WatchArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `flipscan check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "flipscan.toml")]
    pub config: PathBuf,
}

/// Arguments for the `value` subcommand.
#[derive(Parser, Debug)]
pub struct ValueArgs {
    /// Item title to appraise
    pub query: String,

    /// Current asking price; unlocks the flip score on paid licenses
    #[arg(long)]
    pub asking: Option<Decimal>,

    /// Path to configuration file
    #[arg(short, long, default_value = "flipscan.toml")]
    pub config: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "flipscan.toml")]
    pub config: PathBuf,

    /// Override the debounce delay in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}
