//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/feedban/config.yaml";

#[derive(Parser, Debug)]
#[command(name = "feedban")]
#[command(about = "Reconcile firewall rule groups from IP blocklist feeds")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every due feed once and apply the results
    Update,

    /// Run continuously, re-checking feeds on a fixed cadence
    Run {
        /// Seconds between scheduler passes
        #[arg(long, default_value_t = 60)]
        tick: u64,
    },

    /// Remove every rule group owned by the configured feeds
    Teardown,
}
