use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use feedban::cli::{Cli, Commands};
use feedban::commands;
use feedban::firewall::{FirewallSink, LoggingSink};

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::WARN
    } else {
        match verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let firewall: Arc<dyn FirewallSink> = Arc::new(LoggingSink::new());

    let result = match cli.command {
        Commands::Update => commands::update::execute(&cli.config, firewall).await,
        Commands::Run { tick } => commands::run::execute(&cli.config, firewall, tick).await,
        Commands::Teardown => commands::teardown::execute(&cli.config, firewall).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
