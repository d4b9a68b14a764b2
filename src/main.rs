mod cli_main;

use clap::Parser;
use cli_main::Cli;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let config = cli.into_config();
    if let Err(e) = indiv_mapper::run(&config) {
        eprintln!("error [{}]: {}", e.stage(), e);
        std::process::exit(1);
    }
}
