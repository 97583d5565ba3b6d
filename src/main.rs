use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Play(cmd::play::PlayArgs),
    Check(cmd::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing tracequiz...");

    let result = match cli.command {
        Commands::Play(args) => cmd::play::run(args),
        Commands::Check(args) => cmd::check::run(args),
    };

    if let Err(e) = result {
        error!("\n❌ FATAL: {}", e);
        process::exit(1);
    }
}
