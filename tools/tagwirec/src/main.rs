mod commands;
mod input;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check::CheckArgs, decode::DecodeArgs, inspect::InspectArgs, plan::PlanArgs};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tagwirec", about = "Compile tagwire schemas and decode payloads")]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile schemas and report the first error
    Check(CheckArgs),
    /// Print compiled decode plans
    Plan(PlanArgs),
    /// Decode a payload with a schema and print the message
    Decode(DecodeArgs),
    /// Dump raw field headers of a payload without a schema
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check(args) => args.run(),
        Commands::Plan(args) => args.run(),
        Commands::Decode(args) => args.run(),
        Commands::Inspect(args) => args.run(),
    }
}

fn init_logging(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
