use clap::{Parser, Subcommand};

use crate::{check::CheckArgs, config::Config, plan::PlanArgs};

mod check;
mod config;
mod parsers;
mod plan;
mod strategies;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plans the delivery routes of a city with the given fleet
    #[command(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },
    /// Checks whether the fleet can carry the demand of a city at all
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
    /// Lists the first solution strategies and local search metaheuristics
    Strategies,
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = Config::from_env();

    match cli.command {
        Commands::Plan { args } => plan::run(args, &config)?,
        Commands::Check { args } => check::run(args, &config)?,
        Commands::Strategies => strategies::run(),
    }

    Ok(())
}
