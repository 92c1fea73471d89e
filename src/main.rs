use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod consensus;
mod core;
mod export;
mod parsing;
mod pipeline;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("cogor=debug,info")
    } else {
        EnvFilter::new("cogor=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Track(args) => {
            cli::track::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::SplitCds(args) => {
            cli::prepare::run_split(args, cli.format, cli.verbose)?;
        }
        cli::Commands::MergeHits(args) => {
            cli::prepare::run_merge(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
