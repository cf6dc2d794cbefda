use clap::Parser;
use color_eyre::eyre::{Report, Result};
use combgc::{cli, cli::Cli, filter, sankey, summary};

fn main() -> Result<(), Report> {
    // ------------------------------------------------------------------------
    // CLI Setup

    // Parse CLI parameters
    let args = Cli::parse();

    // initialize color_eyre crate for colorized logs
    color_eyre::install()?;

    // Set logging/verbosity level via RUST_LOG
    std::env::set_var("RUST_LOG", args.verbosity.to_string());

    // initialize env_logger crate for logging/verbosity level
    env_logger::init();

    // check which CLI command we're running (filter, sankey, summary)
    match args.command {
        cli::Command::Filter(args) => _ = filter::run(&args)?,
        cli::Command::Sankey(args) => _ = sankey::run(&args)?,
        cli::Command::Summary(args) => summary::run(&args)?,
    }

    Ok(())
}
