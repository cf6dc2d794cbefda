//! [Command-line interface](Cli) (CLI) of the main binary.

use crate::{filter, sankey, summary, Verbosity};
use clap::{Parser, Subcommand};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
#[derive(Debug, Parser)]
#[clap(name = "combgc", author, version)]
#[clap(about = "combgc explores combined BGC predictions from deepBGC, GECCO, and antiSMASH.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which runtime command the CLI
/// arguments should be passed to.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter the table by tool agreement, product class, and length.
    #[clap(about = "Filter the table by tool agreement, product class, and length.")]
    Filter(filter::Args),
    /// Build the taxonomic Sankey payload from the filtered table.
    #[clap(about = "Build taxonomic Sankey data from the filtered table.")]
    Sankey(sankey::Args),
    /// Summarize tool overlap, product classes, and taxonomy.
    #[clap(about = "Summarize tool overlap, product classes, and taxonomy.")]
    Summary(summary::Args),
}
