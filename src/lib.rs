//! `combgc` explores combined biosynthetic gene cluster (BGC) predictions.
//!
//! Upstream pipelines run several BGC prediction tools (deepBGC, GECCO,
//! antiSMASH) over the same assemblies and merge the hits into one
//! tab-separated table. `combgc` takes that table and derives the data
//! behind an exploration session:
//!
//! 1. **Filter** rows by tool agreement, product class, and cluster length.
//! 1. **Summarize** tool overlap, product classes, and taxonomic breakdowns.
//! 1. **Build Sankey data** for the GTDB lineage of each hit's contig:
//!    unique labelled nodes per taxon, links counting the parent-to-child
//!    transitions between adjacent ranks, and distinct hue-wheel colors.
//!
//! Rendering is left to whatever plots the emitted tables and JSON; this
//! crate owns the transformations, which are pure functions of the input
//! table.

pub mod cli;
pub mod filter;
pub mod record;
pub mod sankey;
pub mod summary;
pub mod table;
pub mod taxonomy;
pub mod utils;

#[doc(inline)]
pub use crate::cli::Cli;
#[doc(inline)]
pub use crate::filter::Criteria;
#[doc(inline)]
pub use crate::sankey::Sankey;
#[doc(inline)]
pub use crate::table::Table;
#[doc(inline)]
pub use crate::taxonomy::{Lineage, Rank};
#[doc(inline)]
pub use crate::utils::verbosity::Verbosity;
