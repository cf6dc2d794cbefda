//! Filter the combined table by tool agreement, product class, and length.

#[cfg(test)]
mod tests;

use crate::record::{self, Tool};
use crate::table::Table;
use clap::Parser;
use color_eyre::eyre::{Report, Result};
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::IntoEnumIterator;

// ----------------------------------------------------------------------------
// Criteria

/// Row selection criteria, shared by every view.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
pub struct Criteria {
    /// Keep rows flagged by at least one of these tools.
    #[clap(long, value_enum, value_delimiter = ',')]
    #[clap(help = "Tools whose predictions count toward a match (default: all three).")]
    pub tools: Option<Vec<Tool>>,

    /// Keep only rows flagged by all three tools, ignoring --tools.
    #[clap(long)]
    pub intersection: bool,

    /// Allowed product classes; omit to leave class filtering inactive.
    #[clap(long, value_delimiter = ',')]
    pub classes: Option<Vec<String>>,

    /// Minimum BGC length in bp.
    #[clap(long, default_value_t = 0.0)]
    pub min_length: f64,

    /// Maximum BGC length in bp (default: unbounded).
    #[clap(long)]
    pub max_length: Option<f64>,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria::new()
    }
}

impl Criteria {
    /// Criteria that keep every row flagged by any tool.
    pub fn new() -> Self {
        Criteria {
            tools: None,
            intersection: false,
            classes: None,
            min_length: 0.0,
            max_length: None,
        }
    }

    /// True if this tool's flag counts toward the match.
    fn enabled(&self, tool: Tool) -> bool {
        match &self.tools {
            Some(tools) => tools.contains(&tool),
            None => true,
        }
    }

    /// The upper length bound, unbounded when unset.
    fn max(&self) -> f64 {
        self.max_length.unwrap_or(f64::INFINITY)
    }
}

// ----------------------------------------------------------------------------
// Functions

/// Apply the criteria to a table, returning the matching rows as a new
/// table, in their original order.
pub fn apply(table: &Table, criteria: &Criteria) -> Result<Table, Report> {
    // resolve the columns the criteria read, once
    let tool_cols = Tool::iter()
        .map(|tool| Ok((tool, table.get_header_index(tool.column())?)))
        .collect::<Result<Vec<_>, Report>>()?;
    let class_col = table.get_header_index(record::PRODUCT_CLASS)?;
    let length_col = table.get_header_index(record::BGC_LENGTH)?;

    let keep = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            // tool agreement: intersection overrides the individual flags
            let tools_ok = if criteria.intersection {
                tool_cols.iter().all(|(_, col)| record::is_flagged(&row[*col]))
            } else {
                tool_cols
                    .iter()
                    .any(|(tool, col)| criteria.enabled(*tool) && record::is_flagged(&row[*col]))
            };

            // product class overlap; unclassified rows drop out while a
            // class filter is active
            let class_ok = match &criteria.classes {
                None => true,
                Some(allowed) => record::product_classes(&row[class_col])
                    .iter()
                    .any(|class| allowed.iter().any(|a| a == class)),
            };

            // length bounds; missing or non-numeric lengths drop out
            let length_ok = record::length(&row[length_col])
                .map_or(false, |length| length >= criteria.min_length && length <= criteria.max());

            (tools_ok && class_ok && length_ok).then_some(i)
        })
        .collect_vec();

    Ok(table.subset(&keep))
}

// ----------------------------------------------------------------------------
// Command

/// Arguments for the filter command.
#[derive(Debug, Parser)]
pub struct Args {
    /// Input table (.tsv, .csv, or .txt).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    #[clap(flatten)]
    pub criteria: Criteria,

    /// Output path for the filtered table; prints markdown when omitted.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Filter the input table and write or print the matching rows.
pub fn run(args: &Args) -> Result<Table, Report> {
    let table = Table::read(&args.input, None)?;
    let filtered = apply(&table, &args.criteria)?;

    info!("Kept {} of {} rows.", filtered.rows.len(), table.rows.len());
    if filtered.is_empty() {
        warn!("No rows matched the filter criteria.");
    }

    match &args.output {
        Some(path) => filtered.write(path, None)?,
        None => println!("{}", filtered.to_markdown()),
    }

    Ok(filtered)
}
