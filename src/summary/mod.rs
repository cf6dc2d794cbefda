//! Aggregate views of the filtered table: tool overlap, product classes,
//! and taxonomy breakdowns.


use crate::filter::{self, Criteria};
use crate::record::{self, Tool};
use crate::table::Table;
use crate::taxonomy::{self, Rank};
use crate::utils;
use clap::Parser;
use color_eyre::eyre::{Report, Result};
use itertools::Itertools;
use log::{info, warn};
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Tool overlap

/// Count the exclusive agreement regions of the three prediction tools.
///
/// Each row lands in exactly one region: a single tool (the other two
/// missing), a pair (the third missing), or all three.
pub fn tool_overlap(table: &Table) -> Result<Table, Report> {
    let deepbgc = table.get_header_index(Tool::DeepBgc.column())?;
    let gecco = table.get_header_index(Tool::Gecco.column())?;
    let antismash = table.get_header_index(Tool::AntiSmash.column())?;

    // region predicates over (deepBGC, GECCO, antiSMASH) agreement
    let regions: [(&str, fn(bool, bool, bool) -> bool); 7] = [
        ("deepBGC", |d, g, a| d && !g && !a),
        ("GECCO", |d, g, a| !d && g && !a),
        ("antiSMASH", |d, g, a| !d && !g && a),
        ("deepBGC + GECCO", |d, g, a| d && g && !a),
        ("deepBGC + antiSMASH", |d, g, a| d && !g && a),
        ("GECCO + antiSMASH", |d, g, a| !d && g && a),
        ("all three", |d, g, a| d && g && a),
    ];

    let flags = table
        .rows
        .iter()
        .map(|row| {
            (
                record::is_flagged(&row[deepbgc]),
                record::is_flagged(&row[gecco]),
                record::is_flagged(&row[antismash]),
            )
        })
        .collect_vec();

    let mut overlap = Table::new();
    overlap.headers = vec!["Tools".to_string(), "BGCs".to_string()];
    for (label, predicate) in regions {
        let count = flags.iter().filter(|(d, g, a)| predicate(*d, *g, *a)).count();
        overlap.add_row(vec![label.to_string(), count.to_string()])?;
    }

    Ok(overlap)
}

// ----------------------------------------------------------------------------
// Product classes

/// The sorted, distinct product classes appearing anywhere in the table.
pub fn product_classes(table: &Table) -> Result<Vec<String>, Report> {
    let classes = table
        .get_column(record::PRODUCT_CLASS)?
        .into_iter()
        .flat_map(record::product_classes)
        .map(String::from)
        .unique()
        .sorted()
        .collect_vec();
    Ok(classes)
}

/// Count BGCs per sample and product class annotation.
pub fn class_counts(table: &Table) -> Result<Table, Report> {
    let sample_col = table.get_header_index(record::SAMPLE_ID)?;
    let class_col = table.get_header_index(record::PRODUCT_CLASS)?;

    let pairs = table.rows.iter().filter_map(|row| {
        let class = row[class_col].trim();
        (!record::is_missing(class)).then(|| (record::sample_name(&row[sample_col]), class))
    });

    let mut counts = Table::new();
    counts.headers =
        vec!["Sample".to_string(), record::PRODUCT_CLASS.to_string(), "BGCs".to_string()];
    for ((sample, class), count) in utils::count_first_seen(pairs) {
        counts.add_row(vec![sample.to_string(), class.to_string(), count.to_string()])?;
    }

    Ok(counts)
}

/// Summarize BGC length per product class annotation, for classes with
/// more than `min_count` BGCs, most common class first.
pub fn class_lengths(table: &Table, min_count: usize) -> Result<Table, Report> {
    let class_col = table.get_header_index(record::PRODUCT_CLASS)?;
    let length_col = table.get_header_index(record::BGC_LENGTH)?;

    let pairs = table.rows.iter().filter_map(|row| {
        let class = row[class_col].trim();
        let length = record::length(&row[length_col])?;
        (!record::is_missing(class)).then_some((class, length))
    });

    // gather lengths per class, in first-occurrence order
    let mut classes: Vec<(&str, Vec<f64>)> = Vec::new();
    for (class, length) in pairs {
        match classes.iter_mut().find(|(c, _)| *c == class) {
            Some((_, lengths)) => lengths.push(length),
            None => classes.push((class, vec![length])),
        }
    }

    classes.retain(|(_, lengths)| lengths.len() > min_count);
    classes.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    let mut summary = Table::new();
    summary.headers = ["Product_class", "BGCs", "Min", "Median", "Max"]
        .into_iter()
        .map(String::from)
        .collect();
    for (class, mut lengths) in classes {
        lengths.sort_by(|a, b| a.total_cmp(b));
        let row = vec![
            class.to_string(),
            lengths.len().to_string(),
            lengths[0].to_string(),
            median(&lengths).to_string(),
            lengths[lengths.len() - 1].to_string(),
        ];
        summary.add_row(row)?;
    }

    Ok(summary)
}

/// Median of a sorted, non-empty slice.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ----------------------------------------------------------------------------
// Taxonomy

/// Count BGCs per sample and taxon at the given rank.
///
/// Rows with the rank unclassified are dropped.
pub fn taxonomy_counts(table: &Table, rank: Rank) -> Result<Table, Report> {
    let derived = taxonomy::append_columns(table)?;
    let sample_col = derived.get_header_index(record::SAMPLE_ID)?;
    let rank_col = derived.get_header_index(rank.column())?;

    let pairs = derived.rows.iter().filter_map(|row| {
        let label = row[rank_col].as_str();
        (!label.is_empty()).then(|| (record::sample_name(&row[sample_col]), label))
    });

    let mut counts = Table::new();
    counts.headers = vec!["Sample".to_string(), rank.to_string(), "BGCs".to_string()];
    for ((sample, label), count) in utils::count_first_seen(pairs) {
        counts.add_row(vec![sample.to_string(), label.to_string(), count.to_string()])?;
    }

    Ok(counts)
}

// ----------------------------------------------------------------------------
// Command

/// Arguments for the summary command.
#[derive(Debug, Parser)]
pub struct Args {
    /// Input table (.tsv, .csv, or .txt).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    #[clap(flatten)]
    pub criteria: Criteria,

    /// Taxonomic rank for the taxonomy breakdown.
    #[clap(long, value_enum, default_value_t = Rank::Phylum)]
    pub rank: Rank,

    /// Only summarize lengths of product classes with more than this many BGCs.
    #[clap(long, default_value_t = 0)]
    pub min_count: usize,
}

/// Print the aggregate views of the filtered table as markdown.
pub fn run(args: &Args) -> Result<(), Report> {
    let table = Table::read(&args.input, None)?;
    let filtered = filter::apply(&table, &args.criteria)?;
    info!("Summarizing {} of {} rows.", filtered.rows.len(), table.rows.len());

    println!("## Tool overlap\n\n{}", tool_overlap(&filtered)?.to_markdown());
    println!("## Product classes\n\n{}\n", product_classes(&filtered)?.iter().join(", "));
    println!("## Class counts per sample\n\n{}", class_counts(&filtered)?.to_markdown());
    println!(
        "## BGC length by class\n\n{}",
        class_lengths(&filtered, args.min_count)?.to_markdown()
    );

    // the taxonomy breakdown only applies when the lineage column is present
    match taxonomy_counts(&filtered, args.rank) {
        Ok(counts) => println!("## Taxonomy ({})\n\n{}", args.rank, counts.to_markdown()),
        Err(error) => warn!("Skipping the taxonomy breakdown: {error}"),
    }

    Ok(())
}
