//! Parse and clean GTDB taxonomic lineage strings.

#[cfg(test)]
mod tests;

use crate::record;
use crate::table::Table;
use clap::ValueEnum;
use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;
use log::warn;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

// ----------------------------------------------------------------------------
// Rank

/// The seven ranks of a GTDB lineage string, in order.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// The one-letter rank code prefixing each lineage field (ex. `d_` for kingdom).
    pub fn prefix(&self) -> &'static str {
        match self {
            Rank::Kingdom => "d_",
            Rank::Phylum => "p_",
            Rank::Class => "c_",
            Rank::Order => "o_",
            Rank::Family => "f_",
            Rank::Genus => "g_",
            Rank::Species => "s_",
        }
    }

    /// Name of the derived table column for this rank.
    pub fn column(&self) -> &'static str {
        match self {
            Rank::Kingdom => "kingdom",
            Rank::Phylum => "phylum",
            Rank::Class => "class",
            Rank::Order => "order",
            Rank::Family => "family",
            Rank::Genus => "genus",
            Rank::Species => "species",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Name of the derived column holding the species name without its genus.
pub const SPECIES_EPITHET: &str = "species_epithet";

// ----------------------------------------------------------------------------
// Lineage

/// One parsed lineage: a cleaned label per rank, plus the species epithet.
///
/// Parsing never fails. Fields that are absent, empty, or unparseable are
/// carried as `None` so a malformed row degrades instead of aborting a batch.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Lineage {
    labels: [Option<String>; 7],
    epithet: Option<String>,
}

impl Lineage {
    /// Parse a semicolon-delimited, rank-prefixed lineage string.
    ///
    /// # Examples
    ///
    /// ```
    /// use combgc::taxonomy::{Lineage, Rank};
    ///
    /// let lineage = Lineage::parse("d_Bacteria;p_Firmicutes B;c_Bacilli");
    /// assert_eq!(lineage.get(Rank::Kingdom), Some("Bacteria"));
    /// assert_eq!(lineage.get(Rank::Phylum), Some("Firmicutes"));
    /// assert_eq!(lineage.get(Rank::Order), None);
    /// ```
    pub fn parse(value: &str) -> Self {
        if record::is_missing(value) {
            return Lineage::default();
        }

        let fields: Vec<&str> = value.split(';').collect();
        let mut lineage = Lineage::default();
        for (i, rank) in Rank::iter().enumerate() {
            lineage.labels[i] = fields.get(i).and_then(|field| clean_label(rank, field));
        }

        // keep only what follows the genus word of the species binomial
        lineage.epithet = lineage
            .get(Rank::Species)
            .and_then(|species| species.split_once(' '))
            .map(|(_genus, epithet)| epithet.to_string());

        lineage
    }

    /// The cleaned label at a rank, if the field was present and parseable.
    pub fn get(&self, rank: Rank) -> Option<&str> {
        self.labels[rank as usize].as_deref()
    }

    /// The species name without its leading genus word.
    pub fn epithet(&self) -> Option<&str> {
        self.epithet.as_deref()
    }

    /// True when no rank holds a label.
    pub fn is_empty(&self) -> bool {
        self.labels.iter().all(|label| label.is_none())
    }
}

/// Clean one lineage field into a display label.
///
/// Strips the rank prefix, then (below kingdom) a trailing single-capital
/// GTDB polyphyly suffix such as the " B" of "Firmicutes B".
fn clean_label(rank: Rank, field: &str) -> Option<String> {
    let field = field.trim();
    if record::is_missing(field) {
        return None;
    }

    // an unexpected prefix is left in place rather than dropping the field
    let label = field.strip_prefix(rank.prefix()).unwrap_or(field);
    let label = match rank {
        Rank::Kingdom => label,
        _ => strip_polyphyly_suffix(label),
    };

    (!label.is_empty()).then(|| label.to_string())
}

/// Drop a trailing " X" (space + single capital letter) from a label.
fn strip_polyphyly_suffix(label: &str) -> &str {
    match label.as_bytes() {
        [.., b' ', c] if c.is_ascii_uppercase() => &label[..label.len() - 2],
        _ => label,
    }
}

// ----------------------------------------------------------------------------
// Derived columns

/// Append the cleaned rank columns (and the species epithet) to a working
/// copy of the table, for reuse by the aggregate views.
///
/// Missing ranks are appended as empty cells.
pub fn append_columns(table: &Table) -> Result<Table, Report> {
    let lineage_i = table.get_header_index(record::LINEAGE)?;
    let lineages =
        table.rows.iter().map(|row| Lineage::parse(&row[lineage_i])).collect::<Vec<_>>();

    let mut table = table.clone();
    for rank in Rank::iter() {
        let column = lineages
            .iter()
            .map(|l| l.get(rank).unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        table.add_column(rank.column(), column)?;
    }
    let epithets = lineages
        .iter()
        .map(|l| l.epithet().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    table.add_column(SPECIES_EPITHET, epithets)?;

    Ok(table)
}

/// Parse the lineage column of every row, insisting that the column exists
/// and holds at least one value.
///
/// An absent or entirely empty column is a hard failure; individual missing
/// or malformed cells degrade to empty lineages.
pub fn require_lineages(table: &Table) -> Result<Vec<Lineage>, Report> {
    let lineage_i = table.get_header_index(record::LINEAGE).suggestion(
        "The Sankey view needs the MMseqs2 contig lineage column from the upstream pipeline.",
    )?;

    if table.is_empty() {
        warn!("No rows to build a Sankey diagram from.");
        return Ok(Vec::new());
    }

    let lineages =
        table.rows.iter().map(|row| Lineage::parse(&row[lineage_i])).collect::<Vec<_>>();

    if lineages.iter().all(|l| l.is_empty()) {
        return Err(eyre!("No values found in column '{}'.", record::LINEAGE)
            .suggestion("Was taxonomic classification enabled in the upstream pipeline?"));
    }

    Ok(lineages)
}
