//! Column model for one predicted BGC in the combined table.


use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

// ----------------------------------------------------------------------------
// Columns

/// Column holding the sample identifier.
pub const SAMPLE_ID: &str = "sample_id";
/// Column holding the comma-separated product class annotation.
pub const PRODUCT_CLASS: &str = "Product_class";
/// Column holding the predicted cluster length in bp.
pub const BGC_LENGTH: &str = "BGC_length";
/// Column holding the contig's GTDB lineage assigned by MMseqs2.
pub const LINEAGE: &str = "mmseqs_lineage_contig";

// ----------------------------------------------------------------------------
// Prediction Tool

/// A BGC prediction tool contributing to the combined table.
///
/// Each tool has its own column, holding "Yes" for the rows it flagged.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize, ValueEnum)]
pub enum Tool {
    #[serde(rename = "deepbgc")]
    #[value(name = "deepbgc", alias = "deepBGC")]
    DeepBgc,
    #[serde(rename = "gecco")]
    #[value(name = "gecco", alias = "GECCO")]
    Gecco,
    #[serde(rename = "antismash")]
    #[value(name = "antismash", alias = "antiSMASH")]
    AntiSmash,
}

impl Tool {
    /// Name of the table column where this tool flags its predictions.
    pub fn column(&self) -> &'static str {
        match self {
            Tool::DeepBgc => "deepBGC",
            Tool::Gecco => "GECCO",
            Tool::AntiSmash => "antiSMASH",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ----------------------------------------------------------------------------
// Cell parsing

/// True if the cell holds no value.
///
/// The upstream tables are pandas serializations, so absent values arrive
/// as empty cells or literal NA/NaN markers.
pub fn is_missing(value: &str) -> bool {
    matches!(value.trim(), "" | "NA" | "NaN" | "nan")
}

/// True if a tool column flags this row as a predicted BGC.
pub fn is_flagged(value: &str) -> bool {
    value.trim() == "Yes"
}

/// Split a product class annotation into its categories.
pub fn product_classes(value: &str) -> Vec<&str> {
    if is_missing(value) {
        return Vec::new();
    }
    value.trim().split(", ").collect()
}

/// Parse the BGC length, `None` when missing or non-numeric.
pub fn length(value: &str) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    value.trim().parse().ok()
}

/// Truncate a sample identifier to its sample name.
///
/// Identifiers carry run and contig suffixes after `-` and `_`.
pub fn sample_name(value: &str) -> &str {
    let value = value.split('-').next().unwrap_or(value);
    value.split('_').next().unwrap_or(value)
}
