use crate::table::Table;
use crate::taxonomy::{self, Lineage, Rank};

use color_eyre::eyre::{Report, Result};

const FULL_LINEAGE: &str =
    "d_Bacteria;p_Firmicutes B;c_Bacilli;o_Bacillales;f_Bacillaceae;g_Bacillus;s_Bacillus subtilis";

fn lineage_table(values: &[&str]) -> Table {
    let mut table = Table::new();
    table.headers = vec!["sample_id".into(), "mmseqs_lineage_contig".into()];
    for (i, value) in values.iter().enumerate() {
        table.add_row(vec![format!("s{i}"), value.to_string()]).unwrap();
    }
    table
}

#[test]
fn parse_full_lineage() {
    let lineage = Lineage::parse(FULL_LINEAGE);
    assert_eq!(lineage.get(Rank::Kingdom), Some("Bacteria"));
    // the trailing polyphyly letter is cosmetic and stripped
    assert_eq!(lineage.get(Rank::Phylum), Some("Firmicutes"));
    assert_eq!(lineage.get(Rank::Class), Some("Bacilli"));
    assert_eq!(lineage.get(Rank::Order), Some("Bacillales"));
    assert_eq!(lineage.get(Rank::Family), Some("Bacillaceae"));
    assert_eq!(lineage.get(Rank::Genus), Some("Bacillus"));
    assert_eq!(lineage.get(Rank::Species), Some("Bacillus subtilis"));
    assert_eq!(lineage.epithet(), Some("subtilis"));
}

#[test]
fn short_lineage_leaves_lower_ranks_missing() {
    let lineage = Lineage::parse("d_Bacteria;p_Proteobacteria");
    assert_eq!(lineage.get(Rank::Phylum), Some("Proteobacteria"));
    assert_eq!(lineage.get(Rank::Class), None);
    assert_eq!(lineage.get(Rank::Species), None);
    assert_eq!(lineage.epithet(), None);
    assert!(!lineage.is_empty());
}

#[test]
fn missing_lineage_is_empty() {
    assert!(Lineage::parse("NaN").is_empty());
    assert!(Lineage::parse("").is_empty());
    assert!(Lineage::parse(";;;;;;").is_empty());
}

#[test]
fn unexpected_prefix_is_kept_verbatim() {
    // a field without its rank code still yields a label
    let lineage = Lineage::parse("Bacteria;p_Firmicutes");
    assert_eq!(lineage.get(Rank::Kingdom), Some("Bacteria"));
    assert_eq!(lineage.get(Rank::Phylum), Some("Firmicutes"));
}

#[test]
fn suffix_strip_skips_kingdom_and_real_words() {
    let lineage = Lineage::parse("d_Bacteria B;p_Firmicutes;c_Bacilli UBA10");
    // kingdom labels carry no polyphyly letters, leave them alone
    assert_eq!(lineage.get(Rank::Kingdom), Some("Bacteria B"));
    // " UBA10" is a real word, not a single-capital suffix
    assert_eq!(lineage.get(Rank::Class), Some("Bacilli UBA10"));
}

#[test]
fn epithet_keeps_everything_after_the_genus_word() {
    let lineage = Lineage::parse("d_B;p_P;c_C;o_O;f_F;g_Escherichia;s_Escherichia coli K12");
    // the species suffix check only strips a trailing single capital
    assert_eq!(lineage.get(Rank::Species), Some("Escherichia coli K12"));
    assert_eq!(lineage.epithet(), Some("coli K12"));
}

#[test]
fn append_columns_derives_eight_new_headers() -> Result<(), Report> {
    let table = lineage_table(&[FULL_LINEAGE, "NaN", "d_Bacteria;p_Actinobacteriota"]);
    let derived = taxonomy::append_columns(&table)?;

    assert_eq!(derived.headers.len(), table.headers.len() + 8);
    assert_eq!(derived.rows.len(), table.rows.len());

    assert_eq!(derived.get("phylum", 0)?, "Firmicutes");
    assert_eq!(derived.get("species_epithet", 0)?, "subtilis");
    assert_eq!(derived.get("kingdom", 1)?, "");
    assert_eq!(derived.get("phylum", 2)?, "Actinobacteriota");
    assert_eq!(derived.get("class", 2)?, "");

    // the input table is untouched
    assert_eq!(table.headers.len(), 2);
    Ok(())
}

#[test]
fn append_columns_needs_the_lineage_column() {
    let mut table = Table::new();
    table.headers = vec!["sample_id".into()];
    table.add_row(vec!["s1".into()]).unwrap();
    assert!(taxonomy::append_columns(&table).is_err());
}

#[test]
fn require_lineages_rejects_an_all_missing_column() {
    let table = lineage_table(&["NaN", "", "NA"]);
    assert!(taxonomy::require_lineages(&table).is_err());
}

#[test]
fn require_lineages_accepts_partial_data() -> Result<(), Report> {
    let table = lineage_table(&["NaN", FULL_LINEAGE]);
    let lineages = taxonomy::require_lineages(&table)?;
    assert_eq!(lineages.len(), 2);
    assert!(lineages[0].is_empty());
    assert_eq!(lineages[1].get(Rank::Genus), Some("Bacillus"));
    Ok(())
}

#[test]
fn require_lineages_on_an_empty_table() -> Result<(), Report> {
    let table = lineage_table(&[]);
    assert!(taxonomy::require_lineages(&table)?.is_empty());
    Ok(())
}
