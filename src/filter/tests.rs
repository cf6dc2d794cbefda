use crate::filter::{self, Criteria};
use crate::record::Tool;
use crate::table::Table;

use color_eyre::eyre::{Report, Result};

/// A small combined prediction table covering the interesting agreement cases.
fn example_table() -> Table {
    let mut table = Table::new();
    table.headers = ["sample_id", "deepBGC", "GECCO", "antiSMASH", "Product_class", "BGC_length"]
        .into_iter()
        .map(String::from)
        .collect();

    let rows = [
        // all three tools agree
        ["s1", "Yes", "Yes", "Yes", "NRP", "4000"],
        // deepBGC and antiSMASH only, two classes
        ["s2", "Yes", "NaN", "Yes", "NRP, Polyketide", "5000"],
        // GECCO only
        ["s3", "NaN", "Yes", "NaN", "Terpene", "12000"],
        // no class annotation
        ["s4", "Yes", "NaN", "NaN", "NaN", "3000"],
        // no usable length
        ["s5", "NaN", "NaN", "Yes", "RiPP", "NaN"],
    ];
    for row in rows {
        table.add_row(row.into_iter().map(String::from).collect()).unwrap();
    }
    table
}

fn kept_samples(table: &Table) -> Vec<&str> {
    table.rows.iter().map(|row| row[0].as_str()).collect()
}

#[test]
fn defaults_keep_any_flagged_row_with_a_length() -> Result<(), Report> {
    let observed = filter::apply(&example_table(), &Criteria::default())?;
    // s5 has no usable length
    assert_eq!(kept_samples(&observed), vec!["s1", "s2", "s3", "s4"]);
    Ok(())
}

#[test]
fn output_is_an_ordered_subset() -> Result<(), Report> {
    let table = example_table();
    let observed = filter::apply(&table, &Criteria::default())?;

    assert_eq!(observed.headers, table.headers);
    assert!(observed.rows.len() <= table.rows.len());
    // every output row appears in the input, in the same relative order
    let mut last = 0;
    for row in &observed.rows {
        let position = table.rows.iter().skip(last).position(|r| r == row);
        assert!(position.is_some());
        last += position.unwrap() + 1;
    }
    Ok(())
}

#[test]
fn tool_selection_is_an_or_over_enabled_tools() -> Result<(), Report> {
    let criteria = Criteria { tools: Some(vec![Tool::Gecco]), ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert_eq!(kept_samples(&observed), vec!["s1", "s3"]);
    Ok(())
}

#[test]
fn no_tools_enabled_keeps_nothing() -> Result<(), Report> {
    let criteria = Criteria { tools: Some(Vec::new()), ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert!(observed.is_empty());
    Ok(())
}

#[test]
fn intersection_overrides_tool_selection() -> Result<(), Report> {
    // the individual selection would exclude s1, intersection ignores it
    let criteria = Criteria {
        tools: Some(vec![Tool::Gecco]),
        intersection: true,
        ..Criteria::default()
    };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert_eq!(kept_samples(&observed), vec!["s1"]);

    // every kept row is flagged by all three tools
    for tool in [Tool::DeepBgc, Tool::Gecco, Tool::AntiSmash] {
        assert_eq!(observed.get(tool.column(), 0)?, "Yes");
    }
    Ok(())
}

#[test]
fn class_filter_matches_any_listed_class() -> Result<(), Report> {
    let criteria = Criteria { classes: Some(vec!["NRP".to_string()]), ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    // s2 matches on the first of its two classes; s4 has none and drops out
    assert_eq!(kept_samples(&observed), vec!["s1", "s2"]);
    Ok(())
}

#[test]
fn class_mismatch_drops_the_row() -> Result<(), Report> {
    let criteria = Criteria { classes: Some(vec!["Terpene".to_string()]), ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert_eq!(kept_samples(&observed), vec!["s3"]);
    Ok(())
}

#[test]
fn classes_inactive_keeps_rows() -> Result<(), Report> {
    // None means the class filter is off, unclassified rows survive
    let criteria = Criteria { classes: None, ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert!(kept_samples(&observed).contains(&"s4"));
    Ok(())
}

#[test]
fn classes_empty_selection_drops_all() -> Result<(), Report> {
    // an empty selection allows nothing
    let criteria = Criteria { classes: Some(Vec::new()), ..Criteria::default() };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert!(observed.is_empty());
    Ok(())
}

#[test]
fn length_bounds_are_inclusive() -> Result<(), Report> {
    let criteria = Criteria {
        min_length: 4000.0,
        max_length: Some(5000.0),
        ..Criteria::default()
    };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert_eq!(kept_samples(&observed), vec!["s1", "s2"]);
    Ok(())
}

#[test]
fn spec_example_row() -> Result<(), Report> {
    // deepBGC + antiSMASH, classes "NRP, Polyketide", length 5000
    let criteria = Criteria {
        classes: Some(vec!["NRP".to_string()]),
        min_length: 0.0,
        max_length: Some(10000.0),
        ..Criteria::default()
    };
    let observed = filter::apply(&example_table(), &criteria)?;
    assert!(kept_samples(&observed).contains(&"s2"));

    // the same row misses an allowed set without overlap
    let criteria = Criteria { classes: Some(vec!["Terpene".to_string()]), ..criteria };
    let observed = filter::apply(&observed, &criteria)?;
    assert!(!kept_samples(&observed).contains(&"s2"));
    Ok(())
}

#[test]
fn filtering_is_idempotent() -> Result<(), Report> {
    let criteria = Criteria {
        tools: Some(vec![Tool::DeepBgc, Tool::AntiSmash]),
        classes: Some(vec!["NRP".to_string(), "RiPP".to_string()]),
        max_length: Some(10000.0),
        ..Criteria::default()
    };
    let once = filter::apply(&example_table(), &criteria)?;
    let twice = filter::apply(&once, &criteria)?;
    assert_eq!(once.rows, twice.rows);
    Ok(())
}

#[test]
fn missing_filter_column_is_an_error() {
    let mut table = example_table();
    table.headers[4] = "classes".to_string();
    assert!(filter::apply(&table, &Criteria::default()).is_err());
}

#[test]
fn empty_input_gives_an_empty_result() -> Result<(), Report> {
    let mut table = example_table();
    table.rows.clear();
    let observed = filter::apply(&table, &Criteria::default())?;
    assert!(observed.is_empty());
    Ok(())
}
