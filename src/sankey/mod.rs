//! Build Sankey node/link data from the taxonomic lineage column.


use crate::filter::{self, Criteria};
use crate::table::Table;
use crate::taxonomy::{self, Lineage, Rank};
use crate::utils;
use crate::utils::color::Rgba;
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use log::{debug, info};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::{EdgeRef, IntoNodeReferences};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Opacity of node colors.
pub const NODE_ALPHA: f32 = 0.8;
/// Opacity of link colors, derived from the source node's color.
pub const LINK_ALPHA: f32 = 0.2;

/// The six adjacent rank pairs that become the diagram levels. The species
/// side of the last pair uses the epithet, so the genus is not repeated.
const RANK_PAIRS: [(Rank, Rank); 6] = [
    (Rank::Kingdom, Rank::Phylum),
    (Rank::Phylum, Rank::Class),
    (Rank::Class, Rank::Order),
    (Rank::Order, Rank::Family),
    (Rank::Family, Rank::Genus),
    (Rank::Genus, Rank::Species),
];

/// The node label a lineage contributes at a rank. The species level uses
/// the epithet so the genus word is not repeated across two levels.
fn rank_label(lineage: &Lineage, rank: Rank) -> Option<&str> {
    match rank {
        Rank::Species => lineage.epithet(),
        _ => lineage.get(rank),
    }
}

// ----------------------------------------------------------------------------
// Sankey

/// A labelled, colored node of the flow graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub label: String,
    pub color: Rgba,
}

/// The taxonomic flow graph behind the Sankey view.
///
/// Nodes are unique cleaned labels; edges carry the number of rows with
/// that parent-to-child transition at adjacent ranks. Node ids come from
/// the insertion order of the graph, so they are dense and stable.
#[derive(Clone, Debug, Default)]
pub struct Sankey {
    pub graph: Graph<Node, usize>,
}

impl Sankey {
    /// Build the flow graph from parsed lineages.
    ///
    /// Rows missing one side of a rank pair contribute no link at that
    /// level (the present side still becomes a node); rows with an
    /// entirely missing lineage contribute nothing at all.
    pub fn from_lineages(lineages: &[Lineage]) -> Self {
        let mut graph: Graph<Node, usize> = Graph::new();
        let mut interned: HashMap<String, NodeIndex> = HashMap::new();

        // placeholder color, every node is recolored once the count is known
        let mut intern = |graph: &mut Graph<Node, usize>, label: &str| {
            *interned.entry(label.to_string()).or_insert_with(|| {
                graph.add_node(Node { label: label.to_string(), color: Rgba::new(0, 0, 0, 0.0) })
            })
        };

        let lineages = lineages.iter().filter(|l| !l.is_empty()).collect::<Vec<_>>();

        for (parent, child) in RANK_PAIRS {
            // count each (parent, child) transition in first-occurrence order
            let pairs = utils::count_first_seen(
                lineages.iter().map(|l| (rank_label(l, parent), rank_label(l, child))),
            );

            // mint nodes: parent labels first, then child labels
            for label in pairs.iter().filter_map(|&((parent, _), _)| parent) {
                intern(&mut graph, label);
            }
            for label in pairs.iter().filter_map(|&((_, child), _)| child) {
                intern(&mut graph, label);
            }

            // link the pairs where both sides are present
            for &((parent, child), count) in &pairs {
                if let (Some(parent), Some(child)) = (parent, child) {
                    let source = intern(&mut graph, parent);
                    let target = intern(&mut graph, child);
                    graph.add_edge(source, target, count);
                }
            }
        }

        // spread the nodes around the hue wheel, fully saturated
        let node_count = graph.node_count();
        for (i, node) in graph.node_weights_mut().enumerate() {
            node.color = Rgba::from_hsv(i as f64 / node_count as f64, 1.0, 1.0, NODE_ALPHA);
        }

        debug!("Sankey graph: {} nodes, {} links.", node_count, graph.edge_count());
        Sankey { graph }
    }

    /// Recolor the node carrying this label, e.g. to make one lineage
    /// stand out. Link colors are derived afterwards, so the node's
    /// outgoing links pick up the new color.
    pub fn recolor(&mut self, label: &str, color: Rgba) -> Result<(), Report> {
        let node = self
            .graph
            .node_weights_mut()
            .find(|node| node.label == label)
            .ok_or_else(|| eyre!("Label '{label}' is not a node of the Sankey graph."))?;
        node.color = color;
        Ok(())
    }

    /// Flatten the graph into renderable node and link lists.
    pub fn to_data(&self) -> SankeyData {
        let nodes = self
            .graph
            .node_references()
            .map(|(i, node)| SankeyNode {
                label: node.label.clone(),
                color: node.color,
                id: i.index(),
            })
            .collect();

        let links = self
            .graph
            .edge_references()
            .map(|edge| SankeyLink {
                source: edge.source().index(),
                target: edge.target().index(),
                value: *edge.weight(),
                color: self.graph[edge.source()].color.with_alpha(LINK_ALPHA),
            })
            .collect();

        SankeyData { nodes, links }
    }
}

// ----------------------------------------------------------------------------
// Payload

/// Node and link lists consumable by any Sankey renderer.
#[derive(Clone, Debug, Serialize)]
pub struct SankeyData {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SankeyNode {
    pub label: String,
    pub color: Rgba,
    pub id: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
    pub color: Rgba,
}

impl SankeyData {
    /// Parse to pretty JSON.
    pub fn to_json(&self) -> Result<String, Report> {
        serde_json::to_string_pretty(self).wrap_err("Failed to parse Sankey data.")
    }

    /// Write the payload as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<(), Report> {
        let mut file =
            File::create(path).wrap_err_with(|| format!("Failed to create file: {path:?}"))?;
        file.write_all(format!("{}\n", self.to_json()?).as_bytes())
            .wrap_err_with(|| format!("Failed to write file: {path:?}"))?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Command

/// Arguments for the sankey command.
#[derive(Debug, Parser)]
pub struct Args {
    /// Input table (.tsv, .csv, or .txt).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    #[clap(flatten)]
    pub criteria: Criteria,

    /// Recolor this node to magenta so one lineage stands out.
    #[clap(long)]
    pub highlight: Option<String>,

    /// Output path for the JSON payload; prints to stdout when omitted.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Filter the input table and emit the Sankey payload.
pub fn run(args: &Args) -> Result<SankeyData, Report> {
    let table = Table::read(&args.input, None)?;
    let filtered = filter::apply(&table, &args.criteria)?;

    // absent or entirely empty lineages are a hard failure, not a blank plot
    let lineages = taxonomy::require_lineages(&filtered)?;
    let mut sankey = Sankey::from_lineages(&lineages);

    if let Some(label) = &args.highlight {
        sankey.recolor(label, Rgba::from_name("magenta")?.with_alpha(NODE_ALPHA))?;
    }

    let data = sankey.to_data();
    info!("Sankey data: {} nodes, {} links.", data.nodes.len(), data.links.len());

    match &args.output {
        Some(path) => data.write(path)?,
        None => println!("{}", data.to_json()?),
    }

    Ok(data)
}
