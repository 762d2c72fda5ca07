//! pathkit CLI - run A* over scenario files.
//!
//! - `pathkit find <scenario>` - search from start to goal and print the path
//! - `pathkit inspect <scenario>` - summarize the scenario graph

mod config;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use pathkit_core::{EdgeGraph, Graph, NodeId, NodeKey};
use pathkit_nav::{GraphPath, Pathfinder, SearchTrace};

use crate::config::{ScenarioConfig, ScenarioGraph};

#[derive(Parser)]
#[command(name = "pathkit")]
#[command(about = "Grid and navmesh pathfinding", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a path from the scenario's start to its goal
    Find {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Include every expanded node in the output
        #[arg(long)]
        trace: bool,
    },

    /// Summarize the scenario graph
    Inspect {
        /// Scenario YAML file
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Find {
            scenario,
            json,
            trace,
        } => find(&scenario, json, trace),
        Commands::Inspect { scenario } => inspect(&scenario),
    }
}

#[derive(Serialize)]
struct FindReport {
    found: bool,
    cost: f64,
    expanded: usize,
    path: Vec<NodeKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<TraceStep>>,
}

#[derive(Serialize)]
struct TraceStep {
    node: NodeKey,
    g: f64,
    f: f64,
}

impl FindReport {
    fn new(path: &GraphPath, expanded: usize, trace: Option<&SearchTrace>) -> Self {
        Self {
            found: !path.is_empty(),
            cost: path.cost,
            expanded,
            path: path.nodes.iter().map(|n| n.key()).collect(),
            trace: trace.map(|t| {
                t.visited
                    .iter()
                    .zip(&t.records)
                    .map(|(node, record)| TraceStep {
                        node: node.key(),
                        g: record.g,
                        f: record.f(),
                    })
                    .collect()
            }),
        }
    }
}

fn find(scenario: &Path, json: bool, trace: bool) -> Result<()> {
    let config = ScenarioConfig::load(scenario)?;
    let graph = config.build()?;
    let (start, goal) = config.endpoints(&graph)?;

    tracing::info!(
        scenario = %scenario.display(),
        start = %start,
        goal = %goal,
        heuristic = ?config.heuristic,
        "Finding path"
    );

    let mut finder = Pathfinder::new(&graph, config.heuristic);
    let observer = trace.then(SearchTrace::shared);
    if let Some(observer) = &observer {
        finder.register_observer(observer.clone());
    }
    let path = finder.find_path(&start, &goal);

    let recorded = observer.as_ref().map(|o| o.borrow());
    let report = FindReport::new(&path, finder.expanded(), recorded.as_deref());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(steps) = &report.trace {
        println!("Expanded:");
        for step in steps {
            println!("  {} g={} f={}", step.node, step.g, step.f);
        }
        println!();
    }

    if report.found {
        let hops: Vec<String> = report.path.iter().map(ToString::to_string).collect();
        println!("Path: {}", hops.join(" -> "));
        println!(
            "Cost: {} ({} nodes, {} expanded)",
            report.cost,
            report.path.len(),
            report.expanded
        );
    } else {
        println!("No path from {start} to {goal} ({} expanded)", report.expanded);
    }

    Ok(())
}

fn inspect(scenario: &Path) -> Result<()> {
    let config = ScenarioConfig::load(scenario)?;
    let graph = config.build()?;
    let traversable = graph.inner();
    let nav = traversable.inner();
    let regions = regions(&graph);

    println!("Scenario: {}", scenario.display());
    println!();
    println!("Graph: {}", nav.kind());
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {} ({} before blocking)", graph.edge_count(), nav.edge_count());
    println!("Blocked: {}", traversable.blocked_count());
    println!("Tolls: {}", graph.toll_count());
    if let Some(mesh) = nav.as_mesh() {
        println!("Triangles: {}", mesh.triangle_count());
        println!("Isolated vertices: {}", mesh.isolated_vertices().len());
    }
    println!();
    println!("Regions: {}", regions.len());
    for size in regions.iter().take(5) {
        println!("  - {size} nodes");
    }
    if regions.len() > 5 {
        println!("  ... and {} more", regions.len() - 5);
    }
    println!();
    println!("Heuristic: {:?}", config.heuristic);
    println!("Start: {}", config.start);
    println!("Goal: {}", config.goal);

    Ok(())
}

/// Sizes of the connected traversable regions, largest first.
fn regions(graph: &ScenarioGraph) -> Vec<usize> {
    let traversable = graph.inner();
    let count = graph.node_count();
    let mut seen = vec![false; count];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();
    let mut neighbors = Vec::new();

    for root in (0..count).map(NodeId::from) {
        let open = graph
            .node(root)
            .is_some_and(|n| traversable.is_traversable(n));
        if seen[root.index()] || !open {
            continue;
        }
        seen[root.index()] = true;
        queue.push_back(root);
        let mut size = 0;
        while let Some(id) = queue.pop_front() {
            size += 1;
            neighbors.clear();
            graph.neighbors_into(id, &mut neighbors);
            for &next in &neighbors {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        sizes.push(size);
    }

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}
