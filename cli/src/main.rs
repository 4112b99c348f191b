//! digraph command line driver
//!
//! Builds a weighted directed graph from a text weight matrix (or a saved
//! graph file), answers reachability and path-count queries, and reports the
//! maximum-weight path from a source vertex to every reachable vertex.

mod config;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use digraph_core::{
    best_path, count_simple_paths, is_reachable, persist, read_matrix_file, Graph, VertexId,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::report::{BestReport, CountResult, ReachResult, Report};

/// Weighted directed graph driver
#[derive(Parser, Debug)]
#[command(name = "digraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text weight matrix; row i, column j is the weight of edge i -> j
    #[arg(required_unless_present = "load")]
    pub matrix: Option<PathBuf>,

    /// Vertex the best-path search starts from
    #[arg(short, long, env = "DIGRAPH_SOURCE", allow_negative_numbers = true)]
    pub source: Option<i64>,

    /// Vertex bound for the best-path search (default: number of vertices)
    #[arg(short, long, allow_negative_numbers = true)]
    pub bound: Option<i64>,

    /// Largest bound the best-path search may use
    #[arg(long, env = "DIGRAPH_MAX_BOUND")]
    pub max_bound: Option<i64>,

    /// Write the built graph to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Read the graph from this file (after saving, when both are given)
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Ask whether TO is reachable from FROM (repeatable)
    #[arg(
        long,
        num_args = 2,
        value_names = ["FROM", "TO"],
        allow_negative_numbers = true
    )]
    pub reach: Vec<VertexId>,

    /// Count simple paths from FROM to TO (repeatable)
    #[arg(
        long,
        num_args = 2,
        value_names = ["FROM", "TO"],
        allow_negative_numbers = true
    )]
    pub count: Vec<VertexId>,

    /// Print every vertex and its outgoing edges
    #[arg(long)]
    pub show: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "DIGRAPH_FORMAT", default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("digraph=info,digraph_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.source, cli.bound, cli.max_bound, cli.format)?;
    let output = run(&cli, &settings)?;
    print!("{output}");
    Ok(())
}

fn build_from_matrix(path: &Path) -> Result<Graph> {
    let matrix = read_matrix_file(path)
        .with_context(|| format!("failed to read weight matrix {}", path.display()))?;
    let mut graph = Graph::new(matrix.vertex_count().max(1))?;
    graph
        .populate(&matrix.weights, matrix.rows, matrix.cols)
        .context("failed to build graph from weight matrix")?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    Ok(graph)
}

fn load_graph(path: &Path) -> Result<Graph> {
    let graph = persist::load(path)
        .with_context(|| format!("failed to load graph from {}", path.display()))?;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Execute the driver sequence and return the rendered output.
fn run(cli: &Cli, settings: &Settings) -> Result<String> {
    let mut out = String::new();

    let mut graph = match (&cli.matrix, &cli.load) {
        (Some(matrix), _) => build_from_matrix(matrix)?,
        (None, Some(load)) => load_graph(load)?,
        (None, None) => anyhow::bail!("either a weight matrix or --load is required"),
    };

    if cli.show {
        out.push_str(&graph.to_string());
    }

    if let Some(path) = &cli.save {
        persist::save(&graph, path)
            .with_context(|| format!("failed to save graph to {}", path.display()))?;
        info!(path = %path.display(), "graph saved");
    }

    // Reload only when the graph came from a matrix; otherwise it already did.
    if let (Some(_), Some(load)) = (&cli.matrix, &cli.load) {
        graph = load_graph(load)?;
    }

    let mut report = Report {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        ..Report::default()
    };

    for pair in cli.reach.chunks_exact(2) {
        let (from, to) = (pair[0], pair[1]);
        report.reachability.push(ReachResult {
            from,
            to,
            reachable: is_reachable(&graph, from, to),
        });
    }
    for pair in cli.count.chunks_exact(2) {
        let (from, to) = (pair[0], pair[1]);
        report.path_counts.push(CountResult {
            from,
            to,
            paths: count_simple_paths(&graph, from, to),
        });
    }

    let bound = settings.bound_for(graph.vertex_count());
    info!(source = settings.source, bound, "running best-path search");
    // A rejected search still leaves the query results worth printing.
    match best_path(&graph, bound, settings.source).and_then(|best| best.paths()) {
        Ok(paths) => {
            report.best = Some(BestReport {
                source: settings.source,
                bound,
                paths,
            });
        }
        Err(e) => {
            warn!(source = settings.source, bound, error = %e, "best-path search rejected");
            report.best_error = Some(e.to_string());
        }
    }

    match settings.format {
        OutputFormat::Text => out.push_str(&report.to_text()),
        OutputFormat::Json => {
            out.push_str(&report.to_json()?);
            out.push('\n');
        }
    }
    Ok(out)
}
