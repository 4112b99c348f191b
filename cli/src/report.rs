use std::fmt::Write as _;

use digraph_core::{PathReport, VertexId};
use serde::Serialize;

/// Everything the driver prints for one run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub vertices: usize,
    pub edges: usize,
    pub reachability: Vec<ReachResult>,
    pub path_counts: Vec<CountResult>,
    pub best: Option<BestReport>,
    /// Why the best-path search was rejected, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReachResult {
    pub from: VertexId,
    pub to: VertexId,
    pub reachable: bool,
}

#[derive(Debug, Serialize)]
pub struct CountResult {
    pub from: VertexId,
    pub to: VertexId,
    pub paths: u64,
}

#[derive(Debug, Serialize)]
pub struct BestReport {
    pub source: VertexId,
    pub bound: usize,
    pub paths: Vec<PathReport>,
}

/// Render a path target-first, e.g. `3 <- 1 <- 0`.
pub fn path_text(path: &[VertexId]) -> String {
    path.iter()
        .rev()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" <- ")
}

impl Report {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} vertices, {} edges", self.vertices, self.edges);

        for r in &self.reachability {
            let answer = if r.reachable { "yes" } else { "no" };
            let _ = writeln!(out, "reachable {} -> {}: {}", r.from, r.to, answer);
        }
        for c in &self.path_counts {
            let _ = writeln!(out, "paths {} -> {}: {}", c.from, c.to, c.paths);
        }

        if let Some(best) = &self.best {
            let _ = writeln!(
                out,
                "maximum weight from vertex {} (bound {})",
                best.source, best.bound
            );
            if best.paths.is_empty() {
                let _ = writeln!(out, "  no other vertex is reachable");
            }
            for p in &best.paths {
                let _ = writeln!(
                    out,
                    "  vertex {}: weight {}, path {}",
                    p.target,
                    p.distance,
                    path_text(&p.path)
                );
            }
        }
        if let Some(error) = &self.best_error {
            let _ = writeln!(out, "best path unavailable: {error}");
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
