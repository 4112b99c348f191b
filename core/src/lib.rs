//! digraph-core: in-memory weighted directed graph.
//!
//! A pure Rust library holding an ordered vertex store with per-vertex
//! adjacency lists. Provides depth-first reachability, simple-path counting,
//! a maximizing label-correcting best-path search and a compact binary file
//! format. Usable on its own; the `digraph` binary and the benchmark
//! harness are thin drivers over this crate.

mod adjacency;
mod error;
mod graph;
pub mod matrix;
pub mod persist;
mod traversal;
mod vertex;

pub use adjacency::{AdjacencyList, Edge, VertexId, Weight};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use matrix::{read_matrix, read_matrix_file, WeightMatrix};
pub use traversal::{
    best_path, count_paths, count_simple_paths, depth_first_search, is_reachable,
    reconstruct_path, BestPath, PathReport, VisitedSet, MAX_VERTEX_BOUND,
};
pub use vertex::{Vertex, VertexStore};
