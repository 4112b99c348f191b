use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::adjacency::{VertexId, Weight};
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Largest `vertex_bound` accepted by [`best_path`]. The dense cost matrix
/// grows with the square of the bound.
pub const MAX_VERTEX_BOUND: usize = 100;

/// Vertices marked during one traversal run.
///
/// The depth-first algorithms refuse to start on a set that still holds
/// marks from an earlier run; call [`reset`](Self::reset) between runs.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    marked: HashSet<VertexId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            marked: HashSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            marked: HashSet::with_capacity(capacity),
        }
    }

    pub fn mark(&mut self, id: VertexId) {
        self.marked.insert(id);
    }

    pub fn unmark(&mut self, id: VertexId) {
        self.marked.remove(&id);
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.marked.contains(&id)
    }

    pub fn is_clean(&self) -> bool {
        self.marked.is_empty()
    }

    /// Clear every mark.
    pub fn reset(&mut self) {
        self.marked.clear();
    }
}

fn require_clean(visited: &VisitedSet) -> GraphResult<()> {
    if visited.is_clean() {
        Ok(())
    } else {
        Err(GraphError::StaleVisitedSet)
    }
}

/// Depth-first reachability from `from` to `to`, ignoring weights.
///
/// `from == to` is reachable even when the vertex is absent. An absent
/// origin is otherwise unreachable. Marks are left in `visited` after the
/// call, so the set must be reset before it is used again.
pub fn depth_first_search(
    graph: &Graph,
    visited: &mut VisitedSet,
    from: VertexId,
    to: VertexId,
) -> GraphResult<bool> {
    require_clean(visited)?;
    Ok(dfs(graph, visited, from, to))
}

fn dfs(graph: &Graph, visited: &mut VisitedSet, from: VertexId, to: VertexId) -> bool {
    if from == to {
        return true;
    }
    let Some(vertex) = graph.find_vertex(from) else {
        return false;
    };

    visited.mark(from);
    for edge in vertex.edges() {
        if graph.exists(edge.target)
            && !visited.contains(edge.target)
            && dfs(graph, visited, edge.target, to)
        {
            return true;
        }
    }
    false
}

/// [`depth_first_search`] with a fresh visited set.
pub fn is_reachable(graph: &Graph, from: VertexId, to: VertexId) -> bool {
    let mut visited = VisitedSet::with_capacity(graph.vertex_count());
    dfs(graph, &mut visited, from, to)
}

/// Count the simple paths (no repeated vertex) from `from` to `to`.
///
/// Each vertex is marked on entry and unmarked before returning, so sibling
/// branches explore disjoint paths and `visited` is clean again afterwards.
/// Parallel edges count as distinct paths.
pub fn count_paths(
    graph: &Graph,
    visited: &mut VisitedSet,
    from: VertexId,
    to: VertexId,
) -> GraphResult<u64> {
    require_clean(visited)?;
    Ok(count_from(graph, visited, from, to, 0))
}

fn count_from(
    graph: &Graph,
    visited: &mut VisitedSet,
    from: VertexId,
    to: VertexId,
    mut count: u64,
) -> u64 {
    if from == to {
        return count + 1;
    }
    let Some(vertex) = graph.find_vertex(from) else {
        return count;
    };

    visited.mark(from);
    for edge in vertex.edges() {
        if graph.exists(edge.target) && !visited.contains(edge.target) {
            count = count_from(graph, visited, edge.target, to, count);
        }
    }
    visited.unmark(from);
    count
}

/// [`count_paths`] with a fresh visited set.
pub fn count_simple_paths(graph: &Graph, from: VertexId, to: VertexId) -> u64 {
    let mut visited = VisitedSet::with_capacity(graph.vertex_count());
    count_from(graph, &mut visited, from, to, 0)
}

/// Labels produced by [`best_path`] for every vertex in `0..bound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestPath {
    pub source: VertexId,
    /// `predecessor[i]` is the vertex settled just before `i` on its best path.
    pub predecessor: Vec<VertexId>,
    /// Maximum path weight from `source`; `None` when no path was found.
    pub distance: Vec<Option<i64>>,
}

/// One target in a best-path report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub target: VertexId,
    pub distance: i64,
    /// Vertices from the source to `target`, both included.
    pub path: Vec<VertexId>,
}

impl BestPath {
    pub fn bound(&self) -> usize {
        self.distance.len()
    }

    pub fn distance_to(&self, target: VertexId) -> Option<i64> {
        usize::try_from(target)
            .ok()
            .and_then(|i| self.distance.get(i).copied().flatten())
    }

    pub fn predecessor_of(&self, target: VertexId) -> Option<VertexId> {
        usize::try_from(target)
            .ok()
            .and_then(|i| self.predecessor.get(i).copied())
    }

    /// Every reachable target other than the source, with its path.
    pub fn paths(&self) -> GraphResult<Vec<PathReport>> {
        let mut reports = Vec::new();
        for (i, distance) in self.distance.iter().enumerate() {
            let target = index_to_id(i)?;
            let Some(distance) = *distance else { continue };
            if target == self.source {
                continue;
            }
            reports.push(PathReport {
                target,
                distance,
                path: reconstruct_path(self, target)?,
            });
        }
        Ok(reports)
    }
}

fn index_to_id(index: usize) -> GraphResult<VertexId> {
    VertexId::try_from(index)
        .map_err(|_| GraphError::InvalidArgument(format!("index {index} overflows i32")))
}

fn id_to_index(id: VertexId, bound: usize) -> GraphResult<usize> {
    usize::try_from(id)
        .ok()
        .filter(|&i| i < bound)
        .ok_or(GraphError::VertexOutOfRange { id, bound })
}

/// Dense `bound x bound` cost matrix; `None` marks a missing edge. When
/// parallel edges exist the last one in list order wins.
fn cost_matrix(graph: &Graph, bound: usize) -> GraphResult<Vec<Option<Weight>>> {
    let mut cost = vec![None; bound * bound];
    for (origin, target, weight) in graph.edges() {
        let row = id_to_index(origin, bound)?;
        let col = id_to_index(target, bound)?;
        cost[row * bound + col] = Some(weight);
    }
    Ok(cost)
}

/// Label-correcting search for the **maximum**-weight path from `source` to
/// every vertex in `0..vertex_bound`.
///
/// Structured like Dijkstra's algorithm with the comparison inverted: each
/// round settles the unsettled vertex with the largest known distance and
/// raises its neighbours' labels. It runs `vertex_bound - 2` rounds and
/// stops early once no unsettled vertex has a known distance. Results are
/// only meaningful on graphs without positive cycles.
pub fn best_path(graph: &Graph, vertex_bound: usize, source: VertexId) -> GraphResult<BestPath> {
    if vertex_bound > MAX_VERTEX_BOUND {
        return Err(GraphError::BoundTooLarge {
            bound: vertex_bound,
            max: MAX_VERTEX_BOUND,
        });
    }
    if vertex_bound == 0 {
        return Err(GraphError::InvalidArgument(
            "vertex bound must be at least 1".to_string(),
        ));
    }
    let n = vertex_bound;
    let src = id_to_index(source, n).map_err(|_| {
        GraphError::InvalidArgument(format!("source {source} is outside the bound 0..{n}"))
    })?;

    let cost = cost_matrix(graph, n)?;

    let mut distance: Vec<Option<i64>> = cost[src * n..(src + 1) * n]
        .iter()
        .map(|w| w.map(i64::from))
        .collect();
    let mut predecessor = vec![source; n];
    let mut settled = vec![false; n];

    distance[src] = Some(0);
    settled[src] = true;
    let mut count = 1;

    while count + 1 < n {
        // Strict comparison: ties go to the lowest index.
        let mut best: Option<(usize, i64)> = None;
        for (i, d) in distance.iter().enumerate() {
            if settled[i] {
                continue;
            }
            if let Some(d) = *d {
                if best.map_or(true, |(_, top)| d > top) {
                    best = Some((i, d));
                }
            }
        }
        let Some((next, top)) = best else {
            break;
        };

        settled[next] = true;
        trace!(vertex = next, distance = top, "settled");

        let next_id = index_to_id(next)?;
        for i in 0..n {
            if settled[i] {
                continue;
            }
            if let Some(w) = cost[next * n + i] {
                let candidate = top + i64::from(w);
                if distance[i].map_or(true, |d| candidate > d) {
                    distance[i] = Some(candidate);
                    predecessor[i] = next_id;
                }
            }
        }
        count += 1;
    }

    Ok(BestPath {
        source,
        predecessor,
        distance,
    })
}

/// Walk the predecessor chain from `target` back to the source.
///
/// Returns the path in source-to-target order. Fails instead of looping when
/// the target is unreachable or the chain never returns to the source.
pub fn reconstruct_path(best: &BestPath, target: VertexId) -> GraphResult<Vec<VertexId>> {
    let n = best.bound();
    let at = id_to_index(target, n)?;
    if target == best.source {
        return Ok(vec![target]);
    }
    if best.distance[at].is_none() {
        return Err(GraphError::Unreachable(target));
    }

    let mut path = vec![target];
    let mut current = target;
    while current != best.source {
        if path.len() > n {
            return Err(GraphError::BrokenPredecessorChain(target));
        }
        let at = id_to_index(current, n).map_err(|_| GraphError::BrokenPredecessorChain(target))?;
        current = *best
            .predecessor
            .get(at)
            .ok_or(GraphError::BrokenPredecessorChain(target))?;
        path.push(current);
    }

    path.reverse();
    Ok(path)
}
