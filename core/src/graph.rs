use std::fmt;

use tracing::debug;

use crate::adjacency::{Edge, VertexId, Weight};
use crate::error::{GraphError, GraphResult};
use crate::vertex::{Vertex, VertexStore};

/// A directed, weighted graph over caller-assigned integer ids.
///
/// Vertices are kept in ascending id order. `declared_capacity` is the size
/// stated at construction. It is advisory only: nothing is allocated from it
/// and it does not limit insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    store: VertexStore,
    declared_capacity: usize,
}

impl Graph {
    /// Create an empty graph. Fails when `capacity` is zero.
    pub fn new(capacity: usize) -> GraphResult<Self> {
        if capacity == 0 {
            return Err(GraphError::InvalidCapacity(capacity));
        }
        Ok(Self {
            store: VertexStore::new(),
            declared_capacity: capacity,
        })
    }

    /// Insert a vertex, keeping the sequence ordered by id.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> GraphResult<()> {
        let id = vertex.id();
        self.store.insert(vertex).inspect_err(|e| {
            debug!(vertex = id, error = %e, "vertex insert rejected");
        })
    }

    /// Shorthand for inserting an empty vertex with `id`.
    pub fn add_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        self.insert_vertex(Vertex::new(id))
    }

    fn check_endpoints(&self, origin: VertexId, dest: VertexId) -> GraphResult<()> {
        if self.store.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        if !self.store.contains(origin) {
            return Err(GraphError::VertexNotFound(origin));
        }
        if !self.store.contains(dest) {
            return Err(GraphError::VertexNotFound(dest));
        }
        Ok(())
    }

    /// Add a directed edge `origin -> dest`.
    ///
    /// Both endpoints must exist. A zero weight means "no edge": the request
    /// succeeds without storing anything.
    pub fn insert_edge(&mut self, origin: VertexId, dest: VertexId, weight: Weight) -> GraphResult<()> {
        self.check_endpoints(origin, dest)?;
        if let Some(vertex) = self.store.find_mut(origin) {
            vertex.edges_mut().insert(dest, weight);
        }
        Ok(())
    }

    /// Remove the first edge `origin -> dest`.
    pub fn delete_edge(&mut self, origin: VertexId, dest: VertexId) -> GraphResult<()> {
        self.check_endpoints(origin, dest)?;
        let found = self
            .store
            .find_mut(origin)
            .is_some_and(|v| v.edges_mut().remove(dest));
        if found {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound { origin, target: dest })
        }
    }

    /// Remove a vertex together with every edge that targets it.
    pub fn delete_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        self.store.remove(id)?;
        self.store.cascade_delete_references(id);
        Ok(())
    }

    pub fn find_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.store.find(id)
    }

    pub fn exists(&self, id: VertexId) -> bool {
        self.store.contains(id)
    }

    /// Outgoing edges of `id`; empty when the vertex is absent.
    pub fn neighbors_out(&self, id: VertexId) -> &[Edge] {
        self.store
            .find(id)
            .map(|v| v.edges().as_slice())
            .unwrap_or(&[])
    }

    /// Drop every edge and vertex. The declared capacity is kept.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Build the graph from a row-major weight matrix.
    ///
    /// Creates vertices `0..max(rows, cols)`, then assigns the weight at
    /// position `(i, j)` to edge `i -> j`, skipping zeros. Stops at the first
    /// failure; whatever was built before it stays in the graph.
    pub fn populate(&mut self, weights: &[Weight], rows: usize, cols: usize) -> GraphResult<()> {
        let n = rows.max(cols);
        for i in 0..n {
            let id = to_vertex_id(i)?;
            self.add_vertex(id)?;
        }

        let mut next = weights.iter().copied();
        'rows: for i in 0..rows {
            for j in 0..cols {
                let Some(weight) = next.next() else {
                    break 'rows;
                };
                self.insert_edge(to_vertex_id(i)?, to_vertex_id(j)?, weight)?;
            }
        }

        debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "populated graph from weight matrix"
        );
        Ok(())
    }

    /// Vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.store.iter()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.store.ids()
    }

    /// Every edge as `(origin, target, weight)`, in vertex then insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, Weight)> + '_ {
        self.store
            .iter()
            .flat_map(|v| v.edges().iter().map(move |e| (v.id(), e.target, e.weight)))
    }

    pub fn vertex_count(&self) -> usize {
        self.store.len()
    }

    pub fn edge_count(&self) -> usize {
        self.store.iter().map(Vertex::out_degree).sum()
    }

    pub fn declared_capacity(&self) -> usize {
        self.declared_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertices_mem = self.store.len() * size_of::<Vertex>();
        let edges_mem = self.edge_count() * size_of::<Edge>();
        vertices_mem + edges_mem
    }
}

fn to_vertex_id(index: usize) -> GraphResult<VertexId> {
    VertexId::try_from(index)
        .map_err(|_| GraphError::InvalidArgument(format!("vertex index {index} overflows i32")))
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.store.is_empty() {
            return writeln!(f, "graph is empty");
        }
        for vertex in self.store.iter() {
            writeln!(f, "vertex {}:", vertex.id())?;
            for edge in vertex.edges() {
                writeln!(f, "  -> {} (weight {})", edge.target, edge.weight)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(ids: &[VertexId]) -> Graph {
        let mut g = Graph::new(ids.len().max(1)).unwrap();
        for &id in ids {
            g.add_vertex(id).unwrap();
        }
        g
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert!(matches!(Graph::new(0), Err(GraphError::InvalidCapacity(0))));
        let g = Graph::new(4).unwrap();
        assert_eq!(g.declared_capacity(), 4);
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn test_new_huge_capacity_allocates_nothing() {
        let mut g = Graph::new(usize::MAX).unwrap();
        assert_eq!(g.declared_capacity(), usize::MAX);
        g.add_vertex(1).unwrap();
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_capacity_not_enforced() {
        let g = graph_with(&[1, 2, 3, 4, 5]);
        let mut small = Graph::new(1).unwrap();
        for id in g.vertex_ids() {
            small.add_vertex(id).unwrap();
        }
        assert_eq!(small.vertex_count(), 5);
    }

    #[test]
    fn test_duplicate_vertex_leaves_graph_unchanged() {
        let mut g = graph_with(&[1, 2]);
        g.insert_edge(1, 2, 3).unwrap();
        let before = g.clone();
        assert!(matches!(g.add_vertex(2), Err(GraphError::DuplicateVertex(2))));
        assert_eq!(g, before);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_insert_edge_on_empty_graph() {
        let mut g = Graph::new(3).unwrap();
        assert!(matches!(g.insert_edge(0, 1, 5), Err(GraphError::EmptyGraph)));
        assert!(matches!(g.delete_edge(0, 1), Err(GraphError::EmptyGraph)));
    }

    #[test]
    fn test_insert_edge_missing_endpoint() {
        let mut g = graph_with(&[0, 1]);
        assert!(matches!(g.insert_edge(7, 1, 5), Err(GraphError::VertexNotFound(7))));
        assert!(matches!(g.insert_edge(0, 9, 5), Err(GraphError::VertexNotFound(9))));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_insert_zero_weight_edge_is_noop() {
        let mut g = graph_with(&[0, 1]);
        g.insert_edge(0, 1, 0).unwrap();
        assert!(g.neighbors_out(0).is_empty());
    }

    #[test]
    fn test_delete_edge() {
        let mut g = graph_with(&[0, 1, 2]);
        g.insert_edge(0, 1, 4).unwrap();
        g.insert_edge(0, 2, 6).unwrap();
        g.delete_edge(0, 1).unwrap();
        assert_eq!(g.neighbors_out(0), &[Edge { target: 2, weight: 6 }]);
        assert!(matches!(
            g.delete_edge(0, 1),
            Err(GraphError::EdgeNotFound { origin: 0, target: 1 })
        ));
    }

    #[test]
    fn test_delete_vertex_cascades() {
        let mut g = graph_with(&[0, 1, 2]);
        g.insert_edge(0, 1, 1).unwrap();
        g.insert_edge(2, 1, 1).unwrap();
        g.insert_edge(1, 2, 1).unwrap();
        g.insert_edge(0, 2, 1).unwrap();

        g.delete_vertex(1).unwrap();
        assert!(!g.exists(1));
        assert_eq!(g.vertex_count(), 2);
        assert!(g.edges().all(|(_, target, _)| target != 1));
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2, 1)]);
    }

    #[test]
    fn test_delete_missing_vertex() {
        let mut g = graph_with(&[0, 1]);
        assert!(matches!(g.delete_vertex(5), Err(GraphError::VertexNotFound(5))));
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_populate_square_matrix() {
        let mut g = Graph::new(3).unwrap();
        #[rustfmt::skip]
        let weights = [
            0, 5, 9,
            0, 0, 3,
            0, 0, 0,
        ];
        g.populate(&weights, 3, 3).unwrap();
        assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(
            g.edges().collect::<Vec<_>>(),
            vec![(0, 1, 5), (0, 2, 9), (1, 2, 3)]
        );
    }

    #[test]
    fn test_populate_uses_max_dimension() {
        let mut g = Graph::new(4).unwrap();
        g.populate(&[1, 2, 3, 4], 1, 4).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.neighbors_out(0).len(), 4);
    }

    #[test]
    fn test_populate_short_weight_list() {
        let mut g = Graph::new(2).unwrap();
        g.populate(&[7], 2, 2).unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 0, 7)]);
    }

    #[test]
    fn test_populate_aborts_on_duplicate() {
        let mut g = graph_with(&[1]);
        let err = g.populate(&[1, 1, 1, 1], 2, 2).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateVertex(1)));
        // Vertex 0 was inserted before the failure and stays.
        assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut g = graph_with(&[0, 1]);
        g.insert_edge(0, 1, 2).unwrap();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.declared_capacity(), 2);
    }

    #[test]
    fn test_display() {
        let mut g = graph_with(&[0, 1]);
        g.insert_edge(0, 1, 5).unwrap();
        let text = g.to_string();
        assert!(text.contains("vertex 0:"));
        assert!(text.contains("-> 1 (weight 5)"));

        let empty = Graph::new(1).unwrap();
        assert_eq!(empty.to_string(), "graph is empty\n");
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let mut g = graph_with(&[0, 1]);
        g.insert_edge(0, 1, 1).unwrap();
        assert!(g.memory_usage() > 0);
    }
}
