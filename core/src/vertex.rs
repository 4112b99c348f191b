use tracing::debug;

use crate::adjacency::{AdjacencyList, VertexId};
use crate::error::{GraphError, GraphResult};

/// A vertex and the outgoing edges it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    edges: AdjacencyList,
}

impl Vertex {
    /// Create a vertex with no edges.
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            edges: AdjacencyList::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn edges(&self) -> &AdjacencyList {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut AdjacencyList {
        &mut self.edges
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

/// Vertices kept in ascending id order.
///
/// Ids are resolved by binary search over the ordered vector, so the vector
/// position doubles as the id-to-index map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
}

impl VertexStore {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    fn position(&self, id: VertexId) -> Result<usize, usize> {
        self.vertices.binary_search_by_key(&id, |v| v.id)
    }

    /// Insert a vertex at the position that keeps ids ascending.
    pub fn insert(&mut self, vertex: Vertex) -> GraphResult<()> {
        match self.position(vertex.id) {
            Ok(_) => Err(GraphError::DuplicateVertex(vertex.id)),
            Err(at) => {
                self.vertices.insert(at, vertex);
                Ok(())
            }
        }
    }

    pub fn find(&self, id: VertexId) -> Option<&Vertex> {
        self.position(id).ok().map(|i| &self.vertices[i])
    }

    pub fn find_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        match self.position(id) {
            Ok(i) => Some(&mut self.vertices[i]),
            Err(_) => None,
        }
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.position(id).is_ok()
    }

    /// Unlink a vertex, dropping its own edges first.
    ///
    /// Edges elsewhere that target it are untouched; see
    /// [`cascade_delete_references`](Self::cascade_delete_references).
    pub fn remove(&mut self, id: VertexId) -> GraphResult<Vertex> {
        let at = self.position(id).map_err(|_| GraphError::VertexNotFound(id))?;
        self.vertices[at].edges.clear();
        Ok(self.vertices.remove(at))
    }

    /// Remove every edge, in every stored vertex, that targets `id`.
    /// Returns the number of edges removed.
    pub fn cascade_delete_references(&mut self, id: VertexId) -> usize {
        let removed: usize = self
            .vertices
            .iter_mut()
            .map(|v| v.edges.remove_all_to(id))
            .sum();
        if removed > 0 {
            debug!(vertex = id, removed, "cascaded edge deletion");
        }
        removed
    }

    pub fn clear(&mut self) {
        for vertex in &mut self.vertices {
            vertex.edges.clear();
        }
        self.vertices.clear();
    }

    /// Vertices in ascending id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|v| v.id)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
