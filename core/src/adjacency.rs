/// Caller-assigned vertex identifier. Stored on disk as a little-endian `i32`.
pub type VertexId = i32;

/// Edge weight. Zero means "no edge" and is never stored.
pub type Weight = i32;

/// A directed, weighted edge hanging off its origin vertex.
///
/// `target` is a soft reference: it names a vertex by id and is resolved by
/// lookup in the owning graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: VertexId,
    pub weight: Weight,
}

/// Outgoing edges of one vertex, kept in insertion order.
///
/// Parallel edges to the same target may coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    edges: Vec<Edge>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Append an edge at the tail. Returns false, leaving the list untouched,
    /// when `weight` is zero.
    pub fn insert(&mut self, target: VertexId, weight: Weight) -> bool {
        if weight == 0 {
            return false;
        }
        self.edges.push(Edge { target, weight });
        true
    }

    /// Remove the first edge pointing at `target`. Returns whether one was found;
    /// an empty list always reports false.
    pub fn remove(&mut self, target: VertexId) -> bool {
        match self.edges.iter().position(|e| e.target == target) {
            Some(pos) => {
                self.edges.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every edge pointing at `target`, returning how many were dropped.
    pub fn remove_all_to(&mut self, target: VertexId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| e.target != target);
        before - self.edges.len()
    }

    /// Drop every edge. Always succeeds, including on an empty list.
    pub fn clear(&mut self) -> bool {
        self.edges.clear();
        true
    }

    /// Weight of the first edge to `target`, if any.
    pub fn weight_to(&self, target: VertexId) -> Option<Weight> {
        self.edges.iter().find(|e| e.target == target).map(|e| e.weight)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<'a> IntoIterator for &'a AdjacencyList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(list: &AdjacencyList) -> Vec<VertexId> {
        list.iter().map(|e| e.target).collect()
    }

    #[test]
    fn test_insert_appends_at_tail() {
        let mut list = AdjacencyList::new();
        assert!(list.insert(3, 10));
        assert!(list.insert(1, 20));
        assert!(list.insert(2, -5));
        assert_eq!(targets(&list), vec![3, 1, 2]);
        assert_eq!(list.weight_to(2), Some(-5));
    }

    #[test]
    fn test_insert_zero_weight_is_noop() {
        let mut list = AdjacencyList::new();
        list.insert(1, 4);
        assert!(!list.insert(2, 0));
        assert_eq!(list.len(), 1);
        assert_eq!(list.weight_to(2), None);
    }

    #[test]
    fn test_parallel_edges_allowed() {
        let mut list = AdjacencyList::new();
        list.insert(5, 1);
        list.insert(5, 2);
        assert_eq!(list.len(), 2);
        // Lookup reports the first one.
        assert_eq!(list.weight_to(5), Some(1));
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut list = AdjacencyList::new();
        list.insert(5, 1);
        list.insert(6, 2);
        list.insert(5, 3);
        assert!(list.remove(5));
        assert_eq!(targets(&list), vec![6, 5]);
        assert_eq!(list.weight_to(5), Some(3));
    }

    #[test]
    fn test_remove_missing_reports_not_found() {
        let mut list = AdjacencyList::new();
        assert!(!list.remove(1));
        list.insert(2, 1);
        assert!(!list.remove(1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_always_succeeds() {
        let mut list = AdjacencyList::new();
        assert!(list.clear());
        list.insert(1, 1);
        list.insert(2, 2);
        assert!(list.clear());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_all_to() {
        let mut list = AdjacencyList::new();
        list.insert(4, 1);
        list.insert(7, 1);
        list.insert(4, 2);
        assert_eq!(list.remove_all_to(4), 2);
        assert_eq!(targets(&list), vec![7]);
        assert_eq!(list.remove_all_to(4), 0);
    }
}
