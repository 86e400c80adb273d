use crate::NodeId;

/// Ordered, once-through sequence of nodes a flight leg visits.
///
/// The cursor only moves forward. Once the route is exhausted, [`Route::next_node`] keeps
/// returning `None`, which marks the end of the leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<NodeId>,
    next: usize,
}

impl Route {
    /// Constructs a route visiting `nodes` in order.
    #[must_use]
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes, next: 0 }
    }

    /// Appends a node at the end of the route.
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    /// Returns the next node and moves the cursor past it.
    pub fn next_node(&mut self) -> Option<NodeId> {
        let node = self.nodes.get(self.next).copied();
        if node.is_some() {
            self.next += 1;
        }
        node
    }

    /// Returns the next node without moving the cursor.
    #[must_use]
    pub fn peek_next_node(&self) -> Option<NodeId> {
        self.nodes.get(self.next).copied()
    }

    /// The node most recently returned by [`Route::next_node`].
    #[must_use]
    pub fn last_node(&self) -> Option<NodeId> {
        self.next.checked_sub(1).map(|idx| self.nodes[idx])
    }

    /// All nodes of the route.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of nodes of the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the route has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor() {
        let nodes: Vec<NodeId> = (10..16).map(NodeId::from).collect();
        let mut route = Route::new(nodes.clone());
        assert_eq!(route.last_node(), None);
        assert_eq!(route.peek_next_node(), Some(nodes[0]));
        for (idx, &node) in nodes.iter().enumerate() {
            assert_eq!(route.peek_next_node(), Some(node));
            assert_eq!(route.peek_next_node(), Some(node));
            assert_eq!(route.next_node(), Some(node));
            assert_eq!(route.last_node(), Some(nodes[idx]));
        }
        assert_eq!(route.peek_next_node(), None);
        assert_eq!(route.next_node(), None);
        assert_eq!(route.next_node(), None);
        assert_eq!(route.last_node(), Some(nodes[5]));
    }

    #[test]
    fn test_last_node_lags_behind() {
        let mut route = Route::default();
        for id in 0..6 {
            route.add_node(NodeId::from(id));
        }
        assert_eq!(route.len(), 6);
        let mut previous = None;
        while let Some(node) = route.next_node() {
            assert_eq!(route.last_node(), Some(node));
            if let Some(prev) = previous {
                assert_eq!(usize::from(node), usize::from(prev) + 1);
            }
            previous = Some(node);
        }
        assert_eq!(previous, Some(NodeId::from(5)));
    }

    #[test]
    fn test_empty() {
        let mut route = Route::default();
        assert!(route.is_empty());
        assert_eq!(route.next_node(), None);
        assert_eq!(route.last_node(), None);
    }
}
