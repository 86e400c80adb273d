use crate::{Error, Node, NodeId, NodeKind, NodeType, Result};

/// Owns all nodes of the simulated network.
///
/// Nodes are added unwired and then connected with [`Network::connect`], which validates that the
/// pair of node types may be neighbors. Wiring happens once, before the simulation starts.
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
}

/// Pairs of node types that may be wired together; the relation is symmetric.
const ALLOWED_LINKS: [(NodeType, NodeType); 4] = [
    (NodeType::Terminal, NodeType::Taxiway),
    (NodeType::Taxiway, NodeType::Runway),
    (NodeType::Runway, NodeType::Fix),
    (NodeType::Fix, NodeType::Fix),
];

impl Network {
    /// Adds a node at `location`, returning its ID.
    pub fn add_node<K: Into<NodeKind>>(&mut self, location: usize, kind: K) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Node::new(id, location, kind));
        id
    }

    /// Returns the node `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` was not issued by this network.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(usize::from(id)).ok_or(Error::UnknownNode(id))
    }

    /// Returns the node `id` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` was not issued by this network.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(usize::from(id))
            .ok_or(Error::UnknownNode(id))
    }

    /// Type of the node `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` was not issued by this network.
    pub fn node_type(&self, id: NodeId) -> Result<NodeType> {
        self.get(id).map(Node::node_type)
    }

    /// Wires `lhs` and `rhs` as neighbors of each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNeighbor`] if the node types may not be neighbors, or a
    /// single-valued slot is already wired elsewhere, and [`Error::UnknownNode`] if either node
    /// does not exist.
    pub fn connect(&mut self, lhs: NodeId, rhs: NodeId) -> Result<()> {
        let lhs_type = self.node_type(lhs)?;
        let rhs_type = self.node_type(rhs)?;
        let allowed = ALLOWED_LINKS
            .iter()
            .any(|&(a, b)| (a, b) == (lhs_type, rhs_type) || (b, a) == (lhs_type, rhs_type));
        if !allowed || lhs == rhs {
            return Err(Error::InvalidNeighbor {
                node: lhs_type,
                node_id: lhs,
                neighbor: rhs_type,
                neighbor_id: rhs,
            });
        }
        // Both sides must accept the link before either node is modified.
        let mut lhs_node = self.get(lhs)?.clone();
        let mut rhs_node = self.get(rhs)?.clone();
        lhs_node.add_neighbor(rhs, rhs_type)?;
        rhs_node.add_neighbor(lhs, lhs_type)?;
        *self.get_mut(lhs)? = lhs_node;
        *self.get_mut(rhs)? = rhs_node;
        log::trace!("Wired {} {} with {} {}", lhs_type, lhs, rhs_type, rhs);
        Ok(())
    }

    /// Iterates over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the network has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DurationModel, Fix, Runway, Taxiway, Terminal};
    use rstest::rstest;

    fn network() -> (Network, [NodeId; 5]) {
        let mut network = Network::default();
        let terminal = network.add_node(
            0,
            Terminal::new(DurationModel::constant(0), DurationModel::constant(0)),
        );
        let taxiway = network.add_node(
            0,
            Taxiway::new(DurationModel::constant(0), DurationModel::constant(0)),
        );
        let runway = network.add_node(0, Runway::new(60, 60, 0));
        let fix = network.add_node(0, Fix::new(60, 0));
        let other_fix = network.add_node(1, Fix::new(60, 0));
        (network, [terminal, taxiway, runway, fix, other_fix])
    }

    #[test]
    fn test_valid_wiring() {
        let (mut network, [terminal, taxiway, runway, fix, other_fix]) = network();
        network.connect(terminal, taxiway).unwrap();
        network.connect(runway, taxiway).unwrap();
        network.connect(runway, fix).unwrap();
        network.connect(fix, other_fix).unwrap();
        assert_eq!(network.get(terminal).unwrap().neighbors(), vec![taxiway]);
        assert_eq!(
            network.get(taxiway).unwrap().neighbors(),
            vec![terminal, runway]
        );
        assert_eq!(network.get(runway).unwrap().neighbors(), vec![taxiway, fix]);
        assert_eq!(network.get(fix).unwrap().neighbors(), vec![runway, other_fix]);
        assert_eq!(network.get(other_fix).unwrap().neighbors(), vec![fix]);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(0, 3)]
    #[case(2, 0)]
    #[case(1, 3)]
    #[case(3, 1)]
    #[case(0, 0)]
    #[case(3, 3)]
    fn test_invalid_wiring(#[case] lhs: usize, #[case] rhs: usize) {
        let (mut network, nodes) = network();
        assert!(matches!(
            network.connect(nodes[lhs], nodes[rhs]),
            Err(Error::InvalidNeighbor { .. })
        ));
        assert!(network.get(nodes[lhs]).unwrap().neighbors().is_empty());
    }

    #[test]
    fn test_second_terminal_rejected() {
        let (mut network, [terminal, taxiway, ..]) = network();
        let second = network.add_node(
            0,
            Terminal::new(DurationModel::constant(0), DurationModel::constant(0)),
        );
        network.connect(terminal, taxiway).unwrap();
        assert!(network.connect(second, taxiway).is_err());
        assert!(network.get(second).unwrap().neighbors().is_empty());
        assert_eq!(network.get(taxiway).unwrap().neighbors(), vec![terminal]);
    }

    #[test]
    fn test_unknown_node() {
        let (mut network, [terminal, ..]) = network();
        assert!(matches!(
            network.connect(terminal, NodeId::from(99)),
            Err(Error::UnknownNode(_))
        ));
    }
}
