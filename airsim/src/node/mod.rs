//! Network nodes: terminals, taxiways, runways, and fixes.

use crate::{Error, Message, NodeId, Result};

use serde::{Deserialize, Serialize};

mod fix;
mod runway;
mod taxiway;
mod terminal;

pub use fix::Fix;
pub use runway::Runway;
pub use taxiway::Taxiway;
pub use terminal::Terminal;

/// Type of a node, without its parameters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Gate area of an airport.
    Terminal,
    /// Ground path between gates and runways.
    Taxiway,
    /// Takeoff and landing.
    Runway,
    /// Airspace entry or exit point.
    Fix,
}

/// Type-specific parameters, state, and neighbor slots of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// See [`Terminal`].
    Terminal(Terminal),
    /// See [`Taxiway`].
    Taxiway(Taxiway),
    /// See [`Runway`].
    Runway(Runway),
    /// See [`Fix`].
    Fix(Fix),
}

impl NodeKind {
    /// Type of the node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Terminal(_) => NodeType::Terminal,
            Self::Taxiway(_) => NodeType::Taxiway,
            Self::Runway(_) => NodeType::Runway,
            Self::Fix(_) => NodeType::Fix,
        }
    }
}

impl From<Terminal> for NodeKind {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

impl From<Taxiway> for NodeKind {
    fn from(taxiway: Taxiway) -> Self {
        Self::Taxiway(taxiway)
    }
}

impl From<Runway> for NodeKind {
    fn from(runway: Runway) -> Self {
        Self::Runway(runway)
    }
}

impl From<Fix> for NodeKind {
    fn from(fix: Fix) -> Self {
        Self::Fix(fix)
    }
}

/// A node of the network.
///
/// `location` is the registry index of the airport the node belongs to, or of the fix itself for
/// [`NodeType::Fix`] nodes.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    location: usize,
    kind: NodeKind,
}

impl Node {
    /// Constructs an unwired node.
    #[must_use]
    pub fn new<K: Into<NodeKind>>(id: NodeId, location: usize, kind: K) -> Self {
        Self {
            id,
            location,
            kind: kind.into(),
        }
    }

    /// Node ID.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Registry index of the airport or fix.
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }

    /// Type of the node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Parameters and state.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable parameters and state.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// IDs of all wired neighbors.
    #[must_use]
    pub fn neighbors(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::Terminal(terminal) => terminal.neighbors(),
            NodeKind::Taxiway(taxiway) => taxiway.neighbors(),
            NodeKind::Runway(runway) => runway.neighbors(),
            NodeKind::Fix(fix) => fix.neighbors(),
        }
    }

    /// Wires `neighbor` into the slot this node keeps for its type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNeighbor`] if this node has no slot for `neighbor_type`, or if the
    /// slot holds a single node and is already taken by a different one.
    pub(crate) fn add_neighbor(&mut self, neighbor: NodeId, neighbor_type: NodeType) -> Result<()> {
        let accepted = match &mut self.kind {
            NodeKind::Terminal(terminal) => terminal.add_neighbor(neighbor, neighbor_type),
            NodeKind::Taxiway(taxiway) => taxiway.add_neighbor(neighbor, neighbor_type),
            NodeKind::Runway(runway) => runway.add_neighbor(neighbor, neighbor_type),
            NodeKind::Fix(fix) => fix.add_neighbor(neighbor, neighbor_type),
        };
        if accepted {
            Ok(())
        } else {
            Err(Error::InvalidNeighbor {
                node: self.node_type(),
                node_id: self.id,
                neighbor: neighbor_type,
                neighbor_id: neighbor,
            })
        }
    }

    /// Placeholder for asynchronous node-to-node messaging.
    ///
    /// # Errors
    ///
    /// Always fails with [`Error::Unsupported`].
    pub fn receive(&self, sender: NodeId, message: Message) -> Result<()> {
        log::warn!(
            "Node {} ignored message {} from node {}",
            self.id,
            message,
            sender
        );
        Err(Error::Unsupported(self.id))
    }
}

/// Fills a single-valued neighbor slot. Rewiring to the same node is accepted.
fn set_slot(slot: &mut Option<NodeId>, neighbor: NodeId) -> bool {
    match slot {
        Some(current) => *current == neighbor,
        None => {
            *slot = Some(neighbor);
            true
        }
    }
}

/// Adds to a multi-valued neighbor slot, ignoring duplicates.
fn push_slot(slot: &mut Vec<NodeId>, neighbor: NodeId) -> bool {
    if !slot.contains(&neighbor) {
        slot.push(neighbor);
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DurationModel;

    #[test]
    fn test_receive_is_inert() {
        let node = Node::new(
            NodeId::from(0),
            0,
            Terminal::new(DurationModel::constant(0), DurationModel::constant(0)),
        );
        assert!(matches!(
            node.receive(NodeId::from(1), Message::Dep),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_single_slot() {
        let mut node = Node::new(
            NodeId::from(0),
            0,
            Terminal::new(DurationModel::constant(0), DurationModel::constant(0)),
        );
        assert!(node.add_neighbor(NodeId::from(1), NodeType::Taxiway).is_ok());
        assert!(node.add_neighbor(NodeId::from(1), NodeType::Taxiway).is_ok());
        assert!(node.add_neighbor(NodeId::from(2), NodeType::Taxiway).is_err());
        assert_eq!(node.neighbors(), vec![NodeId::from(1)]);
    }

    #[test]
    fn test_node_type_names() {
        assert_eq!(NodeType::Runway.to_string(), "runway");
        assert_eq!("fix".parse::<NodeType>().unwrap(), NodeType::Fix);
    }
}
