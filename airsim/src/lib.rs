//! Discrete-event simulation of flights moving through an airport and airspace network.
//!
//! Each flight leg follows its route: terminal, taxiway, runway, departure fix, arrival fix,
//! runway, taxiway, terminal. Time-stamped events are polled from an [`EventQueue`] in time
//! order, and processing one event mutates flight and node state and schedules the next stage.
//! A [`HoldEvent`] delays a group of pending events to enforce a temporary capacity restriction.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::inline_always
)]

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

mod duration;
pub use duration::{DurationModel, DurationSpec};

mod event;
pub use event::{Event, EventKind, HoldEvent, Message, StageEvent};

mod flight;
pub use flight::{Flight, FlightField, Flights};

mod history;
pub use history::{History, StageRecord};

mod network;
pub use network::Network;

mod node;
pub use node::{Fix, Node, NodeKind, NodeType, Runway, Taxiway, Terminal};

pub mod output;

mod queue;
pub use queue::EventQueue;

mod registry;
pub use registry::{Category, Registry, RegistryBuilder};

mod route;
pub use route::Route;

pub mod scenario;

mod simulation;
pub use simulation::{Simulation, State};

/// Simulation time in abstract integer seconds.
pub type Time = i64;

/// Marks a flight time field that has not been assigned yet.
pub const UNSET: Time = -1;

/// Flight leg ID: an index into [`Flights`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct FlightId(usize);

/// Node ID: an index into [`Network`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct NodeId(usize);

/// Airport index assigned by the [`Registry`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct AirportId(usize);

/// Carrier index assigned by the [`Registry`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct CarrierId(usize);

/// Equipment (aircraft type) index assigned by the [`Registry`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct EquipmentId(usize);

/// Navigational fix index assigned by the [`Registry`].
#[derive(
    From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Copy, Clone, Hash, Display,
)]
pub struct FixId(usize);

/// Error type encompassing all configuration and consistency failures of the simulation core.
///
/// None of these are recoverable: they indicate a malformed network, schedule, or event, and
/// abort the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A flight was built from a parameter vector of the wrong length.
    #[error("Flight parameter vector has {actual} values but {expected} are required.")]
    InvalidParameterCount {
        /// Number of defined flight fields.
        expected: usize,
        /// Length of the vector passed.
        actual: usize,
    },
    /// An event was constructed with a message its kind does not accept.
    #[error("{kind} event does not accept message {message}.")]
    InvalidMessage {
        /// Kind of the event being constructed.
        kind: EventKind,
        /// Rejected message.
        message: Message,
    },
    /// A hold event was asked to hold other hold events.
    #[error("Hold events cannot hold other hold events.")]
    HoldOfHold,
    /// Two nodes cannot be wired together.
    #[error("Cannot wire {node} node {node_id} to {neighbor} node {neighbor_id}.")]
    InvalidNeighbor {
        /// Type of the node receiving a neighbor.
        node: NodeType,
        /// ID of the node receiving a neighbor.
        node_id: NodeId,
        /// Type of the rejected neighbor.
        neighbor: NodeType,
        /// ID of the rejected neighbor.
        neighbor_id: NodeId,
    },
    /// Advancing a route did not land on the expected type of node.
    #[error("Route of flight {itinerary}/{leg} expected a {expected} node but found {found}.")]
    UnexpectedRouteNode {
        /// Itinerary number of the flight.
        itinerary: i64,
        /// Leg number of the flight.
        leg: i64,
        /// Node type required by the current stage.
        expected: NodeType,
        /// What the route produced instead; `end of route` if exhausted.
        found: String,
    },
    /// An event targets a node of a different type than its kind processes.
    #[error("{kind} event cannot be processed at {node} node {node_id}.")]
    NodeKindMismatch {
        /// Kind of the event.
        kind: EventKind,
        /// Type of the target node.
        node: NodeType,
        /// ID of the target node.
        node_id: NodeId,
    },
    /// A node ID does not exist in the network.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    /// A flight ID does not exist in the flight table.
    #[error("Unknown flight: {0}")]
    UnknownFlight(FlightId),
    /// A name is missing from the registry.
    #[error("Unknown {category} name: {name}")]
    UnknownName {
        /// Registry category searched.
        category: Category,
        /// The missing name.
        name: String,
    },
    /// Duration distribution parameters are invalid.
    #[error("Invalid duration distribution: {0}")]
    InvalidDistribution(String),
    /// Nodes do not accept asynchronous messages.
    #[error("Node {0} does not accept messages.")]
    Unsupported(NodeId),
}

/// Result alias using [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;
