//! Simulation events and their processing.
//!
//! Every event is a `(time, node, flight, message)` tuple. Stage events move a flight leg
//! through one node and schedule the stage that follows on its route; [`HoldEvent`] re-times a
//! group of pending stage events instead.

use crate::{
    Error, EventQueue, FlightField, FlightId, NodeId, NodeType, Result, StageRecord, State, Time,
};

use serde::{Deserialize, Serialize};

mod fix;
mod hold;
mod runway;
mod taxiway;
mod terminal;

#[cfg(test)]
pub(crate) mod test_utils;

pub use hold::HoldEvent;

/// Command carried by an event.
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
#[strum(serialize_all = "shouty_snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Departing leg.
    Dep,
    /// Arriving leg.
    Arr,
    /// Hold departures.
    HoldDep,
    /// Hold arrivals.
    HoldArr,
}

impl Message {
    /// The stage message a hold message applies to, or `None` for stage messages.
    #[must_use]
    pub fn held(self) -> Option<Message> {
        match self {
            Self::HoldDep => Some(Self::Dep),
            Self::HoldArr => Some(Self::Arr),
            Self::Dep | Self::Arr => None,
        }
    }
}

/// Event variant, without the event's data.
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
pub enum EventKind {
    /// Processed at a terminal.
    Terminal,
    /// Processed at a taxiway.
    Taxiway,
    /// Processed at a runway.
    Runway,
    /// Processed at a fix.
    Fix,
    /// Capacity hold.
    Hold,
}

impl EventKind {
    /// Type of node a stage event of this kind is processed at; `None` for holds.
    #[must_use]
    pub fn node_type(self) -> Option<NodeType> {
        match self {
            Self::Terminal => Some(NodeType::Terminal),
            Self::Taxiway => Some(NodeType::Taxiway),
            Self::Runway => Some(NodeType::Runway),
            Self::Fix => Some(NodeType::Fix),
            Self::Hold => None,
        }
    }
}

impl From<NodeType> for EventKind {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Terminal => Self::Terminal,
            NodeType::Taxiway => Self::Taxiway,
            NodeType::Runway => Self::Runway,
            NodeType::Fix => Self::Fix,
        }
    }
}

/// Data of a stage event: a flight leg reaching a node at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEvent {
    time: Time,
    node: NodeId,
    flight: FlightId,
    message: Message,
}

impl StageEvent {
    /// Time of the event.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Node processing the event.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Flight leg the event moves.
    #[must_use]
    pub fn flight(&self) -> FlightId {
        self.flight
    }

    /// Either [`Message::Dep`] or [`Message::Arr`].
    #[must_use]
    pub fn message(&self) -> Message {
        self.message
    }
}

/// A simulation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Gate departure or arrival.
    Terminal(StageEvent),
    /// Taxi-out or taxi-in.
    Taxiway(StageEvent),
    /// Takeoff or landing.
    Runway(StageEvent),
    /// Departure or arrival fix crossing.
    Fix(StageEvent),
    /// See [`HoldEvent`].
    Hold(HoldEvent),
}

impl Event {
    /// Constructs a stage event of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMessage`] if `message` is not [`Message::Dep`] or [`Message::Arr`],
    /// or if `kind` is [`EventKind::Hold`], which must be built with [`HoldEvent::new`].
    pub fn new(
        kind: EventKind,
        time: Time,
        node: NodeId,
        flight: FlightId,
        message: Message,
    ) -> Result<Self> {
        let invalid = || Error::InvalidMessage { kind, message };
        if message.held().is_some() {
            return Err(invalid());
        }
        let stage = StageEvent {
            time,
            node,
            flight,
            message,
        };
        match kind {
            EventKind::Terminal => Ok(Self::Terminal(stage)),
            EventKind::Taxiway => Ok(Self::Taxiway(stage)),
            EventKind::Runway => Ok(Self::Runway(stage)),
            EventKind::Fix => Ok(Self::Fix(stage)),
            EventKind::Hold => Err(invalid()),
        }
    }

    /// Constructs a terminal event. See [`Event::new`].
    ///
    /// # Errors
    ///
    /// Fails for hold messages.
    pub fn terminal(time: Time, node: NodeId, flight: FlightId, message: Message) -> Result<Self> {
        Self::new(EventKind::Terminal, time, node, flight, message)
    }

    /// Constructs a taxiway event. See [`Event::new`].
    ///
    /// # Errors
    ///
    /// Fails for hold messages.
    pub fn taxiway(time: Time, node: NodeId, flight: FlightId, message: Message) -> Result<Self> {
        Self::new(EventKind::Taxiway, time, node, flight, message)
    }

    /// Constructs a runway event. See [`Event::new`].
    ///
    /// # Errors
    ///
    /// Fails for hold messages.
    pub fn runway(time: Time, node: NodeId, flight: FlightId, message: Message) -> Result<Self> {
        Self::new(EventKind::Runway, time, node, flight, message)
    }

    /// Constructs a fix event. See [`Event::new`].
    ///
    /// # Errors
    ///
    /// Fails for hold messages.
    pub fn fix(time: Time, node: NodeId, flight: FlightId, message: Message) -> Result<Self> {
        Self::new(EventKind::Fix, time, node, flight, message)
    }

    /// Kind of the event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Terminal(_) => EventKind::Terminal,
            Self::Taxiway(_) => EventKind::Taxiway,
            Self::Runway(_) => EventKind::Runway,
            Self::Fix(_) => EventKind::Fix,
            Self::Hold(_) => EventKind::Hold,
        }
    }

    /// Time of the event; the queue's ordering key.
    #[must_use]
    pub fn time(&self) -> Time {
        match self {
            Self::Terminal(e) | Self::Taxiway(e) | Self::Runway(e) | Self::Fix(e) => e.time,
            Self::Hold(hold) => hold.time(),
        }
    }

    /// Target node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        match self {
            Self::Terminal(e) | Self::Taxiway(e) | Self::Runway(e) | Self::Fix(e) => e.node,
            Self::Hold(hold) => hold.node(),
        }
    }

    /// Flight leg of a stage event; `None` for holds.
    #[must_use]
    pub fn flight(&self) -> Option<FlightId> {
        self.stage().map(StageEvent::flight)
    }

    /// Command carried by the event.
    #[must_use]
    pub fn message(&self) -> Message {
        match self {
            Self::Terminal(e) | Self::Taxiway(e) | Self::Runway(e) | Self::Fix(e) => e.message,
            Self::Hold(hold) => hold.message(),
        }
    }

    /// Stage data, unless this is a hold.
    #[must_use]
    pub fn stage(&self) -> Option<&StageEvent> {
        match self {
            Self::Terminal(e) | Self::Taxiway(e) | Self::Runway(e) | Self::Fix(e) => Some(e),
            Self::Hold(_) => None,
        }
    }

    /// Returns the same event moved to `time`.
    #[must_use]
    pub(crate) fn with_time(mut self, time: Time) -> Self {
        match &mut self {
            Self::Terminal(e) | Self::Taxiway(e) | Self::Runway(e) | Self::Fix(e) => e.time = time,
            Self::Hold(hold) => hold.set_time(time),
        }
        self
    }

    /// Processes the event: updates flight and node state and schedules follow-up events.
    ///
    /// # Errors
    ///
    /// Any configuration or consistency violation, such as a route leading to an unexpected
    /// node type, is returned immediately and must abort the simulation.
    pub fn process(&self, queue: &mut EventQueue, state: &mut State) -> Result<()> {
        log::trace!("[{}] Processing {} event {:?}", self.time(), self.kind(), self);
        match self {
            Self::Terminal(e) => terminal::process(e, queue, state),
            Self::Taxiway(e) => taxiway::process(e, queue, state),
            Self::Runway(e) => runway::process(e, queue, state),
            Self::Fix(e) => fix::process(e, queue, state),
            Self::Hold(hold) => hold.process(queue, state),
        }
    }
}

impl From<HoldEvent> for Event {
    fn from(hold: HoldEvent) -> Self {
        Self::Hold(hold)
    }
}

/// Moves the route cursor of `flight` forward and checks the type of the node it lands on.
fn advance(state: &mut State, flight: FlightId, expected: NodeType) -> Result<NodeId> {
    let leg = state.flights.get_mut(flight)?;
    let next = leg.route_mut().next_node();
    let found = match next {
        Some(node) => {
            let node_type = state.network.node_type(node)?;
            if node_type == expected {
                return Ok(node);
            }
            format!("{} node {}", node_type, node)
        }
        None => String::from("end of route"),
    };
    let leg = state.flights.get(flight)?;
    Err(Error::UnexpectedRouteNode {
        itinerary: leg.itinerary(),
        leg: leg.leg(),
        expected,
        found,
    })
}

/// Appends a traversal of the node of `event` to the history.
fn record(state: &mut State, event: &StageEvent, stage: NodeType, delay: Time) -> Result<()> {
    let flight = state.flights.get(event.flight)?;
    let location = state.network.get(event.node)?.location();
    state.history.push(StageRecord {
        time: event.time,
        flight: event.flight,
        itinerary: flight.itinerary(),
        leg: flight.leg(),
        stage,
        node: event.node,
        location,
        message: event.message,
        delay,
    });
    Ok(())
}

fn mismatch(kind: EventKind, node: NodeType, node_id: NodeId) -> Error {
    Error::NodeKindMismatch {
        kind,
        node,
        node_id,
    }
}

/// Capacity wait accounted to `field` when a stage cannot take place at its event time.
///
/// Re-enqueues the event at `earliest` and returns `true` if the flight has to wait.
fn wait_for_capacity(
    event: &StageEvent,
    kind: EventKind,
    earliest: Time,
    field: FlightField,
    queue: &mut EventQueue,
    state: &mut State,
) -> Result<bool> {
    if earliest <= event.time {
        return Ok(false);
    }
    let wait = earliest - event.time;
    state.flights.get_mut(event.flight)?.add(field, wait);
    log::debug!(
        "[{}] Flight {} waits {}s for {} {}",
        event.time,
        event.flight,
        wait,
        kind,
        event.node
    );
    queue.add(Event::new(
        kind,
        earliest,
        event.node,
        event.flight,
        event.message,
    )?);
    Ok(true)
}
