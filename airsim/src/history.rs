use serde::{Deserialize, Serialize};

use crate::{FlightId, Message, NodeId, NodeType, Time};

/// A flight leg traversing one stage of its route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Time the stage took place.
    pub time: Time,
    /// Flight leg.
    pub flight: FlightId,
    /// Itinerary number of the leg.
    pub itinerary: i64,
    /// Leg number within the itinerary.
    pub leg: i64,
    /// Type of the node traversed.
    pub stage: NodeType,
    /// Node traversed.
    pub node: NodeId,
    /// Location (airport or fix) of the node.
    pub location: usize,
    /// Departure or arrival.
    pub message: Message,
    /// Capacity wait accumulated at this stage so far.
    pub delay: Time,
}

/// Log of all stages processed during a run, in processing order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct History {
    records: Vec<StageRecord>,
}

impl History {
    /// Appends a record.
    pub fn push(&mut self, record: StageRecord) {
        log::trace!(
            "[{}] {}/{} {} {} at node {}",
            record.time,
            record.itinerary,
            record.leg,
            record.message,
            record.stage,
            record.node
        );
        self.records.push(record);
    }

    /// All records in processing order.
    #[must_use]
    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    /// Records of a single flight leg.
    pub fn flight(&self, flight: FlightId) -> impl Iterator<Item = &StageRecord> {
        self.records.iter().filter(move |r| r.flight == flight)
    }

    /// Number of `message` stages processed at nodes of type `stage`.
    #[must_use]
    pub fn count(&self, stage: NodeType, message: Message) -> usize {
        self.records
            .iter()
            .filter(|r| r.stage == stage && r.message == message)
            .count()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
