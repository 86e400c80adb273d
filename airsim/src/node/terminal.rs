use super::{set_slot, NodeType};
use crate::{DurationModel, NodeId, Time};

use rand::Rng;

/// Gate area of an airport. Flights start and end their legs here.
#[derive(Debug, Clone)]
pub struct Terminal {
    turnaround: DurationModel,
    pushback: DurationModel,
    taxiway: Option<NodeId>,
}

impl Terminal {
    /// Constructs a terminal with the given turnaround and pushback offset distributions.
    #[must_use]
    pub fn new(turnaround: DurationModel, pushback: DurationModel) -> Self {
        Self {
            turnaround,
            pushback,
            taxiway: None,
        }
    }

    /// The taxiway serving this terminal.
    #[must_use]
    pub fn taxiway(&self) -> Option<NodeId> {
        self.taxiway
    }

    /// Minimum time an aircraft stays at the gate between an arriving and a departing leg.
    pub fn turnaround_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        self.turnaround.sample(rng)
    }

    /// Offset between the scheduled out time and the pushback; negative values mean leaving
    /// the gate early.
    pub fn pushback_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        self.pushback.sample(rng)
    }

    pub(super) fn neighbors(&self) -> Vec<NodeId> {
        self.taxiway.into_iter().collect()
    }

    pub(super) fn add_neighbor(&mut self, neighbor: NodeId, neighbor_type: NodeType) -> bool {
        match neighbor_type {
            NodeType::Taxiway => set_slot(&mut self.taxiway, neighbor),
            _ => false,
        }
    }
}
