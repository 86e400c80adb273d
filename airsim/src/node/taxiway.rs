use super::{push_slot, set_slot, NodeType};
use crate::{DurationModel, NodeId, Time};

use rand::Rng;

/// Ground path connecting the terminal with the runways of an airport.
#[derive(Debug, Clone)]
pub struct Taxiway {
    taxi_out: DurationModel,
    taxi_in: DurationModel,
    terminal: Option<NodeId>,
    runways: Vec<NodeId>,
}

impl Taxiway {
    /// Constructs a taxiway with the given taxi-out and taxi-in distributions.
    #[must_use]
    pub fn new(taxi_out: DurationModel, taxi_in: DurationModel) -> Self {
        Self {
            taxi_out,
            taxi_in,
            terminal: None,
            runways: Vec::new(),
        }
    }

    /// Terminal side of the taxiway.
    #[must_use]
    pub fn terminal(&self) -> Option<NodeId> {
        self.terminal
    }

    /// Runways reachable from the taxiway.
    #[must_use]
    pub fn runways(&self) -> &[NodeId] {
        &self.runways
    }

    /// Time from pushback to reaching the runway. May be negative if the distribution allows it;
    /// callers clamp.
    pub fn taxi_out_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        self.taxi_out.sample(rng)
    }

    /// Time from landing to reaching the gate.
    pub fn taxi_in_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        self.taxi_in.sample(rng)
    }

    pub(super) fn neighbors(&self) -> Vec<NodeId> {
        self.terminal
            .into_iter()
            .chain(self.runways.iter().copied())
            .collect()
    }

    pub(super) fn add_neighbor(&mut self, neighbor: NodeId, neighbor_type: NodeType) -> bool {
        match neighbor_type {
            NodeType::Terminal => set_slot(&mut self.terminal, neighbor),
            NodeType::Runway => push_slot(&mut self.runways, neighbor),
            _ => false,
        }
    }
}
