use super::{push_slot, set_slot, NodeType};
use crate::{NodeId, Time};

/// Runway of an airport, shared by departures and arrivals.
///
/// After each operation the runway is unavailable for a direction-dependent spacing interval.
#[derive(Debug, Clone)]
pub struct Runway {
    departure_spacing: Time,
    arrival_spacing: Time,
    climb_duration: Time,
    last_time: Option<Time>,
    next_time: Option<Time>,
    taxiway: Option<NodeId>,
    fixes: Vec<NodeId>,
}

impl Runway {
    /// Constructs a runway.
    ///
    /// `climb_duration` is the flying time from takeoff to the departure fix.
    #[must_use]
    pub fn new(departure_spacing: Time, arrival_spacing: Time, climb_duration: Time) -> Self {
        Self {
            departure_spacing,
            arrival_spacing,
            climb_duration,
            last_time: None,
            next_time: None,
            taxiway: None,
            fixes: Vec::new(),
        }
    }

    /// Flying time from takeoff to the departure fix.
    #[must_use]
    pub fn climb_duration(&self) -> Time {
        self.climb_duration
    }

    /// Time of the latest operation.
    #[must_use]
    pub fn last_time(&self) -> Option<Time> {
        self.last_time
    }

    /// Earliest time of the next operation.
    #[must_use]
    pub fn next_time(&self) -> Option<Time> {
        self.next_time
    }

    /// Returns the time at which an operation requested at `time` can take place.
    #[must_use]
    pub fn earliest(&self, time: Time) -> Time {
        self.next_time.map_or(time, |next| next.max(time))
    }

    /// Records a takeoff at `time`.
    pub fn record_departure(&mut self, time: Time) {
        self.last_time = Some(time);
        self.next_time = Some(time + self.departure_spacing);
    }

    /// Records a landing at `time`.
    pub fn record_arrival(&mut self, time: Time) {
        self.last_time = Some(time);
        self.next_time = Some(time + self.arrival_spacing);
    }

    /// Taxiway serving this runway.
    #[must_use]
    pub fn taxiway(&self) -> Option<NodeId> {
        self.taxiway
    }

    /// Fixes reachable from this runway.
    #[must_use]
    pub fn fixes(&self) -> &[NodeId] {
        &self.fixes
    }

    pub(super) fn neighbors(&self) -> Vec<NodeId> {
        self.taxiway
            .into_iter()
            .chain(self.fixes.iter().copied())
            .collect()
    }

    pub(super) fn add_neighbor(&mut self, neighbor: NodeId, neighbor_type: NodeType) -> bool {
        match neighbor_type {
            NodeType::Taxiway => set_slot(&mut self.taxiway, neighbor),
            NodeType::Fix => push_slot(&mut self.fixes, neighbor),
            _ => false,
        }
    }
}
