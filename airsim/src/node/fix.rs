use super::{push_slot, NodeType};
use crate::{NodeId, Time};

/// Navigational fix at the boundary of an airport's airspace.
///
/// Consecutive crossings must be at least `min_time_spacing` apart.
#[derive(Debug, Clone)]
pub struct Fix {
    min_time_spacing: Time,
    descent_duration: Time,
    last_time: Option<Time>,
    next_time: Option<Time>,
    runways: Vec<NodeId>,
    airways: Vec<NodeId>,
}

impl Fix {
    /// Constructs a fix.
    ///
    /// `descent_duration` is the flying time from this fix to the runway for arrivals.
    #[must_use]
    pub fn new(min_time_spacing: Time, descent_duration: Time) -> Self {
        Self {
            min_time_spacing,
            descent_duration,
            last_time: None,
            next_time: None,
            runways: Vec::new(),
            airways: Vec::new(),
        }
    }

    /// Minimum time between two crossings.
    #[must_use]
    pub fn min_time_spacing(&self) -> Time {
        self.min_time_spacing
    }

    /// Flying time from the fix to the arrival runway.
    #[must_use]
    pub fn descent_duration(&self) -> Time {
        self.descent_duration
    }

    /// Time of the latest crossing.
    #[must_use]
    pub fn last_time(&self) -> Option<Time> {
        self.last_time
    }

    /// Earliest time of the next crossing.
    #[must_use]
    pub fn next_time(&self) -> Option<Time> {
        self.next_time
    }

    /// Returns the time at which a crossing requested at `time` can take place.
    #[must_use]
    pub fn earliest(&self, time: Time) -> Time {
        self.next_time.map_or(time, |next| next.max(time))
    }

    /// Records a crossing at `time`.
    pub fn compute_next_time(&mut self, time: Time) {
        self.last_time = Some(time);
        self.next_time = Some(time + self.min_time_spacing);
    }

    /// Runways served by the fix.
    #[must_use]
    pub fn runways(&self) -> &[NodeId] {
        &self.runways
    }

    /// Fixes of other airports connected by airways.
    #[must_use]
    pub fn airways(&self) -> &[NodeId] {
        &self.airways
    }

    pub(super) fn neighbors(&self) -> Vec<NodeId> {
        self.runways
            .iter()
            .chain(self.airways.iter())
            .copied()
            .collect()
    }

    pub(super) fn add_neighbor(&mut self, neighbor: NodeId, neighbor_type: NodeType) -> bool {
        match neighbor_type {
            NodeType::Runway => push_slot(&mut self.runways, neighbor),
            NodeType::Fix => push_slot(&mut self.airways, neighbor),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compute_next_time() {
        let mut fix = Fix::new(1030, 0);
        assert_eq!(fix.last_time(), None);
        assert_eq!(fix.next_time(), None);
        fix.compute_next_time(143);
        assert_eq!(fix.next_time(), Some(1173));
        assert_eq!(fix.last_time(), Some(143));
        fix.compute_next_time(333);
        assert_eq!(fix.next_time(), Some(1363));
        assert_eq!(fix.last_time(), Some(333));
    }

    #[test]
    fn test_earliest() {
        let mut fix = Fix::new(100, 0);
        assert_eq!(fix.earliest(5), 5);
        fix.compute_next_time(50);
        assert_eq!(fix.earliest(60), 150);
        assert_eq!(fix.earliest(150), 150);
        assert_eq!(fix.earliest(151), 151);
    }
}
