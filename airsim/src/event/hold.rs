use super::{Event, EventKind, Message};
use crate::{Error, EventQueue, FlightField, NodeId, Result, State, Time};

/// Temporary capacity hold at a node.
///
/// When processed, every pending event of kind `type_to_hold` at `node` carrying the held
/// message and scheduled in `[time_start, time_hold)` is delayed. Held events are re-timed to
/// `time_hold, time_hold + 1, ...` in ascending order of the `criterion` field of their flights;
/// ties keep their queue order.
///
/// Shifting `k` events past `time_hold` occupies `[time_hold, time_hold + k)`, so matching
/// events originally scheduled in that window are held as well. The window grows until no new
/// matching events are found. Release times saturate at `Time::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldEvent {
    time: Time,
    node: NodeId,
    message: Message,
    type_to_hold: EventKind,
    criterion: FlightField,
    time_start: Time,
    time_hold: Time,
}

impl HoldEvent {
    /// Constructs a hold. The hold itself is scheduled at `time_start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMessage`] if `message` is not [`Message::HoldDep`] or
    /// [`Message::HoldArr`], and [`Error::HoldOfHold`] if `type_to_hold` is
    /// [`EventKind::Hold`].
    pub fn new(
        type_to_hold: EventKind,
        node: NodeId,
        message: Message,
        criterion: FlightField,
        time_start: Time,
        time_hold: Time,
    ) -> Result<Self> {
        if message.held().is_none() {
            return Err(Error::InvalidMessage {
                kind: EventKind::Hold,
                message,
            });
        }
        if type_to_hold == EventKind::Hold {
            return Err(Error::HoldOfHold);
        }
        Ok(Self {
            time: time_start,
            node,
            message,
            type_to_hold,
            criterion,
            time_start,
            time_hold,
        })
    }

    /// Time at which the hold is processed.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    pub(super) fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    /// Node whose events are held.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Either [`Message::HoldDep`] or [`Message::HoldArr`].
    #[must_use]
    pub fn message(&self) -> Message {
        self.message
    }

    /// Kind of the events held.
    #[must_use]
    pub fn type_to_hold(&self) -> EventKind {
        self.type_to_hold
    }

    /// Flight field ordering the released events.
    #[must_use]
    pub fn criterion(&self) -> FlightField {
        self.criterion
    }

    /// Beginning of the hold window.
    #[must_use]
    pub fn time_start(&self) -> Time {
        self.time_start
    }

    /// Release time of the first held event.
    #[must_use]
    pub fn time_hold(&self) -> Time {
        self.time_hold
    }

    fn matches(&self, event: &Event) -> bool {
        event.kind() == self.type_to_hold
            && event.node() == self.node
            && Some(event.message()) == self.message.held()
            && event.time() >= self.time_start
    }

    /// Collects, orders, and re-times the held events.
    ///
    /// The queue holds the same number of events afterwards; events that do not match are
    /// restored unchanged, including their position among equal-time events.
    pub(super) fn process(&self, queue: &mut EventQueue, state: &mut State) -> Result<()> {
        let mut held: Vec<Event> = Vec::new();
        let mut deferred = Vec::new();
        let mut extra_time: Time = 0;
        loop {
            let mut found: Time = 0;
            while let Some(entry) = queue.poll_entry() {
                if entry.time() > self.time_hold.saturating_add(extra_time) {
                    queue.restore(entry);
                    break;
                }
                if self.matches(entry.event()) {
                    held.push(entry.into_event());
                    found += 1;
                } else {
                    deferred.push(entry);
                }
            }
            if found == 0 {
                break;
            }
            extra_time += found;
        }
        for entry in deferred {
            queue.restore(entry);
        }

        let mut keyed = held
            .into_iter()
            .map(|event| {
                let key = match event.flight() {
                    Some(flight) => state.flights.get(flight)?.get(self.criterion),
                    None => Time::MIN,
                };
                Ok((key, event))
            })
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by_key(|(key, _)| *key);

        log::info!(
            "[{}] Holding {} {} {} events at node {} until {}",
            self.time,
            keyed.len(),
            self.type_to_hold,
            self.message,
            self.node,
            self.time_hold
        );
        for (offset, (_, event)) in (0..).zip(keyed) {
            let release = self.time_hold.saturating_add(offset);
            if let Some(flight) = event.flight() {
                state
                    .flights
                    .get_mut(flight)?
                    .add(FlightField::HoldDelay, release - event.time());
            }
            queue.add(event.with_time(release));
        }
        Ok(())
    }
}
