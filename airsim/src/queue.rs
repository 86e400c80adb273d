use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::{Event, Time};

/// Queue entry: an event with its ordering key.
///
/// Entries are ordered by time and then by insertion sequence number, so events scheduled at
/// the same time are polled in the order they were added.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    time: Time,
    seq: u64,
    event: Event,
}

impl Entry {
    pub(crate) fn time(&self) -> Time {
        self.time
    }

    pub(crate) fn event(&self) -> &Event {
        &self.event
    }

    pub(crate) fn into_event(self) -> Event {
        self.event
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        (self.time, self.seq) == (other.time, other.seq)
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.time, self.seq).cmp(&(other.time, other.seq))
    }
}

/// Priority queue of pending events, polled in ascending time order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    entries: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl EventQueue {
    /// Schedules `event` at its own time.
    pub fn add(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Reverse(Entry {
            time: event.time(),
            seq,
            event,
        }));
    }

    /// Removes and returns the earliest event, or `None` if the queue is empty.
    pub fn poll(&mut self) -> Option<Event> {
        self.poll_entry().map(Entry::into_event)
    }

    /// The earliest event, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Event> {
        self.entries.peek().map(|Reverse(entry)| &entry.event)
    }

    /// Number of pending events.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Same as [`EventQueue::size`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all pending events.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn poll_entry(&mut self) -> Option<Entry> {
        self.entries.pop().map(|Reverse(entry)| entry)
    }

    /// Puts back an entry removed with [`EventQueue::poll_entry`], keeping its place among
    /// events of equal time.
    pub(crate) fn restore(&mut self, entry: Entry) {
        self.entries.push(Reverse(entry));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{FlightId, Message, NodeId};
    use quickcheck_macros::quickcheck;

    fn event(time: Time, flight: usize) -> Event {
        Event::taxiway(time, NodeId::from(1), FlightId::from(flight), Message::Dep).unwrap()
    }

    #[test]
    fn test_poll_in_time_order() {
        let mut queue = EventQueue::default();
        queue.add(event(732, 0));
        queue.add(event(450, 1));
        queue.add(event(823, 2));
        assert_eq!(queue.size(), 3);
        assert_eq!(queue.peek().map(Event::time), Some(450));
        let times: Vec<_> = std::iter::from_fn(|| queue.poll())
            .map(|e| e.time())
            .collect();
        assert_eq!(times, vec![450, 732, 823]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_poll_empty() {
        let mut queue = EventQueue::default();
        assert!(queue.poll().is_none());
        assert!(queue.peek().is_none());
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_equal_times_are_fifo() {
        let mut queue = EventQueue::default();
        for flight in 0..5 {
            queue.add(event(100, flight));
        }
        queue.add(event(50, 5));
        let flights: Vec<_> = std::iter::from_fn(|| queue.poll())
            .filter_map(|e| e.flight())
            .map(usize::from)
            .collect();
        assert_eq!(flights, vec![5, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_restore_keeps_position() {
        let mut queue = EventQueue::default();
        queue.add(event(10, 0));
        queue.add(event(10, 1));
        let first = queue.poll_entry().unwrap();
        queue.add(event(10, 2));
        queue.restore(first);
        let flights: Vec<_> = std::iter::from_fn(|| queue.poll())
            .filter_map(|e| e.flight())
            .map(usize::from)
            .collect();
        assert_eq!(flights, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::default();
        queue.add(event(1, 0));
        queue.add(event(2, 1));
        queue.clear();
        assert!(queue.is_empty());
    }

    #[quickcheck]
    fn prop_polled_sorted(times: Vec<i32>) -> bool {
        let mut queue = EventQueue::default();
        for (flight, &time) in times.iter().enumerate() {
            queue.add(event(Time::from(time), flight));
        }
        let polled: Vec<_> = std::iter::from_fn(|| queue.poll())
            .map(|e| (e.time(), e.flight()))
            .collect();
        let mut expected: Vec<_> = times
            .iter()
            .enumerate()
            .map(|(flight, &time)| (Time::from(time), Some(FlightId::from(flight))))
            .collect();
        expected.sort_by_key(|(time, _)| *time);
        polled == expected
    }
}
