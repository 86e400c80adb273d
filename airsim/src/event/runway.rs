use super::{advance, mismatch, record, wait_for_capacity, Event, EventKind, StageEvent};
use crate::{
    Error, EventQueue, FlightField, Message, Network, NodeKind, NodeType, Result, Runway, State,
};

fn runway_at<'n>(network: &'n mut Network, event: &StageEvent) -> Result<&'n mut Runway> {
    let node = network.get_mut(event.node())?;
    let (node_type, node_id) = (node.node_type(), node.id());
    match node.kind_mut() {
        NodeKind::Runway(runway) => Ok(runway),
        _ => Err(mismatch(EventKind::Runway, node_type, node_id)),
    }
}

/// Takeoff or landing, subject to the runway's spacing since its previous operation.
pub(super) fn process(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    let delay_field = match event.message() {
        Message::Dep => FlightField::DepRunwayDelay,
        Message::Arr => FlightField::ArrRunwayDelay,
        message => {
            return Err(Error::InvalidMessage {
                kind: EventKind::Runway,
                message,
            })
        }
    };
    let earliest = runway_at(&mut state.network, event)?.earliest(event.time());
    if wait_for_capacity(event, EventKind::Runway, earliest, delay_field, queue, state)? {
        return Ok(());
    }

    let time = event.time();
    let runway = runway_at(&mut state.network, event)?;
    let climb = runway.climb_duration();
    if event.message() == Message::Dep {
        runway.record_departure(time);
    } else {
        runway.record_arrival(time);
    }

    let flight = state.flights.get_mut(event.flight())?;
    let delay = flight.get(delay_field);
    if event.message() == Message::Dep {
        flight.set(FlightField::ActualOffTime, time);
        record(state, event, NodeType::Runway, delay)?;
        let fix = advance(state, event.flight(), NodeType::Fix)?;
        queue.add(Event::fix(time + climb, fix, event.flight(), Message::Dep)?);
    } else {
        flight.set(FlightField::ActualOnTime, time);
        record(state, event, NodeType::Runway, delay)?;
        let taxiway = advance(state, event.flight(), NodeType::Taxiway)?;
        queue.add(Event::taxiway(time, taxiway, event.flight(), Message::Arr)?);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::test_utils::{airport_pair, FlightSetup};

    #[test]
    fn test_takeoff() {
        let (mut state, net) = airport_pair();
        let flight = FlightSetup::new(1, 1).push(&mut state, &net.outbound[2..]);
        advance(&mut state, flight, NodeType::Runway).unwrap();
        let mut queue = EventQueue::default();
        Event::runway(400, net.outbound[2], flight, Message::Dep)
            .unwrap()
            .process(&mut queue, &mut state)
            .unwrap();
        assert_eq!(
            state
                .flights
                .get(flight)
                .unwrap()
                .get(FlightField::ActualOffTime),
            400
        );
        let next = queue.poll().unwrap();
        assert_eq!(next.kind(), EventKind::Fix);
        assert_eq!(next.time(), 520);
        assert_eq!(next.node(), net.outbound[3]);
        match state.network.get(net.outbound[2]).unwrap().kind() {
            NodeKind::Runway(runway) => {
                assert_eq!(runway.last_time(), Some(400));
                assert_eq!(runway.next_time(), Some(460));
            }
            _ => panic!("not a runway"),
        }
    }

    #[test]
    fn test_spacing_delays_second_departure() {
        let (mut state, net) = airport_pair();
        let first = FlightSetup::new(1, 1).push(&mut state, &net.outbound[2..]);
        let second = FlightSetup::new(2, 1).push(&mut state, &net.outbound[2..]);
        advance(&mut state, first, NodeType::Runway).unwrap();
        advance(&mut state, second, NodeType::Runway).unwrap();
        let mut queue = EventQueue::default();
        queue.add(Event::runway(400, net.outbound[2], first, Message::Dep).unwrap());
        queue.add(Event::runway(410, net.outbound[2], second, Message::Dep).unwrap());

        let event = queue.poll().unwrap();
        event.process(&mut queue, &mut state).unwrap();
        let event = queue.poll().unwrap();
        assert_eq!(event.flight(), Some(second));
        event.process(&mut queue, &mut state).unwrap();

        // The second departure is pushed to the end of the spacing interval.
        let event = queue.poll().unwrap();
        assert_eq!(event.kind(), EventKind::Runway);
        assert_eq!(event.time(), 460);
        assert_eq!(
            state
                .flights
                .get(second)
                .unwrap()
                .get(FlightField::DepRunwayDelay),
            50
        );
        event.process(&mut queue, &mut state).unwrap();
        assert_eq!(
            state
                .flights
                .get(second)
                .unwrap()
                .get(FlightField::ActualOffTime),
            460
        );
        let times: Vec<_> = std::iter::from_fn(|| queue.poll()).map(|e| e.time()).collect();
        assert_eq!(times, vec![520, 580]);
    }

    #[test]
    fn test_landing() {
        let (mut state, net) = airport_pair();
        let flight = FlightSetup::new(1, 1).push(&mut state, &net.outbound[5..]);
        advance(&mut state, flight, NodeType::Runway).unwrap();
        let mut queue = EventQueue::default();
        Event::runway(900, net.outbound[5], flight, Message::Arr)
            .unwrap()
            .process(&mut queue, &mut state)
            .unwrap();
        let next = queue.poll().unwrap();
        assert_eq!(next.kind(), EventKind::Taxiway);
        assert_eq!(next.time(), 900);
        assert_eq!(next.message(), Message::Arr);
        assert_eq!(
            state
                .flights
                .get(flight)
                .unwrap()
                .get(FlightField::ActualOnTime),
            900
        );
    }

    #[test]
    fn test_wrong_node_kind() {
        let (mut state, net) = airport_pair();
        let flight = FlightSetup::new(1, 1).push(&mut state, &net.outbound);
        let mut queue = EventQueue::default();
        let result = Event::runway(900, net.outbound[0], flight, Message::Arr)
            .unwrap()
            .process(&mut queue, &mut state);
        assert!(matches!(result, Err(Error::NodeKindMismatch { .. })));
    }
}
