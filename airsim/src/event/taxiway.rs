use super::{advance, mismatch, record, Event, EventKind, StageEvent};
use crate::{
    Error, EventQueue, FlightField, Message, Network, NodeKind, NodeType, Result, State, Taxiway,
};

fn taxiway_at<'n>(network: &'n Network, event: &StageEvent) -> Result<&'n Taxiway> {
    let node = network.get(event.node())?;
    match node.kind() {
        NodeKind::Taxiway(taxiway) => Ok(taxiway),
        _ => Err(mismatch(EventKind::Taxiway, node.node_type(), node.id())),
    }
}

/// Taxi-out to the runway, or taxi-in to the gate.
pub(super) fn process(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    let taxiway = taxiway_at(&state.network, event)?;
    let (duration, duration_field, calc_field, next_type) = match event.message() {
        Message::Dep => (
            taxiway.taxi_out_duration(&mut state.rng),
            FlightField::TaxiOutDuration,
            FlightField::CalcOffTime,
            NodeType::Runway,
        ),
        Message::Arr => (
            taxiway.taxi_in_duration(&mut state.rng),
            FlightField::TaxiInDuration,
            FlightField::CalcInTime,
            NodeType::Terminal,
        ),
        message => {
            return Err(Error::InvalidMessage {
                kind: EventKind::Taxiway,
                message,
            })
        }
    };
    let done = event.time() + duration.max(0);
    let flight = state.flights.get_mut(event.flight())?;
    flight.set(duration_field, duration);
    flight.set(calc_field, done);
    record(state, event, NodeType::Taxiway, 0)?;

    let next = advance(state, event.flight(), next_type)?;
    let kind = EventKind::from(next_type);
    queue.add(Event::new(
        kind,
        done,
        next,
        event.flight(),
        event.message(),
    )?);
    Ok(())
}
