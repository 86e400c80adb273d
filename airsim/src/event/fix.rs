use super::{advance, mismatch, record, wait_for_capacity, Event, EventKind, StageEvent};
use crate::{
    Error, EventQueue, Fix, FlightField, Message, Network, NodeKind, NodeType, Result, State,
};

fn fix_at<'n>(network: &'n mut Network, event: &StageEvent) -> Result<&'n mut Fix> {
    let node = network.get_mut(event.node())?;
    let (node_type, node_id) = (node.node_type(), node.id());
    match node.kind_mut() {
        NodeKind::Fix(fix) => Ok(fix),
        _ => Err(mismatch(EventKind::Fix, node_type, node_id)),
    }
}

/// Crossing of the departure fix, followed by the en-route flight to the arrival fix, or of the
/// arrival fix, followed by the descent to the runway.
pub(super) fn process(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    let (delay_field, time_field) = match event.message() {
        Message::Dep => (FlightField::DepFixDelay, FlightField::DepFixTime),
        Message::Arr => (FlightField::ArrFixDelay, FlightField::ArrFixTime),
        message => {
            return Err(Error::InvalidMessage {
                kind: EventKind::Fix,
                message,
            })
        }
    };
    let earliest = fix_at(&mut state.network, event)?.earliest(event.time());
    if wait_for_capacity(event, EventKind::Fix, earliest, delay_field, queue, state)? {
        return Ok(());
    }

    let time = event.time();
    let fix = fix_at(&mut state.network, event)?;
    fix.compute_next_time(time);
    let descent = fix.descent_duration();

    let flight = state.flights.get_mut(event.flight())?;
    flight.set(time_field, time);
    let delay = flight.get(delay_field);
    let airborne = flight.get(FlightField::AirborneDuration).max(0);
    record(state, event, NodeType::Fix, delay)?;

    if event.message() == Message::Dep {
        let arrival_fix = advance(state, event.flight(), NodeType::Fix)?;
        queue.add(Event::fix(
            time + airborne,
            arrival_fix,
            event.flight(),
            Message::Arr,
        )?);
    } else {
        let runway = advance(state, event.flight(), NodeType::Runway)?;
        queue.add(Event::runway(
            time + descent,
            runway,
            event.flight(),
            Message::Arr,
        )?);
    }
    Ok(())
}
