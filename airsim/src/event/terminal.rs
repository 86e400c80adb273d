use super::{advance, mismatch, record, Event, EventKind, StageEvent};
use crate::{
    Error, EventQueue, FlightField, Message, Network, NodeKind, NodeType, Result, State, Terminal,
};

pub(super) fn process(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    match event.message() {
        Message::Dep => departure(event, queue, state),
        Message::Arr => arrival(event, queue, state),
        message => Err(Error::InvalidMessage {
            kind: EventKind::Terminal,
            message,
        }),
    }
}

fn terminal_at<'n>(network: &'n Network, event: &StageEvent) -> Result<&'n Terminal> {
    let node = network.get(event.node())?;
    match node.kind() {
        NodeKind::Terminal(terminal) => Ok(terminal),
        _ => Err(mismatch(EventKind::Terminal, node.node_type(), node.id())),
    }
}

/// Pushback: the leg leaves the gate and enters the taxiway at the same time.
fn departure(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    terminal_at(&state.network, event)?;
    state
        .flights
        .get_mut(event.flight())?
        .set(FlightField::ActualOutTime, event.time());
    record(state, event, NodeType::Terminal, 0)?;
    let taxiway = advance(state, event.flight(), NodeType::Taxiway)?;
    queue.add(Event::taxiway(
        event.time(),
        taxiway,
        event.flight(),
        Message::Dep,
    )?);
    Ok(())
}

/// Gate arrival. Schedules the pushback of the next leg of the itinerary, if any, no earlier
/// than the turnaround allows and no earlier than its scheduled pushback.
fn arrival(event: &StageEvent, queue: &mut EventQueue, state: &mut State) -> Result<()> {
    let time = event.time();
    let flight = state.flights.get_mut(event.flight())?;
    flight.set(FlightField::ActualInTime, time);
    let next_leg = flight.next_leg();
    record(state, event, NodeType::Terminal, 0)?;

    let next_leg = match next_leg {
        Some(next_leg) => next_leg,
        None => {
            log::debug!("[{}] Itinerary of flight {} finished", time, event.flight());
            return Ok(());
        }
    };

    let terminal = terminal_at(&state.network, event)?;
    let turnaround = terminal.turnaround_duration(&mut state.rng);
    let pushback = terminal.pushback_offset(&mut state.rng);
    state
        .flights
        .get_mut(event.flight())?
        .set(FlightField::TurnaroundDuration, turnaround);

    let next = state.flights.get_mut(next_leg)?;
    next.set(FlightField::PushbackOffset, pushback);
    let min_out_time = time + turnaround;
    let sched_pushback = next.get(FlightField::SchedOutTime) + pushback;
    let out_time = min_out_time.max(sched_pushback);
    next.set(FlightField::ActualOutTime, out_time);
    log::debug!(
        "[{}] Flight {} turns around as {}, pushback at {}",
        time,
        event.flight(),
        next_leg,
        out_time
    );

    let gate = advance(state, next_leg, NodeType::Terminal)?;
    queue.add(Event::terminal(
        out_time,
        gate,
        next_leg,
        Message::Dep,
    )?);
    Ok(())
}
