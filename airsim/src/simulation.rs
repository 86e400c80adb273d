use std::convert::TryFrom;

use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{EventQueue, Flights, History, Message, Network, NodeType, Result, Time};

/// Everything event processing reads and mutates, apart from the queue itself.
#[derive(Debug, Clone)]
pub struct State {
    /// Wired nodes.
    pub network: Network,
    /// All flight legs.
    pub flights: Flights,
    /// Stages processed so far.
    pub history: History,
    /// Source of stage duration samples.
    pub rng: ChaCha8Rng,
    time: Time,
}

impl State {
    /// Constructs a state at time 0 with a random generator seeded with `seed`.
    #[must_use]
    pub fn new(network: Network, flights: Flights, seed: u64) -> Self {
        Self {
            network,
            flights,
            history: History::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            time: 0,
        }
    }

    /// Time of the most recently polled event.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }
}

/// Drives the simulation: polls events in time order and processes them one at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Simulation state.
    pub state: State,
    /// Pending events.
    pub queue: EventQueue,
}

impl Simulation {
    /// Constructs a simulation from an initial state and queue.
    #[must_use]
    pub fn new(state: State, queue: EventQueue) -> Self {
        Self { state, queue }
    }

    /// Current simulation time.
    #[must_use]
    pub fn time(&self) -> Time {
        self.state.time
    }

    /// Polls and processes one event. Returns `false` if there were no events left.
    ///
    /// # Errors
    ///
    /// Returns any error raised while processing the event; the run should not continue.
    pub fn step(&mut self) -> Result<bool> {
        match self.queue.poll() {
            Some(event) => {
                log::trace!("[{}] Polled {} event", event.time(), event.kind());
                self.state.time = event.time();
                event.process(&mut self.queue, &mut self.state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Processes events until the queue is empty.
    ///
    /// # Errors
    ///
    /// See [`Simulation::step`].
    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting simulation with {} events", self.queue.size());
        while self.step()? {}
        log::info!(
            "Simulation finished at {} after {} stages",
            self.state.time,
            self.state.history.len()
        );
        Ok(())
    }

    /// Processes events with times up to and including `limit`, displaying progress.
    /// Later events are left in the queue.
    ///
    /// # Errors
    ///
    /// See [`Simulation::step`].
    pub fn run_until(&mut self, limit: Time) -> Result<Time> {
        let pb = ProgressBar::new(u64::try_from(limit).unwrap_or(0))
            .with_style(ProgressStyle::default_bar().template("{msg} {wide_bar} {percent}%"));
        while self.queue.peek().map_or(false, |event| event.time() <= limit) {
            self.step()?;
            let time = self.state.time;
            let position = u64::try_from(time).unwrap_or(0);
            if pb.position() < position {
                pb.set_position(position);
                let history = &self.state.history;
                pb.set_message(&format!(
                    "[{time}s] [Q={queued}] [OUT={out}] [OFF={off}] [ON={on}] [IN={arrived}]",
                    time = time,
                    queued = self.queue.size(),
                    out = history.count(NodeType::Terminal, Message::Dep),
                    off = history.count(NodeType::Runway, Message::Dep),
                    on = history.count(NodeType::Runway, Message::Arr),
                    arrived = history.count(NodeType::Terminal, Message::Arr),
                ));
            }
        }
        pb.finish();
        log::info!(
            "Stopped at {} with {} events pending",
            self.state.time,
            self.queue.size()
        );
        Ok(self.state.time)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::test_utils::{airport_pair, FlightSetup};
    use crate::{Event, FlightField};

    fn round_trip() -> (Simulation, crate::FlightId, crate::FlightId) {
        let (mut state, net) = airport_pair();
        let first = FlightSetup::new(1, 1)
            .sched_out(100)
            .airborne(3600)
            .push(&mut state, &net.outbound);
        let second = FlightSetup::new(1, 2)
            .sched_out(5000)
            .airborne(3000)
            .push(&mut state, &net.inbound);
        state.flights.link(first, second).unwrap();
        state
            .flights
            .get_mut(first)
            .unwrap()
            .route_mut()
            .next_node();
        let mut queue = EventQueue::default();
        queue.add(Event::terminal(40, net.outbound[0], first, Message::Dep).unwrap());
        (Simulation::new(state, queue), first, second)
    }

    #[test]
    fn test_round_trip() {
        let (mut sim, first, second) = round_trip();
        sim.run().unwrap();
        assert!(sim.queue.is_empty());
        let first = sim.state.flights.get(first).unwrap();
        // Out 40, taxi 300, climb 120, airborne 3600, descent 400, taxi-in 240.
        assert_eq!(first.get(FlightField::ActualOutTime), 40);
        assert_eq!(first.get(FlightField::ActualOffTime), 340);
        assert_eq!(first.get(FlightField::DepFixTime), 460);
        assert_eq!(first.get(FlightField::ArrFixTime), 4060);
        assert_eq!(first.get(FlightField::ActualOnTime), 4460);
        assert_eq!(first.get(FlightField::ActualInTime), 4700);
        let second = sim.state.flights.get(second).unwrap();
        // Turnaround ends at 5300, after the scheduled pushback at 4940.
        assert_eq!(second.get(FlightField::ActualOutTime), 5300);
        assert_eq!(second.get(FlightField::ActualInTime), 5300 + 300 + 120 + 3000 + 400 + 240);
        assert_eq!(sim.state.history.len(), 16);
        assert_eq!(sim.time(), 9360);
    }

    #[test]
    fn test_run_until() {
        let (mut sim, first, _) = round_trip();
        assert_eq!(sim.run_until(1000).unwrap(), 460);
        assert_eq!(sim.queue.size(), 1);
        assert_eq!(sim.queue.peek().map(Event::time), Some(4060));
        let first = sim.state.flights.get(first).unwrap();
        assert_eq!(first.get(FlightField::ActualInTime), crate::UNSET);
    }

    #[test]
    fn test_step_on_empty_queue() {
        let (state, _) = airport_pair();
        let mut sim = Simulation::new(state, EventQueue::default());
        assert!(!sim.step().unwrap());
    }
}
