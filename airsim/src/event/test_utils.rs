use crate::{
    DurationModel, Fix, Flight, FlightField, FlightId, Network, NodeId, Route, Runway, State,
    Taxiway, Terminal, Time,
};

/// Routes through [`airport_pair`]: `outbound` from airport 0 to airport 1, `inbound` back.
pub(crate) struct Routes {
    pub outbound: Vec<NodeId>,
    pub inbound: Vec<NodeId>,
}

fn airport(network: &mut Network, location: usize) -> (NodeId, NodeId, NodeId) {
    let terminal = network.add_node(
        location,
        Terminal::new(DurationModel::constant(600), DurationModel::constant(-60)),
    );
    let taxiway = network.add_node(
        location,
        Taxiway::new(DurationModel::constant(300), DurationModel::constant(240)),
    );
    let runway = network.add_node(location, Runway::new(60, 90, 120));
    (terminal, taxiway, runway)
}

/// Two airports joined by an airway between their fixes.
///
/// Node IDs 0 to 3 are the terminal, taxiway, runway, and fix of airport 0; 4 to 7 are the fix,
/// runway, taxiway, and terminal of airport 1.
pub(crate) fn airport_pair() -> (State, Routes) {
    let mut network = Network::default();
    let (terminal_a, taxiway_a, runway_a) = airport(&mut network, 0);
    let fix_a = network.add_node(0, Fix::new(100, 400));
    let fix_b = network.add_node(1, Fix::new(100, 400));
    let runway_b = network.add_node(1, Runway::new(60, 90, 120));
    let taxiway_b = network.add_node(
        1,
        Taxiway::new(DurationModel::constant(300), DurationModel::constant(240)),
    );
    let terminal_b = network.add_node(
        1,
        Terminal::new(DurationModel::constant(600), DurationModel::constant(-60)),
    );
    let outbound = vec![
        terminal_a, taxiway_a, runway_a, fix_a, fix_b, runway_b, taxiway_b, terminal_b,
    ];
    for pair in outbound.windows(2) {
        network.connect(pair[0], pair[1]).unwrap();
    }
    let inbound = outbound.iter().rev().copied().collect();
    (
        State::new(network, Default::default(), 0),
        Routes { outbound, inbound },
    )
}

/// Builder of test flight legs.
pub(crate) struct FlightSetup {
    params: Vec<Time>,
}

impl FlightSetup {
    pub fn new(itinerary: i64, leg: i64) -> Self {
        Self {
            params: Flight::blank_params(itinerary, leg),
        }
    }

    pub fn sched_out(mut self, time: Time) -> Self {
        self.params[FlightField::SchedOutTime.index()] = time;
        self
    }

    pub fn airborne(mut self, duration: Time) -> Self {
        self.params[FlightField::AirborneDuration.index()] = duration;
        self
    }

    pub fn push(self, state: &mut State, route: &[NodeId]) -> FlightId {
        let mut flight = Flight::new(self.params).unwrap();
        flight.set_route(Route::new(route.to_vec()));
        state.flights.push(flight)
    }
}
