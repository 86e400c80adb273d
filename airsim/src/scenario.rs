//! Scenario files: the network, schedule, and holds of a run.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "seed": 17,
//!   "airports": [{
//!     "name": "JFK",
//!     "turnaround": { "constant": 1800 },
//!     "pushback": { "uniform": { "min": -120, "max": 300 } },
//!     "taxi_out": { "normal": { "mean": 900.0, "std": 120.0 } },
//!     "taxi_in": { "constant": 420 },
//!     "departure_spacing": 60,
//!     "arrival_spacing": 90,
//!     "climb_duration": 600
//!   }],
//!   "fixes": [{ "name": "MERIT", "airport": "JFK", "min_time_spacing": 120, "descent_duration": 900 }],
//!   "airways": [["MERIT", "DERLO"]],
//!   "flights": [{
//!     "itinerary": 1, "leg": 1, "carrier": "DL", "equipment": "B738",
//!     "origin": "JFK", "destination": "LAX", "departure_fix": "MERIT", "arrival_fix": "DERLO",
//!     "sched_out": 0, "sched_off": 900, "sched_on": 19800, "sched_in": 20400
//!   }],
//!   "holds": [{
//!     "type_to_hold": "runway", "location": "JFK", "message": "HOLD_DEP",
//!     "criterion": "sched_out_time", "time_start": 3600, "time_hold": 5400
//!   }]
//! }
//! ```
//!
//! Holds at a fix name the fix as their `location`; all other holds name an airport.

use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eyre::{eyre, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    DurationModel, Error, Event, EventKind, EventQueue, Fix, Flight, FlightField, FlightId,
    Flights, HoldEvent, Message, Network, NodeId, NodeKind, NodeType, Registry, RegistryBuilder,
    Route, Runway, Simulation, State, Taxiway, Terminal, Time,
};

/// Parameters of an airport: one terminal, taxiway, and runway.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportConfig {
    pub name: String,
    pub turnaround: DurationModel,
    pub pushback: DurationModel,
    pub taxi_out: DurationModel,
    pub taxi_in: DurationModel,
    pub departure_spacing: Time,
    pub arrival_spacing: Time,
    pub climb_duration: Time,
}

/// Fix serving the runway of `airport`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixConfig {
    pub name: String,
    pub airport: String,
    pub min_time_spacing: Time,
    pub descent_duration: Time,
}

/// Scheduled flight leg.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    pub itinerary: i64,
    pub leg: i64,
    pub carrier: String,
    pub equipment: String,
    pub origin: String,
    pub destination: String,
    pub departure_fix: String,
    pub arrival_fix: String,
    pub sched_out: Time,
    pub sched_off: Time,
    pub sched_on: Time,
    pub sched_in: Time,
}

/// Capacity hold; see [`HoldEvent`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldConfig {
    pub type_to_hold: EventKind,
    pub location: String,
    pub message: Message,
    #[serde(default = "default_criterion")]
    pub criterion: FlightField,
    pub time_start: Time,
    pub time_hold: Time,
}

fn default_criterion() -> FlightField {
    FlightField::SchedOutTime
}

/// Complete description of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Seed of the duration sampler.
    #[serde(default)]
    pub seed: u64,
    /// Airports.
    pub airports: Vec<AirportConfig>,
    /// Fixes, each attached to one airport.
    pub fixes: Vec<FixConfig>,
    /// Pairs of fixes connected by an airway.
    #[serde(default)]
    pub airways: Vec<(String, String)>,
    /// Flight schedule.
    pub flights: Vec<FlightConfig>,
    /// Holds scheduled in advance.
    #[serde(default)]
    pub holds: Vec<HoldConfig>,
}

#[derive(Debug, Clone, Copy)]
struct AirportNodes {
    terminal: NodeId,
    taxiway: NodeId,
    runway: NodeId,
}

/// Network built from a scenario, with the node IDs of each airport and fix.
struct Layout {
    network: Network,
    airports: Vec<AirportNodes>,
    fixes: Vec<NodeId>,
}

impl Scenario {
    /// Loads a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid scenario.
    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        let file = File::open(path)
            .wrap_err_with(|| eyre!("unable to open scenario file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| eyre!("unable to parse scenario: {}", path.display()))
    }

    /// Parses a scenario from a JSON string.
    ///
    /// # Errors
    ///
    /// Fails if `json` is not a valid scenario.
    pub fn from_json(json: &str) -> eyre::Result<Self> {
        serde_json::from_str(json).wrap_err("unable to parse scenario")
    }

    /// Builds the registry and a simulation ready to run: the wired network, the flights with
    /// their routes and itinerary links, and the initial events.
    ///
    /// # Errors
    ///
    /// Fails on unknown or duplicate names, wiring that the node types do not allow, or
    /// flights whose fixes are not served by their airports or not connected by an airway.
    pub fn initialize(&self) -> eyre::Result<(Registry, Simulation)> {
        let registry = self.registry()?;
        let Layout {
            network,
            airports,
            fixes,
        } = self.layout(&registry)?;
        let mut state = State::new(network, Flights::default(), self.seed);
        for config in &self.flights {
            let flight = build_flight(config, &registry, &airports, &fixes, &state.network)
                .wrap_err_with(|| eyre!("invalid flight {}/{}", config.itinerary, config.leg))?;
            state.flights.push(flight);
        }
        let first_legs = link_itineraries(&mut state.flights)?;

        // Holds go first so that they precede any stage event at their start time.
        let mut queue = EventQueue::default();
        for hold in &self.holds {
            let node = hold_node(hold, &registry, &airports, &fixes)
                .wrap_err_with(|| eyre!("invalid hold at {}", hold.location))?;
            queue.add(Event::from(HoldEvent::new(
                hold.type_to_hold,
                node,
                hold.message,
                hold.criterion,
                hold.time_start,
                hold.time_hold,
            )?));
        }
        for id in first_legs {
            queue.add(first_departure(&mut state, id)?);
        }
        log::info!(
            "Initialized {} nodes, {} flights, {} events",
            state.network.len(),
            state.flights.len(),
            queue.size()
        );
        Ok((registry, Simulation::new(state, queue)))
    }

    fn registry(&self) -> eyre::Result<Registry> {
        let mut builder = RegistryBuilder::default();
        let mut seen = HashSet::new();
        for airport in &self.airports {
            if !seen.insert(airport.name.as_str()) {
                return Err(eyre!("duplicate airport: {}", airport.name));
            }
            builder.airport(&airport.name);
        }
        seen.clear();
        for fix in &self.fixes {
            if !seen.insert(fix.name.as_str()) {
                return Err(eyre!("duplicate fix: {}", fix.name));
            }
            builder.fix(&fix.name);
        }
        for flight in &self.flights {
            builder.carrier(&flight.carrier);
            builder.equipment(&flight.equipment);
        }
        Ok(builder.build())
    }

    fn layout(&self, registry: &Registry) -> eyre::Result<Layout> {
        let mut network = Network::default();
        let airports = self
            .airports
            .iter()
            .enumerate()
            .map(|(location, config)| -> crate::Result<AirportNodes> {
                let terminal = network.add_node(
                    location,
                    Terminal::new(config.turnaround.clone(), config.pushback.clone()),
                );
                let taxiway = network.add_node(
                    location,
                    Taxiway::new(config.taxi_out.clone(), config.taxi_in.clone()),
                );
                let runway = network.add_node(
                    location,
                    Runway::new(
                        config.departure_spacing,
                        config.arrival_spacing,
                        config.climb_duration,
                    ),
                );
                network.connect(terminal, taxiway)?;
                network.connect(taxiway, runway)?;
                Ok(AirportNodes {
                    terminal,
                    taxiway,
                    runway,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        let fixes = self
            .fixes
            .iter()
            .enumerate()
            .map(|(location, config)| -> eyre::Result<NodeId> {
                let airport = registry
                    .airport_id(&config.airport)
                    .wrap_err_with(|| eyre!("invalid fix {}", config.name))?;
                let fix = network.add_node(
                    location,
                    Fix::new(config.min_time_spacing, config.descent_duration),
                );
                network.connect(airports[usize::from(airport)].runway, fix)?;
                Ok(fix)
            })
            .collect::<eyre::Result<Vec<_>>>()?;
        for (lhs, rhs) in &self.airways {
            let lhs = fixes[usize::from(registry.fix_id(lhs)?)];
            let rhs = fixes[usize::from(registry.fix_id(rhs)?)];
            network
                .connect(lhs, rhs)
                .wrap_err("invalid airway")?;
        }
        Ok(Layout {
            network,
            airports,
            fixes,
        })
    }
}

fn build_flight(
    config: &FlightConfig,
    registry: &Registry,
    airports: &[AirportNodes],
    fixes: &[NodeId],
    network: &Network,
) -> eyre::Result<Flight> {
    let origin = registry.airport_id(&config.origin)?;
    let destination = registry.airport_id(&config.destination)?;
    let departure_fix = registry.fix_id(&config.departure_fix)?;
    let arrival_fix = registry.fix_id(&config.arrival_fix)?;
    let origin_nodes = airports[usize::from(origin)];
    let destination_nodes = airports[usize::from(destination)];
    let dep_fix_node = fixes[usize::from(departure_fix)];
    let arr_fix_node = fixes[usize::from(arrival_fix)];

    let dep_fix = fix_at(network, dep_fix_node)?;
    if !dep_fix.runways().contains(&origin_nodes.runway) {
        return Err(eyre!(
            "fix {} does not serve {}",
            config.departure_fix,
            config.origin
        ));
    }
    if !dep_fix.airways().contains(&arr_fix_node) {
        return Err(eyre!(
            "no airway between {} and {}",
            config.departure_fix,
            config.arrival_fix
        ));
    }
    let arr_fix = fix_at(network, arr_fix_node)?;
    if !arr_fix.runways().contains(&destination_nodes.runway) {
        return Err(eyre!(
            "fix {} does not serve {}",
            config.arrival_fix,
            config.destination
        ));
    }
    let climb = match network.get(origin_nodes.runway)?.kind() {
        NodeKind::Runway(runway) => runway.climb_duration(),
        _ => 0,
    };
    let airborne =
        ((config.sched_on - config.sched_off) - climb - arr_fix.descent_duration()).max(0);

    let mut params = Flight::blank_params(config.itinerary, config.leg);
    let mut set = |field: FlightField, value: Time| params[field.index()] = value;
    set(FlightField::Carrier, id_value(registry.carrier_id(&config.carrier)?));
    set(
        FlightField::Equipment,
        id_value(registry.equipment_id(&config.equipment)?),
    );
    set(FlightField::DepartureAirport, id_value(origin));
    set(FlightField::ArrivalAirport, id_value(destination));
    set(FlightField::DepartureFix, id_value(departure_fix));
    set(FlightField::ArrivalFix, id_value(arrival_fix));
    set(FlightField::SchedOutTime, config.sched_out);
    set(FlightField::SchedOffTime, config.sched_off);
    set(FlightField::SchedOnTime, config.sched_on);
    set(FlightField::SchedInTime, config.sched_in);
    set(FlightField::AirborneDuration, airborne);

    let mut flight = Flight::new(params)?;
    flight.set_route(Route::new(vec![
        origin_nodes.terminal,
        origin_nodes.taxiway,
        origin_nodes.runway,
        dep_fix_node,
        arr_fix_node,
        destination_nodes.runway,
        destination_nodes.taxiway,
        destination_nodes.terminal,
    ]));
    Ok(flight)
}

fn id_value<I: Into<usize>>(id: I) -> Time {
    Time::try_from(id.into()).unwrap_or(Time::MAX)
}

fn fix_at(network: &Network, id: NodeId) -> crate::Result<&Fix> {
    let node = network.get(id)?;
    match node.kind() {
        NodeKind::Fix(fix) => Ok(fix),
        _ => Err(Error::NodeKindMismatch {
            kind: EventKind::Fix,
            node: node.node_type(),
            node_id: id,
        }),
    }
}

/// Links the legs of each itinerary in leg order and returns the first leg of each.
fn link_itineraries(flights: &mut Flights) -> eyre::Result<Vec<FlightId>> {
    let ordered: Vec<(FlightId, i64, i64)> = flights
        .iter()
        .map(|(id, flight)| (id, flight.itinerary(), flight.leg()))
        .sorted_by_key(|&(_, itinerary, leg)| (itinerary, leg))
        .collect();
    let mut first_legs = Vec::new();
    for (itinerary, legs) in &ordered.iter().group_by(|(_, itinerary, _)| *itinerary) {
        let legs: Vec<_> = legs.collect();
        for (prev, next) in legs.iter().tuple_windows() {
            if prev.2 == next.2 {
                return Err(eyre!("duplicate leg {} of itinerary {}", prev.2, itinerary));
            }
            flights.link(prev.0, next.0)?;
        }
        if let Some(first) = legs.first() {
            first_legs.push(first.0);
        }
    }
    Ok(first_legs)
}

/// Pushback of the first leg of an itinerary, at its scheduled out time shifted by a sampled
/// offset.
fn first_departure(state: &mut State, id: FlightId) -> eyre::Result<Event> {
    let flight = state.flights.get_mut(id)?;
    let gate = flight
        .route_mut()
        .next_node()
        .ok_or_else(|| eyre!("flight {} has an empty route", id))?;
    let pushback = match state.network.get(gate)?.kind() {
        NodeKind::Terminal(terminal) => terminal.pushback_offset(&mut state.rng),
        _ => return Err(eyre!("flight {} does not start at a terminal", id)),
    };
    let flight = state.flights.get_mut(id)?;
    flight.set(FlightField::PushbackOffset, pushback);
    let out = flight.get(FlightField::SchedOutTime) + pushback;
    Ok(Event::terminal(out, gate, id, Message::Dep)?)
}

fn hold_node(
    hold: &HoldConfig,
    registry: &Registry,
    airports: &[AirportNodes],
    fixes: &[NodeId],
) -> crate::Result<NodeId> {
    match hold.type_to_hold.node_type() {
        None => Err(Error::HoldOfHold),
        Some(NodeType::Fix) => Ok(fixes[usize::from(registry.fix_id(&hold.location)?)]),
        Some(node_type) => {
            let nodes = airports[usize::from(registry.airport_id(&hold.location)?)];
            Ok(match node_type {
                NodeType::Terminal => nodes.terminal,
                NodeType::Taxiway => nodes.taxiway,
                _ => nodes.runway,
            })
        }
    }
}
