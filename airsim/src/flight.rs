use crate::{Error, FlightId, Result, Route, Time, UNSET};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{EnumCount, IntoEnumIterator};

/// Named fields of a flight's parameter vector.
///
/// The discriminant is the position of the field in the vector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FlightField {
    /// Aircraft rotation the leg belongs to.
    ItineraryNumber,
    /// Position of the leg within its itinerary.
    LegNumber,
    /// Carrier index in the registry.
    Carrier,
    /// Equipment index in the registry.
    Equipment,
    /// Origin airport index.
    DepartureAirport,
    /// Destination airport index.
    ArrivalAirport,
    /// Fix crossed when leaving the origin airspace.
    DepartureFix,
    /// Fix crossed when entering the destination airspace.
    ArrivalFix,
    /// Scheduled gate departure.
    SchedOutTime,
    /// Scheduled takeoff.
    SchedOffTime,
    /// Scheduled landing.
    SchedOnTime,
    /// Scheduled gate arrival.
    SchedInTime,
    /// Actual gate departure.
    ActualOutTime,
    /// Actual takeoff.
    ActualOffTime,
    /// Actual landing.
    ActualOnTime,
    /// Actual gate arrival.
    ActualInTime,
    /// Time the flight reaches the runway after taxi-out.
    CalcOffTime,
    /// Time the flight reaches the gate after taxi-in.
    CalcInTime,
    /// Departure fix crossing time.
    DepFixTime,
    /// Arrival fix crossing time.
    ArrFixTime,
    /// Offset from scheduled out time to pushback; may be negative.
    PushbackOffset,
    /// Sampled taxi-out duration.
    TaxiOutDuration,
    /// Sampled taxi-in duration.
    TaxiInDuration,
    /// Sampled gate turnaround before the next leg.
    TurnaroundDuration,
    /// Time between departure and arrival fixes.
    AirborneDuration,
    /// Time spent waiting for the departure runway.
    DepRunwayDelay,
    /// Time spent waiting for the arrival runway.
    ArrRunwayDelay,
    /// Time spent waiting for the departure fix.
    DepFixDelay,
    /// Time spent waiting for the arrival fix.
    ArrFixDelay,
    /// Net shift applied by hold events.
    HoldDelay,
}

impl FlightField {
    /// Position of the field in a flight's parameter vector.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// All fields in vector order.
    pub fn all() -> impl Iterator<Item = FlightField> {
        Self::iter()
    }

    /// Initial value of the field for a freshly imported flight with no run data.
    fn initial(self) -> Time {
        match self {
            Self::ActualOutTime
            | Self::ActualOffTime
            | Self::ActualOnTime
            | Self::ActualInTime
            | Self::CalcOffTime
            | Self::CalcInTime
            | Self::DepFixTime
            | Self::ArrFixTime => UNSET,
            _ => 0,
        }
    }
}

/// A single flight leg.
///
/// Holds the parameter vector indexed by [`FlightField`], the links to the neighboring legs of
/// its itinerary, and the route the leg follows through the network.
#[derive(Debug, Clone)]
pub struct Flight {
    params: Vec<Time>,
    prev_leg: Option<FlightId>,
    next_leg: Option<FlightId>,
    route: Route,
}

impl Flight {
    /// Builds a flight from a full parameter vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameterCount`] if `params` does not have exactly one value per
    /// [`FlightField`].
    pub fn new(params: Vec<Time>) -> Result<Self> {
        if params.len() != FlightField::COUNT {
            return Err(Error::InvalidParameterCount {
                expected: FlightField::COUNT,
                actual: params.len(),
            });
        }
        Ok(Self {
            params,
            prev_leg: None,
            next_leg: None,
            route: Route::default(),
        })
    }

    /// A parameter vector with identity set and every other field at its initial value.
    #[must_use]
    pub fn blank_params(itinerary: i64, leg: i64) -> Vec<Time> {
        let mut params: Vec<Time> = FlightField::all().map(FlightField::initial).collect();
        params[FlightField::ItineraryNumber.index()] = itinerary;
        params[FlightField::LegNumber.index()] = leg;
        params
    }

    /// Returns the value of `field`.
    #[must_use]
    pub fn get(&self, field: FlightField) -> Time {
        self.params[field.index()]
    }

    /// Sets the value of `field`.
    pub fn set(&mut self, field: FlightField, value: Time) {
        self.params[field.index()] = value;
    }

    /// Adds `value` to `field`.
    pub fn add(&mut self, field: FlightField, value: Time) {
        self.params[field.index()] += value;
    }

    /// The whole parameter vector in [`FlightField`] order.
    #[must_use]
    pub fn params(&self) -> &[Time] {
        &self.params
    }

    /// Itinerary number.
    #[must_use]
    pub fn itinerary(&self) -> i64 {
        self.get(FlightField::ItineraryNumber)
    }

    /// Leg number within the itinerary.
    #[must_use]
    pub fn leg(&self) -> i64 {
        self.get(FlightField::LegNumber)
    }

    /// The previous leg of the itinerary.
    #[must_use]
    pub fn prev_leg(&self) -> Option<FlightId> {
        self.prev_leg
    }

    /// The next leg of the itinerary.
    #[must_use]
    pub fn next_leg(&self) -> Option<FlightId> {
        self.next_leg
    }

    /// Sets the previous leg link.
    pub fn set_prev_leg(&mut self, leg: Option<FlightId>) {
        self.prev_leg = leg;
    }

    /// Sets the next leg link.
    pub fn set_next_leg(&mut self, leg: Option<FlightId>) {
        self.next_leg = leg;
    }

    /// The route of the leg.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Mutable access to the route, used to advance its cursor.
    pub fn route_mut(&mut self) -> &mut Route {
        &mut self.route
    }

    /// Replaces the route of the leg.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Flight {}

impl PartialOrd for Flight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Flights are ordered by itinerary number, then by leg number.
impl Ord for Flight {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.itinerary(), self.leg()).cmp(&(other.itinerary(), other.leg()))
    }
}

/// Owns all flight legs of a run; legs refer to each other by [`FlightId`].
#[derive(Debug, Default, Clone)]
pub struct Flights {
    legs: Vec<Flight>,
}

impl Flights {
    /// Adds a flight leg, returning its ID.
    pub fn push(&mut self, flight: Flight) -> FlightId {
        let id = FlightId::from(self.legs.len());
        self.legs.push(flight);
        id
    }

    /// Returns the flight `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlight`] if `id` was not issued by this table.
    pub fn get(&self, id: FlightId) -> Result<&Flight> {
        self.legs
            .get(usize::from(id))
            .ok_or(Error::UnknownFlight(id))
    }

    /// Returns the flight `id` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlight`] if `id` was not issued by this table.
    pub fn get_mut(&mut self, id: FlightId) -> Result<&mut Flight> {
        self.legs
            .get_mut(usize::from(id))
            .ok_or(Error::UnknownFlight(id))
    }

    /// Links `prev` and `next` as consecutive legs of one itinerary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlight`] if either leg does not exist.
    pub fn link(&mut self, prev: FlightId, next: FlightId) -> Result<()> {
        self.get(next)?;
        self.get_mut(prev)?.set_next_leg(Some(next));
        self.get_mut(next)?.set_prev_leg(Some(prev));
        Ok(())
    }

    /// Iterates over all legs with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (FlightId, &Flight)> {
        self.legs
            .iter()
            .enumerate()
            .map(|(idx, flight)| (FlightId::from(idx), flight))
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Whether there are no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
