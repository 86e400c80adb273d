//! Result files of a run.

use std::convert::TryFrom;
use std::io::Write;
use std::path::Path;

use eyre::{eyre, WrapErr};

use crate::{CarrierId, EquipmentId, FlightField, Flights, History, Registry, Simulation, Time};

/// Name of the per-leg output file.
pub const FLIGHTS_FILE: &str = "flights.csv";

/// Name of the stage history output file.
pub const HISTORY_FILE: &str = "history.csv";

/// Writes one row per flight leg with one column per [`FlightField`], followed by the carrier
/// and equipment names resolved through `registry`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_flights<W: Write>(
    writer: W,
    flights: &Flights,
    registry: &Registry,
) -> eyre::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(
        FlightField::all()
            .map(<&'static str>::from)
            .chain(std::iter::once("carrier_name"))
            .chain(std::iter::once("equipment_name")),
    )?;
    for (_, flight) in flights.iter() {
        let id = |field: FlightField| usize::try_from(flight.get(field)).ok();
        let carrier = id(FlightField::Carrier)
            .and_then(|id| registry.carrier_name(CarrierId::from(id)))
            .unwrap_or_default();
        let equipment = id(FlightField::Equipment)
            .and_then(|id| registry.equipment_name(EquipmentId::from(id)))
            .unwrap_or_default();
        writer.write_record(
            flight
                .params()
                .iter()
                .map(Time::to_string)
                .chain(std::iter::once(carrier.to_string()))
                .chain(std::iter::once(equipment.to_string())),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one row per processed stage.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_history<W: Write>(writer: W, history: &History) -> eyre::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in history.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes [`FLIGHTS_FILE`] and [`HISTORY_FILE`] into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or any of the files cannot be written.
pub fn write_results(dir: &Path, simulation: &Simulation, registry: &Registry) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| eyre!("unable to create output directory: {}", dir.display()))?;
    let path = dir.join(FLIGHTS_FILE);
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| eyre!("unable to create {}", path.display()))?;
    write_flights(file, &simulation.state.flights, registry)
        .wrap_err_with(|| eyre!("unable to write {}", path.display()))?;
    let path = dir.join(HISTORY_FILE);
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| eyre!("unable to create {}", path.display()))?;
    write_history(file, &simulation.state.history)
        .wrap_err_with(|| eyre!("unable to write {}", path.display()))?;
    log::info!("Results written to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Flight, FlightId, Message, NodeId, NodeType, RegistryBuilder, StageRecord};

    #[test]
    fn test_write_flights() {
        let mut builder = RegistryBuilder::default();
        builder.carrier("DL");
        builder.equipment("B738");
        let registry = builder.build();
        let mut flights = Flights::default();
        flights.push(Flight::new(Flight::blank_params(3, 1)).unwrap());
        let mut buf = Vec::new();
        write_flights(&mut buf, &flights, &registry).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("itinerary_number,leg_number,carrier,"));
        assert!(header.ends_with("hold_delay,carrier_name,equipment_name"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("3,1,0,0,"));
        assert!(row.ends_with(",DL,B738"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_history() {
        let mut history = History::default();
        history.push(StageRecord {
            time: 40,
            flight: FlightId::from(0),
            itinerary: 1,
            leg: 1,
            stage: NodeType::Terminal,
            node: NodeId::from(0),
            location: 0,
            message: Message::Dep,
            delay: 0,
        });
        let mut buf = Vec::new();
        write_history(&mut buf, &history).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "time,flight,itinerary,leg,stage,node,location,message,delay\n\
             40,0,1,1,terminal,0,0,DEP,0\n"
        );
    }
}
