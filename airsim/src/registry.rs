use std::collections::HashMap;

use crate::{AirportId, CarrierId, EquipmentId, Error, FixId, Result};

/// Kind of name held by the [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// Airport code.
    Airport,
    /// Airline code.
    Carrier,
    /// Aircraft type.
    Equipment,
    /// Navigational fix.
    Fix,
}

/// Interned names of one category, in order of first appearance.
#[derive(Debug, Default, Clone)]
struct Names {
    ids: HashMap<String, usize>,
    names: Vec<String>,
}

impl Names {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    fn id(&self, category: Category, name: &str) -> Result<usize> {
        self.ids.get(name).copied().ok_or_else(|| Error::UnknownName {
            category,
            name: name.to_string(),
        })
    }

    fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

/// Collects names while a scenario is read; see [`RegistryBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    airports: Names,
    carriers: Names,
    equipment: Names,
    fixes: Names,
}

impl RegistryBuilder {
    /// Registers an airport name, returning its ID; repeated names get the same ID.
    pub fn airport(&mut self, name: &str) -> AirportId {
        AirportId::from(self.airports.intern(name))
    }

    /// Registers a carrier name.
    pub fn carrier(&mut self, name: &str) -> CarrierId {
        CarrierId::from(self.carriers.intern(name))
    }

    /// Registers an equipment name.
    pub fn equipment(&mut self, name: &str) -> EquipmentId {
        EquipmentId::from(self.equipment.intern(name))
    }

    /// Registers a fix name.
    pub fn fix(&mut self, name: &str) -> FixId {
        FixId::from(self.fixes.intern(name))
    }

    /// Freezes the registered names.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            airports: self.airports,
            carriers: self.carriers,
            equipment: self.equipment,
            fixes: self.fixes,
        }
    }
}

/// Immutable mapping between names and dense indices of airports, carriers, equipment, and
/// fixes. Built once when a scenario is loaded and passed to whoever needs name resolution.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    airports: Names,
    carriers: Names,
    equipment: Names,
    fixes: Names,
}

impl Registry {
    /// ID of an airport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the airport was never registered.
    pub fn airport_id(&self, name: &str) -> Result<AirportId> {
        self.airports.id(Category::Airport, name).map(AirportId::from)
    }

    /// ID of a carrier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the carrier was never registered.
    pub fn carrier_id(&self, name: &str) -> Result<CarrierId> {
        self.carriers.id(Category::Carrier, name).map(CarrierId::from)
    }

    /// ID of an aircraft type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the equipment was never registered.
    pub fn equipment_id(&self, name: &str) -> Result<EquipmentId> {
        self.equipment
            .id(Category::Equipment, name)
            .map(EquipmentId::from)
    }

    /// ID of a fix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the fix was never registered.
    pub fn fix_id(&self, name: &str) -> Result<FixId> {
        self.fixes.id(Category::Fix, name).map(FixId::from)
    }

    /// Name of an airport.
    #[must_use]
    pub fn airport_name(&self, id: AirportId) -> Option<&str> {
        self.airports.name(id.into())
    }

    /// Name of a carrier.
    #[must_use]
    pub fn carrier_name(&self, id: CarrierId) -> Option<&str> {
        self.carriers.name(id.into())
    }

    /// Name of an aircraft type.
    #[must_use]
    pub fn equipment_name(&self, id: EquipmentId) -> Option<&str> {
        self.equipment.name(id.into())
    }

    /// Name of a fix.
    #[must_use]
    pub fn fix_name(&self, id: FixId) -> Option<&str> {
        self.fixes.name(id.into())
    }

    /// Number of registered airports.
    #[must_use]
    pub fn num_airports(&self) -> usize {
        self.airports.names.len()
    }

    /// Number of registered fixes.
    #[must_use]
    pub fn num_fixes(&self) -> usize {
        self.fixes.names.len()
    }
}
