//! Long-lived entities built up from successive status frames.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

use crate::status_frame::{AcUnitStatus, GroupStatus, SensorReading};
use crate::types::{AcMode, FanSpeed, GroupMode};

/// Insertion-ordered collection of entities addressed by a stable key.
///
/// Entities are only ever added or updated in place, never removed, so a
/// key keeps pointing at the same slot for the lifetime of the map.
#[derive(Debug, Clone)]
pub struct EntityMap<K, V> {
    index: HashMap<K, usize>,
    items: Vec<V>,
}

impl<K: Eq + Hash, V> EntityMap<K, V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// Return the entity for `key`, creating it with `create` first if absent.
    pub fn upsert_with(&mut self, key: K, create: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.items.push(create());
                let slot = self.items.len() - 1;
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.items[slot]
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.items[slot])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.index.get(key) {
            Some(&slot) => Some(&mut self.items[slot]),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities in the order they were first seen.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.items.iter()
    }
}

impl<K: Eq + Hash, V> Default for EntityMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V: Serialize> Serialize for EntityMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub number: u8,
    pub name: String,
    pub is_on: bool,
    pub mode: GroupMode,
    pub open_percent: u16,
    /// Only known when a sensor reports for this group.
    pub temperature: Option<u8>,
    pub temperature_sp: u8,
}

impl Group {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            name: String::new(),
            is_on: false,
            mode: GroupMode::Invalid,
            open_percent: 0,
            temperature: None,
            temperature_sp: 0,
        }
    }

    /// Overwrite the frame-carried fields. `temperature` comes from sensors
    /// and is left alone.
    pub fn apply(&mut self, status: &GroupStatus) {
        self.name.clone_from(&status.name);
        self.is_on = status.is_on;
        self.mode = status.mode;
        self.open_percent = status.open_percent;
        self.temperature_sp = status.temperature_sp;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcUnit {
    pub number: u8,
    pub name: String,
    pub is_on: bool,
    pub has_error: bool,
    /// `None` until a known mode has been received.
    pub mode: Option<AcMode>,
    /// `None` until a known fan speed has been received.
    pub fan_speed: Option<FanSpeed>,
    pub brand: u8,
    pub temperature: u8,
    pub temperature_sp: u8,
}

impl AcUnit {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            name: String::new(),
            is_on: false,
            has_error: false,
            mode: None,
            fan_speed: None,
            brand: 0,
            temperature: 0,
            temperature_sp: 0,
        }
    }

    /// Overwrite the frame-carried fields. Mode and fan speed the frame could
    /// not decode keep their previous value.
    pub fn apply(&mut self, status: &AcUnitStatus) {
        self.name.clone_from(&status.name);
        self.is_on = status.is_on;
        self.has_error = status.has_error;
        if let Some(mode) = status.mode {
            self.mode = Some(mode);
        }
        if let Some(speed) = status.fan_speed {
            self.fan_speed = Some(speed);
        }
        self.brand = status.brand;
        self.temperature = status.temperature;
        self.temperature_sp = status.temperature_sp;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TempSensor {
    pub name: String,
    pub temperature: u8,
    pub available: bool,
    pub low_battery: bool,
}

impl TempSensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature: 0,
            available: false,
            low_battery: false,
        }
    }

    pub fn apply(&mut self, reading: &SensorReading) {
        self.temperature = reading.temperature;
        self.available = reading.available;
        self.low_battery = reading.low_battery;
    }
}
