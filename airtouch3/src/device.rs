use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::command::Command;
use crate::entities::{AcUnit, EntityMap, Group, TempSensor};
use crate::error::{DeviceError, FrameError, TargetKind};
use crate::status_frame::{self, SensorReading, StatusFrame};
use crate::transport::Transport;
use crate::types::{AcMode, CommsStatus, Direction, FanSpeed};

/// Last-known state of one controller plus the commands that change it.
///
/// Every operation is a single blocking round trip: encode, exchange through
/// the transport, decode, merge. Operations take `&mut self`, so one device
/// never has two exchanges in flight.
pub struct Device<T: Transport> {
    transport: T,
    name: String,
    id: String,
    comms_status: CommsStatus,
    comms_error: String,
    last_update: Option<DateTime<Utc>>,
    groups: EntityMap<u8, Group>,
    ac_units: EntityMap<u8, AcUnit>,
    sensors: EntityMap<String, TempSensor>,
    skipped_fields: Vec<FrameError>,
}

/// Owned copy of everything a presentation layer reads from a [`Device`].
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSnapshot {
    pub name: String,
    pub id: String,
    pub comms_status: CommsStatus,
    pub comms_error: String,
    pub last_update: Option<DateTime<Utc>>,
    pub groups: Vec<Group>,
    pub ac_units: Vec<AcUnit>,
    pub sensors: Vec<TempSensor>,
}

impl<T: Transport> Device<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            name: String::new(),
            id: String::new(),
            comms_status: CommsStatus::NotConnected,
            comms_error: "Connection yet to be attempted".to_string(),
            last_update: None,
            groups: EntityMap::new(),
            ac_units: EntityMap::new(),
            sensors: EntityMap::new(),
            skipped_fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn comms_status(&self) -> CommsStatus {
        self.comms_status
    }

    pub fn comms_error(&self) -> &str {
        &self.comms_error
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn groups(&self) -> &EntityMap<u8, Group> {
        &self.groups
    }

    pub fn ac_units(&self) -> &EntityMap<u8, AcUnit> {
        &self.ac_units
    }

    pub fn sensors(&self) -> &EntityMap<String, TempSensor> {
        &self.sensors
    }

    /// Fields the most recently decoded frame could not map. Their previous
    /// values were kept.
    pub fn skipped_fields(&self) -> &[FrameError] {
        &self.skipped_fields
    }

    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            name: self.name.clone(),
            id: self.id.clone(),
            comms_status: self.comms_status,
            comms_error: self.comms_error.clone(),
            last_update: self.last_update,
            groups: self.groups.iter().cloned().collect(),
            ac_units: self.ac_units.iter().cloned().collect(),
            sensors: self.sensors.iter().cloned().collect(),
        }
    }

    /// Request a fresh status frame and merge it.
    pub fn refresh(&mut self) -> Result<(), DeviceError> {
        self.execute(Command::Status).map(|_| ())
    }

    /// Toggle a group on or off. Returns the group's new on state.
    pub fn toggle_group(&mut self, index: u8) -> Result<bool, DeviceError> {
        self.check_target(TargetKind::Group, index)?;
        self.execute(Command::ToggleGroup(index))?;
        Ok(self.group(index)?.is_on)
    }

    /// Step a group's damper position by 5%. Returns the new open percentage.
    pub fn adjust_group_position(&mut self, index: u8, direction: Direction) -> Result<u16, DeviceError> {
        self.check_target(TargetKind::Group, index)?;
        self.execute(Command::AdjustGroupPosition(index, direction))?;
        Ok(self.group(index)?.open_percent)
    }

    /// Toggle an AC unit on or off. Returns the unit's new on state.
    pub fn toggle_ac_unit(&mut self, index: u8) -> Result<bool, DeviceError> {
        self.check_target(TargetKind::AcUnit, index)?;
        self.execute(Command::ToggleAcUnit(index))?;
        Ok(self.ac_unit(index)?.is_on)
    }

    /// Step an AC unit's setpoint by one degree. Returns the new setpoint.
    pub fn adjust_ac_temperature(&mut self, index: u8, direction: Direction) -> Result<u8, DeviceError> {
        self.check_target(TargetKind::AcUnit, index)?;
        self.execute(Command::AdjustAcTemperature(index, direction))?;
        Ok(self.ac_unit(index)?.temperature_sp)
    }

    /// Set an AC unit's fan speed. Returns the speed the controller reports
    /// afterwards.
    pub fn set_ac_fan_speed(&mut self, index: u8, speed: FanSpeed) -> Result<FanSpeed, DeviceError> {
        self.check_target(TargetKind::AcUnit, index)?;
        let frame = self.execute(Command::SetAcFanSpeed(index, speed))?;
        let reported = frame
            .anomalies
            .iter()
            .find(|a| matches!(a, FrameError::UnknownFanSpeed { unit, .. } if *unit == index));
        if let Some(anomaly) = reported {
            return Err(anomaly.clone().into());
        }
        self.ac_unit(index)?
            .fan_speed
            .ok_or(DeviceError::Frame(FrameError::UnknownFanSpeed { unit: index, value: speed.as_u8() }))
    }

    /// Set an AC unit's mode. Returns the mode the controller reports
    /// afterwards.
    pub fn set_ac_mode(&mut self, index: u8, mode: AcMode) -> Result<AcMode, DeviceError> {
        self.check_target(TargetKind::AcUnit, index)?;
        let frame = self.execute(Command::SetAcMode(index, mode))?;
        let reported = frame
            .anomalies
            .iter()
            .find(|a| matches!(a, FrameError::UnknownMode { unit, .. } if *unit == index));
        if let Some(anomaly) = reported {
            return Err(anomaly.clone().into());
        }
        self.ac_unit(index)?
            .mode
            .ok_or(DeviceError::Frame(FrameError::UnknownMode { unit: index, value: mode.as_u8() }))
    }

    fn check_target(&self, kind: TargetKind, index: u8) -> Result<(), DeviceError> {
        let available = match kind {
            TargetKind::Group => self.groups.len(),
            TargetKind::AcUnit => self.ac_units.len(),
        };
        if (index as usize) < available {
            Ok(())
        } else {
            Err(DeviceError::InvalidTarget { kind, index, available })
        }
    }

    fn group(&self, index: u8) -> Result<&Group, DeviceError> {
        self.groups.get(&index).ok_or(DeviceError::InvalidTarget {
            kind: TargetKind::Group,
            index,
            available: self.groups.len(),
        })
    }

    fn ac_unit(&self, index: u8) -> Result<&AcUnit, DeviceError> {
        self.ac_units.get(&index).ok_or(DeviceError::InvalidTarget {
            kind: TargetKind::AcUnit,
            index,
            available: self.ac_units.len(),
        })
    }

    /// One full round trip. Entity maps are only touched once the response
    /// has decoded.
    fn execute(&mut self, command: Command) -> Result<StatusFrame, DeviceError> {
        let request = command.encode();
        debug!("Sending {:?}", command);

        let response = match self.transport.send_and_receive(&request) {
            Ok(response) => {
                self.comms_status = CommsStatus::Ok;
                self.comms_error.clear();
                response
            }
            Err(e) => {
                warn!("Exchange for {:?} failed: {}", command, e);
                self.comms_status = CommsStatus::NotConnected;
                self.comms_error = e.to_string();
                return Err(e.into());
            }
        };

        let frame = match status_frame::decode(&response) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Discarding response to {:?}: {}", command, e);
                self.comms_status = CommsStatus::Error;
                self.comms_error = e.to_string();
                return Err(e.into());
            }
        };

        for anomaly in &frame.anomalies {
            warn!("Keeping previous value: {}", anomaly);
        }
        self.merge(&frame);
        self.skipped_fields.clone_from(&frame.anomalies);
        Ok(frame)
    }

    fn merge(&mut self, frame: &StatusFrame) {
        for status in &frame.groups {
            self.groups
                .upsert_with(status.number, || Group::new(status.number))
                .apply(status);
        }

        for status in &frame.ac_units {
            self.ac_units
                .upsert_with(status.number, || AcUnit::new(status.number))
                .apply(status);
        }

        let touch_panel = &frame.touch_panel;
        if let Some(temperature) = self.update_sensor(&touch_panel.reading)
            && let Some(index) = touch_panel.group_index(frame.group_count)
            && let Some(group) = self.groups.get_mut(&index)
        {
            group.temperature = Some(temperature);
        }

        for reading in &frame.sensors {
            self.update_sensor(reading);
        }

        self.name.clone_from(&frame.system_name);
        self.id.clone_from(&frame.system_id);
        self.last_update = Some(Utc::now());

        debug!(
            "Merged status for '{}': {} groups, {} AC units, {} sensors",
            self.name,
            self.groups.len(),
            self.ac_units.len(),
            self.sensors.len()
        );
    }

    /// Record an available reading, returning its temperature. Unavailable
    /// readings never create or overwrite an entry.
    fn update_sensor(&mut self, reading: &SensorReading) -> Option<u8> {
        if !reading.available {
            return None;
        }
        self.sensors
            .upsert_with(reading.name.clone(), || TempSensor::new(reading.name.as_str()))
            .apply(reading);
        Some(reading.temperature)
    }
}
