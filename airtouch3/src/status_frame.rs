//! Decoder for the 492-byte status response.
//!
//! Every command, including the plain status request, is answered with the
//! same full status frame. Decoding is pure: the result describes exactly one
//! response and carries no knowledge of earlier ones. Merging into long-lived
//! entities is done by [`crate::Device`].
//!
//! Layout summary (offsets from the first byte):
//!
//! ```text
//!  104..232  group names, 8 bytes each
//!  232..248  zone state, bit 8 = damper on
//!  248..264  group percent, bit 8 = temperature control, bits 0-6 = 5% steps
//!  264..280  group first zone in the high nibble
//!  296..312  group setpoint, bits 0-4 = degC - 1
//!  352       number of configured groups
//!  383..399  system name
//!  399..415  AC unit names, 8 bytes each
//!  423, 427, 429, 431, 433, 439   AC status/mode/fan/setpoint/temp/brand (+unit)
//!  443, 445  touch panel group (1-based) and temperature
//!  451..483  temperature sensors
//!  483..491  system id
//! ```

use crate::constants::*;
use crate::error::FrameError;
use crate::types::{AcMode, FanSpeed, GroupMode};

/// One decoded status response.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFrame {
    pub system_name: String,
    pub system_id: String,
    /// Damper flags, consumed to derive group state.
    pub zones: [bool; ZONES_LEN],
    /// Raw number of configured groups, may exceed the 16 decoded slots.
    pub group_count: u8,
    pub groups: Vec<GroupStatus>,
    pub ac_units: Vec<AcUnitStatus>,
    pub touch_panel: TouchPanelReading,
    pub sensors: Vec<SensorReading>,
    /// Fields that could not be mapped and were left out of the decode.
    pub anomalies: Vec<FrameError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatus {
    pub number: u8,
    pub name: String,
    pub first_zone: u8,
    pub is_on: bool,
    pub mode: GroupMode,
    /// Raw steps x 5. Not clamped, a 7-bit field can report up to 635.
    pub open_percent: u16,
    pub temperature_sp: u8,
}

impl GroupStatus {
    fn from_bytes(data: &[u8], z: usize, zones: &[bool; ZONES_LEN]) -> Self {
        // All zones of a group share its state, the first one is enough
        let first_zone = (data[OFFSET_GROUP_FIRST_ZONE + z] & MASK_FIRST_ZONE) >> 4;
        let is_on = zones[first_zone as usize];

        let percent_byte = data[OFFSET_GROUP_PERCENT + z];
        let mode = if percent_byte & MASK_BIT8 != 0 {
            GroupMode::TemperatureControl
        } else {
            GroupMode::PercentOpen
        };
        let open_percent = if is_on {
            u16::from(percent_byte & MASK_GROUP_PERCENT) * u16::from(PERCENT_STEP)
        } else {
            0
        };

        Self {
            number: z as u8,
            name: read_text(data, OFFSET_GROUP_NAME + z * GROUP_NAME_LEN, GROUP_NAME_LEN),
            first_zone,
            is_on,
            mode,
            open_percent,
            temperature_sp: (data[OFFSET_GROUP_SETPOINT + z] & MASK_GROUP_SETPOINT) + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcUnitStatus {
    pub number: u8,
    pub name: String,
    pub is_on: bool,
    pub has_error: bool,
    pub brand: u8,
    /// `None` when the controller sent a value outside [`AcMode`].
    pub mode: Option<AcMode>,
    /// `None` when the controller sent a value outside [`FanSpeed`].
    pub fan_speed: Option<FanSpeed>,
    pub temperature: u8,
    pub temperature_sp: u8,
}

impl AcUnitStatus {
    fn from_bytes(data: &[u8], a: usize, anomalies: &mut Vec<FrameError>) -> Self {
        let unit = a as u8;
        let status = data[OFFSET_AC_STATUS + a];

        let mode_byte = data[OFFSET_AC_MODE + a];
        let mode = AcMode::from_u8(mode_byte);
        if mode.is_none() {
            anomalies.push(FrameError::UnknownMode { unit, value: mode_byte });
        }

        let fan_value = data[OFFSET_AC_FAN + a] & MASK_FAN_SPEED;
        let fan_speed = FanSpeed::from_u8(fan_value);
        if fan_speed.is_none() {
            anomalies.push(FrameError::UnknownFanSpeed { unit, value: fan_value });
        }

        Self {
            number: unit,
            name: read_text(data, OFFSET_AC_NAME + a * AC_NAME_LEN, AC_NAME_LEN),
            is_on: status & MASK_BIT8 != 0,
            has_error: status & MASK_BIT7 != 0,
            brand: data[OFFSET_AC_BRAND + a],
            mode,
            fan_speed,
            temperature: data[OFFSET_AC_TEMPERATURE + a],
            temperature_sp: data[OFFSET_AC_SETPOINT + a] & MASK_TEMPERATURE,
        }
    }
}

/// A single temperature sensor byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    pub name: String,
    pub temperature: u8,
    pub available: bool,
    pub low_battery: bool,
}

impl SensorReading {
    pub fn from_byte(name: impl Into<String>, value: u8) -> Self {
        Self {
            name: name.into(),
            temperature: value & MASK_TEMPERATURE,
            available: value & MASK_BIT8 != 0,
            low_battery: value & MASK_BIT7 != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchPanelReading {
    /// 1-based group index, 0 when unassigned.
    pub group: u8,
    pub reading: SensorReading,
}

impl TouchPanelReading {
    /// Zero-based index of the group this panel reports for, if it names one
    /// of the `group_count` configured groups.
    pub fn group_index(&self, group_count: u8) -> Option<u8> {
        if self.group >= 1 && self.group <= group_count {
            Some(self.group - 1)
        } else {
            None
        }
    }
}

/// Decode a complete status response.
///
/// Anything other than exactly [`RESPONSE_LEN`] bytes is rejected before any
/// field is read. Unknown AC mode and fan values do not fail the frame; they
/// are reported in [`StatusFrame::anomalies`] and the field is left `None`.
pub fn decode(data: &[u8]) -> Result<StatusFrame, FrameError> {
    if data.len() != RESPONSE_LEN {
        return Err(FrameError::InvalidLength {
            expected: RESPONSE_LEN,
            actual: data.len(),
        });
    }

    let mut zones = [false; ZONES_LEN];
    for (z, flag) in zones.iter_mut().enumerate() {
        *flag = data[OFFSET_ZONE_STATE + z] & MASK_BIT8 != 0;
    }

    let group_count = data[OFFSET_GROUP_COUNT];
    let groups = (0..GROUPS_LEN.min(group_count as usize))
        .map(|z| GroupStatus::from_bytes(data, z, &zones))
        .collect();

    let mut anomalies = Vec::new();
    let ac_units = (0..AC_UNIT_LEN)
        .map(|a| AcUnitStatus::from_bytes(data, a, &mut anomalies))
        .collect();

    let touch_panel = TouchPanelReading {
        group: data[OFFSET_TOUCH_PANEL_GROUP],
        reading: SensorReading::from_byte(TOUCH_PANEL_SENSOR_NAME, data[OFFSET_TOUCH_PANEL_TEMP]),
    };

    let sensors = (0..TEMP_SENSOR_LEN)
        .map(|s| SensorReading::from_byte(format!("Sensor {}", s + 1), data[OFFSET_TEMP_SENSORS + s]))
        .collect();

    Ok(StatusFrame {
        system_name: read_text(data, OFFSET_SYSTEM_NAME, SYSTEM_NAME_LEN),
        system_id: read_text(data, OFFSET_SYSTEM_ID, SYSTEM_ID_LEN),
        zones,
        group_count,
        groups,
        ac_units,
        touch_panel,
        sensors,
        anomalies,
    })
}

/// Fixed-width text field with NUL and space padding removed.
fn read_text(data: &[u8], offset: usize, len: usize) -> String {
    String::from_utf8_lossy(&data[offset..offset + len])
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_rejects_wrong_lengths() {
        for len in [0usize, 1, 13, RESPONSE_LEN - 1, RESPONSE_LEN + 1, 1024] {
            let data = vec![0u8; len];
            assert_eq!(
                decode(&data),
                Err(FrameError::InvalidLength { expected: RESPONSE_LEN, actual: len })
            );
        }
    }

    #[test]
    fn test_decodes_captured_sample() {
        let frame = decode(STATUS_COOLING).unwrap();

        assert_eq!(frame.system_name, "Polyaire");
        assert_eq!(frame.system_id, "93051723");
        assert_eq!(frame.group_count, 8);
        assert_eq!(frame.groups.len(), 8);
        assert!(frame.anomalies.is_empty());

        let kitchen = &frame.groups[0];
        assert_eq!(kitchen.name, "Kitchen");
        assert!(kitchen.is_on);
        assert_eq!(kitchen.mode, GroupMode::PercentOpen);
        assert_eq!(kitchen.open_percent, 100);
        assert_eq!(kitchen.temperature_sp, 26);

        // Space padded rather than NUL padded
        let lydia = &frame.groups[2];
        assert_eq!(lydia.name, "Lydia");
        assert!(!lydia.is_on);
        assert_eq!(lydia.open_percent, 0);
        assert_eq!(lydia.temperature_sp, 25);

        let master = &frame.groups[6];
        assert_eq!(master.name, "Master");
        assert_eq!(master.first_zone, 6);
        assert!(master.is_on);

        let top = &frame.ac_units[0];
        assert_eq!(top.name, "TOP");
        assert!(!top.is_on);
        assert!(!top.has_error);
        assert_eq!(top.mode, Some(AcMode::Cool));
        assert_eq!(top.fan_speed, Some(FanSpeed::High));
        assert_eq!(top.temperature_sp, 24);
        assert_eq!(top.temperature, 29);
        assert_eq!(top.brand, 8);

        let bottom = &frame.ac_units[1];
        assert_eq!(bottom.name, "BOTTOM");
        assert!(bottom.is_on);
        assert_eq!(bottom.fan_speed, Some(FanSpeed::Med));
        assert_eq!(bottom.temperature_sp, 23);

        assert_eq!(frame.touch_panel.group, 5);
        assert_eq!(frame.touch_panel.group_index(frame.group_count), Some(4));
        assert_eq!(frame.touch_panel.reading.name, "Touch Pad 1");
        assert_eq!(frame.touch_panel.reading.temperature, 26);
        assert!(frame.touch_panel.reading.available);
        assert!(!frame.touch_panel.reading.low_battery);

        assert_eq!(frame.sensors.len(), TEMP_SENSOR_LEN);
        assert!(frame.sensors.iter().all(|s| !s.available));
        assert_eq!(frame.sensors[31].name, "Sensor 32");
    }

    #[test]
    fn test_decodes_partial_positions() {
        let frame = decode(STATUS_POSITIONS).unwrap();
        assert_eq!(frame.groups[0].open_percent, 95);
        assert_eq!(frame.groups[1].open_percent, 90);
        assert_eq!(frame.ac_units[0].temperature, 27);
        assert_eq!(frame.ac_units[1].temperature_sp, 25);
    }

    #[test]
    fn test_only_configured_groups_are_decoded() {
        let data = ResponseBuilder::new().group_count(3).build();
        let frame = decode(&data).unwrap();
        let numbers: Vec<u8> = frame.groups.iter().map(|g| g.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_group_count_is_capped_at_sixteen() {
        let data = ResponseBuilder::new().group_count(40).build();
        let frame = decode(&data).unwrap();
        assert_eq!(frame.group_count, 40);
        assert_eq!(frame.groups.len(), GROUPS_LEN);
    }

    #[test]
    fn test_group_off_forces_zero_percent() {
        let data = ResponseBuilder::new()
            .group_count(1)
            .zone(3, false)
            .group(0, "Den", 3, 0b0001_0100, 0)
            .build();
        let group = &decode(&data).unwrap().groups[0];
        assert!(!group.is_on);
        assert_eq!(group.open_percent, 0);
    }

    #[test]
    fn test_group_on_uses_percent_and_mode_bits() {
        let data = ResponseBuilder::new()
            .group_count(1)
            .zone(3, true)
            .group(0, "Den", 3, MASK_BIT8 | 12, 0)
            .build();
        let group = &decode(&data).unwrap().groups[0];
        assert!(group.is_on);
        assert_eq!(group.mode, GroupMode::TemperatureControl);
        assert_eq!(group.open_percent, 60);
    }

    #[test]
    fn test_full_percent_field_does_not_overflow() {
        let data = ResponseBuilder::new()
            .group_count(1)
            .zone(0, true)
            .group(0, "Den", 0, MASK_GROUP_PERCENT, 0)
            .build();
        let group = &decode(&data).unwrap().groups[0];
        assert_eq!(group.open_percent, 635);
        assert_eq!(group.mode, GroupMode::PercentOpen);
    }

    #[test]
    fn test_setpoint_is_offset_by_one() {
        let data = ResponseBuilder::new()
            .group_count(1)
            .group(0, "Den", 0, 0, 0b0000_0011)
            .build();
        assert_eq!(decode(&data).unwrap().groups[0].temperature_sp, 4);

        // Upper bits are not part of the setpoint
        let data = ResponseBuilder::new()
            .group_count(1)
            .group(0, "Den", 0, 0, 0b1110_0011)
            .build();
        assert_eq!(decode(&data).unwrap().groups[0].temperature_sp, 4);
    }

    #[test]
    fn test_ac_mode_and_fan_values() {
        let data = ResponseBuilder::new().ac_mode(0, 1).ac_fan(0, 0x25).build();
        let unit = &decode(&data).unwrap().ac_units[0];
        assert_eq!(unit.mode, Some(AcMode::Heat));
        assert_eq!(unit.fan_speed, Some(FanSpeed::Auto));
    }

    #[test]
    fn test_unknown_ac_values_are_skipped() {
        let data = ResponseBuilder::new()
            .ac_mode(1, 5)
            .ac_fan(1, 0x0e)
            .ac_setpoint(1, 21)
            .build();
        let frame = decode(&data).unwrap();

        let unit = &frame.ac_units[1];
        assert_eq!(unit.mode, None);
        assert_eq!(unit.fan_speed, None);
        assert_eq!(unit.temperature_sp, 21);
        assert_eq!(
            frame.anomalies,
            vec![
                FrameError::UnknownMode { unit: 1, value: 5 },
                FrameError::UnknownFanSpeed { unit: 1, value: 0x0e },
            ]
        );
        assert_eq!(frame.ac_units[0].mode, Some(AcMode::Auto));
    }

    #[test]
    fn test_ac_status_bits() {
        let data = ResponseBuilder::new().ac_status(0, MASK_BIT8 | MASK_BIT7).ac_status(1, MASK_BIT7).build();
        let frame = decode(&data).unwrap();
        assert!(frame.ac_units[0].is_on);
        assert!(frame.ac_units[0].has_error);
        assert!(!frame.ac_units[1].is_on);
        assert!(frame.ac_units[1].has_error);
    }

    #[test]
    fn test_sensor_byte_fields() {
        let reading = SensorReading::from_byte("Sensor 1", 0b1101_0110);
        assert!(reading.available);
        assert!(reading.low_battery);
        assert_eq!(reading.temperature, 22);

        let reading = SensorReading::from_byte("Sensor 2", 0b0001_0110);
        assert!(!reading.available);
        assert!(!reading.low_battery);
    }

    #[test]
    fn test_touch_panel_group_bounds() {
        let panel = TouchPanelReading {
            group: 0,
            reading: SensorReading::from_byte(TOUCH_PANEL_SENSOR_NAME, 0x90),
        };
        assert_eq!(panel.group_index(8), None);

        let panel = TouchPanelReading { group: 8, ..panel };
        assert_eq!(panel.group_index(8), Some(7));
        assert_eq!(panel.group_index(7), None);
    }

    #[test]
    fn test_decode_is_deterministic() {
        assert_eq!(decode(STATUS_COOLING).unwrap(), decode(STATUS_COOLING).unwrap());
    }
}
