use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode of an AC unit, as carried in the status frame and in
/// the mode-set command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AcMode {
    Auto = 0,
    Heat = 1,
    Dry = 2,
    Fan = 3,
    Cool = 4,
}

impl AcMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AcMode::Auto),
            1 => Some(AcMode::Heat),
            2 => Some(AcMode::Dry),
            3 => Some(AcMode::Fan),
            4 => Some(AcMode::Cool),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for AcMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AcMode::Auto => "Auto",
            AcMode::Heat => "Heat",
            AcMode::Dry => "Dry",
            AcMode::Fan => "Fan",
            AcMode::Cool => "Cool",
        };
        f.pad(name)
    }
}

/// Fan speed of an AC unit. Carried in the low nibble of the fan byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum FanSpeed {
    Quiet = 0,
    Low = 1,
    Med = 2,
    High = 3,
    Power = 4,
    Auto = 5,
}

impl FanSpeed {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FanSpeed::Quiet),
            1 => Some(FanSpeed::Low),
            2 => Some(FanSpeed::Med),
            3 => Some(FanSpeed::High),
            4 => Some(FanSpeed::Power),
            5 => Some(FanSpeed::Auto),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FanSpeed::Quiet => "Quiet",
            FanSpeed::Low => "Low",
            FanSpeed::Med => "Medium",
            FanSpeed::High => "High",
            FanSpeed::Power => "Powerful",
            FanSpeed::Auto => "Auto",
        };
        f.pad(name)
    }
}

/// How a group's dampers are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupMode {
    TemperatureControl,
    PercentOpen,
    /// Not yet read from the controller.
    #[default]
    Invalid,
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GroupMode::TemperatureControl => "Temperature Control",
            GroupMode::PercentOpen => "Percent Open",
            GroupMode::Invalid => "Invalid",
        };
        f.pad(name)
    }
}

/// Outcome of the most recent exchange with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommsStatus {
    NotConnected,
    Ok,
    Error,
}

impl fmt::Display for CommsStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CommsStatus::NotConnected => "Not Connected",
            CommsStatus::Ok => "OK",
            CommsStatus::Error => "Error",
        };
        f.pad(name)
    }
}

/// Step direction for position and setpoint adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increment,
    Decrement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ac_mode_from_u8() {
        assert_eq!(AcMode::from_u8(0), Some(AcMode::Auto));
        assert_eq!(AcMode::from_u8(1), Some(AcMode::Heat));
        assert_eq!(AcMode::from_u8(4), Some(AcMode::Cool));
        assert_eq!(AcMode::from_u8(5), None);
        assert_eq!(AcMode::from_u8(0x14), None);
    }

    #[test]
    fn test_fan_speed_from_u8() {
        assert_eq!(FanSpeed::from_u8(0), Some(FanSpeed::Quiet));
        assert_eq!(FanSpeed::from_u8(5), Some(FanSpeed::Auto));
        assert_eq!(FanSpeed::from_u8(6), None);
    }

    #[test]
    fn test_wire_values_match_discriminants() {
        for value in 0..=4u8 {
            assert_eq!(AcMode::from_u8(value).map(|m| m.as_u8()), Some(value));
        }
        for value in 0..=5u8 {
            assert_eq!(FanSpeed::from_u8(value).map(|s| s.as_u8()), Some(value));
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(FanSpeed::Power.to_string(), "Powerful");
        assert_eq!(FanSpeed::Med.to_string(), "Medium");
        assert_eq!(GroupMode::PercentOpen.to_string(), "Percent Open");
        assert_eq!(AcMode::Dry.to_string(), "Dry");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&FanSpeed::High).unwrap(), "\"HIGH\"");
        assert_eq!(serde_json::to_string(&GroupMode::TemperatureControl).unwrap(), "\"TEMPERATURE_CONTROL\"");
        let mode: AcMode = serde_json::from_str("\"COOL\"").unwrap();
        assert_eq!(mode, AcMode::Cool);
        let direction: Direction = serde_json::from_str("\"decrement\"").unwrap();
        assert_eq!(direction, Direction::Decrement);
    }
}
