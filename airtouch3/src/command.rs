//! Encoder for the 13-byte command frames.
//!
//! ```text
//!  0    1      2    3       4      5      6..12  12
//!  0x55 class  0x0C target  sub    extra  zeros  checksum
//! ```
//!
//! The checksum is the sum of bytes 0-11 modulo 256.

use crate::constants::*;
use crate::types::{AcMode, Direction, FanSpeed};

pub type CommandFrame = [u8; COMMAND_LEN];

/// Byte 1: which part of the system the command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandClass {
    Status = CMD_CLASS_STATUS,
    GroupControl = CMD_CLASS_GROUP,
    AcControl = CMD_CLASS_AC,
}

/// Byte 4: the action within a command class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubCommand {
    None = 0,
    PositionDecrement = CMD_GROUP_POSITION_DEC,
    PositionIncrement = CMD_GROUP_POSITION_INC,
    Toggle = CMD_TOGGLE,
    SetMode = CMD_AC_MODE,
    SetFanSpeed = CMD_AC_FAN_SPEED,
    TemperatureDecrement = CMD_AC_TEMP_DEC,
    TemperatureIncrement = CMD_AC_TEMP_INC,
}

/// A high-level request to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    ToggleGroup(u8),
    AdjustGroupPosition(u8, Direction),
    ToggleAcUnit(u8),
    AdjustAcTemperature(u8, Direction),
    SetAcFanSpeed(u8, FanSpeed),
    SetAcMode(u8, AcMode),
}

impl Command {
    pub fn encode(&self) -> CommandFrame {
        match *self {
            Command::Status => encode_frame(CommandClass::Status, 0, SubCommand::None, 0),
            Command::ToggleGroup(group) => {
                encode_frame(CommandClass::GroupControl, group, SubCommand::Toggle, 0)
            }
            Command::AdjustGroupPosition(group, direction) => {
                let sub = match direction {
                    Direction::Increment => SubCommand::PositionIncrement,
                    Direction::Decrement => SubCommand::PositionDecrement,
                };
                encode_frame(CommandClass::GroupControl, group, sub, CMD_GROUP_POSITION_EXTRA)
            }
            Command::ToggleAcUnit(unit) => encode_frame(CommandClass::AcControl, unit, SubCommand::Toggle, 0),
            Command::AdjustAcTemperature(unit, direction) => {
                let sub = match direction {
                    Direction::Increment => SubCommand::TemperatureIncrement,
                    Direction::Decrement => SubCommand::TemperatureDecrement,
                };
                encode_frame(CommandClass::AcControl, unit, sub, 0)
            }
            Command::SetAcFanSpeed(unit, speed) => {
                encode_frame(CommandClass::AcControl, unit, SubCommand::SetFanSpeed, speed.as_u8())
            }
            Command::SetAcMode(unit, mode) => {
                encode_frame(CommandClass::AcControl, unit, SubCommand::SetMode, mode.as_u8())
            }
        }
    }
}

/// Build a command frame from its variable bytes and append the checksum.
pub fn encode_frame(class: CommandClass, target: u8, sub: SubCommand, extra: u8) -> CommandFrame {
    let mut frame = [0u8; COMMAND_LEN];
    frame[0] = CMD_PREAMBLE;
    frame[1] = class as u8;
    frame[2] = CMD_FIXED_BYTE2;
    frame[3] = target;
    frame[4] = sub as u8;
    frame[5] = extra;
    frame[COMMAND_LEN - 1] = checksum(&frame[..COMMAND_LEN - 1]);
    frame
}

/// Sum of all bytes modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
