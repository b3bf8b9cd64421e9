//! Wire format constants for the AirTouch 3 status and command frames.
//!
//! Offsets are measured from the first byte of the 492-byte status response.

/// TCP port the controller listens on.
pub const TCP_PORT: u16 = 8899;

// ========== Entity counts and field widths ==========

pub const ZONES_LEN: usize = 16;
pub const GROUPS_LEN: usize = 16;
pub const AC_UNIT_LEN: usize = 2;
pub const TEMP_SENSOR_LEN: usize = 32;
pub const GROUP_NAME_LEN: usize = 8;
pub const SYSTEM_NAME_LEN: usize = 16;
pub const AC_NAME_LEN: usize = 8;
pub const SYSTEM_ID_LEN: usize = 8;

/// Length in bytes of every status response.
pub const RESPONSE_LEN: usize = 492;

/// Length in bytes of every command frame, checksum included.
pub const COMMAND_LEN: usize = 13;

// ========== Status frame offsets ==========

pub const OFFSET_GROUP_NAME: usize = 104;
/// One byte per damper, bit 8 is on/off.
pub const OFFSET_ZONE_STATE: usize = 232;
/// Bit 8 is the control mode, bits 0-6 the position in 5% steps.
pub const OFFSET_GROUP_PERCENT: usize = 248;
/// High nibble is the first zone of the group.
pub const OFFSET_GROUP_FIRST_ZONE: usize = 264;
/// Bits 0-4 hold the setpoint in degC minus one.
pub const OFFSET_GROUP_SETPOINT: usize = 296;
pub const OFFSET_GROUP_COUNT: usize = 352;
pub const OFFSET_SYSTEM_NAME: usize = 383;
pub const OFFSET_AC_NAME: usize = 399;
/// Bit 8 on/off, bit 7 error.
pub const OFFSET_AC_STATUS: usize = 423;
pub const OFFSET_AC_MODE: usize = 427;
pub const OFFSET_AC_FAN: usize = 429;
pub const OFFSET_AC_SETPOINT: usize = 431;
pub const OFFSET_AC_TEMPERATURE: usize = 433;
/// Brand code, e.g. 8 is Daikin.
pub const OFFSET_AC_BRAND: usize = 439;
/// 1-based group the touch panel sensor reports for.
pub const OFFSET_TOUCH_PANEL_GROUP: usize = 443;
pub const OFFSET_TOUCH_PANEL_TEMP: usize = 445;
pub const OFFSET_TEMP_SENSORS: usize = 451;
pub const OFFSET_SYSTEM_ID: usize = 483;

// ========== Bit masks ==========

pub const MASK_BIT8: u8 = 0b1000_0000;
pub const MASK_BIT7: u8 = 0b0100_0000;
pub const MASK_FIRST_ZONE: u8 = 0b1111_0000;
pub const MASK_GROUP_PERCENT: u8 = 0b0111_1111;
pub const MASK_GROUP_SETPOINT: u8 = 0b0001_1111;
pub const MASK_FAN_SPEED: u8 = 0b0000_1111;
pub const MASK_TEMPERATURE: u8 = 0b0011_1111;

/// Each count in the group position field is 5%.
pub const PERCENT_STEP: u8 = 5;

// ========== Command frame bytes ==========

pub const CMD_PREAMBLE: u8 = 85;
pub const CMD_FIXED_BYTE2: u8 = 12;
pub const CMD_CLASS_STATUS: u8 = 1;
pub const CMD_CLASS_GROUP: u8 = 129;
pub const CMD_CLASS_AC: u8 = 134;
pub const CMD_TOGGLE: u8 = 128;
pub const CMD_GROUP_POSITION_DEC: u8 = 1;
pub const CMD_GROUP_POSITION_INC: u8 = 2;
pub const CMD_AC_MODE: u8 = 129;
pub const CMD_AC_FAN_SPEED: u8 = 130;
pub const CMD_AC_TEMP_DEC: u8 = 147;
pub const CMD_AC_TEMP_INC: u8 = 163;
/// Byte 5 of every position increment/decrement.
pub const CMD_GROUP_POSITION_EXTRA: u8 = 1;

// ========== Sensor names ==========

pub const TOUCH_PANEL_SENSOR_NAME: &str = "Touch Pad 1";
