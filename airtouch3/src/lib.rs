//! AirTouch 3 Protocol Library
//!
//! This library talks to an AirTouch 3 zone controller over its LAN port:
//! - Command encoder for the fixed 13-byte request frames
//! - Decoder for the 492-byte status frame the controller answers every request with
//! - Long-lived group, AC unit and sensor entities merged from successive frames
//! - A blocking TCP transport behind a [`Transport`] trait
//!
//! # Features
//!
//! - **Pure Codec**: Encoding and decoding never touch the network
//! - **Stable Entities**: Groups, AC units and sensors are updated in place and never removed
//! - **Stale-Tolerant Sensors**: Unavailable readings keep the last known value
//! - **Swappable Transport**: Any [`Transport`] can stand in for the TCP connection
//!
//! # Example
//!
//! ```no_run
//! use airtouch3::{Device, Direction, TcpTransport};
//!
//! let mut device = Device::new(TcpTransport::new("192.168.1.72"));
//! device.refresh().unwrap();
//!
//! for group in device.groups().iter() {
//!     println!("{}: {}%", group.name, group.open_percent);
//! }
//!
//! let percent = device.adjust_group_position(0, Direction::Increment).unwrap();
//! println!("Group 0 now {}% open", percent);
//! ```

pub mod command;
pub mod constants;
pub mod device;
pub mod entities;
pub mod error;
pub mod status_frame;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use command::{Command, CommandFrame};
pub use device::{Device, DeviceSnapshot};
pub use entities::{AcUnit, EntityMap, Group, TempSensor};
pub use error::{DeviceError, FrameError, TargetKind, TransportError};
pub use status_frame::StatusFrame;
pub use transport::{TcpTransport, Transport};
pub use types::{AcMode, CommsStatus, Direction, FanSpeed, GroupMode};
