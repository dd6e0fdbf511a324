//! Scout rover drive control
//!
//! Platform-independent core shared by the browser runtime and the terminal
//! client: the normalized motion vector, d-pad geometry, the debouncing
//! input-to-command translator, and the `/drive` and `/config` wire encoding.

pub mod command;
pub mod controller;
pub mod error;
pub mod motion;
pub mod pad;
pub mod settings;
pub mod transport;

pub use command::{ConfigParam, DriveCommand, Endpoint};
pub use controller::{DriveController, DriveKey, LastSent};
pub use error::ControlError;
pub use motion::MotionVector;
pub use pad::{DPad, PadBounds};
pub use settings::Setting;
pub use transport::CommandSink;

/// How much an axis has to change by before a new command is sent.
/// Kept smaller than [`SPEED_MIN_THRESHOLD`] so entering or leaving the dead
/// zone always counts as a change.
pub const SPEED_CHANGE_THRESHOLD: f64 = 0.1;
/// Vectors shorter than this are snapped to zero.
pub const SPEED_MIN_THRESHOLD: f64 = 0.15;
/// Tick period; the minimum time between two commands.
pub const SPEED_MIN_SEND_DELAY_MS: u64 = 50;
/// A command is re-sent at least this often even when nothing changes.
pub const SPEED_MAX_SEND_DELAY_MS: u64 = 500;
/// Port the device serves its MJPEG stream on.
pub const STREAM_PORT: u16 = 81;
