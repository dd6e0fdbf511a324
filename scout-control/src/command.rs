use std::fmt;

use crate::error::ControlError;
use crate::motion::MotionVector;
use crate::STREAM_PORT;

/// A drive command as it goes over the wire: percentage points in `[-100, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveCommand {
    pub forward: i32,
    pub steer: i32,
}

impl DriveCommand {
    pub const STOP: Self = Self {
        forward: 0,
        steer: 0,
    };

    /// Scale a filtered vector to percentage points, rounding to nearest.
    pub fn from_motion(motion: &MotionVector) -> Self {
        Self {
            forward: to_percent(motion.forward),
            steer: to_percent(motion.steer),
        }
    }

    pub fn query(&self) -> String {
        format!("forward={}&steer={}", self.forward, self.steer)
    }

    pub fn path(&self) -> String {
        format!("/drive?{}", self.query())
    }
}

impl From<MotionVector> for DriveCommand {
    fn from(motion: MotionVector) -> Self {
        Self::from_motion(&motion)
    }
}

impl fmt::Display for DriveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forward={:+} steer={:+}", self.forward, self.steer)
    }
}

fn to_percent(axis: f64) -> i32 {
    (axis * 100.0).round().clamp(-100.0, 100.0) as i32
}

/// A named device setting, e.g. `flash=10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParam {
    pub name: String,
    pub value: String,
}

impl ConfigParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse `name=value`. The name must be non-empty; the value may be empty.
    pub fn parse(s: &str) -> Result<Self, ControlError> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Self::new(name.trim(), value.trim()))
            }
            _ => Err(ControlError::InvalidParameter(s.to_string())),
        }
    }

    pub fn query(&self) -> String {
        format!(
            "{}={}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.value)
        )
    }

    pub fn path(&self) -> String {
        format!("/config?{}", self.query())
    }
}

/// Base address of a rover, e.g. `http://192.168.4.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    origin: String,
    /// `scheme://host` with any explicit port removed.
    host_origin: String,
}

impl Endpoint {
    pub fn new(origin: &str) -> Result<Self, ControlError> {
        let origin = origin.trim().trim_end_matches('/');
        let invalid = || ControlError::InvalidOrigin(origin.to_string());

        let (scheme, authority) = origin.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty() || authority.is_empty() || authority.contains('/') {
            return Err(invalid());
        }

        let host = match authority.rfind(':') {
            // A colon inside brackets belongs to an IPv6 literal
            Some(idx) if !authority[idx..].contains(']') => &authority[..idx],
            _ => authority,
        };
        if host.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            origin: origin.to_string(),
            host_origin: format!("{scheme}://{host}"),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn drive_url(&self, cmd: &DriveCommand) -> String {
        format!("{}{}", self.origin, cmd.path())
    }

    pub fn config_url(&self, param: &ConfigParam) -> String {
        format!("{}{}", self.origin, param.path())
    }

    /// The MJPEG stream lives on its own server on [`STREAM_PORT`].
    pub fn stream_url(&self) -> String {
        format!("{}:{}/stream", self.host_origin, STREAM_PORT)
    }

    pub fn status_url(&self) -> String {
        format!("{}/status", self.origin)
    }

    pub fn capture_url(&self) -> String {
        format!("{}/capture", self.origin)
    }
}
