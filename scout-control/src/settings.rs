use crate::command::ConfigParam;
use crate::error::ControlError;

/// A device setting exposed on the control page's settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub name: &'static str,
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl Setting {
    pub const ALL: &'static [Setting] = &[
        Setting {
            name: "flash",
            label: "Lights",
            min: 0,
            max: 255,
            default: 10,
        },
        Setting {
            name: "quality",
            label: "Quality",
            min: 10,
            max: 63,
            default: 10,
        },
        Setting {
            name: "framesize",
            label: "Resolution",
            min: 0,
            max: 6,
            default: 5,
        },
        Setting {
            name: "speed",
            label: "Speed",
            min: 0,
            max: 8,
            default: 8,
        },
        Setting {
            name: "ltrim",
            label: "Left Trim",
            min: -192,
            max: 192,
            default: 0,
        },
        Setting {
            name: "rtrim",
            label: "Right Trim",
            min: -192,
            max: 192,
            default: 0,
        },
    ];

    pub fn lookup(name: &str) -> Option<&'static Setting> {
        Self::ALL.iter().find(|s| s.name == name)
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub fn param(&self, value: i32) -> ConfigParam {
        ConfigParam::new(self.name, self.clamp(value).to_string())
    }
}

/// Build a `/config` parameter from user input. Known settings must be
/// integers and are clamped to their range; unknown names pass through as-is.
pub fn resolve_param(name: &str, value: &str) -> Result<ConfigParam, ControlError> {
    match Setting::lookup(name) {
        Some(setting) => {
            let parsed: i32 = value.trim().parse().map_err(|_| ControlError::NonNumericSetting {
                name: name.to_string(),
                value: value.to_string(),
            })?;
            Ok(setting.param(parsed))
        }
        None => Ok(ConfigParam::new(name, value)),
    }
}
