/// Errors raised while building requests from user-supplied input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("invalid origin `{0}`: expected scheme://host[:port]")]
    InvalidOrigin(String),
    #[error("invalid parameter `{0}`: expected name=value")]
    InvalidParameter(String),
    #[error("setting `{name}` expects an integer, got `{value}`")]
    NonNumericSetting { name: String, value: String },
}
