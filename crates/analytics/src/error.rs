use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid dashboard setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
