
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpanlineError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: String, end: String },
    #[error("Malformed timespan descriptor: {0}")]
    MalformedTimespan(String),
    #[error("Property not found among regular events: {0}")]
    PropertyNotFound(String),
    #[error("No regular datapoints to interpolate: {0}")]
    EmptyDataset(String),
    #[error("Non-numeric value {value} at {at} cannot be interpolated")]
    NonNumericDatapoint { at: String, value: String },
    #[error("Description error: {0}")]
    Description(String),
}

pub type Result<T> = std::result::Result<T, SpanlineError>;

// Helper conversions
impl From<serde_yaml::Error> for SpanlineError {
    fn from(e: serde_yaml::Error) -> Self { Self::Description(e.to_string()) }
}
impl From<std::io::Error> for SpanlineError {
    fn from(e: std::io::Error) -> Self { Self::Description(e.to_string()) }
}
