use thiserror::Error;

/// Errors from loading and normalizing schedule data
///
/// `Network`, `Status` and `Decode` mean no data arrived for a request.
/// `Structural` means a response arrived but lacks a required field.
/// Unparseable times are not errors; they just produce no point.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid data structure: missing {field}")]
    Structural { field: &'static str },
}

impl ScheduleError {
    #[must_use]
    pub fn is_network(&self) -> bool {
        !matches!(self, ScheduleError::Structural { .. })
    }
}
