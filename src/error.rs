use thiserror::Error;

/// Failures the estimation pipeline can surface to the caller.
///
/// A sun-below-horizon result is deliberately not represented here: it is a
/// recognized terminal state of the geometry stage and maps to
/// [`crate::models::estimate::Estimate::SunDown`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// An inverse trigonometric function received an argument outside
    /// [-1, 1]. Only reachable through pathological parameter combinations;
    /// never silently clamped.
    #[error("{function} received {value}, outside the valid domain [-1, 1]")]
    Domain { function: &'static str, value: f64 },
}
