use chrono::{DateTime, Local};

/// Source of "now" for default date/time resolution.
///
/// Only the parameter-resolution step consults a clock, and only when no
/// explicit date or time was given; the estimation pipeline itself never
/// reads it, so identical parameters always produce identical output.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
