//! Command-line surface and parameter resolution.
//!
//! Flag names follow the established model's argument table; each keeps its
//! exact name as a long option. Range checking happens here, at the
//! boundary, so the pipeline only ever sees plausible scalars.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use clap::Parser;

use crate::clock::Clock;
use crate::models::params::{CivilDate, CivilTime, EstimateParams, PanelParams};

// ─── Arguments ───────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Clear-sky solar irradiance and PV power output estimation")]
pub struct Args {
    /// Solar constant (@1AU) in kW/m²
    #[arg(long = "sc", default_value_t = 1361.0, value_parser = parse_positive_f64)]
    pub solar_constant: f64,

    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long = "lat", default_value_t = 48.0, allow_hyphen_values = true,
          value_parser = parse_latitude, env = "CLEARSKY_LATITUDE")]
    pub latitude: f64,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long = "lon", default_value_t = 11.0, allow_hyphen_values = true,
          value_parser = parse_longitude, env = "CLEARSKY_LONGITUDE")]
    pub longitude: f64,

    /// Altitude in meters above sea level (may be negative)
    #[arg(long = "alt", default_value_t = 0.0, allow_hyphen_values = true,
          env = "CLEARSKY_ALTITUDE")]
    pub altitude: f64,

    /// ISO date YYYY-MM-DD [default: today]
    #[arg(long = "date", value_parser = parse_iso_date)]
    pub date: Option<NaiveDate>,

    /// ISO time HH:MM:SS [default: now]
    #[arg(long = "time", value_parser = parse_iso_time)]
    pub time: Option<NaiveTime>,

    /// Atmospheric temperature in °C
    #[arg(long = "at_t", default_value_t = 25.0, allow_hyphen_values = true)]
    pub air_temperature: f64,

    /// Atmospheric relative humidity in percent (0 to 100)
    #[arg(long = "at_h", default_value_t = 50.0, value_parser = parse_humidity)]
    pub relative_humidity: f64,

    /// Atmospheric air pressure in hPa [default: estimated from altitude]
    #[arg(long = "at_p", value_parser = parse_positive_f64)]
    pub air_pressure: Option<f64>,

    /// Atmospheric turbidity coefficient
    #[arg(long = "at_tc", default_value_t = 0.95, value_parser = parse_positive_f64)]
    pub turbidity: f64,

    /// Effective PV panel surface in m²
    #[arg(long = "pv_a", default_value_t = 1.67, value_parser = parse_positive_f64,
          env = "CLEARSKY_PANEL_AREA")]
    pub panel_area: f64,

    /// PV panel efficiency in percent (0 to 100)
    #[arg(long = "pv_e", default_value_t = 16.0, value_parser = parse_efficiency,
          env = "CLEARSKY_PANEL_EFFICIENCY")]
    pub panel_efficiency: f64,

    /// PV panel temperature in °C
    #[arg(long = "pv_t", default_value_t = 25.0, allow_hyphen_values = true)]
    pub panel_temperature: f64,

    /// PV panel negative temperature coefficient (% per °C above 25 °C)
    #[arg(long = "pv_tc", default_value_t = 0.35)]
    pub panel_temp_coefficient: f64,

    /// PV panel age-related retention coefficient (0 to 1, 1 = new)
    #[arg(long = "pv_ac", default_value_t = 0.98, value_parser = parse_age_coefficient)]
    pub panel_age_coefficient: f64,

    /// Verbose multi-line report instead of the pipe-delimited line
    #[arg(short = 'v', long, conflicts_with = "json")]
    pub verbose: bool,

    /// Emit the full estimate as pretty-printed JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Build the immutable parameter record. The clock is consulted only
    /// for an omitted date or time; everything downstream is clock-free.
    pub fn resolve(&self, clock: &dyn Clock) -> EstimateParams {
        let now = clock.now();
        let date = self.date.unwrap_or_else(|| now.date_naive());
        let time = self.time.unwrap_or_else(|| now.time());

        EstimateParams {
            solar_constant: self.solar_constant,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude_m: self.altitude,
            date: CivilDate { year: date.year(), month: date.month(), day: date.day() },
            time: CivilTime { hour: time.hour(), minute: time.minute(), second: time.second() },
            air_temperature_c: self.air_temperature,
            relative_humidity_pct: self.relative_humidity,
            air_pressure_hpa: self.air_pressure,
            turbidity: self.turbidity,
            panel: PanelParams {
                area_m2: self.panel_area,
                efficiency_pct: self.panel_efficiency,
                temperature_c: self.panel_temperature,
                temp_coefficient: self.panel_temp_coefficient,
                age_coefficient: self.panel_age_coefficient,
            },
        }
    }
}

// ─── Value parsers ───────────────────────────────────────────────────────────

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if v <= 0.0 {
        return Err(format!("Value must be positive, got {}", v));
    }
    Ok(v)
}

fn parse_humidity(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..=100.0).contains(&v) {
        return Err(format!("Relative humidity must be between 0 and 100, got {}", v));
    }
    Ok(v)
}

fn parse_efficiency(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..=100.0).contains(&v) {
        return Err(format!("Efficiency must be between 0 and 100 percent, got {}", v));
    }
    Ok(v)
}

fn parse_age_coefficient(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("Age coefficient must be between 0.0 and 1.0, got {}", v));
    }
    Ok(v)
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid ISO date (expected YYYY-MM-DD): {}", s))
}

fn parse_iso_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .map_err(|_| format!("Invalid ISO time (expected HH:MM:SS): {}", s))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
