/// ============================================================
///  Clear-Sky Solar Irradiance Estimation
///
///  Algorithm pipeline:
///   1. Temporal resolution – day of year, fractional hour of day
///   2. Solar geometry      – equation of time, Earth-Sun distance
///                            factor, declination, solar noon,
///                            zenith angle
///   3. Atmospheric state   – barometric pressure (measured or
///                            altitude-derived), vapor pressure,
///                            precipitable water
///   4. Radiation model     – extraterrestrial radiation, clearness
///                            and transmissivity indices, surface
///                            shortwave radiation (RSO)
/// ============================================================
use std::f64::consts::PI;

use crate::error::EstimateError;
use crate::models::estimate::{Atmosphere, Radiation, SolarGeometry};
use crate::models::params::{CivilDate, CivilTime, EstimateParams};

// ─── Constants ───────────────────────────────────────────────

/// Phase of the equation-of-time expansion argument (radians).
const EQT_PHASE: f64 = 4.8718;
/// The third sine term of the expansion carries its own phase.
const EQT_PHASE_3: f64 = 4.871;

/// Fixed daylight-saving offset in hours. Timezone handling is a
/// longitude-based approximation, so this stays zero.
const DST_OFFSET_H: f64 = 0.0;

/// Cumulative days before each month, common year.
const CUMULATIVE_DAYS: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
/// Cumulative days before each month, leap year.
const CUMULATIVE_DAYS_LEAP: [u32; 13] =
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

// ─── Checked inverse trig ────────────────────────────────────

#[inline]
fn checked_asin(value: f64, function: &'static str) -> Result<f64, EstimateError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(EstimateError::Domain { function, value });
    }
    Ok(value.asin())
}

#[inline]
fn checked_acos(value: f64, function: &'static str) -> Result<f64, EstimateError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(EstimateError::Domain { function, value });
    }
    Ok(value.acos())
}

// ─── 1. Temporal resolution ──────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Day of year (1..=366) from a Gregorian date, via the cumulative
/// month-length table for the year kind.
pub fn day_of_year(date: CivilDate) -> Result<u16, EstimateError> {
    let invalid = EstimateError::InvalidDate {
        year: date.year,
        month: date.month,
        day: date.day,
    };
    if !(1..=12).contains(&date.month) {
        return Err(invalid);
    }
    let table = if is_leap_year(date.year) { &CUMULATIVE_DAYS_LEAP } else { &CUMULATIVE_DAYS };
    let month = date.month as usize;
    let month_len = table[month] - table[month - 1];
    if date.day < 1 || date.day > month_len {
        return Err(invalid);
    }
    Ok((table[month - 1] + date.day) as u16)
}

/// Fractional hour of day (0..24).
pub fn time_of_day(time: CivilTime) -> Result<f64, EstimateError> {
    if time.hour >= 24 || time.minute >= 60 || time.second >= 60 {
        return Err(EstimateError::InvalidTime {
            hour: time.hour,
            minute: time.minute,
            second: time.second,
        });
    }
    Ok(f64::from(time.hour) + f64::from(time.minute * 60 + time.second) / 3600.0)
}

// ─── 2. Solar geometry ───────────────────────────────────────

/// Equation of time (minutes) from the trigonometric expansion in
/// `2π·DoY/366 + 4.8718`.
fn equation_of_time(doy: f64) -> f64 {
    let x = (2.0 * PI * doy) / 366.0 + EQT_PHASE;
    let x3 = (2.0 * PI * doy) / 366.0 + EQT_PHASE_3;
    (5.0323 - 430.847 * x.cos()
        + 12.5024 * (2.0 * x).cos()
        + 18.25 * (3.0 * x).cos()
        - 100.976 * x.sin()
        + 595.275 * (2.0 * x).sin()
        + 3.6858 * (3.0 * x3).sin()
        - 12.47 * (4.0 * x).sin())
        / 60.0
}

/// Inverse relative Earth-Sun distance factor.
///
/// The series takes the raw day-of-year count as its trig argument
/// (no angle-per-day scaling); the established model behaves this way
/// and downstream numbers depend on it.
fn distance_factor(doy: f64) -> f64 {
    1.0 / (1.0
        - 9.464e-4 * doy.sin()
        - 0.01671 * doy.cos()
        - 1.489e-4 * (2.0 * doy).cos()
        - 2.917e-5 * (3.0 * doy).sin()
        - 3.438e-4 * (4.0 * doy).cos())
        .powi(2)
}

/// Solar declination in degrees (Campbell & Norman form).
fn declination(doy: f64) -> Result<f64, EstimateError> {
    let mean_anomaly = (356.6 + 0.9856 * doy).to_radians();
    let ecliptic_lon = (278.97 + 0.9856 * doy + 1.9165 * mean_anomaly.sin()).to_radians();
    Ok(checked_asin(0.39785 * ecliptic_lon.sin(), "solar declination asin")?.to_degrees())
}

/// Full geometry stage: everything needed to decide whether the sun is up
/// and, if so, where it stands.
pub fn geometry(params: &EstimateParams) -> Result<SolarGeometry, EstimateError> {
    let doy = day_of_year(params.date)?;
    let tod = time_of_day(params.time)?;
    let doy_f = f64::from(doy);

    let eqt = equation_of_time(doy_f);
    let dist = distance_factor(doy_f);
    let decl = declination(doy_f)?;

    // Longitude-based timezone approximation: the offset term cancels
    // against the longitude correction, leaving only the equation of time.
    let tz_offset_deg = params.longitude;
    let noon = (12.0 + DST_OFFSET_H) - eqt / 60.0 - (tz_offset_deg - params.longitude) / 15.0;

    let lat = params.latitude.to_radians();
    let decl_rad = decl.to_radians();
    let hour_angle = (tod - noon) * PI / 12.0;
    let cos_zenith = lat.sin() * decl_rad.sin() + lat.cos() * decl_rad.cos() * hour_angle.cos();
    let zenith = checked_acos(cos_zenith, "solar zenith acos")?.to_degrees();

    Ok(SolarGeometry {
        day_of_year: doy,
        time_of_day: tod,
        equation_of_time_min: eqt,
        distance_factor: dist,
        declination_deg: decl,
        solar_noon_h: noon,
        zenith_deg: zenith,
    })
}

// ─── 3. Atmospheric state ────────────────────────────────────

/// Barometric pressure at the site (kPa). Prefers the measured value;
/// falls back to the ISA barometric formula on the site altitude.
fn pressure_kpa(air_pressure_hpa: Option<f64>, altitude_m: f64) -> f64 {
    match air_pressure_hpa {
        Some(hpa) => hpa / 10.0,
        None => 101.325 * ((288.0 - 0.0065 * altitude_m) / 288.0).powf(9.80665 / (0.0065 * 287.0)),
    }
}

/// Air vapor pressure (kPa): Buck saturation curve scaled by relative
/// humidity.
fn vapor_pressure_kpa(air_temperature_c: f64, relative_humidity_pct: f64) -> f64 {
    0.61121 * (17.502 * air_temperature_c / (240.97 + air_temperature_c)).exp()
        * (relative_humidity_pct / 100.0)
}

pub fn atmosphere(params: &EstimateParams) -> Atmosphere {
    let pressure = pressure_kpa(params.air_pressure_hpa, params.altitude_m);
    let vapor = vapor_pressure_kpa(params.air_temperature_c, params.relative_humidity_pct);
    let precipitable_water = 0.14 * vapor * pressure + 2.1;
    Atmosphere {
        pressure_kpa: pressure,
        vapor_pressure_kpa: vapor,
        precipitable_water_mm: precipitable_water,
    }
}

// ─── 4. Radiation model ──────────────────────────────────────

/// Clear-sky radiation stage. Caller must have established that the sun is
/// above the horizon (zenith ≤ 90°); the horizon sine is strictly positive
/// under that contract.
pub fn radiation(
    params: &EstimateParams,
    geometry: &SolarGeometry,
    atmosphere: &Atmosphere,
) -> Radiation {
    let etr =
        params.solar_constant * geometry.distance_factor * geometry.zenith_deg.to_radians().cos();

    let horizon_sin = (90.0 - geometry.zenith_deg).to_radians().sin();
    let clearness = 0.98
        * ((-0.00146 * atmosphere.pressure_kpa) / (params.turbidity * horizon_sin)
            - 0.075 * (atmosphere.precipitable_water_mm / horizon_sin).powf(0.4))
        .exp();

    let transmissivity =
        if clearness > 0.15 { 0.35 - 0.36 * clearness } else { 0.18 + 0.82 * clearness };

    Radiation {
        etr_w_m2: etr,
        clearness_index: clearness,
        transmissivity_index: transmissivity,
        shortwave_w_m2: (clearness + transmissivity) * etr,
    }
}

// ─── Tests ───────────────────────────────────────────────────
