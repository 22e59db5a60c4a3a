use serde::Serialize;

// ─── Stage outputs ───────────────────────────────────────────────────────────
//
// Each pipeline stage produces one immutable record; later stages only read
// the records of earlier stages. Field order mirrors computation order.

/// Temporal resolution and solar geometry.
#[derive(Debug, Clone, Serialize)]
pub struct SolarGeometry {
    /// Day of year, 1..=366
    pub day_of_year: u16,
    /// Fractional hour of day, 0..24
    pub time_of_day: f64,
    /// Equation of time (minutes)
    pub equation_of_time_min: f64,
    /// Inverse relative Earth-Sun distance factor
    pub distance_factor: f64,
    /// Solar declination (degrees)
    pub declination_deg: f64,
    /// Time of solar noon (fractional hours)
    pub solar_noon_h: f64,
    /// Solar zenith angle (degrees); > 90 means the sun is below the horizon
    pub zenith_deg: f64,
}

/// Atmospheric state at the site.
#[derive(Debug, Clone, Serialize)]
pub struct Atmosphere {
    /// Barometric pressure (kPa), measured or altitude-derived
    pub pressure_kpa: f64,
    /// Air vapor pressure (kPa)
    pub vapor_pressure_kpa: f64,
    /// Precipitable water column (mm)
    pub precipitable_water_mm: f64,
}

/// Clear-sky radiation estimate.
#[derive(Debug, Clone, Serialize)]
pub struct Radiation {
    /// Extraterrestrial radiation (W/m²)
    pub etr_w_m2: f64,
    /// Clearness index for direct beam radiation
    pub clearness_index: f64,
    /// Transmissivity index for diffuse radiation
    pub transmissivity_index: f64,
    /// Modeled shortwave radiation reaching the surface, RSO (W/m²)
    pub shortwave_w_m2: f64,
}

/// Panel power output after derating.
#[derive(Debug, Clone, Serialize)]
pub struct PvPower {
    /// Theoretical maximum output at nominal efficiency (W)
    pub max_power_w: f64,
    /// Temperature conversion loss (%)
    pub temp_loss_pct: f64,
    /// Temperature conversion loss (W)
    pub temp_loss_w: f64,
    /// Aging loss (W)
    pub age_loss_w: f64,
    /// Net output power (W)
    pub output_w: f64,
}

// ─── Final result ────────────────────────────────────────────────────────────

/// Result of one estimation.
///
/// `SunDown` is produced when the zenith angle exceeds 90°: the pipeline
/// stops after the geometry stage and reports a zero-output result instead
/// of evaluating the atmospheric terms, which would divide by near-zero
/// horizon sines.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "sky", rename_all = "snake_case")]
pub enum Estimate {
    Daylight {
        geometry: SolarGeometry,
        atmosphere: Atmosphere,
        radiation: Radiation,
        power: PvPower,
    },
    SunDown {
        geometry: SolarGeometry,
    },
}
