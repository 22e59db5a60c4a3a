use serde::{Deserialize, Serialize};

// ─── Date / time inputs ──────────────────────────────────────────────────────

/// Gregorian calendar date of the evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Local time of day of the evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CivilTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

// ─── Panel parameters ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelParams {
    /// Effective panel surface (m²)
    pub area_m2: f64,
    /// Module efficiency in percent (typical crystalline Si: 15-22)
    pub efficiency_pct: f64,
    /// Module temperature (°C)
    pub temperature_c: f64,
    /// Negative temperature coefficient (% output per °C above 25 °C)
    pub temp_coefficient: f64,
    /// Age-related retention factor in 0..1 (1.0 = new panel)
    pub age_coefficient: f64,
}

// ─── Full parameter set ──────────────────────────────────────────────────────

/// Complete input record for one estimation. Built once per invocation and
/// never mutated; every derived value is a pure function of these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateParams {
    /// Solar constant at 1 AU (kW/m²)
    pub solar_constant: f64,
    /// Latitude in decimal degrees (-90..90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180..180)
    pub longitude: f64,
    /// Site altitude in meters above sea level (may be negative)
    pub altitude_m: f64,
    pub date: CivilDate,
    pub time: CivilTime,
    /// Ambient air temperature (°C)
    pub air_temperature_c: f64,
    /// Relative humidity in percent (0..100)
    pub relative_humidity_pct: f64,
    /// Measured barometric pressure (hPa). When absent the pressure is
    /// estimated from `altitude_m` instead.
    pub air_pressure_hpa: Option<f64>,
    /// Atmospheric turbidity coefficient (clear sky ~0.95)
    pub turbidity: f64,
    pub panel: PanelParams,
}
