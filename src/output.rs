//! Presentation layer.
//!
//! The pipeline produces structured records; this module turns them into
//! the machine-readable line or the decorated terminal report. Computation
//! never formats, formatting never computes.

use crate::models::estimate::Estimate;
use crate::models::params::EstimateParams;

// ─── ANSI attributes ─────────────────────────────────────────────────────────

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const WHITE: &str = "\x1b[1;37m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "--------------------------------------------------------------------";

// ─── Machine-readable line ───────────────────────────────────────────────────

/// One pipe-delimited line: `ETR|RSO|zenith|pv_max|pv_out`, each rounded to
/// one decimal. With the sun below the horizon every radiation and power
/// field is zero and the zenith is pinned to the 90° horizon.
pub fn machine_line(estimate: &Estimate) -> String {
    match estimate {
        Estimate::SunDown { .. } => "0.0|0.0|90.0|0.0|0.0".to_string(),
        Estimate::Daylight { geometry, radiation, power, .. } => format!(
            "{:.1}|{:.1}|{:.1}|{:.1}|{:.1}",
            radiation.etr_w_m2,
            radiation.shortwave_w_m2,
            geometry.zenith_deg,
            power.max_power_w,
            power.output_w
        ),
    }
}

// ─── Verbose report ──────────────────────────────────────────────────────────

/// Multi-line human-readable report listing every intermediate value, with
/// the headline results highlighted.
pub fn report(params: &EstimateParams, estimate: &Estimate) -> String {
    let Estimate::Daylight { geometry, atmosphere, radiation, power } = estimate else {
        return "The sun has set - no data".to_string();
    };

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "{}.{}.{} | {} | {:.6} |\n",
        params.date.day,
        params.date.month,
        params.date.year,
        geometry.day_of_year,
        geometry.time_of_day
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Solar constant                               : {} kW/m²\n",
        params.solar_constant
    ));
    out.push_str(&format!(
        "Atmospheric turbidity coefficient            : {}\n",
        params.turbidity
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Equation of time                             : {} min\n",
        geometry.equation_of_time_min
    ));
    out.push_str(&format!(
        "Inverse relative distance factor             : {}\n",
        geometry.distance_factor
    ));
    out.push_str(&format!(
        "Sun declination                              : {}°\n",
        geometry.declination_deg
    ));
    out.push_str(&format!(
        "Solar noon                                   : {}\n",
        geometry.solar_noon_h
    ));
    out.push_str(&format!(
        "Barometric pressure at site                  : {} kPa\n",
        atmosphere.pressure_kpa
    ));
    out.push_str(&format!(
        "Estimated vapor pressure at site             : {} kPa\n",
        atmosphere.vapor_pressure_kpa
    ));
    out.push_str(&format!(
        "Estimated extraterrestrial radiation         : {} W/m²\n",
        radiation.etr_w_m2
    ));
    out.push_str(&format!(
        "Estimated precipitable water in atmosphere   : {} mm\n",
        atmosphere.precipitable_water_mm
    ));
    out.push_str(&format!(
        "Clearness index for direct beam radiation    : {}\n",
        radiation.clearness_index
    ));
    out.push_str(&format!(
        "Transmissivity index for diffuse radiation   : {}\n",
        radiation.transmissivity_index
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Model estimated shortwave radiation (RSO)    : {YELLOW}{:.1} W/m²{RESET}\n",
        radiation.shortwave_w_m2
    ));
    out.push_str(&format!(
        "Optimum elevation of PV panel                : {WHITE}{:.1}°{RESET}\n",
        geometry.zenith_deg
    ));
    out.push_str(&format!(
        "Model estimated max. PV power output         : {GREEN}{:.1} W{RESET} {WHITE}@ {:.0}% module efficiency{RESET}\n",
        power.max_power_w, params.panel.efficiency_pct
    ));
    out.push_str(&format!(
        "Module temperature conversion loss           : -{RED}{:.1} W / {:.1}%{RESET}\n",
        power.temp_loss_w, power.temp_loss_pct
    ));
    out.push_str(&format!(
        "Module aging loss                            : -{RED}{:.1} W{RESET}\n",
        power.age_loss_w
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Model estimated real PV power output         : {GREEN}{:.1} W{RESET}",
        power.output_w
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params::{CivilDate, CivilTime, PanelParams};
    use crate::services::power_service;

    fn params_at(date: CivilDate, time: CivilTime) -> EstimateParams {
        EstimateParams {
            solar_constant: 1361.0,
            latitude: 48.0,
            longitude: 11.0,
            altitude_m: 0.0,
            date,
            time,
            air_temperature_c: 25.0,
            relative_humidity_pct: 50.0,
            air_pressure_hpa: None,
            turbidity: 0.95,
            panel: PanelParams {
                area_m2: 1.67,
                efficiency_pct: 16.0,
                temperature_c: 25.0,
                temp_coefficient: 0.35,
                age_coefficient: 0.98,
            },
        }
    }

    #[test]
    fn test_sun_down_machine_line_is_exact() {
        let p = params_at(
            CivilDate { year: 2024, month: 1, day: 15 },
            CivilTime { hour: 0, minute: 0, second: 0 },
        );
        let e = power_service::estimate(&p).unwrap();
        assert_eq!(machine_line(&e), "0.0|0.0|90.0|0.0|0.0");
    }

    #[test]
    fn test_daylight_machine_line_shape() {
        let p = params_at(
            CivilDate { year: 2024, month: 6, day: 21 },
            CivilTime { hour: 12, minute: 0, second: 0 },
        );
        let e = power_service::estimate(&p).unwrap();
        let line = machine_line(&e);
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields.len(), 5, "expected 5 fields in {:?}", line);
        for field in &fields {
            let (_, decimals) = field.split_once('.').expect("field should carry decimals");
            assert_eq!(decimals.len(), 1, "one decimal place per field, got {:?}", field);
            field.parse::<f64>().expect("field should be numeric");
        }
    }

    #[test]
    fn test_sun_down_report_message() {
        let p = params_at(
            CivilDate { year: 2024, month: 1, day: 15 },
            CivilTime { hour: 0, minute: 0, second: 0 },
        );
        let e = power_service::estimate(&p).unwrap();
        assert_eq!(report(&p, &e), "The sun has set - no data");
    }

    #[test]
    fn test_daylight_report_lists_intermediates() {
        let p = params_at(
            CivilDate { year: 2024, month: 6, day: 21 },
            CivilTime { hour: 12, minute: 0, second: 0 },
        );
        let e = power_service::estimate(&p).unwrap();
        let r = report(&p, &e);
        for needle in [
            "Equation of time",
            "Inverse relative distance factor",
            "Sun declination",
            "Solar noon",
            "Barometric pressure at site",
            "Estimated vapor pressure at site",
            "Estimated extraterrestrial radiation",
            "Estimated precipitable water in atmosphere",
            "Clearness index for direct beam radiation",
            "Transmissivity index for diffuse radiation",
            "Model estimated shortwave radiation (RSO)",
            "Model estimated real PV power output",
        ] {
            assert!(r.contains(needle), "report is missing {:?}", needle);
        }
        // RSO highlighted in yellow, net power in green.
        assert!(r.contains("\x1b[1;33m"));
        assert!(r.contains("\x1b[1;32m"));
    }
}
