use crate::error::EstimateError;
use crate::models::estimate::{Estimate, PvPower, Radiation};
use crate::models::params::{EstimateParams, PanelParams};
use crate::services::solar_algorithm;

/// Derate the modeled shortwave radiation into panel output power.
///
/// Max power assumes the panel at nominal efficiency; temperature loss
/// applies the negative coefficient per degree above the 25 °C reference,
/// aging loss the retention factor.
pub fn derate(radiation: &Radiation, panel: &PanelParams) -> PvPower {
    let max_power_w = radiation.shortwave_w_m2 * panel.area_m2 / 100.0 * panel.efficiency_pct;

    let temp_loss_pct = (panel.temperature_c - 25.0) * panel.temp_coefficient;
    let temp_loss_w = max_power_w / 100.0 * temp_loss_pct;

    let age_loss_w = max_power_w - max_power_w * panel.age_coefficient;

    PvPower {
        max_power_w,
        temp_loss_pct,
        temp_loss_w,
        age_loss_w,
        output_w: max_power_w - age_loss_w - temp_loss_w,
    }
}

/// Run the full estimation pipeline for one parameter set.
///
/// Pure function: no clock, no I/O, no shared state. A zenith angle above
/// 90° short-circuits into [`Estimate::SunDown`] after the geometry stage;
/// the atmospheric and radiation stages are only evaluated for a sun above
/// the horizon.
pub fn estimate(params: &EstimateParams) -> Result<Estimate, EstimateError> {
    let geometry = solar_algorithm::geometry(params)?;

    if geometry.zenith_deg > 90.0 {
        return Ok(Estimate::SunDown { geometry });
    }

    let atmosphere = solar_algorithm::atmosphere(params);
    let radiation = solar_algorithm::radiation(params, &geometry, &atmosphere);
    let power = derate(&radiation, &params.panel);

    Ok(Estimate::Daylight { geometry, atmosphere, radiation, power })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params::{CivilDate, CivilTime};
    use proptest::prelude::*;

    /// Summer-solstice noon at the default site: the sun is guaranteed to
    /// be well above the horizon.
    fn sunlit_params() -> EstimateParams {
        EstimateParams {
            solar_constant: 1361.0,
            latitude: 48.0,
            longitude: 11.0,
            altitude_m: 0.0,
            date: CivilDate { year: 2024, month: 6, day: 21 },
            time: CivilTime { hour: 12, minute: 0, second: 0 },
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

    fn daylight_power(params: &EstimateParams) -> PvPower {
        match estimate(params).unwrap() {
            Estimate::Daylight { power, .. } => power,
            Estimate::SunDown { geometry } => {
                panic!("expected daylight, sun down at zenith {:.1}", geometry.zenith_deg)
            }
        }
    }

    #[test]
    fn test_solstice_noon_output() {
        let e = estimate(&sunlit_params()).unwrap();
        let Estimate::Daylight { radiation, power, .. } = e else {
            panic!("expected daylight estimate");
        };
        assert!(
            power.max_power_w > 200.0 && power.max_power_w < 300.0,
            "1.67 m² at 16 % under ~900 W/m² should peak at ~240 W, got {:.1}",
            power.max_power_w
        );
        // Panel at reference temperature: no thermal loss, only aging.
        assert_eq!(power.temp_loss_w, 0.0);
        assert!((power.age_loss_w - power.max_power_w * 0.02).abs() < 1e-9);
        assert!(power.output_w < power.max_power_w);
        assert!(radiation.shortwave_w_m2 > power.max_power_w);
    }

    #[test]
    fn test_winter_midnight_is_sun_down() {
        let mut p = sunlit_params();
        p.date = CivilDate { year: 2024, month: 1, day: 15 };
        p.time = CivilTime { hour: 0, minute: 0, second: 0 };
        match estimate(&p).unwrap() {
            Estimate::SunDown { geometry } => assert!(geometry.zenith_deg > 90.0),
            Estimate::Daylight { .. } => panic!("winter midnight must be sun-down"),
        }
    }

    #[test]
    fn test_measured_pressure_round_trip() {
        let mut p = sunlit_params();
        p.air_pressure_hpa = Some(1013.0);
        p.altitude_m = 3000.0; // must be ignored when a measurement is present
        let Estimate::Daylight { atmosphere, .. } = estimate(&p).unwrap() else {
            panic!("expected daylight estimate");
        };
        assert_eq!(atmosphere.pressure_kpa, 101.3);
    }

    #[test]
    fn test_new_panel_has_no_age_loss() {
        let mut p = sunlit_params();
        p.panel.age_coefficient = 1.0;
        let power = daylight_power(&p);
        assert_eq!(power.age_loss_w, 0.0);
        assert_eq!(power.output_w, power.max_power_w - power.temp_loss_w);
    }

    #[test]
    fn test_invalid_date_propagates() {
        let mut p = sunlit_params();
        p.date = CivilDate { year: 2023, month: 2, day: 29 };
        assert_eq!(
            estimate(&p).unwrap_err(),
            EstimateError::InvalidDate { year: 2023, month: 2, day: 29 }
        );
    }

    proptest! {
        /// Raising the age coefficient toward 1.0 strictly shrinks the
        /// aging loss toward zero.
        #[test]
        fn prop_age_loss_decreases_with_retention(
            low in 0.0f64..0.99,
            delta in 0.005f64..0.5,
        ) {
            let high = (low + delta).min(1.0);
            prop_assume!(high > low);

            let mut p = sunlit_params();
            p.panel.age_coefficient = low;
            let loss_low = daylight_power(&p).age_loss_w;
            p.panel.age_coefficient = high;
            let loss_high = daylight_power(&p).age_loss_w;

            prop_assert!(
                loss_high < loss_low,
                "retention {} → {} W, retention {} → {} W",
                low, loss_low, high, loss_high
            );
        }

        /// Hotter panels above the 25 °C reference lose strictly more
        /// power to temperature derating.
        #[test]
        fn prop_temp_loss_increases_with_temperature(
            base in 25.1f64..80.0,
            delta in 0.1f64..20.0,
        ) {
            let mut p = sunlit_params();
            p.panel.temperature_c = base;
            let loss_cool = daylight_power(&p).temp_loss_w;
            p.panel.temperature_c = base + delta;
            let loss_hot = daylight_power(&p).temp_loss_w;

            prop_assert!(loss_cool > 0.0);
            prop_assert!(
                loss_hot > loss_cool,
                "{} °C → {} W, {} °C → {} W",
                base, loss_cool, base + delta, loss_hot
            );
        }

        /// Identical parameters produce bit-identical results regardless of
        /// location or instant (no hidden clock or state dependency).
        #[test]
        fn prop_estimate_is_idempotent(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..=23,
        ) {
            let mut p = sunlit_params();
            p.latitude = lat;
            p.longitude = lon;
            p.date = CivilDate { year: 2024, month, day };
            p.time = CivilTime { hour, minute: 0, second: 0 };

            let first = serde_json::to_string(&estimate(&p).unwrap()).unwrap();
            let second = serde_json::to_string(&estimate(&p).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
