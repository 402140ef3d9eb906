use serde::{Deserialize, Serialize};
use uom::si::f64::{Area, Force, Length};
use uom::si::area::square_meter;
use uom::si::force::newton;

use crate::constants::{
    BYPASS_RATIO, ENGINE_COUNT, MAX_TAKE_OFF_WEIGHT, MAX_THRUST_SINGLE_ENGINE_SL,
    USABLE_FUEL_WEIGHT, WING_AREA,
};
use crate::control::propulsion::max_thrust;

/// High-bypass turbofan engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub max_thrust_sea_level: f64, // N
    pub bypass_ratio: f64,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            max_thrust_sea_level: MAX_THRUST_SINGLE_ENGINE_SL,
            bypass_ratio: BYPASS_RATIO,
        }
    }
}

/// Fixed-wing transport aircraft configuration.
///
/// Plain SI magnitudes so run configurations serialize alongside the
/// result files; accessors hand out dimensioned quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub wing_area: f64,           // m²
    pub max_take_off_weight: f64, // N
    pub usable_fuel_weight: f64,  // N
    pub engine_count: u32,
    pub engine: Engine,
}

impl Default for Aircraft {
    fn default() -> Self {
        Aircraft {
            wing_area: WING_AREA,
            max_take_off_weight: MAX_TAKE_OFF_WEIGHT,
            usable_fuel_weight: USABLE_FUEL_WEIGHT,
            engine_count: ENGINE_COUNT,
            engine: Engine::default(),
        }
    }
}

impl Aircraft {
    pub fn wing_area(&self) -> Area {
        Area::new::<square_meter>(self.wing_area)
    }

    pub fn max_take_off_weight(&self) -> Force {
        Force::new::<newton>(self.max_take_off_weight)
    }

    /// Total maximum available thrust of all engines at the given
    /// altitude and Mach number.
    pub fn total_max_thrust(&self, altitude: Length, mach: f64) -> Force {
        let single = max_thrust(
            Force::new::<newton>(self.engine.max_thrust_sea_level),
            self.engine.bypass_ratio,
            altitude,
            mach,
        );
        single * f64::from(self.engine_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use uom::si::length::meter;

    #[test]
    fn test_default_matches_constants() {
        let aircraft = Aircraft::default();
        assert_abs_diff_eq!(aircraft.wing_area, 500.0);
        assert_abs_diff_eq!(aircraft.max_take_off_weight, 3_600_000.0);
        assert_eq!(aircraft.engine_count, 4);
        assert_abs_diff_eq!(aircraft.engine.max_thrust_sea_level, 270_000.0);
    }

    #[test]
    fn test_total_thrust_scales_with_engine_count() {
        let aircraft = Aircraft::default();
        let total = aircraft.total_max_thrust(Length::new::<meter>(0.0), 0.0);
        // four engines at the sea-level static rating
        assert_abs_diff_eq!(total.get::<newton>(), 1_080_000.0, epsilon = 0.1);
    }

    #[test]
    fn test_config_serializes() {
        let aircraft = Aircraft::default();
        let json = serde_json::to_string(&aircraft).unwrap();
        let back: Aircraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aircraft);
    }
}
