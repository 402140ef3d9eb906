use uom::si::f64::{Length, MassDensity, Pressure, ThermodynamicTemperature, Velocity};
use uom::si::length::meter;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;
use uom::si::velocity::meter_per_second;

use crate::constants::{
    AIR_GAS_CONSTANT, GRAVITY, HEAT_CAPACITY_RATIO, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
    TROPOPAUSE_ALTITUDE, TROPOPAUSE_TEMPERATURE, TROPOSPHERE_LAPSE_RATE,
};

/// International Standard Atmosphere properties at one altitude.
///
/// Two layers are modeled: the troposphere (linear temperature lapse)
/// and the lower stratosphere up to 20 km (isothermal at 216.65 K).
/// The simulator terminates well below the upper limit.
pub struct Atmosphere {
    pub altitude: Length,
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
}

impl Atmosphere {
    pub fn at_altitude(altitude: Length) -> Self {
        let h = altitude.get::<meter>();

        let (temperature, pressure) = if h <= TROPOPAUSE_ALTITUDE {
            let t = SEA_LEVEL_TEMPERATURE + TROPOSPHERE_LAPSE_RATE * h;
            let exponent = -GRAVITY / (TROPOSPHERE_LAPSE_RATE * AIR_GAS_CONSTANT);
            let p = SEA_LEVEL_PRESSURE * (t / SEA_LEVEL_TEMPERATURE).powf(exponent);
            (t, p)
        } else {
            let t = TROPOPAUSE_TEMPERATURE;
            let p = Self::tropopause_pressure()
                * (-GRAVITY * (h - TROPOPAUSE_ALTITUDE) / (AIR_GAS_CONSTANT * t)).exp();
            (t, p)
        };

        let density = pressure / (AIR_GAS_CONSTANT * temperature);

        Atmosphere {
            altitude,
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            pressure: Pressure::new::<pascal>(pressure),
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
        }
    }

    pub fn sea_level() -> Self {
        Self::at_altitude(Length::new::<meter>(0.0))
    }

    pub fn speed_of_sound(&self) -> Velocity {
        let t = self.temperature.get::<kelvin>();
        Velocity::new::<meter_per_second>((HEAT_CAPACITY_RATIO * AIR_GAS_CONSTANT * t).sqrt())
    }

    fn tropopause_pressure() -> f64 {
        let exponent = -GRAVITY / (TROPOSPHERE_LAPSE_RATE * AIR_GAS_CONSTANT);
        SEA_LEVEL_PRESSURE
            * (TROPOPAUSE_TEMPERATURE / SEA_LEVEL_TEMPERATURE).powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sea_level_conditions() {
        let atmosphere = Atmosphere::sea_level();

        assert_abs_diff_eq!(
            atmosphere.temperature.get::<kelvin>(),
            288.15,
            epsilon = 0.01
        );
        assert_abs_diff_eq!(atmosphere.pressure.get::<pascal>(), 101_325.0, epsilon = 0.1);
        assert_abs_diff_eq!(
            atmosphere.density.get::<kilogram_per_cubic_meter>(),
            1.225,
            epsilon = 0.001
        );
    }

    #[test]
    fn test_tropopause_conditions() {
        let atmosphere = Atmosphere::at_altitude(Length::new::<meter>(11_000.0));

        assert_abs_diff_eq!(
            atmosphere.temperature.get::<kelvin>(),
            216.65,
            epsilon = 0.01
        );
        assert_abs_diff_eq!(atmosphere.pressure.get::<pascal>(), 22_632.0, epsilon = 10.0);
        assert_abs_diff_eq!(
            atmosphere.density.get::<kilogram_per_cubic_meter>(),
            0.3639,
            epsilon = 0.001
        );
    }

    #[test]
    fn test_stratosphere_is_isothermal() {
        let lower = Atmosphere::at_altitude(Length::new::<meter>(12_000.0));
        let upper = Atmosphere::at_altitude(Length::new::<meter>(18_000.0));

        assert_abs_diff_eq!(
            lower.temperature.get::<kelvin>(),
            upper.temperature.get::<kelvin>(),
            epsilon = 1e-9
        );
        assert!(upper.pressure.get::<pascal>() < lower.pressure.get::<pascal>());
    }

    #[test]
    fn test_speed_of_sound_at_sea_level() {
        let atmosphere = Atmosphere::sea_level();
        assert_abs_diff_eq!(
            atmosphere.speed_of_sound().get::<meter_per_second>(),
            340.29,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_pressure_decreases_with_altitude() {
        let altitudes = [0.0, 2_000.0, 5_000.0, 8_000.0, 11_000.0, 15_000.0];
        let pressures: Vec<f64> = altitudes
            .iter()
            .map(|&h| {
                Atmosphere::at_altitude(Length::new::<meter>(h))
                    .pressure
                    .get::<pascal>()
            })
            .collect();

        for pair in pressures.windows(2) {
            assert!(pair[1] < pair[0], "pressure must fall with altitude");
        }
    }
}
