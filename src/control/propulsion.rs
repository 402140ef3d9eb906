use uom::si::f64::{Force, Length, MassRate};
use uom::si::force::newton;
use uom::si::mass_rate::kilogram_per_second;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

use crate::constants::TSFC_BASE;
use crate::control::environment::Atmosphere;
use crate::utils::rounding::round_to;

/// Maximum available thrust of one engine at altitude and Mach number.
///
/// Empirical lapse model for a high-bypass turbofan: the pressure ratio
/// delta = P_h / P_sl feeds three polynomial fits A, X, Z which combine
/// with the bypass ratio and Mach number. At delta = 1 the A polynomial
/// evaluates to exactly 1, recovering the sea-level static rating.
pub fn max_thrust(thrust_sl: Force, bypass_ratio: f64, altitude: Length, mach: f64) -> Force {
    let p_h = Atmosphere::at_altitude(altitude).pressure.get::<pascal>();
    let p_sl = Atmosphere::sea_level().pressure.get::<pascal>();
    let delta = p_h / p_sl;

    let g_0 = 0.6375 + 0.0604 * bypass_ratio;

    let a = -0.4327 * delta.powi(2) + 1.3855 * delta + 0.0472;
    let x = 0.9106 * delta.powi(3) - 1.7736 * delta.powi(2) + 1.8697 * delta;
    let z = 0.1377 * delta.powi(3) - 0.4374 * delta.powi(2) + 1.3003 * delta;

    let ram_term = z * mach * (0.377 * (1.0 + bypass_ratio))
        / (g_0 * (1.0 + 0.82 * bypass_ratio)).sqrt();
    let recovery_term = (0.23 + 0.19 * bypass_ratio.sqrt()) * x * mach.powi(2);

    let thrust = (a - ram_term + recovery_term) * thrust_sl.get::<newton>();

    Force::new::<newton>(round_to(thrust, 4))
}

/// Fuel flow rate for a given thrust setting.
///
/// Thrust-specific fuel consumption c_t = 11 (1 + M) sqrt(theta) in
/// mg/s per newton, theta being the ambient-to-sea-level temperature
/// ratio. The returned rate is in kg/s, rounded to four decimals.
pub fn fuel_flow(thrust: Force, mach: f64, altitude: Length) -> MassRate {
    let temp_h = Atmosphere::at_altitude(altitude)
        .temperature
        .get::<kelvin>();
    let temp_sl = Atmosphere::sea_level().temperature.get::<kelvin>();
    let theta = temp_h / temp_sl;

    let c_t = TSFC_BASE * (1.0 + mach) * theta.sqrt() * 1e-6; // kg/s per N
    let flow = c_t * thrust.get::<newton>();

    MassRate::new::<kilogram_per_second>(round_to(flow, 4))
}
