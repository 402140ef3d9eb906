use uom::si::f64::{Length, Velocity};
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;
use uom::si::velocity::meter_per_second;

use crate::constants::HEAT_CAPACITY_RATIO;
use crate::control::environment::Atmosphere;
use crate::utils::rounding::round_to;

/// Convert calibrated airspeed to true airspeed.
///
/// Solves the compressible pitot-static relation between the sea-level
/// calibration condition and the ambient condition at `altitude`,
/// assuming dry air with a constant ratio of specific heats. The result
/// is rounded to two decimal places in m/s, matching the precision the
/// published relation is defined with.
pub fn cas_to_tas(v_cas: Velocity, altitude: Length) -> Velocity {
    let v = v_cas.get::<meter_per_second>();

    let at_h = Atmosphere::at_altitude(altitude);
    let at_sl = Atmosphere::sea_level();

    let rho_h = at_h.density.get::<kilogram_per_cubic_meter>();
    let rho_sl = at_sl.density.get::<kilogram_per_cubic_meter>();
    let p_h = at_h.pressure.get::<pascal>();
    let p_sl = at_sl.pressure.get::<pascal>();

    let g_r = HEAT_CAPACITY_RATIO / (HEAT_CAPACITY_RATIO - 1.0);

    let p1 = 1.0 + (rho_sl / p_sl) * v.powi(2) / (2.0 * g_r);
    let p2 = p1.powf(g_r);
    let p3 = (1.0 + (p_sl / p_h) * (p2 - 1.0)).powf(1.0 / g_r);
    let v_tas = (2.0 * g_r * (p_h / rho_h) * (p3 - 1.0)).sqrt();

    Velocity::new::<meter_per_second>(round_to(v_tas, 2))
}

/// Convert true airspeed to calibrated airspeed.
///
/// Algebraic inverse of [`cas_to_tas`]: the ambient and sea-level
/// pressure/density pairs swap roles. Rounded to two decimal places.
pub fn tas_to_cas(v_tas: Velocity, altitude: Length) -> Velocity {
    let v = v_tas.get::<meter_per_second>();

    let at_h = Atmosphere::at_altitude(altitude);
    let at_sl = Atmosphere::sea_level();

    let rho_h = at_h.density.get::<kilogram_per_cubic_meter>();
    let rho_sl = at_sl.density.get::<kilogram_per_cubic_meter>();
    let p_h = at_h.pressure.get::<pascal>();
    let p_sl = at_sl.pressure.get::<pascal>();

    let g_r = HEAT_CAPACITY_RATIO / (HEAT_CAPACITY_RATIO - 1.0);

    let p1 = 1.0 + (rho_h / p_h) * v.powi(2) / (2.0 * g_r);
    let p2 = p1.powf(g_r) - 1.0;
    let p3 = ((p_h / p_sl) * p2 + 1.0).powf(1.0 / g_r);
    let p4 = p3 - 1.0;
    let v_cas = (2.0 * g_r * (p_sl / rho_sl) * p4).sqrt();

    Velocity::new::<meter_per_second>(round_to(v_cas, 2))
}

/// Mach number for a given calibrated airspeed, rounded to three decimals.
pub fn cas_to_mach(v_cas: Velocity, altitude: Length) -> f64 {
    let v_tas = cas_to_tas(v_cas, altitude);
    let v_sound = Atmosphere::at_altitude(altitude).speed_of_sound();

    round_to(
        v_tas.get::<meter_per_second>() / v_sound.get::<meter_per_second>(),
        3,
    )
}

/// Mach number for a given true airspeed, rounded to three decimals.
pub fn tas_to_mach(v_tas: Velocity, altitude: Length) -> f64 {
    let v_sound = Atmosphere::at_altitude(altitude).speed_of_sound();

    round_to(
        v_tas.get::<meter_per_second>() / v_sound.get::<meter_per_second>(),
        3,
    )
}
