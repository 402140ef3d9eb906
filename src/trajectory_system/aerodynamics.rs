use uom::si::f64::{Angle, Area, Force, Length, Velocity};
use uom::si::angle::radian;
use uom::si::area::square_meter;
use uom::si::force::newton;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::velocity::meter_per_second;

use crate::constants::{
    INDUCED_DRAG_FACTOR, LIFT_CURVE_INTERCEPT, LIFT_CURVE_SLOPE, ZERO_LIFT_DRAG_COEFFICIENT,
};
use crate::control::environment::Atmosphere;
use crate::trajectory_system::airspeed::cas_to_tas;
use crate::utils::rounding::round_to;

/// Steady-state lift coefficient, assuming lift equals weight.
///
/// C_L = 2 W / (rho S v_tas^2), with the true airspeed derived from the
/// calibrated airspeed at the given altitude. Rounded to four decimals.
pub fn lift_coefficient_steady(
    v_cas: Velocity,
    altitude: Length,
    weight: Force,
    wing_area: Area,
) -> f64 {
    let rho = Atmosphere::at_altitude(altitude)
        .density
        .get::<kilogram_per_cubic_meter>();
    let v_tas = cas_to_tas(v_cas, altitude).get::<meter_per_second>();

    let lift = weight.get::<newton>();
    let s = wing_area.get::<square_meter>();

    round_to(2.0 * lift / (rho * s * v_tas.powi(2)), 4)
}

/// Drag from the parabolic polar C_D = C_D0 + K C_L^2.
pub fn drag(v_cas: Velocity, altitude: Length, c_l: f64, wing_area: Area) -> Force {
    let rho = Atmosphere::at_altitude(altitude)
        .density
        .get::<kilogram_per_cubic_meter>();
    let v_tas = cas_to_tas(v_cas, altitude).get::<meter_per_second>();
    let s = wing_area.get::<square_meter>();

    let c_d = ZERO_LIFT_DRAG_COEFFICIENT + INDUCED_DRAG_FACTOR * c_l.powi(2);
    let drag = 0.5 * rho * s * v_tas.powi(2) * c_d;

    Force::new::<newton>(round_to(drag, 4))
}

/// Trim angle of attack for steady straight flight.
///
/// Inverts the linearized lift curve C_L = 0.03 + 4.4 alpha used by the
/// stepping loop, so the trim state and the in-loop dynamics agree at
/// the initial condition.
pub fn angle_of_attack_steady(
    v_cas: Velocity,
    altitude: Length,
    weight: Force,
    wing_area: Area,
) -> Angle {
    let c_l = lift_coefficient_steady(v_cas, altitude, weight, wing_area);
    Angle::new::<radian>((c_l - LIFT_CURVE_INTERCEPT) / LIFT_CURVE_SLOPE)
}

/// Steady flight-path angle from the longitudinal force balance,
/// T - D = W sin(gamma) for straight unaccelerated flight.
pub fn gamma_steady_straight(thrust: Force, drag: Force, weight: Force) -> Angle {
    let t = thrust.get::<newton>();
    let d = drag.get::<newton>();
    let w = weight.get::<newton>();

    Angle::new::<radian>(((t - d) / w).asin())
}
