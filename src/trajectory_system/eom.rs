use uom::si::f64::{Angle, Force, Velocity};
use uom::si::angle::radian;
use uom::si::force::newton;
use uom::si::velocity::meter_per_second;

use crate::constants::GRAVITY;
use crate::utils::rounding::round_to;

/// Instantaneous airspeed rate of change along the flight path, m/s².
///
/// dv/dt = (g / W) (T - D - W sin(gamma)), rounded to four decimals.
pub fn dv_dt(thrust: Force, drag: Force, weight: Force, gamma: Angle) -> f64 {
    let t = thrust.get::<newton>();
    let d = drag.get::<newton>();
    let w = weight.get::<newton>();
    let gamma = gamma.get::<radian>();

    round_to((GRAVITY / w) * (t - d - w * gamma.sin()), 4)
}

/// Instantaneous flight-path-angle rate of change, rad/s.
///
/// dgamma/dt = (g / W) (1 / v_tas) (L - W). Singular as v_tas
/// approaches zero; the subsonic flight regimes simulated here keep
/// true airspeed far from that point, so the limit is not guarded.
pub fn dgamma_dt(lift: Force, weight: Force, v_tas: Velocity) -> f64 {
    let l = lift.get::<newton>();
    let w = weight.get::<newton>();
    let v = v_tas.get::<meter_per_second>();

    (GRAVITY / w) * (1.0 / v) * (l - w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn n(f: f64) -> Force {
        Force::new::<newton>(f)
    }

    fn rad(a: f64) -> Angle {
        Angle::new::<radian>(a)
    }

    fn mps(v: f64) -> Velocity {
        Velocity::new::<meter_per_second>(v)
    }

    #[test]
    fn test_level_flight_at_thrust_drag_balance() {
        let rate = dv_dt(n(300_000.0), n(300_000.0), n(3_600_000.0), rad(0.0));
        assert_abs_diff_eq!(rate, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_excess_thrust_accelerates() {
        let rate = dv_dt(n(1_000_000.0), n(300_000.0), n(3_600_000.0), rad(0.0));
        assert!(rate > 0.0);
        // (g / W) * (T - D) = 9.80665 / 3.6e6 * 7e5
        assert_abs_diff_eq!(rate, 1.9068, epsilon = 1e-4);
    }

    #[test]
    fn test_gravity_component_decelerates_in_climb() {
        let level = dv_dt(n(1_000_000.0), n(300_000.0), n(3_600_000.0), rad(0.0));
        let climbing = dv_dt(n(1_000_000.0), n(300_000.0), n(3_600_000.0), rad(0.1));
        assert!(climbing < level);
    }

    #[test]
    fn test_gamma_rate_sign_follows_lift_margin() {
        let w = n(3_600_000.0);
        let v = mps(200.0);

        assert!(dgamma_dt(n(3_700_000.0), w, v) > 0.0);
        assert!(dgamma_dt(n(3_500_000.0), w, v) < 0.0);
        assert_abs_diff_eq!(dgamma_dt(n(3_600_000.0), w, v), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_rate_shrinks_with_airspeed() {
        let w = n(3_600_000.0);
        let lift = n(3_700_000.0);

        let slow = dgamma_dt(lift, w, mps(100.0));
        let fast = dgamma_dt(lift, w, mps(250.0));
        assert!(fast < slow);
    }
}
