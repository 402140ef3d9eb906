use uom::si::f64::{Angle, Length, Velocity};
use uom::si::angle::radian;
use uom::si::velocity::meter_per_second;

use crate::control::environment::Atmosphere;
use crate::trajectory_system::airspeed::{cas_to_mach, tas_to_cas};
use crate::trajectory_system::state::Phase;
use crate::utils::rounding::round_to;

/// Pilot pitch response holding a reference IAS or the cruise Mach.
///
/// A proportional law on airspeed error with a phase-dependent target:
/// - climb: hold `v_ref` until the cruise Mach is reached, then hold
///   the CAS equivalent of the cruise Mach at the current altitude;
/// - descent: hold the cruise-Mach CAS while still faster than
///   `v_ref`, then hold `v_ref`.
///
/// The switch is a pure condition check on the current state; there is
/// no hysteresis. The gain carries rad per m/s of error and was tuned
/// against the integrator at the default one-second step.
pub fn pitch_command(
    gain: f64,
    theta_trim: Angle,
    v_ref: Velocity,
    v_ias: Velocity,
    altitude: Length,
    cruise_mach: f64,
    phase: Phase,
) -> Angle {
    let v_sound = Atmosphere::at_altitude(altitude).speed_of_sound();
    let cruise_cas = || tas_to_cas(v_sound * cruise_mach, altitude);

    let v_error = match phase {
        Phase::Climb => {
            if round_to(cas_to_mach(v_ias, altitude), 2) < cruise_mach {
                v_ias - v_ref
            } else {
                v_ias - cruise_cas()
            }
        }
        Phase::Descent | Phase::DescentApproach => {
            if round_to(v_ias.get::<meter_per_second>(), 0) < v_ref.get::<meter_per_second>() {
                v_ias - cruise_cas()
            } else {
                v_ias - v_ref
            }
        }
    };

    Angle::new::<radian>(gain * v_error.get::<meter_per_second>()) + theta_trim
}
