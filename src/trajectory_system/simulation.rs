use log::{debug, info};
use uom::si::f64::{Angle, Force, Length, Mass, Time, Velocity};
use uom::si::angle::{degree, radian};
use uom::si::force::newton;
use uom::si::length::{foot, meter};
use uom::si::mass::kilogram;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::mass_rate::kilogram_per_second;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

use crate::constants::{
    CRUISE_MACH, DEFAULT_GLIDESLOPE_DEG, DEFAULT_SCREEN_HEIGHT_FT, GRAVITY,
    LIFT_CURVE_INTERCEPT, LIFT_CURVE_SLOPE, MAX_SIMULATION_STEPS, PITCH_GAIN, TIME_STEP,
};
use crate::control::aircraft::Aircraft;
use crate::control::environment::Atmosphere;
use crate::control::pilot::pitch_command;
use crate::control::propulsion::fuel_flow;
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::Trajectory;
use crate::trajectory_system::aerodynamics::{
    angle_of_attack_steady, drag, gamma_steady_straight, lift_coefficient_steady,
};
use crate::trajectory_system::airspeed::{cas_to_mach, cas_to_tas, tas_to_cas, tas_to_mach};
use crate::trajectory_system::eom::{dgamma_dt, dv_dt};
use crate::trajectory_system::state::{FlightState, InitialConditions, Phase};

/// Explicit-Euler trajectory integrator for one flight phase.
///
/// Owns the run configuration; the mutable per-step state lives only
/// inside `run`, which returns the full time history. Runs are
/// deterministic and independent, so distinct initial conditions may be
/// simulated concurrently by callers.
pub struct Simulation {
    pub aircraft: Aircraft,
    pub phase: Phase,
    pub time_step: Time,
    /// Proportional pitch gain, rad per m/s of airspeed error.
    pub pitch_gain: f64,
    /// Reference speed: constant IAS to hold in climb/descent, or the
    /// true airspeed flown down the glideslope on approach.
    pub v_ref: Velocity,
    pub cruise_mach: f64,
    pub glideslope: Angle,
    pub screen_height: Length,
    /// Hard cap on integration steps. The termination condition is an
    /// altitude threshold, so a pathological configuration would
    /// otherwise loop forever.
    pub max_steps: usize,
}

impl Simulation {
    pub fn new(phase: Phase, v_ref: Velocity) -> Self {
        Simulation {
            aircraft: Aircraft::default(),
            phase,
            time_step: Time::new::<second>(TIME_STEP),
            pitch_gain: PITCH_GAIN,
            v_ref,
            cruise_mach: CRUISE_MACH,
            glideslope: Angle::new::<degree>(DEFAULT_GLIDESLOPE_DEG),
            screen_height: Length::new::<foot>(DEFAULT_SCREEN_HEIGHT_FT),
            max_steps: MAX_SIMULATION_STEPS,
        }
    }

    /// Integrate from `ics` until the phase termination altitude.
    pub fn run(&self, ics: InitialConditions) -> Result<Trajectory, SimulationError> {
        info!(
            "starting {} simulation from h = {:.1} m, W = {:.0} N",
            self.phase,
            ics.altitude.get::<meter>(),
            ics.weight.get::<newton>()
        );

        let trajectory = match self.phase.thrust_fraction() {
            Some(fraction) => self.run_climb_descent(ics, fraction),
            None => self.run_descent_approach(ics),
        }?;

        info!(
            "{} finished after {} steps at h = {:.1} m",
            self.phase,
            trajectory.len() - 1,
            trajectory
                .last()
                .map_or(f64::NAN, |s| s.altitude.get::<meter>())
        );

        Ok(trajectory)
    }

    fn run_climb_descent(
        &self,
        ics: InitialConditions,
        thrust_fraction: f64,
    ) -> Result<Trajectory, SimulationError> {
        let wing_area = self.aircraft.wing_area();
        let dt = self.time_step.get::<second>();

        let mut t = 0.0;
        let mut x = ics.distance.get::<meter>();
        let mut h = ics.altitude.get::<meter>();
        let mut w = ics.weight.get::<newton>();
        let mut fuel_burned = 0.0; // kg
        let mut v_ias = ics.indicated_airspeed.get::<meter_per_second>();
        let mut v_tas = cas_to_tas(mps(v_ias), m(h)).get::<meter_per_second>();
        let mut mach = cas_to_mach(mps(v_ias), m(h));

        // trim for steady straight flight at the applied thrust setting
        let trim_thrust = self.aircraft.total_max_thrust(m(h), mach) * thrust_fraction;
        let trim_c_l = lift_coefficient_steady(mps(v_ias), m(h), n(w), wing_area);
        let trim_drag = drag(mps(v_ias), m(h), trim_c_l, wing_area);

        let mut aoa = angle_of_attack_steady(mps(v_ias), m(h), n(w), wing_area).get::<radian>();
        let mut gamma = gamma_steady_straight(trim_thrust, trim_drag, n(w)).get::<radian>();
        let theta_trim = Angle::new::<radian>(aoa + gamma);
        let mut theta = aoa + gamma;

        let mut trajectory = Trajectory::new();
        trajectory.push(make_state(
            t, x, h, w, v_tas, v_ias, mach, gamma, fuel_burned, aoa, theta, None,
        ));

        for step in 1..=self.max_steps {
            // re-evaluate the control model at the start of the step
            theta = pitch_command(
                self.pitch_gain,
                theta_trim,
                self.v_ref,
                mps(v_ias),
                m(h),
                self.cruise_mach,
                self.phase,
            )
            .get::<radian>();
            aoa = theta - gamma;
            let c_l = LIFT_CURVE_INTERCEPT + LIFT_CURVE_SLOPE * aoa;

            // forces at the start of the step
            let rho = Atmosphere::at_altitude(m(h))
                .density
                .get::<kilogram_per_cubic_meter>();
            let lift = 0.5 * c_l * rho * self.aircraft.wing_area * v_tas.powi(2);
            let thrust = thrust_fraction
                * self
                    .aircraft
                    .total_max_thrust(m(h), mach)
                    .get::<newton>();
            let drag_force = drag(mps(v_ias), m(h), c_l, wing_area).get::<newton>();
            let flow = fuel_flow(n(thrust), mach, m(h)).get::<kilogram_per_second>();

            // changes over dt
            let dh = v_tas * gamma.sin() * dt;
            let dv = dv_dt(n(thrust), n(drag_force), n(w), rad(gamma)) * dt;
            let dgamma = dgamma_dt(n(lift), n(w), mps(v_tas)) * dt;
            let dm = -flow * dt;
            let dw = dm * GRAVITY;
            let dx = v_tas * gamma.cos() * dt;

            // Euler update; airspeed bookkeeping follows the new state
            x += dx;
            h += dh;
            v_tas += dv;
            v_ias = tas_to_cas(mps(v_tas), m(h)).get::<meter_per_second>();
            mach = cas_to_mach(mps(v_ias), m(h));
            gamma += dgamma;
            fuel_burned += dm.abs();
            w += dw;
            t += dt;

            if !(h.is_finite() && v_tas.is_finite() && gamma.is_finite()) {
                return Err(SimulationError::Physics(format!(
                    "non-finite state at t = {:.1} s in {} phase",
                    t, self.phase
                )));
            }

            trajectory.push(make_state(
                t, x, h, w, v_tas, v_ias, mach, gamma, fuel_burned, aoa, theta, None,
            ));

            if step % 120 == 0 {
                debug!(
                    "t = {:.0} s: h = {:.1} m, v_ias = {:.1} m/s, mach = {:.3}, gamma = {:.4} rad",
                    t, h, v_ias, mach, gamma
                );
            }

            if self.phase.terminated(m(h), self.screen_height) {
                return Ok(trajectory);
            }
        }

        Err(SimulationError::NonConvergence {
            steps: self.max_steps,
            altitude: h,
            time: t,
        })
    }

    fn run_descent_approach(&self, ics: InitialConditions) -> Result<Trajectory, SimulationError> {
        let wing_area = self.aircraft.wing_area();
        let dt = self.time_step.get::<second>();
        let gamma = -self.glideslope.get::<radian>();

        // the approach is flown at constant true airspeed down a fixed
        // glideslope; pitch and thrust come from the steady force
        // balance instead of the pilot law
        let v_tas = self.v_ref.get::<meter_per_second>();

        let mut t = 0.0;
        let mut x = ics.distance.get::<meter>();
        let mut h = ics.altitude.get::<meter>();
        let mut w = ics.weight.get::<newton>();
        let mut fuel_burned = 0.0; // kg
        let mut v_ias = tas_to_cas(mps(v_tas), m(h)).get::<meter_per_second>();
        let mut mach = tas_to_mach(mps(v_tas), m(h));

        let balance = |h: f64, w: f64| {
            let v_cas = tas_to_cas(mps(v_tas), m(h));
            let aoa = angle_of_attack_steady(v_cas, m(h), n(w), wing_area).get::<radian>();
            let c_l = lift_coefficient_steady(v_cas, m(h), n(w), wing_area);
            let drag_force = drag(v_cas, m(h), c_l, wing_area).get::<newton>();
            let thrust = drag_force + w * gamma.sin();
            (aoa, thrust)
        };

        let (mut aoa, mut thrust) = balance(h, w);

        let mut trajectory = Trajectory::new();
        trajectory.push(make_state(
            t,
            x,
            h,
            w,
            v_tas,
            v_ias,
            mach,
            gamma,
            fuel_burned,
            aoa,
            aoa + gamma,
            Some(thrust),
        ));

        for _step in 1..=self.max_steps {
            let flow = fuel_flow(n(thrust), mach, m(h)).get::<kilogram_per_second>();

            let dh = v_tas * gamma.sin() * dt;
            let dx = v_tas * gamma.cos() * dt;
            let dm = -flow * dt;
            let dw = dm * GRAVITY;

            h += dh;
            x += dx;
            fuel_burned += dm.abs();
            w += dw;
            t += dt;
            v_ias = tas_to_cas(mps(v_tas), m(h)).get::<meter_per_second>();
            mach = tas_to_mach(mps(v_tas), m(h));

            if !(h.is_finite() && w.is_finite()) {
                return Err(SimulationError::Physics(format!(
                    "non-finite state at t = {:.1} s in {} phase",
                    t, self.phase
                )));
            }

            (aoa, thrust) = balance(h, w);

            trajectory.push(make_state(
                t,
                x,
                h,
                w,
                v_tas,
                v_ias,
                mach,
                gamma,
                fuel_burned,
                aoa,
                aoa + gamma,
                Some(thrust),
            ));

            if self.phase.terminated(m(h), self.screen_height) {
                return Ok(trajectory);
            }
        }

        Err(SimulationError::NonConvergence {
            steps: self.max_steps,
            altitude: h,
            time: t,
        })
    }
}

fn mps(v: f64) -> Velocity {
    Velocity::new::<meter_per_second>(v)
}

fn m(h: f64) -> Length {
    Length::new::<meter>(h)
}

fn n(f: f64) -> Force {
    Force::new::<newton>(f)
}

fn rad(a: f64) -> Angle {
    Angle::new::<radian>(a)
}

#[allow(clippy::too_many_arguments)]
fn make_state(
    t: f64,
    x: f64,
    h: f64,
    w: f64,
    v_tas: f64,
    v_ias: f64,
    mach: f64,
    gamma: f64,
    fuel_burned: f64,
    aoa: f64,
    theta: f64,
    thrust: Option<f64>,
) -> FlightState {
    FlightState {
        time: Time::new::<second>(t),
        distance: m(x),
        altitude: m(h),
        weight: n(w),
        true_airspeed: mps(v_tas),
        indicated_airspeed: mps(v_ias),
        mach,
        flight_path_angle: rad(gamma),
        fuel_burned: Mass::new::<kilogram>(fuel_burned),
        angle_of_attack: rad(aoa),
        pitch_attitude: rad(theta),
        thrust: thrust.map(n),
    }
}
