use std::fmt;
use std::str::FromStr;

use uom::si::f64::{Angle, Force, Length, Mass, Time, Velocity};
use uom::si::length::meter;

use crate::constants::{
    CLIMB_TERMINATION_ALTITUDE, CLIMB_THRUST_FRACTION, DESCENT_TERMINATION_ALTITUDE,
    DESCENT_THRUST_FRACTION,
};
use crate::errors::SimulationError;

/// Flight phase being simulated.
///
/// `Climb` and `Descent` share the pilot-controlled stepping algorithm
/// and differ in applied-thrust fraction and termination altitude.
/// `DescentApproach` flies a fixed glideslope with thrust solved from
/// the force balance instead of a control law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Climb,
    Descent,
    DescentApproach,
}

impl Phase {
    /// Fraction of total maximum thrust applied during the phase.
    /// `None` for the approach, where thrust is solved, not commanded.
    pub fn thrust_fraction(&self) -> Option<f64> {
        match self {
            Phase::Climb => Some(CLIMB_THRUST_FRACTION),
            Phase::Descent => Some(DESCENT_THRUST_FRACTION),
            Phase::DescentApproach => None,
        }
    }

    /// Altitude-threshold termination test for the phase.
    pub fn terminated(&self, altitude: Length, screen_height: Length) -> bool {
        let h = altitude.get::<meter>();
        match self {
            Phase::Climb => h >= CLIMB_TERMINATION_ALTITUDE,
            Phase::Descent => h <= DESCENT_TERMINATION_ALTITUDE,
            Phase::DescentApproach => h <= screen_height.get::<meter>(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Climb => "climb",
            Phase::Descent => "descent",
            Phase::DescentApproach => "descent_approach",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Phase {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "climb" => Ok(Phase::Climb),
            "descent" => Ok(Phase::Descent),
            "descent_approach" => Ok(Phase::DescentApproach),
            other => Err(SimulationError::InvalidPhase(other.to_string())),
        }
    }
}

/// Initial conditions handed to the integrator.
///
/// For the approach phase the indicated airspeed is ignored: the
/// aircraft flies the configured reference speed as true airspeed.
#[derive(Debug, Clone, Copy)]
pub struct InitialConditions {
    pub distance: Length,
    pub altitude: Length,
    pub weight: Force,
    pub indicated_airspeed: Velocity,
}

/// One accepted integration step.
///
/// `thrust` is populated only in descent-approach mode, where it is an
/// output of the force balance rather than a commanded setting.
#[derive(Debug, Clone, Copy)]
pub struct FlightState {
    pub time: Time,
    pub distance: Length,
    pub altitude: Length,
    pub weight: Force,
    pub true_airspeed: Velocity,
    pub indicated_airspeed: Velocity,
    pub mach: f64,
    pub flight_path_angle: Angle,
    pub fuel_burned: Mass,
    pub angle_of_attack: Angle,
    pub pitch_attitude: Angle,
    pub thrust: Option<Force>,
}
