use std::fmt;

use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::time::second;

use crate::trajectory_system::state::FlightState;

/// Time history of one simulation run.
///
/// Append-only while the integrator is running; read-only afterwards.
/// States are in strictly increasing time order, one per accepted step.
#[derive(Debug, Default)]
pub struct Trajectory {
    states: Vec<FlightState>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory { states: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Trajectory {
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, state: FlightState) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[FlightState] {
        &self.states
    }

    pub fn first(&self) -> Option<&FlightState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&FlightState> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlightState> {
        self.states.iter()
    }
}

impl FromIterator<FlightState> for Trajectory {
    fn from_iter<I: IntoIterator<Item = FlightState>>(iter: I) -> Self {
        Trajectory {
            states: iter.into_iter().collect(),
        }
    }
}

/// Key figures of a finished run.
pub struct RunSummary {
    pub elapsed_time: f64,    // s
    pub ground_distance: f64, // m
    pub final_altitude: f64,  // m
    pub fuel_burned: f64,     // kg
    pub max_mach: f64,
    pub final_weight: f64, // N
    pub steps: usize,
}

impl RunSummary {
    /// Summarize a trajectory; `None` for an empty one.
    pub fn from_trajectory(trajectory: &Trajectory) -> Option<Self> {
        let first = trajectory.first()?;
        let last = trajectory.last()?;

        let max_mach = trajectory
            .iter()
            .map(|state| state.mach)
            .fold(f64::MIN, f64::max);

        Some(RunSummary {
            elapsed_time: last.time.get::<second>(),
            ground_distance: (last.distance - first.distance).get::<meter>(),
            final_altitude: last.altitude.get::<meter>(),
            fuel_burned: last.fuel_burned.get::<kilogram>(),
            max_mach,
            final_weight: last.weight.get::<newton>(),
            steps: trajectory.len() - 1,
        })
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_distance(distance: f64) -> String {
        if distance >= 1000.0 {
            format!("{:.2} km", distance / 1000.0)
        } else {
            format!("{:.2} m", distance)
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Elapsed Time: {}", Self::format_time(self.elapsed_time))?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(
            f,
            "Ground Distance: {}",
            Self::format_distance(self.ground_distance)
        )?;
        writeln!(
            f,
            "Final Altitude: {}",
            Self::format_distance(self.final_altitude)
        )?;
        writeln!(f, "Fuel Burned: {:.2} kg", self.fuel_burned)?;
        writeln!(f, "Max Mach: {:.3}", self.max_mach)?;
        write!(f, "Final Weight: {:.2} N", self.final_weight)
    }
}
