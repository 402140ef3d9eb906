use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uom::si::angle::radian;
use uom::si::f64::{Force, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::Trajectory;
use crate::trajectory_system::simulation::Simulation;
use crate::trajectory_system::state::{FlightState, InitialConditions, Phase};

/// Cache key for one simulation run: phase plus the initial weight and
/// reference speed, both rounded to whole SI units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub phase: Phase,
    pub weight_n: i64,
    pub v_ref_mps: i64,
}

impl ResultKey {
    pub fn new(phase: Phase, initial_weight: Force, v_ref: Velocity) -> Self {
        ResultKey {
            phase,
            weight_n: initial_weight.get::<newton>().round() as i64,
            v_ref_mps: v_ref.get::<meter_per_second>().round() as i64,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_simulation_result.json",
            self.phase, self.weight_n, self.v_ref_mps
        )
    }
}

/// One stored variable: magnitudes plus the unit they are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub magnitude: Vec<f64>,
    pub units: String,
}

impl Series {
    fn new(units: &str, magnitude: Vec<f64>) -> Self {
        Series {
            magnitude,
            units: units.to_string(),
        }
    }
}

/// Serializable form of a [`Trajectory`]: per-variable magnitude arrays
/// with unit strings, the shape the result files are written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub t: Series,
    pub x: Series,
    pub h: Series,
    pub w: Series,
    pub v_tas: Series,
    pub v_ias: Series,
    pub mach: Series,
    pub gamma: Series,
    pub fuel_burn: Series,
    pub aoa: Series,
    pub theta: Series,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrust: Option<Series>,
}

impl From<&Trajectory> for TrajectoryRecord {
    fn from(trajectory: &Trajectory) -> Self {
        let collect = |f: fn(&FlightState) -> f64| -> Vec<f64> {
            trajectory.iter().map(f).collect()
        };

        let thrust: Vec<f64> = trajectory
            .iter()
            .filter_map(|s| s.thrust.map(|t| t.get::<newton>()))
            .collect();

        TrajectoryRecord {
            t: Series::new("s", collect(|s| s.time.get::<second>())),
            x: Series::new("m", collect(|s| s.distance.get::<meter>())),
            h: Series::new("m", collect(|s| s.altitude.get::<meter>())),
            w: Series::new("N", collect(|s| s.weight.get::<newton>())),
            v_tas: Series::new("m/s", collect(|s| s.true_airspeed.get::<meter_per_second>())),
            v_ias: Series::new(
                "m/s",
                collect(|s| s.indicated_airspeed.get::<meter_per_second>()),
            ),
            mach: Series::new("dimensionless", collect(|s| s.mach)),
            gamma: Series::new("rad", collect(|s| s.flight_path_angle.get::<radian>())),
            fuel_burn: Series::new("kg", collect(|s| s.fuel_burned.get::<kilogram>())),
            aoa: Series::new("rad", collect(|s| s.angle_of_attack.get::<radian>())),
            theta: Series::new("rad", collect(|s| s.pitch_attitude.get::<radian>())),
            thrust: if thrust.is_empty() {
                None
            } else {
                Some(Series::new("N", thrust))
            },
        }
    }
}

impl TrajectoryRecord {
    /// Rebuild the trajectory from its stored form.
    pub fn into_trajectory(self) -> Result<Trajectory, SimulationError> {
        let len = self.t.magnitude.len();
        let series_lengths = [
            self.x.magnitude.len(),
            self.h.magnitude.len(),
            self.w.magnitude.len(),
            self.v_tas.magnitude.len(),
            self.v_ias.magnitude.len(),
            self.mach.magnitude.len(),
            self.gamma.magnitude.len(),
            self.fuel_burn.magnitude.len(),
            self.aoa.magnitude.len(),
            self.theta.magnitude.len(),
        ];
        if series_lengths.iter().any(|&l| l != len) {
            return Err(SimulationError::MalformedRecord(
                "series lengths disagree".to_string(),
            ));
        }
        if let Some(thrust) = &self.thrust {
            if thrust.magnitude.len() != len {
                return Err(SimulationError::MalformedRecord(
                    "thrust series length disagrees".to_string(),
                ));
            }
        }

        let trajectory: Trajectory = (0..len)
            .map(|i| FlightState {
                time: uom::si::f64::Time::new::<second>(self.t.magnitude[i]),
                distance: uom::si::f64::Length::new::<meter>(self.x.magnitude[i]),
                altitude: uom::si::f64::Length::new::<meter>(self.h.magnitude[i]),
                weight: Force::new::<newton>(self.w.magnitude[i]),
                true_airspeed: Velocity::new::<meter_per_second>(self.v_tas.magnitude[i]),
                indicated_airspeed: Velocity::new::<meter_per_second>(self.v_ias.magnitude[i]),
                mach: self.mach.magnitude[i],
                flight_path_angle: uom::si::f64::Angle::new::<radian>(self.gamma.magnitude[i]),
                fuel_burned: uom::si::f64::Mass::new::<kilogram>(self.fuel_burn.magnitude[i]),
                angle_of_attack: uom::si::f64::Angle::new::<radian>(self.aoa.magnitude[i]),
                pitch_attitude: uom::si::f64::Angle::new::<radian>(self.theta.magnitude[i]),
                thrust: self
                    .thrust
                    .as_ref()
                    .map(|series| Force::new::<newton>(series.magnitude[i])),
            })
            .collect();

        Ok(trajectory)
    }
}

/// Result cache the integrator stays independent of: callers inject a
/// store, the run itself never touches the file system.
pub trait ResultStore {
    fn load(&self, key: &ResultKey) -> Result<Option<Trajectory>, SimulationError>;
    fn store(&self, key: &ResultKey, trajectory: &Trajectory) -> Result<(), SimulationError>;
}

/// One pretty-printed JSON file per key inside a results directory.
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            directory: directory.into(),
        }
    }
}

impl ResultStore for JsonFileStore {
    fn load(&self, key: &ResultKey) -> Result<Option<Trajectory>, SimulationError> {
        let path = self.directory.join(key.file_name());
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(path)?;
        let record: TrajectoryRecord = serde_json::from_str(&data)?;
        Ok(Some(record.into_trajectory()?))
    }

    fn store(&self, key: &ResultKey, trajectory: &Trajectory) -> Result<(), SimulationError> {
        fs::create_dir_all(&self.directory)?;

        let record = TrajectoryRecord::from(trajectory);
        let data = serde_json::to_string_pretty(&record)?;
        fs::write(self.directory.join(key.file_name()), data)?;
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, TrajectoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn load(&self, key: &ResultKey) -> Result<Option<Trajectory>, SimulationError> {
        let records = self.records.lock().expect("result store lock poisoned");
        match records.get(&key.file_name()) {
            Some(record) => Ok(Some(record.clone().into_trajectory()?)),
            None => Ok(None),
        }
    }

    fn store(&self, key: &ResultKey, trajectory: &Trajectory) -> Result<(), SimulationError> {
        let mut records = self.records.lock().expect("result store lock poisoned");
        records.insert(key.file_name(), TrajectoryRecord::from(trajectory));
        Ok(())
    }
}

/// Return the cached trajectory for the run's key, or run the
/// simulation and cache the result.
pub fn load_or_run(
    store: &dyn ResultStore,
    simulation: &Simulation,
    ics: InitialConditions,
) -> Result<Trajectory, SimulationError> {
    let key = ResultKey::new(simulation.phase, ics.weight, simulation.v_ref);

    if let Some(trajectory) = store.load(&key)? {
        info!("loaded cached result {}", key.file_name());
        return Ok(trajectory);
    }

    debug!("no cached result {}; running simulation", key.file_name());
    let trajectory = simulation.run(ics)?;
    store.store(&key, &trajectory)?;
    Ok(trajectory)
}
