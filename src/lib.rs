pub mod constants;
pub mod control;
pub mod errors;
pub mod persistence;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::aircraft::{Aircraft, Engine};
pub use control::environment::Atmosphere;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::simulation::Simulation;
pub use trajectory_system::state::{FlightState, InitialConditions, Phase};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{RunSummary, Trajectory};

// Re-export the result cache
pub use persistence::{load_or_run, JsonFileStore, MemoryStore, ResultKey, ResultStore};
