use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid phase '{0}': expected 'climb', 'descent', or 'descent_approach'")]
    InvalidPhase(String),

    #[error(
        "Simulation failed to converge after {steps} steps \
         (last altitude {altitude:.1} m at t = {time:.1} s)"
    )]
    NonConvergence {
        steps: usize,
        altitude: f64,
        time: f64,
    },

    #[error("Physics error: {0}")]
    Physics(String),

    #[error("Malformed result record: {0}")]
    MalformedRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
