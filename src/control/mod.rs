pub mod aircraft;
pub mod environment;
pub mod pilot;
pub mod propulsion;
