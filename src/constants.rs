// Physical Constants
pub const GRAVITY: f64 = 9.80665; // m/s²
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const HEAT_CAPACITY_RATIO: f64 = 1.4; // dry air

// Standard Atmosphere Anchors
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0; // Pa
pub const SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m³
pub const TROPOSPHERE_LAPSE_RATE: f64 = -6.5 / 1_000.0; // K per meter
pub const TROPOPAUSE_ALTITUDE: f64 = 11_000.0; // m
pub const TROPOPAUSE_TEMPERATURE: f64 = 216.65; // K

// Aircraft Constants
pub const WING_AREA: f64 = 500.0; // m²
pub const MAX_TAKE_OFF_WEIGHT: f64 = 3_600_000.0; // N
pub const USABLE_FUEL_WEIGHT: f64 = 1_600_000.0; // N
pub const ENGINE_COUNT: u32 = 4;
pub const MAX_THRUST_SINGLE_ENGINE_SL: f64 = 270_000.0; // N
pub const BYPASS_RATIO: f64 = 5.0;

// Drag Polar
pub const ZERO_LIFT_DRAG_COEFFICIENT: f64 = 0.017;
pub const INDUCED_DRAG_FACTOR: f64 = 0.042;

// Linearized lift curve used inside the step loop
pub const LIFT_CURVE_INTERCEPT: f64 = 0.03;
pub const LIFT_CURVE_SLOPE: f64 = 4.4; // per radian

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const MAX_SIMULATION_STEPS: usize = 100_000;
pub const CRUISE_MACH: f64 = 0.85;
pub const CLIMB_TERMINATION_ALTITUDE: f64 = 10_000.0; // m
pub const DESCENT_TERMINATION_ALTITUDE: f64 = 1_000.0; // m
pub const CLIMB_THRUST_FRACTION: f64 = 0.95;
pub const DESCENT_THRUST_FRACTION: f64 = 0.05;
pub const DEFAULT_GLIDESLOPE_DEG: f64 = 3.0; // degrees
pub const DEFAULT_SCREEN_HEIGHT_FT: f64 = 35.0; // ft

// Pilot Model
pub const PITCH_GAIN: f64 = 0.01; // rad per m/s of airspeed error

// Propulsion Model
pub const TSFC_BASE: f64 = 11.0; // mg/s per N at Mach 0, sea level
