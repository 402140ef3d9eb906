use airliner_simulation::*;

use uom::si::f64::{Force, Length, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

fn mps(v: f64) -> Velocity {
    Velocity::new::<meter_per_second>(v)
}

fn report(phase: Phase, trajectory: &Trajectory) {
    match RunSummary::from_trajectory(trajectory) {
        Some(summary) => println!("=== {} ===\n{}\n", phase, summary),
        None => println!("=== {} ===\nempty trajectory\n", phase),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let store = JsonFileStore::new("simulation_results");

    // climb to cruise altitude at maximum take-off weight
    let climb = Simulation::new(Phase::Climb, mps(130.0));
    let climb_result = load_or_run(
        &store,
        &climb,
        InitialConditions {
            distance: Length::new::<meter>(0.0),
            altitude: Length::new::<meter>(0.0),
            weight: Force::new::<newton>(MAX_TAKE_OFF_WEIGHT),
            indicated_airspeed: mps(130.0),
        },
    )?;
    report(climb.phase, &climb_result);

    // descent from cruise, weight reduced by the cruise-segment burn
    let descent = Simulation::new(Phase::Descent, mps(130.0));
    let descent_result = load_or_run(
        &store,
        &descent,
        InitialConditions {
            distance: Length::new::<meter>(0.0),
            altitude: Length::new::<meter>(10_000.0),
            weight: Force::new::<newton>(3_000_000.0),
            indicated_airspeed: mps(130.0),
        },
    )?;
    report(descent.phase, &descent_result);

    // final approach down the default glideslope to screen height
    let approach = Simulation::new(Phase::DescentApproach, mps(75.0));
    let approach_result = load_or_run(
        &store,
        &approach,
        InitialConditions {
            distance: Length::new::<meter>(0.0),
            altitude: Length::new::<meter>(400.0),
            weight: Force::new::<newton>(2_500_000.0),
            indicated_airspeed: mps(75.0),
        },
    )?;
    report(approach.phase, &approach_result);

    Ok(())
}
