use airliner_simulation::{
    load_or_run, InitialConditions, MemoryStore, Phase, RunSummary, Simulation, SimulationError,
    Trajectory,
};

use approx::assert_relative_eq;
use uom::si::f64::{Force, Length, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

const GRAVITY: f64 = 9.80665;

fn mps(v: f64) -> Velocity {
    Velocity::new::<meter_per_second>(v)
}

fn m(h: f64) -> Length {
    Length::new::<meter>(h)
}

fn n(f: f64) -> Force {
    Force::new::<newton>(f)
}

fn standard_climb_ics() -> InitialConditions {
    InitialConditions {
        distance: m(0.0),
        altitude: m(0.0),
        weight: n(3_600_000.0),
        indicated_airspeed: mps(130.0),
    }
}

fn assert_physical_invariants(trajectory: &Trajectory) {
    let states = trajectory.states();
    assert!(states.len() >= 2, "trajectory should hold multiple steps");

    for pair in states.windows(2) {
        assert!(
            pair[1].time.get::<second>() > pair[0].time.get::<second>(),
            "time must be strictly increasing"
        );
        assert!(
            pair[1].weight.get::<newton>() <= pair[0].weight.get::<newton>(),
            "weight must never increase"
        );
        assert!(
            pair[1].fuel_burned.get::<kilogram>() >= pair[0].fuel_burned.get::<kilogram>(),
            "fuel burned must never decrease"
        );
    }

    // the weight lost over the run is exactly the burned fuel mass
    let first = trajectory.first().unwrap();
    let last = trajectory.last().unwrap();
    let weight_lost = first.weight.get::<newton>() - last.weight.get::<newton>();
    assert_relative_eq!(
        weight_lost,
        last.fuel_burned.get::<kilogram>() * GRAVITY,
        max_relative = 1e-9
    );
}

#[test]
fn test_climb_reaches_cruise_altitude() {
    println!("INTEGRATION TEST: climb from sea level to cruise altitude");

    let simulation = Simulation::new(Phase::Climb, mps(130.0));
    let trajectory = simulation.run(standard_climb_ics()).unwrap();

    let last = trajectory.last().unwrap();
    println!(
        "climb ended at t={:.0}s, h={:.1}m after {} steps",
        last.time.get::<second>(),
        last.altitude.get::<meter>(),
        trajectory.len() - 1
    );

    assert!(
        last.altitude.get::<meter>() >= 10_000.0,
        "climb must terminate at or above 10,000 m, got {:.1} m",
        last.altitude.get::<meter>()
    );
    assert!(last.time.get::<second>() > 0.0);
    assert_physical_invariants(&trajectory);

    // altitude was gained overall, and the aircraft kept moving forward
    let first = trajectory.first().unwrap();
    assert!(last.altitude.get::<meter>() > first.altitude.get::<meter>());
    assert!(last.distance.get::<meter>() > first.distance.get::<meter>());
}

#[test]
fn test_descent_reaches_low_altitude() {
    println!("INTEGRATION TEST: descent from cruise altitude");

    let simulation = Simulation::new(Phase::Descent, mps(130.0));
    let trajectory = simulation
        .run(InitialConditions {
            distance: m(0.0),
            altitude: m(10_000.0),
            weight: n(3_000_000.0),
            indicated_airspeed: mps(130.0),
        })
        .unwrap();

    let last = trajectory.last().unwrap();
    println!(
        "descent ended at t={:.0}s, h={:.1}m",
        last.time.get::<second>(),
        last.altitude.get::<meter>()
    );

    assert!(
        last.altitude.get::<meter>() <= 1_000.0,
        "descent must terminate at or below 1,000 m, got {:.1} m",
        last.altitude.get::<meter>()
    );
    assert_physical_invariants(&trajectory);
}

#[test]
fn test_climb_crosses_cruise_mach_at_most_once() {
    println!("INTEGRATION TEST: Mach switch behavior during climb");

    // a high reference speed reaches the cruise Mach well before the
    // termination altitude, exercising the control-law switch
    let simulation = Simulation::new(Phase::Climb, mps(180.0));
    let trajectory = simulation
        .run(InitialConditions {
            distance: m(0.0),
            altitude: m(0.0),
            weight: n(3_600_000.0),
            indicated_airspeed: mps(180.0),
        })
        .unwrap();

    // a small band below the target filters step-to-step noise around
    // the switch point
    let cruise_mach = simulation.cruise_mach;
    let mut crossings = 0;
    for pair in trajectory.states().windows(2) {
        let below = pair[0].mach < cruise_mach - 0.005;
        let above = pair[1].mach >= cruise_mach;
        if below && above {
            crossings += 1;
        }
    }

    println!("observed {} switch crossings", crossings);
    assert!(
        crossings <= 1,
        "Mach must cross the cruise target at most once, saw {} crossings",
        crossings
    );
    assert_physical_invariants(&trajectory);
}

#[test]
fn test_descent_approach_flies_the_glideslope() {
    println!("INTEGRATION TEST: final approach to screen height");

    let simulation = Simulation::new(Phase::DescentApproach, mps(75.0));
    let trajectory = simulation
        .run(InitialConditions {
            distance: m(0.0),
            altitude: m(500.0),
            weight: n(2_500_000.0),
            indicated_airspeed: mps(75.0),
        })
        .unwrap();

    let last = trajectory.last().unwrap();
    println!(
        "approach ended at h={:.2}m after {:.0}s",
        last.altitude.get::<meter>(),
        last.time.get::<second>()
    );

    assert!(
        last.altitude.get::<meter>() <= simulation.screen_height.get::<meter>(),
        "approach must end at or below screen height"
    );
    assert_physical_invariants(&trajectory);

    // the glideslope is fixed: altitude decreases every single step
    for pair in trajectory.states().windows(2) {
        assert!(pair[1].altitude.get::<meter>() < pair[0].altitude.get::<meter>());
    }

    // thrust is an output here, solved from the force balance
    for state in trajectory.iter() {
        assert!(state.thrust.is_some());
    }
}

#[test]
fn test_exhausted_step_budget_is_reported() {
    let mut simulation = Simulation::new(Phase::Climb, mps(130.0));
    simulation.max_steps = 20;

    let result = simulation.run(standard_climb_ics());
    match result {
        Err(SimulationError::NonConvergence {
            steps,
            altitude,
            time,
        }) => {
            assert_eq!(steps, 20);
            assert!(altitude < 10_000.0);
            assert_relative_eq!(time, 20.0);
        }
        Ok(trajectory) => panic!(
            "expected NonConvergence, but the run finished in {} steps",
            trajectory.len() - 1
        ),
        Err(other) => panic!("expected NonConvergence, got {other}"),
    }
}

#[test]
fn test_cached_results_are_reused() {
    println!("INTEGRATION TEST: result store round trip");

    let store = MemoryStore::new();
    let simulation = Simulation::new(Phase::DescentApproach, mps(75.0));
    let ics = InitialConditions {
        distance: m(0.0),
        altitude: m(300.0),
        weight: n(2_500_000.0),
        indicated_airspeed: mps(75.0),
    };

    let first = load_or_run(&store, &simulation, ics).unwrap();
    let second_run = load_or_run(&store, &simulation, ics).unwrap();

    assert_eq!(first.len(), second_run.len());
    assert_relative_eq!(
        first.last().unwrap().fuel_burned.get::<kilogram>(),
        second_run.last().unwrap().fuel_burned.get::<kilogram>(),
        max_relative = 1e-12
    );
}

#[test]
fn test_run_summary_reports_the_climb() {
    let simulation = Simulation::new(Phase::Climb, mps(130.0));
    let trajectory = simulation.run(standard_climb_ics()).unwrap();

    let summary = RunSummary::from_trajectory(&trajectory).unwrap();
    assert!(summary.final_altitude >= 10_000.0);
    assert!(summary.fuel_burned > 0.0);
    assert!(summary.ground_distance > 0.0);
    assert!(summary.max_mach > 0.3 && summary.max_mach < 1.0);
    assert_eq!(summary.steps, trajectory.len() - 1);
}
