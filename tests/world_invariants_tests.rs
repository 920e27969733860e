// Whole-pipeline checks on the chemical world: caps, consumption bounds,
// vent dormancy and seeded reproducibility.

use primordial_vents::config::{SimConfig, VentLayout};
use primordial_vents::field::Species;
use primordial_vents::sim::Simulation;
use primordial_vents::vent::{LifecyclePhase, VentKind, VentSpec};
use approx::assert_abs_diff_eq;
use more_asserts::{assert_gt, assert_le};

fn test_config(seed: u64) -> SimConfig {
    let mut config = SimConfig::default().with_seed(seed);
    config.grid.cols = 30;
    config.grid.rows = 30;
    config.cells.initial_population = 25;
    config.vents.layout = VentLayout::Field;
    config
}

#[test]
fn test_fields_stay_within_caps_under_full_pipeline() {
    println!("🌊 Testing full pipeline - every field value must stay in [0, cap]");

    let mut config = test_config(3);
    // surges and earthquakes push the vents hard
    config.vents.surge_probability = 0.01;
    config.vents.earthquake_probability = 0.005;
    let mut sim = Simulation::with_default_ops("bounds", config).unwrap();

    for block in 0..6 {
        sim.run_steps(50);
        for field in sim.env.fields() {
            let cap = field.species.cap();
            for value in field.values() {
                assert!(value.is_finite(), "{} produced a non-finite value", field.species.as_str());
                assert!(*value >= 0.0, "{} went negative: {}", field.species.as_str(), value);
                assert_le!(*value, cap, "{} exceeded its cap", field.species.as_str());
            }
        }
        println!(
            "   step {:>4}: population {:>3}, H2 max {:.1}, O2 max {:.2}",
            (block + 1) * 50,
            sim.population(),
            sim.env.field(Species::H2).max_value(),
            sim.env.field(Species::O2).max_value()
        );
    }

    assert!(sim.env.within_bounds());
    println!("   ✅ All fields stayed within bounds for 300 steps");
}

#[test]
fn test_consume_never_exceeds_what_is_there() {
    println!("🥄 Testing consume - returns at most the available amount");

    let mut sim = Simulation::with_default_ops("consume", test_config(5)).unwrap();
    let row = sim.env.strat.water_rows().start + 2;
    let (x, y) = sim.env.grid_to_world(4, row);

    sim.env.field_mut(Species::Nitrogen).set(4, row, 3.0);
    let taken = sim.consume(Species::Nitrogen, x, y, 10.0);
    println!("   Asked for 10.0 with 3.0 present, got {:.3}", taken);
    assert_abs_diff_eq!(taken, 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(sim.read_field(Species::Nitrogen, x, y), 0.0);

    assert_abs_diff_eq!(sim.consume(Species::Nitrogen, x, y, 1.0), 0.0);
    assert_abs_diff_eq!(sim.consume(Species::Nitrogen, -50.0, y, 1.0), 0.0);

    sim.produce(Species::Nitrogen, x, y, 1.0e6);
    assert_abs_diff_eq!(sim.read_field(Species::Nitrogen, x, y), Species::Nitrogen.cap());
    println!("   ✅ Consumption bounded, production capped");
}

#[test]
fn test_dormant_vent_never_wakes_up_by_itself() {
    println!("😴 Testing vent dormancy - no spontaneous reactivation");

    let mut config = test_config(9);
    config.vents.layout = VentLayout::Empty;
    config.vents.geological_events = false;
    let mut sim = Simulation::with_default_ops("dormant", config).unwrap();

    let id = sim.spawn_vent(&VentSpec::new(VentKind::BlackSmoker, 10)).unwrap();
    assert!(sim.set_vent_lifecycle_phase(id, LifecyclePhase::Dormant));

    for _ in 0..20 {
        sim.run_steps(50);
        let vent = sim.vents.vent(id).unwrap();
        assert_eq!(vent.phase, LifecyclePhase::Dormant);
        assert_abs_diff_eq!(vent.intensity, 0.0);
        assert_eq!(sim.vent_stats.emitting, 0);
    }
    println!("   Vent {} still dormant after {} steps", id, sim.current_step());

    assert!(sim.set_vent_lifecycle_phase(id, LifecyclePhase::Active));
    sim.run_steps(1);
    let vent = sim.vents.vent(id).unwrap();
    assert_eq!(vent.phase, LifecyclePhase::Active);
    assert_gt!(vent.intensity, 0.0);
    assert_eq!(sim.vent_stats.emitting, 1);
    println!("   ✅ Only an explicit call brought the vent back");
}

#[test]
fn test_same_seed_same_world() {
    println!("🎲 Testing determinism - identical seeds give identical runs");

    let mut a = Simulation::with_default_ops("seed-a", test_config(42)).unwrap();
    let mut b = Simulation::with_default_ops("seed-b", test_config(42)).unwrap();
    a.run_steps(120);
    b.run_steps(120);

    assert_eq!(a.population(), b.population());
    assert_eq!(a.agent_snapshot(), b.agent_snapshot());
    for (fa, fb) in a.env.fields().iter().zip(b.env.fields()) {
        assert_eq!(fa.values(), fb.values(), "{} diverged", fa.species.as_str());
    }
    assert_abs_diff_eq!(a.stability_scalar(), b.stability_scalar());
    println!("   Both runs ended with {} agents", a.population());

    let mut c = Simulation::with_default_ops("seed-c", test_config(43)).unwrap();
    c.run_steps(120);
    assert_ne!(a.agent_snapshot(), c.agent_snapshot());
    println!("   ✅ Same seed reproduces, a different seed does not");
}

#[test]
fn test_snapshot_serializes_for_collaborators() {
    println!("📸 Testing agent snapshots - JSON view of the population");

    let sim = Simulation::with_default_ops("snapshot", test_config(1)).unwrap();
    let json = serde_json::to_string(&sim.agent_snapshot()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let agents = parsed.as_array().unwrap();

    assert_eq!(agents.len(), 25);
    assert_eq!(agents[0]["dna"]["dominant_pathway"], "luca");
    assert_eq!(agents[0]["dna"]["generation"], 0);
    println!("   ✅ {} snapshots serialized ({} bytes)", agents.len(), json.len());
}
