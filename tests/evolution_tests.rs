// Lineage-level behavior: mutation-rate pressure, pathway choice, oxidative
// and UV stress, and failed transitions inside a running world.

use primordial_vents::cell::{
    DeathCause, Dna, LocalReadings, MetabolicSelector, MutationEngine, OxygenTolerance,
    PathwayKind, PathwayTrait, UvExposure,
};
use primordial_vents::config::{MutationConfig, SimConfig, VentLayout};
use primordial_vents::constants::{INITIAL_SOD_LEVEL, REFERENCE_SIZE, SOD_SYNTHESIS_RATE, UV_MAX};
use primordial_vents::field::Species;
use primordial_vents::rng::create_rng;
use primordial_vents::sim::Simulation;
use primordial_vents::sim_op::CellOp;
use approx::assert_abs_diff_eq;
use glam::DVec2;
use more_asserts::{assert_gt, assert_lt};

const LINEAGES: usize = 500;
const GENERATIONS: usize = 300;

fn mean_rate_after_generations(stability: f64, seed: u64) -> f64 {
    let engine = MutationEngine::new(&MutationConfig::default());
    let mut rng = create_rng(seed);
    let mut total = 0.0;
    for _ in 0..LINEAGES {
        let mut rate = engine.config.target_rate_unstable;
        for _ in 0..GENERATIONS {
            rate = engine.next_rate(rate, stability, &mut rng);
        }
        total += rate;
    }
    total / LINEAGES as f64
}

#[test]
fn test_mutation_rate_converges_to_stability_target() {
    println!("🧬 Testing mutation pressure - {} lineages x {} generations", LINEAGES, GENERATIONS);

    let unstable = mean_rate_after_generations(0.0, 17);
    let stable = mean_rate_after_generations(1.0, 17);
    println!("   stability 0.0 -> mean rate {:.4} (target 0.15)", unstable);
    println!("   stability 1.0 -> mean rate {:.4} (target 0.03)", stable);

    assert_abs_diff_eq!(unstable, 0.15, epsilon = 0.02);
    assert_abs_diff_eq!(stable, 0.03, epsilon = 0.02);
    assert_gt!(unstable, stable);
    println!("   ✅ Rates settle near their targets");
}

#[test]
fn test_mutation_rate_stays_in_range_under_extreme_stability() {
    println!("📏 Testing mutation rate clamps");

    let engine = MutationEngine::default();
    let mut rng = create_rng(2);
    for stability in [-3.0, 0.0, 0.5, 1.0, 8.0] {
        let mut rate = 0.3;
        for _ in 0..200 {
            rate = engine.next_rate(rate, stability, &mut rng);
            assert!((0.01..=0.3).contains(&rate), "rate {} left range at stability {}", rate, stability);
        }
    }
    println!("   ✅ Rates stayed inside [0.01, 0.3]");
}

#[test]
fn test_tied_pathways_resolve_to_declaration_order() {
    println!("⚖️ Testing selector tie-break across two equal pathways");

    let mut dna = Dna::luca(&mut create_rng(1));
    // 1.5 x 0.5 and 2.0 x 0.375 are both exactly 0.75
    dna.pathways[PathwayKind::Luca.as_index()] = PathwayTrait { enabled: true, efficiency: 0.5 };
    dna.pathways[PathwayKind::Fermentation.as_index()] = PathwayTrait { enabled: true, efficiency: 0.375 };

    let readings = LocalReadings::default()
        .with(Species::H2, 200.0)
        .with(Species::Co2, 140.0);

    let evals = MetabolicSelector::evaluate(&dna, &readings, 50.0);
    for eval in &evals {
        println!("   {:<14} potential {:.3}", eval.kind.as_str(), eval.potential);
    }
    assert_eq!(evals[0].potential, evals[1].potential);

    let chosen = MetabolicSelector::select(&dna, &readings, 50.0).unwrap();
    assert_eq!(chosen.kind, PathwayKind::Luca);

    dna.pathways[PathwayKind::Fermentation.as_index()].efficiency = 0.5;
    let chosen = MetabolicSelector::select(&dna, &readings, 50.0).unwrap();
    assert_eq!(chosen.kind, PathwayKind::Fermentation);
    println!("   ✅ Ties go to luca, a strictly better pathway still wins");
}

#[test]
fn test_oxidative_damage_reference_points() {
    println!("☢️ Testing oxidative damage formula");

    let tolerance = OxygenTolerance::new(10.0, 0.05);
    let cases = [(15.0, 0.5, 0.125), (20.0, 0.0, 0.5), (20.0, 0.9, 0.05), (5.0, 0.0, 0.0)];
    for (o2, sod, expected) in cases {
        let damage = tolerance.oxidative_damage(o2, sod);
        println!("   O2 {:>5.1}, SOD {:.1} -> damage {:.4}", o2, sod, damage);
        assert_abs_diff_eq!(damage, expected, epsilon = 1e-9);
    }
    println!("   ✅ Damage matches (O2 - threshold) x (1 - SOD) x rate");
}

fn stress_world(seed: u64) -> Simulation {
    let mut config = SimConfig::default().with_seed(seed);
    config.grid.cols = 8;
    config.grid.rows = 20;
    config.cells.initial_population = 0;
    config.cells.reproduction = false;
    config.cells.uv_radiation = false;
    config.cells.oxygen_safe_threshold = 10.0;
    config.cells.oxidative_damage_rate = 0.05;
    config.vents.layout = VentLayout::Empty;
    config.vents.geological_events = false;
    Simulation::with_default_ops("stress", config).unwrap()
}

fn fill(sim: &mut Simulation, species: Species, value: f64) {
    for col in 0..sim.env.cols() {
        for row in 0..sim.env.rows() {
            sim.env.field_mut(species).set(col, row, value);
        }
    }
}

fn spawn_in_water(sim: &mut Simulation, dna: Dna) {
    let row = sim.env.strat.water_rows().start + 3;
    let (x, y) = sim.env.grid_to_world(4, row);
    sim.spawn_agent(DVec2::new(x, y), dna);
}

#[test]
fn test_oxygen_rich_water_damages_unprotected_cells() {
    println!("🫧 Testing oxygen stress inside the world");

    let mut sim = stress_world(21);
    let mut dna = Dna::luca(&mut create_rng(4));
    dna.sod_efficiency = 0.0;
    dna.dna_repair_efficiency = 0.0;
    spawn_in_water(&mut sim, dna);

    let mut cells = CellOp::new();
    for _ in 0..5 {
        fill(&mut sim, Species::O2, 90.0);
        sim.step_with_ops(&mut [&mut cells]);
    }

    let agent = &sim.agents[0];
    println!("   After 5 steps: damage {:.3}, SOD {:.3}", agent.structural_damage, agent.sod_level);
    // (90 - 10) x (1 - 0) x 0.05 per tick, nothing repaired
    assert_abs_diff_eq!(agent.structural_damage, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(agent.sod_level, INITIAL_SOD_LEVEL - 5.0 * SOD_SYNTHESIS_RATE, epsilon = 1e-9);
    println!("   ✅ Unprotected cell took full damage while its expressed SOD wound down");
}

#[test]
fn test_newborn_damage_matches_reference_points() {
    println!("☢️ Testing oxidative damage on a freshly spawned cell");

    for (o2, sod, expected) in [(15.0, 0.5, 0.125), (20.0, 0.0, 0.5), (20.0, 0.9, 0.05)] {
        let mut sim = stress_world(8);
        let mut dna = Dna::luca(&mut create_rng(4));
        dna.sod_efficiency = sod;
        dna.dna_repair_efficiency = 0.0;
        spawn_in_water(&mut sim, dna);
        fill(&mut sim, Species::O2, o2);

        let mut cells = CellOp::new();
        sim.step_with_ops(&mut [&mut cells]);

        let agent = &sim.agents[0];
        println!("   O2 {:>5.1}, SOD {:.1} -> damage {:.4}", o2, sod, agent.oxidative_damage);
        assert_abs_diff_eq!(agent.oxidative_damage, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(agent.structural_damage, expected, epsilon = 1e-9);
    }
    println!("   ✅ First-tick damage follows the genetic SOD efficiency");
}

#[test]
fn test_uv_kills_bright_cells_and_marks_dark_survivors() {
    println!("🌞 Testing UV exposure with pigment screening");

    let mut sim = stress_world(33);
    sim.config.cells.reproduction = true;
    sim.config.cells.reproduction_chance = 1.0;
    sim.config.cells.initial_energy = 120.0;
    sim.config.cells.initial_phosphorus = 100.0;
    sim.config.mutation.divergence_chance = 0.0;
    sim.config.cells.uv_radiation = true;
    sim.mutation = MutationEngine::new(&sim.config.mutation);

    let mut rng = create_rng(9);
    let mut yellow = Dna::luca(&mut rng);
    yellow.size = REFERENCE_SIZE;
    yellow.hue = 60.0;
    let mut blue = yellow.clone();
    blue.hue = 240.0;
    blue.dna_repair_efficiency = 0.0;
    spawn_in_water(&mut sim, yellow);
    spawn_in_water(&mut sim, blue);
    fill(&mut sim, Species::Uv, UV_MAX);

    let mut cells = CellOp::new();
    cells.uv = UvExposure {
        surface_intensity: 1.0,
        damage_chance_max: 1.0,
        lethal_chance: 1.0,
        ..UvExposure::default()
    };
    sim.step_with_ops(&mut [&mut cells]);

    let stats = &sim.cell_stats;
    println!(
        "   deaths by UV {}, births {}, inherited lesions {}",
        stats.deaths_from(DeathCause::UvRadiation),
        stats.births,
        stats.uv_lesions_inherited
    );
    assert_eq!(stats.deaths_from(DeathCause::UvRadiation), 1);
    assert_eq!(stats.births, 1);
    assert_eq!(stats.uv_lesions_inherited, 1);
    assert_eq!(sim.population(), 2);

    let parent = &sim.agents[0];
    assert_eq!(parent.dna.hue, 240.0);
    assert!(!parent.uv_mutation_pending);
    assert_lt!(parent.energy, 120.0 / 2.0);
    println!("   ✅ Yellow pigment died, blue pigment survived and passed on a lesion");
}

#[test]
fn test_lethal_cross_transition_costs_the_parent_half_its_reserves() {
    println!("💀 Testing a failed metabolic transition at division");

    let mut sim = stress_world(41);
    sim.config.cells.reproduction = true;
    sim.config.cells.reproduction_chance = 1.0;
    sim.config.cells.initial_energy = 120.0;
    sim.config.cells.initial_phosphorus = 100.0;
    sim.config.mutation.cross_metabolism_chance = 1.0;
    sim.config.mutation.cross_metabolism_mortality = 1.0;
    sim.mutation = MutationEngine::new(&sim.config.mutation);

    let mut dna = Dna::luca(&mut create_rng(2));
    dna.size = REFERENCE_SIZE;
    dna.pathways[PathwayKind::Fermentation.as_index()] = PathwayTrait { enabled: true, efficiency: 0.5 };
    dna.specialization = Some(PathwayKind::Fermentation);
    spawn_in_water(&mut sim, dna);
    fill(&mut sim, Species::Phosphorus, 0.0);

    let mut cells = CellOp::new();
    sim.step_with_ops(&mut [&mut cells]);

    let stats = &sim.cell_stats;
    let parent = &sim.agents[0];
    println!(
        "   parent P {:.3}, recycled {:.3}, cross-metabolism deaths {}",
        parent.phosphorus,
        stats.recycled_phosphorus,
        stats.deaths_from(DeathCause::CrossMetabolism)
    );
    assert_eq!(sim.population(), 1);
    assert_eq!(stats.births, 0);
    assert_eq!(stats.deaths_from(DeathCause::CrossMetabolism), 1);
    assert_lt!(parent.phosphorus, 50.0);
    assert_gt!(parent.phosphorus, 49.0);
    assert_abs_diff_eq!(stats.recycled_phosphorus, 0.8 * parent.phosphorus, epsilon = 1e-9);
    assert_eq!(parent.reproduction_cooldown, sim.config.cells.reproduction_cooldown);
    println!("   ✅ The child never spawned and the parent kept only its half");
}
