// Phosphorus is the limiting nutrient once the ambient supply is gone.
// Returning a dead cell's store to the water keeps its neighbours alive longer.

use primordial_vents::cell::{DeathCause, Dna};
use primordial_vents::config::{SimConfig, VentLayout};
use primordial_vents::field::Species;
use primordial_vents::rng::create_rng;
use primordial_vents::sim::{SimProps, Simulation};
use primordial_vents::sim_op::CellOp;
use glam::DVec2;
use more_asserts::{assert_gt, assert_lt};

const POPULATION: usize = 20;
const KILL_AT_STEP: u64 = 2;
const MAX_STEPS: u64 = 200;

struct CollapseRun {
    extinction_step: u64,
    recycled: f64,
    nitrogen_deaths: u64,
    phosphorus_deaths: u64,
}

fn collapse_config(recycling: bool) -> SimConfig {
    let mut config = SimConfig::default().with_seed(77);
    config.grid.cols = 4;
    config.grid.rows = 12;
    // one cell is far wider than an agent travels in MAX_STEPS
    config.grid.resolution = 1000.0;
    config.grid.noise_amplitude = 0.0;
    config.vents.layout = VentLayout::Empty;
    config.vents.geological_events = false;
    config.reservoirs.enabled = false;
    config.regeneration.phosphorus_weathering = 0.0;
    config.regeneration.phosphorus_recycling = recycling;
    config.cells.initial_population = 0;
    config.cells.reproduction = false;
    config.cells.max_resources = 1.0e5;
    config.cells.initial_energy = 1.0e4;
    config.cells.initial_nitrogen = 1.0e4;
    config.cells.initial_phosphorus = 5.0;
    config.cells.phosphorus_cost = 0.5;
    config
}

fn run_until_extinction(recycling: bool) -> CollapseRun {
    let mut sim = Simulation::new(SimProps {
        name: "phosphorus-collapse",
        config: collapse_config(recycling),
        ops: vec![],
        debug: false,
    })
    .unwrap();

    for species in [Species::Phosphorus, Species::Nitrogen] {
        let field = sim.env.field_mut(species);
        for col in 0..field.cols {
            for row in 0..field.rows {
                field.set(col, row, 0.0);
            }
        }
    }

    let row = sim.env.strat.water_rows().start + 2;
    let (x, y) = sim.env.grid_to_world(1, row);
    let mut rng = create_rng(5);
    for _ in 0..POPULATION {
        let mut dna = Dna::luca(&mut rng);
        dna.size = 15.0;
        sim.spawn_agent(DVec2::new(x, y), dna);
    }

    let mut cells = CellOp::new();
    let mut recycled = 0.0;
    while sim.population() > 0 && sim.current_step() < MAX_STEPS {
        if sim.current_step() + 1 == KILL_AT_STEP {
            for agent in sim.agents.iter_mut().step_by(2) {
                agent.nitrogen = 0.0;
            }
        }
        sim.step_with_ops(&mut [&mut cells]);
        recycled += sim.cell_stats.recycled_phosphorus;
    }

    CollapseRun {
        extinction_step: sim.current_step(),
        recycled,
        nitrogen_deaths: sim.cell_stats.total_deaths_by_cause[DeathCause::NitrogenDepletion.as_index()],
        phosphorus_deaths: sim.cell_stats.total_deaths_by_cause[DeathCause::PhosphorusDepletion.as_index()],
    }
}

#[test]
fn test_recycling_delays_phosphorus_collapse() {
    println!("♻️ Testing phosphorus recycling - collapse with and without recycling");

    let without = run_until_extinction(false);
    let with = run_until_extinction(true);

    println!(
        "   without recycling: extinct at step {} ({} N deaths, {} P deaths)",
        without.extinction_step, without.nitrogen_deaths, without.phosphorus_deaths
    );
    println!(
        "   with recycling:    extinct at step {} ({} N deaths, {} P deaths, {:.2} P returned)",
        with.extinction_step, with.nitrogen_deaths, with.phosphorus_deaths, with.recycled
    );

    assert_lt!(without.extinction_step, MAX_STEPS, "population never collapsed without recycling");
    assert_lt!(with.extinction_step, MAX_STEPS, "population never collapsed with recycling");

    assert_eq!(without.nitrogen_deaths, (POPULATION / 2) as u64);
    assert_eq!(with.nitrogen_deaths, (POPULATION / 2) as u64);
    assert_eq!(without.phosphorus_deaths, (POPULATION / 2) as u64);
    assert_eq!(with.phosphorus_deaths, (POPULATION / 2) as u64);

    assert_eq!(without.recycled, 0.0);
    assert_gt!(with.recycled, 0.0);
    assert_gt!(with.extinction_step, without.extinction_step);
    println!(
        "   ✅ Recycling bought {} extra steps",
        with.extinction_step - without.extinction_step
    );
}
