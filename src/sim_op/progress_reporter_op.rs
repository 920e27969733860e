use crate::cell::{DeathCause, PathwayKind};
use crate::field::Species;
use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};
use crate::vent::LifecyclePhase;
use colored::Colorize;

/// Prints a one-line population and chemistry summary every `interval` ticks,
/// and a death breakdown at the end of the run.
pub struct ProgressReporterOp {
    pub interval: u64,
    peak_population: usize,
}

impl ProgressReporterOp {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            peak_population: 0,
        }
    }

    pub fn handle(interval: u64) -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new(interval)))
    }

    fn stability_label(value: f64) -> String {
        let text = format!("{:.3}", value);
        if value >= 0.7 {
            text.green().to_string()
        } else if value >= 0.4 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn report(&self, sim: &Simulation) {
        let stats = &sim.cell_stats;
        let census: Vec<String> = PathwayKind::ALL
            .into_iter()
            .filter(|k| stats.census(*k) > 0)
            .map(|k| format!("{}:{}", k.as_str(), stats.census(k)))
            .collect();
        println!(
            "{} step {:>7} | 🦠 {:>4} (+{} -{}) | ⚖️  {} | μ {:.4} | 🌋 {} active | O2 max {:.2} | P {:.0} | {}",
            "🧪".bold(),
            sim.step,
            stats.population.to_string().cyan(),
            stats.births,
            stats.deaths,
            Self::stability_label(sim.stability.current()),
            stats.mean_mutation_rate,
            sim.vents.count_in_phase(LifecyclePhase::Active),
            sim.env.field(Species::O2).max_value(),
            sim.env.field(Species::Phosphorus).total(),
            census.join(" ").dimmed()
        );
    }
}

impl SimOp for ProgressReporterOp {
    fn name(&self) -> &str {
        "ProgressReporter"
    }

    fn init_sim(&mut self, sim: &mut Simulation) {
        if self.interval == 0 {
            return;
        }
        println!(
            "{} {}: {}x{} grid, {} agents, {} vents, seed {}",
            "🚀".bold(),
            sim.name.bold(),
            sim.env.cols(),
            sim.env.rows(),
            sim.agents.len(),
            sim.vents.len(),
            sim.config.seed
        );
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        self.peak_population = self.peak_population.max(sim.agents.len());
        if self.interval > 0 && sim.step % self.interval == 0 {
            self.report(sim);
        }
    }

    fn after_sim(&mut self, sim: &mut Simulation) {
        if self.interval == 0 {
            return;
        }
        let stats = &sim.cell_stats;
        println!(
            "{} final population {} (peak {}), {} births, {} deaths, {} geological events",
            "🏁".bold(),
            stats.population,
            self.peak_population,
            stats.total_births,
            stats.total_deaths,
            sim.vents.events.history_len()
        );
        for cause in DeathCause::ALL {
            let n = stats.total_deaths_by_cause[cause.as_index()];
            if n > 0 {
                println!("   💀 {:<24} {}", cause.as_str(), n);
            }
        }
    }
}
