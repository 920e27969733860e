use crate::cell::{
    thermal_stress_factor, DeathCause, Habitat, LocalReadings, Membrane, MetabolicSelector,
    MutationEvent, OxygenTolerance, PathwayKind, UvExposure,
};
use crate::constants::GENE_EXPRESSION_INTERVAL;
use crate::field::{recycle_phosphorus, Species};
use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};
use rand::Rng;

/// Population statistics for the most recent tick plus running totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStats {
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
    pub deaths_by_cause: [usize; DeathCause::ALL.len()],
    pub divergences: usize,
    pub uv_lesions_inherited: usize,
    pub dormant: usize,
    pub mean_mutation_rate: f64,
    pub pathway_census: [usize; PathwayKind::COUNT],
    pub stored_phosphorus: f64,
    pub recycled_phosphorus: f64,
    pub total_births: u64,
    pub total_deaths: u64,
    pub total_deaths_by_cause: [u64; DeathCause::ALL.len()],
}

impl CellStats {
    fn record_death(&mut self, cause: DeathCause) {
        self.deaths += 1;
        self.deaths_by_cause[cause.as_index()] += 1;
        self.total_deaths_by_cause[cause.as_index()] += 1;
    }

    pub fn deaths_from(&self, cause: DeathCause) -> usize {
        self.deaths_by_cause[cause.as_index()]
    }

    pub fn census(&self, pathway: PathwayKind) -> usize {
        self.pathway_census[pathway.as_index()]
    }
}

/// Runs the agent life cycle: movement, metabolism, membrane upkeep,
/// oxidative and UV stress, repair, death, proteome turnover and reproduction.
pub struct CellOp {
    pub selector: MetabolicSelector,
    pub uv: UvExposure,
}

impl CellOp {
    pub fn new() -> Self {
        Self {
            selector: MetabolicSelector::default(),
            uv: UvExposure::default(),
        }
    }

    pub fn handle() -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new()))
    }
}

impl Default for CellOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for CellOp {
    fn name(&self) -> &str {
        "Cells"
    }

    fn init_sim(&mut self, sim: &mut Simulation) {
        self.selector.dormancy_multiplier = sim.config.cells.dormancy_cost_multiplier;
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        let cells = sim.config.cells.clone();
        let recycling = sim.config.regeneration.phosphorus_recycling;
        let recycling_fraction = sim.config.regeneration.recycling_fraction;
        let tolerance = OxygenTolerance::new(cells.oxygen_safe_threshold, cells.oxidative_damage_rate);
        let membrane = Membrane::new(cells.membrane_permeability, cells.membrane_leak_rate);
        let habitat = Habitat::from_env(&sim.env);
        let mut stats = CellStats {
            total_births: sim.cell_stats.total_births,
            total_deaths: sim.cell_stats.total_deaths,
            total_deaths_by_cause: sim.cell_stats.total_deaths_by_cause,
            ..CellStats::default()
        };

        for agent in sim.agents.iter_mut() {
            agent.movement(&sim.env, &habitat, &mut sim.rng);
        }

        // all reads happen before any agent writes this tick
        let readings: Vec<LocalReadings> = sim
            .agents
            .iter()
            .map(|a| LocalReadings::read(&sim.env, &sim.vents, a.position))
            .collect();

        for (agent, reading) in sim.agents.iter_mut().zip(readings.iter()) {
            let maintenance = agent.maintenance_cost(cells.base_metabolic_cost);
            let thermal = thermal_stress_factor(
                reading.get(Species::Temperature),
                agent.dna.thermal_optimum,
                agent.dna.thermal_tolerance,
            );
            let outcome = self.selector.metabolize(
                &agent.dna,
                &agent.proteome,
                reading,
                agent.energy,
                maintenance,
                thermal,
                &mut sim.env,
                agent.position,
            );
            if outcome.is_dormant() {
                stats.dormant += 1;
            }
            agent.apply_metabolism(outcome.pathway, outcome.reserve_used, outcome.energy_delta);
        }

        for (agent, reading) in sim.agents.iter_mut().zip(readings.iter()) {
            agent.upkeep(&mut sim.env, cells.phosphorus_cost, &membrane);
            agent.oxygen_stress(reading.get(Species::O2), &tolerance);
            let uv_lethal = cells.uv_radiation && agent.uv_stress(reading.get(Species::Uv), &self.uv, &mut sim.rng);
            agent.repair();
            agent.age += 1;

            let cause = if uv_lethal { Some(DeathCause::UvRadiation) } else { agent.check_death() };
            if let Some(cause) = cause {
                agent.kill(cause);
                stats.record_death(cause);
                if recycling {
                    stats.recycled_phosphorus += recycle_phosphorus(
                        &mut sim.env,
                        agent.position.x,
                        agent.position.y,
                        agent.phosphorus,
                        recycling_fraction,
                    );
                }
            }
        }
        sim.agents.retain(|a| a.is_alive());

        let express = sim.step % GENE_EXPRESSION_INTERVAL == 0;
        for agent in sim.agents.iter_mut() {
            agent.reproduction_cooldown = agent.reproduction_cooldown.saturating_sub(1);
            agent.proteome.degrade(&mut sim.rng);
            if express {
                agent.proteome.express(&agent.dna, &mut agent.energy);
            }
        }

        if cells.reproduction {
            let stability = sim.stability.current();
            let chance = cells.reproduction_chance.clamp(0.0, 1.0);
            let mut newborns = Vec::new();
            for i in 0..sim.agents.len() {
                let population = sim.agents.len() + newborns.len();
                if !sim.agents[i].can_reproduce(&cells, population) || !sim.rng.random_bool(chance) {
                    continue;
                }
                let mut offspring = sim.mutation.reproduce(&sim.agents[i].dna, stability, &mut sim.rng);
                if let Some(MutationEvent::Divergence(_)) = offspring.event {
                    stats.divergences += 1;
                }
                if sim.agents[i].uv_mutation_pending {
                    sim.mutation.uv_mutation(&mut offspring.dna, &mut sim.rng);
                    sim.agents[i].uv_mutation_pending = false;
                    stats.uv_lesions_inherited += 1;
                }
                let id = sim.allocate_agent_id();
                // a failed transition still costs the parent the child's half of the reserves
                let mut child = sim.agents[i].divide(
                    id,
                    offspring.dna,
                    cells.max_resources,
                    cells.reproduction_cooldown,
                    &habitat,
                    &mut sim.rng,
                );
                if offspring.lethal {
                    child.kill(DeathCause::CrossMetabolism);
                    stats.record_death(DeathCause::CrossMetabolism);
                    if recycling {
                        stats.recycled_phosphorus += recycle_phosphorus(
                            &mut sim.env,
                            child.position.x,
                            child.position.y,
                            child.phosphorus,
                            recycling_fraction,
                        );
                    }
                } else {
                    stats.births += 1;
                    newborns.push(child);
                }
            }
            sim.agents.extend(newborns);
        }

        sim.stability.record_deaths(stats.deaths);

        stats.population = sim.agents.len();
        stats.total_births += stats.births as u64;
        stats.total_deaths += stats.deaths as u64;
        let mut rate_sum = 0.0;
        for agent in &sim.agents {
            rate_sum += agent.dna.mutation_rate;
            stats.stored_phosphorus += agent.phosphorus;
            stats.pathway_census[agent.dna.dominant_pathway().as_index()] += 1;
        }
        if stats.population > 0 {
            stats.mean_mutation_rate = rate_sum / stats.population as f64;
        }
        sim.cell_stats = stats;
    }
}
