use crate::cell::{Agent, AgentSnapshot, Dna, Habitat, MutationEngine};
use crate::config::SimConfig;
use crate::field::{Environment, ExchangeTotals, Reservoirs, Species};
use crate::rng::{create_rng, noise_seed, SimRng};
use crate::sim_op::{
    CellOp, CellStats, DiffusionOp, ProgressReporterOp, RegenerationOp, ReservoirOp, SimOp,
    SimOpHandle, StabilityOp, VentOp,
};
use crate::stability::StabilityTracker;
use crate::vent::{LifecyclePhase, VentManager, VentSpec, VentTickStats};
use glam::DVec2;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OpTiming {
    pub op_name: String,
    pub init_time: Duration,
    pub total_update_time: Duration,
    pub update_call_count: u32,
    pub after_time: Duration,
}

impl OpTiming {
    pub fn new(op_name: String) -> Self {
        Self {
            op_name,
            init_time: Duration::ZERO,
            total_update_time: Duration::ZERO,
            update_call_count: 0,
            after_time: Duration::ZERO,
        }
    }

    pub fn avg_update_time(&self) -> Duration {
        if self.update_call_count > 0 {
            self.total_update_time / self.update_call_count
        } else {
            Duration::ZERO
        }
    }

    pub fn total_time(&self) -> Duration {
        self.init_time + self.total_update_time + self.after_time
    }
}

/// The simulation context: owns the world, the population and the tick pipeline.
pub struct Simulation {
    pub config: SimConfig,
    pub env: Environment,
    pub vents: VentManager,
    pub reservoirs: Reservoirs,
    pub agents: Vec<Agent>,
    pub stability: StabilityTracker,
    pub mutation: MutationEngine,
    pub rng: SimRng,
    pub ops: Vec<Box<dyn SimOp>>,
    pub step: u64,
    pub sim_steps: u64,
    pub name: String,
    pub debug: bool,
    pub op_timings: Vec<OpTiming>,
    pub cell_stats: CellStats,
    pub vent_stats: VentTickStats,
    pub exchange: ExchangeTotals,
    next_agent_id: u64,
}

pub struct SimProps {
    pub name: &'static str,
    pub config: SimConfig,
    pub ops: Vec<SimOpHandle>,
    pub debug: bool,
}

impl Simulation {
    pub fn new(props: SimProps) -> Result<Simulation, String> {
        props.config.validate()?;
        let ops: Vec<Box<dyn SimOp>> = props.ops.into_iter().map(|handle| handle.op).collect();
        let op_timings = ops.iter().map(|op| OpTiming::new(op.name().to_string())).collect();

        let mut sim = Simulation {
            env: Environment::empty(&props.config.grid, &props.config.diffusion)?,
            vents: VentManager::new(&props.config.vents),
            reservoirs: Reservoirs::new(&props.config.reservoirs),
            agents: Vec::new(),
            stability: StabilityTracker::new(&props.config.stability),
            mutation: MutationEngine::new(&props.config.mutation),
            rng: create_rng(props.config.seed),
            sim_steps: props.config.sim_steps,
            config: props.config,
            ops,
            step: 0,
            name: props.name.to_string(),
            debug: props.debug,
            op_timings,
            cell_stats: CellStats::default(),
            vent_stats: VentTickStats::default(),
            exchange: ExchangeTotals::default(),
            next_agent_id: 1,
        };
        sim.populate_world()?;
        Ok(sim)
    }

    /// The standard tick pipeline for `config`.
    pub fn default_ops(config: &SimConfig) -> Vec<SimOpHandle> {
        let verbose = config.report_interval > 0;
        let mut ops = vec![
            RegenerationOp::handle(),
            SimOpHandle::new(Box::new(VentOp::new().with_reporting(verbose))),
            ReservoirOp::handle(),
            DiffusionOp::handle(),
            CellOp::handle(),
            SimOpHandle::new(Box::new(StabilityOp::new().with_reporting(verbose))),
        ];
        if verbose {
            ops.push(ProgressReporterOp::handle(config.report_interval));
        }
        ops
    }

    pub fn with_default_ops(name: &'static str, config: SimConfig) -> Result<Simulation, String> {
        let ops = Self::default_ops(&config);
        Self::new(SimProps {
            name,
            config,
            ops,
            debug: false,
        })
    }

    /// Seed fields, vents and the founding population from the config.
    fn populate_world(&mut self) -> Result<(), String> {
        let config = &self.config;
        self.env = Environment::new(&config.grid, &config.diffusion, noise_seed(config.seed))?;
        self.vents = VentManager::with_layout(&config.vents, &self.env.strat);
        self.reservoirs = Reservoirs::new(&config.reservoirs);
        self.stability = StabilityTracker::new(&config.stability);
        self.mutation = MutationEngine::new(&config.mutation);
        self.rng = create_rng(config.seed);
        self.cell_stats = CellStats::default();
        self.vent_stats = VentTickStats::default();
        self.exchange = ExchangeTotals::default();
        self.next_agent_id = 1;
        self.step = 0;

        let habitat = Habitat::from_env(&self.env);
        self.agents = Vec::with_capacity(self.config.cells.initial_population);
        for _ in 0..self.config.cells.initial_population {
            let position = habitat.sample(&mut self.rng);
            let dna = Dna::luca(&mut self.rng);
            let id = self.allocate_agent_id();
            self.agents.push(Agent::new(id, position, dna, &self.config.cells));
        }
        Ok(())
    }

    /// Throw away the world and rebuild it from the current config. Operators are kept.
    pub fn reset(&mut self) -> Result<(), String> {
        self.config.validate()?;
        self.populate_world()?;
        for timing in self.op_timings.iter_mut() {
            *timing = OpTiming::new(timing.op_name.clone());
        }
        Ok(())
    }

    pub fn allocate_agent_id(&mut self) -> u64 {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        id
    }

    pub fn spawn_agent(&mut self, position: DVec2, dna: Dna) -> u64 {
        let id = self.allocate_agent_id();
        self.agents.push(Agent::new(id, position, dna, &self.config.cells));
        id
    }

    pub fn current_step(&self) -> u64 {
        self.step
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Run a single step with custom operators (for testing)
    pub fn step_with_ops(&mut self, ops: &mut [&mut dyn SimOp]) {
        self.step += 1;
        for op in ops {
            op.update_sim(self);
        }
        self.advance();
    }

    /// Run `steps` ticks of the owned pipeline without init or after hooks.
    pub fn run_steps(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step += 1;
            self.simulate_step();
            self.advance();
        }
    }

    pub fn run(&mut self) {
        self.simulate_init();
        while self.step < self.sim_steps {
            self.step += 1;
            self.simulate_step();
            self.advance();
        }
        self.simulate_end();
        if self.debug {
            self.print_timing_report();
        }
    }

    fn advance(&mut self) {
        if self.debug && !self.env.within_bounds() {
            println!("⚠️  step {}: field out of bounds, clamping", self.step);
            self.env.clamp_all();
        }
    }

    fn simulate_init(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);

        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.init_sim(self);
            self.op_timings[i].init_time = start.elapsed();
        }
        self.ops = ops;
    }

    fn simulate_end(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);

        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.after_sim(self);
            self.op_timings[i].after_time = start.elapsed();
        }
        self.ops = ops;
    }

    fn simulate_step(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);

        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.update_sim(self);
            self.op_timings[i].total_update_time += start.elapsed();
            self.op_timings[i].update_call_count += 1;
        }
        self.ops = ops;
    }

    pub fn read_field(&self, species: Species, x: f64, y: f64) -> f64 {
        self.env.read_field(species, x, y)
    }

    pub fn consume(&mut self, species: Species, x: f64, y: f64, amount: f64) -> f64 {
        self.env.consume(species, x, y, amount)
    }

    pub fn produce(&mut self, species: Species, x: f64, y: f64, amount: f64) {
        self.env.produce(species, x, y, amount)
    }

    pub fn stability_scalar(&self) -> f64 {
        self.stability.current()
    }

    pub fn agent_snapshot(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(|a| a.snapshot()).collect()
    }

    pub fn spawn_vent(&mut self, spec: &VentSpec) -> Option<u32> {
        self.vents.spawn(spec, &self.env.strat)
    }

    pub fn set_vent_intensity(&mut self, id: u32, value: f64) -> bool {
        self.vents.set_intensity(id, value)
    }

    pub fn set_vent_lifecycle_phase(&mut self, id: u32, phase: LifecyclePhase) -> bool {
        self.vents.set_lifecycle_phase(id, phase)
    }

    pub fn print_timing_report(&self) {
        println!("\n📊 === SIMULATION TIMING REPORT ===");
        println!("🔄 Total steps: {}", self.step);
        println!();

        let mut total_time = Duration::ZERO;
        for timing in &self.op_timings {
            total_time += timing.total_time();
        }

        println!("📈 PER-OPERATION BREAKDOWN:");
        for timing in &self.op_timings {
            let total_op_time = timing.total_time();
            let percentage = if total_time.as_micros() > 0 {
                (total_op_time.as_micros() as f64 / total_time.as_micros() as f64) * 100.0
            } else {
                0.0
            };

            println!(
                "  🔧 {:<18} | Total: {:>8}ms | Avg/step: {:>6}µs | Init: {:>6}µs | After: {:>6}µs | Share: {:>5.1}%",
                timing.op_name,
                total_op_time.as_millis(),
                timing.avg_update_time().as_micros(),
                timing.init_time.as_micros(),
                timing.after_time.as_micros(),
                percentage
            );
        }

        println!();
        println!(
            "⏱️  TOTAL SIMULATION TIME: {}ms ({:.2}s)",
            total_time.as_millis(),
            total_time.as_secs_f64()
        );
        if self.step > 0 && total_time.as_secs_f64() > 0.0 {
            println!("💫 Steps per second: {:.2}", self.step as f64 / total_time.as_secs_f64());
        }
        println!("📊 === END TIMING REPORT ===\n");
    }
}
