use crate::config::{VentConfig, VentLayout};
use crate::constants::*;
use crate::field::{Environment, Stratification};
use crate::rng::SimRng;
use crate::vent::geological::{GeologicalEvent, GeologicalEventKind, GeologicalEvents};
use crate::vent::vent::{BaseFluxes, Emission, LifecyclePhase, Vent, VentSpec};
use crate::vent::vent_type::{TraceElement, VentKind};
use rand::Rng;

/// Totals from one vent tick, used by reporting.
#[derive(Debug, Clone, Default)]
pub struct VentTickStats {
    pub emission: Emission,
    pub emitting: usize,
    pub transitions: Vec<(u32, LifecyclePhase, LifecyclePhase)>,
    pub events: Vec<GeologicalEvent>,
}

/// Owns every vent and the geological event schedule.
#[derive(Debug, Clone)]
pub struct VentManager {
    vents: Vec<Vent>,
    next_id: u32,
    pub fluxes: BaseFluxes,
    pub events: GeologicalEvents,
    default_width: usize,
}

impl VentManager {
    pub fn new(config: &VentConfig) -> Self {
        Self {
            vents: Vec::new(),
            next_id: 1,
            fluxes: BaseFluxes {
                h2: config.h2_base_flux,
                co2: config.co2_base_flux,
                fe2: config.fe2_base_flux,
                phosphorus: config.phosphorus_flux,
                nitrogen: config.nitrogen_flux,
            },
            events: GeologicalEvents::new(config),
            default_width: config.default_width.max(1),
        }
    }

    /// Builds the starting vent layout.
    pub fn with_layout(config: &VentConfig, strat: &Stratification) -> Self {
        let mut manager = Self::new(config);
        match config.layout {
            VentLayout::Single => {
                manager.spawn(
                    &VentSpec::new(VentKind::Alkaline, strat.cols / 2).with_width(manager.default_width),
                    strat,
                );
            }
            VentLayout::Field => {
                let n = VentKind::ALL.len();
                for (i, kind) in VentKind::ALL.into_iter().enumerate() {
                    let col = strat.cols * (2 * i + 1) / (2 * n);
                    manager.spawn(&VentSpec::new(kind, col).with_width(manager.default_width), strat);
                }
            }
            VentLayout::Empty => {}
        }
        manager
    }

    pub fn vents(&self) -> &[Vent] {
        &self.vents
    }

    pub fn vent(&self, id: u32) -> Option<&Vent> {
        self.vents.iter().find(|v| v.id == id)
    }

    fn vent_mut(&mut self, id: u32) -> Option<&mut Vent> {
        self.vents.iter_mut().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.vents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vents.is_empty()
    }

    pub fn count_in_phase(&self, phase: LifecyclePhase) -> usize {
        self.vents.iter().filter(|v| v.phase == phase).count()
    }

    /// Creates a vent. Off-grid specs are ignored and yield `None`.
    pub fn spawn(&mut self, spec: &VentSpec, strat: &Stratification) -> Option<u32> {
        let vent = Vent::new(self.next_id, spec, strat)?;
        let id = vent.id;
        self.next_id += 1;
        self.vents.push(vent);
        Some(id)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.vents.len();
        self.vents.retain(|v| v.id != id);
        self.vents.len() != before
    }

    pub fn set_intensity(&mut self, id: u32, value: f64) -> bool {
        match self.vent_mut(id) {
            Some(vent) => {
                vent.set_intensity(value);
                true
            }
            None => false,
        }
    }

    pub fn set_lifecycle_phase(&mut self, id: u32, phase: LifecyclePhase) -> bool {
        self.vent_mut(id).map(|v| v.set_phase(phase)).unwrap_or(false)
    }

    pub fn reactivate(&mut self, id: u32) -> bool {
        self.vent_mut(id).map(|v| v.reactivate()).unwrap_or(false)
    }

    /// Sum of every vent's contribution of `element` at world point (x, y).
    pub fn trace_element_level(&self, element: TraceElement, x: f64, y: f64, resolution: f64) -> f64 {
        self.vents
            .iter()
            .map(|v| v.trace_level(element, x, y, resolution))
            .sum()
    }

    /// Lifecycle, geological events, then emission.
    pub fn update(&mut self, env: &mut Environment, rng: &mut SimRng, tick: u64) -> VentTickStats {
        let mut stats = VentTickStats::default();

        for vent in self.vents.iter_mut() {
            if let Some((from, to)) = vent.update_lifecycle() {
                stats.transitions.push((vent.id, from, to));
            }
        }

        for kind in self.events.roll(rng) {
            let vent_id = self.apply_event(kind, &env.strat, rng);
            let event = GeologicalEvent { tick, kind, vent_id };
            self.events.record(event);
            stats.events.push(event);
        }

        for vent in &self.vents {
            if !vent.phase.is_emitting() {
                continue;
            }
            let e = vent.emit(env, &self.fluxes);
            stats.emitting += 1;
            stats.emission.h2 += e.h2;
            stats.emission.co2 += e.co2;
            stats.emission.fe2 += e.fe2;
            stats.emission.phosphorus += e.phosphorus;
            stats.emission.nitrogen += e.nitrogen;
            stats.emission.cells += e.cells;
        }

        stats
    }

    fn pick(&self, phase: LifecyclePhase, rng: &mut SimRng) -> Option<usize> {
        let candidates: Vec<usize> = self
            .vents
            .iter()
            .enumerate()
            .filter(|(_, v)| v.phase == phase)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.random_range(0..candidates.len())])
        }
    }

    fn apply_event(&mut self, kind: GeologicalEventKind, strat: &Stratification, rng: &mut SimRng) -> Option<u32> {
        match kind {
            GeologicalEventKind::Earthquake => {
                let col = rng.random_range(0..strat.cols);
                let vent_kind = VentKind::ALL[rng.random_range(0..VentKind::ALL.len())];
                let intensity = rng.random_range(0.5..1.5);
                let spec = VentSpec::new(vent_kind, col)
                    .with_width(self.default_width)
                    .with_intensity(intensity);
                self.spawn(&spec, strat)
            }
            GeologicalEventKind::Surge => {
                for vent in self.vents.iter_mut() {
                    vent.surge(SURGE_MULTIPLIER, SURGE_DURATION);
                }
                None
            }
            GeologicalEventKind::Reactivation => {
                let i = self.pick(LifecyclePhase::Dormant, rng)?;
                self.vents[i].reactivate();
                Some(self.vents[i].id)
            }
            GeologicalEventKind::Cooling => {
                let i = self.pick(LifecyclePhase::Active, rng)?;
                self.vents[i].cool(COOLING_FACTOR);
                Some(self.vents[i].id)
            }
        }
    }
}
