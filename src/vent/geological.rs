use crate::config::VentConfig;
use crate::constants::*;
use crate::rng::SimRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeologicalEventKind {
    /// A new vent opens in the sediment.
    Earthquake,
    /// All active vents run hot for a while.
    Surge,
    /// A dormant vent comes back to life.
    Reactivation,
    /// An active vent loses intensity.
    Cooling,
}

impl GeologicalEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeologicalEventKind::Earthquake => "earthquake",
            GeologicalEventKind::Surge => "surge",
            GeologicalEventKind::Reactivation => "reactivation",
            GeologicalEventKind::Cooling => "cooling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeologicalEvent {
    pub tick: u64,
    pub kind: GeologicalEventKind,
    /// Vent created or affected; `None` for surges.
    pub vent_id: Option<u32>,
}

/// Poisson-style trigger with a refractory period.
#[derive(Debug, Clone, Copy)]
pub struct EventSchedule {
    pub probability: f64,
    pub cooldown: u32,
    pub remaining: u32,
}

impl EventSchedule {
    pub fn new(probability: f64, cooldown: u32) -> Self {
        Self {
            probability,
            cooldown,
            remaining: 0,
        }
    }

    /// Counts down the cooldown, then rolls. Arms the cooldown when it fires.
    pub fn roll(&mut self, rng: &mut SimRng) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            return false;
        }
        let p = self.probability.clamp(0.0, 1.0);
        if p > 0.0 && rng.random_bool(p) {
            self.remaining = self.cooldown;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeologicalEvents {
    pub enabled: bool,
    pub earthquake: EventSchedule,
    pub surge: EventSchedule,
    pub reactivation: EventSchedule,
    pub cooling: EventSchedule,
    history: VecDeque<GeologicalEvent>,
}

impl GeologicalEvents {
    pub fn new(config: &VentConfig) -> Self {
        Self {
            enabled: config.geological_events,
            earthquake: EventSchedule::new(config.earthquake_probability, EARTHQUAKE_COOLDOWN),
            surge: EventSchedule::new(config.surge_probability, SURGE_COOLDOWN),
            reactivation: EventSchedule::new(config.reactivation_probability, REACTIVATION_COOLDOWN),
            cooling: EventSchedule::new(config.cooling_probability, COOLING_COOLDOWN),
            history: VecDeque::with_capacity(EVENT_HISTORY_LIMIT),
        }
    }

    /// Rolls every schedule once, in a fixed order, and returns the kinds that fired.
    pub fn roll(&mut self, rng: &mut SimRng) -> Vec<GeologicalEventKind> {
        if !self.enabled {
            return Vec::new();
        }
        let mut fired = Vec::new();
        if self.earthquake.roll(rng) {
            fired.push(GeologicalEventKind::Earthquake);
        }
        if self.surge.roll(rng) {
            fired.push(GeologicalEventKind::Surge);
        }
        if self.reactivation.roll(rng) {
            fired.push(GeologicalEventKind::Reactivation);
        }
        if self.cooling.roll(rng) {
            fired.push(GeologicalEventKind::Cooling);
        }
        fired
    }

    pub fn record(&mut self, event: GeologicalEvent) {
        if self.history.len() == EVENT_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    pub fn history(&self) -> impl Iterator<Item = &GeologicalEvent> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
