use crate::config::StabilityConfig;
use crate::constants::*;
use std::collections::VecDeque;

/// One evaluation's raw penalties, kept for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StabilityPenalties {
    pub mortality: f64,
    pub volatility: f64,
    pub oxygen: f64,
}

impl StabilityPenalties {
    pub fn raw_stability(&self) -> f64 {
        (1.0 - self.mortality - self.volatility - self.oxygen).clamp(0.0, 1.0)
    }
}

/// Smoothed [0, 1] measure of how calm the population and chemistry are.
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    current: f64,
    history: VecDeque<f64>,
    capacity: usize,
    oxygen_safe_threshold: f64,
    last_population: Option<usize>,
    deaths_since_eval: usize,
    pub last_penalties: StabilityPenalties,
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::new(&StabilityConfig::default())
    }
}

impl StabilityTracker {
    pub fn new(config: &StabilityConfig) -> Self {
        Self {
            current: 1.0,
            history: VecDeque::with_capacity(config.history.max(1)),
            capacity: config.history.max(1),
            oxygen_safe_threshold: config.oxygen_safe_threshold,
            last_population: None,
            deaths_since_eval: 0,
            last_penalties: StabilityPenalties::default(),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Override the scalar directly; used by callers that drive mutation pressure by hand.
    pub fn set_current(&mut self, value: f64) {
        self.current = value.clamp(0.0, 1.0);
    }

    pub fn record_deaths(&mut self, count: usize) {
        self.deaths_since_eval += count;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn penalties(&self, population: usize, max_o2: f64) -> StabilityPenalties {
        let mortality_rate = self.deaths_since_eval as f64 / population.max(1) as f64;
        let mortality = (mortality_rate * MORTALITY_PENALTY_SCALE).min(MORTALITY_PENALTY_CAP);

        let volatility = match self.last_population {
            Some(last) if last > 0 => {
                let delta = (population as f64 - last as f64).abs();
                (delta / last as f64).min(VOLATILITY_PENALTY_CAP)
            }
            _ => 0.0,
        };

        let oxygen = ((max_o2 - self.oxygen_safe_threshold) / OXYGEN_PENALTY_RANGE).clamp(0.0, OXYGEN_PENALTY_CAP);

        StabilityPenalties {
            mortality,
            volatility,
            oxygen,
        }
    }

    /// Fold one observation into the moving average and reset the death counter.
    pub fn evaluate(&mut self, population: usize, max_o2: f64) -> f64 {
        let penalties = self.penalties(population, max_o2);
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(penalties.raw_stability());
        self.current = self.history.iter().sum::<f64>() / self.history.len() as f64;

        self.last_penalties = penalties;
        self.last_population = Some(population);
        self.deaths_since_eval = 0;
        self.current
    }
}
