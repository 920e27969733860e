use crate::constants::*;
use crate::field::{Environment, Species, Stratification};
use crate::vent::vent_type::{TraceElement, VentKind, VentTypeProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecyclePhase {
    Active,
    Waning,
    Dormant,
    Extinct,
}

impl LifecyclePhase {
    /// Share of nominal output delivered in this phase.
    pub fn multiplier(self) -> f64 {
        match self {
            LifecyclePhase::Active => 1.0,
            LifecyclePhase::Waning => 0.5,
            LifecyclePhase::Dormant | LifecyclePhase::Extinct => 0.0,
        }
    }

    pub fn is_emitting(self) -> bool {
        self.multiplier() > 0.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::Active => "ACTIVE",
            LifecyclePhase::Waning => "WANING",
            LifecyclePhase::Dormant => "DORMANT",
            LifecyclePhase::Extinct => "EXTINCT",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentContext {
    #[default]
    Submarine,
    Subaerial,
}

/// Caller-supplied description of a vent to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentSpec {
    pub col: usize,
    /// Source row; `None` places the vent on the sediment surface.
    pub row: Option<usize>,
    pub width: usize,
    pub intensity: f64,
    pub kind: VentKind,
    pub context: VentContext,
}

impl VentSpec {
    pub fn new(kind: VentKind, col: usize) -> Self {
        Self {
            col,
            row: None,
            width: 3,
            intensity: 1.0,
            kind,
            context: VentContext::Submarine,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn subaerial(mut self) -> Self {
        self.context = VentContext::Subaerial;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumeCell {
    pub col: usize,
    pub row: usize,
    pub weight: f64,
}

/// Per-species emission base rates shared by all vents.
#[derive(Debug, Clone, Copy)]
pub struct BaseFluxes {
    pub h2: f64,
    pub co2: f64,
    pub fe2: f64,
    pub phosphorus: f64,
    pub nitrogen: f64,
}

impl Default for BaseFluxes {
    fn default() -> Self {
        Self {
            h2: H2_BASE_FLUX,
            co2: CO2_BASE_FLUX,
            fe2: FE2_BASE_FLUX,
            phosphorus: VENT_PHOSPHORUS_FLUX,
            nitrogen: VENT_NITROGEN_FLUX,
        }
    }
}

/// What a vent put into the grid in one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emission {
    pub h2: f64,
    pub co2: f64,
    pub fe2: f64,
    pub phosphorus: f64,
    pub nitrogen: f64,
    pub cells: usize,
}

/// A point or strip source of chemistry and heat with its own lifecycle.
#[derive(Debug, Clone)]
pub struct Vent {
    pub id: u32,
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub intensity: f64,
    pub kind: VentKind,
    pub phase: LifecyclePhase,
    pub context: VentContext,
    pub age: u64,
    pub max_age: Option<u64>,
    /// Ticks left on a geological surge; intensity is restored when it reaches zero.
    pub surge_timer: u32,
    pub pre_surge_intensity: f64,
    plume: Vec<PlumeCell>,
}

impl Vent {
    /// Returns `None` when the source lies off-grid.
    pub fn new(id: u32, spec: &VentSpec, strat: &Stratification) -> Option<Self> {
        let default_row = match spec.context {
            VentContext::Submarine => strat.sediment_row,
            VentContext::Subaerial => strat.sediment_row.saturating_sub(1),
        };
        let row = spec.row.unwrap_or(default_row);
        if spec.col >= strat.cols || row >= strat.rows {
            return None;
        }

        let mut vent = Self {
            id,
            col: spec.col,
            row,
            width: spec.width.max(1),
            intensity: spec.intensity.clamp(0.0, VENT_MAX_INTENSITY),
            kind: spec.kind,
            phase: LifecyclePhase::Active,
            context: spec.context,
            age: 0,
            max_age: spec.kind.profile().max_age,
            surge_timer: 0,
            pre_surge_intensity: 0.0,
            plume: Vec::new(),
        };
        vent.plume = vent.compute_plume(strat);
        Some(vent)
    }

    pub fn profile(&self) -> &'static VentTypeProfile {
        self.kind.profile()
    }

    pub fn plume(&self) -> &[PlumeCell] {
        &self.plume
    }

    pub fn output_factor(&self) -> f64 {
        self.intensity * self.phase.multiplier()
    }

    pub fn set_intensity(&mut self, value: f64) {
        self.intensity = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, VENT_MAX_INTENSITY)
        };
    }

    /// Decaying footprint around the source. Submarine plumes rise and widen;
    /// subaerial plumes spread radially.
    pub fn compute_plume(&self, strat: &Stratification) -> Vec<PlumeCell> {
        let profile = self.profile();
        let max_radius = self.width as f64 * PLUME_RADIUS_FACTOR;
        let mut cells = Vec::new();

        match self.context {
            VentContext::Submarine => {
                let top = strat.water_start_row;
                for dy in 0..=PLUME_MAX_HEIGHT {
                    if dy > self.row || self.row - dy < top {
                        break;
                    }
                    let row = self.row - dy;
                    let half_width = ((self.width as f64 / 2.0)
                        * (1.0 + dy as f64 * PLUME_SPREAD_PER_ROW))
                        .min(max_radius)
                        .floor() as i64;
                    let lift = 1.0 - dy as f64 * PLUME_BUOYANCY_FALLOFF * profile.buoyancy;
                    if lift <= 0.0 {
                        break;
                    }
                    for dx in -half_width..=half_width {
                        let col = self.col as i64 + dx;
                        if col < 0 || col >= strat.cols as i64 {
                            continue;
                        }
                        let dist = ((dx * dx) as f64 + (dy * dy) as f64).sqrt();
                        let weight = (-profile.decay_rate * dist).exp() * lift;
                        if weight > PLUME_MIN_WEIGHT {
                            cells.push(PlumeCell {
                                col: col as usize,
                                row,
                                weight,
                            });
                        }
                    }
                }
            }
            VentContext::Subaerial => {
                let r = max_radius.ceil() as i64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let dist = ((dx * dx + dy * dy) as f64).sqrt();
                        if dist > max_radius {
                            continue;
                        }
                        let col = self.col as i64 + dx;
                        let row = self.row as i64 + dy;
                        if col < 0 || row < 0 || col >= strat.cols as i64 || row >= strat.rows as i64 {
                            continue;
                        }
                        let weight = (-profile.decay_rate * dist).exp();
                        if weight > PLUME_MIN_WEIGHT {
                            cells.push(PlumeCell {
                                col: col as usize,
                                row: row as usize,
                                weight,
                            });
                        }
                    }
                }
            }
        }
        cells
    }

    /// Injects this tick's chemistry and heat into `env`.
    pub fn emit(&self, env: &mut Environment, fluxes: &BaseFluxes) -> Emission {
        let mut emission = Emission::default();
        let factor = self.output_factor();
        if factor <= 0.0 {
            return emission;
        }
        let weights = self.profile().emission;

        for cell in &self.plume {
            let scale = factor * cell.weight;
            emission.h2 += env.field_mut(Species::H2).add(cell.col, cell.row, fluxes.h2 * weights.h2 * scale);
            emission.co2 += env.field_mut(Species::Co2).add(cell.col, cell.row, fluxes.co2 * weights.co2 * scale);
            emission.fe2 += env.field_mut(Species::Fe2).add(cell.col, cell.row, fluxes.fe2 * weights.fe2 * scale);
            emission.phosphorus += env
                .field_mut(Species::Phosphorus)
                .add(cell.col, cell.row, fluxes.phosphorus * scale);
            emission.nitrogen += env
                .field_mut(Species::Nitrogen)
                .add(cell.col, cell.row, fluxes.nitrogen * scale);
            emission.cells += 1;
        }

        self.apply_heat(env);
        emission
    }

    fn apply_heat(&self, env: &mut Environment) {
        let temperature = self.profile().temperature;
        let half = self.width / 2;
        let start = self.col.saturating_sub(half);
        let end = (self.col + half).min(env.cols().saturating_sub(1));
        let field = env.field_mut(Species::Temperature);
        for col in start..=end {
            field.raise_to(col, self.row, temperature);
            if self.context == VentContext::Subaerial {
                field.raise_to(col, self.row + 1, temperature * SUBAERIAL_CONDUCTION);
            }
        }
    }

    /// Advances age, surge timer and spontaneous decay. A dormant vent never
    /// leaves dormancy here; only `reactivate` does that.
    pub fn update_lifecycle(&mut self) -> Option<(LifecyclePhase, LifecyclePhase)> {
        let before = self.phase;
        if self.phase == LifecyclePhase::Extinct {
            return None;
        }
        self.age += 1;

        if self.surge_timer > 0 {
            self.surge_timer -= 1;
            if self.surge_timer == 0 {
                self.intensity = self.pre_surge_intensity;
            }
        }

        if let Some(max_age) = self.max_age {
            if self.age >= max_age {
                self.phase = LifecyclePhase::Extinct;
                self.intensity = 0.0;
                self.surge_timer = 0;
            } else if self.phase == LifecyclePhase::Active
                && self.age as f64 >= max_age as f64 * WANING_AGE_FRACTION
            {
                self.phase = LifecyclePhase::Waning;
            }
        }

        match self.phase {
            LifecyclePhase::Active if self.intensity < WANING_THRESHOLD => {
                self.phase = LifecyclePhase::Waning;
            }
            LifecyclePhase::Waning => {
                self.intensity *= WANING_DECAY;
                if self.intensity < DORMANT_THRESHOLD {
                    self.intensity = 0.0;
                    self.surge_timer = 0;
                    self.phase = LifecyclePhase::Dormant;
                }
            }
            _ => {}
        }

        (before != self.phase).then_some((before, self.phase))
    }

    /// The only path out of dormancy.
    pub fn reactivate(&mut self) -> bool {
        if self.phase != LifecyclePhase::Dormant {
            return false;
        }
        self.phase = LifecyclePhase::Active;
        self.intensity = self.intensity.max(REACTIVATION_INTENSITY);
        true
    }

    /// Explicit phase override. Leaving EXTINCT is refused.
    pub fn set_phase(&mut self, phase: LifecyclePhase) -> bool {
        if self.phase == LifecyclePhase::Extinct && phase != LifecyclePhase::Extinct {
            return false;
        }
        match phase {
            LifecyclePhase::Active if self.phase == LifecyclePhase::Dormant => self.reactivate(),
            LifecyclePhase::Dormant | LifecyclePhase::Extinct => {
                self.phase = phase;
                self.intensity = 0.0;
                self.surge_timer = 0;
                true
            }
            _ => {
                self.phase = phase;
                true
            }
        }
    }

    pub fn surge(&mut self, multiplier: f64, duration: u32) -> bool {
        if self.phase != LifecyclePhase::Active || self.surge_timer > 0 {
            return false;
        }
        self.pre_surge_intensity = self.intensity;
        self.set_intensity(self.intensity * multiplier);
        self.surge_timer = duration;
        true
    }

    pub fn cool(&mut self, factor: f64) {
        self.set_intensity(self.intensity * factor);
        if self.surge_timer > 0 {
            self.pre_surge_intensity *= factor;
        }
        if self.phase == LifecyclePhase::Active && self.intensity < WANING_THRESHOLD {
            self.phase = LifecyclePhase::Waning;
        }
    }

    /// Trace-metal contribution at world point (x, y).
    pub fn trace_level(&self, element: TraceElement, x: f64, y: f64, resolution: f64) -> f64 {
        let factor = self.output_factor();
        let weight = self.profile().trace_weight(element);
        if factor <= 0.0 || weight <= 0.0 {
            return 0.0;
        }
        let max_dist = TRACE_ELEMENT_RANGE * self.intensity;
        let vx = (self.col as f64 + 0.5) * resolution;
        let vy = (self.row as f64 + 0.5) * resolution;
        let d = ((x - vx).powi(2) + (y - vy).powi(2)).sqrt();
        if d >= max_dist {
            return 0.0;
        }
        weight * factor * (1.0 - d / max_dist).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffusionConfig, GridConfig};
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_gt;

    fn strat() -> Stratification {
        Stratification::new(&GridConfig::default(), &DiffusionConfig::default()).unwrap()
    }

    fn env() -> Environment {
        Environment::empty(&GridConfig::default(), &DiffusionConfig::default()).unwrap()
    }

    #[test]
    fn off_grid_vent_is_not_created() {
        let s = strat();
        assert!(Vent::new(1, &VentSpec::new(VentKind::Alkaline, 10_000), &s).is_none());
        assert!(Vent::new(1, &VentSpec::new(VentKind::Alkaline, 5).with_row(10_000), &s).is_none());
    }

    #[test]
    fn submarine_plume_rises_and_fades() {
        let s = strat();
        let vent = Vent::new(1, &VentSpec::new(VentKind::Alkaline, 40), &s).unwrap();
        let plume = vent.plume();
        assert!(!plume.is_empty());
        assert!(plume.iter().all(|c| c.row <= vent.row && c.row >= s.water_start_row));
        assert!(plume.iter().all(|c| c.weight > PLUME_MIN_WEIGHT && c.weight <= 1.0));

        let source = plume.iter().find(|c| c.col == 40 && c.row == vent.row).unwrap();
        let above = plume.iter().find(|c| c.col == 40 && c.row == vent.row - 5).unwrap();
        assert_gt!(source.weight, above.weight);
    }

    #[test]
    fn subaerial_plume_is_radial() {
        let s = strat();
        let vent = Vent::new(1, &VentSpec::new(VentKind::Diffuse, 40).subaerial(), &s).unwrap();
        assert!(vent.plume().iter().any(|c| c.row > vent.row));
        assert!(vent.plume().iter().any(|c| c.row < vent.row));
    }

    #[test]
    fn emission_scales_with_intensity() {
        let s = strat();
        let mut e1 = env();
        let mut e2 = env();
        let weak = Vent::new(1, &VentSpec::new(VentKind::Alkaline, 40).with_intensity(0.5), &s).unwrap();
        let strong = Vent::new(2, &VentSpec::new(VentKind::Alkaline, 40).with_intensity(1.0), &s).unwrap();
        let a = weak.emit(&mut e1, &BaseFluxes::default());
        let b = strong.emit(&mut e2, &BaseFluxes::default());
        assert_abs_diff_eq!(b.h2, 2.0 * a.h2, epsilon = 1e-9);
        assert_abs_diff_eq!(
            e2.field(Species::H2).get(40, strong.row),
            H2_BASE_FLUX * strong.profile().emission.h2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn vent_forces_minimum_temperature() {
        let s = strat();
        let mut e = env();
        let vent = Vent::new(1, &VentSpec::new(VentKind::BlackSmoker, 40).subaerial(), &s).unwrap();
        vent.emit(&mut e, &BaseFluxes::default());
        let t = e.field(Species::Temperature);
        assert_abs_diff_eq!(t.get(40, vent.row), 300.0);
        assert_abs_diff_eq!(t.get(40, vent.row + 1), 300.0 * SUBAERIAL_CONDUCTION);
    }

    #[test]
    fn waning_vent_decays_to_dormant_and_stays() {
        let s = strat();
        let mut vent = Vent::new(1, &VentSpec::new(VentKind::Alkaline, 40).with_intensity(0.2), &s).unwrap();
        vent.update_lifecycle();
        assert_eq!(vent.phase, LifecyclePhase::Waning);
        for _ in 0..20_000 {
            vent.update_lifecycle();
        }
        assert_eq!(vent.phase, LifecyclePhase::Dormant);
        for _ in 0..20_000 {
            vent.update_lifecycle();
            assert_eq!(vent.phase, LifecyclePhase::Dormant);
        }
        assert!(vent.reactivate());
        assert_eq!(vent.phase, LifecyclePhase::Active);
        assert_abs_diff_eq!(vent.intensity, REACTIVATION_INTENSITY);
    }

    #[test]
    fn extinct_is_terminal() {
        let s = strat();
        let mut vent = Vent::new(1, &VentSpec::new(VentKind::BlackSmoker, 40), &s).unwrap();
        assert!(vent.set_phase(LifecyclePhase::Extinct));
        assert!(!vent.set_phase(LifecyclePhase::Active));
        assert!(!vent.reactivate());
        assert_eq!(vent.update_lifecycle(), None);
    }

    #[test]
    fn aging_vent_wanes_then_dies() {
        let s = strat();
        let mut vent = Vent::new(1, &VentSpec::new(VentKind::Alkaline, 40), &s).unwrap();
        vent.max_age = Some(100);
        for _ in 0..90 {
            vent.update_lifecycle();
        }
        assert_eq!(vent.phase, LifecyclePhase::Waning);
        for _ in 0..10 {
            vent.update_lifecycle();
        }
        assert_eq!(vent.phase, LifecyclePhase::Extinct);
    }

    #[test]
    fn surge_reverts_after_timer() {
        let s = strat();
        let mut vent = Vent::new(1, &VentSpec::new(VentKind::Alkaline, 40), &s).unwrap();
        assert!(vent.surge(SURGE_MULTIPLIER, 3));
        assert_abs_diff_eq!(vent.intensity, 2.0);
        assert!(!vent.surge(SURGE_MULTIPLIER, 3));
        for _ in 0..3 {
            vent.update_lifecycle();
        }
        assert_abs_diff_eq!(vent.intensity, 1.0);
        assert_eq!(vent.surge_timer, 0);
    }

    #[test]
    fn trace_level_falls_off_with_distance() {
        let s = strat();
        let vent = Vent::new(1, &VentSpec::new(VentKind::BlackSmoker, 40), &s).unwrap();
        let (vx, vy) = ((40.5) * 10.0, (vent.row as f64 + 0.5) * 10.0);
        assert_abs_diff_eq!(vent.trace_level(TraceElement::Fe, vx, vy, 10.0), 2.0);
        assert_abs_diff_eq!(vent.trace_level(TraceElement::Fe, vx + 200.0, vy, 10.0), 0.5);
        assert_abs_diff_eq!(vent.trace_level(TraceElement::Fe, vx + 500.0, vy, 10.0), 0.0);
        assert_abs_diff_eq!(vent.trace_level(TraceElement::Ni, vx, vy, 10.0), 0.0);
    }
}
