use crate::field::species::Species;

/// Dense per-species grid. `values` is the committed state every reader sees;
/// `next` is the write target of double-buffered passes such as diffusion.
#[derive(Debug, Clone)]
pub struct ChemicalField {
    pub species: Species,
    pub cols: usize,
    pub rows: usize,
    pub cap: f64,
    values: Vec<f64>,
    next: Vec<f64>,
}

impl ChemicalField {
    pub fn new(species: Species, cols: usize, rows: usize) -> Self {
        Self::with_cap(species, cols, rows, species.cap())
    }

    pub fn with_cap(species: Species, cols: usize, rows: usize, cap: f64) -> Self {
        Self {
            species,
            cols,
            rows,
            cap,
            values: vec![0.0; cols * rows],
            next: vec![0.0; cols * rows],
        }
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.cols && row < self.rows {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    #[inline]
    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.cap)
        }
    }

    /// Committed value; 0.0 off-grid.
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.index(col, row).map(|i| self.values[i]).unwrap_or(0.0)
    }

    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        if let Some(i) = self.index(col, row) {
            self.values[i] = self.clamp(value);
        }
    }

    /// Adds `amount` (which may be negative) and clamps. Returns the change actually applied.
    pub fn add(&mut self, col: usize, row: usize, amount: f64) -> f64 {
        match self.index(col, row) {
            Some(i) => {
                let before = self.values[i];
                let after = self.clamp(before + amount);
                self.values[i] = after;
                after - before
            }
            None => 0.0,
        }
    }

    /// Removes up to `amount`, never more than the cell holds. Returns what was taken.
    pub fn take(&mut self, col: usize, row: usize, amount: f64) -> f64 {
        if amount <= 0.0 || amount.is_nan() {
            return 0.0;
        }
        match self.index(col, row) {
            Some(i) => {
                let taken = amount.min(self.values[i]);
                self.values[i] -= taken;
                taken
            }
            None => 0.0,
        }
    }

    /// Raises a cell to at least `floor` (used for vent heat).
    pub fn raise_to(&mut self, col: usize, row: usize, floor: f64) {
        if let Some(i) = self.index(col, row) {
            if self.values[i] < floor {
                self.values[i] = self.clamp(floor);
            }
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = (row.min(self.rows.saturating_sub(1))) * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.total() / self.values.len() as f64
        }
    }

    /// Copies the committed state into the write buffer.
    pub fn reset_next(&mut self) {
        self.next.copy_from_slice(&self.values);
    }

    pub fn set_next(&mut self, col: usize, row: usize, value: f64) {
        if let Some(i) = self.index(col, row) {
            self.next[i] = value;
        }
    }

    /// Swaps the write buffer in as the committed state, re-clamping every cell.
    pub fn commit_next(&mut self) {
        std::mem::swap(&mut self.values, &mut self.next);
        let cap = self.cap;
        for v in self.values.iter_mut() {
            *v = if v.is_nan() { 0.0 } else { v.clamp(0.0, cap) };
        }
    }

    pub fn clamp_all(&mut self) {
        let cap = self.cap;
        for v in self.values.iter_mut() {
            *v = if v.is_nan() { 0.0 } else { v.clamp(0.0, cap) };
        }
    }

    pub fn within_bounds(&self) -> bool {
        self.values.iter().all(|v| *v >= 0.0 && *v <= self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn add_clamps_to_cap() {
        let mut field = ChemicalField::new(Species::O2, 4, 4);
        let applied = field.add(1, 1, 1_000.0);
        assert_abs_diff_eq!(field.get(1, 1), Species::O2.cap());
        assert_abs_diff_eq!(applied, Species::O2.cap());
    }

    #[test]
    fn take_never_exceeds_contents() {
        let mut field = ChemicalField::new(Species::H2, 3, 3);
        field.set(0, 0, 2.5);
        assert_abs_diff_eq!(field.take(0, 0, 10.0), 2.5);
        assert_abs_diff_eq!(field.get(0, 0), 0.0);
        assert_abs_diff_eq!(field.take(0, 0, 1.0), 0.0);
        assert_abs_diff_eq!(field.take(0, 0, -1.0), 0.0);
    }

    #[test]
    fn off_grid_access_is_silent() {
        let mut field = ChemicalField::new(Species::Co2, 2, 2);
        field.set(5, 5, 10.0);
        assert_eq!(field.get(5, 5), 0.0);
        assert_eq!(field.add(9, 0, 3.0), 0.0);
        assert!(field.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn commit_replaces_state_and_clamps() {
        let mut field = ChemicalField::new(Species::Phosphorus, 2, 1);
        field.set(0, 0, 5.0);
        field.reset_next();
        field.set_next(1, 0, -3.0);
        assert_abs_diff_eq!(field.get(1, 0), 0.0);
        field.commit_next();
        assert_abs_diff_eq!(field.get(0, 0), 5.0);
        assert_abs_diff_eq!(field.get(1, 0), 0.0);
        assert!(field.within_bounds());
    }
}
