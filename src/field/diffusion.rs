use crate::field::chemical_field::ChemicalField;
use crate::field::stratification::Stratification;

/// One explicit diffusion pass over `field`.
///
/// Each cell moves toward the mean of its in-bounds 4-neighbours at the band rate of
/// its row. All reads come from the committed state and all writes go to the `next`
/// buffer, so the result is independent of traversal order. Returns the total
/// absolute change, which reporting uses as a measure of activity.
pub fn diffuse(field: &mut ChemicalField, strat: &Stratification) -> f64 {
    let (cols, rows) = (field.cols, field.rows);
    field.reset_next();
    let mut activity = 0.0;

    for row in 0..rows {
        let rate = strat.diffusion_rate_at(row);
        if rate <= 0.0 {
            continue;
        }
        for col in 0..cols {
            let mut sum = 0.0;
            let mut count = 0usize;
            if row > 0 {
                sum += field.get(col, row - 1);
                count += 1;
            }
            if row + 1 < rows {
                sum += field.get(col, row + 1);
                count += 1;
            }
            if col > 0 {
                sum += field.get(col - 1, row);
                count += 1;
            }
            if col + 1 < cols {
                sum += field.get(col + 1, row);
                count += 1;
            }
            if count == 0 {
                continue;
            }

            let current = field.get(col, row);
            let delta = rate * (sum / count as f64 - current);
            field.set_next(col, row, current + delta);
            activity += delta.abs();
        }
    }

    field.commit_next();
    activity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffusionConfig, GridConfig};
    use crate::field::species::Species;
    use approx::assert_abs_diff_eq;
    use more_asserts::{assert_gt, assert_lt};

    fn setup(cols: usize, rows: usize) -> (ChemicalField, Stratification) {
        let grid = GridConfig {
            cols,
            rows,
            ..GridConfig::default()
        };
        let strat = Stratification::new(&grid, &DiffusionConfig::default()).unwrap();
        (ChemicalField::new(Species::H2, cols, rows), strat)
    }

    #[test]
    fn spike_spreads_to_neighbours() {
        let (mut field, strat) = setup(20, 20);
        let row = 10; // water band
        field.set(10, row, 100.0);
        diffuse(&mut field, &strat);

        let rate = strat.diffusion_rate_at(row);
        assert_abs_diff_eq!(field.get(10, row), 100.0 - rate * 100.0, epsilon = 1e-9);
        assert_gt!(field.get(9, row), 0.0);
        assert_gt!(field.get(10, row - 1), 0.0);
        assert_abs_diff_eq!(field.get(12, row), 0.0);
    }

    #[test]
    fn update_is_order_independent() {
        // A uniform ramp along columns must stay symmetric around the centre column.
        let (mut field, strat) = setup(9, 20);
        for col in 0..9 {
            field.set(col, 10, if col == 4 { 50.0 } else { 0.0 });
        }
        diffuse(&mut field, &strat);
        assert_abs_diff_eq!(field.get(3, 10), field.get(5, 10), epsilon = 1e-12);
        assert_abs_diff_eq!(field.get(2, 10), field.get(6, 10), epsilon = 1e-12);
    }

    #[test]
    fn sediment_moves_slower_than_water() {
        let (mut field, strat) = setup(10, 40);
        let water_row = strat.atmosphere_row + 2;
        let sediment_row = strat.sediment_row + 1;
        field.set(5, water_row, 100.0);
        field.set(5, sediment_row, 100.0);
        diffuse(&mut field, &strat);
        assert_lt!(field.get(5, water_row), field.get(5, sediment_row));
    }

    #[test]
    fn values_stay_within_cap() {
        let (mut field, strat) = setup(10, 20);
        for col in 0..10 {
            field.set(col, 0, Species::H2.cap());
        }
        for _ in 0..50 {
            diffuse(&mut field, &strat);
        }
        assert!(field.within_bounds());
    }
}
