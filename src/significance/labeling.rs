//! Assigning significance bands to observed counts.
//!
//! Each cell independently gets the most extreme band whose threshold it
//! satisfies, rather than relying on the order in which bands are tested.

use nalgebra::DMatrix;

use crate::distribution::{JointCountTable, JointProbabilityTable, SignificanceTable};
use crate::error::Result;
use crate::types::Category;

/// Band label for one observed count.
///
/// `high_thresholds[i - 1]` is the threshold of band `i` and
/// `low_thresholds[i - 1]` the threshold of band `-i`, both loosest first.
/// The high band is the largest `i` with `observed >= high_thresholds[i - 1]`
/// and the low band the largest `i` with `observed <= low_thresholds[i - 1]`.
///
/// If both tails fire, which needs degenerate thresholds, the high tail wins.
/// A count that satisfies neither gets `0`.
pub fn label_cell(observed: f64, low_thresholds: &[f64], high_thresholds: &[f64]) -> i32 {
    let high = high_thresholds
        .iter()
        .rposition(|&t| observed >= t)
        .map_or(0, |i| i as i32 + 1);
    if high > 0 {
        return high;
    }
    low_thresholds
        .iter()
        .rposition(|&t| observed <= t)
        .map_or(0, |i| -(i as i32 + 1))
}

/// Label every cell of `observed` against per-cell threshold tables.
///
/// Threshold tables are matched to `observed` by label; they must cover the
/// same categories.
pub fn label_table<A: Category, B: Category>(
    observed: &JointCountTable<A, B>,
    low_thresholds: &[JointProbabilityTable<A, B>],
    high_thresholds: &[JointProbabilityTable<A, B>],
) -> Result<SignificanceTable<A, B>> {
    let align = |tables: &[JointProbabilityTable<A, B>]| -> Result<Vec<JointProbabilityTable<A, B>>> {
        tables
            .iter()
            .map(|t| t.reindex(observed.rows(), observed.columns()))
            .collect()
    };
    let low = align(low_thresholds)?;
    let high = align(high_thresholds)?;

    let (n_rows, n_cols) = observed.shape();
    let mut low_cell = Vec::with_capacity(low.len());
    let mut high_cell = Vec::with_capacity(high.len());
    let values = DMatrix::from_fn(n_rows, n_cols, |i, j| {
        low_cell.clear();
        low_cell.extend(low.iter().map(|t| *t.at(i, j)));
        high_cell.clear();
        high_cell.extend(high.iter().map(|t| *t.at(i, j)));
        label_cell(*observed.at(i, j) as f64, &low_cell, &high_cell)
    });

    Ok(SignificanceTable::from_unique_parts(
        observed.rows().to_vec(),
        observed.columns().to_vec(),
        values,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Thresholds for k = 2: low bands (-1, -2) at (3, 1), high bands (1, 2) at (8, 10)
    const LOW: [f64; 2] = [3.0, 1.0];
    const HIGH: [f64; 2] = [8.0, 10.0];

    #[test]
    fn test_inside_band_is_zero() {
        for observed in [4.0, 5.0, 7.0, 7.9] {
            assert_eq!(label_cell(observed, &LOW, &HIGH), 0, "observed {observed}");
        }
    }

    #[test]
    fn test_high_tail_picks_most_extreme() {
        assert_eq!(label_cell(8.0, &LOW, &HIGH), 1);
        assert_eq!(label_cell(9.5, &LOW, &HIGH), 1);
        assert_eq!(label_cell(10.0, &LOW, &HIGH), 2);
        assert_eq!(label_cell(50.0, &LOW, &HIGH), 2);
    }

    #[test]
    fn test_low_tail_picks_most_extreme() {
        assert_eq!(label_cell(3.0, &LOW, &HIGH), -1);
        assert_eq!(label_cell(2.0, &LOW, &HIGH), -1);
        assert_eq!(label_cell(1.0, &LOW, &HIGH), -2);
        assert_eq!(label_cell(0.0, &LOW, &HIGH), -2);
    }

    #[test]
    fn test_overlapping_tails_prefer_high() {
        // Degenerate ensemble: every resample had the same count
        let low = [2.0, 2.0];
        let high = [2.0, 2.0];
        assert_eq!(label_cell(2.0, &low, &high), 2);
        assert_eq!(label_cell(1.0, &low, &high), -2);
    }

    #[test]
    fn test_label_table_matches_cells_by_label() {
        let observed = JointCountTable::new(
            vec!['A', 'B'],
            vec![1, 2],
            DMatrix::from_row_slice(2, 2, &[12, 5, 0, 9]),
        )
        .unwrap();
        let flat = |v: f64| {
            JointProbabilityTable::new(vec!['B', 'A'], vec![2, 1], DMatrix::from_element(2, 2, v))
                .unwrap()
        };

        let table = label_table(&observed, &[flat(3.0), flat(1.0)], &[flat(8.0), flat(10.0)]).unwrap();

        assert_eq!(table.get(&'A', &1), Some(&2));
        assert_eq!(table.get(&'A', &2), Some(&0));
        assert_eq!(table.get(&'B', &1), Some(&-2));
        assert_eq!(table.get(&'B', &2), Some(&1));
    }
}
