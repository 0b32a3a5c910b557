//! Terminal output formatting with colors.
//!
//! Tables are laid out in the order of the marginal pmfs handed in, not in
//! the table's own order; each axis is annotated with the cumulative
//! probability interval of its category.

use std::fmt::Display;

use colored::Colorize;
use nalgebra::Scalar;

use crate::distribution::{JointTable, MarginalPmf};
use crate::error::Result;
use crate::result::SignificanceResult;
use crate::types::Category;

/// Format any joint table as a text grid ordered by `pmf1` (rows) and `pmf2` (columns).
///
/// # Errors
///
/// [`CopulaError::InvalidOrdering`](crate::CopulaError::InvalidOrdering) if a
/// pmf's support differs from the table's categories.
pub fn format_table<A, B, T>(
    pmf1: &MarginalPmf<A>,
    pmf2: &MarginalPmf<B>,
    table: &JointTable<A, B, T>,
) -> Result<String>
where
    A: Category + Display,
    B: Category + Display,
    T: Scalar + Display,
{
    let table = table.reindex(&pmf1.values(), &pmf2.values())?;
    let grid = Grid::new(pmf1, pmf2, |i, j| format!("{:.2}", table.at(i, j)));
    Ok(grid.render(|_, _, text| text.normal().to_string()))
}

/// Format significance bands, coloured by tail and extremity, with a legend.
///
/// Low-tail bands run from blue (most extreme) to cyan, high-tail bands from
/// yellow to red (most extreme), and the non-significant band is grey.
pub fn format_significance<A, B>(
    pmf1: &MarginalPmf<A>,
    pmf2: &MarginalPmf<B>,
    result: &SignificanceResult<A, B>,
) -> Result<String>
where
    A: Category + Display,
    B: Category + Display,
{
    let k = result.n_levels();
    let table = result
        .significance
        .reindex(&pmf1.values(), &pmf2.values())?;
    let grid = Grid::new(pmf1, pmf2, |i, j| format!("{:+}", table.at(i, j)));

    let mut output = grid.render(|i, j, text| {
        let (r, g, b) = band_color(*table.at(i, j), k);
        text.truecolor(r, g, b).bold().to_string()
    });

    output.push('\n');
    output.push_str("  significance level\n");
    for (&label, &level) in result.labels.iter().zip(&result.quantile_levels).rev() {
        let (r, g, b) = band_color(label, k);
        let level = if label == 0 {
            "not significant".to_string()
        } else {
            format!("{level}")
        };
        output.push_str(&format!(
            "    {} {:>+3}  {}\n",
            "\u{25A0}".truecolor(r, g, b),
            label,
            level
        ));
    }
    Ok(output)
}

/// RGB colour of a band label when there are `k` bands per tail.
pub fn band_color(label: i32, k: usize) -> (u8, u8, u8) {
    let ramp = |idx: usize| -> u8 {
        if k <= 1 {
            0
        } else {
            (255.0 * idx as f64 / (k - 1) as f64).round() as u8
        }
    };
    let magnitude = label.unsigned_abs() as usize;
    if label == 0 || magnitude > k {
        (128, 128, 128)
    } else if label < 0 {
        (0, ramp(k - magnitude), 255)
    } else {
        (255, ramp(k - magnitude), 0)
    }
}

/// Cell texts plus axis annotations, before colouring.
struct Grid {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    column_intervals: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl Grid {
    fn new<A, B, F>(pmf1: &MarginalPmf<A>, pmf2: &MarginalPmf<B>, mut cell: F) -> Self
    where
        A: Category + Display,
        B: Category + Display,
        F: FnMut(usize, usize) -> String,
    {
        let row_intervals = intervals(&pmf1.cumulative());
        let row_labels = pmf1
            .iter()
            .zip(row_intervals)
            .map(|((value, _), interval)| format!("{value} {interval}"))
            .collect();
        let column_labels = pmf2.iter().map(|(value, _)| value.to_string()).collect();
        let column_intervals = intervals(&pmf2.cumulative());
        let cells = (0..pmf1.len())
            .map(|i| (0..pmf2.len()).map(|j| cell(i, j)).collect())
            .collect();
        Self {
            row_labels,
            column_labels,
            column_intervals,
            cells,
        }
    }

    fn render<F>(&self, mut paint: F) -> String
    where
        F: FnMut(usize, usize, String) -> String,
    {
        let label_width = self.row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let width = self
            .column_labels
            .iter()
            .chain(&self.column_intervals)
            .chain(self.cells.iter().flatten())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for header in [&self.column_labels, &self.column_intervals] {
            output.push_str(&" ".repeat(label_width));
            for text in header {
                output.push_str(&format!(" | {text:^width$}"));
            }
            output.push('\n');
        }
        let rule_len = label_width + self.column_labels.len() * (width + 3);
        output.push_str(&"\u{2500}".repeat(rule_len));
        output.push('\n');

        for (i, (label, row)) in self.row_labels.iter().zip(&self.cells).enumerate() {
            output.push_str(&format!("{label:<label_width$}"));
            for (j, text) in row.iter().enumerate() {
                output.push_str(" | ");
                output.push_str(&paint(i, j, format!("{text:^width$}")));
            }
            output.push('\n');
        }
        output
    }
}

/// `[lo, hi)` cumulative interval per category.
fn intervals(cumulative: &[f64]) -> Vec<String> {
    let mut lower = 0.0;
    cumulative
        .iter()
        .map(|&upper| {
            let text = format!("[{lower:.2}, {upper:.2})");
            lower = upper;
            text
        })
        .collect()
}
