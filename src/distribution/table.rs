//! Dense two-dimensional tables indexed by the categories of two variables.
//!
//! Every table covers the full Cartesian product of its row and column
//! categories, so elementwise operations are defined at every cell. Cells are
//! stored in an `nalgebra` matrix; the category labels map to matrix indices
//! through hash lookups.

use std::collections::{HashMap, HashSet};
use std::ops::Add;

use nalgebra::{DMatrix, Scalar};
use num_traits::Zero;
use serde::ser::{Serialize, Serializer};

use crate::error::{CopulaError, Result};
use crate::types::{Axis, Category};

/// A dense table with one cell per (row category, column category) pair.
#[derive(Debug, Clone)]
pub struct JointTable<A, B, T: Scalar> {
    rows: Vec<A>,
    columns: Vec<B>,
    row_lookup: HashMap<A, usize>,
    column_lookup: HashMap<B, usize>,
    values: DMatrix<T>,
}

/// Joint occurrence counts.
pub type JointCountTable<A, B> = JointTable<A, B, u64>;

/// Joint probabilities, frequencies, or ratios of them.
pub type JointProbabilityTable<A, B> = JointTable<A, B, f64>;

/// Integer significance band per cell.
pub type SignificanceTable<A, B> = JointTable<A, B, i32>;

impl<A: Category, B: Category, T: Scalar> JointTable<A, B, T> {
    /// Build a table from labels and a `rows x columns` value matrix.
    ///
    /// Fails if a label repeats on either axis or if the matrix shape does not
    /// match the labels.
    pub fn new(rows: Vec<A>, columns: Vec<B>, values: DMatrix<T>) -> Result<Self> {
        let expected = (rows.len(), columns.len());
        if values.shape() != expected {
            return Err(CopulaError::ShapeMismatch {
                expected,
                found: values.shape(),
            });
        }
        let row_lookup = build_lookup(&rows)?;
        let column_lookup = build_lookup(&columns)?;
        Ok(Self {
            rows,
            columns,
            row_lookup,
            column_lookup,
            values,
        })
    }

    /// Build a table whose labels are already known to be unique.
    pub(crate) fn from_unique_parts(rows: Vec<A>, columns: Vec<B>, values: DMatrix<T>) -> Self {
        debug_assert_eq!(values.shape(), (rows.len(), columns.len()));
        let row_lookup = rows.iter().cloned().enumerate().map(|(i, v)| (v, i)).collect();
        let column_lookup = columns.iter().cloned().enumerate().map(|(j, v)| (v, j)).collect();
        Self {
            rows,
            columns,
            row_lookup,
            column_lookup,
            values,
        }
    }

    /// Build a table by evaluating `f` at every cell.
    pub fn from_fn<F>(rows: Vec<A>, columns: Vec<B>, mut f: F) -> Result<Self>
    where
        F: FnMut(&A, &B) -> T,
    {
        let values = DMatrix::from_fn(rows.len(), columns.len(), |i, j| f(&rows[i], &columns[j]));
        Self::new(rows, columns, values)
    }

    /// Row categories in table order.
    pub fn rows(&self) -> &[A] {
        &self.rows
    }

    /// Column categories in table order.
    pub fn columns(&self) -> &[B] {
        &self.columns
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// The underlying value matrix, laid out in table order.
    pub fn values(&self) -> &DMatrix<T> {
        &self.values
    }

    /// Position of a row category.
    pub fn row_index(&self, row: &A) -> Option<usize> {
        self.row_lookup.get(row).copied()
    }

    /// Position of a column category.
    pub fn column_index(&self, column: &B) -> Option<usize> {
        self.column_lookup.get(column).copied()
    }

    /// Value at `(row, column)`, or `None` if either category is not in the table.
    pub fn get(&self, row: &A, column: &B) -> Option<&T> {
        let i = self.row_index(row)?;
        let j = self.column_index(column)?;
        Some(&self.values[(i, j)])
    }

    /// Value at matrix position `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn at(&self, i: usize, j: usize) -> &T {
        &self.values[(i, j)]
    }

    /// Iterate `(row, column, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &B, &T)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(i, a)| {
            self.columns
                .iter()
                .enumerate()
                .map(move |(j, b)| (a, b, &self.values[(i, j)]))
        })
    }

    /// Same cells, rows and columns laid out in the given orders.
    ///
    /// Each order must be a permutation of the corresponding axis; anything
    /// else fails with [`CopulaError::InvalidOrdering`] and nothing is reordered.
    pub fn reindex(&self, row_order: &[A], column_order: &[B]) -> Result<Self> {
        let row_positions = permutation_positions(&self.row_lookup, row_order, Axis::Rows)?;
        let column_positions =
            permutation_positions(&self.column_lookup, column_order, Axis::Columns)?;
        let values = DMatrix::from_fn(row_positions.len(), column_positions.len(), |i, j| {
            self.values[(row_positions[i], column_positions[j])].clone()
        });
        Ok(Self::from_unique_parts(
            row_order.to_vec(),
            column_order.to_vec(),
            values,
        ))
    }

    /// Apply `f` to every cell, keeping the labels.
    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, f: F) -> JointTable<A, B, U> {
        JointTable {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            row_lookup: self.row_lookup.clone(),
            column_lookup: self.column_lookup.clone(),
            values: self.values.map(f),
        }
    }

    /// Combine two tables cell by cell, matching cells by label.
    ///
    /// `other` must cover exactly the same categories; its layout may differ.
    pub fn zip_with<U, V, F>(&self, other: &JointTable<A, B, U>, f: F) -> Result<JointTable<A, B, V>>
    where
        U: Scalar,
        V: Scalar,
        F: FnMut(T, U) -> V,
    {
        let aligned = other.reindex(&self.rows, &self.columns)?;
        Ok(JointTable {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            row_lookup: self.row_lookup.clone(),
            column_lookup: self.column_lookup.clone(),
            values: self.values.zip_map(&aligned.values, f),
        })
    }
}

impl<A: Category, B: Category, T: Scalar + Zero + Add<Output = T>> JointTable<A, B, T> {
    /// Table of zeros over the given categories.
    pub fn zeros(rows: Vec<A>, columns: Vec<B>) -> Result<Self> {
        let values = DMatrix::from_element(rows.len(), columns.len(), T::zero());
        Self::new(rows, columns, values)
    }

    /// Sum of all cells.
    pub fn sum(&self) -> T {
        self.values
            .iter()
            .cloned()
            .fold(T::zero(), |acc, value| acc + value)
    }
}

impl<A: Category, B: Category, T: Scalar> PartialEq for JointTable<A, B, T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns && self.values == other.values
    }
}

impl<A, B, T> Serialize for JointTable<A, B, T>
where
    A: Serialize,
    B: Serialize,
    T: Scalar + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Repr<'a, A, B, T> {
            rows: &'a [A],
            columns: &'a [B],
            values: Vec<Vec<&'a T>>,
        }

        let values = (0..self.values.nrows())
            .map(|i| (0..self.values.ncols()).map(|j| &self.values[(i, j)]).collect())
            .collect();
        Repr {
            rows: &self.rows,
            columns: &self.columns,
            values,
        }
        .serialize(serializer)
    }
}

fn build_lookup<T: Category>(labels: &[T]) -> Result<HashMap<T, usize>> {
    let mut lookup = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if lookup.insert(label.clone(), i).is_some() {
            return Err(CopulaError::DuplicateValue(format!("{label:?}")));
        }
    }
    Ok(lookup)
}

/// Map each value of `order` to its current position, requiring a permutation.
pub(crate) fn permutation_positions<T: Category>(
    lookup: &HashMap<T, usize>,
    order: &[T],
    axis: Axis,
) -> Result<Vec<usize>> {
    if order.len() != lookup.len() {
        return Err(CopulaError::InvalidOrdering {
            axis,
            reason: format!(
                "expected {} distinct values, got {}",
                lookup.len(),
                order.len()
            ),
        });
    }

    let mut seen = HashSet::with_capacity(order.len());
    order
        .iter()
        .map(|value| {
            if !seen.insert(value) {
                return Err(CopulaError::InvalidOrdering {
                    axis,
                    reason: format!("value {value:?} appears more than once"),
                });
            }
            lookup
                .get(value)
                .copied()
                .ok_or_else(|| CopulaError::InvalidOrdering {
                    axis,
                    reason: format!("value {value:?} was not observed"),
                })
        })
        .collect()
}
