//! # Sparse matrices
//!
//! The constraint coefficients of a linear program are stored column by column: each variable
//! has its own collection of (row index, coefficient) tuples.
use std::fmt::{self, Display};

use num_traits::Zero;

use crate::data::linear_algebra::{is_sparse_tuple_vec, SparseTupleVec};

/// Sparse matrix with fixed dimensions, stored per column.
///
/// Each column is a `SparseTupleVec`: sorted, unique row indices and no stored zeros.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnMajor<F> {
    data: Vec<SparseTupleVec<F>>,
    nr_rows: usize,
    nr_columns: usize,
}

impl<F> ColumnMajor<F> {
    /// Create a new matrix from column data.
    ///
    /// # Arguments
    ///
    /// * `data`: One `SparseTupleVec` per column, row indices smaller than `nr_rows`.
    /// * `nr_rows`: Number of rows of the matrix.
    /// * `nr_columns`: Number of columns of the matrix, equal to `data.len()`.
    #[must_use]
    pub fn new(data: Vec<SparseTupleVec<F>>, nr_rows: usize, nr_columns: usize) -> Self
    where
        F: Zero,
    {
        debug_assert_eq!(data.len(), nr_columns);
        debug_assert!(data.iter().all(|column| is_sparse_tuple_vec(column)));
        debug_assert!(data.iter().flatten().all(|&(i, _)| i < nr_rows));

        Self { data, nr_rows, nr_columns }
    }

    /// Number of rows.
    #[must_use]
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// All nonzero values of column `j`, sorted by row index.
    #[must_use]
    pub fn column(&self, j: usize) -> &SparseTupleVec<F> {
        debug_assert!(j < self.nr_columns);

        &self.data[j]
    }

    /// Value at row `i`, column `j`.
    ///
    /// # Return value
    ///
    /// `None` if the value is zero (not stored).
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&F> {
        debug_assert!(i < self.nr_rows);

        let column = self.column(j);
        column.binary_search_by_key(&i, |&(ii, _)| ii)
            .ok()
            .map(|index| &column[index].1)
    }

    /// Number of stored values.
    #[must_use]
    pub fn nr_non_zeros(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    /// Create a row major copy of the matrix.
    ///
    /// # Return value
    ///
    /// For each row, a collection of (column index, reference to value) tuples sorted by column.
    #[must_use]
    pub fn to_row_major(&self) -> Vec<SparseTupleVec<&F>> {
        let mut rows = vec![Vec::new(); self.nr_rows];
        // Columns are visited in order, so each row ends up sorted.
        for (j, column) in self.data.iter().enumerate() {
            for (i, value) in column {
                rows[*i].push((j, value));
            }
        }

        rows
    }
}

impl<F: Display> Display for ColumnMajor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} x {} sparse matrix", self.nr_rows, self.nr_columns)?;
        for (i, row) in self.to_row_major().into_iter().enumerate() {
            write!(f, "{i}:")?;
            for (j, value) in row {
                write!(f, " ({j}, {value})")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::ColumnMajor;

    fn matrix() -> ColumnMajor<f64> {
        ColumnMajor::new(
            vec![
                vec![(0, 1_f64), (2, 3_f64)],
                vec![],
                vec![(1, -2_f64), (2, 0.5)],
            ],
            3,
            3,
        )
    }

    #[test]
    fn get() {
        let m = matrix();
        assert_eq!(m.get(0, 0), Some(&1_f64));
        assert_eq!(m.get(1, 0), None);
        assert_eq!(m.get(2, 2), Some(&0.5));
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.nr_non_zeros(), 4);
    }

    #[test]
    fn to_row_major() {
        let m = matrix();
        let rows = m.to_row_major();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![(0, &1_f64)]);
        assert_eq!(rows[1], vec![(2, &-2_f64)]);
        assert_eq!(rows[2], vec![(0, &3_f64), (2, &0.5)]);
    }

    #[test]
    fn display() {
        let m = ColumnMajor::new(vec![vec![(1, 4_f64)]], 2, 1);
        assert_eq!(m.to_string(), "2 x 1 sparse matrix\n0:\n1: (0, 4)\n");
    }
}
