//! # Linear algebra primitives
//!
//! Sparse storage of the coefficients read from a linear program file.
pub mod matrix;

/// A single value in a sparse data structure, paired with its index.
pub type SparseTuple<F> = (usize, F);

/// A sparse vector, or a column or row of a sparse matrix.
///
/// Tuples are sorted by their index, indices are unique and zero values are not stored.
pub type SparseTupleVec<F> = Vec<SparseTuple<F>>;

/// Whether a collection of sparse tuples satisfies the invariants of a `SparseTupleVec`.
///
/// Meant to be used in debug assertions only.
pub(crate) fn is_sparse_tuple_vec<F: num_traits::Zero>(tuples: &[SparseTuple<F>]) -> bool {
    tuples.windows(2).all(|w| w[0].0 < w[1].0) && tuples.iter().all(|(_, v)| !v.is_zero())
}
