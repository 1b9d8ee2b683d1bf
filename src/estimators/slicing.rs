//! estimators::slicing — reference-index removal utilities.
//!
//! The estimation pipeline repeatedly strips the reference spin from
//! vectors and matrices before solving or taking dot products. These
//! helpers implement the crate's "always remove, never zero" convention:
//! self-correlation entries are carried through the correlation
//! functions untouched and dropped here, immediately before use.
//!
//! All helpers allocate fresh arrays; the inputs are never mutated.

use ndarray::{Array1, Array2, Axis};

/// Return `a` with the entry at `index` removed.
///
/// Callers guarantee `index < a.len()`; out-of-range indices are a
/// programmer error and panic via the underlying indexing.
pub fn remove_entry(a: &Array1<f64>, index: usize) -> Array1<f64> {
    Array1::from_iter(
        a.iter().enumerate().filter(|(j, _)| *j != index).map(|(_, &v)| v),
    )
}

/// Return `m` with row `index` removed.
pub fn drop_row(m: &Array2<f64>, index: usize) -> Array2<f64> {
    let keep: Vec<usize> = (0..m.nrows()).filter(|&j| j != index).collect();
    m.select(Axis(0), &keep)
}

/// Return `m` with row `index` and column `index` removed.
pub fn drop_row_col(m: &Array2<f64>, index: usize) -> Array2<f64> {
    let keep_rows: Vec<usize> = (0..m.nrows()).filter(|&j| j != index).collect();
    let keep_cols: Vec<usize> = (0..m.ncols()).filter(|&j| j != index).collect();
    m.select(Axis(0), &keep_rows).select(Axis(1), &keep_cols)
}
