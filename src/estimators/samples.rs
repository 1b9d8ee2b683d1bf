//! estimators::samples — validated spin-flip sample containers.
//!
//! Purpose
//! -------
//! Wrap the raw (N, T) sample matrices behind constructors that enforce
//! the pipeline's input invariants once, so every estimator downstream
//! can assume a well-formed matrix: at least two spins, at least one
//! sample, and finite entries throughout.
//!
//! Key behaviors
//! -------------
//! - [`SpinSamples::new`] validates a single flip-event matrix.
//! - [`PairedSamples::new`] validates a pre/post matrix pair and their
//!   shape equality for the maximum-entropy fit.
//! - Accessors expose dimensions and immutable views; the matrices are
//!   never mutated after construction, and row removal always produces
//!   new arrays in the slicing utilities.
//!
//! Conventions
//! -----------
//! - Rows index spins, columns index independent flip-event samples.
//! - An entry is semantically the signed state of a spin at a sample, or
//!   the sign of the reference spin's flip with absence encoded as 0;
//!   the containers accept any finite reals and leave the encoding to
//!   the caller.
//! - All data is `f64`; mixed precision never arises because the crate
//!   is `f64` end to end.

use ndarray::Array2;

use crate::estimators::errors::{EpError, EpResult};

/// A validated (N, T) matrix of spin-flip samples.
///
/// Invariants (enforced at construction):
/// - `n_spins() >= 2` — removing the reference spin must leave at least
///   one row.
/// - `n_samples() >= 1`.
/// - Every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSamples {
    matrix: Array2<f64>,
}

impl SpinSamples {
    /// Wrap and validate a sample matrix.
    ///
    /// # Errors
    /// - [`EpError::TooFewSpins`] when the matrix has fewer than 2 rows.
    /// - [`EpError::NoSamples`] when the matrix has no columns.
    /// - [`EpError::NonFiniteSample`] for the first NaN/±∞ entry found.
    pub fn new(matrix: Array2<f64>) -> EpResult<Self> {
        validate_matrix(&matrix)?;
        Ok(Self { matrix })
    }

    /// Number of spins N (rows).
    pub fn n_spins(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of samples T (columns).
    pub fn n_samples(&self) -> usize {
        self.matrix.ncols()
    }

    /// Immutable view of the underlying matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }
}

/// A validated pair of same-shape sample matrices for the maximum-entropy
/// fit: the pre-transition states and their post-transition counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSamples {
    pre: Array2<f64>,
    post: Array2<f64>,
}

impl PairedSamples {
    /// Wrap and validate a matrix pair.
    ///
    /// # Errors
    /// - Any error from the per-matrix validation (spin count, sample
    ///   count, finiteness).
    /// - [`EpError::SampleShapeMismatch`] when the shapes disagree.
    pub fn new(pre: Array2<f64>, post: Array2<f64>) -> EpResult<Self> {
        validate_matrix(&pre)?;
        validate_matrix(&post)?;
        if pre.dim() != post.dim() {
            return Err(EpError::SampleShapeMismatch {
                expected: pre.dim(),
                actual: post.dim(),
            });
        }
        Ok(Self { pre, post })
    }

    /// Number of spins N (rows).
    pub fn n_spins(&self) -> usize {
        self.pre.nrows()
    }

    /// Number of samples T (columns).
    pub fn n_samples(&self) -> usize {
        self.pre.ncols()
    }

    /// Pre-transition sample matrix.
    pub fn pre(&self) -> &Array2<f64> {
        &self.pre
    }

    /// Post-transition sample matrix.
    pub fn post(&self) -> &Array2<f64> {
        &self.post
    }
}

fn validate_matrix(matrix: &Array2<f64>) -> EpResult<()> {
    if matrix.nrows() < 2 {
        return Err(EpError::TooFewSpins { n_spins: matrix.nrows() });
    }
    if matrix.ncols() == 0 {
        return Err(EpError::NoSamples);
    }
    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() {
            return Err(EpError::NonFiniteSample { row, col, value });
        }
    }
    Ok(())
}
