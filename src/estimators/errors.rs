//! estimators::errors — error surface of the estimation pipeline.
//!
//! Purpose
//! -------
//! Define the error enum and result alias shared by the per-spin
//! estimation pipeline: sample validation, correlation computation, the
//! regularized linear solve, and the Newton estimators.
//!
//! Conventions
//! -----------
//! - Shape and index violations are programmer errors: they are surfaced
//!   immediately through these variants and never recovered or silently
//!   broadcast.
//! - Numerical ill-conditioning is **not** represented here — the solver
//!   resolves it internally through regularization and a least-squares
//!   solve, so no `SingularSystem`-style variant exists.
//! - Messages are phrased in terms of domain constraints (spin counts,
//!   sample shapes, parameter lengths) rather than implementation
//!   details.
//!
//! Downstream usage
//! ----------------
//! - All public estimator entry points return [`EpResult<T>`].
//! - The optimization layer converts the subset of variants that can
//!   arise inside objectives into its own `OptError` via `From`.

/// Result alias for the estimation pipeline.
pub type EpResult<T> = Result<T, EpError>;

/// Error conditions of the per-spin estimation pipeline.
///
/// Variants
/// --------
/// - `TooFewSpins`: the sample matrix has fewer than two rows; removing
///   the reference spin would leave an empty system.
/// - `NoSamples`: the sample matrix has zero columns.
/// - `NonFiniteSample`: a sample entry is NaN or infinite.
/// - `SampleShapeMismatch`: paired sample matrices disagree in shape.
/// - `SpinIndexOutOfRange`: the reference index is not a valid row.
/// - `ThetaLengthMismatch`: a tilting-parameter vector does not have the
///   required length (N−1 per spin, or n(n−1)/2 compressed).
/// - `DaLengthMismatch`: a correlation vector does not have length N.
/// - `CouplingShapeMismatch`: an interaction matrix is not N×N.
/// - `CurvatureShapeMismatch`: a curvature matrix handed to the linear
///   solver is not N×N.
/// - `CompressedLengthInvalid`: a compressed coupling vector's length is
///   not of the form n(n−1)/2 for any n ≥ 2.
#[derive(Debug, Clone, PartialEq)]
pub enum EpError {
    //------ Sample validation ------
    TooFewSpins { n_spins: usize },
    NoSamples,
    NonFiniteSample { row: usize, col: usize, value: f64 },
    SampleShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    //------ Contract violations ------
    SpinIndexOutOfRange { index: usize, n_spins: usize },
    ThetaLengthMismatch { expected: usize, actual: usize },
    DaLengthMismatch { expected: usize, actual: usize },
    CouplingShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    CurvatureShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    CompressedLengthInvalid { len: usize },
}

impl std::error::Error for EpError {}

impl std::fmt::Display for EpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpError::TooFewSpins { n_spins } => {
                write!(f, "Sample matrix has {n_spins} spin(s); at least 2 are required")
            }
            EpError::NoSamples => {
                write!(f, "Sample matrix has no columns; at least one sample is required")
            }
            EpError::NonFiniteSample { row, col, value } => {
                write!(f, "Non-finite sample entry at ({row}, {col}): {value}")
            }
            EpError::SampleShapeMismatch { expected, actual } => {
                write!(f, "Sample shape mismatch: expected {expected:?}, actual {actual:?}")
            }
            EpError::SpinIndexOutOfRange { index, n_spins } => {
                write!(f, "Spin index {index} out of range for {n_spins} spins")
            }
            EpError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            EpError::DaLengthMismatch { expected, actual } => {
                write!(f, "Correlation vector length mismatch: expected {expected}, actual {actual}")
            }
            EpError::CouplingShapeMismatch { expected, actual } => {
                write!(f, "Coupling matrix shape mismatch: expected {expected:?}, actual {actual:?}")
            }
            EpError::CurvatureShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Curvature matrix shape mismatch: expected {expected:?}, actual {actual:?}"
                )
            }
            EpError::CompressedLengthInvalid { len } => {
                write!(
                    f,
                    "Compressed coupling length {len} is not n(n-1)/2 for any spin count n >= 2"
                )
            }
        }
    }
}
