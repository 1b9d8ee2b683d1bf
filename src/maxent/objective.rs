//! maxent::objective — stabilized free-energy objective.
//!
//! Purpose
//! -------
//! Evaluate the global maximum-entropy objective for an antisymmetric
//! coupling model over paired spin samples, in the numerically
//! stabilized form required by the crate's overflow policy, together
//! with its analytic gradient.
//!
//! Key behaviors
//! -------------
//! - Given compressed parameters `θ` and paired matrices (S, S1):
//!   build the antisymmetric coupling `A`, form the drift field
//!   `thS = A·S`, reduce to the per-sample odd energy
//!   `thf_r = Σ_i S1[i,r]·thS[i,r]`, and return
//!   `sig = (mean(thf) + m − ln(mean(exp(−thf + m)))) / N`
//!   with `m = min(thf)` subtracted before exponentiation and added
//!   back, so no raw exponential can overflow.
//! - The analytic gradient follows from the same reduction:
//!   `∂sig/∂θ_(j,k) = (1/N) Σ_r (1/T + p_r)(S1[j,r]S[k,r] − S1[k,r]S[j,r])`
//!   where `p_r` is the softmax of `−thf` over samples.
//!
//! Conventions
//! -----------
//! - [`MaxEntObjective`] is a stateless value type constructed fresh per
//!   call site; the objective has no mutable state and shares nothing
//!   between concurrent fits.
//! - Errors raised by the coupling layout checks surface through the
//!   optimizer error type via the crate's `From<EpError>` conversion.

use ndarray::{Array1, Array2, Axis};

use crate::estimators::samples::PairedSamples;
use crate::maxent::coupling::{compressed_len, expand_coupling};
use crate::optimization::{
    errors::{OptError, OptResult},
    penalized_optimizer::{Cost, Grad, Objective, Theta},
};

/// Stateless maximum-entropy objective over paired spin samples.
///
/// Implements [`Objective`] with `Data = PairedSamples`; maximizing it
/// (optionally ridge-penalized) fits the antisymmetric coupling matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxEntObjective;

impl MaxEntObjective {
    /// Per-sample odd energies `thf_r = Σ_i S1[i,r] (A·S)[i,r]`.
    fn odd_energies(theta: &Theta, data: &PairedSamples) -> OptResult<Array1<f64>> {
        let a = expand_coupling(theta)?;
        let th_s = a.dot(data.pre());
        Ok((data.post() * &th_s).sum_axis(Axis(0)))
    }
}

impl Objective for MaxEntObjective {
    type Data = PairedSamples;

    /// Stabilized free-energy estimate `sig`.
    ///
    /// `sig = (mean(thf) + m − ln(mean(exp(−thf + m)))) / N` with
    /// `m = min(thf)`; every exponent is non-positive, so the reduction
    /// cannot overflow.
    ///
    /// # Errors
    /// Propagates coupling-layout violations as `OptError`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let thf = Self::odd_energies(theta, data)?;
        let n = data.n_spins() as f64;
        let t = data.n_samples() as f64;

        let m = thf.fold(f64::INFINITY, |acc, &v| acc.min(v));
        let mean = thf.sum() / t;
        let mean_exp = thf.fold(0.0, |acc, &v| acc + (m - v).exp()) / t;
        Ok((mean + m - mean_exp.ln()) / n)
    }

    /// Reject parameter vectors that do not match the sample dimensions
    /// or contain non-finite entries.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        let expected = compressed_len(data.n_spins());
        if theta.len() != expected {
            return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::NonFiniteTheta { index, value });
            }
        }
        Ok(())
    }

    /// Analytic gradient of `sig` with respect to the compressed
    /// parameters.
    ///
    /// With `p_r = exp(−thf_r + m) / Σ_s exp(−thf_s + m)` (the softmax
    /// of `−thf`), the pair (j, k) component is
    /// `(1/N) Σ_r (1/T + p_r)(S1[j,r]S[k,r] − S1[k,r]S[j,r])`, assembled
    /// here as a weighted cross-moment matrix minus its transpose.
    ///
    /// # Errors
    /// Propagates coupling-layout violations as `OptError`.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let thf = Self::odd_energies(theta, data)?;
        let nn = data.n_spins();
        let n = nn as f64;
        let t = data.n_samples() as f64;

        let m = thf.fold(f64::INFINITY, |acc, &v| acc.min(v));
        let shifted = thf.mapv(|v| (m - v).exp());
        let denom = shifted.sum();
        let weights = Array1::from_iter(shifted.iter().map(|&w| w / denom + 1.0 / t));

        let weighted_post = data.post() * &weights;
        let cross: Array2<f64> = weighted_post.dot(&data.pre().t());

        let mut g = Array1::<f64>::zeros(compressed_len(nn));
        let mut idx = 0;
        for j in 0..nn {
            for k in (j + 1)..nn {
                g[idx] = (cross[[j, k]] - cross[[k, j]]) / n;
                idx += 1;
            }
        }
        Ok(g)
    }
}
