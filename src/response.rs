//! Finite-difference shear response

use crate::{
    catalog::{Measurement, ShearType},
    stats,
};

#[derive(thiserror::Error, Debug)]
pub enum ResponseError {
    #[error("No qualifying `{0}` measurement to estimate the response from")]
    EmptySubset(ShearType),
    #[error("Degenerate shear response: {0}")]
    Degenerate(f64),
}

/// Shear response from the plus/minus sheared realizations
///
/// `R = (<g1>_plus - <g1>_minus) / (2 * shear_step)` where `shear_step` is
/// the single-sided perturbation, so the denominator spans the full plus to
/// minus shear interval. The single scalar is applied to both shear
/// components (isotropic-response approximation).
///
/// A zero or non-finite response is rejected here, before any caller divides
/// by it.
pub fn response(
    data: &[Measurement],
    idx_plus: &[usize],
    idx_minus: &[usize],
    shear_step: f64,
) -> Result<f64, ResponseError> {
    let g1_plus = mean_g1(data, idx_plus)
        .ok_or(ResponseError::EmptySubset(ShearType::OnePlus))?;
    let g1_minus = mean_g1(data, idx_minus)
        .ok_or(ResponseError::EmptySubset(ShearType::OneMinus))?;
    let r = (g1_plus - g1_minus) / (2. * shear_step);
    if r == 0. || !r.is_finite() {
        return Err(ResponseError::Degenerate(r));
    }
    Ok(r)
}

fn mean_g1(data: &[Measurement], idx: &[usize]) -> Option<f64> {
    let g1: Vec<f64> = idx.iter().map(|&i| data[i].g[0]).collect();
    stats::mean(&g1)
}
