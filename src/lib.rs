//! Metacalibration shear bias estimation
//!
//! Measurement catalogs produced under artificially sheared realizations of
//! the same scene are reduced to a multiplicative bias (m) and an additive
//! bias (c) on the recovered shear:
//!  1. select well measured objects per realization ([`selection`]),
//!  2. estimate the shear response from the plus/minus realizations
//!     ([`response`]),
//!  3. calibrate the mean shear of the nominal realization and compare it to
//!     the injected true shear ([`bias`]),
//!  4. write the estimates to a single-record result file ([`output`]).

pub mod bias;
pub mod catalog;
pub mod error;
pub mod output;
pub mod response;
pub mod selection;
pub mod stats;

pub use bias::{BiasEstimate, BiasMode};
pub use catalog::{Catalog, CatalogReader, Measurement, ShearType};
pub use error::Error;

/// Selection, response estimation and bias calculation over a loaded catalog
///
/// Prints the mean signal-to-noise of the selected nominal subset, the mean
/// PSF signal-to-noise and the shear response along the way.
pub fn estimate(
    catalog: &Catalog,
    config: &ShearConfig,
    mode: BiasMode,
) -> Result<BiasEstimate, Error> {
    let w = selection::select(&catalog.data, ShearType::Noshear, config);
    let w_1p = selection::select(&catalog.data, ShearType::OnePlus, config);
    let w_1m = selection::select(&catalog.data, ShearType::OneMinus, config);

    let r11 = response::response(&catalog.data, &w_1p, &w_1m, config.shear_step)?;
    let (mean_g, stderr_g) = bias::mean_shear(&catalog.data, &w)?;

    let s2n: Vec<f64> = w.iter().map(|&i| catalog.data[i].s2n).collect();
    if let Some(s2n) = stats::mean(&s2n) {
        println!("S/N: {:.6e}", s2n);
    }
    let psf_s2n: Vec<f64> = catalog.psf_data.iter().map(|p| p.psf_s2n).collect();
    if let Some(psf_s2n) = stats::mean(&psf_s2n) {
        println!("PSF S/N: {:.6e}", psf_s2n);
    }
    println!("R11: {:.6}", r11);

    Ok(bias::compute_bias(mean_g, stderr_g, r11, config, mode))
}

/// Analysis constants, fixed per campaign
///
/// `shear_step` is the magnitude of the single-sided metacalibration
/// perturbation; the response denominator spans both directions and is
/// therefore `2 * shear_step`.
#[derive(Debug, Clone)]
pub struct ShearConfig {
    /// True shear injected along the first component
    pub shear_true: f64,
    /// Single-sided applied shear step
    pub shear_step: f64,
    /// Minimum signal-to-noise of a kept measurement
    pub s2n_min: f64,
    /// Minimum object-to-PSF size ratio of a kept measurement
    pub t_ratio_min: f64,
}
impl Default for ShearConfig {
    fn default() -> Self {
        Self {
            shear_true: 0.02,
            shear_step: 0.01,
            s2n_min: 5e6,
            // raw moments measure the post-PSF size, hence a cut above unity
            // rather than the ~0.5 used with pre-PSF model fitters
            t_ratio_min: 1.2,
        }
    }
}
