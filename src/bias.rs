//! Calibrated shear bias estimates

use crate::{
    catalog::{Measurement, ShearType},
    stats, ShearConfig,
};

/// Interval half-width in units of the standard error (99.7% confidence
/// under the Gaussian-error assumption)
const CONF_SIGMA: f64 = 3.;

#[derive(thiserror::Error, Debug)]
pub enum BiasError {
    #[error("No qualifying `{0}` measurement to average over")]
    EmptySelection(ShearType),
}

/// Component 1 reporting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasMode {
    /// A shear was injected along component 1: report the fractional error
    Multiplicative,
    /// Null test, no injected shear: report the residual shear
    Additive,
}

/// Calibrated bias estimates with their standard errors
///
/// Component 2 never carries an injected shear and is always reported as an
/// additive bias.
#[derive(Debug, Clone, PartialEq)]
pub enum BiasEstimate {
    Multiplicative {
        m1: f64,
        m1err: f64,
        c2: f64,
        c2err: f64,
    },
    Additive {
        c1: f64,
        c1err: f64,
        c2: f64,
        c2err: f64,
    },
}
impl BiasEstimate {
    /// Prints each reported quantity with its symmetric 3-sigma interval
    pub fn summary(&self) {
        match self {
            BiasEstimate::Multiplicative { m1, m1err, c2, c2err } => {
                print_value("m1", *m1, *m1err);
                print_value("c2", *c2, *c2err);
                print_range("m1", *m1, *m1err);
                print_range("c2", *c2, *c2err);
            }
            BiasEstimate::Additive { c1, c1err, c2, c2err } => {
                print_value("c1", *c1, *c1err);
                print_value("c2", *c2, *c2err);
                print_range("c1", *c1, *c1err);
                print_range("c2", *c2, *c2err);
            }
        }
    }
}

/// Symmetric 3-sigma confidence interval
pub fn confidence_interval(value: f64, err: f64) -> (f64, f64) {
    (value - CONF_SIGMA * err, value + CONF_SIGMA * err)
}

fn print_value(name: &str, value: f64, err: f64) {
    println!(
        "{} = {:.6e} +/- {:.6e} (99.7% conf)",
        name,
        value,
        CONF_SIGMA * err
    );
}

fn print_range(name: &str, value: f64, err: f64) {
    let (low, high) = confidence_interval(value, err);
    println!("{:.3e} < {} < {:.3e}  (99.7% conf)", low, name, high);
}

/// Per-component mean and standard error of the shear estimator over a
/// selected subset
pub fn mean_shear(
    data: &[Measurement],
    idx: &[usize],
) -> Result<([f64; 2], [f64; 2]), BiasError> {
    let mut mean_g = [0f64; 2];
    let mut stderr_g = [0f64; 2];
    for component in 0..2 {
        let g: Vec<f64> = idx.iter().map(|&i| data[i].g[component]).collect();
        mean_g[component] =
            stats::mean(&g).ok_or(BiasError::EmptySelection(ShearType::Noshear))?;
        stderr_g[component] =
            stats::stderr(&g).ok_or(BiasError::EmptySelection(ShearType::Noshear))?;
    }
    Ok((mean_g, stderr_g))
}

/// Bias of the calibrated mean shear `mean_g / R`
///
/// The degenerate `R` cases are rejected upstream by [`crate::response`].
pub fn compute_bias(
    mean_g: [f64; 2],
    stderr_g: [f64; 2],
    r: f64,
    config: &ShearConfig,
    mode: BiasMode,
) -> BiasEstimate {
    let shear = mean_g[0] / r;
    let shear_err = stderr_g[0] / r;
    let c2 = mean_g[1] / r;
    let c2err = stderr_g[1] / r;
    match mode {
        BiasMode::Multiplicative => BiasEstimate::Multiplicative {
            m1: shear / config.shear_true - 1.,
            m1err: shear_err / config.shear_true,
            c2,
            c2err,
        },
        BiasMode::Additive => BiasEstimate::Additive {
            c1: shear,
            c1err: shear_err,
            c2,
            c2err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::tests::measurement, response::response, selection::select};
    use rand::{seq::SliceRandom, SeedableRng};

    #[test]
    fn multiplicative_scenario() {
        let config = ShearConfig::default();
        let estimate = compute_bias(
            [0.0204, 0.0001],
            [0.0005, 0.0004],
            2.2,
            &config,
            BiasMode::Multiplicative,
        );
        match estimate {
            BiasEstimate::Multiplicative { m1, m1err, c2, c2err } => {
                assert!((m1 - (0.0204 / 2.2 / 0.02 - 1.)).abs() < 1e-15);
                assert!((m1 + 0.5363636363636364).abs() < 1e-12);
                assert!((m1err - 0.0005 / 2.2 / 0.02).abs() < 1e-15);
                assert!((c2 - 0.0001 / 2.2).abs() < 1e-15);
                assert!((c2err - 0.0004 / 2.2).abs() < 1e-15);
            }
            _ => panic!("expected a multiplicative estimate"),
        }
    }

    #[test]
    fn additive_scenario() {
        let config = ShearConfig::default();
        let estimate = compute_bias(
            [0.0002, -0.0001],
            [0.0005, 0.0004],
            2.2,
            &config,
            BiasMode::Additive,
        );
        match estimate {
            BiasEstimate::Additive { c1, c1err, c2, c2err } => {
                assert!((c1 - 0.0002 / 2.2).abs() < 1e-15);
                assert!((c1err - 0.0005 / 2.2).abs() < 1e-15);
                assert!((c2 + 0.0001 / 2.2).abs() < 1e-15);
                assert!((c2err - 0.0004 / 2.2).abs() < 1e-15);
            }
            _ => panic!("expected an additive estimate"),
        }
    }

    #[test]
    fn interval_endpoints() {
        let (low, high) = confidence_interval(-0.5, 0.01);
        assert!((low + 0.53).abs() < 1e-15);
        assert!((high + 0.47).abs() < 1e-15);
    }

    #[test]
    fn empty_selection_fails() {
        let data = vec![measurement(ShearType::Noshear, [0.02, 0.])];
        let err = mean_shear(&data, &[]).unwrap_err();
        assert!(matches!(err, BiasError::EmptySelection(ShearType::Noshear)));
    }

    #[test]
    fn mean_shear_moments() {
        let data = vec![
            measurement(ShearType::Noshear, [0.02, 0.001]),
            measurement(ShearType::Noshear, [0.022, -0.001]),
        ];
        let (mean_g, stderr_g) = mean_shear(&data, &[0, 1]).unwrap();
        assert!((mean_g[0] - 0.021).abs() < 1e-15);
        assert!((mean_g[1] - 0.).abs() < 1e-15);
        // population std 0.001 over sqrt(2)
        assert!((stderr_g[0] - 0.001 / 2f64.sqrt()).abs() < 1e-15);
        assert!((stderr_g[1] - 0.001 / 2f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn permutation_invariance() {
        let config = ShearConfig::default();
        let mut data: Vec<_> = (0..30)
            .map(|i| {
                let x = (i % 5) as f64 * 1e-3;
                measurement(ShearType::Noshear, [0.02 + x, -0.001 + x])
            })
            .chain((0..20).map(|i| {
                let x = (i % 4) as f64 * 1e-3;
                measurement(ShearType::OnePlus, [0.023 + x, 0.])
            }))
            .chain((0..20).map(|i| {
                let x = (i % 4) as f64 * 1e-3;
                measurement(ShearType::OneMinus, [-0.021 + x, 0.])
            }))
            .collect();

        let run = |data: &[Measurement]| -> BiasEstimate {
            let w = select(data, ShearType::Noshear, &config);
            let w_1p = select(data, ShearType::OnePlus, &config);
            let w_1m = select(data, ShearType::OneMinus, &config);
            let r = response(data, &w_1p, &w_1m, config.shear_step).unwrap();
            let (mean_g, stderr_g) = mean_shear(data, &w).unwrap();
            compute_bias(mean_g, stderr_g, r, &config, BiasMode::Multiplicative)
        };

        let reference = run(&data);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..5 {
            data.shuffle(&mut rng);
            let shuffled = run(&data);
            match (&reference, &shuffled) {
                (
                    BiasEstimate::Multiplicative { m1, m1err, c2, c2err },
                    BiasEstimate::Multiplicative {
                        m1: m1_s,
                        m1err: m1err_s,
                        c2: c2_s,
                        c2err: c2err_s,
                    },
                ) => {
                    assert!((m1 - m1_s).abs() < 1e-12);
                    assert!((m1err - m1err_s).abs() < 1e-12);
                    assert!((c2 - c2_s).abs() < 1e-12);
                    assert!((c2err - c2err_s).abs() < 1e-12);
                }
                _ => panic!("mode changed under permutation"),
            }
        }
    }
}
