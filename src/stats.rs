//! Sample moments shared by the response and bias estimators

/// Arithmetic mean, `None` on an empty slice
pub fn mean(x: &[f64]) -> Option<f64> {
    if x.is_empty() {
        return None;
    }
    Some(x.iter().sum::<f64>() / x.len() as f64)
}

/// Population standard deviation, `None` on an empty slice
pub fn std(x: &[f64]) -> Option<f64> {
    let mean = mean(x)?;
    let n = x.len() as f64;
    Some((x.iter().map(|x| x - mean).fold(0f64, |s, x| s + x * x) / n).sqrt())
}

/// Standard error of the mean, `None` on an empty slice
pub fn stderr(x: &[f64]) -> Option<f64> {
    std(x).map(|std| std / (x.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std() {
        let x = [1., 2., 3., 4.];
        assert_eq!(mean(&x), Some(2.5));
        // population std: sqrt(mean of squared deviations)
        let expected = (5f64 / 4f64).sqrt();
        assert!((std(&x).unwrap() - expected).abs() < 1e-15);
        assert!((stderr(&x).unwrap() - expected / 2.).abs() < 1e-15);
    }

    #[test]
    fn single_sample() {
        assert_eq!(mean(&[3.]), Some(3.));
        assert_eq!(std(&[3.]), Some(0.));
    }

    #[test]
    fn empty_slice() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std(&[]), None);
        assert_eq!(stderr(&[]), None);
    }
}
