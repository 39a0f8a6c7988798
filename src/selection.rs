//! Quality cuts per sheared realization

use crate::{
    catalog::{Measurement, ShearType},
    ShearConfig,
};

/// Indices of the well measured objects of one sheared realization
///
/// The indices point into `data` and preserve the catalog order. A record is
/// kept when its flags are clear and both the signal-to-noise and the size
/// ratio clear the configured thresholds. The kept/total count is logged for
/// operator visibility; an empty result is rejected downstream, where a mean
/// over the subset would be taken.
pub fn select(data: &[Measurement], shear_type: ShearType, config: &ShearConfig) -> Vec<usize> {
    let total = data
        .iter()
        .filter(|m| m.shear_type == shear_type)
        .count();
    let kept: Vec<usize> = data
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            m.shear_type == shear_type
                && m.flags == 0
                && m.s2n > config.s2n_min
                && m.t_ratio > config.t_ratio_min
        })
        .map(|(i, _)| i)
        .collect();
    log::info!("{} kept: {}/{}", shear_type, kept.len(), total);
    kept
}
