/// Zero point of the SNANA `FLUXCAL` scale.
pub const SNANA_ZERO_POINT: f64 = 27.5;

/// Converts a calibrated flux to an AB magnitude.
///
/// Non-positive (or NaN) flux has no magnitude and yields `f64::NAN`.
pub fn flux_to_mag(flux: f64) -> f64 {
    if flux > 0.0 {
        SNANA_ZERO_POINT - 2.5 * flux.log10()
    } else {
        f64::NAN
    }
}

pub fn fluxes_to_mags(fluxes: &[f64]) -> Vec<f64> {
    fluxes.iter().map(|&flux| flux_to_mag(flux)).collect()
}
