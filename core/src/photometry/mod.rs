pub mod detection;
pub mod magnitude;

pub use detection::{detect_mask, is_detection, signal_to_noise, snr_series, DetectionMask};
pub use magnitude::{flux_to_mag, fluxes_to_mags, SNANA_ZERO_POINT};
