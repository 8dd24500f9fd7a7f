use std::ops::Index;

/// Minimum signal-to-noise for a sample to count as detected.
pub const DETECTION_SNR_THRESHOLD: f64 = 5.0;
/// `PHOTFLAG` bit marking a pipeline detection.
pub const PHOTFLAG_DETECT: i32 = 4096;
/// `PHOTFLAG` bit marking the trigger epoch.
pub const PHOTFLAG_TRIGGER: i32 = 16384;

/// Returns `flux / flux_err`, or 0 when the uncertainty is not positive.
pub fn signal_to_noise(flux: f64, flux_err: f64) -> f64 {
    if flux_err > 0.0 {
        flux / flux_err
    } else {
        0.0
    }
}

pub fn snr_series(flux: &[f64], flux_err: &[f64]) -> Vec<f64> {
    flux.iter()
        .zip(flux_err)
        .map(|(&f, &e)| signal_to_noise(f, e))
        .collect()
}

/// Flag bits only ever promote a sample to a detection.
pub fn is_detection(snr: f64, photflag: Option<i32>) -> bool {
    let flagged = photflag
        .map(|flag| flag & PHOTFLAG_DETECT != 0 || flag & PHOTFLAG_TRIGGER != 0)
        .unwrap_or(false);
    snr >= DETECTION_SNR_THRESHOLD || flagged
}

pub fn detect_mask(snr: &[f64], photflag: Option<&[i32]>) -> DetectionMask {
    snr.iter()
        .enumerate()
        .map(|(idx, &value)| is_detection(value, photflag.and_then(|flags| flags.get(idx).copied())))
        .collect()
}

/// Per-sample detection outcome, aligned with the light-curve rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionMask(Vec<bool>);

impl DetectionMask {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&det| det).count()
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&det| det)
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        self.0.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl Index<usize> for DetectionMask {
    type Output = bool;

    fn index(&self, idx: usize) -> &bool {
        &self.0[idx]
    }
}

impl FromIterator<bool> for DetectionMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<bool>> for DetectionMask {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}
