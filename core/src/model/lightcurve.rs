use crate::math::stats::StatsHelper;
use crate::photometry::detection::{detect_mask, snr_series, DetectionMask};
use crate::photometry::magnitude::fluxes_to_mags;
use crate::prelude::{LcError, LcResult};
use serde::{Deserialize, Serialize};

/// Header values describing one simulated object. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightCurveMetadata {
    pub redshift: Option<f64>,
    pub mwebv: Option<f64>,
    pub peak_mjd: Option<f64>,
}

/// Photometry of one simulated object, stored column by column.
#[derive(Debug, Clone)]
pub struct LightCurve {
    mjd: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
    band: Vec<String>,
    photflag: Option<Vec<i32>>,
    metadata: LightCurveMetadata,
}

impl LightCurve {
    pub fn new(
        mjd: Vec<f64>,
        flux: Vec<f64>,
        flux_err: Vec<f64>,
        band: Vec<String>,
        photflag: Option<Vec<i32>>,
        metadata: LightCurveMetadata,
    ) -> LcResult<Self> {
        let expected = mjd.len();
        check_len("FLUXCAL", expected, flux.len())?;
        check_len("FLUXCALERR", expected, flux_err.len())?;
        check_len("BAND", expected, band.len())?;
        if let Some(flags) = photflag.as_ref() {
            check_len("PHOTFLAG", expected, flags.len())?;
        }

        Ok(Self {
            mjd,
            flux,
            flux_err,
            band,
            photflag,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.mjd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mjd.is_empty()
    }

    pub fn mjd(&self) -> &[f64] {
        &self.mjd
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_err(&self) -> &[f64] {
        &self.flux_err
    }

    pub fn band(&self) -> &[String] {
        &self.band
    }

    pub fn photflag(&self) -> Option<&[i32]> {
        self.photflag.as_deref()
    }

    pub fn metadata(&self) -> &LightCurveMetadata {
        &self.metadata
    }

    pub fn snr(&self) -> Vec<f64> {
        snr_series(&self.flux, &self.flux_err)
    }

    /// Detection mask using both the SNR cut and the `PHOTFLAG` bits.
    pub fn detection_mask(&self) -> DetectionMask {
        detect_mask(&self.snr(), self.photflag())
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        fluxes_to_mags(&self.flux)
    }

    /// Brightest (numerically smallest) finite magnitude among detected samples.
    pub fn peak_detected_mag(&self, mask: &DetectionMask) -> Option<f64> {
        let detected: Vec<f64> = self
            .magnitudes()
            .into_iter()
            .zip(mask.iter())
            .filter_map(|(mag, det)| det.then_some(mag))
            .collect();
        StatsHelper::finite_min(&detected)
    }
}

fn check_len(column: &'static str, expected: usize, found: usize) -> LcResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LcError::ColumnMismatch {
            column,
            expected,
            found,
        })
    }
}
