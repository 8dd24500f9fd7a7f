use crate::math::histogram::Histogram;
use crate::math::stats::StatsHelper;
use crate::model::lightcurve::LightCurve;
use crate::photometry::detection::DetectionMask;
use crate::prelude::LcResult;

pub const HISTOGRAM_BINS: usize = 30;
/// Lower bound on the upper edge of the redshift histogram.
pub const MIN_REDSHIFT_SPAN: f64 = 0.05;
pub const PEAK_MAG_PADDING: f64 = 0.2;

/// Per-object quantities collected over a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    peak_mags: Vec<f64>,
    redshifts: Vec<f64>,
}

/// Combined histograms produced once a batch is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryHistograms {
    pub redshift: Option<Histogram>,
    pub peak_mag: Option<Histogram>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one object's detected peak magnitude and redshift, when they exist.
    ///
    /// The redshift is only kept when the object has at least one detection.
    pub fn fold(&mut self, lc: &LightCurve, mask: &DetectionMask) {
        if let Some(mag) = lc.peak_detected_mag(mask) {
            self.peak_mags.push(mag);
        }
        if let Some(z) = lc.metadata().redshift {
            if mask.any() {
                self.redshifts.push(z);
            }
        }
    }

    pub fn peak_mags(&self) -> &[f64] {
        &self.peak_mags
    }

    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    pub fn is_empty(&self) -> bool {
        self.peak_mags.is_empty() && self.redshifts.is_empty()
    }

    /// Histogram over `[0, max(0.05, max z)]`.
    pub fn redshift_histogram(&self) -> LcResult<Option<Histogram>> {
        let Some(max_z) = StatsHelper::finite_max(&self.redshifts) else {
            return Ok(None);
        };
        let mut hist = Histogram::new_equal_bins(0.0..MIN_REDSHIFT_SPAN.max(max_z), HISTOGRAM_BINS)?;
        hist.add_all(self.redshifts.iter().copied());
        Ok(Some(hist))
    }

    /// Histogram over `[min - 0.2, max + 0.2]` of the collected peak magnitudes.
    pub fn peak_mag_histogram(&self) -> LcResult<Option<Histogram>> {
        let Some((lo, hi)) = StatsHelper::finite_range(&self.peak_mags) else {
            return Ok(None);
        };
        let mut hist = Histogram::new_equal_bins(
            (lo - PEAK_MAG_PADDING)..(hi + PEAK_MAG_PADDING),
            HISTOGRAM_BINS,
        )?;
        hist.add_all(self.peak_mags.iter().copied());
        Ok(Some(hist))
    }

    pub fn into_histograms(self) -> LcResult<SummaryHistograms> {
        Ok(SummaryHistograms {
            redshift: self.redshift_histogram()?,
            peak_mag: self.peak_mag_histogram()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lightcurve::LightCurveMetadata;

    fn curve(flux: Vec<f64>, flux_err: Vec<f64>, redshift: Option<f64>) -> LightCurve {
        let n = flux.len();
        LightCurve::new(
            (0..n).map(|i| 60000.0 + i as f64).collect(),
            flux,
            flux_err,
            vec!["r".to_string(); n],
            None,
            LightCurveMetadata {
                redshift,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn redshift_histogram_spans_zero_to_max() {
        let mut summary = BatchSummary::new();
        for z in [0.1, 0.2, 0.3] {
            let lc = curve(vec![100.0], vec![10.0], Some(z));
            summary.fold(&lc, &lc.detection_mask());
        }
        let hist = summary.redshift_histogram().unwrap().unwrap();
        assert_eq!(hist.range(), (0.0, 0.3));
        assert_eq!(hist.bins(), 30);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn small_redshifts_use_minimum_span() {
        let mut summary = BatchSummary::new();
        let lc = curve(vec![100.0], vec![10.0], Some(0.01));
        summary.fold(&lc, &lc.detection_mask());
        let hist = summary.redshift_histogram().unwrap().unwrap();
        assert_eq!(hist.range(), (0.0, 0.05));
        assert_eq!(hist.total(), 1);
    }

    #[test]
    fn peak_mag_histogram_pads_both_sides() {
        let mut summary = BatchSummary::new();
        // mag 22.5 and 17.5
        for flux in [100.0, 10000.0] {
            let lc = curve(vec![flux], vec![1.0], None);
            summary.fold(&lc, &lc.detection_mask());
        }
        let hist = summary.peak_mag_histogram().unwrap().unwrap();
        let (lo, hi) = hist.range();
        assert!((lo - 17.3).abs() < 1e-9);
        assert!((hi - 22.7).abs() < 1e-9);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn empty_summary_yields_no_histograms() {
        let hists = BatchSummary::new().into_histograms().unwrap();
        assert!(hists.redshift.is_none());
        assert!(hists.peak_mag.is_none());
    }

    #[test]
    fn fold_requires_detection_for_redshift() {
        let mut summary = BatchSummary::new();
        // snr 1: no detection, redshift dropped
        let faint = curve(vec![10.0], vec![10.0], Some(0.4));
        summary.fold(&faint, &faint.detection_mask());
        assert!(summary.is_empty());

        let bright = curve(vec![100.0, 10.0], vec![10.0, 10.0], Some(0.2));
        summary.fold(&bright, &bright.detection_mask());
        assert_eq!(summary.redshifts(), &[0.2]);
        assert_eq!(summary.peak_mags().len(), 1);
        assert!((summary.peak_mags()[0] - 22.5).abs() < 1e-12);
    }

    #[test]
    fn fold_without_redshift_keeps_peak_mag() {
        let mut summary = BatchSummary::new();
        let lc = curve(vec![1000.0], vec![10.0], None);
        summary.fold(&lc, &lc.detection_mask());
        assert!(summary.redshifts().is_empty());
        assert_eq!(summary.peak_mags().len(), 1);
    }
}
