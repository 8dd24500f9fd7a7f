//! Equal-width histogram binning.
//!
//! Bins are half-open `[lo, lo + w)` except the last one, which also takes
//! values equal to the upper edge. Values outside `[lo, hi]` are not counted.

use crate::prelude::{LcError, LcResult};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lo: f64,
    hi: f64,
    counts: Vec<u32>,
}

impl Histogram {
    pub fn new_equal_bins(range: Range<f64>, bins: usize) -> LcResult<Self> {
        if bins == 0 {
            return Err(LcError::InvalidRange("bin count must be positive".into()));
        }
        if !range.start.is_finite() || !range.end.is_finite() || range.end <= range.start {
            return Err(LcError::InvalidRange(format!(
                "[{}, {}] is empty or not finite",
                range.start, range.end
            )));
        }
        Ok(Self {
            lo: range.start,
            hi: range.end,
            counts: vec![0; bins],
        })
    }

    /// Adds one value; returns whether it fell inside the range.
    pub fn add(&mut self, value: f64) -> bool {
        if !value.is_finite() || value < self.lo || value > self.hi {
            return false;
        }
        let last = self.counts.len() - 1;
        let idx = (((value - self.lo) / self.bin_width()) as usize).min(last);
        self.counts[idx] += 1;
        true
    }

    pub fn add_all<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.counts.len() as f64
    }

    pub fn bin_edges(&self, idx: usize) -> (f64, f64) {
        let width = self.bin_width();
        let start = self.lo + idx as f64 * width;
        (start, start + width)
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_ranges() {
        assert!(Histogram::new_equal_bins(0.0..1.0, 0).is_err());
        assert!(Histogram::new_equal_bins(1.0..1.0, 10).is_err());
        assert!(Histogram::new_equal_bins(2.0..1.0, 10).is_err());
        assert!(Histogram::new_equal_bins(0.0..f64::NAN, 10).is_err());
    }

    #[test]
    fn upper_edge_lands_in_last_bin() {
        let mut hist = Histogram::new_equal_bins(0.0..0.3, 30).unwrap();
        hist.add_all([0.1, 0.2, 0.3]);
        assert_eq!(hist.bins(), 30);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts()[29], 1);
    }

    #[test]
    fn out_of_range_and_nan_are_ignored() {
        let mut hist = Histogram::new_equal_bins(18.0..22.0, 4).unwrap();
        assert!(!hist.add(17.9));
        assert!(!hist.add(22.1));
        assert!(!hist.add(f64::NAN));
        assert!(hist.add(18.0));
        assert!(hist.add(19.5));
        assert_eq!(hist.counts(), &[1, 1, 0, 0]);
        assert_eq!(hist.max_count(), 1);
    }

    #[test]
    fn bin_edges_tile_the_range() {
        let hist = Histogram::new_equal_bins(-1.0..1.0, 4).unwrap();
        assert_eq!(hist.bin_width(), 0.5);
        assert_eq!(hist.bin_edges(0), (-1.0, -0.5));
        assert_eq!(hist.bin_edges(3), (0.5, 1.0));
    }
}
