pub struct StatsHelper;

impl StatsHelper {
    /// Smallest finite value; NaN and infinities are skipped.
    pub fn finite_min(samples: &[f64]) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }

    pub fn finite_max(samples: &[f64]) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    pub fn finite_range(samples: &[f64]) -> Option<(f64, f64)> {
        Some((Self::finite_min(samples)?, Self::finite_max(samples)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_all_nan_has_no_extrema() {
        assert_eq!(StatsHelper::finite_min(&[]), None);
        assert_eq!(StatsHelper::finite_max(&[f64::NAN, f64::INFINITY]), None);
        assert_eq!(StatsHelper::finite_range(&[f64::NAN]), None);
    }

    #[test]
    fn extrema_skip_non_finite_values() {
        let samples = [f64::NAN, 21.5, 19.25, f64::NEG_INFINITY, 23.0];
        assert_eq!(StatsHelper::finite_min(&samples), Some(19.25));
        assert_eq!(StatsHelper::finite_max(&samples), Some(23.0));
        assert_eq!(StatsHelper::finite_range(&samples), Some((19.25, 23.0)));
    }
}
