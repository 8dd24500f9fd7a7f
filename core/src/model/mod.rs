pub mod lightcurve;
pub mod summary;

pub use lightcurve::{LightCurve, LightCurveMetadata};
pub use summary::{BatchSummary, SummaryHistograms, HISTOGRAM_BINS};
