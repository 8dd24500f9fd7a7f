pub mod histogram;
pub mod lightcurve;
pub mod style;

pub use histogram::HistogramFigure;
pub use lightcurve::{ErrorBarPoint, ErrorBarSeries, LegendEntry, LightCurveFigure};

use crate::prelude::{Figure, LcResult};
use std::path::Path;

/// Destination for finished figures.
pub trait FigureSink {
    fn emit(&mut self, figure: &dyn Figure, path: &Path) -> LcResult<()>;
}

/// Writes every figure as a PNG at its native size.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngSink;

impl FigureSink for PngSink {
    fn emit(&mut self, figure: &dyn Figure, path: &Path) -> LcResult<()> {
        figure.save_png(path)
    }
}
