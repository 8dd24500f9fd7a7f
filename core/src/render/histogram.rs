use crate::math::histogram::Histogram;
use crate::prelude::{render_err, Figure, LcResult};
use plotters::coord::Shift;
use plotters::prelude::*;

/// 5x3 inches at 160 dpi.
pub const HISTOGRAM_SIZE: (u32, u32) = (800, 480);

/// Bar chart of a combined batch histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    title: String,
    x_desc: String,
    histogram: Histogram,
    reversed: bool,
}

impl HistogramFigure {
    pub fn new(title: impl Into<String>, x_desc: impl Into<String>, histogram: Histogram) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            histogram,
            reversed: false,
        }
    }

    /// Draws the x axis from high to low, e.g. magnitudes with brighter to the right.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Axis span in drawing order.
    pub fn x_span(&self) -> (f64, f64) {
        let (lo, hi) = self.histogram.range();
        if self.reversed {
            (hi, lo)
        } else {
            (lo, hi)
        }
    }
}

impl Figure for HistogramFigure {
    fn title(&self) -> &str {
        &self.title
    }

    fn size(&self) -> (u32, u32) {
        HISTOGRAM_SIZE
    }

    fn draw(&self, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> LcResult<()> {
        let (x_start, x_end) = self.x_span();
        let y_max = (self.histogram.max_count() as f64 * 1.1).max(1.0);

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(x_start..x_end, 0.0..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc("N")
            .x_label_formatter(&|x| format!("{x:.2}"))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .draw()
            .map_err(render_err)?;

        let fill = BLUE.mix(0.85).filled();
        chart
            .draw_series(
                self.histogram
                    .counts()
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0)
                    .map(|(idx, &count)| {
                        let (x0, x1) = self.histogram.bin_edges(idx);
                        Rectangle::new([(x0, 0.0), (x1, count as f64)], fill)
                    }),
            )
            .map_err(render_err)?;

        Ok(())
    }
}
