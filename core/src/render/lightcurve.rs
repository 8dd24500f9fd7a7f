//! Per-object light-curve figure.
//!
//! `LightCurveFigure::build` turns a light curve and its detection mask into
//! plain series and legend data; `Figure::draw` paints that description with
//! plotters. Detected and non-detected samples of each band become separate
//! error-bar series. The legend keeps one entry per detected band plus a
//! single shared "non det" entry.

use crate::model::lightcurve::{LightCurve, LightCurveMetadata};
use crate::photometry::detection::DetectionMask;
use crate::prelude::{render_err, Figure, LcResult};
use crate::render::style::{
    band_color, is_plotted_band, BAND_ORDER, DET_ALPHA, NON_DET_ALPHA, NON_DET_COLOR,
};
use plotters::coord::Shift;
use plotters::prelude::*;

/// 6x3 inches at 160 dpi.
pub const LIGHTCURVE_SIZE: (u32, u32) = (960, 480);
pub const NON_DET_LABEL: &str = "non det";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBarPoint {
    pub x: f64,
    pub y: f64,
    pub err: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarSeries {
    pub band: String,
    pub detected: bool,
    pub points: Vec<ErrorBarPoint>,
}

impl ErrorBarSeries {
    pub fn label(&self) -> String {
        if self.detected {
            format!("{} det", self.band)
        } else {
            format!("{} {}", self.band, NON_DET_LABEL)
        }
    }

    fn color(&self) -> RGBAColor {
        if self.detected {
            band_color(&self.band).mix(DET_ALPHA)
        } else {
            NON_DET_COLOR.mix(NON_DET_ALPHA)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    /// Index into the figure's series list that carries this entry.
    pub series_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightCurveFigure {
    title: String,
    series: Vec<ErrorBarSeries>,
    legend: Vec<LegendEntry>,
    dropped_samples: usize,
}

impl LightCurveFigure {
    pub fn build(object: &str, lc: &LightCurve, mask: &DetectionMask) -> Self {
        let mut series = Vec::new();

        for band in BAND_ORDER {
            let rows: Vec<usize> = (0..lc.len()).filter(|&i| lc.band()[i] == band).collect();
            if rows.is_empty() {
                continue;
            }
            for detected in [true, false] {
                let points: Vec<ErrorBarPoint> = rows
                    .iter()
                    .filter(|&&i| mask.get(i).unwrap_or(false) == detected)
                    .map(|&i| ErrorBarPoint {
                        x: lc.mjd()[i],
                        y: lc.flux()[i],
                        err: lc.flux_err()[i],
                    })
                    .collect();
                if !points.is_empty() {
                    series.push(ErrorBarSeries {
                        band: band.to_string(),
                        detected,
                        points,
                    });
                }
            }
        }

        let dropped_samples = lc.band().iter().filter(|b| !is_plotted_band(b)).count();
        let legend = build_legend(&series);

        Self {
            title: format_title(object, lc.metadata()),
            series,
            legend,
            dropped_samples,
        }
    }

    pub fn series(&self) -> &[ErrorBarSeries] {
        &self.series
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Samples whose band is not one of `BAND_ORDER`.
    pub fn dropped_samples(&self) -> usize {
        self.dropped_samples
    }

    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        // The zero-flux line is always in view.
        let mut y = (0.0_f64, 0.0_f64);

        for p in self.series.iter().flat_map(|s| s.points.iter()) {
            if p.x.is_finite() {
                x = (x.0.min(p.x), x.1.max(p.x));
            }
            let err = if p.err.is_finite() { p.err.abs() } else { 0.0 };
            if p.y.is_finite() {
                y = (y.0.min(p.y - err), y.1.max(p.y + err));
            }
        }
        if !x.0.is_finite() {
            x = (0.0, 1.0);
        }

        (pad(x, 0.03), pad(y, 0.08))
    }
}

fn pad((lo, hi): (f64, f64), frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * frac, hi + span * frac)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

fn build_legend(series: &[ErrorBarSeries]) -> Vec<LegendEntry> {
    let mut legend = Vec::new();
    let mut seen_bands: Vec<&str> = Vec::new();
    let mut has_non_det = false;

    for (idx, s) in series.iter().enumerate() {
        if s.detected {
            if !seen_bands.contains(&s.band.as_str()) {
                seen_bands.push(&s.band);
                legend.push(LegendEntry {
                    label: s.label(),
                    series_index: idx,
                });
            }
        } else if !has_non_det {
            has_non_det = true;
            legend.push(LegendEntry {
                label: NON_DET_LABEL.to_string(),
                series_index: idx,
            });
        }
    }
    legend
}

/// `"<object>  z: 0.1234, mwebv: 0.0310, peakmjd: 60001.250000"`, listing only
/// the metadata that is present.
pub fn format_title(object: &str, meta: &LightCurveMetadata) -> String {
    let mut parts = Vec::new();
    if let Some(z) = meta.redshift {
        parts.push(format!("z: {z:.4}"));
    }
    if let Some(mwebv) = meta.mwebv {
        parts.push(format!("mwebv: {mwebv:.4}"));
    }
    if let Some(peak) = meta.peak_mjd {
        parts.push(format!("peakmjd: {peak:.6}"));
    }

    if parts.is_empty() {
        object.trim().to_string()
    } else {
        format!("{object}  {}", parts.join(", ")).trim().to_string()
    }
}

impl Figure for LightCurveFigure {
    fn title(&self) -> &str {
        &self.title
    }

    fn size(&self) -> (u32, u32) {
        LIGHTCURVE_SIZE
    }

    fn draw(&self, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> LcResult<()> {
        let ((x_lo, x_hi), (y_lo, y_hi)) = self.bounds();

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("MJD (days)")
            .y_desc("Flux (FLUXCAL)")
            .x_label_formatter(&|x| format!("{x:.0}"))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                vec![(x_lo, 0.0), (x_hi, 0.0)],
                BLACK.mix(0.5).stroke_width(1),
            ))
            .map_err(render_err)?;

        for (idx, series) in self.series.iter().enumerate() {
            let color = series.color();

            chart
                .draw_series(series.points.iter().map(|p| {
                    ErrorBar::new_vertical(
                        p.x,
                        p.y - p.err,
                        p.y,
                        p.y + p.err,
                        color.stroke_width(1),
                        4,
                    )
                }))
                .map_err(render_err)?;

            let anno = chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|p| Circle::new((p.x, p.y), 3, color.filled())),
                )
                .map_err(render_err)?;

            if let Some(entry) = self.legend.iter().find(|e| e.series_index == idx) {
                anno.label(entry.label.clone())
                    .legend(move |(x, y)| Circle::new((x + 5, y), 3, color.filled()));
            }
        }

        if !self.legend.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", 13))
                .background_style(WHITE.mix(0.8))
                .draw()
                .map_err(render_err)?;
        }

        Ok(())
    }
}
