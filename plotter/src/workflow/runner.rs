use crate::workflow::config::BatchConfig;
use anyhow::Context;
use snlccore::io::read_phot_table;
use snlccore::model::SummaryHistograms;
use snlccore::render::{FigureSink, HistogramFigure, LightCurveFigure, PngSink};
use snlccore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use snlccore::BatchSummary;
use std::fs;
use std::path::{Path, PathBuf};

pub const REDSHIFT_HISTOGRAM_FILE: &str = "hist_redshift_detected_all.png";
pub const PEAK_MAG_HISTOGRAM_FILE: &str = "hist_peakmag_detected_all.png";

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("no GENVERSION directories match pattern '{pattern}' in {}", base.display())]
    NoGroups { pattern: String, base: PathBuf },
}

#[derive(Debug)]
pub struct BatchReport {
    pub groups: Vec<String>,
    pub plots: Vec<PathBuf>,
    pub histograms: Vec<PathBuf>,
    pub peak_mag_count: usize,
    pub redshift_count: usize,
    pub metrics: MetricsSnapshot,
}

pub struct Runner {
    config: BatchConfig,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl Runner {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("batch"),
            metrics: MetricsRecorder::new(),
        }
    }

    /// GENVERSION directories matching the configured pattern, sorted.
    pub fn discover_groups(&self) -> anyhow::Result<Vec<PathBuf>> {
        let pattern = self.config.group_glob();
        let mut groups = Vec::new();
        for entry in glob::glob(&pattern).with_context(|| format!("invalid pattern {pattern}"))? {
            let path = entry.context("reading GENVERSION candidate")?;
            if path.is_dir() {
                groups.push(path);
            }
        }
        groups.sort();
        Ok(groups)
    }

    /// Photometry tables of one group, sorted by name.
    pub fn phot_tables(&self, group: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let pattern = self.config.table_glob(group);
        let mut tables = Vec::new();
        for entry in glob::glob(&pattern).with_context(|| format!("invalid pattern {pattern}"))? {
            tables.push(entry.context("reading photometry table candidate")?);
        }
        tables.sort();
        Ok(tables)
    }

    pub fn execute(&self) -> anyhow::Result<BatchReport> {
        self.execute_with(&mut PngSink)
    }

    pub fn execute_with<S: FigureSink>(&self, sink: &mut S) -> anyhow::Result<BatchReport> {
        let group_dirs = self.discover_groups()?;
        if group_dirs.is_empty() {
            return Err(BatchError::NoGroups {
                pattern: self.config.pattern.clone(),
                base: self.config.sim_base(),
            }
            .into());
        }

        fs::create_dir_all(&self.config.outdir).with_context(|| {
            format!("creating output directory {}", self.config.outdir.display())
        })?;

        let mut summary = BatchSummary::new();
        let mut groups = Vec::with_capacity(group_dirs.len());
        let mut plots = Vec::new();

        for group in &group_dirs {
            let group_name = group
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let tables = self.phot_tables(group)?;
            let mut saved = 0;
            for table in tables.iter().take(self.config.max_plots_per_gen) {
                plots.push(self.process_table(&group_name, table, &mut summary, sink)?);
                saved += 1;
            }

            self.metrics.record_group();
            self.logger
                .record(&format!("{group_name} -> {saved} LCs saved"));
            groups.push(group_name);
        }

        let peak_mag_count = summary.peak_mags().len();
        let redshift_count = summary.redshifts().len();
        let histograms = self.emit_histograms(summary, sink)?;

        let metrics = self.metrics.snapshot();
        self.logger.record(&format!(
            "groups {}, tables {}, plots {}, histograms {}",
            metrics.groups, metrics.tables_read, metrics.plots_written, metrics.histograms_written
        ));

        Ok(BatchReport {
            groups,
            plots,
            histograms,
            peak_mag_count,
            redshift_count,
            metrics,
        })
    }

    fn process_table<S: FigureSink>(
        &self,
        group_name: &str,
        table: &Path,
        summary: &mut BatchSummary,
        sink: &mut S,
    ) -> anyhow::Result<PathBuf> {
        let lc = read_phot_table(table).with_context(|| format!("reading {}", table.display()))?;
        self.metrics.record_table();

        let mask = lc.detection_mask();
        let figure = LightCurveFigure::build(group_name, &lc, &mask);
        if figure.dropped_samples() > 0 {
            self.logger.warn(&format!(
                "{}: {} samples outside u,g,r,i,z,Y not plotted",
                table.display(),
                figure.dropped_samples()
            ));
        }

        let out = self.config.outdir.join(plot_file_name(table)?);
        sink.emit(&figure, &out)
            .with_context(|| format!("rendering {}", out.display()))?;
        self.metrics.record_plot();
        self.logger.detail(&format!(
            "{} -> {} ({} of {} detected)",
            table.display(),
            out.display(),
            mask.count(),
            lc.len()
        ));

        summary.fold(&lc, &mask);
        Ok(out)
    }

    fn emit_histograms<S: FigureSink>(
        &self,
        summary: BatchSummary,
        sink: &mut S,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let SummaryHistograms { redshift, peak_mag } = summary
            .into_histograms()
            .context("binning batch summary")?;

        let mut figures = Vec::new();
        if let Some(hist) = redshift {
            figures.push((
                HistogramFigure::new(
                    "Redshift distribution (combined)",
                    "Redshift (detected)",
                    hist,
                ),
                REDSHIFT_HISTOGRAM_FILE,
            ));
        }
        if let Some(hist) = peak_mag {
            figures.push((
                HistogramFigure::new(
                    "Peak magnitude distribution (combined)",
                    "Peak magnitude (detected)",
                    hist,
                )
                .reversed(),
                PEAK_MAG_HISTOGRAM_FILE,
            ));
        }

        let mut written = Vec::with_capacity(figures.len());
        for (figure, file_name) in figures {
            let out = self.config.outdir.join(file_name);
            sink.emit(&figure, &out)
                .with_context(|| format!("rendering {}", out.display()))?;
            self.metrics.record_histogram();
            written.push(out);
        }
        Ok(written)
    }
}

/// `X_PHOT.FITS` becomes `X_PHOT.png`; other names get `.png` appended.
pub fn plot_file_name(table: &Path) -> anyhow::Result<String> {
    let name = table
        .file_name()
        .with_context(|| format!("{} has no file name", table.display()))?
        .to_string_lossy();
    Ok(match name.strip_suffix(".FITS") {
        Some(stem) => format!("{stem}.png"),
        None => format!("{name}.png"),
    })
}
