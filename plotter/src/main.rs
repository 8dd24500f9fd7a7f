use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use workflow::config::{BatchConfig, DEFAULT_MAX_PLOTS_PER_GEN};
use workflow::runner::Runner;

#[cfg(test)]
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Plot SNANA simulated light curves and batch summaries")]
struct Args {
    /// Root of the SNANA data tree; simulations are read from <root>/SIM
    #[arg(long, required_unless_present = "config")]
    sndata_root: Option<PathBuf>,
    /// Glob selecting GENVERSION directories, e.g. 'SNIax_*'
    #[arg(long, required_unless_present = "config")]
    pattern: Option<String>,
    /// Directory receiving the PNG files
    #[arg(long, required_unless_present = "config")]
    outdir: Option<PathBuf>,
    /// Light curves plotted per GENVERSION
    #[arg(long)]
    max_plots_per_gen: Option<usize>,
    /// Load batch settings from YAML; flags override file values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn batch_config(args: Args) -> anyhow::Result<BatchConfig> {
    if let Some(path) = args.config {
        let file = BatchConfig::load(path)?;
        return Ok(file.merge_args(
            args.sndata_root,
            args.pattern,
            args.outdir,
            args.max_plots_per_gen,
        ));
    }

    match (args.sndata_root, args.pattern, args.outdir) {
        (Some(root), Some(pattern), Some(outdir)) => Ok(BatchConfig::from_args(
            root,
            pattern,
            outdir,
            args.max_plots_per_gen.unwrap_or(DEFAULT_MAX_PLOTS_PER_GEN),
        )),
        _ => anyhow::bail!("--sndata-root, --pattern and --outdir are required without --config"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = batch_config(args)?;

    let outdir = config.outdir.clone();
    let report = Runner::new(config)
        .execute()
        .context("plotting simulated light curves")?;

    for group in &report.groups {
        log::debug!("processed {group}");
    }
    println!(
        "{} groups -> {} light curves, {} histograms in {}",
        report.groups.len(),
        report.plots.len(),
        report.histograms.len(),
        outdir.display()
    );
    let metrics = report.metrics;
    println!(
        "tables read {}, plots {}, histograms {} across {} groups",
        metrics.tables_read,
        metrics.plots_written,
        metrics.histograms_written,
        metrics.groups
    );
    if report.histograms.is_empty() {
        println!("no detected light curves; summary histograms skipped");
    } else {
        println!(
            "summary: {} peak magnitudes, {} redshifts",
            report.peak_mag_count, report.redshift_count
        );
    }

    Ok(())
}
