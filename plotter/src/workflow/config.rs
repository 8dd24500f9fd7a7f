use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_PLOTS_PER_GEN: usize = 2;
pub const DEFAULT_PHOT_SUFFIX: &str = "_PHOT.FITS";
/// Simulations live under `$SNDATA_ROOT/SIM/<GENVERSION>`.
pub const SIM_SUBDIR: &str = "SIM";

fn default_max_plots_per_gen() -> usize {
    DEFAULT_MAX_PLOTS_PER_GEN
}

fn default_phot_suffix() -> String {
    DEFAULT_PHOT_SUFFIX.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub sndata_root: PathBuf,
    pub pattern: String,
    pub outdir: PathBuf,
    #[serde(default = "default_max_plots_per_gen")]
    pub max_plots_per_gen: usize,
    #[serde(default = "default_phot_suffix")]
    pub phot_suffix: String,
}

impl BatchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading batch config {}", path_ref.display()))?;
        let config: BatchConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing batch config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        sndata_root: PathBuf,
        pattern: String,
        outdir: PathBuf,
        max_plots_per_gen: usize,
    ) -> Self {
        Self {
            sndata_root,
            pattern,
            outdir,
            max_plots_per_gen,
            phot_suffix: default_phot_suffix(),
        }
    }

    /// Command-line values take precedence over the file.
    pub fn merge_args(
        mut self,
        sndata_root: Option<PathBuf>,
        pattern: Option<String>,
        outdir: Option<PathBuf>,
        max_plots_per_gen: Option<usize>,
    ) -> Self {
        if let Some(root) = sndata_root {
            self.sndata_root = root;
        }
        if let Some(pattern) = pattern {
            self.pattern = pattern;
        }
        if let Some(outdir) = outdir {
            self.outdir = outdir;
        }
        if let Some(max) = max_plots_per_gen {
            self.max_plots_per_gen = max;
        }
        self
    }

    pub fn sim_base(&self) -> PathBuf {
        self.sndata_root.join(SIM_SUBDIR)
    }

    /// Glob matching GENVERSION directories. The root is escaped so only
    /// `pattern` carries wildcards.
    pub fn group_glob(&self) -> String {
        let base = glob::Pattern::escape(&self.sim_base().to_string_lossy());
        Path::new(&base)
            .join(&self.pattern)
            .to_string_lossy()
            .into_owned()
    }

    /// Glob matching the photometry tables of one group.
    pub fn table_glob(&self, group: &Path) -> String {
        let base = glob::Pattern::escape(&group.to_string_lossy());
        Path::new(&base)
            .join(format!("*{}", glob::Pattern::escape(&self.phot_suffix)))
            .to_string_lossy()
            .into_owned()
    }
}
