use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use snlccore::io::write_phot_table;
use snlccore::photometry::detection::PHOTFLAG_TRIGGER;
use snlccore::{LightCurve, LightCurveMetadata};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for generating a synthetic SNANA light curve.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub bands: Vec<String>,
    pub epochs_per_band: usize,
    pub first_mjd: f64,
    pub cadence_days: f64,
    pub peak_mjd: f64,
    pub peak_flux: f64,
    pub rise_days: f64,
    pub fall_days: f64,
    pub flux_err: f64,
    pub noise: f64,
    pub seed: u64,
    pub redshift: Option<f64>,
    pub mwebv: Option<f64>,
    pub with_photflag: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bands: ["g", "r", "i", "z"].iter().map(|b| b.to_string()).collect(),
            epochs_per_band: 12,
            first_mjd: 60000.0,
            cadence_days: 4.0,
            peak_mjd: 60020.0,
            peak_flux: 1500.0,
            rise_days: 3.0,
            fall_days: 15.0,
            flux_err: 20.0,
            noise: 1.0,
            seed: 0,
            redshift: Some(0.2),
            mwebv: Some(0.03),
            with_photflag: true,
        }
    }
}

/// Rise/decline shape normalised so the maximum is close to `peak_flux`.
fn flux_profile(mjd: f64, config: &GeneratorConfig) -> f64 {
    let dt = mjd - config.peak_mjd;
    let shape = (-dt / config.fall_days).exp() / (1.0 + (-dt / config.rise_days).exp());
    2.0 * config.peak_flux * shape
}

pub fn build_light_curve(config: &GeneratorConfig) -> anyhow::Result<LightCurve> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let capacity = config.bands.len() * config.epochs_per_band;
    let mut mjd = Vec::with_capacity(capacity);
    let mut flux = Vec::with_capacity(capacity);
    let mut flux_err = Vec::with_capacity(capacity);
    let mut band = Vec::with_capacity(capacity);

    for (band_index, label) in config.bands.iter().enumerate() {
        let offset = band_index as f64 * 0.1;
        for epoch in 0..config.epochs_per_band {
            let t = config.first_mjd + epoch as f64 * config.cadence_days + offset;
            let jitter = rng.gen_range(-config.noise..=config.noise) * config.flux_err;
            mjd.push(t);
            flux.push(flux_profile(t, config) + jitter);
            flux_err.push(config.flux_err);
            band.push(label.clone());
        }
    }

    // SNANA marks the first epoch above threshold as the trigger.
    let photflag = config.with_photflag.then(|| {
        let mut flags = vec![0; mjd.len()];
        if let Some(first) = flux.iter().position(|&f| f / config.flux_err >= 5.0) {
            flags[first] = PHOTFLAG_TRIGGER;
        }
        flags
    });

    let metadata = LightCurveMetadata {
        redshift: config.redshift,
        mwebv: config.mwebv,
        peak_mjd: Some(config.peak_mjd),
    };
    LightCurve::new(mjd, flux, flux_err, band, photflag, metadata)
        .context("assembling synthetic light curve")
}

/// Builds `<root>/SIM/<group>/<group>-NNNN_PHOT.FITS` for every group.
pub fn write_sim_tree(
    root: &Path,
    groups: &[&str],
    tables_per_group: usize,
    seed: u64,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (group_index, group) in groups.iter().enumerate() {
        let dir = root.join("SIM").join(group);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating group directory {}", dir.display()))?;

        for table_index in 0..tables_per_group {
            let config = GeneratorConfig {
                seed: seed + (group_index * 1000 + table_index) as u64,
                redshift: Some(0.05 + 0.1 * (table_index + 1) as f64),
                peak_flux: 800.0 + 400.0 * table_index as f64,
                ..Default::default()
            };
            let path = dir.join(format!("{group}-{:04}_PHOT.FITS", table_index + 1));
            let lc = build_light_curve(&config)?;
            write_phot_table(&path, &lc)
                .with_context(|| format!("writing {}", path.display()))?;
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snlccore::io::read_phot_table;
    use tempfile::tempdir;

    #[test]
    fn generator_builds_expected_sample_count() {
        let config = GeneratorConfig::default();
        let lc = build_light_curve(&config).unwrap();
        assert_eq!(lc.len(), 4 * 12);
        assert_eq!(lc.photflag().map(|f| f.len()), Some(lc.len()));
        assert_eq!(lc.metadata().redshift, Some(0.2));
    }

    #[test]
    fn generated_curve_has_detections_and_non_detections() {
        let lc = build_light_curve(&GeneratorConfig::default()).unwrap();
        let mask = lc.detection_mask();
        assert!(mask.count() > 0);
        assert!(mask.count() < lc.len());
        let trigger = lc
            .photflag()
            .unwrap()
            .iter()
            .filter(|&&f| f == PHOTFLAG_TRIGGER)
            .count();
        assert_eq!(trigger, 1);
    }

    #[test]
    fn same_seed_repeats_the_curve() {
        let config = GeneratorConfig {
            seed: 13,
            ..Default::default()
        };
        let a = build_light_curve(&config).unwrap();
        let b = build_light_curve(&config).unwrap();
        assert_eq!(a.flux(), b.flux());
    }

    #[test]
    fn sim_tree_is_readable() {
        let dir = tempdir().unwrap();
        let written = write_sim_tree(dir.path(), &["GEN_A"], 2, 7).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("SIM/GEN_A/GEN_A-0001_PHOT.FITS"));
        let lc = read_phot_table(&written[1]).unwrap();
        assert_eq!(lc.len(), 48);
        assert!(lc.metadata().redshift.is_some());
    }
}
