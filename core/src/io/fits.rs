//! SNANA `PHOT.FITS` table access.
//!
//! Samples live in the binary table extension named `PHOT`; per-object
//! scalars are keywords of the primary header.

use crate::model::lightcurve::{LightCurve, LightCurveMetadata};
use crate::prelude::{LcError, LcResult};
use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::headers::ReadsKey;
use fitsio::tables::{ColumnDataType, ColumnDescription};
use fitsio::FitsFile;
use std::path::Path;

pub const PHOT_EXTENSION: &str = "PHOT";

pub const COL_MJD: &str = "MJD";
pub const COL_FLUX: &str = "FLUXCAL";
pub const COL_FLUX_ERR: &str = "FLUXCALERR";
pub const COL_BAND: &str = "BAND";
pub const COL_PHOTFLAG: &str = "PHOTFLAG";

pub const KEY_REDSHIFT: &str = "REDSHIFT_CMB";
pub const KEY_MWEBV: &str = "MWEBV";
pub const KEY_PEAKMJD: &str = "PEAKMJD";

/// cfitsio status for a header keyword that does not exist.
const KEY_NO_EXIST: i32 = 202;

/// Reads one photometry table. The file is closed before returning.
pub fn read_phot_table(path: &Path) -> LcResult<LightCurve> {
    let mut fptr = FitsFile::open(path)?;

    let phot = fptr
        .hdu(PHOT_EXTENSION)
        .map_err(|_| LcError::MissingExtension {
            path: path.to_path_buf(),
            extension: PHOT_EXTENSION,
        })?;

    let mjd: Vec<f64> = phot.read_col(&mut fptr, COL_MJD)?;
    let flux: Vec<f64> = phot.read_col(&mut fptr, COL_FLUX)?;
    let flux_err: Vec<f64> = phot.read_col(&mut fptr, COL_FLUX_ERR)?;
    let band: Vec<String> = phot.read_col(&mut fptr, COL_BAND)?;
    let band = band.into_iter().map(|b| b.trim().to_string()).collect();
    let photflag = if has_column(&phot, COL_PHOTFLAG) {
        Some(phot.read_col::<i32>(&mut fptr, COL_PHOTFLAG)?)
    } else {
        None
    };

    let primary = fptr.primary_hdu()?;
    let metadata = LightCurveMetadata {
        redshift: read_key_optional(&primary, &mut fptr, KEY_REDSHIFT)?,
        mwebv: read_key_optional(&primary, &mut fptr, KEY_MWEBV)?,
        peak_mjd: read_key_optional(&primary, &mut fptr, KEY_PEAKMJD)?,
    };

    LightCurve::new(mjd, flux, flux_err, band, photflag, metadata)
}

/// Writes a light curve in the same layout `read_phot_table` expects.
///
/// Fails if `path` already exists.
pub fn write_phot_table(path: &Path, lc: &LightCurve) -> LcResult<()> {
    let mut fptr = FitsFile::create(path).open()?;

    let primary = fptr.primary_hdu()?;
    let meta = lc.metadata();
    for (key, value) in [
        (KEY_REDSHIFT, meta.redshift),
        (KEY_MWEBV, meta.mwebv),
        (KEY_PEAKMJD, meta.peak_mjd),
    ] {
        if let Some(value) = value {
            primary.write_key(&mut fptr, key, value)?;
        }
    }

    let band_width = lc.band().iter().map(|b| b.len()).max().unwrap_or(1).max(1);
    let mut columns = vec![
        ColumnDescription::new(COL_MJD)
            .with_type(ColumnDataType::Double)
            .create()?,
        ColumnDescription::new(COL_BAND)
            .with_type(ColumnDataType::String)
            .that_repeats(band_width)
            .create()?,
        ColumnDescription::new(COL_FLUX)
            .with_type(ColumnDataType::Double)
            .create()?,
        ColumnDescription::new(COL_FLUX_ERR)
            .with_type(ColumnDataType::Double)
            .create()?,
    ];
    if lc.photflag().is_some() {
        columns.push(
            ColumnDescription::new(COL_PHOTFLAG)
                .with_type(ColumnDataType::Int)
                .create()?,
        );
    }

    let phot = fptr.create_table(PHOT_EXTENSION.to_string(), &columns)?;
    phot.write_col(&mut fptr, COL_MJD, lc.mjd())?;
    phot.write_col(&mut fptr, COL_BAND, lc.band())?;
    phot.write_col(&mut fptr, COL_FLUX, lc.flux())?;
    phot.write_col(&mut fptr, COL_FLUX_ERR, lc.flux_err())?;
    if let Some(flags) = lc.photflag() {
        phot.write_col(&mut fptr, COL_PHOTFLAG, flags)?;
    }
    Ok(())
}

fn has_column(hdu: &FitsHdu, name: &str) -> bool {
    match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => column_descriptions.iter().any(|col| col.name == name),
        _ => false,
    }
}

/// `None` only when the key is absent; a present but unreadable value is an error.
fn read_key_optional<T: ReadsKey>(
    hdu: &FitsHdu,
    fptr: &mut FitsFile,
    key: &str,
) -> LcResult<Option<T>> {
    match hdu.read_key(fptr, key) {
        Ok(value) => Ok(Some(value)),
        Err(fitsio::errors::Error::Fits(err)) if err.status == KEY_NO_EXIST => Ok(None),
        Err(err) => Err(err.into()),
    }
}
