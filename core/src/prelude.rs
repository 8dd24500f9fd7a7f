use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Common error type for reading, binning and rendering light curves.
#[derive(thiserror::Error, Debug)]
pub enum LcError {
    #[error("FITS access failed: {0}")]
    Fits(#[from] fitsio::errors::Error),
    #[error("{} has no {extension} extension", path.display())]
    MissingExtension {
        path: PathBuf,
        extension: &'static str,
    },
    #[error("column {column} has {found} rows, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid histogram range: {0}")]
    InvalidRange(String),
    #[error("render failure: {0}")]
    Render(String),
}

pub type LcResult<T> = Result<T, LcError>;

pub(crate) fn render_err<E: std::fmt::Display>(err: E) -> LcError {
    LcError::Render(err.to_string())
}

/// A fully described plot that can be drawn onto a bitmap.
///
/// Implementors hold only plain data, so the drawing backend exists for the
/// duration of a single `save_png` call.
pub trait Figure {
    fn title(&self) -> &str;
    fn size(&self) -> (u32, u32);
    fn draw(&self, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> LcResult<()>;

    fn save_png(&self, path: &Path) -> LcResult<()> {
        let root = BitMapBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        self.draw(&root)?;
        root.present().map_err(render_err)?;
        Ok(())
    }
}
