//! Photometry model, detection logic and plotting for SNANA light-curve tables.
//!
//! The modules cover one simulated object at a time: reading a `PHOT.FITS`
//! table, classifying samples as detections, converting flux to magnitude
//! and describing the resulting plots. Batch traversal lives in the driver.

pub mod io;
pub mod math;
pub mod model;
pub mod photometry;
pub mod prelude;
pub mod render;
pub mod telemetry;

pub use model::{BatchSummary, LightCurve, LightCurveMetadata};
pub use prelude::{Figure, LcError, LcResult};
