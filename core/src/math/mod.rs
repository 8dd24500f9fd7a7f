pub mod histogram;
pub mod stats;

pub use histogram::Histogram;
pub use stats::StatsHelper;
