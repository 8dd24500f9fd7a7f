pub mod fits;

pub use fits::{read_phot_table, write_phot_table};
