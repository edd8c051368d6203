//! Export functionality for encounter lists and dashboard figures.

mod csv;

pub use csv::*;
