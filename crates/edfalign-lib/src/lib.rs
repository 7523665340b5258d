pub mod conditioning;
pub mod config;
pub mod detectors;
pub mod error;
pub mod io;
pub mod plot;
pub mod series;
pub mod signal;

pub use conditioning::*;
pub use detectors::edge::*;
pub use series::*;
pub use signal::*;
