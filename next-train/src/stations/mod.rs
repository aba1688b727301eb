//! Station catalog.
//!
//! Maps the station names shown in the selector to the opaque codes the
//! prediction API expects. The table is fixed for the life of the process.

mod catalog;
mod code;
mod error;

pub use catalog::{PLACEHOLDER, StationCatalog, StationEntry};
pub use code::{InvalidStationCode, StationCode};
pub use error::StationError;
