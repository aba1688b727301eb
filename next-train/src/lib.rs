//! Next train board.
//!
//! A small dashboard that answers: "when are the next trains at this
//! station?" Pick a station, fetch live predictions, show them grouped by
//! platform.

pub mod board;
pub mod config;
pub mod format;
pub mod predictions;
pub mod stations;
pub mod web;
