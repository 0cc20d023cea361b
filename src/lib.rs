//! Flight data dashboard core.
//!
//! The filter pipeline and its derived views are plain functions over an
//! in-memory [`data::model::FlightTable`], independent of any UI.

pub mod config;
pub mod data;
