//! # ROI Dashboard Ingestion
//!
//! Turns CSV text uploaded by an admin into series points. Parsing never fails as a whole:
//! each bad line becomes a diagnostic and the remaining lines are still used.

pub mod csv_series;

pub use csv_series::{ParsedSeries, parse_series_csv};
