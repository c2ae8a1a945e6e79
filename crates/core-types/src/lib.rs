//! # ROI Dashboard Core Types
//!
//! Plain value structures shared by every other crate in the workspace. Nothing here
//! owns state beyond a single computation: values are built from caller-supplied data,
//! fed to the calculators, and dropped.

pub mod enums;
pub mod error;
pub mod models;

// Re-export the core types to provide a clean public API.
pub use enums::SeriesKind;
pub use error::CoreError;
pub use models::{
    AllocationItem, AllocationSnapshot, ChangeLogEvent, DashboardSettings, PerformancePoint,
};
