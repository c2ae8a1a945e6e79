//! # ROI Dashboard Analytics
//!
//! Pure calculators that turn a performance series and an allocation snapshot into the
//! figures shown on the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** no knowledge of persistence or presentation. Depends only on
//!   `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** every function is referentially transparent and safe to
//!   call from any number of threads at once.
//! - **No Panics on Data:** a zero or negative baseline resolves the affected metric to `0`.
//!
//! ## Public API
//!
//! - `series`: sorting and the backward-only "nearest on or before" lookup.
//! - `roi`: since-inception ROI, trailing-window ROI and maximum drawdown.
//! - `allocation`: invested / cash split of an allocation snapshot.
//! - `AnalyticsEngine` / `RoiDerivedMetrics`: the aggregated dashboard metrics.

// Declare the modules that constitute this crate.
pub mod allocation;
pub mod engine;
pub mod math;
pub mod report;
pub mod roi;
pub mod series;

// Re-export the key components to create a clean, public-facing API.
pub use allocation::{AllocationSplit, calculate_allocation_split};
pub use engine::AnalyticsEngine;
pub use report::RoiDerivedMetrics;
pub use roi::{calculate_max_drawdown, calculate_roi_last_n_days, calculate_roi_since_inception};
pub use series::{find_nearest_on_or_before, normalize_series};
