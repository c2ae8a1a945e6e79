//! # ROI Dashboard Payload
//!
//! Combines the persisted dashboard data with freshly computed metrics and validation
//! findings into the single aggregate the presentation layer renders.

pub mod payload;

pub use payload::{DashboardBuilder, DashboardData, DashboardSeries, RoiDashboardPayload};
