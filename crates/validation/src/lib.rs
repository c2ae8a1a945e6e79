//! # ROI Dashboard Validation
//!
//! Structural and staleness checks over everything the dashboard is about to publish.
//! Findings are split into `errors` (the payload is unreliable and should not be
//! published) and `warnings` (usable, but an editor should look). No check short-circuits
//! another; the summary is the concatenation of all of them.

pub mod summary;
pub mod validator;

pub use summary::ValidationSummary;
pub use validator::{ValidationInput, Validator, build_validation_summary, build_validation_summary_now};
