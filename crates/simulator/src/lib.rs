//! # ROI Dashboard Growth Simulator
//!
//! Answers "if I had invested X on date D and added Y every month, where would I be
//! today?" by replaying a hypothetical capital base through the model portfolio's actual
//! historical path. Each contribution grows independently from the price level at which
//! it was made.

pub mod models;
pub mod schedule;
pub mod simulation;

pub use models::{SimulationPoint, SimulatorInput, SimulatorResult};
pub use schedule::contribution_dates;
pub use simulation::run_simulation;
