//! Command-line simulation runner for the dispatch engine.
//!
//! Loads records, replays trip requests through a [`Dispatcher`](rideshare_core::Dispatcher)
//! on a simulated clock, and reports the outcome as JSON.

pub mod config;
pub mod runner;

pub use config::load_config;
pub use runner::{plan_requests, run, Rejection, RunPlan, RunSummary};
