//! Orchestrator crate for the Smart Canteen planner.
//!
//! This crate contains the orchestrator that turns one input record into
//! demand, wait-time and prep-level predictions.

pub mod orchestrator;

pub use orchestrator::{PredictionResult, PrepLevel, RecommendError, RecommendationOrchestrator};
