#![forbid(unsafe_code)]

//! Core domain model and business logic for the workout planner.
//!
//! This crate provides:
//! - Domain types (exercises, difficulty levels, plans)
//! - Catalog loading and validation
//! - Profile validation and request parsing
//! - Workout-type classification
//! - The plan builder

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod profile;
pub mod request;
pub mod classifier;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, PlanConfig};
pub use profile::{FeatureValue, ProfileRecord, UserProfile, REQUIRED_FIELDS};
pub use classifier::{Classifier, LinearModel};
pub use engine::{build_plan, generate_plan, schedule_workout_days, select_day_exercises};
