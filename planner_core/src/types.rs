//! Core domain types for the workout planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their difficulty levels
//! - The exercise catalog
//! - Plan requests and generated workout plans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::profile::UserProfile;

// ============================================================================
// Exercise Types
// ============================================================================

/// Difficulty tag carried by catalog rows and by a user's fitness level.
///
/// The three standard levels parse case-insensitively; any other label is kept
/// verbatim and only matches itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Other(label) => label,
        }
    }
}

impl From<&str> for DifficultyLevel {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "beginner" => DifficultyLevel::Beginner,
            "intermediate" => DifficultyLevel::Intermediate,
            "advanced" => DifficultyLevel::Advanced,
            _ => DifficultyLevel::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for DifficultyLevel {
    fn from(value: String) -> Self {
        DifficultyLevel::from(value.as_str())
    }
}

impl From<DifficultyLevel> for String {
    fn from(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog row, serialized as it appears in a day's plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub benefit: String,
    pub target_muscle_group: String,
    pub equipment_needed: String,
    pub difficulty_level: Option<DifficultyLevel>,
    pub workout_type: String,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete, read-only table of exercises
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}

// ============================================================================
// Request and Plan Types
// ============================================================================

/// A validated plan request
#[derive(Clone, Debug)]
pub struct PlanRequest {
    pub user_profile: UserProfile,
    pub start_date: NaiveDate,
    pub plan_duration_days: u32,
}

/// Exercises scheduled for a single workout day
pub type DayPlan = Vec<Exercise>;

/// A generated plan: ISO date → exercises, plus the predicted workout type
#[derive(Clone, Debug, Serialize)]
pub struct WorkoutPlan {
    pub workout_type: String,
    pub days: BTreeMap<String, DayPlan>,
}
