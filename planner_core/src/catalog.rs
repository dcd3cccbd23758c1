//! Exercise catalog loading and validation.
//!
//! The catalog is read once from a CSV file whose header row uses the column
//! names of the published exercise dataset (`Name of Exercise`, `Sets`, ...).

use crate::types::*;
use crate::Result;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// CSV row format for reading the catalog
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Name of Exercise")]
    name: String,
    #[serde(rename = "Sets")]
    sets: u32,
    #[serde(rename = "Reps")]
    reps: u32,
    #[serde(rename = "Benefit", default)]
    benefit: String,
    #[serde(rename = "Target Muscle Group", default)]
    target_muscle_group: String,
    #[serde(rename = "Equipment Needed", default)]
    equipment_needed: String,
    #[serde(rename = "Difficulty Level", default)]
    difficulty_level: Option<String>,
    #[serde(rename = "Workout_Type")]
    workout_type: String,
}

impl From<CsvRow> for Exercise {
    fn from(row: CsvRow) -> Self {
        Exercise {
            name: row.name,
            sets: row.sets,
            reps: row.reps,
            benefit: row.benefit,
            target_muscle_group: row.target_muscle_group,
            equipment_needed: row.equipment_needed,
            difficulty_level: row
                .difficulty_level
                .filter(|level| !level.trim().is_empty())
                .map(DifficultyLevel::from),
            workout_type: row.workout_type,
        }
    }
}

impl Catalog {
    /// Build a catalog from already-parsed exercises
    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Load the catalog from a CSV file
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} exercises ({} workout types) from {:?}",
            catalog.len(),
            catalog.workout_types().len(),
            path
        );
        Ok(catalog)
    }

    /// Parse catalog rows from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut exercises = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            exercises.push(Exercise::from(row?));
        }

        Ok(Self { exercises })
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Distinct workout types in first-seen order
    pub fn workout_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.exercises
            .iter()
            .map(|e| e.workout_type.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Number of exercises per workout type, in first-seen order
    pub fn count_by_type(&self) -> Vec<(&str, usize)> {
        self.workout_types()
            .into_iter()
            .map(|t| {
                let count = self
                    .exercises
                    .iter()
                    .filter(|e| e.workout_type == t)
                    .count();
                (t, count)
            })
            .collect()
    }

    /// Labels with no exercise rows of their own
    ///
    /// Plans for these labels are built entirely from other workout types.
    pub fn uncovered_workout_types<'a>(&self, labels: &[&'a str]) -> Vec<&'a str> {
        labels
            .iter()
            .copied()
            .filter(|label| !self.exercises.iter().any(|e| e.workout_type == *label))
            .collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
        }

        let mut seen = HashSet::new();
        for (idx, exercise) in self.exercises.iter().enumerate() {
            // Row numbers are 1-based and skip the header line
            let line = idx + 2;

            if exercise.name.is_empty() {
                errors.push(format!("Row {} has empty exercise name", line));
            }
            if exercise.workout_type.is_empty() {
                errors.push(format!(
                    "Exercise '{}' (row {}) has empty workout type",
                    exercise.name, line
                ));
            }
            if exercise.sets == 0 {
                errors.push(format!("Exercise '{}' (row {}) has zero sets", exercise.name, line));
            }
            if exercise.reps == 0 {
                errors.push(format!("Exercise '{}' (row {}) has zero reps", exercise.name, line));
            }
            if !seen.insert((exercise.workout_type.as_str(), exercise.name.as_str())) {
                errors.push(format!(
                    "Exercise '{}' appears more than once in workout type '{}'",
                    exercise.name, exercise.workout_type
                ));
            }
        }

        errors
    }
}
