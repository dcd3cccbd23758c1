//! Workout-type classification.
//!
//! The plan builder only needs a label for a profile, so prediction sits behind
//! the [`Classifier`] trait. [`LinearModel`] is the shipped implementation: a
//! one-vs-rest linear scorer exported to JSON by the training pipeline.

use crate::profile::ProfileRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Maps one profile record to one workout-type label
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &ProfileRecord) -> Result<String>;
}

/// Standardization applied to a numeric feature before weighting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureScale {
    pub mean: f64,
    pub std: f64,
}

/// Weights for a single workout-type label
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassWeights {
    pub label: String,
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// One-vs-rest linear model
///
/// Weight keys name either a numeric profile field (`"Age"`, `"BMI"`) or a
/// categorical indicator written `field=value` (`"Gender=Male"`), which scores
/// 1.0 when the profile's value matches case-insensitively and 0.0 otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<ClassWeights>,
    #[serde(default)]
    pub scaling: BTreeMap<String, FeatureScale>,
}

impl LinearModel {
    /// Load a model exported as JSON
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded classifier with {} workout types from {:?}",
            model.classes.len(),
            path
        );
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: LinearModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::Classifier("model has no classes".into()));
        }
        for class in &self.classes {
            if class.label.trim().is_empty() {
                return Err(Error::Classifier("model has a class with an empty label".into()));
            }
            if !class.bias.is_finite() || class.weights.values().any(|w| !w.is_finite()) {
                return Err(Error::Classifier(format!(
                    "class '{}' has non-finite weights",
                    class.label
                )));
            }
        }
        for (feature, scale) in &self.scaling {
            if !scale.std.is_finite() || scale.std <= 0.0 || !scale.mean.is_finite() {
                return Err(Error::Classifier(format!(
                    "feature '{}' has invalid scaling",
                    feature
                )));
            }
        }
        Ok(())
    }

    /// Labels this model can predict
    pub fn labels(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.label.as_str()).collect()
    }

    fn feature_value(&self, key: &str, record: &ProfileRecord) -> f64 {
        if let Some(value) = record.get(key) {
            let raw = value.as_number().unwrap_or(0.0);
            return match self.scaling.get(key) {
                Some(scale) => (raw - scale.mean) / scale.std,
                None => raw,
            };
        }

        match key.split_once('=') {
            Some((field, category)) => match record.get(field) {
                Some(value) if value.as_text().trim().eq_ignore_ascii_case(category.trim()) => 1.0,
                _ => 0.0,
            },
            None => 0.0,
        }
    }

    fn score(&self, class: &ClassWeights, record: &ProfileRecord) -> f64 {
        class.bias
            + class
                .weights
                .iter()
                .map(|(key, weight)| weight * self.feature_value(key, record))
                .sum::<f64>()
    }
}

impl Classifier for LinearModel {
    fn predict(&self, record: &ProfileRecord) -> Result<String> {
        let mut best: Option<(&ClassWeights, f64)> = None;
        for class in &self.classes {
            let score = self.score(class, record);
            tracing::debug!("Class '{}' scored {:.4}", class.label, score);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class, score)),
            }
        }

        best.map(|(class, _)| class.label.clone())
            .ok_or_else(|| Error::Classifier("model has no classes".into()))
    }
}
