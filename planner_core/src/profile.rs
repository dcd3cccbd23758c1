//! User profile validation and normalization.
//!
//! Requests carry the profile as a loosely typed JSON object keyed by the
//! dataset's column names. This module turns it into a [`UserProfile`] and
//! back into the flat [`ProfileRecord`] the classifier scores.

use crate::types::DifficultyLevel;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const AGE_FIELD: &str = "Age";
pub const GENDER_FIELD: &str = "Gender";
pub const WEIGHT_FIELD: &str = "Weight (kg)";
pub const HEIGHT_FIELD: &str = "Height (m)";
pub const FITNESS_LEVEL_FIELD: &str = "Fitness_Level";
pub const FREQUENCY_FIELD: &str = "Workout_Frequency (days/week)";
pub const BMI_FIELD: &str = "BMI";

/// Fields every profile must carry, in the order they are reported when missing
pub const REQUIRED_FIELDS: [&str; 5] = [
    AGE_FIELD,
    GENDER_FIELD,
    WEIGHT_FIELD,
    HEIGHT_FIELD,
    FITNESS_LEVEL_FIELD,
];

const KNOWN_FIELDS: [&str; 7] = [
    AGE_FIELD,
    GENDER_FIELD,
    WEIGHT_FIELD,
    HEIGHT_FIELD,
    FITNESS_LEVEL_FIELD,
    FREQUENCY_FIELD,
    BMI_FIELD,
];

/// A single classifier input value
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Convert a JSON value, treating numeric strings as numbers.
    ///
    /// Nulls, arrays and objects carry no feature and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(FeatureValue::Number),
            Value::String(s) => Some(match parse_number_str(s) {
                Some(n) => FeatureValue::Number(n),
                None => FeatureValue::Text(s.clone()),
            }),
            Value::Bool(b) => Some(FeatureValue::Number(if *b { 1.0 } else { 0.0 })),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Text(_) => None,
        }
    }

    /// Textual form used for categorical matching
    pub fn as_text(&self) -> String {
        match self {
            FeatureValue::Number(n) => n.to_string(),
            FeatureValue::Text(s) => s.clone(),
        }
    }
}

/// Flat feature record handed to the classifier
pub type ProfileRecord = BTreeMap<String, FeatureValue>;

/// A validated user profile
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub age: f64,
    pub gender: String,
    pub weight_kg: f64,
    pub height_m: f64,
    pub fitness_level: DifficultyLevel,
    pub workout_frequency: u32,
    pub bmi: f64,
    /// Remaining profile keys, passed through to the classifier
    pub extra: BTreeMap<String, FeatureValue>,
}

impl UserProfile {
    /// Validate a raw profile object.
    ///
    /// Missing required fields are all reported together. BMI is computed from
    /// weight and height unless the profile already supplies one.
    pub fn from_fields(fields: &Map<String, Value>, default_frequency: u32) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !fields.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        let weight_kg = parse_number(&fields[WEIGHT_FIELD]);
        let height_m = parse_number(&fields[HEIGHT_FIELD]);
        let (weight_kg, height_m) = match (weight_kg, height_m) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => return Err(Error::Validation("Invalid weight or height values".into())),
        };

        let age = parse_number(&fields[AGE_FIELD])
            .ok_or_else(|| Error::Validation("Invalid age value".into()))?;

        let bmi = match fields.get(BMI_FIELD) {
            Some(value) => parse_number(value)
                .ok_or_else(|| Error::Validation("Invalid BMI value".into()))?,
            None => compute_bmi(weight_kg, height_m),
        };

        let workout_frequency = match fields.get(FREQUENCY_FIELD) {
            Some(value) => parse_count(value).ok_or_else(|| {
                Error::Validation(format!("Invalid {} value", FREQUENCY_FIELD))
            })?,
            None => default_frequency,
        };

        let extra = fields
            .iter()
            .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| FeatureValue::from_json(value).map(|v| (key.clone(), v)))
            .collect();

        Ok(Self {
            age,
            gender: json_text(&fields[GENDER_FIELD]),
            weight_kg,
            height_m,
            fitness_level: DifficultyLevel::from(json_text(&fields[FITNESS_LEVEL_FIELD])),
            workout_frequency,
            bmi,
            extra,
        })
    }

    /// Flatten the profile into the record the classifier scores
    pub fn to_record(&self) -> ProfileRecord {
        let mut record = self.extra.clone();
        record.insert(AGE_FIELD.into(), FeatureValue::Number(self.age));
        record.insert(GENDER_FIELD.into(), FeatureValue::Text(self.gender.clone()));
        record.insert(WEIGHT_FIELD.into(), FeatureValue::Number(self.weight_kg));
        record.insert(HEIGHT_FIELD.into(), FeatureValue::Number(self.height_m));
        record.insert(
            FITNESS_LEVEL_FIELD.into(),
            FeatureValue::Text(self.fitness_level.to_string()),
        );
        record.insert(
            FREQUENCY_FIELD.into(),
            FeatureValue::Number(f64::from(self.workout_frequency)),
        );
        record.insert(BMI_FIELD.into(), FeatureValue::Number(self.bmi));
        record
    }
}

/// BMI rounded to two decimals
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 100.0).round() / 100.0
}

fn parse_number_str(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric value from a JSON number or numeric string
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

/// Non-negative whole number from a JSON integer, integral float or integer string
pub(crate) fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn base_profile() -> Value {
        json!({
            "Age": 30,
            "Gender": "Male",
            "Weight (kg)": 80.0,
            "Height (m)": 1.8,
            "Fitness_Level": "Intermediate"
        })
    }

    #[test]
    fn test_bmi_computed_when_absent() {
        let profile = UserProfile::from_fields(&fields(base_profile()), 4).unwrap();
        assert_eq!(profile.bmi, 24.69);
        assert_eq!(profile.workout_frequency, 4);
        assert_eq!(profile.fitness_level, DifficultyLevel::Intermediate);
    }

    #[test]
    fn test_supplied_bmi_is_kept() {
        let mut raw = base_profile();
        raw["BMI"] = json!(22.5);
        let profile = UserProfile::from_fields(&fields(raw), 4).unwrap();
        assert_eq!(profile.bmi, 22.5);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let raw = json!({ "Gender": "Female", "Height (m)": 1.6 });
        let err = UserProfile::from_fields(&fields(raw), 4).unwrap_err();
        match err {
            Error::MissingFields(missing) => {
                assert_eq!(missing, vec!["Age", "Weight (kg)", "Fitness_Level"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_height_rejected() {
        let mut raw = base_profile();
        raw["Height (m)"] = json!("abc");
        let err = UserProfile::from_fields(&fields(raw), 4).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid weight or height values");
    }

    #[test]
    fn test_zero_height_rejected() {
        let mut raw = base_profile();
        raw["Height (m)"] = json!(0);
        assert!(UserProfile::from_fields(&fields(raw), 4).is_err());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut raw = base_profile();
        raw["Weight (kg)"] = json!("60");
        raw["Height (m)"] = json!(" 1.5 ");
        raw["Workout_Frequency (days/week)"] = json!("3");
        let profile = UserProfile::from_fields(&fields(raw), 4).unwrap();
        assert_eq!(profile.weight_kg, 60.0);
        assert_eq!(profile.bmi, 26.67);
        assert_eq!(profile.workout_frequency, 3);
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let mut raw = base_profile();
        raw["Workout_Frequency (days/week)"] = json!(-2);
        let err = UserProfile::from_fields(&fields(raw), 4).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_record_includes_extra_features() {
        let mut raw = base_profile();
        raw["Max_BPM"] = json!(180);
        raw["Experience_Level"] = json!("2");
        raw["Notes"] = json!(null);
        let profile = UserProfile::from_fields(&fields(raw), 4).unwrap();
        let record = profile.to_record();

        assert_eq!(record["Max_BPM"], FeatureValue::Number(180.0));
        assert_eq!(record["Experience_Level"], FeatureValue::Number(2.0));
        assert!(!record.contains_key("Notes"));
        assert_eq!(record["Gender"], FeatureValue::Text("Male".into()));
        assert_eq!(record["BMI"], FeatureValue::Number(24.69));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&json!(7)), Some(7));
        assert_eq!(parse_count(&json!(7.0)), Some(7));
        assert_eq!(parse_count(&json!("14")), Some(14));
        assert_eq!(parse_count(&json!(2.5)), None);
        assert_eq!(parse_count(&json!(-1)), None);
        assert_eq!(parse_count(&json!("seven")), None);
    }
}
