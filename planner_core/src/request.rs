//! Plan request parsing.

use crate::config::PlanConfig;
use crate::profile::{parse_count, UserProfile};
use crate::types::PlanRequest;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl PlanRequest {
    /// Validate a `/generate_plan` body.
    ///
    /// Checks run in the order the fields are reported to callers: profile
    /// fields first, then the start date, then the plan length.
    pub fn from_json(body: &Value, plan: &PlanConfig, today: NaiveDate) -> Result<Self> {
        let body = body
            .as_object()
            .ok_or_else(|| Error::Validation("Request body must be a JSON object".into()))?;

        let empty = Map::new();
        let fields = match body.get("user_profile") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => return Err(Error::Validation("user_profile must be a JSON object".into())),
        };
        let user_profile = UserProfile::from_fields(fields, plan.default_workout_frequency)?;

        let start_date = match body.get("start_date") {
            None | Some(Value::Null) => today,
            Some(Value::String(s)) => parse_start_date(s)?,
            Some(_) => return Err(invalid_date()),
        };

        let plan_duration_days = match body.get("plan_duration_days") {
            None | Some(Value::Null) => plan.default_duration_days,
            Some(value) => parse_count(value)
                .ok_or_else(|| Error::Validation("Invalid plan_duration_days value".into()))?,
        };
        if plan_duration_days > plan.max_duration_days {
            return Err(Error::Validation(format!(
                "plan_duration_days must not exceed {}",
                plan.max_duration_days
            )));
        }

        Ok(Self {
            user_profile,
            start_date,
            plan_duration_days,
        })
    }
}

pub fn parse_start_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| invalid_date())
}

fn invalid_date() -> Error {
    Error::Validation("Invalid start date format. Use YYYY-MM-DD".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn profile() -> Value {
        json!({
            "Age": 25,
            "Gender": "Female",
            "Weight (kg)": 60,
            "Height (m)": 1.65,
            "Fitness_Level": "Beginner"
        })
    }

    #[test]
    fn test_defaults_applied() {
        let body = json!({ "user_profile": profile() });
        let request = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap();
        assert_eq!(request.start_date, today());
        assert_eq!(request.plan_duration_days, 7);
        assert_eq!(request.user_profile.workout_frequency, 4);
    }

    #[test]
    fn test_explicit_values() {
        let body = json!({
            "user_profile": profile(),
            "start_date": "2024-02-27",
            "plan_duration_days": "14"
        });
        let request = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap();
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
        assert_eq!(request.plan_duration_days, 14);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let body = json!({ "user_profile": profile(), "start_date": "2024-13-40" });
        let err = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid start date format. Use YYYY-MM-DD");
    }

    #[test]
    fn test_missing_profile_reports_every_field() {
        let body = json!({ "start_date": "2024-01-01" });
        let err = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap_err();
        match err {
            Error::MissingFields(missing) => assert_eq!(missing.len(), 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_profile_checked_before_date() {
        let body = json!({ "user_profile": {}, "start_date": "not-a-date" });
        let err = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap_err();
        assert!(matches!(err, Error::MissingFields(_)));
    }

    #[test]
    fn test_duration_bounds() {
        let body = json!({ "user_profile": profile(), "plan_duration_days": -3 });
        assert!(PlanRequest::from_json(&body, &PlanConfig::default(), today()).is_err());

        let body = json!({ "user_profile": profile(), "plan_duration_days": 400 });
        let err = PlanRequest::from_json(&body, &PlanConfig::default(), today()).unwrap_err();
        assert!(err.to_string().contains("366"));
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err =
            PlanRequest::from_json(&json!([1, 2]), &PlanConfig::default(), today()).unwrap_err();
        assert!(err.is_validation());
    }
}
