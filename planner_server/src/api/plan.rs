//! Plan generation endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use planner_core::{engine, DayPlan, PlanRequest, WorkoutPlan};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::ApiError;
use crate::AppState;

/// Successful plan response
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub status: &'static str,
    pub workout_type: String,
    pub workout_plan: BTreeMap<String, DayPlan>,
}

impl From<WorkoutPlan> for PlanResponse {
    fn from(plan: WorkoutPlan) -> Self {
        Self {
            status: "success",
            workout_type: plan.workout_type,
            workout_plan: plan.days,
        }
    }
}

/// POST /generate_plan
///
/// Body: `{ user_profile, start_date?, plan_duration_days? }`
pub async fn generate_plan(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlanResponse>, ApiError> {
    let (catalog, classifier) = match (&state.catalog, &state.classifier) {
        (Some(catalog), Some(classifier)) => (catalog, classifier),
        _ => return Err(ApiError::Unavailable),
    };

    let Json(body) = body.map_err(|rejection| ApiError::Validation {
        message: rejection.body_text(),
        missing_fields: None,
    })?;

    let today = chrono::Local::now().date_naive();
    let request = PlanRequest::from_json(&body, &state.plan, today)?;

    let plan = engine::generate_plan(
        catalog,
        classifier.as_ref(),
        &request,
        &state.plan,
        &mut rand::thread_rng(),
    )?;

    Ok(Json(PlanResponse::from(plan)))
}
