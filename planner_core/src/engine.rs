//! Plan builder: schedules workout days and samples exercises for each.
//!
//! Selection for a day:
//! - Primary rows share the predicted workout type, narrowed to the user's
//!   difficulty level when any row matches it
//! - With enough primary rows, a uniform sample without replacement is taken
//! - Otherwise every primary row is used and the rest is topped up from the
//!   complement (other workout types), narrowed the same way
//! - Rows dropped by narrowing fill whatever is still missing, so a day is
//!   short only when the catalog itself is
//!
//! All randomness comes from the caller's RNG so tests can seed it.

use crate::classifier::Classifier;
use crate::config::PlanConfig;
use crate::{
    Catalog, DayPlan, DifficultyLevel, Error, Exercise, PlanRequest, Result, WorkoutPlan,
};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Predict the workout type for a request and build its plan
pub fn generate_plan<R: Rng + ?Sized>(
    catalog: &Catalog,
    classifier: &dyn Classifier,
    request: &PlanRequest,
    settings: &PlanConfig,
    rng: &mut R,
) -> Result<WorkoutPlan> {
    let record = request.user_profile.to_record();
    let workout_type = classifier.predict(&record)?;
    tracing::info!("Predicted workout type: {}", workout_type);

    build_plan(catalog, request, &workout_type, settings, rng)
}

/// Build a plan for an already-predicted workout type
pub fn build_plan<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &PlanRequest,
    workout_type: &str,
    settings: &PlanConfig,
    rng: &mut R,
) -> Result<WorkoutPlan> {
    let profile = &request.user_profile;
    let workout_days = schedule_workout_days(
        request.start_date,
        request.plan_duration_days,
        profile.workout_frequency,
        rng,
    )?;

    let mut days = BTreeMap::new();
    for day in workout_days {
        let exercises = select_day_exercises(
            catalog,
            workout_type,
            &profile.fitness_level,
            settings.exercises_per_day,
            rng,
        );
        tracing::debug!("{}: selected {} exercises", day, exercises.len());
        days.insert(day.format(crate::request::DATE_FORMAT).to_string(), exercises);
    }

    Ok(WorkoutPlan {
        workout_type: workout_type.to_string(),
        days,
    })
}

/// Choose which dates in the plan window are workout days.
///
/// Returns every date when the weekly frequency covers the whole window,
/// otherwise exactly `frequency` distinct dates, ascending.
pub fn schedule_workout_days<R: Rng + ?Sized>(
    start_date: NaiveDate,
    duration_days: u32,
    frequency: u32,
    rng: &mut R,
) -> Result<Vec<NaiveDate>> {
    let all_days = (0..u64::from(duration_days))
        .map(|offset| start_date.checked_add_days(Days::new(offset)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            Error::Generation(format!(
                "{} days from {} is outside the supported calendar range",
                duration_days, start_date
            ))
        })?;

    if frequency >= duration_days {
        return Ok(all_days);
    }

    let mut chosen: Vec<NaiveDate> = all_days
        .choose_multiple(rng, frequency as usize)
        .copied()
        .collect();
    chosen.sort();
    Ok(chosen)
}

/// Select one day's exercises.
///
/// The list is shorter than `count` only when the whole catalog is. Top-ups
/// prefer complement rows at the user's level; when those run out, any unused
/// row fills the remainder.
pub fn select_day_exercises<R: Rng + ?Sized>(
    catalog: &Catalog,
    workout_type: &str,
    fitness_level: &DifficultyLevel,
    count: usize,
    rng: &mut R,
) -> DayPlan {
    let (primary, complement): (Vec<&Exercise>, Vec<&Exercise>) = catalog
        .exercises
        .iter()
        .partition(|e| e.workout_type == workout_type);

    let primary = narrow_to_level(primary, fitness_level);

    if primary.len() >= count {
        return to_day(primary.choose_multiple(rng, count).copied());
    }

    let needed = count - primary.len();
    let complement = narrow_to_level(complement, fitness_level);
    tracing::debug!(
        "Only {} '{}' exercises available, topping up {} from {} others",
        primary.len(),
        workout_type,
        needed,
        complement.len()
    );

    let mut picked = primary;
    picked.extend(complement.choose_multiple(rng, needed).copied());

    if picked.len() < count {
        let leftover: Vec<&Exercise> = catalog
            .exercises
            .iter()
            .filter(|e| !picked.iter().any(|p| std::ptr::eq(*p, *e)))
            .collect();
        let missing = count - picked.len();
        tracing::debug!(
            "Filling {} more from {} remaining catalog rows",
            missing.min(leftover.len()),
            leftover.len()
        );
        picked.extend(leftover.choose_multiple(rng, missing).copied());
    }

    to_day(picked)
}

/// Narrow rows to the user's difficulty level, keeping all rows if none match
fn narrow_to_level<'a>(rows: Vec<&'a Exercise>, level: &DifficultyLevel) -> Vec<&'a Exercise> {
    narrow_or_keep(rows, |e| e.difficulty_level.as_ref() == Some(level))
}

/// Apply a filter unless it would leave nothing
fn narrow_or_keep<'a, P>(rows: Vec<&'a Exercise>, keep: P) -> Vec<&'a Exercise>
where
    P: Fn(&Exercise) -> bool,
{
    let narrowed: Vec<&Exercise> = rows.iter().copied().filter(|e| keep(*e)).collect();
    if narrowed.is_empty() {
        rows
    } else {
        narrowed
    }
}

fn to_day<'a>(rows: impl IntoIterator<Item = &'a Exercise>) -> DayPlan {
    rows.into_iter().cloned().collect()
}
