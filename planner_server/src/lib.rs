//! HTTP service around the workout planner core.
//!
//! The catalog and classifier are loaded once at startup. Either may be
//! missing; the service still starts and reports the gap through `/health`.

use axum::Router;
use planner_core::{Catalog, Classifier, Config, LinearModel, PlanConfig};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Exercise catalog, absent if it failed to load
    pub catalog: Option<Arc<Catalog>>,
    /// Workout-type classifier, absent if the model failed to load
    pub classifier: Option<Arc<dyn Classifier>>,
    pub plan: Arc<PlanConfig>,
}

impl AppState {
    pub fn new(
        catalog: Option<Catalog>,
        classifier: Option<Arc<dyn Classifier>>,
        plan: PlanConfig,
    ) -> Self {
        Self {
            catalog: catalog.map(Arc::new),
            classifier,
            plan: Arc::new(plan),
        }
    }

    /// Load catalog and model from the configured paths.
    ///
    /// Load failures are logged and leave the dependency unavailable.
    pub fn load(config: &Config) -> Self {
        let catalog = match Catalog::load_from(&config.data.catalog_path) {
            Ok(catalog) => {
                for problem in catalog.validate() {
                    tracing::warn!("Catalog: {}", problem);
                }
                Some(catalog)
            }
            Err(e) => {
                tracing::error!(
                    "Exercise data not loaded from {:?}: {}",
                    config.data.catalog_path,
                    e
                );
                None
            }
        };

        let classifier: Option<Arc<dyn Classifier>> =
            match LinearModel::load_from(&config.data.model_path) {
                Ok(model) => {
                    let labels = model.labels();
                    tracing::info!("Model predicts: {}", labels.join(", "));
                    if let Some(catalog) = &catalog {
                        for label in catalog.uncovered_workout_types(&labels) {
                            tracing::warn!(
                                "No '{}' exercises in catalog; plans for it use other types",
                                label
                            );
                        }
                    }
                    Some(Arc::new(model))
                }
                Err(e) => {
                    tracing::error!(
                        "Model not loaded from {:?}: {}",
                        config.data.model_path,
                        e
                    );
                    None
                }
            };

        Self::new(catalog, classifier, config.plan.clone())
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/generate_plan", post(api::generate_plan))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router with the configured CORS policy applied
pub fn build_app(state: AppState, cors_permissive: bool) -> Router {
    let router = build_router(state);
    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
