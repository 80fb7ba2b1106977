// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::{calculators, handlers};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    let calc = Router::new()
        .route("/severity", post(calculators::classify_severity))
        .route("/criticality", post(calculators::score_criticality))
        .route("/fmeca", post(calculators::evaluate_fmeca))
        .route("/tolerance", post(calculators::lookup_tolerance))
        .route("/tolerance/catalog", get(calculators::tolerance_catalog))
        .route("/balance", post(calculators::assess_balance))
        .route("/balance/grades", get(calculators::balance_grades))
        .route("/alignment", post(calculators::estimate_alignment_loss));

    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/assets", get(handlers::list_assets).post(handlers::create_asset))
        .route("/assets/:id", get(handlers::get_asset))
        .route("/assets/:id/readings", post(handlers::ingest_reading))
        .route("/assets/:id/criticality", put(handlers::update_criticality))
        .route("/assets/:id/fmeca", put(handlers::update_fmeca))
        .route("/assets/:id/anomalies", get(handlers::asset_anomalies))
        .route("/imports", post(handlers::import_trend))
        .route("/kpi", get(handlers::fleet_kpis))
        .route("/risk-matrix", get(handlers::risk_matrix))
        .route("/criticality/ranking", get(handlers::criticality_ranking))
        .nest("/calc", calc)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
