// HTTP request handlers for assets and fleet views
use crate::application::notification_service::MaintenanceAlert;
use crate::domain::anomaly::AnomalyPoint;
use crate::domain::asset::{Asset, SensorReading, SensorType};
use crate::domain::criticality::{CriticalityAssessment, RiskMatrix};
use crate::domain::fmeca::FailureMode;
use crate::domain::kpi::{self, FleetKpis, RankedAsset};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use crate::presentation::extract::ApiJson;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Asset,
    pub immediate_risk: f64,
}

impl From<Asset> for AssetView {
    fn from(asset: Asset) -> Self {
        let immediate_risk = kpi::immediate_risk(&asset);
        Self {
            asset,
            immediate_risk,
        }
    }
}

pub async fn list_assets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssetView>>, ApiError> {
    let assets = state.asset_service.list_assets().await?;
    Ok(Json(assets.into_iter().map(AssetView::from).collect()))
}

pub async fn get_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AssetView>, ApiError> {
    let asset = state.asset_service.get_asset(&id).await?;
    Ok(Json(asset.into()))
}

pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    ApiJson(asset): ApiJson<Asset>,
) -> Result<(StatusCode, Json<AssetView>), ApiError> {
    let asset = state.asset_service.create_asset(asset).await?;
    Ok((StatusCode::CREATED, Json(asset.into())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRequest {
    pub sensor_type: SensorType,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ReadingResponse {
    pub asset: AssetView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<MaintenanceAlert>,
}

/// Live telemetry ingest
pub async fn ingest_reading(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ReadingRequest>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let outcome = state
        .asset_service
        .ingest_reading(&id, request.sensor_type, request.value, request.timestamp)
        .await?;
    Ok(Json(ReadingResponse {
        asset: outcome.asset.into(),
        alert: outcome.alert,
    }))
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub tag: String,
    pub unit: String,
    #[serde(default)]
    pub readings: Vec<SensorReading>,
}

/// Trend import for one measurement point
pub async fn import_trend(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ImportRequest>,
) -> Result<Json<AssetView>, ApiError> {
    let asset = state
        .asset_service
        .import_trend(&request.tag, &request.unit, request.readings)
        .await?;
    Ok(Json(asset.into()))
}

pub async fn update_criticality(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(assessment): ApiJson<CriticalityAssessment>,
) -> Result<Json<AssetView>, ApiError> {
    let asset = state.asset_service.update_criticality(&id, assessment).await?;
    Ok(Json(asset.into()))
}

pub async fn update_fmeca(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(modes): ApiJson<Vec<FailureMode>>,
) -> Result<Json<AssetView>, ApiError> {
    let asset = state.asset_service.update_fmeca(&id, modes).await?;
    Ok(Json(asset.into()))
}

pub async fn fleet_kpis(State(state): State<Arc<AppState>>) -> Result<Json<FleetKpis>, ApiError> {
    Ok(Json(state.asset_service.fleet_kpis().await?))
}

pub async fn risk_matrix(State(state): State<Arc<AppState>>) -> Result<Json<RiskMatrix>, ApiError> {
    Ok(Json(state.asset_service.risk_matrix().await?))
}

pub async fn criticality_ranking(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RankedAsset>>, ApiError> {
    Ok(Json(state.asset_service.criticality_ranking().await?))
}

#[derive(Deserialize)]
pub struct AnomalyQuery {
    pub sensor: Option<String>,
}

pub async fn asset_anomalies(
    Path(id): Path<String>,
    Query(query): Query<AnomalyQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnomalyPoint>>, ApiError> {
    let points = state
        .asset_service
        .anomalies(&id, query.sensor.as_deref())
        .await?;
    Ok(Json(points))
}
