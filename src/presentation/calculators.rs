// Stateless calculator endpoints
use crate::domain::alignment::{self, AlignmentMeasurement, LossEstimate, OperatingParams};
use crate::domain::balancing::{self, BalanceAssessment, BalanceGrade, BalanceInput, BALANCE_GRADES};
use crate::domain::criticality::{self, CriticalityAssessment, CriticalityScore, GridCell};
use crate::domain::fmeca::{self, FailureMode, RpnBand};
use crate::domain::severity::{self, SeverityLevel};
use crate::domain::tolerance::{self, PartKind, ToleranceResult};
use crate::presentation::error::ApiError;
use crate::presentation::extract::{lenient_f64, not_a_number, ApiJson};
use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SeverityRequest {
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityResponse {
    pub severity: SeverityLevel,
    pub health_score: u8,
}

/// A missing or non-numeric value is unreadable and classifies as `D`.
pub async fn classify_severity(ApiJson(request): ApiJson<SeverityRequest>) -> Json<SeverityResponse> {
    let level = severity::classify(request.value, &request.unit);
    Json(SeverityResponse {
        severity: level,
        health_score: level.health_score(),
    })
}

#[derive(Serialize)]
pub struct CriticalityResponse {
    #[serde(flatten)]
    pub score: CriticalityScore,
    pub cell: GridCell,
}

/// A `null` body scores the default assessment.
pub async fn score_criticality(
    ApiJson(assessment): ApiJson<Option<CriticalityAssessment>>,
) -> Result<Json<CriticalityResponse>, ApiError> {
    if let Some(assessment) = &assessment {
        assessment.validate()?;
    }
    let score = criticality::score(assessment.as_ref());
    Ok(Json(CriticalityResponse {
        cell: score.grid_cell(),
        score,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FmecaResponse {
    #[serde(flatten)]
    pub mode: FailureMode,
    pub band: RpnBand,
    pub residual_band: RpnBand,
    pub improvement_percent: Option<u32>,
}

pub async fn evaluate_fmeca(ApiJson(mode): ApiJson<FailureMode>) -> Json<FmecaResponse> {
    let mode = fmeca::recompute(mode);
    Json(FmecaResponse {
        band: mode.band(),
        residual_band: mode.residual_band(),
        improvement_percent: mode.improvement_percent(),
        mode,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceRequest {
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub nominal_diameter: f64,
    pub fit_class: Option<String>,
    #[serde(default = "default_part")]
    pub part: PartKind,
}

fn default_part() -> PartKind {
    PartKind::Shaft
}

pub async fn lookup_tolerance(
    ApiJson(request): ApiJson<ToleranceRequest>,
) -> Result<Json<ToleranceResult>, ApiError> {
    let fit_class = request
        .fit_class
        .as_deref()
        .unwrap_or_else(|| request.part.default_fit_class());
    let result = tolerance::lookup(request.nominal_diameter, fit_class, request.part)?;
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct CatalogQuery {
    #[serde(default = "default_part")]
    pub part: PartKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub part: PartKind,
    pub default_fit_class: &'static str,
    pub fit_classes: Vec<&'static str>,
}

pub async fn tolerance_catalog(Query(query): Query<CatalogQuery>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        part: query.part,
        default_fit_class: query.part.default_fit_class(),
        fit_classes: query.part.catalog().iter().map(|fit| fit.name).collect(),
    })
}

pub async fn assess_balance(
    ApiJson(input): ApiJson<BalanceInput>,
) -> Result<Json<BalanceAssessment>, ApiError> {
    Ok(Json(balancing::assess(&input)?))
}

pub async fn balance_grades() -> Json<&'static [BalanceGrade]> {
    Json(BALANCE_GRADES)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentRequest {
    pub measurement: AlignmentMeasurement,
    pub rpm: f64,
    pub params: OperatingParams,
}

pub async fn estimate_alignment_loss(
    ApiJson(request): ApiJson<AlignmentRequest>,
) -> Result<Json<LossEstimate>, ApiError> {
    let estimate = alignment::estimate_loss(&request.measurement, request.rpm, &request.params)?;
    Ok(Json(estimate))
}
