// Fleet-level reliability indicators
use super::asset::Asset;
use super::criticality::{self, CriticalityLevel};
use super::severity::SeverityLevel;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetKpis {
    pub asset_count: usize,
    pub mean_mtbf: f64,
    pub mean_mttr: f64,
    pub mean_health_score: f64,
    pub severity_distribution: BTreeMap<SeverityLevel, usize>,
}

pub fn fleet_kpis(assets: &[Asset]) -> FleetKpis {
    let mut severity_distribution: BTreeMap<SeverityLevel, usize> =
        SeverityLevel::ALL.iter().map(|level| (*level, 0)).collect();
    for asset in assets {
        *severity_distribution.entry(asset.severity()).or_default() += 1;
    }

    FleetKpis {
        asset_count: assets.len(),
        mean_mtbf: mean(assets.iter().map(|a| a.mtbf)),
        mean_mttr: mean(assets.iter().map(|a| a.mttr)),
        mean_health_score: mean(assets.iter().map(|a| a.health_score() as f64)),
        severity_distribution,
    }
}

fn mean<I: ExactSizeIterator<Item = f64>>(values: I) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Risk of immediate unavailability, the complement of health (0-100).
pub fn immediate_risk(asset: &Asset) -> f64 {
    (100.0 - asset.health_score() as f64).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAsset {
    pub asset_id: String,
    pub name: String,
    pub score: f64,
    pub level: CriticalityLevel,
}

/// Assets ordered by criticality score, highest first. Ties keep input order.
pub fn rank_by_criticality(assets: &[Asset]) -> Vec<RankedAsset> {
    let mut ranked: Vec<RankedAsset> = assets
        .iter()
        .map(|asset| {
            let scored = criticality::score(asset.criticality.as_ref());
            RankedAsset {
                asset_id: asset.id.clone(),
                name: asset.name.clone(),
                score: scored.score,
                level: scored.level,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
