// Asset service - Use cases that keep derived asset state in line with readings
use crate::application::asset_repository::AssetRepository;
use crate::application::notification_service::{AlertService, MaintenanceAlert};
use crate::domain::anomaly::{self, AnomalyPoint};
use crate::domain::asset::{Asset, SensorReading, SensorType};
use crate::domain::criticality::{CriticalityAssessment, RiskMatrix};
use crate::domain::error::CalcError;
use crate::domain::fmeca::FailureMode;
use crate::domain::kpi::{self, FleetKpis, RankedAsset};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub const IMPORT_LOCATION: &str = "AMS import";
const TAG_SEPARATOR: &str = " - ";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("asset '{0}' not found")]
    AssetNotFound(String),

    #[error("asset '{0}' already exists")]
    AssetExists(String),

    #[error("sensor '{0}' not found")]
    SensorNotFound(String),

    #[error("invalid import tag '{0}', expected \"<asset> - <point>\"")]
    InvalidTag(String),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of feeding one live reading to an asset.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub asset: Asset,
    pub alert: Option<MaintenanceAlert>,
}

/// Asset use cases.
///
/// Every update is read-modify-write against the repository with
/// last-writer-wins semantics; the service is the only place that writes
/// derived fields back.
#[derive(Clone)]
pub struct AssetService {
    repository: Arc<dyn AssetRepository>,
    alerts: AlertService,
    history_limit: usize,
    import_seq: Arc<AtomicU64>,
}

impl AssetService {
    pub fn new(repository: Arc<dyn AssetRepository>, alerts: AlertService, history_limit: usize) -> Self {
        Self {
            repository,
            alerts,
            history_limit,
            import_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn list_assets(&self) -> ServiceResult<Vec<Asset>> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_asset(&self, id: &str) -> ServiceResult<Asset> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::AssetNotFound(id.to_string()))
    }

    /// Store a new asset. Derived fields in the submitted document are ignored.
    pub async fn create_asset(&self, mut asset: Asset) -> ServiceResult<Asset> {
        if self.repository.get(&asset.id).await?.is_some() {
            return Err(ServiceError::AssetExists(asset.id));
        }
        if let Some(assessment) = &asset.criticality {
            assessment.validate()?;
        }
        asset.normalize();
        self.repository.put(asset.clone()).await?;
        tracing::info!(asset_id = %asset.id, severity = asset.severity().code(), "Asset created");
        Ok(asset)
    }

    pub async fn ingest_reading(
        &self,
        asset_id: &str,
        sensor_type: SensorType,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> ServiceResult<IngestOutcome> {
        let mut asset = self.get_asset(asset_id).await?;
        let now = timestamp.unwrap_or_else(Utc::now);
        let previous = asset.severity();

        let idx = asset.record_live_reading(
            sensor_type,
            SensorReading::new(now, value),
            self.history_limit,
        );
        if asset.severity() != previous {
            tracing::info!(
                asset_id = %asset.id,
                from = previous.code(),
                to = asset.severity().code(),
                "Asset severity changed"
            );
        }

        self.repository.put(asset.clone()).await?;

        let alert = self.alerts.check_threshold(&asset, &asset.sensors[idx], now).await;
        Ok(IngestOutcome { asset, alert })
    }

    /// Load a trend exported by a route-based data collector. The tag is
    /// `"<asset name> - <point>"`; unknown asset names create a new asset.
    pub async fn import_trend(
        &self,
        tag: &str,
        unit: &str,
        readings: Vec<SensorReading>,
    ) -> ServiceResult<Asset> {
        let (asset_name, point_tag) = split_tag(tag)?;

        let assets = self.repository.list().await?;
        let mut asset = match assets
            .into_iter()
            .find(|a| a.name.to_lowercase() == asset_name.to_lowercase())
        {
            Some(asset) => asset,
            None => {
                let id = self.next_import_id().await?;
                tracing::info!(asset_id = %id, asset_name, "Creating asset for imported trend");
                Asset::new(id, asset_name, IMPORT_LOCATION)
            }
        };

        asset.import_trend(point_tag, unit, readings);
        tracing::debug!(
            asset_id = %asset.id,
            point = point_tag,
            severity = asset.severity().code(),
            "Trend imported"
        );

        self.repository.put(asset.clone()).await?;
        Ok(asset)
    }

    pub async fn update_criticality(
        &self,
        asset_id: &str,
        assessment: CriticalityAssessment,
    ) -> ServiceResult<Asset> {
        assessment.validate()?;
        let mut asset = self.get_asset(asset_id).await?;
        asset.criticality = Some(assessment);
        self.repository.put(asset.clone()).await?;
        Ok(asset)
    }

    pub async fn update_fmeca(&self, asset_id: &str, modes: Vec<FailureMode>) -> ServiceResult<Asset> {
        let mut asset = self.get_asset(asset_id).await?;
        asset.set_fmeca(modes);
        self.repository.put(asset.clone()).await?;
        Ok(asset)
    }

    pub async fn fleet_kpis(&self) -> ServiceResult<FleetKpis> {
        let assets = self.repository.list().await?;
        Ok(kpi::fleet_kpis(&assets))
    }

    pub async fn risk_matrix(&self) -> ServiceResult<RiskMatrix> {
        let assets = self.repository.list().await?;
        Ok(RiskMatrix::build(
            assets.iter().map(|a| (a.id.as_str(), a.criticality.as_ref())),
        ))
    }

    pub async fn criticality_ranking(&self) -> ServiceResult<Vec<RankedAsset>> {
        let assets = self.repository.list().await?;
        Ok(kpi::rank_by_criticality(&assets))
    }

    /// Anomaly scores for one sensor; without an id the first vibration
    /// sensor is used, falling back to the first sensor.
    pub async fn anomalies(
        &self,
        asset_id: &str,
        sensor_id: Option<&str>,
    ) -> ServiceResult<Vec<AnomalyPoint>> {
        let asset = self.get_asset(asset_id).await?;
        let sensor = match sensor_id {
            Some(id) => asset
                .sensor(id)
                .ok_or_else(|| ServiceError::SensorNotFound(id.to_string()))?,
            None => match asset.sensors.iter().find(|s| s.is_vibration()) {
                Some(sensor) => sensor,
                None => match asset.sensors.first() {
                    Some(sensor) => sensor,
                    None => return Ok(Vec::new()),
                },
            },
        };
        Ok(anomaly::score_history(sensor.history()))
    }
}

impl AssetService {
    /// `asset-<millis>-<seq>`, skipping any id already in the store.
    async fn next_import_id(&self) -> ServiceResult<String> {
        loop {
            let seq = self.import_seq.fetch_add(1, Ordering::Relaxed);
            let id = format!("asset-{}-{}", Utc::now().timestamp_millis(), seq);
            if self.repository.get(&id).await?.is_none() {
                return Ok(id);
            }
        }
    }
}

fn split_tag(tag: &str) -> ServiceResult<(&str, &str)> {
    match tag.split_once(TAG_SEPARATOR) {
        Some((asset, point)) if !asset.trim().is_empty() && !point.trim().is_empty() => {
            Ok((asset.trim(), point.trim()))
        }
        _ => Err(ServiceError::InvalidTag(tag.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::alert_limiter::AlertLimiter;
    use crate::application::notification_service::Notifier;
    use crate::domain::severity::SeverityLevel;
    use crate::infrastructure::memory_repository::InMemoryAssetRepository;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    struct SilentNotifier;

    #[async_trait]
    impl Notifier for SilentNotifier {
        async fn send(&self, _alert: &MaintenanceAlert) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn service() -> AssetService {
        let alerts = AlertService::new(Arc::new(SilentNotifier), AlertLimiter::new(Duration::minutes(5)));
        AssetService::new(Arc::new(InMemoryAssetRepository::new()), alerts, 3)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("Trit P 006 - MOA").unwrap(), ("Trit P 006", "MOA"));
        assert!(matches!(split_tag("no separator"), Err(ServiceError::InvalidTag(_))));
        assert!(matches!(split_tag(" - MOA"), Err(ServiceError::InvalidTag(_))));
    }

    #[tokio::test]
    async fn test_ingest_updates_severity_and_alerts() {
        let service = service();
        service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap();

        let outcome = service
            .ingest_reading("a1", SensorType::Vibration, 6.2, Some(at(1)))
            .await
            .unwrap();
        assert_eq!(outcome.asset.severity(), SeverityLevel::D);
        assert!(outcome.alert.is_some());

        let stored = service.get_asset("a1").await.unwrap();
        assert_eq!(stored.severity(), SeverityLevel::D);
        assert_eq!(stored.health_score(), 15);

        // history limit of 3 keeps the latest readings
        for (hour, value) in [(2, 1.0), (3, 1.2), (4, 0.9)] {
            service
                .ingest_reading("a1", SensorType::Vibration, value, Some(at(hour)))
                .await
                .unwrap();
        }
        let stored = service.get_asset("a1").await.unwrap();
        assert_eq!(stored.sensors[0].history().len(), 3);
        assert_eq!(stored.sensors[0].current_value(), 0.9);
        assert_eq!(stored.severity(), SeverityLevel::A);
    }

    #[tokio::test]
    async fn test_ingest_unknown_asset() {
        let err = service()
            .ingest_reading("missing", SensorType::Vibration, 1.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AssetNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let service = service();
        service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap();
        let err = service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AssetExists(_)));
    }

    #[tokio::test]
    async fn test_import_matches_name_case_insensitively() {
        let service = service();
        service.create_asset(Asset::new("a1", "Trit P 006", "Crushing")).await.unwrap();

        let readings = vec![
            SensorReading::new(at(2), 3.4),
            SensorReading::new(at(1), 1.0),
        ];
        let asset = service.import_trend("TRIT P 006 - MOA", "mm/s", readings).await.unwrap();
        assert_eq!(asset.id, "a1");
        // readings are stored oldest first, so the latest value is 3.4
        assert_eq!(asset.sensors[0].current_value(), 3.4);
        assert_eq!(asset.severity(), SeverityLevel::C);
        assert_eq!(service.list_assets().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_creates_missing_asset() {
        let service = service();
        let asset = service
            .import_trend("Fan 12 - MIV", "G", vec![SensorReading::new(at(1), 3.5)])
            .await
            .unwrap();
        assert_eq!(asset.name, "Fan 12");
        assert_eq!(asset.location, IMPORT_LOCATION);
        assert_eq!(asset.severity(), SeverityLevel::D);
        assert!(service.get_asset(&asset.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_imports_of_new_assets_get_distinct_ids() {
        let service = service();
        let a = service
            .import_trend("Fan A - P1", "mm/s", vec![SensorReading::new(at(1), 1.0)])
            .await
            .unwrap();
        let b = service
            .import_trend("Fan B - P1", "mm/s", vec![SensorReading::new(at(1), 1.0)])
            .await
            .unwrap();
        assert_ne!(a.id, b.id);

        let mut names: Vec<String> = service
            .list_assets()
            .await
            .unwrap()
            .into_iter()
            .map(|asset| asset.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Fan A".to_string(), "Fan B".to_string()]);
    }

    #[tokio::test]
    async fn test_late_reading_does_not_replace_newest() {
        let service = service();
        service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap();
        service
            .ingest_reading("a1", SensorType::Vibration, 1.0, Some(at(10)))
            .await
            .unwrap();
        let outcome = service
            .ingest_reading("a1", SensorType::Vibration, 7.0, Some(at(9)))
            .await
            .unwrap();

        let sensor = &outcome.asset.sensors[0];
        assert_eq!(sensor.history()[0].timestamp, at(9));
        assert_eq!(sensor.current_value(), 1.0);
        assert_eq!(outcome.asset.severity(), SeverityLevel::A);
        assert!(outcome.alert.is_none());
    }

    #[tokio::test]
    async fn test_criticality_and_fmeca_updates() {
        let service = service();
        service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap();

        let invalid = CriticalityAssessment {
            probability: 9,
            ..CriticalityAssessment::default()
        };
        assert!(matches!(
            service.update_criticality("a1", invalid).await,
            Err(ServiceError::Calc(_))
        ));

        let assessment = CriticalityAssessment::new(4, 4, 4, 4).unwrap();
        service.update_criticality("a1", assessment).await.unwrap();
        let matrix = service.risk_matrix().await.unwrap();
        assert_eq!(matrix.cell(4, 4).unwrap().asset_ids, vec!["a1".to_string()]);

        let asset = service
            .update_fmeca("a1", vec![FailureMode::new("fm-1", 7, 6, 5)])
            .await
            .unwrap();
        assert_eq!(asset.fmeca()[0].rpn(), 210);
    }

    #[tokio::test]
    async fn test_anomalies_default_sensor() {
        let service = service();
        service.create_asset(Asset::new("a1", "Pump", "Plant")).await.unwrap();
        assert!(service.anomalies("a1", None).await.unwrap().is_empty());

        service
            .ingest_reading("a1", SensorType::Temperature, 40.0, Some(at(1)))
            .await
            .unwrap();
        service
            .ingest_reading("a1", SensorType::Vibration, 1.0, Some(at(1)))
            .await
            .unwrap();
        let points = service.anomalies("a1", None).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 1.0);

        assert!(matches!(
            service.anomalies("a1", Some("nope")).await,
            Err(ServiceError::SensorNotFound(_))
        ));
    }
}
