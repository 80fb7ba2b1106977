// Repository trait for asset documents
use crate::domain::asset::Asset;
use async_trait::async_trait;

/// Key-value store of asset documents keyed by asset id.
///
/// Writes are last-writer-wins: `put` replaces whatever document is stored
/// under the id, with no version check.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// All assets, ordered by id
    async fn list(&self) -> anyhow::Result<Vec<Asset>>;

    async fn get(&self, id: &str) -> anyhow::Result<Option<Asset>>;

    async fn put(&self, asset: Asset) -> anyhow::Result<()>;

    /// Write several documents in one batch
    async fn put_many(&self, assets: Vec<Asset>) -> anyhow::Result<()>;
}
