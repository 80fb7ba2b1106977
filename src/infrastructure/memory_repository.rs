// In-memory asset store
use crate::application::asset_repository::AssetRepository;
use crate::domain::asset::Asset;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Asset documents held in process memory, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<BTreeMap<String, Asset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: Vec<Asset>) -> Self {
        Self {
            assets: RwLock::new(assets.into_iter().map(|a| (a.id.clone(), a)).collect()),
        }
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn list(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Asset>> {
        Ok(self.assets.read().await.get(id).cloned())
    }

    async fn put(&self, asset: Asset) -> Result<()> {
        self.assets.write().await.insert(asset.id.clone(), asset);
        Ok(())
    }

    async fn put_many(&self, assets: Vec<Asset>) -> Result<()> {
        let mut store = self.assets.write().await;
        for asset in assets {
            store.insert(asset.id.clone(), asset);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_writer_wins() {
        let repo = InMemoryAssetRepository::new();
        repo.put(Asset::new("a1", "First", "Plant")).await.unwrap();
        repo.put(Asset::new("a1", "Second", "Plant")).await.unwrap();

        let stored = repo.get("a1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Second");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryAssetRepository::with_assets(vec![Asset::new("b", "B", "")]);
        repo.put_many(vec![Asset::new("c", "C", ""), Asset::new("a", "A", "")])
            .await
            .unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(repo.get("zz").await.unwrap().is_none());
    }
}
