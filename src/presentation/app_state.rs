// Application state for HTTP handlers
use crate::application::asset_service::AssetService;

#[derive(Clone)]
pub struct AppState {
    pub asset_service: AssetService,
}
