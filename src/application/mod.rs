// Application layer - Use cases and the ports they depend on
pub mod alert_limiter;
pub mod asset_repository;
pub mod asset_service;
pub mod notification_service;
