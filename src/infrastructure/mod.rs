// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod log_notifier;
pub mod memory_repository;
pub mod seed;
