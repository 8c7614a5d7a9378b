//! Infrastructure layer for Fanforge.
//!
//! Durable storage backends and configuration loading behind the traits
//! defined in `fanforge-core`.

pub mod config;
pub mod json_project_repository;
pub mod kv_store;

pub use config::ForgeConfig;
pub use json_project_repository::{JsonProjectRepository, PROJECTS_STORAGE_KEY};
pub use kv_store::{FileKeyValueStore, MemoryKeyValueStore, RejectingKeyValueStore};
