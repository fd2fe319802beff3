//! Configuration for opening a storefront store.
//!
//! The host usually passes a bare name (see [`crate::create_storefront`]);
//! [`StoreConfig`] is the fuller form and can be supplied as JSON through
//! [`crate::create_storefront_with_config`]. Every field has a default, so
//! `{}` is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// 10 MiB is far more than a demo storefront writes.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

pub const DEFAULT_STORE_NAME: &str = "storefront";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base name of the LMDB directory; the environment lives in `<name>.lmdb`.
    pub name: String,

    /// Parent directory for the environment. Current directory when absent.
    pub directory: Option<PathBuf>,

    /// Maximum size of the memory map in bytes.
    pub map_size: usize,

    /// Insert the two welcome reviews the first time the store is opened.
    pub seed_reviews: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            directory: None,
            map_size: DEFAULT_MAP_SIZE,
            seed_reviews: true,
        }
    }
}

impl StoreConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.name.trim().is_empty() {
            return Err(AppResponse::validation("Store name cannot be empty"));
        }
        if self.map_size == 0 {
            return Err(AppResponse::validation("map_size must be greater than zero"));
        }
        Ok(())
    }

    pub fn lmdb_path(&self) -> PathBuf {
        let dir_name = format!("{}.lmdb", self.name);
        match &self.directory {
            Some(parent) => parent.join(dir_name),
            None => PathBuf::from(dir_name),
        }
    }
}
