//! Key-value backends that hold the storefront's persisted text values.
//!
//! The storefront only ever needs three primitives: read a value, overwrite a
//! value, wipe everything. [`KeyValueStore`] captures those,
//! [`LmdbStore`] provides them durably on disk and [`MemoryStore`] keeps them
//! in process memory for tests and hosts that do not want files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, RwLock};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::store_config::StoreConfig;

/// Name of the single LMDB database holding every storefront key.
pub const COLLECTIONS_DB: &str = "collections";

pub trait KeyValueStore {
    /// Returns the raw text stored under `key`, or `None` when absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>, AppResponse>;

    /// Replaces whatever is stored under `key`.
    fn put_raw(&self, key: &str, value: &str) -> Result<(), AppResponse>;

    /// Removes every key.
    fn clear(&self) -> Result<(), AppResponse>;

    /// Forces buffered writes to durable storage. No-op for volatile stores.
    fn sync(&self) -> Result<(), AppResponse> {
        Ok(())
    }
}

/// LMDB must not open the same environment twice in one process.
static OPEN_PATHS: LazyLock<Mutex<HashSet<PathBuf>>> = LazyLock::new(Default::default);

/// Registration of an environment path in [`OPEN_PATHS`], released on drop.
struct PathClaim(PathBuf);

impl PathClaim {
    fn acquire(path: &Path) -> Result<Self, AppResponse> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            AppResponse::DatabaseError(format!("Cannot resolve store path {}: {e}", path.display()))
        })?;

        let mut open = OPEN_PATHS.lock().map_err(|_| {
            AppResponse::DatabaseError("Open store registry lock poisoned".to_string())
        })?;
        if !open.insert(canonical.clone()) {
            warn!("Store at {} is already open in this process", path.display());
            return Err(AppResponse::BadRequest(format!(
                "Store at {} is already open; close it before reopening",
                path.display()
            )));
        }
        Ok(Self(canonical))
    }
}

impl Drop for PathClaim {
    fn drop(&mut self) {
        if let Ok(mut open) = OPEN_PATHS.lock() {
            open.remove(&self.0);
        }
    }
}

/// LMDB-backed store. One environment per storefront, living in `<name>.lmdb`.
///
/// At most one `LmdbStore` per directory may be open in a process; a second
/// `open` on the same directory fails with `BadRequest` until the first is dropped.
pub struct LmdbStore {
    env: Environment,
    db: Database,
    path: PathBuf,
    // Declared last so the environment closes before the path is released.
    _claim: PathClaim,
}

impl LmdbStore {
    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        let path = config.lmdb_path();

        if path.exists() {
            info!("Reopening existing store at {}", path.display());
        } else {
            info!("Creating new store at {}", path.display());
            fs::create_dir_all(&path).map_err(|e| {
                AppResponse::DatabaseError(format!(
                    "Cannot create store directory {}: {e}",
                    path.display()
                ))
            })?;
        }
        let claim = PathClaim::acquire(&path)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(&path)
            .map_err(|e| {
                warn!("Failed to open LMDB environment at {}: {e}", path.display());
                AppResponse::from(e)
            })?;

        let db = env.create_db(Some(COLLECTIONS_DB), DatabaseFlags::empty())?;

        info!("✅ Store ready at {}", path.display());
        Ok(Self {
            env,
            db,
            path,
            _claim: claim,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for LmdbStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(String::from_utf8(bytes.to_vec()).map_err(|e| {
                AppResponse::SerializationError(format!("Value under '{key}' is not UTF-8: {e}"))
            })?),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Stored {} bytes under '{key}'", value.len());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        info!("Cleared every key in {}", self.path.display());
        Ok(())
    }

    /// Commits are already durable; this is an explicit checkpoint for hosts
    /// about to be suspended.
    fn sync(&self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        Ok(())
    }
}

/// Volatile store for tests and hosts without a writable filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppResponse {
        AppResponse::DatabaseError("Memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppResponse> {
        self.values.write().map_err(|_| Self::poisoned())?.clear();
        Ok(())
    }
}
