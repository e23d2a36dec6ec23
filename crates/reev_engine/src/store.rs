//! Local state mirror: the latest record of one kind, held in memory and
//! copied to key-value storage on every write.
//!
//! Opening a store rehydrates it from storage; writes go to storage first and
//! only then replace the in-memory value, so after a successful `set` both
//! sides hold the same record. The store never talks to the network.

use std::marker::PhantomData;

use reev_core::GeneRecord;
use reev_logging::{reev_debug, reev_info, reev_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::{KeyValueStorage, PersistError};

/// Storage key of the last viewed gene.
pub const GENE_DATA_KEY: &str = "geneData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] PersistError),
    #[error("failed to serialize record for key {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("stored record under key {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct RecordStore<T, S> {
    storage: S,
    key: String,
    current: Option<T>,
    _record: PhantomData<fn() -> T>,
}

impl<T, S> RecordStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    /// Rehydrates from `storage[key]`; no entry means an empty store.
    pub fn open(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let current = match storage.get_item(&key)? {
            Some(raw) => {
                let record = serde_json::from_str(&raw).map_err(|source| {
                    reev_warn!("Stored record under {} does not parse: {}", key, source);
                    StoreError::Corrupt {
                        key: key.clone(),
                        source,
                    }
                })?;
                reev_info!("Restored record from storage key {}", key);
                Some(record)
            }
            None => {
                reev_debug!("No stored record under {}", key);
                None
            }
        };

        Ok(Self {
            storage,
            key,
            current,
            _record: PhantomData,
        })
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Replaces the record wholesale. On failure the previous value stays.
    pub fn set(&mut self, record: T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&record).map_err(|source| StoreError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.storage.set_item(&self.key, &raw)?;
        self.current = Some(record);
        reev_debug!("Saved record under {} ({} bytes)", self.key, raw.len());
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Mirror of the last fetched gene under [`GENE_DATA_KEY`].
#[derive(Debug)]
pub struct GeneStore<S> {
    inner: RecordStore<GeneRecord, S>,
}

impl<S: KeyValueStorage> GeneStore<S> {
    pub fn open(storage: S) -> Result<Self, StoreError> {
        Ok(Self {
            inner: RecordStore::open(storage, GENE_DATA_KEY)?,
        })
    }

    pub fn gene_data(&self) -> Option<&GeneRecord> {
        self.inner.get()
    }

    pub fn set_gene_data(&mut self, data: GeneRecord) -> Result<(), StoreError> {
        self.inner.set(data)
    }

    pub fn storage(&self) -> &S {
        self.inner.storage()
    }
}
