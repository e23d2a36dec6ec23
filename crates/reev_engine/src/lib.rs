//! REEV engine: API clients and the local state mirror.
mod acmg;
mod config;
mod gene;
mod misc;
mod persist;
mod settings;
mod storage;
mod store;
mod transport;
mod types;

pub use acmg::AcmgClient;
pub use config::{normalize_base_url, ClientConfig, DEFAULT_API_BASE_URL};
pub use gene::{search_gene, GeneSearchClient};
pub use misc::MiscClient;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use settings::SettingsClient;
pub use storage::{storage_filename, FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{GeneStore, RecordStore, StoreError, GENE_DATA_KEY};
pub use transport::{ReqwestTransport, Transport, CSRF_HEADER};
pub use types::{ClientError, FailureKind, HttpBody};
