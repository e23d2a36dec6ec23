use std::sync::Arc;

use reev_core::{GeneRecord, GenomeRelease};
use reev_logging::reev_info;

use crate::{ClientConfig, ClientError, FailureKind, ReqwestTransport, Transport};

const SEARCH_PATH: &str = "search";

/// Gene lookup by symbol against the search endpoint.
#[derive(Clone)]
pub struct GeneSearchClient {
    transport: Arc<dyn Transport>,
}

impl GeneSearchClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Blank symbols are rejected before any request is made.
    pub async fn search_gene(
        &self,
        symbol: &str,
        release: GenomeRelease,
    ) -> Result<GeneRecord, ClientError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ClientError::new(
                FailureKind::InvalidInput,
                "gene symbol must not be empty",
            ));
        }

        let query = [
            ("geneSymbol", symbol.to_string()),
            ("genomeRelease", release.as_str().to_string()),
        ];
        let record: GeneRecord = self.transport.get(SEARCH_PATH, &query).await?.json()?;
        reev_info!("Found gene {} ({}) with {} fields", symbol, release, record.as_map().len());
        Ok(record)
    }
}

/// One-shot gene search with a throwaway client.
pub async fn search_gene(
    config: &ClientConfig,
    symbol: &str,
    release: GenomeRelease,
) -> Result<GeneRecord, ClientError> {
    GeneSearchClient::new(config)?
        .search_gene(symbol, release)
        .await
}
