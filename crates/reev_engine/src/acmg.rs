use std::sync::Arc;

use reev_core::{AcmgRating, SeqvarQuery};

use crate::{ClientConfig, ClientError, ReqwestTransport, Transport};

const ACMG_PATH: &str = "acmg/";

/// Client for the InterVar-compatible ACMG rating endpoint.
#[derive(Clone)]
pub struct AcmgClient {
    transport: Arc<dyn Transport>,
}

impl AcmgClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_acmg_rating(&self, query: &SeqvarQuery) -> Result<AcmgRating, ClientError> {
        self.transport
            .get(ACMG_PATH, &query.query_pairs())
            .await?
            .json()
    }
}
