use std::sync::Arc;

use crate::{ClientConfig, ClientError, ReqwestTransport, Transport};

const VERSION_PATH: &str = "version";

/// Miscellaneous endpoints of the internal API.
#[derive(Clone)]
pub struct MiscClient {
    transport: Arc<dyn Transport>,
}

impl MiscClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Version string of the running backend, returned verbatim.
    pub async fn fetch_version(&self) -> Result<String, ClientError> {
        self.transport.get(VERSION_PATH, &[]).await?.text()
    }
}
