use std::sync::Arc;

use reev_core::FrontendSettings;

use crate::{ClientConfig, ClientError, ReqwestTransport, Transport};

const FRONTEND_SETTINGS_PATH: &str = "frontend-settings";

#[derive(Clone)]
pub struct SettingsClient {
    transport: Arc<dyn Transport>,
}

impl SettingsClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_frontend_settings(&self) -> Result<FrontendSettings, ClientError> {
        self.transport.get(FRONTEND_SETTINGS_PATH, &[]).await?.json()
    }
}
