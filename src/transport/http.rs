//! reqwest-backed delivery to the registration endpoint
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::traits::Transport;
use crate::error::{Result, TransportError};
use crate::settings::TransportSettings;

pub const SIGNATURE_HEADER: &str = "Signature";

#[derive(Clone, Debug)]
pub struct HttpTransport {
    url: String,
    client: Client,
}

impl HttpTransport {
    /// Transport pointed at the production endpoint
    pub fn new() -> Result<Self> {
        Self::with_settings(TransportSettings::default())
    }

    pub fn with_settings(settings: TransportSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(TransportSettings::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url: settings.url,
            client: builder.build()?,
        })
    }

    /// Reuse a caller-configured client (proxies, TLS roots and so on)
    pub fn with_client(settings: TransportSettings, client: Client) -> Self {
        Self {
            url: settings.url,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn headers(signature: &str) -> Result<HeaderMap> {
        let signature = HeaderValue::from_str(signature).map_err(|e| {
            TransportError::InvalidHeader(format!("{} header: {}", SIGNATURE_HEADER, e))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(SIGNATURE_HEADER, signature);
        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: Vec<u8>, signature: &str) -> Result<()> {
        let headers = Self::headers(signature)?;
        debug!("POST {} ({} bytes)", self.url, body.len());

        let response = self
            .client
            .post(&self.url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        // body is ignored; dropping the response hands the connection back
        let status = response.status();
        if status != StatusCode::OK {
            warn!("[{}] document rejected with status {}", self.url, status);
            return Err(TransportError::Status(status.as_u16()).into());
        }
        Ok(())
    }
}
