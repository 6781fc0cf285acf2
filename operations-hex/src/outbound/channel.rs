//! Channel connector client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use operations_types::{
    ChannelConnector, ChannelResponse, ChannelTransferRequest, TENANT_HEADER, UpstreamError,
};

use super::{join_url, unavailable};

/// Posts transfer requests to the channel connector and hands back its
/// answer verbatim.
pub struct HttpChannelConnector {
    client: reqwest::Client,
    transfer_url: String,
}

impl HttpChannelConnector {
    pub fn new(base_url: &str, transfer_path: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            transfer_url: join_url(base_url, transfer_path),
        })
    }
}

#[async_trait]
impl ChannelConnector for HttpChannelConnector {
    #[tracing::instrument(skip(self, request), fields(url = %self.transfer_url))]
    async fn submit_transfer(
        &self,
        tenant_id: &str,
        request: &ChannelTransferRequest,
    ) -> Result<ChannelResponse, UpstreamError> {
        let response = self
            .client
            .post(&self.transfer_url)
            .header(TENANT_HEADER, tenant_id)
            .json(request)
            .send()
            .await
            .map_err(|e| unavailable("channel connector", e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| unavailable("channel connector", e))?;

        Ok(ChannelResponse {
            status,
            content_type,
            body,
        })
    }
}
