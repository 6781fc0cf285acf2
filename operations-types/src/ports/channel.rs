//! Channel connector port.

use crate::dto::{ChannelResponse, ChannelTransferRequest};
use crate::error::UpstreamError;

/// Forwards transfer requests to the channel connector.
///
/// Any HTTP answer is returned as-is in [`ChannelResponse`]; only transport
/// failures and missed deadlines are errors.
#[async_trait::async_trait]
pub trait ChannelConnector: Send + Sync + 'static {
    async fn submit_transfer(
        &self,
        tenant_id: &str,
        request: &ChannelTransferRequest,
    ) -> Result<ChannelResponse, UpstreamError>;
}
