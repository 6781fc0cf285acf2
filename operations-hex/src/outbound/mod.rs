//! HTTP Outbound Adapters
//!
//! `reqwest`-based implementations of the channel connector and workflow
//! trigger ports. Every call carries an explicit deadline; nothing is
//! retried.

mod channel;
mod workflow;

pub use channel::HttpChannelConnector;
pub use workflow::{DEFAULT_START_PATH, HttpWorkflowTrigger};

use operations_types::UpstreamError;

/// Classifies a transport-level failure.
fn unavailable(target: &str, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Unavailable(format!("{} did not answer before the deadline", target))
    } else {
        UpstreamError::Unavailable(format!("{}: {}", target, err))
    }
}

/// Joins a base URL and a path without doubling or dropping the slash.
fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
