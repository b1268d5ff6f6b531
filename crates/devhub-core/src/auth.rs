//! OAuth connect triggers for the source-hosting and Q&A services.
//!
//! The backend owns the OAuth dance. Connecting only asks it for the
//! authorization URL; failures are logged and swallowed so the dashboard
//! keeps working unconnected.

use crate::api::ApiClient;
use serde::Deserialize;
use tracing::{error, info};

/// Services that can be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    StackOverflow,
}

impl Provider {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "github" => Some(Self::GitHub),
            "stackoverflow" => Some(Self::StackOverflow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::StackOverflow => "stackoverflow",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::StackOverflow => "Stack Overflow",
        }
    }
}

#[derive(Deserialize)]
struct ConnectResponse {
    url: String,
}

/// Ask the backend to start the OAuth flow for `provider`.
///
/// Returns the authorization URL, or `None` if anything went wrong.
pub async fn connect(client: &ApiClient, provider: Provider) -> Option<String> {
    info!(provider = provider.as_str(), "Connect requested");
    let path = format!("/api/auth/{}", provider.as_str());

    match client.get_json::<ConnectResponse>(&path, &[]).await {
        Ok(response) => Some(response.url),
        Err(e) => {
            error!(
                provider = provider.as_str(),
                error = %e,
                "Failed to connect to {}",
                provider.display_name()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_provider_parsing() {
        assert_eq!(Provider::from_str("GitHub"), Some(Provider::GitHub));
        assert_eq!(Provider::from_str("stack-overflow"), Some(Provider::StackOverflow));
        assert_eq!(Provider::from_str("gitlab"), None);
    }

    #[tokio::test]
    async fn test_connect_failure_is_swallowed() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(500));
        assert_eq!(connect(&client, Provider::GitHub).await, None);
    }
}
