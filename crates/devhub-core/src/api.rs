//! HTTP client for the DevHub backend.
//!
//! The backend aggregates the third-party services (news, jobs,
//! challenges, community posts, OAuth). This client only knows its REST
//! surface under `/api`.

use crate::config::DevhubConfig;
use crate::error::{DevhubError, DevhubResult};
use crate::feed::model::{Challenge, Difficulty, JobFilters, JobListing, NewsItem, Post};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default backend URL.
pub const DEFAULT_API_URL: &str = "http://localhost:7000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// REST client for the DevHub backend.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "ApiClient initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &DevhubConfig) -> Self {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/technews`
    pub async fn get_news(&self) -> DevhubResult<Vec<NewsItem>> {
        self.get_json("/api/technews", &[]).await
    }

    /// `GET /api/jobs?search=&type=&remote=`
    pub async fn get_jobs(&self, filters: &JobFilters) -> DevhubResult<Vec<JobListing>> {
        let remote = filters.remote.to_string();
        let query = [
            ("search", filters.search.as_str()),
            ("type", filters.job_type.as_str()),
            ("remote", remote.as_str()),
        ];
        self.get_json("/api/jobs", &query).await
    }

    /// `GET /api/challenges?difficulty=`
    pub async fn get_challenges(&self, difficulty: Difficulty) -> DevhubResult<Vec<Challenge>> {
        self.get_json("/api/challenges", &[("difficulty", difficulty.as_str())])
            .await
    }

    /// `GET /api/devto/posts[?tag=]`
    pub async fn get_posts(&self, tag: Option<&str>) -> DevhubResult<Vec<Post>> {
        match tag {
            Some(tag) if !tag.is_empty() => self.get_json("/api/devto/posts", &[("tag", tag)]).await,
            _ => self.get_json("/api/devto/posts", &[]).await,
        }
    }

    /// `GET /api/devto/tags`
    ///
    /// Tags only decorate the post filter, so a failure is logged and an
    /// empty list returned.
    pub async fn get_tags(&self) -> Vec<String> {
        match self.get_json::<Vec<String>>("/api/devto/tags", &[]).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "Failed to fetch tags");
                Vec::new()
            }
        }
    }

    /// Issue a GET and decode a JSON body. Non-2xx statuses become
    /// `DevhubError::Api`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> DevhubResult<T> {
        let url = self.url(path);
        debug!(url = %url, ?query, "GET");

        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DevhubError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:7000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:7000");
        assert_eq!(client.url("/api/technews"), "http://localhost:7000/api/technews");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_http_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(500));
        let err = client.get_news().await.unwrap_err();
        assert!(matches!(err, DevhubError::Http(_)));
    }

    #[tokio::test]
    async fn test_tags_failure_yields_empty_list() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(500));
        assert!(client.get_tags().await.is_empty());
    }
}
