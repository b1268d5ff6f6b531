//! Feed sources: what a `FeedLoader` fetches and how it is filtered.

use crate::api::ApiClient;
use crate::error::DevhubResult;
use crate::feed::model::{Challenge, Difficulty, JobFilters, JobListing, NewsItem, Post, PostFilters};
use async_trait::async_trait;

/// A filterable list endpoint.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    type Item: Send + 'static;
    type Filters: Clone + PartialEq + Default + Send + Sync + 'static;

    /// Short name used in logs and user-facing error messages.
    fn name(&self) -> &'static str;

    async fn fetch(&self, filters: &Self::Filters) -> DevhubResult<Vec<Self::Item>>;
}

/// Tech news. Unfiltered.
#[derive(Clone)]
pub struct NewsSource {
    client: ApiClient,
}

impl NewsSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for NewsSource {
    type Item = NewsItem;
    type Filters = ();

    fn name(&self) -> &'static str {
        "news"
    }

    async fn fetch(&self, _filters: &()) -> DevhubResult<Vec<NewsItem>> {
        self.client.get_news().await
    }
}

/// Job listings, filtered by search text, type and remote flag.
#[derive(Clone)]
pub struct JobsSource {
    client: ApiClient,
}

impl JobsSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for JobsSource {
    type Item = JobListing;
    type Filters = JobFilters;

    fn name(&self) -> &'static str {
        "jobs"
    }

    async fn fetch(&self, filters: &JobFilters) -> DevhubResult<Vec<JobListing>> {
        self.client.get_jobs(filters).await
    }
}

/// Coding challenges, filtered by difficulty.
#[derive(Clone)]
pub struct ChallengesSource {
    client: ApiClient,
}

impl ChallengesSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for ChallengesSource {
    type Item = Challenge;
    type Filters = Difficulty;

    fn name(&self) -> &'static str {
        "challenges"
    }

    async fn fetch(&self, difficulty: &Difficulty) -> DevhubResult<Vec<Challenge>> {
        self.client.get_challenges(*difficulty).await
    }
}

/// Community posts, optionally filtered by tag.
#[derive(Clone)]
pub struct PostsSource {
    client: ApiClient,
}

impl PostsSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for PostsSource {
    type Item = Post;
    type Filters = PostFilters;

    fn name(&self) -> &'static str {
        "posts"
    }

    async fn fetch(&self, filters: &PostFilters) -> DevhubResult<Vec<Post>> {
        self.client.get_posts(filters.tag.as_deref()).await
    }
}
