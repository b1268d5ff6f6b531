//! Feed records as served by the DevHub backend, and their filters.

use serde::{Deserialize, Serialize};

/// A tech news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
    pub category: String,
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub remote: bool,
    #[serde(default)]
    pub salary: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub posted_date: String,
}

/// A coding challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub category: String,
    pub points: u32,
    #[serde(default)]
    pub examples: Vec<ChallengeExample>,
}

/// One input/output pair of a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeExample {
    pub input: String,
    pub output: String,
}

/// A community post from the developer feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub author: String,
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: String,
    #[serde(default)]
    pub reactions: u32,
    #[serde(default)]
    pub comments_count: u32,
}

/// Job employment types offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobType {
    #[default]
    All,
    FullTime,
    Contract,
}

impl JobType {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "all" | "all types" => Some(Self::All),
            "full time" | "fulltime" => Some(Self::FullTime),
            "contract" => Some(Self::Contract),
            _ => None,
        }
    }

    /// Query value expected by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All Types",
            Self::FullTime => "Full Time",
            Self::Contract => "Contract",
        }
    }
}

/// Job search filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFilters {
    pub search: String,
    pub job_type: JobType,
    pub remote: bool,
}

/// Challenge difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Post tag filter. `None` means every tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostFilters {
    pub tag: Option<String>,
}
