//! Widget layout models.

use serde::{Deserialize, Serialize};

/// The closed set of dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Activity,
    Github,
    Stackoverflow,
    Projects,
    News,
    Jobs,
    Challenges,
}

impl WidgetKind {
    /// Every widget, in default layout order.
    pub const ALL: [WidgetKind; 7] = [
        Self::Activity,
        Self::Github,
        Self::Stackoverflow,
        Self::Projects,
        Self::News,
        Self::Jobs,
        Self::Challenges,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "activity" => Some(Self::Activity),
            "github" => Some(Self::Github),
            "stackoverflow" => Some(Self::Stackoverflow),
            "projects" => Some(Self::Projects),
            "news" => Some(Self::News),
            "jobs" => Some(Self::Jobs),
            "challenges" => Some(Self::Challenges),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Github => "github",
            Self::Stackoverflow => "stackoverflow",
            Self::Projects => "projects",
            Self::News => "news",
            Self::Jobs => "jobs",
            Self::Challenges => "challenges",
        }
    }

    /// Default display title.
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Activity => "Activity Feed",
            Self::Github => "GitHub",
            Self::Stackoverflow => "Stack Overflow",
            Self::Projects => "Projects",
            Self::News => "Tech News",
            Self::Jobs => "Job Listings",
            Self::Challenges => "Coding Challenges",
        }
    }
}

/// Layout settings for one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSetting {
    pub id: WidgetKind,
    pub title: String,
    pub visible: bool,
    pub order: usize,
}

/// The default layout: every widget visible, in `WidgetKind::ALL` order.
pub fn default_widgets() -> Vec<WidgetSetting> {
    WidgetKind::ALL
        .iter()
        .enumerate()
        .map(|(order, kind)| WidgetSetting {
            id: *kind,
            title: kind.default_title().to_string(),
            visible: true,
            order,
        })
        .collect()
}
