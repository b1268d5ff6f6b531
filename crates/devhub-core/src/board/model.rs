//! Board domain models: the task board and the issue tracker.

use serde::{Deserialize, Serialize};

/// A status column set. Every board has exactly three, ordered as a
/// pipeline for display; any status may move to any other.
pub trait BoardStatus: Copy + Eq + std::fmt::Debug + 'static {
    /// All statuses in pipeline order.
    const ALL: [Self; 3];

    /// Wire name.
    fn as_str(&self) -> &'static str;

    /// Column heading.
    fn label(&self) -> &'static str;

    /// Parse from string. Accepts the wire name and its snake_case form.
    fn parse(s: &str) -> Option<Self> {
        let normalized = s.replace(['_', '-', ' '], "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
    }
}

/// An item living on a board.
pub trait BoardItem: Clone {
    type Status: BoardStatus;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);
}

/// Task board status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl BoardStatus for TaskStatus {
    const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

/// A card on the task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl BoardItem for Task {
    type Status = TaskStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// Issue tracker status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl BoardStatus for IssueStatus {
    const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Resolved];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "inProgress",
            Self::Resolved => "resolved",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

/// Issue priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// An issue in the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: IssueStatus,
}

impl BoardItem for Issue {
    type Status = IssueStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> IssueStatus {
        self.status
    }

    fn set_status(&mut self, status: IssueStatus) {
        self.status = status;
    }
}

/// Seed cards for the task board.
pub fn demo_tasks() -> Vec<Task> {
    let task = |id: &str, title: &str, description: &str, status| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
    };
    vec![
        task(
            "1",
            "Setup Authentication",
            "Implement JWT authentication for the application",
            TaskStatus::Todo,
        ),
        task(
            "2",
            "Create Dashboard Layout",
            "Design and implement the main dashboard layout",
            TaskStatus::InProgress,
        ),
        task(
            "3",
            "API Integration",
            "Connect frontend with backend APIs",
            TaskStatus::Done,
        ),
    ]
}

/// Seed issues for the issue tracker.
pub fn demo_issues() -> Vec<Issue> {
    let issue = |id: &str, title: &str, description: &str, priority, status| Issue {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status,
    };
    vec![
        issue(
            "PROJ-1",
            "Implement User Authentication",
            "Add JWT authentication system",
            Priority::High,
            IssueStatus::Open,
        ),
        issue(
            "PROJ-2",
            "Create Dashboard UI",
            "Design and implement responsive dashboard layout",
            Priority::Medium,
            IssueStatus::InProgress,
        ),
        issue(
            "PROJ-3",
            "API Integration",
            "Connect frontend with backend APIs",
            Priority::High,
            IssueStatus::Resolved,
        ),
    ]
}
