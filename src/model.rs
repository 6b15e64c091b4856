use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn default_color() -> bool {
    true
}

fn default_status() -> StatusFilter {
    StatusFilter::All
}

fn default_archive_group() -> ArchiveGroup {
    ArchiveGroup::Date
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub config: AppConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Status filter applied by `list` when no `--status` is given.
    #[serde(default = "default_status")]
    pub default_status: StatusFilter,
    #[serde(default = "default_archive_group")]
    pub archive_group: ArchiveGroup,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            default_status: default_status(),
            archive_group: default_archive_group(),
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, clap::ValueEnum, PartialEq, Eq)]
pub enum ArchiveGroup {
    Date,
    Category,
}

#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, clap::ValueEnum, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }
}

/// Category side of the query criteria. `"all"` is the wildcard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => task.category == *name,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(CategoryFilter::from)
            .unwrap_or(CategoryFilter::All)
    }
}

#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, clap::ValueEnum, PartialEq, Eq,
)]
#[serde(try_from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: High first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err("expected low|medium|high".to_string()),
        }
    }
}

/// Stored priorities are matched case-insensitively.
impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    /// Name of the owning category. Joined by name, not by category id.
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Fields supplied by the caller when creating a task. The store assigns
/// `id`, `created_at` and starts the task incomplete.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

/// Partial update. `None` leaves a field alone; `due_date: Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

impl TaskPatch {
    pub fn completed(done: bool) -> Self {
        Self {
            completed: Some(done),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(category) = &self.category {
            task.category = category.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(notes) = &self.notes {
            task.notes = notes.clone();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Derived from the task snapshot on every listing; never persisted.
    #[serde(default, skip_serializing)]
    pub task_count: usize,
}

#[derive(Clone, Debug, Default)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub const DEFAULT_CATEGORY: &str = "Work";
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";
