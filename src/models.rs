// Data models for the team task list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a task, assigned by the store from a monotonic counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// A unit of work owned by one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub author: String,
    pub completed: bool,
}

/// Caller-owned "new task" input buffers
///
/// Cleared by `TaskStore::submit_draft` once the task is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub author: String,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.author.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.author.is_empty()
    }
}

/// Task used to populate a store at start-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub completed: bool,
}

impl SeedTask {
    pub fn new(text: impl Into<String>, author: impl Into<String>, completed: bool) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            completed,
        }
    }
}

/// The sample tasks a fresh session starts with
pub fn default_seed() -> Vec<SeedTask> {
    vec![
        SeedTask::new("Implement Header component", "Juan", false),
        SeedTask::new("Build filter system", "María", true),
        SeedTask::new("Design responsive layout", "Juan", false),
    ]
}
