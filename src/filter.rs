// Filter predicate over tasks

use crate::models::Task;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Combined text, status and author filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Free-text query matched against text and author
    pub query: String,
    /// Completion status selector
    pub status: StatusFilter,
    /// Author selector
    pub author: AuthorFilter,
}

/// Completion status selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

/// Author selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthorFilter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    pub fn new(query: impl Into<String>, status: StatusFilter, author: AuthorFilter) -> Self {
        Self {
            query: query.into(),
            status,
            author,
        }
    }

    /// True when the task passes all three predicates
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task) && self.status.matches(task) && self.author.matches(task)
    }

    fn matches_query(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        task.text.to_lowercase().contains(&needle) || task.author.to_lowercase().contains(&needle)
    }
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todas" => Ok(StatusFilter::All),
            "completed" | "completadas" => Ok(StatusFilter::Completed),
            "pending" | "pendientes" => Ok(StatusFilter::Pending),
            other => Err(eyre!(
                "Invalid status filter: {} (expected all, completed or pending)",
                other
            )),
        }
    }
}

impl AuthorFilter {
    /// Exact, case-sensitive author comparison
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Only(author) => task.author == *author,
        }
    }
}

impl fmt::Display for AuthorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorFilter::All => write!(f, "all"),
            AuthorFilter::Only(author) => write!(f, "{}", author),
        }
    }
}

impl From<&str> for AuthorFilter {
    /// `all` and `todos` select every author; anything else is taken verbatim
    fn from(s: &str) -> Self {
        match s {
            "all" | "todos" => AuthorFilter::All,
            author => AuthorFilter::Only(author.to_string()),
        }
    }
}
