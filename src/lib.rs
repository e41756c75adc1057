// teamtasks - In-memory team task list with filtering, inline editing and a placeholder login

pub mod auth;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod models;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use auth::{AllowList, AuthContext, AuthEffect, Credential, CredentialVerifier, Route, User};
pub use config::Config;
pub use debounce::{Debouncer, SearchInput};
pub use error::ValidationError;
pub use filter::{AuthorFilter, Filter, StatusFilter};
pub use models::{SeedTask, Task, TaskDraft, TaskId};
pub use session::{Command, Outcome, Session};
pub use store::{EditState, TaskStore};
