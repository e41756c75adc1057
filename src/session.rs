// Interactive session: parses command lines and drives the store

use crate::auth::{AllowList, AuthContext, AuthEffect};
use crate::config::Config;
use crate::debounce::SearchInput;
use crate::filter::{AuthorFilter, Filter, StatusFilter};
use crate::models::{Task, TaskDraft, TaskId};
use crate::store::TaskStore;
use eyre::{Context, Result, eyre};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// Shown whenever a task would end up with a blank field
pub const EMPTY_FIELD_PROMPT: &str = "Please fill in both fields";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { text: String, author: String },
    Toggle(TaskId),
    Delete(TaskId),
    Edit(TaskId),
    EditText(String),
    EditAuthor(String),
    Save,
    Cancel,
    Search(String),
    Status(StatusFilter),
    Author(AuthorFilter),
    List,
    Authors,
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = eyre::Report;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "add" => {
                let (text, author) = rest
                    .split_once('|')
                    .ok_or_else(|| eyre!("Usage: add <text> | <author>"))?;
                Command::Add {
                    text: text.to_string(),
                    author: author.to_string(),
                }
            }
            "toggle" => Command::Toggle(parse_id(rest)?),
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "edit" => Command::Edit(parse_id(rest)?),
            "text" => Command::EditText(rest.to_string()),
            "author" => Command::EditAuthor(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "search" => Command::Search(rest.to_string()),
            "status" => Command::Status(rest.parse()?),
            "by" => {
                if rest.is_empty() {
                    return Err(eyre!("Usage: by <all|author>"));
                }
                Command::Author(AuthorFilter::from(rest))
            }
            "list" | "ls" => Command::List,
            "authors" => Command::Authors,
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(username), Some(password), None) => Command::Login {
                        username: username.to_string(),
                        password: password.to_string(),
                    },
                    _ => return Err(eyre!("Usage: login <username> <password>")),
                }
            }
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(eyre!("Empty command")),
            other => return Err(eyre!("Unknown command: {} (try 'help')", other)),
        };

        Ok(command)
    }
}

fn parse_id(s: &str) -> Result<TaskId> {
    s.parse().with_context(|| format!("Invalid task id: '{}'", s))
}

/// Result of executing a command, for the caller to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Visible tasks plus the id in edit mode
    Tasks { tasks: Vec<Task>, editing: Option<TaskId> },
    Authors(Vec<String>),
    Created(Task),
    Editing { id: TaskId, text: String, author: String },
    Message(String),
    /// Recoverable user error; the session continues
    Rejected(String),
    Navigate(String),
    Help,
    Quit,
}

/// Store, search box, new-task draft and login state for one user
pub struct Session {
    store: TaskStore,
    search: SearchInput,
    draft: TaskDraft,
    auth: AuthContext<AllowList>,
}

impl Session {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        Self {
            store,
            search: SearchInput::new(config.search_debounce),
            draft: TaskDraft::default(),
            auth: AuthContext::new(config.credentials.clone()),
        }
    }

    /// Build a session from configuration, optionally with the seed tasks
    pub fn from_config(config: &Config, seed: bool) -> Result<Self> {
        let store = if seed {
            TaskStore::with_seed(config.seed_tasks.iter().cloned()).context("Invalid seed task in config")?
        } else {
            TaskStore::new()
        };
        info!(tasks = store.len(), "Session started");
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    /// Apply the search query if typing has settled
    pub fn tick(&mut self, now: Instant) {
        let store = &mut self.store;
        self.search.settle(now, |query| {
            let current = store.filter();
            let filter = Filter::new(query, current.status, current.author.clone());
            store.set_filters(filter);
        });
    }

    /// Parse and execute one line
    pub fn handle_line(&mut self, line: &str, now: Instant) -> Result<Outcome> {
        let command: Command = line.parse()?;
        Ok(self.execute(command, now))
    }

    pub fn execute(&mut self, command: Command, now: Instant) -> Outcome {
        self.tick(now);
        debug!(?command, "execute");

        match command {
            Command::Add { text, author } => {
                self.draft = TaskDraft::new(text, author);
                match self.store.submit_draft(&mut self.draft) {
                    Ok(task) => Outcome::Created(task),
                    Err(_) => Outcome::Rejected(EMPTY_FIELD_PROMPT.to_string()),
                }
            }
            Command::Toggle(id) => {
                self.store.toggle_completed(id);
                self.tasks()
            }
            Command::Delete(id) => {
                self.store.delete_task(id);
                self.tasks()
            }
            Command::Edit(id) => {
                self.store.begin_edit(id);
                match self.store.editing_id() {
                    Some(editing) if editing == id => self.editing(),
                    _ => Outcome::Rejected(format!("No task with id {}", id)),
                }
            }
            Command::EditText(value) => self.with_edit(|store| store.set_edited_text(&value)),
            Command::EditAuthor(value) => self.with_edit(|store| store.set_edited_author(&value)),
            Command::Save => match self.store.editing_id() {
                Some(id) => match self.store.commit_edit(id) {
                    Ok(()) => self.tasks(),
                    Err(_) => Outcome::Rejected(EMPTY_FIELD_PROMPT.to_string()),
                },
                None => Outcome::Rejected("Not editing a task".to_string()),
            },
            Command::Cancel => {
                self.store.cancel_edit();
                self.tasks()
            }
            Command::Search(query) => {
                self.search.keystroke(query, now);
                Outcome::Message(format!(
                    "Searching after {} ms of quiet",
                    self.search.delay().as_millis()
                ))
            }
            Command::Status(status) => {
                let current = self.store.filter();
                let filter = Filter::new(current.query.clone(), status, current.author.clone());
                self.store.set_filters(filter);
                self.tasks()
            }
            Command::Author(author) => {
                let current = self.store.filter();
                let filter = Filter::new(current.query.clone(), current.status, author);
                self.store.set_filters(filter);
                self.tasks()
            }
            Command::List => self.tasks(),
            Command::Authors => Outcome::Authors(self.store.distinct_authors()),
            Command::Login { username, password } => match self.auth.login(&username, &password) {
                AuthEffect::Navigate(route) => Outcome::Navigate(route.to_string()),
                AuthEffect::ShowError(message) => Outcome::Rejected(message),
            },
            Command::Logout => match self.auth.logout() {
                AuthEffect::Navigate(route) => Outcome::Navigate(route.to_string()),
                AuthEffect::ShowError(message) => Outcome::Rejected(message),
            },
            Command::WhoAmI => match self.auth.user() {
                Some(user) => Outcome::Message(format!("Logged in as {}", user.username)),
                None => Outcome::Message("Not logged in".to_string()),
            },
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        }
    }

    fn tasks(&self) -> Outcome {
        Outcome::Tasks {
            tasks: self.store.visible_tasks(),
            editing: self.store.editing_id(),
        }
    }

    fn editing(&self) -> Outcome {
        match (self.store.editing_id(), self.store.edit_buffers()) {
            (Some(id), Some((text, author))) => Outcome::Editing {
                id,
                text: text.to_string(),
                author: author.to_string(),
            },
            _ => Outcome::Rejected("Not editing a task".to_string()),
        }
    }

    fn with_edit<F>(&mut self, update: F) -> Outcome
    where
        F: FnOnce(&mut TaskStore),
    {
        if self.store.editing_id().is_none() {
            return Outcome::Rejected("Not editing a task".to_string());
        }
        update(&mut self.store);
        self.editing()
    }
}
