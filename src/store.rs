// In-memory task store with filter and inline-edit state

use crate::error::ValidationError;
use crate::filter::Filter;
use crate::models::{SeedTask, Task, TaskDraft, TaskId};
use tracing::debug;

/// Inline edit state: either idle or editing exactly one task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: TaskId, text: String, author: String },
}

/// Authoritative owner of the task list and its filter/edit state
///
/// Tasks are kept newest first. Every stored task has non-empty trimmed
/// `text` and `author`; the edit buffers may hold anything until committed.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    edit: EditState,
    filter: Filter,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            edit: EditState::Idle,
            filter: Filter::default(),
        }
    }

    /// Create a store whose display order is the seed order
    ///
    /// Each seed is validated like `create_task`; the first invalid seed
    /// aborts construction.
    pub fn with_seed<I>(seeds: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = SeedTask>,
    {
        let mut store = Self::new();
        for seed in seeds {
            let (text, author) = validate(&seed.text, &seed.author)?;
            let id = store.allocate_id();
            store.tasks.push(Task {
                id,
                text,
                author,
                completed: seed.completed,
            });
        }
        debug!(count = store.tasks.len(), "with_seed: store populated");
        Ok(store)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Full, unfiltered task sequence in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Id of the task currently in edit mode, if any
    pub fn editing_id(&self) -> Option<TaskId> {
        match &self.edit {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(*id),
        }
    }

    /// Current `(text, author)` edit buffers, if editing
    pub fn edit_buffers(&self) -> Option<(&str, &str)> {
        match &self.edit {
            EditState::Idle => None,
            EditState::Editing { text, author, .. } => Some((text.as_str(), author.as_str())),
        }
    }

    /// Tasks passing the current filter, in store order
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect()
    }

    /// Unique authors across all tasks, in first-seen order
    pub fn distinct_authors(&self) -> Vec<String> {
        let mut authors: Vec<String> = Vec::new();
        for task in &self.tasks {
            if !authors.iter().any(|a| *a == task.author) {
                authors.push(task.author.clone());
            }
        }
        authors
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Validate and prepend a new task
    pub fn create_task(&mut self, text: &str, author: &str) -> Result<Task, ValidationError> {
        let (text, author) = validate(text, author)?;
        let task = Task {
            id: self.allocate_id(),
            text,
            author,
            completed: false,
        };
        debug!(id = %task.id, author = %task.author, "create_task: prepending");
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Create a task from the draft and clear the draft on success
    pub fn submit_draft(&mut self, draft: &mut TaskDraft) -> Result<Task, ValidationError> {
        let task = self.create_task(&draft.text, &draft.author)?;
        draft.clear();
        Ok(task)
    }

    /// Flip the completion flag; unknown ids are ignored
    pub fn toggle_completed(&mut self, id: TaskId) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(%id, completed = task.completed, "toggle_completed");
            }
            None => debug!(%id, "toggle_completed: no such task"),
        }
    }

    /// Remove a task; unknown ids are ignored
    pub fn delete_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(%id, "delete_task: no such task");
            return;
        }
        debug!(%id, "delete_task: removed");

        if self.editing_id() == Some(id) {
            debug!(%id, "delete_task: dropping edit state of deleted task");
            self.edit = EditState::Idle;
        }
    }

    /// Enter edit mode for `id`, replacing any unsaved edit
    pub fn begin_edit(&mut self, id: TaskId) {
        let Some((text, author)) = self.get(id).map(|t| (t.text.clone(), t.author.clone())) else {
            debug!(%id, "begin_edit: no such task");
            return;
        };

        if let Some(previous) = self.editing_id().filter(|prev| *prev != id) {
            debug!(%previous, %id, "begin_edit: discarding unsaved edit");
        }

        self.edit = EditState::Editing { id, text, author };
    }

    /// Replace the text edit buffer verbatim; ignored when not editing
    pub fn set_edited_text(&mut self, value: &str) {
        if let EditState::Editing { text, .. } = &mut self.edit {
            *text = value.to_string();
        }
    }

    /// Replace the author edit buffer verbatim; ignored when not editing
    pub fn set_edited_author(&mut self, value: &str) {
        if let EditState::Editing { author, .. } = &mut self.edit {
            *author = value.to_string();
        }
    }

    /// Write the edit buffers back to the task being edited
    ///
    /// Does nothing unless `id` is the task in edit mode. On validation
    /// failure the buffers and edit mode are left as they were so the user
    /// can correct them.
    pub fn commit_edit(&mut self, id: TaskId) -> Result<(), ValidationError> {
        let EditState::Editing { id: editing, text, author } = &self.edit else {
            debug!(%id, "commit_edit: not editing");
            return Ok(());
        };
        if *editing != id {
            debug!(%id, editing = %editing, "commit_edit: id is not in edit mode");
            return Ok(());
        }

        let (text, author) = validate(text, author)?;
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = text;
            task.author = author;
        }
        debug!(%id, "commit_edit: saved");
        self.edit = EditState::Idle;
        Ok(())
    }

    /// Leave edit mode, discarding the buffers
    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Replace query, status and author filters in one step
    pub fn set_filters(&mut self, filter: Filter) {
        debug!(query = %filter.query, status = %filter.status, author = %filter.author, "set_filters");
        self.filter = filter;
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Trim both fields, rejecting blanks
fn validate(text: &str, author: &str) -> Result<(String, String), ValidationError> {
    let text = text.trim();
    let author = author.trim();
    if text.is_empty() || author.is_empty() {
        return Err(ValidationError::EmptyField);
    }
    Ok((text.to_string(), author.to_string()))
}
