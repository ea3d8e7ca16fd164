use crate::model::{Counts, Filter, Task};
use std::collections::HashSet;

/// The in-memory task list, newest task first.
///
/// All operations are pure state transitions: nothing here touches storage or
/// output, so callers decide when to persist and re-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from already ordered tasks. Later tasks reusing an id
    /// seen earlier are dropped so ids stay pairwise distinct; the number of
    /// dropped tasks is returned alongside the list.
    pub fn from_tasks(tasks: Vec<Task>) -> (Self, usize) {
        let mut seen = HashSet::with_capacity(tasks.len());
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id))
            .collect();
        let dropped = before - tasks.len();

        let next_id = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        (Self { tasks, next_id }, dropped)
    }

    /// Raises the id counter to at least `floor`. Ids handed out before a
    /// reload can no longer be seen once their tasks are deleted, so callers
    /// pass a clock reading that is past every id issued earlier.
    pub fn reserve_ids_from(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Prepends a new pending task. Returns `None` when `text` is blank or
    /// the id space is used up.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let id = self.fresh_id()?;
        self.tasks.insert(
            0,
            Task {
                id,
                text: trimmed.to_string(),
                completed: false,
            },
        );
        Some(id)
    }

    /// Flips the completion flag. Returns `false` when no task has `id`.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        before - self.tasks.len()
    }

    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.tasks)
    }

    /// Ids only move forward; a freed id is never handed out again.
    fn fresh_id(&mut self) -> Option<u64> {
        let id = self.next_id.max(1);
        if id == u64::MAX {
            return None;
        }
        self.next_id = id + 1;
        Some(id)
    }
}
