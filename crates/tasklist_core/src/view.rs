use crate::model::{Counts, Filter};
use crate::task_list::TaskList;
use serde::Serialize;

/// One displayed row. `row` is the 1-based position in the current view and
/// is how the user refers to a task; `id` is the task it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub row: usize,
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// Snapshot of what is on screen after a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub filter: Filter,
    pub counts: Counts,
    #[serde(rename = "tasks")]
    pub rows: Vec<Row>,
}

impl View {
    pub fn build(list: &TaskList, filter: Filter) -> Self {
        let rows = list
            .filtered(filter)
            .into_iter()
            .enumerate()
            .map(|(index, task)| Row {
                row: index + 1,
                id: task.id,
                text: task.text.clone(),
                completed: task.completed,
            })
            .collect();

        Self {
            filter,
            counts: list.counts(),
            rows,
        }
    }

    /// Resolves a row number to the id bound to that row.
    pub fn task_id_at(&self, row: usize) -> Option<u64> {
        self.rows
            .iter()
            .find(|candidate| candidate.row == row)
            .map(|candidate| candidate.id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
