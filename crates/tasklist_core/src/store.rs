use crate::error::AppError;
use crate::storage::Storage;
use crate::storage::json_store::{self, STORAGE_KEY};
use crate::task_list::TaskList;
use time::OffsetDateTime;

/// Current time in nanoseconds since the epoch. Every id issued by an earlier
/// session lies below it, so new ids cannot collide with deleted ones.
fn id_floor() -> u64 {
    u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos()).unwrap_or(0)
}

/// Owns the task list and keeps the storage slot in step with it.
///
/// Every mutation that changes the list is written through synchronously
/// before the call returns. Mutations that change nothing skip the write.
#[derive(Debug)]
pub struct Store<S> {
    storage: S,
    list: TaskList,
}

impl<S: Storage> Store<S> {
    /// Reads the slot once. A missing, unreadable or malformed slot yields
    /// an empty list; the problem is logged and otherwise ignored.
    pub fn load(storage: S) -> Self {
        let mut list = match storage.get_item(STORAGE_KEY) {
            Ok(Some(content)) => match json_store::decode_tasks(&content) {
                Ok(tasks) => {
                    let (list, dropped) = TaskList::from_tasks(tasks);
                    if dropped > 0 {
                        tracing::warn!(dropped, "dropped tasks with duplicate ids");
                    }
                    list
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored task list is malformed, starting empty");
                    TaskList::new()
                }
            },
            Ok(None) => TaskList::new(),
            Err(err) => {
                tracing::warn!(error = %err, "stored task list is unreadable, starting empty");
                TaskList::new()
            }
        };

        list.reserve_ids_from(id_floor());
        tracing::debug!(tasks = list.len(), "loaded task list");
        Self { storage, list }
    }

    /// Overwrites the slot with the full list.
    pub fn save(&mut self) -> Result<(), AppError> {
        let content = json_store::encode_tasks(self.list.tasks())?;
        self.storage.set_item(STORAGE_KEY, &content)?;
        tracing::debug!(tasks = self.list.len(), "saved task list");
        Ok(())
    }

    pub fn add(&mut self, text: &str) -> Result<Option<u64>, AppError> {
        let Some(id) = self.list.add(text) else {
            if text.trim().is_empty() {
                tracing::debug!("ignored blank task text");
            } else {
                tracing::warn!("task ids exhausted, task not added");
            }
            return Ok(None);
        };
        tracing::debug!(id, "added task");
        self.save()?;
        Ok(Some(id))
    }

    pub fn toggle(&mut self, id: u64) -> Result<bool, AppError> {
        if !self.list.toggle(id) {
            return Ok(false);
        }
        tracing::debug!(id, "toggled task");
        self.save()?;
        Ok(true)
    }

    pub fn remove(&mut self, id: u64) -> Result<bool, AppError> {
        if !self.list.remove(id) {
            return Ok(false);
        }
        tracing::debug!(id, "removed task");
        self.save()?;
        Ok(true)
    }

    pub fn clear_completed(&mut self) -> Result<usize, AppError> {
        let removed = self.list.clear_completed();
        if removed > 0 {
            tracing::debug!(removed, "cleared completed tasks");
            self.save()?;
        }
        Ok(removed)
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
