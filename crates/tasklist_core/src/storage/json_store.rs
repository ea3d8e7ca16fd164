use crate::error::AppError;
use crate::model::Task;

/// Fixed slot holding the serialized task list. The suffix versions the format.
pub const STORAGE_KEY: &str = "tasklist_tasks_v1";

/// Serializes the list as a JSON array of `{id, text, completed}` objects.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, AppError> {
    Ok(serde_json::to_string(tasks)?)
}

pub fn decode_tasks(content: &str) -> Result<Vec<Task>, AppError> {
    Ok(serde_json::from_str(content)?)
}
