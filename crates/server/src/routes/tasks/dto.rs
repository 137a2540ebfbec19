use db::models::task::{CreateTask, DEFAULT_PRIORITY, UpdateTask};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub completed: Option<String>,
}

impl TaskQuery {
    /// Only the first `completed` pair counts; repeats are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let completed = pairs
            .into_iter()
            .find(|(key, _)| key == "completed")
            .map(|(_, value)| value);
        Self { completed }
    }

    /// Absent means no filter. Any present value other than "true" (in any
    /// case) filters on incomplete tasks.
    pub fn completed_filter(&self) -> Option<bool> {
        self.completed
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<CreateTask, ApiError> {
        Ok(CreateTask {
            title: required_title(self.title)?,
            description: trimmed_or_empty(self.description),
            priority: priority_or_default(self.priority),
        })
    }
}

/// Full replacement: omitted optional fields reset to their defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<UpdateTask, ApiError> {
        Ok(UpdateTask {
            title: required_title(self.title)?,
            description: trimmed_or_empty(self.description),
            completed: self.completed.unwrap_or(false),
            priority: priority_or_default(self.priority),
        })
    }
}

fn required_title(title: Option<String>) -> Result<String, ApiError> {
    title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))
}

fn trimmed_or_empty(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

/// Priority is free text: stored exactly as sent, defaulted only when absent.
fn priority_or_default(priority: Option<String>) -> String {
    priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string())
}
