use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Bot;

/// Task lifecycle: Pending -> Completed | Cancelled. Terminal states never
/// transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Outcome recorded when a task's completion job fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub success: bool,
    pub output: String,
    pub bot_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub bot_id: String,
    pub bot_name: String,
    pub task: String,
    pub assigned_by: String,
    pub assigned_at: DateTime<Utc>,
    pub status: TaskStatus,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
}

impl Task {
    pub fn new(bot: &Bot, task: String, assigned_by: String, timeout_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bot_id: bot.id.clone(),
            bot_name: bot.name.clone(),
            task,
            assigned_by,
            assigned_at: Utc::now(),
            status: TaskStatus::Pending,
            timeout_secs,
            completed_at: None,
            result: None,
        }
    }

    /// Transition Pending -> Completed. Returns false if the task already
    /// reached a terminal state.
    pub fn complete(&mut self, result: TaskResult) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.result = Some(result);
        true
    }

    /// Transition Pending -> Cancelled. Returns false if the task already
    /// reached a terminal state.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TaskStatus::Cancelled;
        true
    }
}
