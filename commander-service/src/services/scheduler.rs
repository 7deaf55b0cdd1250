//! Scheduled task completion.
//!
//! Assignment spawns one delayed job per task. The job is cancellable (bot
//! deletion aborts it), and the status transition itself goes through the
//! task's map entry, so a job that loses the race with cancellation finds
//! the task already terminal and leaves it untouched.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

use super::stores::{BotStore, TaskStore};
use crate::models::TaskResult;
use crate::utils::truncate_chars;

#[derive(Clone)]
pub struct TaskScheduler {
    jobs: Arc<DashMap<String, AbortHandle>>,
    delay: Duration,
}

impl TaskScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            jobs: Arc::new(DashMap::new()),
            delay,
        }
    }

    /// Spawn the completion job for a freshly assigned task.
    pub fn schedule_completion(&self, task_id: String, tasks: TaskStore, bots: BotStore) {
        let jobs = self.jobs.clone();
        let delay = self.delay;
        let id = task_id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let completed = tasks.get(&id).and_then(|task| {
                let bot_skills = bots
                    .get(&task.bot_id)
                    .map(|bot| bot.skills.clone())
                    .unwrap_or_default();
                let result = TaskResult {
                    success: true,
                    output: format!(
                        "Task completed by {}: {}",
                        task.bot_name,
                        truncate_chars(&task.task, 50)
                    ),
                    bot_skills,
                };
                tasks.complete(&id, result)
            });

            if let Some(task) = completed {
                bots.record_completion(&task.bot_id);
                tracing::debug!(task_id = %task.id, bot_id = %task.bot_id, "task completed");
            }

            jobs.remove(&id);
        });

        self.jobs.insert(task_id, handle.abort_handle());
    }

    /// Abort the scheduled job for a task, if one is still outstanding.
    /// Idempotent; the status transition is handled by the caller through
    /// the task store.
    pub fn cancel(&self, task_id: &str) {
        if let Some((_, handle)) = self.jobs.remove(task_id) {
            handle.abort();
        }
    }

    pub fn outstanding_jobs(&self) -> usize {
        self.jobs.len()
    }
}
