//! In-memory entity stores.
//!
//! Keyed mappings with no internal policy; every access rule lives in
//! [`super::access`]. Mutations that must be atomic (task completion, the
//! completion counter) go through the entry's own lock.

use dashmap::DashMap;
use std::sync::Arc;

use crate::models::{Bot, GeneratedCode, Task, TaskResult};

#[derive(Clone, Default)]
pub struct BotStore {
    inner: Arc<DashMap<String, Bot>>,
}

impl BotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bot: Bot) {
        self.inner.insert(bot.id.clone(), bot);
    }

    pub fn get(&self, id: &str) -> Option<Bot> {
        self.inner.get(id).map(|entry| entry.clone())
    }

    pub fn owner_of(&self, id: &str) -> Option<String> {
        self.inner.get(id).map(|entry| entry.owner.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Bot> {
        self.inner.remove(id).map(|(_, bot)| bot)
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }

    pub fn visible_to(&self, email: &str, is_admin: bool) -> Vec<Bot> {
        self.inner
            .iter()
            .filter(|entry| is_admin || entry.owner == email)
            .map(|entry| entry.clone())
            .collect()
    }

    /// Bump the completion counter; a no-op when the bot was deleted while
    /// its task was still running.
    pub fn record_completion(&self, id: &str) {
        if let Some(mut bot) = self.inner.get_mut(id) {
            bot.tasks_completed += 1;
        }
    }
}

#[derive(Clone, Default)]
pub struct CodeStore {
    inner: Arc<DashMap<String, GeneratedCode>>,
}

impl CodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, code: GeneratedCode) {
        self.inner.insert(code.id.clone(), code);
    }

    pub fn get(&self, id: &str) -> Option<GeneratedCode> {
        self.inner.get(id).map(|entry| entry.clone())
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }

    pub fn approve(&self, id: &str, approved_by: &str) -> Option<GeneratedCode> {
        let mut entry = self.inner.get_mut(id)?;
        entry.approve(approved_by);
        Some(entry.clone())
    }
}

#[derive(Clone, Default)]
pub struct TaskStore {
    inner: Arc<DashMap<String, Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, task: Task) {
        self.inner.insert(task.id.clone(), task);
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.inner.get(id).map(|entry| entry.clone())
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// Tasks whose bot is visible to the caller. A task whose bot was
    /// deleted is not listed.
    pub fn visible_to(&self, bots: &BotStore, email: &str, is_admin: bool) -> Vec<Task> {
        self.inner
            .iter()
            .filter(|entry| {
                bots.get(&entry.bot_id)
                    .map(|bot| is_admin || bot.owner == email)
                    .unwrap_or(false)
            })
            .map(|entry| entry.clone())
            .collect()
    }

    /// Atomic Pending -> Completed transition guarded by the task's own map
    /// entry. Returns the completed task, or None if the task is gone or
    /// already terminal.
    pub fn complete(&self, id: &str, result: TaskResult) -> Option<Task> {
        let mut entry = self.inner.get_mut(id)?;
        if !entry.complete(result) {
            return None;
        }
        Some(entry.clone())
    }

    /// Cancel every pending task assigned to the given bot, returning the
    /// ids of the tasks that actually transitioned.
    pub fn cancel_for_bot(&self, bot_id: &str) -> Vec<String> {
        let mut cancelled = Vec::new();
        for mut entry in self.inner.iter_mut() {
            if entry.bot_id == bot_id && entry.cancel() {
                cancelled.push(entry.id.clone());
            }
        }
        cancelled
    }
}
