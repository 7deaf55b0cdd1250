use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bot record. Ownership is fixed at creation and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub alive: bool,
    pub tasks_completed: u32,
}

impl Bot {
    pub fn new(name: String, skills: Vec<String>, description: Option<String>, owner: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            skills,
            description,
            owner,
            created_at: Utc::now(),
            alive: true,
            tasks_completed: 0,
        }
    }
}
