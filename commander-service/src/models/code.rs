use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated code snippet awaiting approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    /// False when the fallback template was substituted for provider output.
    pub generator_used: bool,
}

impl GeneratedCode {
    pub fn new(
        name: String,
        description: String,
        code: String,
        owner: String,
        generator_used: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            code,
            owner,
            created_at: Utc::now(),
            approved: false,
            approved_at: None,
            approved_by: None,
            generator_used,
        }
    }

    pub fn approve(&mut self, approved_by: &str) {
        self.approved = true;
        self.approved_at = Some(Utc::now());
        self.approved_by = Some(approved_by.to_string());
    }
}
