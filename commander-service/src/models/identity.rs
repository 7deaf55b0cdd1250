use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered caller.
///
/// The password is part of the seed data but plays no role in API
/// authentication; only the API key is ever checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    pub api_key: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(email: String, password: String, api_key: String, is_admin: bool) -> Self {
        Self {
            email,
            password,
            api_key,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
