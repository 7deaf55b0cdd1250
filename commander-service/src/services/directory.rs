use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Identity;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("API key already registered")]
    DuplicateApiKey,
}

/// Identity table indexed by API key.
///
/// Credential resolution is a direct index lookup; key uniqueness is an
/// insertion invariant rather than a scan artifact.
#[derive(Clone, Default)]
pub struct IdentityDirectory {
    by_api_key: Arc<DashMap<String, Identity>>,
}

impl IdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, identity: Identity) -> Result<(), DirectoryError> {
        match self.by_api_key.entry(identity.api_key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DirectoryError::DuplicateApiKey),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(identity);
                Ok(())
            }
        }
    }

    pub fn find_by_api_key(&self, api_key: &str) -> Option<Identity> {
        self.by_api_key.get(api_key).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.by_api_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str, api_key: &str, is_admin: bool) -> Identity {
        Identity::new(
            email.to_string(),
            "password".to_string(),
            api_key.to_string(),
            is_admin,
        )
    }

    #[test]
    fn test_lookup_returns_inserted_identity() {
        let directory = IdentityDirectory::new();
        directory
            .insert(identity("a@test.local", "key-a", false))
            .unwrap();

        let found = directory.find_by_api_key("key-a").unwrap();
        assert_eq!(found.email, "a@test.local");
        assert!(!found.is_admin);
    }

    #[test]
    fn test_unknown_key_misses() {
        let directory = IdentityDirectory::new();
        assert!(directory.find_by_api_key("nope").is_none());
    }

    #[test]
    fn test_duplicate_api_key_is_rejected() {
        let directory = IdentityDirectory::new();
        directory
            .insert(identity("a@test.local", "key-a", false))
            .unwrap();

        let result = directory.insert(identity("b@test.local", "key-a", false));
        assert!(matches!(result, Err(DirectoryError::DuplicateApiKey)));
        assert_eq!(directory.len(), 1);
    }
}
