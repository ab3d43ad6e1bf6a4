use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::keep_if_blank;

/// A stored login. The secret is persisted in plain text.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub service: String,
    pub user: String,
    pub secret: String,
}

impl CredentialEntry {
    pub fn new(service: impl AsRef<str>, user: impl AsRef<str>, secret: impl AsRef<str>) -> Self {
        Self {
            service: service.as_ref().trim().to_string(),
            user: user.as_ref().trim().to_string(),
            secret: secret.as_ref().trim().to_string(),
        }
    }

    /// Applies an edit where a blank field keeps its previous value.
    pub fn merged(&self, service: &str, user: &str, secret: &str) -> Self {
        Self {
            service: keep_if_blank(service, &self.service),
            user: keep_if_blank(user, &self.user),
            secret: keep_if_blank(secret, &self.secret),
        }
    }
}

// Keeps secrets out of logs and panic messages.
impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("service", &self.service)
            .field("user", &self.user)
            .field("secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_secret() {
        let entry = CredentialEntry::new("mail", "me", "hunter2");
        let rendered = format!("{entry:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("mail"));
    }

    #[test]
    fn merged_replaces_only_filled_fields() {
        let entry = CredentialEntry::new("bank", "alice", "old");
        let edited = entry.merged("", "", "new");
        assert_eq!(edited, CredentialEntry::new("bank", "alice", "new"));
    }
}
