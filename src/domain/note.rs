use serde::{Deserialize, Serialize};

/// Free-text note kept next to the budget.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl AsRef<str>, content: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            content: content.as_ref().trim().to_string(),
        }
    }

    /// Applies an edit where a blank field keeps its previous value.
    pub fn merged(&self, title: &str, content: &str) -> Self {
        Self {
            title: keep_if_blank(title, &self.title),
            content: keep_if_blank(content, &self.content),
        }
    }
}

pub(crate) fn keep_if_blank(candidate: &str, previous: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        previous.to_string()
    } else {
        trimmed.to_string()
    }
}
