//! Task model definitions

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Generate a task id: unix millis, a dash, then a short base36 suffix.
///
/// The suffix keeps ids distinct when several tasks land in the same millisecond.
pub fn generate_task_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Caller-supplied task fields, free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub priority: String,
}

/// A stored task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub date: String,
    pub priority: String,
    pub image_url: Option<String>,
}

impl Task {
    /// Create a record from a draft with a freshly generated id
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            id: generate_task_id(),
            name: draft.name,
            date: draft.date,
            priority: draft.priority,
            image_url: None,
        }
    }

    /// Set the stored image key
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn draft(name: &str) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            date: "2024-05-01".to_string(),
            priority: "high".to_string(),
        }
    }

    #[test]
    fn test_create_task() {
        let task = Task::new(draft("Buy milk"));
        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.date, "2024-05-01");
        assert_eq!(task.priority, "high");
        assert!(task.image_url.is_none());
    }

    #[test]
    fn test_task_id_format() {
        let id = generate_task_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_task_ids_unique_within_burst() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_task_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::new(draft("Shape")).with_image_url("cat.jpg");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["imageUrl"], "cat.jpg");
        assert_eq!(value["name"], "Shape");

        let bare = serde_json::to_value(Task::new(draft("Bare"))).unwrap();
        assert!(bare["imageUrl"].is_null());
    }

    #[test]
    fn test_draft_defaults_missing_fields() {
        let draft: TaskDraft = serde_json::from_str(r#"{"name":"only name"}"#).unwrap();
        assert_eq!(draft.name, "only name");
        assert_eq!(draft.date, "");
        assert_eq!(draft.priority, "");
    }
}
