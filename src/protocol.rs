//! Public HTTP request/response structs (serde ready).
//! Records and stats are serialized directly from `domain` / `stats`; this
//! module only holds the shapes that exist at the edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /problems` and `PUT /problems/{id}`, also the shape of a
/// `[[problems]]` seed entry in the config file.
///
/// Everything is optional at this level; create and update apply different
/// rules on top (see `logic`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemIn {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "problem_name")]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default, alias = "leetcode_number")]
    pub leetcode_number: Option<String>,
    #[serde(default, alias = "video_url")]
    pub video_url: Option<String>,
    #[serde(default, alias = "problem_url")]
    pub problem_url: Option<String>,
    #[serde(default, alias = "summary_notes")]
    pub summary_notes: Option<Vec<NoteIn>>,
    #[serde(default)]
    pub solved: Option<bool>,
}

/// A note as clients send it: either a full object or just its text.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum NoteIn {
    Text(String),
    Full(NoteObjectIn),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteObjectIn {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional exact-match filters for `GET /problems`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub solved: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOut {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyOut {
    pub categories: Vec<&'static str>,
    pub difficulties: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub store: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_accept_strings_and_objects() {
        let body: ProblemIn = serde_json::from_str(
            r#"{
                "category": "Stack",
                "problemName": "Min Stack",
                "difficulty": "Medium",
                "summaryNotes": [
                    "keep a second stack of minimums",
                    { "id": "n-2", "content": "push min(x, top)" },
                    { "content": "O(1) getMin", "createdAt": "2024-05-01T10:00:00Z" }
                ]
            }"#,
        )
        .unwrap();
        let notes = body.summary_notes.unwrap();
        assert!(matches!(&notes[0], NoteIn::Text(t) if t == "keep a second stack of minimums"));
        assert!(matches!(&notes[1], NoteIn::Full(n) if n.id.as_deref() == Some("n-2")));
        assert!(matches!(&notes[2], NoteIn::Full(n) if n.id.is_none() && n.created_at.is_some()));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        // The UI sends whole records back on edit, server-managed keys included.
        let body: ProblemIn = serde_json::from_str(
            r#"{ "_id": "665f1c2e9b1e8a0012345678", "createdAt": "2024-01-01T00:00:00Z", "__v": 0, "solved": true }"#,
        )
        .unwrap();
        assert_eq!(body.solved, Some(true));
        assert!(body.category.is_none());
        assert!(body.summary_notes.is_none());
    }

    #[test]
    fn error_body_omits_empty_details() {
        let v = serde_json::to_value(ErrorOut { error: "Problem not found".into(), details: None }).unwrap();
        assert_eq!(v, serde_json::json!({ "error": "Problem not found" }));
    }
}
