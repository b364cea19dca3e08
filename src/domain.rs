//! Domain models: the persisted problem record, its notes, and the validated
//! create/update payloads handed to the store.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use crate::taxonomy::{Category, Difficulty};

/// One free-text note attached to a problem. The first note doubles as the
/// summary preview in list views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryNote {
  pub id: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
}

/// One tracked practice problem, as read back from the store.
///
/// `category` and `difficulty` hold the raw stored labels. Writes only ever
/// store taxonomy labels, but documents can originate outside this service, so
/// readers go through [`ProblemRecord::category_kind`] / [`ProblemRecord::difficulty_kind`].
///
/// On the wire the id is written twice, as `id` and as the document key `_id`
/// that browser clients read.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemRecord {
  pub id: String,
  pub category: String,
  pub problem_name: String,
  pub difficulty: String,
  pub leetcode_number: String,
  pub video_url: String,
  pub problem_url: String,
  pub summary_notes: Vec<SummaryNote>,
  pub solved: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Serialize for ProblemRecord {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut st = serializer.serialize_struct("ProblemRecord", 12)?;
    st.serialize_field("_id", &self.id)?;
    st.serialize_field("id", &self.id)?;
    st.serialize_field("category", &self.category)?;
    st.serialize_field("problemName", &self.problem_name)?;
    st.serialize_field("difficulty", &self.difficulty)?;
    st.serialize_field("leetcodeNumber", &self.leetcode_number)?;
    st.serialize_field("videoUrl", &self.video_url)?;
    st.serialize_field("problemUrl", &self.problem_url)?;
    st.serialize_field("summaryNotes", &self.summary_notes)?;
    st.serialize_field("solved", &self.solved)?;
    st.serialize_field("createdAt", &self.created_at)?;
    st.serialize_field("updatedAt", &self.updated_at)?;
    st.end()
  }
}

impl ProblemRecord {
  pub fn category_kind(&self) -> Option<Category> { self.category.parse().ok() }

  pub fn difficulty_kind(&self) -> Option<Difficulty> { self.difficulty.parse().ok() }
}

/// Fully validated create payload. Optional text fields are already defaulted
/// to empty strings and notes already carry ids and timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProblem {
  pub category: Category,
  pub problem_name: String,
  pub difficulty: Difficulty,
  pub leetcode_number: String,
  pub video_url: String,
  pub problem_url: String,
  pub summary_notes: Vec<SummaryNote>,
  pub solved: bool,
}

/// Validated partial update. `None` means "leave the stored value alone".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemPatch {
  pub category: Option<Category>,
  pub problem_name: Option<String>,
  pub difficulty: Option<Difficulty>,
  pub leetcode_number: Option<String>,
  pub video_url: Option<String>,
  pub problem_url: Option<String>,
  pub summary_notes: Option<Vec<SummaryNote>>,
  pub solved: Option<bool>,
}

impl ProblemPatch {
  /// Shallow merge: every supplied key replaces the stored value, nothing else moves.
  pub fn apply_to(self, rec: &mut ProblemRecord) {
    if let Some(c) = self.category { rec.category = c.as_str().to_string(); }
    if let Some(n) = self.problem_name { rec.problem_name = n; }
    if let Some(d) = self.difficulty { rec.difficulty = d.as_str().to_string(); }
    if let Some(v) = self.leetcode_number { rec.leetcode_number = v; }
    if let Some(v) = self.video_url { rec.video_url = v; }
    if let Some(v) = self.problem_url { rec.problem_url = v; }
    if let Some(v) = self.summary_notes { rec.summary_notes = v; }
    if let Some(v) = self.solved { rec.solved = v; }
  }
}

/// Parse a record identifier (24 hex chars). `None` for anything else.
pub fn parse_problem_id(id: &str) -> Option<ObjectId> { ObjectId::parse_str(id).ok() }

pub fn new_problem_id() -> String { ObjectId::new().to_hex() }
