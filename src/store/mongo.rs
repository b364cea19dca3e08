//! MongoDB-backed store. One document per problem in a single collection.
//!
//! Layout: camelCase keys, `_id` ObjectId, BSON datetimes. Documents missing
//! optional keys or timestamps (older collections) still load.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::StoreConfig;
use crate::domain::{NewProblem, ProblemPatch, ProblemRecord, SummaryNote};
use crate::store::{ProblemStore, StoreError};
use crate::taxonomy::{is_valid_category, is_valid_difficulty};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteDoc {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<BsonDateTime>,
}

/// Problem document as stored in MongoDB.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDoc {
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  pub id: Option<ObjectId>,
  pub category: String,
  pub problem_name: String,
  pub difficulty: String,
  #[serde(default)]
  pub leetcode_number: String,
  #[serde(default)]
  pub video_url: String,
  #[serde(default)]
  pub problem_url: String,
  #[serde(default)]
  pub summary_notes: Vec<NoteDoc>,
  #[serde(default)]
  pub solved: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<BsonDateTime>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<BsonDateTime>,
}

fn notes_to_docs(notes: Vec<SummaryNote>) -> Vec<NoteDoc> {
  notes
    .into_iter()
    .map(|n| NoteDoc { id: n.id, content: n.content, created_at: Some(BsonDateTime::from_chrono(n.created_at)) })
    .collect()
}

impl ProblemDoc {
  fn from_new(p: NewProblem, now: BsonDateTime) -> Self {
    Self {
      id: None,
      category: p.category.as_str().to_string(),
      problem_name: p.problem_name,
      difficulty: p.difficulty.as_str().to_string(),
      leetcode_number: p.leetcode_number,
      video_url: p.video_url,
      problem_url: p.problem_url,
      summary_notes: notes_to_docs(p.summary_notes),
      solved: p.solved,
      created_at: Some(now),
      updated_at: Some(now),
    }
  }

  /// Documents written without timestamps fall back to the ObjectId's creation time.
  fn into_record(self) -> Result<ProblemRecord, StoreError> {
    let oid = self.id.ok_or_else(|| StoreError::Corrupt { id: "<none>".into(), reason: "missing _id".into() })?;
    let created = self.created_at.unwrap_or_else(|| oid.timestamp());
    let updated = self.updated_at.unwrap_or(created);
    if !is_valid_category(&self.category) || !is_valid_difficulty(&self.difficulty) {
      warn!(target: "tracker", id = %oid, category = %self.category, difficulty = %self.difficulty, "Stored labels outside taxonomy");
    }
    let summary_notes = self
      .summary_notes
      .into_iter()
      .map(|n| SummaryNote { id: n.id, content: n.content, created_at: n.created_at.unwrap_or(created).to_chrono() })
      .collect();
    Ok(ProblemRecord {
      id: oid.to_hex(),
      category: self.category,
      problem_name: self.problem_name,
      difficulty: self.difficulty,
      leetcode_number: self.leetcode_number,
      video_url: self.video_url,
      problem_url: self.problem_url,
      summary_notes,
      solved: self.solved,
      created_at: created.to_chrono(),
      updated_at: updated.to_chrono(),
    })
  }
}

/// `$set` body for a patch. `updatedAt` is always included.
fn patch_to_set(patch: ProblemPatch, now: BsonDateTime) -> Result<Document, StoreError> {
  let mut set = doc! { "updatedAt": now };
  if let Some(c) = patch.category { set.insert("category", c.as_str()); }
  if let Some(n) = patch.problem_name { set.insert("problemName", n); }
  if let Some(d) = patch.difficulty { set.insert("difficulty", d.as_str()); }
  if let Some(v) = patch.leetcode_number { set.insert("leetcodeNumber", v); }
  if let Some(v) = patch.video_url { set.insert("videoUrl", v); }
  if let Some(v) = patch.problem_url { set.insert("problemUrl", v); }
  if let Some(v) = patch.solved { set.insert("solved", v); }
  if let Some(notes) = patch.summary_notes {
    let bson = bson::to_bson(&notes_to_docs(notes))
      .map_err(|e| StoreError::Backend(format!("Failed to encode summaryNotes: {}", e)))?;
    set.insert("summaryNotes", bson);
  }
  Ok(set)
}

fn db_err(op: &str) -> impl Fn(mongodb::error::Error) -> StoreError + '_ {
  move |e| StoreError::Backend(format!("{} failed: {}", op, e))
}

#[derive(Clone)]
pub struct MongoStore {
  problems: Collection<ProblemDoc>,
}

impl MongoStore {
  /// Connect, ping, and make sure the `createdAt` index exists.
  pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
    let uri = cfg
      .mongodb_uri
      .as_deref()
      .ok_or_else(|| StoreError::Backend("mongo backend selected but no MongoDB URI configured".into()))?;

    // Fail fast instead of hanging when the server is unreachable.
    let uri = if uri.contains('?') {
      format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
    } else {
      format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
    };

    let client = Client::with_uri_str(&uri).await.map_err(db_err("connect"))?;
    let db = client.database(&cfg.database);
    db.run_command(doc! { "ping": 1 }).await.map_err(db_err("ping"))?;

    let problems = db.collection::<ProblemDoc>(&cfg.collection);
    problems
      .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
      .await
      .map_err(db_err("create index"))?;

    info!(target: "tracker", database = %cfg.database, collection = %cfg.collection, "Connected to MongoDB");
    Ok(Self { problems })
  }
}

#[async_trait]
impl ProblemStore for MongoStore {
  fn backend(&self) -> &'static str { "mongo" }

  #[instrument(level = "debug", skip(self))]
  async fn list(&self) -> Result<Vec<ProblemRecord>, StoreError> {
    let docs: Vec<ProblemDoc> = self
      .problems
      .find(doc! {})
      .sort(doc! { "createdAt": -1, "_id": -1 })
      .await
      .map_err(db_err("find"))?
      .try_collect()
      .await
      .map_err(db_err("cursor"))?;
    docs.into_iter().map(ProblemDoc::into_record).collect()
  }

  async fn count(&self) -> Result<u64, StoreError> {
    self.problems.count_documents(doc! {}).await.map_err(db_err("count"))
  }

  #[instrument(level = "debug", skip(self))]
  async fn get(&self, id: &str) -> Result<Option<ProblemRecord>, StoreError> {
    let Ok(oid) = ObjectId::parse_str(id) else { return Ok(None) };
    self
      .problems
      .find_one(doc! { "_id": oid })
      .await
      .map_err(db_err("find_one"))?
      .map(ProblemDoc::into_record)
      .transpose()
  }

  #[instrument(level = "debug", skip(self, problem), fields(category = %problem.category))]
  async fn insert(&self, problem: NewProblem) -> Result<ProblemRecord, StoreError> {
    let mut doc = ProblemDoc::from_new(problem, BsonDateTime::now());
    let res = self.problems.insert_one(&doc).await.map_err(db_err("insert"))?;
    let oid = res
      .inserted_id
      .as_object_id()
      .ok_or_else(|| StoreError::Backend("insert returned a non-ObjectId _id".into()))?;
    doc.id = Some(oid);
    doc.into_record()
  }

  #[instrument(level = "debug", skip(self, patch))]
  async fn update(&self, id: &str, patch: ProblemPatch) -> Result<Option<ProblemRecord>, StoreError> {
    let Ok(oid) = ObjectId::parse_str(id) else { return Ok(None) };
    let set = patch_to_set(patch, BsonDateTime::now())?;
    self
      .problems
      .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
      .return_document(ReturnDocument::After)
      .await
      .map_err(db_err("find_one_and_update"))?
      .map(ProblemDoc::into_record)
      .transpose()
  }

  #[instrument(level = "debug", skip(self))]
  async fn delete(&self, id: &str) -> Result<bool, StoreError> {
    let Ok(oid) = ObjectId::parse_str(id) else { return Ok(false) };
    let res = self.problems.delete_one(doc! { "_id": oid }).await.map_err(db_err("delete"))?;
    Ok(res.deleted_count > 0)
  }
}

#[cfg(test)]
mod tests {
  // Round-trips against a live server are not run here; these cover the
  // document mapping that every query goes through.
  use super::*;
  use crate::taxonomy::{Category, Difficulty};
  use chrono::Utc;

  #[test]
  fn legacy_document_without_timestamps_uses_object_id_time() {
    let oid = ObjectId::new();
    let raw = doc! {
      "_id": oid,
      "category": "Trees",
      "problemName": "Invert Binary Tree",
      "difficulty": "Easy",
      "summaryNotes": [ { "id": "1", "content": "recurse" } ],
    };
    let parsed: ProblemDoc = bson::from_document(raw).unwrap();
    let rec = parsed.into_record().unwrap();
    assert_eq!(rec.id, oid.to_hex());
    assert_eq!(rec.created_at, oid.timestamp().to_chrono());
    assert_eq!(rec.updated_at, rec.created_at);
    assert_eq!(rec.summary_notes[0].created_at, rec.created_at);
    assert!(!rec.solved);
    assert_eq!(rec.leetcode_number, "");
  }

  #[test]
  fn document_without_id_is_corrupt() {
    let d = ProblemDoc { category: "Trees".into(), problem_name: "x".into(), difficulty: "Easy".into(), ..Default::default() };
    assert!(matches!(d.into_record(), Err(StoreError::Corrupt { .. })));
  }

  #[test]
  fn new_problem_serializes_without_id() {
    let now = BsonDateTime::now();
    let d = ProblemDoc::from_new(
      NewProblem {
        category: Category::HeapPriorityQueue,
        problem_name: "Last Stone Weight".into(),
        difficulty: Difficulty::Easy,
        leetcode_number: "1046".into(),
        video_url: String::new(),
        problem_url: String::new(),
        summary_notes: vec![SummaryNote { id: "a".into(), content: "max heap".into(), created_at: Utc::now() }],
        solved: true,
      },
      now,
    );
    let raw = bson::to_document(&d).unwrap();
    assert!(raw.get("_id").is_none());
    assert_eq!(raw.get_str("category").unwrap(), "Heap/Priority Queue");
    assert_eq!(raw.get_str("problemName").unwrap(), "Last Stone Weight");
    assert_eq!(raw.get_datetime("createdAt").unwrap(), &now);
    assert_eq!(raw.get_array("summaryNotes").unwrap().len(), 1);
  }

  #[test]
  fn patch_sets_only_supplied_keys() {
    let now = BsonDateTime::now();
    let set = patch_to_set(ProblemPatch { solved: Some(true), ..Default::default() }, now).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.get_bool("solved").unwrap(), true);
    assert!(set.get("summaryNotes").is_none());

    let set = patch_to_set(
      ProblemPatch { difficulty: Some(Difficulty::Hard), summary_notes: Some(vec![]), ..Default::default() },
      now,
    )
    .unwrap();
    assert_eq!(set.get_str("difficulty").unwrap(), "Hard");
    assert!(set.get_array("summaryNotes").unwrap().is_empty());
  }
}
