//! # Sort Sink
//!
//! The persistence boundary. A [`SortSink`] receives whole-order save
//! requests and either lands them or fails; everything about retries,
//! coalescing and status lives above it in the saver.
//!
//! The wire envelope is exactly `{ "id": ..., "chapters": [...] }` with
//! the payload's own field names inside; `revision` is an in-process
//! bookkeeping number and never serialized.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;
use syllabus_outline::{CourseId, SortPayload};
use thiserror::Error;

/// One save: the course, the order snapshot, and a monotonically
/// increasing per-editor revision used for coalescing and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub course_id: CourseId,
    pub revision: u64,
    pub payload: SortPayload,
}

impl SaveRequest {
    pub fn new(course_id: CourseId, revision: u64, payload: SortPayload) -> Self {
        SaveRequest {
            course_id,
            revision,
            payload,
        }
    }

    /// The serializable wire form.
    pub fn envelope(&self) -> impl Serialize + '_ {
        Envelope {
            id: self.course_id,
            chapters: &self.payload,
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    id: CourseId,
    chapters: &'a SortPayload,
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rejected by the platform: {0}")]
    Rejected(String),
}

/// Where committed orders go. Implementations must be callable from the
/// saver task, hence `Send + Sync`.
#[async_trait]
pub trait SortSink: Send + Sync {
    async fn persist(&self, request: &SaveRequest) -> Result<(), SinkError>;
}

/// Records every request it is handed. The stand-in for the platform API
/// in tests and tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    requests: Mutex<Vec<SaveRequest>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Everything persisted so far, in arrival order.
    pub fn requests(&self) -> Vec<SaveRequest> {
        self.lock().clone()
    }

    pub fn last_revision(&self) -> Option<u64> {
        self.lock().last().map(|request| request.revision)
    }

    pub fn persisted_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SaveRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SortSink for MemorySink {
    async fn persist(&self, request: &SaveRequest) -> Result<(), SinkError> {
        self.lock().push(request.clone());
        Ok(())
    }
}

/// Writes the envelope as pretty JSON to one file, replacing whatever
/// was there. The offline stand-in the CLI uses for the platform API.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SortSink for JsonFileSink {
    async fn persist(&self, request: &SaveRequest) -> Result<(), SinkError> {
        let body = serde_json::to_vec_pretty(&request.envelope())?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_outline::{Chapter, ChapterId, Lesson, LessonId, LessonKind, Outline};

    fn request(revision: u64) -> SaveRequest {
        let mut outline = Outline::new();
        outline.insert_chapter(Chapter::new(ChapterId(3), "A")).unwrap();
        outline
            .insert_lesson(Lesson::new(LessonId(7), "x", LessonKind::Video, ChapterId(3)))
            .unwrap();
        SaveRequest::new(CourseId(12), revision, SortPayload::from_outline(&outline))
    }

    #[test]
    fn test_envelope_wire_shape() {
        let value = serde_json::to_value(request(1).envelope()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2, "envelope is exactly id plus chapters");
        assert_eq!(object["id"], 12);

        let chapters = object["chapters"].as_array().unwrap();
        let first = chapters[0].as_object().unwrap();
        assert_eq!(first["containerId"], 3);
        assert_eq!(first["sort"], 1);
        assert_eq!(first["items"][0]["itemId"], 7);
        // The revision is bookkeeping, not wire data.
        assert!(!object.contains_key("revision"));
    }

    #[tokio::test]
    async fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.persist(&request(1)).await.unwrap();
        sink.persist(&request(2)).await.unwrap();
        assert_eq!(sink.persisted_count(), 2);
        assert_eq!(sink.last_revision(), Some(2));
    }

    #[tokio::test]
    async fn test_file_sink_writes_the_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sort.json");
        let sink = JsonFileSink::new(&path);

        sink.persist(&request(5)).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["id"], 12);
        assert!(value["chapters"].is_array());
    }
}
