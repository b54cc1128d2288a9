//! Error types for outline construction, mutation and document IO.

use crate::id::{ChapterId, LessonId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("unknown chapter: {0}")]
    UnknownChapter(ChapterId),

    #[error("unknown lesson: {0}")]
    UnknownLesson(LessonId),

    #[error("duplicate chapter id: {0}")]
    DuplicateChapter(ChapterId),

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("corrupt outline: {0}")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed course document: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type OutlineResult<T> = Result<T, OutlineError>;
