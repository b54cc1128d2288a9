//! Typed identifiers for courses, chapters and lessons.
//!
//! Chapter and lesson ids live in separate numeric spaces; the drag key
//! prefix keeps them apart once both appear in the same flattened list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u64);

/// Identifier of a chapter within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(pub u64);

/// Identifier of a lesson within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CourseId {
    fn from(raw: u64) -> Self {
        CourseId(raw)
    }
}

impl From<u64> for ChapterId {
    fn from(raw: u64) -> Self {
        ChapterId(raw)
    }
}

impl From<u64> for LessonId {
    fn from(raw: u64) -> Self {
        LessonId(raw)
    }
}
