//! Drag key codec.
//!
//! The drag layer of the dashboard flattens chapters and lessons into one
//! key space of opaque strings (`"chapter-12"`, `"lesson-7"`). Inside the
//! engine a key is always the typed [`DragKey`] union; the string form is
//! produced and parsed only at the UI event boundary, so a malformed key
//! can be rejected in exactly one place.

use crate::id::{ChapterId, LessonId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CHAPTER_PREFIX: &str = "chapter";
const LESSON_PREFIX: &str = "lesson";

/// A typed handle to one draggable row: either a chapter or a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragKey {
    Chapter(ChapterId),
    Lesson(LessonId),
}

impl DragKey {
    /// Render the key in its wire form, e.g. `"chapter-12"`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a wire-form key. Inverse of [`DragKey::encode`]:
    /// `decode(encode(k)) == k` for every valid key.
    pub fn decode(raw: &str) -> Result<Self, KeyError> {
        let (kind, id) = raw
            .split_once('-')
            .ok_or_else(|| KeyError::MissingSeparator(raw.to_string()))?;
        match kind {
            CHAPTER_PREFIX => {
                let id = id
                    .parse::<u64>()
                    .map_err(|_| KeyError::InvalidId(raw.to_string()))?;
                Ok(DragKey::Chapter(ChapterId(id)))
            }
            LESSON_PREFIX => {
                let id = id
                    .parse::<u64>()
                    .map_err(|_| KeyError::InvalidId(raw.to_string()))?;
                Ok(DragKey::Lesson(LessonId(id)))
            }
            other => Err(KeyError::UnknownKind(other.to_string())),
        }
    }

    /// True when the key names a chapter row.
    pub fn is_chapter(&self) -> bool {
        matches!(self, DragKey::Chapter(_))
    }

    /// True when the key names a lesson row.
    pub fn is_lesson(&self) -> bool {
        matches!(self, DragKey::Lesson(_))
    }
}

impl fmt::Display for DragKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragKey::Chapter(id) => write!(f, "{CHAPTER_PREFIX}-{id}"),
            DragKey::Lesson(id) => write!(f, "{LESSON_PREFIX}-{id}"),
        }
    }
}

impl FromStr for DragKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DragKey::decode(s)
    }
}

/// A key string that does not follow the `<kind>-<id>` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("drag key has no kind separator: {0:?}")]
    MissingSeparator(String),

    #[error("unknown drag key kind: {0:?}")]
    UnknownKind(String),

    #[error("drag key id is not a number: {0:?}")]
    InvalidId(String),
}
