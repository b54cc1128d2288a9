//! Sort payload sent to the platform after a committed drop.
//!
//! The payload is a whole-tree snapshot of the new order: every chapter
//! appears (hidden and empty ones included) with contiguous 1-based `sort`
//! values at both levels. The serialized field names `containerId`,
//! `sort`, `items` and `itemId` are the wire contract and must not drift.

use crate::error::{OutlineError, OutlineResult};
use crate::id::{ChapterId, LessonId};
use crate::model::Outline;
use serde::{Deserialize, Serialize};

/// Ordered sort entries for a whole course, one per chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortPayload {
    pub entries: Vec<ChapterSort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSort {
    #[serde(rename = "containerId")]
    pub chapter_id: ChapterId,
    pub sort: u32,
    pub items: Vec<LessonSort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSort {
    #[serde(rename = "itemId")]
    pub lesson_id: LessonId,
    pub sort: u32,
}

impl SortPayload {
    /// Snapshot the outline's current order into a payload.
    pub fn from_outline(outline: &Outline) -> Self {
        let entries = outline
            .chapter_order()
            .iter()
            .enumerate()
            .map(|(chapter_index, chapter_id)| {
                let items = outline
                    .lessons_in(*chapter_id)
                    .unwrap_or_default()
                    .iter()
                    .enumerate()
                    .map(|(lesson_index, lesson_id)| LessonSort {
                        lesson_id: *lesson_id,
                        sort: lesson_index as u32 + 1,
                    })
                    .collect();
                ChapterSort {
                    chapter_id: *chapter_id,
                    sort: chapter_index as u32 + 1,
                    items,
                }
            })
            .collect();
        SortPayload { entries }
    }

    /// Check that `sort` values at both levels are contiguous, 1-based and
    /// match the sequence order.
    pub fn validate(&self) -> OutlineResult<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            let expected = index as u32 + 1;
            if entry.sort != expected {
                return Err(OutlineError::Corrupt(format!(
                    "chapter {} carries sort {} at position {}",
                    entry.chapter_id, entry.sort, expected
                )));
            }
            for (lesson_index, item) in entry.items.iter().enumerate() {
                let expected = lesson_index as u32 + 1;
                if item.sort != expected {
                    return Err(OutlineError::Corrupt(format!(
                        "lesson {} carries sort {} at position {}",
                        item.lesson_id, item.sort, expected
                    )));
                }
            }
        }
        Ok(())
    }
}
