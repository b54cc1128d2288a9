//! On-disk course document.
//!
//! The nested JSON form the dashboard trades in: a course holding ordered
//! chapters, each holding ordered lessons. Loading validates id uniqueness
//! while building the arena; saving rebuilds the nested form from the
//! arena in display order. Older exports spell the lesson sequence
//! `contents`; that name is accepted on load and never written back.

use crate::error::OutlineResult;
use crate::id::{ChapterId, CourseId, LessonId};
use crate::model::{Chapter, Lesson, LessonKind, Outline};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDoc {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<ChapterDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterDoc {
    pub id: ChapterId,
    pub title: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, alias = "contents")]
    pub lessons: Vec<LessonDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDoc {
    pub id: LessonId,
    pub title: String,
    pub kind: LessonKind,
}

impl CourseDoc {
    pub fn load(path: impl AsRef<Path>) -> OutlineResult<Self> {
        let raw = fs::read_to_string(path)?;
        let doc = serde_json::from_str(&raw)?;
        Ok(doc)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> OutlineResult<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Build the arena outline from the nested form. Duplicate chapter or
    /// lesson ids in the document surface as insertion errors.
    pub fn to_outline(&self) -> OutlineResult<Outline> {
        let mut outline = Outline::new();
        for chapter in &self.chapters {
            outline.insert_chapter(Chapter {
                id: chapter.id,
                title: chapter.title.clone(),
                hidden: chapter.hidden,
            })?;
            for lesson in &chapter.lessons {
                outline.insert_lesson(Lesson {
                    id: lesson.id,
                    title: lesson.title.clone(),
                    kind: lesson.kind,
                    chapter_id: chapter.id,
                })?;
            }
        }
        Ok(outline)
    }

    /// Rebuild the nested form from an outline, in display order.
    pub fn from_outline(id: CourseId, title: impl Into<String>, outline: &Outline) -> Self {
        let chapters = outline
            .chapters()
            .map(|chapter| {
                let lessons = outline
                    .lessons_in(chapter.id)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|lesson_id| outline.lesson(*lesson_id))
                    .map(|lesson| LessonDoc {
                        id: lesson.id,
                        title: lesson.title.clone(),
                        kind: lesson.kind,
                    })
                    .collect();
                ChapterDoc {
                    id: chapter.id,
                    title: chapter.title.clone(),
                    hidden: chapter.hidden,
                    lessons,
                }
            })
            .collect();
        CourseDoc {
            id,
            title: title.into(),
            chapters,
        }
    }
}
