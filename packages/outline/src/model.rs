//! Arena-style course outline.
//!
//! Chapters and lessons live in flat id-keyed maps; display order is held
//! separately as plain id sequences (`chapter_order`, and one lesson row
//! per chapter). A move is a couple of order splices plus, for
//! cross-chapter lesson moves, a `chapter_id` rewrite on the moved lesson.
//! Because entity storage never moves, reordering cannot lose or duplicate
//! entities; [`Outline::check_consistency`] verifies the invariants that
//! tie the maps and the order sequences together.

use crate::error::{OutlineError, OutlineResult};
use crate::id::{ChapterId, LessonId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Title suffix applied to duplicated chapters and lessons.
const COPY_SUFFIX: &str = " (copy)";

/// A chapter row. Hidden chapters stay fully draggable and keep their
/// position in the order; visibility is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    #[serde(default)]
    pub hidden: bool,
}

impl Chapter {
    pub fn new(id: ChapterId, title: impl Into<String>) -> Self {
        Chapter {
            id,
            title: title.into(),
            hidden: false,
        }
    }
}

/// A lesson row. `chapter_id` always names the chapter whose order row
/// contains this lesson; cross-chapter moves rewrite it atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub kind: LessonKind,
    pub chapter_id: ChapterId,
}

impl Lesson {
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        kind: LessonKind,
        chapter_id: ChapterId,
    ) -> Self {
        Lesson {
            id,
            title: title.into(),
            kind,
            chapter_id,
        }
    }
}

/// The closed set of lesson content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Video,
    Pdf,
    Audio,
    Text,
    Quiz,
    Assignment,
    Survey,
    Meeting,
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LessonKind::Video => "video",
            LessonKind::Pdf => "pdf",
            LessonKind::Audio => "audio",
            LessonKind::Text => "text",
            LessonKind::Quiz => "quiz",
            LessonKind::Assignment => "assignment",
            LessonKind::Survey => "survey",
            LessonKind::Meeting => "meeting",
        };
        write!(f, "{name}")
    }
}

/// The two-level course outline: entity arenas plus order sequences.
///
/// Every chapter has a lesson row in `lesson_order`, empty rows included,
/// so an empty chapter is still a valid drop destination.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    chapters: HashMap<ChapterId, Chapter>,
    lessons: HashMap<LessonId, Lesson>,
    chapter_order: Vec<ChapterId>,
    lesson_order: HashMap<ChapterId, Vec<LessonId>>,
}

impl Outline {
    pub fn new() -> Self {
        Outline::default()
    }

    // ---- Insertion ----

    /// Append a chapter to the end of the course.
    pub fn insert_chapter(&mut self, chapter: Chapter) -> OutlineResult<()> {
        let at = self.chapter_order.len();
        self.insert_chapter_at(chapter, at)
    }

    /// Insert a chapter at `index` (clamped to the current chapter count).
    pub fn insert_chapter_at(&mut self, chapter: Chapter, index: usize) -> OutlineResult<()> {
        if self.chapters.contains_key(&chapter.id) {
            return Err(OutlineError::DuplicateChapter(chapter.id));
        }
        let at = index.min(self.chapter_order.len());
        self.chapter_order.insert(at, chapter.id);
        self.lesson_order.insert(chapter.id, Vec::new());
        self.chapters.insert(chapter.id, chapter);
        Ok(())
    }

    /// Append a lesson to the end of its chapter's row.
    pub fn insert_lesson(&mut self, lesson: Lesson) -> OutlineResult<()> {
        let at = self.row(lesson.chapter_id)?.len();
        self.insert_lesson_at(lesson, at)
    }

    /// Insert a lesson at `index` within its chapter's row (clamped).
    pub fn insert_lesson_at(&mut self, lesson: Lesson, index: usize) -> OutlineResult<()> {
        if self.lessons.contains_key(&lesson.id) {
            return Err(OutlineError::DuplicateLesson(lesson.id));
        }
        let row = self
            .lesson_order
            .get_mut(&lesson.chapter_id)
            .ok_or(OutlineError::UnknownChapter(lesson.chapter_id))?;
        let at = index.min(row.len());
        row.insert(at, lesson.id);
        self.lessons.insert(lesson.id, lesson);
        Ok(())
    }

    // ---- Removal ----

    /// Remove a chapter and all of its lessons.
    pub fn remove_chapter(&mut self, id: ChapterId) -> OutlineResult<Chapter> {
        let chapter = self
            .chapters
            .remove(&id)
            .ok_or(OutlineError::UnknownChapter(id))?;
        let row = self.lesson_order.remove(&id).unwrap_or_default();
        for lesson_id in row {
            self.lessons.remove(&lesson_id);
        }
        self.chapter_order.retain(|c| *c != id);
        Ok(chapter)
    }

    /// Remove a single lesson.
    pub fn remove_lesson(&mut self, id: LessonId) -> OutlineResult<Lesson> {
        let lesson = self
            .lessons
            .remove(&id)
            .ok_or(OutlineError::UnknownLesson(id))?;
        if let Some(row) = self.lesson_order.get_mut(&lesson.chapter_id) {
            row.retain(|l| *l != id);
        }
        Ok(lesson)
    }

    // ---- Field edits ----

    pub fn rename_chapter(&mut self, id: ChapterId, title: impl Into<String>) -> OutlineResult<()> {
        let chapter = self
            .chapters
            .get_mut(&id)
            .ok_or(OutlineError::UnknownChapter(id))?;
        chapter.title = title.into();
        Ok(())
    }

    pub fn rename_lesson(&mut self, id: LessonId, title: impl Into<String>) -> OutlineResult<()> {
        let lesson = self
            .lessons
            .get_mut(&id)
            .ok_or(OutlineError::UnknownLesson(id))?;
        lesson.title = title.into();
        Ok(())
    }

    pub fn set_hidden(&mut self, id: ChapterId, hidden: bool) -> OutlineResult<()> {
        let chapter = self
            .chapters
            .get_mut(&id)
            .ok_or(OutlineError::UnknownChapter(id))?;
        chapter.hidden = hidden;
        Ok(())
    }

    // ---- Duplication ----

    /// Clone a lesson under a fresh id, inserted right after the source.
    /// Ids come from the caller; the platform allocates them server-side.
    pub fn duplicate_lesson(&mut self, source: LessonId, new_id: LessonId) -> OutlineResult<()> {
        let original = self
            .lessons
            .get(&source)
            .ok_or(OutlineError::UnknownLesson(source))?;
        let mut copy = original.clone();
        copy.id = new_id;
        copy.title.push_str(COPY_SUFFIX);
        let after = self
            .position_of_lesson(source)
            .map(|(_, index)| index + 1)
            .unwrap_or(0);
        self.insert_lesson_at(copy, after)
    }

    /// Clone a chapter and its lessons under fresh ids, inserted right
    /// after the source chapter. `next_lesson_id` is called once per
    /// cloned lesson.
    pub fn duplicate_chapter(
        &mut self,
        source: ChapterId,
        new_id: ChapterId,
        mut next_lesson_id: impl FnMut() -> LessonId,
    ) -> OutlineResult<()> {
        let original = self
            .chapters
            .get(&source)
            .ok_or(OutlineError::UnknownChapter(source))?;
        let mut copy = original.clone();
        copy.id = new_id;
        copy.title.push_str(COPY_SUFFIX);

        let source_row = self.row(source)?.to_vec();
        let after = self
            .position_of_chapter(source)
            .map(|index| index + 1)
            .unwrap_or(0);
        self.insert_chapter_at(copy, after)?;

        for lesson_id in source_row {
            // Row ids were just read from the arena; the lookup cannot miss.
            let original = self
                .lessons
                .get(&lesson_id)
                .ok_or(OutlineError::UnknownLesson(lesson_id))?;
            let mut lesson = original.clone();
            lesson.id = next_lesson_id();
            lesson.chapter_id = new_id;
            lesson.title.push_str(COPY_SUFFIX);
            self.insert_lesson(lesson)?;
        }
        Ok(())
    }

    // ---- Moves ----

    /// Reorder a chapter to `index` in the chapter sequence. The index is
    /// interpreted after the chapter is removed from its old slot and
    /// clamped to the remaining length. Lesson membership is untouched.
    pub fn move_chapter(&mut self, id: ChapterId, index: usize) -> OutlineResult<()> {
        if !self.chapters.contains_key(&id) {
            return Err(OutlineError::UnknownChapter(id));
        }
        self.chapter_order.retain(|c| *c != id);
        let at = index.min(self.chapter_order.len());
        self.chapter_order.insert(at, id);
        Ok(())
    }

    /// Move a lesson to `index` within `dest`'s row, removing it from its
    /// current row first. Cross-chapter moves rewrite the lesson's
    /// `chapter_id` in the same step.
    pub fn move_lesson(
        &mut self,
        id: LessonId,
        dest: ChapterId,
        index: usize,
    ) -> OutlineResult<()> {
        let source = self
            .lessons
            .get(&id)
            .map(|l| l.chapter_id)
            .ok_or(OutlineError::UnknownLesson(id))?;
        if !self.lesson_order.contains_key(&dest) {
            return Err(OutlineError::UnknownChapter(dest));
        }

        if let Some(row) = self.lesson_order.get_mut(&source) {
            row.retain(|l| *l != id);
        }
        let row = self
            .lesson_order
            .get_mut(&dest)
            .ok_or(OutlineError::UnknownChapter(dest))?;
        let at = index.min(row.len());
        row.insert(at, id);

        if let Some(lesson) = self.lessons.get_mut(&id) {
            lesson.chapter_id = dest;
        }
        Ok(())
    }

    // ---- Queries ----

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.get(&id)
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.get(&id)
    }

    pub fn contains_chapter(&self, id: ChapterId) -> bool {
        self.chapters.contains_key(&id)
    }

    pub fn contains_lesson(&self, id: LessonId) -> bool {
        self.lessons.contains_key(&id)
    }

    /// Chapter ids in display order.
    pub fn chapter_order(&self) -> &[ChapterId] {
        &self.chapter_order
    }

    /// Lesson ids of one chapter, in display order.
    pub fn lessons_in(&self, chapter: ChapterId) -> OutlineResult<&[LessonId]> {
        self.row(chapter).map(|row| row.as_slice())
    }

    /// Chapters in display order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> + '_ {
        self.chapter_order
            .iter()
            .filter_map(move |id| self.chapters.get(id))
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Position of a chapter in the chapter sequence.
    pub fn position_of_chapter(&self, id: ChapterId) -> Option<usize> {
        self.chapter_order.iter().position(|c| *c == id)
    }

    /// Containing chapter and in-row position of a lesson.
    pub fn position_of_lesson(&self, id: LessonId) -> Option<(ChapterId, usize)> {
        let chapter = self.lessons.get(&id)?.chapter_id;
        let index = self.lesson_order.get(&chapter)?.iter().position(|l| *l == id)?;
        Some((chapter, index))
    }

    fn row(&self, chapter: ChapterId) -> OutlineResult<&Vec<LessonId>> {
        self.lesson_order
            .get(&chapter)
            .ok_or(OutlineError::UnknownChapter(chapter))
    }

    // ---- Integrity ----

    /// Verify the invariants between the arenas and the order sequences:
    /// every ordered id resolves, no id is ordered twice, every lesson's
    /// `chapter_id` matches the row holding it, and the order sequences
    /// cover exactly the ids in the arenas.
    pub fn check_consistency(&self) -> OutlineResult<()> {
        let mut seen_chapters = HashSet::new();
        for id in &self.chapter_order {
            if !self.chapters.contains_key(id) {
                return Err(OutlineError::Corrupt(format!(
                    "ordered chapter {id} has no entry"
                )));
            }
            if !seen_chapters.insert(*id) {
                return Err(OutlineError::Corrupt(format!(
                    "chapter {id} ordered twice"
                )));
            }
        }
        if seen_chapters.len() != self.chapters.len() {
            return Err(OutlineError::Corrupt(
                "chapter arena and chapter order diverged in size".to_string(),
            ));
        }
        if self.lesson_order.len() != self.chapters.len() {
            return Err(OutlineError::Corrupt(
                "every chapter must own exactly one lesson row".to_string(),
            ));
        }

        let mut seen_lessons = HashSet::new();
        for (chapter_id, row) in &self.lesson_order {
            if !self.chapters.contains_key(chapter_id) {
                return Err(OutlineError::Corrupt(format!(
                    "lesson row for unknown chapter {chapter_id}"
                )));
            }
            for lesson_id in row {
                let lesson = self.lessons.get(lesson_id).ok_or_else(|| {
                    OutlineError::Corrupt(format!("ordered lesson {lesson_id} has no entry"))
                })?;
                if lesson.chapter_id != *chapter_id {
                    return Err(OutlineError::Corrupt(format!(
                        "lesson {lesson_id} sits in chapter {chapter_id} but claims {}",
                        lesson.chapter_id
                    )));
                }
                if !seen_lessons.insert(*lesson_id) {
                    return Err(OutlineError::Corrupt(format!(
                        "lesson {lesson_id} ordered twice"
                    )));
                }
            }
        }
        if seen_lessons.len() != self.lessons.len() {
            return Err(OutlineError::Corrupt(
                "lesson arena and lesson rows diverged in size".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Outline {
        let mut outline = Outline::new();
        outline.insert_chapter(Chapter::new(ChapterId(1), "Basics")).unwrap();
        outline.insert_chapter(Chapter::new(ChapterId(2), "Advanced")).unwrap();
        outline
            .insert_lesson(Lesson::new(LessonId(10), "Intro", LessonKind::Video, ChapterId(1)))
            .unwrap();
        outline
            .insert_lesson(Lesson::new(LessonId(11), "Syllabus", LessonKind::Pdf, ChapterId(1)))
            .unwrap();
        outline
            .insert_lesson(Lesson::new(LessonId(20), "Deep dive", LessonKind::Video, ChapterId(2)))
            .unwrap();
        outline
    }

    #[test]
    fn test_inserts_preserve_order_and_consistency() {
        let outline = sample();
        assert_eq!(outline.chapter_order(), &[ChapterId(1), ChapterId(2)]);
        assert_eq!(
            outline.lessons_in(ChapterId(1)).unwrap(),
            &[LessonId(10), LessonId(11)]
        );
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut outline = sample();
        assert!(matches!(
            outline.insert_chapter(Chapter::new(ChapterId(1), "Again")),
            Err(OutlineError::DuplicateChapter(_))
        ));
        assert!(matches!(
            outline.insert_lesson(Lesson::new(
                LessonId(10),
                "Again",
                LessonKind::Text,
                ChapterId(2)
            )),
            Err(OutlineError::DuplicateLesson(_))
        ));
    }

    #[test]
    fn test_removing_a_chapter_cascades_to_its_lessons() {
        let mut outline = sample();
        outline.remove_chapter(ChapterId(1)).unwrap();
        assert!(!outline.contains_lesson(LessonId(10)));
        assert!(!outline.contains_lesson(LessonId(11)));
        assert!(outline.contains_lesson(LessonId(20)));
        assert_eq!(outline.chapter_order(), &[ChapterId(2)]);
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_move_lesson_across_chapters_rewrites_ownership() {
        let mut outline = sample();
        outline.move_lesson(LessonId(10), ChapterId(2), 0).unwrap();
        assert_eq!(outline.lesson(LessonId(10)).unwrap().chapter_id, ChapterId(2));
        assert_eq!(outline.lessons_in(ChapterId(1)).unwrap(), &[LessonId(11)]);
        assert_eq!(
            outline.lessons_in(ChapterId(2)).unwrap(),
            &[LessonId(10), LessonId(20)]
        );
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_move_indices_clamp_to_row_length() {
        let mut outline = sample();
        outline.move_lesson(LessonId(10), ChapterId(2), 99).unwrap();
        assert_eq!(
            outline.lessons_in(ChapterId(2)).unwrap(),
            &[LessonId(20), LessonId(10)]
        );
        outline.move_chapter(ChapterId(1), 99).unwrap();
        assert_eq!(outline.chapter_order(), &[ChapterId(2), ChapterId(1)]);
    }

    #[test]
    fn test_chapter_moves_leave_lesson_membership_alone() {
        let mut outline = sample();
        outline.move_chapter(ChapterId(2), 0).unwrap();
        assert_eq!(outline.chapter_order(), &[ChapterId(2), ChapterId(1)]);
        assert_eq!(
            outline.lessons_in(ChapterId(1)).unwrap(),
            &[LessonId(10), LessonId(11)]
        );
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_duplicate_lesson_lands_after_the_source() {
        let mut outline = sample();
        outline.duplicate_lesson(LessonId(10), LessonId(99)).unwrap();
        assert_eq!(
            outline.lessons_in(ChapterId(1)).unwrap(),
            &[LessonId(10), LessonId(99), LessonId(11)]
        );
        let copy = outline.lesson(LessonId(99)).unwrap();
        assert_eq!(copy.title, "Intro (copy)");
        assert_eq!(copy.kind, LessonKind::Video);
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_duplicate_chapter_clones_lessons_under_fresh_ids() {
        let mut outline = sample();
        let mut next = 100u64;
        outline
            .duplicate_chapter(ChapterId(1), ChapterId(9), || {
                next += 1;
                LessonId(next)
            })
            .unwrap();
        assert_eq!(
            outline.chapter_order(),
            &[ChapterId(1), ChapterId(9), ChapterId(2)]
        );
        assert_eq!(
            outline.lessons_in(ChapterId(9)).unwrap(),
            &[LessonId(101), LessonId(102)]
        );
        assert_eq!(outline.chapter(ChapterId(9)).unwrap().title, "Basics (copy)");
        assert_eq!(outline.lesson(LessonId(101)).unwrap().title, "Intro (copy)");
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_empty_chapters_keep_an_empty_row() {
        let mut outline = Outline::new();
        outline.insert_chapter(Chapter::new(ChapterId(5), "Empty")).unwrap();
        assert_eq!(outline.lessons_in(ChapterId(5)).unwrap(), &[] as &[LessonId]);
        outline.check_consistency().unwrap();
    }
}
