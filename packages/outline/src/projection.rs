//! Flat projection of the outline for the drag layer.
//!
//! The drag layer works on rows of keys, not on the tree: one row of
//! chapter keys, and one row of lesson keys per chapter. [`FlatView`] is
//! that projection. It is derived, ephemeral and recomputed from the
//! outline after every mutation; it is never the source of truth and
//! rebuilding the tree from it is done only by tests.

use crate::id::ChapterId;
use crate::key::DragKey;
use crate::model::Outline;
use std::collections::HashMap;

/// Row-shaped view of an [`Outline`].
///
/// Total by construction: every chapter gets a row (hidden and empty ones
/// included) and every lesson appears exactly once, in its chapter's
/// display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatView {
    chapter_row: Vec<DragKey>,
    lessons_by_chapter: HashMap<ChapterId, Vec<DragKey>>,
}

impl FlatView {
    pub fn from_outline(outline: &Outline) -> Self {
        let chapter_row = outline
            .chapter_order()
            .iter()
            .map(|id| DragKey::Chapter(*id))
            .collect();
        let lessons_by_chapter = outline
            .chapter_order()
            .iter()
            .map(|id| {
                let row = outline
                    .lessons_in(*id)
                    .map(|lessons| lessons.iter().map(|l| DragKey::Lesson(*l)).collect())
                    .unwrap_or_default();
                (*id, row)
            })
            .collect();
        FlatView {
            chapter_row,
            lessons_by_chapter,
        }
    }

    /// Chapter keys in display order.
    pub fn chapter_row(&self) -> &[DragKey] {
        &self.chapter_row
    }

    /// Lesson keys of one chapter in display order. Empty chapters yield
    /// an empty row, unknown chapters yield `None`.
    pub fn lesson_row(&self, chapter: ChapterId) -> Option<&[DragKey]> {
        self.lessons_by_chapter.get(&chapter).map(|row| row.as_slice())
    }

    /// The chapter a key belongs to: a chapter key maps to itself, a
    /// lesson key to the chapter whose row contains it.
    pub fn chapter_of(&self, key: DragKey) -> Option<ChapterId> {
        match key {
            DragKey::Chapter(id) => self.lessons_by_chapter.contains_key(&id).then_some(id),
            DragKey::Lesson(_) => self
                .lessons_by_chapter
                .iter()
                .find(|(_, row)| row.contains(&key))
                .map(|(chapter, _)| *chapter),
        }
    }

    /// Position of a chapter key in the chapter row.
    pub fn chapter_index(&self, chapter: ChapterId) -> Option<usize> {
        let key = DragKey::Chapter(chapter);
        self.chapter_row.iter().position(|k| *k == key)
    }

    /// Containing chapter and in-row position of a lesson key.
    pub fn lesson_position(&self, key: DragKey) -> Option<(ChapterId, usize)> {
        if !key.is_lesson() {
            return None;
        }
        self.lessons_by_chapter.iter().find_map(|(chapter, row)| {
            row.iter().position(|k| *k == key).map(|index| (*chapter, index))
        })
    }

    /// True when the key resolves to a row in this view.
    pub fn contains(&self, key: DragKey) -> bool {
        match key {
            DragKey::Chapter(_) => self.chapter_row.contains(&key),
            DragKey::Lesson(_) => self.lesson_position(key).is_some(),
        }
    }

    /// Total number of lesson keys across all rows.
    pub fn lesson_count(&self) -> usize {
        self.lessons_by_chapter.values().map(|row| row.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::LessonId;
    use crate::model::{Chapter, Lesson, LessonKind};

    fn sample() -> Outline {
        let mut outline = Outline::new();
        outline.insert_chapter(Chapter::new(ChapterId(1), "One")).unwrap();
        outline.insert_chapter(Chapter::new(ChapterId(2), "Two")).unwrap();
        outline.insert_chapter(Chapter::new(ChapterId(3), "Empty")).unwrap();
        outline.set_hidden(ChapterId(2), true).unwrap();
        for (lesson, chapter) in [(10, 1), (11, 1), (20, 2)] {
            outline
                .insert_lesson(Lesson::new(
                    LessonId(lesson),
                    format!("L{lesson}"),
                    LessonKind::Video,
                    ChapterId(chapter),
                ))
                .unwrap();
        }
        outline
    }

    #[test]
    fn test_projects_every_chapter_in_order() {
        let view = FlatView::from_outline(&sample());
        assert_eq!(
            view.chapter_row(),
            &[
                DragKey::Chapter(ChapterId(1)),
                DragKey::Chapter(ChapterId(2)),
                DragKey::Chapter(ChapterId(3)),
            ]
        );
    }

    #[test]
    fn test_hidden_chapters_are_projected_like_any_other() {
        let view = FlatView::from_outline(&sample());
        assert_eq!(view.chapter_index(ChapterId(2)), Some(1));
        assert_eq!(
            view.lesson_row(ChapterId(2)).unwrap(),
            &[DragKey::Lesson(LessonId(20))]
        );
    }

    #[test]
    fn test_empty_chapters_project_to_an_empty_row() {
        let view = FlatView::from_outline(&sample());
        assert_eq!(view.lesson_row(ChapterId(3)).unwrap(), &[] as &[DragKey]);
        assert_eq!(view.lesson_row(ChapterId(99)), None);
    }

    #[test]
    fn test_chapter_of_resolves_both_key_kinds() {
        let view = FlatView::from_outline(&sample());
        assert_eq!(
            view.chapter_of(DragKey::Chapter(ChapterId(2))),
            Some(ChapterId(2))
        );
        assert_eq!(
            view.chapter_of(DragKey::Lesson(LessonId(11))),
            Some(ChapterId(1))
        );
        assert_eq!(view.chapter_of(DragKey::Lesson(LessonId(999))), None);
    }

    #[test]
    fn test_every_lesson_appears_exactly_once() {
        let outline = sample();
        let view = FlatView::from_outline(&outline);
        assert_eq!(view.lesson_count(), outline.lesson_count());
        for (lesson, chapter, index) in [(10, 1, 0), (11, 1, 1), (20, 2, 0)] {
            assert_eq!(
                view.lesson_position(DragKey::Lesson(LessonId(lesson))),
                Some((ChapterId(chapter), index))
            );
        }
    }

    #[test]
    fn test_rebuilding_orders_from_the_view_matches_the_outline() {
        let outline = sample();
        let view = FlatView::from_outline(&outline);
        // The projection carries enough ordering to reconstruct both
        // levels; non-order fields stay in the outline.
        let chapters: Vec<ChapterId> = view
            .chapter_row()
            .iter()
            .map(|key| match key {
                DragKey::Chapter(id) => *id,
                DragKey::Lesson(_) => unreachable!("chapter row holds chapter keys"),
            })
            .collect();
        assert_eq!(chapters, outline.chapter_order());
        for chapter in chapters {
            let lessons: Vec<LessonId> = view
                .lesson_row(chapter)
                .unwrap()
                .iter()
                .map(|key| match key {
                    DragKey::Lesson(id) => *id,
                    DragKey::Chapter(_) => unreachable!("lesson rows hold lesson keys"),
                })
                .collect();
            assert_eq!(lessons, outline.lessons_in(chapter).unwrap());
        }
    }
}
