//! # Move History
//!
//! Undo/redo for committed drops.
//!
//! ## Design
//!
//! - Every committed move arrives with its inverse, captured before the
//!   move was applied
//! - Undo applies the inverse and parks the entry on the redo stack
//! - Redo reapplies the forward move
//! - Recording a new move clears the redo stack
//! - The stack keeps at most `max_levels` entries (0 = unlimited)
//! - An entry whose row was deleted since is discarded on first use;
//!   stale moves are not retried

use crate::reconcile::{AppliedMove, MoveOp};
use syllabus_outline::{Outline, OutlineResult};

#[derive(Debug, Default)]
pub struct MoveHistory {
    undo_stack: Vec<AppliedMove>,
    redo_stack: Vec<AppliedMove>,
    max_levels: usize,
}

impl MoveHistory {
    /// History with the default depth of 100 moves.
    pub fn new() -> Self {
        MoveHistory::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        MoveHistory {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record a committed move. Clears the redo stack: after a fresh
    /// drop there is no future to return to.
    pub fn record(&mut self, applied: AppliedMove) {
        self.undo_stack.push(applied);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Take back the most recent move. Returns the move that was applied
    /// to the outline, or `None` when there is nothing to undo.
    pub fn undo(&mut self, outline: &mut Outline) -> OutlineResult<Option<MoveOp>> {
        let Some(applied) = self.undo_stack.pop() else {
            return Ok(None);
        };
        applied.inverse.apply(outline)?;
        self.redo_stack.push(applied);
        Ok(Some(applied.inverse))
    }

    /// Replay the most recently undone move.
    pub fn redo(&mut self, outline: &mut Outline) -> OutlineResult<Option<MoveOp>> {
        let Some(applied) = self.redo_stack.pop() else {
            return Ok(None);
        };
        applied.forward.apply(outline)?;
        self.undo_stack.push(applied);
        Ok(Some(applied.forward))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{commit, CommitOutcome};
    use crate::session::Gesture;
    use syllabus_outline::{Chapter, ChapterId, DragKey, Lesson, LessonId, LessonKind};

    fn sample() -> Outline {
        let mut outline = Outline::new();
        outline.insert_chapter(Chapter::new(ChapterId(1), "A")).unwrap();
        outline.insert_chapter(Chapter::new(ChapterId(2), "B")).unwrap();
        for (id, chapter) in [(10, 1), (11, 1), (20, 2)] {
            outline
                .insert_lesson(Lesson::new(
                    LessonId(id),
                    format!("L{id}"),
                    LessonKind::Video,
                    ChapterId(chapter),
                ))
                .unwrap();
        }
        outline
    }

    fn committed_move(outline: &mut Outline, active: DragKey, over: DragKey) -> AppliedMove {
        let gesture = Gesture {
            active,
            source_chapter: ChapterId(1),
            over: Some(over),
        };
        match commit(outline, &gesture).unwrap() {
            CommitOutcome::Committed { applied, .. } => applied,
            CommitOutcome::Unchanged => panic!("expected a committed move"),
        }
    }

    #[test]
    fn test_undo_then_redo_round_trips_the_order() {
        let mut outline = sample();
        let applied = committed_move(
            &mut outline,
            DragKey::Lesson(LessonId(10)),
            DragKey::Lesson(LessonId(20)),
        );

        let mut history = MoveHistory::new();
        history.record(applied);

        history.undo(&mut outline).unwrap().unwrap();
        assert_eq!(
            outline.lessons_in(ChapterId(1)).unwrap(),
            &[LessonId(10), LessonId(11)]
        );
        assert!(history.can_redo());

        history.redo(&mut outline).unwrap().unwrap();
        assert_eq!(
            outline.lessons_in(ChapterId(2)).unwrap(),
            &[LessonId(10), LessonId(20)]
        );
        outline.check_consistency().unwrap();
    }

    #[test]
    fn test_recording_clears_the_redo_stack() {
        let mut outline = sample();
        let first = committed_move(
            &mut outline,
            DragKey::Lesson(LessonId(10)),
            DragKey::Lesson(LessonId(11)),
        );
        let mut history = MoveHistory::new();
        history.record(first);
        history.undo(&mut outline).unwrap();
        assert_eq!(history.redo_levels(), 1);

        let second = committed_move(
            &mut outline,
            DragKey::Chapter(ChapterId(2)),
            DragKey::Chapter(ChapterId(1)),
        );
        history.record(second);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_are_a_quiet_no_op() {
        let mut outline = sample();
        let mut history = MoveHistory::new();
        assert!(history.undo(&mut outline).unwrap().is_none());
        assert!(history.redo(&mut outline).unwrap().is_none());
    }

    #[test]
    fn test_max_levels_drops_the_oldest_entry() {
        let mut outline = sample();
        let mut history = MoveHistory::with_max_levels(2);
        for over in [LessonId(11), LessonId(20), LessonId(11)] {
            let applied = committed_move(
                &mut outline,
                DragKey::Lesson(LessonId(10)),
                DragKey::Lesson(over),
            );
            history.record(applied);
        }
        assert_eq!(history.undo_levels(), 2);
    }

    #[test]
    fn test_stale_entries_error_and_are_discarded() {
        let mut outline = sample();
        let applied = committed_move(
            &mut outline,
            DragKey::Lesson(LessonId(10)),
            DragKey::Lesson(LessonId(20)),
        );
        let mut history = MoveHistory::new();
        history.record(applied);

        outline.remove_lesson(LessonId(10)).unwrap();
        assert!(history.undo(&mut outline).is_err());
        assert!(!history.can_undo());
        outline.check_consistency().unwrap();
    }
}
