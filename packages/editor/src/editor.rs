//! # Outline Editor
//!
//! The facade the dashboard talks to. Owns the outline, a cached
//! projection of it, the drag session and the move history, and is the
//! only place raw key strings are decoded; everything below works on
//! typed keys.
//!
//! Pointer methods mirror the DOM events: `pointer_down` starts a
//! gesture, `pointer_over` tracks it, `release` commits it, `cancel`
//! abandons it. `release` hands back the sort payload for a drop that
//! changed the order, exactly once per such drop; the caller forwards it
//! to persistence. A malformed or unknown key aborts the gesture and
//! surfaces the error, leaving the outline untouched.

use crate::errors::EditError;
use crate::history::MoveHistory;
use crate::reconcile::{commit, resolve, CommitOutcome};
use crate::session::{DragError, DragSession};
use syllabus_outline::{
    Chapter, ChapterId, CourseDoc, CourseId, DragKey, FlatView, Lesson, LessonId, LessonKind,
    Outline, SortPayload,
};

pub struct OutlineEditor {
    course_id: CourseId,
    outline: Outline,
    view: FlatView,
    session: DragSession,
    history: MoveHistory,
    last_moved: Option<DragKey>,
}

impl OutlineEditor {
    pub fn new(course_id: CourseId, outline: Outline) -> Self {
        let view = FlatView::from_outline(&outline);
        OutlineEditor {
            course_id,
            outline,
            view,
            session: DragSession::new(),
            history: MoveHistory::new(),
            last_moved: None,
        }
    }

    /// Build an editor from a loaded course document.
    pub fn from_doc(doc: &CourseDoc) -> Result<Self, EditError> {
        let outline = doc.to_outline()?;
        Ok(OutlineEditor::new(doc.id, outline))
    }

    // ---- Pointer boundary ----

    /// Start a drag for the row named by a raw key string.
    ///
    /// A second pointer-down while a gesture is in flight is ignored;
    /// multi-touch must not hijack a drag that is already being rendered.
    pub fn pointer_down(&mut self, raw: &str) -> Result<(), EditError> {
        let key = self.decode(raw)?;
        match self.session.begin(&self.view, key) {
            Ok(()) => {
                tracing::debug!(active = %key, "drag started");
                Ok(())
            }
            Err(DragError::AlreadyDragging(current)) => {
                tracing::warn!(
                    active = %current,
                    attempted = %key,
                    "pointer down ignored; a drag is already in progress"
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Track the row under the pointer. No-op while idle.
    pub fn pointer_over(&mut self, raw: &str) -> Result<(), EditError> {
        let key = self.decode(raw)?;
        if !self.session.is_dragging() {
            return Ok(());
        }
        if !self.view.contains(key) {
            self.abort_gesture("hovered row is unknown");
            return Err(DragError::UnknownKey(key).into());
        }
        self.session.hover(key);
        Ok(())
    }

    /// Drop the dragged row. `Ok(Some(payload))` means the order changed
    /// and the payload should be persisted; `Ok(None)` means nothing
    /// changed. Errors reset the session and leave the outline as it was.
    pub fn release(&mut self) -> Result<Option<SortPayload>, EditError> {
        let Some(gesture) = self.session.release() else {
            return Ok(None);
        };
        match commit(&mut self.outline, &gesture) {
            Ok(CommitOutcome::Committed { payload, applied }) => {
                self.history.record(applied);
                self.last_moved = Some(applied.forward.key());
                self.refresh();
                Ok(Some(payload))
            }
            Ok(CommitOutcome::Unchanged) => Ok(None),
            Err(err) => {
                tracing::warn!(active = %gesture.active, error = %err, "drop rejected");
                Err(err.into())
            }
        }
    }

    /// Abandon the in-flight gesture, if any. The outline was never
    /// touched during the drag, so there is nothing to roll back.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.session.cancel() {
            tracing::debug!(active = %gesture.active, "drag cancelled");
        }
    }

    /// The projection with the in-flight gesture applied, for rendering
    /// the drag in progress. Pure: the outline itself is untouched until
    /// release. Hovers that cannot commit (cross-kind, vanished rows)
    /// preview as no change.
    pub fn preview(&self) -> FlatView {
        let Some(gesture) = self.session.gesture() else {
            return self.view.clone();
        };
        match resolve(&self.view, gesture) {
            Ok(Some(op)) => {
                let mut scratch = self.outline.clone();
                if op.apply(&mut scratch).is_err() {
                    return self.view.clone();
                }
                FlatView::from_outline(&scratch)
            }
            Ok(None) | Err(_) => self.view.clone(),
        }
    }

    // ---- Structure edits ----

    /// Append a chapter.
    pub fn add_chapter(&mut self, id: ChapterId, title: impl Into<String>) -> Result<(), EditError> {
        self.outline.insert_chapter(Chapter::new(id, title))?;
        tracing::debug!(chapter = %id, "chapter added");
        self.refresh();
        Ok(())
    }

    /// Append a lesson to a chapter.
    pub fn add_lesson(
        &mut self,
        id: LessonId,
        title: impl Into<String>,
        kind: LessonKind,
        chapter: ChapterId,
    ) -> Result<(), EditError> {
        self.outline.insert_lesson(Lesson::new(id, title, kind, chapter))?;
        tracing::debug!(lesson = %id, chapter = %chapter, "lesson added");
        self.refresh();
        Ok(())
    }

    pub fn rename_chapter(
        &mut self,
        id: ChapterId,
        title: impl Into<String>,
    ) -> Result<(), EditError> {
        self.outline.rename_chapter(id, title)?;
        self.refresh();
        Ok(())
    }

    pub fn rename_lesson(&mut self, id: LessonId, title: impl Into<String>) -> Result<(), EditError> {
        self.outline.rename_lesson(id, title)?;
        self.refresh();
        Ok(())
    }

    pub fn set_chapter_hidden(&mut self, id: ChapterId, hidden: bool) -> Result<(), EditError> {
        self.outline.set_hidden(id, hidden)?;
        self.refresh();
        Ok(())
    }

    /// Delete a chapter and its lessons.
    pub fn delete_chapter(&mut self, id: ChapterId) -> Result<(), EditError> {
        self.outline.remove_chapter(id)?;
        tracing::debug!(chapter = %id, "chapter deleted");
        self.refresh();
        Ok(())
    }

    pub fn delete_lesson(&mut self, id: LessonId) -> Result<(), EditError> {
        self.outline.remove_lesson(id)?;
        tracing::debug!(lesson = %id, "lesson deleted");
        self.refresh();
        Ok(())
    }

    /// Duplicate a lesson under a caller-allocated id.
    pub fn duplicate_lesson(&mut self, source: LessonId, new_id: LessonId) -> Result<(), EditError> {
        self.outline.duplicate_lesson(source, new_id)?;
        self.refresh();
        Ok(())
    }

    /// Duplicate a chapter and its lessons under caller-allocated ids.
    pub fn duplicate_chapter(
        &mut self,
        source: ChapterId,
        new_id: ChapterId,
        next_lesson_id: impl FnMut() -> LessonId,
    ) -> Result<(), EditError> {
        self.outline.duplicate_chapter(source, new_id, next_lesson_id)?;
        self.refresh();
        Ok(())
    }

    /// Programmatic lesson move, outside any drag gesture.
    pub fn move_lesson(
        &mut self,
        id: LessonId,
        chapter: ChapterId,
        index: usize,
    ) -> Result<(), EditError> {
        self.outline.move_lesson(id, chapter, index)?;
        self.refresh();
        Ok(())
    }

    // ---- History ----

    /// Take back the most recent committed move. Returns a fresh payload
    /// to persist when something was undone.
    pub fn undo(&mut self) -> Result<Option<SortPayload>, EditError> {
        self.cancel();
        let Some(op) = self.history.undo(&mut self.outline)? else {
            return Ok(None);
        };
        self.last_moved = Some(op.key());
        self.refresh();
        tracing::debug!(moved = %op.key(), "move undone");
        Ok(Some(SortPayload::from_outline(&self.outline)))
    }

    /// Replay the most recently undone move.
    pub fn redo(&mut self) -> Result<Option<SortPayload>, EditError> {
        self.cancel();
        let Some(op) = self.history.redo(&mut self.outline)? else {
            return Ok(None);
        };
        self.last_moved = Some(op.key());
        self.refresh();
        tracing::debug!(moved = %op.key(), "move redone");
        Ok(Some(SortPayload::from_outline(&self.outline)))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- State ----

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// The current projection, without any in-flight gesture.
    pub fn view(&self) -> &FlatView {
        &self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// The row moved by the most recent commit, undo or redo. The page
    /// layer uses it to decide what to scroll to or expand.
    pub fn last_moved(&self) -> Option<DragKey> {
        self.last_moved
    }

    /// Snapshot of the current order.
    pub fn payload(&self) -> SortPayload {
        SortPayload::from_outline(&self.outline)
    }

    /// Render the outline back into its document form.
    pub fn to_doc(&self, title: impl Into<String>) -> CourseDoc {
        CourseDoc::from_outline(self.course_id, title, &self.outline)
    }

    fn decode(&mut self, raw: &str) -> Result<DragKey, EditError> {
        match DragKey::decode(raw) {
            Ok(key) => Ok(key),
            Err(err) => {
                self.abort_gesture("malformed key at the pointer boundary");
                Err(err.into())
            }
        }
    }

    /// Recompute the cached projection; a gesture whose active row no
    /// longer exists is cancelled here, which is how deletes landing
    /// mid-drag are tolerated.
    fn refresh(&mut self) {
        self.view = FlatView::from_outline(&self.outline);
        if let Some(active) = self.session.active() {
            if !self.view.contains(active) {
                self.abort_gesture("active row was removed");
            }
        }
    }

    fn abort_gesture(&mut self, reason: &str) {
        if let Some(gesture) = self.session.cancel() {
            tracing::warn!(active = %gesture.active, reason, "gesture aborted");
        }
    }
}
