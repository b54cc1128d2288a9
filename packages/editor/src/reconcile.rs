//! # Drop Reconciliation
//!
//! Turns a finished gesture into a concrete move, or into nothing.
//!
//! Resolution happens against a fresh projection of the outline, so rows
//! created or deleted while the pointer was down are already accounted
//! for. The hovered row's position is read before anything is removed;
//! the move itself is remove-then-reinsert, which lands the dragged row
//! exactly where the pointer showed it during the drag.
//!
//! Drops that would not change the order are detected before any
//! mutation and reported as [`CommitOutcome::Unchanged`]; they produce
//! no payload and must not reach persistence.

use crate::session::Gesture;
use syllabus_outline::{
    ChapterId, DragKey, FlatView, LessonId, Outline, OutlineError, OutlineResult, SortPayload,
};
use thiserror::Error;

/// A concrete reorder, expressed as the post-removal insertion slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOp {
    Chapter { id: ChapterId, index: usize },
    Lesson { id: LessonId, chapter: ChapterId, index: usize },
}

impl MoveOp {
    /// Apply the move to the outline.
    pub fn apply(&self, outline: &mut Outline) -> OutlineResult<()> {
        match *self {
            MoveOp::Chapter { id, index } => outline.move_chapter(id, index),
            MoveOp::Lesson { id, chapter, index } => outline.move_lesson(id, chapter, index),
        }
    }

    /// The move that puts the row back where it currently is. Captured
    /// before [`MoveOp::apply`] so undo can replay it later.
    pub fn inverse_in(&self, outline: &Outline) -> Option<MoveOp> {
        match *self {
            MoveOp::Chapter { id, .. } => {
                let index = outline.position_of_chapter(id)?;
                Some(MoveOp::Chapter { id, index })
            }
            MoveOp::Lesson { id, .. } => {
                let (chapter, index) = outline.position_of_lesson(id)?;
                Some(MoveOp::Lesson { id, chapter, index })
            }
        }
    }

    /// Drag key of the moved row.
    pub fn key(&self) -> DragKey {
        match *self {
            MoveOp::Chapter { id, .. } => DragKey::Chapter(id),
            MoveOp::Lesson { id, .. } => DragKey::Lesson(id),
        }
    }
}

/// A committed move together with its inverse, ready for the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub forward: MoveOp,
    pub inverse: MoveOp,
}

/// What a finished gesture did to the outline.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The order changed: here is the snapshot to persist and the move
    /// that was applied.
    Committed {
        payload: SortPayload,
        applied: AppliedMove,
    },
    /// Target-less or same-slot drop. Nothing happened, nothing to save.
    Unchanged,
}

#[derive(Error, Debug)]
pub enum CommitError {
    /// Chapters can only be reordered against other chapters. A lesson
    /// dropped on a chapter header is legal (append); this is the other
    /// direction.
    #[error("cannot drop {active} onto {over}: chapters reorder only against chapters")]
    CrossKind { active: DragKey, over: DragKey },

    /// A row referenced by the gesture was deleted while the pointer was
    /// down. The drop is abandoned; the outline stays as it is.
    #[error("row vanished mid-gesture: {0}")]
    Stale(DragKey),

    #[error(transparent)]
    Outline(#[from] OutlineError),
}

/// Resolve a gesture against a projection without touching the outline.
///
/// `Ok(None)` means the drop changes nothing: there was no hovered row,
/// or the resolved slot equals the active row's current slot.
pub fn resolve(view: &FlatView, gesture: &Gesture) -> Result<Option<MoveOp>, CommitError> {
    let Some(over) = gesture.over else {
        return Ok(None);
    };

    match gesture.active {
        DragKey::Chapter(active_id) => {
            let DragKey::Chapter(over_id) = over else {
                return Err(CommitError::CrossKind {
                    active: gesture.active,
                    over,
                });
            };
            let current = view
                .chapter_index(active_id)
                .ok_or(CommitError::Stale(gesture.active))?;
            let index = view
                .chapter_index(over_id)
                .ok_or(CommitError::Stale(over))?;
            if index == current {
                return Ok(None);
            }
            Ok(Some(MoveOp::Chapter {
                id: active_id,
                index,
            }))
        }
        DragKey::Lesson(active_id) => {
            let (current_chapter, current_index) = view
                .lesson_position(gesture.active)
                .ok_or(CommitError::Stale(gesture.active))?;

            // Hovering a lesson targets that lesson's slot; hovering a
            // chapter header targets the end of that chapter's row.
            let (chapter, hovered_index) = match over {
                DragKey::Lesson(_) => view
                    .lesson_position(over)
                    .ok_or(CommitError::Stale(over))?,
                DragKey::Chapter(chapter_id) => {
                    let row = view
                        .lesson_row(chapter_id)
                        .ok_or(CommitError::Stale(over))?;
                    (chapter_id, row.len())
                }
            };

            if chapter == current_chapter {
                // Within one row the insertion happens after the active
                // lesson is removed, so the last valid slot is len - 1.
                let last = view
                    .lesson_row(chapter)
                    .map(|row| row.len().saturating_sub(1))
                    .unwrap_or(0);
                let index = hovered_index.min(last);
                if index == current_index {
                    return Ok(None);
                }
                Ok(Some(MoveOp::Lesson {
                    id: active_id,
                    chapter,
                    index,
                }))
            } else {
                Ok(Some(MoveOp::Lesson {
                    id: active_id,
                    chapter,
                    index: hovered_index,
                }))
            }
        }
    }
}

/// Resolve and apply a gesture, snapshotting the new order on change.
///
/// Resolution runs against a projection taken here, not against whatever
/// the caller rendered last; deletions that landed mid-drag surface as
/// [`CommitError::Stale`] instead of corrupting the order.
pub fn commit(outline: &mut Outline, gesture: &Gesture) -> Result<CommitOutcome, CommitError> {
    let view = FlatView::from_outline(outline);
    let Some(op) = resolve(&view, gesture)? else {
        tracing::debug!(active = %gesture.active, "drop left the order unchanged");
        return Ok(CommitOutcome::Unchanged);
    };

    let inverse = op
        .inverse_in(outline)
        .ok_or(CommitError::Stale(gesture.active))?;
    op.apply(outline)?;

    let payload = SortPayload::from_outline(outline);
    tracing::debug!(moved = %op.key(), "committed drop");
    Ok(CommitOutcome::Committed {
        payload,
        applied: AppliedMove {
            forward: op,
            inverse,
        },
    })
}
