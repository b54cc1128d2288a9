//! # Drag Session
//!
//! State machine for one pointer gesture over the outline rows.
//!
//! ```text
//!            begin(view, key)
//!   ┌──────┐ ───────────────► ┌──────────────────────────────┐
//!   │ Idle │                  │ Dragging { active,           │
//!   │      │ ◄─────────────── │   source_chapter, over }     │
//!   └──────┘ release/cancel   └──────────────────────────────┘
//!                                      │    ▲
//!                                      └────┘ hover(over)
//! ```
//!
//! The session only records what the pointer did; it never touches the
//! outline. Hovering rewrites the `over` slot, so cancelling is trivial:
//! drop the gesture and the tree is exactly what it was before the drag.
//! How a gesture turns into a move (or is rejected) is the reconciler's
//! business.

use syllabus_outline::{ChapterId, DragKey, FlatView};
use thiserror::Error;

/// Everything one gesture knows: what is held, where it came from, and
/// the row the pointer was last over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// The key being dragged.
    pub active: DragKey,

    /// Chapter the active key belonged to when the drag started. For a
    /// chapter key this is the chapter itself.
    pub source_chapter: ChapterId,

    /// Row the pointer is currently over, if any.
    pub over: Option<DragKey>,
}

/// One drag at a time; a second pointer-down is rejected, not queued.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    gesture: Option<Gesture>,
}

impl DragSession {
    pub fn new() -> Self {
        DragSession::default()
    }

    /// Start a gesture for `active`. Fails when a gesture is already in
    /// flight or when the key does not resolve to a row in the view.
    pub fn begin(&mut self, view: &FlatView, active: DragKey) -> Result<(), DragError> {
        if let Some(current) = &self.gesture {
            return Err(DragError::AlreadyDragging(current.active));
        }
        let source_chapter = view
            .chapter_of(active)
            .ok_or(DragError::UnknownKey(active))?;
        self.gesture = Some(Gesture {
            active,
            source_chapter,
            over: None,
        });
        Ok(())
    }

    /// Record the row currently under the pointer. A hover while idle is
    /// a silent no-op; stray move events arrive after every drop.
    pub fn hover(&mut self, over: DragKey) {
        if let Some(gesture) = &mut self.gesture {
            gesture.over = Some(over);
        }
    }

    /// End the gesture, yielding it for reconciliation.
    pub fn release(&mut self) -> Option<Gesture> {
        self.gesture.take()
    }

    /// Abandon the gesture. Nothing was mutated while dragging, so there
    /// is nothing to restore.
    pub fn cancel(&mut self) -> Option<Gesture> {
        self.gesture.take()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// The key being dragged, when a gesture is in flight.
    pub fn active(&self) -> Option<DragKey> {
        self.gesture.as_ref().map(|g| g.active)
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }
}

/// Gesture-level misuse. Neither variant leaves the session in a
/// different state than before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag is already in progress for {0}")]
    AlreadyDragging(DragKey),

    #[error("drag key does not resolve to a row: {0}")]
    UnknownKey(DragKey),
}
