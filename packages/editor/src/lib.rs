//! # Syllabus Editor
//!
//! Interaction engine for the course-builder screen: drag and drop over
//! the two-level outline, undo/redo of committed moves, and publish
//! scheduling.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI events: raw key strings, pointer moves   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: OutlineEditor facade                │
//! │  - Decode keys at the boundary              │
//! │  - DragSession: Idle ⇄ Dragging             │
//! │  - Reconcile drops into moves               │
//! │  - Optimistic outline update + history      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ outline: arena model → FlatView, payload    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The outline is source of truth**: projections and payloads are
//!    derived views, rebuilt after every mutation
//! 2. **Hovering never mutates**: a gesture only records state, so
//!    cancel is free and preview is pure
//! 3. **Commit is local and synchronous**: the tree is updated before
//!    persistence is even asked; a slow network never shows stale order
//! 4. **One payload per changed drop**: no-op drops are suppressed
//!    before they reach persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use syllabus_editor::OutlineEditor;
//! use syllabus_outline::CourseDoc;
//!
//! let doc = CourseDoc::load("course.json")?;
//! let mut editor = OutlineEditor::from_doc(&doc)?;
//!
//! // Pointer events arrive as raw key strings.
//! editor.pointer_down("lesson-10")?;
//! editor.pointer_over("chapter-2")?;
//!
//! // A committed drop yields the payload to persist.
//! if let Some(payload) = editor.release()? {
//!     send_to_api(editor.course_id(), payload);
//! }
//! ```

mod editor;
mod errors;
mod history;
mod publish;
mod reconcile;
mod session;

pub use editor::OutlineEditor;
pub use errors::EditError;
pub use history::MoveHistory;
pub use publish::{Meridiem, PublishError, PublishForm, PublishStatus, SchedulePicker};
pub use reconcile::{commit, resolve, AppliedMove, CommitError, CommitOutcome, MoveOp};
pub use session::{DragError, DragSession, Gesture};

// Re-export the domain types callers inevitably need alongside the editor.
pub use syllabus_outline::{DragKey, FlatView, SortPayload};
