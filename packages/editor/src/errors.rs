//! Editor-level error type, aggregating the failure modes of the key
//! boundary, the drag session, reconciliation and the outline itself.

use crate::reconcile::CommitError;
use crate::session::DragError;
use syllabus_outline::{KeyError, OutlineError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("bad drag key: {0}")]
    Key(#[from] KeyError),

    #[error("drag session error: {0}")]
    Drag(#[from] DragError),

    #[error("commit failed: {0}")]
    Commit(#[from] CommitError),

    #[error("outline error: {0}")]
    Outline(#[from] OutlineError),
}
