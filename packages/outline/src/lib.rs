//! # Syllabus Outline
//!
//! Domain model for two-level course outlines: typed ids, the drag key
//! codec, the arena-style [`Outline`] with its order sequences, the flat
//! [`FlatView`] projection consumed by the drag layer, the [`SortPayload`]
//! wire snapshot, and the on-disk [`CourseDoc`] format.
//!
//! This crate is pure data and synchronous logic; nothing here logs,
//! blocks or talks to the network.

pub mod doc;
pub mod error;
pub mod id;
pub mod key;
pub mod model;
pub mod payload;
pub mod projection;

pub use doc::{ChapterDoc, CourseDoc, LessonDoc};
pub use error::{OutlineError, OutlineResult};
pub use id::{ChapterId, CourseId, LessonId};
pub use key::{DragKey, KeyError};
pub use model::{Chapter, Lesson, LessonKind, Outline};
pub use payload::{ChapterSort, LessonSort, SortPayload};
pub use projection::FlatView;
