//! # Syllabus Sync
//!
//! Persistence for committed lesson orders. The editor hands a
//! [`SaveRequest`] over and goes back to handling pointer events; this
//! crate owns the sink call, the retry schedule and the save-state
//! indicator. Nothing in here ever mutates an outline.

mod saver;
mod sink;

pub use saver::{save_once, RetryPolicy, SaveStatus, Saver};
pub use sink::{JsonFileSink, MemorySink, SaveRequest, SinkError, SortSink};
