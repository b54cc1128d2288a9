pub mod init;
pub mod payload;
pub mod reorder;
pub mod schedule;
pub mod show;

pub use init::{init, InitArgs};
pub use payload::{payload, PayloadArgs};
pub use reorder::{reorder, ReorderArgs};
pub use schedule::{schedule, ScheduleArgs};
pub use show::{show, ShowArgs};
