//! # Publish Scheduling
//!
//! Publication state for a lesson and the date/time picker that feeds it.
//!
//! The picker works the way the dashboard's calendar popover does: a
//! calendar day plus a 12-hour clock (hour, minute, AM/PM), composed into
//! a single UTC timestamp only when the selection is confirmed. Dropping
//! the picker without confirming leaves the form exactly as it was.
//!
//! A form keeps its `scheduled_at` when the status is switched away from
//! `scheduled`, so switching back restores the previous choice. The
//! timestamp is only ever submitted while the status is `scheduled`;
//! [`PublishForm::submission`] is the single place that rule lives.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Publication state of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishStatus {
    Draft,
    Published,
    Unlisted,
    Scheduled,
    EarlyAccess,
}

impl Default for PublishStatus {
    /// New lessons start as drafts.
    fn default() -> Self {
        PublishStatus::Draft
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
            PublishStatus::Unlisted => "unlisted",
            PublishStatus::Scheduled => "scheduled",
            PublishStatus::EarlyAccess => "early-access",
        };
        write!(f, "{name}")
    }
}

/// The status selector plus its remembered schedule timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishForm {
    status: PublishStatus,
    scheduled_at: Option<DateTime<Utc>>,
}

impl PublishForm {
    pub fn new() -> Self {
        PublishForm::default()
    }

    pub fn with_status(status: PublishStatus) -> Self {
        PublishForm {
            status,
            scheduled_at: None,
        }
    }

    pub fn status(&self) -> PublishStatus {
        self.status
    }

    /// The remembered timestamp, regardless of current status.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    /// Switch status. The remembered timestamp survives a switch away
    /// from `scheduled`; only [`PublishForm::submission`] decides whether
    /// it is actually used.
    pub fn set_status(&mut self, status: PublishStatus) {
        self.status = status;
    }

    pub fn set_scheduled_at(&mut self, at: DateTime<Utc>) {
        self.scheduled_at = Some(at);
    }

    /// The timestamp to submit: present only while the status is
    /// `scheduled` and a time was confirmed.
    pub fn submission(&self) -> Option<DateTime<Utc>> {
        match self.status {
            PublishStatus::Scheduled => self.scheduled_at,
            _ => None,
        }
    }
}

/// Half of the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// In-progress date/time selection. Nothing here touches a form until
/// [`SchedulePicker::confirm`]; dropping the picker discards it all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePicker {
    day: Option<NaiveDate>,
    hour: u32,
    minute: u32,
    meridiem: Meridiem,
}

impl Default for SchedulePicker {
    /// An empty picker pointing at noon.
    fn default() -> Self {
        SchedulePicker {
            day: None,
            hour: 12,
            minute: 0,
            meridiem: Meridiem::Pm,
        }
    }
}

impl SchedulePicker {
    pub fn new() -> Self {
        SchedulePicker::default()
    }

    /// Open the picker, seeding the parts from a previously confirmed
    /// timestamp when there is one.
    pub fn open(prior: Option<DateTime<Utc>>) -> Self {
        match prior {
            None => SchedulePicker::default(),
            Some(at) => {
                let (hour, meridiem) = match at.hour() {
                    0 => (12, Meridiem::Am),
                    h @ 1..=11 => (h, Meridiem::Am),
                    12 => (12, Meridiem::Pm),
                    h => (h - 12, Meridiem::Pm),
                };
                SchedulePicker {
                    day: Some(at.date_naive()),
                    hour,
                    minute: at.minute(),
                    meridiem,
                }
            }
        }
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.day = Some(day);
    }

    /// Pick an hour on the 12-hour clock.
    pub fn select_hour(&mut self, hour: u32) -> Result<(), PublishError> {
        if !(1..=12).contains(&hour) {
            return Err(PublishError::InvalidHour(hour));
        }
        self.hour = hour;
        Ok(())
    }

    pub fn select_minute(&mut self, minute: u32) -> Result<(), PublishError> {
        if minute > 59 {
            return Err(PublishError::InvalidMinute(minute));
        }
        self.minute = minute;
        Ok(())
    }

    pub fn select_meridiem(&mut self, meridiem: Meridiem) {
        self.meridiem = meridiem;
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Compose the selected parts into one UTC timestamp and commit it to
    /// the form, marking the form as scheduled. 12 AM is midnight and
    /// 12 PM is noon.
    pub fn confirm(&self, form: &mut PublishForm) -> Result<DateTime<Utc>, PublishError> {
        let at = self.compose()?;
        form.set_scheduled_at(at);
        form.set_status(PublishStatus::Scheduled);
        Ok(at)
    }

    /// Compose without touching any form.
    pub fn compose(&self) -> Result<DateTime<Utc>, PublishError> {
        let day = self.day.ok_or(PublishError::MissingDay)?;
        let hour24 = match (self.meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, hour) => hour,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, hour) => hour + 12,
        };
        let at = day
            .and_hms_opt(hour24, self.minute, 0)
            .ok_or(PublishError::InvalidHour(self.hour))?
            .and_utc();
        Ok(at)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    #[error("no day selected")]
    MissingDay,

    #[error("hour must be between 1 and 12, got {0}")]
    InvalidHour(u32),

    #[error("minute must be between 0 and 59, got {0}")]
    InvalidMinute(u32),
}
