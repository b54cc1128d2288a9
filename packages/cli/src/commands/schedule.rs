use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use syllabus_editor::{Meridiem, PublishForm, SchedulePicker};

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Publish date, e.g. 2026-03-05
    #[arg(long)]
    pub date: NaiveDate,

    /// Hour on the 12-hour clock (1-12)
    #[arg(long)]
    pub hour: u32,

    /// Minute (0-59)
    #[arg(long, default_value = "0")]
    pub minute: u32,

    /// Morning
    #[arg(long, conflicts_with = "pm")]
    pub am: bool,

    /// Afternoon and evening
    #[arg(long)]
    pub pm: bool,
}

pub fn schedule(args: ScheduleArgs) -> Result<()> {
    let meridiem = match (args.am, args.pm) {
        (true, false) => Meridiem::Am,
        (false, true) => Meridiem::Pm,
        _ => return Err(anyhow!("pass exactly one of --am or --pm")),
    };

    let mut picker = SchedulePicker::open(None);
    picker.select_day(args.date);
    picker.select_hour(args.hour)?;
    picker.select_minute(args.minute)?;
    picker.select_meridiem(meridiem);

    let mut form = PublishForm::new();
    let at = picker.confirm(&mut form)?;

    println!(
        "{} Scheduled for {}",
        "✓".green(),
        at.to_rfc3339().bold()
    );
    println!("  status: {}", form.status());

    Ok(())
}
