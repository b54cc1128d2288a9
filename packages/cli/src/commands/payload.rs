use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use syllabus_outline::{CourseDoc, SortPayload};

#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Course file to read (defaults to the configured outline file)
    pub file: Option<PathBuf>,
}

/// Print the sort payload as JSON, suitable for piping.
pub fn payload(args: PayloadArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = args.file.unwrap_or_else(|| config.outline_path(cwd));

    let doc = CourseDoc::load(&path)?;
    let outline = doc.to_outline()?;
    let payload = SortPayload::from_outline(&outline);

    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
