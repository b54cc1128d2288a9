use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use syllabus_editor::OutlineEditor;
use syllabus_outline::CourseDoc;
use syllabus_sync::{save_once, JsonFileSink, SaveRequest};

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Course file to modify (defaults to the configured outline file)
    pub file: Option<PathBuf>,

    /// Drag key to pick up, e.g. "lesson-12" or "chapter-3"
    #[arg(short, long)]
    pub grab: String,

    /// Drag key of the row to drop onto
    #[arg(short, long)]
    pub over: String,

    /// Write the save envelope to this file (overrides config)
    #[arg(short, long)]
    pub emit: Option<PathBuf>,
}

pub async fn reorder(args: ReorderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = args.file.unwrap_or_else(|| config.outline_path(cwd));

    let doc = CourseDoc::load(&path)?;
    let mut editor = OutlineEditor::from_doc(&doc)?;

    println!(
        "{}",
        format!("🔀 Moving {} over {}...", args.grab, args.over)
            .bright_blue()
            .bold()
    );

    // The exact runtime path: decode, begin, hover, release
    editor.pointer_down(&args.grab)?;
    editor.pointer_over(&args.over)?;
    let Some(payload) = editor.release()? else {
        println!("  {} Order unchanged, nothing to save", "⚠️".yellow());
        return Ok(());
    };

    let updated = editor.to_doc(doc.title.clone());
    updated.save(&path)?;
    println!("  {} Wrote {}", "✓".green(), path.display());

    let emit_path = args
        .emit
        .or_else(|| config.save.emit_path.as_ref().map(|p| PathBuf::from(cwd).join(p)));
    if let Some(emit_path) = emit_path {
        let sink = JsonFileSink::new(&emit_path);
        let request = SaveRequest::new(editor.course_id(), 1, payload.clone());
        save_once(&sink, &request, &config.save.retry_policy()).await?;
        println!("  {} Saved order to {}", "✓".green(), emit_path.display());
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
