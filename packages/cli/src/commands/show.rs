use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use syllabus_outline::{CourseDoc, DragKey, OutlineError};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Course file to print (defaults to the configured outline file)
    pub file: Option<PathBuf>,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = args.file.unwrap_or_else(|| config.outline_path(cwd));

    let doc = CourseDoc::load(&path)?;
    let outline = doc.to_outline()?;

    println!("{}", format!("📖 {}", doc.title).bright_blue().bold());
    println!();

    for (index, chapter_id) in outline.chapter_order().iter().enumerate() {
        let chapter = outline
            .chapter(*chapter_id)
            .ok_or(OutlineError::UnknownChapter(*chapter_id))?;
        let key = format!("[{}]", DragKey::Chapter(*chapter_id)).dimmed();
        if chapter.hidden {
            println!(
                "{}. {}  {} {}",
                index + 1,
                chapter.title.bold(),
                key,
                "(hidden)".yellow()
            );
        } else {
            println!("{}. {}  {}", index + 1, chapter.title.bold(), key);
        }

        let lessons = outline.lessons_in(*chapter_id)?;
        if lessons.is_empty() {
            println!("   {}", "(no lessons)".dimmed());
            continue;
        }
        for (position, lesson_id) in lessons.iter().enumerate() {
            let lesson = outline
                .lesson(*lesson_id)
                .ok_or(OutlineError::UnknownLesson(*lesson_id))?;
            println!(
                "   {}. {} ({})  {}",
                position + 1,
                lesson.title,
                lesson.kind,
                format!("[{}]", DragKey::Lesson(*lesson_id)).dimmed()
            );
        }
    }

    println!();
    println!(
        "{} chapters, {} lessons",
        outline.chapter_count(),
        outline.lesson_count()
    );

    Ok(())
}
