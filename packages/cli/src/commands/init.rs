use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use syllabus_outline::{
    ChapterDoc, ChapterId, CourseDoc, CourseId, LessonDoc, LessonId, LessonKind,
};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Course title for the sample outline
    #[arg(short, long, default_value = "My Course")]
    pub title: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config = Config::default();
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    let course_path = config.outline_path(cwd);

    // Check if the project already exists
    if (config_path.exists() || course_path.exists()) && !args.force {
        println!(
            "{} {} or {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white(),
            config.outline_file.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📚 Initializing syllabus project...".bright_blue().bold()
    );

    // Create sample course file
    let course = sample_course(&args.title);
    course.save(&course_path)?;
    println!("  {} Created {}", "✓".green(), config.outline_file);

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: syllabus show");
    println!("  2. Try: syllabus reorder --grab lesson-2 --over lesson-4");
    println!("  3. Print the order: syllabus payload");

    Ok(())
}

fn sample_course(title: &str) -> CourseDoc {
    CourseDoc {
        id: CourseId(1),
        title: title.to_string(),
        chapters: vec![
            ChapterDoc {
                id: ChapterId(1),
                title: "Getting Started".to_string(),
                hidden: false,
                lessons: vec![
                    LessonDoc {
                        id: LessonId(1),
                        title: "Welcome".to_string(),
                        kind: LessonKind::Video,
                    },
                    LessonDoc {
                        id: LessonId(2),
                        title: "Course Overview".to_string(),
                        kind: LessonKind::Pdf,
                    },
                ],
            },
            ChapterDoc {
                id: ChapterId(2),
                title: "Fundamentals".to_string(),
                hidden: false,
                lessons: vec![
                    LessonDoc {
                        id: LessonId(3),
                        title: "First Steps".to_string(),
                        kind: LessonKind::Video,
                    },
                    LessonDoc {
                        id: LessonId(4),
                        title: "Check Your Knowledge".to_string(),
                        kind: LessonKind::Quiz,
                    },
                ],
            },
            ChapterDoc {
                id: ChapterId(3),
                title: "Bonus Material".to_string(),
                hidden: true,
                lessons: vec![],
            },
        ],
    }
}
