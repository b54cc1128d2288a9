//! End-to-end drag flows through the public editor API: pointer events in
//! as raw key strings, payloads out, tree consistency checked throughout.

use syllabus_editor::{DragKey, OutlineEditor};
use syllabus_outline::{
    Chapter, ChapterId, CourseId, Lesson, LessonId, LessonKind, Outline, SortPayload,
};

/// Chapter 1 "Welcome" holds lessons 1, 2, 3; chapter 2 "Extras" (hidden)
/// holds lesson 9; chapter 3 "Homework" is empty.
fn course_editor() -> OutlineEditor {
    let mut outline = Outline::new();
    outline
        .insert_chapter(Chapter::new(ChapterId(1), "Welcome"))
        .unwrap();
    outline
        .insert_chapter(Chapter::new(ChapterId(2), "Extras"))
        .unwrap();
    outline
        .insert_chapter(Chapter::new(ChapterId(3), "Homework"))
        .unwrap();
    outline.set_hidden(ChapterId(2), true).unwrap();

    outline
        .insert_lesson(Lesson::new(LessonId(1), "Intro", LessonKind::Video, ChapterId(1)))
        .unwrap();
    outline
        .insert_lesson(Lesson::new(LessonId(2), "Slides", LessonKind::Pdf, ChapterId(1)))
        .unwrap();
    outline
        .insert_lesson(Lesson::new(LessonId(3), "Quiz", LessonKind::Quiz, ChapterId(1)))
        .unwrap();
    outline
        .insert_lesson(Lesson::new(LessonId(9), "Bonus", LessonKind::Audio, ChapterId(2)))
        .unwrap();

    OutlineEditor::new(CourseId(55), outline)
}

fn lesson_ids(editor: &OutlineEditor, chapter: u64) -> Vec<u64> {
    editor
        .outline()
        .lessons_in(ChapterId(chapter))
        .unwrap()
        .iter()
        .map(|id| id.0)
        .collect()
}

fn chapter_ids(editor: &OutlineEditor) -> Vec<u64> {
    editor.outline().chapter_order().iter().map(|id| id.0).collect()
}

#[test]
fn test_reorder_within_a_chapter() {
    let mut editor = course_editor();

    // Grab the first lesson, drop it on the last one.
    editor.pointer_down("lesson-1").unwrap();
    editor.pointer_over("lesson-2").unwrap();
    editor.pointer_over("lesson-3").unwrap();
    let payload = editor.release().unwrap().expect("order changed");

    assert_eq!(lesson_ids(&editor, 1), [2, 3, 1]);
    payload.validate().unwrap();
    editor.outline().check_consistency().unwrap();
}

#[test]
fn test_move_across_chapters_at_the_hovered_slot() {
    let mut editor = course_editor();

    // The hidden chapter's lesson lands between lessons 1 and 2.
    editor.pointer_down("lesson-9").unwrap();
    editor.pointer_over("lesson-2").unwrap();
    editor.release().unwrap().expect("order changed");

    assert_eq!(lesson_ids(&editor, 1), [1, 9, 2, 3]);
    assert!(lesson_ids(&editor, 2).is_empty());
    assert_eq!(
        editor.outline().lesson(LessonId(9)).unwrap().chapter_id,
        ChapterId(1)
    );
    editor.outline().check_consistency().unwrap();
}

#[test]
fn test_drop_into_an_empty_chapter() {
    let mut editor = course_editor();

    editor.pointer_down("lesson-2").unwrap();
    editor.pointer_over("chapter-3").unwrap();
    let payload = editor.release().unwrap().expect("order changed");

    assert_eq!(lesson_ids(&editor, 3), [2]);
    assert_eq!(lesson_ids(&editor, 1), [1, 3]);

    // The payload covers the whole tree, empty rows included.
    assert_eq!(payload.entries.len(), 3);
    payload.validate().unwrap();
}

#[test]
fn test_reorder_chapters() {
    let mut editor = course_editor();

    editor.pointer_down("chapter-3").unwrap();
    editor.pointer_over("chapter-1").unwrap();
    editor.release().unwrap().expect("order changed");

    assert_eq!(chapter_ids(&editor), [3, 1, 2]);
    // Lesson membership is untouched by a chapter reorder.
    assert_eq!(lesson_ids(&editor, 1), [1, 2, 3]);
    editor.outline().check_consistency().unwrap();
}

#[test]
fn test_hidden_chapters_drag_like_any_other() {
    let mut editor = course_editor();

    editor.pointer_down("chapter-2").unwrap();
    editor.pointer_over("chapter-1").unwrap();
    editor.release().unwrap().expect("order changed");

    assert_eq!(chapter_ids(&editor), [2, 1, 3]);
    assert!(editor.outline().chapter(ChapterId(2)).unwrap().hidden);
}

#[test]
fn test_cancel_restores_the_pre_drag_state() {
    let mut editor = course_editor();
    let before = editor.payload();

    editor.pointer_down("lesson-1").unwrap();
    editor.pointer_over("chapter-3").unwrap();
    editor.cancel();

    assert!(!editor.is_dragging());
    assert_eq!(editor.payload(), before);
    // The abandoned gesture leaves nothing behind for release to commit.
    assert_eq!(editor.release().unwrap(), None);
}

#[test]
fn test_chapter_onto_lesson_is_rejected_whole() {
    let mut editor = course_editor();
    let before = editor.payload();

    editor.pointer_down("chapter-2").unwrap();
    editor.pointer_over("lesson-1").unwrap();
    let err = editor.release().unwrap_err();

    assert!(err.to_string().contains("chapters reorder only against chapters"));
    assert_eq!(editor.payload(), before);
    assert!(!editor.is_dragging());
    editor.outline().check_consistency().unwrap();
}

#[test]
fn test_exactly_one_payload_per_changed_drop() {
    let mut editor = course_editor();
    let mut payloads: Vec<SortPayload> = Vec::new();

    // A scripted editing run: two real moves and two no-ops.
    let script: [(&str, &str); 4] = [
        ("lesson-1", "lesson-3"),  // change
        ("lesson-1", "lesson-1"),  // self-drop
        ("chapter-1", "chapter-1"),// self-drop
        ("lesson-9", "chapter-1"), // change
    ];
    for (grab, over) in script {
        editor.pointer_down(grab).unwrap();
        editor.pointer_over(over).unwrap();
        if let Some(payload) = editor.release().unwrap() {
            payloads.push(payload);
        }
    }

    assert_eq!(payloads.len(), 2);
    let last = payloads.last().unwrap();
    last.validate().unwrap();
    assert_eq!(last, &editor.payload());
}

#[test]
fn test_mid_drag_deletion_is_tolerated() {
    let mut editor = course_editor();

    editor.pointer_down("lesson-1").unwrap();
    editor.pointer_over("lesson-3").unwrap();
    editor.delete_chapter(ChapterId(1)).unwrap();

    assert!(!editor.is_dragging());
    assert_eq!(editor.release().unwrap(), None);
    assert_eq!(chapter_ids(&editor), [2, 3]);
    editor.outline().check_consistency().unwrap();
}

#[test]
fn test_drag_keys_round_trip_through_the_view() {
    let editor = course_editor();
    for key in editor.view().chapter_row() {
        assert_eq!(DragKey::decode(&key.encode()).unwrap(), *key);
    }
    let row = editor.view().lesson_row(ChapterId(1)).unwrap();
    for key in row {
        assert_eq!(DragKey::decode(&key.encode()).unwrap(), *key);
    }
}

#[test]
fn test_edited_outline_writes_back_in_display_order() {
    let mut editor = course_editor();
    editor.pointer_down("lesson-3").unwrap();
    editor.pointer_over("lesson-1").unwrap();
    editor.release().unwrap().expect("order changed");
    editor.pointer_down("chapter-3").unwrap();
    editor.pointer_over("chapter-2").unwrap();
    editor.release().unwrap().expect("order changed");

    let doc = editor.to_doc("Demo Course");
    let chapter_ids: Vec<u64> = doc.chapters.iter().map(|c| c.id.0).collect();
    assert_eq!(chapter_ids, [1, 3, 2]);
    let lesson_titles: Vec<&str> = doc.chapters[0]
        .lessons
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(lesson_titles, ["Quiz", "Intro", "Slides"]);
}
