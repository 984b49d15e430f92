use brdwiz::editor::{BrdEditor, FixedSelection, FormatMarker, Motion, Selection, apply_format};
use brdwiz::export::EXPORT_FILE_NAME;
use brdwiz::format::NBSP;

#[test]
fn test_select_word_bold_then_save() {
    let mut editor = BrdEditor::new("Scope: billing portal");
    editor.enter_edit_mode();
    editor.edit(|input, buf| {
        input.move_to(buf, 0, 7);
        input.apply_motion(buf, Motion::LineEnd, true);
    });

    let caret = editor.apply_format(FormatMarker::Bold);
    assert_eq!(caret, Some(25));
    assert_eq!(editor.content(), "Scope: **billing portal**");
    assert!(editor.is_dirty());

    let mut saved = Vec::new();
    editor.save(|content| saved.push(content.to_owned()));
    assert_eq!(saved, vec!["Scope: **billing portal**".to_owned()]);
    assert!(!editor.is_edit_mode());
    assert!(!editor.is_dirty());
}

#[test]
fn test_heading_on_empty_caret_then_type() {
    let mut editor = BrdEditor::new("");
    editor.enter_edit_mode();
    assert_eq!(editor.apply_format(FormatMarker::Heading1), Some(2));
    editor.edit(|input, buf| input.insert_str(buf, "Overview"));
    assert_eq!(editor.content(), "# Overview");
    assert_eq!(
        editor.rendered_lines(),
        vec!["<h1 class=\"text-2xl font-bold my-2\">Overview</h1>".to_owned()]
    );
}

#[test]
fn test_format_in_view_mode_is_ignored() {
    let mut editor = BrdEditor::new("text");
    assert_eq!(editor.apply_format(FormatMarker::Italic), None);
    assert_eq!(editor.content(), "text");
    assert!(!editor.is_dirty());
}

#[test]
fn test_injected_provider_formats_range() {
    let mut editor = BrdEditor::new("Users can log in");
    let mut provider = FixedSelection::new(0, 5);
    let caret = editor.apply_format_with(FormatMarker::Italic, &mut provider);
    assert_eq!(caret, Some(7));
    assert_eq!(provider.caret, Some(7));
    assert_eq!(editor.content(), "_Users_ can log in");
}

#[test]
fn test_cancel_keeps_edits() {
    let mut editor = BrdEditor::new("draft");
    editor.enter_edit_mode();
    editor.edit(|input, buf| {
        input.apply_motion(buf, Motion::BufferEnd, false);
        input.insert_str(buf, " two");
    });
    editor.cancel();
    assert!(!editor.is_edit_mode());
    assert_eq!(editor.content(), "draft two");
    assert!(editor.is_dirty());
}

#[test]
fn test_bullet_list_renders_and_exports() {
    let text = "## Goals\n* Faster onboarding\n\n* **SSO**";
    let editor = BrdEditor::new(text);

    let lines = editor.rendered_lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], NBSP);
    assert!(lines[3].contains("<strong>SSO</strong>"));

    let dir = tempfile::tempdir().unwrap();
    let path = editor.export_standalone_html().write_to(dir.path()).unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("<h2>Goals</h2><br><li>Faster onboarding</li><br><br><li><strong>SSO</strong></li>"));
}

#[test]
fn test_pure_apply_format_leaves_rest_untouched() {
    let out = apply_format("ab cde fg", FormatMarker::Bold, Selection::new(3, 6));
    assert_eq!(out.text, "ab **cde** fg");
    assert_eq!(out.caret, 10);
}
