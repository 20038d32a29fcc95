use nls_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn render(diag: &Diagnostic, source: Option<&str>) -> String {
    let mut buf = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut buf, ColorMode::Never, false);
        if let Some(text) = source {
            emitter = emitter.with_source("script.nls", text);
        }
        emitter.emit(diag);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[test]
fn test_line_col() {
    let text = "Normalize intensities.\nApply Gx";
    assert_eq!(line_col(text, 0), (1, 1));
    assert_eq!(line_col(text, 29), (2, 7));
    assert_eq!(line_col(text, 1000), (2, 9));
}

#[test]
fn test_render_with_source_snippet() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("no sentence matches the input")
        .with_label(Span::from_range(6..7), "expected `Gaussian`")
        .with_note("while matching a sentence");

    let out = render(&diag, Some("Apply Gx"));
    assert_eq!(
        out,
        "error[E1001]: no sentence matches the input\n\
         \x20--> script.nls:1:7\n\
         \x20 |\n\
         1 | Apply Gx\n\
         \x20 |       ^ expected `Gaussian`\n\
         \x20 = note: while matching a sentence\n\n"
    );
}

#[test]
fn test_render_without_source() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("unclosed placeholder")
        .with_label(Span::from_range(3..4), "opened here");

    let out = render(&diag, None);
    assert!(out.starts_with("error[E0001]: unclosed placeholder\n"));
    assert!(out.contains("  --> 3..4: opened here"));
}

#[test]
fn test_color_flag() {
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
}
