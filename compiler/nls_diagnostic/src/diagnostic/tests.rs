use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("no sentence matches the input")
        .with_label(Span::from_range(6..7), "expected `Gaussian`")
        .with_note("while matching `units`");

    assert_eq!(
        diag.labels,
        vec![Label {
            span: Span::from_range(6..7),
            message: "expected `Gaussian`".to_string()
        }]
    );
    assert_eq!(diag.notes, vec!["while matching `units`".to_string()]);
    assert_eq!(
        diag.to_string(),
        "error[E1001]: no sentence matches the input"
    );
}

#[test]
fn test_starts_without_labels() {
    let diag = Diagnostic::error(ErrorCode::E1002).with_message("listener failed");
    assert!(diag.labels.is_empty());
    assert!(diag.notes.is_empty());
}
