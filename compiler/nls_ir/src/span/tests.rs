use super::*;

#[test]
fn test_span_basics() {
    let span = Span::from_range(4..10);
    assert_eq!(span.len(), 6);
    assert!(!span.is_empty());
    assert_eq!(span.start(), 4);
    assert_eq!(span.end(), 10);
    assert_eq!(span.to_range(), 4..10);
    assert_eq!(format!("{span:?}"), "4..10");
}

#[test]
fn test_empty_span_at_end_of_input() {
    let span = Span::from_range(7..7);
    assert!(span.is_empty());
    assert_eq!(span.slice("Normalize"), Some(""));
}

#[test]
fn test_slice() {
    let text = "2.5 pixel(s)";
    assert_eq!(Span::from_range(4..12).slice(text), Some("pixel(s)"));
    assert_eq!(Span::from_range(4..40).slice(text), None);
}

#[test]
fn test_saturates_large_offsets() {
    let span = Span::from_range(0..usize::MAX);
    assert_eq!(span.end, u32::MAX);
}
