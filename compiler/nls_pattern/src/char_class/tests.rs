use super::*;

#[test]
fn test_units_class() {
    let class = CharClass::parse("a-zA-Z()").unwrap();
    for c in "pixel(s)MM".chars() {
        assert!(class.contains(c), "{c:?} should match");
    }
    assert!(!class.contains(' '));
    assert!(!class.contains('0'));
    assert_eq!(class.source(), "[a-zA-Z()]");
}

#[test]
fn test_trailing_dash_is_literal() {
    let class = CharClass::parse("a-z-").unwrap();
    assert!(class.contains('-'));
    assert!(class.contains('q'));
    assert!(!class.contains('_'));
}

#[test]
fn test_leading_dash_is_literal() {
    let class = CharClass::parse("-a").unwrap();
    assert!(class.contains('-'));
    assert!(class.contains('a'));
    assert!(!class.contains('b'));
}

#[test]
fn test_negation() {
    let class = CharClass::parse("^0-9").unwrap();
    assert!(class.is_negated());
    assert!(class.contains('x'));
    assert!(!class.contains('5'));
}

#[test]
fn test_escapes() {
    let class = CharClass::parse(r"\]\\\-").unwrap();
    assert!(class.contains(']'));
    assert!(class.contains('\\'));
    assert!(class.contains('-'));
    assert!(!class.contains('a'));
}

#[test]
fn test_escaped_caret_is_not_negation() {
    let class = CharClass::parse(r"\^a").unwrap();
    assert!(!class.is_negated());
    assert!(class.contains('^'));
}

#[test]
fn test_errors() {
    assert!(CharClass::parse("").is_err());
    assert!(CharClass::parse("^").is_err());
    assert!(CharClass::parse("z-a").is_err());
    assert!(CharClass::parse("a\\").is_err());
}
