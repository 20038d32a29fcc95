use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn literal(text: &str) -> String {
    text.to_string()
}

fn kinds(pattern: &str) -> Vec<String> {
    compile(pattern)
        .unwrap()
        .items()
        .iter()
        .map(|item| match item {
            Item::Literal(lit) => format!("lit({})", lit.text),
            Item::Placeholder(p) => format!("slot({p})"),
        })
        .collect()
}

#[test]
fn test_blur_sentence() {
    let pattern =
        compile("Apply Gaussian blurring with a standard deviation of {stddev:float} pixel(s).")
            .unwrap();
    assert_eq!(pattern.items().len(), 3);

    let Item::Literal(head) = &pattern.items()[0] else {
        panic!("expected literal");
    };
    assert_eq!(
        head.text,
        literal("Apply Gaussian blurring with a standard deviation of ")
    );
    assert_eq!(head.span, Span::from_range(0..53));

    let Item::Placeholder(slot) = &pattern.items()[1] else {
        panic!("expected placeholder");
    };
    assert_eq!(slot.name, "stddev");
    assert_eq!(slot.target, TypeRef::Builtin(Builtin::Float));
    assert_eq!(slot.quantifier, Quantifier::ONE);
    assert_eq!(slot.span, Span::from_range(53..67));

    let Item::Literal(tail) = &pattern.items()[2] else {
        panic!("expected literal");
    };
    assert_eq!(tail.text, " pixel(s).");
}

#[test]
fn test_named_types_and_quantifiers() {
    assert_eq!(
        kinds("{stddev:float} {units:units}"),
        vec!["slot({stddev:float})", "lit( )", "slot({units:units})"]
    );
    assert_eq!(
        kinds("using {image:[a-z-]:+} as a mask"),
        vec!["lit(using )", "slot({image:[a-z-]:+})", "lit( as a mask)"]
    );
    assert_eq!(
        kinds("{digits:digit:2-4}{sign:[+-]:?}"),
        vec!["slot({digits:digit:2-4})", "slot({sign:[+-]:?})"]
    );
}

#[test]
fn test_referenced_types() {
    let pattern = compile("radius {r:filter-size} weight {w:float} in {u:units}").unwrap();
    let names: Vec<&str> = pattern.referenced_types().collect();
    assert_eq!(names, vec!["filter-size", "units"]);
}

#[test]
fn test_literal_only_pattern() {
    assert_eq!(kinds("pixel(s)"), vec!["lit(pixel(s))"]);
    assert!(compile("").unwrap().is_empty());
}

#[test]
fn test_escaped_braces() {
    assert_eq!(kinds(r"set \{x\} to {x:int}"), vec!["lit(set {x} to )", "slot({x:int})"]);
    assert_eq!(kinds(r"a\b"), vec![r"lit(a\b)"]);
}

#[test]
fn test_whitespace_around_names_is_trimmed() {
    assert_eq!(kinds("{ n : int : + }"), vec!["slot({n:int:+})"]);
}

#[test]
fn test_unclosed_placeholder() {
    let err = compile("deviation of {stddev:float pixel(s)").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::UnclosedPlaceholder);
    assert_eq!(err.span.start(), 13);
    assert_eq!(err.code(), nls_diagnostic::ErrorCode::E0001);

    let nested = compile("{a:{b:int}}").unwrap_err();
    assert_eq!(nested.kind, CompileErrorKind::UnclosedPlaceholder);
}

#[test]
fn test_unmatched_close_brace() {
    let err = compile("pixel(s)}").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::UnmatchedCloseBrace);
    assert_eq!(err.span, Span::from_range(8..9));
}

#[test]
fn test_empty_name_and_type() {
    assert_eq!(
        compile("{:float}").unwrap_err().kind,
        CompileErrorKind::EmptyName
    );
    assert_eq!(
        compile("{stddev}").unwrap_err().kind,
        CompileErrorKind::EmptyType {
            name: "stddev".to_string()
        }
    );
    assert_eq!(
        compile("{stddev:}").unwrap_err().kind,
        CompileErrorKind::EmptyType {
            name: "stddev".to_string()
        }
    );
}

#[test]
fn test_variable_names_are_identifiers() {
    let err = compile("{a b:float}").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::InvalidName("a b".to_string()));
    assert_eq!(err.span, Span::from_range(0..4));
    assert_eq!(err.code(), nls_diagnostic::ErrorCode::E0003);
    assert!(compile("{a.b:int}").is_err());
    assert!(compile("{ filter-size_2 :float}").is_ok());
}

#[test]
fn test_unknown_quantifier() {
    let err = compile("{n:int:!}").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::UnknownQuantifier("!".to_string()));
    assert_eq!(err.span, Span::from_range(7..8));
    assert_eq!(
        compile("{n:int:}").unwrap_err().kind,
        CompileErrorKind::UnknownQuantifier(String::new())
    );
}

#[test]
fn test_malformed_char_class() {
    assert!(matches!(
        compile("{x:[z-a]}").unwrap_err().kind,
        CompileErrorKind::MalformedCharClass(_)
    ));
    assert!(matches!(
        compile("{x:[]}").unwrap_err().kind,
        CompileErrorKind::MalformedCharClass(_)
    ));
    assert!(matches!(
        compile("{x:[a-z]junk}").unwrap_err().kind,
        CompileErrorKind::MalformedCharClass(_)
    ));
    assert_eq!(
        compile("{x:[a-z").unwrap_err().kind,
        CompileErrorKind::UnclosedPlaceholder
    );
}

#[test]
fn test_invalid_type_reference() {
    assert_eq!(
        compile("{x:two words}").unwrap_err().kind,
        CompileErrorKind::InvalidTypeName("two words".to_string())
    );
}

#[test]
fn test_validate_type_name() {
    assert!(validate_type_name("filter-size").is_ok());
    assert!(validate_type_name("units_2").is_ok());
    assert_eq!(
        validate_type_name("float").unwrap_err().kind,
        CompileErrorKind::ReservedTypeName("float".to_string())
    );
    assert_eq!(
        validate_type_name("").unwrap_err().kind,
        CompileErrorKind::InvalidTypeName(String::new())
    );
    assert_eq!(
        validate_type_name("a b").unwrap_err().kind,
        CompileErrorKind::InvalidTypeName("a b".to_string())
    );
}

#[test]
fn test_diagnostic_points_into_pattern() {
    let err = compile("{n:int:%}").unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, nls_diagnostic::ErrorCode::E0005);
    assert_eq!(diag.labels.first().map(|label| label.span), Some(Span::from_range(7..8)));
    assert_eq!(diag.message, "unknown quantifier `%`");
}

proptest! {
    #[test]
    fn compile_never_panics(pattern in "\\PC{0,40}") {
        let _ = compile(&pattern);
    }

    #[test]
    fn literal_text_without_specials_is_one_literal(text in "[a-zA-Z0-9 .,()]{1,40}") {
        let pattern = compile(&text).unwrap();
        prop_assert_eq!(pattern.items().len(), 1);
        match &pattern.items()[0] {
            Item::Literal(lit) => prop_assert_eq!(&lit.text, &text),
            Item::Placeholder(_) => prop_assert!(false, "unexpected placeholder"),
        }
    }
}
