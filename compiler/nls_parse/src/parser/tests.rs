use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::TypeDefinition;
use nls_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

const BLUR: &str = "Apply Gaussian blurring with a standard deviation of {stddev:filter-size}.";

/// Grammar whose calibrated unit is re-read from `unit` on every pass.
fn calibrated_parser(unit: &Rc<RefCell<String>>, pixel_width: f64) -> Parser {
    let mut parser = Parser::new();
    parser.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false))).unwrap();
    parser
        .define(
            TypeDefinition::new("filter-size", "{stddev:float} {units:units}")
                .evaluator(move |pn| {
                    let stddev: f64 = pn.evaluate_as("stddev")?;
                    let calibrated: bool = pn.evaluate_as("units")?;
                    Ok(Value::Float(if calibrated {
                        stddev / pixel_width
                    } else {
                        stddev
                    }))
                })
                .insert_whole(true),
        )
        .unwrap();
    parser.define_sentence(BLUR, |pn| pn.evaluate("stddev")).unwrap();

    let unit = Rc::clone(unit);
    parser.add_parse_start_listener(move |registry| {
        registry.undefine_type("units")?;
        registry.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false)))?;
        registry.define_type("units", &unit.borrow(), |_| Ok(Value::Bool(true)))?;
        Ok(())
    });
    parser
}

fn blur(size: &str) -> String {
    format!("Apply Gaussian blurring with a standard deviation of {size}.")
}

#[test]
fn test_listener_redefines_units_each_pass() {
    let unit = Rc::new(RefCell::new("mm".to_string()));
    let mut parser = calibrated_parser(&unit, 0.25);

    let root = parser.parse(&blur("3 mm")).unwrap();
    assert_eq!(root.evaluate("units").unwrap(), Value::Bool(true));
    assert_eq!(root.run().unwrap(), vec![Value::Float(12.0)]);

    let root = parser.parse(&blur("3 pixel(s)")).unwrap();
    assert_eq!(root.run().unwrap(), vec![Value::Float(3.0)]);

    *unit.borrow_mut() = "inch".to_string();
    assert!(parser.parse(&blur("3 mm")).is_err());
    assert!(parser.parse(&blur("3 inch")).is_ok());
    assert_eq!(parser.registry().alternatives("units").len(), 2);
}

#[test]
fn test_listener_runs_before_completion() {
    let unit = Rc::new(RefCell::new("mm".to_string()));
    let mut parser = calibrated_parser(&unit, 0.25);
    *unit.borrow_mut() = "µm".to_string();
    let text = blur("3 ");
    let text = text.trim_end_matches('.');
    let suggestions: Vec<String> = parser
        .autocomplete(text, text.len())
        .unwrap()
        .into_iter()
        .map(|suggestion| suggestion.completion)
        .collect();
    assert_eq!(suggestions, vec!["pixel(s)".to_string(), "µm".to_string()]);
}

#[test]
fn test_failing_listener_keeps_registry() {
    let mut parser = Parser::new();
    parser.define_sentence("Normalize intensities.", |_| Ok(Value::Void)).unwrap();
    parser.add_parse_start_listener(|registry| {
        registry.define_sentence("Half-applied.", |_| Ok(Value::Void))?;
        registry.undefine_type("never-defined")?;
        Ok(())
    });

    let err = parser.parse("Normalize intensities.").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1002);
    match &err {
        ParseError::HookFailed { index, source } => {
            assert_eq!(*index, 0);
            assert_eq!(source.code(), ErrorCode::E2001);
        }
        ParseError::NoMatch(_) => panic!("expected a hook failure"),
    }
    assert_eq!(parser.registry().sentences().len(), 1);
    assert!(parser.autocomplete("", 0).is_err());
}

#[test]
fn test_listeners_run_in_order_every_pass() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut parser = Parser::new();
    parser.define_sentence("Normalize intensities.", |_| Ok(Value::Void)).unwrap();
    for id in 0..2 {
        let log = Rc::clone(&log);
        parser.add_parse_start_listener(move |_| {
            log.borrow_mut().push(id);
            Ok(())
        });
    }
    parser.parse("Normalize intensities.").unwrap();
    parser.autocomplete("Norm", 4).unwrap();
    assert_eq!(*log.borrow(), vec![0, 1, 0, 1]);
}

#[test]
fn test_undefine_then_parse_fails() {
    let mut parser = Parser::new();
    parser.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false))).unwrap();
    parser
        .define_sentence("Blur by {s:float} {u:units}.", |_| Ok(Value::Void))
        .unwrap();
    assert!(parser.parse("Blur by 2 pixel(s).").is_ok());

    parser.undefine_type("units").unwrap();
    let err = parser.parse("Blur by 2 pixel(s).").unwrap_err();
    assert_eq!(
        err.expected(),
        &[crate::Expected::UndefinedType("units".to_string())]
    );
}

#[test]
fn test_clamp_cursor() {
    assert_eq!(clamp_cursor("abc", 10), 3);
    assert_eq!(clamp_cursor("abc", 1), 1);
    assert_eq!(clamp_cursor("größe", 3), 2);
    assert_eq!(clamp_cursor("", 0), 0);
}

#[test]
fn test_debug_summary() {
    let mut parser = Parser::with_config(ParserConfig::default().with_multiple_sentences(false));
    parser.add_parse_start_listener(|_| Ok(()));
    let debug = format!("{parser:?}");
    assert!(debug.contains("listeners: 1"));
    assert!(!parser.config().allow_multiple_sentences);
}
