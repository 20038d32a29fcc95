use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::{Parser, TypeDefinition};
use nls_ir::Value;
use pretty_assertions::assert_eq;

const PROMPT: &str = "Apply Gaussian blurring with a standard deviation of ";

fn blur_parser(insert_whole: bool) -> Parser {
    let mut parser = Parser::new();
    parser.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false))).unwrap();
    parser.define_type("units", "mm", |_| Ok(Value::Bool(true))).unwrap();
    parser
        .define(
            TypeDefinition::new("filter-size", "{stddev:float} {units:units}")
                .evaluator(|pn| pn.evaluate("stddev"))
                .insert_whole(insert_whole),
        )
        .unwrap();
    parser
        .define_sentence(
            "Apply Gaussian blurring with a standard deviation of {stddev:filter-size}.",
            |pn| pn.evaluate("stddev"),
        )
        .unwrap();
    parser
        .define_sentence("Normalize intensities.", |_| Ok(Value::Void))
        .unwrap();
    parser
}

fn completions(parser: &mut Parser, text: &str) -> Vec<String> {
    parser
        .autocomplete(text, text.len())
        .unwrap()
        .into_iter()
        .map(|suggestion| suggestion.completion)
        .collect()
}

fn at_prompt(rest: &str) -> String {
    format!("{PROMPT}{rest}")
}

#[test]
fn test_empty_text_suggests_sentence_starts() {
    let mut parser = blur_parser(true);
    let suggestions = parser.autocomplete("", 0).unwrap();
    assert_eq!(
        suggestions,
        vec![
            Suggestion::literal(PROMPT, ""),
            Suggestion::literal("Normalize intensities.", ""),
        ]
    );
}

#[test]
fn test_literal_reports_typed_prefix() {
    let mut parser = blur_parser(true);
    let suggestions = parser.autocomplete("Norm", 4).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].already_entered, "Norm");
    assert_eq!(suggestions[0].remainder(), "alize intensities.");
    assert_eq!(suggestions[0].kind, SuggestionKind::Literal);
}

#[test]
fn test_insert_whole_suggests_sequence() {
    let mut parser = blur_parser(true);
    let suggestions = parser.autocomplete(&at_prompt(""), PROMPT.len()).unwrap();
    assert_eq!(
        suggestions,
        vec![Suggestion {
            completion: "${stddev} ${units}".to_string(),
            already_entered: String::new(),
            selection: Some(0..9),
            kind: SuggestionKind::Sequence,
        }]
    );
}

#[test]
fn test_numeric_placeholder_marker() {
    let mut parser = blur_parser(false);
    let suggestions = parser.autocomplete(&at_prompt(""), PROMPT.len()).unwrap();
    assert_eq!(suggestions, vec![Suggestion::placeholder("${stddev}")]);
    assert_eq!(suggestions[0].selection, Some(0..9));
}

#[test]
fn test_typing_a_number_vetoes() {
    let mut parser = blur_parser(true);
    let text = at_prompt("5");
    assert!(completions(&mut parser, &text).is_empty());
    assert_eq!(
        parser.check_completion(&text, text.len()).unwrap(),
        CompletionStatus::Vetoed
    );
}

#[test]
fn test_units_after_number() {
    let mut parser = blur_parser(true);
    assert_eq!(
        completions(&mut parser, &at_prompt("5 ")),
        vec!["pixel(s)".to_string(), "mm".to_string()]
    );
    assert_eq!(
        completions(&mut parser, &at_prompt("5 p")),
        vec!["pixel(s)".to_string()]
    );
    assert_eq!(completions(&mut parser, &at_prompt("5 mm")), vec![".".to_string()]);
}

#[test]
fn test_type_autocompleter_can_veto() {
    let mut parser = blur_parser(true);
    parser
        .set_autocompleter("units", |pn, _| {
            if pn.parsed_string().is_empty() {
                Completion::literals(pn, ["pixel(s)", "µm"])
            } else {
                Completion::veto()
            }
        })
        .unwrap();
    assert_eq!(
        completions(&mut parser, &at_prompt("5 ")),
        vec!["pixel(s)".to_string(), "µm".to_string()]
    );
    assert!(completions(&mut parser, &at_prompt("5 p")).is_empty());
}

#[test]
fn test_defer_falls_back_to_default() {
    let mut parser = Parser::new();
    parser
        .define(TypeDefinition::new("units", "pixel(s)").autocompleter(|_, _| Completion::Defer))
        .unwrap();
    parser
        .define(TypeDefinition::sentence("Radius {r:int} {u:units}."))
        .unwrap();
    assert_eq!(
        completions(&mut parser, "Radius 3 pix"),
        vec!["pixel(s)".to_string()]
    );
}

#[test]
fn test_alternative_autocompleter() {
    let mut parser = Parser::new();
    parser
        .define(
            TypeDefinition::new("image", "{name:[a-z-]:+}")
                .autocompleter(|pn, _| Completion::literals(pn, ["blobs", "boats"])),
        )
        .unwrap();
    parser
        .define(TypeDefinition::sentence("Use {image:image} as a mask."))
        .unwrap();
    let suggestions = parser.autocomplete("Use bo", 6).unwrap();
    assert_eq!(
        suggestions,
        vec![
            Suggestion::literal("blobs", "bo"),
            Suggestion::literal("boats", "bo"),
            Suggestion::literal(" as a mask.", ""),
        ]
    );
}

#[test]
fn test_just_check_is_forwarded() {
    let seen = Rc::new(Cell::new(None));
    let record = Rc::clone(&seen);
    let mut parser = blur_parser(true);
    parser
        .set_autocompleter("units", move |pn, just_check| {
            record.set(Some(just_check));
            Completion::literals(pn, ["pixel(s)"])
        })
        .unwrap();

    let text = at_prompt("5 ");
    assert_eq!(
        parser.check_completion(&text, text.len()).unwrap(),
        CompletionStatus::Available
    );
    assert_eq!(seen.get(), Some(true));
    parser.autocomplete(&text, text.len()).unwrap();
    assert_eq!(seen.get(), Some(false));
}

#[test]
fn test_complete_script_has_nothing_to_suggest() {
    let mut parser = blur_parser(true);
    let text = "Normalize intensities.";
    assert!(completions(&mut parser, text).is_empty());
    assert_eq!(
        parser.check_completion(text, text.len()).unwrap(),
        CompletionStatus::Empty
    );
    assert_eq!(completions(&mut parser, "Normalize intensities.\n").len(), 2);
}

#[test]
fn test_char_class_completion() {
    let mut parser = Parser::new();
    parser
        .define(TypeDefinition::sentence("Use {image:[a-z-]:+} as a mask."))
        .unwrap();
    assert_eq!(
        parser.autocomplete("Use ", 4).unwrap(),
        vec![Suggestion::placeholder("${image}")]
    );
    assert_eq!(completions(&mut parser, "Use bl"), vec![" as a mask.".to_string()]);
}

#[test]
fn test_duplicates_collapse() {
    let mut parser = Parser::new();
    parser.define(TypeDefinition::sentence("Apply {x:int} times.")).unwrap();
    parser.define(TypeDefinition::sentence("Apply {y:float} px.")).unwrap();
    assert_eq!(completions(&mut parser, ""), vec!["Apply ".to_string()]);
    assert_eq!(
        completions(&mut parser, "Apply "),
        vec!["${x}".to_string(), "${y}".to_string()]
    );
}

#[test]
fn test_cursor_is_clamped() {
    let mut parser = Parser::new();
    parser.define(TypeDefinition::sentence("Größe {n:int}.")).unwrap();
    assert_eq!(
        parser.autocomplete("Größe 3.", 1000).unwrap(),
        Vec::<Suggestion>::new()
    );
    let suggestions = parser.autocomplete("Größe", 3).unwrap();
    assert_eq!(suggestions, vec![Suggestion::literal("Größe ", "Gr")]);
}

#[test]
fn test_helpers() {
    assert_eq!(
        Completion::placeholder("radius"),
        Completion::Placeholder("radius".to_string())
    );
    assert_eq!(Completion::veto(), Completion::Veto);
    let suggestion = Suggestion::literal("pixel(s)", "pix");
    assert_eq!(suggestion.remainder(), "el(s)");
    assert_eq!(suggestion.to_string(), "pixel(s)");
}

#[test]
fn test_markers_use_configured_delimiters() {
    let config = ParserConfig::default().with_placeholder_delimiters("<", ">");
    let mut parser = Parser::with_config(config);
    parser
        .define(TypeDefinition::sentence("Blur by {s:float}."))
        .unwrap();
    parser
        .define(
            TypeDefinition::new("radius", "{r:int}")
                .autocompleter(|_, _| Completion::placeholder("r")),
        )
        .unwrap();
    parser
        .define(TypeDefinition::sentence("Median with {radius:radius}."))
        .unwrap();

    assert_eq!(completions(&mut parser, "Blur by "), vec!["<s>".to_string()]);

    let text = "Median with ";
    let suggestions = parser.autocomplete(text, text.len()).unwrap();
    assert_eq!(suggestions, vec![Suggestion::placeholder("<r>")]);
    assert_eq!(suggestions[0].selection, Some(0..3));
}
