use nls_diagnostic::ColorMode;
use nls_parse::{RepetitionPolicy, Suggestion};
use pretty_assertions::assert_eq;

use super::*;
use crate::preprocessing::{Calibration, Preprocessing};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_parse_options() {
    let options = parse_options(&args(&[
        "script.nls",
        "--units=mm",
        "--pixel-width=0.25",
        "--color=never",
    ]))
    .unwrap();
    assert_eq!(options.calibration, Calibration::new("mm", 0.25));
    assert_eq!(options.color, ColorMode::Never);
    assert_eq!(options.cursor, None);
    assert!(!options.tree);
    assert_eq!(options.inputs, vec!["script.nls".to_string()]);
}

#[test]
fn test_tree_flag() {
    let options = parse_options(&args(&["--tree", "script.nls"])).unwrap();
    assert!(options.tree);
    assert_eq!(options.inputs, vec!["script.nls".to_string()]);
    assert!(parse_options(&args(&["--tree=yes"])).is_err());
}

#[test]
fn test_stdin_is_positional() {
    let options = parse_options(&args(&["-", "--cursor=12"])).unwrap();
    assert_eq!(options.inputs, vec!["-".to_string()]);
    assert_eq!(options.cursor, Some(12));
}

#[test]
fn test_invalid_options() {
    assert!(parse_options(&args(&["--units"])).is_err());
    assert!(parse_options(&args(&["--pixel-width=0"])).is_err());
    assert!(parse_options(&args(&["--pixel-width=wide"])).is_err());
    assert!(parse_options(&args(&["--color=sometimes"])).is_err());
    assert!(parse_options(&args(&["--verbose=1"])).is_err());
}

#[test]
fn test_separator_sets_repetition_policy() {
    let options = parse_options(&args(&["--separator=, "])).unwrap();
    assert_eq!(
        options.parser_config().repetition,
        RepetitionPolicy::Separated(", ".to_string())
    );
    assert_eq!(
        Options::default().parser_config().repetition,
        RepetitionPolicy::Adjacent
    );
}

#[test]
fn test_grammar_listing() {
    let language = Preprocessing::new(Calibration::default()).unwrap();
    let lines = grammar_listing(language.parser());
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[2], "Normalize intensities.");
    assert_eq!(
        lines[7],
        "filter-size := {stddev:float} {units:units}".to_string()
    );
    assert_eq!(lines[8], "units := pixel(s)".to_string());
}

#[test]
fn test_sentence_count_skips_gaps() {
    let mut language = Preprocessing::new(Calibration::default()).unwrap();
    let root = language
        .parser_mut()
        .parse("  Normalize intensities.\n\nNormalize intensities.\n")
        .unwrap();
    assert_eq!(sentence_count(&root), 2);
}

#[test]
fn test_check_summary_prints_tree_on_request() {
    let mut language = Preprocessing::new(Calibration::default()).unwrap();
    let root = language.parser_mut().parse("Normalize intensities.").unwrap();

    assert_eq!(
        check_summary("a.nls", &root, false),
        "OK: a.nls (1 sentence)\n"
    );
    let with_tree = check_summary("a.nls", &root, true);
    assert_eq!(with_tree, format!("OK: a.nls (1 sentence)\n{}", root.dump()));
    assert!(with_tree.contains("script"));
    assert!(with_tree.contains("sentence"));
}

#[test]
fn test_render_suggestions() {
    let lines = render_suggestions(&[
        Suggestion::literal("pixel(s)", "pix"),
        Suggestion::placeholder("${stddev}"),
    ]);
    assert_eq!(
        lines,
        vec!["el(s)\t(pixel(s))".to_string(), "${stddev}".to_string()]
    );
}
