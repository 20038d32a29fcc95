//! Properties over generated scripts.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use nls_parse::{Parser, TypeDefinition};
use proptest::prelude::*;

fn grammar() -> Parser {
    let mut parser = Parser::new();
    for sentence in [
        "Normalize intensities.",
        "Apply Gaussian blurring with a standard deviation of {stddev:float} pixel(s).",
        "Apply Median filtering with a window of radius {radius:int} pixel(s).",
        "Use {image:[a-z-]:+} as mask {n:int} times.",
    ] {
        parser.define(TypeDefinition::sentence(sentence)).unwrap();
    }
    parser
}

fn sentence() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Normalize intensities.".to_string()),
        (0u32..1000, 0u32..10).prop_map(|(whole, frac)| format!(
            "Apply Gaussian blurring with a standard deviation of {whole}.{frac} pixel(s)."
        )),
        (0u32..50).prop_map(|radius| format!(
            "Apply Median filtering with a window of radius {radius} pixel(s)."
        )),
        ("[a-z][a-z-]{0,8}", 0u32..50)
            .prop_map(|(image, n)| format!("Use {image} as mask {n} times.")),
    ]
}

/// Sentences joined by whitespace, with optional surrounding whitespace.
fn script(max_sentences: usize) -> impl Strategy<Value = (String, usize)> {
    let separator = prop::sample::select(vec!["\n", " ", "\n\n", "\t "]);
    (
        prop::collection::vec((sentence(), separator), 0..=max_sentences),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(parts, leading, trailing)| {
            let count = parts.len();
            let mut text = String::new();
            if leading {
                text.push(' ');
            }
            for (i, (sentence, separator)) in parts.into_iter().enumerate() {
                if i > 0 {
                    text.push_str(separator);
                }
                text.push_str(&sentence);
            }
            if trailing {
                text.push('\n');
            }
            (text, count)
        })
}

proptest! {
    #[test]
    fn leaves_reproduce_input((text, count) in script(5)) {
        let root = grammar().parse(&text).unwrap();
        prop_assert_eq!(root.leaf_text(), text.clone());
        prop_assert_eq!(root.parsed_string(), text.as_str());
        prop_assert_eq!(root.run().unwrap().len(), count);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_prefix_can_be_completed((text, _) in script(2)) {
        let mut parser = grammar();
        for cursor in (0..=text.len()).filter(|&i| text.is_char_boundary(i)) {
            prop_assert!(
                parser.autocomplete(&text, cursor).is_ok(),
                "no completion at {} in {:?}",
                cursor,
                text
            );
        }
    }
}
