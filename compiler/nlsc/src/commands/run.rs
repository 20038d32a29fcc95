//! The `run` command: parse a script, evaluate it and list the recorded
//! operations.

use super::{load_language, read_script, report, Options};

pub fn run_script(path: &str, options: &Options) {
    let text = read_script(path);
    let mut language = load_language(options);
    match language.run(&text) {
        Ok(operations) => {
            for (i, operation) in operations.iter().enumerate() {
                println!("{:>3}. {operation}", i + 1);
            }
        }
        Err(e) => {
            report(options, &e.to_diagnostic(), Some((path, text.as_str())));
            std::process::exit(1);
        }
    }
}
