//! nlsc: check, run and complete image-preprocessing scripts.

use nlsc::commands::{
    check_script, complete_text, explain_error, parse_options, print_grammar, run_script, Options,
};

fn main() {
    nlsc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "grammar" => print_grammar(&options),
        "check" => {
            let path = script_path(&options, "check");
            check_script(path, &options);
        }
        "run" => {
            let path = script_path(&options, "run");
            run_script(path, &options);
        }
        "complete" => {
            let Some(text) = options.inputs.first() else {
                eprintln!("Usage: nlsc complete <text> [--cursor=N]");
                eprintln!();
                eprintln!("Prints the suggestions at the cursor, one per line.");
                std::process::exit(1);
            };
            complete_text(text, &options);
        }
        "explain" => {
            let Some(code) = options.inputs.first() else {
                eprintln!("Usage: nlsc explain <error-code>");
                eprintln!("Example: nlsc explain E1001");
                std::process::exit(1);
            };
            explain_error(code);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("nlsc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// The single script argument of `check` and `run`.
fn script_path<'a>(options: &'a Options, command: &str) -> &'a str {
    let Some(path) = options.inputs.first() else {
        eprintln!("Usage: nlsc {command} <file|->");
        std::process::exit(1);
    };
    path
}

fn print_usage() {
    println!("nlsc - image-preprocessing scripts in plain sentences");
    println!();
    println!("Usage: nlsc <command> [options]");
    println!();
    println!("Commands:");
    println!("  grammar              List the sentences and types of the language");
    println!("  check <file|->       Parse a script and report errors");
    println!("  run <file|->         Run a script and list the recorded operations");
    println!("  complete <text>      Print suggestions at the cursor");
    println!("  explain <code>       Describe an error code");
    println!("  help                 Show this message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --units=<unit>       Physical unit of the image calibration (e.g. mm)");
    println!("  --pixel-width=<w>    Width of one pixel in that unit");
    println!("  --cursor=<offset>    Byte offset for `complete` (default: end of text)");
    println!("  --separator=<text>   Literal between repeated values");
    println!("  --color=<mode>       auto, always or never");
    println!("  --tree               Print the parse tree after `check`");
    println!();
    println!("Set NLS_LOG (or RUST_LOG) to enable logging, e.g. NLS_LOG=nls_parse=debug.");
}
