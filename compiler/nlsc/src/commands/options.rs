//! Command-line flags shared by all commands.

use nls_diagnostic::ColorMode;
use nls_parse::{ParserConfig, RepetitionPolicy};

use crate::preprocessing::Calibration;

/// Flags and positional arguments after the command name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub calibration: Calibration,
    pub color: ColorMode,
    /// Byte offset for `complete`; defaults to the end of the text.
    pub cursor: Option<usize>,
    /// Literal between repetitions of registered types.
    pub separator: Option<String>,
    /// Print the parse tree after a successful `check`.
    pub tree: bool,
    pub inputs: Vec<String>,
}

impl Options {
    pub fn parser_config(&self) -> ParserConfig {
        match &self.separator {
            Some(sep) => {
                ParserConfig::default().with_repetition(RepetitionPolicy::Separated(sep.clone()))
            }
            None => ParserConfig::default(),
        }
    }
}

/// Parse flags of the form `--name=value` and the bare `--tree`; anything
/// else, including a lone `-` for stdin, is positional.
pub fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    for arg in args {
        let Some(flag) = arg.strip_prefix("--") else {
            options.inputs.push(arg.clone());
            continue;
        };
        if flag == "tree" {
            options.tree = true;
            continue;
        }
        let Some((name, value)) = flag.split_once('=') else {
            return Err(format!("flag '{arg}' needs a value: --{flag}=<value>"));
        };
        match name {
            "units" => options.calibration.unit = value.to_string(),
            "pixel-width" => {
                let width: f64 = value
                    .parse()
                    .map_err(|_| format!("invalid pixel width '{value}'"))?;
                if !(width.is_finite() && width > 0.0) {
                    return Err(format!("pixel width must be positive, got '{value}'"));
                }
                options.calibration.pixel_width = width;
            }
            "cursor" => {
                let cursor = value
                    .parse()
                    .map_err(|_| format!("invalid cursor offset '{value}'"))?;
                options.cursor = Some(cursor);
            }
            "color" => {
                options.color = ColorMode::from_flag(value).ok_or_else(|| {
                    format!("invalid color mode '{value}' (expected auto, always or never)")
                })?;
            }
            "separator" => options.separator = Some(value.to_string()),
            _ => return Err(format!("unknown flag '--{name}'")),
        }
    }
    Ok(options)
}
