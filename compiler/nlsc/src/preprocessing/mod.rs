//! The image-preprocessing language of the tutorials.
//!
//! Sentences never touch pixels. Each one appends an [`Operation`] to the
//! [`ImageSession`], and the `run` command prints what was recorded.
//!
//! The `units` type follows the session's [`Calibration`]: a parse-start
//! listener redefines it on every pass, so `--units=mm` makes
//! `Apply Gaussian blurring with a standard deviation of 2 mm.` valid and
//! converts the size to pixels with the pixel width.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use nls_diagnostic::{Diagnostic, ErrorCode};
use nls_parse::{
    CompileError, EvalError, ParseError, ParsedNode, Parser, ParserConfig, TypeDefinition, Value,
};
use tracing::debug;

/// Physical size of one pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    /// Unit name as typed in scripts, e.g. `mm`.
    pub unit: String,
    /// Width of one pixel in `unit`.
    pub pixel_width: f64,
}

impl Calibration {
    pub const UNCALIBRATED: &'static str = "pixel";

    pub fn new(unit: impl Into<String>, pixel_width: f64) -> Self {
        Calibration {
            unit: unit.into(),
            pixel_width,
        }
    }

    /// Whether sizes may be given in a physical unit.
    pub fn is_calibrated(&self) -> bool {
        !self.unit.is_empty() && self.unit != Self::UNCALIBRATED
    }

    /// A size in pixels; `physical` sizes are divided by the pixel width.
    pub fn to_pixels(&self, size: f64, physical: bool) -> f64 {
        if physical {
            size / self.pixel_width
        } else {
            size
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::new(Self::UNCALIBRATED, 1.0)
    }
}

/// One recorded processing step. Sizes are in pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    GaussianBlur { stddev: f64 },
    MedianFilter { radius: i64 },
    NormalizeIntensities,
    SubtractBackground { radius: i64 },
    UnsharpMask { radius: f64, weight: f64 },
    Clahe {
        block_size: i64,
        bins: i64,
        slope: i64,
        mask: String,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::GaussianBlur { stddev } => {
                write!(f, "gaussian blur (sigma = {stddev} px)")
            }
            Operation::MedianFilter { radius } => {
                write!(f, "median filter (radius = {radius} px)")
            }
            Operation::NormalizeIntensities => f.write_str("intensity normalization"),
            Operation::SubtractBackground { radius } => {
                write!(f, "background subtraction (radius = {radius} px)")
            }
            Operation::UnsharpMask { radius, weight } => {
                write!(f, "unsharp mask (radius = {radius} px, weight = {weight})")
            }
            Operation::Clahe {
                block_size,
                bins,
                slope,
                mask,
            } => write!(
                f,
                "CLAHE (block size = {block_size}, bins = {bins}, slope = {slope}, mask = {mask})"
            ),
        }
    }
}

/// The image a script is applied to: its calibration and the operations
/// applied so far.
#[derive(Clone, Debug, Default)]
pub struct ImageSession {
    pub calibration: Calibration,
    operations: Vec<Operation>,
}

impl ImageSession {
    pub fn new(calibration: Calibration) -> Self {
        ImageSession {
            calibration,
            operations: Vec::new(),
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn record(&mut self, operation: Operation) -> Result<Value, EvalError> {
        debug!(%operation, "recorded");
        self.operations.push(operation);
        Ok(Value::Void)
    }
}

/// Failure of [`Preprocessing::run`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl RunError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RunError::Parse(e) => e.code(),
            RunError::Eval(e) => e.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RunError::Parse(e) => e.to_diagnostic(),
            RunError::Eval(e) => e.to_diagnostic(),
        }
    }
}

type Session = Rc<RefCell<ImageSession>>;

/// A parser for the preprocessing language, bound to one session.
pub struct Preprocessing {
    parser: Parser,
    session: Session,
}

impl Preprocessing {
    pub fn new(calibration: Calibration) -> Result<Self, CompileError> {
        Self::with_config(calibration, ParserConfig::default())
    }

    pub fn with_config(
        calibration: Calibration,
        config: ParserConfig,
    ) -> Result<Self, CompileError> {
        let session: Session = Rc::new(RefCell::new(ImageSession::new(calibration)));
        let mut parser = Parser::with_config(config);
        define_units(&mut parser, &session)?;
        define_sentences(&mut parser, &session)?;
        Ok(Preprocessing { parser, session })
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }

    pub fn session(&self) -> Ref<'_, ImageSession> {
        self.session.borrow()
    }

    /// Takes effect on the next parse.
    pub fn set_calibration(&self, calibration: Calibration) {
        self.session.borrow_mut().calibration = calibration;
    }

    /// Parse `script`, run its sentences and return the operations they
    /// recorded. Nothing is recorded if the script does not parse.
    pub fn run(&mut self, script: &str) -> Result<Vec<Operation>, RunError> {
        self.session.borrow_mut().operations.clear();
        let root = self.parser.parse(script)?;
        root.run()?;
        let operations = std::mem::take(&mut self.session.borrow_mut().operations);
        Ok(operations)
    }
}

impl fmt::Debug for Preprocessing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessing")
            .field("parser", &self.parser)
            .field("session", &self.session.borrow())
            .finish()
    }
}

/// `units` and `filter-size`, both following the calibration.
fn define_units(parser: &mut Parser, session: &Session) -> Result<(), CompileError> {
    let current = Rc::clone(session);
    parser.add_parse_start_listener(move |registry| {
        let calibration = current.borrow().calibration.clone();
        registry.undefine_type("units")?;
        registry.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false)))?;
        if calibration.is_calibrated() {
            debug!(unit = %calibration.unit, "units follow calibration");
            registry.define_type("units", &calibration.unit, |_| Ok(Value::Bool(true)))?;
        }
        Ok(())
    });
    parser.define_type("units", "pixel(s)", |_| Ok(Value::Bool(false)))?;

    let calibration = Rc::clone(session);
    parser.define(
        TypeDefinition::new("filter-size", "{stddev:float} {units:units}")
            .evaluator(move |pn: &ParsedNode| {
                let size: f64 = pn.evaluate_as("stddev")?;
                let physical: bool = pn.evaluate_as("units")?;
                let pixels = calibration.borrow().calibration.to_pixels(size, physical);
                Ok(Value::Float(pixels))
            })
            .insert_whole(true),
    )?;
    Ok(())
}

fn define_sentences(parser: &mut Parser, session: &Session) -> Result<(), CompileError> {
    let s = Rc::clone(session);
    parser.define_sentence(
        "Apply Gaussian blurring with a standard deviation of {stddev:filter-size}.",
        move |pn| {
            let stddev: f64 = pn.evaluate_as("stddev")?;
            s.borrow_mut().record(Operation::GaussianBlur { stddev })
        },
    )?;

    let s = Rc::clone(session);
    parser.define_sentence(
        "Apply Median filtering with a window of radius {window-size:filter-size}.",
        move |pn| {
            let radius = round(pn.evaluate_as("window-size")?);
            s.borrow_mut().record(Operation::MedianFilter { radius })
        },
    )?;

    let s = Rc::clone(session);
    parser.define_sentence("Normalize intensities.", move |_| {
        s.borrow_mut().record(Operation::NormalizeIntensities)
    })?;

    let s = Rc::clone(session);
    parser.define_sentence(
        "Subtract the background with a standard deviation of {window-size:filter-size}.",
        move |pn| {
            let radius = round(pn.evaluate_as("window-size")?);
            s.borrow_mut().record(Operation::SubtractBackground { radius })
        },
    )?;

    let s = Rc::clone(session);
    parser.define_sentence(
        "Apply a Median filter with radius of {radius:filter-size}.",
        move |pn| {
            let radius = round(pn.evaluate_as("radius")?);
            s.borrow_mut().record(Operation::MedianFilter { radius })
        },
    )?;

    let s = Rc::clone(session);
    parser.define_sentence(
        "Apply an Unsharp Mask with radius of {radius:filter-size} \
         and mask weight of {weight:float}.",
        move |pn| {
            let radius: f64 = pn.evaluate_as("radius")?;
            let weight: f64 = pn.evaluate_as("weight")?;
            s.borrow_mut().record(Operation::UnsharpMask { radius, weight })
        },
    )?;

    let s = Rc::clone(session);
    parser.define_sentence(
        "Enhance local contrast via CLAHE with a blocksize of {block-size:int}, \
         {bins:int} histogram bins and a max slope of {slope:int}, \
         using {image:[a-z-]:+} as a mask.",
        move |pn| {
            let operation = Operation::Clahe {
                block_size: pn.evaluate_as("block-size")?,
                bins: pn.evaluate_as("bins")?,
                slope: pn.evaluate_as("slope")?,
                mask: pn.evaluate_as("image")?,
            };
            s.borrow_mut().record(operation)
        },
    )?;
    Ok(())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "filter radii are small positive sizes"
)]
fn round(size: f64) -> i64 {
    size.round() as i64
}
