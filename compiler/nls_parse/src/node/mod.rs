//! Parse trees.
//!
//! A [`ParsedNode`] covers a span of the parsed text. Inner nodes are
//! script roots, matched alternatives and repetitions; leaves are literal
//! text, built-ins, character runs and the whitespace gaps between
//! sentences. Leaves tile the input, so concatenating their text in order
//! reproduces it exactly.
//!
//! Nodes produced for autocompletion may be incomplete: such a node ran
//! into the end of the text, and only its last child is incomplete too.

use std::cell::OnceCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use nls_ir::{Span, Value};
use nls_pattern::{Builtin, Quantifier};
use nls_stack::ensure_sufficient_stack;

use crate::eval::EvalError;
use crate::registry::Alternative;

/// What a node matched.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Root of a parse: sentences and the gaps between them.
    Script,
    /// One alternative of a type, or a sentence.
    Alternative(Rc<Alternative>),
    /// A quantified registered or numeric type. Children are the
    /// repetitions, interleaved with separator literals.
    Repetition(Quantifier),
    /// Literal pattern text; holds the full literal even when the node
    /// covers only a typed prefix.
    Literal(Rc<str>),
    /// A numeric built-in, or a single-character built-in without quantifier.
    Builtin(Builtin),
    /// Characters matched by a character class or a quantified
    /// single-character built-in.
    Run,
    /// Whitespace between sentences.
    Gap,
}

pub struct ParsedNode {
    text: Rc<str>,
    span: Span,
    name: Option<Rc<str>>,
    kind: NodeKind,
    children: Vec<Rc<ParsedNode>>,
    complete: bool,
    value: OnceCell<Result<Value, EvalError>>,
}

impl ParsedNode {
    pub(crate) fn new(
        text: &Rc<str>,
        span: Span,
        name: Option<Rc<str>>,
        kind: NodeKind,
        children: Vec<Rc<ParsedNode>>,
    ) -> Self {
        ParsedNode {
            text: Rc::clone(text),
            span,
            name,
            kind,
            children,
            complete: true,
            value: OnceCell::new(),
        }
    }

    /// Mark this node as cut off by the end of the text.
    pub(crate) fn incomplete(mut self) -> Self {
        self.complete = false;
        self
    }

    /// Placeholder variable name, if this node fills a placeholder.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The matched text.
    pub fn parsed_string(&self) -> &str {
        self.span.slice(&self.text).unwrap_or_default()
    }

    /// The whole text this node was parsed from.
    pub fn source(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Rc<ParsedNode>] {
        &self.children
    }

    /// `false` for nodes of autocompletion trees that ran into the end of
    /// the text before matching completely.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The matched alternative, for alternative nodes.
    pub fn alternative(&self) -> Option<&Rc<Alternative>> {
        match &self.kind {
            NodeKind::Alternative(alternative) => Some(alternative),
            _ => None,
        }
    }

    /// Name of the matched type; `None` for sentences and non-alternatives.
    pub fn type_name(&self) -> Option<&str> {
        self.alternative().and_then(|alternative| alternative.type_name())
    }

    /// Direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&ParsedNode> {
        self.children
            .iter()
            .map(|child| &**child)
            .find(|child| child.name() == Some(name))
    }

    /// Nearest descendant named `name`, breadth-first, so a sentence's own
    /// placeholders shadow same-named variables of nested types.
    pub fn find(&self, name: &str) -> Option<&ParsedNode> {
        let mut queue: VecDeque<&ParsedNode> = self.children.iter().map(|c| &**c).collect();
        while let Some(node) = queue.pop_front() {
            if node.name() == Some(name) {
                return Some(node);
            }
            queue.extend(node.children.iter().map(|c| &**c));
        }
        None
    }

    /// Value of the descendant variable `name`.
    pub fn evaluate(&self, name: &str) -> Result<Value, EvalError> {
        match self.find(name) {
            Some(node) => node.value(),
            None => Err(EvalError::UnknownVariable {
                name: name.to_string(),
                parent: self.parsed_string().to_string(),
                span: self.span,
            }),
        }
    }

    /// Value of the descendant variable `name`, coerced to `T`.
    pub fn evaluate_as<T>(&self, name: &str) -> Result<T, EvalError>
    where
        T: TryFrom<Value, Error = nls_ir::ValueTypeError>,
    {
        let value = self.evaluate(name)?;
        T::try_from(value).map_err(|source| EvalError::TypeMismatch {
            name: name.to_string(),
            source,
        })
    }

    /// Evaluate each sentence of a script in order, stopping at the first
    /// failure. On any other node, evaluates the node itself.
    pub fn run(&self) -> Result<Vec<Value>, EvalError> {
        match self.kind {
            NodeKind::Script => self
                .children
                .iter()
                .filter(|child| !matches!(child.kind, NodeKind::Gap))
                .map(|sentence| sentence.value())
                .collect(),
            _ => self.value().map(|value| vec![value]),
        }
    }

    /// This node's value, computed on first use.
    pub fn value(&self) -> Result<Value, EvalError> {
        self.value
            .get_or_init(|| ensure_sufficient_stack(|| self.compute()))
            .clone()
    }

    fn compute(&self) -> Result<Value, EvalError> {
        match &self.kind {
            NodeKind::Script => self.run().map(Value::from),
            NodeKind::Alternative(alternative) => match alternative.evaluator() {
                Some(evaluator) => evaluator.evaluate(self),
                None if alternative.is_sentence() => Ok(Value::Void),
                None => Ok(Value::string(self.parsed_string())),
            },
            NodeKind::Repetition(quantifier) => {
                let mut values = self
                    .children
                    .iter()
                    .filter(|child| !matches!(child.kind, NodeKind::Literal(_)))
                    .map(|child| child.value());
                if quantifier.is_optional() {
                    values.next().unwrap_or(Ok(Value::Void))
                } else {
                    values.collect::<Result<Vec<_>, _>>().map(Value::from)
                }
            }
            NodeKind::Builtin(builtin) => self.builtin_value(*builtin),
            NodeKind::Literal(_) | NodeKind::Run | NodeKind::Gap => {
                Ok(Value::string(self.parsed_string()))
            }
        }
    }

    fn builtin_value(&self, builtin: Builtin) -> Result<Value, EvalError> {
        let text = self.parsed_string();
        let invalid = |kind| EvalError::InvalidNumber {
            text: text.to_string(),
            kind,
            span: self.span,
        };
        match builtin {
            Builtin::Float => text.parse::<f64>().map(Value::Float).map_err(|_| invalid("float")),
            Builtin::Int => text.parse::<i64>().map(Value::Int).map_err(|_| invalid("int")),
            Builtin::Digit | Builtin::Letter | Builtin::Whitespace => {
                Ok(text.chars().next().map_or(Value::Void, Value::Char))
            }
        }
    }

    /// Concatenated text of all leaves, in order.
    pub fn leaf_text(&self) -> String {
        let mut out = String::with_capacity(self.span.len() as usize);
        self.push_leaves(&mut out);
        out
    }

    fn push_leaves(&self, out: &mut String) {
        if self.children.is_empty() {
            out.push_str(self.parsed_string());
        } else {
            for child in &self.children {
                child.push_leaves(out);
            }
        }
    }

    /// Indented one-line-per-node rendering, for debugging and `nlsc check --tree`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        let kind = match &self.kind {
            NodeKind::Script => "script".to_string(),
            NodeKind::Alternative(alternative) => match alternative.type_name() {
                Some(name) => format!("type {name}"),
                None => "sentence".to_string(),
            },
            NodeKind::Repetition(quantifier) => format!("repeat {quantifier}"),
            NodeKind::Literal(_) => "literal".to_string(),
            NodeKind::Builtin(builtin) => builtin.to_string(),
            NodeKind::Run => "run".to_string(),
            NodeKind::Gap => "gap".to_string(),
        };
        let _ = write!(out, "{:indent$}{kind}", "", indent = depth * 2);
        if let Some(name) = &self.name {
            let _ = write!(out, " {name}");
        }
        let _ = writeln!(out, " {:?} {:?}", self.span, self.parsed_string());
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}

impl fmt::Debug for ParsedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedNode")
            .field("name", &self.name)
            .field("span", &self.span)
            .field("text", &self.parsed_string())
            .field("complete", &self.complete)
            .field("children", &self.children)
            .finish()
    }
}
