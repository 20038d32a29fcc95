//! The matcher: memoized backtracking over the registry.
//!
//! Every matching function returns *all* ways its rule can match at an
//! offset, as distinct end offsets in preference order (earlier
//! alternatives first, then earlier choices for earlier pattern items,
//! repetitions greedy). Two ways that end at the same offset can be
//! continued identically, so only the preferred one is kept. This keeps
//! each step polynomial while still backtracking into every reachable
//! end. Type matches are memoized per `(type, offset)` for one pass.
//!
//! Keeping every end has a cost for list-shaped grammars. A right-recursive
//! type such as `{x:int},{l:list} | {x:int}` matches once per remaining
//! element at every element offset, so a list of n elements takes O(n²)
//! matches per pass. Quantified repetitions keep every count in the same
//! way. Scripts of a few hundred list elements are fine; grammars expecting
//! far longer lists should split them across sentences.
//!
//! In completion mode the matcher also returns *partial* matches: node
//! chains that ran into the end of the text, from which suggestions are
//! computed.

mod terminal;

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument, trace};

use nls_ir::Span;
use nls_pattern::{Item, Placeholder, Quantifier, TypeRef};
use nls_stack::ensure_sufficient_stack;

use crate::config::ParserConfig;
use crate::error::{Expected, NoMatch, ParseError};
use crate::node::{NodeKind, ParsedNode};
use crate::registry::{Alternative, Registry};
use terminal::{scan_literal, scan_number, LiteralScan};

type Nodes = Vec<Rc<ParsedNode>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Parse,
    Complete,
}

#[derive(Clone, Debug)]
struct Candidate {
    end: usize,
    nodes: Nodes,
}

/// Complete matches deduplicated by end offset, plus partial matches.
#[derive(Clone, Debug, Default)]
struct Matches {
    full: Vec<Candidate>,
    ends: FxHashSet<usize>,
    partial: Vec<Nodes>,
}

impl Matches {
    /// Keep the first way of reaching each end.
    fn push(&mut self, end: usize, nodes: Nodes) {
        if self.ends.insert(end) {
            self.full.push(Candidate { end, nodes });
        }
    }
}

#[derive(Debug)]
struct TypeMatch {
    end: usize,
    alternative: Rc<Alternative>,
    children: Nodes,
}

#[derive(Debug, Default)]
struct TypeMatches {
    full: Vec<TypeMatch>,
    partial: Vec<(Rc<Alternative>, Nodes)>,
}

/// Furthest failure seen so far.
#[derive(Debug, Default)]
struct Failure {
    position: usize,
    expected: Vec<Expected>,
    context: Vec<String>,
}

fn concat(prefix: &[Rc<ParsedNode>], rest: &[Rc<ParsedNode>]) -> Nodes {
    let mut nodes = Vec::with_capacity(prefix.len() + rest.len());
    nodes.extend_from_slice(prefix);
    nodes.extend_from_slice(rest);
    nodes
}

struct Matcher<'a> {
    registry: &'a Registry,
    config: &'a ParserConfig,
    text: Rc<str>,
    mode: Mode,
    types: FxHashMap<usize, FxHashMap<Rc<str>, Rc<TypeMatches>>>,
    sentences: FxHashMap<usize, Rc<TypeMatches>>,
    /// Types being matched, with their start offsets, outermost first.
    stack: Vec<(Rc<str>, usize)>,
    failure: Failure,
}

/// Parse `text` as a script of sentences.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub(crate) fn parse(
    registry: &Registry,
    config: &ParserConfig,
    text: &str,
) -> Result<ParsedNode, ParseError> {
    let mut matcher = Matcher::new(registry, config, text, Mode::Parse);
    let (full, _) = matcher.match_script();
    match full {
        Some(nodes) => {
            debug!(sentences = nodes.len(), "parse succeeded");
            Ok(ParsedNode::new(
                &matcher.text,
                Span::from_range(0..text.len()),
                None,
                NodeKind::Script,
                nodes,
            ))
        }
        None => {
            let err = matcher.into_error();
            debug!(position = err.position, "parse failed");
            Err(ParseError::NoMatch(err))
        }
    }
}

/// Every way `text` can be read as complete sentences followed by an
/// incomplete one. Each root is an incomplete [`NodeKind::Script`].
///
/// Fails only if `text` is neither a complete script nor a prefix of one.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub(crate) fn partial_trees(
    registry: &Registry,
    config: &ParserConfig,
    text: &str,
) -> Result<Vec<ParsedNode>, ParseError> {
    let mut matcher = Matcher::new(registry, config, text, Mode::Complete);
    let (complete, partial) = matcher.match_script();
    debug!(
        partial = partial.len(),
        complete = complete.is_some(),
        "partial matching done"
    );
    if partial.is_empty() && complete.is_none() {
        return Err(ParseError::NoMatch(matcher.into_error()));
    }
    let span = Span::from_range(0..text.len());
    Ok(partial
        .into_iter()
        .map(|nodes| {
            ParsedNode::new(&matcher.text, span, None, NodeKind::Script, nodes).incomplete()
        })
        .collect())
}

impl<'a> Matcher<'a> {
    fn new(registry: &'a Registry, config: &'a ParserConfig, text: &str, mode: Mode) -> Self {
        Matcher {
            registry,
            config,
            text: Rc::from(text),
            mode,
            types: FxHashMap::default(),
            sentences: FxHashMap::default(),
            stack: Vec::new(),
            failure: Failure::default(),
        }
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn completing(&self) -> bool {
        self.mode == Mode::Complete
    }

    fn into_error(self) -> NoMatch {
        let position = self.failure.position;
        NoMatch {
            position,
            expected: self.failure.expected,
            found: self.text[position..].chars().next(),
            context: self.failure.context,
        }
    }

    /// Record that `expected` would have been accepted at `position`.
    fn expect(&mut self, position: usize, expected: Expected) {
        if position > self.failure.position || self.failure.expected.is_empty() {
            trace!(position, %expected, "new furthest failure");
            self.failure.position = position;
            self.failure.expected.clear();
            self.failure.context = self.stack.iter().map(|(name, _)| name.to_string()).collect();
        }
        if position == self.failure.position && !self.failure.expected.contains(&expected) {
            self.failure.expected.push(expected);
        }
    }

    fn node(
        &self,
        start: usize,
        end: usize,
        name: Option<Rc<str>>,
        kind: NodeKind,
        children: Nodes,
    ) -> ParsedNode {
        ParsedNode::new(&self.text, Span::from_range(start..end), name, kind, children)
    }

    /// Node for the incomplete tail `start..len`.
    fn partial_node(
        &self,
        start: usize,
        name: Option<Rc<str>>,
        kind: NodeKind,
        children: Nodes,
    ) -> Rc<ParsedNode> {
        Rc::new(self.node(start, self.len(), name, kind, children).incomplete())
    }

    // Script

    /// Whitespace run starting at `pos`: its end and a gap node if non-empty.
    fn gap(&self, pos: usize) -> (usize, Option<Rc<ParsedNode>>) {
        let width: usize = self.text[pos..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if width == 0 {
            (pos, None)
        } else {
            let end = pos + width;
            (end, Some(Rc::new(self.node(pos, end, None, NodeKind::Gap, Vec::new()))))
        }
    }

    /// Sentences separated by whitespace, with optional leading and
    /// trailing whitespace. Returns the preferred complete reading (fewest
    /// sentences first) and, when completing, every partial reading.
    fn match_script(&mut self) -> (Option<Nodes>, Vec<Nodes>) {
        struct Step {
            end: usize,
            nodes: Nodes,
            /// A new sentence may start at `end`.
            separated: bool,
        }

        let len = self.len();
        let (start, leading) = self.gap(0);
        let mut frontier = vec![Step {
            end: start,
            nodes: leading.into_iter().collect(),
            separated: true,
        }];
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut complete = None;
        let mut partial = Vec::new();
        let mut sentence_count = 0;

        loop {
            if complete.is_none() {
                if let Some(step) = frontier.iter().find(|step| step.end == len) {
                    complete = Some(step.nodes.clone());
                    if !self.completing() {
                        return (complete, partial);
                    }
                }
            }
            let more_allowed = self.config.allow_multiple_sentences || sentence_count == 0;
            if !more_allowed || frontier.is_empty() {
                if complete.is_none() {
                    for step in &frontier {
                        self.expect(step.end, Expected::EndOfInput);
                    }
                }
                return (complete, partial);
            }

            let mut next = Vec::new();
            for step in &frontier {
                if !step.separated {
                    if step.end < len {
                        self.expect(step.end, Expected::SentenceBreak);
                    }
                    continue;
                }
                if sentence_count > 0 && step.end < len {
                    self.expect(step.end, Expected::EndOfInput);
                }
                let sentences = self.match_sentences(step.end);
                for (alternative, children) in &sentences.partial {
                    let sentence = self.partial_node(
                        step.end,
                        None,
                        NodeKind::Alternative(Rc::clone(alternative)),
                        children.clone(),
                    );
                    partial.push(concat(&step.nodes, &[sentence]));
                }
                for found in &sentences.full {
                    let (end, gap) = self.gap(found.end);
                    if !seen.insert(end) {
                        continue;
                    }
                    let sentence = Rc::new(self.node(
                        step.end,
                        found.end,
                        None,
                        NodeKind::Alternative(Rc::clone(&found.alternative)),
                        found.children.clone(),
                    ));
                    let mut nodes = concat(&step.nodes, &[sentence]);
                    let separated = gap.is_some();
                    nodes.extend(gap);
                    next.push(Step {
                        end,
                        nodes,
                        separated,
                    });
                }
            }
            frontier = next;
            sentence_count += 1;
        }
    }

    fn match_sentences(&mut self, pos: usize) -> Rc<TypeMatches> {
        if let Some(hit) = self.sentences.get(&pos) {
            return Rc::clone(hit);
        }
        let registry = self.registry;
        let result = Rc::new(self.match_alternatives(registry.sentences(), pos));
        self.sentences.insert(pos, Rc::clone(&result));
        result
    }

    // Types

    fn match_type(&mut self, name: &Rc<str>, pos: usize) -> Rc<TypeMatches> {
        if let Some(hit) = self.types.get(&pos).and_then(|memo| memo.get(name)) {
            return Rc::clone(hit);
        }
        if self.stack.iter().any(|(active, at)| *at == pos && active == name) {
            trace!(r#type = %name, pos, "left recursion cut");
            return Rc::default();
        }
        trace!(r#type = %name, pos, "match type");
        self.stack.push((Rc::clone(name), pos));
        let registry = self.registry;
        let result = ensure_sufficient_stack(|| {
            self.match_alternatives(registry.alternatives(name), pos)
        });
        self.stack.pop();
        let result = Rc::new(result);
        self.types
            .entry(pos)
            .or_default()
            .insert(Rc::clone(name), Rc::clone(&result));
        result
    }

    fn match_alternatives(&mut self, alternatives: &[Rc<Alternative>], pos: usize) -> TypeMatches {
        let mut out = TypeMatches::default();
        let mut ends = FxHashSet::default();
        for alternative in alternatives {
            let matches = self.match_sequence(alternative.pattern().items(), pos);
            for candidate in matches.full {
                if ends.insert(candidate.end) {
                    out.full.push(TypeMatch {
                        end: candidate.end,
                        alternative: Rc::clone(alternative),
                        children: candidate.nodes,
                    });
                }
            }
            for nodes in matches.partial {
                out.partial.push((Rc::clone(alternative), nodes));
            }
        }
        out
    }

    // Patterns

    fn match_sequence(&mut self, items: &[Item], pos: usize) -> Matches {
        let mut frontier = vec![Candidate {
            end: pos,
            nodes: Vec::new(),
        }];
        let mut partial = Vec::new();
        for item in items {
            let mut next = Matches::default();
            for candidate in &frontier {
                let matched = self.match_item(item, candidate.end);
                for nodes in &matched.partial {
                    partial.push(concat(&candidate.nodes, nodes));
                }
                for found in &matched.full {
                    next.push(found.end, concat(&candidate.nodes, &found.nodes));
                }
            }
            frontier = next.full;
            if frontier.is_empty() {
                break;
            }
        }
        let mut out = Matches::default();
        for candidate in frontier {
            out.push(candidate.end, candidate.nodes);
        }
        out.partial = partial;
        out
    }

    fn match_item(&mut self, item: &Item, pos: usize) -> Matches {
        match item {
            Item::Literal(literal) => self.match_literal(&literal.text, pos),
            Item::Placeholder(placeholder) => self.match_placeholder(placeholder, pos),
        }
    }

    fn match_literal(&mut self, literal: &str, pos: usize) -> Matches {
        let mut out = Matches::default();
        let kind = || NodeKind::Literal(Rc::from(literal));
        match scan_literal(&self.text, pos, literal) {
            LiteralScan::Full(end) => {
                out.push(end, vec![Rc::new(self.node(pos, end, None, kind(), Vec::new()))]);
            }
            LiteralScan::Truncated => {
                let len = self.len();
                self.expect(len, Expected::Literal(literal[len - pos..].to_string()));
                if self.completing() {
                    out.partial.push(vec![self.partial_node(pos, None, kind(), Vec::new())]);
                }
            }
            LiteralScan::Mismatch(at) => {
                self.expect(at, Expected::Literal(literal[at - pos..].to_string()));
            }
        }
        out
    }

    fn match_placeholder(&mut self, placeholder: &Placeholder, pos: usize) -> Matches {
        let quantifier = placeholder.quantifier;
        match &placeholder.target {
            TypeRef::CharClass(class) => self.match_run(
                placeholder,
                pos,
                |c| class.contains(c),
                Expected::CharClass(class.source().to_string()),
                NodeKind::Run,
            ),
            TypeRef::Builtin(builtin) => match builtin.single_char() {
                Some(accepts) => {
                    let kind = if quantifier.is_one() {
                        NodeKind::Builtin(*builtin)
                    } else {
                        NodeKind::Run
                    };
                    self.match_run(placeholder, pos, accepts, Expected::Builtin(*builtin), kind)
                }
                None if quantifier.is_one() => self.match_target(placeholder, pos),
                None => self.match_repetition(placeholder, pos),
            },
            TypeRef::Named(_) if quantifier.is_one() => self.match_target(placeholder, pos),
            TypeRef::Named(_) => self.match_repetition(placeholder, pos),
        }
    }

    /// A run of single characters accepted by `accepts`, as many as the
    /// quantifier allows.
    fn match_run(
        &mut self,
        placeholder: &Placeholder,
        pos: usize,
        accepts: impl Fn(char) -> bool,
        expected: Expected,
        kind: NodeKind,
    ) -> Matches {
        let quantifier = placeholder.quantifier;
        let mut ends = Vec::new();
        if quantifier.min == 0 {
            ends.push(pos);
        }
        let mut count = 0;
        let mut end = pos;
        for c in self.text[pos..].chars() {
            if !quantifier.allows_more(count) || !accepts(c) {
                break;
            }
            count += 1;
            end += c.len_utf8();
            if count >= quantifier.min {
                ends.push(end);
            }
        }
        let extendable = quantifier.allows_more(count);
        if extendable {
            self.expect(end, expected);
        }

        let name: Rc<str> = Rc::from(placeholder.name.as_str());
        let mut out = Matches::default();
        for &stop in ends.iter().rev() {
            let node = self.node(pos, stop, Some(Rc::clone(&name)), kind.clone(), Vec::new());
            out.push(stop, vec![Rc::new(node)]);
        }
        if extendable && end == self.len() && self.completing() {
            out.partial.push(vec![self.partial_node(pos, Some(name), kind, Vec::new())]);
        }
        out
    }

    /// One occurrence of a numeric built-in or a registered type.
    fn match_target(&mut self, placeholder: &Placeholder, pos: usize) -> Matches {
        let name: Rc<str> = Rc::from(placeholder.name.as_str());
        let mut out = Matches::default();
        match &placeholder.target {
            TypeRef::Builtin(builtin) => {
                let scan = scan_number(&self.text, pos, *builtin);
                if scan.ends.is_empty() || scan.at_eof {
                    self.expect(scan.reached, Expected::Builtin(*builtin));
                }
                for &end in &scan.ends {
                    let kind = NodeKind::Builtin(*builtin);
                    let node = self.node(pos, end, Some(Rc::clone(&name)), kind, Vec::new());
                    out.push(end, vec![Rc::new(node)]);
                }
                if scan.at_eof && self.completing() {
                    let kind = NodeKind::Builtin(*builtin);
                    out.partial.push(vec![self.partial_node(pos, Some(name), kind, Vec::new())]);
                }
            }
            TypeRef::Named(type_name) => {
                let Some(key) = self.registry.type_key(type_name) else {
                    self.expect(pos, Expected::UndefinedType(type_name.clone()));
                    return out;
                };
                let matches = self.match_type(&key, pos);
                for found in &matches.full {
                    let node = self.node(
                        pos,
                        found.end,
                        Some(Rc::clone(&name)),
                        NodeKind::Alternative(Rc::clone(&found.alternative)),
                        found.children.clone(),
                    );
                    out.push(found.end, vec![Rc::new(node)]);
                }
                for (alternative, children) in &matches.partial {
                    let node = self.partial_node(
                        pos,
                        Some(Rc::clone(&name)),
                        NodeKind::Alternative(Rc::clone(alternative)),
                        children.clone(),
                    );
                    out.partial.push(vec![node]);
                }
            }
            TypeRef::CharClass(_) => {}
        }
        out
    }

    /// A quantified numeric built-in or registered type, wrapped in one
    /// repetition node.
    fn match_repetition(&mut self, placeholder: &Placeholder, pos: usize) -> Matches {
        let quantifier = placeholder.quantifier;
        let name: Rc<str> = Rc::from(placeholder.name.as_str());
        let mut memo = FxHashMap::default();
        let repeated = self.repeat(placeholder, pos, 0, &mut memo);

        let mut out = Matches::default();
        for found in &repeated.full {
            let node = self.node(
                pos,
                found.end,
                Some(Rc::clone(&name)),
                NodeKind::Repetition(quantifier),
                found.nodes.clone(),
            );
            out.push(found.end, vec![Rc::new(node)]);
        }
        for children in &repeated.partial {
            let node = self.partial_node(
                pos,
                Some(Rc::clone(&name)),
                NodeKind::Repetition(quantifier),
                children.clone(),
            );
            out.partial.push(vec![node]);
        }
        out
    }

    /// Repetitions `done + 1..` starting at `pos`, most repetitions first.
    fn repeat(
        &mut self,
        placeholder: &Placeholder,
        pos: usize,
        done: u32,
        memo: &mut FxHashMap<(usize, u32), Rc<Matches>>,
    ) -> Rc<Matches> {
        let quantifier = placeholder.quantifier;
        let key = (pos, repeat_state(quantifier, done));
        if let Some(hit) = memo.get(&key) {
            return Rc::clone(hit);
        }

        let mut out = Matches::default();
        if quantifier.allows_more(done) {
            let config = self.config;
            let separator = if done > 0 {
                config.repetition.separator()
            } else {
                None
            };
            let start = match separator {
                Some(separator) => {
                    let matched = self.match_literal(separator, pos);
                    out.partial.extend(matched.partial);
                    matched.full.into_iter().next()
                }
                None => Some(Candidate {
                    end: pos,
                    nodes: Vec::new(),
                }),
            };
            if let Some(start) = start {
                let unit = self.match_target(placeholder, start.end);
                for nodes in &unit.partial {
                    out.partial.push(concat(&start.nodes, nodes));
                }
                for found in &unit.full {
                    if found.end == pos {
                        continue;
                    }
                    let prefix = concat(&start.nodes, &found.nodes);
                    let rest = ensure_sufficient_stack(|| {
                        self.repeat(placeholder, found.end, done + 1, memo)
                    });
                    for tail in &rest.full {
                        out.push(tail.end, concat(&prefix, &tail.nodes));
                    }
                    for tail in &rest.partial {
                        out.partial.push(concat(&prefix, tail));
                    }
                }
            }
        }
        if done >= quantifier.min {
            out.push(pos, Vec::new());
        }

        let out = Rc::new(out);
        memo.insert(key, Rc::clone(&out));
        out
    }
}

/// Repetition counts that behave identically from here on share a memo
/// entry: with no upper bound, only "below the minimum" and "at least one
/// done" matter.
fn repeat_state(quantifier: Quantifier, done: u32) -> u32 {
    match quantifier.max {
        Some(_) => done,
        None => done.min(quantifier.min.max(1)),
    }
}
