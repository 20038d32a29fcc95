//! Stack safety for recursive grammar matching.
//!
//! Registered types may reference each other (`filter-size` refers to
//! `units`, a list type refers to itself), so both the matcher and the
//! evaluator recurse once per nesting level of the parse tree. Long
//! scripts with deeply nested types would otherwise overflow the default
//! thread stack.
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: plain call, the runtime owns the stack.
//!
//! ```text
//! fn match_type(&mut self, name: &str, pos: usize) -> Rc<TypeMatches> {
//!     ensure_sufficient_stack(|| self.match_type_uncached(name, pos))
//! }
//! ```

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
