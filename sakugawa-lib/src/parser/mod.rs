//! Shallow stylesheet tokenizer on top of `cssparser`.
//!
//! Only the top-level structure is parsed: where each rule starts and ends, the
//! selector list of each rule, and the rules nested in `@media` blocks.
//! Declaration blocks are never looked into, and every construct keeps the
//! exact source span the tokenizer reports for it.

mod rules;

pub use rules::{parse_stylesheet, split_selectors};
