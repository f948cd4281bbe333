//! The shallow stylesheet model produced by the tokenizer.
//!
//! Every piece borrows from the source text. Each construct keeps the whitespace
//! and comments that precede it (`leading`), so writing all constructs back in
//! order followed by [`Stylesheet::trailing`] yields the input unchanged.

use std::fmt;

/// A parsed stylesheet: top-level constructs in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet<'a> {
    pub constructs: Vec<Construct<'a>>,
    /// Whitespace and comments after the last construct.
    pub trailing: &'a str,
    /// `"\r\n"` when the source uses it, `"\n"` otherwise.
    pub line_ending: &'static str,
}

/// One top-level item of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct<'a> {
    /// A selector list with its declaration block, or opaque text.
    Rule(SelectorRule<'a>),
    Media(MediaBlock<'a>),
    /// The `@charset` directive, repeated at the top of every output sheet.
    Global(GlobalAtRule<'a>),
}

/// `selector, selector { declarations }`.
///
/// A rule with no selectors is opaque: an unknown at-rule or text the tokenizer
/// could not make sense of. It is written back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRule<'a> {
    pub leading: &'a str,
    pub text: &'a str,
    /// Trimmed, split on top-level commas.
    pub selectors: Vec<&'a str>,
}

/// `@media condition { rules }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlock<'a> {
    pub leading: &'a str,
    /// Everything from `@media` up to and including `{`.
    pub open: &'a str,
    pub condition: &'a str,
    pub rules: Vec<SelectorRule<'a>>,
    /// Trivia after the last inner rule plus the closing `}`.
    pub close: &'a str,
}

/// `@charset "...";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalAtRule<'a> {
    pub leading: &'a str,
    pub text: &'a str,
}

impl<'a> Stylesheet<'a> {
    /// The preserved global at-rule, if the source has one.
    pub fn global(&self) -> Option<&GlobalAtRule<'a>> {
        self.constructs.iter().find_map(|construct| match construct {
            Construct::Global(global) => Some(global),
            _ => None,
        })
    }
}

impl SelectorRule<'_> {
    pub fn is_opaque(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for construct in &self.constructs {
            write!(f, "{}", construct)?;
        }
        f.write_str(self.trailing)
    }
}

impl fmt::Display for Construct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Rule(rule) => write!(f, "{}", rule),
            Construct::Media(media) => {
                write!(f, "{}{}", media.leading, media.open)?;
                for rule in &media.rules {
                    write!(f, "{}", rule)?;
                }
                f.write_str(media.close)
            }
            Construct::Global(global) => write!(f, "{}{}", global.leading, global.text),
        }
    }
}

impl fmt::Display for SelectorRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.leading, self.text)
    }
}
