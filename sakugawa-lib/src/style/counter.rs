//! Selector weights: how much of the budget each construct consumes.

use crate::options::MediaQueries;
use crate::sheet::{Construct, SelectorRule, Stylesheet};

/// A construct together with the budget it consumes under one counting mode.
#[derive(Debug, Clone, Copy)]
pub struct WeightedConstruct<'s, 'a> {
    /// Position of the construct in [`Stylesheet::constructs`].
    pub index: usize,
    pub construct: &'s Construct<'a>,
    pub weight: usize,
    /// Must be repeated at the top of every output sheet.
    pub global: bool,
}

/// Number of selectors in a rule. Opaque rules still count as one.
pub fn rule_weight(rule: &SelectorRule<'_>) -> usize {
    rule.selectors.len().max(1)
}

/// Weight of a rule nested in a media block.
pub fn media_rule_weight(rule: &SelectorRule<'_>, mode: MediaQueries) -> usize {
    match mode {
        MediaQueries::Ignore => 0,
        MediaQueries::Keep | MediaQueries::Separate => rule_weight(rule),
    }
}

pub fn construct_weight(construct: &Construct<'_>, mode: MediaQueries) -> usize {
    match construct {
        Construct::Rule(rule) => rule_weight(rule),
        Construct::Media(media) => media
            .rules
            .iter()
            .map(|rule| media_rule_weight(rule, mode))
            .sum(),
        Construct::Global(_) => 0,
    }
}

/// Annotate every construct of `sheet` with its weight.
pub fn weigh<'s, 'a>(sheet: &'s Stylesheet<'a>, mode: MediaQueries) -> Vec<WeightedConstruct<'s, 'a>> {
    sheet
        .constructs
        .iter()
        .enumerate()
        .map(|(index, construct)| WeightedConstruct {
            index,
            construct,
            weight: construct_weight(construct, mode),
            global: matches!(construct, Construct::Global(_)),
        })
        .collect()
}

/// Total weight of a stylesheet under `mode`.
pub fn total_weight(sheet: &Stylesheet<'_>, mode: MediaQueries) -> usize {
    sheet
        .constructs
        .iter()
        .map(|construct| construct_weight(construct, mode))
        .sum()
}
