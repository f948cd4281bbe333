//! Sheet boundaries.
//!
//! Constructs are turned into placement [`Unit`]s, split into one or two
//! streams depending on the media query mode, and each stream is cut greedily
//! against the selector budget. When the caller asks for more sheets than the
//! budget alone produces, every stream is cut again with the tightest cap
//! that still yields its share of the requested sheets.

use crate::options::{MediaQueries, Options};
use crate::sheet::Construct;
use crate::style::counter::{media_rule_weight, WeightedConstruct};

/// The smallest piece the partitioner can move between sheets.
///
/// Units order by source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Unit {
    /// Index into the stylesheet's constructs.
    pub construct: usize,
    /// Rule index inside a media block placed rule by rule.
    pub inner: Option<usize>,
    pub weight: usize,
}

/// Units assigned to one output sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputGroup {
    pub units: Vec<Unit>,
    pub weight: usize,
    /// Write the global at-rule before anything else.
    pub prefix_global: bool,
}

/// Result of partitioning: the groups in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub groups: Vec<OutputGroup>,
    /// Group holding the first unit in source order. It is written with the
    /// source's own head: the trivia and charset exactly as they appear.
    pub head: usize,
    /// Group holding the last unit in source order. The trivia at the end of
    /// the source goes there.
    pub tail: usize,
}

/// Partition weighted constructs into output groups.
pub fn plan(weighted: &[WeightedConstruct<'_, '_>], options: &Options) -> SplitPlan {
    let prefix_global = weighted.iter().any(|w| w.global);
    let streams = streams(weighted, options.media_queries);

    for unit in streams.iter().flatten() {
        if unit.weight > options.max_selectors {
            log::warn!(
                "{}: construct #{} has {} selectors, more than the limit of {}; it gets a sheet of its own",
                options.source_name(),
                unit.construct,
                unit.weight,
                options.max_selectors
            );
        }
    }

    let naive: Vec<Vec<OutputGroup>> = streams
        .iter()
        .map(|units| accumulate(units, options.max_selectors))
        .collect();
    let naive_counts: Vec<usize> = naive.iter().map(Vec::len).collect();
    let naive_total: usize = naive_counts.iter().sum();

    log::debug!(
        "{}: {} stream(s), naive sheet counts {:?}, min sheets {}",
        options.source_name(),
        streams.len(),
        naive_counts,
        options.min_sheets
    );

    let mut groups: Vec<OutputGroup> = if naive_total == 0 {
        vec![OutputGroup::default(); options.min_sheets]
    } else if options.min_sheets <= naive_total {
        naive.into_iter().flatten().collect()
    } else {
        apportion(&naive_counts, options.min_sheets)
            .into_iter()
            .zip(&streams)
            .flat_map(|(target, units)| rebalance(units, target, options.max_selectors))
            .collect()
    };

    for group in &mut groups {
        group.prefix_global = prefix_global;
    }

    let holding = |unit: Option<&Unit>| {
        unit.and_then(|unit| groups.iter().position(|group| group.units.contains(unit)))
            .unwrap_or(0)
    };
    let head = holding(streams.iter().flatten().min());
    let tail = holding(streams.iter().flatten().max());

    SplitPlan { groups, head, tail }
}

/// Flatten constructs into placement units, one stream per independent run of
/// sheets. Media blocks are placed rule by rule unless their rules are ignored.
fn streams(weighted: &[WeightedConstruct<'_, '_>], mode: MediaQueries) -> Vec<Vec<Unit>> {
    let mut normal = Vec::new();
    let mut media = Vec::new();

    for w in weighted {
        match w.construct {
            Construct::Global(_) => {}
            Construct::Rule(_) => normal.push(Unit {
                construct: w.index,
                inner: None,
                weight: w.weight,
            }),
            Construct::Media(block) => {
                let stream = if mode == MediaQueries::Separate {
                    &mut media
                } else {
                    &mut normal
                };
                if mode == MediaQueries::Ignore || block.rules.is_empty() {
                    stream.push(Unit {
                        construct: w.index,
                        inner: None,
                        weight: w.weight,
                    });
                } else {
                    stream.extend(block.rules.iter().enumerate().map(|(inner, rule)| Unit {
                        construct: w.index,
                        inner: Some(inner),
                        weight: media_rule_weight(rule, mode),
                    }));
                }
            }
        }
    }

    if mode == MediaQueries::Separate {
        vec![normal, media]
    } else {
        vec![normal]
    }
}

/// Greedy accumulation: keep adding units to the current group until the next
/// one would push it over `cap`. A unit heavier than `cap` ends up alone.
pub fn accumulate(units: &[Unit], cap: usize) -> Vec<OutputGroup> {
    units.iter().fold(Vec::new(), |mut groups: Vec<OutputGroup>, unit| {
        match groups.last_mut() {
            Some(group) if group.weight + unit.weight <= cap => {
                group.units.push(*unit);
                group.weight += unit.weight;
            }
            _ => groups.push(OutputGroup {
                units: vec![*unit],
                weight: unit.weight,
                prefix_global: false,
            }),
        }
        groups
    })
}

/// Cut `units` into exactly `target` groups.
///
/// The cap starts at `ceil(total / target)` and grows until greedy
/// accumulation needs no more than `target` groups, but never past
/// `max_selectors`. Earlier groups are the fuller ones. Streams with too few
/// units are padded with empty groups.
pub fn rebalance(units: &[Unit], target: usize, max_selectors: usize) -> Vec<OutputGroup> {
    if target == 0 {
        return Vec::new();
    }

    let total: usize = units.iter().map(|unit| unit.weight).sum();
    let mut high = max_selectors.max(1);
    let mut low = total.div_ceil(target).clamp(1, high);
    while low < high {
        let mid = low + (high - low) / 2;
        if accumulate(units, mid).len() <= target {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    let mut groups = accumulate(units, low);
    log::trace!("rebalanced {} units into {} groups with cap {}", units.len(), groups.len(), low);
    let len = groups.len().max(target);
    groups.resize_with(len, OutputGroup::default);
    groups
}

/// Share `target` sheets between streams in proportion to their naive counts.
/// The first stream takes the rounding remainder.
fn apportion(naive_counts: &[usize], target: usize) -> Vec<usize> {
    let naive_total: usize = naive_counts.iter().sum();
    let mut shares: Vec<usize> = naive_counts
        .iter()
        .map(|&count| target * count / naive_total)
        .collect();
    let assigned: usize = shares.iter().sum();
    if let Some(first) = shares.first_mut() {
        *first += target - assigned;
    }
    shares
}
