//! Turn output groups back into stylesheet text.

use crate::partition::{OutputGroup, SplitPlan};
use crate::sheet::{Construct, MediaBlock, Stylesheet};

/// Render every group of `plan`, in order.
pub fn render_all(sheet: &Stylesheet<'_>, plan: &SplitPlan) -> Vec<String> {
    plan.groups
        .iter()
        .enumerate()
        .map(|(index, group)| render(sheet, group, index == plan.head, index == plan.tail))
        .collect()
}

/// Render one group.
///
/// Constructs are written with their original text. Consecutive rules of the
/// same media block are wrapped in a single copy of that block.
///
/// The head group starts exactly like the source, comments before the charset
/// included. Every other group drops its leading whitespace and, when the
/// source has a charset, starts with it followed by the line separator.
pub fn render(sheet: &Stylesheet<'_>, group: &OutputGroup, holds_head: bool, holds_tail: bool) -> String {
    let mut body = String::new();
    let mut open: Option<(usize, &MediaBlock<'_>)> = None;

    for unit in &group.units {
        let construct = &sheet.constructs[unit.construct];
        let same_block = unit.inner.is_some()
            && matches!(open, Some((block_index, _)) if block_index == unit.construct);
        if !same_block {
            if let Some((_, block)) = open.take() {
                body.push_str(block.close);
            }
        }

        match (construct, unit.inner) {
            (Construct::Media(block), Some(inner)) => {
                if open.is_none() {
                    body.push_str(block.leading);
                    body.push_str(block.open);
                    open = Some((unit.construct, block));
                }
                let rule = &block.rules[inner];
                body.push_str(rule.leading);
                body.push_str(rule.text);
            }
            _ => body.push_str(&construct.to_string()),
        }
    }
    if let Some((_, block)) = open {
        body.push_str(block.close);
    }

    if holds_tail {
        body.push_str(sheet.trailing);
    } else if !group.units.is_empty() {
        body.push_str(sheet.line_ending);
    }

    match (sheet.global().filter(|_| group.prefix_global), holds_head) {
        (Some(global), true) => format!("{}{}{}", global.leading, global.text, body),
        (Some(global), false) => format!(
            "{}{}{}",
            global.text,
            sheet.line_ending,
            body.trim_start()
        ),
        (None, true) => body,
        (None, false) => body.trim_start().to_string(),
    }
}
