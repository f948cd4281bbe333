use crate::error::{Result, SplitError};
use crate::options::Options;
use crate::parser::parse_stylesheet;
use crate::partition::plan;
use crate::serialize::render_all;
use crate::style::counter::{total_weight, weigh};

/// Split `styles` into sheets that each hold at most `options.max_selectors`
/// selectors (a single rule above the limit gets a sheet of its own).
///
/// Returns at least `options.min_sheets` sheets. When nothing needs splitting
/// the only sheet is `styles` itself.
///
/// # Errors
///
/// [`SplitError::InvalidInput`] when `styles` is empty or whitespace only, or
/// when the options carry a zero bound.
pub fn partition(styles: &str, options: &Options) -> Result<Vec<String>> {
    if styles.trim().is_empty() {
        return Err(SplitError::invalid_input("styles must not be empty"));
    }
    options.validate()?;

    let sheet = parse_stylesheet(styles);
    let weighted = weigh(&sheet, options.media_queries);
    log::debug!(
        "{}: {} constructs, {} selectors counted in {} mode",
        options.source_name(),
        weighted.len(),
        total_weight(&sheet, options.media_queries),
        options.media_queries
    );

    let plan = plan(&weighted, options);
    log::debug!("{}: writing {} sheet(s)", options.source_name(), plan.groups.len());

    Ok(render_all(&sheet, &plan))
}

/// Like [`partition`], for raw bytes such as the contents of a file.
///
/// # Errors
///
/// [`SplitError::InvalidInput`] with "styles must be a string" when the bytes
/// are not UTF-8, plus everything [`partition`] rejects.
pub fn partition_bytes(styles: &[u8], options: &Options) -> Result<Vec<String>> {
    let styles = std::str::from_utf8(styles)
        .map_err(|_| SplitError::invalid_input("styles must be a string"))?;
    partition(styles, options)
}
