//! Where the split sheets of one input file are written.

use std::path::{Path, PathBuf};

/// Paths for `count` sheets split from `input`: `dir/name<suffix>1.css`,
/// `dir/name<suffix>2.css`, and so on. `dir` defaults to the input's own
/// directory.
pub fn sheet_paths(input: &Path, output_dir: Option<&Path>, suffix: &str, count: usize) -> Vec<PathBuf> {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "styles".to_string());
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "css".to_string());

    (1..=count)
        .map(|n| dir.join(format!("{}{}{}.{}", stem, suffix, n, extension)))
        .collect()
}
