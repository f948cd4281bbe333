mod output;

use clap::Parser;
use rayon::prelude::*;
use sakugawa_lib::{partition_bytes, MediaQueries, Options, SplitError, DEFAULT_MAX_SELECTORS};
use std::fs;
use std::path::{Path, PathBuf};

const SAKUGAWA_INTRO: &str = r#"
    Sakugawa - split CSS files for engines with a selector limit
"#;

#[derive(Parser)]
#[command(name = "sakugawa")]
#[command(version, about = "Split CSS files so that each stays under a selector limit")]
struct Args {
    /// Input CSS files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum number of selectors per output file.
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SELECTORS)]
    max_selectors: usize,

    /// Minimum number of output files.
    #[arg(short = 'm', long, default_value_t = 1)]
    min_sheets: usize,

    /// Media query handling: keep, separate or ignore.
    #[arg(short = 'M', long, default_value_t = MediaQueries::Keep)]
    media_queries: MediaQueries,

    /// Inserted between the file name and the sheet number.
    #[arg(short, long, default_value = "_")]
    suffix: String,

    /// Directory for the output files. Defaults to the input's directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log what is being split.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum FileError {
    #[error("failed to read: {0}")]
    Read(#[source] std::io::Error),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    // parse the args given in terminal
    let args: Args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    println!("{}", SAKUGAWA_INTRO);

    let failures = args
        .files
        .par_iter()
        .filter(|input| match split_file(input, &args) {
            Ok(written) => {
                log::info!("{} -> {} file(s)", input.display(), written.len());
                for path in &written {
                    log::debug!("wrote {}", path.display());
                }
                false
            }
            Err(e) => {
                eprintln!("Error splitting {}: {}", input.display(), e);
                true
            }
        })
        .count();

    if failures > 0 {
        std::process::exit(1);
    }
}

fn split_file(input: &Path, args: &Args) -> Result<Vec<PathBuf>, FileError> {
    let styles = fs::read(input).map_err(FileError::Read)?;

    let options = Options::new()
        .with_max_selectors(args.max_selectors)
        .with_min_sheets(args.min_sheets)
        .with_media_queries(args.media_queries)
        .with_filename(input.display().to_string());
    let sheets = partition_bytes(&styles, &options)?;

    let paths = output::sheet_paths(input, args.output_dir.as_deref(), &args.suffix, sheets.len());
    for (path, sheet) in paths.iter().zip(&sheets) {
        fs::write(path, sheet).map_err(|source| FileError::Write {
            path: path.clone(),
            source,
        })?;
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sakugawa", "a.css"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("a.css")]);
        assert_eq!(args.max_selectors, DEFAULT_MAX_SELECTORS);
        assert_eq!(args.min_sheets, 1);
        assert_eq!(args.media_queries, MediaQueries::Keep);
        assert_eq!(args.suffix, "_");
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn test_short_flags() {
        let args =
            Args::try_parse_from(["sakugawa", "-n", "400", "-m", "3", "-M", "separate", "a.css", "b.css"])
                .unwrap();
        assert_eq!(args.max_selectors, 400);
        assert_eq!(args.min_sheets, 3);
        assert_eq!(args.media_queries, MediaQueries::Separate);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_unknown_media_mode_rejected() {
        assert!(Args::try_parse_from(["sakugawa", "-M", "normal", "a.css"]).is_err());
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["sakugawa"]).is_err());
    }
}
