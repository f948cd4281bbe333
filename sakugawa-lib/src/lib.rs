//! Split one stylesheet into several sheets that each stay under a selector budget.
//!
//! Some legacy rendering engines silently drop every rule past a fixed number of
//! selectors per file. [`partition`] cuts a stylesheet into an ordered list of
//! self-contained sheets whose concatenation behaves like the original.
//!
//! ```
//! use sakugawa_lib::{partition, Options};
//!
//! let css = "a, b { color: red; }\np { margin: 0; }";
//! let sheets = partition(css, &Options::default().with_max_selectors(2)).unwrap();
//! assert_eq!(sheets, vec!["a, b { color: red; }\n", "p { margin: 0; }"]);
//! ```

pub mod error;
pub mod options;
pub mod parser;
pub mod partition;
pub mod serialize;
pub mod sheet;
pub mod split;
pub mod style;

pub use error::{Result, SplitError};
pub use options::{MediaQueries, Options, DEFAULT_MAX_SELECTORS};
pub use split::{partition, partition_bytes};
