//! rexscan - regex match iteration with explicit cursor boundaries
//!
//! [`scan`] walks every match of a [`Pattern`] over a subject and reports,
//! for each one, where the previous match ended, where the probe started and
//! where the match lies. Zero-length matches are stepped over, so iteration
//! always terminates. [`replace`] and [`split`] are built on that cursor.
//!
//! ```
//! use rexscan::{replace, scan, split, Pattern};
//!
//! let words = Pattern::global(r"\w+").unwrap();
//! let starts: Vec<_> = scan(&words, "abc def").map(|m| m.unwrap().index).collect();
//! assert_eq!(starts, [0, 4]);
//!
//! assert_eq!(replace("abc def", &words, |m| m.as_str().to_uppercase()).unwrap(), "ABC DEF");
//!
//! let gaps = Pattern::global(r"\s+").unwrap();
//! assert_eq!(split("abc def", &gaps, None).unwrap(), [Some("abc"), Some("def")]);
//! ```

pub mod core;
pub mod output;

pub use crate::core::{
    expand, replace, replace_counted, replace_template, scan, split, split_fragments,
    CursorState, EngineError, EngineType, Flags, MatchRecord, Pattern, Scan, ScanError,
};
