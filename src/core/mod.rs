//! Core matching machinery
//!
//! The engine layer compiles patterns; the cursor, substitution and
//! splitting are built on top of it.

pub mod engine;
pub mod replace;
pub mod scan;
pub mod split;
pub mod template;

// Re-export commonly used types
pub use engine::{CompiledRegex, EngineError, EngineType, Flags, Pattern};
pub use replace::{replace, replace_counted, replace_template};
pub use scan::{scan, CursorState, MatchRecord, Scan, ScanError};
pub use split::{split, split_fragments};
pub use template::expand;
