//! Regex engine selection, compilation and probing
//!
//! Automatically chooses between `regex` (fast, linear time) and
//! `fancy-regex` (full features, backtracking) based on pattern analysis,
//! and wraps the result in a [`Pattern`] carrying the iteration flags.

use std::ops::Range;
use std::sync::LazyLock;

use thiserror::Error;

static BACKREFERENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\\[1-9]").expect("BUG: backreference detection pattern is invalid")
});

/// Engine types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineType {
    /// Standard regex crate (linear time guaranteed)
    Regex,
    /// Fancy-regex (supports lookahead, lookbehind, backreferences)
    FancyRegex,
}

impl std::fmt::Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineType::Regex => write!(f, "regex"),
            EngineType::FancyRegex => write!(f, "fancy-regex"),
        }
    }
}

/// Errors raised by the underlying matching engines
#[allow(clippy::result_large_err)]
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid flag '{0}' (supported: g, i, m, s, u)")]
    InvalidFlag(char),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Fancy-regex error: {0}")]
    FancyRegexError(#[from] fancy_regex::Error),
}

/// Features detected in a pattern that require fancy-regex
#[derive(Debug, Default)]
pub struct FancyFeatures {
    pub lookahead: bool,
    pub lookbehind: bool,
    pub backreference: bool,
    pub atomic_group: bool,
}

impl FancyFeatures {
    /// Returns true if any fancy feature is detected
    pub fn needs_fancy(&self) -> bool {
        self.lookahead || self.lookbehind || self.backreference || self.atomic_group
    }

    /// Get a description of why fancy-regex is needed
    pub fn reason(&self) -> Option<String> {
        let mut reasons = Vec::new();
        if self.lookahead {
            reasons.push("lookahead assertion");
        }
        if self.lookbehind {
            reasons.push("lookbehind assertion");
        }
        if self.backreference {
            reasons.push("backreference");
        }
        if self.atomic_group {
            reasons.push("atomic group");
        }

        if reasons.is_empty() {
            None
        } else {
            Some(format!("Pattern uses {}", reasons.join(", ")))
        }
    }
}

/// Detect which engine features are used in a pattern
pub fn detect_fancy_features(pattern: &str) -> FancyFeatures {
    let mut features = FancyFeatures::default();

    // regex_syntax cannot parse lookaround, backreferences or atomic groups,
    // so detection relies on string scanning.
    if pattern.contains("(?=") || pattern.contains("(?!") {
        features.lookahead = true;
    }
    if pattern.contains("(?<=") || pattern.contains("(?<!") {
        features.lookbehind = true;
    }
    if pattern.contains("(?>") {
        features.atomic_group = true;
    }
    if BACKREFERENCE_RE.is_match(pattern) {
        features.backreference = true;
    }

    features
}

/// Select the appropriate engine for a pattern
pub fn select_engine(pattern: &str) -> (EngineType, FancyFeatures) {
    let features = detect_fancy_features(pattern);
    let engine = if features.needs_fancy() {
        EngineType::FancyRegex
    } else {
        EngineType::Regex
    };
    (engine, features)
}

/// Detect whether a pattern contains any capturing groups by walking the regex AST.
/// Falls back to `true` for patterns that `regex_syntax` cannot parse
/// (fancy-regex-only features such as lookahead).
pub fn has_capturing_groups(pattern: &str) -> bool {
    use regex_syntax::ast::parse::Parser as AstParser;
    use regex_syntax::ast::{Ast, GroupKind};

    fn walk(ast: &Ast) -> bool {
        match ast {
            Ast::Group(group) => match &group.kind {
                GroupKind::CaptureIndex(_) | GroupKind::CaptureName { .. } => true,
                GroupKind::NonCapturing(_) => walk(&group.ast),
            },
            Ast::Concat(concat) => concat.asts.iter().any(walk),
            Ast::Alternation(alt) => alt.asts.iter().any(walk),
            Ast::Repetition(rep) => walk(&rep.ast),
            _ => false,
        }
    }

    match AstParser::new().parse(pattern) {
        Ok(ast) => walk(&ast),
        Err(_) => true,
    }
}

/// Byte spans of one successful probe. Slot 0 is the whole match; the
/// remaining slots are capture groups, `None` when a group did not take part.
pub type Spans = Vec<Option<Range<usize>>>;

/// A compiled regex that can use either engine
#[derive(Debug)]
pub enum CompiledRegex {
    Regex(regex::Regex),
    FancyRegex(fancy_regex::Regex),
}

#[allow(clippy::result_large_err)]
impl CompiledRegex {
    /// Compile a pattern with automatic engine selection
    pub fn new(pattern: &str) -> Result<(Self, EngineType), EngineError> {
        let (engine, features) = select_engine(pattern);

        match engine {
            EngineType::Regex => match regex::Regex::new(pattern) {
                Ok(re) => Ok((CompiledRegex::Regex(re), EngineType::Regex)),
                Err(err) => {
                    log::debug!("regex crate rejected {:?} ({}), trying fancy-regex", pattern, err);
                    let re = fancy_regex::Regex::new(pattern)?;
                    Ok((CompiledRegex::FancyRegex(re), EngineType::FancyRegex))
                }
            },
            EngineType::FancyRegex => {
                if let Some(reason) = features.reason() {
                    log::debug!("using fancy-regex for {:?}: {}", pattern, reason);
                }
                let re = fancy_regex::Regex::new(pattern)?;
                Ok((CompiledRegex::FancyRegex(re), EngineType::FancyRegex))
            }
        }
    }

    /// Compile with a specific engine
    pub fn with_engine(pattern: &str, engine: EngineType) -> Result<Self, EngineError> {
        match engine {
            EngineType::Regex => Ok(CompiledRegex::Regex(regex::Regex::new(pattern)?)),
            EngineType::FancyRegex => Ok(CompiledRegex::FancyRegex(fancy_regex::Regex::new(pattern)?)),
        }
    }

    /// Find the first match at or after `pos`, honouring look-behind context
    /// before `pos`. When `captures` is false only slot 0 is reported.
    pub fn probe(&self, text: &str, pos: usize, captures: bool) -> Result<Option<Spans>, EngineError> {
        match self {
            CompiledRegex::Regex(re) if captures => Ok(re.captures_at(text, pos).map(|caps| {
                caps.iter().map(|g| g.map(|m| m.range())).collect()
            })),
            CompiledRegex::Regex(re) => Ok(re.find_at(text, pos).map(|m| vec![Some(m.range())])),
            CompiledRegex::FancyRegex(re) if captures => {
                let caps = re.captures_from_pos(text, pos)?;
                Ok(caps.map(|caps| {
                    (0..caps.len())
                        .map(|i| caps.get(i).map(|m| m.start()..m.end()))
                        .collect()
                }))
            }
            CompiledRegex::FancyRegex(re) => {
                let found = re.find_from_pos(text, pos)?;
                Ok(found.map(|m| vec![Some(m.start()..m.end())]))
            }
        }
    }

    /// Number of groups, including the implicit whole-match group 0
    pub fn captures_len(&self) -> usize {
        match self {
            CompiledRegex::Regex(re) => re.captures_len(),
            CompiledRegex::FancyRegex(re) => re.captures_len(),
        }
    }

    /// Group names in declaration order, slot 0 included
    pub fn capture_names(&self) -> Vec<Option<String>> {
        match self {
            CompiledRegex::Regex(re) => re.capture_names().map(|n| n.map(str::to_string)).collect(),
            CompiledRegex::FancyRegex(re) => re.capture_names().map(|n| n.map(str::to_string)).collect(),
        }
    }

    /// Get the engine type
    pub fn engine_type(&self) -> EngineType {
        match self {
            CompiledRegex::Regex(_) => EngineType::Regex,
            CompiledRegex::FancyRegex(_) => EngineType::FancyRegex,
        }
    }
}

/// Iteration and matching flags, written the JavaScript way (`"gim"`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Repeat until exhausted instead of a single probe
    pub global: bool,
    pub ignore_case: bool,
    /// `^` and `$` match at line boundaries
    pub multi_line: bool,
    /// `.` matches newline
    pub dot_all: bool,
    /// Accepted for compatibility; matching is always Unicode-aware
    pub unicode: bool,
}

impl Flags {
    /// Parse a flag string such as `"g"` or `"gi"`
    pub fn parse(flags: &str) -> Result<Self, EngineError> {
        let mut parsed = Flags::default();
        for c in flags.chars() {
            let slot = match c {
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multi_line,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                _ => return Err(EngineError::InvalidFlag(c)),
            };
            if *slot {
                return Err(EngineError::InvalidFlag(c));
            }
            *slot = true;
        }
        Ok(parsed)
    }

    /// Inline group enabling the matching flags, e.g. `(?im)`, or `""`
    fn inline_prefix(&self) -> String {
        let mut inline = String::new();
        if self.ignore_case {
            inline.push('i');
        }
        if self.multi_line {
            inline.push('m');
        }
        if self.dot_all {
            inline.push('s');
        }
        if inline.is_empty() {
            inline
        } else {
            format!("(?{})", inline)
        }
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (set, c) in [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
        ] {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A compiled pattern together with its iteration mode.
///
/// ```
/// use rexscan::Pattern;
///
/// let words = Pattern::global(r"\w+").unwrap();
/// assert!(words.is_global());
/// assert_eq!(words.captures_len(), 0);
/// ```
#[derive(Debug)]
pub struct Pattern {
    source: String,
    flags: Flags,
    regex: CompiledRegex,
    names: Vec<Option<String>>,
    has_captures: bool,
}

#[allow(clippy::result_large_err)]
impl Pattern {
    /// Compile a single-shot pattern
    pub fn new(source: &str) -> Result<Self, EngineError> {
        Self::compile(source, Flags::default())
    }

    /// Compile a persistent (global) pattern
    pub fn global(source: &str) -> Result<Self, EngineError> {
        Self::compile(
            source,
            Flags {
                global: true,
                ..Flags::default()
            },
        )
    }

    /// Compile with a JavaScript-style flag string
    pub fn with_flags(source: &str, flags: &str) -> Result<Self, EngineError> {
        Self::compile(source, Flags::parse(flags)?)
    }

    /// Compile with already parsed flags
    pub fn compile(source: &str, flags: Flags) -> Result<Self, EngineError> {
        Self::compile_with(source, flags, None)
    }

    /// Compile with parsed flags, optionally forcing an engine
    pub fn compile_with(
        source: &str,
        flags: Flags,
        engine: Option<EngineType>,
    ) -> Result<Self, EngineError> {
        let effective = format!("{}{}", flags.inline_prefix(), source);
        let (regex, engine) = match engine {
            Some(engine) => (CompiledRegex::with_engine(&effective, engine)?, engine),
            None => CompiledRegex::new(&effective)?,
        };
        let names = regex.capture_names();
        let has_captures = has_capturing_groups(&effective);
        log::debug!("compiled {:?} with flags {:?} using {}", source, flags.to_string(), engine);

        Ok(Pattern {
            source: source.to_string(),
            flags,
            regex,
            names,
            has_captures,
        })
    }

    /// The pattern text as given, without inline flags
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_global(&self) -> bool {
        self.flags.global
    }

    pub fn engine_type(&self) -> EngineType {
        self.regex.engine_type()
    }

    /// Number of capture groups, not counting the whole match
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Index of a named group
    pub fn capture_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_deref() == Some(name))
    }

    /// Name of group `index`, if it has one
    pub fn capture_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|n| n.as_deref())
    }

    pub(crate) fn probe(&self, text: &str, pos: usize) -> Result<Option<Spans>, EngineError> {
        let spans = self.regex.probe(text, pos, self.has_captures)?;
        // Patterns probed without captures still report one slot per group.
        Ok(spans.map(|mut spans| {
            spans.resize(self.captures_len() + 1, None);
            spans
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pattern_uses_regex() {
        let (engine, _) = select_engine(r"\d+");
        assert_eq!(engine, EngineType::Regex);
    }

    #[test]
    fn test_lookahead_uses_fancy() {
        let (engine, features) = select_engine(r"foo(?=bar)");
        assert_eq!(engine, EngineType::FancyRegex);
        assert!(features.lookahead);
    }

    #[test]
    fn test_lookbehind_uses_fancy() {
        let (engine, features) = select_engine(r"(?<=foo)bar");
        assert_eq!(engine, EngineType::FancyRegex);
        assert!(features.lookbehind);
    }

    #[test]
    fn test_backreference_uses_fancy() {
        let (engine, features) = select_engine(r"(\w+)\s+\1");
        assert_eq!(engine, EngineType::FancyRegex);
        assert!(features.backreference);
        assert_eq!(features.reason().unwrap(), "Pattern uses backreference");
    }

    #[test]
    fn test_probe_from_position() {
        let (re, engine) = CompiledRegex::new(r"\d+").unwrap();
        assert_eq!(engine, EngineType::Regex);
        assert_eq!(re.probe("a1b22", 2, false).unwrap(), Some(vec![Some(3..5)]));
        assert_eq!(re.probe("a1b22", 5, false).unwrap(), None);
    }

    #[test]
    fn test_probe_keeps_context_before_position() {
        // `^` must not match at a later start position.
        let (re, _) = CompiledRegex::new(r"^a").unwrap();
        assert_eq!(re.probe("aaa", 1, false).unwrap(), None);

        let (re, engine) = CompiledRegex::new(r"(?<=a)b").unwrap();
        assert_eq!(engine, EngineType::FancyRegex);
        assert_eq!(re.probe("ab", 1, false).unwrap(), Some(vec![Some(1..2)]));
    }

    #[test]
    fn test_probe_fancy_captures() {
        let (re, _) = CompiledRegex::new(r"(?=(\w))").unwrap();
        assert_eq!(re.probe("ab", 1, true).unwrap(), Some(vec![Some(1..1), Some(1..2)]));
    }

    #[test]
    fn test_flags_parse() {
        let flags = Flags::parse("gi").unwrap();
        assert!(flags.global);
        assert!(flags.ignore_case);
        assert!(!flags.multi_line);
        assert_eq!(flags.to_string(), "gi");
    }

    #[test]
    fn test_flags_reject_unknown_and_repeated() {
        assert!(matches!(Flags::parse("y"), Err(EngineError::InvalidFlag('y'))));
        assert!(matches!(Flags::parse("gg"), Err(EngineError::InvalidFlag('g'))));
    }

    #[test]
    fn test_pattern_case_insensitive() {
        let re = Pattern::with_flags("abc", "i").unwrap();
        assert!(!re.is_global());
        assert_eq!(re.source(), "abc");
        assert!(re.probe("xABC", 0).unwrap().is_some());
    }

    #[test]
    fn test_pattern_capture_names() {
        let re = Pattern::global(r"(?P<year>\d{4})-(\d{2})").unwrap();
        assert_eq!(re.captures_len(), 2);
        assert_eq!(re.capture_index("year"), Some(1));
        assert_eq!(re.capture_name(2), None);
    }

    #[test]
    fn test_pattern_without_captures_pads_slots() {
        // A non-capturing group is still reported as a single slot.
        let re = Pattern::global(r"(?:ab)+").unwrap();
        assert_eq!(re.probe("xabab", 0).unwrap(), Some(vec![Some(1..5)]));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Pattern::global(r"(\d+").is_err());
    }
}
