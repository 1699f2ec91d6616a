//! Match cursor
//!
//! Drives a [`Pattern`] over a subject string and yields every match
//! together with the offsets needed to stitch the untouched text back
//! together. Zero-length matches are stepped over so iteration always ends.

use std::iter::FusedIterator;
use std::ops::Range;

use thiserror::Error;

use super::engine::{EngineError, Pattern, Spans};

/// Errors that end a scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// The engine reported a match beyond the subject; never recovered.
    #[error("unreachable: cursor offset {offset} exceeds subject length {len}")]
    Unreachable { offset: usize, len: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One successful match.
///
/// Offsets are byte offsets into the subject and always satisfy
/// `prev_last_index <= start_index <= index <= last_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<'t> {
    subject: &'t str,
    spans: Spans,
    /// The whole matched text
    pub matched: &'t str,
    /// One entry per capture group, `None` if the group did not participate
    pub captures: Vec<Option<&'t str>>,
    /// Start of the match
    pub index: usize,
    /// Cursor position before this attempt: end of the previous match, or 0
    pub prev_last_index: usize,
    /// Position actually probed, past `prev_last_index` after an empty match
    pub start_index: usize,
    /// End of the match
    pub last_index: usize,
}

impl<'t> MatchRecord<'t> {
    fn new(
        subject: &'t str,
        whole: Range<usize>,
        spans: Spans,
        prev_last_index: usize,
        start_index: usize,
    ) -> Self {
        let captures = spans[1..]
            .iter()
            .map(|span| span.clone().map(|r| &subject[r]))
            .collect();

        MatchRecord {
            subject,
            matched: &subject[whole.clone()],
            captures,
            index: whole.start,
            prev_last_index,
            start_index,
            last_index: whole.end,
            spans,
        }
    }

    pub fn as_str(&self) -> &'t str {
        self.matched
    }

    /// Group `i`, where 0 is the whole match
    pub fn get(&self, i: usize) -> Option<&'t str> {
        match i {
            0 => Some(self.matched),
            _ => self.captures.get(i - 1).copied().flatten(),
        }
    }

    /// Byte range of group `i`, where 0 is the whole match
    pub fn group_range(&self, i: usize) -> Option<Range<usize>> {
        self.spans.get(i).cloned().flatten()
    }

    pub fn range(&self) -> Range<usize> {
        self.index..self.last_index
    }

    pub fn is_empty(&self) -> bool {
        self.index == self.last_index
    }

    pub fn subject(&self) -> &'t str {
        self.subject
    }

    /// Subject text before the match
    pub fn before(&self) -> &'t str {
        &self.subject[..self.index]
    }

    /// Subject text after the match
    pub fn after(&self) -> &'t str {
        &self.subject[self.last_index..]
    }

    /// Untouched text between the previous match and this one
    pub fn gap(&self) -> &'t str {
        &self.subject[self.prev_last_index..self.index]
    }
}

/// Where a cursor stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    /// Offset to resume from; after iteration, the end of the last match
    pub last_index: usize,
    /// Start of the most recent match, `None` before the first match and
    /// once the subject is exhausted
    pub index: Option<usize>,
}

/// Lazy iterator over the matches of a pattern in a subject.
///
/// ```
/// use rexscan::{scan, Pattern};
///
/// let words = Pattern::global(r"\w+").unwrap();
/// let mut cursor = scan(&words, "abc def ghi");
/// let found: Vec<_> = cursor.by_ref().map(|m| m.unwrap().index).collect();
/// assert_eq!(found, [0, 4, 8]);
/// assert_eq!(cursor.state().last_index, 11);
/// assert_eq!(cursor.state().index, None);
/// ```
#[derive(Debug)]
pub struct Scan<'p, 't> {
    pattern: &'p Pattern,
    subject: &'t str,
    global: bool,
    state: CursorState,
    step_over: bool,
    done: bool,
}

/// Start scanning `subject` with `pattern`
pub fn scan<'p, 't>(pattern: &'p Pattern, subject: &'t str) -> Scan<'p, 't> {
    Scan::new(pattern, subject, pattern.is_global())
}

impl Pattern {
    /// Method form of [`scan`]
    pub fn scan<'p, 't>(&'p self, subject: &'t str) -> Scan<'p, 't> {
        scan(self, subject)
    }
}

impl<'p, 't> Scan<'p, 't> {
    pub(crate) fn new(pattern: &'p Pattern, subject: &'t str, global: bool) -> Self {
        Scan {
            pattern,
            subject,
            global,
            state: CursorState::default(),
            step_over: false,
            done: false,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    pub fn subject(&self) -> &'t str {
        self.subject
    }

    /// Move the resume offset back to an earlier boundary.
    pub(crate) fn rewind(&mut self, offset: usize) {
        self.state.last_index = offset;
    }

    fn finish(&mut self) -> Option<Result<MatchRecord<'t>, ScanError>> {
        self.done = true;
        None
    }

    fn fail(&mut self, err: ScanError) -> Option<Result<MatchRecord<'t>, ScanError>> {
        log::trace!("scan aborted: {}", err);
        self.done = true;
        Some(Err(err))
    }

    /// Width of one step past an empty match at `offset`: one character, or
    /// one byte at the end of the subject.
    fn unit_at(&self, offset: usize) -> usize {
        self.subject[offset..].chars().next().map_or(1, char::len_utf8)
    }

    fn next_single(&mut self) -> Option<Result<MatchRecord<'t>, ScanError>> {
        self.done = true;
        match self.pattern.probe(self.subject, 0) {
            Ok(Some(spans)) => match self.check(spans) {
                Ok((whole, spans)) => {
                    let record = MatchRecord::new(self.subject, whole, spans, 0, 0);
                    self.state.index = Some(record.index);
                    self.state.last_index = record.last_index;
                    Some(Ok(record))
                }
                Err(err) => self.fail(err),
            },
            Ok(None) => None,
            Err(err) => self.fail(err.into()),
        }
    }

    fn next_global(&mut self) -> Option<Result<MatchRecord<'t>, ScanError>> {
        let len = self.subject.len();
        let prev_last_index = self.state.last_index;
        if prev_last_index > len {
            return self.fail(ScanError::Unreachable {
                offset: prev_last_index,
                len,
            });
        }

        let start_index = if self.step_over {
            prev_last_index + self.unit_at(prev_last_index)
        } else {
            prev_last_index
        };
        if start_index > len {
            // Stepped past a trailing empty match.
            log::trace!("scan exhausted at {}", start_index);
            self.state.index = None;
            return self.finish();
        }

        match self.pattern.probe(self.subject, start_index) {
            Ok(Some(spans)) => match self.check(spans) {
                Ok((whole, spans)) => {
                    let record =
                        MatchRecord::new(self.subject, whole, spans, prev_last_index, start_index);
                    log::trace!("probe at {} matched {:?}", start_index, record.range());
                    self.state.index = Some(record.index);
                    self.state.last_index = record.last_index;
                    self.step_over = record.is_empty();
                    Some(Ok(record))
                }
                Err(err) => self.fail(err),
            },
            Ok(None) => {
                log::trace!("probe at {} found nothing", start_index);
                self.state.index = None;
                self.finish()
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Whole-match range of `spans`, rejected if it runs past the subject.
    fn check(&self, spans: Spans) -> Result<(Range<usize>, Spans), ScanError> {
        let len = self.subject.len();
        match spans.first().cloned().flatten() {
            Some(whole) if whole.end <= len => Ok((whole, spans)),
            Some(whole) => Err(ScanError::Unreachable {
                offset: whole.end,
                len,
            }),
            None => Err(ScanError::Unreachable { offset: len + 1, len }),
        }
    }
}

impl<'t> Iterator for Scan<'_, 't> {
    type Item = Result<MatchRecord<'t>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.global {
            self.next_global()
        } else {
            self.next_single()
        }
    }
}

impl FusedIterator for Scan<'_, '_> {}
