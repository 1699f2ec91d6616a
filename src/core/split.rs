//! Bounded splitting on top of the match cursor

use super::engine::Pattern;
use super::scan::{MatchRecord, Scan, ScanError};

/// Split `subject` around the matches of `pattern`.
///
/// Fragments are always `Some`; captured groups of each match are inserted
/// after the fragment preceding it, `None` for groups that did not take
/// part. `limit` caps the number of fragments (captures are not counted);
/// `Some(0)` and `None` both mean no cap. The pattern is always iterated
/// globally.
///
/// ```
/// use rexscan::{split, Pattern};
///
/// let spaces = Pattern::global(r"\s+").unwrap();
/// assert_eq!(split("abc def ghi", &spaces, Some(2)).unwrap(), [Some("abc"), Some("def ghi")]);
/// ```
pub fn split<'t>(
    subject: &'t str,
    pattern: &Pattern,
    limit: Option<usize>,
) -> Result<Vec<Option<&'t str>>, ScanError> {
    let mut pieces = Vec::new();
    let rest = split_with(subject, pattern, limit, |record| {
        pieces.push(Some(record.gap()));
        pieces.extend(record.captures.iter().copied());
    })?;
    pieces.push(Some(rest));
    Ok(pieces)
}

/// Like [`split`], leaving out captured groups
pub fn split_fragments<'t>(
    subject: &'t str,
    pattern: &Pattern,
    limit: Option<usize>,
) -> Result<Vec<&'t str>, ScanError> {
    let mut fragments = Vec::new();
    let rest = split_with(subject, pattern, limit, |record| fragments.push(record.gap()))?;
    fragments.push(rest);
    Ok(fragments)
}

/// Walk the split boundaries, handing each one to `emit`, and return the
/// trailing fragment.
fn split_with<'t, F>(
    subject: &'t str,
    pattern: &Pattern,
    limit: Option<usize>,
    mut emit: F,
) -> Result<&'t str, ScanError>
where
    F: FnMut(&MatchRecord<'t>),
{
    let limit = limit.filter(|&n| n > 0);
    if limit == Some(1) {
        return Ok(subject);
    }

    let mut cursor = Scan::new(pattern, subject, true);
    let mut count = 0;

    while let Some(record) = cursor.next() {
        let record = record?;
        if record.is_empty() {
            if record.index == 0 {
                continue;
            }
            if record.index >= subject.len() {
                // A trailing empty match ends at the previous boundary.
                cursor.rewind(record.prev_last_index);
                break;
            }
        }

        emit(&record);
        count += 1;
        if limit.is_some_and(|limit| count + 1 >= limit) {
            break;
        }
    }

    let rest = &subject[cursor.state().last_index..];
    log::trace!("split into {} fragment(s)", count + 1);
    Ok(rest)
}
