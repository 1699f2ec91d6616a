//! Substitution on top of the match cursor
//!
//! Unmatched spans are copied verbatim, each match is replaced by whatever
//! the caller produces for its [`MatchRecord`].

use std::borrow::Cow;

use super::engine::Pattern;
use super::scan::{scan, MatchRecord, ScanError};
use super::template::expand;

/// Replace every match of `pattern` in `subject` with the output of
/// `replacement`, called once per match from left to right.
///
/// Returns the subject itself, borrowed, when nothing matched.
///
/// ```
/// use rexscan::{replace, Pattern};
///
/// let words = Pattern::global(r"\w+").unwrap();
/// let upper = replace("abc def ghi", &words, |m| m.as_str().to_uppercase()).unwrap();
/// assert_eq!(upper, "ABC DEF GHI");
/// ```
pub fn replace<'t, F>(subject: &'t str, pattern: &Pattern, replacement: F) -> Result<Cow<'t, str>, ScanError>
where
    F: FnMut(&MatchRecord<'t>) -> String,
{
    replace_counted(subject, pattern, replacement).map(|(result, _)| result)
}

/// Like [`replace`], also reporting how many matches were replaced
pub fn replace_counted<'t, F>(
    subject: &'t str,
    pattern: &Pattern,
    mut replacement: F,
) -> Result<(Cow<'t, str>, usize), ScanError>
where
    F: FnMut(&MatchRecord<'t>) -> String,
{
    let mut result = String::new();
    let mut count = 0;
    let mut cursor = scan(pattern, subject);

    for record in cursor.by_ref() {
        let record = record?;
        result.push_str(record.gap());
        result.push_str(&replacement(&record));
        count += 1;
    }

    let state = cursor.state();
    if result.is_empty() && state.last_index == 0 {
        return Ok((Cow::Borrowed(subject), count));
    }

    result.push_str(&subject[state.last_index..]);
    log::trace!("replaced {} match(es)", count);
    Ok((Cow::Owned(result), count))
}

/// Replace every match with an expanded template (`$1`, `${name}`, `$&`, ...)
pub fn replace_template<'t>(
    subject: &'t str,
    pattern: &Pattern,
    template: &str,
) -> Result<Cow<'t, str>, ScanError> {
    replace(subject, pattern, |record| expand(template, record, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "abc def ghi";

    fn marker(pattern: &Pattern) -> String {
        replace(TARGET, pattern, |_| ":::".to_string()).unwrap().into_owned()
    }

    #[test]
    fn test_single_shot_replaces_first() {
        let re = Pattern::new(r"\w+").unwrap();
        let result = replace(TARGET, &re, |m| m.as_str().to_uppercase()).unwrap();
        assert_eq!(result, "ABC def ghi");
    }

    #[test]
    fn test_global_uppercase() {
        let re = Pattern::global(r"\w+").unwrap();
        let result = replace(TARGET, &re, |m| m.as_str().to_uppercase()).unwrap();
        assert_eq!(result, "ABC DEF GHI");
    }

    #[test]
    fn test_zero_length_anchors() {
        assert_eq!(marker(&Pattern::global("^").unwrap()), ":::abc def ghi");
        assert_eq!(marker(&Pattern::global(r"\b").unwrap()), ":::abc::: :::def::: :::ghi:::");
        assert_eq!(marker(&Pattern::global("$").unwrap()), "abc def ghi:::");
        assert_eq!(
            marker(&Pattern::global(r"^|\b|$").unwrap()),
            ":::abc::: :::def::: :::ghi:::"
        );
    }

    #[test]
    fn test_lookahead_called_in_order() {
        let re = Pattern::global(r"(?=\w+)").unwrap();
        let mut count = 0;
        let result = replace(TARGET, &re, |_| {
            count += 1;
            count.to_string()
        })
        .unwrap();
        assert_eq!(result, "1a2b3c 4d5e6f 7g8h9i");
    }

    #[test]
    fn test_no_match_borrows_subject() {
        let re = Pattern::global("xxx").unwrap();
        let result = replace(TARGET, &re, |_| ":::".to_string()).unwrap();
        assert!(matches!(result, Cow::Borrowed(TARGET)));
    }

    #[test]
    fn test_counted() {
        let re = Pattern::global(r"\d+").unwrap();
        let (result, count) = replace_counted("a1b2c3", &re, |_| "NUM".to_string()).unwrap();
        assert_eq!(result, "aNUMbNUMcNUM");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_template_with_captures() {
        let re = Pattern::global(r"(\d+)-(\d+)").unwrap();
        assert_eq!(replace_template("Call 123-456", &re, "$2-$1").unwrap(), "Call 456-123");
    }

    #[test]
    fn test_template_with_lookahead_capture() {
        let re = Pattern::global(r"(\d+)(?=USD|EUR)").unwrap();
        assert_eq!(
            replace_template("price: 100USD, 200EUR", &re, "[$1]").unwrap(),
            "price: [100]USD, [200]EUR"
        );
    }

    #[test]
    fn test_offsets_passed_to_replacement() {
        let re = Pattern::global(r"\w+").unwrap();
        let result = replace(TARGET, &re, |m| format!("{}: {}", m.index, m.as_str())).unwrap();
        assert_eq!(result, "0: abc 4: def 8: ghi");
    }
}
