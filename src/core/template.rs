//! Replacement templates
//!
//! Expands `$`-references against a [`MatchRecord`]. Supported forms:
//! `$$`, `$&`, `` $` ``, `$'`, `$1`..`$99` and `${name}` / `${1}`.

use super::engine::Pattern;
use super::scan::MatchRecord;

/// Expand `template` for one match
pub fn expand(template: &str, record: &MatchRecord<'_>, pattern: &Pattern) -> String {
    let groups = pattern.captures_len();
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                result.push('$');
            }
            Some('&') => {
                chars.next();
                result.push_str(record.as_str());
            }
            Some('`') => {
                chars.next();
                result.push_str(record.before());
            }
            Some('\'') => {
                chars.next();
                result.push_str(record.after());
            }
            Some(d) if d.is_ascii_digit() => {
                chars.next();
                let first = d as usize - '0' as usize;
                // Prefer two digits when that names an existing group.
                let two = chars
                    .peek()
                    .filter(|n| n.is_ascii_digit())
                    .map(|n| first * 10 + (*n as usize - '0' as usize));
                match two {
                    Some(n) if (1..=groups).contains(&n) => {
                        chars.next();
                        result.push_str(record.get(n).unwrap_or_default());
                    }
                    _ if (1..=groups).contains(&first) => {
                        result.push_str(record.get(first).unwrap_or_default());
                    }
                    _ => {
                        result.push('$');
                        result.push(d);
                    }
                }
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    result.push_str("${");
                    result.push_str(&name);
                    continue;
                }
                let index = match name.parse::<usize>() {
                    Ok(num) => Some(num),
                    Err(_) => pattern.capture_index(&name),
                };
                if let Some(text) = index.and_then(|i| record.get(i)) {
                    result.push_str(text);
                }
            }
            _ => result.push('$'),
        }
    }

    result
}
