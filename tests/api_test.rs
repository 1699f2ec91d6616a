//! Library-level behaviour of scan, replace and split

use std::borrow::Cow;

use rexscan::{replace, replace_template, scan, split, CursorState, Pattern, ScanError};

const TARGET: &str = "abc def ghi";

#[test]
fn test_words_with_final_cursor() {
    let re = Pattern::global(r"\w+").unwrap();
    let mut cursor = scan(&re, TARGET);
    let found: Vec<_> = cursor
        .by_ref()
        .map(|m| m.unwrap())
        .map(|m| (m.index, m.matched.len(), m.matched))
        .collect();
    assert_eq!(found, [(0, 3, "abc"), (4, 3, "def"), (8, 3, "ghi")]);
    assert_eq!(cursor.state().last_index, 11);
}

#[test]
fn test_zero_length_lookahead_one_record_per_char() {
    let re = Pattern::global(r"(?=(\w))").unwrap();
    let records: Vec<_> = scan(&re, TARGET).map(|m| m.unwrap()).collect();
    assert_eq!(records.len(), 9);
    assert!(records.iter().all(|m| m.index == m.last_index));
    let chars: String = records.iter().filter_map(|m| m.captures[0]).collect();
    assert_eq!(chars, "abcdefghi");
}

#[test]
fn test_single_shot_at_most_one_record() {
    for (pattern, subject) in [(r"\w+", TARGET), ("x", TARGET), ("", ""), (r"\s", TARGET)] {
        let once = Pattern::new(pattern).unwrap();
        let all = Pattern::global(pattern).unwrap();
        let first: Vec<_> = scan(&once, subject).map(|m| m.unwrap()).collect();
        assert!(first.len() <= 1);
        let expected = scan(&all, subject).next().map(|m| m.unwrap().range());
        assert_eq!(first.first().map(|m| m.range()), expected);
    }
}

#[test]
fn test_records_chain_and_never_reprobe() {
    for pattern in [r"\w*", r"(?=\w)", r"\b", "", r"a|", r"(?<=a)"] {
        let re = Pattern::global(pattern).unwrap();
        let records: Vec<_> = scan(&re, "aa bb aé").map(|m| m.unwrap()).collect();
        assert!(!records.is_empty(), "{}", pattern);
        assert_eq!(records[0].prev_last_index, 0);
        for pair in records.windows(2) {
            assert_eq!(pair[1].prev_last_index, pair[0].last_index, "{}", pattern);
            assert!(pair[1].start_index > pair[0].start_index, "{}", pattern);
        }
        for m in &records {
            assert!(m.prev_last_index <= m.start_index && m.start_index <= m.index);
            assert!(m.index <= m.last_index);
        }
    }
}

#[test]
fn test_early_break_leaves_state() {
    let re = Pattern::global(r"\w+").unwrap();
    let mut cursor = scan(&re, TARGET);
    for m in cursor.by_ref() {
        if m.unwrap().index > 3 {
            break;
        }
    }
    assert_eq!(cursor.state(), CursorState { last_index: 7, index: Some(4) });
}

#[test]
fn test_replace_uppercase() {
    let re = Pattern::global(r"\w+").unwrap();
    let result = replace(TARGET, &re, |m| m.as_str().to_uppercase()).unwrap();
    assert_eq!(result, "ABC DEF GHI");
}

#[test]
fn test_replace_identity_for_any_transform() {
    let re = Pattern::global(r"\d").unwrap();

    let result = replace(TARGET, &re, |_| String::new()).unwrap();
    assert!(matches!(result, Cow::Borrowed(s) if s == TARGET));

    let result = replace(TARGET, &re, |m| m.as_str().repeat(2)).unwrap();
    assert!(matches!(result, Cow::Borrowed(s) if s == TARGET));
}

#[test]
fn test_replace_keeps_unmatched_spans() {
    let re = Pattern::global(r"[aeiou]").unwrap();
    let subject = "the quick brown fox";
    let result = replace(subject, &re, |_| "_".to_string()).unwrap();
    assert_eq!(result, "th_ q__ck br_wn f_x");
    assert_eq!(result.len(), subject.len());
}

#[test]
fn test_replace_template_named_group() {
    let re = Pattern::with_flags(r"(?P<word>\w+)", "g").unwrap();
    assert_eq!(replace_template(TARGET, &re, "<${word}>").unwrap(), "<abc> <def> <ghi>");
}

#[test]
fn test_split_limits() {
    let spaces = Pattern::global(r"\s+").unwrap();
    assert_eq!(split(TARGET, &spaces, Some(2)).unwrap(), [Some("abc"), Some("def ghi")]);

    let ahead = Pattern::global(r"(?=\w)").unwrap();
    assert_eq!(split("abcde", &ahead, Some(3)).unwrap(), [Some("a"), Some("b"), Some("cde")]);

    let ahead_captured = Pattern::global(r"(?=(\w))").unwrap();
    assert_eq!(split("abcde", &ahead_captured, Some(1)).unwrap(), [Some("abcde")]);
}

#[test]
fn test_split_matches_str_split_for_plain_patterns() {
    let re = Pattern::global(",").unwrap();
    for subject in ["a,b,c", ",a,", "", "abc", ",,"] {
        let expected: Vec<_> = subject.split(',').map(Some).collect();
        assert_eq!(split(subject, &re, None).unwrap(), expected, "{:?}", subject);
    }
}

#[test]
fn test_split_multiline_flag() {
    let re = Pattern::with_flags("^", "m").unwrap();
    assert_eq!(
        split("one\ntwo\nthree", &re, None).unwrap(),
        [Some("one\n"), Some("two\n"), Some("three")]
    );
}

#[test]
fn test_compile_errors_are_engine_errors() {
    assert!(matches!(
        Pattern::global(r"(\d+"),
        Err(rexscan::EngineError::FancyRegexError(_))
    ));
    assert!(matches!(
        Pattern::with_flags("a", "gx"),
        Err(rexscan::EngineError::InvalidFlag('x'))
    ));
}

#[test]
fn test_backtrack_limit_surfaces_and_fuses() {
    let re = Pattern::global(r"(a|a)*\1c").unwrap();
    let subject = format!("{}b", "a".repeat(30));

    let mut cursor = scan(&re, &subject);
    assert!(matches!(cursor.next(), Some(Err(ScanError::Engine(_)))));
    assert!(cursor.next().is_none());
    assert_eq!(cursor.state(), CursorState { last_index: 0, index: None });

    assert!(matches!(
        replace(&subject, &re, |m| m.as_str().to_string()),
        Err(ScanError::Engine(_))
    ));
    assert!(matches!(split(&subject, &re, None), Err(ScanError::Engine(_))));
}

#[test]
fn test_scan_error_wraps_engine_error() {
    let err = ScanError::from(rexscan::EngineError::InvalidFlag('y'));
    assert_eq!(err.to_string(), "Invalid flag 'y' (supported: g, i, m, s, u)");
}
