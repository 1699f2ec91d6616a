//! Human-friendly text output formatting
//!
//! Used when --format text is specified.

use super::types::*;

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn header(output: &mut String, pattern: &str, flags: &str) {
    output.push_str(&format!("Pattern: /{}/{}\n", pattern, flags));
}

/// Format ScanResult as human-readable text
pub fn format_scan_result(result: &ScanResult) -> String {
    let mut output = String::new();

    header(&mut output, &result.pattern, &result.flags);
    output.push_str(&format!(
        "Engine:  {} ({})\n",
        result.engine,
        if result.engine == "regex" {
            "linear time"
        } else {
            "backtracking"
        }
    ));
    output.push('\n');

    if result.matched {
        for (i, m) in result.matches.iter().enumerate() {
            output.push_str(&format!(
                "Match {}: \"{}\" [{}..{}] (prev {}, probe {})\n",
                i + 1,
                m.text,
                m.index,
                m.last_index,
                m.prev_last_index,
                m.start_index
            ));

            for cap in &m.captures {
                let name_str = cap
                    .name
                    .as_ref()
                    .map(|n| format!(" ({})", n))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  Group {}{}: \"{}\" [{}..{}]\n",
                    cap.group, name_str, cap.text, cap.start, cap.end
                ));
            }
        }
        output.push('\n');
        output.push_str(&format!(
            "{} match{} found in {}μs\n",
            result.match_count,
            plural(result.match_count, "", "es"),
            result.elapsed_us
        ));
    } else {
        output.push_str("No matches found\n");
    }

    let index = result
        .final_state
        .index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "none".to_string());
    output.push_str(&format!(
        "Cursor: last_index {}, index {}\n",
        result.final_state.last_index, index
    ));

    output
}

/// Format ReplaceResult as human-readable text
pub fn format_replace_result(result: &ReplaceResult) -> String {
    let mut output = String::new();

    header(&mut output, &result.pattern, &result.flags);
    output.push_str(&format!("Replacement: {}\n", result.replacement));
    output.push('\n');
    output.push_str(&format!("Original: {}\n", result.original));
    output.push_str(&format!("Result:   {}\n", result.result));
    output.push('\n');
    output.push_str(&format!(
        "{} replacement{} made\n",
        result.replacements_made,
        plural(result.replacements_made, "", "s")
    ));

    output
}

/// Format SplitResult as human-readable text
pub fn format_split_result(result: &SplitResult) -> String {
    let mut output = String::new();

    header(&mut output, &result.pattern, &result.flags);
    if let Some(limit) = result.limit {
        output.push_str(&format!("Limit:   {}\n", limit));
    }
    output.push('\n');

    for (i, piece) in result.pieces.iter().enumerate() {
        match piece {
            Some(text) => output.push_str(&format!("{:>3}: \"{}\"\n", i, text)),
            None => output.push_str(&format!("{:>3}: (no match)\n", i)),
        }
    }
    output.push('\n');
    output.push_str(&format!(
        "{} piece{}\n",
        result.pieces.len(),
        plural(result.pieces.len(), "", "s")
    ));

    output
}
