//! CLI interface using clap
//!
//! Defines all command-line arguments and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use rexscan::core::{EngineType, Flags, Pattern};

#[derive(Parser)]
#[command(name = "rexscan")]
#[command(author, version, about = "Regex match iteration with explicit cursor boundaries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (default)
    Json,
    /// Human-readable text
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every match with its cursor boundaries
    Scan {
        /// The regex pattern
        pattern: String,

        /// Input text to scan (use --file for file input, stdin otherwise)
        input: Option<String>,

        /// File to scan
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,

        /// Pattern flags (g = global, i, m, s, u); pass "" for a single match
        #[arg(long, short = 'x', default_value = "g")]
        flags: String,

        /// Maximum number of matches to report
        #[arg(long, default_value = "100")]
        max_matches: usize,

        /// Force specific engine (regex or fancy-regex)
        #[arg(long)]
        engine: Option<String>,
    },

    /// Replace matches using a template
    Replace {
        /// The regex pattern
        pattern: String,

        /// The replacement template (supports $1, ${name}, $&, $`, $', $$)
        replacement: String,

        /// Input text to transform
        input: Option<String>,

        /// File to read the input from (never modified)
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,

        /// Pattern flags (g = global, i, m, s, u)
        #[arg(long, short = 'x', default_value = "g")]
        flags: String,

        /// Force specific engine (regex or fancy-regex)
        #[arg(long)]
        engine: Option<String>,
    },

    /// Split input around matches
    Split {
        /// The regex pattern
        pattern: String,

        /// Input text to split
        input: Option<String>,

        /// File to read the input from
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,

        /// Pattern flags (i, m, s, u); splitting is always global
        #[arg(long, short = 'x', default_value = "")]
        flags: String,

        /// Maximum number of fragments (captured groups are not counted)
        #[arg(long, short = 'l')]
        limit: Option<usize>,

        /// Force specific engine (regex or fancy-regex)
        #[arg(long)]
        engine: Option<String>,
    },
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_engine(engine: Option<&str>) -> Result<Option<EngineType>, String> {
    match engine {
        None => Ok(None),
        Some("regex") => Ok(Some(EngineType::Regex)),
        Some("fancy-regex" | "fancy") => Ok(Some(EngineType::FancyRegex)),
        Some(e) => Err(format!(
            "Unknown engine '{}'. Valid options: regex, fancy-regex",
            e
        )),
    }
}

fn compile(pattern: &str, flags: &str, engine: Option<&str>) -> Result<Pattern, String> {
    let flags = Flags::parse(flags).map_err(|e| e.to_string())?;
    Pattern::compile_with(pattern, flags, parse_engine(engine)?).map_err(|e| e.to_string())
}

/// Read the subject from the positional argument, a file, or stdin
fn read_input(input: Option<&str>, file: Option<&Path>, hint: &str) -> Result<String, String> {
    use std::io::{self, IsTerminal, Read};

    if let Some(file_path) = file {
        return std::fs::read_to_string(file_path).map_err(|e| format!("Failed to read file: {}", e));
    }
    if let Some(text) = input {
        return Ok(text.to_string());
    }

    // Warn if stdin is a terminal (no pipe)
    if io::stdin().is_terminal() {
        eprintln!("rexscan: reading from stdin (pipe data or press Ctrl-D when done)");
        eprintln!("  hint: {}", hint);
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(text)
}

/// Handle the scan command
pub fn handle_scan(
    pattern: &str,
    input: Option<&str>,
    file: Option<&Path>,
    flags: &str,
    max_matches: usize,
    engine: Option<&str>,
    format: OutputFormat,
) -> Result<String, String> {
    use rexscan::core::scan;
    use rexscan::output::json::format_json;
    use rexscan::output::text::format_scan_result;
    use rexscan::output::{Match, ScanResult};
    use std::time::Instant;

    let compiled = compile(pattern, flags, engine)?;
    let text = read_input(
        input,
        file,
        &format!("rexscan scan '{}' \"text\" — or — cat file | rexscan scan '{}'", pattern, pattern),
    )?;

    let start = Instant::now();
    let mut cursor = scan(&compiled, &text);
    let mut matches = Vec::new();
    for record in cursor.by_ref().take(max_matches) {
        let record = record.map_err(|e| e.to_string())?;
        matches.push(Match::from_record(&record, &compiled));
    }
    let elapsed = start.elapsed();

    let result = ScanResult {
        pattern: pattern.to_string(),
        flags: compiled.flags().to_string(),
        engine: compiled.engine_type().to_string(),
        input_length: text.len(),
        matched: !matches.is_empty(),
        match_count: matches.len(),
        matches,
        final_state: cursor.state().into(),
        elapsed_us: elapsed.as_micros() as u64,
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_scan_result(&result)),
    }
}

/// Handle the replace command
pub fn handle_replace(
    pattern: &str,
    replacement: &str,
    input: Option<&str>,
    file: Option<&Path>,
    flags: &str,
    engine: Option<&str>,
    format: OutputFormat,
) -> Result<String, String> {
    use rexscan::core::{expand, replace_counted};
    use rexscan::output::json::format_json;
    use rexscan::output::text::format_replace_result;
    use rexscan::output::ReplaceResult;

    let compiled = compile(pattern, flags, engine)?;
    let text = read_input(
        input,
        file,
        &format!(
            "rexscan replace '{}' '{}' \"text\" — or — cat file | rexscan replace '{}' '{}'",
            pattern, replacement, pattern, replacement
        ),
    )?;

    let (result, count) =
        replace_counted(&text, &compiled, |record| expand(replacement, record, &compiled))
            .map_err(|e| e.to_string())?;

    let result = ReplaceResult {
        pattern: pattern.to_string(),
        flags: compiled.flags().to_string(),
        replacement: replacement.to_string(),
        result: result.into_owned(),
        original: text,
        replacements_made: count,
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_replace_result(&result)),
    }
}

/// Handle the split command
pub fn handle_split(
    pattern: &str,
    input: Option<&str>,
    file: Option<&Path>,
    flags: &str,
    limit: Option<usize>,
    engine: Option<&str>,
    format: OutputFormat,
) -> Result<String, String> {
    use rexscan::core::split;
    use rexscan::output::json::format_json;
    use rexscan::output::text::format_split_result;
    use rexscan::output::SplitResult;

    let compiled = compile(pattern, flags, engine)?;
    let text = read_input(
        input,
        file,
        &format!("rexscan split '{}' \"text\" — or — cat file | rexscan split '{}'", pattern, pattern),
    )?;

    let pieces = split(&text, &compiled, limit).map_err(|e| e.to_string())?;

    let result = SplitResult {
        pattern: pattern.to_string(),
        flags: compiled.flags().to_string(),
        limit,
        pieces: pieces.into_iter().map(|p| p.map(str::to_string)).collect(),
    };

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_split_result(&result)),
    }
}
