//! Lexical detection of consecutive '$' runs.
//!
//! Deliberately not a PHP parser: `$$name` is legal variable-variable
//! syntax, but in practice it is almost always a typo, so every run of
//! two or more dollar signs is flagged. Very long runs are treated as
//! intentional (ASCII art, heredoc noise) and skipped entirely.

/// Runs longer than this are considered intentional and produce no finding.
pub const DEFAULT_MAX_RUN_LEN: usize = 10;

/// A maximal run of '$' characters inside a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DollarRun {
    /// 0-based character offset of the first '$'.
    pub start: usize,
    pub len: usize,
}

/// One detected run, positioned inside the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line number.
    pub line: u32,
    /// 0-based character column of the first '$'.
    pub column: u32,
    /// The line content with surrounding whitespace removed.
    pub line_text: String,
    /// The matched run, e.g. "$$$".
    pub symbols: String,
}

/// Finds all maximal runs of 2..=`max_len` consecutive '$' in `line`.
///
/// Runs longer than `max_len` are skipped whole rather than truncated,
/// and scanning resumes after them, so runs never overlap.
pub fn find_runs(line: &str, max_len: usize) -> Vec<DollarRun> {
    // Fast path: most lines contain no doubled dollar sign at all.
    if !line.contains("$$") {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (col, ch) in line.chars().enumerate() {
        if ch == '$' {
            if len == 0 {
                start = col;
            }
            len += 1;
        } else {
            if (2..=max_len).contains(&len) {
                runs.push(DollarRun { start, len });
            }
            len = 0;
        }
    }
    if (2..=max_len).contains(&len) {
        runs.push(DollarRun { start, len });
    }

    runs
}

/// Scans a whole document, producing findings ordered by (line, column).
///
/// Lines are split on '\n' with 1-based numbering over the split result.
/// The empty document yields no findings; no input panics.
pub fn scan_text(text: &str, max_len: usize) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        for run in find_runs(line, max_len) {
            findings.push(Finding {
                line: (idx + 1) as u32,
                column: run.start as u32,
                line_text: line.trim().to_string(),
                symbols: "$".repeat(run.len),
            });
        }
    }

    findings
}
