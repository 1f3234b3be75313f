use std::{fmt, sync::LazyLock};

use regex::Regex;

pub const MAX_ARTISTS: usize = 50;
pub const MAX_QUERY_CHARS: usize = 100;
pub const MIN_QUERY_CHARS: usize = 2;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s'.&()\-]").expect("valid disallowed-character pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Ordered artist queries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineup(Vec<String>);

impl Lineup {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Lineup> for Vec<String> {
    fn from(lineup: Lineup) -> Self {
        lineup.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Empty,
    TooShort,
}

/// Non-fatal notes produced while cleaning a lineup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeWarning {
    Truncated { kept: usize, dropped: usize },
    Dropped { original: String, reason: DropReason },
    Cleaned { original: String, cleaned: String },
}

impl fmt::Display for SanitizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeWarning::Truncated { kept, dropped } => write!(
                f,
                "Lineup limited to the first {} artists, {} dropped",
                kept, dropped
            ),
            SanitizeWarning::Dropped {
                original,
                reason: DropReason::Empty,
            } => write!(f, "Skipped '{}': nothing left after cleaning", original),
            SanitizeWarning::Dropped {
                original,
                reason: DropReason::TooShort,
            } => write!(
                f,
                "Skipped '{}': shorter than {} characters after cleaning",
                original, MIN_QUERY_CHARS
            ),
            SanitizeWarning::Cleaned { original, cleaned } => {
                write!(f, "Cleaned '{}' -> '{}'", original, cleaned)
            }
        }
    }
}

/// Turns free lineup text into at most `max_artists` search queries.
///
/// One artist per line. Lines are trimmed and blank ones ignored before the
/// cap is applied, so the first `max_artists` non-blank lines are kept in
/// order. Each kept line loses characters outside letters, digits,
/// whitespace and `- ' . & ( )`, has whitespace collapsed and is cut to
/// [`MAX_QUERY_CHARS`]. Lines that end up shorter than [`MIN_QUERY_CHARS`]
/// are dropped.
pub fn sanitize(lineup_text: &str, max_artists: usize) -> (Lineup, Vec<SanitizeWarning>) {
    let mut warnings = Vec::new();

    let lines: Vec<&str> = lineup_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() > max_artists {
        warnings.push(SanitizeWarning::Truncated {
            kept: max_artists,
            dropped: lines.len() - max_artists,
        });
    }

    let mut queries = Vec::with_capacity(lines.len().min(max_artists));
    for original in lines.into_iter().take(max_artists) {
        let cleaned = clean_line(original);
        let chars = cleaned.chars().count();

        if chars < MIN_QUERY_CHARS {
            warnings.push(SanitizeWarning::Dropped {
                original: original.to_string(),
                reason: if chars == 0 {
                    DropReason::Empty
                } else {
                    DropReason::TooShort
                },
            });
            continue;
        }

        if cleaned != original {
            warnings.push(SanitizeWarning::Cleaned {
                original: original.to_string(),
                cleaned: cleaned.clone(),
            });
        }
        queries.push(cleaned);
    }

    (Lineup(queries), warnings)
}

fn clean_line(line: &str) -> String {
    let stripped = DISALLOWED.replace_all(line, "");
    let collapsed = WHITESPACE.replace_all(stripped.trim(), " ");
    let truncated: String = collapsed.chars().take(MAX_QUERY_CHARS).collect();
    truncated.trim_end().to_string()
}
