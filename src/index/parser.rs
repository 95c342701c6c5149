use super::types::{IndexEntry, ParsedLine, SkipReason};
use crate::search::engine::clean_document_id;

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// ASCII classes only: a keyword may contain Unicode spaces such as U+00A0,
// and the count is plain decimal.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\t\n\f\r ]+): ([0-9]+) (.+)$").expect("valid index line pattern")
});

/// Parses one `word: count doc1, doc2, ...` line.
///
/// Document identifiers are trimmed and deduplicated; empty entries left by
/// stray commas are dropped.
pub fn parse_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Skipped(SkipReason::Blank);
    }

    let Some(caps) = LINE_PATTERN.captures(line) else {
        return ParsedLine::Skipped(SkipReason::Malformed);
    };

    let Ok(count) = caps[2].parse::<usize>() else {
        return ParsedLine::Skipped(SkipReason::InvalidCount);
    };

    let documents: BTreeSet<String> = caps[3]
        .split(',')
        .map(clean_document_id)
        .filter(|doc| !doc.is_empty())
        .map(|doc| doc.to_string())
        .collect();

    if documents.is_empty() {
        return ParsedLine::Skipped(SkipReason::NoDocuments);
    }

    ParsedLine::Entry {
        word: caps[1].to_string(),
        entry: IndexEntry { count, documents },
    }
}

/// Renders an index line; the count is the number of listed documents.
pub fn format_line<S: AsRef<str>>(word: &str, documents: &[S]) -> String {
    let joined = documents
        .iter()
        .map(|doc| doc.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}: {} {}", word, documents.len(), joined)
}
