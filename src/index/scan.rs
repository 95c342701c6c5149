use super::parser::parse_line;
use super::types::{ParsedLine, log_skipped_line};
use crate::error::IndexError;
use crate::search::engine::{DocMatches, record_match};

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Streams every source file and collects matches for `keywords`.
///
/// Nothing is retained between calls, so each query sees the files as they
/// are on disk at that moment.
pub fn scan_files(files: &[PathBuf], keywords: &BTreeSet<String>) -> Result<DocMatches, IndexError> {
    if files.is_empty() {
        return Err(IndexError::NoFiles);
    }

    let mut doc_matches = DocMatches::new();

    for path in files {
        let file = File::open(path).map_err(|source| IndexError::Open {
            path: path.clone(),
            source,
        })?;

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| IndexError::Read {
                path: path.clone(),
                source,
            })?;

            match parse_line(&line) {
                ParsedLine::Entry { word, entry } => {
                    if !keywords.contains(&word) {
                        continue;
                    }
                    for document in &entry.documents {
                        record_match(&mut doc_matches, document, &word);
                    }
                }
                ParsedLine::Skipped(reason) => log_skipped_line(path, idx + 1, reason, &line),
            }
        }
    }

    Ok(doc_matches)
}
