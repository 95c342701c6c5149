use super::rng::PartitionRng;
use crate::error::PartitionError;
use crate::index::parser::{format_line, parse_line};
use crate::index::types::{ParsedLine, log_skipped_line};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Stands in for the partition index in output patterns.
pub const PARTITION_PLACEHOLDER: &str = "%d";

/// Outcome of one partition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    pub lines_read: usize,
    pub lines_skipped: usize,
    /// Document occurrences written to each partition, by index.
    pub documents_per_partition: Vec<usize>,
}

pub fn validate_pattern(pattern: &str) -> Result<(), PartitionError> {
    if pattern.matches(PARTITION_PLACEHOLDER).count() != 1 {
        return Err(PartitionError::InvalidPattern {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Output file for `partition`, e.g. `index-%d.txt` -> `index-3.txt`.
pub fn output_path(pattern: &str, partition: usize) -> PathBuf {
    PathBuf::from(pattern.replacen(PARTITION_PLACEHOLDER, &partition.to_string(), 1))
}

/// Splits one index file into `num_partitions` files named after `pattern`.
///
/// Every document occurrence of every keyword is routed to a partition drawn
/// from `rng`. A keyword line is written to a partition only when at least one
/// of its documents landed there, and its count is the number routed there.
/// Reading every partition back and unioning per keyword gives the original
/// document sets.
///
/// Arguments and the input file are checked before any output exists. All
/// outputs are opened before the first line is read.
pub fn partition_index_file<R: PartitionRng + ?Sized>(
    input: &Path,
    num_partitions: usize,
    pattern: &str,
    rng: &mut R,
) -> Result<PartitionSummary, PartitionError> {
    if num_partitions == 0 {
        return Err(PartitionError::InvalidPartitionCount(num_partitions));
    }
    validate_pattern(pattern)?;

    let file = open_input(input)?;
    let reader = BufReader::new(file);

    let mut writers = open_outputs(pattern, num_partitions)?;
    let mut summary = PartitionSummary {
        documents_per_partition: vec![0; num_partitions],
        ..Default::default()
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(PartitionError::ReadInput)?;
        summary.lines_read += 1;

        let (word, entry) = match parse_line(&line) {
            ParsedLine::Entry { word, entry } => (word, entry),
            ParsedLine::Skipped(reason) => {
                log_skipped_line(input, idx + 1, reason, &line);
                summary.lines_skipped += 1;
                continue;
            }
        };

        let mut buckets: Vec<Vec<String>> = vec![Vec::new(); num_partitions];
        for document in entry.documents {
            let partition = rng.next_partition(num_partitions) % num_partitions;
            buckets[partition].push(document);
        }

        for (partition, documents) in buckets.iter().enumerate() {
            if documents.is_empty() {
                continue;
            }
            writeln!(writers[partition], "{}", format_line(&word, documents))
                .map_err(|source| PartitionError::Write { partition, source })?;
            summary.documents_per_partition[partition] += documents.len();
        }
    }

    close_outputs(writers)?;

    tracing::info!(
        "Partitioned {} into {} file(s): {} line(s) read, {} skipped, occurrences per partition {:?}",
        input.display(),
        num_partitions,
        summary.lines_read,
        summary.lines_skipped,
        summary.documents_per_partition
    );

    Ok(summary)
}

/// Opens the input and rejects anything that is not a regular file, so a
/// directory fails here instead of on the first read after outputs exist.
fn open_input(input: &Path) -> Result<File, PartitionError> {
    let open_err = |source: io::Error| PartitionError::OpenInput {
        path: input.to_path_buf(),
        source,
    };

    let file = File::open(input).map_err(open_err)?;
    let metadata = file.metadata().map_err(open_err)?;
    if !metadata.is_file() {
        return Err(open_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(file)
}

fn open_outputs(pattern: &str, num_partitions: usize) -> Result<Vec<BufWriter<File>>, PartitionError> {
    let mut writers = Vec::with_capacity(num_partitions);

    for partition in 0..num_partitions {
        let path = output_path(pattern, partition);
        match File::create(&path) {
            Ok(file) => writers.push(BufWriter::new(file)),
            Err(source) => {
                // Release what was already opened before reporting.
                if let Err(e) = close_outputs(writers) {
                    tracing::warn!("Failed to close partial partition outputs: {}", e);
                }
                return Err(PartitionError::CreateOutput { path, source });
            }
        }
    }

    Ok(writers)
}

fn close_outputs(writers: Vec<BufWriter<File>>) -> Result<(), PartitionError> {
    for (partition, writer) in writers.into_iter().enumerate() {
        let file = writer
            .into_inner()
            .map_err(|e| PartitionError::Write {
                partition,
                source: e.into_error(),
            })?;
        drop(file);
    }
    Ok(())
}
