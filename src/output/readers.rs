// readers.rs - Readers for files written by previous runs

use super::COUNTS_HEADER;
use crate::core::{DistanceMatrix, LocusFrequencyTable};
use crate::error::{AsdistError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a frequency table written by [`super::write_frequencies`]
pub fn read_frequencies(file_path: &Path, slots: usize) -> Result<LocusFrequencyTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(file_path)
        .map_err(|e| AsdistError::persisted(file_path, e.to_string()))?;

    let mut rows = Vec::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| AsdistError::persisted(file_path, e.to_string()))?;
        let row = record
            .iter()
            .map(|field| {
                field.trim().parse::<u64>().map_err(|_| {
                    AsdistError::persisted(
                        file_path,
                        format!("line {}: '{}' is not a count", line_num + 1, field),
                    )
                })
            })
            .collect::<Result<Vec<u64>>>()?;
        rows.push(row);
    }

    LocusFrequencyTable::from_rows(rows, slots).map_err(|e| AsdistError::persisted(file_path, e))
}

/// Nominal loci count from the first line of a counts file
pub fn read_counts_header(file_path: &Path) -> Result<usize> {
    let file = File::open(file_path).map_err(|e| AsdistError::io(file_path, e))?;
    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(|e| AsdistError::io(file_path, e))?;

    let mut parts = first_line.split_whitespace();
    match (parts.next(), parts.next().map(str::parse::<usize>)) {
        (Some(COUNTS_HEADER), Some(Ok(count))) => Ok(count),
        _ => Err(AsdistError::persisted(
            file_path,
            format!(
                "expected a '{} <count>' header, found '{}'",
                COUNTS_HEADER,
                first_line.trim_end()
            ),
        )),
    }
}

/// Load a distance matrix written by [`super::write_distances`] for `n_individuals`
pub fn read_distances(file_path: &Path, n_individuals: usize) -> Result<DistanceMatrix> {
    let file = File::open(file_path).map_err(|e| AsdistError::io(file_path, e))?;
    let mut matrix = DistanceMatrix::zeros(n_individuals);
    let expected_rows = n_individuals.saturating_sub(1);
    let mut i = 0;

    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AsdistError::io(file_path, e))?;
        let values = line.trim_end().trim_end_matches(',');
        if values.is_empty() {
            continue;
        }
        if i >= expected_rows {
            return Err(AsdistError::persisted(
                file_path,
                format!(
                    "has more than {} rows for {} individuals",
                    expected_rows, n_individuals
                ),
            ));
        }

        let fields: Vec<&str> = values.split(',').collect();
        if fields.len() != n_individuals - i - 1 {
            return Err(AsdistError::persisted(
                file_path,
                format!(
                    "line {} has {} distances, expected {}",
                    line_num + 1,
                    fields.len(),
                    n_individuals - i - 1
                ),
            ));
        }
        for (k, field) in fields.iter().enumerate() {
            let value: f64 = field.trim().parse().map_err(|_| {
                AsdistError::persisted(
                    file_path,
                    format!("line {}: '{}' is not a distance", line_num + 1, field),
                )
            })?;
            matrix.set(i, i + 1 + k, value);
        }
        i += 1;
    }

    if i != expected_rows {
        return Err(AsdistError::persisted(
            file_path,
            format!("has {} rows, expected {}", i, expected_rows),
        ));
    }

    Ok(matrix)
}
