// individual_rows.rs - Loader for files with one row per individual

use super::format_error;
use crate::data::decoder::GenotypeDecoder;
use crate::data::window::Window;
use crate::error::{AsdistError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Each non-blank line is one individual; token `n` is original locus `n`.
pub(super) fn read(
    path: &Path,
    loci: &[usize],
    slots: &[Option<usize>],
    n_individuals: usize,
    decoder: &dyn GenotypeDecoder,
) -> Result<Window> {
    let file = File::open(path).map_err(|e| AsdistError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut window = Window::new(n_individuals, loci.to_vec());
    let mut individual = 0;
    let mut lines_read = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AsdistError::io(path, e))?;
        lines_read = line_idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if individual == n_individuals {
            return Err(format_error(
                path,
                line_idx + 1,
                0,
                "",
                format!("extra individual row, expected {} rows", n_individuals),
            ));
        }

        let mut decoded = 0;
        // Tokens past the last requested column are never looked at
        for (column, token) in line.split_whitespace().take(slots.len()).enumerate() {
            if let Some(position) = slots[column] {
                let call = decoder
                    .parse_token(token)
                    .map_err(|message| format_error(path, line_idx + 1, column, token, message))?;
                window.set_call(individual, position, call);
                decoded += 1;
            }
        }

        if decoded < loci.len() {
            let found = line.split_whitespace().count();
            return Err(format_error(
                path,
                line_idx + 1,
                found,
                "",
                format!("row has {} loci, expected at least {}", found, slots.len()),
            ));
        }
        individual += 1;
    }

    if individual < n_individuals {
        return Err(format_error(
            path,
            lines_read + 1,
            0,
            "",
            format!(
                "file ends after {} individual rows, expected {}",
                individual, n_individuals
            ),
        ));
    }

    Ok(window)
}
