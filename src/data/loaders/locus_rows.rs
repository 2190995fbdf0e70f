// locus_rows.rs - Loader for pivoted files with one row per locus

use super::format_error;
use crate::data::decoder::GenotypeDecoder;
use crate::data::window::Window;
use crate::error::{AsdistError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line `n` is original locus `n`; token `i` on a line is individual `i`.
///
/// Lines that are not part of the window are skipped without tokenizing.
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
    let mut found = 0;
    let mut lines_read = 0;

    for (line_idx, line) in reader.lines().enumerate().take(slots.len()) {
        let line = line.map_err(|e| AsdistError::io(path, e))?;
        lines_read = line_idx + 1;
        let Some(position) = slots[line_idx] else {
            continue;
        };

        let mut tokens = line.split_whitespace();
        for individual in 0..n_individuals {
            let token = tokens.next().ok_or_else(|| {
                format_error(
                    path,
                    line_idx + 1,
                    individual,
                    "",
                    format!(
                        "locus row has {} genotypes, expected {}",
                        individual, n_individuals
                    ),
                )
            })?;
            let call = decoder
                .parse_token(token)
                .map_err(|message| format_error(path, line_idx + 1, individual, token, message))?;
            window.set_call(individual, position, call);
        }
        found += 1;
    }

    if found < loci.len() {
        return Err(format_error(
            path,
            lines_read + 1,
            0,
            "",
            format!(
                "file ends before locus {}, only {} of {} requested loci were found",
                slots.len() - 1,
                found,
                loci.len()
            ),
        ));
    }

    Ok(window)
}
