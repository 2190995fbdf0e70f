// mod.rs - Output files: paths, writers and readers

mod readers;

pub use readers::{read_counts_header, read_distances, read_frequencies};

use crate::core::{DistanceMatrix, LocusFrequencyTable, ValidityCounts};
use crate::error::{AsdistError, Result};
use std::fs::create_dir_all;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Header keyword of the counts file, followed by the nominal loci count
pub const COUNTS_HEADER: &str = "DefaultAmountOfSnps";

/// Files owned by one `(window_size, window_index)` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub distances: PathBuf,
    pub counts: PathBuf,
    pub frequencies: PathBuf,
    pub log: PathBuf,
}

impl OutputPaths {
    pub fn new(output_folder: &Path, window_size: usize, window_index: usize) -> Self {
        let distances_dir = output_folder.join("Distances");
        Self {
            distances: distances_dir.join(matrix_file_name(window_size, window_index)),
            counts: distances_dir.join(counts_file_name(window_size, window_index)),
            frequencies: output_folder
                .join("Frequencies")
                .join(format!("{}_{}.csv", window_size, window_index)),
            log: output_folder
                .join("Log")
                .join(format!("{}_{}.log", window_size, window_index)),
        }
    }
}

pub fn matrix_file_name(window_size: usize, window_index: usize) -> String {
    format!("Matrix{}_{}.csv", window_size, window_index)
}

pub fn counts_file_name(window_size: usize, window_index: usize) -> String {
    format!("Counts{}_{}.csv", window_size, window_index)
}

/// Ensure parent directory exists before creating file
pub fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| AsdistError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Write through a temporary file in the target directory, then rename into place.
///
/// A crash mid-write never leaves a partial file under `file_path`.
fn write_atomically<F>(file_path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    ensure_parent_dir(file_path)?;
    let dir = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| AsdistError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer).map_err(|e| AsdistError::io(file_path, e))?;
        writer.flush().map_err(|e| AsdistError::io(file_path, e))?;
    }
    temp.persist(file_path)
        .map_err(|e| AsdistError::io(file_path, e.error))?;
    Ok(())
}

/// Write a normalized distance matrix.
///
/// Row `i` lists the distances to individuals `i+1..n`, each followed by a
/// comma. The last individual has no row.
pub fn write_distances(file_path: &Path, matrix: &DistanceMatrix) -> Result<()> {
    let n = matrix.n_individuals();
    write_atomically(file_path, |writer| {
        for i in 0..n.saturating_sub(1) {
            for value in matrix.row(i) {
                write!(writer, "{:?},", value)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    })?;
    log::info!("Distance matrix written to: {}", file_path.display());
    Ok(())
}

/// Write the nominal loci count and the pairs that had missing loci
pub fn write_counts(file_path: &Path, counts: &ValidityCounts) -> Result<()> {
    write_atomically(file_path, |writer| {
        writeln!(writer, "{} {}", COUNTS_HEADER, counts.nominal_loci)?;
        writeln!(
            writer,
            "If there are missing values, they will be listed below in the following format: "
        )?;
        writeln!(
            writer,
            "<index of first individual>,<index of second individual>,<# of valid snps>"
        )?;
        for &(i, j, valid) in &counts.incomplete {
            writeln!(writer, "{},{},{}", i, j, valid)?;
        }
        Ok(())
    })?;
    log::info!("Counts written to: {}", file_path.display());
    Ok(())
}

/// Write one CSV row of allele counts per locus
pub fn write_frequencies(file_path: &Path, table: &LocusFrequencyTable) -> Result<()> {
    write_atomically(file_path, |writer| {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for row in table.rows().take(table.n_loci()) {
            csv_writer.write_record(row.iter().map(|count| count.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    })?;
    log::info!("Frequencies written to: {}", file_path.display());
    Ok(())
}
