// pipeline.rs - One window, end to end

use crate::core::{calculate_distance_matrix, calculate_frequencies, LocusFrequencyTable};
use crate::data::{
    extract_window, read_shuffled_indices, GenotypeDecoder, InputLayout, Window, WindowSpec,
};
use crate::error::{AsdistError, Result};
use crate::output::{
    read_frequencies, write_counts, write_distances, write_frequencies, OutputPaths,
};
use indicatif::MultiProgress;
use std::path::PathBuf;
use std::time::Instant;

/// Validated inputs of a single window run
#[derive(Debug)]
pub struct RunSettings {
    pub input: PathBuf,
    pub output_folder: PathBuf,
    pub total_individuals: usize,
    pub decoder: Box<dyn GenotypeDecoder>,
    pub layout: InputLayout,
    pub window: WindowSpec,
    pub shuffled_file: Option<PathBuf>,
}

impl RunSettings {
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::new(
            &self.output_folder,
            self.window.window_size,
            self.window.window_index,
        )
    }
}

/// How a window run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The distance matrix of this window already exists
    AlreadyDone,
    /// The window index lies past the last locus
    NoWindow,
    Completed {
        loci: usize,
        incomplete_pairs: usize,
        frequencies_reused: bool,
    },
}

/// Build the distance matrix of one window.
///
/// An existing matrix file ends the run early. An existing frequency table
/// is loaded instead of recomputed. Counts are persisted before the matrix
/// so that the matrix file only exists for completed windows.
///
/// The existence checks are not atomic: two processes given the same window
/// index race, and the last writer wins.
pub fn run_window(settings: &RunSettings, progress: &MultiProgress) -> Result<RunOutcome> {
    let paths = settings.output_paths();

    if paths.distances.exists() {
        log::info!("file exist, exit.");
        return Ok(RunOutcome::AlreadyDone);
    }

    let permutation = match &settings.shuffled_file {
        Some(path) => Some(read_shuffled_indices(path, settings.window.total_snps)?),
        None => None,
    };
    let Some(loci) = settings.window.select_loci(permutation.as_deref()) else {
        log::info!(
            "Window {} of size {} starts past the last of {} SNPs, nothing to do.",
            settings.window.window_index,
            settings.window.window_size,
            settings.window.total_snps
        );
        return Ok(RunOutcome::NoWindow);
    };

    let start = Instant::now();
    let window = extract_window(
        &settings.input,
        &loci,
        settings.total_individuals,
        settings.decoder.as_ref(),
        settings.layout,
    )?;

    let slots = settings.decoder.alphabet().slots();
    let (frequencies, frequencies_reused) = load_or_compute_frequencies(&paths, &window, slots)?;

    let result = calculate_distance_matrix(&window, &frequencies, progress);
    write_counts(&paths.counts, &result.counts)?;
    write_distances(&paths.distances, &result.normalized())?;

    log::info!(
        "Window {} done in {:.2}s: {} individuals x {} loci",
        settings.window.window_index,
        start.elapsed().as_secs_f64(),
        window.n_individuals(),
        window.n_loci()
    );

    Ok(RunOutcome::Completed {
        loci: window.n_loci(),
        incomplete_pairs: result.counts.incomplete.len(),
        frequencies_reused,
    })
}

fn load_or_compute_frequencies(
    paths: &OutputPaths,
    window: &Window,
    slots: usize,
) -> Result<(LocusFrequencyTable, bool)> {
    if paths.frequencies.exists() {
        let table = read_frequencies(&paths.frequencies, slots)?;
        if table.n_loci() != window.n_loci() {
            return Err(AsdistError::persisted(
                &paths.frequencies,
                format!(
                    "holds {} loci but the window has {}",
                    table.n_loci(),
                    window.n_loci()
                ),
            ));
        }
        log::info!(
            "Loaded frequencies from previous run: {}",
            paths.frequencies.display()
        );
        return Ok((table, true));
    }

    let table = calculate_frequencies(window, slots);
    write_frequencies(&paths.frequencies, &table)?;
    Ok((table, false))
}
