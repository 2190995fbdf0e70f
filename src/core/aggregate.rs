// aggregate.rs - Join per-window distance matrices

use crate::core::distance::DistanceMatrix;
use crate::error::{AsdistError, Result};
use crate::output::{counts_file_name, matrix_file_name, read_counts_header, read_distances};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

/// Distances accumulated over several windows
#[derive(Debug, Clone)]
pub struct JoinedMatrix {
    /// Sum of the raw per-locus contributions of every joined window
    pub sums: DistanceMatrix,
    /// Sum of the nominal loci counts of every joined window
    pub total_loci: usize,
    pub windows: Vec<usize>,
}

impl JoinedMatrix {
    pub fn new(n_individuals: usize) -> Self {
        Self {
            sums: DistanceMatrix::zeros(n_individuals),
            total_loci: 0,
            windows: Vec::new(),
        }
    }

    /// Add a per-window matrix that was normalized by `window_loci`.
    ///
    /// Values are scaled back by the window's loci count so the joined result
    /// weighs each window by the loci it covered.
    pub fn add_window(&mut self, normalized: &DistanceMatrix, window_loci: usize) {
        debug_assert_eq!(normalized.n_individuals(), self.sums.n_individuals());
        let weight = window_loci as f64;
        for (i, j, value) in normalized.pairs() {
            self.sums.add(i, j, value * weight);
        }
        self.total_loci += window_loci;
    }

    /// Combined distances normalized by the total loci count; `None` before
    /// any loci were added
    pub fn normalized(&self) -> Option<DistanceMatrix> {
        if self.total_loci == 0 {
            return None;
        }
        Some(self.sums.normalized(self.total_loci as f64))
    }
}

/// Join the windows listed in `windows`, read from `distances_folder`
pub fn join_windows(
    distances_folder: &Path,
    window_size: usize,
    windows: &[usize],
    n_individuals: usize,
) -> Result<JoinedMatrix> {
    let mut joined = JoinedMatrix::new(n_individuals);

    for &window_index in windows {
        let counts_path = distances_folder.join(counts_file_name(window_size, window_index));
        let matrix_path = distances_folder.join(matrix_file_name(window_size, window_index));

        let window_loci = read_counts_header(&counts_path)?;
        if window_loci == 0 {
            return Err(AsdistError::persisted(&counts_path, "declares a window of 0 loci"));
        }
        let matrix = read_distances(&matrix_path, n_individuals)?;
        joined.add_window(&matrix, window_loci);
        joined.windows.push(window_index);

        log::info!(
            "Joined window {} ({} loci, {} total)",
            window_index,
            window_loci,
            joined.total_loci
        );
    }

    Ok(joined)
}

/// Draw `count` distinct window indices from `first..last`
pub fn sample_windows(
    first: usize,
    last: usize,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<usize>> {
    if last <= first {
        return Err(AsdistError::usage(format!(
            "Empty window range {}..{}",
            first, last
        )));
    }
    let available = last - first;
    if count == 0 || count > available {
        return Err(AsdistError::usage(format!(
            "Cannot sample {} windows from the {} windows in {}..{}",
            count, available, first, last
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let picked = rand::seq::index::sample(&mut rng, available, count)
        .into_iter()
        .map(|offset| first + offset)
        .collect();
    Ok(picked)
}

/// Join `count` windows sampled without replacement from `first..last`
pub fn join_random_windows(
    distances_folder: &Path,
    window_size: usize,
    count: usize,
    first: usize,
    last: usize,
    n_individuals: usize,
    seed: Option<u64>,
) -> Result<JoinedMatrix> {
    let windows = sample_windows(first, last, count, seed)?;
    log::info!("Sampled windows: {:?}", windows);
    join_windows(distances_folder, window_size, &windows, n_individuals)
}
