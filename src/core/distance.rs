// distance.rs - Allele-sharing distance engine

use crate::core::frequency::LocusFrequencyTable;
use crate::data::{AlleleCall, Window};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Instant;

/// Symmetric distance matrix without diagonal, stored as a packed upper triangle.
///
/// Entry `(i, j)` with `i < j` lives at row-major offset
/// `i * (2n - i - 1) / 2 + (j - i - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n_individuals: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn zeros(n_individuals: usize) -> Self {
        let n_pairs = n_individuals * n_individuals.saturating_sub(1) / 2;
        Self {
            n_individuals,
            values: vec![0.0; n_pairs],
        }
    }

    pub fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    pub fn n_pairs(&self) -> usize {
        self.values.len()
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.n_individuals);
        i * (2 * self.n_individuals - i - 1) / 2 + (j - i - 1)
    }

    /// Distance between two individuals in either order; `None` on the diagonal
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(self.values[self.offset(i, j)]),
            std::cmp::Ordering::Greater => Some(self.values[self.offset(j, i)]),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let offset = self.offset(i, j);
        self.values[offset] = value;
    }

    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let offset = self.offset(i, j);
        self.values[offset] += value;
    }

    /// Values of row `i` for columns `i+1..n`
    pub fn row(&self, i: usize) -> &[f64] {
        if i + 1 >= self.n_individuals {
            return &[];
        }
        let start = self.offset(i, i + 1);
        &self.values[start..start + (self.n_individuals - i - 1)]
    }

    /// All `(i, j, value)` with `i < j`, row by row
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n_individuals).flat_map(move |i| {
            self.row(i)
                .iter()
                .enumerate()
                .map(move |(k, &value)| (i, i + 1 + k, value))
        })
    }

    /// Copy of the matrix with every value divided by `denominator`
    pub fn normalized(&self, denominator: f64) -> Self {
        Self {
            n_individuals: self.n_individuals,
            values: self.values.iter().map(|v| v / denominator).collect(),
        }
    }
}

/// Pairs that could not use every locus of the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityCounts {
    /// Loci in the window; the denominator used for every pair
    pub nominal_loci: usize,
    /// `(i, j, valid_loci)` for pairs with `valid_loci < nominal_loci`
    pub incomplete: Vec<(usize, usize, usize)>,
}

/// Unnormalized result of one window
#[derive(Debug, Clone)]
pub struct WindowDistances {
    /// Raw sums of per-locus contributions
    pub sums: DistanceMatrix,
    pub counts: ValidityCounts,
}

impl WindowDistances {
    /// Distances divided by the nominal locus count of the window.
    ///
    /// Pairs with missing loci keep the same denominator as complete pairs.
    pub fn normalized(&self) -> DistanceMatrix {
        self.sums.normalized(self.counts.nominal_loci as f64)
    }
}

/// Observed allele instances per locus, floored at one
fn locus_denominators(frequencies: &LocusFrequencyTable) -> Vec<f64> {
    (0..frequencies.n_loci())
        .map(|l| frequencies.non_missing(l).max(1) as f64)
        .collect()
}

fn indicator(x: u16, y: u16) -> f64 {
    if x == y {
        1.0
    } else {
        0.0
    }
}

/// Distance sum and usable locus count between two individuals.
///
/// Loci where either call is missing are skipped. For alleles `(a, b)` of
/// the first individual and `(c, d)` of the second, a locus contributes
/// `0.25 * ((1 - f_a)(I_ac + I_ad) + (1 - f_b)(I_bc + I_bd))` with `f`
/// the window-wide frequency among observed alleles.
pub fn calculate_pair_distance(
    first: &[AlleleCall],
    second: &[AlleleCall],
    frequencies: &LocusFrequencyTable,
) -> (f64, usize) {
    pair_distance(first, second, frequencies, &locus_denominators(frequencies))
}

fn pair_distance(
    first: &[AlleleCall],
    second: &[AlleleCall],
    frequencies: &LocusFrequencyTable,
    denominators: &[f64],
) -> (f64, usize) {
    let mut distance = 0.0;
    let mut valid = 0;

    for (locus, (x, y)) in first.iter().zip(second).enumerate() {
        let (AlleleCall::Called(a, b), AlleleCall::Called(c, d)) = (*x, *y) else {
            continue;
        };
        valid += 1;

        let f_a = frequencies.count(locus, a as usize) as f64 / denominators[locus];
        let f_b = frequencies.count(locus, b as usize) as f64 / denominators[locus];
        distance += 0.25
            * ((1.0 - f_a) * (indicator(a, c) + indicator(a, d))
                + (1.0 - f_b) * (indicator(b, c) + indicator(b, d)));
    }

    (distance, valid)
}

/// Compute distance sums and validity counts for every pair of individuals.
///
/// The progress bar is drawn through `progress` so that log lines do not
/// tear it.
pub fn calculate_distance_matrix(
    window: &Window,
    frequencies: &LocusFrequencyTable,
    progress: &MultiProgress,
) -> WindowDistances {
    let n_individuals = window.n_individuals();
    let n_loci = window.n_loci();
    let denominators = locus_denominators(frequencies);
    let mut sums = DistanceMatrix::zeros(n_individuals);
    let mut incomplete = Vec::new();

    let start = Instant::now();
    let total_comparisons = sums.n_pairs();
    let pb = progress.add(ProgressBar::new(total_comparisons as u64));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let log_interval = std::cmp::max(1, n_individuals / 100);
    for i in 0..n_individuals {
        if i % log_interval == 0 {
            log::info!("calcDistances finished {} out of {}", i, n_individuals);
        }
        let calls_i = window.individual(i);
        for j in (i + 1)..n_individuals {
            let (distance, valid) =
                pair_distance(calls_i, window.individual(j), frequencies, &denominators);
            sums.set(i, j, distance);
            if valid < n_loci {
                incomplete.push((i, j, valid));
            }
        }
        pb.inc((n_individuals - i - 1) as u64);
    }

    pb.finish_and_clear();
    progress.remove(&pb);
    log::info!(
        "Distance matrix computed in {:.2}s ({} pairs, {} with missing data)",
        start.elapsed().as_secs_f64(),
        total_comparisons,
        incomplete.len()
    );

    WindowDistances {
        sums,
        counts: ValidityCounts {
            nominal_loci: n_loci,
            incomplete,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frequency::calculate_frequencies;
    use crate::data::AlleleAlphabet;
    use crate::data::AlleleCall::*;
    use indicatif::ProgressDrawTarget;

    const EPS: f64 = 1e-12;

    fn hidden_progress() -> MultiProgress {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn acgt_window() -> Window {
        Window::from_rows(
            vec![0, 1, 2],
            vec![
                vec![Called(0, 0), Called(1, 2), Called(3, 3)],
                vec![Called(0, 1), Called(1, 1), Called(3, 0)],
                vec![Called(2, 2), Called(1, 1), Called(0, 3)],
                vec![Called(0, 3), Called(2, 1), Called(3, 3)],
            ],
        )
    }

    #[test]
    fn test_packed_matrix_indexing() {
        let mut matrix = DistanceMatrix::zeros(4);
        assert_eq!(matrix.n_pairs(), 6);

        matrix.set(0, 3, 1.5);
        matrix.set(2, 1, 0.5);
        matrix.add(1, 2, 0.25);

        assert_eq!(matrix.get(0, 3), Some(1.5));
        assert_eq!(matrix.get(3, 0), Some(1.5));
        assert_eq!(matrix.get(1, 2), Some(0.75));
        assert_eq!(matrix.get(2, 2), None);
        assert_eq!(matrix.row(0), &[0.0, 0.0, 1.5]);
        assert_eq!(matrix.row(1), &[0.75, 0.0]);
        assert!(matrix.row(3).is_empty());

        let pairs: Vec<_> = matrix.pairs().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_degenerate_matrices() {
        assert_eq!(DistanceMatrix::zeros(0).n_pairs(), 0);
        assert_eq!(DistanceMatrix::zeros(1).n_pairs(), 0);
        assert_eq!(DistanceMatrix::zeros(1).pairs().count(), 0);
    }

    #[test]
    fn test_pair_formula_single_locus() {
        // Frequencies at the locus: A=4, C=1, T=2, G=1 (8 observed)
        let table = LocusFrequencyTable::from_rows(vec![vec![4, 1, 2, 1, 0]], 5).unwrap();

        // (A,C) vs (A,G): only I_ac matches
        let (distance, valid) =
            calculate_pair_distance(&[Called(0, 1)], &[Called(0, 3)], &table);
        assert_eq!(valid, 1);
        assert!((distance - 0.25 * (1.0 - 0.5)).abs() < EPS);

        // (A,A) vs (A,A): every indicator matches
        let (distance, _) = calculate_pair_distance(&[Called(0, 0)], &[Called(0, 0)], &table);
        assert!((distance - 0.25 * (0.5 * 2.0 + 0.5 * 2.0)).abs() < EPS);

        // Nothing shared
        let (distance, valid) =
            calculate_pair_distance(&[Called(2, 2)], &[Called(0, 1)], &table);
        assert_eq!(valid, 1);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_missing_locus_is_skipped() {
        let table =
            LocusFrequencyTable::from_rows(vec![vec![2, 2, 2], vec![3, 1, 2]], 3).unwrap();
        let first = [Called(0, 1), Missing];
        let second = [Called(1, 1), Called(0, 0)];

        let (distance, valid) = calculate_pair_distance(&first, &second, &table);
        assert_eq!(valid, 1);
        // Only locus 0: f_b = 2/4, I_bc = I_bd = 1
        assert!((distance - 0.25 * (0.5 * 2.0)).abs() < EPS);
    }

    #[test]
    fn test_all_missing_locus_uses_unit_denominator() {
        let table = LocusFrequencyTable::from_rows(vec![vec![0, 0, 4]], 3).unwrap();
        let (distance, valid) =
            calculate_pair_distance(&[Called(0, 0)], &[Called(0, 0)], &table);
        assert_eq!(valid, 1);
        assert!((distance - 1.0).abs() < EPS);
    }

    #[test]
    fn test_distance_matrix_scenario() {
        let window = acgt_window();
        let alphabet = AlleleAlphabet::parse("A,C,T,G").unwrap();
        let frequencies = calculate_frequencies(&window, alphabet.slots());
        let result = calculate_distance_matrix(&window, &frequencies, &hidden_progress());

        assert_eq!(result.sums.n_pairs(), 6);
        assert!(result.counts.incomplete.is_empty());
        assert_eq!(result.counts.nominal_loci, 3);

        for (i, j, value) in result.sums.pairs() {
            assert!(i < j);
            assert!(value >= 0.0);
            assert_eq!(result.sums.get(j, i), Some(value));
        }

        // Pair (0,1): locus 0 (A,A)/(A,C) f_A = 4/8 twice -> 0.25 * 0.5 * 2
        //             locus 1 (C,T)/(C,C) f_C = 6/8 -> 0.25 * 0.25 * 2
        //             locus 2 (G,G)/(G,A) f_G = 6/8 twice -> 0.25 * (0.25 + 0.25)
        let expected = 0.25 + 0.125 + 0.125;
        let pair = result.sums.get(0, 1).unwrap();
        assert!((pair - expected).abs() < EPS);

        let normalized = result.normalized();
        assert!((normalized.get(0, 1).unwrap() - expected / 3.0).abs() < EPS);
    }

    #[test]
    fn test_validity_counts_flag_missing_pairs() {
        let window = Window::from_rows(
            vec![0, 1, 2],
            vec![
                vec![Called(0, 0), Called(1, 0), Called(1, 1)],
                vec![Called(1, 0), Missing, Called(1, 1)],
                vec![Called(0, 0), Called(1, 1), Called(0, 0)],
            ],
        );
        let frequencies = calculate_frequencies(&window, 3);
        let result = calculate_distance_matrix(&window, &frequencies, &hidden_progress());

        assert_eq!(result.counts.incomplete, vec![(0, 1, 2), (1, 2, 2)]);
        assert_eq!(result.counts.nominal_loci, 3);

        // A missing locus contributes nothing: pair (0,1) equals the sum of loci 0 and 2
        let column = |l: usize| -> (Vec<AlleleCall>, Vec<AlleleCall>) {
            (vec![window.call(0, l)], vec![window.call(1, l)])
        };
        let mut expected = 0.0;
        for l in [0, 2] {
            let single =
                LocusFrequencyTable::from_rows(vec![frequencies.row(l).to_vec()], 3).unwrap();
            let (a, b) = column(l);
            expected += calculate_pair_distance(&a, &b, &single).0;
        }
        assert!((result.sums.get(0, 1).unwrap() - expected).abs() < EPS);
    }
}
