// join.rs - Arguments of the window joiner

use crate::error::{AsdistError, Result};
use argh::FromArgs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// join_matrices - Combine per-window distance matrices into one matrix
pub struct JoinArgs {
    /// folder holding the Matrix<ws>_<wi>.csv and Counts<ws>_<wi>.csv files
    #[argh(option)]
    pub distances_folder: String,

    /// joined distance matrix file
    #[argh(option)]
    pub output: String,

    /// window size used when the windows were computed
    #[argh(option)]
    pub window_size: usize,

    /// number of windows to sample and join
    #[argh(option)]
    pub windows: usize,

    /// first window index eligible for sampling (default: 0)
    #[argh(option, default = "0")]
    pub first_window: usize,

    /// window index past the last eligible window
    #[argh(option)]
    pub last_window: usize,

    /// total number of individuals in every window matrix
    #[argh(option)]
    pub total_individuals: usize,

    /// seed for reproducible window sampling
    #[argh(option)]
    pub seed: Option<u64>,
}

/// Checked joiner settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSettings {
    pub distances_folder: PathBuf,
    pub output: PathBuf,
    pub window_size: usize,
    pub windows: usize,
    pub first_window: usize,
    pub last_window: usize,
    pub total_individuals: usize,
    pub seed: Option<u64>,
}

impl JoinArgs {
    pub fn parse(command: &str, args: &[&str]) -> std::result::Result<Self, argh::EarlyExit> {
        <Self as FromArgs>::from_args(&[command], args)
    }

    pub fn validate(&self) -> Result<JoinSettings> {
        if self.window_size == 0 {
            return Err(AsdistError::usage("--window-size must be greater than 0"));
        }
        if self.total_individuals == 0 {
            return Err(AsdistError::usage("--total-individuals must be greater than 0"));
        }
        if self.last_window <= self.first_window {
            return Err(AsdistError::usage(format!(
                "--last-window ({}) must be greater than --first-window ({})",
                self.last_window, self.first_window
            )));
        }
        let available = self.last_window - self.first_window;
        if self.windows == 0 || self.windows > available {
            return Err(AsdistError::usage(format!(
                "--windows must be between 1 and {} for the range {}..{}",
                available, self.first_window, self.last_window
            )));
        }

        Ok(JoinSettings {
            distances_folder: PathBuf::from(&self.distances_folder),
            output: PathBuf::from(&self.output),
            window_size: self.window_size,
            windows: self.windows,
            first_window: self.first_window,
            last_window: self.last_window,
            total_individuals: self.total_individuals,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const BASE: [&str; 10] = [
        "--distances-folder", "results/Distances",
        "--output", "joined.csv",
        "--window-size", "100",
        "--total-individuals", "20",
        "--last-window", "10",
    ];

    fn parse(extra: &[&str]) -> JoinArgs {
        let mut all = BASE.to_vec();
        all.extend_from_slice(extra);
        JoinArgs::parse("join_matrices", &all).unwrap()
    }

    #[test]
    fn test_defaults_and_validation() {
        let settings = parse(&["--windows", "4"]).validate().unwrap();
        assert_eq!(settings.first_window, 0);
        assert_eq!(settings.last_window, 10);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.distances_folder, PathBuf::from("results/Distances"));

        let seeded = parse(&["--windows", "10", "--seed", "42"]).validate().unwrap();
        assert_eq!(seeded.seed, Some(42));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(parse(&["--windows", "11"]).validate().unwrap_err().is_usage());
        assert!(parse(&["--windows", "0"]).validate().unwrap_err().is_usage());
        assert!(parse(&["--windows", "1", "--first-window", "10"])
            .validate()
            .unwrap_err()
            .is_usage());
    }

    #[test]
    fn test_missing_required_option() {
        let early = JoinArgs::parse("join_matrices", &["--output", "joined.csv"]).unwrap_err();
        assert!(early.status.is_err());
    }
}
