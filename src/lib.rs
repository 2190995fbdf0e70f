// lib.rs - asdist library root

//! # asdist - Windowed allele-sharing distances for population structure analysis
//!
//! Computes pairwise allele-sharing distances between diploid individuals
//! from SNP genotype files. Large datasets are split into windows of loci,
//! optionally after a random permutation, so that each window can run as an
//! independent job; the per-window matrices are then joined into one.
//!
//! ## Features
//!
//! - **Two genotype encodings**: symbol pairs (`A,C`) or binary 0/1/2 counts
//! - **Two layouts**: one row per individual or one row per locus (pivoted)
//! - **Resumable**: finished windows are skipped, frequency tables are reused
//! - **Missing data**: excluded from frequencies and distances, flagged per pair
//! - **Weighted joining**: windows are combined in proportion to their loci
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use asdist::prelude::*;
//!
//! let settings = RunSettings {
//!     input: "genotypes.txt".into(),
//!     output_folder: "results".into(),
//!     total_individuals: 500,
//!     decoder: Box::new(SymbolDecoder::new(AlleleAlphabet::parse("A,C,T,G")?, "N")),
//!     layout: InputLayout::RowPerIndividual,
//!     window: WindowSpec {
//!         window_size: 10_000,
//!         window_index: 0,
//!         total_snps: 100_000,
//!     },
//!     shuffled_file: None,
//! };
//! let progress = MultiProgress::new();
//! let outcome = run_window(&settings, &progress)?;
//! # Ok::<(), asdist::AsdistError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, JoinArgs};
    pub use crate::core::{calculate_distance_matrix, calculate_frequencies, join_random_windows};
    pub use crate::core::{DistanceMatrix, JoinedMatrix, LocusFrequencyTable, ValidityCounts};
    pub use crate::data::{AlleleAlphabet, AlleleCall, BinaryDecoder};
    pub use crate::data::{GenotypeDecoder, SymbolDecoder};
    pub use crate::data::{extract_window, InputLayout, Window, WindowSpec};
    pub use crate::error::{AsdistError, Result};
    pub use crate::output::{write_distances, OutputPaths};
    pub use crate::pipeline::{run_window, RunOutcome, RunSettings};
    pub use indicatif::MultiProgress;
}

// Re-export main types at the root level for convenience
pub use cli::Args;
pub use error::{AsdistError, Result};
pub use pipeline::{run_window, RunOutcome, RunSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "asdist v{} - Windowed allele-sharing distance calculator",
        VERSION
    )
}
