// mod.rs - Core logic module

pub mod aggregate;
pub mod distance;
pub mod frequency;

// Re-export main types for convenience
pub use aggregate::{join_random_windows, join_windows, sample_windows, JoinedMatrix};
pub use distance::{
    calculate_distance_matrix, calculate_pair_distance, DistanceMatrix, ValidityCounts,
    WindowDistances,
};
pub use frequency::{calculate_frequencies, LocusFrequencyTable};
