// mod.rs - Genotype data module

pub mod allele;
pub mod decoder;
pub mod loaders;
pub mod window;

// Re-export main types for convenience
pub use allele::{AlleleAlphabet, AlleleCall, AlleleIndex};
pub use decoder::{BinaryDecoder, GenotypeDecoder, SymbolDecoder};
pub use loaders::{extract_window, InputLayout};
pub use window::{read_shuffled_indices, Window, WindowSpec};
