// config.rs - Configuration file support

use crate::error::{AsdistError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub output_folder: Option<String>,
    pub shuffled_file: Option<String>,

    // Dataset shape
    pub total_snps: Option<usize>,
    pub total_individuals: Option<usize>,

    // Genotype encoding
    pub binary: Option<bool>,
    pub alleles: Option<String>,
    pub missing_char: Option<String>,
    pub pivoted: Option<bool>,

    // Window
    pub window_size: Option<usize>,
    pub window_index: Option<usize>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AsdistError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| AsdistError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# asdist.toml - Configuration file for asdist
# Command line arguments override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Genotype file: one row per individual, whitespace-separated tokens
input = "/path/to/genotypes.txt"

# Folder receiving Distances/, Frequencies/ and Log/
output_folder = "/path/to/results"

# Comma-separated permutation of locus indices (omit for file order)
# shuffled_file = "/path/to/shuffled.txt"

# =============================================================================
# DATASET
# =============================================================================

total_snps = 100000
total_individuals = 500

# =============================================================================
# GENOTYPE ENCODING
# =============================================================================

# 0/1/2 alternate allele counts; when true, alleles is not used
binary = false

# Allele symbols; tokens look like "A,C"
alleles = "A,C,T,G"

# Missing genotype marker (binary default: "-")
missing_char = "N"

# One row per locus instead of one row per individual
pivoted = false

# =============================================================================
# WINDOW
# =============================================================================

# Loci per window (defaults to total_snps)
window_size = 10000

# Usually set per job on the command line
# window_index = 0
"#
        .to_string()
    }
}
