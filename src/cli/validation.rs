// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::data::decoder::DEFAULT_BINARY_MISSING;
use crate::data::{
    AlleleAlphabet, BinaryDecoder, GenotypeDecoder, InputLayout, SymbolDecoder, WindowSpec,
};
use crate::error::{AsdistError, Result};
use crate::pipeline::RunSettings;
use std::path::PathBuf;

fn required<T: Clone>(value: &Option<T>, flag: &str) -> Result<T> {
    value
        .clone()
        .ok_or_else(|| AsdistError::usage(format!("{} is required", flag)))
}

fn positive(value: usize, flag: &str) -> Result<usize> {
    if value == 0 {
        return Err(AsdistError::usage(format!("{} must be greater than 0", flag)));
    }
    Ok(value)
}

fn validate_missing_char(missing: &str) -> Result<()> {
    if missing.is_empty() || missing.chars().any(char::is_whitespace) {
        return Err(AsdistError::usage(format!(
            "Invalid missing marker '{}': it must be a non-empty token without whitespace",
            missing
        )));
    }
    Ok(())
}

/// Select the genotype decoder from the encoding options
fn build_decoder(args: &Args) -> Result<Box<dyn GenotypeDecoder>> {
    if args.binary {
        if args.alleles.is_some() {
            return Err(AsdistError::usage(
                "--alleles is not compatible with --binary (the binary alphabet is fixed to 0,1)",
            ));
        }
        let missing = args
            .missing_char
            .clone()
            .unwrap_or_else(|| DEFAULT_BINARY_MISSING.to_string());
        validate_missing_char(&missing)?;
        if ["0", "1", "2"].contains(&missing.as_str()) {
            return Err(AsdistError::usage(format!(
                "Missing marker '{}' collides with a binary genotype value",
                missing
            )));
        }
        return Ok(Box::new(BinaryDecoder::new(missing)));
    }

    let alleles = required(&args.alleles, "--alleles (unless --binary)")?;
    let missing = required(&args.missing_char, "--missing-char (unless --binary)")?;
    let alphabet = AlleleAlphabet::parse(&alleles)?;
    validate_missing_char(&missing)?;
    if alphabet.contains(&missing) {
        return Err(AsdistError::usage(format!(
            "Missing marker '{}' is also listed in --alleles",
            missing
        )));
    }
    Ok(Box::new(SymbolDecoder::new(alphabet, missing)))
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<RunSettings> {
    let input = required(&args.input, "--input")?;
    let output_folder = required(&args.output_folder, "--output-folder")?;
    let total_snps = positive(required(&args.total_snps, "--total-snps")?, "--total-snps")?;
    let total_individuals = positive(
        required(&args.total_individuals, "--total-individuals")?,
        "--total-individuals",
    )?;

    let decoder = build_decoder(args)?;

    let window_size = positive(args.window_size.unwrap_or(total_snps), "--window-size")?;
    if window_size > total_snps {
        eprintln!(
            "⚠️  Window size {} exceeds the {} available SNPs, the window is truncated",
            window_size,
            total_snps
        );
    }

    Ok(RunSettings {
        input: PathBuf::from(input),
        output_folder: PathBuf::from(output_folder),
        total_individuals,
        decoder,
        layout: InputLayout::from_pivoted(args.pivoted),
        window: WindowSpec {
            window_size,
            window_index: args.window_index.unwrap_or(0),
            total_snps,
        },
        shuffled_file: args.shuffled_file.as_ref().map(PathBuf::from),
    })
}
