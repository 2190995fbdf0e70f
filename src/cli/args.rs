// args.rs - Command line arguments definition

use crate::error::{AsdistError, Result};
use argh::FromArgs;
use std::path::Path;

/// Parse the process arguments.
///
/// `--help` prints the usage text and yields `None`. Parse failures become
/// usage errors instead of argh's exit status 1.
pub fn from_env<T: FromArgs>() -> Result<Option<T>> {
    let strings: Vec<String> = std::env::args().collect();
    let command = strings
        .first()
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("asdist");
    let rest: Vec<&str> = strings.iter().skip(1).map(String::as_str).collect();
    from_strings(command, &rest)
}

fn from_strings<T: FromArgs>(command: &str, args: &[&str]) -> Result<Option<T>> {
    match T::from_args(&[command], args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(early) => match early.status {
            Ok(()) => {
                println!("{}", early.output);
                Ok(None)
            }
            Err(()) => Err(AsdistError::usage(early.output.trim_end())),
        },
    }
}

#[derive(FromArgs, Debug, Default)]
/// asdist - Allele-sharing distance matrix for one window of SNP loci
pub struct Args {
    /// genotype file, one row per individual (or per locus with --pivoted)
    #[argh(option)]
    pub input: Option<String>,

    /// folder receiving Distances/, Frequencies/ and Log/
    #[argh(option)]
    pub output_folder: Option<String>,

    /// total number of loci in the genotype file
    #[argh(option)]
    pub total_snps: Option<usize>,

    /// total number of individuals in the genotype file
    #[argh(option)]
    pub total_individuals: Option<usize>,

    /// genotypes are encoded as 0/1/2 alternate allele counts
    #[argh(switch)]
    pub binary: bool,

    /// comma-separated allele symbols, e.g. A,C,T,G (required unless --binary)
    #[argh(option)]
    pub alleles: Option<String>,

    /// missing genotype marker (required unless --binary, default for binary: -)
    #[argh(option)]
    pub missing_char: Option<String>,

    /// input has one row per locus instead of one row per individual
    #[argh(switch)]
    pub pivoted: bool,

    /// loci per window (default: --total-snps)
    #[argh(option)]
    pub window_size: Option<usize>,

    /// index of the window to compute (default: 0)
    #[argh(option)]
    pub window_index: Option<usize>,

    /// comma-separated permutation of locus indices (default: file order)
    #[argh(option)]
    pub shuffled_file: Option<String>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Parse from an explicit argument list; argh's early exit becomes `Err`
    pub fn parse(command: &str, args: &[&str]) -> std::result::Result<Self, argh::EarlyExit> {
        <Self as FromArgs>::from_args(&[command], args)
    }
}
