// mod.rs - Genotype file loaders

mod individual_rows;
mod locus_rows;

use crate::data::decoder::GenotypeDecoder;
use crate::data::window::Window;
use crate::error::{AsdistError, Result};
use std::path::Path;

/// Row arrangement of a genotype file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputLayout {
    /// One line per individual, one token per locus
    #[default]
    RowPerIndividual,
    /// One line per locus, one token per individual ("pivoted")
    RowPerLocus,
}

impl InputLayout {
    pub fn from_pivoted(pivoted: bool) -> Self {
        if pivoted {
            InputLayout::RowPerLocus
        } else {
            InputLayout::RowPerIndividual
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InputLayout::RowPerIndividual => "one row per individual",
            InputLayout::RowPerLocus => "one row per locus (pivoted)",
        }
    }
}

/// Extract the requested loci of every individual from a genotype file.
///
/// `loci` holds original locus indices; window position `k` receives
/// `loci[k]`. Only the requested loci are decoded.
pub fn extract_window(
    path: &Path,
    loci: &[usize],
    n_individuals: usize,
    decoder: &dyn GenotypeDecoder,
    layout: InputLayout,
) -> Result<Window> {
    let slots = window_slots(loci)?;

    let window = match layout {
        InputLayout::RowPerIndividual => {
            individual_rows::read(path, loci, &slots, n_individuals, decoder)?
        }
        InputLayout::RowPerLocus => locus_rows::read(path, loci, &slots, n_individuals, decoder)?,
    };

    log::info!(
        "Window extracted from {} ({}): {} individuals x {} loci",
        path.display(),
        layout.description(),
        window.n_individuals(),
        window.n_loci()
    );
    Ok(window)
}

/// Map from original locus index to window position, indexed by original locus
fn window_slots(loci: &[usize]) -> Result<Vec<Option<usize>>> {
    let len = loci.iter().max().map_or(0, |&max| max + 1);
    let mut slots = vec![None; len];
    for (position, &locus) in loci.iter().enumerate() {
        if slots[locus].replace(position).is_some() {
            return Err(AsdistError::usage(format!(
                "Window lists locus {} more than once",
                locus
            )));
        }
    }
    Ok(slots)
}

fn format_error(
    path: &Path,
    line: usize,
    column: usize,
    value: &str,
    message: String,
) -> AsdistError {
    AsdistError::Format {
        path: path.to_path_buf(),
        line,
        column,
        value: value.to_string(),
        message,
    }
}
