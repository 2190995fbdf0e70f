// window.rs - Locus windows and window selection

use super::allele::AlleleCall;
use crate::error::{AsdistError, Result};
use std::fs;
use std::path::Path;

/// Genotype calls of every individual over one window of loci.
///
/// Stored individual-major: the calls of individual `i` occupy
/// `calls[i * n_loci .. (i + 1) * n_loci]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    n_individuals: usize,
    loci: Vec<usize>,
    calls: Vec<AlleleCall>,
}

impl Window {
    /// Empty window where every call starts out missing
    pub fn new(n_individuals: usize, loci: Vec<usize>) -> Self {
        let calls = vec![AlleleCall::Missing; n_individuals * loci.len()];
        Self {
            n_individuals,
            loci,
            calls,
        }
    }

    /// Build a window from per-individual rows of calls
    pub fn from_rows(loci: Vec<usize>, rows: Vec<Vec<AlleleCall>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == loci.len()));
        let n_individuals = rows.len();
        let calls = rows.into_iter().flatten().collect();
        Self {
            n_individuals,
            loci,
            calls,
        }
    }

    pub fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    pub fn n_loci(&self) -> usize {
        self.loci.len()
    }

    /// Original locus index of each window position
    pub fn original_loci(&self) -> &[usize] {
        &self.loci
    }

    pub fn call(&self, individual: usize, locus: usize) -> AlleleCall {
        self.calls[individual * self.loci.len() + locus]
    }

    pub fn set_call(&mut self, individual: usize, locus: usize, call: AlleleCall) {
        let n_loci = self.loci.len();
        self.calls[individual * n_loci + locus] = call;
    }

    /// All calls of one individual, indexed by window locus
    pub fn individual(&self, individual: usize) -> &[AlleleCall] {
        let n_loci = self.loci.len();
        &self.calls[individual * n_loci..(individual + 1) * n_loci]
    }

    /// Calls of every individual at one window locus
    pub fn locus_calls(&self, locus: usize) -> impl Iterator<Item = AlleleCall> + '_ {
        (0..self.n_individuals).map(move |i| self.call(i, locus))
    }
}

/// Which slice of the (optionally shuffled) locus order a run processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub window_size: usize,
    pub window_index: usize,
    pub total_snps: usize,
}

impl WindowSpec {
    /// Half-open `[start, end)` range into the locus order, or `None` past the last window
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let start = self.window_size.checked_mul(self.window_index)?;
        if start >= self.total_snps {
            return None;
        }
        let end = start.saturating_add(self.window_size).min(self.total_snps);
        Some((start, end))
    }

    /// Original locus indices of this window, in processing order.
    ///
    /// Without a permutation the identity order is used.
    pub fn select_loci(&self, permutation: Option<&[usize]>) -> Option<Vec<usize>> {
        let (start, end) = self.bounds()?;
        Some(match permutation {
            Some(order) => order[start..end].to_vec(),
            None => (start..end).collect(),
        })
    }
}

/// Read a shuffled locus order: one line of comma-separated indices.
///
/// A trailing comma is accepted. The order must cover `total_snps` entries,
/// each below `total_snps`.
pub fn read_shuffled_indices(path: &Path, total_snps: usize) -> Result<Vec<usize>> {
    let content = fs::read_to_string(path).map_err(|e| AsdistError::io(path, e))?;
    let first_line = content.lines().next().unwrap_or("");

    let mut order = Vec::with_capacity(total_snps);
    for token in first_line.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let index: usize = token.parse().map_err(|_| {
            AsdistError::persisted(path, format!("'{}' is not a locus index", token))
        })?;
        if index >= total_snps {
            return Err(AsdistError::persisted(
                path,
                format!("locus index {} is out of range for {} SNPs", index, total_snps),
            ));
        }
        order.push(index);
    }

    if order.len() < total_snps {
        return Err(AsdistError::persisted(
            path,
            format!(
                "lists {} locus indices, expected {}",
                order.len(),
                total_snps
            ),
        ));
    }

    Ok(order)
}
