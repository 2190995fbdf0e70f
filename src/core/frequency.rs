// frequency.rs - Per-locus allele counts

use crate::data::{AlleleCall, Window};

/// Allele counts per window locus.
///
/// Each row holds one slot per alphabet symbol followed by the missing slot.
/// Every individual adds exactly two instances to a row, so rows sum to
/// `2 * individuals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusFrequencyTable {
    slots: usize,
    counts: Vec<u64>,
}

impl LocusFrequencyTable {
    /// All-zero table
    pub fn zeros(n_loci: usize, slots: usize) -> Self {
        Self {
            slots,
            counts: vec![0; n_loci * slots],
        }
    }

    /// Build from rows read back from disk; all rows must have `slots` entries
    pub fn from_rows(rows: Vec<Vec<u64>>, slots: usize) -> Result<Self, String> {
        let mut counts = Vec::with_capacity(rows.len() * slots);
        for (locus, row) in rows.into_iter().enumerate() {
            if row.len() != slots {
                return Err(format!(
                    "row {} has {} counts, expected {}",
                    locus + 1,
                    row.len(),
                    slots
                ));
            }
            counts.extend(row);
        }
        Ok(Self { slots, counts })
    }

    pub fn n_loci(&self) -> usize {
        if self.slots == 0 {
            0
        } else {
            self.counts.len() / self.slots
        }
    }

    /// Slots per row, the missing slot included
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn row(&self, locus: usize) -> &[u64] {
        &self.counts[locus * self.slots..(locus + 1) * self.slots]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.counts.chunks(self.slots.max(1))
    }

    pub fn count(&self, locus: usize, allele: usize) -> u64 {
        self.counts[locus * self.slots + allele]
    }

    pub fn missing(&self, locus: usize) -> u64 {
        self.counts[(locus + 1) * self.slots - 1]
    }

    /// Observed allele instances at a locus (the missing slot excluded)
    pub fn non_missing(&self, locus: usize) -> u64 {
        let row = self.row(locus);
        row[..row.len() - 1].iter().sum()
    }

    fn add(&mut self, locus: usize, slot: usize, amount: u64) {
        self.counts[locus * self.slots + slot] += amount;
    }
}

/// Count allele occurrences at every locus of a window.
///
/// A missing call adds two to the missing slot; an observed call adds one to
/// the slot of each of its two alleles.
pub fn calculate_frequencies(window: &Window, slots: usize) -> LocusFrequencyTable {
    let n_loci = window.n_loci();
    let mut table = LocusFrequencyTable::zeros(n_loci, slots);
    let missing_slot = slots - 1;
    let log_interval = std::cmp::max(1, n_loci / 100);

    for locus in 0..n_loci {
        if locus % log_interval == 0 {
            log::info!("calcFrequenciesPerLocus finished {} out of {}", locus, n_loci);
        }
        for call in window.locus_calls(locus) {
            match call {
                AlleleCall::Called(a, b) => {
                    table.add(locus, a as usize, 1);
                    table.add(locus, b as usize, 1);
                }
                AlleleCall::Missing => table.add(locus, missing_slot, 2),
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AlleleAlphabet, AlleleCall::*};

    fn acgt_window() -> Window {
        // 4 individuals, 3 loci, alphabet A,C,T,G
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
    fn test_frequencies_without_missing() {
        let alphabet = AlleleAlphabet::parse("A,C,T,G").unwrap();
        let table = calculate_frequencies(&acgt_window(), alphabet.slots());

        assert_eq!(table.n_loci(), 3);
        assert_eq!(table.slots(), 5);
        assert_eq!(table.row(0), &[4, 1, 2, 1, 0]);
        assert_eq!(table.row(1), &[0, 6, 2, 0, 0]);
        assert_eq!(table.row(2), &[2, 0, 0, 6, 0]);
        for row in table.rows() {
            assert_eq!(row.iter().sum::<u64>(), 8);
        }
    }

    #[test]
    fn test_missing_call_counts_twice() {
        let window = Window::from_rows(
            vec![0, 1],
            vec![
                vec![Called(1, 0), Missing],
                vec![Missing, Called(1, 1)],
                vec![Called(1, 1), Called(0, 0)],
            ],
        );
        let table = calculate_frequencies(&window, AlleleAlphabet::binary().slots());

        assert_eq!(table.row(0), &[1, 3, 2]);
        assert_eq!(table.row(1), &[2, 2, 2]);
        assert_eq!(table.missing(0), 2);
        assert_eq!(table.non_missing(0), 4);
        assert_eq!(table.count(1, 1), 2);
        for row in table.rows() {
            assert_eq!(row.iter().sum::<u64>(), 6);
        }
    }

    #[test]
    fn test_from_rows_checks_width() {
        let table = LocusFrequencyTable::from_rows(vec![vec![1, 2, 3], vec![0, 6, 0]], 3).unwrap();
        assert_eq!(table.n_loci(), 2);
        assert_eq!(table.row(1), &[0, 6, 0]);

        assert!(LocusFrequencyTable::from_rows(vec![vec![1, 2]], 3).is_err());
    }
}
