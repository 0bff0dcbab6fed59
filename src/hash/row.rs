//! Row hasher: one 32-bit fingerprint per row of a table view.
//!
//! Each cell is hashed with MurmurHash3 over its little-endian bytes, seeded
//! per column; cell hashes are folded left to right. Under the null-aware
//! configuration a null cell contributes a fixed sentinel instead of its bit
//! pattern, so rows that are null in the same column are hash-equivalent in
//! that column.

use crate::error::PartitionError;
use crate::hash::murmur::{combine, murmur3_32};
use crate::storage::null_bitmap::NullBitmap;
use crate::storage::table::TableView;
use crate::storage::CellSlice;

/// Hash contributed by a null cell, identical for every column.
pub(crate) const NULL_HASH: u32 = u32::MAX;

#[derive(Debug)]
struct ColumnHasher<'a> {
    cells: CellSlice<'a>,
    nulls: Option<&'a NullBitmap>,
    seed: u32,
}

impl ColumnHasher<'_> {
    #[inline]
    fn hash_cell(&self, row: usize) -> u32 {
        if let Some(nulls) = self.nulls {
            if nulls.is_null(row) {
                return NULL_HASH;
            }
        }
        match self.cells {
            CellSlice::W1(s) => murmur3_32(&s[row].to_le_bytes(), self.seed),
            CellSlice::W2(s) => murmur3_32(&s[row].to_le_bytes(), self.seed),
            CellSlice::W4(s) => murmur3_32(&s[row].to_le_bytes(), self.seed),
            CellSlice::W8(s) => murmur3_32(&s[row].to_le_bytes(), self.seed),
        }
    }
}

/// Hashes whole rows of a table view. Pure: the same view and seeds produce
/// the same hash for a row on every call.
#[derive(Debug)]
pub(crate) struct RowHasher<'a> {
    columns: Vec<ColumnHasher<'a>>,
}

impl<'a> RowHasher<'a> {
    /// Build a hasher over `view` with one seed per column.
    ///
    /// `nullable` selects the null-aware path; when false, null bitmaps are
    /// never consulted. Rejects variable-width columns.
    pub fn new(
        view: &TableView<'a>,
        seeds: &[u32],
        nullable: bool,
    ) -> Result<Self, PartitionError> {
        debug_assert_eq!(seeds.len(), view.num_columns());
        let mut columns = Vec::with_capacity(view.num_columns());
        for (index, (&col, &seed)) in view.columns().iter().zip(seeds).enumerate() {
            let cells = col.cell_slice().ok_or(PartitionError::UnsupportedType {
                index,
                dtype: col.dtype(),
            })?;
            columns.push(ColumnHasher {
                cells,
                nulls: if nullable { col.null_bitmap() } else { None },
                seed,
            });
        }
        Ok(Self { columns })
    }

    /// Hash one row: first column's cell hash, folded with each subsequent
    /// column's in order.
    #[inline]
    pub fn hash_row(&self, row: usize) -> u32 {
        let mut iter = self.columns.iter();
        let first = iter.next().expect("at least one column");
        let mut hash = first.hash_cell(row);
        for col in iter {
            hash = combine(hash, col.hash_cell(row));
        }
        hash
    }
}
