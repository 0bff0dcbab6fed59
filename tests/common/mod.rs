#![allow(dead_code)]

use forge_partition::{Column, Table};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// One cell as a width-extended bit pattern, usable for exact comparison.
pub fn cell_bits(col: &Column, row: usize) -> u64 {
    match col.dtype().fixed_width().expect("fixed-width column") {
        1 => col.values::<u8>()[row] as u64,
        2 => col.values::<u16>()[row] as u64,
        4 => col.values::<u32>()[row] as u64,
        8 => col.values::<u64>()[row],
        _ => unreachable!(),
    }
}

/// Row `row` of `table` as one bit pattern per cell.
pub fn row_bits(table: &Table, row: usize) -> Vec<u64> {
    table.columns().iter().map(|col| cell_bits(col, row)).collect()
}

/// All rows of `table` as bit patterns, sorted, for multiset comparison.
pub fn sorted_rows(table: &Table) -> Vec<Vec<u64>> {
    let mut rows: Vec<Vec<u64>> = (0..table.num_rows()).map(|r| row_bits(table, r)).collect();
    rows.sort();
    rows
}

/// Partition sizes derived from the returned offsets and the row count.
pub fn partition_sizes(offsets: &[u32], num_rows: usize) -> Vec<usize> {
    (0..offsets.len())
        .map(|p| {
            let start = offsets[p] as usize;
            let end = offsets
                .get(p + 1)
                .map_or(num_rows, |&next| next as usize);
            end - start
        })
        .collect()
}

/// Assert the offsets vector is well-formed: starts at zero, non-decreasing,
/// sizes summing to the row count.
pub fn assert_offsets_closed(offsets: &[u32], num_rows: usize) {
    assert_eq!(offsets.first().copied(), Some(0));
    for pair in offsets.windows(2) {
        assert!(pair[0] <= pair[1], "offsets must be non-decreasing");
    }
    let total: usize = partition_sizes(offsets, num_rows).iter().sum();
    assert_eq!(total, num_rows);
}

/// The partition containing output row `row`, per the offsets vector.
pub fn partition_of_output_row(offsets: &[u32], num_rows: usize, row: usize) -> usize {
    assert!(row < num_rows);
    let mut partition = 0;
    for (p, &start) in offsets.iter().enumerate() {
        if (start as usize) <= row {
            partition = p;
        } else {
            break;
        }
    }
    partition
}
