//! Hash partitioning: the public `hash_partition` operation and its kernel
//! pipeline.
//!
//! Three phases, serialized by data dependency: the histogram kernel assigns
//! every row a partition and builds the routing tables; the offset builder
//! scans them into write addresses; the scatter kernel then moves each
//! column into partition-contiguous order. The host is synchronous: the
//! returned offsets are final when the call returns.

mod histogram;
mod offsets;
mod partitioner;
mod scatter;

use crate::device::launch::LaunchConfig;
use crate::device::mem::{system_resource, MemoryResource};
use crate::error::PartitionError;
use crate::hash::RowHasher;
use crate::storage::{Table, TableView};

use histogram::{compute_row_partitions, RoutingTables};
use offsets::{exclusive_scan, exclusive_scan_in_place};
use partitioner::{BitmaskPartitioner, ModuloPartitioner, Partitioner};
use scatter::{scatter_column, ScatterContext};

/// Redistribute the rows of `input` into `num_partitions` partitions keyed
/// by the hash of the columns at `key_indices`.
///
/// Returns the partitioned table (same schema and row count, rows of one
/// partition contiguous) and the starting row offset of each partition.
/// Output column buffers come from `mr`; the output never carries null
/// bitmaps.
///
/// Rows whose key cells are bitwise equal land in the same partition; under
/// the null-aware configuration (any key column carries a null bitmap),
/// rows that are null in the same key column are likewise co-located.
///
/// An empty input, an empty key set, or `num_partitions == 0` yields a
/// zero-row table and an empty offsets vector.
///
/// Errors: out-of-bounds key index; variable-width key column; a null
/// bitmap on any column under the null-oblivious configuration; allocation
/// failure from `mr`.
pub fn hash_partition(
    input: &TableView<'_>,
    key_indices: &[usize],
    num_partitions: usize,
    mr: &dyn MemoryResource,
) -> Result<(Table, Vec<u32>), PartitionError> {
    // The empty short-circuit wins over every other precondition: a zero-row
    // input, an empty key set, or a zero partition count yields an
    // empty-like output even when the key indices or types are bad.
    let rows = input.num_rows();
    if num_partitions == 0 || rows == 0 || key_indices.is_empty() {
        return Ok((Table::empty_like(input), Vec::new()));
    }

    let num_columns = input.num_columns();
    for &index in key_indices {
        if index >= num_columns {
            return Err(PartitionError::ColumnIndexOutOfBounds {
                index,
                columns: num_columns,
            });
        }
    }
    for &index in key_indices {
        let dtype = input.column(index).dtype();
        if !dtype.is_fixed_width() {
            return Err(PartitionError::UnsupportedType { index, dtype });
        }
    }

    if rows > u32::MAX as usize {
        return Err(PartitionError::RowCountTooLarge(rows));
    }
    if num_partitions > u32::MAX as usize {
        return Err(PartitionError::PartitionCountTooLarge(num_partitions));
    }

    let keys = input.select(key_indices)?;
    let nullable = keys.has_null_mask();
    if !nullable {
        for (index, column) in input.columns().iter().enumerate() {
            if column.has_null_mask() {
                return Err(PartitionError::UnexpectedNulls { index });
            }
        }
    }

    let seeds: Vec<u32> = keys
        .columns()
        .iter()
        .map(|c| c.dtype().default_hash_seed())
        .collect();
    let hasher = RowHasher::new(&keys, &seeds, nullable)?;

    if num_partitions.is_power_of_two() {
        partition_with(
            BitmaskPartitioner::new(num_partitions as u32),
            input,
            &hasher,
            num_partitions,
            mr,
        )
    } else {
        partition_with(
            ModuloPartitioner::new(num_partitions as u32),
            input,
            &hasher,
            num_partitions,
            mr,
        )
    }
}

fn partition_with<P: Partitioner>(
    partitioner: P,
    input: &TableView<'_>,
    hasher: &RowHasher<'_>,
    num_partitions: usize,
    mr: &dyn MemoryResource,
) -> Result<(Table, Vec<u32>), PartitionError> {
    let rows = input.num_rows();
    let config = LaunchConfig::for_rows(rows);

    let mut tables = RoutingTables::allocate(rows, num_partitions, &config, system_resource())?;
    compute_row_partitions(hasher, partitioner, &config, &tables);

    let block_scan = exclusive_scan(&tables.block_histogram, system_resource())?;
    exclusive_scan_in_place(&mut tables.global_histogram);
    let partition_offsets = tables.global_histogram.to_vec();

    let ctx = ScatterContext {
        config: &config,
        num_partitions,
        row_partition: tables.row_partition.as_slice(),
        row_local_offset: tables.row_local_offset.as_slice(),
        block_histogram: tables.block_histogram.as_slice(),
        block_scan: block_scan.as_slice(),
    };

    let mut output = Vec::with_capacity(input.num_columns());
    for (index, column) in input.columns().iter().enumerate() {
        output.push(scatter_column(column, index, &ctx, mr)?);
    }

    Ok((Table::new(output), partition_offsets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mem::{system_resource, TrackingResource};
    use crate::storage::{Column, DataType, NullBitmap, Table};

    #[test]
    fn test_unsupported_key_type_fails_before_allocating() {
        let table = Table::new(vec![Column::utf8(&["a", "b"])]);
        let tracking = TrackingResource::new(system_resource());
        let err = hash_partition(&table.view(), &[0], 2, &tracking).unwrap_err();
        assert_eq!(
            err,
            PartitionError::UnsupportedType { index: 0, dtype: DataType::Utf8 }
        );
        assert_eq!(tracking.allocations(), 0);
    }

    #[test]
    fn test_key_index_out_of_bounds() {
        let table = Table::new(vec![Column::from_slice(&[1i32])]);
        let err = hash_partition(&table.view(), &[2], 2, system_resource()).unwrap_err();
        assert_eq!(
            err,
            PartitionError::ColumnIndexOutOfBounds { index: 2, columns: 1 }
        );
    }

    #[test]
    fn test_null_mask_rejected_on_null_oblivious_path() {
        let keys = Column::from_slice(&[1i32, 2]);
        let values =
            Column::from_slice(&[1i64, 2]).with_nulls(NullBitmap::from_nulls(&[false, true]));
        let table = Table::new(vec![keys, values]);
        let err = hash_partition(&table.view(), &[0], 2, system_resource()).unwrap_err();
        assert_eq!(err, PartitionError::UnexpectedNulls { index: 1 });
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        let table = Table::new(vec![Column::from_slice::<i32>(&[])]);
        for (keys, n) in [(&[0usize][..], 4), (&[0][..], 0), (&[][..], 4)] {
            let (out, offsets) = hash_partition(&table.view(), keys, n, system_resource()).unwrap();
            assert_eq!(out.num_rows(), 0);
            assert_eq!(out.num_columns(), 1);
            assert!(offsets.is_empty());
        }
    }

    #[test]
    fn test_empty_short_circuit_wins_over_bad_keys() {
        // Zero rows with an out-of-bounds key index: still the empty output,
        // not an error.
        let zero_rows = Table::new(vec![Column::from_slice::<i32>(&[])]);
        let (out, offsets) =
            hash_partition(&zero_rows.view(), &[99], 4, system_resource()).unwrap();
        assert_eq!(out.num_rows(), 0);
        assert!(offsets.is_empty());

        // Zero partitions with a variable-width key column: likewise.
        let utf8_rows = Table::new(vec![Column::utf8(&[])]);
        let (out, offsets) =
            hash_partition(&utf8_rows.view(), &[0], 0, system_resource()).unwrap();
        assert_eq!(out.num_rows(), 0);
        assert!(offsets.is_empty());

        // Non-empty input, zero partitions, out-of-bounds key index: the
        // partition count alone triggers the short-circuit.
        let rows = Table::new(vec![Column::from_slice(&[1i32, 2])]);
        let (out, offsets) = hash_partition(&rows.view(), &[5], 0, system_resource()).unwrap();
        assert_eq!(out.num_rows(), 0);
        assert_eq!(out.num_columns(), 1);
        assert!(offsets.is_empty());
    }
}
