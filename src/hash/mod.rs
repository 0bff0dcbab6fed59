//! Row hashing: the public `hash` operation and its kernels.

pub mod murmur;
mod row;

pub(crate) use row::RowHasher;

use crate::device::buffer::DeviceBuffer;
use crate::device::launch::{dispatch_blocks, LaunchConfig};
use crate::device::mem::MemoryResource;
use crate::error::PartitionError;
use crate::storage::{Column, DataType, TableView};

/// Hash every row of `input` into a 32-bit fingerprint.
///
/// `initial_seeds` supplies one seed per column; when empty, each column
/// uses its type-specific default seed. Returns a `UInt32` column with one
/// hash per row, allocated from `mr`.
///
/// Errors: seed count mismatch, variable-width column.
pub fn hash(
    input: &TableView<'_>,
    initial_seeds: &[u32],
    mr: &dyn MemoryResource,
) -> Result<Column, PartitionError> {
    let num_columns = input.num_columns();
    if !initial_seeds.is_empty() && initial_seeds.len() != num_columns {
        return Err(PartitionError::SeedCountMismatch {
            seeds: initial_seeds.len(),
            columns: num_columns,
        });
    }

    let seeds: Vec<u32> = if initial_seeds.is_empty() {
        input
            .columns()
            .iter()
            .map(|c| c.dtype().default_hash_seed())
            .collect()
    } else {
        initial_seeds.to_vec()
    };

    let rows = input.num_rows();
    if rows > u32::MAX as usize {
        return Err(PartitionError::RowCountTooLarge(rows));
    }
    if num_columns == 0 || rows == 0 {
        return Ok(Column::from_slice::<u32>(&[]));
    }

    let hasher = RowHasher::new(input, &seeds, input.has_null_mask())?;
    let out = DeviceBuffer::<u32>::zeroed(rows, mr)?;
    let out_ptr = out.ptr();
    let config = LaunchConfig::for_rows(rows);

    dispatch_blocks(&config, |block| {
        for row in config.block_rows(block) {
            // Safety: each block writes only its own row chunk.
            unsafe { out_ptr.write(row, hasher.hash_row(row)) };
        }
    });

    Ok(Column::from_device_buffer(
        DataType::UInt32,
        rows,
        out.into_bytes(),
    ))
}
