//! Error type for partitioning and hashing operations.
//!
//! The pipeline recovers from nothing: every operation either completes or
//! surfaces the first error. Precondition violations are raised before any
//! kernel dispatch; allocation failures propagate unchanged from the
//! memory resource.

use crate::storage::DataType;

/// Errors surfaced by `hash_partition` and `hash`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    /// A column has a type the fixed-width kernels cannot process.
    #[error("column {index} has unsupported type {dtype:?} (fixed-width types only)")]
    UnsupportedType { index: usize, dtype: DataType },

    /// A key column index does not refer to a column of the input table.
    #[error("key column index {index} out of bounds for table with {columns} columns")]
    ColumnIndexOutOfBounds { index: usize, columns: usize },

    /// The seed vector passed to `hash` does not match the column count.
    #[error("seed count {seeds} does not match column count {columns}")]
    SeedCountMismatch { seeds: usize, columns: usize },

    /// A column carries a null bitmap but none of the key columns do, so the
    /// null-oblivious path was selected and cannot accept it.
    #[error("column {index} carries a null bitmap under the null-oblivious configuration")]
    UnexpectedNulls { index: usize },

    /// Row count exceeds the u32 domain of the routing tables.
    #[error("row count {0} exceeds the supported maximum")]
    RowCountTooLarge(usize),

    /// Partition count exceeds the u32 domain of the routing tables.
    #[error("partition count {0} exceeds the supported maximum")]
    PartitionCountTooLarge(usize),

    /// The memory resource could not satisfy a buffer request.
    #[error("device allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },
}
