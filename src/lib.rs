//! forge-partition: block-parallel hash partitioner for columnar data.
//!
//! Given a table and a set of key columns, [`hash_partition`] redistributes
//! every row into one of N partitions so that rows with identical key hashes
//! land in the same partition, with the rows of each partition contiguous in
//! the output. The pipeline is two bulk-parallel phases over a fixed
//! thread-block geometry: a histogram kernel that assigns partitions and
//! builds per-block routing tables, and a per-column scatter kernel that
//! stages cells block-locally and writes them out in partition-contiguous
//! bursts. [`hash`] exposes the underlying 32-bit row hash directly.

pub mod device;
pub mod error;
pub mod hash;
pub mod partition;
pub mod storage;

pub use device::{MemoryResource, SystemMemoryResource, TrackingResource};
pub use error::PartitionError;
pub use hash::hash;
pub use partition::hash_partition;
pub use storage::{Column, DataType, NativeCell, NullBitmap, Table, TableView};
