//! Columnar storage: data types, columns, null bitmaps, tables.

pub mod column;
pub mod null_bitmap;
pub mod schema;
pub mod table;

pub use column::{Column, NativeCell};
pub use null_bitmap::NullBitmap;
pub use schema::DataType;
pub use table::{Table, TableView};

pub(crate) use column::CellSlice;
