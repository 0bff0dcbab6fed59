//! Columns: typed cell storage plus an optional null bitmap.
//!
//! Fixed-width cells live in an 8-byte-aligned device buffer so that kernels
//! can reinterpret them by physical width alone (1/2/4/8 bytes); the logical
//! type only matters for hashing seeds and schema checks. `Utf8` columns
//! carry offsets + bytes and are rejected by every kernel dispatch.

use crate::device::buffer::DeviceBuffer;
use crate::device::mem::system_resource;
use crate::storage::null_bitmap::NullBitmap;
use crate::storage::schema::DataType;

mod private {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Native Rust types storable as fixed-width column cells.
///
/// Sealed: only the primitive integer and float types qualify. Booleans and
/// temporal values go through the dedicated constructors.
pub trait NativeCell: private::Sealed + Copy + Send + Sync + 'static {
    /// The column type this Rust type maps to by default.
    const DATA_TYPE: DataType;
}

impl NativeCell for i8 {
    const DATA_TYPE: DataType = DataType::Int8;
}
impl NativeCell for i16 {
    const DATA_TYPE: DataType = DataType::Int16;
}
impl NativeCell for i32 {
    const DATA_TYPE: DataType = DataType::Int32;
}
impl NativeCell for i64 {
    const DATA_TYPE: DataType = DataType::Int64;
}
impl NativeCell for u8 {
    const DATA_TYPE: DataType = DataType::UInt8;
}
impl NativeCell for u16 {
    const DATA_TYPE: DataType = DataType::UInt16;
}
impl NativeCell for u32 {
    const DATA_TYPE: DataType = DataType::UInt32;
}
impl NativeCell for u64 {
    const DATA_TYPE: DataType = DataType::UInt64;
}
impl NativeCell for f32 {
    const DATA_TYPE: DataType = DataType::Float32;
}
impl NativeCell for f64 {
    const DATA_TYPE: DataType = DataType::Float64;
}

/// A width-erased view of a fixed-width column's cells.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CellSlice<'a> {
    W1(&'a [u8]),
    W2(&'a [u16]),
    W4(&'a [u32]),
    W8(&'a [u64]),
}

#[derive(Debug)]
enum ColumnData {
    Fixed(DeviceBuffer<u8>),
    Utf8 { offsets: Vec<u32>, bytes: Vec<u8> },
}

/// One column of a table.
#[derive(Debug)]
pub struct Column {
    dtype: DataType,
    len: usize,
    data: ColumnData,
    nulls: Option<NullBitmap>,
}

impl Column {
    /// Build a fixed-width column from native values.
    pub fn from_slice<T: NativeCell>(values: &[T]) -> Self {
        Self::from_slice_with_type(values, T::DATA_TYPE)
    }

    /// Build a fixed-width column of `dtype` from native values of the same
    /// physical width (e.g. `Date32` from `&[i32]`).
    ///
    /// # Panics
    /// Panics if the widths differ or `dtype` is variable-width.
    pub fn from_slice_with_type<T: NativeCell>(values: &[T], dtype: DataType) -> Self {
        let width = dtype.fixed_width().expect("fixed-width dtype required");
        assert_eq!(
            width,
            std::mem::size_of::<T>(),
            "cell width mismatch for {:?}",
            dtype
        );
        let data = DeviceBuffer::from_slice(values, system_resource())
            .expect("column allocation failed");
        Self {
            dtype,
            len: values.len(),
            data: ColumnData::Fixed(data.into_bytes()),
            nulls: None,
        }
    }

    /// Build a `Bool` column, one byte per value.
    pub fn from_bools(values: &[bool]) -> Self {
        let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        Self::from_slice_with_type(&bytes, DataType::Bool)
    }

    /// Build a `Utf8` column (offsets + bytes representation).
    pub fn utf8(values: &[&str]) -> Self {
        let mut offsets = Vec::with_capacity(values.len() + 1);
        let mut bytes = Vec::new();
        offsets.push(0u32);
        for v in values {
            bytes.extend_from_slice(v.as_bytes());
            offsets.push(bytes.len() as u32);
        }
        Self {
            dtype: DataType::Utf8,
            len: values.len(),
            data: ColumnData::Utf8 { offsets, bytes },
            nulls: None,
        }
    }

    /// A zero-row column of `dtype`.
    pub fn empty(dtype: DataType) -> Self {
        match dtype.fixed_width() {
            Some(_) => Self {
                dtype,
                len: 0,
                data: ColumnData::Fixed(
                    DeviceBuffer::zeroed(0, system_resource()).expect("empty allocation"),
                ),
                nulls: None,
            },
            None => Self::utf8(&[]),
        }
    }

    /// Wrap a kernel-produced cell buffer. `bytes.len()` must equal
    /// `len * width`.
    pub(crate) fn from_device_buffer(
        dtype: DataType,
        len: usize,
        bytes: DeviceBuffer<u8>,
    ) -> Self {
        debug_assert_eq!(bytes.len(), len * dtype.fixed_width().expect("fixed-width dtype"));
        Self {
            dtype,
            len,
            data: ColumnData::Fixed(bytes),
            nulls: None,
        }
    }

    /// Attach a null bitmap.
    ///
    /// # Panics
    /// Panics if the bitmap length differs from the column length.
    pub fn with_nulls(mut self, nulls: NullBitmap) -> Self {
        assert_eq!(nulls.len(), self.len, "null bitmap length mismatch");
        self.nulls = Some(nulls);
        self
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a null bitmap is attached (regardless of its null count).
    pub fn has_null_mask(&self) -> bool {
        self.nulls.is_some()
    }

    pub fn null_bitmap(&self) -> Option<&NullBitmap> {
        self.nulls.as_ref()
    }

    /// Typed view of a fixed-width column's cells.
    ///
    /// # Panics
    /// Panics if `T`'s width differs from the column's cell width, or the
    /// column is variable-width.
    pub fn values<T: NativeCell>(&self) -> &[T] {
        let width = self
            .dtype
            .fixed_width()
            .expect("values() requires a fixed-width column");
        assert_eq!(
            width,
            std::mem::size_of::<T>(),
            "cell width mismatch for {:?}",
            self.dtype
        );
        match &self.data {
            // 8-byte-aligned backing makes any cell width valid here.
            ColumnData::Fixed(buf) => unsafe {
                std::slice::from_raw_parts(buf.contents() as *const T, self.len)
            },
            ColumnData::Utf8 { .. } => unreachable!(),
        }
    }

    /// Width-erased cell view, or `None` for variable-width columns.
    pub(crate) fn cell_slice(&self) -> Option<CellSlice<'_>> {
        let width = self.dtype.fixed_width()?;
        let buf = match &self.data {
            ColumnData::Fixed(buf) => buf,
            ColumnData::Utf8 { .. } => return None,
        };
        // 8-byte-aligned backing makes any cell width valid here.
        unsafe {
            Some(match width {
                1 => CellSlice::W1(std::slice::from_raw_parts(buf.contents(), self.len)),
                2 => CellSlice::W2(std::slice::from_raw_parts(
                    buf.contents() as *const u16,
                    self.len,
                )),
                4 => CellSlice::W4(std::slice::from_raw_parts(
                    buf.contents() as *const u32,
                    self.len,
                )),
                8 => CellSlice::W8(std::slice::from_raw_parts(
                    buf.contents() as *const u64,
                    self.len,
                )),
                _ => unreachable!("unsupported cell width {}", width),
            })
        }
    }

    /// String value accessor for `Utf8` columns (host-side only).
    ///
    /// # Panics
    /// Panics if the column is not `Utf8` or `row` is out of bounds.
    pub fn utf8_value(&self, row: usize) -> &str {
        match &self.data {
            ColumnData::Utf8 { offsets, bytes } => {
                assert!(row < self.len, "row {} out of bounds ({})", row, self.len);
                let start = offsets[row] as usize;
                let end = offsets[row + 1] as usize;
                std::str::from_utf8(&bytes[start..end]).expect("column bytes are valid UTF-8")
            }
            ColumnData::Fixed(_) => panic!("utf8_value() on a fixed-width column"),
        }
    }
}
