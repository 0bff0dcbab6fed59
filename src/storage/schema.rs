//! Column data types and their physical properties.
//!
//! All partitionable types are fixed-width: integers of 1/2/4/8 bytes,
//! floats of 4/8 bytes, booleans stored as one byte, and temporal types
//! stored as their integer representation. `Utf8` exists so the
//! fixed-width-only contract of the kernels is enforceable at runtime.

/// Data types a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Stored as one byte per value (0 or 1).
    Bool,
    /// Days since the Unix epoch, stored as i32.
    Date32,
    /// Microseconds since the Unix epoch, stored as i64.
    Timestamp64,
    /// Variable-width UTF-8 strings. Not partitionable.
    Utf8,
}

impl DataType {
    /// Cell size in bytes, or `None` for variable-width types.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            DataType::Int8 | DataType::UInt8 | DataType::Bool => Some(1),
            DataType::Int16 | DataType::UInt16 => Some(2),
            DataType::Int32 | DataType::UInt32 | DataType::Float32 | DataType::Date32 => Some(4),
            DataType::Int64
            | DataType::UInt64
            | DataType::Float64
            | DataType::Timestamp64 => Some(8),
            DataType::Utf8 => None,
        }
    }

    pub fn is_fixed_width(self) -> bool {
        self.fixed_width().is_some()
    }

    /// Per-type default hash seed, used when the caller supplies none.
    pub fn default_hash_seed(self) -> u32 {
        match self {
            DataType::Int8 => 0x6A09_E667,
            DataType::Int16 => 0xBB67_AE85,
            DataType::Int32 => 0x3C6E_F372,
            DataType::Int64 => 0xA54F_F53A,
            DataType::UInt8 => 0x510E_527F,
            DataType::UInt16 => 0x9B05_688C,
            DataType::UInt32 => 0x1F83_D9AB,
            DataType::UInt64 => 0x5BE0_CD19,
            DataType::Float32 => 0x428A_2F98,
            DataType::Float64 => 0x7137_4491,
            DataType::Bool => 0xB5C0_FBCF,
            DataType::Date32 => 0xE9B5_DBA5,
            DataType::Timestamp64 => 0x3956_C25B,
            DataType::Utf8 => 0x59F1_11F1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[DataType] = &[
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::UInt8,
        DataType::UInt16,
        DataType::UInt32,
        DataType::UInt64,
        DataType::Float32,
        DataType::Float64,
        DataType::Bool,
        DataType::Date32,
        DataType::Timestamp64,
        DataType::Utf8,
    ];

    #[test]
    fn test_fixed_widths() {
        assert_eq!(DataType::Int8.fixed_width(), Some(1));
        assert_eq!(DataType::UInt16.fixed_width(), Some(2));
        assert_eq!(DataType::Float32.fixed_width(), Some(4));
        assert_eq!(DataType::Date32.fixed_width(), Some(4));
        assert_eq!(DataType::Timestamp64.fixed_width(), Some(8));
        assert_eq!(DataType::Bool.fixed_width(), Some(1));
        assert_eq!(DataType::Utf8.fixed_width(), None);
    }

    #[test]
    fn test_default_seeds_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(
                    a.default_hash_seed(),
                    b.default_hash_seed(),
                    "{:?} and {:?} share a seed",
                    a,
                    b
                );
            }
        }
    }
}
