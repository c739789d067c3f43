//! Data type definitions for partitioning keys and predicate constants.

/// Supported data types for partitioning keys and predicate values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
    /// Date and time stored as Unix timestamp (milliseconds)
    DateTime,
    /// Binary data
    Bytes,
    /// Array of scalar values (only appears as a predicate constant)
    Array,
}

impl DataType {
    /// Returns true for the integer and floating point types.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int32 | DataType::Int64 | DataType::Float64)
    }

    /// Returns whether values of this type can be compared against values of
    /// `other` without an explicit cast.
    pub fn is_comparable_with(&self, other: DataType) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }

    /// Returns whether this type can be used as a partitioning key.
    pub fn is_partitionable(&self) -> bool {
        !matches!(self, DataType::Array)
    }

    /// Returns a short display name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::DateTime => "datetime",
            DataType::Bytes => "bytes",
            DataType::Array => "array",
        }
    }
}
