//! Error types for partition pruning.

use crate::types::DataType;
use crate::value::Value;
use alloc::string::String;
use core::fmt;

/// Result type alias for pruning operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for pruning operations.
///
/// A range search that lands in an uncovered hole is not an error; it is
/// reported through the `found_gap` flag of the selection instead.
#[derive(Debug)]
pub enum Error {
    /// A constant could not be coerced to the partitioning key type.
    Cast {
        value: Value,
        from: Option<DataType>,
        to: DataType,
    },
    /// The partitioning type code is neither HASH nor RANGE.
    UnsupportedScheme {
        code: u32,
    },
    /// Partition metadata violates the ordering rules.
    InvalidScheme {
        message: String,
    },
    /// Residual reconstruction met a combination that rangeset algebra
    /// should have made impossible.
    InvariantViolation {
        message: String,
    },
    /// A runtime parameter could not be resolved to a value.
    ParamResolution {
        param: u32,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Cast { value, from, to } => match from {
                Some(from) => write!(
                    f,
                    "Cannot select partition: unable to cast {:?} from {} to {}",
                    value,
                    from.name(),
                    to.name()
                ),
                None => write!(
                    f,
                    "Cannot select partition: unable to cast {:?} to {}",
                    value,
                    to.name()
                ),
            },
            Error::UnsupportedScheme { code } => {
                write!(f, "Unsupported partitioning type code: {}", code)
            }
            Error::InvalidScheme { message } => {
                write!(f, "Invalid partition scheme: {}", message)
            }
            Error::InvariantViolation { message } => {
                write!(f, "Pruning invariant violated: {}", message)
            }
            Error::ParamResolution { param, message } => {
                write!(f, "Cannot resolve parameter ${}: {}", param, message)
            }
        }
    }
}

impl Error {
    /// Creates a cast error.
    pub fn cast(value: Value, to: DataType) -> Self {
        let from = value.data_type();
        Error::Cast { value, from, to }
    }

    /// Creates an unsupported scheme error.
    pub fn unsupported_scheme(code: u32) -> Self {
        Error::UnsupportedScheme { code }
    }

    /// Creates an invalid scheme error.
    pub fn invalid_scheme(message: impl Into<String>) -> Self {
        Error::InvalidScheme {
            message: message.into(),
        }
    }

    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            message: message.into(),
        }
    }

    /// Creates a parameter resolution error.
    pub fn param_resolution(param: u32, message: impl Into<String>) -> Self {
        Error::ParamResolution {
            param,
            message: message.into(),
        }
    }
}
