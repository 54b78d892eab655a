//! Built-in scalar, temporal, and identifier kinds

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every scalar a [`TypeDescriptor`](super::TypeDescriptor) can carry as a leaf
///
/// The display form doubles as the schema-name fragment used when a primitive
/// appears as a generic argument (`Page_String`, `Envelope_Int64`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString, EnumIter,
)]
pub enum PrimitiveKind {
    /// UTF-8 text
    String,
    /// A single character
    Char,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Signed 128-bit integer
    Int128,
    /// Unsigned 8-bit integer
    UInt8,
    /// Unsigned 16-bit integer
    UInt16,
    /// Unsigned 32-bit integer
    UInt32,
    /// Unsigned 64-bit integer
    UInt64,
    /// Unsigned 128-bit integer
    UInt128,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Arbitrary precision decimal
    Decimal,
    /// Arbitrary precision integer
    BigInteger,
    /// `true` / `false`
    Boolean,
    /// Calendar date without time
    Date,
    /// Wall-clock time without date
    Time,
    /// Date and time
    DateTime,
    /// Elapsed time span
    Duration,
    /// RFC 4122 identifier
    Uuid,
    /// URI / URL
    Uri,
    /// E-mail address
    Email,
    /// Raw bytes
    Binary,
}

impl PrimitiveKind {
    /// Whether the kind is one of the fixed-width integer kinds
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Int128
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
                | Self::UInt128
                | Self::BigInteger
        )
    }
}
