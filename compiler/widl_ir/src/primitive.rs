//! Builtin scalar and string type kinds, shared by the syntax tree and the
//! resolved model.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Octet,
    Short,
    UnsignedShort,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    UnrestrictedFloat,
    Double,
    UnrestrictedDouble,
}

impl PrimitiveKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Byte
                | PrimitiveKind::Octet
                | PrimitiveKind::Short
                | PrimitiveKind::UnsignedShort
                | PrimitiveKind::Long
                | PrimitiveKind::UnsignedLong
                | PrimitiveKind::LongLong
                | PrimitiveKind::UnsignedLongLong
        )
    }

    /// Types usable as the index of an indexed special operation.
    pub fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::UnsignedShort
                | PrimitiveKind::UnsignedLong
                | PrimitiveKind::UnsignedLongLong
        )
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Float
                | PrimitiveKind::UnrestrictedFloat
                | PrimitiveKind::Double
                | PrimitiveKind::UnrestrictedDouble
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Octet => "octet",
            PrimitiveKind::Short => "short",
            PrimitiveKind::UnsignedShort => "unsigned short",
            PrimitiveKind::Long => "long",
            PrimitiveKind::UnsignedLong => "unsigned long",
            PrimitiveKind::LongLong => "long long",
            PrimitiveKind::UnsignedLongLong => "unsigned long long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::UnrestrictedFloat => "unrestricted float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::UnrestrictedDouble => "unrestricted double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StringKind {
    DomString,
    ByteString,
    UsvString,
}

impl StringKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StringKind::DomString => "DOMString",
            StringKind::ByteString => "ByteString",
            StringKind::UsvString => "USVString",
        }
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constant or default value literal.
///
/// Floats are stored as `u64` bits to keep `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Boolean(bool),
    /// Wide enough for every `long long` and `unsigned long long` value.
    Integer(i128),
    Float(u64),
    Infinity,
    NegativeInfinity,
    NaN,
    Null,
}

impl ConstValue {
    pub fn float(value: f64) -> Self {
        ConstValue::Float(value.to_bits())
    }
}

/// Default value of an optional argument or dictionary member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultValue {
    Const(ConstValue),
    String(crate::Name),
    EmptySequence,
    EmptyDictionary,
}

/// Special operation keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialKind {
    Getter,
    Setter,
    Deleter,
    Creator,
    Stringifier,
}

impl SpecialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialKind::Getter => "getter",
            SpecialKind::Setter => "setter",
            SpecialKind::Deleter => "deleter",
            SpecialKind::Creator => "creator",
            SpecialKind::Stringifier => "stringifier",
        }
    }
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
