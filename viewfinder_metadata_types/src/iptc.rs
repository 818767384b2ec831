//! The IPTC type-tag vocabulary.

use core::fmt;

/// Error for an IPTC type string outside the known vocabulary.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UnknownIptcType(pub String);

impl fmt::Display for UnknownIptcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown IPTC value type: `{}`", self.0)
    }
}

impl core::error::Error for UnknownIptcType {}

/// The value types an IPTC dataset can carry.
///
/// Unlike EXIF and XMP, IPTC tags are repeatable: whichever type a tag has,
/// its wire form is a list of raw strings, one per repetition.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum IptcValueType {
    /// A signed integer.
    Short,
    /// Plain text.
    String,
    /// A calendar date.
    Date,
    /// A time of day with a UTC offset.
    Time,
    /// An opaque payload, passed through as text.
    Undefined,
}

impl IptcValueType {
    /// The engine-side name for this type.
    pub const fn name(&self) -> &'static str {
        match self {
            IptcValueType::Short => "Short",
            IptcValueType::String => "String",
            IptcValueType::Date => "Date",
            IptcValueType::Time => "Time",
            IptcValueType::Undefined => "Undefined",
        }
    }
}

impl TryFrom<&str> for IptcValueType {
    type Error = UnknownIptcType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "Short" => IptcValueType::Short,
            "String" => IptcValueType::String,
            "Date" => IptcValueType::Date,
            "Time" => IptcValueType::Time,
            "Undefined" => IptcValueType::Undefined,
            other => return Err(UnknownIptcType(other.to_owned())),
        })
    }
}

impl fmt::Display for IptcValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
