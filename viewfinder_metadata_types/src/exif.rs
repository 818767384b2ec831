//! The EXIF type-tag vocabulary.

use core::fmt;

/// Error for an EXIF type string outside the known vocabulary.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UnknownExifType(pub String);

impl fmt::Display for UnknownExifType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown EXIF value type: `{}`", self.0)
    }
}

impl core::error::Error for UnknownExifType {}

/// The value types an EXIF tag can carry.
///
/// These mirror the type names a metadata engine reports per tag. The set
/// is closed on purpose: a type string outside it fails loudly at the
/// boundary instead of falling through some default branch later.
///
/// ```
/// use viewfinder_metadata_types::exif::ExifValueType;
///
/// assert_eq!(ExifValueType::try_from("SRational"), Ok(ExifValueType::SRational));
/// assert!(ExifValueType::try_from("Float").is_err());
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum ExifValueType {
    /// Text, possibly holding a datetime.
    Ascii,
    /// An unsigned 8-bit value, kept as text at this layer.
    Byte,
    /// A signed 8-bit value, kept as text at this layer.
    SByte,
    /// A user comment, kept as text.
    Comment,
    /// An unsigned 16-bit integer.
    Short,
    /// A signed 16-bit integer.
    SShort,
    /// An unsigned 32-bit integer.
    Long,
    /// A signed 32-bit integer.
    SLong,
    /// An unsigned fraction.
    Rational,
    /// A signed fraction.
    SRational,
    /// An opaque payload, on the wire as a decimal ascii-code sequence.
    Undefined,
}

impl ExifValueType {
    /// The engine-side name for this type.
    pub const fn name(&self) -> &'static str {
        match self {
            ExifValueType::Ascii => "Ascii",
            ExifValueType::Byte => "Byte",
            ExifValueType::SByte => "SByte",
            ExifValueType::Comment => "Comment",
            ExifValueType::Short => "Short",
            ExifValueType::SShort => "SShort",
            ExifValueType::Long => "Long",
            ExifValueType::SLong => "SLong",
            ExifValueType::Rational => "Rational",
            ExifValueType::SRational => "SRational",
            ExifValueType::Undefined => "Undefined",
        }
    }

    /// Whether one raw string of this type may pack several values,
    /// separated by spaces.
    ///
    /// GPS positions do this: three `Rational`s in one value.
    pub const fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            ExifValueType::Short
                | ExifValueType::SShort
                | ExifValueType::Long
                | ExifValueType::SLong
                | ExifValueType::Rational
                | ExifValueType::SRational
        )
    }
}

impl TryFrom<&str> for ExifValueType {
    type Error = UnknownExifType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "Ascii" => ExifValueType::Ascii,
            "Byte" => ExifValueType::Byte,
            "SByte" => ExifValueType::SByte,
            "Comment" => ExifValueType::Comment,
            "Short" => ExifValueType::Short,
            "SShort" => ExifValueType::SShort,
            "Long" => ExifValueType::Long,
            "SLong" => ExifValueType::SLong,
            "Rational" => ExifValueType::Rational,
            "SRational" => ExifValueType::SRational,
            "Undefined" => ExifValueType::Undefined,
            other => return Err(UnknownExifType(other.to_owned())),
        })
    }
}

impl fmt::Display for ExifValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
