//! The XMP type-tag vocabulary.
//!
//! XMP types are two-layered: a simple type stands alone, or sits as the
//! element type of a `bag`, `seq`, or `alt` array. `Lang Alt` is its own
//! thing, a map of language qualifiers to text.

use core::fmt;

/// Error for an XMP type string outside the known vocabulary.
///
/// Holds the whole offending string, so `bag Bogus` reports itself, not
/// just `Bogus`.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UnknownXmpType(pub String);

impl fmt::Display for UnknownXmpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown XMP value type: `{}`", self.0)
    }
}

impl core::error::Error for UnknownXmpType {}

/// The simple (non-array) XMP value types.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum XmpSimpleType {
    /// The name of an agent (software or person), kept as text.
    AgentName,
    /// `True` or `False`.
    Boolean,
    /// An ISO 8601 date, possibly truncated to just a year or year-month.
    Date,
    /// A sexagesimal GPS coordinate.
    GpsCoordinate,
    /// A base-10 integer.
    Integer,
    /// A MIME type like `image/jpeg`.
    MimeType,
    /// The name of a person or thing, kept as text.
    ProperName,
    /// A fraction.
    Rational,
    /// Plain text.
    Text,
    /// A URI, kept as text.
    Uri,
    /// A URL, kept as text.
    Url,
}

impl XmpSimpleType {
    /// The engine-side name for this type.
    pub const fn name(&self) -> &'static str {
        match self {
            XmpSimpleType::AgentName => "AgentName",
            XmpSimpleType::Boolean => "Boolean",
            XmpSimpleType::Date => "Date",
            XmpSimpleType::GpsCoordinate => "GPSCoordinate",
            XmpSimpleType::Integer => "Integer",
            XmpSimpleType::MimeType => "MIMEType",
            XmpSimpleType::ProperName => "ProperName",
            XmpSimpleType::Rational => "Rational",
            XmpSimpleType::Text => "Text",
            XmpSimpleType::Uri => "URI",
            XmpSimpleType::Url => "URL",
        }
    }
}

impl TryFrom<&str> for XmpSimpleType {
    type Error = UnknownXmpType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "AgentName" => XmpSimpleType::AgentName,
            "Boolean" => XmpSimpleType::Boolean,
            "Date" => XmpSimpleType::Date,
            "GPSCoordinate" => XmpSimpleType::GpsCoordinate,
            "Integer" => XmpSimpleType::Integer,
            "MIMEType" => XmpSimpleType::MimeType,
            "ProperName" => XmpSimpleType::ProperName,
            "Rational" => XmpSimpleType::Rational,
            "Text" => XmpSimpleType::Text,
            "URI" => XmpSimpleType::Uri,
            "URL" => XmpSimpleType::Url,
            other => return Err(UnknownXmpType(other.to_owned())),
        })
    }
}

impl fmt::Display for XmpSimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full type of an XMP property: a simple type, an array of a simple
/// type, or `Lang Alt`.
///
/// Arrays don't nest. `bag bag Text` is not a thing, and `TryFrom` treats
/// it as unknown:
///
/// ```
/// use viewfinder_metadata_types::xmp::{XmpSimpleType, XmpValueType};
///
/// assert_eq!(
///     XmpValueType::try_from("bag Integer"),
///     Ok(XmpValueType::Bag(XmpSimpleType::Integer)),
/// );
/// assert!(XmpValueType::try_from("bag bag Integer").is_err());
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum XmpValueType {
    /// A lone simple value.
    Simple(XmpSimpleType),
    /// An unordered array.
    Bag(XmpSimpleType),
    /// An ordered array.
    Seq(XmpSimpleType),
    /// An array of alternatives.
    Alt(XmpSimpleType),
    /// Language-tagged alternatives for one text value.
    LangAlt,
}

impl TryFrom<&str> for XmpValueType {
    type Error = UnknownXmpType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == "Lang Alt" {
            return Ok(XmpValueType::LangAlt);
        }

        // array types spell out their element after the container kind.
        // the error wraps the whole input so the container kind isn't lost
        if let Some(element) = value.strip_prefix("bag ") {
            return XmpSimpleType::try_from(element)
                .map(XmpValueType::Bag)
                .map_err(|_| UnknownXmpType(value.to_owned()));
        }
        if let Some(element) = value.strip_prefix("seq ") {
            return XmpSimpleType::try_from(element)
                .map(XmpValueType::Seq)
                .map_err(|_| UnknownXmpType(value.to_owned()));
        }
        if let Some(element) = value.strip_prefix("alt ") {
            return XmpSimpleType::try_from(element)
                .map(XmpValueType::Alt)
                .map_err(|_| UnknownXmpType(value.to_owned()));
        }

        XmpSimpleType::try_from(value).map(XmpValueType::Simple)
    }
}

impl fmt::Display for XmpValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmpValueType::Simple(element) => write!(f, "{element}"),
            XmpValueType::Bag(element) => write!(f, "bag {element}"),
            XmpValueType::Seq(element) => write!(f, "seq {element}"),
            XmpValueType::Alt(element) => write!(f, "alt {element}"),
            XmpValueType::LangAlt => f.write_str("Lang Alt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UnknownXmpType, XmpSimpleType, XmpValueType};

    /// Simple names and their array forms should round-trip through
    /// `TryFrom` and `Display`.
    #[test]
    fn names_round_trip() {
        for (s, ty) in [
            ("Boolean", XmpValueType::Simple(XmpSimpleType::Boolean)),
            ("GPSCoordinate", XmpValueType::Simple(XmpSimpleType::GpsCoordinate)),
            ("MIMEType", XmpValueType::Simple(XmpSimpleType::MimeType)),
            ("bag Text", XmpValueType::Bag(XmpSimpleType::Text)),
            ("seq Date", XmpValueType::Seq(XmpSimpleType::Date)),
            ("alt URI", XmpValueType::Alt(XmpSimpleType::Uri)),
            ("Lang Alt", XmpValueType::LangAlt),
        ] {
            assert_eq!(XmpValueType::try_from(s), Ok(ty));
            assert_eq!(ty.to_string(), s);
        }
    }

    /// Nested arrays and unknown elements should be rejected with the whole
    /// input named.
    #[test]
    fn bad_array_types_are_rejected() {
        assert_eq!(
            XmpValueType::try_from("bag bag Text"),
            Err(UnknownXmpType("bag bag Text".to_owned()))
        );
        assert_eq!(
            XmpValueType::try_from("seq Bogus"),
            Err(UnknownXmpType("seq Bogus".to_owned()))
        );
        assert_eq!(
            XmpValueType::try_from("Structure"),
            Err(UnknownXmpType("Structure".to_owned()))
        );
    }
}
