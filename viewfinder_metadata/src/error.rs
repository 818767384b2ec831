//! Errors shared across the crate.
//!
//! Each family codec has its own error type under its module; these are the
//! umbrella types that the [`crate::Metadata`] layer speaks.

use core::fmt;

use crate::{
    exif::error::ExifValueError, iptc::error::IptcValueError, xmp::error::XmpValueError,
};

/// A decode or encode failure from any of the three family codecs.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueError {
    Exif(ExifValueError),
    Iptc(IptcValueError),
    Xmp(XmpValueError),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::Exif(e) => write!(f, "{e}"),
            ValueError::Iptc(e) => write!(f, "{e}"),
            ValueError::Xmp(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ValueError::Exif(e) => Some(e),
            ValueError::Iptc(e) => Some(e),
            ValueError::Xmp(e) => Some(e),
        }
    }
}

impl From<ExifValueError> for ValueError {
    fn from(value: ExifValueError) -> Self {
        ValueError::Exif(value)
    }
}

impl From<IptcValueError> for ValueError {
    fn from(value: IptcValueError) -> Self {
        ValueError::Iptc(value)
    }
}

impl From<XmpValueError> for ValueError {
    fn from(value: XmpValueError) -> Self {
        ValueError::Xmp(value)
    }
}

/// Anything that can go wrong behind [`crate::Metadata`].
///
/// `E` is the store's own error type, so store failures surface with full
/// fidelity instead of being flattened into a string.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataError<E> {
    /// A codec rejected a value on its way in or out.
    Value(ValueError),

    /// The store itself failed.
    Store(E),

    /// The key starts with none of `Exif.`, `Iptc.`, or `Xmp.`.
    UnknownFamily { key: String },

    /// The store reported a type tag outside the family's vocabulary.
    UnknownType { key: String, ty: String },

    /// The store returned a wire value of the wrong shape for the key's
    /// family: repeated where a single string was expected, or the
    /// reverse.
    RawShape { key: String },
}

impl<E: fmt::Display> fmt::Display for MetadataError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::Value(e) => write!(f, "{e}"),
            MetadataError::Store(e) => write!(f, "The metadata store failed. err: {e}"),
            MetadataError::UnknownFamily { key } => {
                write!(f, "Key `{key}` belongs to no known metadata family.")
            }
            MetadataError::UnknownType { key, ty } => {
                write!(f, "Tag `{key}` reports an unknown value type: `{ty}`")
            }
            MetadataError::RawShape { key } => {
                write!(
                    f,
                    "Tag `{key}` came back with the wrong wire shape for its family."
                )
            }
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for MetadataError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            MetadataError::Value(e) => Some(e),
            MetadataError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<ValueError> for MetadataError<E> {
    fn from(value: ValueError) -> Self {
        MetadataError::Value(value)
    }
}

impl<E> From<ExifValueError> for MetadataError<E> {
    fn from(value: ExifValueError) -> Self {
        MetadataError::Value(ValueError::Exif(value))
    }
}

impl<E> From<IptcValueError> for MetadataError<E> {
    fn from(value: IptcValueError) -> Self {
        MetadataError::Value(ValueError::Iptc(value))
    }
}

impl<E> From<XmpValueError> for MetadataError<E> {
    fn from(value: XmpValueError) -> Self {
        MetadataError::Value(ValueError::Xmp(value))
    }
}
