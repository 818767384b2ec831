//! Errors for the XMP codec.

use viewfinder_metadata_types::{Value, xmp::XmpValueType};

/// An alias for results with [`XmpValueError`] errors.
pub type XmpValueResult = Result<Value, XmpValueError>;

/// A conversion failure in the XMP codec.
#[derive(Clone, Debug, PartialEq)]
pub enum XmpValueError {
    /// The raw wire string doesn't conform to the type's grammar.
    Decode { ty: XmpValueType, raw: String },

    /// The in-memory value has the wrong shape for the target type.
    Encode { ty: XmpValueType, value: Value },
}

impl core::fmt::Display for XmpValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            XmpValueError::Decode { ty, raw } => {
                write!(f, "Invalid raw value for XMP type `{ty}`. raw: `{raw}`")
            }
            XmpValueError::Encode { ty, value } => {
                write!(f, "Value can't encode as XMP type `{ty}`. value: {value:?}")
            }
        }
    }
}

impl core::error::Error for XmpValueError {}
