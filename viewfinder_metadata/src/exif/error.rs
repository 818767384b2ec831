//! Errors for the EXIF codec.

use viewfinder_metadata_types::{Value, exif::ExifValueType};

/// An alias for results with [`ExifValueError`] errors.
pub type ExifValueResult = Result<Value, ExifValueError>;

/// A conversion failure in the EXIF codec.
#[derive(Clone, Debug, PartialEq)]
pub enum ExifValueError {
    /// The raw wire string doesn't conform to the type's grammar.
    Decode { ty: ExifValueType, raw: String },

    /// The in-memory value has the wrong shape or range for the target
    /// type.
    Encode { ty: ExifValueType, value: Value },
}

impl core::fmt::Display for ExifValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExifValueError::Decode { ty, raw } => {
                write!(f, "Invalid raw value for EXIF type `{ty}`. raw: `{raw}`")
            }
            ExifValueError::Encode { ty, value } => {
                write!(f, "Value can't encode as EXIF type `{ty}`. value: {value:?}")
            }
        }
    }
}

impl core::error::Error for ExifValueError {}
