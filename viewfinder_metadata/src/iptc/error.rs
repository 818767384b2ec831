//! Errors for the IPTC codec.

use viewfinder_metadata_types::{Value, iptc::IptcValueType};

/// An alias for results with [`IptcValueError`] errors.
pub type IptcValueResult = Result<Value, IptcValueError>;

/// A conversion failure in the IPTC codec.
#[derive(Clone, Debug, PartialEq)]
pub enum IptcValueError {
    /// The raw wire string doesn't conform to the type's grammar.
    Decode { ty: IptcValueType, raw: String },

    /// The in-memory value has the wrong shape for the target type.
    Encode { ty: IptcValueType, value: Value },
}

impl core::fmt::Display for IptcValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IptcValueError::Decode { ty, raw } => {
                write!(f, "Invalid raw value for IPTC type `{ty}`. raw: `{raw}`")
            }
            IptcValueError::Encode { ty, value } => {
                write!(f, "Value can't encode as IPTC type `{ty}`. value: {value:?}")
            }
        }
    }
}

impl core::error::Error for IptcValueError {}
