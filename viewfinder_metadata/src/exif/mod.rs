//! The EXIF side of the codec: raw wire strings to [`Value`]s and back.
//!
//! EXIF is the loosest of the three families. `Ascii` values are sniffed
//! for datetimes with a small ladder of layouts, and anything that doesn't
//! match stays plain text rather than erroring. `Undefined` payloads decode
//! from the engine's human-readable rendering when one exists, since the
//! raw ascii-code sequence is a convention, not a guarantee.

pub mod error;

use chrono::{NaiveDate, NaiveDateTime};
use viewfinder_metadata_types::{Rational, Value, exif::ExifValueType};
use winnow::{ModalResult, Parser, ascii::dec_uint, combinator::separated};

use crate::parse;

use self::error::{ExifValueError, ExifValueResult};

/// Datetime layouts seen in `Ascii` values, most standard first.
///
/// The EXIF specification only blesses the first; the others show up in
/// the wild often enough to be worth sniffing for.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y:%m:%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
];

/// The date-only layout, colons and all.
const DATE_FORMAT: &str = "%Y:%m:%d";

/// The one key whose dates encode without a time component.
const GPS_DATE_STAMP: &str = "Exif.GPSInfo.GPSDateStamp";

/// Decodes one raw EXIF value into a [`Value`].
///
/// `formatted` is the engine's human-readable rendering of the tag, when
/// it has one. It's only consulted for `Undefined` values, where it beats
/// guessing at the raw payload.
///
/// # Errors
///
/// Numeric types error when the raw string doesn't parse. `Ascii`,
/// `Byte`, `SByte`, `Comment`, and `Undefined` never error - their
/// fallback is plain text.
pub fn decode_value(
    raw: &str,
    ty: ExifValueType,
    formatted: Option<&str>,
) -> ExifValueResult {
    match ty {
        ExifValueType::Ascii => Ok(decode_ascii(raw)),

        // both byte flavors stay textual at this layer. their numeric
        // interpretation is tag-specific, and that's dictionary territory
        ExifValueType::Byte | ExifValueType::SByte | ExifValueType::Comment => {
            Ok(Value::Text(raw.to_owned()))
        }

        ExifValueType::Short
        | ExifValueType::SShort
        | ExifValueType::Long
        | ExifValueType::SLong => parse::integer.parse(raw).map(Value::Integer).map_err(|_| {
            log::warn!("Raw EXIF value isn't an integer. ty: {ty}, raw: `{raw}`");
            ExifValueError::Decode {
                ty,
                raw: raw.to_owned(),
            }
        }),

        ExifValueType::Rational | ExifValueType::SRational => decode_rational(raw, ty),

        ExifValueType::Undefined => Ok(decode_undefined(raw, formatted)),
    }
}

/// Sniffs an `Ascii` value for the datetime and date layouts, falling back
/// to plain text.
fn decode_ascii(raw: &str) -> Value {
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            // even the `Z`-suffixed layout is naive. the suffix is matched
            // as a literal and recorded nowhere
            return Value::DateTime {
                datetime,
                offset: None,
            };
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Value::Date(date);
    }

    Value::Text(raw.to_owned())
}

/// Decodes a fraction, accepting signs per the type's signedness.
fn decode_rational(raw: &str, ty: ExifValueType) -> ExifValueResult {
    let failed = || {
        log::warn!("Raw EXIF value isn't a usable fraction. ty: {ty}, raw: `{raw}`");
        ExifValueError::Decode {
            ty,
            raw: raw.to_owned(),
        }
    };

    let (numerator, denominator) = parse::rational.parse(raw).map_err(|_| failed())?;

    // the unsigned flavor can't go negative
    if ty == ExifValueType::Rational && numerator < 0 {
        return Err(failed());
    }

    Rational::new(numerator, denominator)
        .map(Value::Rational)
        .map_err(|_| failed())
}

/// Decodes an `Undefined` payload, degrading gracefully.
///
/// The engine's `formatted` rendering wins outright. Failing that, the raw
/// payload is tried as an ascii-code sequence, and whatever doesn't fit
/// stays text.
fn decode_undefined(raw: &str, formatted: Option<&str>) -> Value {
    if let Some(formatted) = formatted {
        return Value::Text(formatted.to_owned());
    }

    match undefined_to_bytes(raw) {
        Ok(bytes) => Value::Bytes(bytes),
        Err(_) => Value::Text(raw.to_owned()),
    }
}

/// Encodes one [`Value`] back into EXIF wire form.
///
/// The key matters for exactly one rule: `Exif.GPSInfo.GPSDateStamp` takes
/// a bare date, while `Ascii` dates under every other key get a zero-filled
/// time component.
///
/// # Errors
///
/// Errors when the value's variant doesn't fit the target type, or a
/// numeric value breaks the type's signedness.
pub fn encode_value(
    key: &str,
    value: &Value,
    ty: ExifValueType,
) -> Result<String, ExifValueError> {
    let encoded = match (ty, value) {
        (ExifValueType::Ascii, Value::DateTime { datetime, .. }) => {
            Some(datetime.format(DATETIME_FORMATS[0]).to_string())
        }
        (ExifValueType::Ascii, Value::Date(date)) if key == GPS_DATE_STAMP => {
            Some(date.format(DATE_FORMAT).to_string())
        }
        (ExifValueType::Ascii, Value::Date(date)) => {
            Some(date.format("%Y:%m:%d 00:00:00").to_string())
        }

        (
            ExifValueType::Ascii
            | ExifValueType::Byte
            | ExifValueType::SByte
            | ExifValueType::Comment,
            Value::Text(text),
        ) => Some(text.clone()),

        (ExifValueType::Short | ExifValueType::Long, Value::Integer(n)) if *n >= 0 => {
            Some(n.to_string())
        }
        (ExifValueType::SShort | ExifValueType::SLong, Value::Integer(n)) => Some(n.to_string()),

        (ExifValueType::Rational, Value::Rational(r)) if r.numerator() >= 0 => {
            Some(r.to_string())
        }
        (ExifValueType::SRational, Value::Rational(r)) => Some(r.to_string()),

        (ExifValueType::Undefined, Value::Text(text)) => Some(text.clone()),
        (ExifValueType::Undefined, Value::Bytes(bytes)) => Some(bytes_to_undefined(bytes)),

        _ => None,
    };

    encoded.ok_or_else(|| {
        log::warn!("Value can't encode as EXIF `{ty}`. value: {value:?}");
        ExifValueError::Encode {
            ty,
            value: value.clone(),
        }
    })
}

/// Decodes the `Undefined` wire convention - single-space-separated decimal
/// ascii codes - into raw bytes.
///
/// `"48 50 50 49"` decodes to the bytes of `"0221"`. Trailing whitespace is
/// tolerated, since encoders (this one included) emit a trailing space.
///
/// # Errors
///
/// Errors on an empty sequence, doubled separators, and codes that aren't
/// base-10 numbers in `[0, 255]`.
pub fn undefined_to_bytes(raw: &str) -> Result<Vec<u8>, ExifValueError> {
    fn codes(input: &mut &str) -> ModalResult<Vec<u8>> {
        separated(1.., dec_uint::<_, u8, _>, ' ').parse_next(input)
    }

    codes.parse(raw.trim_end()).map_err(|_| {
        log::warn!("Undefined payload isn't an ascii-code sequence. raw: `{raw}`");
        ExifValueError::Decode {
            ty: ExifValueType::Undefined,
            raw: raw.to_owned(),
        }
    })
}

/// Encodes raw bytes into the `Undefined` wire convention.
///
/// Every code gets a trailing space - `[48, 50]` becomes `"48 50 "` - which
/// matches how engines render these sequences.
pub fn bytes_to_undefined(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte} ")).collect()
}

/// One EXIF tag: its raw wire form and decoded value, kept consistent.
///
/// Construction is the only way to get one. [`ExifTag::from_raw`] decodes
/// and [`ExifTag::from_value`] encodes; there's no in-place mutation, so
/// replacing a tag's value means building a new tag.
#[derive(Clone, Debug, PartialEq)]
pub struct ExifTag {
    /// The full key, like `Exif.Photo.ExposureTime`.
    pub key: String,

    /// The tag's value type.
    pub ty: ExifValueType,

    /// The wire form, exactly as the engine stores it.
    pub raw: String,

    /// The engine's human-readable rendering, when it supplied one.
    pub formatted: Option<String>,

    /// The decoded value.
    pub value: Value,
}

impl ExifTag {
    /// Decodes a tag from the engine's raw form.
    ///
    /// Numeric types may pack several space-separated values into one raw
    /// string - a GPS position is three `Rational`s - and those decode to
    /// a [`Value::Array`].
    ///
    /// # Errors
    ///
    /// Errors when [`decode_value`] rejects the raw string, or any one
    /// packed value of it.
    pub fn from_raw(
        key: impl Into<String>,
        ty: ExifValueType,
        raw: impl Into<String>,
        formatted: Option<String>,
    ) -> Result<Self, ExifValueError> {
        let key = key.into();
        let raw = raw.into();

        let tokens: Vec<&str> = raw.split_whitespace().collect();

        let value = if ty.is_multi_valued() && tokens.len() > 1 {
            let mut items = Vec::with_capacity(tokens.len());
            for token in tokens {
                items.push(decode_value(token, ty, formatted.as_deref())?);
            }
            Value::Array(items)
        } else {
            decode_value(&raw, ty, formatted.as_deref())?
        };

        log::trace!("Decoded EXIF tag. key: `{key}`, value: {value:?}");

        Ok(Self {
            key,
            ty,
            raw,
            formatted,
            value,
        })
    }

    /// Encodes a tag from a value, deriving the raw wire form.
    ///
    /// A [`Value::Array`] encodes element by element and joins with single
    /// spaces. The `formatted` rendering is the engine's to produce, so a
    /// freshly encoded tag has none.
    ///
    /// # Errors
    ///
    /// Errors when [`encode_value`] rejects the value, or any one element
    /// of an array.
    pub fn from_value(
        key: impl Into<String>,
        ty: ExifValueType,
        value: Value,
    ) -> Result<Self, ExifValueError> {
        let key = key.into();

        let raw = match &value {
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(encode_value(&key, item, ty)?);
                }
                parts.join(" ")
            }
            single => encode_value(&key, single, ty)?,
        };

        log::trace!("Encoded EXIF tag. key: `{key}`, raw: `{raw}`");

        Ok(Self {
            key,
            ty,
            raw,
            formatted: None,
            value,
        })
    }
}
