//! The XMP side of the codec.
//!
//! XMP leans on grammar far more than the other families: dates follow ISO
//! 8601 with truncation (`2009`, `2009-10`, and on down to microseconds),
//! GPS coordinates come in two sexagesimal spellings, and `Lang Alt`
//! properties pack several language alternatives into one line.
//!
//! Array values ride the wire joined by `", "`. The separator isn't
//! escaped, so an element containing a literal `", "` won't survive a
//! round-trip - that's a wire-format limitation, not a codec choice.

pub mod error;

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use viewfinder_metadata_types::{
    Direction, GpsCoordinate, Rational, UtcOffset, Value,
    xmp::{XmpSimpleType, XmpValueType},
};
use winnow::{
    ModalResult, Parser,
    ascii::dec_uint,
    combinator::{alt, opt, preceded},
    token::take_while,
};

use crate::parse;

use self::error::{XmpValueError, XmpValueResult};

/// The marker opening each `Lang Alt` alternative.
const LANG_MARKER: &str = "lang=\"";

/// Decodes one raw XMP value into a [`Value`].
///
/// Array types decode element by element into a [`Value::Array`]; an empty
/// raw string is an empty array.
///
/// # Errors
///
/// Errors when the raw string (or any element of it) doesn't conform to
/// the type's grammar. The text-ish simple types never error.
pub fn decode_value(raw: &str, ty: XmpValueType) -> XmpValueResult {
    match ty {
        XmpValueType::Simple(simple) => decode_simple(raw, simple),

        XmpValueType::Bag(element) | XmpValueType::Seq(element) | XmpValueType::Alt(element) => {
            if raw.is_empty() {
                return Ok(Value::Array(Vec::new()));
            }

            let mut items = Vec::new();
            for part in raw.split(", ") {
                items.push(decode_simple(part, element)?);
            }

            Ok(Value::Array(items))
        }

        XmpValueType::LangAlt => decode_lang_alt(raw),
    }
}

/// Decodes one simple (non-array) value.
fn decode_simple(raw: &str, simple: XmpSimpleType) -> XmpValueResult {
    let failed = || {
        log::warn!("Raw XMP value doesn't fit its type. ty: {simple}, raw: `{raw}`");
        XmpValueError::Decode {
            ty: XmpValueType::Simple(simple),
            raw: raw.to_owned(),
        }
    };

    match simple {
        XmpSimpleType::AgentName
        | XmpSimpleType::ProperName
        | XmpSimpleType::Text
        | XmpSimpleType::Uri
        | XmpSimpleType::Url => Ok(Value::Text(raw.to_owned())),

        // the spellings are exact. no `true`, no `TRUE`, no `1`
        XmpSimpleType::Boolean => match raw {
            "True" => Ok(Value::Boolean(true)),
            "False" => Ok(Value::Boolean(false)),
            _ => Err(failed()),
        },

        XmpSimpleType::Date => decode_date(raw),

        XmpSimpleType::GpsCoordinate => decode_gps(raw),

        XmpSimpleType::Integer => parse::integer
            .parse(raw)
            .map(Value::Integer)
            .map_err(|_| failed()),

        XmpSimpleType::MimeType => raw
            .split_once('/')
            .map(|(primary, subtype)| Value::MimeType {
                primary: primary.to_owned(),
                subtype: subtype.to_owned(),
            })
            .ok_or_else(failed),

        XmpSimpleType::Rational => {
            let (numerator, denominator) = parse::rational.parse(raw).map_err(|_| failed())?;
            Rational::new(numerator, denominator)
                .map(Value::Rational)
                .map_err(|_| failed())
        }
    }
}

/// The time-of-day half of an ISO 8601 stamp, after the `T`.
struct TimeParts {
    hours: u8,
    minutes: u8,
    seconds: u8,
    microseconds: u32,
    offset: UtcOffset,
}

/// Parses `HH:MM`, optional `:SS` and `.fraction`, then a mandatory zone
/// designator.
fn time_parts(input: &mut &str) -> ModalResult<TimeParts> {
    let hours = parse::two_digits(input)?;
    ':'.parse_next(input)?;
    let minutes = parse::two_digits(input)?;

    let rest: Option<(u8, Option<&str>)> = opt(preceded(
        ':',
        (
            parse::two_digits,
            opt(preceded('.', take_while(1.., '0'..='9'))),
        ),
    ))
    .parse_next(input)?;

    let offset = alt(('Z'.value(UtcOffset::default()), parse::utc_offset)).parse_next(input)?;

    let (seconds, fraction) = rest.unwrap_or((0, None));

    Ok(TimeParts {
        hours,
        minutes,
        seconds,
        microseconds: fraction.map(microseconds).unwrap_or(0),
        offset,
    })
}

/// The first six fractional digits, right-padded: `"721"` is 721,000 µs,
/// and digits past the sixth are thrown away.
fn microseconds(digits: &str) -> u32 {
    let mut value: u32 = 0;
    let mut count = 0;

    for c in digits.chars().take(6) {
        value = value * 10 + c.to_digit(10).unwrap_or(0);
        count += 1;
    }
    for _ in count..6 {
        value *= 10;
    }

    value
}

/// Parses the truncating ISO 8601 shape: a year, then optionally a month,
/// a day, and a time.
fn date_parts(
    input: &mut &str,
) -> ModalResult<(i32, Option<u8>, Option<u8>, Option<TimeParts>)> {
    let year: i32 = take_while(4..=4, '0'..='9').parse_to().parse_next(input)?;

    let month = opt(preceded('-', parse::two_digits)).parse_next(input)?;

    let mut day = None;
    let mut time = None;
    if month.is_some() {
        day = opt(preceded('-', parse::two_digits)).parse_next(input)?;

        if day.is_some() {
            time = opt(preceded('T', time_parts)).parse_next(input)?;
        }
    }

    Ok((year, month, day, time))
}

/// Decodes an ISO 8601 date, truncated anywhere from a bare year down to
/// microseconds.
///
/// Grammar first, calendar second: the shape has to match before the
/// fields are checked against a real calendar and clock. Missing months
/// and days default to 1.
fn decode_date(raw: &str) -> XmpValueResult {
    let failed = || {
        log::warn!("Raw XMP date isn't a valid ISO 8601 stamp. raw: `{raw}`");
        XmpValueError::Decode {
            ty: XmpValueType::Simple(XmpSimpleType::Date),
            raw: raw.to_owned(),
        }
    };

    let (year, month, day, time) = date_parts.parse(raw).map_err(|_| failed())?;

    let date = NaiveDate::from_ymd_opt(year, month.unwrap_or(1).into(), day.unwrap_or(1).into())
        .ok_or_else(failed)?;

    let Some(time) = time else {
        return Ok(Value::Date(date));
    };

    let clock = NaiveTime::from_hms_micro_opt(
        time.hours.into(),
        time.minutes.into(),
        time.seconds.into(),
        time.microseconds,
    )
    .ok_or_else(failed)?;

    Ok(Value::DateTime {
        datetime: NaiveDateTime::new(date, clock),
        offset: Some(time.offset),
    })
}

/// Parses both sexagesimal spellings: `DDD,MM,SSk` and `DDD,MM.mmk`.
fn gps_parts(input: &mut &str) -> ModalResult<(u8, u8, u8, Direction)> {
    let degrees: u8 = dec_uint.parse_next(input)?;
    ','.parse_next(input)?;
    let minutes: u8 = dec_uint.parse_next(input)?;

    let seconds: u8 = alt((
        preceded(',', dec_uint),
        preceded('.', take_while(1.., '0'..='9').map(fraction_to_seconds)),
    ))
    .parse_next(input)?;

    let direction = alt((
        'N'.value(Direction::North),
        'S'.value(Direction::South),
        'E'.value(Direction::East),
        'W'.value(Direction::West),
    ))
    .parse_next(input)?;

    Ok((degrees, minutes, seconds, direction))
}

/// Fractional minutes to whole seconds: the first two digits are
/// hundredths of a minute, scaled by 0.6 and rounded.
fn fraction_to_seconds(digits: &str) -> u8 {
    let mut hundredths: u32 = 0;
    for c in digits.chars().take(2) {
        hundredths = hundredths * 10 + c.to_digit(10).unwrap_or(0);
    }

    (hundredths as f64 * 0.6).round() as u8
}

/// Decodes a GPS coordinate, then range-checks it.
fn decode_gps(raw: &str) -> XmpValueResult {
    let failed = || {
        log::warn!("Raw XMP value isn't a GPS coordinate. raw: `{raw}`");
        XmpValueError::Decode {
            ty: XmpValueType::Simple(XmpSimpleType::GpsCoordinate),
            raw: raw.to_owned(),
        }
    };

    let (degrees, minutes, seconds, direction) = gps_parts.parse(raw).map_err(|_| failed())?;

    GpsCoordinate::new(degrees, minutes, seconds, direction)
        .map(Value::GpsCoordinate)
        .map_err(|e| {
            log::warn!("GPS coordinate is out of range. raw: `{raw}`, err: {e}");
            failed()
        })
}

/// Decodes a `Lang Alt` line into its alternatives.
///
/// The wire form is `lang="qual" text, lang="qual" text`. Every
/// alternative but the last must end with the comma separator. The last
/// one sheds a dangling separator too, if it carries one; otherwise its
/// text is taken verbatim, trailing whitespace included.
fn decode_lang_alt(raw: &str) -> XmpValueResult {
    let failed = || {
        log::warn!("Raw XMP value isn't a `Lang Alt` line. raw: `{raw}`");
        XmpValueError::Decode {
            ty: XmpValueType::LangAlt,
            raw: raw.to_owned(),
        }
    };

    let chunks: Vec<&str> = raw.split(LANG_MARKER).collect();

    // the line has to open with the marker, leaving an empty first chunk
    if chunks.len() < 2 || !chunks[0].is_empty() {
        return Err(failed());
    }

    let mut alternatives = BTreeMap::new();
    let last = chunks.len() - 2;

    for (i, chunk) in chunks[1..].iter().enumerate() {
        let Some((qualifier, text)) = chunk.split_once("\" ") else {
            return Err(failed());
        };

        let trimmed = text.trim_end();
        let value = match trimmed.strip_suffix(',') {
            Some(stripped) => stripped,
            None if i < last => return Err(failed()),
            None => text,
        };

        alternatives.insert(qualifier.to_owned(), value.to_owned());
    }

    Ok(Value::LangAlt(alternatives))
}

/// Encodes one [`Value`] back into XMP wire form.
///
/// # Errors
///
/// Errors when the value's variant doesn't fit the target type, including
/// a non-array value for an array type and an empty `Lang Alt` map.
pub fn encode_value(value: &Value, ty: XmpValueType) -> Result<String, XmpValueError> {
    match ty {
        XmpValueType::Simple(simple) => encode_simple(value, simple),

        XmpValueType::Bag(element) | XmpValueType::Seq(element) | XmpValueType::Alt(element) => {
            let Value::Array(items) = value else {
                log::warn!("Only arrays encode as XMP `{ty}`. value: {value:?}");
                return Err(XmpValueError::Encode {
                    ty,
                    value: value.clone(),
                });
            };

            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(encode_simple(item, element)?);
            }

            Ok(parts.join(", "))
        }

        XmpValueType::LangAlt => encode_lang_alt(value),
    }
}

/// Encodes one simple (non-array) value.
fn encode_simple(value: &Value, simple: XmpSimpleType) -> Result<String, XmpValueError> {
    let encoded = match (simple, value) {
        (
            XmpSimpleType::AgentName
            | XmpSimpleType::ProperName
            | XmpSimpleType::Text
            | XmpSimpleType::Uri
            | XmpSimpleType::Url,
            Value::Text(text),
        ) => Some(text.clone()),

        (XmpSimpleType::Boolean, Value::Boolean(b)) => {
            Some(if *b { "True" } else { "False" }.to_owned())
        }

        (XmpSimpleType::Date, Value::Date(date)) => Some(date.format("%Y-%m-%d").to_string()),
        (XmpSimpleType::Date, Value::DateTime { datetime, offset }) => {
            Some(encode_datetime(datetime, *offset))
        }

        (XmpSimpleType::GpsCoordinate, Value::GpsCoordinate(coordinate)) => {
            Some(coordinate.to_string())
        }

        (XmpSimpleType::Integer, Value::Integer(n)) => Some(n.to_string()),

        (XmpSimpleType::MimeType, Value::MimeType { primary, subtype }) => {
            Some(format!("{primary}/{subtype}"))
        }

        (XmpSimpleType::Rational, Value::Rational(r)) => Some(r.to_string()),

        _ => None,
    };

    encoded.ok_or_else(|| {
        log::warn!("Value can't encode as XMP `{simple}`. value: {value:?}");
        XmpValueError::Encode {
            ty: XmpValueType::Simple(simple),
            value: value.clone(),
        }
    })
}

/// Encodes a timestamp in its shortest sufficient ISO 8601 form.
///
/// Midnight with no meaningful offset collapses to a bare date. Seconds
/// drop when both they and the microseconds are zero, and fractional
/// digits lose their trailing zeros. A naive stamp gets no zone designator
/// at all.
fn encode_datetime(datetime: &NaiveDateTime, offset: Option<UtcOffset>) -> String {
    let microseconds = datetime.nanosecond() / 1_000;
    let designator = offset.map(|o| o.to_string()).unwrap_or_default();

    let midnight = datetime.hour() == 0
        && datetime.minute() == 0
        && datetime.second() == 0
        && microseconds == 0;

    // `-00:00` is zero-magnitude but not the canonical zero, so it keeps
    // its time component
    if midnight && offset.is_none_or(|o| o == UtcOffset::default()) {
        return datetime.format("%Y-%m-%d").to_string();
    }

    if datetime.second() == 0 && microseconds == 0 {
        return format!("{}{designator}", datetime.format("%Y-%m-%dT%H:%M"));
    }

    if microseconds == 0 {
        return format!("{}{designator}", datetime.format("%Y-%m-%dT%H:%M:%S"));
    }

    let mut fraction = format!("{microseconds:06}");
    while fraction.ends_with('0') {
        fraction.pop();
    }

    format!(
        "{}.{fraction}{designator}",
        datetime.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Encodes a `Lang Alt` map back into its wire line.
fn encode_lang_alt(value: &Value) -> Result<String, XmpValueError> {
    let failed = || XmpValueError::Encode {
        ty: XmpValueType::LangAlt,
        value: value.clone(),
    };

    let Value::LangAlt(alternatives) = value else {
        log::warn!("Only language maps encode as XMP `Lang Alt`. value: {value:?}");
        return Err(failed());
    };

    if alternatives.is_empty() {
        log::warn!("A `Lang Alt` needs at least one alternative.");
        return Err(failed());
    }

    let parts: Vec<String> = alternatives
        .iter()
        .map(|(qualifier, text)| format!("{LANG_MARKER}{qualifier}\" {text}"))
        .collect();

    Ok(parts.join(", "))
}

/// One XMP tag: its raw wire form and decoded value, kept consistent.
///
/// Same construction-only deal as the other families: decode with
/// [`XmpTag::from_raw`], encode with [`XmpTag::from_value`], and build a
/// new tag to change the value.
#[derive(Clone, Debug, PartialEq)]
pub struct XmpTag {
    /// The full key, like `Xmp.dc.title`.
    pub key: String,

    /// The property's value type.
    pub ty: XmpValueType,

    /// The wire form, exactly as the engine stores it.
    pub raw: String,

    /// The decoded value.
    pub value: Value,
}

impl XmpTag {
    /// Decodes a tag from the engine's raw form.
    ///
    /// # Errors
    ///
    /// Errors when [`decode_value`] rejects the raw string.
    pub fn from_raw(
        key: impl Into<String>,
        ty: XmpValueType,
        raw: impl Into<String>,
    ) -> Result<Self, XmpValueError> {
        let key = key.into();
        let raw = raw.into();

        let value = decode_value(&raw, ty)?;

        log::trace!("Decoded XMP tag. key: `{key}`, value: {value:?}");

        Ok(Self { key, ty, raw, value })
    }

    /// Encodes a tag from a value, deriving the raw wire form.
    ///
    /// # Errors
    ///
    /// Errors when [`encode_value`] rejects the value.
    pub fn from_value(
        key: impl Into<String>,
        ty: XmpValueType,
        value: Value,
    ) -> Result<Self, XmpValueError> {
        let key = key.into();

        let raw = encode_value(&value, ty)?;

        log::trace!("Encoded XMP tag. key: `{key}`, raw: `{raw}`");

        Ok(Self { key, ty, raw, value })
    }
}
