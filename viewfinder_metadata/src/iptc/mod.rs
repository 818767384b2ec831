//! The IPTC side of the codec.
//!
//! IPTC is the odd family out in two ways. Tags are repeatable, so the
//! wire form is a list of raw strings rather than one string. And its
//! date/time wire formats are asymmetric: the engine hands out dashed
//! dates (`2009-02-04`) and colon'd times (`10:52:04+00:00`), but encoding
//! targets the standard's compact octet forms (`20090204`, `105204+0000`).

pub mod error;

use chrono::{NaiveDate, NaiveTime, Timelike};
use viewfinder_metadata_types::{Sign, UtcOffset, Value, iptc::IptcValueType};
use winnow::{ModalResult, Parser};

use crate::parse;

use self::error::{IptcValueError, IptcValueResult};

/// The layout of raw dates as the engine renders them.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The layout encode emits: the standard's compact octet form.
const DATE_ENCODE_FORMAT: &str = "%Y%m%d";

/// Decodes one raw IPTC value into a [`Value`].
///
/// # Errors
///
/// `Short`, `Date`, and `Time` error when the raw string doesn't parse.
/// `String` and `Undefined` pass through as text and never error.
pub fn decode_value(raw: &str, ty: IptcValueType) -> IptcValueResult {
    match ty {
        IptcValueType::Short => parse::integer.parse(raw).map(Value::Integer).map_err(|_| {
            log::warn!("Raw IPTC value isn't an integer. raw: `{raw}`");
            IptcValueError::Decode {
                ty,
                raw: raw.to_owned(),
            }
        }),

        IptcValueType::String | IptcValueType::Undefined => Ok(Value::Text(raw.to_owned())),

        IptcValueType::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|_| {
                log::warn!("Raw IPTC date isn't a valid `YYYY-MM-DD`. raw: `{raw}`");
                IptcValueError::Decode {
                    ty,
                    raw: raw.to_owned(),
                }
            }),

        IptcValueType::Time => decode_time(raw),
    }
}

/// Decodes an `HH:MM:SS±HH:MM` time. The offset is mandatory.
///
/// The clock fields are checked against a real clock; the offset digits
/// are kept as-is, however odd.
fn decode_time(raw: &str) -> IptcValueResult {
    fn grammar(input: &mut &str) -> ModalResult<(u8, u8, u8, UtcOffset)> {
        let hours = parse::two_digits(input)?;
        ':'.parse_next(input)?;
        let minutes = parse::two_digits(input)?;
        ':'.parse_next(input)?;
        let seconds = parse::two_digits(input)?;
        let offset = parse::utc_offset(input)?;

        Ok((hours, minutes, seconds, offset))
    }

    let failed = || {
        log::warn!("Raw IPTC time isn't a valid `HH:MM:SS±HH:MM`. raw: `{raw}`");
        IptcValueError::Decode {
            ty: IptcValueType::Time,
            raw: raw.to_owned(),
        }
    };

    let (hours, minutes, seconds, offset) = grammar.parse(raw).map_err(|_| failed())?;

    let time = NaiveTime::from_hms_opt(hours.into(), minutes.into(), seconds.into())
        .ok_or_else(failed)?;

    Ok(Value::Time {
        time,
        offset: Some(offset),
    })
}

/// Encodes one [`Value`] back into IPTC wire form.
///
/// `Date` and `Time` also take a full [`Value::DateTime`], keeping just
/// the half they need - handy for stamping both datasets from one
/// timestamp.
///
/// # Errors
///
/// Errors when the value's variant doesn't fit the target type.
pub fn encode_value(value: &Value, ty: IptcValueType) -> Result<String, IptcValueError> {
    let encoded = match (ty, value) {
        (IptcValueType::Short, Value::Integer(n)) => Some(n.to_string()),

        (IptcValueType::String | IptcValueType::Undefined, Value::Text(text)) => {
            Some(text.clone())
        }

        (IptcValueType::Date, Value::Date(date)) => {
            Some(date.format(DATE_ENCODE_FORMAT).to_string())
        }
        (IptcValueType::Date, Value::DateTime { datetime, .. }) => {
            Some(datetime.date().format(DATE_ENCODE_FORMAT).to_string())
        }

        (IptcValueType::Time, Value::Time { time, offset }) => Some(encode_time(*time, *offset)),
        (IptcValueType::Time, Value::DateTime { datetime, offset }) => {
            Some(encode_time(datetime.time(), *offset))
        }

        _ => None,
    };

    encoded.ok_or_else(|| {
        log::warn!("Value can't encode as IPTC `{ty}`. value: {value:?}");
        IptcValueError::Encode {
            ty,
            value: value.clone(),
        }
    })
}

/// Encodes a time in the compact `HHMMSS±HHMM` form.
///
/// A missing offset means UTC, and any zero offset normalizes to `+0000`.
/// Sub-second precision doesn't exist on the wire, so it's dropped.
fn encode_time(time: NaiveTime, offset: Option<UtcOffset>) -> String {
    let offset = offset.unwrap_or_default();

    let (sign, hours, minutes) = if offset.total_minutes() == 0 {
        (Sign::Plus, 0, 0)
    } else {
        (offset.sign, offset.hours, offset.minutes)
    };

    format!(
        "{:02}{:02}{:02}{}{:02}{:02}",
        time.hour(),
        time.minute(),
        time.second(),
        sign,
        hours,
        minutes
    )
}

/// One IPTC tag: its raw wire forms and decoded values, kept consistent.
///
/// IPTC tags are repeatable, so both sides are lists, index for index. A
/// non-repeatable tag is a one-element list. As with the other families,
/// construction is the only way to get one.
#[derive(Clone, Debug, PartialEq)]
pub struct IptcTag {
    /// The full key, like `Iptc.Application2.Keywords`.
    pub key: String,

    /// The dataset's value type.
    pub ty: IptcValueType,

    /// The wire forms, one per repetition.
    pub raw_values: Vec<String>,

    /// The decoded values, parallel to `raw_values`.
    pub values: Vec<Value>,
}

impl IptcTag {
    /// Decodes a tag from the engine's raw repetitions.
    ///
    /// # Errors
    ///
    /// Errors when [`decode_value`] rejects any repetition.
    pub fn from_raw(
        key: impl Into<String>,
        ty: IptcValueType,
        raw_values: Vec<String>,
    ) -> Result<Self, IptcValueError> {
        let key = key.into();

        let mut values = Vec::with_capacity(raw_values.len());
        for raw in &raw_values {
            values.push(decode_value(raw, ty)?);
        }

        log::trace!("Decoded IPTC tag. key: `{key}`, values: {values:?}");

        Ok(Self {
            key,
            ty,
            raw_values,
            values,
        })
    }

    /// Encodes a tag from values, deriving the raw repetitions.
    ///
    /// # Errors
    ///
    /// Errors when [`encode_value`] rejects any value.
    pub fn from_values(
        key: impl Into<String>,
        ty: IptcValueType,
        values: Vec<Value>,
    ) -> Result<Self, IptcValueError> {
        let key = key.into();

        let mut raw_values = Vec::with_capacity(values.len());
        for value in &values {
            raw_values.push(encode_value(value, ty)?);
        }

        log::trace!("Encoded IPTC tag. key: `{key}`, raw: {raw_values:?}");

        Ok(Self {
            key,
            ty,
            raw_values,
            values,
        })
    }
}
