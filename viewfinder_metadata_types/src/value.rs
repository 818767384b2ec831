//! The decoded-value union shared by all three codec families.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{gps::GpsCoordinate, offset::UtcOffset, rational::Rational};

/// Any value the codec can produce or consume.
///
/// Decoding a tag's wire string yields one of these; encoding starts from
/// one. Which variants are legal for a given tag depends entirely on its
/// family and type tag - the codec rejects mismatches with a typed error
/// instead of coercing.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Plain text.
    ///
    /// Also the graceful fallback for EXIF values whose structured decode
    /// didn't pan out, like an `Ascii` value that isn't a datetime.
    Text(String),

    /// Raw bytes recovered from an EXIF `Undefined` ascii-code sequence.
    Bytes(Vec<u8>),

    /// Any integer type: EXIF `Short`/`Long` and friends, IPTC `Short`,
    /// XMP `Integer`.
    Integer(i64),

    /// An exact fraction.
    Rational(Rational),

    /// An XMP `Boolean`.
    Boolean(bool),

    /// A calendar date with no time of day.
    Date(NaiveDate),

    /// A full timestamp.
    ///
    /// `offset` is `None` for naive stamps. EXIF `Ascii` datetimes never
    /// carry an offset; XMP ones always do.
    DateTime {
        datetime: NaiveDateTime,
        offset: Option<UtcOffset>,
    },

    /// A time of day, as IPTC `Time` tags hold.
    ///
    /// `offset` is `None` for naive times; the IPTC encoder then assumes
    /// UTC.
    Time {
        time: NaiveTime,
        offset: Option<UtcOffset>,
    },

    /// A MIME type, split at its first `/`.
    MimeType { primary: String, subtype: String },

    /// Language-tagged alternatives for one logical text value, keyed by
    /// language qualifier (like `x-default`).
    LangAlt(BTreeMap<String, String>),

    /// A GPS coordinate.
    GpsCoordinate(GpsCoordinate),

    /// Several values under one tag: XMP `bag`/`seq`/`alt` arrays and
    /// space-packed EXIF numerics.
    Array(Vec<Value>),
}
