//! Small `winnow` grammars shared by more than one family codec.

use viewfinder_metadata_types::{Sign, UtcOffset};
use winnow::{
    ModalResult, Parser,
    ascii::{dec_int, digit1},
    combinator::{alt, opt},
    token::take_while,
};

/// Parses a signed base-10 integer, the whole of `i64`.
///
/// A leading `+` is fine; decimals, exponents, and separators are not.
pub(crate) fn integer(input: &mut &str) -> ModalResult<i64> {
    dec_int.parse_next(input)
}

/// Parses a `numerator/denominator` pair, each side an optional `-` and
/// digits.
///
/// Unlike [`integer`], a leading `+` is outside the fraction grammar.
pub(crate) fn rational(input: &mut &str) -> ModalResult<(i64, i64)> {
    // minus only. `dec_int` would also take a `+` sign
    fn side(input: &mut &str) -> ModalResult<i64> {
        (opt('-'), digit1).take().parse_to().parse_next(input)
    }

    let numerator = side(input)?;
    '/'.parse_next(input)?;
    let denominator = side(input)?;

    Ok((numerator, denominator))
}

/// Parses exactly two ASCII digits.
pub(crate) fn two_digits(input: &mut &str) -> ModalResult<u8> {
    take_while(2..=2, '0'..='9').parse_to().parse_next(input)
}

/// Parses a `+` or `-`.
pub(crate) fn sign(input: &mut &str) -> ModalResult<Sign> {
    alt(('+'.value(Sign::Plus), '-'.value(Sign::Minus))).parse_next(input)
}

/// Parses a `±HH:MM` UTC offset.
///
/// The digits land in the record unvalidated - wire offsets round-trip
/// exactly, even silly ones like `+99:99`.
pub(crate) fn utc_offset(input: &mut &str) -> ModalResult<UtcOffset> {
    let parsed_sign = sign(input)?;
    let hours = two_digits(input)?;
    ':'.parse_next(input)?;
    let minutes = two_digits(input)?;

    Ok(UtcOffset {
        sign: parsed_sign,
        hours,
        minutes,
    })
}
