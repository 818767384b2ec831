//! Fixed UTC offsets, kept exactly as their wire digits.

use core::fmt;

/// Which way a [`UtcOffset`] leans relative to UTC.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    /// The wire character, `+` or `-`.
    pub const fn as_char(&self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A fixed offset from UTC, as a plain record of its parts.
///
/// IPTC times and XMP datetimes carry their offsets as literal
/// sign-hours-minutes digits, and those digits must survive a round-trip
/// untouched. So, unlike `chrono`'s offset types, this one neither validates
/// nor normalizes: whatever digits came off the wire are what you get back.
///
/// The zero offset displays as `Z`; everything else displays as `±HH:MM`:
///
/// ```
/// use viewfinder_metadata_types::{Sign, UtcOffset};
///
/// assert_eq!(UtcOffset::default().to_string(), "Z");
/// assert_eq!(UtcOffset::new(Sign::Minus, 4, 30).to_string(), "-04:30");
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct UtcOffset {
    pub sign: Sign,
    pub hours: u8,
    pub minutes: u8,
}

impl UtcOffset {
    /// Creates an offset from its parts. No range checking happens here.
    pub const fn new(sign: Sign, hours: u8, minutes: u8) -> Self {
        Self {
            sign,
            hours,
            minutes,
        }
    }

    /// Whether this is the zero offset.
    ///
    /// The sign doesn't matter: `-00:00` is still zero.
    pub const fn is_utc(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    /// The whole offset in signed minutes.
    ///
    /// Handy for shifting a local timestamp onto UTC before comparing it
    /// with another.
    pub const fn total_minutes(&self) -> i32 {
        let magnitude = self.hours as i32 * 60 + self.minutes as i32;

        match self.sign {
            Sign::Plus => magnitude,
            Sign::Minus => -magnitude,
        }
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_utc() {
            return f.write_str("Z");
        }

        write!(f, "{}{:02}:{:02}", self.sign, self.hours, self.minutes)
    }
}
