//! GPS coordinates in the sexagesimal form XMP uses.

use core::fmt;

/// The cardinal direction suffixed onto a [`GpsCoordinate`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// The single-letter wire form.
    pub const fn as_char(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = GpsCoordinateError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            'N' => Direction::North,
            'S' => Direction::South,
            'E' => Direction::East,
            'W' => Direction::West,
            other => return Err(GpsCoordinateError::UnknownDirection(other)),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error raised when a [`GpsCoordinate`] part is out of range.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GpsCoordinateError {
    /// Degrees were above 90.
    DegreesOutOfRange(u8),

    /// Minutes were above 60.
    MinutesOutOfRange(u8),

    /// Seconds were above 60.
    SecondsOutOfRange(u8),

    /// A direction letter wasn't one of `N`, `S`, `E`, or `W`.
    UnknownDirection(char),
}

impl fmt::Display for GpsCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsCoordinateError::DegreesOutOfRange(degrees) => {
                write!(f, "GPS degrees must be in `[0, 90]`. got: {degrees}")
            }
            GpsCoordinateError::MinutesOutOfRange(minutes) => {
                write!(f, "GPS minutes must be in `[0, 60]`. got: {minutes}")
            }
            GpsCoordinateError::SecondsOutOfRange(seconds) => {
                write!(f, "GPS seconds must be in `[0, 60]`. got: {seconds}")
            }
            GpsCoordinateError::UnknownDirection(c) => {
                write!(f, "GPS direction must be `N`, `S`, `E`, or `W`. got: `{c}`")
            }
        }
    }
}

impl core::error::Error for GpsCoordinateError {}

/// A GPS coordinate: whole degrees, minutes, and seconds, plus a cardinal
/// direction.
///
/// Ranges are checked at construction, with degrees in `[0, 90]` and
/// minutes/seconds in `[0, 60]`, so a held coordinate is always sane. The
/// wire form is `D,M,Sk` with no zero padding, like `48,51,27N`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GpsCoordinate {
    degrees: u8,
    minutes: u8,
    seconds: u8,
    direction: Direction,
}

impl GpsCoordinate {
    /// Creates a coordinate, checking each part's range.
    ///
    /// # Errors
    ///
    /// Returns a [`GpsCoordinateError`] naming the first part that's out of
    /// range.
    pub const fn new(
        degrees: u8,
        minutes: u8,
        seconds: u8,
        direction: Direction,
    ) -> Result<Self, GpsCoordinateError> {
        if degrees > 90 {
            return Err(GpsCoordinateError::DegreesOutOfRange(degrees));
        }
        if minutes > 60 {
            return Err(GpsCoordinateError::MinutesOutOfRange(minutes));
        }
        if seconds > 60 {
            return Err(GpsCoordinateError::SecondsOutOfRange(seconds));
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            direction,
        })
    }

    /// Whole degrees, in `[0, 90]`.
    pub const fn degrees(&self) -> u8 {
        self.degrees
    }

    /// Whole minutes, in `[0, 60]`.
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Whole seconds, in `[0, 60]`.
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// The cardinal direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for GpsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}{}",
            self.degrees, self.minutes, self.seconds, self.direction
        )
    }
}
