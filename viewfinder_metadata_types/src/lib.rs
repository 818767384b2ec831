//! # `viewfinder_metadata_types`
//!
//! Value types shared across the `viewfinder_metadata` codec: the decoded
//! [`Value`] union, the small wire-faithful records it's built from
//! ([`Rational`], [`UtcOffset`], [`GpsCoordinate`]), and the closed type-tag
//! vocabularies for each metadata family ([`exif`], [`iptc`], [`xmp`]).
//!
//! Everything here is plain data. The conversions between these types and
//! their wire strings live in `viewfinder_metadata` itself.

#![forbid(unsafe_code)]

pub mod exif;
pub mod gps;
pub mod iptc;
pub mod offset;
pub mod rational;
pub mod value;
pub mod xmp;

pub use gps::{Direction, GpsCoordinate, GpsCoordinateError};
pub use offset::{Sign, UtcOffset};
pub use rational::{Rational, ZeroDenominator};
pub use value::Value;
