//! # `viewfinder_metadata`
//!
//! A typed value codec for image metadata, plus a dictionary-style access
//! layer to drive a metadata engine with.
//!
//! ## What this crate does
//!
//! Metadata engines hand tag values around as strings: an EXIF exposure
//! time is the text `"1/125"`, an IPTC time is `"10:52:04+05:30"`, an XMP
//! bag is one comma-joined line. Each family module here converts those
//! wire strings into structured values and back:
//!
//! - [`exif`] covers `Ascii` (with its datetime heuristics), the numeric
//!   types, and the `Undefined` ascii-code format.
//! - [`iptc`] covers repeatable datasets, including the asymmetric date
//!   and time wire formats.
//! - [`xmp`] covers the simple types, `bag`/`seq`/`alt` arrays, and
//!   `Lang Alt` language alternatives.
//!
//! On top of the codec sits [`Metadata`], a cached map-like view over any
//! [`MetadataStore`]. The store trait is the seam where a real engine
//! binding plugs in; [`stores::MemoryStore`] ships as an in-memory
//! implementation for tests and as a template for bindings.
//!
//! ```
//! use viewfinder_metadata::{Family, Metadata, RawValue, Tag, stores::MemoryStore};
//! use viewfinder_metadata_types::Value;
//!
//! let mut store = MemoryStore::new();
//! store.insert(
//!     Family::Iptc,
//!     "Iptc.Application2.Keywords",
//!     "String",
//!     RawValue::Repeated(vec!["coffee".into(), "rust".into()]),
//!     None,
//! );
//!
//! let metadata = Metadata::new(store);
//! let tag = metadata.get("Iptc.Application2.Keywords")?;
//! let Tag::Iptc(keywords) = tag else { unreachable!() };
//! assert_eq!(
//!     keywords.values,
//!     vec![Value::Text("coffee".into()), Value::Text("rust".into())],
//! );
//! # Ok::<(), viewfinder_metadata::MetadataError<viewfinder_metadata::stores::MemoryStoreError>>(())
//! ```
//!
//! ## What this crate doesn't do
//!
//! Parsing image files, the binary wire encodings, and tag dictionaries all
//! belong to the engine behind the [`MetadataStore`]. This crate never
//! touches bytes or the filesystem.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use core::fmt;

pub mod error;
pub mod exif;
pub mod iptc;
pub mod metadata;
pub(crate) mod parse;
pub mod stores;
pub mod xmp;

pub use crate::{
    error::{MetadataError, ValueError},
    metadata::{Metadata, Tag},
};

/// The three metadata families an engine can hold.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Family {
    Exif,
    Iptc,
    Xmp,
}

impl Family {
    /// The key prefix for this family, dot included.
    pub const fn key_prefix(&self) -> &'static str {
        match self {
            Family::Exif => "Exif.",
            Family::Iptc => "Iptc.",
            Family::Xmp => "Xmp.",
        }
    }

    /// Finds the family a key like `Exif.Image.DateTime` belongs to.
    ///
    /// Returns `None` when the prefix is no family at all.
    pub fn of_key(key: &str) -> Option<Self> {
        [Family::Exif, Family::Iptc, Family::Xmp]
            .into_iter()
            .find(|family| key.starts_with(family.key_prefix()))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Exif => "Exif",
            Family::Iptc => "Iptc",
            Family::Xmp => "Xmp",
        })
    }
}

/// One tag exactly as the engine holds it.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RawTag {
    /// The engine's type tag, like `"Ascii"` or `"bag Text"`.
    pub ty: String,

    /// The wire value.
    pub value: RawValue,

    /// The engine's human-readable rendering of the value, when it has one.
    ///
    /// This matters for EXIF `Undefined` tags: the raw payload is an
    /// ascii-code sequence only by convention, and the engine's rendering
    /// is the better source when present.
    pub formatted: Option<String>,
}

/// The wire form of a tag's value.
///
/// EXIF and XMP tags are single strings. IPTC tags are repeatable, so
/// their wire form is a list of strings; a non-repeatable IPTC tag is
/// simply a one-element list.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Repeated(Vec<String>),
}

/// The narrow contract between this crate and a metadata engine.
///
/// An implementation owns everything this crate deliberately doesn't:
/// reading and writing image files, binary wire encodings, and the tag
/// dictionaries that say which keys exist. [`Metadata`] drives one of
/// these and layers decoding, encoding, and caching on top.
///
/// [`MetadataStore::read`] and [`MetadataStore::write`] move the whole
/// metadata set between the store and its backing file. What "the backing
/// file" means is the implementation's business - [`stores::MemoryStore`]
/// fakes one with a snapshot.
pub trait MetadataStore {
    /// An error raised by the store itself, as opposed to the codec.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Lists the keys present in one family, in the engine's order.
    fn list_keys(&self, family: Family) -> Result<Vec<String>, Self::Error>;

    /// Grabs one tag's type and wire value.
    fn get_raw_tag(&self, family: Family, key: &str) -> Result<RawTag, Self::Error>;

    /// Replaces one tag's wire value.
    fn set_raw_tag(&mut self, family: Family, key: &str, value: RawValue)
    -> Result<(), Self::Error>;

    /// Removes one tag.
    fn delete_tag(&mut self, family: Family, key: &str) -> Result<(), Self::Error>;

    /// Loads the metadata set from the backing file.
    fn read(&mut self) -> Result<(), Self::Error>;

    /// Persists the metadata set to the backing file.
    fn write(&mut self) -> Result<(), Self::Error>;
}

pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
