//! The dictionary-like front over a [`MetadataStore`].

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use viewfinder_metadata_types::{
    Value, exif::ExifValueType, iptc::IptcValueType, xmp::XmpValueType,
};

use crate::{
    Family, MetadataStore, RawTag, RawValue,
    error::MetadataError,
    exif::ExifTag,
    iptc::IptcTag,
    xmp::XmpTag,
};

/// A decoded tag from any family.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Exif(ExifTag),
    Iptc(IptcTag),
    Xmp(XmpTag),
}

impl Tag {
    /// The tag's full key.
    pub fn key(&self) -> &str {
        match self {
            Tag::Exif(tag) => &tag.key,
            Tag::Iptc(tag) => &tag.key,
            Tag::Xmp(tag) => &tag.key,
        }
    }
}

/// Cached, map-like access to a metadata store.
///
/// Keys look like `Exif.Image.DateTime` - the prefix picks the family, and
/// the rest is the engine's business. Tags decode once and stay cached
/// until [`Metadata::read`] drops everything. Every mutation re-encodes
/// eagerly, so the store never sees a value the codec didn't produce.
///
/// Reads take `&self` and may run concurrently from several threads;
/// mutations take `&mut self`.
pub struct Metadata<S: MetadataStore> {
    store: S,

    /// Key lists per family, straight from the store.
    keys: RwLock<FxHashMap<Family, Vec<String>>>,

    /// Decoded tags by key.
    tags: RwLock<FxHashMap<String, Tag>>,
}

impl<S: MetadataStore> Metadata<S> {
    /// Wraps a store.
    ///
    /// No I/O happens here. If the store isn't pre-populated, call
    /// [`Metadata::read`] to load it from its backing file.
    pub fn new(store: S) -> Self {
        Self {
            store,
            keys: RwLock::new(FxHashMap::default()),
            tags: RwLock::new(FxHashMap::default()),
        }
    }

    /// A shared borrow of the store underneath.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps back into the store underneath.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the metadata set from the store's backing file.
    ///
    /// Every cache drops, decoded tags included: the file's contents
    /// supersede anything this view learned earlier.
    ///
    /// # Errors
    ///
    /// Errors when the store's own read fails. The caches survive a
    /// failed read untouched.
    pub fn read(&mut self) -> Result<(), MetadataError<S::Error>> {
        self.store.read().map_err(|e| {
            log::error!("The store failed to read. err: {e}");
            MetadataError::Store(e)
        })?;

        self.keys.write().clear();
        self.tags.write().clear();

        log::trace!("Reloaded from the backing file. Caches dropped.");
        Ok(())
    }

    /// Persists the metadata set to the store's backing file.
    ///
    /// Caches stay valid - writing changes the file, not the view.
    ///
    /// # Errors
    ///
    /// Errors when the store's own write fails.
    pub fn write(&mut self) -> Result<(), MetadataError<S::Error>> {
        self.store.write().map_err(|e| {
            log::error!("The store failed to write. err: {e}");
            MetadataError::Store(e)
        })
    }

    /// The keys present in one family, in the engine's order.
    ///
    /// The first call per family hits the store; later calls serve the
    /// cached list.
    ///
    /// # Errors
    ///
    /// Errors when the store can't list the family.
    pub fn keys(&self, family: Family) -> Result<Vec<String>, MetadataError<S::Error>> {
        if let Some(cached) = self.keys.read().get(&family) {
            log::trace!("Cached key list found. family: {family}");
            return Ok(cached.clone());
        }

        let fetched = self
            .store
            .list_keys(family)
            .map_err(MetadataError::Store)?;

        self.keys.write().insert(family, fetched.clone());
        Ok(fetched)
    }

    /// Fetches one tag, decoding it on first touch.
    ///
    /// # Errors
    ///
    /// Errors when the key has no family prefix, the store doesn't hold
    /// it, its type tag is unknown, or its raw value doesn't decode. A
    /// failed decode poisons nothing - other tags stay reachable.
    pub fn get(&self, key: &str) -> Result<Tag, MetadataError<S::Error>> {
        if let Some(cached) = self.tags.read().get(key) {
            log::trace!("Cached tag found. key: `{key}`");
            return Ok(cached.clone());
        }

        let family = family_of(key)?;
        let raw = self
            .store
            .get_raw_tag(family, key)
            .map_err(MetadataError::Store)?;

        let tag = decode_tag(family, key, raw)?;

        self.tags.write().insert(key.to_owned(), tag.clone());
        Ok(tag)
    }

    /// Encodes a new value for an existing tag and hands it to the store.
    ///
    /// The tag's type comes from whatever the store already holds under
    /// this key - minting brand-new tags takes the engine's tag
    /// dictionary, which lives behind the store, not here.
    ///
    /// For a repeatable IPTC tag, pass a [`Value::Array`] to set several
    /// repetitions; any other value sets exactly one.
    ///
    /// # Errors
    ///
    /// Errors when the key has no family prefix, the value doesn't encode
    /// for the tag's type, or the store rejects the update. Encoding
    /// happens first, so a codec rejection leaves the store untouched.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), MetadataError<S::Error>> {
        let family = family_of(key)?;

        let tag = match family {
            Family::Exif => {
                let cached = match self.tags.read().get(key) {
                    Some(Tag::Exif(tag)) => Some(tag.ty),
                    _ => None,
                };
                let ty: ExifValueType = match cached {
                    Some(ty) => ty,
                    None => self.stored_ty(family, key)?,
                };

                let tag = ExifTag::from_value(key, ty, value)?;
                self.store
                    .set_raw_tag(family, key, RawValue::Text(tag.raw.clone()))
                    .map_err(MetadataError::Store)?;
                Tag::Exif(tag)
            }

            Family::Iptc => {
                let cached = match self.tags.read().get(key) {
                    Some(Tag::Iptc(tag)) => Some(tag.ty),
                    _ => None,
                };
                let ty: IptcValueType = match cached {
                    Some(ty) => ty,
                    None => self.stored_ty(family, key)?,
                };

                let values = match value {
                    Value::Array(items) => items,
                    single => vec![single],
                };

                let tag = IptcTag::from_values(key, ty, values)?;
                self.store
                    .set_raw_tag(family, key, RawValue::Repeated(tag.raw_values.clone()))
                    .map_err(MetadataError::Store)?;
                Tag::Iptc(tag)
            }

            Family::Xmp => {
                let cached = match self.tags.read().get(key) {
                    Some(Tag::Xmp(tag)) => Some(tag.ty),
                    _ => None,
                };
                let ty: XmpValueType = match cached {
                    Some(ty) => ty,
                    None => self.stored_ty(family, key)?,
                };

                let tag = XmpTag::from_value(key, ty, value)?;
                self.store
                    .set_raw_tag(family, key, RawValue::Text(tag.raw.clone()))
                    .map_err(MetadataError::Store)?;
                Tag::Xmp(tag)
            }
        };

        log::trace!("Set tag. key: `{key}`");

        // the caches learn the new tag right away
        if let Some(list) = self.keys.write().get_mut(&family) {
            if !list.iter().any(|k| k == key) {
                list.push(key.to_owned());
            }
        }
        self.tags.write().insert(key.to_owned(), tag);

        Ok(())
    }

    /// Removes one tag from the store and the caches.
    ///
    /// # Errors
    ///
    /// Errors when the key has no family prefix or the store rejects the
    /// removal.
    pub fn delete(&mut self, key: &str) -> Result<(), MetadataError<S::Error>> {
        let family = family_of(key)?;

        self.store
            .delete_tag(family, key)
            .map_err(MetadataError::Store)?;

        if let Some(list) = self.keys.write().get_mut(&family) {
            list.retain(|k| k != key);
        }
        self.tags.write().remove(key);

        log::trace!("Deleted tag. key: `{key}`");
        Ok(())
    }

    /// Looks up the type the store reports for a key, parsed into the
    /// family's vocabulary.
    fn stored_ty<T>(&self, family: Family, key: &str) -> Result<T, MetadataError<S::Error>>
    where
        T: for<'a> TryFrom<&'a str>,
    {
        let reported = self
            .store
            .get_raw_tag(family, key)
            .map_err(MetadataError::Store)?
            .ty;

        parse_ty(key, &reported)
    }
}

/// Finds a key's family or reports it unknown.
fn family_of<E>(key: &str) -> Result<Family, MetadataError<E>> {
    Family::of_key(key).ok_or_else(|| {
        log::warn!("Key belongs to no known family. key: `{key}`");
        MetadataError::UnknownFamily {
            key: key.to_owned(),
        }
    })
}

/// Decodes a raw tag through its family's codec.
fn decode_tag<E>(family: Family, key: &str, raw: RawTag) -> Result<Tag, MetadataError<E>> {
    let RawTag {
        ty: reported,
        value,
        formatted,
    } = raw;

    let wrong_shape = || MetadataError::RawShape {
        key: key.to_owned(),
    };

    match family {
        Family::Exif => {
            let ty = parse_ty::<ExifValueType, E>(key, &reported)?;
            let RawValue::Text(text) = value else {
                return Err(wrong_shape());
            };
            Ok(Tag::Exif(ExifTag::from_raw(key, ty, text, formatted)?))
        }

        Family::Iptc => {
            let ty = parse_ty::<IptcValueType, E>(key, &reported)?;

            // a store may hand a non-repeated dataset over as plain text.
            // that's just a one-element repetition
            let raw_values = match value {
                RawValue::Repeated(list) => list,
                RawValue::Text(text) => vec![text],
            };
            Ok(Tag::Iptc(IptcTag::from_raw(key, ty, raw_values)?))
        }

        Family::Xmp => {
            let ty = parse_ty::<XmpValueType, E>(key, &reported)?;
            let RawValue::Text(text) = value else {
                return Err(wrong_shape());
            };
            Ok(Tag::Xmp(XmpTag::from_raw(key, ty, text)?))
        }
    }
}

/// Parses a reported type string into a family vocabulary.
fn parse_ty<T, E>(key: &str, reported: &str) -> Result<T, MetadataError<E>>
where
    T: for<'a> TryFrom<&'a str>,
{
    T::try_from(reported).map_err(|_| {
        log::warn!("Tag reports an unknown value type. key: `{key}`, ty: `{reported}`");
        MetadataError::UnknownType {
            key: key.to_owned(),
            ty: reported.to_owned(),
        }
    })
}
