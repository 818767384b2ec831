//! An in-memory [`MetadataStore`].

use rustc_hash::FxHashMap;

use crate::{Family, MetadataStore, RawTag, RawValue};

/// An error from [`MemoryStore`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// No tag lives under the key.
    ///
    /// Setting raises this too: minting a tag needs a type, which the
    /// store contract doesn't carry. Seed new tags with
    /// [`MemoryStore::insert`] instead.
    MissingTag { key: String },
}

impl core::fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemoryStoreError::MissingTag { key } => {
                write!(f, "No tag is stored under key `{key}`.")
            }
        }
    }
}

impl core::error::Error for MemoryStoreError {}

/// One family's tags plus their engine-side ordering.
#[derive(Clone, Debug, Default)]
struct FamilyTags {
    entries: FxHashMap<String, RawTag>,
    order: Vec<String>,
}

impl FamilyTags {
    fn insert(&mut self, key: &str, tag: RawTag) {
        if self.entries.insert(key.to_owned(), tag).is_none() {
            self.order.push(key.to_owned());
        }
    }
}

/// Everything the store holds, either live or persisted.
#[derive(Clone, Debug, Default)]
struct Snapshot {
    exif: FamilyTags,
    iptc: FamilyTags,
    xmp: FamilyTags,
}

impl Snapshot {
    fn family(&self, family: Family) -> &FamilyTags {
        match family {
            Family::Exif => &self.exif,
            Family::Iptc => &self.iptc,
            Family::Xmp => &self.xmp,
        }
    }

    fn family_mut(&mut self, family: Family) -> &mut FamilyTags {
        match family {
            Family::Exif => &mut self.exif,
            Family::Iptc => &mut self.iptc,
            Family::Xmp => &mut self.xmp,
        }
    }
}

/// A [`MetadataStore`] over plain maps.
///
/// Stands in for a real engine binding: enough to exercise
/// [`crate::Metadata`] end to end, and a template for what a binding has
/// to provide. "The backing file" is a second snapshot held next to the
/// live maps - [`MetadataStore::write`] copies live state into it, and
/// [`MetadataStore::read`] restores from it.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    live: Snapshot,
    persisted: Snapshot,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a tag, as if the engine had read it from a file.
    ///
    /// The tag lands in both the live set and the persisted snapshot, so
    /// a later [`MetadataStore::read`] brings it back rather than wiping
    /// it.
    pub fn insert(
        &mut self,
        family: Family,
        key: &str,
        ty: &str,
        value: RawValue,
        formatted: Option<String>,
    ) {
        let tag = RawTag {
            ty: ty.to_owned(),
            value,
            formatted,
        };

        self.live.family_mut(family).insert(key, tag.clone());
        self.persisted.family_mut(family).insert(key, tag);
    }
}

impl MetadataStore for MemoryStore {
    type Error = MemoryStoreError;

    fn list_keys(&self, family: Family) -> Result<Vec<String>, Self::Error> {
        Ok(self.live.family(family).order.clone())
    }

    fn get_raw_tag(&self, family: Family, key: &str) -> Result<RawTag, Self::Error> {
        self.live
            .family(family)
            .entries
            .get(key)
            .cloned()
            .ok_or_else(|| MemoryStoreError::MissingTag {
                key: key.to_owned(),
            })
    }

    fn set_raw_tag(
        &mut self,
        family: Family,
        key: &str,
        value: RawValue,
    ) -> Result<(), Self::Error> {
        match self.live.family_mut(family).entries.get_mut(key) {
            Some(stored) => {
                stored.value = value;

                // a real engine would re-render this. we can't
                stored.formatted = None;
                Ok(())
            }
            None => Err(MemoryStoreError::MissingTag {
                key: key.to_owned(),
            }),
        }
    }

    fn delete_tag(&mut self, family: Family, key: &str) -> Result<(), Self::Error> {
        let tags = self.live.family_mut(family);

        if tags.entries.remove(key).is_none() {
            return Err(MemoryStoreError::MissingTag {
                key: key.to_owned(),
            });
        }

        tags.order.retain(|k| k != key);
        Ok(())
    }

    fn read(&mut self) -> Result<(), Self::Error> {
        self.live = self.persisted.clone();
        Ok(())
    }

    fn write(&mut self) -> Result<(), Self::Error> {
        self.persisted = self.live.clone();
        Ok(())
    }
}
