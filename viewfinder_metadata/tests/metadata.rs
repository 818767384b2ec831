use std::collections::BTreeMap;

use viewfinder_metadata::{
    Family, Metadata, MetadataError, MetadataStore as _, RawValue, Tag, ValueError,
    stores::{MemoryStore, MemoryStoreError},
};
use viewfinder_metadata_types::{Rational, Value};

fn logger() {
    _ = env_logger::builder()
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// Builds a store seeded with a few tags from each family.
fn seeded() -> MemoryStore {
    let mut store = MemoryStore::new();

    store.insert(
        Family::Exif,
        "Exif.Photo.ExposureTime",
        "Rational",
        RawValue::Text("1/125".into()),
        None,
    );
    store.insert(
        Family::Exif,
        "Exif.Photo.ExifVersion",
        "Undefined",
        RawValue::Text("48 50 50 49 ".into()),
        Some("2.21".into()),
    );
    store.insert(
        Family::Iptc,
        "Iptc.Application2.Keywords",
        "String",
        RawValue::Repeated(vec!["coffee".into(), "rust".into()]),
        None,
    );
    store.insert(
        Family::Xmp,
        "Xmp.dc.title",
        "Lang Alt",
        RawValue::Text("lang=\"x-default\" Morning still life".into()),
        None,
    );

    store
}

/// Checks that each family decodes through the facade.
#[test]
fn tags_decode_through_the_facade() {
    logger();

    let metadata = Metadata::new(seeded());

    let tag = metadata
        .get("Exif.Photo.ExposureTime")
        .expect("the tag is seeded");
    let Tag::Exif(exposure) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(
        exposure.value,
        Value::Rational(Rational::new(1, 125).expect("denominator isn't zero"))
    );

    let tag = metadata
        .get("Iptc.Application2.Keywords")
        .expect("the tag is seeded");
    let Tag::Iptc(keywords) = tag else {
        panic!("an `Iptc.` key must decode as IPTC. got: {tag:?}");
    };
    assert_eq!(
        keywords.values,
        vec![Value::Text("coffee".into()), Value::Text("rust".into())]
    );

    let tag = metadata.get("Xmp.dc.title").expect("the tag is seeded");
    let Tag::Xmp(title) = tag else {
        panic!("an `Xmp.` key must decode as XMP. got: {tag:?}");
    };
    assert_eq!(
        title.value,
        Value::LangAlt(BTreeMap::from([(
            "x-default".to_owned(),
            "Morning still life".to_owned()
        )]))
    );
}

/// Checks that the engine's formatted rendering wins for `Undefined`
/// tags, and that a replacement value drops it.
#[test]
fn formatted_renderings_win_until_replaced() {
    logger();

    let mut metadata = Metadata::new(seeded());

    let tag = metadata
        .get("Exif.Photo.ExifVersion")
        .expect("the tag is seeded");
    let Tag::Exif(version) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(version.value, Value::Text("2.21".to_owned()));

    // replacing the value kills the engine's rendering, so the new raw
    // decodes as ascii codes
    metadata
        .set("Exif.Photo.ExifVersion", Value::Bytes(vec![48, 50, 51, 48]))
        .expect("bytes encode as `Undefined`");

    let tag = metadata
        .get("Exif.Photo.ExifVersion")
        .expect("the tag still exists");
    let Tag::Exif(version) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(version.value, Value::Bytes(vec![48, 50, 51, 48]));
    assert_eq!(version.raw, "48 50 51 48 ");
}

/// Checks that setting re-encodes eagerly and lands in the store.
#[test]
fn set_encodes_into_the_store() {
    logger();

    let mut metadata = Metadata::new(seeded());

    metadata
        .set(
            "Exif.Photo.ExposureTime",
            Value::Rational(Rational::new(1, 250).expect("denominator isn't zero")),
        )
        .expect("a fraction encodes as `Rational`");

    let raw = metadata
        .store()
        .get_raw_tag(Family::Exif, "Exif.Photo.ExposureTime")
        .expect("the tag exists");
    assert_eq!(raw.value, RawValue::Text("1/250".into()));

    // and the cached view agrees
    let tag = metadata
        .get("Exif.Photo.ExposureTime")
        .expect("the tag still exists");
    let Tag::Exif(exposure) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(exposure.raw, "1/250");
}

/// Checks that an IPTC array fans out into repetitions, and a lone value
/// sets a one-element repetition.
#[test]
fn iptc_sets_fan_out() {
    logger();

    let mut metadata = Metadata::new(seeded());

    metadata
        .set(
            "Iptc.Application2.Keywords",
            Value::Array(vec![
                Value::Text("tea".into()),
                Value::Text("rust".into()),
                Value::Text("morning".into()),
            ]),
        )
        .expect("text repetitions encode as `String`");

    let raw = metadata
        .store()
        .get_raw_tag(Family::Iptc, "Iptc.Application2.Keywords")
        .expect("the tag exists");
    assert_eq!(
        raw.value,
        RawValue::Repeated(vec!["tea".into(), "rust".into(), "morning".into()])
    );

    metadata
        .set("Iptc.Application2.Keywords", Value::Text("espresso".into()))
        .expect("a lone value is a one-element repetition");

    let raw = metadata
        .store()
        .get_raw_tag(Family::Iptc, "Iptc.Application2.Keywords")
        .expect("the tag exists");
    assert_eq!(raw.value, RawValue::Repeated(vec!["espresso".into()]));
}

/// Checks that a codec rejection leaves the store untouched.
#[test]
fn rejected_values_never_reach_the_store() {
    logger();

    let mut metadata = Metadata::new(seeded());

    let err = metadata
        .set("Exif.Photo.ExposureTime", Value::Boolean(true))
        .expect_err("a boolean isn't a fraction");
    assert!(
        matches!(err, MetadataError::Value(ValueError::Exif(_))),
        "expected a codec error, got: {err:?}"
    );

    let raw = metadata
        .store()
        .get_raw_tag(Family::Exif, "Exif.Photo.ExposureTime")
        .expect("the tag exists");
    assert_eq!(raw.value, RawValue::Text("1/125".into()));
}

/// Checks the error paths around keys: no family prefix, missing tags,
/// and unknown type strings.
#[test]
fn key_errors_are_precise() {
    logger();

    let mut store = seeded();
    store.insert(
        Family::Exif,
        "Exif.Image.Whatever",
        "Float",
        RawValue::Text("1.5".into()),
        None,
    );
    let mut metadata = Metadata::new(store);

    let err = metadata
        .get("Thumbnail.Width")
        .expect_err("the prefix is no family");
    assert_eq!(
        err,
        MetadataError::UnknownFamily {
            key: "Thumbnail.Width".to_owned(),
        }
    );

    let err = metadata
        .set("Exif.Image.DateTime", Value::Integer(4))
        .expect_err("the tag was never seeded");
    assert_eq!(
        err,
        MetadataError::Store(MemoryStoreError::MissingTag {
            key: "Exif.Image.DateTime".to_owned(),
        })
    );

    let err = metadata
        .get("Exif.Image.Whatever")
        .expect_err("`Float` isn't in the vocabulary");
    assert_eq!(
        err,
        MetadataError::UnknownType {
            key: "Exif.Image.Whatever".to_owned(),
            ty: "Float".to_owned(),
        }
    );
}

/// Checks that one undecodable tag doesn't poison its neighbors.
#[test]
fn bad_tags_fail_alone() {
    logger();

    let mut store = seeded();
    store.insert(
        Family::Exif,
        "Exif.Photo.FNumber",
        "Rational",
        RawValue::Text("not a fraction".into()),
        None,
    );
    let metadata = Metadata::new(store);

    let err = metadata
        .get("Exif.Photo.FNumber")
        .expect_err("the raw value is garbage");
    assert!(
        matches!(err, MetadataError::Value(ValueError::Exif(_))),
        "expected a codec error, got: {err:?}"
    );

    // the neighbor is untouched
    assert!(metadata.get("Exif.Photo.ExposureTime").is_ok());
}

/// Checks that key listings track sets and deletes.
#[test]
fn key_listings_track_mutations() {
    logger();

    let mut metadata = Metadata::new(seeded());

    let keys = metadata.keys(Family::Exif).expect("listing can't fail");
    assert_eq!(
        keys,
        vec!["Exif.Photo.ExposureTime", "Exif.Photo.ExifVersion"]
    );

    metadata
        .delete("Exif.Photo.ExifVersion")
        .expect("the tag exists");

    let keys = metadata.keys(Family::Exif).expect("listing can't fail");
    assert_eq!(keys, vec!["Exif.Photo.ExposureTime"]);

    // deleted means gone from `get` too
    assert!(metadata.get("Exif.Photo.ExifVersion").is_err());
}

/// Checks that `read` rolls back to the persisted snapshot and drops the
/// caches, while `write` makes changes stick.
#[test]
fn read_restores_and_write_persists() {
    logger();

    let mut metadata = Metadata::new(seeded());

    metadata
        .set(
            "Exif.Photo.ExposureTime",
            Value::Rational(Rational::new(1, 500).expect("denominator isn't zero")),
        )
        .expect("a fraction encodes as `Rational`");

    // nothing was written, so reading rolls the change back
    metadata.read().expect("the memory store always reads");

    let tag = metadata
        .get("Exif.Photo.ExposureTime")
        .expect("the tag is back");
    let Tag::Exif(exposure) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(exposure.raw, "1/125");

    // this time, write first. the change survives the reload
    metadata
        .set(
            "Exif.Photo.ExposureTime",
            Value::Rational(Rational::new(1, 500).expect("denominator isn't zero")),
        )
        .expect("a fraction encodes as `Rational`");
    metadata.write().expect("the memory store always writes");
    metadata.read().expect("the memory store always reads");

    let tag = metadata
        .get("Exif.Photo.ExposureTime")
        .expect("the tag persisted");
    let Tag::Exif(exposure) = tag else {
        panic!("an `Exif.` key must decode as EXIF. got: {tag:?}");
    };
    assert_eq!(exposure.raw, "1/500");
}

/// Checks that concurrent readers share one facade without trouble.
#[test]
fn readers_share_the_facade() {
    logger();

    let metadata = Metadata::new(seeded());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let tag = metadata
                        .get("Exif.Photo.ExposureTime")
                        .expect("the tag is seeded");
                    assert_eq!(tag.key(), "Exif.Photo.ExposureTime");

                    let keys = metadata.keys(Family::Iptc).expect("listing can't fail");
                    assert_eq!(keys, vec!["Iptc.Application2.Keywords"]);
                }
            });
        }
    });
}
