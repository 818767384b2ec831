use viewfinder_metadata::{exif, iptc, xmp};
use viewfinder_metadata_types::{
    Sign, UtcOffset, Value,
    exif::ExifValueType,
    iptc::IptcValueType,
    xmp::{XmpSimpleType, XmpValueType},
};

fn logger() {
    _ = env_logger::builder()
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// Checks a realistic tag from each family through the public codec
/// functions.
#[test]
fn one_value_per_family() {
    logger();

    let value = exif::decode_value("2019-08-12T21:41:48Z", ExifValueType::Ascii, None)
        .expect("`Ascii` decoding is infallible");
    let Value::DateTime { datetime, offset } = value else {
        panic!("a `Z`-suffixed stamp must decode as a datetime. got: {value:?}");
    };
    assert_eq!(offset, None);
    assert_eq!(
        exif::encode_value(
            "Exif.Image.DateTime",
            &Value::DateTime { datetime, offset },
            ExifValueType::Ascii,
        )
        .expect("datetimes encode"),
        "2019:08:12 21:41:48"
    );

    let value = iptc::decode_value("10:52:04+05:30", IptcValueType::Time)
        .expect("an offset time decodes");
    assert_eq!(
        iptc::encode_value(&value, IptcValueType::Time).expect("times encode"),
        "105204+0530"
    );

    let value = xmp::decode_value("2009-10-13T05:29:00-06:00", XmpValueType::Simple(XmpSimpleType::Date))
        .expect("offset timestamps decode");
    let Value::DateTime { offset, .. } = &value else {
        panic!("an offset stamp must decode as a datetime. got: {value:?}");
    };
    assert_eq!(*offset, Some(UtcOffset::new(Sign::Minus, 6, 0)));

    // zero seconds re-encode in the short form
    assert_eq!(
        xmp::encode_value(&value, XmpValueType::Simple(XmpSimpleType::Date))
            .expect("timestamps encode"),
        "2009-10-13T05:29-06:00"
    );
}

/// Checks the `Undefined` byte helpers as a pair.
#[test]
fn undefined_helpers_invert_each_other() {
    logger();

    let bytes = exif::undefined_to_bytes("86 105 101 119").expect("codes are well-formed");
    assert_eq!(bytes, b"View".to_vec());

    let raw = exif::bytes_to_undefined(&bytes);
    assert_eq!(raw, "86 105 101 119 ");

    let again = exif::undefined_to_bytes(&raw).expect("the encoder's output decodes");
    assert_eq!(again, bytes);
}
