use pathkit_archive::{
    ArchiveCodec, DecodeContext, Error, FnTransform, NativeEncoder, NativeValue, Origin, Purpose,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i64,
    y: i64,
}

fn points() -> Vec<Point> {
    vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }]
}

fn xor(key: u8) -> FnTransform {
    FnTransform::new(
        move |b| b.into_iter().map(|byte| byte ^ key).collect(),
        move |b| b.into_iter().map(|byte| byte ^ key).collect(),
    )
}

#[test]
fn typed_values_round_trip_through_json() {
    let codec = ArchiveCodec::default();

    let bytes = codec.encode(&points()).unwrap();
    let back: Vec<Point> = codec.decode(&bytes, DecodeContext::default()).unwrap();

    assert!(bytes.starts_with(b"["));
    assert_eq!(back, points());
}

#[test]
fn encrypted_archive_is_not_plain_json() {
    let codec = ArchiveCodec::default().with_transform(xor(0x5a));

    let bytes = codec.encode(&points()).unwrap();

    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
    let back: Vec<Point> = codec.decode(&bytes, DecodeContext::default()).unwrap();
    assert_eq!(back, points());
}

#[test]
fn unencrypted_archive_still_reads_after_adding_a_transform() {
    let plain = ArchiveCodec::default().encode(&points()).unwrap();
    let encrypted = ArchiveCodec::default().with_transform(xor(0x5a));

    let back: Vec<Point> = encrypted.decode(&plain, DecodeContext::default()).unwrap();

    assert_eq!(back, points());
}

#[cfg(feature = "binary-fallback")]
#[rstest]
#[case::plain(ArchiveCodec::default())]
#[case::encrypted(ArchiveCodec::default().with_transform(xor(0x5a)))]
fn trees_json_cannot_hold_fall_back_to_binary(#[case] codec: ArchiveCodec) {
    let tree = NativeValue::Sequence(vec![
        NativeValue::Bytes(vec![1, 2, 3]),
        NativeValue::Float(f64::NAN),
    ]);

    let bytes = codec.data(&tree).unwrap();
    let back = codec.object(&bytes).unwrap();

    let items = back.as_sequence().unwrap();
    assert_eq!(items[0], NativeValue::Bytes(vec![1, 2, 3]));
    assert!(matches!(items[1], NativeValue::Float(f) if f.is_nan()));
}

#[rstest]
#[case::empty(b"".as_slice())]
#[case::garbage(b"\xff\x00 garbage".as_slice())]
#[case::truncated_json(b"[{\"x\": 1".as_slice())]
#[case::scalar_json(b"42".as_slice())]
fn undecodable_bytes_report_every_attempt(#[case] bytes: &[u8]) {
    let codec = ArchiveCodec::default().with_transform(xor(0x21));

    let err = codec.object(bytes).unwrap_err();

    let Error::DecodeCorrupt { attempts } = err else {
        panic!("expected DecodeCorrupt, got {err:?}");
    };
    assert_eq!(attempts.len(), 1 + codec.format_names().len());
    assert!(attempts[0].starts_with("raw json"));
}

#[test]
fn decoding_into_the_wrong_shape_is_a_decode_error() {
    let codec = ArchiveCodec::default();
    let bytes = codec.encode(&vec!["a", "b"]).unwrap();

    let err = codec
        .decode::<Vec<Point>>(&bytes, DecodeContext::default())
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn encoder_output_is_accepted_by_codec() {
    let tree = NativeEncoder.encode(&points()).unwrap();

    let bytes = ArchiveCodec::json_only().data(&tree).unwrap();

    assert_eq!(ArchiveCodec::json_only().object(&bytes).unwrap(), tree);
}

/// A record whose `etag` is only trusted when it came from a server.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    name: String,
    #[serde(deserialize_with = "remote_only")]
    etag: Option<String>,
}

fn remote_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    match DecodeContext::current() {
        Some(DecodeContext {
            origin: Origin::Remote,
            ..
        }) => Ok(value),
        _ => Ok(None),
    }
}

#[rstest]
#[case::local(Origin::Local, None)]
#[case::remote(Origin::Remote, Some("v7".to_string()))]
fn deserialize_impls_see_the_decode_context(#[case] origin: Origin, #[case] etag: Option<String>) {
    let codec = ArchiveCodec::default();
    let bytes = codec
        .encode(&vec![Record {
            name: "a".into(),
            etag: Some("v7".into()),
        }])
        .unwrap();

    let back: Vec<Record> = codec
        .decode(&bytes, DecodeContext::new(Purpose::Update, origin))
        .unwrap();

    assert_eq!(back[0].etag, etag);
    assert_eq!(DecodeContext::current(), None);
}
