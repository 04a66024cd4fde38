use pathkit_archive::{ArchiveCodec, DecodeContext, FnTransform, NativeEncoder, NativeValue};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn rotate() -> FnTransform {
    FnTransform::new(
        |b| b.into_iter().map(|byte| byte.wrapping_add(13)).collect(),
        |b| b.into_iter().map(|byte| byte.wrapping_sub(13)).collect(),
    )
}

proptest! {
    #[test]
    fn records_survive_the_codec(
        records in prop::collection::vec(
            (".*", any::<i64>(), any::<bool>(), any::<Option<u64>>()),
            0..16,
        )
    ) {
        let codec = ArchiveCodec::default();

        let bytes = codec.encode(&records).unwrap();
        let back: Vec<(String, i64, bool, Option<u64>)> =
            codec.decode(&bytes, DecodeContext::default()).unwrap();

        prop_assert_eq!(back, records);
    }

    #[test]
    fn string_maps_survive_an_encrypting_codec(
        map in prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..16)
    ) {
        let codec = ArchiveCodec::default().with_transform(rotate());

        let bytes = codec.encode(&map).unwrap();
        let back: BTreeMap<String, i32> = codec.decode(&bytes, DecodeContext::default()).unwrap();

        prop_assert_eq!(back, map);
    }

    #[test]
    fn encoded_roots_are_containers(values in prop::collection::vec(any::<i16>(), 0..8)) {
        let tree = NativeEncoder.encode(&values).unwrap();

        prop_assert!(tree.is_container());
        prop_assert!(!matches!(tree, NativeValue::Null));
    }
}
