use super::*;
use crate::error::SerdeError;
use rstest::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Edge {
  #[serde(rename = "_from")]
  from: String,
  #[serde(rename = "_to")]
  to: String,
  weight: f64,
  hops: u64,
  label: Option<String>,
}

fn edge() -> Edge {
  Edge {
    from: "persons/alice".to_string(),
    to: "persons/bob".to_string(),
    weight: 0.1 + 0.2,
    hops: u64::MAX,
    label: None,
  }
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_typed_round_trip(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let bytes = backend.encode(&edge()).unwrap();
  let decoded: Edge = backend.decode(&bytes).unwrap();
  assert_eq!(decoded, edge());
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_tree_round_trip_preserves_numbers_and_key_order(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let node = json!({"z": i64::MIN, "y": u64::MAX, "x": 1.5e-7, "w": [true, null, "s"]});
  let bytes = backend.render_tree(&node).unwrap();
  let parsed = backend.parse_tree(&bytes).unwrap();
  assert_eq!(parsed, node);
  let keys = parsed.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
  assert_eq!(keys, vec!["z", "y", "x", "w"]);
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_typed_value_matches_tree_view(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let bytes = backend.encode(&edge()).unwrap();
  let node = backend.parse_tree(&bytes).unwrap();
  assert_eq!(node["_from"], json!("persons/alice"));
  assert_eq!(node["hops"], json!(u64::MAX));
  assert_eq!(node["label"], json!(null));
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_missing_required_field_is_type_mismatch(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let bytes = backend.render_tree(&json!({"_from": "a/1", "weight": 1.0, "hops": 1})).unwrap();
  let err = backend.decode::<Edge>(&bytes).unwrap_err();
  assert!(err.is_type_mismatch(), "{err:?}");
  assert!(err.to_string().contains("_to"));
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_wrong_scalar_kind_is_type_mismatch(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let bytes = backend
    .render_tree(&json!({"_from": "a/1", "_to": "a/2", "weight": "heavy", "hops": 1}))
    .unwrap();
  assert!(backend.decode::<Edge>(&bytes).unwrap_err().is_type_mismatch());
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_unknown_fields_are_ignored(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let bytes = backend
    .render_tree(&json!({"_from": "a/1", "_to": "a/2", "weight": 2.0, "hops": 3, "_rev": "_abc"}))
    .unwrap();
  let decoded: Edge = backend.decode(&bytes).unwrap();
  assert_eq!(decoded.hops, 3);
}

#[test]
fn test_truncated_message_pack_is_malformed() {
  let backend = Backend::of(WireFormat::MessagePack);
  let bytes = backend.encode(&edge()).unwrap();
  for cut in [1, bytes.len() / 2, bytes.len() - 1] {
    let err = backend.decode::<Edge>(&bytes[..cut]).unwrap_err();
    assert!(err.is_malformed(), "cut at {cut}: {err:?}");
    assert!(backend.parse_tree(&bytes[..cut]).unwrap_err().is_malformed());
  }
}

#[test]
fn test_truncated_json_is_malformed_with_offset() {
  let backend = Backend::of(WireFormat::Json);
  let err = backend.decode::<Edge>(br#"{"_from":"a/1","_to""#).unwrap_err();
  match err {
    SerdeError::MalformedInput { format, offset, .. } => {
      assert_eq!(format, WireFormat::Json);
      assert!(offset.is_some());
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_trailing_bytes_are_malformed(#[case] format: WireFormat) {
  let backend = Backend::of(format);
  let mut bytes = backend.render_tree(&json!({"a": 1})).unwrap();
  bytes.extend_from_slice(&backend.render_tree(&json!(2)).unwrap());
  assert!(backend.decode::<GenericNode>(&bytes).unwrap_err().is_malformed());
  assert!(backend.parse_tree(&bytes).unwrap_err().is_malformed());
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_nesting_beyond_limit_is_malformed(#[case] format: WireFormat) {
  let mut node = json!(0);
  for _ in 0..10 {
    node = json!([node]);
  }
  let bytes = Backend::of(format).render_tree(&node).unwrap();
  assert_eq!(Backend::with_max_depth(format, 10).parse_tree(&bytes).unwrap(), node);
  let err = Backend::with_max_depth(format, 9).parse_tree(&bytes).unwrap_err();
  assert!(err.is_malformed(), "{err:?}");
}

#[test]
fn test_non_string_map_keys_are_unsupported_in_json() {
  let mut value = BTreeMap::new();
  value.insert((1u8, 2u8), "pair");
  let err = Backend::of(WireFormat::Json).encode(&value).unwrap_err();
  assert!(matches!(err, SerdeError::UnsupportedType { .. }), "{err:?}");
}

#[test]
fn test_for_content_type_selects_backend() {
  let backend = Backend::for_content_type("application/x-msgpack").unwrap();
  assert_eq!(backend.format(), WireFormat::MessagePack);
  assert!(Backend::for_content_type("text/plain").is_err());
}

#[test]
fn test_reserved_message_pack_marker_is_malformed() {
  let backend = Backend::of(WireFormat::MessagePack);
  let bytes = [0xc1];
  assert!(backend.decode::<i64>(&bytes).unwrap_err().is_malformed());
  assert!(backend.decode::<GenericNode>(&bytes).unwrap_err().is_malformed());
  assert!(backend.parse_tree(&bytes).unwrap_err().is_malformed());
  assert!(backend.parse_tree(&[0x91, 0xc1]).unwrap_err().is_malformed());
}

#[test]
fn test_non_finite_float_has_no_tree_form() {
  let backend = Backend::of(WireFormat::MessagePack);
  let mut value = BTreeMap::new();
  value.insert("v", f64::NAN);
  let bytes = backend.encode(&value).unwrap();
  let err = backend.parse_tree(&bytes).unwrap_err();
  assert!(matches!(err, SerdeError::UnsupportedType { .. }), "{err:?}");
  assert!(err.to_string().contains("non-finite"));

  let bytes = backend.encode(&f64::INFINITY).unwrap();
  assert!(backend.parse_tree(&bytes).is_err());
}

#[test]
fn test_message_pack_bin_is_read_as_array_of_octets() {
  let backend = Backend::of(WireFormat::MessagePack);
  let bin = [0xc4, 0x03, 0x01, 0x02, 0xff];
  let node = backend.parse_tree(&bin).unwrap();
  assert_eq!(node, json!([1, 2, 255]));
  assert_eq!(backend.render_tree(&node).unwrap(), vec![0x93, 0x01, 0x02, 0xcc, 0xff]);
}
