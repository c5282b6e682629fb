use super::*;
use crate::wire_format::WireFormat;
use rstest::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, PartialEq, Deserialize)]
struct Named {
  #[serde(rename = "_id")]
  id: String,
  name: String,
}

fn envelope(format: WireFormat) -> EncodedDocument {
  let node = json!({"error": false, "result": {"_id": "c/1", "name": "x"}, "extra": [1, 2, 3]});
  EncodedDocument::from_tree(format, &node).unwrap()
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_extract_keeps_format_and_value(#[case] format: WireFormat) {
  let extracted = extract(&envelope(format), &Pointer::parse("/result").unwrap()).unwrap();
  assert_eq!(extracted.format(), format);
  let named: Named = Backend::of(format).decode(extracted.as_bytes()).unwrap();
  assert_eq!(
    named,
    Named {
      id: "c/1".to_string(),
      name: "x".to_string()
    }
  );
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_extract_absent_yields_null(#[case] format: WireFormat) {
  for pointer in ["/missing", "/extra/9", "/result/name/deeper"] {
    let extracted = extract(&envelope(format), &Pointer::parse(pointer).unwrap()).unwrap();
    assert!(extracted.is_null(), "{pointer}");
    let decoded: Option<Named> = Backend::of(format).decode(extracted.as_bytes()).unwrap();
    assert_eq!(decoded, None);
  }
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_extract_root_returns_document(#[case] format: WireFormat) {
  let doc = envelope(format);
  assert_eq!(extract(&doc, &Pointer::root()).unwrap(), doc);
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_extract_many_preserves_order(#[case] format: WireFormat) {
  let pointers = [
    Pointer::parse("/extra/1").unwrap(),
    Pointer::parse("/nothing").unwrap(),
    Pointer::parse("/error").unwrap(),
  ];
  let docs = PointerExtractor::default().extract_many(&envelope(format), &pointers).unwrap();
  let backend = Backend::of(format);
  let values = docs
    .iter()
    .map(|doc| backend.parse_tree(doc.as_bytes()).unwrap())
    .collect::<Vec<_>>();
  assert_eq!(values, vec![json!(2), json!(null), json!(false)]);
}

#[test]
fn test_extract_from_malformed_input_fails() {
  let doc = EncodedDocument::new(WireFormat::MessagePack, vec![0x82, 0xa1, b'a']);
  let err = extract(&doc, &Pointer::parse("/a").unwrap()).unwrap_err();
  assert!(err.is_malformed());

  let doc = EncodedDocument::new(WireFormat::Json, br#"{"a": [1, 2"#.to_vec());
  assert!(extract(&doc, &Pointer::root()).unwrap_err().is_malformed());
}

#[test]
fn test_extract_honours_depth_limit() {
  let doc = EncodedDocument::new(WireFormat::Json, br#"{"a":{"b":{"c":1}}}"#.to_vec());
  let pointer = Pointer::parse("/a/b").unwrap();
  assert!(PointerExtractor::new(3).extract(&doc, &pointer).is_ok());
  assert!(PointerExtractor::new(2).extract(&doc, &pointer).unwrap_err().is_malformed());
}

#[rstest]
#[case(WireFormat::Json)]
#[case(WireFormat::MessagePack)]
fn test_backends_share_the_nesting_limit(#[case] format: WireFormat) {
  let extractor = PointerExtractor::new(7);
  assert_eq!(extractor.max_depth(), 7);
  assert_eq!(extractor.backend(format), Backend::with_max_depth(format, 7));
  assert_eq!(extractor.backend(format).format(), format);
}
