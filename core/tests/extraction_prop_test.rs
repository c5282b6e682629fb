use docwire_core_rs::{DecodingContext, GenericNode, Pointer, PointerStep, SerdeConfig, WireFormat, WireSerde};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_node() -> impl Strategy<Value = GenericNode> {
  let leaf = prop_oneof![
    Just(Value::Null),
    any::<bool>().prop_map(Value::Bool),
    any::<i64>().prop_map(Value::from),
    "[a-z0-9 ]{0,12}".prop_map(Value::String),
  ];
  leaf.prop_recursive(4, 48, 6, |inner| {
    prop_oneof![
      prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
      prop::collection::vec(("[a-z~/]{1,6}", inner), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
    ]
  })
}

/// Every pointer that resolves inside `node`, root included.
fn pointers_of(node: &GenericNode) -> Vec<Pointer> {
  fn walk(node: &GenericNode, at: Pointer, out: &mut Vec<Pointer>) {
    match node {
      Value::Array(items) => {
        for (i, item) in items.iter().enumerate() {
          walk(item, at.clone().index(i), out);
        }
      }
      Value::Object(map) => {
        for (key, value) in map {
          walk(value, at.clone().key(key.clone()), out);
        }
      }
      _ => {}
    }
    out.push(at);
  }
  let mut out = Vec::new();
  walk(node, Pointer::root(), &mut out);
  out
}

fn navigate<'a>(node: &'a GenericNode, pointer: &Pointer) -> &'a GenericNode {
  pointer.steps().iter().fold(node, |current, step| match step {
    PointerStep::Key(key) => &current[key.as_str()],
    PointerStep::Index(index) => match current {
      Value::Array(_) => &current[*index],
      _ => &current[index.to_string().as_str()],
    },
  })
}

proptest! {
  #![proptest_config(ProptestConfig { cases: 64, failure_persistence: None, .. ProptestConfig::default() })]

  #[test]
  fn prop_extraction_matches_navigation(node in arb_node()) {
    for format in [WireFormat::Json, WireFormat::MessagePack] {
      let serde = WireSerde::new(SerdeConfig::of(format));
      let doc = serde.encode_user_document(&node).unwrap();
      for pointer in pointers_of(&node) {
        let extracted = serde.extract(&doc, &pointer).unwrap();
        let decoded = serde.decode_protocol::<GenericNode>(&extracted).unwrap();
        prop_assert_eq!(&decoded, navigate(&node, &pointer));
      }
    }
  }

  #[test]
  fn prop_formats_decode_to_the_same_value(node in arb_node()) {
    let json = WireSerde::new(SerdeConfig::of(WireFormat::Json));
    let pack = WireSerde::new(SerdeConfig::of(WireFormat::MessagePack));
    let context = DecodingContext::empty();
    let from_json = json.decode_user::<GenericNode>(&json.encode_user(&node).unwrap(), &context).unwrap();
    let from_pack = pack.decode_user::<GenericNode>(&pack.encode_user(&node).unwrap(), &context).unwrap();
    prop_assert_eq!(&from_json, &node);
    prop_assert_eq!(from_json, from_pack);
  }

  #[test]
  fn prop_pointer_text_round_trips(keys in prop::collection::vec("[a-z~/0-9]{0,5}", 0..5)) {
    let pointer = keys.iter().fold(Pointer::root(), |pointer, key| pointer.key(key.clone()));
    let reparsed = Pointer::parse(&pointer.to_string()).unwrap();
    prop_assert_eq!(reparsed.to_string(), pointer.to_string());
  }
}
