use super::*;

#[test]
fn test_malformed_message_includes_offset() {
  let err = SerdeError::malformed(WireFormat::MessagePack, Some(7), "unexpected end of input");
  assert_eq!(
    err.to_string(),
    "malformed MessagePack input at byte 7: unexpected end of input"
  );
  assert!(err.is_malformed());
}

#[test]
fn test_malformed_message_without_offset() {
  let err = SerdeError::malformed(WireFormat::Json, None, "trailing characters");
  assert_eq!(err.to_string(), "malformed JSON input: trailing characters");
}

#[test]
fn test_unknown_variant_names_value() {
  let err = SerdeError::unknown_variant("type", "bogus");
  assert!(err.is_unknown_variant());
  assert_eq!(err.to_string(), "unknown variant for discriminator 'type': bogus");
}

#[test]
fn test_within_prefixes_type_mismatch_path() {
  let err = SerdeError::type_mismatch("/case", "expected string, found number").within("/properties");
  assert_eq!(
    err,
    SerdeError::TypeMismatch {
      path: "/properties/case".to_string(),
      reason: "expected string, found number".to_string(),
    }
  );
}

#[test]
fn test_within_leaves_other_errors_untouched() {
  let err = SerdeError::unknown_variant("type", "bogus").within("/pipeline/0");
  assert_eq!(err, SerdeError::unknown_variant("type", "bogus"));
}

#[test]
fn test_unsupported_type_names_rust_type() {
  let err = SerdeError::unsupported_type::<Vec<u8>>("key must be a string");
  match err {
    SerdeError::UnsupportedType { type_name, .. } => assert_eq!(type_name, "alloc::vec::Vec<u8>"),
    other => panic!("unexpected error: {other:?}"),
  }
}

#[test]
fn test_carried_error_survives_deserializer_boundary() {
  let original = SerdeError::unknown_variant("type", "bogus");
  let carried: SerdeError = original.clone().carry();
  assert_eq!(carried, original);
}

#[test]
fn test_custom_message_becomes_type_mismatch() {
  let err = <SerdeError as de::Error>::custom("invalid length 3, expected 2");
  assert_eq!(err, SerdeError::type_mismatch("", "invalid length 3, expected 2"));
}
