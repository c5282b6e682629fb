//! User payload representations that bypass type coercion.

use crate::generic_node::GenericNode;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;


/// A document already encoded in the codec's active wire format.
///
/// On the user surface the bytes travel untouched, only checked for
/// well-formedness. Nested inside another value it is an opaque byte string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RawBytes(pub Vec<u8>);

impl RawBytes {
  pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
    Self(bytes.into())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  pub fn into_inner(self) -> Vec<u8> {
    self.0
  }
}

impl From<Vec<u8>> for RawBytes {
  fn from(value: Vec<u8>) -> Self {
    Self(value)
  }
}

impl Serialize for RawBytes {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(&self.0)
  }
}

impl<'de> Deserialize<'de> for RawBytes {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct RawBytesVisitor;

    impl<'de> Visitor<'de> for RawBytesVisitor {
      type Value = RawBytes;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte string")
      }

      fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<RawBytes, E> {
        Ok(RawBytes(v.to_vec()))
      }

      fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<RawBytes, E> {
        Ok(RawBytes(v))
      }

      fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<RawBytes, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(b) = seq.next_element::<u8>()? {
          bytes.push(b);
        }
        Ok(RawBytes(bytes))
      }
    }

    deserializer.deserialize_byte_buf(RawBytesVisitor)
  }
}

/// A document as JSON text.
///
/// On the user surface it is transcoded to and from the active wire format.
/// Nested inside another value it is written as the structure it spells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RawJson(pub String);

impl RawJson {
  pub fn new(text: impl Into<String>) -> Self {
    Self(text.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl From<String> for RawJson {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl From<&str> for RawJson {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl Serialize for RawJson {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let node: GenericNode = serde_json::from_str(&self.0).map_err(S::Error::custom)?;
    node.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for RawJson {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let node = GenericNode::deserialize(deserializer)?;
    Ok(RawJson(node.to_string()))
  }
}
