//! Transient document tree shared by the pointer extractor, the diagnostics
//! converter and tree-based coders.

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;
use strum::Display;


/// Format-independent view of a parsed document. Object key order is preserved.
pub type GenericNode = Value;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

pub(crate) static NULL_NODE: GenericNode = Value::Null;

/// Start of the error raised for NaN and infinities, which have no tree form.
pub(crate) const NON_FINITE_FLOAT: &str = "non-finite float has no document tree form";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
  Null,
  Bool,
  Number,
  String,
  Array,
  Object,
}

impl NodeKind {
  pub fn of(node: &GenericNode) -> NodeKind {
    match node {
      Value::Null => NodeKind::Null,
      Value::Bool(_) => NodeKind::Bool,
      Value::Number(_) => NodeKind::Number,
      Value::String(_) => NodeKind::String,
      Value::Array(_) => NodeKind::Array,
      Value::Object(_) => NodeKind::Object,
    }
  }
}

/// Builds a [`GenericNode`] from any self-describing deserializer, refusing
/// to nest containers deeper than `remaining` levels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoundedNode {
  remaining: usize,
}

impl BoundedNode {
  pub(crate) fn new(max_depth: usize) -> Self {
    Self { remaining: max_depth }
  }

  fn descend<E: de::Error>(self) -> Result<BoundedNode, E> {
    match self.remaining.checked_sub(1) {
      Some(remaining) => Ok(BoundedNode { remaining }),
      None => Err(E::custom("nesting depth limit exceeded")),
    }
  }
}

impl<'de> DeserializeSeed<'de> for BoundedNode {
  type Value = GenericNode;

  fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
  where
    D: Deserializer<'de>, {
    deserializer.deserialize_any(self)
  }
}

impl<'de> Visitor<'de> for BoundedNode {
  type Value = GenericNode;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a document node")
  }

  fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
    Ok(Value::Bool(v))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
    Ok(Value::Number(v.into()))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
    Ok(Value::Number(v.into()))
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
    Number::from_f64(v)
      .map(Value::Number)
      .ok_or_else(|| E::custom(format_args!("{}: {}", NON_FINITE_FLOAT, v)))
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
    Ok(Value::String(v.to_owned()))
  }

  fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
    Ok(Value::String(v))
  }

  // Binary blobs have no tree counterpart; they surface as arrays of octets
  // and re-render as arrays, not as bin.
  fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
    Ok(Value::Array(v.iter().map(|b| Value::from(*b)).collect()))
  }

  fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(Value::Null)
  }

  fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(Value::Null)
  }

  fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
  where
    D: Deserializer<'de>, {
    self.deserialize(deserializer)
  }

  fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
  where
    A: SeqAccess<'de>, {
    let child = self.descend::<A::Error>()?;
    let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
    while let Some(item) = seq.next_element_seed(child)? {
      items.push(item);
    }
    Ok(Value::Array(items))
  }

  fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
  where
    A: MapAccess<'de>, {
    let child = self.descend::<A::Error>()?;
    let mut object = Map::new();
    while let Some(key) = map.next_key::<String>()? {
      let value = map.next_value_seed(child)?;
      object.insert(key, value);
    }
    Ok(Value::Object(object))
  }
}
