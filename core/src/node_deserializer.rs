//! Typed decoding of a [`GenericNode`] with the caller's [`DecodingContext`]
//! handed to every nested value.
//!
//! Variant families read the context through [`VariantRegistry::deserialize`],
//! which asks for the [`VARIANT_MARKER`] newtype. This deserializer answers
//! that request with a map of the context attributes and the node itself;
//! any other deserializer answers with the plain node.
//!
//! [`VariantRegistry::deserialize`]: crate::variant_registry::VariantRegistry::deserialize

use crate::decoding_context::DecodingContext;
use crate::error::{Result, SerdeError};
use crate::generic_node::{GenericNode, NodeKind};
use crate::pointer::Pointer;
use serde::de::value::{BorrowedStrDeserializer, MapDeserializer};
use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::forward_to_deserialize_any;
use serde_json::Value;
use std::iter::Enumerate;
use std::slice;


/// Newtype name under which variant families request the decoding context.
pub(crate) const VARIANT_MARKER: &str = "$docwire::variant";
pub(crate) const CONTEXT_KEY: &str = "context";
pub(crate) const NODE_KEY: &str = "node";

#[derive(Debug, Clone, Copy)]
pub struct NodeDeserializer<'a> {
  node: &'a GenericNode,
  context: &'a DecodingContext,
}

impl<'a> NodeDeserializer<'a> {
  pub fn new(node: &'a GenericNode, context: &'a DecodingContext) -> Self {
    Self { node, context }
  }

  fn child(&self, node: &'a GenericNode) -> Self {
    Self::new(node, self.context)
  }

  fn mismatch(&self, expected: &str) -> SerdeError {
    SerdeError::type_mismatch("", format!("expected {}, found {}", expected, NodeKind::of(self.node)))
  }
}

impl<'a> Deserializer<'a> for NodeDeserializer<'a> {
  type Error = SerdeError;

  fn deserialize_any<V: Visitor<'a>>(self, visitor: V) -> Result<V::Value> {
    match self.node {
      Value::Null => visitor.visit_unit(),
      Value::Bool(v) => visitor.visit_bool(*v),
      Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
        (Some(v), _, _) => visitor.visit_u64(v),
        (_, Some(v), _) => visitor.visit_i64(v),
        (_, _, Some(v)) => visitor.visit_f64(v),
        _ => Err(SerdeError::type_mismatch("", format!("number {} is out of range", n))),
      },
      Value::String(v) => visitor.visit_borrowed_str(v),
      Value::Array(items) => {
        let mut seq = SeqNode {
          items: items.iter().enumerate(),
          context: self.context,
        };
        let value = visitor.visit_seq(&mut seq)?;
        match seq.items.len() {
          0 => Ok(value),
          _ => Err(de::Error::invalid_length(items.len(), &"fewer elements in array")),
        }
      }
      Value::Object(entries) => {
        let mut map = MapNode {
          entries: entries.iter(),
          pending: None,
          context: self.context,
        };
        let value = visitor.visit_map(&mut map)?;
        match map.entries.len() {
          0 => Ok(value),
          _ => Err(de::Error::invalid_length(entries.len(), &"fewer elements in map")),
        }
      }
    }
  }

  fn deserialize_option<V: Visitor<'a>>(self, visitor: V) -> Result<V::Value> {
    match self.node {
      Value::Null => visitor.visit_none(),
      _ => visitor.visit_some(self),
    }
  }

  fn deserialize_newtype_struct<V: Visitor<'a>>(self, name: &'static str, visitor: V) -> Result<V::Value> {
    if name == VARIANT_MARKER {
      visitor.visit_map(VariantEntries {
        node: self.node,
        context: self.context,
        next: 0,
      })
    } else {
      visitor.visit_newtype_struct(self)
    }
  }

  fn deserialize_enum<V: Visitor<'a>>(
    self,
    _name: &'static str,
    _variants: &'static [&'static str],
    visitor: V,
  ) -> Result<V::Value> {
    match self.node {
      Value::String(variant) => visitor.visit_enum(BorrowedStrDeserializer::new(variant)),
      Value::Object(entries) if entries.len() == 1 => match entries.iter().next() {
        Some((variant, content)) => visitor.visit_enum(EnumNode {
          variant,
          content: self.child(content),
        }),
        None => Err(self.mismatch("enum")),
      },
      _ => Err(self.mismatch("string or single-entry object for enum")),
    }
  }

  forward_to_deserialize_any! {
    <V: Visitor<'a>>
    bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
    bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
    identifier ignored_any
  }
}

struct SeqNode<'a> {
  items: Enumerate<slice::Iter<'a, GenericNode>>,
  context: &'a DecodingContext,
}

impl<'a> SeqAccess<'a> for SeqNode<'a> {
  type Error = SerdeError;

  fn next_element_seed<T: DeserializeSeed<'a>>(&mut self, seed: T) -> Result<Option<T::Value>> {
    match self.items.next() {
      Some((index, item)) => seed
        .deserialize(NodeDeserializer::new(item, self.context))
        .map(Some)
        .map_err(|err| err.within(&Pointer::root().index(index).to_string())),
      None => Ok(None),
    }
  }

  fn size_hint(&self) -> Option<usize> {
    Some(self.items.len())
  }
}

struct MapNode<'a> {
  entries: serde_json::map::Iter<'a>,
  pending: Option<(&'a String, &'a GenericNode)>,
  context: &'a DecodingContext,
}

impl<'a> MapAccess<'a> for MapNode<'a> {
  type Error = SerdeError;

  fn next_key_seed<K: DeserializeSeed<'a>>(&mut self, seed: K) -> Result<Option<K::Value>> {
    match self.entries.next() {
      Some((key, value)) => {
        self.pending = Some((key, value));
        seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
      }
      None => Ok(None),
    }
  }

  fn next_value_seed<V: DeserializeSeed<'a>>(&mut self, seed: V) -> Result<V::Value> {
    match self.pending.take() {
      Some((key, value)) => seed
        .deserialize(NodeDeserializer::new(value, self.context))
        .map_err(|err| err.within(&Pointer::root().key(key.as_str()).to_string())),
      None => Err(de::Error::custom("map value requested before its key")),
    }
  }

  fn size_hint(&self) -> Option<usize> {
    Some(self.entries.len())
  }
}

struct EnumNode<'a> {
  variant: &'a str,
  content: NodeDeserializer<'a>,
}

impl<'a> EnumAccess<'a> for EnumNode<'a> {
  type Error = SerdeError;
  type Variant = NodeDeserializer<'a>;

  fn variant_seed<V: DeserializeSeed<'a>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
    let variant = seed.deserialize(BorrowedStrDeserializer::<SerdeError>::new(self.variant))?;
    Ok((variant, self.content))
  }
}

impl<'a> VariantAccess<'a> for NodeDeserializer<'a> {
  type Error = SerdeError;

  fn unit_variant(self) -> Result<()> {
    match self.node {
      Value::Null => Ok(()),
      _ => Err(self.mismatch("null for unit variant")),
    }
  }

  fn newtype_variant_seed<T: DeserializeSeed<'a>>(self, seed: T) -> Result<T::Value> {
    seed.deserialize(self)
  }

  fn tuple_variant<V: Visitor<'a>>(self, _len: usize, visitor: V) -> Result<V::Value> {
    self.deserialize_any(visitor)
  }

  fn struct_variant<V: Visitor<'a>>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value> {
    self.deserialize_any(visitor)
  }
}

/// The two entries handed to a variant family: the context attributes, then
/// the node to decode.
struct VariantEntries<'a> {
  node: &'a GenericNode,
  context: &'a DecodingContext,
  next: usize,
}

impl<'a> MapAccess<'a> for VariantEntries<'a> {
  type Error = SerdeError;

  fn next_key_seed<K: DeserializeSeed<'a>>(&mut self, seed: K) -> Result<Option<K::Value>> {
    let key = match self.next {
      0 => CONTEXT_KEY,
      1 => NODE_KEY,
      _ => return Ok(None),
    };
    self.next += 1;
    seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
  }

  fn next_value_seed<V: DeserializeSeed<'a>>(&mut self, seed: V) -> Result<V::Value> {
    match self.next {
      1 => seed.deserialize(MapDeserializer::new(self.context.attributes())),
      _ => seed.deserialize(NodeDeserializer::new(self.node, self.context)),
    }
  }

  fn size_hint(&self) -> Option<usize> {
    Some(2 - self.next.min(2))
  }
}
