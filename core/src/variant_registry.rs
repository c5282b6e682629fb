//! Decoding of polymorphic families keyed on a discriminator field.
//!
//! The caller's [`DecodingContext`] travels as an explicit argument through
//! every nested variant decode; nothing is looked up from ambient state.

use crate::coder::Coder;
use crate::decoding_context::DecodingContext;
use crate::error::{Result, SerdeError};
use crate::generic_node::{GenericNode, NodeKind, NULL_NODE};
use crate::node_deserializer::{NodeDeserializer, CONTEXT_KEY, NODE_KEY, VARIANT_MARKER};
use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;


pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// Routine decoding one concrete variant of the family `F`.
pub type VariantDecoder<F> = dyn Fn(&GenericNode, &VariantCall<'_, F>) -> Result<F> + Send + Sync;

/// Discriminator value to decoding routine mapping for the family `F`.
pub struct VariantRegistry<F> {
  discriminator: String,
  variants: Arc<HashMap<String, Arc<VariantDecoder<F>>>>,
}

impl<F> Clone for VariantRegistry<F> {
  fn clone(&self) -> Self {
    Self {
      discriminator: self.discriminator.clone(),
      variants: self.variants.clone(),
    }
  }
}

impl<F> Debug for VariantRegistry<F> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VariantRegistry")
      .field("discriminator", &self.discriminator)
      .field("variants", &self.variant_names())
      .finish()
  }
}

impl<F> VariantRegistry<F> {
  pub fn builder() -> VariantRegistryBuilder<F> {
    VariantRegistryBuilder::new(DEFAULT_DISCRIMINATOR)
  }

  pub fn builder_with_discriminator(discriminator: impl Into<String>) -> VariantRegistryBuilder<F> {
    VariantRegistryBuilder::new(discriminator)
  }

  /// Starts a builder holding every variant of this registry.
  pub fn to_builder(&self) -> VariantRegistryBuilder<F> {
    VariantRegistryBuilder {
      discriminator: self.discriminator.clone(),
      variants: self.variants.as_ref().clone(),
    }
  }

  pub fn discriminator(&self) -> &str {
    &self.discriminator
  }

  pub fn contains(&self, value: &str) -> bool {
    self.variants.contains_key(value)
  }

  pub fn variant_names(&self) -> Vec<&str> {
    let mut names = self.variants.keys().map(String::as_str).collect::<Vec<_>>();
    names.sort_unstable();
    names
  }

  pub fn decode(&self, node: &GenericNode, context: &DecodingContext) -> Result<F> {
    self.decode_at(node, context, String::new())
  }

  /// Decodes a member of the family from any deserializer, for use in the
  /// family's `Deserialize` impl.
  ///
  /// Under a [`NodeDeserializer`] the member sees the caller's context and a
  /// failure comes back as the original `SerdeError`, so `Vec<F>`, `Option<F>`
  /// or a struct field of type `F` decode the same way `F` does on its own.
  /// Any other deserializer decodes with an empty context.
  pub fn deserialize<'de, D>(&self, deserializer: D) -> std::result::Result<F, D::Error>
  where
    D: Deserializer<'de>, {
    deserializer.deserialize_newtype_struct(VARIANT_MARKER, MemberVisitor { registry: self })
  }

  fn decode_at(&self, node: &GenericNode, context: &DecodingContext, path: String) -> Result<F> {
    let tag_path = format!("{}/{}", path, self.discriminator);
    let object = node.as_object().ok_or_else(|| {
      SerdeError::type_mismatch(path.clone(), format!("expected object, found {}", NodeKind::of(node)))
    })?;
    let tag = match object.get(&self.discriminator) {
      Some(GenericNode::String(tag)) => tag,
      Some(other) => {
        return Err(SerdeError::type_mismatch(
          tag_path,
          format!("expected string, found {}", NodeKind::of(other)),
        ))
      }
      None => return Err(SerdeError::type_mismatch(tag_path, "missing discriminator")),
    };
    let decoder = self
      .variants
      .get(tag)
      .ok_or_else(|| SerdeError::unknown_variant(self.discriminator.clone(), tag.clone()))?;
    let call = VariantCall {
      registry: self,
      context,
      path,
    };
    decoder(node, &call)
  }
}

impl<F> Coder<F> for VariantRegistry<F>
where
  F: Serialize + Send + Sync + 'static,
{
  fn encode(&self, value: &F) -> Result<GenericNode> {
    serde_json::to_value(value).map_err(|e| SerdeError::unsupported_type::<F>(e.to_string()))
  }

  fn decode(&self, node: &GenericNode, context: &DecodingContext) -> Result<F> {
    self.decode_at(node, context, String::new())
  }
}

pub struct VariantRegistryBuilder<F> {
  discriminator: String,
  variants: HashMap<String, Arc<VariantDecoder<F>>>,
}

impl<F> VariantRegistryBuilder<F> {
  fn new(discriminator: impl Into<String>) -> Self {
    Self {
      discriminator: discriminator.into(),
      variants: HashMap::new(),
    }
  }

  /// Adds a variant; a later registration for the same value replaces the earlier one.
  pub fn variant<D>(mut self, value: impl Into<String>, decoder: D) -> Self
  where
    D: Fn(&GenericNode, &VariantCall<'_, F>) -> Result<F> + Send + Sync + 'static, {
    self.variants.insert(value.into(), Arc::new(decoder));
    self
  }

  pub fn build(self) -> VariantRegistry<F> {
    VariantRegistry {
      discriminator: self.discriminator,
      variants: Arc::new(self.variants),
    }
  }
}

/// State of one variant decode: the registry, the caller's context and the
/// path of the node being decoded.
pub struct VariantCall<'a, F> {
  registry: &'a VariantRegistry<F>,
  context: &'a DecodingContext,
  path: String,
}

impl<'a, F> VariantCall<'a, F> {
  pub fn context(&self) -> &'a DecodingContext {
    self.context
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  /// Decodes a nested member of the same family, `relative` being its
  /// pointer relative to the current node (e.g. `/pipeline/0`).
  pub fn decode_nested(&self, node: &GenericNode, relative: &str) -> Result<F> {
    self
      .registry
      .decode_at(node, self.context, format!("{}{}", self.path, relative))
  }

  /// Decodes the child `name` with its serde mapping and this call's context.
  /// A missing child is read as null.
  pub fn field<T: DeserializeOwned>(&self, node: &GenericNode, name: &str) -> Result<T> {
    let child = node.get(name).unwrap_or(&NULL_NODE);
    T::deserialize(NodeDeserializer::new(child, self.context)).map_err(|err| match err {
      SerdeError::TypeMismatch { path, reason } => SerdeError::type_mismatch(
        format!("{}/{}{}", self.path, name, path),
        format!(
          "expected {}, found {}: {}",
          std::any::type_name::<T>(),
          NodeKind::of(child),
          reason
        ),
      ),
      other => other,
    })
  }

  pub fn optional_field<T: DeserializeOwned>(&self, node: &GenericNode, name: &str) -> Result<Option<T>> {
    match node.get(name) {
      None | Some(GenericNode::Null) => Ok(None),
      Some(_) => self.field(node, name).map(Some),
    }
  }
}

struct MemberVisitor<'r, F> {
  registry: &'r VariantRegistry<F>,
}

impl<'de, F> Visitor<'de> for MemberVisitor<'_, F> {
  type Value = F;

  fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "an object discriminated by '{}'", self.registry.discriminator)
  }

  fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<F, D::Error>
  where
    D: Deserializer<'de>, {
    let node = GenericNode::deserialize(deserializer)?;
    self
      .registry
      .decode(&node, &DecodingContext::empty())
      .map_err(<D::Error as de::Error>::custom)
  }

  fn visit_map<A>(self, mut entries: A) -> std::result::Result<F, A::Error>
  where
    A: MapAccess<'de>, {
    let mut context = None;
    let mut node = None;
    while let Some(key) = entries.next_key::<String>()? {
      match key.as_str() {
        CONTEXT_KEY => context = Some(entries.next_value::<BTreeMap<String, String>>()?),
        NODE_KEY => node = Some(entries.next_value::<GenericNode>()?),
        _ => {
          entries.next_value::<IgnoredAny>()?;
        }
      }
    }
    let node = node.ok_or_else(|| <A::Error as de::Error>::missing_field(NODE_KEY))?;
    let context = DecodingContext::from_attributes(context.unwrap_or_default());
    self.registry.decode(&node, &context).map_err(SerdeError::carry)
  }
}
