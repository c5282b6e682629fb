use crate::decoding_context::DecodingContext;
use crate::error::{RegistryError, Result};
use crate::generic_node::GenericNode;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;


/// Custom mapping between `T` and the document tree, replacing the type's
/// own serde mapping on the surface it is registered with.
pub trait Coder<T>: Send + Sync {
  fn encode(&self, value: &T) -> Result<GenericNode>;

  fn decode(&self, node: &GenericNode, context: &DecodingContext) -> Result<T>;
}

struct CoderEntry {
  type_name: &'static str,
  // Holds an `Arc<dyn Coder<T>>` for the `T` the entry is keyed by.
  coder: Arc<dyn Any + Send + Sync>,
}

/// Immutable type-to-coder mapping.
///
/// The codec keeps two disjoint instances, one per surface, so a coder
/// registered for user documents never shadows a protocol coder.
#[derive(Clone, Default)]
pub struct CoderRegistry {
  entries: Arc<HashMap<TypeId, CoderEntry>>,
}

impl CoderRegistry {
  pub fn builder() -> CoderRegistryBuilder {
    CoderRegistryBuilder::default()
  }

  pub fn find<T: 'static>(&self) -> Option<Arc<dyn Coder<T>>> {
    self
      .entries
      .get(&TypeId::of::<T>())
      .and_then(|entry| entry.coder.clone().downcast::<Arc<dyn Coder<T>>>().ok())
      .map(|arc| arc.as_ref().clone())
  }

  pub fn contains<T: 'static>(&self) -> bool {
    self.entries.contains_key(&TypeId::of::<T>())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn type_names(&self) -> Vec<&'static str> {
    let mut names = self.entries.values().map(|entry| entry.type_name).collect::<Vec<_>>();
    names.sort_unstable();
    names
  }
}

impl Debug for CoderRegistry {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CoderRegistry").field("types", &self.type_names()).finish()
  }
}

#[derive(Default)]
pub struct CoderRegistryBuilder {
  entries: HashMap<TypeId, CoderEntry>,
}

impl CoderRegistryBuilder {
  pub fn register<T, C>(self, coder: C) -> std::result::Result<Self, RegistryError>
  where
    T: 'static,
    C: Coder<T> + 'static, {
    self.register_shared(Arc::new(coder) as Arc<dyn Coder<T>>)
  }

  pub fn register_shared<T: 'static>(mut self, coder: Arc<dyn Coder<T>>) -> std::result::Result<Self, RegistryError> {
    let type_name = std::any::type_name::<T>();
    let key = TypeId::of::<T>();
    if self.entries.contains_key(&key) {
      return Err(RegistryError::DuplicateCoder(type_name));
    }
    tracing::debug!("registering coder: type_name = {}", type_name);
    self.entries.insert(
      key,
      CoderEntry {
        type_name,
        coder: Arc::new(coder) as Arc<dyn Any + Send + Sync>,
      },
    );
    Ok(self)
  }

  /// Registers `coder` unless a coder for `T` is already present.
  pub fn register_if_absent<T, C>(mut self, coder: C) -> Self
  where
    T: 'static,
    C: Coder<T> + 'static, {
    self.entries.entry(TypeId::of::<T>()).or_insert_with(|| {
      let coder = Arc::new(coder) as Arc<dyn Coder<T>>;
      CoderEntry {
        type_name: std::any::type_name::<T>(),
        coder: Arc::new(coder) as Arc<dyn Any + Send + Sync>,
      }
    });
    self
  }

  pub fn build(self) -> CoderRegistry {
    CoderRegistry {
      entries: Arc::new(self.entries),
    }
  }
}

static_assertions::assert_impl_all!(CoderRegistry: Send, Sync);
