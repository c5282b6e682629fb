use crate::error::Result;
use crate::generic_node::{GenericNode, DEFAULT_MAX_NESTING_DEPTH};
use crate::wire_format::WireFormat;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod json_backend;
mod message_pack_backend;

#[cfg(test)]
mod tests;

pub use self::json_backend::JsonBackend;
pub use self::message_pack_backend::MessagePackBackend;

/// One concrete wire format.
///
/// `render_tree` output is always valid input for `parse_tree` of the same
/// backend, and `decode(encode(v))` is semantically equal to `v`.
pub trait EncodingBackend: Send + Sync {
  fn format(&self) -> WireFormat;

  /// Fails with `UnsupportedType` when the value has no mapping in this format.
  fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
  where
    T: Serialize + ?Sized;

  /// Fails with `MalformedInput` for invalid bytes and `TypeMismatch` when
  /// well-formed input does not fit `T`.
  fn decode<T>(&self, bytes: &[u8]) -> Result<T>
  where
    T: DeserializeOwned;

  fn parse_tree(&self, bytes: &[u8]) -> Result<GenericNode>;

  fn render_tree(&self, node: &GenericNode) -> Result<Vec<u8>>;
}

/// Backend selected for a [`WireFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
  Json(JsonBackend),
  MessagePack(MessagePackBackend),
}

impl Backend {
  pub fn of(format: WireFormat) -> Backend {
    Self::with_max_depth(format, DEFAULT_MAX_NESTING_DEPTH)
  }

  pub fn with_max_depth(format: WireFormat, max_depth: usize) -> Backend {
    match format {
      WireFormat::Json => Backend::Json(JsonBackend::new(max_depth)),
      WireFormat::MessagePack => Backend::MessagePack(MessagePackBackend::new(max_depth)),
    }
  }

  pub fn for_content_type(content_type: &str) -> Result<Backend> {
    let format = WireFormat::from_content_type(content_type)?;
    tracing::trace!("selecting backend: content_type = {}, format = {}", content_type, format);
    Ok(Backend::of(format))
  }

  pub fn max_depth(&self) -> usize {
    match self {
      Backend::Json(backend) => backend.max_depth(),
      Backend::MessagePack(backend) => backend.max_depth(),
    }
  }
}

impl EncodingBackend for Backend {
  fn format(&self) -> WireFormat {
    match self {
      Backend::Json(backend) => backend.format(),
      Backend::MessagePack(backend) => backend.format(),
    }
  }

  fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
  where
    T: Serialize + ?Sized, {
    match self {
      Backend::Json(backend) => backend.encode(value),
      Backend::MessagePack(backend) => backend.encode(value),
    }
  }

  fn decode<T>(&self, bytes: &[u8]) -> Result<T>
  where
    T: DeserializeOwned, {
    match self {
      Backend::Json(backend) => backend.decode(bytes),
      Backend::MessagePack(backend) => backend.decode(bytes),
    }
  }

  fn parse_tree(&self, bytes: &[u8]) -> Result<GenericNode> {
    match self {
      Backend::Json(backend) => backend.parse_tree(bytes),
      Backend::MessagePack(backend) => backend.parse_tree(bytes),
    }
  }

  fn render_tree(&self, node: &GenericNode) -> Result<Vec<u8>> {
    match self {
      Backend::Json(backend) => backend.render_tree(node),
      Backend::MessagePack(backend) => backend.render_tree(node),
    }
  }
}

static_assertions::assert_impl_all!(Backend: Send, Sync, Copy);
