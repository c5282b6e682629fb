use crate::wire_format::WireFormat;
use serde::{de, Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Errors raised by the serialization engine.
///
/// None of these are retried inside the engine; whether a failed call is
/// repeated is decided by the request layer.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerdeError {
  /// The bytes are not valid in the format they were tagged with.
  #[error("malformed {format} input{}: {reason}", offset_suffix(.offset))]
  MalformedInput {
    format: WireFormat,
    offset: Option<usize>,
    reason: String,
  },
  /// Well-formed input does not fit the requested target shape.
  #[error("type mismatch at '{path}': {reason}")]
  TypeMismatch { path: String, reason: String },
  /// No coder is registered and the type has no structural mapping in the active format.
  #[error("unsupported type {type_name}: {reason}")]
  UnsupportedType { type_name: String, reason: String },
  /// A discriminator value is not present in the variant registry.
  #[error("unknown variant for discriminator '{discriminator}': {value}")]
  UnknownVariant { discriminator: String, value: String },
  #[error("invalid pointer '{pointer}': {reason}")]
  InvalidPointer { pointer: String, reason: String },
  #[error("unsupported content type: {0}")]
  UnsupportedContentType(String),
  /// A document tagged with one format was handed to a codec configured for another.
  #[error("document is {actual}, codec is configured for {expected}")]
  FormatMismatch { expected: WireFormat, actual: WireFormat },
}

fn offset_suffix(offset: &Option<usize>) -> String {
  match offset {
    Some(offset) => format!(" at byte {}", offset),
    None => String::new(),
  }
}

impl SerdeError {
  pub fn malformed(format: WireFormat, offset: Option<usize>, reason: impl Into<String>) -> Self {
    SerdeError::MalformedInput {
      format,
      offset,
      reason: reason.into(),
    }
  }

  pub fn type_mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
    SerdeError::TypeMismatch {
      path: path.into(),
      reason: reason.into(),
    }
  }

  pub fn unsupported_type<T: ?Sized>(reason: impl Into<String>) -> Self {
    SerdeError::UnsupportedType {
      type_name: std::any::type_name::<T>().to_string(),
      reason: reason.into(),
    }
  }

  pub fn unknown_variant(discriminator: impl Into<String>, value: impl Into<String>) -> Self {
    SerdeError::UnknownVariant {
      discriminator: discriminator.into(),
      value: value.into(),
    }
  }

  pub fn invalid_pointer(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
    SerdeError::InvalidPointer {
      pointer: pointer.into(),
      reason: reason.into(),
    }
  }

  pub fn is_malformed(&self) -> bool {
    matches!(self, SerdeError::MalformedInput { .. })
  }

  pub fn is_type_mismatch(&self) -> bool {
    matches!(self, SerdeError::TypeMismatch { .. })
  }

  pub fn is_unknown_variant(&self) -> bool {
    matches!(self, SerdeError::UnknownVariant { .. })
  }

  /// Prefixes the path of a `TypeMismatch` with `parent`; other errors pass through.
  pub fn within(self, parent: &str) -> Self {
    match self {
      SerdeError::TypeMismatch { path, reason } => SerdeError::TypeMismatch {
        path: format!("{}{}", parent, path),
        reason,
      },
      other => other,
    }
  }
}

pub type Result<T> = std::result::Result<T, SerdeError>;

// Marks a custom message that holds a whole `SerdeError` as JSON.
const CARRIED_ERROR_PREFIX: &str = "\u{0}docwire-error:";

impl SerdeError {
  /// Wraps `self` in a deserializer error. A [`NodeDeserializer`] turns it
  /// back into the same `SerdeError`; other deserializers just see its message.
  ///
  /// [`NodeDeserializer`]: crate::node_deserializer::NodeDeserializer
  pub(crate) fn carry<E: de::Error>(self) -> E {
    match serde_json::to_string(&self) {
      Ok(json) => E::custom(format_args!("{}{}", CARRIED_ERROR_PREFIX, json)),
      Err(_) => E::custom(self),
    }
  }
}

impl de::Error for SerdeError {
  fn custom<T: Display>(msg: T) -> Self {
    let text = msg.to_string();
    text
      .strip_prefix(CARRIED_ERROR_PREFIX)
      .and_then(|json| serde_json::from_str(json).ok())
      .unwrap_or_else(|| SerdeError::type_mismatch("", text))
  }
}

/// Errors raised while assembling coder registries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
  #[error("a coder for {0} is already registered")]
  DuplicateCoder(&'static str),
}

static_assertions::assert_impl_all!(SerdeError: Send, Sync);
static_assertions::assert_impl_all!(RegistryError: Send, Sync);
