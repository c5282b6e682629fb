use super::EncodingBackend;
use crate::error::{Result, SerdeError};
use crate::generic_node::{BoundedNode, GenericNode, NON_FINITE_FLOAT};
use crate::wire_format::WireFormat;
use rmp::Marker;
use rmp_serde::decode::Error as DecodeError;
use serde::de::{DeserializeOwned, DeserializeSeed};
use serde::Serialize;

/// MessagePack backend. Structs are written as maps keyed by field name so
/// documents stay self-describing and tree-navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePackBackend {
  max_depth: usize,
}

impl MessagePackBackend {
  pub fn new(max_depth: usize) -> Self {
    Self { max_depth }
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }
}

impl EncodingBackend for MessagePackBackend {
  fn format(&self) -> WireFormat {
    WireFormat::MessagePack
  }

  fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
  where
    T: Serialize + ?Sized, {
    rmp_serde::to_vec_named(value).map_err(|e| SerdeError::unsupported_type::<T>(e.to_string()))
  }

  fn decode<T>(&self, bytes: &[u8]) -> Result<T>
  where
    T: DeserializeOwned, {
    let mut reader = bytes;
    let value = rmp_serde::from_read::<_, T>(&mut reader).map_err(|e| classify(e, bytes.len() - reader.len()))?;
    ensure_consumed(bytes, reader)?;
    Ok(value)
  }

  fn parse_tree(&self, bytes: &[u8]) -> Result<GenericNode> {
    let mut reader = bytes;
    let node = {
      let mut deserializer = rmp_serde::Deserializer::new(&mut reader);
      BoundedNode::new(self.max_depth).deserialize(&mut deserializer)
    };
    let node = node.map_err(|e| match e {
      DecodeError::Syntax(reason) if reason.starts_with(NON_FINITE_FLOAT) => {
        SerdeError::unsupported_type::<GenericNode>(reason)
      }
      other => SerdeError::malformed(WireFormat::MessagePack, Some(bytes.len() - reader.len()), other.to_string()),
    })?;
    ensure_consumed(bytes, reader)?;
    Ok(node)
  }

  fn render_tree(&self, node: &GenericNode) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(node).map_err(|e| SerdeError::unsupported_type::<GenericNode>(e.to_string()))
  }
}

fn ensure_consumed(bytes: &[u8], rest: &[u8]) -> Result<()> {
  if rest.is_empty() {
    Ok(())
  } else {
    Err(SerdeError::malformed(
      WireFormat::MessagePack,
      Some(bytes.len() - rest.len()),
      format!("{} trailing bytes after document", rest.len()),
    ))
  }
}

// rmp-serde reports serde-level errors (missing field, invalid type) as `Syntax`.
// The reserved marker 0xc1 and bad ext/array lengths are byte-level faults.
fn classify(err: DecodeError, offset: usize) -> SerdeError {
  match err {
    DecodeError::InvalidMarkerRead(_)
    | DecodeError::InvalidDataRead(_)
    | DecodeError::TypeMismatch(Marker::Reserved)
    | DecodeError::LengthMismatch(_)
    | DecodeError::Utf8Error(_)
    | DecodeError::DepthLimitExceeded => {
      SerdeError::malformed(WireFormat::MessagePack, Some(offset), err.to_string())
    }
    other => SerdeError::type_mismatch("", other.to_string()),
  }
}
