use super::EncodingBackend;
use crate::error::{Result, SerdeError};
use crate::generic_node::{BoundedNode, GenericNode};
use crate::wire_format::WireFormat;
use serde::de::{DeserializeOwned, DeserializeSeed};
use serde::Serialize;
use serde_json::error::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonBackend {
  max_depth: usize,
}

impl JsonBackend {
  pub fn new(max_depth: usize) -> Self {
    Self { max_depth }
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }
}

impl EncodingBackend for JsonBackend {
  fn format(&self) -> WireFormat {
    WireFormat::Json
  }

  fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
  where
    T: Serialize + ?Sized, {
    serde_json::to_vec(value).map_err(|e| SerdeError::unsupported_type::<T>(e.to_string()))
  }

  fn decode<T>(&self, bytes: &[u8]) -> Result<T>
  where
    T: DeserializeOwned, {
    serde_json::from_slice(bytes).map_err(|e| classify(e, bytes))
  }

  fn parse_tree(&self, bytes: &[u8]) -> Result<GenericNode> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    BoundedNode::new(self.max_depth)
      .deserialize(&mut deserializer)
      .and_then(|node| deserializer.end().map(|_| node))
      .map_err(|e| malformed(e, bytes))
  }

  fn render_tree(&self, node: &GenericNode) -> Result<Vec<u8>> {
    serde_json::to_vec(node).map_err(|e| SerdeError::unsupported_type::<GenericNode>(e.to_string()))
  }
}

fn classify(err: serde_json::Error, bytes: &[u8]) -> SerdeError {
  match err.classify() {
    Category::Data => SerdeError::type_mismatch("", err.to_string()),
    Category::Io | Category::Syntax | Category::Eof => malformed(err, bytes),
  }
}

fn malformed(err: serde_json::Error, bytes: &[u8]) -> SerdeError {
  SerdeError::malformed(WireFormat::Json, byte_offset(bytes, err.line(), err.column()), err.to_string())
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> Option<usize> {
  if line == 0 {
    return None;
  }
  let line_start = if line == 1 {
    0
  } else {
    bytes
      .iter()
      .enumerate()
      .filter(|(_, b)| **b == b'\n')
      .nth(line - 2)
      .map(|(i, _)| i + 1)?
  };
  Some((line_start + column.saturating_sub(1)).min(bytes.len()))
}
