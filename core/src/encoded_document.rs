use crate::backend::{Backend, EncodingBackend};
use crate::error::Result;
use crate::generic_node::GenericNode;
use crate::wire_format::WireFormat;


/// Bytes tagged with the wire format they are encoded in.
///
/// The bytes are never reinterpreted under another format; every operation
/// picks its backend from [`EncodedDocument::format`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedDocument {
  format: WireFormat,
  bytes: Vec<u8>,
}

impl EncodedDocument {
  pub fn new(format: WireFormat, bytes: impl Into<Vec<u8>>) -> Self {
    Self {
      format,
      bytes: bytes.into(),
    }
  }

  /// Tags response bytes using the `Content-Type` header they arrived with.
  pub fn from_content_type(content_type: &str, bytes: impl Into<Vec<u8>>) -> Result<Self> {
    Ok(Self::new(WireFormat::from_content_type(content_type)?, bytes))
  }

  /// A document holding nothing but the null node.
  pub fn null(format: WireFormat) -> Result<Self> {
    Self::from_tree(format, &GenericNode::Null)
  }

  pub(crate) fn from_tree(format: WireFormat, node: &GenericNode) -> Result<Self> {
    let bytes = Backend::of(format).render_tree(node)?;
    Ok(Self::new(format, bytes))
  }

  pub fn format(&self) -> WireFormat {
    self.format
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// `true` when the document is exactly the null node.
  pub fn is_null(&self) -> bool {
    match self.format {
      WireFormat::Json => self.bytes.trim_ascii() == b"null",
      WireFormat::MessagePack => self.bytes == [0xc0],
    }
  }
}

impl AsRef<[u8]> for EncodedDocument {
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}
