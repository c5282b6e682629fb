//! Slices sub-documents out of encoded responses without decoding them into
//! application types.

use crate::backend::{Backend, EncodingBackend};
use crate::encoded_document::EncodedDocument;
use crate::error::Result;
use crate::generic_node::{DEFAULT_MAX_NESTING_DEPTH, NULL_NODE};
use crate::pointer::Pointer;
use crate::wire_format::WireFormat;

#[cfg(test)]
mod tests;

/// Holds one backend per format, built with the same nesting limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerExtractor {
  json: Backend,
  message_pack: Backend,
}

impl Default for PointerExtractor {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_NESTING_DEPTH)
  }
}

impl PointerExtractor {
  pub fn new(max_depth: usize) -> Self {
    Self {
      json: Backend::with_max_depth(WireFormat::Json, max_depth),
      message_pack: Backend::with_max_depth(WireFormat::MessagePack, max_depth),
    }
  }

  pub fn max_depth(&self) -> usize {
    self.json.max_depth()
  }

  pub fn backend(&self, format: WireFormat) -> Backend {
    match format {
      WireFormat::Json => self.json,
      WireFormat::MessagePack => self.message_pack,
    }
  }

  /// Returns the node addressed by `pointer`, re-encoded in the document's
  /// own format. An absent target yields the null node.
  pub fn extract(&self, doc: &EncodedDocument, pointer: &Pointer) -> Result<EncodedDocument> {
    if pointer.is_root() {
      self.backend(doc.format()).parse_tree(doc.as_bytes())?;
      return Ok(doc.clone());
    }
    let mut extracted = self.extract_many(doc, std::slice::from_ref(pointer))?;
    Ok(extracted.remove(0))
  }

  /// Extracts several pointers from one parse of `doc`, in the given order.
  pub fn extract_many(&self, doc: &EncodedDocument, pointers: &[Pointer]) -> Result<Vec<EncodedDocument>> {
    let backend = self.backend(doc.format());
    let tree = backend.parse_tree(doc.as_bytes())?;
    pointers
      .iter()
      .map(|pointer| {
        let target = pointer.resolve(&tree).unwrap_or_else(|| {
          tracing::trace!("pointer {} is absent, extracting null", pointer);
          &NULL_NODE
        });
        backend
          .render_tree(target)
          .map(|bytes| EncodedDocument::new(doc.format(), bytes))
      })
      .collect()
  }
}

/// [`PointerExtractor::extract`] with the default nesting limit.
pub fn extract(doc: &EncodedDocument, pointer: &Pointer) -> Result<EncodedDocument> {
  PointerExtractor::default().extract(doc, pointer)
}
