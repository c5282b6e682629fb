use crate::decoding_context::DecodingContext;
use crate::encoded_document::EncodedDocument;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::wire_serde::WireSerde;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};


/// System attributes identifying one revision of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentMeta {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(rename = "_key")]
  pub key: String,
  #[serde(rename = "_rev")]
  pub rev: String,
  #[serde(rename = "_oldRev", default, skip_serializing_if = "Option::is_none")]
  pub old_rev: Option<String>,
}

/// Response of a document insert. The stored document before and after the
/// write are only present when the request asked for them, and stay encoded
/// until the caller decodes them as its own type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCreateEntity {
  envelope: Envelope<DocumentMeta>,
}

impl DocumentCreateEntity {
  pub const NEW: &'static str = "new";
  pub const OLD: &'static str = "old";

  pub fn decode(serde: &WireSerde, doc: &EncodedDocument) -> Result<Self> {
    let envelope = serde.decode_envelope::<DocumentMeta>(doc, &[Self::NEW, Self::OLD])?;
    Ok(Self { envelope })
  }

  pub fn meta(&self) -> &DocumentMeta {
    self.envelope.meta()
  }

  pub fn id(&self) -> &str {
    &self.meta().id
  }

  pub fn key(&self) -> &str {
    &self.meta().key
  }

  pub fn rev(&self) -> &str {
    &self.meta().rev
  }

  pub fn old_rev(&self) -> Option<&str> {
    self.meta().old_rev.as_deref()
  }

  pub fn new_document<T>(&self, serde: &WireSerde, context: &DecodingContext) -> Result<Option<T>>
  where
    T: DeserializeOwned + 'static, {
    self.envelope.payload_as(serde, Self::NEW, context)
  }

  pub fn old_document<T>(&self, serde: &WireSerde, context: &DecodingContext) -> Result<Option<T>>
  where
    T: DeserializeOwned + 'static, {
    self.envelope.payload_as(serde, Self::OLD, context)
  }

  /// The encoded `new` document, null when the response carried none.
  pub fn new_raw(&self) -> Option<&EncodedDocument> {
    self.envelope.payload(Self::NEW)
  }
}
