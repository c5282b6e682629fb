use crate::decoding_context::DecodingContext;
use crate::encoded_document::EncodedDocument;
use crate::error::Result;
use crate::pointer::Pointer;
use crate::wire_serde::WireSerde;
use serde::de::DeserializeOwned;

/// A protocol response whose metadata is decoded and whose embedded user
/// documents are kept encoded until asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<M> {
  meta: M,
  payloads: Vec<(String, EncodedDocument)>,
}

impl<M> Envelope<M> {
  pub(crate) fn new(meta: M, payloads: Vec<(String, EncodedDocument)>) -> Self {
    Self { meta, payloads }
  }

  pub fn meta(&self) -> &M {
    &self.meta
  }

  pub fn into_meta(self) -> M {
    self.meta
  }

  pub fn field_names(&self) -> impl Iterator<Item = &str> {
    self.payloads.iter().map(|(name, _)| name.as_str())
  }

  /// The encoded payload of `field`, or `None` if the field was not
  /// requested when the envelope was decoded. A requested field missing from
  /// the response is the null document.
  pub fn payload(&self, field: &str) -> Option<&EncodedDocument> {
    self
      .payloads
      .iter()
      .find(|(name, _)| name == field)
      .map(|(_, doc)| doc)
  }

  /// Decodes the payload of `field` through the user surface of `serde`.
  /// Yields `None` for an unrequested field or a null payload.
  pub fn payload_as<T>(&self, serde: &WireSerde, field: &str, context: &DecodingContext) -> Result<Option<T>>
  where
    T: DeserializeOwned + 'static, {
    match self.payload(field) {
      Some(doc) if !doc.is_null() => serde
        .decode_user_document(doc, context)
        .map(Some)
        .map_err(|err| err.within(&Pointer::root().key(field).to_string())),
      _ => Ok(None),
    }
  }
}
