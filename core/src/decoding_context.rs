use std::collections::BTreeMap;


/// Per-call hints consulted by custom decoders.
///
/// Built once before a top-level decode and handed down by reference to every
/// nested decode of that call. There is no way to mutate it afterwards, and
/// the engine never keeps it beyond the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodingContext {
  attributes: BTreeMap<String, String>,
}

impl DecodingContext {
  /// Stream transaction the decoded documents were read in.
  pub const STREAM_TRANSACTION_ID: &'static str = "stream_transaction_id";
  /// Collection the decoded documents are expected to belong to; used to
  /// resolve bare keys into document ids.
  pub const COLLECTION: &'static str = "collection";

  pub fn empty() -> Self {
    Self::default()
  }

  pub fn builder() -> DecodingContextBuilder {
    DecodingContextBuilder::default()
  }

  pub(crate) fn from_attributes(attributes: BTreeMap<String, String>) -> Self {
    Self { attributes }
  }

  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).map(String::as_str)
  }

  pub fn stream_transaction_id(&self) -> Option<&str> {
    self.attribute(Self::STREAM_TRANSACTION_ID)
  }

  pub fn collection(&self) -> Option<&str> {
    self.attribute(Self::COLLECTION)
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty()
  }

  pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
    self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Turns a bare key into `collection/key` using the collection hint.
  /// Values that already contain a `/` are returned as they are.
  pub fn resolve_document_id(&self, key_or_id: &str) -> Option<String> {
    if key_or_id.contains('/') {
      return Some(key_or_id.to_string());
    }
    self.collection().map(|collection| format!("{}/{}", collection, key_or_id))
  }
}

#[derive(Debug, Clone, Default)]
pub struct DecodingContextBuilder {
  attributes: BTreeMap<String, String>,
}

impl DecodingContextBuilder {
  pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }

  pub fn stream_transaction_id(self, id: impl Into<String>) -> Self {
    self.attribute(DecodingContext::STREAM_TRANSACTION_ID, id)
  }

  pub fn collection(self, name: impl Into<String>) -> Self {
    self.attribute(DecodingContext::COLLECTION, name)
  }

  pub fn build(self) -> DecodingContext {
    DecodingContext {
      attributes: self.attributes,
    }
  }
}

static_assertions::assert_impl_all!(DecodingContext: Send, Sync);
