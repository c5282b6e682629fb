use crate::backend::{Backend, EncodingBackend};
use crate::coder::{Coder, CoderRegistry, CoderRegistryBuilder};
use crate::config::SerdeConfig;
use crate::decoding_context::DecodingContext;
use crate::diagnostics::to_display_text_truncated;
use crate::encoded_document::EncodedDocument;
use crate::envelope::Envelope;
use crate::error::{RegistryError, Result, SerdeError};
use crate::model::analyzer::SearchAnalyzer;
use crate::node_deserializer::NodeDeserializer;
use crate::passthrough::{RawBytes, RawJson};
use crate::pointer::Pointer;
use crate::pointer_extractor::PointerExtractor;
use crate::wire_format::WireFormat;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::{Any, TypeId};


/// Encoder/decoder for both the protocol surface (request and response
/// bodies defined by the database API) and the user surface (documents owned
/// by the application).
///
/// Built once from a [`SerdeConfig`] and shared freely afterwards. The
/// protocol surface decodes [`SearchAnalyzer`] through its variant registry
/// unless another protocol coder is supplied for it.
#[derive(Debug, Clone)]
pub struct WireSerde {
  config: SerdeConfig,
  backend: Backend,
  json: Backend,
  extractor: PointerExtractor,
  protocol: CoderRegistry,
  user: CoderRegistry,
}

impl Default for WireSerde {
  fn default() -> Self {
    Self::new(SerdeConfig::default())
  }
}

impl WireSerde {
  pub fn new(config: SerdeConfig) -> Self {
    Self::builder(config).build()
  }

  pub fn builder(config: SerdeConfig) -> WireSerdeBuilder {
    WireSerdeBuilder {
      config,
      protocol: CoderRegistry::builder(),
      user: CoderRegistry::builder(),
    }
  }

  pub fn config(&self) -> &SerdeConfig {
    &self.config
  }

  pub fn wire_format(&self) -> WireFormat {
    self.config.wire_format
  }

  pub fn protocol_coders(&self) -> &CoderRegistry {
    &self.protocol
  }

  pub fn user_coders(&self) -> &CoderRegistry {
    &self.user
  }

  // --- protocol surface

  pub fn encode_protocol<T>(&self, value: &T) -> Result<EncodedDocument>
  where
    T: Serialize + 'static, {
    let bytes = match self.protocol.find::<T>() {
      Some(coder) => self.backend.render_tree(&coder.encode(value)?)?,
      None => self.backend.encode(value)?,
    };
    Ok(EncodedDocument::new(self.wire_format(), bytes))
  }

  pub fn decode_protocol<T>(&self, doc: &EncodedDocument) -> Result<T>
  where
    T: DeserializeOwned + 'static, {
    self.check_format(doc)?;
    decode_with(&self.backend, &self.protocol, doc.as_bytes(), &DecodingContext::empty())
  }

  /// Decodes only the node addressed by `pointer`; an absent node decodes as null.
  pub fn decode_protocol_at<T>(&self, doc: &EncodedDocument, pointer: &Pointer) -> Result<T>
  where
    T: DeserializeOwned + 'static, {
    let extracted = self.extract(doc, pointer)?;
    self
      .decode_protocol(&extracted)
      .map_err(|err| err.within(&pointer.to_string()))
  }

  // --- user surface

  /// Encodes an application document. [`RawBytes`] is passed through after a
  /// well-formedness check, [`RawJson`] is transcoded into the active format.
  pub fn encode_user<T>(&self, value: &T) -> Result<Vec<u8>>
  where
    T: Serialize + 'static, {
    let any = value as &dyn Any;
    if let Some(raw) = any.downcast_ref::<RawBytes>() {
      self.backend.parse_tree(raw.as_bytes())?;
      return Ok(raw.as_bytes().to_vec());
    }
    if let Some(raw) = any.downcast_ref::<RawJson>() {
      return self.transcode_from_json(raw.as_str());
    }
    match self.user.find::<T>() {
      Some(coder) => self.backend.render_tree(&coder.encode(value)?),
      None => self.backend.encode(value),
    }
  }

  pub fn encode_user_document<T>(&self, value: &T) -> Result<EncodedDocument>
  where
    T: Serialize + 'static, {
    Ok(EncodedDocument::new(self.wire_format(), self.encode_user(value)?))
  }

  /// Decodes application bytes in the active format. `context` reaches every
  /// user coder and variant decoder involved, however deeply nested, including
  /// variant members held in collections, options and struct fields.
  pub fn decode_user<T>(&self, bytes: &[u8], context: &DecodingContext) -> Result<T>
  where
    T: DeserializeOwned + 'static, {
    let target = TypeId::of::<T>();
    if target == TypeId::of::<RawBytes>() {
      self.backend.parse_tree(bytes)?;
      return cast(RawBytes::new(bytes));
    }
    if target == TypeId::of::<RawJson>() {
      return cast(self.transcode_to_json(bytes)?);
    }
    decode_with(&self.backend, &self.user, bytes, context)
  }

  pub fn decode_user_document<T>(&self, doc: &EncodedDocument, context: &DecodingContext) -> Result<T>
  where
    T: DeserializeOwned + 'static, {
    self.check_format(doc)?;
    self.decode_user(doc.as_bytes(), context)
  }

  pub fn decode_user_at<T>(&self, doc: &EncodedDocument, pointer: &Pointer, context: &DecodingContext) -> Result<T>
  where
    T: DeserializeOwned + 'static, {
    let extracted = self.extract(doc, pointer)?;
    self
      .decode_user_document(&extracted, context)
      .map_err(|err| err.within(&pointer.to_string()))
  }

  // --- extraction and envelopes

  pub fn extract(&self, doc: &EncodedDocument, pointer: &Pointer) -> Result<EncodedDocument> {
    self.check_format(doc)?;
    self.extractor.extract(doc, pointer)
  }

  pub fn extract_many(&self, doc: &EncodedDocument, pointers: &[Pointer]) -> Result<Vec<EncodedDocument>> {
    self.check_format(doc)?;
    self.extractor.extract_many(doc, pointers)
  }

  /// Decodes the protocol metadata `M` of `doc` and keeps the top-level
  /// `fields` as encoded payloads for later user decoding.
  pub fn decode_envelope<M>(&self, doc: &EncodedDocument, fields: &[&str]) -> Result<Envelope<M>>
  where
    M: DeserializeOwned + 'static, {
    let meta = self.decode_protocol::<M>(doc)?;
    let pointers = fields.iter().map(|field| Pointer::root().key(*field)).collect::<Vec<_>>();
    let payloads = self.extractor.extract_many(doc, &pointers)?;
    Ok(Envelope::new(
      meta,
      fields.iter().map(|field| field.to_string()).zip(payloads).collect(),
    ))
  }

  /// JSON text of `doc` cut to the configured diagnostics limit. Never fails.
  pub fn display_text(&self, doc: &EncodedDocument) -> String {
    to_display_text_truncated(doc, self.config.diagnostics_limit)
  }

  fn check_format(&self, doc: &EncodedDocument) -> Result<()> {
    if doc.format() == self.wire_format() {
      Ok(())
    } else {
      Err(SerdeError::FormatMismatch {
        expected: self.wire_format(),
        actual: doc.format(),
      })
    }
  }

  fn transcode_from_json(&self, text: &str) -> Result<Vec<u8>> {
    let node = self.json.parse_tree(text.as_bytes())?;
    match self.wire_format() {
      WireFormat::Json => Ok(text.as_bytes().to_vec()),
      WireFormat::MessagePack => self.backend.render_tree(&node),
    }
  }

  fn transcode_to_json(&self, bytes: &[u8]) -> Result<RawJson> {
    let node = self.backend.parse_tree(bytes)?;
    match self.wire_format() {
      WireFormat::Json => String::from_utf8(bytes.to_vec())
        .map(RawJson)
        .map_err(|err| SerdeError::malformed(WireFormat::Json, Some(err.utf8_error().valid_up_to()), err.to_string())),
      WireFormat::MessagePack => serde_json::to_string(&node)
        .map(RawJson)
        .map_err(|err| SerdeError::unsupported_type::<RawJson>(err.to_string())),
    }
  }
}

/// A coder registered for `T` decodes the whole tree; otherwise `T`'s serde
/// mapping walks the tree with `context` attached to every nested value.
fn decode_with<T>(backend: &Backend, registry: &CoderRegistry, bytes: &[u8], context: &DecodingContext) -> Result<T>
where
  T: DeserializeOwned + 'static, {
  let tree = backend.parse_tree(bytes)?;
  match registry.find::<T>() {
    Some(coder) => coder.decode(&tree, context),
    None => T::deserialize(NodeDeserializer::new(&tree, context)),
  }
}

fn cast<T: 'static, U: 'static>(value: U) -> Result<T> {
  (Box::new(value) as Box<dyn Any>)
    .downcast::<T>()
    .map(|boxed| *boxed)
    .map_err(|_| SerdeError::unsupported_type::<T>("passthrough target does not match"))
}

static_assertions::assert_impl_all!(WireSerde: Send, Sync, Clone);

/// Collects the coders of both surfaces before the codec is frozen.
pub struct WireSerdeBuilder {
  config: SerdeConfig,
  protocol: CoderRegistryBuilder,
  user: CoderRegistryBuilder,
}

impl WireSerdeBuilder {
  pub fn protocol_coder<T, C>(mut self, coder: C) -> std::result::Result<Self, RegistryError>
  where
    T: 'static,
    C: Coder<T> + 'static, {
    self.protocol = self.protocol.register::<T, C>(coder)?;
    Ok(self)
  }

  pub fn user_coder<T, C>(mut self, coder: C) -> std::result::Result<Self, RegistryError>
  where
    T: 'static,
    C: Coder<T> + 'static, {
    self.user = self.user.register::<T, C>(coder)?;
    Ok(self)
  }

  pub fn build(self) -> WireSerde {
    let protocol = self
      .protocol
      .register_if_absent::<SearchAnalyzer, _>(SearchAnalyzer::registry())
      .build();
    let user = self.user.build();
    tracing::debug!(
      "building wire serde: format = {}, max_nesting_depth = {}, protocol_coders = {}, user_coders = {}",
      self.config.wire_format,
      self.config.max_nesting_depth,
      protocol.len(),
      user.len()
    );
    let extractor = PointerExtractor::new(self.config.max_nesting_depth);
    WireSerde {
      backend: extractor.backend(self.config.wire_format),
      json: extractor.backend(WireFormat::Json),
      extractor,
      config: self.config,
      protocol,
      user,
    }
  }
}
