//! Wire serialization engine of a document-database client.
//!
//! Values are encoded as JSON or MessagePack through one [`WireSerde`], which
//! keeps protocol bodies and application documents on separate surfaces,
//! extracts sub-documents by pointer without typed decoding, and threads an
//! explicit [`DecodingContext`] through polymorphic decodes.

pub mod backend;
pub mod coder;
pub mod config;
pub mod config_option;
pub mod decoding_context;
pub mod diagnostics;
pub mod encoded_document;
pub mod envelope;
pub mod error;
pub mod generic_node;
pub mod model;
pub mod node_deserializer;
pub mod passthrough;
pub mod pointer;
pub mod pointer_extractor;
pub mod variant_registry;
pub mod wire_format;
pub mod wire_serde;

pub use backend::{Backend, EncodingBackend};
pub use coder::{Coder, CoderRegistry};
pub use config::SerdeConfig;
pub use config_option::ConfigOption;
pub use decoding_context::DecodingContext;
pub use diagnostics::to_display_text;
pub use encoded_document::EncodedDocument;
pub use envelope::Envelope;
pub use error::{RegistryError, Result, SerdeError};
pub use generic_node::GenericNode;
pub use node_deserializer::NodeDeserializer;
pub use passthrough::{RawBytes, RawJson};
pub use pointer::{Pointer, PointerStep};
pub use pointer_extractor::{extract, PointerExtractor};
pub use variant_registry::{VariantCall, VariantRegistry};
pub use wire_format::WireFormat;
pub use wire_serde::{WireSerde, WireSerdeBuilder};
