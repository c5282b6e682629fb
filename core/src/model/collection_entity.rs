use crate::encoded_document::EncodedDocument;
use crate::error::Result;
use crate::model::response_field::ResponseField;
use crate::wire_serde::WireSerde;
use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionType {
  Document,
  Edges,
}

impl CollectionType {
  pub fn code(&self) -> u8 {
    match self {
      CollectionType::Document => 2,
      CollectionType::Edges => 3,
    }
  }

  pub fn from_code(code: u8) -> Option<CollectionType> {
    match code {
      2 => Some(CollectionType::Document),
      3 => Some(CollectionType::Edges),
      _ => None,
    }
  }
}

impl Serialize for CollectionType {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u8(self.code())
  }
}

impl<'de> Deserialize<'de> for CollectionType {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let code = u8::deserialize(deserializer)?;
    CollectionType::from_code(code).ok_or_else(|| D::Error::custom(format!("unknown collection type {}", code)))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntity {
  pub id: String,
  pub name: String,
  #[serde(rename = "type")]
  pub collection_type: CollectionType,
  #[serde(default)]
  pub is_system: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<u32>,
}

impl CollectionEntity {
  /// Decodes the collection list held under `/result` of a listing response.
  pub fn decode_list(serde: &WireSerde, doc: &EncodedDocument) -> Result<Vec<CollectionEntity>> {
    serde.decode_protocol_at(doc, &ResponseField::Result.pointer())
  }
}
