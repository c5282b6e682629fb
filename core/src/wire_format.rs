use crate::error::{Result, SerdeError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};


/// Byte-level encoding negotiated for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireFormat {
  #[default]
  #[strum(to_string = "JSON")]
  Json,
  #[strum(to_string = "MessagePack")]
  MessagePack,
}

const JSON_CONTENT_TYPES: &[&str] = &["application/json", "text/json"];
const MESSAGE_PACK_CONTENT_TYPES: &[&str] = &[
  "application/x-msgpack",
  "application/msgpack",
  "application/vnd.msgpack",
];

impl WireFormat {
  /// Content type sent with request bodies of this format.
  pub fn content_type(&self) -> &'static str {
    match self {
      WireFormat::Json => JSON_CONTENT_TYPES[0],
      WireFormat::MessagePack => MESSAGE_PACK_CONTENT_TYPES[0],
    }
  }

  pub fn is_textual(&self) -> bool {
    matches!(self, WireFormat::Json)
  }

  /// Resolves a `Content-Type` header value, ignoring parameters and case.
  pub fn from_content_type(content_type: &str) -> Result<WireFormat> {
    let essence = content_type
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase();
    if JSON_CONTENT_TYPES.contains(&essence.as_str()) {
      Ok(WireFormat::Json)
    } else if MESSAGE_PACK_CONTENT_TYPES.contains(&essence.as_str()) {
      Ok(WireFormat::MessagePack)
    } else {
      Err(SerdeError::UnsupportedContentType(content_type.to_string()))
    }
  }
}
