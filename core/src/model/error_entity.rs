use crate::encoded_document::EncodedDocument;
use crate::error::Result;
use crate::model::response_field::ResponseField;
use crate::wire_serde::WireSerde;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};


/// Error body returned by the server alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorEntity {
  pub error: bool,
  pub error_num: i64,
  pub error_message: String,
  pub code: u16,
}

impl ErrorEntity {
  /// Decodes the error body of `doc`. A body that does not decode still
  /// yields an entity whose message is the document's display text.
  pub fn from_response(serde: &WireSerde, doc: &EncodedDocument) -> ErrorEntity {
    serde.decode_protocol::<ErrorEntity>(doc).unwrap_or_else(|err| {
      tracing::debug!("error body did not decode: {}", err);
      ErrorEntity {
        error: true,
        error_message: serde.display_text(doc),
        ..ErrorEntity::default()
      }
    })
  }

  /// `true` when the response carries `"error": true`.
  pub fn is_error_response(serde: &WireSerde, doc: &EncodedDocument) -> Result<bool> {
    let flag = serde.decode_protocol_at::<Option<bool>>(doc, &ResponseField::Error.pointer())?;
    Ok(flag.unwrap_or(false))
  }
}

impl Display for ErrorEntity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Response: {}, Error: {} - {}",
      self.code, self.error_num, self.error_message
    )
  }
}
