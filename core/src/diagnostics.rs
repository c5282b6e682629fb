//! Human-readable rendering of documents for log lines and error messages.

use crate::backend::{Backend, EncodingBackend};
use crate::encoded_document::EncodedDocument;
use crate::wire_format::WireFormat;


/// Renders `doc` as JSON text. Never fails: an unreadable document yields a
/// placeholder naming its format and size.
pub fn to_display_text(doc: &EncodedDocument) -> String {
  match doc.format() {
    WireFormat::Json => String::from_utf8_lossy(doc.as_bytes()).into_owned(),
    WireFormat::MessagePack => {
      let json = Backend::of(WireFormat::Json);
      Backend::of(WireFormat::MessagePack)
        .parse_tree(doc.as_bytes())
        .and_then(|node| json.render_tree(&node))
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_else(|err| {
          tracing::warn!("cannot render document for diagnostics: {}", err);
          placeholder(doc)
        })
    }
  }
}

/// [`to_display_text`] cut to at most `limit` characters.
pub fn to_display_text_truncated(doc: &EncodedDocument, limit: usize) -> String {
  let text = to_display_text(doc);
  match text.char_indices().nth(limit) {
    Some((cut, _)) => format!("{}…", &text[..cut]),
    None => text,
  }
}

fn placeholder(doc: &EncodedDocument) -> String {
  format!("<unreadable {} document: {} bytes>", doc.format(), doc.len())
}
