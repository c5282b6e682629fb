//! Protocol-side response types of the database API, decoded through
//! [`crate::WireSerde`].

pub mod analyzer;
mod collection_entity;
mod document_entity;
mod error_entity;
mod response_field;

pub use self::collection_entity::{CollectionEntity, CollectionType};
pub use self::document_entity::{DocumentCreateEntity, DocumentMeta};
pub use self::error_entity::ErrorEntity;
pub use self::response_field::ResponseField;
