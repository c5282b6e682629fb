use crate::config_option::ConfigOption;
use crate::generic_node::DEFAULT_MAX_NESTING_DEPTH;
use crate::wire_format::WireFormat;
use serde::{Deserialize, Serialize};


pub const DEFAULT_DIAGNOSTICS_LIMIT: usize = 1024;

/// Settings fixed when a [`crate::WireSerde`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerdeConfig {
  pub wire_format: WireFormat,
  pub max_nesting_depth: usize,
  /// Maximum number of characters of a document shown in error messages.
  pub diagnostics_limit: usize,
}

impl Default for SerdeConfig {
  fn default() -> Self {
    Self {
      wire_format: WireFormat::Json,
      max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
      diagnostics_limit: DEFAULT_DIAGNOSTICS_LIMIT,
    }
  }
}

impl SerdeConfig {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> SerdeConfig {
    let mut config = SerdeConfig::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn of(wire_format: WireFormat) -> SerdeConfig {
    SerdeConfig::from([ConfigOption::with_wire_format(wire_format)])
  }
}
