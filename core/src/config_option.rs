use crate::config::SerdeConfig;
use crate::wire_format::WireFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
  SetWireFormat(WireFormat),
  SetMaxNestingDepth(usize),
  SetDiagnosticsLimit(usize),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut SerdeConfig) {
    match self {
      ConfigOption::SetWireFormat(wire_format) => {
        config.wire_format = *wire_format;
      }
      ConfigOption::SetMaxNestingDepth(depth) => {
        config.max_nesting_depth = *depth;
      }
      ConfigOption::SetDiagnosticsLimit(limit) => {
        config.diagnostics_limit = *limit;
      }
    }
  }

  pub fn with_wire_format(wire_format: WireFormat) -> ConfigOption {
    ConfigOption::SetWireFormat(wire_format)
  }

  pub fn with_max_nesting_depth(depth: usize) -> ConfigOption {
    ConfigOption::SetMaxNestingDepth(depth)
  }

  pub fn with_diagnostics_limit(limit: usize) -> ConfigOption {
    ConfigOption::SetDiagnosticsLimit(limit)
  }
}
