use crate::error::{Result, SerdeError};
use crate::generic_node::GenericNode;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;


/// One step of a [`Pointer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointerStep {
  Key(String),
  /// A canonical decimal token. Applied to an object it looks up the key
  /// spelled by the number.
  Index(usize),
}

impl PointerStep {
  fn parse(token: &str) -> PointerStep {
    match parse_index(token) {
      Some(index) => PointerStep::Index(index),
      None => PointerStep::Key(token.replace("~1", "/").replace("~0", "~")),
    }
  }

  fn resolve<'a>(&self, node: &'a GenericNode) -> Option<&'a GenericNode> {
    match (self, node) {
      (PointerStep::Key(key), GenericNode::Object(map)) => map.get(key),
      (PointerStep::Index(index), GenericNode::Object(map)) => map.get(&index.to_string()),
      (PointerStep::Index(index), GenericNode::Array(items)) => items.get(*index),
      _ => None,
    }
  }
}

// Leading zeros are not indices ("01" is a key), mirroring RFC 6901.
fn parse_index(token: &str) -> Option<usize> {
  let canonical = token == "0" || (!token.is_empty() && !token.starts_with('0'));
  if canonical && token.bytes().all(|b| b.is_ascii_digit()) {
    token.parse().ok()
  } else {
    None
  }
}

impl Display for PointerStep {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      PointerStep::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
      PointerStep::Index(index) => write!(f, "{}", index),
    }
  }
}

/// Slash-delimited path of keys and indices addressing a sub-node.
///
/// The empty string addresses the root; every other pointer starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
  steps: Vec<PointerStep>,
}

impl Pointer {
  pub fn root() -> Self {
    Self::default()
  }

  pub fn parse(text: &str) -> Result<Self> {
    if text.is_empty() {
      return Ok(Self::root());
    }
    let Some(rest) = text.strip_prefix('/') else {
      return Err(SerdeError::invalid_pointer(text, "must be empty or start with '/'"));
    };
    if let Some(position) = invalid_escape(rest) {
      return Err(SerdeError::invalid_pointer(
        text,
        format!("'~' at position {} must be followed by '0' or '1'", position + 1),
      ));
    }
    Ok(Self {
      steps: rest.split('/').map(PointerStep::parse).collect(),
    })
  }

  /// Returns a new pointer with `key` appended.
  pub fn key(mut self, key: impl Into<String>) -> Self {
    self.steps.push(PointerStep::Key(key.into()));
    self
  }

  /// Returns a new pointer with `index` appended.
  pub fn index(mut self, index: usize) -> Self {
    self.steps.push(PointerStep::Index(index));
    self
  }

  pub fn steps(&self) -> &[PointerStep] {
    &self.steps
  }

  pub fn is_root(&self) -> bool {
    self.steps.is_empty()
  }

  /// Walks `node`; `None` when a step targets a missing key or index.
  pub fn resolve<'a>(&self, node: &'a GenericNode) -> Option<&'a GenericNode> {
    self.steps.iter().try_fold(node, |current, step| step.resolve(current))
  }
}

fn invalid_escape(text: &str) -> Option<usize> {
  let bytes = text.as_bytes();
  bytes
    .iter()
    .enumerate()
    .find(|(i, b)| **b == b'~' && !matches!(bytes.get(i + 1), Some(b'0') | Some(b'1')))
    .map(|(i, _)| i)
}

impl FromStr for Pointer {
  type Err = SerdeError;

  fn from_str(s: &str) -> Result<Self> {
    Pointer::parse(s)
  }
}

impl TryFrom<&str> for Pointer {
  type Error = SerdeError;

  fn try_from(value: &str) -> Result<Self> {
    Pointer::parse(value)
  }
}

impl Display for Pointer {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    for step in &self.steps {
      write!(f, "/{}", step)?;
    }
    Ok(())
  }
}
