use crate::pointer::Pointer;
use strum::{Display, EnumIter, IntoStaticStr};


/// Top-level fields every database response may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum ResponseField {
  Result,
  Error,
  ErrorNum,
  ErrorMessage,
  Code,
}

impl ResponseField {
  pub fn name(&self) -> &'static str {
    (*self).into()
  }

  pub fn pointer(&self) -> Pointer {
    Pointer::root().key(self.name())
  }
}
