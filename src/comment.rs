use super::*;

/// A reader response to a post. The owning post id is only known at fetch
/// time and is not kept here.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Comment {
  pub(crate) body: String,
  pub(crate) email: String,
  pub(crate) name: String,
}
