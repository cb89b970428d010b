use super::*;

/// Everything one refresh cycle touched, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Refresh {
  pub(crate) attached: Option<Vec<NodeId>>,
  pub(crate) content: NodeId,
  pub(crate) detached: Option<Vec<NodeId>>,
  pub(crate) main: NodeId,
}
