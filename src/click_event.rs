use super::*;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ClickEvent {
  pub(crate) target: NodeId,
}
