#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventKind {
  Change,
  Click,
}
