/// A registered event handler. Handlers are values rather than closures, so
/// removing a listener matches the exact registration by equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Listener {
  SelectionChange,
  ToggleComments { post_id: String },
}
