use super::*;

#[derive(Clone, Debug)]
pub(crate) enum Effect {
  OpenUrl {
    url: String,
  },
  /// Run a selection change against a snapshot of the page.
  RenderSelection {
    page: Box<Page>,
    request_id: u64,
    value: String,
  },
}
